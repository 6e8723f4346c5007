use crate::config::AnimationConfig;
use log::trace;
use std::ops::{Add, Mul, Sub};

/// Rotation angles in radians, applied in X (pitch), Y (yaw), Z (roll) order.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Euler {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

impl Euler {
    pub const ZERO: Euler = Euler {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    pub fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Euler { pitch, yaw, roll }
    }
}

impl Add for Euler {
    type Output = Euler;

    fn add(self, other: Euler) -> Euler {
        Euler::new(
            self.pitch + other.pitch,
            self.yaw + other.yaw,
            self.roll + other.roll,
        )
    }
}

impl Sub for Euler {
    type Output = Euler;

    fn sub(self, other: Euler) -> Euler {
        Euler::new(
            self.pitch - other.pitch,
            self.yaw - other.yaw,
            self.roll - other.roll,
        )
    }
}

impl Mul<f64> for Euler {
    type Output = Euler;

    fn mul(self, factor: f64) -> Euler {
        Euler::new(self.pitch * factor, self.yaw * factor, self.roll * factor)
    }
}

/// Whole-cube orientation: autonomous spin blended with drag-to-rotate.
///
/// `current` and `target` only carry pitch and yaw; roll comes from the spin alone.
#[derive(Clone, Debug)]
pub struct GlobalOrientation {
    dragging: bool,
    drag_anchor: [f64; 2],
    base: Euler,
    target: Euler,
    current: Euler,
    auto_spin: Euler,
    spin_rate: Euler,
    sensitivity: f64,
    lerp_idle: f64,
    lerp_drag: f64,
}

impl GlobalOrientation {
    pub fn new(config: &AnimationConfig) -> Self {
        GlobalOrientation {
            dragging: false,
            drag_anchor: [0.0, 0.0],
            base: Euler::ZERO,
            target: Euler::ZERO,
            current: Euler::ZERO,
            auto_spin: Euler::ZERO,
            spin_rate: config.auto_spin,
            sensitivity: config.sensitivity,
            lerp_idle: config.lerp_idle.clamp(0.0, 1.0),
            lerp_drag: config.lerp_drag.clamp(0.0, 1.0),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn base(&self) -> Euler {
        self.base
    }

    pub fn target(&self) -> Euler {
        self.target
    }

    pub fn current(&self) -> Euler {
        self.current
    }

    pub fn auto_spin(&self) -> Euler {
        self.auto_spin
    }

    /// Starts a drag at screen position `(x, y)`.
    ///
    /// The spin's pitch and yaw are folded into `current` first so the cube does not
    /// jump. Roll restarts from zero, matching the zero roll shown while dragging.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        if !self.dragging {
            self.current.pitch += self.auto_spin.pitch;
            self.current.yaw += self.auto_spin.yaw;
            self.auto_spin = Euler::ZERO;
        }
        self.dragging = true;
        self.drag_anchor = [x, y];
        self.base = self.current;
        self.target = self.current;
        trace!("pointer down at ({}, {})", x, y);
    }

    /// Vertical movement drives pitch, horizontal drives yaw. Ignored unless dragging.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if !self.dragging {
            return;
        }
        let delta_x = x - self.drag_anchor[0];
        let delta_y = y - self.drag_anchor[1];
        self.target = Euler::new(
            self.base.pitch + delta_y * self.sensitivity,
            self.base.yaw + delta_x * self.sensitivity,
            0.0,
        );
    }

    pub fn pointer_up(&mut self) {
        if self.dragging {
            trace!("pointer up");
        }
        self.dragging = false;
    }

    /// One frame of smoothing, plus spin accumulation when not dragging.
    pub fn tick(&mut self) {
        let lerp = if self.dragging {
            self.lerp_drag
        } else {
            self.auto_spin = self.auto_spin + self.spin_rate;
            self.lerp_idle
        };
        self.current = self.current + (self.target - self.current) * lerp;
        self.current.roll = 0.0;
    }

    /// Final whole-cube rotation for this frame.
    pub fn transform(&self) -> Euler {
        if self.dragging {
            Euler::new(self.current.pitch, self.current.yaw, 0.0)
        } else {
            Euler::new(
                self.current.pitch + self.auto_spin.pitch,
                self.current.yaw + self.auto_spin.yaw,
                self.auto_spin.roll,
            )
        }
    }
}
