use crate::cubelet::{Axis, CubeletState, Layer};
use crate::easing::ease_in_out_cubic;
use log::debug;
use rand::Rng;
use std::f64::consts::FRAC_PI_2;
use std::fmt;

/// Progress this close to 1 counts as finished, absorbing float drift from summing `speed`.
const COMPLETION_EPSILON: f64 = 1e-9;

/// A quarter turn of one layer. Closed over the 3x3 axis/layer domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerMove {
    pub axis: Axis,
    pub layer: Layer,
}

impl LayerMove {
    pub fn new(axis: Axis, layer: Layer) -> Self {
        LayerMove { axis, layer }
    }

    /// Axis and layer drawn uniformly and independently.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        LayerMove {
            axis: Axis::ALL[rng.random_range(0..Axis::ALL.len())],
            layer: Layer::ALL[rng.random_range(0..Layer::ALL.len())],
        }
    }

    pub fn all() -> impl Iterator<Item = LayerMove> {
        Axis::ALL
            .into_iter()
            .flat_map(|axis| Layer::ALL.into_iter().map(move |layer| LayerMove { axis, layer }))
    }
}

impl fmt::Display for LayerMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:+}", self.axis, self.layer.value())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Stage {
    Idle,
    Animating { turn: LayerMove, progress: f64 },
}

/// Owns the single in-flight layer turn.
#[derive(Clone, Debug)]
pub struct LayerRotation {
    stage: Stage,
    speed: f64,
}

impl LayerRotation {
    /// `speed` is the progress gained per tick; it is clamped into (0, 1].
    pub fn new(speed: f64) -> Self {
        let speed = if speed.is_finite() && speed > 0.0 {
            speed.min(1.0)
        } else {
            1.0
        };
        LayerRotation {
            stage: Stage::Idle,
            speed,
        }
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.stage, Stage::Animating { .. })
    }

    /// The turn in flight, if any.
    pub fn active(&self) -> Option<LayerMove> {
        match self.stage {
            Stage::Animating { turn, .. } => Some(turn),
            Stage::Idle => None,
        }
    }

    pub fn progress(&self) -> Option<f64> {
        match self.stage {
            Stage::Animating { progress, .. } => Some(progress),
            Stage::Idle => None,
        }
    }

    /// Starts `turn` at progress 0. Refused while another turn is in flight.
    pub fn start(&mut self, turn: LayerMove) -> bool {
        if self.is_animating() {
            return false;
        }
        debug!("starting layer turn {}", turn);
        self.stage = Stage::Animating {
            turn,
            progress: 0.0,
        };
        true
    }

    /// Advances one tick. A drag holds progress where it is.
    ///
    /// On completion the finished turn is applied to `cubelets` exactly once and the
    /// machine returns to idle; the finished turn is returned.
    pub fn advance(&mut self, dragging: bool, cubelets: &mut CubeletState) -> Option<LayerMove> {
        if dragging {
            return None;
        }
        let Stage::Animating { turn, progress } = self.stage else {
            return None;
        };
        let progress = (progress + self.speed).min(1.0);
        if progress >= 1.0 - COMPLETION_EPSILON {
            cubelets.apply_rotation(turn.axis, turn.layer);
            self.stage = Stage::Idle;
            debug!("completed layer turn {}", turn);
            Some(turn)
        } else {
            self.stage = Stage::Animating { turn, progress };
            None
        }
    }

    /// Angle of the turning layer's group, in radians. Identity while dragging or idle.
    pub fn visual_angle(&self, dragging: bool) -> f64 {
        match self.stage {
            Stage::Animating { progress, .. } if !dragging => {
                ease_in_out_cubic(progress) * FRAC_PI_2
            }
            _ => 0.0,
        }
    }
}
