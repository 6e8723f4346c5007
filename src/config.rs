use crate::orientation::Euler;
use clap::Parser;
use std::ops::Range;

/// Command line options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Target frames per second
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Layer turn progress gained per frame
    #[arg(long, default_value_t = 0.02)]
    pub speed: f64,

    /// Drag sensitivity in radians per pixel
    #[arg(long, default_value_t = 0.005)]
    pub sensitivity: f64,

    /// Seed for layer turns and brushed textures
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start with the debug overlay visible
    #[arg(long)]
    pub debug: bool,

    /// Initial zoom level
    #[arg(long, default_value_t = 1.0)]
    pub zoom: f64,
}

/// Every tunable of the animation core.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationConfig {
    /// Layer turn progress per tick
    pub speed: f64,
    /// Radians of rotation per pixel of drag
    pub sensitivity: f64,
    /// Smoothing factor per tick when not dragging
    pub lerp_idle: f64,
    /// Smoothing factor per tick while dragging
    pub lerp_drag: f64,
    /// Spin added per idle tick
    pub auto_spin: Euler,
    /// Seconds between scheduler firings
    pub move_interval: Range<f64>,
    /// Cubelet edge used for the grid pitch
    pub size: f64,
    pub gap: f64,
    /// Edge of the drawn box, slightly smaller than `size`
    pub box_size: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            speed: 0.02,
            sensitivity: 0.005,
            lerp_idle: 0.1,
            lerp_drag: 0.15,
            auto_spin: Euler::new(0.003, 0.005, 0.002),
            move_interval: 0.8..1.6,
            size: 0.98,
            gap: 0.03,
            box_size: 0.95,
        }
    }
}

impl AnimationConfig {
    /// Distance between neighbouring grid slots.
    pub fn offset(&self) -> f64 {
        self.size + self.gap
    }
}

impl From<&Args> for AnimationConfig {
    fn from(args: &Args) -> Self {
        AnimationConfig {
            speed: args.speed,
            sensitivity: args.sensitivity,
            ..AnimationConfig::default()
        }
    }
}
