//! A 3x3x3 cube of independently addressable cubelets that turns random layers while
//! idle and follows the pointer when dragged.
//!
//! [`state::AnimationContext`] owns the whole animation and is driven one tick at a
//! time; [`scene::compose`] turns it into a [`scene::Scene`] for a renderer.

pub mod config;
pub mod cubelet;
pub mod easing;
pub mod error;
pub mod graphics;
pub mod math;
pub mod orientation;
pub mod rotation;
pub mod scene;
pub mod scheduler;
pub mod state;
pub mod surface;
pub mod texture;
pub mod vertex;
pub mod widget;

pub use error::{Error, Result};
