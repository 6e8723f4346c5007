use crate::rotation::LayerMove;
use log::trace;
use rand::Rng;
use std::ops::Range;

/// Proposes random layer turns at randomized intervals.
///
/// The countdown is driven by elapsed seconds handed in by the tick handler, so tests
/// can run it without a clock.
#[derive(Clone, Debug)]
pub struct IdleScheduler {
    band: Range<f64>,
    remaining: f64,
}

impl IdleScheduler {
    /// `band` is the interval range in seconds. An empty or invalid band collapses to
    /// its start.
    pub fn new<R: Rng>(band: Range<f64>, rng: &mut R) -> Self {
        let mut scheduler = IdleScheduler {
            band,
            remaining: 0.0,
        };
        scheduler.remaining = scheduler.roll(rng);
        scheduler
    }

    /// Seconds until the next firing.
    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    fn roll<R: Rng>(&self, rng: &mut R) -> f64 {
        let start = self.band.start.max(0.0);
        if self.band.end > start {
            rng.random_range(start..self.band.end)
        } else {
            start
        }
    }

    /// Runs the countdown for `dt` seconds.
    ///
    /// When it fires the interval is re-rolled and, if `can_start` holds, a random turn
    /// is returned. A firing that cannot start anything is dropped, never queued.
    pub fn advance<R: Rng>(
        &mut self,
        dt: f64,
        can_start: bool,
        rng: &mut R,
    ) -> Option<LayerMove> {
        if !dt.is_finite() || dt <= 0.0 {
            return None;
        }
        self.remaining -= dt;
        if self.remaining > 0.0 {
            return None;
        }
        // A long stall fires once, not once per missed interval.
        self.remaining = self.roll(rng).max(f64::EPSILON);
        if can_start {
            Some(LayerMove::random(rng))
        } else {
            trace!("scheduler fired while busy, skipping");
            None
        }
    }
}
