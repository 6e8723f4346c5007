use crate::config::AnimationConfig;
use crate::cubelet::CubeletState;
use crate::orientation::GlobalOrientation;
use crate::rotation::{LayerMove, LayerRotation};
use crate::scene::{compose, Scene};
use crate::scheduler::IdleScheduler;
use rand::Rng;

/// Animation state
///
/// Owns every piece of mutable animation state. Pointer events only reach the
/// orientation; cubelets and the layer turn change only inside [`AnimationContext::tick`].
pub struct AnimationContext<R: Rng> {
    config: AnimationConfig,
    cubelets: CubeletState,
    rotation: LayerRotation,
    scheduler: IdleScheduler,
    orientation: GlobalOrientation,
    rng: R,
    /// Ticks since creation
    frames: u64,
}

impl<R: Rng> AnimationContext<R> {
    pub fn new(config: AnimationConfig, mut rng: R) -> Self {
        let scheduler = IdleScheduler::new(config.move_interval.clone(), &mut rng);
        AnimationContext {
            cubelets: CubeletState::new(),
            rotation: LayerRotation::new(config.speed),
            orientation: GlobalOrientation::new(&config),
            scheduler,
            rng,
            frames: 0,
            config,
        }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn cubelets(&self) -> &CubeletState {
        &self.cubelets
    }

    pub fn rotation(&self) -> &LayerRotation {
        &self.rotation
    }

    pub fn orientation(&self) -> &GlobalOrientation {
        &self.orientation
    }

    pub fn scheduler(&self) -> &IdleScheduler {
        &self.scheduler
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_dragging(&self) -> bool {
        self.orientation.is_dragging()
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.orientation.pointer_down(x, y);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.orientation.pointer_move(x, y);
    }

    pub fn pointer_up(&mut self) {
        self.orientation.pointer_up();
    }

    /// Starts `turn` right away if nothing is in flight and no drag is active.
    pub fn request_turn(&mut self, turn: LayerMove) -> bool {
        !self.is_dragging() && self.rotation.start(turn)
    }

    /// One frame: orientation, then layer progress, then the scheduler.
    ///
    /// `dt` is the wall time since the previous tick in seconds and only feeds the
    /// scheduler; everything else moves a fixed step per tick. Returns the turn that
    /// completed during this tick, if any.
    pub fn tick(&mut self, dt: f64) -> Option<LayerMove> {
        self.frames += 1;
        let dragging = self.is_dragging();
        self.orientation.tick();
        let completed = self.rotation.advance(dragging, &mut self.cubelets);
        if !dragging {
            let idle = !self.rotation.is_animating();
            if let Some(turn) = self.scheduler.advance(dt, idle, &mut self.rng) {
                self.rotation.start(turn);
            }
        }
        completed
    }

    /// The scene for the current state.
    pub fn scene(&self) -> Scene {
        compose(
            &self.cubelets,
            &self.rotation,
            self.is_dragging(),
            self.orientation.transform(),
            self.config.offset(),
            self.config.box_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cubelet::{Axis, Layer};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const DT: f64 = 1.0 / 60.0;

    fn context(seed: u64) -> AnimationContext<ChaCha8Rng> {
        AnimationContext::new(AnimationConfig::default(), ChaCha8Rng::seed_from_u64(seed))
    }

    #[test]
    fn scheduler_starts_a_turn_when_idle() {
        let mut context = context(11);
        let mut started = false;
        for _ in 0..120 {
            context.tick(DT);
            started |= context.rotation().is_animating();
        }
        assert!(started);
    }

    #[test]
    fn drag_blocks_new_turns() {
        let mut context = context(12);
        context.pointer_down(0.0, 0.0);
        for _ in 0..600 {
            context.tick(DT);
            assert!(!context.rotation().is_animating());
        }
        assert!(!context.request_turn(LayerMove::new(Axis::X, Layer::Middle)));
        assert_eq!(context.cubelets(), &CubeletState::new());
    }

    #[test]
    fn requested_turn_completes_after_fifty_ticks() {
        let mut context = context(13);
        assert!(context.request_turn(LayerMove::new(Axis::X, Layer::Positive)));
        let mut completed_at = None;
        for frame in 1..=60 {
            if context.tick(DT) == Some(LayerMove::new(Axis::X, Layer::Positive)) {
                completed_at = Some(frame);
                break;
            }
        }
        assert_eq!(completed_at, Some(50));
    }

    #[test]
    fn scene_reflects_turn_in_flight() {
        let mut context = context(14);
        context.request_turn(LayerMove::new(Axis::Z, Layer::Middle));
        context.tick(DT);
        let scene = context.scene();
        assert_eq!(scene.turning.map(|group| group.cubelets.len()), Some(9));
    }
}
