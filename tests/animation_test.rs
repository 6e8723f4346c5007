//! Drives the animation core tick by tick, without a clock or a terminal
use cubelets::config::AnimationConfig;
use cubelets::cubelet::{Axis, CubeletState, FaceAssignment, GridPos, Layer, CUBELET_COUNT};
use cubelets::rotation::LayerMove;
use cubelets::state::AnimationContext;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const DT: f64 = 1.0 / 60.0;

fn context(seed: u64) -> AnimationContext<ChaCha8Rng> {
    AnimationContext::new(AnimationConfig::default(), ChaCha8Rng::seed_from_u64(seed))
}

fn all_origins() -> impl Iterator<Item = GridPos> {
    (0..CUBELET_COUNT).map(GridPos::from_index)
}

#[test]
fn single_turn_moves_only_its_layer() {
    let mut state = CubeletState::new();
    state.apply_rotation(Axis::X, Layer::Positive);

    for origin in all_origins() {
        let cubelet = state.get(origin);
        if origin.x == 1 {
            assert_eq!(
                cubelet.position,
                GridPos {
                    x: 1,
                    y: -origin.z,
                    z: origin.y
                }
            );
            assert_eq!(
                cubelet.faces,
                FaceAssignment::for_origin(origin).rotated(Axis::X)
            );
        } else {
            assert_eq!(cubelet.position, origin);
            assert_eq!(cubelet.faces, FaceAssignment::for_origin(origin));
        }
    }
}

#[test]
fn three_turns_are_one_reverse_turn_and_four_restore() {
    let mut state = CubeletState::new();
    for _ in 0..3 {
        state.apply_rotation(Axis::X, Layer::Positive);
    }
    for origin in all_origins().filter(|origin| origin.x == 1) {
        // Reverse quarter turn about x: (x, y, z) -> (x, z, -y)
        assert_eq!(
            state.get(origin).position,
            GridPos {
                x: 1,
                y: origin.z,
                z: -origin.y
            }
        );
    }
    state.apply_rotation(Axis::X, Layer::Positive);
    assert_eq!(state, CubeletState::new());
}

#[test]
fn closure_holds_after_unrelated_history() {
    let mut state = CubeletState::new();
    state.apply_rotation(Axis::Y, Layer::Negative);
    state.apply_rotation(Axis::Z, Layer::Positive);
    let scrambled = state.clone();
    for turn in LayerMove::all() {
        let mut copy = scrambled.clone();
        for _ in 0..4 {
            copy.apply_rotation(turn.axis, turn.layer);
        }
        assert_eq!(copy, scrambled, "turn {}", turn);
    }
}

#[test]
fn drag_scenario_sets_target_and_freezes_spin() {
    let mut context = context(1);
    for _ in 0..30 {
        context.tick(DT);
    }

    context.pointer_down(100.0, 100.0);
    let base = context.orientation().base();
    let frozen = context.orientation().auto_spin();
    context.pointer_move(150.0, 130.0);
    let target = context.orientation().target();
    assert!((target.pitch - (base.pitch + 30.0 * 0.005)).abs() < 1e-12);
    assert!((target.yaw - (base.yaw + 50.0 * 0.005)).abs() < 1e-12);

    for _ in 0..20 {
        context.tick(DT);
        assert_eq!(context.orientation().auto_spin(), frozen);
        assert_eq!(context.orientation().transform().roll, 0.0);
    }

    context.pointer_up();
    context.tick(DT);
    assert_ne!(context.orientation().auto_spin(), frozen);
}

#[test]
fn drag_freezes_turn_progress_exactly() {
    let mut context = context(2);
    assert!(context.request_turn(LayerMove::new(Axis::Z, Layer::Middle)));
    for _ in 0..10 {
        context.tick(DT);
    }
    let paused_at = context.rotation().progress();
    assert!(paused_at.is_some());

    context.pointer_down(5.0, 5.0);
    for _ in 0..100 {
        context.tick(DT);
        assert_eq!(context.rotation().progress(), paused_at);
        let scene = context.scene();
        assert_eq!(scene.turning.map(|group| group.angle), Some(0.0));
    }
    context.pointer_up();

    context.tick(DT);
    let resumed = context.rotation().progress();
    let expected = paused_at.map(|p| p + 0.02);
    assert!(matches!((resumed, expected), (Some(r), Some(e)) if (r - e).abs() < 1e-12));
}

#[test]
fn long_run_keeps_invariants() {
    let mut context = context(3);
    let mut last_turn = None;
    let mut last_progress = 0.0;
    let mut completed = 0;

    for frame in 0..6000 {
        // Drag for a while now and then
        match frame % 900 {
            300 => context.pointer_down(0.0, 0.0),
            301..=399 => context.pointer_move((frame % 900) as f64, 0.0),
            400 => context.pointer_up(),
            _ => {}
        }
        let dragging = context.is_dragging();
        if context.tick(DT).is_some() {
            // A fresh turn may start in the same tick
            completed += 1;
            last_turn = None;
        }

        let rotation = context.rotation();
        match (rotation.active(), rotation.progress()) {
            (Some(turn), Some(progress)) => {
                assert!((0.0..=1.0).contains(&progress));
                if last_turn == Some(turn) && !dragging {
                    assert!(progress >= last_progress);
                }
                last_turn = Some(turn);
                last_progress = progress;
            }
            _ => {
                last_turn = None;
                last_progress = 0.0;
            }
        }

        let scene = context.scene();
        assert_eq!(scene.cubelet_count(), CUBELET_COUNT);
        for cubelet in context.cubelets().iter() {
            assert_eq!(
                cubelet.faces.decorated_count(),
                cubelet.origin().extreme_count()
            );
        }
    }
    assert!(completed > 10, "only {} turns completed", completed);
}
