use crate::cubelet::{Axis, Cubelet, CubeletState, FaceSlot, GridPos};
use crate::orientation::Euler;
use crate::rotation::LayerRotation;
use crate::texture::Pattern;

/// Surface properties of one face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceStyle {
    pub color: [u8; 3],
    pub metalness: f64,
    pub roughness: f64,
    pub pattern: Pattern,
}

const GRAY: [u8; 3] = [0xaa, 0xaa, 0xaa];

/// Shared look of every interior face.
pub const NEUTRAL_STYLE: FaceStyle = FaceStyle {
    color: GRAY,
    metalness: 0.9,
    roughness: 0.15,
    pattern: Pattern::Mirror,
};

/// Decorated look of each slot.
pub fn face_style(slot: FaceSlot) -> FaceStyle {
    let (metalness, roughness, pattern) = match slot {
        FaceSlot::Right => (1.0, 0.05, Pattern::Mirror),
        FaceSlot::Left => (0.6, 0.5, Pattern::Brushed),
        FaceSlot::Top => (0.4, 0.7, Pattern::Dots),
        FaceSlot::Bottom => (0.5, 0.6, Pattern::Carbon),
        FaceSlot::Front => (0.3, 0.8, Pattern::Diagonal),
        FaceSlot::Back => (0.5, 0.6, Pattern::Grid),
    };
    FaceStyle {
        color: GRAY,
        metalness,
        roughness,
        pattern,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceMaterial {
    Decorated(FaceSlot),
    Neutral,
}

impl FaceMaterial {
    pub fn style(self) -> FaceStyle {
        match self {
            FaceMaterial::Decorated(slot) => face_style(slot),
            FaceMaterial::Neutral => NEUTRAL_STYLE,
        }
    }
}

/// One drawable cubelet.
#[derive(Clone, Debug, PartialEq)]
pub struct CubeletInstance {
    pub origin: GridPos,
    pub position: GridPos,
    /// Offset from the group origin, `position * (size + gap)`
    pub offset: [f64; 3],
    /// Indexed by [`FaceSlot::index`]
    pub materials: [FaceMaterial; 6],
}

impl CubeletInstance {
    fn new(cubelet: &Cubelet, offset: f64) -> Self {
        CubeletInstance {
            origin: cubelet.origin(),
            position: cubelet.position,
            offset: cubelet.position.offset(offset),
            materials: FaceSlot::ALL.map(|slot| {
                if cubelet.faces.get(slot) {
                    FaceMaterial::Decorated(slot)
                } else {
                    FaceMaterial::Neutral
                }
            }),
        }
    }
}

/// A group of cubelets sharing one local rotation about a principal axis.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerGroup {
    pub axis: Axis,
    /// Radians; zero is the identity transform
    pub angle: f64,
    pub cubelets: Vec<CubeletInstance>,
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Whole-cube rotation applied outside both groups
    pub orientation: Euler,
    pub resting: LayerGroup,
    pub turning: Option<LayerGroup>,
    pub box_size: f64,
}

impl Scene {
    pub fn groups(&self) -> impl Iterator<Item = &LayerGroup> {
        std::iter::once(&self.resting).chain(self.turning.as_ref())
    }

    pub fn cubelet_count(&self) -> usize {
        self.groups().map(|group| group.cubelets.len()).sum()
    }
}

/// Splits the cubelets into the turning layer and the rest.
pub fn compose(
    cubelets: &CubeletState,
    rotation: &LayerRotation,
    dragging: bool,
    orientation: Euler,
    offset: f64,
    box_size: f64,
) -> Scene {
    let active = rotation.active();
    let (turning, resting): (Vec<&Cubelet>, Vec<&Cubelet>) = cubelets.iter().partition(|cubelet| {
        active.is_some_and(|turn| cubelet.position.in_layer(turn.axis, turn.layer))
    });
    let instances = |group: Vec<&Cubelet>| -> Vec<CubeletInstance> {
        group
            .into_iter()
            .map(|cubelet| CubeletInstance::new(cubelet, offset))
            .collect()
    };
    Scene {
        orientation,
        resting: LayerGroup {
            axis: Axis::X,
            angle: 0.0,
            cubelets: instances(resting),
        },
        turning: active.map(|turn| LayerGroup {
            axis: turn.axis,
            angle: rotation.visual_angle(dragging),
            cubelets: instances(turning),
        }),
        box_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cubelet::Layer;
    use crate::rotation::LayerMove;

    fn scene(rotation: &LayerRotation, dragging: bool) -> Scene {
        compose(
            &CubeletState::new(),
            rotation,
            dragging,
            Euler::ZERO,
            1.01,
            0.95,
        )
    }

    #[test]
    fn idle_scene_is_one_group() {
        let scene = scene(&LayerRotation::new(0.02), false);
        assert!(scene.turning.is_none());
        assert_eq!(scene.resting.cubelets.len(), 27);
        assert_eq!(scene.resting.angle, 0.0);
    }

    #[test]
    fn active_layer_is_split_out() {
        let mut cubelets = CubeletState::new();
        let mut rotation = LayerRotation::new(0.1);
        rotation.start(LayerMove::new(Axis::Y, Layer::Negative));
        rotation.advance(false, &mut cubelets);
        let scene = scene(&rotation, false);
        let turning = scene.turning.as_ref().map(|group| group.cubelets.len());
        assert_eq!(turning, Some(9));
        assert_eq!(scene.resting.cubelets.len(), 18);
        assert_eq!(scene.cubelet_count(), 27);
        let group = scene.turning.as_ref().map(|group| (group.axis, group.angle > 0.0));
        assert_eq!(group, Some((Axis::Y, true)));
        assert!(scene
            .resting
            .cubelets
            .iter()
            .all(|cubelet| cubelet.position.y != -1));
    }

    #[test]
    fn dragging_flattens_turning_group() {
        let mut cubelets = CubeletState::new();
        let mut rotation = LayerRotation::new(0.1);
        rotation.start(LayerMove::new(Axis::Z, Layer::Positive));
        rotation.advance(false, &mut cubelets);
        let scene = scene(&rotation, true);
        assert_eq!(scene.turning.map(|group| group.angle), Some(0.0));
    }

    #[test]
    fn materials_follow_face_assignment() {
        let scene = scene(&LayerRotation::new(0.02), false);
        let corner = scene
            .resting
            .cubelets
            .iter()
            .find(|cubelet| cubelet.origin == GridPos { x: 1, y: 1, z: -1 });
        let materials = corner.map(|cubelet| cubelet.materials);
        assert_eq!(
            materials,
            Some([
                FaceMaterial::Decorated(FaceSlot::Right),
                FaceMaterial::Neutral,
                FaceMaterial::Decorated(FaceSlot::Top),
                FaceMaterial::Neutral,
                FaceMaterial::Neutral,
                FaceMaterial::Decorated(FaceSlot::Back),
            ])
        );
        let offset = corner.map(|cubelet| cubelet.offset);
        assert_eq!(offset, Some([1.01, 1.01, -1.01]));
    }

    #[test]
    fn style_table() {
        assert_eq!(face_style(FaceSlot::Left).pattern, Pattern::Brushed);
        assert_eq!(face_style(FaceSlot::Back).pattern, Pattern::Grid);
        assert_eq!(FaceMaterial::Neutral.style(), NEUTRAL_STYLE);
    }
}
