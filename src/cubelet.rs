use log::debug;
use std::fmt;

/// Number of cubelets in a 3x3x3 cube, hidden center included.
pub const CUBELET_COUNT: usize = 27;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// One of the three slices along an axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    Negative,
    Middle,
    Positive,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Negative, Layer::Middle, Layer::Positive];

    pub fn value(self) -> i8 {
        match self {
            Layer::Negative => -1,
            Layer::Middle => 0,
            Layer::Positive => 1,
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// A slot in the 3x3x3 grid, every component in {-1, 0, 1}.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub x: i8,
    pub y: i8,
    pub z: i8,
}

impl GridPos {
    /// Inverse of [`GridPos::index`]; `index` is taken modulo the cubelet count.
    pub fn from_index(index: usize) -> Self {
        let index = index % CUBELET_COUNT;
        GridPos {
            x: (index / 9) as i8 - 1,
            y: (index / 3 % 3) as i8 - 1,
            z: (index % 3) as i8 - 1,
        }
    }

    pub fn index(self) -> usize {
        (self.x + 1) as usize * 9 + (self.y + 1) as usize * 3 + (self.z + 1) as usize
    }

    pub fn component(self, axis: Axis) -> i8 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn in_layer(self, axis: Axis, layer: Layer) -> bool {
        self.component(axis) == layer.value()
    }

    /// Quarter turn of this slot about `axis`.
    pub fn rotated(self, axis: Axis) -> Self {
        let GridPos { x, y, z } = self;
        match axis {
            Axis::X => GridPos { x, y: -z, z: y },
            Axis::Y => GridPos { x: z, y, z: -x },
            Axis::Z => GridPos { x: -y, y: x, z },
        }
    }

    /// World-space offset of the slot for a grid pitch of `offset`.
    pub fn offset(self, offset: f64) -> [f64; 3] {
        [
            self.x as f64 * offset,
            self.y as f64 * offset,
            self.z as f64 * offset,
        ]
    }

    /// Number of components sitting on the outer shell.
    pub fn extreme_count(self) -> usize {
        [self.x, self.y, self.z]
            .iter()
            .filter(|c| c.abs() == 1)
            .count()
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Local face slots, in box material order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaceSlot {
    Right,
    Left,
    Top,
    Bottom,
    Front,
    Back,
}

impl FaceSlot {
    pub const ALL: [FaceSlot; 6] = [
        FaceSlot::Right,
        FaceSlot::Left,
        FaceSlot::Top,
        FaceSlot::Bottom,
        FaceSlot::Front,
        FaceSlot::Back,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Which face slots of a cubelet currently show a decorated face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FaceAssignment([bool; 6]);

impl FaceAssignment {
    /// Decorated exactly where the origin sits on the outer shell.
    pub fn for_origin(origin: GridPos) -> Self {
        FaceAssignment([
            origin.x == 1,
            origin.x == -1,
            origin.y == 1,
            origin.y == -1,
            origin.z == 1,
            origin.z == -1,
        ])
    }

    pub fn get(&self, slot: FaceSlot) -> bool {
        self.0[slot.index()]
    }

    pub fn decorated_count(&self) -> usize {
        self.0.iter().filter(|&&decorated| decorated).count()
    }

    /// Quarter-turn permutation of the slots for `axis`.
    pub fn rotated(self, axis: Axis) -> Self {
        use FaceSlot::*;
        let mut next = self;
        let mut take = |to: FaceSlot, from: FaceSlot| next.0[to.index()] = self.get(from);
        match axis {
            Axis::X => {
                take(Top, Front);
                take(Bottom, Back);
                take(Front, Bottom);
                take(Back, Top);
            }
            Axis::Y => {
                take(Right, Front);
                take(Left, Back);
                take(Front, Left);
                take(Back, Right);
            }
            Axis::Z => {
                take(Right, Top);
                take(Left, Bottom);
                take(Top, Left);
                take(Bottom, Right);
            }
        }
        next
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cubelet {
    origin: GridPos,
    pub position: GridPos,
    pub faces: FaceAssignment,
}

impl Cubelet {
    pub fn new(origin: GridPos) -> Self {
        Cubelet {
            origin,
            position: origin,
            faces: FaceAssignment::for_origin(origin),
        }
    }

    pub fn origin(&self) -> GridPos {
        self.origin
    }
}

/// Arena of all 27 cubelets, indexed by the encoding of their origin coordinate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CubeletState {
    cubelets: [Cubelet; CUBELET_COUNT],
}

impl Default for CubeletState {
    fn default() -> Self {
        Self::new()
    }
}

impl CubeletState {
    /// Every cubelet at its origin with its origin-derived face assignment.
    pub fn new() -> Self {
        CubeletState {
            cubelets: std::array::from_fn(|index| Cubelet::new(GridPos::from_index(index))),
        }
    }

    pub fn get(&self, origin: GridPos) -> &Cubelet {
        &self.cubelets[origin.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cubelet> {
        self.cubelets.iter()
    }

    /// Quarter-turns every cubelet currently in `layer` along `axis`.
    ///
    /// Takes `&mut self`, so no reader can observe a half-applied turn.
    pub fn apply_rotation(&mut self, axis: Axis, layer: Layer) {
        let mut moved = 0;
        for cubelet in self
            .cubelets
            .iter_mut()
            .filter(|cubelet| cubelet.position.in_layer(axis, layer))
        {
            cubelet.position = cubelet.position.rotated(axis);
            cubelet.faces = cubelet.faces.rotated(axis);
            moved += 1;
        }
        debug!("applied rotation axis={} layer={} moved={}", axis, layer, moved);
    }
}
