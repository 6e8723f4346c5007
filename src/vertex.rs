/// Vertex structure with view-space position, screen position, and texture coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: [f64; 3],
    pub screen_position: [f64; 2],
    pub uv: [f64; 2],
}
