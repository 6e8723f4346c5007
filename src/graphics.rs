use crate::math::{apply_lighting, calculate_light_intensity, calculate_specular, edge_function};
use crate::scene::FaceStyle;
use crate::texture::sample;
use crate::vertex::Vertex;
use image::RgbaImage;

/// Luminance of the untextured face color, used to turn texture samples into a factor around 1.
const BASE_LUMINANCE: f64 = 0xaa as f64 / 255.0;

/// Color buffer with a depth buffer. Larger depth is nearer the viewer.
pub struct Framebuffer {
    width: usize,
    height: usize,
    background: [u8; 3],
    pixels: Vec<[u8; 3]>,
    depth: Vec<f64>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let background = [12, 12, 20];
        Framebuffer {
            width,
            height,
            background,
            pixels: vec![background; width * height],
            depth: vec![f64::NEG_INFINITY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn background(&self) -> [u8; 3] {
        self.background
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels.resize(width * height, self.background);
        self.depth.resize(width * height, f64::NEG_INFINITY);
        self.clear();
    }

    pub fn clear(&mut self) {
        self.pixels.fill(self.background);
        self.depth.fill(f64::NEG_INFINITY);
    }

    /// Pixel at `x`, `y`; out-of-range reads give the background.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            self.background
        }
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: [u8; 3]) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    /// Records `depth` at `x`, `y` if it is nearer than what is there.
    fn depth_test(&mut self, x: usize, y: usize, depth: f64) -> bool {
        let offset = y * self.width + x;
        if depth > self.depth[offset] {
            self.depth[offset] = depth;
            true
        } else {
            false
        }
    }
}

/// How one face is shaded.
pub struct Shading<'a> {
    pub style: FaceStyle,
    pub texture: Option<&'a RgbaImage>,
    pub normal: [f64; 3],
    pub light_pos: [f64; 3],
}

/// Draws a triangle with per-pixel lighting, either winding.
pub fn draw_triangle(
    v0: &Vertex,
    v1: &Vertex,
    v2: &Vertex,
    frame: &mut Framebuffer,
    shading: &Shading,
) {
    if frame.width == 0 || frame.height == 0 {
        return;
    }
    // Compute bounding box of the triangle
    let min_x = v0.screen_position[0]
        .min(v1.screen_position[0])
        .min(v2.screen_position[0])
        .floor()
        .max(0.0) as usize;
    let max_x = v0.screen_position[0]
        .max(v1.screen_position[0])
        .max(v2.screen_position[0])
        .ceil()
        .min(frame.width as f64 - 1.0);
    let min_y = v0.screen_position[1]
        .min(v1.screen_position[1])
        .min(v2.screen_position[1])
        .floor()
        .max(0.0) as usize;
    let max_y = v0.screen_position[1]
        .max(v1.screen_position[1])
        .max(v2.screen_position[1])
        .ceil()
        .min(frame.height as f64 - 1.0);
    if max_x < 0.0 || max_y < 0.0 {
        return;
    }
    let (max_x, max_y) = (max_x as usize, max_y as usize);

    let area = edge_function(&v0.screen_position, &v1.screen_position, &v2.screen_position);
    if area.abs() < f64::EPSILON {
        return;
    }

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = [x as f64 + 0.5, y as f64 + 0.5];

            // Normalized barycentric coordinates; all non-negative inside for either winding
            let w0 = edge_function(&v1.screen_position, &v2.screen_position, &p) / area;
            let w1 = edge_function(&v2.screen_position, &v0.screen_position, &p) / area;
            let w2 = edge_function(&v0.screen_position, &v1.screen_position, &p) / area;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }

            let interpolate = |i: usize| {
                v0.position[i] * w0 + v1.position[i] * w1 + v2.position[i] * w2
            };
            let position = [interpolate(0), interpolate(1), interpolate(2)];
            if !frame.depth_test(x, y, position[2]) {
                continue;
            }

            let texel = match shading.texture {
                Some(texture) => {
                    let uv = [
                        v0.uv[0] * w0 + v1.uv[0] * w1 + v2.uv[0] * w2,
                        v0.uv[1] * w0 + v1.uv[1] * w1 + v2.uv[1] * w2,
                    ];
                    sample(texture, uv) / BASE_LUMINANCE
                }
                None => 1.0,
            };
            let intensity =
                calculate_light_intensity(&shading.normal, &position, &shading.light_pos);
            let highlight = calculate_specular(
                &shading.normal,
                &position,
                &shading.light_pos,
                shading.style.metalness,
                shading.style.roughness,
            );
            let color = apply_lighting(shading.style.color, intensity * texel, highlight * 0.6);
            frame.set_pixel(x, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::NEUTRAL_STYLE;

    fn vertex(x: f64, y: f64, depth: f64) -> Vertex {
        Vertex {
            position: [x, y, depth],
            screen_position: [x, y],
            uv: [0.0, 0.0],
        }
    }

    fn shading() -> Shading<'static> {
        Shading {
            style: NEUTRAL_STYLE,
            texture: None,
            normal: [0.0, 0.0, 1.0],
            light_pos: [0.0, 0.0, 10.0],
        }
    }

    #[test]
    fn fills_either_winding() {
        for clockwise in [false, true] {
            let mut frame = Framebuffer::new(10, 10);
            let (a, b, c) = (vertex(0.0, 0.0, 0.0), vertex(10.0, 0.0, 0.0), vertex(0.0, 10.0, 0.0));
            if clockwise {
                draw_triangle(&a, &c, &b, &mut frame, &shading());
            } else {
                draw_triangle(&a, &b, &c, &mut frame, &shading());
            }
            assert_ne!(frame.pixel(1, 1), frame.background());
            assert_eq!(frame.pixel(9, 9), frame.background());
        }
    }

    #[test]
    fn nearer_triangle_wins() {
        let mut frame = Framebuffer::new(8, 8);
        let near = |d| [vertex(0.0, 0.0, d), vertex(8.0, 0.0, d), vertex(0.0, 8.0, d)];
        let front = near(1.0);
        let back = near(-1.0);
        draw_triangle(&front[0], &front[1], &front[2], &mut frame, &shading());
        let lit = frame.pixel(1, 1);
        let mut dim = shading();
        dim.light_pos = [0.0, 0.0, -10.0];
        draw_triangle(&back[0], &back[1], &back[2], &mut frame, &dim);
        assert_eq!(frame.pixel(1, 1), lit);
    }

    #[test]
    fn offscreen_triangle_is_clipped() {
        let mut frame = Framebuffer::new(4, 4);
        let (a, b, c) = (
            vertex(-20.0, -20.0, 0.0),
            vertex(-10.0, -20.0, 0.0),
            vertex(-20.0, -10.0, 0.0),
        );
        draw_triangle(&a, &b, &c, &mut frame, &shading());
        assert!((0..4).all(|y| (0..4).all(|x| frame.pixel(x, y) == frame.background())));
    }

    #[test]
    fn resize_clears() {
        let mut frame = Framebuffer::new(2, 2);
        frame.set_pixel(0, 0, [9, 9, 9]);
        frame.resize(3, 1);
        assert_eq!(frame.pixel(0, 0), frame.background());
        assert_eq!(frame.pixel(2, 0), frame.background());
    }
}
