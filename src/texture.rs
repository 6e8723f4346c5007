use image::{Rgba, RgbaImage};
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use std::rc::Rc;

/// Edge length of every generated pattern texture.
pub const TEXTURE_SIZE: u32 = 512;

const BASE: Rgba<u8> = Rgba([0xaa, 0xaa, 0xaa, 0xff]);
const INK: Rgba<u8> = Rgba([0x6e, 0x6e, 0x6e, 0xff]);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pattern {
    Mirror,
    Brushed,
    Dots,
    Carbon,
    Diagonal,
    Grid,
}

impl Pattern {
    pub const ALL: [Pattern; 6] = [
        Pattern::Mirror,
        Pattern::Brushed,
        Pattern::Dots,
        Pattern::Carbon,
        Pattern::Diagonal,
        Pattern::Grid,
    ];
}

fn ink_if(hit: bool) -> Rgba<u8> {
    if hit {
        INK
    } else {
        BASE
    }
}

/// Draws `pattern` into a fresh image.
///
/// Shapes are deterministic; only the brushed rows draw on `rng`.
pub fn generate<R: Rng>(pattern: Pattern, rng: &mut R) -> RgbaImage {
    let size = TEXTURE_SIZE;
    match pattern {
        Pattern::Mirror => RgbaImage::from_pixel(1, 1, BASE),
        Pattern::Dots => RgbaImage::from_fn(size, size, |x, y| {
            let dx = (x % 40) as i32 - 20;
            let dy = (y % 40) as i32 - 20;
            ink_if(dx * dx + dy * dy <= 64)
        }),
        Pattern::Grid => RgbaImage::from_fn(size, size, |x, y| ink_if(x % 64 < 3 || y % 64 < 3)),
        Pattern::Carbon => RgbaImage::from_fn(size, size, |x, y| {
            let dx = (x % 32) as i32 - 16;
            let dy = (y % 32) as i32 - 16;
            ink_if(dx.abs() + dy.abs() < 10)
        }),
        Pattern::Diagonal => RgbaImage::from_fn(size, size, |x, y| ink_if((x + y) % 32 < 4)),
        Pattern::Brushed => {
            let rows: Vec<u8> = (0..size)
                .map(|_| 255 - rng.random_range(0..50u8) - 25)
                .collect();
            RgbaImage::from_fn(size, size, |_, y| {
                let value = rows[y as usize];
                Rgba([value, value, value, 0xff])
            })
        }
    }
}

/// Generates each pattern at most once and hands out shared handles.
pub struct TextureCache {
    textures: HashMap<Pattern, Rc<RgbaImage>>,
    rng: ChaCha8Rng,
}

impl TextureCache {
    pub fn new(seed: u64) -> Self {
        TextureCache {
            textures: HashMap::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn get(&mut self, pattern: Pattern) -> Rc<RgbaImage> {
        let rng = &mut self.rng;
        self.textures
            .entry(pattern)
            .or_insert_with(|| {
                debug!("generating {:?} texture", pattern);
                Rc::new(generate(pattern, rng))
            })
            .clone()
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

/// Luminance factor in [0, 1] of `texture` at wrapped coordinates `uv`.
pub fn sample(texture: &RgbaImage, uv: [f64; 2]) -> f64 {
    let (width, height) = texture.dimensions();
    let wrap = |t: f64, extent: u32| -> u32 {
        let scaled = (t.rem_euclid(1.0) * extent as f64) as u32;
        scaled.min(extent - 1)
    };
    let pixel = texture.get_pixel(wrap(uv[0], width), wrap(uv[1], height));
    let [r, g, b, _] = pixel.0;
    (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64) / 255.0
}
