use crate::cubelet::FaceSlot;
use crate::graphics::{draw_triangle, Framebuffer, Shading};
use crate::math::{add, axis_rotation, euler_matrix, multiply_matrices, multiply_matrix_vector};
use crate::scene::Scene;
use crate::state::AnimationContext;
use crate::texture::{Pattern, TextureCache};
use crate::vertex::Vertex;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use log::debug;
use rand::Rng;
use std::time::Instant;

/// Approximate pixel size of one terminal cell, so drag sensitivity is in pixels.
pub const CELL_PIXELS: [f64; 2] = [8.0, 16.0];

/// Box corners, indexed by the face table below
const CORNERS: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0], // 0
    [1.0, -1.0, -1.0],  // 1
    [1.0, 1.0, -1.0],   // 2
    [-1.0, 1.0, -1.0],  // 3
    [-1.0, -1.0, 1.0],  // 4
    [1.0, -1.0, 1.0],   // 5
    [1.0, 1.0, 1.0],    // 6
    [-1.0, 1.0, 1.0],   // 7
];

/// Corner indices and outward normal of each face slot
fn face_geometry(slot: FaceSlot) -> ([usize; 4], [f64; 3]) {
    match slot {
        FaceSlot::Right => ([1, 5, 6, 2], [1.0, 0.0, 0.0]),
        FaceSlot::Left => ([4, 0, 3, 7], [-1.0, 0.0, 0.0]),
        FaceSlot::Top => ([3, 2, 6, 7], [0.0, 1.0, 0.0]),
        FaceSlot::Bottom => ([4, 5, 1, 0], [0.0, -1.0, 0.0]),
        FaceSlot::Front => ([5, 4, 7, 6], [0.0, 0.0, 1.0]),
        FaceSlot::Back => ([0, 1, 2, 3], [0.0, 0.0, -1.0]),
    }
}

const FACE_UVS: [[f64; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Half the on-screen extent of the whole cube in world units, with some margin.
const VIEW_RADIUS: f64 = 2.8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetAction {
    Continue,
    Quit,
    Resize(u16, u16),
}

/// Terminal view of the cube: input mapping, rasterization and the debug overlay.
pub struct CubeWidget {
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
    textures: TextureCache,
    /// Enable debug mode
    pub debug: bool,
    /// Simulation paused
    pub paused: bool,
    /// Zoom level
    pub zoom: f64,
    /// Light position in world space
    pub light_position: [f64; 3],
}

impl CubeWidget {
    pub fn new(texture_seed: u64) -> Self {
        CubeWidget {
            frames_since_last_update: 0,
            last_fps_calculation: Instant::now(),
            fps: 0.0,
            textures: TextureCache::new(texture_seed),
            debug: false,
            paused: false,
            zoom: 1.0,
            light_position: [10.0, 10.0, 5.0],
        }
    }

    /// Handle a terminal event
    pub fn event<R: Rng>(&mut self, event: &Event, context: &mut AnimationContext<R>) -> WidgetAction {
        match event {
            Event::Key(key) => self.key(key, context),
            Event::Mouse(mouse) => {
                if !self.paused {
                    pointer(mouse, context);
                }
                WidgetAction::Continue
            }
            Event::Resize(cols, rows) => WidgetAction::Resize(*cols, *rows),
            _ => WidgetAction::Continue,
        }
    }

    fn key<R: Rng>(&mut self, key: &KeyEvent, context: &mut AnimationContext<R>) -> WidgetAction {
        if key.kind != KeyEventKind::Press {
            return WidgetAction::Continue;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return WidgetAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return WidgetAction::Quit
            }
            KeyCode::Char('d') | KeyCode::Char('D') => self.debug = !self.debug,
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.paused = !self.paused;
                // Release any drag that was in progress
                context.pointer_up();
                debug!("paused: {}", self.paused);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.set_zoom(self.zoom * 1.1),
            KeyCode::Char('-') => self.set_zoom(self.zoom / 1.1),
            _ => {}
        }
        WidgetAction::Continue
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = if zoom.is_finite() { zoom.clamp(0.1, 10.0) } else { 1.0 };
    }

    /// Rasterize `scene` into `frame`
    pub fn paint(&mut self, scene: &Scene, frame: &mut Framebuffer) {
        // Update FPS calculation
        self.frames_since_last_update += 1;
        let now = Instant::now();
        let duration = now.duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }

        frame.clear();
        let width = frame.width() as f64;
        let height = frame.height() as f64;
        let center = [width / 2.0, height / 2.0];
        let scale = width.min(height) / (2.0 * VIEW_RADIUS) * self.zoom;
        let half = scene.box_size / 2.0;
        let outer = euler_matrix(scene.orientation);

        for group in scene.groups() {
            let rotation = multiply_matrices(&outer, &axis_rotation(group.axis, group.angle));
            for cubelet in &group.cubelets {
                let corners = CORNERS.map(|corner| {
                    let local = add(&corner.map(|c| c * half), &cubelet.offset);
                    multiply_matrix_vector(&rotation, &local)
                });
                for slot in FaceSlot::ALL {
                    let (indices, normal) = face_geometry(slot);
                    let normal = multiply_matrix_vector(&rotation, &normal);
                    // Back-facing for a viewer on +z
                    if normal[2] <= 0.0 {
                        continue;
                    }
                    let vertices: [Vertex; 4] = std::array::from_fn(|i| {
                        let position = corners[indices[i]];
                        Vertex {
                            position,
                            screen_position: [
                                center[0] + position[0] * scale,
                                center[1] - position[1] * scale,
                            ],
                            uv: FACE_UVS[i],
                        }
                    });
                    let style = cubelet.materials[slot.index()].style();
                    let texture = match style.pattern {
                        Pattern::Mirror => None,
                        pattern => Some(self.textures.get(pattern)),
                    };
                    let shading = Shading {
                        style,
                        texture: texture.as_deref(),
                        normal,
                        light_pos: self.light_position,
                    };
                    let [a, b, c, d] = &vertices;
                    draw_triangle(a, b, c, frame, &shading);
                    draw_triangle(a, c, d, frame, &shading);
                }
            }
        }
    }

    /// Debug lines for the top left corner; empty unless debug mode is on
    pub fn overlay<R: Rng>(&self, context: &AnimationContext<R>) -> Vec<String> {
        if !self.debug {
            return Vec::new();
        }
        let orientation = context.orientation().transform();
        let turn = match (context.rotation().active(), context.rotation().progress()) {
            (Some(turn), Some(progress)) => format!("Turn: {} at {:.0}%", turn, progress * 100.0),
            _ => "Turn: idle".to_string(),
        };
        vec![
            format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            format!("FPS: {:.2}", self.fps),
            format!(
                "Pitch: {:.2}, Yaw: {:.2}, Roll: {:.2}",
                orientation.pitch, orientation.yaw, orientation.roll
            ),
            turn,
            format!(
                "Dragging: {}, next turn in {:.2}s",
                context.is_dragging(),
                context.scheduler().remaining()
            ),
            format!("Zoom: {:.2}, frames: {}", self.zoom, context.frames()),
        ]
    }

    /// Banner drawn over the picture
    pub fn banner(&self) -> Option<&'static str> {
        self.paused.then_some("Paused")
    }
}

fn pointer<R: Rng>(mouse: &MouseEvent, context: &mut AnimationContext<R>) {
    let x = mouse.column as f64 * CELL_PIXELS[0];
    let y = mouse.row as f64 * CELL_PIXELS[1];
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => context.pointer_down(x, y),
        MouseEventKind::Drag(MouseButton::Left) => context.pointer_move(x, y),
        MouseEventKind::Up(MouseButton::Left) => context.pointer_up(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnimationConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn context() -> AnimationContext<ChaCha8Rng> {
        AnimationContext::new(AnimationConfig::default(), ChaCha8Rng::seed_from_u64(21))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn mouse_drag_drives_orientation() {
        let mut widget = CubeWidget::new(0);
        let mut context = context();
        widget.event(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 5), &mut context);
        assert!(context.is_dragging());
        widget.event(&mouse(MouseEventKind::Drag(MouseButton::Left), 12, 6), &mut context);
        let target = context.orientation().target();
        let base = context.orientation().base();
        assert!((target.yaw - base.yaw - 16.0 * 0.005).abs() < 1e-12);
        assert!((target.pitch - base.pitch - 16.0 * 0.005).abs() < 1e-12);
        widget.event(&mouse(MouseEventKind::Up(MouseButton::Left), 12, 6), &mut context);
        assert!(!context.is_dragging());
    }

    #[test]
    fn pause_releases_drag_and_ignores_pointer() {
        let mut widget = CubeWidget::new(0);
        let mut context = context();
        widget.event(&mouse(MouseEventKind::Down(MouseButton::Left), 1, 1), &mut context);
        widget.event(&key('p'), &mut context);
        assert!(widget.paused);
        assert!(!context.is_dragging());
        assert_eq!(widget.banner(), Some("Paused"));
        widget.event(&mouse(MouseEventKind::Down(MouseButton::Left), 1, 1), &mut context);
        assert!(!context.is_dragging());
    }

    #[test]
    fn keys_map_to_actions() {
        let mut widget = CubeWidget::new(0);
        let mut context = context();
        assert_eq!(widget.event(&key('q'), &mut context), WidgetAction::Quit);
        assert_eq!(widget.event(&key('d'), &mut context), WidgetAction::Continue);
        assert!(widget.debug);
        assert!(!widget.overlay(&context).is_empty());
        widget.event(&key('+'), &mut context);
        assert!(widget.zoom > 1.0);
        assert_eq!(
            widget.event(&Event::Resize(80, 24), &mut context),
            WidgetAction::Resize(80, 24)
        );
    }

    #[test]
    fn zoom_is_clamped() {
        let mut widget = CubeWidget::new(0);
        widget.set_zoom(100.0);
        assert_eq!(widget.zoom, 10.0);
        widget.set_zoom(f64::NAN);
        assert_eq!(widget.zoom, 1.0);
    }

    #[test]
    fn paint_draws_cube_in_center() {
        let mut widget = CubeWidget::new(0);
        let context = context();
        let mut frame = Framebuffer::new(40, 40);
        widget.paint(&context.scene(), &mut frame);
        assert_ne!(frame.pixel(20, 20), frame.background());
        assert_eq!(frame.pixel(0, 0), frame.background());
    }
}
