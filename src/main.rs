use clap::Parser;
use crossterm::event;
use cubelets::config::{AnimationConfig, Args};
use cubelets::error::SurfaceError;
use cubelets::graphics::Framebuffer;
use cubelets::state::AnimationContext;
use cubelets::surface::{HostLifecycle, Lifecycle, RenderSurface, TerminalSurface, FALLBACK_ART};
use cubelets::widget::{CubeWidget, WidgetAction};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};

/// Reports surface lifecycle to the user
struct ConsoleHost;

impl HostLifecycle for ConsoleHost {
    fn on_ready(&mut self) {
        log::info!("first frame presented");
    }

    fn on_failure(&mut self, error: &SurfaceError) {
        println!("{}", FALLBACK_ART);
        println!("(animation unavailable: {})", error);
    }
}

/// Main function
pub fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed {}", seed);
    let config = AnimationConfig::from(&args);
    let mut context = AnimationContext::new(config, ChaCha8Rng::seed_from_u64(seed));
    let mut widget = CubeWidget::new(seed);
    widget.debug = args.debug;
    widget.set_zoom(args.zoom);

    let mut lifecycle = Lifecycle::new(ConsoleHost);
    let Some(mut surface) = lifecycle.acquire(TerminalSurface::acquire) else {
        return Ok(());
    };

    let frame_time = Duration::from_secs_f64(1.0 / args.fps.max(1) as f64);
    let (width, height) = surface.pixel_size();
    let mut frame = Framebuffer::new(width, height);
    let mut last_tick = Instant::now();

    loop {
        let deadline = last_tick + frame_time;
        while event::poll(deadline.saturating_duration_since(Instant::now()))? {
            match widget.event(&event::read()?, &mut context) {
                WidgetAction::Continue => {}
                WidgetAction::Quit => return Ok(()),
                WidgetAction::Resize(cols, rows) => {
                    surface.resize(cols, rows);
                    let (width, height) = surface.pixel_size();
                    frame.resize(width, height);
                }
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last_tick).as_secs_f64();
        last_tick = now;
        if !widget.paused {
            context.tick(dt);
        }

        widget.paint(&context.scene(), &mut frame);
        surface.present(&frame, &widget.overlay(&context), widget.banner())?;
        lifecycle.ready();
    }
}
