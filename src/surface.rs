use crate::error::{Result, SurfaceError};
use crate::graphics::Framebuffer;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use log::{error, info, warn};
use std::io::{stdout, BufWriter, IsTerminal, Stdout, Write};

/// Smallest terminal that still shows a recognisable cube.
pub const MIN_COLS: u16 = 20;
pub const MIN_ROWS: u16 = 10;

/// Shown by the host instead of the animation when no surface can be acquired.
pub const FALLBACK_ART: &str = r"
      +--------+
     /        /|
    /        / |
   +--------+  |
   |        |  +
   |        | /
   |        |/
   +--------+
";

/// Notifications the host receives about the render surface.
pub trait HostLifecycle {
    /// The first frame has been presented.
    fn on_ready(&mut self);
    /// The surface could not be acquired; the host should show a static substitute.
    fn on_failure(&mut self, error: &SurfaceError);
}

/// Delivers at most one lifecycle notification to the host.
pub struct Lifecycle<H: HostLifecycle> {
    host: H,
    reported: bool,
}

impl<H: HostLifecycle> Lifecycle<H> {
    pub fn new(host: H) -> Self {
        Lifecycle {
            host,
            reported: false,
        }
    }

    pub fn reported(&self) -> bool {
        self.reported
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn ready(&mut self) {
        if !self.reported {
            self.reported = true;
            info!("render surface ready");
            self.host.on_ready();
        }
    }

    pub fn failed(&mut self, error: &SurfaceError) {
        if !self.reported {
            self.reported = true;
            warn!("render surface unavailable: {}", error);
            self.host.on_failure(error);
        }
    }

    /// Runs `acquire` once; a failure is reported and swallowed, never retried.
    pub fn acquire<S>(
        &mut self,
        acquire: impl FnOnce() -> std::result::Result<S, SurfaceError>,
    ) -> Option<S> {
        match acquire() {
            Ok(surface) => Some(surface),
            Err(error) => {
                self.failed(&error);
                None
            }
        }
    }
}

/// Somewhere a framebuffer can be shown.
pub trait RenderSurface {
    /// Framebuffer dimensions in pixels that fill the surface.
    fn pixel_size(&self) -> (usize, usize);
    fn resize(&mut self, cols: u16, rows: u16);
    /// Shows `frame` with text `overlay` lines in the top left and an optional centered `banner`.
    fn present(&mut self, frame: &Framebuffer, overlay: &[String], banner: Option<&str>)
        -> Result<()>;
}

/// Terminal surface drawing two pixels per cell with upper half blocks.
pub struct TerminalSurface {
    out: BufWriter<Stdout>,
    cols: u16,
    rows: u16,
}

impl TerminalSurface {
    pub fn acquire() -> std::result::Result<Self, SurfaceError> {
        if !stdout().is_terminal() {
            return Err(SurfaceError::NotATerminal);
        }
        let size = termsize::get().ok_or(SurfaceError::SizeUnavailable)?;
        if size.cols < MIN_COLS || size.rows < MIN_ROWS {
            return Err(SurfaceError::TooSmall {
                cols: size.cols,
                rows: size.rows,
                min_cols: MIN_COLS,
                min_rows: MIN_ROWS,
            });
        }
        enable_raw_mode().map_err(SurfaceError::Setup)?;
        let mut out = BufWriter::new(stdout());
        if let Err(setup) = execute!(out, EnterAlternateScreen, EnableMouseCapture, Hide) {
            if let Err(restore) = disable_raw_mode() {
                error!("failed to leave raw mode: {}", restore);
            }
            return Err(SurfaceError::Setup(setup));
        }
        Ok(TerminalSurface {
            out,
            cols: size.cols,
            rows: size.rows,
        })
    }
}

impl RenderSurface for TerminalSurface {
    fn pixel_size(&self) -> (usize, usize) {
        (self.cols as usize, self.rows as usize * 2)
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    fn present(
        &mut self,
        frame: &Framebuffer,
        overlay: &[String],
        banner: Option<&str>,
    ) -> Result<()> {
        let cols = (self.cols as usize).min(frame.width());
        let rows = (self.rows as usize).min(frame.height() / 2);
        for row in 0..rows {
            queue!(self.out, MoveTo(0, row as u16))?;
            let mut last: Option<([u8; 3], [u8; 3])> = None;
            for col in 0..cols {
                let cell = cell_colors(frame, col, row);
                if last != Some(cell) {
                    let (top, bottom) = cell;
                    queue!(
                        self.out,
                        SetForegroundColor(rgb(top)),
                        SetBackgroundColor(rgb(bottom))
                    )?;
                    last = Some(cell);
                }
                queue!(self.out, Print('\u{2580}'))?;
            }
        }
        queue!(self.out, ResetColor)?;
        for (line_number, line) in overlay.iter().enumerate().take(rows) {
            let text: String = line.chars().take(cols.saturating_sub(1)).collect();
            queue!(self.out, MoveTo(1, line_number as u16), Print(text))?;
        }
        if let Some(banner) = banner {
            let width = banner.chars().count();
            let col = cols.saturating_sub(width) / 2;
            queue!(
                self.out,
                MoveTo(col as u16, (rows / 2) as u16),
                Print(banner)
            )?;
        }
        self.out.flush()?;
        Ok(())
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        let restored = execute!(
            self.out,
            ResetColor,
            Clear(ClearType::All),
            Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        if let Err(restore) = restored.and_then(|_| disable_raw_mode()) {
            error!("failed to restore terminal: {}", restore);
        }
    }
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb { r, g, b }
}

/// Top and bottom pixel of the cell at `col`, `row`.
pub fn cell_colors(frame: &Framebuffer, col: usize, row: usize) -> ([u8; 3], [u8; 3]) {
    (frame.pixel(col, row * 2), frame.pixel(col, row * 2 + 1))
}
