use thiserror::Error;

/// Why a render surface could not be acquired.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("standard output is not a terminal")]
    NotATerminal,
    #[error("terminal size is unavailable")]
    SizeUnavailable,
    #[error("terminal is {cols}x{rows} cells, need at least {min_cols}x{min_rows}")]
    TooSmall {
        cols: u16,
        rows: u16,
        min_cols: u16,
        min_rows: u16,
    },
    #[error("failed to prepare terminal: {0}")]
    Setup(#[source] std::io::Error),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
