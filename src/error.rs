use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Position ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("Grid extents must be non-zero")]
    EmptyGrid,
    #[error("Invalid movement ({dx}, {dy}) with cost {cost}")]
    InvalidMovement { dx: i32, dy: i32, cost: f64 },
    #[error("Search cancelled")]
    Cancelled,
    #[error("Invalid command: {0}")]
    Command(String),
    #[error("Invalid scene: {0}")]
    Scene(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Scene parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
