use thiserror::Error;

pub type Result<T> = std::result::Result<T, CaveError>;

#[derive(Debug, Error)]
pub enum CaveError {
    /// Caves need at least a 3x3 grid so that something survives border sealing.
    #[error("cave dimensions {width}x{height} are below the 3x3 minimum")]
    InvalidDimensions { width: usize, height: usize },

    #[error("invalid cave spec: {0}")]
    InvalidSpec(String),

    /// Generation degenerated into a map with nothing to stand on. Regenerating with a
    /// fresh seed is the expected recovery.
    #[error("map has no open cell to spawn on")]
    NoOpenCell,

    #[error("only {fraction:.2} of open cells reachable from spawn, {required:.2} required")]
    PoorlyConnected { fraction: f32, required: f32 },

    #[error("failed to parse cave spec: {0}")]
    Config(#[from] ron::Error),
}

impl CaveError {
    /// True for failures caused by an unlucky random stream rather than bad input.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CaveError::NoOpenCell | CaveError::PoorlyConnected { .. }
        )
    }
}
