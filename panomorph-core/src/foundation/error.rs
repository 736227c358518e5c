/// Crate-wide result alias.
pub type PanomorphResult<T> = Result<T, PanomorphError>;

/// Error type shared by the conversion pipeline.
#[derive(thiserror::Error, Debug)]
pub enum PanomorphError {
    /// User-supplied configuration is unusable (unknown projection name,
    /// malformed rotation string, zero-sized output, ...). Surfaced before
    /// any rendering begins.
    #[error("validation error: {0}")]
    Validation(String),

    /// The render pipeline itself failed (worker pool construction, ...).
    #[error("render error: {0}")]
    Render(String),

    /// Anything bubbling up from external collaborators (image decode, IO).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PanomorphError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}
