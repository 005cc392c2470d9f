use renderer_traits::RendererError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlayerError {
    /// Descriptors must carry a unique, non-empty name.
    #[error("Renderer descriptor must contain a non-empty name")]
    MissingRendererName,

    /// A priority order entry that names no registered renderer.
    #[error("Unknown renderer name: {0}")]
    UnknownRenderer(String),

    /// `set_source` requires at least one candidate source.
    #[error("At least one media source is required")]
    EmptySourceList,

    /// An adapter operation failed.
    #[error("Renderer error: {0}")]
    Renderer(#[from] RendererError),
}

pub type Result<T> = std::result::Result<T, PlayerError>;
