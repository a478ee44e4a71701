use thiserror::Error;

/// Reasons the drawing surface could not get hold of a 2D context. None of
/// these reach the user; the surface just stops drawing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("canvas element is not mounted")]
    MissingCanvas,
    #[error("canvas has no parent element to size against")]
    MissingContainer,
    #[error("2d context unavailable: {0}")]
    ContextUnavailable(String),
    #[error("context returned by the canvas is not a 2d context")]
    NotCanvas2d,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpeechError {
    #[error("speech synthesis is not supported by this browser")]
    Unsupported,
    #[error("could not create utterance: {0}")]
    Utterance(String),
}
