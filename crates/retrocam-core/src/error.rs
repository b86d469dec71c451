use crate::pipeline::stage::StageKind;

/// Errors surfaced by a pipeline invocation.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to decode source image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("stage {stage} failed: {source}")]
    Stage {
        stage: StageKind,
        #[source]
        source: StageError,
    },
    #[error("invalid look profile: {0}")]
    InvalidProfile(String),
}

/// Failures inside a single stage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StageError {
    #[error("image has zero width or height")]
    EmptyImage,
    #[error("pixel buffer holds {actual} pixels, expected {expected}")]
    BufferMismatch { expected: usize, actual: usize },
    #[error("image dimensions {width}x{height} overflow the address space")]
    DimensionOverflow { width: u32, height: u32 },
    #[error("stage changed dimensions from {from_w}x{from_h} to {to_w}x{to_h}")]
    DimensionsChanged {
        from_w: u32,
        from_h: u32,
        to_w: u32,
        to_h: u32,
    },
}

/// Errors loading a look profile.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("unknown built-in profile: {0}")]
    UnknownProfile(String),
    #[error("failed to parse profile JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Invalid(String),
}
