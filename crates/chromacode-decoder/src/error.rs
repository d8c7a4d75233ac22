/// Errors returned by decoder construction and frame submission.
///
/// Everything on the per-candidate hot path is a classified rejection, not
/// an error; only contract violations surface here.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum DecoderError {
    #[error("frame too small ({width}x{height}); the shorter side must be at least {min} px")]
    FrameTooSmall {
        width: usize,
        height: usize,
        min: usize,
    },

    #[error("frame dimensions {got_width}x{got_height} do not match the configured {width}x{height}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        got_width: usize,
        got_height: usize,
    },

    #[error("invalid RGB buffer length (expected {expected} bytes, got {got})")]
    InvalidBufferLength { expected: usize, got: usize },
}
