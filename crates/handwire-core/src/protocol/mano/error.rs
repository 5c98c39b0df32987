use thiserror::Error;

/// Errors returned by MANO packet parsing and reading.
///
/// Every variant carries the observed values so a dropped packet can be
/// diagnosed from the log line alone.
#[derive(Debug, Error)]
pub enum ManoError {
    #[error("packet too small: {actual} bytes")]
    TooSmall { actual: usize },
    #[error(
        "packet too small for frame id and count: frame_id_len {frame_id_len}, need {needed} bytes, got {actual}"
    )]
    TooSmallForFrame {
        frame_id_len: u32,
        needed: usize,
        actual: usize,
    },
    #[error("expected {expected} bytes for {count} point triples, got {remaining}")]
    SizeMismatch {
        count: u32,
        remaining: usize,
        expected: usize,
    },
}
