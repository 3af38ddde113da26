use thiserror::Error;

/// Rejected [`FastScrollConfig`](crate::config::FastScrollConfig) values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("thumb min width {min} exceeds max width {max}")]
    ThumbWidthRange { min: i32, max: i32 },

    #[error("thumb height must be positive, got {0}")]
    ThumbHeight(i32),

    #[error("popup text size must be positive, got {0}")]
    PopupTextSize(f32),

    #[error("paging touch slop {paging} is smaller than touch slop {touch}")]
    SlopOrder { touch: i32, paging: i32 },
}
