//! Error taxonomy for the effect pipeline and its collaborators.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `StemError`
pub type Result<T> = std::result::Result<T, StemError>;

#[derive(Error, Debug)]
pub enum StemError {
    /// A parameter failed validation before any processing started.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A NaN or infinite sample escaped a processing stage.
    #[error("numeric instability: non-finite sample at index {index} after {stage}")]
    NumericInstability { stage: &'static str, index: usize },

    #[error("source audio not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("resampling failed: {0}")]
    Resample(String),

    #[error(transparent)]
    Wav(#[from] hound::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StemError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Reject negative, NaN or infinite durations.
pub(crate) fn ensure_duration(name: &'static str, seconds: f32) -> Result<()> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(StemError::invalid(
            name,
            format!("duration must be finite and non-negative, got {seconds}"),
        ));
    }
    Ok(())
}

/// Reject gains that are not finite.
pub(crate) fn ensure_finite(name: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() {
        return Err(StemError::invalid(name, format!("must be finite, got {value}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_duration_is_rejected() {
        let err = ensure_duration("fade_seconds", -0.1).unwrap_err();
        assert!(matches!(
            err,
            StemError::InvalidParameter {
                name: "fade_seconds",
                ..
            }
        ));
    }

    #[test]
    fn nan_duration_is_rejected() {
        assert!(ensure_duration("tail_seconds", f32::NAN).is_err());
        assert!(ensure_duration("tail_seconds", 0.0).is_ok());
    }

    #[test]
    fn error_messages_name_the_parameter() {
        let err = StemError::invalid("feedback", "must be below 1.0");
        assert_eq!(
            err.to_string(),
            "invalid parameter `feedback`: must be below 1.0"
        );
    }
}
