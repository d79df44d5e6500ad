//! Error types for the nodefield core.

use thiserror::Error;

/// Errors produced by particle-field operations.
#[derive(Debug, Error)]
pub enum FieldError {
    /// A [`FieldConfig`](crate::FieldConfig) value was out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Width or height was zero where a non-empty surface is required.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// The host could not provide a drawable surface or 2D context.
    #[error("surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// The host refused to schedule the next animation frame.
    #[error("frame scheduling failed: {0}")]
    Schedule(String),

    /// Writing a snapshot or reading a scene failed.
    #[error("i/o error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_includes_message() {
        let err = FieldError::InvalidConfig("line_alpha must be in [0, 1]".into());
        let msg = format!("{err}");
        assert!(msg.contains("line_alpha"), "missing field name in: {msg}");
    }

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let msg = FieldError::InvalidDimensions.to_string();
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn surface_unavailable_includes_reason() {
        let err = FieldError::SurfaceUnavailable("no #bg canvas".into());
        assert!(err.to_string().contains("#bg"));
    }

    #[test]
    fn schedule_and_io_include_message() {
        assert!(FieldError::Schedule("raf rejected".into())
            .to_string()
            .contains("raf rejected"));
        assert!(FieldError::Io("disk full".into())
            .to_string()
            .contains("disk full"));
    }

    #[test]
    fn field_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FieldError>();
    }

    #[test]
    fn field_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<FieldError>();
    }
}
