//! CLI errors with distinct exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: field error (bad config, empty canvas, scheduling)
//! - 11: I/O error (scene/config read, PNG write)
//! - 12: input error (bad --params JSON, malformed scene/config file)
//! - 13: serialization error

use nodefield_core::FieldError;
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    /// Config rejected by validation, empty canvas, or a scheduling failure.
    Field(FieldError),
    /// Reading a scene/config file or writing the PNG failed.
    Io(String),
    /// `--params`, scene, or config content could not be parsed.
    Input(String),
    /// JSON output could not be produced.
    Serialization(String),
}

impl CliError {
    /// Process exit code for this error; see the module docs.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Field(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Field(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl From<FieldError> for CliError {
    fn from(e: FieldError) -> Self {
        match e {
            FieldError::Io(msg) => CliError::Io(msg),
            other => CliError::Field(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            CliError::Field(FieldError::InvalidDimensions).exit_code(),
            CliError::Io("x".into()).exit_code(),
            CliError::Input("x".into()).exit_code(),
            CliError::Serialization("x".into()).exit_code(),
        ];
        assert_eq!(codes, [10, 11, 12, 13]);
    }

    #[test]
    fn field_io_routes_to_cli_io() {
        let err = CliError::from(FieldError::Io("disk full".into()));
        assert_eq!(err.exit_code(), 11);
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn other_field_errors_route_to_field() {
        let err = CliError::from(FieldError::InvalidConfig("speed must be >= 0".into()));
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("speed"));
    }

    #[test]
    fn serde_json_error_routes_to_serialization() {
        let bad = serde_json::from_str::<serde_json::Value>("{oops");
        assert_eq!(CliError::from(bad.unwrap_err()).exit_code(), 13);
    }
}
