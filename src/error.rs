/*
 * Error type shared by the configuration object, the lifecycle and the Win32
 * backend. Precondition violations, environment mismatches and native call
 * failures each get their own variant so callers can match on the cause.
 */
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    /// The operation is not allowed in the dialog's current lifecycle state.
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("value {value} for '{property}' is out of range (minimum {minimum})")]
    OutOfRange {
        property: &'static str,
        value: i32,
        minimum: i32,
    },
    /// The host environment lacks a required capability (e.g. Common Controls v6).
    #[error("not supported: {0}")]
    NotSupported(String),
    #[error("invalid handle: {0}")]
    InvalidHandle(String),
    /// The blocking native call returned a failing HRESULT.
    #[error("native call failed with HRESULT {code:#010x}")]
    NativeCall { code: i32 },
    #[error("operation failed: {0}")]
    OperationFailed(String),
}

pub type Result<T> = std::result::Result<T, PlatformError>;

#[cfg(target_os = "windows")]
impl From<windows::core::Error> for PlatformError {
    fn from(err: windows::core::Error) -> Self {
        PlatformError::NativeCall {
            code: err.code().0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_call_error_formats_hresult_as_hex() {
        let err = PlatformError::NativeCall {
            code: 0x8007_0057_u32 as i32,
        };
        assert_eq!(err.to_string(), "native call failed with HRESULT 0x80070057");
    }

    #[test]
    fn test_out_of_range_error_names_property_and_bound() {
        let err = PlatformError::OutOfRange {
            property: "DefaultRadioButton",
            value: -2,
            minimum: -1,
        };
        let message = err.to_string();
        assert!(message.contains("DefaultRadioButton"));
        assert!(message.contains("-2"));
        assert!(message.contains("minimum -1"));
    }
}
