//! Error types for snapshot loading and validation

use thiserror::Error;

use crate::model::DeviceId;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("device {id} has unit_size 0")]
    ZeroUnitSize { id: DeviceId },
}

impl SnapshotError {
    /// Line and column of a JSON decode error, if this is one
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            SnapshotError::Json(e) => Some((e.line(), e.column())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_unit_size_display() {
        let err = SnapshotError::ZeroUnitSize { id: DeviceId(7) };
        assert_eq!(err.to_string(), "device 7 has unit_size 0");
    }

    #[test]
    fn test_json_error_location() {
        let err: SnapshotError = serde_json::from_str::<serde_json::Value>("{\n  oops")
            .unwrap_err()
            .into();
        let (line, _) = err.location().expect("json errors carry a location");
        assert_eq!(line, 2);
        assert!(SnapshotError::ZeroUnitSize { id: DeviceId(1) }
            .location()
            .is_none());
    }
}
