use std::io;
use std::path::PathBuf;

/// Fatal conversion errors. Each aborts the conversion of a single file;
/// batch callers keep going with the next input.
///
/// Non-fatal findings (referential warnings, accessor overflows, skipped
/// optional tools) never surface here, they are recorded in the
/// [`ChangeLog`](crate::validation::report::ChangeLog) instead.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Bad header, magic, version, declared length or chunk bounds.
    #[error("malformed container: {reason}")]
    MalformedContainer { reason: String },

    /// The container's first chunk is absent or is not the JSON chunk.
    #[error("container has no leading JSON chunk")]
    MissingJsonChunk,

    /// The JSON payload is not UTF-8 or does not describe a glTF document.
    #[error("invalid glTF document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    /// Reading the input or writing any output file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConvertError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ConvertError::MalformedContainer {
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_the_path() {
        let err = ConvertError::io(
            "out/model.bin",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let text = err.to_string();
        assert!(text.contains("out/model.bin"));
        assert!(text.contains("denied"));
    }

    #[test]
    fn malformed_carries_reason() {
        let err = ConvertError::malformed("bad magic 0x00000000");
        assert_eq!(err.to_string(), "malformed container: bad magic 0x00000000");
    }
}
