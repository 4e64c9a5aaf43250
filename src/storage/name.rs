use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid {kind}: {name:?}")]
    InvalidName { kind: &'static str, name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reject names that could escape the user directory when joined into a path.
///
/// `kind` names the value in the error ("username", "filename").
pub fn validate_name(kind: &'static str, name: &str) -> Result<(), StorageError> {
    let invalid = name.is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\', '\0']);

    if invalid {
        return Err(StorageError::InvalidName {
            kind,
            name: name.to_string(),
        });
    }

    Ok(())
}
