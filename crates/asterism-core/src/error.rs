use thiserror::Error;

/// Why a constellation could not be saved. Both are shown to the user as a
/// blocking alert and leave the store untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SaveError {
    #[error("Please select at least 2 stars and enter a constellation name.")]
    InvalidInput,
    #[error("A constellation with this name already exists. Please choose a different name.")]
    DuplicateName(String),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog contains no stars")]
    Empty,
}

/// A durable write that did not go through. Writes are best effort; callers
/// log these and carry on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("storage write failed: {0}")]
pub struct StorageError(pub String);
