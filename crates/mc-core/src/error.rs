use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Conditions schema mismatch for '{key}': {reason}")]
    SchemaMismatch { key: String, reason: String },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: String, value: f64 },
}

impl CoreError {
    pub(crate) fn mismatch(key: &str, reason: impl Into<String>) -> Self {
        CoreError::SchemaMismatch {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
