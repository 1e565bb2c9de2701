use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Rainfall data for year {0} already exists")]
    DuplicateYear(i32),

    #[error("Not found: {entity} with id={id}")]
    NotFound { entity: &'static str, id: i32 },

    #[error("Validation: {0}")]
    Validation(String),

    /// Storage or runtime failure; the detail is logged, never returned to clients
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }

    /// Short machine-readable code used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateUsername(_) => "duplicate_username",
            Self::InvalidCredentials => "invalid_credentials",
            Self::DuplicateYear(_) => "duplicate_year",
            Self::NotFound { .. } => "not_found",
            Self::Validation(_) => "validation_error",
            Self::Internal(_) => "internal_error",
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(DomainError::DuplicateYear(2020).code(), "duplicate_year");
        assert_eq!(DomainError::not_found("RainfallEntry", 7).code(), "not_found");
        assert_eq!(DomainError::InvalidCredentials.code(), "invalid_credentials");
    }

    #[test]
    fn display_includes_context() {
        let err = DomainError::not_found("RainfallEntry", 7);
        assert_eq!(err.to_string(), "Not found: RainfallEntry with id=7");
        assert_eq!(
            DomainError::DuplicateYear(2021).to_string(),
            "Rainfall data for year 2021 already exists"
        );
    }
}
