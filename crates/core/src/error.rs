//! Error types for the pcparts domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum.

use thiserror::Error;

/// Failures reading from or writing to the backing part store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be opened or read. Fatal to startup.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A stored specs field is not a valid structured document.
    #[error("Malformed specs in row {row}: {reason}")]
    MalformedSpecs { row: i64, reason: String },

    #[error("Query failed: {0}")]
    QueryFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A category required by the build engine has no parts at all.
    #[error("Required category missing from catalog: {0}")]
    CategoryMissing(String),
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_displays_row() {
        let err = StoreError::MalformedSpecs {
            row: 7,
            reason: "expected value at line 1 column 1".into(),
        };
        assert!(err.to_string().contains("row 7"));
        assert!(err.to_string().contains("expected value"));
    }

    #[test]
    fn category_missing_passes_through_tool_error() {
        let err: ToolError = CatalogError::CategoryMissing("psu".into()).into();
        assert_eq!(err.to_string(), "Required category missing from catalog: psu");
        assert!(matches!(err, ToolError::Catalog(CatalogError::CategoryMissing(_))));
    }
}
