//! Error codes carried in every [`ErrorResponse`](super::ErrorResponse).
//!
//! Each code has a SCREAMING_SNAKE_CASE identifier for clients, an integer for
//! logs and a default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::InvalidId;
//! assert_eq!(code.as_str(), "INVALID_ID");
//! assert_eq!(code.code(), 1002);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// One or more product fields failed validation
    ValidationError,
    /// Path id is not a valid integer
    InvalidId,
    /// Request body could not be read as JSON
    JsonExtraction,
    NotFound,
    /// Malformed query parameters, unknown sort field
    BadRequest,
    InternalError,
    DatabaseError,
    /// No pooled connection became available in time
    DatabasePoolTimeout,
}

impl ErrorCode {
    /// Identifier, integer code and default message.
    ///
    /// Integers: 1000-1999 client and generic server errors, 2000-2999 database.
    const fn parts(self) -> (&'static str, i32, &'static str) {
        match self {
            Self::ValidationError => ("VALIDATION_ERROR", 1001, "Request validation failed"),
            Self::InvalidId => ("INVALID_ID", 1002, "Invalid id format"),
            Self::JsonExtraction => ("JSON_EXTRACTION", 1003, "Failed to parse request body"),
            Self::NotFound => ("NOT_FOUND", 1004, "Resource not found"),
            Self::InternalError => ("INTERNAL_ERROR", 1005, "An internal server error occurred"),
            Self::BadRequest => ("BAD_REQUEST", 1006, "Bad request"),
            Self::DatabaseError => ("DATABASE_ERROR", 2003, "Database error occurred"),
            Self::DatabasePoolTimeout => (
                "DATABASE_POOL_TIMEOUT",
                2013,
                "Database connection pool timed out",
            ),
        }
    }

    pub const fn as_str(&self) -> &'static str {
        self.parts().0
    }

    /// Integer code for structured logs.
    pub const fn code(&self) -> i32 {
        self.parts().1
    }

    pub const fn default_message(&self) -> &'static str {
        self.parts().2
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
