//! Client error taxonomy.
//!
//! Every failure the inventory client can hit ends up here, and is rendered
//! into the single `error` slot of the client state via `Display`.

use dealership_core::DomainError;
use thiserror::Error;

/// Result type used across the client.
pub type ClientResult<T> = Result<T, ClientError>;

/// The request an error originated from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    Fetch,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Fetch => "fetch",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The API answered outside the 2xx range.
    #[error("{}", http_message(.operation, .status))]
    Http { operation: Operation, status: u16 },

    /// The request never produced a response (unreachable host, aborted connection).
    #[error("{0}")]
    Transport(String),

    /// The response body was not the expected JSON.
    #[error("{0}")]
    Decode(String),

    /// The form did not satisfy its input constraints.
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// A mutation was attempted on a read-only client.
    #[error("inventory is read-only; cannot {0} cars")]
    ReadOnly(Operation),

    /// Submit was requested while neither the add nor the edit form is open.
    #[error("no car form is open")]
    NoActiveForm,
}

impl ClientError {
    pub fn http(operation: Operation, status: u16) -> Self {
        Self::Http { operation, status }
    }

    /// HTTP status carried by the error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn http_message(operation: &Operation, status: &u16) -> String {
    match operation {
        Operation::Fetch => format!("HTTP {status}"),
        op => format!("Failed to {op} car: {status}"),
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_messages_name_the_status() {
        assert_eq!(ClientError::http(Operation::Fetch, 500).to_string(), "HTTP 500");
        assert_eq!(
            ClientError::http(Operation::Update, 404).to_string(),
            "Failed to update car: 404"
        );
        assert_eq!(ClientError::http(Operation::Delete, 409).status(), Some(409));
    }

    #[test]
    fn validation_errors_pass_through() {
        let err: ClientError = DomainError::validation("price is required").into();
        assert_eq!(err.to_string(), "validation failed: price is required");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn read_only_names_the_operation() {
        assert_eq!(
            ClientError::ReadOnly(Operation::Create).to_string(),
            "inventory is read-only; cannot create cars"
        );
    }
}
