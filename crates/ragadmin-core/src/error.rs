// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the ragadmin provisioning service.

use thiserror::Error;

/// The primary error type used across all ragadmin components.
///
/// Variants map to the failure taxonomy of the provisioning workflow:
/// validation and conflict errors surface immediately with no side effects,
/// configuration errors indicate operator misconfiguration, and downstream
/// errors carry the status and body returned by the external service.
#[derive(Debug, Error)]
pub enum RagAdminError {
    /// Malformed or missing input in a creation request.
    #[error("{0}")]
    Validation(String),

    /// A uniqueness constraint would be violated (duplicate assistant or
    /// container name).
    #[error("{0}")]
    Conflict(String),

    /// A required setting is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure,
    /// serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failure obtaining a bearer token from the identity endpoint.
    #[error("authentication error: {message}")]
    Auth {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Non-2xx response or network failure from the external RAG service.
    #[error("downstream error{}: {body}", status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Downstream { status: Option<u16>, body: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RagAdminError {
    /// Wraps an arbitrary error as a storage error.
    pub fn storage<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage {
            source: Box::new(source),
        }
    }

    /// Returns the most specific user-facing message for this error.
    ///
    /// Validation, conflict, and downstream errors expose their own text;
    /// everything else collapses to the Display form.
    pub fn client_message(&self) -> String {
        match self {
            Self::Downstream { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downstream_display_includes_status_and_body() {
        let err = RagAdminError::Downstream {
            status: Some(502),
            body: "bad gateway".into(),
        };
        assert_eq!(err.to_string(), "downstream error (502): bad gateway");

        let err = RagAdminError::Downstream {
            status: None,
            body: "connection refused".into(),
        };
        assert_eq!(err.to_string(), "downstream error: connection refused");
    }

    #[test]
    fn client_message_prefers_downstream_body() {
        let err = RagAdminError::Downstream {
            status: Some(409),
            body: "container exists".into(),
        };
        assert_eq!(err.client_message(), "container exists");

        let err = RagAdminError::Validation("Instruction is required.".into());
        assert_eq!(err.client_message(), "Instruction is required.");
    }
}
