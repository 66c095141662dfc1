//! Success/error envelope returned by every service operation.
//!
//! Callers branch on the variant. An error never carries a payload, so
//! there is no way to read stale data out of a failed call.

use serde::Serialize;
use tracing::error;

use super::errors::DomainError;
use crate::shared::cancellation::Cancelled;
use crate::shared::messages;

/// Machine-readable failure class. The message stays the human-readable
/// fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// User or event does not exist
    NotFound,
    /// Acting user is not the organizer
    Unauthorized,
    /// Bad date range or malformed draft
    InvalidInput,
    /// Valid query with no matching rows
    EmptyResult,
    /// Storage rejected or did not apply a write
    PersistenceFailure,
    /// Caller cancelled before the operation finished
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<T> {
    Success {
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        data: T,
    },
    Error {
        kind: ErrorKind,
        message: String,
    },
}

/// Outcome of a mutating operation
pub type ServiceResult = Outcome<()>;

/// Outcome of a query
pub type DataResult<T> = Outcome<T>;

impl<T> Outcome<T> {
    pub fn success(data: T) -> Self {
        Self::Success {
            message: None,
            data,
        }
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self::Success {
            message: Some(message.into()),
            data,
        }
    }

    pub fn error(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Error {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { message, .. } => message.as_deref(),
            Self::Error { message, .. } => Some(message),
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success { .. } => None,
            Self::Error { kind, .. } => Some(*kind),
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Error { .. } => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Error { .. } => None,
        }
    }

    /// Attach an informational message to a success. Errors pass through.
    pub fn with_message(self, msg: impl Into<String>) -> Self {
        match self {
            Self::Success { data, .. } => Self::Success {
                message: Some(msg.into()),
                data,
            },
            error => error,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success { message, data } => Outcome::Success {
                message,
                data: f(data),
            },
            Self::Error { kind, message } => Outcome::Error { kind, message },
        }
    }
}

impl Outcome<()> {
    /// Value-less success carrying a message
    pub fn ok(message: impl Into<String>) -> Self {
        Self::success_with_message((), message)
    }
}

/// Reason a service call stopped before producing a value.
///
/// Services build their happy path as `Result<T, Rejection>` and use `?`;
/// the public entry point folds it into an [`Outcome`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub kind: ErrorKind,
    pub message: String,
}

impl Rejection {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    pub fn empty(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EmptyResult, message)
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PersistenceFailure, message)
    }
}

impl From<Cancelled> for Rejection {
    fn from(_: Cancelled) -> Self {
        Self::new(ErrorKind::Cancelled, messages::OPERATION_CANCELLED)
    }
}

impl From<DomainError> for Rejection {
    fn from(err: DomainError) -> Self {
        let kind = match &err {
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::Validation(_) => ErrorKind::InvalidInput,
            DomainError::Conflict(_) | DomainError::Storage(_) => ErrorKind::PersistenceFailure,
            DomainError::Cancelled => return Cancelled.into(),
        };
        if kind == ErrorKind::PersistenceFailure {
            error!(error = %err, "Collaborator call failed");
        }
        Self::new(kind, err.to_string())
    }
}

impl<T> From<Rejection> for Outcome<T> {
    fn from(rejection: Rejection) -> Self {
        Outcome::Error {
            kind: rejection.kind,
            message: rejection.message,
        }
    }
}

impl<T> From<Result<T, Rejection>> for Outcome<T> {
    fn from(result: Result<T, Rejection>) -> Self {
        match result {
            Ok(data) => Outcome::success(data),
            Err(rejection) => rejection.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_never_exposes_data() {
        let outcome: DataResult<u32> = Outcome::error(ErrorKind::NotFound, "Event not found.");
        assert!(outcome.is_error());
        assert_eq!(outcome.data(), None);
        assert_eq!(outcome.message(), Some("Event not found."));
        assert_eq!(outcome.error_kind(), Some(ErrorKind::NotFound));
    }

    #[test]
    fn success_message_is_optional() {
        let plain = Outcome::success(3);
        assert!(plain.is_success());
        assert_eq!(plain.message(), None);

        let with_msg = plain.with_message("done");
        assert_eq!(with_msg.message(), Some("done"));
        assert_eq!(with_msg.into_data(), Some(3));
    }

    #[test]
    fn with_message_leaves_errors_untouched() {
        let outcome: ServiceResult = Outcome::error(ErrorKind::Unauthorized, "nope");
        let outcome = outcome.with_message("ignored");
        assert_eq!(outcome.message(), Some("nope"));
    }

    #[test]
    fn map_transforms_only_success() {
        let ok = Outcome::success_with_message(2, "two").map(|n| n * 2);
        assert_eq!(ok, Outcome::success_with_message(4, "two"));

        let err: DataResult<i32> = Outcome::error(ErrorKind::EmptyResult, "empty");
        assert_eq!(err.map(|n| n * 2).error_kind(), Some(ErrorKind::EmptyResult));
    }

    #[test]
    fn domain_errors_map_to_kinds() {
        let r: Rejection = DomainError::Storage("disk full".into()).into();
        assert_eq!(r.kind, ErrorKind::PersistenceFailure);
        assert_eq!(r.message, "Storage error: disk full");

        let r: Rejection = DomainError::Cancelled.into();
        assert_eq!(r.kind, ErrorKind::Cancelled);
        assert_eq!(r.message, messages::OPERATION_CANCELLED);

        let r: Rejection = DomainError::not_found("Event", "id", "x").into();
        assert_eq!(r.kind, ErrorKind::NotFound);
    }

    #[test]
    fn serializes_as_tagged_union() {
        let ok = Outcome::ok("Event created successfully.");
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "Event created successfully.");

        let err: ServiceResult = Outcome::error(ErrorKind::InvalidInput, "Invalid date range.");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["kind"], "invalid_input");
        assert!(json.get("data").is_none());
    }
}
