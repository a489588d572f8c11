//! Mapping of errors returned by sibling services into [`AppError`].

use tonic::{Code, Status};

use crate::error::AppError;

impl From<Status> for AppError {
    fn from(status: Status) -> Self {
        let detail = || anyhow::anyhow!("{} ({:?})", status.message(), status.code());

        match status.code() {
            Code::InvalidArgument | Code::FailedPrecondition | Code::OutOfRange => {
                AppError::BadRequest(detail())
            }
            Code::NotFound => AppError::NotFound(detail()),
            Code::Unauthenticated => AppError::Unauthorized(detail()),
            Code::PermissionDenied => AppError::Forbidden(detail()),
            // peer down, or the call never reached it
            Code::Unavailable => AppError::ServiceUnavailable,
            _ => AppError::InternalError(detail()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_keeps_message() {
        let err = AppError::from(Status::not_found("user 42"));
        match err {
            AppError::NotFound(e) => assert!(e.to_string().contains("user 42")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_deadline_exceeded_is_internal() {
        let err = AppError::from(Status::deadline_exceeded("timed out"));
        match err {
            AppError::InternalError(e) => {
                let text = e.to_string();
                assert!(text.contains("timed out"));
                assert!(text.contains("DeadlineExceeded"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unavailable_maps_to_service_unavailable() {
        let err = AppError::from(Status::unavailable("connection refused"));
        assert!(matches!(err, AppError::ServiceUnavailable));
    }
}
