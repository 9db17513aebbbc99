use crate::errors::{
    error::ErrorResponse, repository::RepositoryError, service::ServiceError,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Generic message for every fault the client has no business inspecting.
pub const GENERIC_SERVER_ERROR: &str = "Algo deu errado. Tente novamente mais tarde!";

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    UnprocessableEntity(String),
    NotFound(String),
    Internal(String),
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg) => HttpError::UnprocessableEntity(msg),

            ServiceError::NotFound(msg) => HttpError::NotFound(msg),

            ServiceError::Repo(RepositoryError::NotFound) => {
                HttpError::NotFound("Produto inexistente".into())
            }

            // Store faults, upload faults and anything unexpected collapse
            // into a 500 with a safe message; detail stays in the server log.
            ServiceError::Repo(_)
            | ServiceError::Upload(_)
            | ServiceError::Internal(_)
            | ServiceError::Custom(_) => HttpError::Internal(GENERIC_SERVER_ERROR.into()),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse {
            status: "error".into(),
            message: msg,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::upload::UploadError;

    #[test]
    fn validation_maps_to_422() {
        let err: HttpError =
            ServiceError::Validation("O nome do produto é obrigatório!".into()).into();
        assert!(matches!(err, HttpError::UnprocessableEntity(msg) if msg.contains("obrigatório")));
    }

    #[test]
    fn not_found_keeps_message() {
        let err: HttpError = ServiceError::NotFound("Produto inexistente".into()).into();
        assert!(matches!(err, HttpError::NotFound(msg) if msg == "Produto inexistente"));
    }

    #[test]
    fn upload_fault_hides_detail() {
        let upload = UploadError::Token("secret detail".into());
        let err: HttpError = ServiceError::Upload(upload).into();
        match err {
            HttpError::Internal(msg) => {
                assert_eq!(msg, GENERIC_SERVER_ERROR);
                assert!(!msg.contains("secret"));
            }
            other => panic!("expected Internal, got {other:?}"),
        }
    }
}
