use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use noteshare_core::note::{service_error_to_status_code, ServiceError};

pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(service_error) = self.0.downcast_ref::<ServiceError>() {
            let code = service_error_to_status_code(service_error);
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

            // Client-visible kinds carry their message; infrastructure
            // details stay server-side.
            if status != StatusCode::INTERNAL_SERVER_ERROR {
                return (status, service_error.to_string()).into_response();
            }
        }

        tracing::error!(error = %self.0, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
