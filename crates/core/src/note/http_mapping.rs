//! Pure functions for mapping service errors to HTTP status codes.

use super::ServiceError;

/// Maps a [`ServiceError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `Forbidden` -> 403 (Forbidden)
/// - `Invariant` -> 400 (Bad Request)
/// - `Infrastructure` -> 500 (Internal Server Error)
pub fn service_error_to_status_code(error: &ServiceError) -> u16 {
    match error {
        ServiceError::NotFound { .. } => 404,
        ServiceError::Forbidden { .. } => 403,
        ServiceError::Invariant(_) => 400,
        ServiceError::Infrastructure(_) => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = ServiceError::note_not_found(Uuid::nil());
        assert_eq!(service_error_to_status_code(&error), 404);
    }

    #[test]
    fn test_forbidden_maps_to_403() {
        let error = ServiceError::Forbidden {
            note_id: Uuid::nil(),
            user_id: Uuid::nil(),
        };
        assert_eq!(service_error_to_status_code(&error), 403);
    }

    #[test]
    fn test_invariant_maps_to_400() {
        let error = ServiceError::Invariant("note insert affected no rows".to_string());
        assert_eq!(service_error_to_status_code(&error), 400);
    }

    #[test]
    fn test_infrastructure_maps_to_500() {
        let error = ServiceError::Infrastructure("connection refused".to_string());
        assert_eq!(service_error_to_status_code(&error), 500);
    }
}
