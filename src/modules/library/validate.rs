use gateway_http::error::AppError;

/// Check that the body of an update names the same entity as the path.
///
/// A missing body id counts as a mismatch; an inconsistent update must never
/// reach the backend.
pub fn ensure_matching_id(path_id: i64, body_id: Option<i64>) -> Result<(), AppError> {
    match body_id {
        Some(id) if id == path_id => Ok(()),
        Some(id) => Err(AppError::bad_request(format!(
            "entity id {} does not match path id {}",
            id, path_id
        ))),
        None => Err(AppError::bad_request(format!(
            "entity id is missing; expected {}",
            path_id
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_ids_pass() {
        assert!(ensure_matching_id(5, Some(5)).is_ok());
    }

    #[test]
    fn mismatched_ids_fail() {
        let err = ensure_matching_id(5, Some(7)).unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[test]
    fn missing_body_id_fails() {
        let err = ensure_matching_id(5, None).unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }
}
