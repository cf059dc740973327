use crate::application::circulation::CirculationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub struct ApiError(CirculationError);

impl From<CirculationError> for ApiError {
    fn from(err: CirculationError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            CirculationError::BookNotFound | CirculationError::MemberNotFound => {
                StatusCode::NOT_FOUND
            }
            CirculationError::BookNotAvailable
            | CirculationError::BookAlreadyReturned
            | CirculationError::Validation(_) => StatusCode::BAD_REQUEST,
            CirculationError::StoreError(_) | CirculationError::QrEncodingError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_type, message) = match &self.0 {
            // 404 Not Found
            CirculationError::BookNotFound => ("BOOK_NOT_FOUND", "Book not found".to_string()),
            CirculationError::MemberNotFound => {
                ("MEMBER_NOT_FOUND", "Member not found".to_string())
            }

            // 400 Bad Request - 状態遷移不可
            CirculationError::BookNotAvailable => {
                ("BOOK_NOT_AVAILABLE", "Book is not available".to_string())
            }
            CirculationError::BookAlreadyReturned => (
                "BOOK_ALREADY_RETURNED",
                "Book is already returned".to_string(),
            ),
            CirculationError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),

            // 500 Internal Server Error
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            CirculationError::StoreError(e) => {
                tracing::error!("Store error: {}", e);
                ("STORE_ERROR", "Failed to access the store".to_string())
            }
            CirculationError::QrEncodingError(e) => {
                tracing::error!("QR encoding error: {}", e);
                ("QR_ENCODING_ERROR", "Failed to generate QR code".to_string())
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert_eq!(
            ApiError::from(CirculationError::BookNotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(CirculationError::BookNotAvailable).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(CirculationError::BookAlreadyReturned).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_store_error_is_internal() {
        let err = CirculationError::StoreError("connection refused".into());
        assert_eq!(
            ApiError::from(err).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
