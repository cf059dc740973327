use crate::domain::TransitionError;
use thiserror::Error;

/// 貸出管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum CirculationError {
    /// QRトークンに該当する書籍が無い
    #[error("Book not found")]
    BookNotFound,

    /// 会員が存在しない
    #[error("Member not found")]
    MemberNotFound,

    /// 書籍が貸出可能ではない
    #[error("Book is not available")]
    BookNotAvailable,

    /// 書籍は既に返却済み
    #[error("Book is already returned")]
    BookAlreadyReturned,

    /// 入力値が不正
    #[error("Validation error: {0}")]
    Validation(String),

    /// ストアのエラー
    #[error("Store error")]
    StoreError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// QRコード生成のエラー
    #[error("QR encoding error")]
    QrEncodingError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<TransitionError> for CirculationError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::NotAvailable => CirculationError::BookNotAvailable,
            TransitionError::AlreadyAvailable => CirculationError::BookAlreadyReturned,
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, CirculationError>;
