use serde::{Deserialize, Serialize};

use super::{BookId, QrToken, TransitionError};

/// 書籍の貸出状態
///
/// 状態は2つのみ。遷移は`check_out`と`check_in`でのみ行う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookStatus {
    /// 貸出可能
    Available,
    /// 貸出中
    Loaned,
}

impl BookStatus {
    /// 永続化・API用の文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "AVAILABLE",
            BookStatus::Loaned => "LOANED",
        }
    }

    /// 貸出遷移: AVAILABLE -> LOANED
    pub fn check_out(self) -> Result<Self, TransitionError> {
        match self {
            BookStatus::Available => Ok(BookStatus::Loaned),
            BookStatus::Loaned => Err(TransitionError::NotAvailable),
        }
    }

    /// 返却遷移: LOANED -> AVAILABLE
    pub fn check_in(self) -> Result<Self, TransitionError> {
        match self {
            BookStatus::Loaned => Ok(BookStatus::Available),
            BookStatus::Available => Err(TransitionError::AlreadyAvailable),
        }
    }
}

impl std::str::FromStr for BookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(BookStatus::Available),
            "LOANED" => Ok(BookStatus::Loaned),
            _ => Err(format!("Invalid book status: {}", s)),
        }
    }
}

/// 書籍（物理的な1冊）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub qr_data: QrToken,
    pub status: BookStatus,
}

/// 登録前の書籍。IDはストアが採番する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub qr_data: QrToken,
    pub status: BookStatus,
}

impl NewBook {
    /// 新規書籍を作成する。トークンを生成し、状態はAVAILABLE。
    pub fn register(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            qr_data: QrToken::generate(),
            status: BookStatus::Available,
        }
    }

    pub fn with_id(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            qr_data: self.qr_data,
            status: self.status,
        }
    }
}
