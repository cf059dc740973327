use serde::{Deserialize, Serialize};

use crate::domain::{Book, Loan, Member, MemberId, QrToken};
use crate::ports::{BookWithLoans, MemberWithLoans};

/// POST /books のリクエスト
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterBookRequest {
    pub title: String,
    pub author: String,
}

/// POST /members のリクエスト
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterMemberRequest {
    pub name: String,
}

/// POST /checkout のリクエスト
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub qr_data: QrToken,
    pub member_id: MemberId,
}

/// POST /return のリクエスト
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    pub qr_data: QrToken,
}

/// 書籍登録レスポンス（QR画像はdata URI）
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookCreatedResponse {
    pub book: Book,
    pub qr_image: String,
}

/// 書籍一覧の要素
#[derive(Debug, Serialize, Deserialize)]
pub struct BookResponse {
    #[serde(flatten)]
    pub book: Book,
    pub loans: Vec<Loan>,
}

impl From<BookWithLoans> for BookResponse {
    fn from(view: BookWithLoans) -> Self {
        Self {
            book: view.book,
            loans: view.loans,
        }
    }
}

/// 会員一覧の要素
#[derive(Debug, Serialize, Deserialize)]
pub struct MemberResponse {
    #[serde(flatten)]
    pub member: Member,
    pub loans: Vec<Loan>,
}

impl From<MemberWithLoans> for MemberResponse {
    fn from(view: MemberWithLoans) -> Self {
        Self {
            member: view.member,
            loans: view.loans,
        }
    }
}

/// 貸出レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub message: String,
    pub loan: Loan,
}

/// 返却レスポンス（閉じた貸出が無い場合はnull）
#[derive(Debug, Serialize, Deserialize)]
pub struct ReturnResponse {
    pub message: String,
    pub loan: Option<Loan>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
