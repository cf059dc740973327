use chrono::{DateTime, Utc};

use super::{MemberId, QrToken};

/// コマンド：書籍を登録する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterBook {
    pub title: String,
    pub author: String,
}

/// コマンド：会員を登録する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterMember {
    pub name: String,
}

/// コマンド：書籍を貸し出す
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutBook {
    pub qr_data: QrToken,
    pub member_id: MemberId,
    pub checked_out_at: DateTime<Utc>,
}

/// コマンド：書籍を返却する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnBook {
    pub qr_data: QrToken,
    pub returned_at: DateTime<Utc>,
}
