use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 書籍ID - ストアが採番する連番
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(i64);

impl BookId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// 会員ID - ストアが採番する連番
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(i64);

impl MemberId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// 貸出ID - ストアが採番する連番
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoanId(i64);

impl LoanId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// QRトークン - 物理的な書籍1冊を識別する不透明な文字列
///
/// 書籍登録時に生成され、QRコードとして印刷される。
/// 中身の構造に意味はなく、一意であることのみが保証される。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QrToken(String);

impl QrToken {
    /// 新しいトークンを生成する（UUID v4）
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// スキャン結果などの既存の文字列から作成
    pub fn from_string(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QrToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_token_generate_is_unique() {
        let t1 = QrToken::generate();
        let t2 = QrToken::generate();
        assert_ne!(t1, t2);
    }

    #[test]
    fn test_qr_token_generate_is_uuid() {
        let token = QrToken::generate();
        assert!(Uuid::parse_str(token.as_str()).is_ok());
    }

    #[test]
    fn test_qr_token_from_string_keeps_value() {
        let token = QrToken::from_string("scanned-value");
        assert_eq!(token.as_str(), "scanned-value");
        assert_eq!(token.to_string(), "scanned-value");
    }

    #[test]
    fn test_ids_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&MemberId::new(7)).unwrap();
        assert_eq!(json, "7");

        let id: BookId = serde_json::from_str("42").unwrap();
        assert_eq!(id.value(), 42);
    }
}
