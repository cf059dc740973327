use crate::domain::QrToken;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// QRエンコーダーポート
///
/// トークンを画面に埋め込める画像（data URI）に変換する。
pub trait QrEncoder: Send + Sync {
    fn encode(&self, token: &QrToken) -> Result<String>;
}
