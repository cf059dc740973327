use crate::domain::{Book, Loan, Member, MemberId, NewBook, NewMember, QrToken};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 書籍とその貸出履歴（一覧表示用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookWithLoans {
    pub book: Book,
    pub loans: Vec<Loan>,
}

/// 会員とその貸出履歴（一覧表示用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberWithLoans {
    pub member: Member,
    pub loans: Vec<Loan>,
}

/// カタログストアポート
///
/// 書籍と会員の登録・参照を抽象化する。
/// 書籍の状態変更はここでは行わず、`LoanLedger`経由でのみ行う。
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// 書籍を登録し、採番済みの書籍を返す
    ///
    /// トークンの一意性はストア側でも強制される。
    async fn insert_book(&self, book: NewBook) -> Result<Book>;

    /// QRトークンで書籍を検索する
    async fn find_book_by_token(&self, token: &QrToken) -> Result<Option<Book>>;

    /// 全書籍を貸出履歴付きで取得する（ID昇順）
    async fn list_books(&self) -> Result<Vec<BookWithLoans>>;

    /// 会員を登録し、採番済みの会員を返す
    async fn insert_member(&self, member: NewMember) -> Result<Member>;

    /// 会員が存在するか確認する
    async fn member_exists(&self, member_id: MemberId) -> Result<bool>;

    /// 全会員を貸出履歴付きで取得する（ID昇順）
    async fn list_members(&self) -> Result<Vec<MemberWithLoans>>;
}
