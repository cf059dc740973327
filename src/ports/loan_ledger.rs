use crate::domain::{Loan, loan::{Checkout, Return}};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 貸出記録の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// 貸出を記録し、書籍をLOANEDにした
    Recorded(Loan),
    /// 書籍の状態が既に変わっていた（同時貸出に負けた）
    StatusConflict,
}

/// 返却記録の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnOutcome {
    /// 書籍をAVAILABLEにした。貸出中の貸出があればそれを閉じたもの
    Recorded(Option<Loan>),
    /// 書籍の状態が既に変わっていた
    StatusConflict,
}

/// 貸出台帳ポート
///
/// 書籍状態の更新と貸出記録の書き込みを1つの単位として扱う。
/// 状態の更新は比較交換（期待する状態のときのみ更新）で行い、
/// 同じ書籍への同時貸出はどちらか一方だけが成功する。
#[async_trait]
pub trait LoanLedger: Send + Sync {
    /// 貸出を記録する
    ///
    /// 書籍がAVAILABLEの場合のみ、貸出の追加と状態更新をアトミックに行う。
    async fn record_checkout(&self, checkout: Checkout) -> Result<CheckoutOutcome>;

    /// 返却を記録する
    ///
    /// 書籍がLOANEDの場合のみ、貸出中の貸出を閉じて状態をAVAILABLEに戻す。
    /// 貸出中の貸出が無くても状態は戻す。
    async fn record_return(&self, ret: Return) -> Result<ReturnOutcome>;
}
