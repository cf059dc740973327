/// 書籍の状態遷移エラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    /// 貸出しようとしたが書籍がAVAILABLEではない
    NotAvailable,
    /// 返却しようとしたが書籍は既にAVAILABLE
    AlreadyAvailable,
}
