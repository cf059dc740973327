use crate::domain::{self, Loan, commands::*};
use crate::ports::*;
use chrono::Duration;
use std::sync::Arc;

use super::errors::{CirculationError, Result};

/// サービスの依存関係
///
/// ストアへのハンドルはすべてここから明示的に渡す。
/// グローバルな接続は持たない。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub catalog: Arc<dyn CatalogStore>,
    pub ledger: Arc<dyn LoanLedger>,
    pub qr_encoder: Arc<dyn QrEncoder>,
    /// 貸出期間（通常14日）
    pub loan_period: Duration,
}

/// QRトークンから書籍を取得するヘルパー関数
async fn load_book(deps: &ServiceDependencies, token: &domain::QrToken) -> Result<domain::Book> {
    deps.catalog
        .find_book_by_token(token)
        .await
        .map_err(CirculationError::StoreError)?
        .ok_or(CirculationError::BookNotFound)
}

/// 書籍を貸し出す
///
/// ビジネスルール：
/// - 書籍が存在すること
/// - 書籍がAVAILABLEであること
/// - 会員が存在すること
///
/// 貸出記録の追加と状態更新は台帳側でアトミックに行われる。
/// 判定後に他のリクエストが先に貸し出した場合は`BookNotAvailable`になる。
pub async fn check_out_book(deps: &ServiceDependencies, cmd: CheckOutBook) -> Result<Loan> {
    // 1. 書籍の取得
    let book = load_book(deps, &cmd.qr_data).await?;

    // 2. ドメイン層の純粋関数で遷移を判定
    let checkout =
        domain::loan::check_out(&book, cmd.member_id, cmd.checked_out_at, deps.loan_period)?;

    // 3. 会員の存在確認
    let member_exists = deps
        .catalog
        .member_exists(cmd.member_id)
        .await
        .map_err(CirculationError::StoreError)?;

    if !member_exists {
        return Err(CirculationError::MemberNotFound);
    }

    // 4. 台帳に記録（比較交換）
    let outcome = deps
        .ledger
        .record_checkout(checkout)
        .await
        .map_err(CirculationError::StoreError)?;

    match outcome {
        CheckoutOutcome::Recorded(loan) => {
            tracing::info!(
                book_id = book.id.value(),
                member_id = cmd.member_id.value(),
                loan_id = loan.id.value(),
                due_date = %loan.due_date,
                "Book checked out"
            );
            Ok(loan)
        }
        CheckoutOutcome::StatusConflict => {
            tracing::debug!(book_id = book.id.value(), "Checkout lost race on book status");
            Err(CirculationError::BookNotAvailable)
        }
    }
}

/// 書籍を返却する
///
/// ビジネスルール：
/// - 書籍が存在すること
/// - 書籍がLOANEDであること
/// - 貸出中の貸出が見つからなくても返却は成功する
///
/// 戻り値は閉じた貸出（見つからなかった場合はNone）。
pub async fn return_book(deps: &ServiceDependencies, cmd: ReturnBook) -> Result<Option<Loan>> {
    // 1. 書籍の取得
    let book = load_book(deps, &cmd.qr_data).await?;

    // 2. ドメイン層の純粋関数で遷移を判定
    let ret = domain::loan::check_in(&book, cmd.returned_at)?;

    // 3. 台帳に記録（比較交換）
    let outcome = deps
        .ledger
        .record_return(ret)
        .await
        .map_err(CirculationError::StoreError)?;

    match outcome {
        ReturnOutcome::Recorded(Some(loan)) => {
            tracing::info!(
                book_id = book.id.value(),
                loan_id = loan.id.value(),
                "Book returned"
            );
            Ok(Some(loan))
        }
        ReturnOutcome::Recorded(None) => {
            tracing::warn!(
                book_id = book.id.value(),
                "Book was LOANED without an open loan; status reset to AVAILABLE"
            );
            Ok(None)
        }
        ReturnOutcome::StatusConflict => Err(CirculationError::BookAlreadyReturned),
    }
}
