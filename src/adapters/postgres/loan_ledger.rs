use crate::domain::{
    BookStatus,
    loan::{Checkout, Return},
};
use crate::ports::loan_ledger::{
    CheckoutOutcome, LoanLedger as LoanLedgerTrait, Result, ReturnOutcome,
};
use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::{LOAN_COLUMNS, map_row_to_loan};

/// PostgreSQL implementation of LoanLedger
///
/// Each checkout/return runs in one transaction. The book status is flipped
/// with a conditional UPDATE, so only one of two concurrent requests
/// observes the expected status and proceeds.
pub struct LoanLedger {
    pool: PgPool,
}

impl LoanLedger {
    /// Create a new LoanLedger with a PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoanLedgerTrait for LoanLedger {
    async fn record_checkout(&self, checkout: Checkout) -> Result<CheckoutOutcome> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE books
            SET status = $2
            WHERE id = $1 AND status = $3
            "#,
        )
        .bind(checkout.book_id.value())
        .bind(checkout.new_status.as_str())
        .bind(BookStatus::Available.as_str())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            tx.rollback().await?;
            return Ok(CheckoutOutcome::StatusConflict);
        }

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO loans (book_id, member_id, loan_date, due_date)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            LOAN_COLUMNS
        ))
        .bind(checkout.loan.book_id.value())
        .bind(checkout.loan.member_id.value())
        .bind(checkout.loan.loan_date)
        .bind(checkout.loan.due_date)
        .fetch_one(&mut *tx)
        .await?;

        let loan = map_row_to_loan(&row)?;

        tx.commit().await?;
        Ok(CheckoutOutcome::Recorded(loan))
    }

    async fn record_return(&self, ret: Return) -> Result<ReturnOutcome> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE books
            SET status = $2
            WHERE id = $1 AND status = $3
            "#,
        )
        .bind(ret.book_id.value())
        .bind(ret.new_status.as_str())
        .bind(BookStatus::Loaned.as_str())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            tx.rollback().await?;
            return Ok(ReturnOutcome::StatusConflict);
        }

        // 貸出中の貸出が無い場合は何も更新しない
        let row = sqlx::query(&format!(
            r#"
            UPDATE loans
            SET return_date = $2
            WHERE id = (
                SELECT id FROM loans
                WHERE book_id = $1 AND return_date IS NULL
                ORDER BY id ASC
                LIMIT 1
            )
            RETURNING {}
            "#,
            LOAN_COLUMNS
        ))
        .bind(ret.book_id.value())
        .bind(ret.returned_at)
        .fetch_optional(&mut *tx)
        .await?;

        let closed = row.as_ref().map(map_row_to_loan).transpose()?;

        tx.commit().await?;
        Ok(ReturnOutcome::Recorded(closed))
    }
}
