use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{Book, BookId, BookStatus, LoanId, MemberId, TransitionError};

/// 貸出期間（日数）
pub const LOAN_PERIOD_DAYS: i64 = 14;

/// 貸出記録 - 1冊の書籍の1回の貸出
///
/// `return_date`がNoneの貸出を「貸出中の貸出」と呼ぶ。
/// 1冊の書籍につき貸出中の貸出は高々1件。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: LoanId,
    pub book_id: BookId,
    pub member_id: MemberId,
    pub loan_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

impl Loan {
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }
}

/// 記録前の貸出。IDはストアが採番する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLoan {
    pub book_id: BookId,
    pub member_id: MemberId,
    pub loan_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

impl NewLoan {
    pub fn with_id(self, id: LoanId) -> Loan {
        Loan {
            id,
            book_id: self.book_id,
            member_id: self.member_id,
            loan_date: self.loan_date,
            due_date: self.due_date,
            return_date: None,
        }
    }
}

/// 貸出の判定結果
///
/// ストアはこの2つの書き込みを1つのトランザクションで反映する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    pub book_id: BookId,
    pub new_status: BookStatus,
    pub loan: NewLoan,
}

/// 返却の判定結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Return {
    pub book_id: BookId,
    pub new_status: BookStatus,
    pub returned_at: DateTime<Utc>,
}

/// 純粋関数：書籍を貸し出す
///
/// ビジネスルール：
/// - AVAILABLEの書籍のみ貸出可能
/// - 返却期限は貸出日時 + 貸出期間
///
/// 副作用なし。
pub fn check_out(
    book: &Book,
    member_id: MemberId,
    loaned_at: DateTime<Utc>,
    loan_period: Duration,
) -> Result<Checkout, TransitionError> {
    let new_status = book.status.check_out()?;

    Ok(Checkout {
        book_id: book.id,
        new_status,
        loan: NewLoan {
            book_id: book.id,
            member_id,
            loan_date: loaned_at,
            due_date: loaned_at + loan_period,
        },
    })
}

/// 純粋関数：書籍を返却する
///
/// ビジネスルール：
/// - LOANEDの書籍のみ返却可能
/// - 貸出中の貸出が見つからなくても状態はAVAILABLEに戻す
pub fn check_in(book: &Book, returned_at: DateTime<Utc>) -> Result<Return, TransitionError> {
    let new_status = book.status.check_in()?;

    Ok(Return {
        book_id: book.id,
        new_status,
        returned_at,
    })
}

/// 純粋関数：貸出記録を返却済みにする
///
/// 既に返却済みの貸出は変更しない（return_dateは一度だけ設定される）。
pub fn close_loan(loan: &Loan, returned_at: DateTime<Utc>) -> Loan {
    if loan.is_open() {
        Loan {
            return_date: Some(returned_at),
            ..loan.clone()
        }
    } else {
        loan.clone()
    }
}

/// 書籍ごとの貸出中の貸出を探す
pub fn find_open_loan<'a>(
    loans: impl IntoIterator<Item = &'a Loan>,
    book_id: BookId,
) -> Option<&'a Loan> {
    loans.into_iter().find(|l| l.book_id == book_id && l.is_open())
}
