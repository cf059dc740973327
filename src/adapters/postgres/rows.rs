use crate::domain::{Book, BookId, BookStatus, Loan, LoanId, Member, MemberId, QrToken};
use sqlx::{Row, postgres::PgRow};
use std::str::FromStr;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

pub(super) const LOAN_COLUMNS: &str = "id, book_id, member_id, loan_date, due_date, return_date";

/// Convert a `books` row into a Book
///
/// Fails when the status column holds a value outside the two known states.
pub(super) fn map_row_to_book(row: &PgRow) -> Result<Book> {
    let status_str: &str = row.try_get("status")?;
    let status = BookStatus::from_str(status_str).map_err(|e| {
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            as Box<dyn std::error::Error + Send + Sync>
    })?;

    Ok(Book {
        id: BookId::new(row.try_get("id")?),
        title: row.try_get("title")?,
        author: row.try_get("author")?,
        qr_data: QrToken::from_string(row.try_get::<String, _>("qr_data")?),
        status,
    })
}

pub(super) fn map_row_to_member(row: &PgRow) -> Result<Member> {
    Ok(Member {
        id: MemberId::new(row.try_get("id")?),
        name: row.try_get("name")?,
    })
}

pub(super) fn map_row_to_loan(row: &PgRow) -> Result<Loan> {
    Ok(Loan {
        id: LoanId::new(row.try_get("id")?),
        book_id: BookId::new(row.try_get("book_id")?),
        member_id: MemberId::new(row.try_get("member_id")?),
        loan_date: row.try_get("loan_date")?,
        due_date: row.try_get("due_date")?,
        return_date: row.try_get("return_date")?,
    })
}
