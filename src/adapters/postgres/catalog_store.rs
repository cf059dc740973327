use crate::domain::{Book, BookId, Loan, Member, MemberId, NewBook, NewMember, QrToken};
use crate::ports::catalog_store::{
    BookWithLoans, CatalogStore as CatalogStoreTrait, MemberWithLoans, Result,
};
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;

use super::rows::{LOAN_COLUMNS, map_row_to_book, map_row_to_loan, map_row_to_member};

/// PostgreSQL implementation of CatalogStore
pub struct CatalogStore {
    pool: PgPool,
}

impl CatalogStore {
    /// Create a new CatalogStore with a PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load every loan in id order
    async fn all_loans(&self) -> Result<Vec<Loan>> {
        let rows = sqlx::query(&format!("SELECT {} FROM loans ORDER BY id ASC", LOAN_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_row_to_loan).collect()
    }
}

#[async_trait]
impl CatalogStoreTrait for CatalogStore {
    async fn insert_book(&self, book: NewBook) -> Result<Book> {
        let row = sqlx::query(
            r#"
            INSERT INTO books (title, author, qr_data, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, author, qr_data, status
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.qr_data.as_str())
        .bind(book.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        map_row_to_book(&row)
    }

    async fn find_book_by_token(&self, token: &QrToken) -> Result<Option<Book>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, author, qr_data, status
            FROM books
            WHERE qr_data = $1
            "#,
        )
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_book).transpose()
    }

    /// Two queries: books, then all loans grouped by book id
    async fn list_books(&self) -> Result<Vec<BookWithLoans>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, author, qr_data, status
            FROM books
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut loans_by_book: HashMap<BookId, Vec<Loan>> = HashMap::new();
        for loan in self.all_loans().await? {
            loans_by_book.entry(loan.book_id).or_default().push(loan);
        }

        rows.iter()
            .map(|row| -> Result<BookWithLoans> {
                let book = map_row_to_book(row)?;
                let loans = loans_by_book.remove(&book.id).unwrap_or_default();
                Ok(BookWithLoans { book, loans })
            })
            .collect()
    }

    async fn insert_member(&self, member: NewMember) -> Result<Member> {
        let row = sqlx::query(
            r#"
            INSERT INTO members (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(&member.name)
        .fetch_one(&self.pool)
        .await?;

        map_row_to_member(&row)
    }

    async fn member_exists(&self, member_id: MemberId) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM members WHERE id = $1)")
                .bind(member_id.value())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn list_members(&self) -> Result<Vec<MemberWithLoans>> {
        let rows = sqlx::query("SELECT id, name FROM members ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        let mut loans_by_member: HashMap<MemberId, Vec<Loan>> = HashMap::new();
        for loan in self.all_loans().await? {
            loans_by_member.entry(loan.member_id).or_default().push(loan);
        }

        rows.iter()
            .map(|row| -> Result<MemberWithLoans> {
                let member = map_row_to_member(row)?;
                let loans = loans_by_member.remove(&member.id).unwrap_or_default();
                Ok(MemberWithLoans { member, loans })
            })
            .collect()
    }
}
