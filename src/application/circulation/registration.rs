use crate::domain::{Book, Member, NewBook, NewMember, commands::*};
use crate::ports::{BookWithLoans, MemberWithLoans};

use super::circulation_service::ServiceDependencies;
use super::errors::{CirculationError, Result};

/// 登録済みの書籍とQR画像（data URI）
#[derive(Debug, Clone)]
pub struct RegisteredBook {
    pub book: Book,
    pub qr_image: String,
}

fn require_non_blank(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CirculationError::Validation(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

/// 書籍を登録する
///
/// トークンを生成してAVAILABLEで保存し、そのトークンのQR画像を返す。
/// QR画像は保存前に生成するため、生成に失敗した場合は何も保存されない。
pub async fn register_book(
    deps: &ServiceDependencies,
    cmd: RegisterBook,
) -> Result<RegisteredBook> {
    let title = require_non_blank("title", &cmd.title)?;
    let author = require_non_blank("author", &cmd.author)?;

    let new_book = NewBook::register(title, author);

    let qr_image = deps
        .qr_encoder
        .encode(&new_book.qr_data)
        .map_err(CirculationError::QrEncodingError)?;

    let book = deps
        .catalog
        .insert_book(new_book)
        .await
        .map_err(CirculationError::StoreError)?;

    tracing::info!(book_id = book.id.value(), title = %book.title, "Book registered");

    Ok(RegisteredBook { book, qr_image })
}

/// 会員を登録する（名前の重複は許可）
pub async fn register_member(deps: &ServiceDependencies, cmd: RegisterMember) -> Result<Member> {
    let name = require_non_blank("name", &cmd.name)?;

    let member = deps
        .catalog
        .insert_member(NewMember { name })
        .await
        .map_err(CirculationError::StoreError)?;

    tracing::info!(member_id = member.id.value(), "Member registered");

    Ok(member)
}

/// 全書籍を貸出履歴付きで取得する
pub async fn list_books(deps: &ServiceDependencies) -> Result<Vec<BookWithLoans>> {
    deps.catalog
        .list_books()
        .await
        .map_err(CirculationError::StoreError)
}

/// 全会員を貸出履歴付きで取得する
pub async fn list_members(deps: &ServiceDependencies) -> Result<Vec<MemberWithLoans>> {
    deps.catalog
        .list_members()
        .await
        .map_err(CirculationError::StoreError)
}
