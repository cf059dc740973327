use crate::application::circulation::{
    ServiceDependencies, check_out_book as execute_check_out, list_books as query_books,
    list_members as query_members, register_book as execute_register_book,
    register_member as execute_register_member, return_book as execute_return_book,
};
use crate::domain::{Member, commands::*};
use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use std::sync::Arc;

use super::{
    error::ApiError,
    types::{
        BookCreatedResponse, BookResponse, CheckoutRequest, CheckoutResponse, MemberResponse,
        MessageResponse, RegisterBookRequest, RegisterMemberRequest, ReturnRequest,
        ReturnResponse,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

// ============================================================================
// Registration handlers
// ============================================================================

/// POST /books - 書籍を登録
///
/// QRトークンを発行し、書籍とQR画像（data URI）を返す。
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterBookRequest>,
) -> Result<(StatusCode, Json<BookCreatedResponse>), ApiError> {
    let cmd = RegisterBook {
        title: req.title,
        author: req.author,
    };

    let registered = execute_register_book(&state.service_deps, cmd).await?;

    let response = BookCreatedResponse {
        book: registered.book,
        qr_image: registered.qr_image,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /members - 会員を登録
pub async fn create_member(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterMemberRequest>,
) -> Result<(StatusCode, Json<Member>), ApiError> {
    let member =
        execute_register_member(&state.service_deps, RegisterMember { name: req.name }).await?;

    Ok((StatusCode::CREATED, Json(member)))
}

// ============================================================================
// Circulation handlers
// ============================================================================

/// POST /checkout - 書籍を貸し出す
///
/// - 404: トークンまたは会員が存在しない
/// - 400: 書籍が貸出可能ではない
pub async fn checkout(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let cmd = CheckOutBook {
        qr_data: req.qr_data,
        member_id: req.member_id,
        checked_out_at: Utc::now(),
    };

    let loan = execute_check_out(&state.service_deps, cmd).await?;

    Ok(Json(CheckoutResponse {
        message: "Checkout successful".to_string(),
        loan,
    }))
}

/// POST /return - 書籍を返却する
///
/// - 404: トークンが存在しない
/// - 400: 書籍は既に返却済み
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReturnRequest>,
) -> Result<Json<ReturnResponse>, ApiError> {
    let cmd = ReturnBook {
        qr_data: req.qr_data,
        returned_at: Utc::now(),
    };

    let loan = execute_return_book(&state.service_deps, cmd).await?;

    Ok(Json(ReturnResponse {
        message: "Return successful".to_string(),
        loan,
    }))
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /books - 書籍一覧（貸出履歴付き）
pub async fn list_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookResponse>>, ApiError> {
    let books = query_books(&state.service_deps).await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

/// GET /members - 会員一覧（貸出履歴付き）
pub async fn list_members(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MemberResponse>>, ApiError> {
    let members = query_members(&state.service_deps).await?;
    Ok(Json(members.into_iter().map(MemberResponse::from).collect()))
}

/// GET /
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Library Management System API".to_string(),
    })
}
