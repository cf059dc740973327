use crate::domain::{
    self, Book, BookId, BookStatus, Loan, LoanId, Member, MemberId, NewBook, NewMember, QrToken,
    loan::{Checkout, Return},
};
use crate::ports::catalog_store::{BookWithLoans, CatalogStore, MemberWithLoans};
use crate::ports::loan_ledger::{CheckoutOutcome, LoanLedger, ReturnOutcome};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Default)]
struct State {
    books: BTreeMap<BookId, Book>,
    members: BTreeMap<MemberId, Member>,
    loans: BTreeMap<LoanId, Loan>,
    next_book_id: i64,
    next_member_id: i64,
    next_loan_id: i64,
}

impl State {
    fn loans_where(&self, pred: impl Fn(&Loan) -> bool) -> Vec<Loan> {
        self.loans.values().filter(|l| pred(l)).cloned().collect()
    }
}

/// In-memory implementation of CatalogStore and LoanLedger
///
/// All state lives behind a single mutex, so every checkout/return is
/// applied atomically. Ids are assigned sequentially starting at 1.
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    fn state(&self) -> Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| "in-memory store lock poisoned".into())
    }

    /// Overwrite a book's status without touching loans.
    ///
    /// Used to reproduce inconsistent data in tests.
    pub fn force_status(&self, book_id: BookId, status: BookStatus) -> Result<()> {
        let mut state = self.state()?;
        let book = state
            .books
            .get_mut(&book_id)
            .ok_or_else(|| format!("book {} not found", book_id.value()))?;
        book.status = status;
        Ok(())
    }

    /// All loans recorded for a book, oldest first
    pub fn loans_for_book(&self, book_id: BookId) -> Result<Vec<Loan>> {
        Ok(self.state()?.loans_where(|l| l.book_id == book_id))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn insert_book(&self, book: NewBook) -> Result<Book> {
        let mut state = self.state()?;
        if state.books.values().any(|b| b.qr_data == book.qr_data) {
            return Err(format!("duplicate qr token {}", book.qr_data).into());
        }
        state.next_book_id += 1;
        let book = book.with_id(BookId::new(state.next_book_id));
        state.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn find_book_by_token(&self, token: &QrToken) -> Result<Option<Book>> {
        let state = self.state()?;
        Ok(state.books.values().find(|b| &b.qr_data == token).cloned())
    }

    async fn list_books(&self) -> Result<Vec<BookWithLoans>> {
        let state = self.state()?;
        Ok(state
            .books
            .values()
            .map(|book| BookWithLoans {
                book: book.clone(),
                loans: state.loans_where(|l| l.book_id == book.id),
            })
            .collect())
    }

    async fn insert_member(&self, member: NewMember) -> Result<Member> {
        let mut state = self.state()?;
        state.next_member_id += 1;
        let member = member.with_id(MemberId::new(state.next_member_id));
        state.members.insert(member.id, member.clone());
        Ok(member)
    }

    async fn member_exists(&self, member_id: MemberId) -> Result<bool> {
        Ok(self.state()?.members.contains_key(&member_id))
    }

    async fn list_members(&self) -> Result<Vec<MemberWithLoans>> {
        let state = self.state()?;
        Ok(state
            .members
            .values()
            .map(|member| MemberWithLoans {
                member: member.clone(),
                loans: state.loans_where(|l| l.member_id == member.id),
            })
            .collect())
    }
}

#[async_trait]
impl LoanLedger for InMemoryStore {
    async fn record_checkout(&self, checkout: Checkout) -> Result<CheckoutOutcome> {
        let mut state = self.state()?;

        let book = state
            .books
            .get_mut(&checkout.book_id)
            .ok_or_else(|| format!("book {} not found", checkout.book_id.value()))?;
        if book.status != BookStatus::Available {
            return Ok(CheckoutOutcome::StatusConflict);
        }
        book.status = checkout.new_status;

        state.next_loan_id += 1;
        let loan = checkout.loan.with_id(LoanId::new(state.next_loan_id));
        state.loans.insert(loan.id, loan.clone());

        Ok(CheckoutOutcome::Recorded(loan))
    }

    async fn record_return(&self, ret: Return) -> Result<ReturnOutcome> {
        let mut state = self.state()?;

        let book = state
            .books
            .get_mut(&ret.book_id)
            .ok_or_else(|| format!("book {} not found", ret.book_id.value()))?;
        if book.status != BookStatus::Loaned {
            return Ok(ReturnOutcome::StatusConflict);
        }
        book.status = ret.new_status;

        let open_id =
            domain::loan::find_open_loan(state.loans.values(), ret.book_id).map(|l| l.id);
        let closed = open_id
            .and_then(|id| state.loans.get_mut(&id))
            .map(|loan| {
                *loan = domain::loan::close_loan(loan, ret.returned_at);
                loan.clone()
            });

        Ok(ReturnOutcome::Recorded(closed))
    }
}
