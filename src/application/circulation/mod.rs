mod circulation_service;
mod errors;
mod registration;

pub use circulation_service::{ServiceDependencies, check_out_book, return_book};
pub use errors::{CirculationError, Result};
pub use registration::{RegisteredBook, list_books, list_members, register_book, register_member};
