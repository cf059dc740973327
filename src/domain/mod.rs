pub mod book;
pub mod commands;
pub mod errors;
pub mod loan;
pub mod member;
pub mod value_objects;

pub use book::*;
pub use errors::*;
pub use loan::{Loan, NewLoan};
pub use member::*;
pub use value_objects::*;
