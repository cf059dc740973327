pub mod catalog_store;
pub mod loan_ledger;
pub mod qr_encoder;

pub use catalog_store::{BookWithLoans, CatalogStore, MemberWithLoans};
pub use loan_ledger::{CheckoutOutcome, LoanLedger, ReturnOutcome};
pub use qr_encoder::QrEncoder;
