mod rows;

pub mod catalog_store;
pub mod loan_ledger;

// パブリックに型を再エクスポート
pub use catalog_store::CatalogStore as PostgresCatalogStore;
pub use loan_ledger::LoanLedger as PostgresLoanLedger;

/// マイグレーションを適用する
pub async fn run_migrations(pool: &sqlx::PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
