use tracing::info;

use crate::domain::{Account, AccountType};
use crate::storage::Repository;

use super::AppError;

/// Fixture loaded on startup: (balance, creation date, type).
pub const SAMPLE_ACCOUNTS: [(f64, &str, AccountType); 8] = [
    (2500.75, "2024-01-15", AccountType::Current),
    (8900.00, "2024-02-20", AccountType::Savings),
    (1250.50, "2024-03-10", AccountType::Current),
    (15000.00, "2024-04-05", AccountType::Savings),
    (3750.25, "2024-05-18", AccountType::Current),
    (6200.80, "2024-06-22", AccountType::Savings),
    (950.00, "2024-07-08", AccountType::Current),
    (22000.00, "2024-08-14", AccountType::Savings),
];

pub fn sample_accounts() -> Vec<Account> {
    SAMPLE_ACCOUNTS
        .iter()
        .map(|(balance, date, account_type)| Account::new(*balance, *date, *account_type))
        .collect()
}

/// Clear the accounts table and insert the sample fixture, atomically.
///
/// Must finish before the server starts accepting requests.
pub async fn seed_accounts(repo: &Repository) -> Result<Vec<Account>, AppError> {
    info!("Starting database initialization with sample data");

    let saved = repo.replace_all(sample_accounts()).await?;

    let total: f64 = saved.iter().map(|account| account.balance).sum();
    info!(
        accounts = saved.len(),
        total_balance = total,
        "Database initialization completed"
    );
    Ok(saved)
}
