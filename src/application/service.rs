use tracing::{debug, info, warn};

use crate::domain::{Account, AccountDraft, Statistics};
use crate::storage::Repository;

use super::{AppError, seed};

/// Application service providing the account operations.
/// This is the primary interface for any client (RPC handlers, CLI, tests).
#[derive(Clone)]
pub struct AccountService {
    repo: Repository,
}

impl AccountService {
    /// Create a new account service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Open (creating if needed) the database at `database_url` and apply the schema.
    pub async fn init(database_url: &str) -> Result<Self, AppError> {
        let repo = Repository::init(database_url).await?;
        Ok(Self::new(repo))
    }

    /// Connect to an existing database without touching the schema.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let repo = Repository::connect(database_url).await?;
        Ok(Self::new(repo))
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    /// List all accounts.
    pub async fn list_accounts(&self) -> Result<Vec<Account>, AppError> {
        debug!("Fetching all accounts from database");
        Ok(self.repo.find_all().await?)
    }

    /// Look up an account. `None` means no account has this ID.
    pub async fn get_account(&self, id: &str) -> Result<Option<Account>, AppError> {
        debug!(account_id = %id, "Searching for account");
        Ok(self.repo.find_by_id(id).await?)
    }

    /// Persist a new account and return it with its generated ID.
    pub async fn create_account(&self, draft: AccountDraft) -> Result<Account, AppError> {
        if !draft.has_valid_balance() {
            warn!(balance = draft.balance, "Refusing account with invalid balance");
            return Err(AppError::InvalidBalance(draft.balance));
        }

        debug!(account_type = %draft.account_type, balance = draft.balance, "Saving account");
        let account = self.repo.save(draft.into_account()).await?;
        info!(account_id = %account.id, "Account saved");
        Ok(account)
    }

    /// Count, total and average balance over every account.
    pub async fn compute_statistics(&self) -> Result<Statistics, AppError> {
        debug!("Calculating balance statistics");
        let (count, sum) = self.repo.totals().await?;
        let stats = Statistics::from_totals(count, sum);

        info!(
            count = stats.count,
            sum = stats.sum,
            average = stats.average,
            "Statistics calculated"
        );
        Ok(stats)
    }

    /// Replace the table contents with the sample fixture.
    pub async fn seed_sample_accounts(&self) -> Result<Vec<Account>, AppError> {
        seed::seed_accounts(&self.repo).await
    }
}
