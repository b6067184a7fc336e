use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Executor, Row, Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

use crate::domain::{Account, AccountType};

use super::MIGRATION_001_ACCOUNTS;

const MAX_CONNECTIONS: u32 = 8;

const UPSERT_ACCOUNT: &str = r#"
    INSERT INTO accounts (id, balance, creation_date, account_type)
    VALUES (?, ?, ?, ?)
    ON CONFLICT(id) DO UPDATE SET
        balance = excluded.balance,
        creation_date = excluded.creation_date,
        account_type = excluded.account_type
"#;

/// Repository for persisting and querying accounts.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    /// Creates the database file if it doesn't exist.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database URL: {}", database_url))?
            .create_if_missing(true);

        // Every in-memory connection is its own database, so keep exactly one alive.
        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Apply the accounts schema.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_ACCOUNTS)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    /// Close every pooled connection. Later calls fail.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// List every account. No ordering is guaranteed.
    pub async fn find_all(&self) -> Result<Vec<Account>> {
        let rows = sqlx::query(
            r#"
            SELECT id, balance, creation_date, account_type
            FROM accounts
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list accounts")?;

        rows.iter().map(Self::row_to_account).collect()
    }

    /// Get an account by ID.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Account>> {
        let row = sqlx::query(
            r#"
            SELECT id, balance, creation_date, account_type
            FROM accounts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch account")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    /// Insert an account, or overwrite the row that already has its ID.
    /// An empty ID is replaced with a fresh UUID before the write.
    pub async fn save(&self, account: Account) -> Result<Account> {
        let account = Self::with_generated_id(account);
        Self::upsert(&self.pool, &account).await?;
        Ok(account)
    }

    /// Save several accounts in a single transaction.
    pub async fn save_all(&self, accounts: Vec<Account>) -> Result<Vec<Account>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        let saved = Self::upsert_batch(&mut tx, accounts).await?;

        tx.commit().await.context("Failed to commit accounts")?;
        Ok(saved)
    }

    /// Delete every account and insert `accounts` in one transaction.
    /// On failure the previous rows are left untouched.
    pub async fn replace_all(&self, accounts: Vec<Account>) -> Result<Vec<Account>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        sqlx::query("DELETE FROM accounts")
            .execute(&mut *tx)
            .await
            .context("Failed to delete accounts")?;
        let saved = Self::upsert_batch(&mut tx, accounts).await?;

        tx.commit().await.context("Failed to commit accounts")?;
        Ok(saved)
    }

    async fn upsert_batch(
        tx: &mut Transaction<'_, Sqlite>,
        accounts: Vec<Account>,
    ) -> Result<Vec<Account>> {
        let mut saved = Vec::with_capacity(accounts.len());
        for account in accounts {
            let account = Self::with_generated_id(account);
            Self::upsert(&mut **tx, &account).await?;
            saved.push(account);
        }
        Ok(saved)
    }

    async fn upsert<'e, E>(executor: E, account: &Account) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(UPSERT_ACCOUNT)
            .bind(&account.id)
            .bind(account.balance)
            .bind(&account.creation_date)
            .bind(account.account_type.as_str())
            .execute(executor)
            .await
            .context("Failed to save account")?;
        Ok(())
    }

    /// Remove every account.
    pub async fn delete_all(&self) -> Result<()> {
        sqlx::query("DELETE FROM accounts")
            .execute(&self.pool)
            .await
            .context("Failed to delete accounts")?;
        Ok(())
    }

    /// Count stored accounts.
    pub async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM accounts")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count accounts")?;

        Ok(row.get("count"))
    }

    /// Row count and balance sum read from the same snapshot.
    pub async fn totals(&self) -> Result<(i64, f64)> {
        let row = sqlx::query(
            "SELECT COUNT(*) as count, COALESCE(SUM(balance), 0.0) as total FROM accounts",
        )
        .fetch_one(&self.pool)
        .await
        .context("Failed to compute account totals")?;

        Ok((row.get("count"), row.get("total")))
    }

    /// Sum of every balance, 0 when the table is empty.
    pub async fn sum_balances(&self) -> Result<f64> {
        let row = sqlx::query("SELECT COALESCE(SUM(balance), 0.0) as total FROM accounts")
            .fetch_one(&self.pool)
            .await
            .context("Failed to sum balances")?;

        Ok(row.get("total"))
    }

    fn with_generated_id(account: Account) -> Account {
        if account.has_id() {
            account
        } else {
            account.with_id(Uuid::new_v4().to_string())
        }
    }

    fn row_to_account(row: &SqliteRow) -> Result<Account> {
        let account_type_str: String = row.get("account_type");

        Ok(Account {
            id: row.get("id"),
            balance: row.get("balance"),
            creation_date: row.get("creation_date"),
            account_type: AccountType::from_str(&account_type_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid account type: {}", account_type_str))?,
        })
    }
}
