mod repository;

pub use repository::*;

/// SQL schema for the accounts table
pub const MIGRATION_001_ACCOUNTS: &str = include_str!("migrations/001_accounts.sql");
