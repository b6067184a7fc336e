use serde::{Deserialize, Serialize};

pub type AccountId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    /// Day-to-day checking account
    Current,
    /// Interest-bearing savings account
    Savings,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Current => "CURRENT",
            AccountType::Savings => "SAVINGS",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "CURRENT" => Some(AccountType::Current),
            "SAVINGS" => Some(AccountType::Savings),
            _ => None,
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted bank account.
///
/// `creation_date` is kept as the caller supplied it (`YYYY-MM-DD`); it is
/// never parsed or checked for calendar correctness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub balance: f64,
    pub creation_date: String,
    pub account_type: AccountType,
}

impl Account {
    /// Build an account without an identifier. Storage assigns one on save.
    pub fn new(balance: f64, creation_date: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            id: String::new(),
            balance,
            creation_date: creation_date.into(),
            account_type,
        }
    }

    pub fn with_id(mut self, id: impl Into<AccountId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Caller-supplied fields for a new account.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountDraft {
    pub balance: f64,
    pub creation_date: String,
    pub account_type: AccountType,
}

impl AccountDraft {
    pub fn new(balance: f64, creation_date: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            balance,
            creation_date: creation_date.into(),
            account_type,
        }
    }

    /// Negative and non-finite balances are refused at creation time.
    pub fn has_valid_balance(&self) -> bool {
        self.balance.is_finite() && self.balance >= 0.0
    }

    pub fn into_account(self) -> Account {
        Account::new(self.balance, self.creation_date, self.account_type)
    }
}
