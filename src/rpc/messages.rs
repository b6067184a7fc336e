//! Wire messages for the `bankbook.AccountService` procedures.
//!
//! These mirror the domain types field for field. Conversions are plain
//! `From` impls so the handlers never touch JSON directly.

use serde::{Deserialize, Serialize};

use crate::domain::{Account, AccountDraft, AccountType, Statistics};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountTypeMessage {
    #[serde(rename = "CURRENT")]
    Current,
    #[serde(rename = "SAVINGS")]
    Savings,
}

impl From<AccountType> for AccountTypeMessage {
    fn from(account_type: AccountType) -> Self {
        match account_type {
            AccountType::Current => AccountTypeMessage::Current,
            AccountType::Savings => AccountTypeMessage::Savings,
        }
    }
}

impl From<AccountTypeMessage> for AccountType {
    fn from(message: AccountTypeMessage) -> Self {
        match message {
            AccountTypeMessage::Current => AccountType::Current,
            AccountTypeMessage::Savings => AccountType::Savings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMessage {
    pub id: String,
    pub balance: f64,
    pub creation_date: String,
    pub account_type: AccountTypeMessage,
}

impl From<Account> for AccountMessage {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            balance: account.balance,
            creation_date: account.creation_date,
            account_type: account.account_type.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDraftMessage {
    pub balance: f64,
    pub creation_date: String,
    pub account_type: AccountTypeMessage,
}

impl From<AccountDraftMessage> for AccountDraft {
    fn from(message: AccountDraftMessage) -> Self {
        AccountDraft::new(
            message.balance,
            message.creation_date,
            message.account_type.into(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsMessage {
    pub count: i64,
    pub sum: f64,
    pub average: f64,
}

impl From<Statistics> for StatisticsMessage {
    fn from(stats: Statistics) -> Self {
        Self {
            count: stats.count,
            sum: stats.sum,
            average: stats.average,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListAccountsResponse {
    pub accounts: Vec<AccountMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetAccountByIdRequest {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetAccountByIdResponse {
    pub account: AccountMessage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub account: AccountDraftMessage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAccountResponse {
    pub account: AccountMessage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetStatisticsResponse {
    pub stats: StatisticsMessage,
}
