//! Account records exchanged with the `/comptes` API

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned account identifier
pub type AccountId = u64;

/// Kind of bank account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    /// Checking account
    Courant,
    /// Savings account
    Epargne,
}

impl AccountType {
    /// Wire value (`COURANT` / `EPARGNE`)
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Courant => "COURANT",
            AccountType::Epargne => "EPARGNE",
        }
    }

    /// Label shown in selection lists
    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Courant => "Compte courant",
            AccountType::Epargne => "Compte epargne",
        }
    }

    pub fn all() -> [AccountType; 2] {
        [AccountType::Courant, AccountType::Epargne]
    }

    /// Parse the wire value, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "COURANT" => Some(AccountType::Courant),
            "EPARGNE" => Some(AccountType::Epargne),
            _ => None,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bank account as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    /// Balance in MAD. The API may send it as a number or a numeric string.
    #[serde(default, deserialize_with = "deserialize_balance")]
    pub solde: f64,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub date_creation: Option<NaiveDate>,
    #[serde(rename = "type", default, deserialize_with = "deserialize_account_type")]
    pub account_type: Option<AccountType>,
}

impl Account {
    /// Whether the account matches a search query on its id or type
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let id = self.id.to_string();
        let kind = self
            .account_type
            .map(|t| t.as_str().to_lowercase())
            .unwrap_or_default();
        id.contains(&needle) || kind.contains(&needle)
    }

    /// Form payload pre-filled from this account
    pub fn to_draft(&self) -> AccountDraft {
        AccountDraft {
            solde: self.solde,
            date_creation: self.date_creation,
            account_type: self.account_type,
        }
    }
}

/// Body of create and update requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDraft {
    pub solde: f64,
    pub date_creation: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub account_type: Option<AccountType>,
}

/// Totals shown in the dashboard header
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSummary {
    pub total_accounts: usize,
    pub total_balance: f64,
    pub last_update: Option<DateTime<Utc>>,
}

impl Default for AccountSummary {
    fn default() -> Self {
        Self {
            total_accounts: 0,
            total_balance: 0.0,
            last_update: None,
        }
    }
}

impl AccountSummary {
    /// Compute the summary of a collection at `now`
    pub fn from_accounts(accounts: &[Account], now: DateTime<Utc>) -> Self {
        let total_balance = accounts
            .iter()
            .map(|a| if a.solde.is_finite() { a.solde } else { 0.0 })
            .sum();
        Self {
            total_accounts: accounts.len(),
            total_balance,
            last_update: Some(now),
        }
    }
}

/// Accounts matching `query`; a blank query returns everything
pub fn filter_accounts<'a>(accounts: &'a [Account], query: &str) -> Vec<&'a Account> {
    accounts.iter().filter(|a| a.matches(query)).collect()
}

/// Insert `account` at the front, or replace the entry with the same id in place.
pub fn upsert_account(accounts: &mut Vec<Account>, account: Account) {
    if let Some(existing) = accounts.iter_mut().find(|a| a.id == account.id) {
        *existing = account;
    } else {
        accounts.insert(0, account);
    }
}

/// Remove the account with `id`; returns whether something was removed
pub fn remove_account(accounts: &mut Vec<Account>, id: AccountId) -> bool {
    let before = accounts.len();
    accounts.retain(|a| a.id != id);
    accounts.len() != before
}

fn deserialize_balance<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Null,
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => n,
        Some(Raw::Text(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        Some(Raw::Null) | None => 0.0,
    })
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        let s = s.trim();
        // Some backends append a time component; keep the day.
        let day = s.get(..10).unwrap_or(s);
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }))
}

fn deserialize_account_type<'de, D>(deserializer: D) -> Result<Option<AccountType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(AccountType::parse))
}
