//! Account names and account classification.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::LedgerError;

/// Default cash account.
pub const DEFAULT_CASH_ACCOUNT: &str = "Efectivo";

/// A normalized account name.
///
/// The single normalization rule: trim, collapse inner whitespace, then
/// uppercase the first character and lowercase the rest.
/// `"  nU "` becomes `"Nu"` and `"TC"` becomes `"Tc"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AccountName(String);

impl AccountName {
    /// Parses and normalizes an account name.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::EmptyAccountName`] if nothing is left after trimming.
    pub fn parse(raw: &str) -> Result<Self, LedgerError> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return Err(LedgerError::EmptyAccountName);
        }
        Ok(Self(normalized))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn normalize(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = collapsed.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

impl FromStr for AccountName {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for AccountName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How an account holds money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccountClass {
    /// Money the user actually has (cash, debit accounts).
    RealMoney,
    /// Credit cards and people: negative means the user owes,
    /// positive means the account owes the user.
    Liability,
}

/// Classifies accounts against the allow-list of real-money accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountBook {
    cash: AccountName,
    real_money: BTreeSet<AccountName>,
}

impl AccountBook {
    /// Creates a book. The cash account is always treated as real money.
    pub fn new(cash: AccountName, real_money: impl IntoIterator<Item = AccountName>) -> Self {
        let mut real_money: BTreeSet<AccountName> = real_money.into_iter().collect();
        real_money.insert(cash.clone());
        Self { cash, real_money }
    }

    /// Creates a book from raw configuration names.
    ///
    /// # Errors
    ///
    /// Returns an error if any name is empty.
    pub fn from_names<S: AsRef<str>>(cash: &str, real_money: &[S]) -> Result<Self, LedgerError> {
        let cash = AccountName::parse(cash)?;
        let real_money = real_money
            .iter()
            .map(|name| AccountName::parse(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(cash, real_money))
    }

    /// Returns the distinguished cash account.
    #[must_use]
    pub const fn cash(&self) -> &AccountName {
        &self.cash
    }

    /// Classifies an account.
    #[must_use]
    pub fn classify(&self, account: &AccountName) -> AccountClass {
        if self.real_money.contains(account) {
            AccountClass::RealMoney
        } else {
            AccountClass::Liability
        }
    }

    /// Returns true if the account is on the real-money allow-list.
    #[must_use]
    pub fn is_real_money(&self, account: &AccountName) -> bool {
        self.classify(account) == AccountClass::RealMoney
    }

    /// Returns true if the account is the cash account.
    #[must_use]
    pub fn is_cash(&self, account: &AccountName) -> bool {
        *account == self.cash
    }
}

impl Default for AccountBook {
    fn default() -> Self {
        Self::new(
            AccountName(DEFAULT_CASH_ACCOUNT.to_string()),
            [AccountName("Revolut".to_string())],
        )
    }
}
