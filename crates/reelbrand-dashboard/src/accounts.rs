/*
[INPUT]:  ReelbrandClient account listing
[OUTPUT]: Account list view model with empty state, selection, and card summaries
[POS]:    Accounts view - list of connected accounts
[UPDATE]: When changing account cards or list loading behavior
*/

use chrono::{NaiveDate, NaiveDateTime};
use reelbrand_adapter::{Account, AccountStatus, ReelbrandClient};
use tracing::{debug, warn};

pub const EMPTY_ACCOUNTS_MESSAGE: &str = "No accounts connected yet. Add an account to start publishing.";

/// Counters shown on each account card
pub const STAT_KEYS: [(&str, &str); 3] = [
    ("followers", "Followers"),
    ("engagement", "Engagement"),
    ("posts", "Posts"),
];

#[derive(Debug, Clone, PartialEq)]
pub enum AccountListState {
    Loading,
    Empty,
    Loaded(Vec<Account>),
}

#[derive(Debug, Clone)]
pub struct AccountList {
    state: AccountListState,
    selected: usize,
}

impl Default for AccountList {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetch accounts, treating any failure as an empty list
pub async fn fetch_accounts(client: &ReelbrandClient) -> Vec<Account> {
    match client.list_accounts().await {
        Ok(accounts) => {
            debug!(count = accounts.len(), "accounts loaded");
            accounts
        }
        Err(err) => {
            warn!(
                error = %err,
                status = ?err.status(),
                network = err.is_network(),
                "failed to load accounts, showing empty list"
            );
            Vec::new()
        }
    }
}

impl AccountList {
    pub fn new() -> Self {
        Self {
            state: AccountListState::Loading,
            selected: 0,
        }
    }

    pub async fn refresh(&mut self, client: &ReelbrandClient) {
        self.state = AccountListState::Loading;
        let accounts = fetch_accounts(client).await;
        self.set_accounts(accounts);
    }

    pub fn set_accounts(&mut self, accounts: Vec<Account>) {
        self.state = if accounts.is_empty() {
            AccountListState::Empty
        } else {
            AccountListState::Loaded(accounts)
        };
        self.selected = self.selected.min(self.accounts().len().saturating_sub(1));
    }

    pub fn state(&self) -> &AccountListState {
        &self.state
    }

    pub fn accounts(&self) -> &[Account] {
        match &self.state {
            AccountListState::Loaded(accounts) => accounts,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state == AccountListState::Loading
    }

    pub fn is_empty(&self) -> bool {
        self.state == AccountListState::Empty
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&Account> {
        self.accounts().get(self.selected)
    }

    pub fn move_selection(&mut self, step: isize) {
        let count = self.accounts().len() as isize;
        if count == 0 {
            return;
        }
        self.selected = (self.selected as isize + step).rem_euclid(count) as usize;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenExpiry {
    Expired { days_ago: i64 },
    Today,
    ExpiresIn { days: i64 },
    Unparsed(String),
}

impl TokenExpiry {
    pub fn label(&self) -> String {
        match self {
            TokenExpiry::Expired { days_ago } => format!("Token expired {days_ago} day(s) ago"),
            TokenExpiry::Today => "Token expires today".to_string(),
            TokenExpiry::ExpiresIn { days } => format!("Token expires in {days} day(s)"),
            TokenExpiry::Unparsed(raw) => format!("Token expiry: {raw}"),
        }
    }

    /// Within a week of expiring, or already expired
    pub fn needs_attention(&self) -> bool {
        match self {
            TokenExpiry::Expired { .. } | TokenExpiry::Today => true,
            TokenExpiry::ExpiresIn { days } => *days <= 7,
            TokenExpiry::Unparsed(_) => false,
        }
    }
}

/// Everything an account card shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub title: String,
    pub platform: String,
    pub status: AccountStatus,
    pub stats: Vec<(&'static str, String)>,
    pub token_expiry: Option<TokenExpiry>,
}

pub fn summarize(account: &Account, today: NaiveDate) -> AccountSummary {
    AccountSummary {
        title: account.display_name(),
        platform: account
            .platform()
            .map(|platform| platform.display_name().to_string())
            .or_else(|| account.str_field("platform"))
            .unwrap_or_else(|| "Unknown".to_string()),
        status: account.status(),
        stats: STAT_KEYS
            .iter()
            .map(|(key, label)| (*label, account.stat(key)))
            .collect(),
        token_expiry: account
            .str_field("token_expiry_date")
            .map(|raw| token_expiry(&raw, today)),
    }
}

pub fn token_expiry(raw: &str, today: NaiveDate) -> TokenExpiry {
    let trimmed = raw.trim();
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        });

    match date {
        None => TokenExpiry::Unparsed(trimmed.to_string()),
        Some(date) => {
            let days = (date - today).num_days();
            match days {
                0 => TokenExpiry::Today,
                d if d < 0 => TokenExpiry::Expired { days_ago: -d },
                d => TokenExpiry::ExpiresIn { days: d },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn account(value: serde_json::Value) -> Account {
        serde_json::from_value(value).expect("account")
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).expect("date")
    }

    #[test]
    fn test_empty_list_is_empty_state() {
        let mut list = AccountList::new();
        assert!(list.is_loading());
        list.set_accounts(Vec::new());
        assert!(list.is_empty());
        assert!(list.selected().is_none());
    }

    #[test]
    fn test_selection_wraps_and_clamps() {
        let mut list = AccountList::new();
        list.set_accounts(vec![
            account(json!({"id": 1})),
            account(json!({"id": 2})),
            account(json!({"id": 3})),
        ]);
        list.move_selection(-1);
        assert_eq!(list.selected_index(), 2);
        list.set_accounts(vec![account(json!({"id": 1}))]);
        assert_eq!(list.selected_index(), 0);
    }

    #[test]
    fn test_summary_defaults() {
        let summary = summarize(
            &account(json!({"platform": "youtube", "channel_id": "UC1", "followers": 10})),
            today(),
        );
        assert_eq!(summary.title, "UC1");
        assert_eq!(summary.platform, "YouTube");
        assert_eq!(summary.status, AccountStatus::Connected);
        assert_eq!(
            summary.stats,
            vec![
                ("Followers", "10".to_string()),
                ("Engagement", "-".to_string()),
                ("Posts", "-".to_string())
            ]
        );
        assert_eq!(summary.token_expiry, None);
    }

    #[rstest]
    #[case("2026-10-20", TokenExpiry::ExpiresIn { days: 3 })]
    #[case("2026-10-17", TokenExpiry::Today)]
    #[case("2026-10-10T08:00:00", TokenExpiry::Expired { days_ago: 7 })]
    #[case("2026-12-16T00:00:00Z", TokenExpiry::ExpiresIn { days: 60 })]
    #[case("soon", TokenExpiry::Unparsed("soon".to_string()))]
    fn test_token_expiry(#[case] raw: &str, #[case] expected: TokenExpiry) {
        assert_eq!(token_expiry(raw, today()), expected);
    }

    #[test]
    fn test_expiry_attention_window() {
        assert!(TokenExpiry::ExpiresIn { days: 7 }.needs_attention());
        assert!(!TokenExpiry::ExpiresIn { days: 8 }.needs_attention());
        assert!(TokenExpiry::Expired { days_ago: 1 }.needs_attention());
    }
}
