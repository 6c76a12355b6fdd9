//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration for the webhook listener.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Telegram bot configuration.
    pub telegram: TelegramConfig,
    /// Authorization configuration.
    pub auth: AuthConfig,
    /// Account classification.
    #[serde(default)]
    pub ledger: LedgerConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file name, or a full `sqlite:` URL.
    #[serde(default = "default_database_name")]
    pub name: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            name: default_database_name(),
        }
    }
}

fn default_database_name() -> String {
    "finanzas.db".to_string()
}

impl DatabaseConfig {
    /// Returns the connection URL for the configured database file.
    ///
    /// The file is created on first use.
    #[must_use]
    pub fn url(&self) -> String {
        if self.name.starts_with("sqlite:") {
            self.name.clone()
        } else {
            format!("sqlite:{}?mode=rwc", self.name)
        }
    }
}

/// Telegram bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot credential token issued by BotFather.
    pub token: String,
    /// Public HTTPS URL to register as webhook at startup.
    #[serde(default)]
    pub webhook_url: Option<String>,
    /// Secret Telegram echoes in `X-Telegram-Bot-Api-Secret-Token`.
    #[serde(default)]
    pub webhook_secret: Option<String>,
}

/// Authorization configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// The only Telegram user id allowed to issue commands.
    pub user_id: i64,
}

/// Account classification configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// The distinguished cash account.
    #[serde(default = "default_cash_account")]
    pub cash_account: String,
    /// Accounts holding real money; everything else is a liability.
    #[serde(default = "default_real_money_accounts")]
    pub real_money_accounts: Vec<String>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            cash_account: default_cash_account(),
            real_money_accounts: default_real_money_accounts(),
        }
    }
}

fn default_cash_account() -> String {
    "Efectivo".to_string()
}

fn default_real_money_accounts() -> Vec<String> {
    vec!["Efectivo".to_string(), "Revolut".to_string()]
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("CARTERA")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("ledger.real_money_accounts"),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_environment_with_defaults() {
        temp_env::with_vars(
            [
                ("CARTERA__TELEGRAM__TOKEN", Some("123456:ABC-token")),
                ("CARTERA__AUTH__USER_ID", Some("987654321")),
                ("CARTERA__DATABASE__NAME", None),
                ("CARTERA__LEDGER__REAL_MONEY_ACCOUNTS", None),
            ],
            || {
                let config = AppConfig::load().expect("config should load");
                assert_eq!(config.telegram.token, "123456:ABC-token");
                assert_eq!(config.auth.user_id, 987_654_321);
                assert_eq!(config.database.name, "finanzas.db");
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.ledger.cash_account, "Efectivo");
                assert_eq!(
                    config.ledger.real_money_accounts,
                    vec!["Efectivo".to_string(), "Revolut".to_string()]
                );
                assert!(config.telegram.webhook_url.is_none());
            },
        );
    }

    #[test]
    fn test_load_real_money_accounts_list() {
        temp_env::with_vars(
            [
                ("CARTERA__TELEGRAM__TOKEN", Some("token")),
                ("CARTERA__AUTH__USER_ID", Some("1")),
                (
                    "CARTERA__LEDGER__REAL_MONEY_ACCOUNTS",
                    Some("Efectivo,Revolut,Debito"),
                ),
            ],
            || {
                let config = AppConfig::load().expect("config should load");
                assert_eq!(config.ledger.real_money_accounts.len(), 3);
                assert_eq!(config.ledger.real_money_accounts[2], "Debito");
            },
        );
    }

    #[test]
    fn test_load_requires_user_id() {
        temp_env::with_vars(
            [
                ("CARTERA__TELEGRAM__TOKEN", Some("token")),
                ("CARTERA__AUTH__USER_ID", None),
            ],
            || {
                assert!(AppConfig::load().is_err());
            },
        );
    }

    #[test]
    fn test_database_url() {
        let file = DatabaseConfig {
            name: "finanzas.db".to_string(),
        };
        assert_eq!(file.url(), "sqlite:finanzas.db?mode=rwc");

        let url = DatabaseConfig {
            name: "sqlite::memory:".to_string(),
        };
        assert_eq!(url.url(), "sqlite::memory:");
    }
}
