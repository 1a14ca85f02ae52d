use anyhow::{ensure, Context as _, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

const ENV_PREFIX: &str = "LEDGER_AUDIT";
const DEFAULT_BASE_URL: &str = "https://coda.io/apis/v1";
const DEFAULT_MAX_DAYS: usize = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub coda: CodaSettings,
    #[serde(default)]
    pub audit: AuditSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CodaSettings {
    pub api_key: String,
    pub doc_id: String,
    pub accounts_table_id: String,
    pub transactions_table_id: String,
    pub columns: ColumnIds,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// UTC offsets under which the ledger may have stored a calendar date
    #[serde(default = "default_query_offsets")]
    pub query_offsets: Vec<String>,
    #[serde(default)]
    pub retry: RetrySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnIds {
    pub account_name: String,
    pub account_type: String,
    pub date: String,
    pub debit: String,
    pub credit: String,
    pub amount: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrySettings {
    #[serde(default = "default_attempts")]
    pub attempts: u32,
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            attempts: default_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuditSettings {
    /// Longest range audited in one run, longer ranges are truncated
    #[serde(default = "default_max_days")]
    pub max_days: usize,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            max_days: default_max_days(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_query_offsets() -> Vec<String> {
    vec!["-07:00".to_string(), "-08:00".to_string()]
}

fn default_attempts() -> u32 {
    10
}

fn default_initial_delay_ms() -> u64 {
    100
}

fn default_max_days() -> usize {
    DEFAULT_MAX_DAYS
}

impl Settings {
    /// Reads `name` (any format supported by `config`, extension optional) and applies
    /// `LEDGER_AUDIT__SECTION__KEY` environment overrides on top.
    pub fn load(name: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(name).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration '{name}'"))?;
        let settings: Settings = settings
            .try_deserialize()
            .with_context(|| format!("Invalid configuration '{name}'"))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(!self.coda.api_key.is_empty(), "coda.api_key must not be empty");
        ensure!(
            !self.coda.query_offsets.is_empty(),
            "coda.query_offsets must contain at least one offset"
        );
        ensure!(
            self.coda.retry.attempts >= 1,
            "coda.retry.attempts must be at least 1"
        );
        ensure!(self.audit.max_days >= 1, "audit.max_days must be at least 1");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const MINIMAL: &str = r#"{
        "coda": {
            "api_key": "secret",
            "doc_id": "doc",
            "accounts_table_id": "grid-accounts",
            "transactions_table_id": "table-transactions",
            "columns": {
                "account_name": "c-name",
                "account_type": "c-type",
                "date": "c-date",
                "debit": "c-debit",
                "credit": "c-credit",
                "amount": "c-amount"
            }
        }
    }"#;

    #[test]
    fn loads_with_defaults() {
        let file = write_config(MINIMAL);

        let settings = Settings::load(file.path().to_str().unwrap()).unwrap();

        assert_eq!("secret", settings.coda.api_key);
        assert_eq!("c-date", settings.coda.columns.date);
        assert_eq!(DEFAULT_BASE_URL, settings.coda.base_url);
        assert_eq!(vec!["-07:00", "-08:00"], settings.coda.query_offsets);
        assert_eq!(10, settings.coda.retry.attempts);
        assert_eq!(100, settings.coda.retry.initial_delay_ms);
        assert_eq!(100, settings.audit.max_days);
    }

    #[test]
    fn overrides_defaults() {
        let file = write_config(
            &MINIMAL.replacen(
                r#""api_key": "secret","#,
                r#""api_key": "secret", "retry": {"attempts": 3}, "query_offsets": ["+00:00"],"#,
                1,
            )
            .replacen('{', r#"{ "audit": { "max_days": 31 },"#, 1),
        );

        let settings = Settings::load(file.path().to_str().unwrap()).unwrap();

        assert_eq!(3, settings.coda.retry.attempts);
        assert_eq!(100, settings.coda.retry.initial_delay_ms);
        assert_eq!(vec!["+00:00"], settings.coda.query_offsets);
        assert_eq!(31, settings.audit.max_days);
    }

    #[test]
    fn rejects_zero_max_days() {
        let file = write_config(&MINIMAL.replacen('{', r#"{ "audit": { "max_days": 0 },"#, 1));

        assert!(Settings::load(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn missing_columns_are_an_error() {
        let file = write_config(r#"{ "coda": { "api_key": "secret" } }"#);

        assert!(Settings::load(file.path().to_str().unwrap()).is_err());
    }
}
