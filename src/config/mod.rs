pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation as v;

#[cfg(feature = "cli")]
use crate::core::ProbeTarget;
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "cli")]
use std::path::PathBuf;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Clone, Parser)]
#[command(name = "odoo-field-probe")]
#[command(about = "Check whether a custom field on an Odoo employee record is readable")]
pub struct CliConfig {
    #[arg(long, help = "TOML config file; replaces the connection flags")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "ODOO_URL")]
    pub url: Option<String>,

    #[arg(long, env = "ODOO_DB")]
    pub database: Option<String>,

    #[arg(long, env = "ODOO_USERNAME")]
    pub username: Option<String>,

    #[arg(long, env = "ODOO_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    #[arg(long, help = "Employee to probe; defaults to the logged-in user's employee")]
    pub employee_id: Option<i64>,

    #[arg(long, default_value = "test arabic field")]
    pub query: String,

    #[arg(long, help = "Print the debug cache after the report")]
    pub debug: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

#[cfg(feature = "cli")]
impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("config", &self.config)
            .field("url", &self.url)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("timeout_seconds", &self.timeout_seconds)
            .field("employee_id", &self.employee_id)
            .field("query", &self.query)
            .field("debug", &self.debug)
            .field("verbose", &self.verbose)
            .field("log_format", &self.log_format)
            .finish()
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn odoo_url(&self) -> &str {
        self.url.as_deref().unwrap_or_default()
    }

    fn database(&self) -> &str {
        self.database.as_deref().unwrap_or_default()
    }

    fn username(&self) -> &str {
        self.username.as_deref().unwrap_or_default()
    }

    fn password(&self) -> &str {
        self.password.as_deref().unwrap_or_default()
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn target(&self) -> ProbeTarget {
        ProbeTarget::default()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_connection(self)
    }
}

/// Checks shared by every `ConfigProvider`.
pub fn validate_connection<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    v::validate_url("odoo.url", config.odoo_url())?;
    v::validate_required_string("odoo.database", config.database())?;
    v::validate_required_string("odoo.username", config.username())?;
    v::validate_required_string("odoo.password", config.password())?;
    v::validate_range("odoo.timeout_seconds", config.timeout_seconds(), 1, 600)?;

    let target = config.target();
    v::validate_required_string("probe.model", &target.model)?;
    v::validate_required_string("probe.field", &target.field)?;
    v::validate_required_string("probe.label", &target.label)?;
    Ok(())
}
