use crate::config::{validate_connection, DEFAULT_TIMEOUT_SECONDS};
use crate::core::{ConfigProvider, ProbeTarget};
use crate::domain::model::{DEFAULT_FIELD, DEFAULT_LABEL, DEFAULT_MODEL};
use crate::utils::error::{ProbeError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub odoo: OdooSection,
    #[serde(default)]
    pub probe: ProbeSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OdooSection {
    pub url: String,
    pub database: String,
    pub username: String,
    pub password: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSection {
    pub model: String,
    pub field: String,
    pub label: String,
}

impl Default for ProbeSection {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            field: DEFAULT_FIELD.to_string(),
            label: DEFAULT_LABEL.to_string(),
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ProbeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ProbeError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn odoo_url(&self) -> &str {
        &self.odoo.url
    }

    fn database(&self) -> &str {
        &self.odoo.database
    }

    fn username(&self) -> &str {
        &self.odoo.username
    }

    fn password(&self) -> &str {
        &self.odoo.password
    }

    fn timeout_seconds(&self) -> u64 {
        self.odoo.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn target(&self) -> ProbeTarget {
        ProbeTarget {
            model: self.probe.model.clone(),
            field: self.probe.field.clone(),
            label: self.probe.label.clone(),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_connection(self)?;

        // An unresolved placeholder means the variable was not exported.
        if self.odoo.password.starts_with("${") {
            return Err(ProbeError::MissingConfigError {
                field: "odoo.password".to_string(),
            });
        }
        Ok(())
    }
}
