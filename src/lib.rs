pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, LogFormat};

pub use adapters::OdooClient;
pub use config::toml_config::TomlConfig;
pub use core::{command::FieldTestCommand, probe::FieldProbe, session::Session};
pub use utils::error::{ProbeError, Result};
