use clap::Parser;
use odoo_field_probe::core::ConfigProvider;
use odoo_field_probe::utils::error::ErrorSeverity;
use odoo_field_probe::utils::{logger, validation::Validate};
use odoo_field_probe::{
    CliConfig, FieldTestCommand, LogFormat, OdooClient, ProbeError, Session, TomlConfig,
};
use std::sync::Arc;
use std::time::Duration;

fn exit_code(e: &ProbeError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: ProbeError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e));
}

fn load_config(cli: &CliConfig) -> Result<Box<dyn ConfigProvider>, ProbeError> {
    match &cli.config {
        Some(path) => {
            let config = TomlConfig::from_file(path)?;
            config.validate()?;
            Ok(Box::new(config))
        }
        None => {
            cli.validate()?;
            Ok(Box::new(cli.clone()))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }
    tracing::debug!("CLI config: {:?}", cli);

    let config = load_config(&cli).unwrap_or_else(|e| fail(e));
    let command = FieldTestCommand::new(config.target());

    // Nothing to do remotely for a query no diagnostic answers.
    if let Some(hint) = command.usage_hint(&cli.query) {
        eprintln!("{}", hint);
        std::process::exit(2);
    }

    let target = command.target();
    tracing::info!("Checking {}.{}", target.model, target.field);

    let client = OdooClient::connect(
        config.odoo_url(),
        config.database(),
        config.username(),
        config.password(),
        Duration::from_secs(config.timeout_seconds()),
    )
    .await;

    let mut session = match client {
        Ok(client) => {
            if let Some(version) = client.server_version() {
                tracing::info!("Odoo server version {}", version);
            }
            let uid = client.uid();
            let mut session = Session::connected(Arc::new(client));
            match cli.employee_id {
                Some(id) => {
                    if let Err(e) = session.load_employee(id).await {
                        tracing::error!("Could not load employee {}: {}", id, e);
                    }
                }
                None => {
                    session.load_current_employee(uid).await;
                }
            }
            session
        }
        Err(e) => {
            tracing::error!("Connection failed: {}", e);
            tracing::info!("💡 {}", e.recovery_suggestion());
            Session::disconnected()
        }
    };

    if let Some(reply) = command.handle(&cli.query, &mut session).await {
        println!("{}", reply);
    }

    if cli.debug && !session.debug_info().is_empty() {
        println!();
        println!("{}", session.debug_info().to_pretty_json()?);
    }

    Ok(())
}
