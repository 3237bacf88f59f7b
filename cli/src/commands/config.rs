//! `config` subcommands.

use anyhow::Result;
use newsletter_admin_business::BASE_URL_ENV;

use crate::cli::ConfigCommand;
use crate::commands::{CommandResult, exit_code};
use crate::config::Config;
use crate::output::Output;

pub fn run_config(command: ConfigCommand, explicit_base_url: Option<&str>) -> CommandResult {
    let out = Output::new();
    match command {
        ConfigCommand::Show => show(&out, explicit_base_url)?,
        ConfigCommand::SetBaseUrl { url } => {
            let mut config = Config::load()?;
            config.set_base_url(&url);
            let path = config.save()?;
            out.success(format!("Base URL set to {url} ({})", path.display()));
        }
        ConfigCommand::ClearBaseUrl => {
            let mut config = Config::load()?;
            config.clear_base_url();
            let path = config.save()?;
            out.success(format!("Stored base URL removed ({})", path.display()));
        }
    }
    Ok(exit_code(true))
}

fn show(out: &Output, explicit_base_url: Option<&str>) -> Result<()> {
    let path = Config::config_path()?;
    let config = Config::load_from(&path)?;

    out.labeled("Config file", path.display());
    out.labeled("Stored base URL", config.base_url().unwrap_or("(none)"));
    out.labeled(
        format!("--base-url / {BASE_URL_ENV}"),
        explicit_base_url.unwrap_or("(none)"),
    );
    out.labeled(
        "Effective base URL",
        config.business_config(explicit_base_url).base_url,
    );
    Ok(())
}
