//! Config subcommand handlers.

use homedash_config::{Config, save_config_to};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::load;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            let loaded = load(global)?;
            output::print_output(&loaded.path.display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let loaded = load(global)?;
            let out = output::render_single(
                &global.output,
                &loaded.config,
                |cfg| toml::to_string_pretty(cfg).map_err(|e| CliError::Render(e.to_string())),
                |_| loaded.path.display().to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = global
                .config
                .clone()
                .unwrap_or_else(homedash_config::config_path);
            if path.exists() && !force {
                return Err(CliError::Conflict {
                    path: path.display().to_string(),
                });
            }
            save_config_to(&Config::sample(), &path)?;
            tracing::info!(path = %path.display(), "wrote starter config");
            if !global.quiet {
                eprintln!("Config written to {}", path.display());
                eprintln!("Edit the tiles, then run: homedash-tui");
            }
            Ok(())
        }
    }
}
