use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::path::Path;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config, path: &Path) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Effective configuration ({}):\n", path.display());
            println!("{}", serde_yaml::to_string(&cfg.redacted())?);
        }

        // ---- CHECK CONFIG ----
        if *check {
            let missing = cfg.missing_credentials();
            let schedule = cfg.schedule();

            if !missing.is_empty() {
                warning(format!("Missing settings: {}", missing.join(", ")));
            }
            if let Err(e) = &schedule {
                warning(format!("Invalid window: {e}"));
            }

            if !missing.is_empty() || schedule.is_err() {
                return Err(AppError::Configuration(
                    "configuration check failed".to_string(),
                ));
            }

            if let Ok(s) = schedule {
                success(format!(
                    "Configuration OK (check-in {}, check-out {})",
                    s.checkin, s.checkout
                ));
            }
        }
    }

    Ok(())
}
