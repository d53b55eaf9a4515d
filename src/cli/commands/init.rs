use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use std::fs;
use std::path::Path;

/// Handle the `init` command
///
/// This creates:
///  - the configuration file (defaults, credentials left empty)
///  - the state directory
pub fn handle(path: &Path, cfg: &Config, force: bool) -> AppResult<()> {
    if path.exists() && !force {
        warning(format!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        ));
    } else {
        Config {
            password: String::new(),
            ..cfg.clone()
        }
        .save_to(path)?;
        success(format!("Config file: {}", path.display()));
    }

    let state_dir = cfg.state_path();
    fs::create_dir_all(&state_dir)?;
    success(format!("State dir:   {}", state_dir.display()));

    Ok(())
}
