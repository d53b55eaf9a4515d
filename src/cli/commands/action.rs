use crate::auth::Credentials;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{Clock, Engine, Outcome};
use crate::errors::{AppError, AppResult};
use crate::http::{HttpClient, ReqwestTransport};
use crate::store::FileStateStore;
use tracing::info;

/// Handle `run`, `checkin`, `checkout`, `lock` and `unlock`.
pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<Outcome> {
    let schedule = cfg.schedule()?;
    let store = FileStateStore::new(cfg.state_path());

    let transport = ReqwestTransport::new(cfg.http.timeout())?;
    let client = HttpClient::new(Box::new(transport), cfg.http.retry_policy())
        .with_dry_run(cfg.dry_run);

    let engine = Engine::new(
        clock,
        &store,
        &client,
        Credentials::from_config(cfg),
        schedule,
    );

    let outcome = match cmd {
        Commands::Run => engine.run_scheduled_decision(),
        Commands::Checkin => engine.run_manual_checkin(),
        Commands::Checkout => engine.run_manual_checkout(),
        Commands::Lock => engine.on_lock(),
        Commands::Unlock => engine.on_unlock(),
        other => Err(AppError::Other(format!("{other:?} is not an engine action"))),
    }?;

    info!(outcome = %outcome, "Done");
    Ok(outcome)
}
