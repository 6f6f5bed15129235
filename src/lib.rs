pub mod routes;
pub mod scheduler;
pub mod problems;
pub mod skills;
pub mod streak;
pub mod analytics;
pub mod grader;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod state;
pub mod store;

#[cfg(test)]
#[path = "../tests/error_handling_test.rs"]
mod error_handling_test;
#[cfg(test)]
#[path = "../tests/score_extraction_test.rs"]
mod score_extraction_test;

use crate::config::CoachConfig;
use crate::error::CoachError;
use crate::state::app::AppState;

/// Build the host state and run the session-start decay check.
/// Logging should already be initialised by the caller.
pub async fn bootstrap(config: CoachConfig) -> Result<AppState, CoachError> {
    tracing::info!(store = ?config.store.path, "algocoach starting");

    let app_state = AppState::from_config(config);
    let streak = routes::start_session(&app_state).await?;
    tracing::info!(streak = streak.streak, "Session started");

    Ok(app_state)
}
