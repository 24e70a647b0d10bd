//! Periodic cleanup of expired tokens and idle login-throttle entries.

use epl_auth::AuthService;

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

pub const DEFAULT_REAP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Runs one sweep. Failures are logged and retried on the next tick.
pub async fn sweep(auth: &AuthService) {
    match auth.issuer().reap_expired().await {
        Ok(0) => {}
        Ok(removed) => log::info!("Token reaper removed {} expired token(s)", removed),
        Err(e) => log::warn!("Token reaper failed: {}", e),
    }
    auth.prune_login_attempts();
}

pub fn spawn(auth: Arc<AuthService>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            sweep(&auth).await;
        }
    })
}
