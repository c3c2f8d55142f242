use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, PgConnection};
use tokio::time::timeout;

use tripsum_core::{DbSettings, Result, RetryPolicy};

use crate::retry::retry_with_backoff;

/// Build connection options from explicit settings; `.pgpass` is not consulted.
pub fn connect_options(settings: &DbSettings) -> PgConnectOptions {
    PgConnectOptions::new_without_pgpass()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.user)
        .password(&settings.password)
        .database(&settings.database)
        .application_name("tripsum")
}

/// Open a single connection, retrying with capped exponential backoff.
pub async fn connect_with_retry(
    settings: &DbSettings,
    policy: &RetryPolicy,
) -> Result<PgConnection> {
    let options = connect_options(settings);
    tracing::info!(
        event = "connect_started",
        db = %settings.redacted(),
        max_attempts = policy.max_attempts
    );

    let conn = retry_with_backoff(policy, |_attempt| {
        let options = options.clone();
        async move {
            match timeout(policy.attempt_timeout, PgConnection::connect_with(&options)).await {
                Ok(Ok(conn)) => Ok(conn),
                Ok(Err(err)) => Err(err.to_string()),
                Err(_) => Err(format!(
                    "connection attempt timed out after {}s",
                    policy.attempt_timeout.as_secs_f64()
                )),
            }
        }
    })
    .await?;

    tracing::info!(event = "connected", db = %settings.redacted());
    Ok(conn)
}
