use crate::{api, api::state::ShopConfig, cli::telemetry};
use anyhow::Result;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub db_max_connections: u32,
    pub frontend_base_url: String,
    pub session_cookie_name: String,
    pub session_verify_url: Option<String>,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the database is unreachable, the session verifier cannot be
/// built, or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!(
        port = args.port,
        db_max_connections = args.db_max_connections,
        frontend_base_url = %args.frontend_base_url,
        remote_sessions = args.session_verify_url.is_some(),
        "Starting server"
    );

    let config = ShopConfig::new(args.frontend_base_url)
        .with_session_cookie_name(args.session_cookie_name);

    let result = api::new(
        args.port,
        args.dsn,
        args.db_max_connections,
        config,
        args.session_verify_url,
    )
    .await;

    telemetry::shutdown_tracer();

    result
}
