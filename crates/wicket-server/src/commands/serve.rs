use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use wicket_analyst::Analyst;
use wicket_config::WicketConfig;

use crate::cli::ServeArgs;
use crate::server;

/// Handle `wicket serve`.
pub async fn handle(args: ServeArgs, mut config: WicketConfig) -> anyhow::Result<()> {
    if let Some(bind) = args.bind {
        config.server.bind_addr = bind;
    }
    if let Some(database) = args.database {
        config.database.path = database;
    }

    let analyst = Analyst::from_config(&config).context("failed to build the model client")?;
    if !analyst.lake().exists() {
        tracing::warn!(
            path = %analyst.lake().path().display(),
            "database file not found; queries will fail until it exists"
        );
    }

    let listener = TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    tracing::info!(
        addr = %config.server.bind_addr,
        model = analyst.gateway().model(),
        daily_limit = config.limits.daily_limit,
        "wicket listening"
    );

    server::serve(listener, Arc::new(analyst)).await
}
