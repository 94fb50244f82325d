use anyhow::Context;
use wicket_analyst::Analyst;
use wicket_config::WicketConfig;

use crate::cli::AskArgs;

/// Handle `wicket ask`.
pub async fn handle(args: AskArgs, mut config: WicketConfig) -> anyhow::Result<()> {
    if let Some(database) = args.database {
        config.database.path = database;
    }
    // The server starts without a key; a one-shot question cannot.
    config.gemini.require()?;
    let analyst = Analyst::from_config(&config).context("failed to build the model client")?;

    let output = if args.deep {
        let response = analyst.analyze_deep(&args.prompt, args.max_steps).await?;
        serde_json::to_string_pretty(&response)?
    } else {
        let response = analyst.analyze(&args.prompt).await?;
        serde_json::to_string_pretty(&response)?
    };
    println!("{output}");
    Ok(())
}
