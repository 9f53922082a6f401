use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use redcollect::app::AppContext;
use redcollect::cli::{commands, Cli, Commands};
use redcollect::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    // A missing .env file is fine; credentials may already be exported
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env loaded: {}", e);
    }

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Collect(args) => {
            args.apply(&mut config.collector);
            let ctx = context(config, args.fixture.as_deref())?;
            commands::collect(&ctx).await?;
        }
        Commands::Hot {
            subreddit,
            limit,
            fixture,
        } => {
            let ctx = context(config, fixture.as_deref())?;
            commands::hot(&ctx, &subreddit, limit).await?;
        }
        Commands::Auth { fixture } => {
            let ctx = context(config, fixture.as_deref())?;
            commands::auth(&ctx).await?;
        }
    }

    Ok(())
}

fn context(config: Config, fixture: Option<&std::path::Path>) -> anyhow::Result<AppContext> {
    let ctx = match fixture {
        Some(path) => AppContext::with_fixture(config, path)?,
        None => AppContext::new(config)?,
    };
    Ok(ctx)
}
