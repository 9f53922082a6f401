use crate::app::{AppContext, Result};
use crate::collector::CollectRequest;
use crate::domain::{ItemRecord, Sort};
use crate::export::{self, OutputTarget};

const TITLE_PREVIEW_CHARS: usize = 50;

/// Collect posts and comments, then export them if an output is configured.
///
/// Nothing is written unless the whole run succeeds.
pub async fn collect(ctx: &AppContext) -> Result<Vec<ItemRecord>> {
    let request = CollectRequest::from(&ctx.config.collector);
    let target = ctx
        .config
        .collector
        .output
        .as_deref()
        .map(OutputTarget::from_path);

    // Keep stdout clean when the document itself goes there
    let quiet = matches!(target, Some(OutputTarget::Stdout));
    let say = |line: String| {
        if quiet {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    };

    say(format!("User Agent: {}", ctx.credentials.user_agent));

    let collector = ctx.collector();
    let session = collector.authenticate(&ctx.credentials).await?;
    say("Reddit API authentication successful.".to_string());

    let items = collector
        .collect_with_progress(&session, &request, |n, item| {
            say(format!(
                "Processed post:{} - {}...",
                n,
                item.short_title(TITLE_PREVIEW_CHARS)
            ));
            say(format!("Stored top {} comments", item.comments.len()));
        })
        .await?;

    if let Some(target) = target {
        let summary = export::export(&items, &target)?;
        let destination = match &target {
            OutputTarget::Stdout => "stdout".to_string(),
            OutputTarget::File(path) => path.display().to_string(),
        };
        say(format!(
            "Saved {} posts ({} comments) to {} [sha256 {}]",
            summary.items, summary.comments, destination, summary.sha256
        ));
    }

    Ok(items)
}

/// Print the titles of a subreddit's hot listing.
pub async fn hot(ctx: &AppContext, subreddit: &str, limit: usize) -> Result<()> {
    let collector = ctx.collector();
    let session = collector.authenticate(&ctx.credentials).await?;

    let items = collector
        .items(&session, subreddit, Sort::Hot, limit)
        .take(limit)
        .await?;

    if items.is_empty() {
        println!("No posts in r/{}", subreddit);
        return Ok(());
    }

    for item in items {
        println!("{}", item.title);
    }

    Ok(())
}

/// Authenticate and report the session's properties.
pub async fn auth(ctx: &AppContext) -> Result<()> {
    println!("User Agent: {}", ctx.credentials.user_agent);

    let session = ctx.collector().authenticate(&ctx.credentials).await?;

    println!("Reddit API authentication successful.");
    println!("Read-only: {}", session.read_only);
    println!("Scope: {}", session.scope);
    println!(
        "Token expires: {}",
        session.expires_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    Ok(())
}
