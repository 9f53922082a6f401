pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::CollectorConfig;
use crate::domain::TimeRange;

#[derive(Parser)]
#[command(name = "redcollect")]
#[command(about = "Collect top posts and comments from a subreddit", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/redcollect/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect top posts and their top-level comments
    Collect(CollectArgs),
    /// Print the titles of a subreddit's hot posts
    Hot {
        /// Subreddit to read
        #[arg(short, long, default_value = "test", value_parser = parse_subreddit)]
        subreddit: String,

        /// Number of posts to list
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,

        /// Serve requests from a fixture file instead of the network
        #[arg(long)]
        fixture: Option<PathBuf>,
    },
    /// Check that the configured credentials are accepted
    Auth {
        /// Serve requests from a fixture file instead of the network
        #[arg(long)]
        fixture: Option<PathBuf>,
    },
}

/// Accept `diy`, `r/diy` and `/r/diy` alike.
fn parse_subreddit(raw: &str) -> Result<String, String> {
    let name = raw.trim().trim_start_matches('/').trim_start_matches("r/");
    if name.is_empty() {
        return Err("Subreddit name is empty".to_string());
    }
    Ok(name.to_string())
}

/// Flags of `collect`; unset flags keep the config file's values.
#[derive(Args, Debug, Default)]
pub struct CollectArgs {
    /// Subreddit to read
    #[arg(short, long, value_parser = parse_subreddit)]
    pub subreddit: Option<String>,

    /// Time window: hour, day, week, month, year, all
    #[arg(short, long)]
    pub time: Option<TimeRange>,

    /// Number of posts to collect
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Top-level comments kept per post
    #[arg(short, long)]
    pub comments: Option<usize>,

    /// Pause between posts in milliseconds
    #[arg(long)]
    pub throttle_ms: Option<u64>,

    /// Write the collected posts as JSON ("-" for stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Serve requests from a fixture file instead of the network
    #[arg(long)]
    pub fixture: Option<PathBuf>,
}

impl CollectArgs {
    pub fn apply(&self, config: &mut CollectorConfig) {
        if let Some(subreddit) = &self.subreddit {
            config.subreddit = subreddit.clone();
        }
        if let Some(time) = self.time {
            config.time_range = time;
        }
        if let Some(limit) = self.limit {
            config.limit = limit;
        }
        if let Some(comments) = self.comments {
            config.comment_limit = comments;
        }
        if let Some(throttle_ms) = self.throttle_ms {
            config.throttle_ms = throttle_ms;
        }
        if let Some(output) = &self.output {
            config.output = Some(output.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_collect_flags() {
        let cli = Cli::try_parse_from([
            "redcollect",
            "collect",
            "-s",
            "woodworking",
            "-t",
            "week",
            "-n",
            "3",
            "-c",
            "2",
            "-o",
            "out.json",
        ])
        .unwrap();

        let Commands::Collect(args) = cli.command else {
            panic!("expected collect");
        };
        assert_eq!(args.subreddit.as_deref(), Some("woodworking"));
        assert_eq!(args.time, Some(TimeRange::Week));
        assert_eq!(args.limit, Some(3));
        assert_eq!(args.comments, Some(2));
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_unset_flags_keep_config_values() {
        let cli = Cli::try_parse_from(["redcollect", "collect", "-n", "3"]).unwrap();
        let Commands::Collect(args) = cli.command else {
            panic!("expected collect");
        };

        let mut config = CollectorConfig::default();
        args.apply(&mut config);

        assert_eq!(config.limit, 3);
        assert_eq!(config.subreddit, "diy");
        assert_eq!(config.comment_limit, 5);
        assert_eq!(config.output, None);
    }

    #[test]
    fn test_subreddit_prefix_stripped() {
        let cli = Cli::try_parse_from(["redcollect", "collect", "-s", "r/woodworking"]).unwrap();
        let Commands::Collect(args) = cli.command else {
            panic!("expected collect");
        };
        let mut config = CollectorConfig::default();
        args.apply(&mut config);
        assert_eq!(config.subreddit, "woodworking");
    }

    #[test]
    fn test_hot_subreddit_prefix_stripped() {
        let cli = Cli::try_parse_from(["redcollect", "hot", "-s", "/r/test"]).unwrap();
        match cli.command {
            Commands::Hot { subreddit, .. } => assert_eq!(subreddit, "test"),
            _ => panic!("expected hot"),
        }
    }

    #[test]
    fn test_empty_subreddit_rejected() {
        assert!(Cli::try_parse_from(["redcollect", "hot", "-s", "r/"]).is_err());
    }

    #[test]
    fn test_hot_defaults() {
        let cli = Cli::try_parse_from(["redcollect", "hot"]).unwrap();
        match cli.command {
            Commands::Hot {
                subreddit, limit, ..
            } => {
                assert_eq!(subreddit, "test");
                assert_eq!(limit, 10);
            }
            _ => panic!("expected hot"),
        }
    }

    #[test]
    fn test_rejects_bad_time_range() {
        assert!(Cli::try_parse_from(["redcollect", "collect", "-t", "fortnight"]).is_err());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["redcollect", "auth", "--config", "alt.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
    }
}
