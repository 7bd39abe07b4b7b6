//! CLI for the TVD video variant extractor.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tvd_core::config;

use commands::{run_completions, run_download, run_extract, run_fetch, run_import_har};

/// Top-level CLI for TVD.
#[derive(Debug, Parser)]
#[command(name = "tvd")]
#[command(
    about = "TVD: find and download video variants in social-media API responses",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List video variants found in a saved JSON API response.
    Extract {
        /// Path to the JSON file.
        path: PathBuf,
    },

    /// Replay a HAR capture and list every post with video.
    ImportHar {
        /// Path to the HAR file.
        path: PathBuf,
    },

    /// Fetch a URL through the intercepting wrapper and print VIDEO_DATA messages.
    Fetch {
        /// URL to request.
        url: String,

        /// Extra request header, e.g. `-H "authorization: Bearer ..."`. Repeatable.
        #[arg(short = 'H', long = "header", value_name = "NAME:VALUE")]
        headers: Vec<String>,

        /// Use the event-driven request primitive instead of fetch.
        #[arg(long)]
        xhr: bool,
    },

    /// Download a post's video using data captured in a HAR file.
    Download {
        /// Post identifier (the number in `/status/<id>`).
        post_id: String,

        /// HAR capture containing the post's API responses.
        #[arg(long, value_name = "PATH")]
        har: PathBuf,

        /// Resolution label to pick (e.g. 720p). Default: highest bitrate.
        #[arg(long)]
        resolution: Option<String>,

        /// Download folder (overrides config; sanitized).
        #[arg(long)]
        folder: Option<String>,
    },

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        if let CliCommand::Completions { shell } = cli.command {
            return run_completions(shell);
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Extract { path } => run_extract(&path)?,
            CliCommand::ImportHar { path } => run_import_har(&cfg, &path)?,
            CliCommand::Fetch { url, headers, xhr } => run_fetch(&cfg, &url, &headers, xhr).await?,
            CliCommand::Download {
                post_id,
                har,
                resolution,
                folder,
            } => {
                run_download(&cfg, &post_id, &har, resolution.as_deref(), folder.as_deref())
                    .await?
            }
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
