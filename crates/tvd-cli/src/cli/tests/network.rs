//! Tests for fetch, download and completions.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use clap_complete::Shell;
use std::path::Path;

#[test]
fn cli_parse_fetch_defaults() {
    match parse(&["tvd", "fetch", "https://x.com/i/api/graphql/q/TweetDetail"]) {
        CliCommand::Fetch { url, headers, xhr } => {
            assert_eq!(url, "https://x.com/i/api/graphql/q/TweetDetail");
            assert!(headers.is_empty());
            assert!(!xhr);
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_headers_and_xhr() {
    match parse(&[
        "tvd",
        "fetch",
        "https://x.com/tweet",
        "-H",
        "authorization: Bearer t",
        "--header",
        "x-csrf-token: c",
        "--xhr",
    ]) {
        CliCommand::Fetch { headers, xhr, .. } => {
            assert_eq!(headers, vec!["authorization: Bearer t", "x-csrf-token: c"]);
            assert!(xhr);
        }
        _ => panic!("expected Fetch with headers"),
    }
}

#[test]
fn cli_parse_download() {
    match parse(&["tvd", "download", "1790", "--har", "c.har"]) {
        CliCommand::Download {
            post_id,
            har,
            resolution,
            folder,
        } => {
            assert_eq!(post_id, "1790");
            assert_eq!(har, Path::new("c.har"));
            assert!(resolution.is_none());
            assert!(folder.is_none());
        }
        _ => panic!("expected Download"),
    }
}

#[test]
fn cli_parse_download_resolution_and_folder() {
    match parse(&[
        "tvd",
        "download",
        "1790",
        "--har",
        "c.har",
        "--resolution",
        "720p",
        "--folder",
        "clips",
    ]) {
        CliCommand::Download {
            resolution, folder, ..
        } => {
            assert_eq!(resolution.as_deref(), Some("720p"));
            assert_eq!(folder.as_deref(), Some("clips"));
        }
        _ => panic!("expected Download with options"),
    }
}

#[test]
fn cli_parse_download_requires_har() {
    assert!(Cli::try_parse_from(["tvd", "download", "1790"]).is_err());
}

#[test]
fn cli_parse_completions() {
    match parse(&["tvd", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Bash),
        _ => panic!("expected Completions"),
    }
}
