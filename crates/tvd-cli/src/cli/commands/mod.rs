//! CLI command handlers. Each command is in its own file for clarity.

mod completions;
mod download;
mod extract;
mod fetch;
mod import_har;

pub use completions::run_completions;
pub use download::run_download;
pub use extract::run_extract;
pub use fetch::run_fetch;
pub use import_har::run_import_har;

use tvd_core::cache::format_bitrate;
use tvd_core::VideoVariant;

/// One block per post: id line, then one row per variant (best first).
fn print_post(post_id: &str, variants: &[VideoVariant]) {
    println!("{post_id}");
    for v in variants {
        println!(
            "  {:<7} {:>10}  {}",
            v.resolution,
            format_bitrate(v.bitrate),
            v.url
        );
    }
}
