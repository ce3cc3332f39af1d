// Command-line model: three subcommands, one per Graph API call, plus the
// global flags that feed `Config`.

use clap::{ArgAction, Args, Parser, Subcommand};
use url::Url;

use crate::config::{DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS};

/// Post content to Facebook pages, groups and commerce catalogs.
///
/// The access token is read from FACEBOOK_ACCESS_TOKEN.
#[derive(Debug, Parser)]
#[command(name = "fb-poster", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Graph API base URL, including the API version.
    #[arg(long, env = "FACEBOOK_API_BASE", default_value = DEFAULT_API_BASE, global = true)]
    pub api_base: Url,

    /// Request timeout in seconds.
    #[arg(
        long,
        env = "FACEBOOK_API_TIMEOUT",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..),
        global = true
    )]
    pub timeout: u64,

    /// Print the response on a single line.
    #[arg(long, global = true)]
    pub compact: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Post to a page
    Page(FeedArgs),
    /// Post to a group
    Group(FeedArgs),
    /// Create a marketplace listing
    Marketplace(ListingArgs),
}

#[derive(Debug, Args)]
pub struct FeedArgs {
    /// Page or group id.
    pub id: String,
    pub message: String,
    /// URL to attach to the post.
    #[arg(long)]
    pub link: Option<String>,
}

#[derive(Debug, Args)]
pub struct ListingArgs {
    pub catalog_id: String,
    pub title: String,
    pub description: String,
    #[arg(allow_negative_numbers = true)]
    pub price: f64,
    pub currency: String,
    pub image_url: String,
}
