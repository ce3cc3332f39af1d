// UI layer: turns parsed arguments into a `Config`, sends the one request
// the command asks for and prints the JSON answer on stdout. A spinner runs
// on stderr while the request is in flight.

use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use crate::api::{FeedPost, GraphClient, Listing};
use crate::cli::{Cli, Command, GlobalArgs};
use crate::config::{Config, Credential};

/// Run a parsed command line to completion.
pub fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.global.verbose);

    // Token problems must stop us before a client exists.
    let config = build_config(&cli.global, Credential::from_env()?)?;
    let api = GraphClient::new(config)?;

    let response = dispatch(&api, cli.command)?;
    println!("{}", render(&response, cli.global.compact)?);
    Ok(())
}

/// Fold global flags into the client configuration.
pub fn build_config(global: &GlobalArgs, credential: Credential) -> Result<Config> {
    let config = Config::new(credential)?
        .with_api_base(global.api_base.clone())?
        .with_timeout(Duration::from_secs(global.timeout));
    Ok(config)
}

/// Map a subcommand onto its API call.
pub fn dispatch(api: &GraphClient, command: Command) -> Result<Value> {
    let value = match command {
        Command::Page(args) => {
            let post = FeedPost::new(args.id, args.message, args.link)?;
            with_spinner("Posting to page...", || api.post_to_page(&post))?
        }
        Command::Group(args) => {
            let post = FeedPost::new(args.id, args.message, args.link)?;
            with_spinner("Posting to group...", || api.post_to_group(&post))?
        }
        Command::Marketplace(args) => {
            let listing = Listing::new(
                args.catalog_id,
                args.title,
                args.description,
                args.price,
                args.currency,
                args.image_url,
            )?;
            with_spinner("Creating listing...", || api.create_listing(&listing))?
        }
    };
    Ok(value)
}

/// Pretty JSON by default, one line with `--compact`.
pub fn render(value: &Value, compact: bool) -> Result<String> {
    let out = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    out.context("Serializing response")
}

// indicatif hides the bar on its own when stderr is not a terminal, so
// piped output stays clean.
fn with_spinner<T, F>(message: &'static str, call: F) -> Result<T>
where
    F: FnOnce() -> crate::Result<T>,
{
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = call();
    spinner.finish_and_clear();
    Ok(result?)
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fb_poster={default_level}")));
    // A second init (tests) is harmless, so the error is ignored.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{FeedArgs, ListingArgs};
    use clap::Parser;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> GraphClient {
        let base = server.url("/v18.0");
        let cli = Cli::parse_from([
            "fb-poster",
            "--api-base",
            base.as_str(),
            "page",
            "1",
            "m",
        ]);
        let config = build_config(&cli.global, Credential::new("TOK").unwrap()).unwrap();
        GraphClient::new(config).unwrap()
    }

    #[test]
    fn global_flags_reach_the_config() {
        let cli = Cli::parse_from([
            "fb-poster",
            "--api-base",
            "http://localhost:9/v19.0",
            "--timeout",
            "5",
            "group",
            "g",
            "hello",
        ]);
        let config = build_config(&cli.global, Credential::new("TOK").unwrap()).unwrap();
        assert_eq!(config.api_base().as_str(), "http://localhost:9/v19.0");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn marketplace_arguments_parse_price_as_number() {
        let cli = Cli::parse_from([
            "fb-poster",
            "marketplace",
            "cat",
            "Chair",
            "Wooden",
            "12.5",
            "EUR",
            "https://example.com/c.jpg",
        ]);
        match cli.command {
            Command::Marketplace(ListingArgs { price, currency, .. }) => {
                assert_eq!(price, 12.5);
                assert_eq!(currency, "EUR");
            }
            other => panic!("unexpected command {other:?}"),
        }
        let bad_price = ["fb-poster", "marketplace", "c", "t", "d", "cheap", "USD", "u"];
        assert!(Cli::try_parse_from(bad_price).is_err());
    }

    #[test]
    fn dispatch_routes_group_command_to_group_feed() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v18.0/g1/feed")
                .x_www_form_urlencoded_tuple("link", "https://example.com/a");
            then.status(200).json_body(json!({"id": "g1_9"}));
        });

        let api = client_for(&server);
        let command = Command::Group(FeedArgs {
            id: "g1".into(),
            message: "hello".into(),
            link: Some("https://example.com/a".into()),
        });
        let value = dispatch(&api, command).unwrap();

        mock.assert();
        assert_eq!(value["id"], "g1_9");
    }

    #[test]
    fn invalid_request_is_rejected_before_sending() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST);
            then.status(200).json_body(json!({}));
        });

        let api = client_for(&server);
        let command = Command::Page(FeedArgs {
            id: "1".into(),
            message: "   ".into(),
            link: None,
        });
        assert!(dispatch(&api, command).is_err());
        assert_eq!(mock.hits(), 0);
    }

    #[test]
    fn render_keeps_key_order() {
        let value: Value = serde_json::from_str(r#"{"z":1,"a":{"y":2,"b":3}}"#).unwrap();
        assert_eq!(render(&value, true).unwrap(), r#"{"z":1,"a":{"y":2,"b":3}}"#);
        assert!(render(&value, false).unwrap().contains("\n  \"z\": 1"));
    }
}
