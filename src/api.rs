// API client module: request types for the three supported Graph API
// calls and a small blocking client that sends them. Every call is a single
// form-encoded POST; the JSON answer is handed back untouched.

use std::fmt;

use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::{Config, Credential};
use crate::error::{Error, Result};

/// Which kind of feed a `FeedPost` is published to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedTarget {
    Page,
    Group,
}

impl fmt::Display for FeedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedTarget::Page => f.write_str("page"),
            FeedTarget::Group => f.write_str("group"),
        }
    }
}

/// A message (and optional link) for a page or group feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedPost {
    target_id: String,
    message: String,
    link: Option<String>,
}

impl FeedPost {
    /// Validate and build a feed post. An empty link counts as no link.
    pub fn new(
        target_id: impl Into<String>,
        message: impl Into<String>,
        link: Option<String>,
    ) -> Result<Self> {
        let target_id = require("target id", target_id.into())?;
        let message = require("message", message.into())?;
        let link = match link {
            Some(link) if !link.is_empty() => Some(require_url("link", link)?),
            _ => None,
        };
        Ok(Self {
            target_id,
            message,
            link,
        })
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Form body sent to `/{id}/feed`.
    pub fn form<'a>(&'a self, credential: &'a Credential) -> FeedForm<'a> {
        FeedForm {
            message: &self.message,
            access_token: credential.expose(),
            link: self.link.as_deref(),
        }
    }
}

#[derive(Serialize)]
pub struct FeedForm<'a> {
    pub message: &'a str,
    pub access_token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<&'a str>,
}

/// A product listing for a commerce catalog.
///
/// Price and currency are passed through as given; the Graph API is the one
/// that decides whether they are acceptable.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    catalog_id: String,
    title: String,
    description: String,
    price: f64,
    currency: String,
    image_url: String,
}

impl Listing {
    pub fn new(
        catalog_id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        currency: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Result<Self> {
        let catalog_id = require("catalog id", catalog_id.into())?;
        let title = require("title", title.into())?;
        let currency = require("currency", currency.into())?;
        let image_url = require_url("image url", image_url.into())?;
        if !price.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "price must be a finite number, got {price}"
            )));
        }
        Ok(Self {
            catalog_id,
            title,
            description: description.into(),
            price,
            currency,
            image_url,
        })
    }

    /// Form body sent to `/{catalog_id}/products`. The title doubles as the
    /// retailer id.
    pub fn form<'a>(&'a self, credential: &'a Credential) -> ListingForm<'a> {
        ListingForm {
            retailer_id: &self.title,
            name: &self.title,
            description: &self.description,
            price: self.price,
            currency: &self.currency,
            image_url: &self.image_url,
            access_token: credential.expose(),
        }
    }
}

#[derive(Serialize)]
pub struct ListingForm<'a> {
    pub retailer_id: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub price: f64,
    pub currency: &'a str,
    pub image_url: &'a str,
    pub access_token: &'a str,
}

fn require(field: &str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        return Err(Error::InvalidArgument(format!("{field} cannot be empty")));
    }
    Ok(value)
}

// Keeps the caller's spelling: `Url` would normalize `https://example.com`
// to `https://example.com/`.
fn require_url(field: &str, value: String) -> Result<String> {
    Url::parse(&value)
        .map_err(|err| Error::InvalidArgument(format!("{field} is not a valid URL ({err}): {value}")))?;
    Ok(value)
}

/// Blocking Graph API client. Holds the reqwest client and the resolved
/// configuration (base URL, token, timeout).
#[derive(Debug, Clone)]
pub struct GraphClient {
    client: Client,
    config: Config,
}

impl GraphClient {
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("fb-poster/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()
            .map_err(Error::HttpClient)?;
        Ok(Self { client, config })
    }

    /// Publish to a page feed. Needs the `pages_manage_posts` permission.
    pub fn post_to_page(&self, post: &FeedPost) -> Result<Value> {
        self.post_to_feed(FeedTarget::Page, post)
    }

    /// Publish to a group feed. Needs the `publish_to_groups` permission.
    pub fn post_to_group(&self, post: &FeedPost) -> Result<Value> {
        self.post_to_feed(FeedTarget::Group, post)
    }

    /// Add a product to a catalog. The catalog must belong to a commerce
    /// account the token can manage.
    pub fn create_listing(&self, listing: &Listing) -> Result<Value> {
        let url = self.endpoint(&listing.catalog_id, "products")?;
        debug!(catalog_id = %listing.catalog_id, title = %listing.title, "creating catalog listing");
        self.post_form(url, &listing.form(self.config.credential()))
    }

    fn post_to_feed(&self, target: FeedTarget, post: &FeedPost) -> Result<Value> {
        let url = self.endpoint(&post.target_id, "feed")?;
        debug!(%target, id = %post.target_id, has_link = post.link.is_some(), "posting to feed");
        self.post_form(url, &post.form(self.config.credential()))
    }

    /// `{api_base}/{id}/{edge}`, with `id` encoded as a single path segment.
    fn endpoint(&self, id: &str, edge: &str) -> Result<Url> {
        let mut url = self.config.api_base().clone();
        url.path_segments_mut()
            .map_err(|_| Error::Configuration("API base URL cannot carry a path".into()))?
            .pop_if_empty()
            .push(id)
            .push(edge);
        Ok(url)
    }

    fn post_form<F: Serialize + ?Sized>(&self, url: Url, form: &F) -> Result<Value> {
        let res = self
            .client
            .post(url.clone())
            .form(form)
            .send()
            .map_err(Error::Network)?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().unwrap_or_default();
            warn!(%url, %status, "Graph API rejected the request");
            return Err(Error::Http { status, body });
        }
        let body = res.text().map_err(Error::Network)?;
        let value: Value = serde_json::from_str(&body).map_err(Error::Decode)?;
        match value.get("id") {
            Some(id) => info!(%url, %id, "request succeeded"),
            None => info!(%url, "request succeeded"),
        }
        Ok(value)
    }
}
