//! URL builder for the search endpoint
//!
//! Maps a `SearchQuery` to a request target. Repeated filters are encoded
//! as repeated key/value pairs, in this fixed key order:
//! `channel_id`, `content`, `author_id`, `include_nsfw`, `mentions`,
//! `min_id`, `max_id`, `has`.

use super::types::SearchQuery;
use crate::error::Result;
use crate::types::Target;
use url::Url;

/// Default API root
pub const DEFAULT_API_BASE: &str = "https://discordapp.com/api/v6";

/// Builds search endpoint URLs relative to an API root
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    base: Url,
}

impl UrlBuilder {
    /// Create a builder for the given API root
    pub fn new(api_base: &str) -> Result<Self> {
        let normalized = format!("{}/", api_base.trim_end_matches('/'));
        Ok(Self {
            base: Url::parse(&normalized)?,
        })
    }

    /// API root this builder resolves against
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Build the request target for a query (offset 0)
    pub fn build(&self, query: &SearchQuery) -> Result<String> {
        let mut url = self.base.join(&query.target.search_path())?;

        let pairs = query_pairs(query);
        if !pairs.is_empty() {
            let mut serializer = url.query_pairs_mut();
            for (key, value) in &pairs {
                serializer.append_pair(key, value);
            }
        }

        Ok(url.into())
    }

    /// Address the page starting at `offset` of an already built target
    pub fn with_offset(target: &str, offset: u64) -> Result<String> {
        let mut url = Url::parse(target)?;
        url.query_pairs_mut()
            .append_pair("offset", &offset.to_string());
        Ok(url.into())
    }
}

/// Query-string pairs for a search, in builder order
pub fn query_pairs(query: &SearchQuery) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();

    if let Target::Channel(id) = query.target {
        pairs.push(("channel_id", id.to_string()));
    }
    for id in &query.channels {
        pairs.push(("channel_id", id.to_string()));
    }
    if let Some(content) = &query.content {
        pairs.push(("content", content.clone()));
    }
    for id in &query.authors {
        pairs.push(("author_id", id.to_string()));
    }
    if let Some(nsfw) = query.include_nsfw {
        pairs.push(("include_nsfw", nsfw.to_string()));
    }
    for id in &query.mentions {
        pairs.push(("mentions", id.to_string()));
    }
    if let Some(id) = query.min_id {
        pairs.push(("min_id", id.to_string()));
    }
    if let Some(id) = query.max_id {
        pairs.push(("max_id", id.to_string()));
    }
    for filter in &query.has {
        pairs.push(("has", filter.as_str().to_string()));
    }

    pairs
}
