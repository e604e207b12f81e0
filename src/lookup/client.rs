//! HTTP lookup client shared by both API flavors.

use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use log::trace;
use url::Url;

use super::schema::{HostSchema, InternetDbResponse, ShodanHostResponse};
use super::{HostLookup, LookupResult};
use crate::config::{ApiFlavor, MAX_RESPONSE_BODY_SIZE};
use crate::error_handling::{ConfigError, LookupError};

/// Parses and checks an API base URL.
///
/// # Errors
///
/// Returns `ConfigError::InvalidApiUrl` if the URL does not parse and
/// `ConfigError::UnsupportedApiScheme` unless it is `http` or `https`.
pub fn parse_base_url(base_url: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(base_url).map_err(|source| ConfigError::InvalidApiUrl {
        url: base_url.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::UnsupportedApiScheme(base_url.to_string())),
    }
}

/// Queries one host API. The flavor picks the response schema; the base URL
/// picks the endpoint.
#[derive(Debug, Clone)]
pub struct LookupClient {
    client: Arc<reqwest::Client>,
    base_url: Url,
    flavor: ApiFlavor,
}

impl LookupClient {
    /// Creates a client for `flavor` rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `base_url` is not a valid http(s) URL.
    pub fn new(
        client: Arc<reqwest::Client>,
        base_url: &str,
        flavor: ApiFlavor,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
            flavor,
        })
    }

    /// `<base>/<address>`, with the address as the last path segment.
    pub fn request_url(&self, address: IpAddr) -> Result<Url, LookupError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| LookupError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(&address.to_string());
        Ok(url)
    }

    async fn fetch_body(&self, url: Url) -> Result<Vec<u8>, LookupError> {
        let mut response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status));
        }

        if let Some(len) = response.content_length() {
            if len > MAX_RESPONSE_BODY_SIZE as u64 {
                return Err(LookupError::BodyTooLarge(
                    usize::try_from(len).unwrap_or(usize::MAX),
                ));
            }
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > MAX_RESPONSE_BODY_SIZE {
                return Err(LookupError::BodyTooLarge(body.len() + chunk.len()));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

fn decode<S: HostSchema>(body: &[u8], address: IpAddr) -> Result<LookupResult, LookupError> {
    let parsed: S = serde_json::from_slice(body)?;
    Ok(parsed.into_result(address))
}

#[async_trait]
impl HostLookup for LookupClient {
    async fn lookup(&self, address: IpAddr) -> Result<LookupResult, LookupError> {
        let url = self.request_url(address)?;
        trace!("GET {url}");
        let body = self.fetch_body(url).await?;
        match self.flavor {
            ApiFlavor::InternetDb => decode::<InternetDbResponse>(&body, address),
            ApiFlavor::ShodanHost => decode::<ShodanHostResponse>(&body, address),
        }
    }
}
