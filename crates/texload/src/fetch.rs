//! Remote fetch adapter.
//!
//! [`RemoteReader`] recognizes `http://` and `https://` locations, downloads
//! the body with a blocking HTTP client, and hands it to another
//! [`ContentReader`] along with an extension hint taken from the URL.

use std::sync::{Arc, Mutex, PoisonError};

use texload_decode::ImageData;

use crate::{
    error::{Error, Result},
    options::{ReadOptions, url_extension},
    reader::ContentReader,
    shared::{Lease, SHARED_CLIENT, manages_shared_client},
};

/// User agent sent with every request.
pub const USER_AGENT: &str = "texload-agent/1.0";

/// Redirect hops followed before a request fails.
pub const MAX_REDIRECTS: usize = 10;

/// Whether `path` names a remote resource. The scheme match is literal and
/// case-sensitive.
#[must_use]
pub fn contains_server_address(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// Split a URL into its server address and the path after it.
///
/// The path excludes the leading slash and is empty when the URL has none.
/// Returns `None` if the URL has no `://` separator.
#[must_use]
pub fn server_address_and_path(url: &str) -> Option<(String, String)> {
    let (_, rest) = url.split_once("://")?;
    Some(match rest.split_once('/') {
        Some((address, path)) => (address.to_string(), path.to_string()),
        None => (rest.to_string(), String::new()),
    })
}

/// Trait for HTTP client operations.
pub trait HttpClient: Send + Sync {
    /// Perform a GET request and return the response body.
    fn get(&self, url: &str) -> Result<Vec<u8>>;
}

pub(crate) fn build_client() -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()
        .map_err(|e| Error::Http {
            url: String::new(),
            message: e.to_string(),
        })
}

enum Handle {
    Shared(Lease<'static, reqwest::blocking::Client>),
    Private(reqwest::blocking::Client),
}

/// Blocking HTTP client backed by reqwest.
///
/// By default every instance leases the process-wide client; see
/// [`set_manage_shared_client`](crate::set_manage_shared_client).
pub struct ReqwestClient {
    handle: Handle,
}

impl ReqwestClient {
    /// Lease the shared client, or build a private one if sharing is off.
    pub fn new() -> Result<Self> {
        let handle = if manages_shared_client() {
            Handle::Shared(SHARED_CLIENT.acquire()?)
        } else {
            Handle::Private(build_client()?)
        };
        Ok(Self { handle })
    }

    fn client(&self) -> &reqwest::blocking::Client {
        match &self.handle {
            Handle::Shared(lease) => &**lease,
            Handle::Private(client) => client,
        }
    }
}

impl std::fmt::Debug for ReqwestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shared = matches!(self.handle, Handle::Shared(_));
        f.debug_struct("ReqwestClient")
            .field("shared", &shared)
            .finish()
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        let http_error = |e: reqwest::Error| Error::Http {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.client().get(url).send().map_err(http_error)?;
        let status = response.status();
        if status.is_success() {
            tracing::debug!(url, %status, "fetched");
        } else {
            tracing::warn!(url, %status, "server returned non-success status");
        }

        Ok(response.bytes().map_err(http_error)?.to_vec())
    }
}

type ClientFactory = fn() -> Result<Arc<dyn HttpClient>>;

fn reqwest_client() -> Result<Arc<dyn HttpClient>> {
    Ok(Arc::new(ReqwestClient::new()?))
}

/// Reader for textures behind an HTTP(S) URL.
pub struct RemoteReader<D> {
    delegate: D,
    client: Mutex<Option<Arc<dyn HttpClient>>>,
    factory: ClientFactory,
}

impl<D: ContentReader> RemoteReader<D> {
    /// A reader that creates a [`ReqwestClient`] on its first remote read.
    pub fn new(delegate: D) -> Self {
        Self::with_factory(delegate, reqwest_client)
    }

    /// A reader that uses `client` for every request.
    pub fn with_client(delegate: D, client: impl HttpClient + 'static) -> Self {
        let reader = Self::new(delegate);
        *reader.client.lock().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(client));
        reader
    }

    fn with_factory(delegate: D, factory: ClientFactory) -> Self {
        Self {
            delegate,
            client: Mutex::new(None),
            factory,
        }
    }

    /// The reader bodies are handed to.
    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    /// Fetch and decode the texture at `url`.
    ///
    /// Returns `None` for locations that are not HTTP(S) URLs or lack a
    /// path, when the transfer fails, or when the delegate declines the body.
    pub fn read(&self, url: &str, options: &ReadOptions) -> Option<ImageData> {
        if !contains_server_address(url) {
            tracing::debug!(url, "not a remote location");
            return None;
        }
        let (address, path) = server_address_and_path(url)?;
        if address.is_empty() || path.is_empty() {
            tracing::debug!(url, "url has no server address or path");
            return None;
        }

        let client = match self.client() {
            Ok(client) => client,
            Err(error) => {
                tracing::warn!(url, %error, "failed to create http client");
                return None;
            }
        };

        let body = match client.get(url) {
            Ok(body) => body,
            Err(error) => {
                tracing::warn!(%error, "failed to fetch texture");
                return None;
            }
        };
        tracing::debug!(url, %address, bytes = body.len(), "downloaded texture");

        let options = match url_extension(url) {
            Some(extension) => options.clone().with_extension_hint(extension),
            None => options.clone(),
        };
        self.delegate.read_bytes(body, &options)
    }

    fn client(&self) -> Result<Arc<dyn HttpClient>> {
        let mut slot = self.client.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }
        let client = (self.factory)()?;
        *slot = Some(client.clone());
        Ok(client)
    }
}

impl<D: std::fmt::Debug> std::fmt::Debug for RemoteReader<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteReader")
            .field("delegate", &self.delegate)
            .finish_non_exhaustive()
    }
}
