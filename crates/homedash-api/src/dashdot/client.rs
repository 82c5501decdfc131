// dash. proxy client
//
// Wraps `reqwest::Client` with the proxy's URL convention:
// `GET {proxy}/api/modules/dashdot?url=<sub-path>&base=<target>`.
// The proxy forwards `<target><sub-path>` and relays the JSON body.

use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::dashdot::models::DashDotInfo;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Proxy route for the dash. module, relative to the proxy root.
pub const MODULE_ENDPOINT: &str = "api/modules/dashdot";

/// dash. sub-resource carrying static host information.
pub const INFO_PATH: &str = "/info";

/// HTTP client for dash. requests routed through the local proxy.
#[derive(Debug, Clone)]
pub struct DashDotClient {
    http: reqwest::Client,
    proxy_url: Url,
    timeout_secs: Option<u64>,
}

impl DashDotClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `proxy_url` is the root of the dashboard backend
    /// (e.g. `http://localhost:7575`), not the dash. instance.
    pub fn new(proxy_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            proxy_url,
            timeout_secs: Some(transport.timeout.as_secs()),
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, proxy_url: Url) -> Self {
        Self {
            http,
            proxy_url,
            timeout_secs: None,
        }
    }

    /// The proxy root this client talks to.
    pub fn proxy_url(&self) -> &Url {
        &self.proxy_url
    }

    /// Fetch `/info` for the dash. instance at `base`.
    pub async fn info(&self, base: &Url) -> Result<DashDotInfo, Error> {
        self.get(INFO_PATH, base).await
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build the proxied request URL for `sub_path` on `base`.
    pub(crate) fn module_url(&self, sub_path: &str, base: &Url) -> Result<Url, Error> {
        let root = self.proxy_url.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{root}/{MODULE_ENDPOINT}"))?;
        url.query_pairs_mut()
            .append_pair("url", sub_path)
            .append_pair("base", base.as_str());
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a proxied GET and decode the relayed JSON body.
    async fn get<T: DeserializeOwned>(&self, sub_path: &str, base: &Url) -> Result<T, Error> {
        let url = self.module_url(sub_path, base)?;
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        trace!(bytes = body.len(), "proxy response received");

        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }

    /// Timeouts, whether on connect or while reading the body, carry the
    /// configured limit.
    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(err)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn module_url_forwards_sub_path_and_base() {
        let client = DashDotClient::with_client(
            reqwest::Client::new(),
            Url::parse("http://localhost:7575/").unwrap(),
        );
        let base = Url::parse("http://dash.lan:3001").unwrap();

        let url = client.module_url(INFO_PATH, &base).unwrap();

        assert_eq!(url.path(), "/api/modules/dashdot");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("url".to_owned(), "/info".to_owned()),
                ("base".to_owned(), "http://dash.lan:3001/".to_owned()),
            ]
        );
    }

    #[test]
    fn module_url_keeps_proxy_sub_path() {
        let client = DashDotClient::with_client(
            reqwest::Client::new(),
            Url::parse("https://home.lan/dashboard").unwrap(),
        );
        let base = Url::parse("http://dash.lan:3001").unwrap();

        let url = client.module_url(INFO_PATH, &base).unwrap();
        assert_eq!(url.path(), "/dashboard/api/modules/dashdot");
    }
}
