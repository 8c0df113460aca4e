//! Outbound HTTP adapter.
//!
//! Owns transport details only: base URL, session credentials, request ids and
//! the mapping of transport failures and non-2xx statuses onto `ClientError`.
//! Body decoding is left to callers.

use reqwest::header::{HeaderValue, ACCEPT, COOKIE};
use reqwest::redirect::Policy;
use reqwest::{Client, Method, Url};
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::models::Id;
use crate::utils::error::ClientError;
use crate::utils::response::error_message;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Path below the API base URL.
///
/// Fixed parts come from the crate's own route constants. Ids are pushed as
/// single segments and percent-encoded, so user input cannot add segments or
/// a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPath(Vec<String>);

impl ApiPath {
    pub fn new(fixed: &str) -> Self {
        Self(Vec::new()).join(fixed)
    }

    pub fn join(mut self, fixed: &str) -> Self {
        self.0.extend(
            fixed
                .split('/')
                .filter(|part| !part.is_empty())
                .map(String::from),
        );
        self
    }

    pub fn id(mut self, id: &Id) -> Self {
        self.0.push(id.to_string());
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ApiPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    session_cookie: Option<HeaderValue>,
}

impl HttpClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let base_url = Url::parse(config.api_url.trim_end_matches('/'))
            .map_err(|e| ClientError::Config(format!("invalid API URL '{}': {e}", config.api_url)))?;

        let session_cookie = config
            .session_cookie
            .as_deref()
            .map(|cookie| {
                HeaderValue::from_str(cookie)
                    .map_err(|e| ClientError::Config(format!("invalid session cookie: {e}")))
            })
            .transpose()?;

        // A signed-out call is answered with a redirect to the sign-in page;
        // it has to surface as a status, not as the page it points to.
        let mut builder = Client::builder().redirect(Policy::none());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            session_cookie,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves `path` against the base URL, keeping any path prefix the base
    /// URL carries.
    pub fn url(&self, path: &ApiPath) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::Config(format!("API URL '{}' cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(path.segments());
        Ok(url)
    }

    /// Issues one request and returns the raw body of a 2xx response.
    pub async fn request(
        &self,
        method: Method,
        path: &ApiPath,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Vec<u8>, ClientError> {
        let url = self.url(path)?;
        let request_id = Uuid::new_v4();

        let mut builder = self
            .client
            .request(method.clone(), url)
            .header(ACCEPT, "application/json")
            .header(REQUEST_ID_HEADER, request_id.to_string());
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(cookie) = &self.session_cookie {
            builder = builder.header(COOKIE, cookie.clone());
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        debug!(%method, %path, %request_id, "Sending request");

        let response = builder.send().await.map_err(|e| {
            warn!(%method, %path, %request_id, error = %e, "Request failed before a response arrived");
            ClientError::Network(e.to_string())
        })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        debug!(%method, %path, %request_id, status = status.as_u16(), "Received response");

        if !status.is_success() {
            return Err(ClientError::from_status(
                status.as_u16(),
                error_message(bytes.as_ref()),
            ));
        }

        Ok(bytes.to_vec())
    }
}
