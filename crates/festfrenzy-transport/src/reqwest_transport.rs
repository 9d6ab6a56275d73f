//! HTTP transport implementation using `reqwest`.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use url::Url;

use crate::{
    Body, HttpRequest, HttpResponse, HttpTransport, Method, RequestId,
    TransportError,
};

/// An [`HttpTransport`] that talks to a real backend over HTTP(S).
///
/// Paths are joined onto `base_url`, so `/api/venues` against
/// `http://localhost:8000` becomes `http://localhost:8000/api/venues`.
/// A path prefix on the base is kept: against `http://host/festfrenzy`
/// the same request goes to `http://host/festfrenzy/api/venues`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
}

impl ReqwestTransport {
    /// Builds a transport with an explicit per-request timeout.
    ///
    /// # Errors
    /// Returns [`TransportError::Setup`] when the reqwest client cannot be
    /// constructed (e.g. the TLS backend fails to initialise).
    pub fn new(mut base_url: Url, timeout: Duration) -> Result<Self, TransportError> {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Setup(e.to_string()))?;
        tracing::debug!(%base_url, ?timeout, "reqwest transport ready");
        Ok(Self { client, base_url })
    }

    /// Returns the base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl HttpTransport for ReqwestTransport {
    async fn send(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        let id = RequestId::next();
        let url = self
            .base_url
            .join(request.path.trim_start_matches('/'))
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {e}", request.path)))?;

        tracing::debug!(%id, method = %request.method, %url, "sending request");

        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            Body::Empty => builder,
            Body::Json(bytes) => {
                builder.header(CONTENT_TYPE, "application/json").body(bytes)
            }
            Body::Form(pairs) => builder.form(&pairs),
        };

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        tracing::debug!(%id, status, bytes = body.len(), "received response");

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn map_reqwest_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout(error.to_string())
    } else {
        TransportError::RequestFailed(error.to_string())
    }
}
