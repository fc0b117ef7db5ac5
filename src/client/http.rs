// file: src/client/http.rs
// description: request execution and mapping of error statuses
// reference: https://docs.rs/reqwest

use crate::error::{CouchError, ErrorDetails, Result};
use crate::util::get_as_string;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

#[derive(Clone)]
pub(crate) struct Credentials {
    pub username: String,
    pub password: Option<String>,
}

/// Shared by a client and every database handle it hands out.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    credentials: Option<Credentials>,
}

impl HttpTransport {
    pub(crate) fn new(client: Client, credentials: Option<Credentials>) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// Sends one request and fails on any non-2xx status.
    pub async fn execute(
        &self,
        method: Method,
        uri: &str,
        body: Option<&Value>,
    ) -> Result<reqwest::Response> {
        let mut request = self.request(&method, uri);

        if let Some(body) = body {
            request = request.json(body);
        } else if method == Method::PUT || method == Method::POST {
            request = request.header(CONTENT_TYPE, "application/json");
        }

        self.send(request, &method, uri).await
    }

    /// Sends `body` as is, for attachment content.
    pub async fn execute_raw(
        &self,
        method: Method,
        uri: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<reqwest::Response> {
        let request = self
            .request(&method, uri)
            .header(CONTENT_TYPE, content_type)
            .body(body);

        self.send(request, &method, uri).await
    }

    fn request(&self, method: &Method, uri: &str) -> RequestBuilder {
        debug!("{} {}", method, uri);

        let request = self.client.request(method.clone(), uri);
        match &self.credentials {
            Some(creds) => request.basic_auth(&creds.username, creds.password.as_ref()),
            None => request,
        }
    }

    async fn send(
        &self,
        request: RequestBuilder,
        method: &Method,
        uri: &str,
    ) -> Result<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        debug!("{} {} failed with status {}", method, uri, status);
        Err(error_for_status(status, uri, &text))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, uri: &str) -> Result<T> {
        self.send_json(Method::GET, uri, None).await
    }

    pub async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        uri: &str,
        body: Option<&Value>,
    ) -> Result<T> {
        let response = self.execute(method, uri, body).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            warn!("Unexpected response body from {}: {}", uri, e);
            CouchError::from(e)
        })
    }

    /// Like [`HttpTransport::send_json`], recording the status on the result.
    pub async fn send_for_response(
        &self,
        method: Method,
        uri: &str,
        body: Option<&Value>,
    ) -> Result<crate::models::Response> {
        let response = self.execute(method, uri, body).await?;
        let status = response.status().as_u16();
        let mut parsed: crate::models::Response = response.json().await?;
        parsed.status_code = status;
        Ok(parsed)
    }

    /// Like [`HttpTransport::execute_raw`], parsing the write acknowledgement.
    pub async fn send_raw_for_response(
        &self,
        method: Method,
        uri: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<crate::models::Response> {
        let response = self.execute_raw(method, uri, content_type, body).await?;
        let status = response.status().as_u16();
        let mut parsed: crate::models::Response = response.json().await?;
        parsed.status_code = status;
        Ok(parsed)
    }

    pub async fn send_text(&self, method: Method, uri: &str, body: Option<&Value>) -> Result<String> {
        let response = self.execute(method, uri, body).await?;
        Ok(response.text().await?)
    }
}

/// Builds the error for a failed request. A JSON body with `error`/`reason`
/// fields is folded into the details.
pub(crate) fn error_for_status(status: StatusCode, uri: &str, body: &str) -> CouchError {
    let message = status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string();

    let (error, reason) = match serde_json::from_str::<Value>(body) {
        Ok(json) => (get_as_string(&json, "error"), get_as_string(&json, "reason")),
        Err(_) => (None, None),
    };

    CouchError::from_status(
        ErrorDetails::new(status.as_u16(), message)
            .with_url(uri)
            .with_error(error, reason),
    )
}
