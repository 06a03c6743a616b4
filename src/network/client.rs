//! HTTP client wrapper - executes requests with reqwest

use std::time::Instant;

use async_trait::async_trait;

use crate::constants::REQUEST_TIMEOUT;
use crate::messages::ExecError;
use crate::models::{Header, Request, Response};
use crate::network::Transport;

/// Create a configured HTTP client
pub fn create_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Falling back to default HTTP client");
            reqwest::Client::new()
        })
}

/// Transport backed by a shared reqwest client
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        HttpTransport {
            client: create_client(),
        }
    }

    fn build_request(&self, request: &Request) -> Result<reqwest::RequestBuilder, ExecError> {
        let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())
            .map_err(|e| ExecError::Request(e.to_string()))?;
        let mut builder = self.client.request(method, &request.url);
        for header in &request.headers {
            builder = builder.header(&header.key, &header.value);
        }
        Ok(builder)
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        HttpTransport::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: Request) -> Result<Response, ExecError> {
        let start = Instant::now();
        let resp = self
            .build_request(&request)?
            .send()
            .await
            .map_err(classify_error)?;

        let status = resp.status().as_u16();
        let headers = resp
            .headers()
            .iter()
            .map(|(k, v)| Header::new(k.as_str(), String::from_utf8_lossy(v.as_bytes())))
            .collect();
        let body = resp
            .bytes()
            .await
            .map_err(|e| ExecError::Body(e.to_string()))?;

        Ok(Response {
            status,
            headers,
            body: body.to_vec(),
            elapsed_ms: start.elapsed().as_millis() as u64,
        })
    }
}

fn classify_error(e: reqwest::Error) -> ExecError {
    if e.is_timeout() {
        ExecError::Timeout(REQUEST_TIMEOUT.as_secs())
    } else if e.is_connect() {
        ExecError::Connect(e.to_string())
    } else {
        ExecError::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HttpMethod;

    #[test]
    fn test_build_request_carries_method_and_headers() {
        let transport = HttpTransport::new();
        let mut request = Request::new("r").unwrap();
        request.method = HttpMethod::PATCH;
        request.url = "http://localhost:9/items".into();
        request.headers.push(Header::new("Accept", "application/json"));

        let built = transport.build_request(&request).unwrap().build().unwrap();
        assert_eq!(built.method(), reqwest::Method::PATCH);
        assert_eq!(built.url().as_str(), "http://localhost:9/items");
        assert_eq!(built.headers()["accept"], "application/json");
    }

    #[tokio::test]
    async fn test_invalid_url_is_request_error() {
        let transport = HttpTransport::new();
        let mut request = Request::new("r").unwrap();
        request.url = "not a url".into();
        let err = transport.execute(request).await.unwrap_err();
        assert!(matches!(err, ExecError::Request(_)));
    }
}
