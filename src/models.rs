use serde::{Deserialize, Serialize};

use crate::commands::CommandError;
use crate::constants::DEFAULT_HTTP_URL;
use ratatui::style::Color;

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    GET,
    HEAD,
    POST,
    PUT,
    DELETE,
    PATCH,
    OPTIONS,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::GET,
        HttpMethod::HEAD,
        HttpMethod::POST,
        HttpMethod::PUT,
        HttpMethod::DELETE,
        HttpMethod::PATCH,
        HttpMethod::OPTIONS,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::OPTIONS => "OPTIONS",
        }
    }

    pub fn from_label(label: &str) -> Option<HttpMethod> {
        HttpMethod::ALL.into_iter().find(|m| m.as_str() == label)
    }

    /// Colour the method name is drawn in
    pub fn color(&self) -> Color {
        match self {
            HttpMethod::GET => Color::Green,
            HttpMethod::HEAD => Color::Magenta,
            HttpMethod::POST => Color::Yellow,
            HttpMethod::PUT => Color::Blue,
            HttpMethod::DELETE => Color::Red,
            HttpMethod::PATCH => Color::Cyan,
            HttpMethod::OPTIONS => Color::Rgb(0xff, 0xa5, 0x00),
        }
    }
}

/// HTTP Header
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Header {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A saved HTTP request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub name: String,
    pub method: HttpMethod,
    pub url: String,
    #[serde(default)]
    pub headers: Vec<Header>,
}

impl Request {
    /// Create a request with default method and URL. Blank names are rejected.
    pub fn new(name: impl Into<String>) -> Result<Self, CommandError> {
        let name = validate_name(name.into())?;
        Ok(Request {
            name,
            method: HttpMethod::GET,
            url: String::from(DEFAULT_HTTP_URL),
            headers: Vec::new(),
        })
    }
}

/// A named, ordered group of requests
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    #[serde(default)]
    pub requests: Vec<Request>,
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Result<Self, CommandError> {
        Ok(Collection {
            name: validate_name(name.into())?,
            requests: Vec::new(),
        })
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.requests.iter().position(|r| r.name == name)
    }
}

fn validate_name(name: String) -> Result<String, CommandError> {
    if name.trim().is_empty() {
        return Err(CommandError::InvalidName(name));
    }
    Ok(name)
}

/// Response from HTTP request
#[derive(Clone, Debug, PartialEq)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<Header>,
    pub body: Vec<u8>,
    pub elapsed_ms: u64,
}

impl Response {
    /// Body as text, pretty-printed when it parses as JSON. `None` for binary data.
    pub fn body_text(&self) -> Option<String> {
        let text = std::str::from_utf8(&self.body).ok()?;
        let formatted = match serde_json::from_str::<serde_json::Value>(text) {
            Ok(json) => serde_json::to_string_pretty(&json).unwrap_or_else(|_| text.to_string()),
            Err(_) => text.to_string(),
        };
        Some(formatted)
    }
}
