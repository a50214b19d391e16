//! Outgoing replies.
//!
//! A [`Reply`] is built once per request by exactly one terminal stage of
//! the pipeline and then handed to axum for serialization.

use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;
use wms_common::mime::extension_to_type;

/// HTTP status classes the pipeline can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    BadRequest,
    InternalServerError,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::BadRequest => 400,
            Status::InternalServerError => 500,
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::BadRequest => "Bad Request",
            Status::InternalServerError => "Internal Server Error",
        }
    }
}

/// What produced a reply; used for logging and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// Rendered image.
    Image,
    /// 200 with an explanation of why no image was produced.
    Informational,
    /// Canned error page.
    Stock,
}

/// A single header. Order of insertion is the order of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: Status,
    pub kind: ReplyKind,
    pub headers: Vec<Header>,
    pub content: Vec<u8>,
}

impl Reply {
    /// Canned HTML page for an error status.
    pub fn stock(status: Status) -> Self {
        let content = format!(
            "<html><head><title>{reason}</title></head><body><h1>{code} {reason}</h1></body></html>",
            code = status.code(),
            reason = status.reason()
        );
        Self::with_html(status, ReplyKind::Stock, content)
    }

    /// A 200 reply whose body explains, in HTML, why no image was produced.
    pub fn html(message: &str) -> Self {
        let content = format!(
            "<html><head><title>tile-server</title></head><body><p>{}</p></body></html>",
            escape_html(message)
        );
        Self::with_html(Status::Ok, ReplyKind::Informational, content)
    }

    /// A 200 reply carrying encoded image bytes.
    ///
    /// Headers are `Content-Length` then `Content-Type`, the latter looked
    /// up from the image's file extension.
    pub fn image(data: Vec<u8>, extension: &str) -> Self {
        Self {
            status: Status::Ok,
            kind: ReplyKind::Image,
            headers: vec![
                Header::new("Content-Length", data.len().to_string()),
                Header::new("Content-Type", extension_to_type(extension)),
            ],
            content: data,
        }
    }

    /// First header with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// Body as text, for informational and stock replies.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.content).ok()
    }

    fn with_html(status: Status, kind: ReplyKind, content: String) -> Self {
        Self {
            status,
            kind,
            headers: vec![
                Header::new("Content-Length", content.len().to_string()),
                Header::new("Content-Type", "text/html"),
            ],
            content: content.into_bytes(),
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        let mut builder = Response::builder().status(self.status.code());
        for header in &self.headers {
            builder = builder.header(header.name.as_str(), header.value.as_str());
        }

        match builder.body(Body::from(self.content)) {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Failed to build HTTP response from reply");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
