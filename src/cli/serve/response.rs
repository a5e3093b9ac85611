//! HTTP response handlers.
//!
//! Every response except the loading page carries the readiness header, so
//! a loading page polling with HEAD knows when to reload.

use std::path::Path;

use anyhow::{Result, anyhow};
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::render::READY_HEADER;
use crate::utils::mime::{self, types::{HTML, PLAIN}};

/// Respond with a generated episode page.
pub fn respond_episode(request: Request, body: String, cache_control: &str) -> Result<()> {
    let headers = vec![
        header("Content-Type", HTML)?,
        header("Cache-Control", cache_control)?,
        header(READY_HEADER, "true")?,
    ];
    send(request, 200, headers, body.into_bytes())
}

/// Respond with the loading page (episode not generated yet).
///
/// No readiness header: the page's poll keeps waiting.
pub fn respond_loading(request: Request, body: String) -> Result<()> {
    let headers = vec![
        header("Content-Type", HTML)?,
        header("Cache-Control", "no-store")?,
    ];
    send(request, 200, headers, body.into_bytes())
}

/// Respond with a fixed or generated asset, typed by its URL path.
pub fn respond_asset(request: Request, url_path: &str, body: &[u8]) -> Result<()> {
    let headers = vec![
        header("Content-Type", mime::from_path(Path::new(url_path)))?,
        header(READY_HEADER, "true")?,
    ];
    send(request, 200, headers, body.to_vec())
}

/// Respond with 404.
pub fn respond_not_found(request: Request) -> Result<()> {
    send_plain(request, 404, "404 Not Found")
}

/// Respond with 502 carrying the last generation error.
pub fn respond_generate_error(request: Request, message: &str) -> Result<()> {
    let message = crate::utils::html::escape(message);
    let body = format!(
        "<!DOCTYPE html><html><body><h1>Episode unavailable</h1><pre>{message}</pre></body></html>"
    );
    let headers = vec![
        header("Content-Type", HTML)?,
        header("Cache-Control", "no-store")?,
        header(READY_HEADER, "true")?,
    ];
    send(request, 502, headers, body.into_bytes())
}

/// Respond with 405 for anything but GET and HEAD.
pub fn respond_method_not_allowed(request: Request) -> Result<()> {
    let headers = vec![
        header("Content-Type", PLAIN)?,
        header("Allow", "GET, HEAD")?,
        header(READY_HEADER, "true")?,
    ];
    send(request, 405, headers, b"405 Method Not Allowed".to_vec())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_plain(request, 503, "503 Service Unavailable")
}

pub fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_plain(request: Request, status: u16, text: &str) -> Result<()> {
    let headers = vec![header("Content-Type", PLAIN)?, header(READY_HEADER, "true")?];
    send(request, status, headers, text.as_bytes().to_vec())
}

/// Send a response; HEAD requests get the headers only.
fn send(request: Request, status: u16, headers: Vec<Header>, body: Vec<u8>) -> Result<()> {
    let body = if is_head_request(&request) { Vec::new() } else { body };

    let mut response = Response::from_data(body).with_status_code(StatusCode(status));
    for h in headers {
        response.add_header(h);
    }
    request.respond(response)?;
    Ok(())
}

fn header(key: &str, value: &str) -> Result<Header> {
    Header::from_bytes(key.as_bytes(), value.as_bytes())
        .map_err(|()| anyhow!("invalid header {key}: {value}"))
}
