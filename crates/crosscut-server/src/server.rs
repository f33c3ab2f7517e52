//! Synchronous HTTP front-end.
//!
//! One request is handled start to finish on the accept thread;
//! locators within a request are processed sequentially. A client
//! that disconnects does not cancel in-flight rendering.

use std::path::Path;

use anyhow::{anyhow, Result};
use tiny_http::{Header, Method, Response, Server};
use tracing::{info, warn};

use crate::handler;

/// Bind and serve until the process is terminated.
pub fn run(host: &str, port: u16, base_dir: &Path) -> Result<()> {
    let addr = format!("{}:{}", host, port);
    let server = Server::http(&addr).map_err(|e| anyhow!("failed to bind {}: {}", addr, e))?;

    info!("listening on http://{}", addr);
    info!("base directory: {:?}", base_dir);

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let (status, body) = dispatch(&method, &url, &mut request, base_dir);

        info!("{} {} -> {}", method, url, status);

        let response = json_response(status, &body);
        if let Err(e) = request.respond(response) {
            warn!("failed to send response for {} {}: {}", method, url, e);
        }
    }

    Ok(())
}

fn dispatch(
    method: &Method,
    url: &str,
    request: &mut tiny_http::Request,
    base_dir: &Path,
) -> (u16, serde_json::Value) {
    match (method, url) {
        // CORS preflight for browser clients.
        (Method::Options, _) => (204, serde_json::Value::Null),

        (Method::Post, "/slice") => {
            let mut body = String::new();
            if request.as_reader().read_to_string(&mut body).is_err() {
                return (
                    400,
                    serde_json::json!({"error": "Invalid JSON payload"}),
                );
            }
            handler::handle_slice(&body, base_dir)
        }

        (_, "/slice") => (
            405,
            serde_json::json!({"error": "Method not allowed, use POST"}),
        ),

        _ => (404, serde_json::json!({"error": "Not found"})),
    }
}

/// Build a JSON response with CORS headers on every reply.
fn json_response(status: u16, body: &serde_json::Value) -> Response<std::io::Cursor<Vec<u8>>> {
    let payload = if body.is_null() {
        Vec::new()
    } else {
        body.to_string().into_bytes()
    };

    let mut response = Response::from_data(payload).with_status_code(status);
    for (name, value) in [
        ("Content-Type", "application/json"),
        ("Access-Control-Allow-Origin", "*"),
        ("Access-Control-Allow-Methods", "POST, OPTIONS"),
        ("Access-Control-Allow-Headers", "Content-Type"),
    ] {
        if let Ok(header) = Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            response.add_header(header);
        }
    }

    response
}
