//! Proxy gateway.
//!
//! A small synchronous HTTP server (`tiny_http`) that relays prediction
//! requests to the classifier:
//!
//! - `POST /api/predict` — see [`proxy::handle_predict`]
//! - `GET /api/health` — liveness and the configured upstream URL
//!
//! Launched via `darija serve` (default: `http://127.0.0.1:3000`).
//! Requests are handled one at a time; each is independent and stateless.

pub mod proxy;

use std::io::{Cursor, Read};
use std::net::SocketAddr;

use anyhow::Result;
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::config::GatewayConfig;
use proxy::{Reply, Upstream};

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

pub struct Gateway {
    server: Server,
    upstream: Upstream,
}

impl Gateway {
    /// Bind the listening socket. Port 0 picks a free port; see
    /// [`local_addr`](Self::local_addr).
    pub fn bind(config: &GatewayConfig) -> Result<Self> {
        let server = Server::http(&config.bind)
            .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {}: {e}", config.bind))?;

        Ok(Self {
            server,
            upstream: Upstream::from_config(config),
        })
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    pub fn upstream(&self) -> &Upstream {
        &self.upstream
    }

    /// Serve requests until the process exits. A failing request is
    /// answered and logged; it never stops the loop.
    pub fn run(&self) -> Result<()> {
        for mut request in self.server.incoming_requests() {
            let method = request.method().clone();
            let url = request.url().to_string();

            let body = if matches!(method, Method::Post | Method::Put | Method::Patch) {
                let mut buf = String::new();
                let _ = request.as_reader().read_to_string(&mut buf);
                Some(buf)
            } else {
                None
            };

            let reply = dispatch(&method, &url, body.as_deref(), &self.upstream);
            let status = reply.status;
            let _ = request.respond(into_response(reply));

            println!(
                "{} {} {} {}",
                method,
                url,
                status,
                chrono::Local::now().format("%H:%M:%S")
            );
        }

        Ok(())
    }
}

/// Bind and run the gateway in the foreground.
pub fn serve(config: &GatewayConfig) -> Result<()> {
    let gateway = Gateway::bind(config)?;

    println!("darija gateway listening on http://{}", config.bind);
    println!("forwarding to {}", gateway.upstream().url());
    println!("Press Ctrl+C to stop.\n");

    gateway.run()
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

fn dispatch(method: &Method, url: &str, body: Option<&str>, upstream: &Upstream) -> Reply {
    // Strip query string for path matching
    let path = url.split('?').next().unwrap_or(url);

    match (method, path) {
        (&Method::Post, "/api/predict") => proxy::handle_predict(body.unwrap_or(""), upstream),
        (_, "/api/predict") => Reply::error(405, "method not allowed"),
        (&Method::Get, "/api/health") => Reply::ok(
            serde_json::json!({ "status": "ok", "upstream": upstream.url() }).to_string(),
        ),
        _ => Reply::error(404, "not found"),
    }
}

fn into_response(reply: Reply) -> Response<Cursor<Vec<u8>>> {
    Response::from_data(reply.body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(reply.status))
}

fn content_type_json() -> Header {
    Header::from_bytes("Content-Type", "application/json").expect("static header is valid")
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn upstream() -> Upstream {
        crate::diagnostics::logger::set_enabled(false);
        Upstream::new("http://127.0.0.1:1/predict", Duration::from_millis(200))
    }

    #[test]
    fn routes_predict_by_method() {
        let up = upstream();
        let reply = dispatch(&Method::Post, "/api/predict", Some("{}"), &up);
        assert_eq!(reply.status, 400);

        let reply = dispatch(&Method::Get, "/api/predict", None, &up);
        assert_eq!(reply.status, 405);
    }

    #[test]
    fn query_string_is_ignored() {
        let reply = dispatch(&Method::Post, "/api/predict?x=1", Some("{}"), &upstream());
        assert_eq!(reply.status, 400);
    }

    #[test]
    fn health_reports_upstream() {
        let reply = dispatch(&Method::Get, "/api/health", None, &upstream());
        assert_eq!(reply.status, 200);
        let v: serde_json::Value = serde_json::from_str(&reply.body).unwrap();
        assert_eq!(v["status"], "ok");
        assert_eq!(v["upstream"], "http://127.0.0.1:1/predict");
    }

    #[test]
    fn unknown_route_is_404() {
        let reply = dispatch(&Method::Get, "/", None, &upstream());
        assert_eq!(reply.status, 404);
        assert_eq!(reply.body, r#"{"error":"not found"}"#);
    }

    #[test]
    fn bind_on_ephemeral_port() {
        let config = GatewayConfig {
            bind: "127.0.0.1:0".to_string(),
            ..GatewayConfig::default()
        };
        let gw = Gateway::bind(&config).unwrap();
        let addr = gw.local_addr().unwrap();
        assert_ne!(addr.port(), 0);
    }
}
