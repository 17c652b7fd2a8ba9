//! Shared helpers: an in-process fake classifier and a gateway runner.
#![allow(dead_code)]

use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use darija_sentiment::config::GatewayConfig;
use darija_sentiment::diagnostics;
use darija_sentiment::gateway::Gateway;
use tiny_http::{Header, Response, Server};

/// Canned upstream body from the classifier contract.
pub const POSITIVE_BODY: &str =
    r#"{"positive_probability":82,"negative_probability":18,"prediction":1}"#;

/// Keep test runs out of the real diagnostic log.
pub fn quiet_logs() {
    diagnostics::logger::set_enabled(false);
}

/// A fake classifier answering every request with a fixed status and body.
pub struct FakeUpstream {
    pub url: String,
    hits: Arc<AtomicUsize>,
    bodies: Arc<Mutex<Vec<String>>>,
}

impl FakeUpstream {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<String> {
        self.bodies.lock().unwrap().clone()
    }
}

/// Start a fake classifier on an ephemeral port. `delay` is slept before
/// each response, to exercise timeouts.
pub fn spawn_upstream(status: u16, body: &'static str, delay: Duration) -> FakeUpstream {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let bodies = Arc::new(Mutex::new(Vec::new()));

    let (h, b) = (Arc::clone(&hits), Arc::clone(&bodies));
    thread::spawn(move || {
        for mut request in server.incoming_requests() {
            let mut buf = String::new();
            let _ = request.as_reader().read_to_string(&mut buf);
            b.lock().unwrap().push(buf);
            h.fetch_add(1, Ordering::SeqCst);

            thread::sleep(delay);
            let header = Header::from_bytes("Content-Type", "application/json").unwrap();
            let resp = Response::from_string(body)
                .with_status_code(status)
                .with_header(header);
            let _ = request.respond(resp);
        }
    });

    FakeUpstream {
        url: format!("http://{addr}/predict"),
        hits,
        bodies,
    }
}

pub fn spawn_ok_upstream() -> FakeUpstream {
    spawn_upstream(200, POSITIVE_BODY, Duration::ZERO)
}

/// Run a gateway on an ephemeral port forwarding to `upstream_url`.
/// Returns the gateway's `/api/predict` URL.
pub fn spawn_gateway(upstream_url: &str, timeout_ms: u64) -> String {
    let config = GatewayConfig {
        bind: "127.0.0.1:0".to_string(),
        upstream_url: upstream_url.to_string(),
        timeout_ms,
    };
    let gateway = Gateway::bind(&config).unwrap();
    let addr = gateway.local_addr().unwrap();
    thread::spawn(move || gateway.run());
    format!("http://{addr}/api/predict")
}

/// POST a raw body and return status and body, whatever the status.
pub fn post_raw(url: &str, body: &str) -> (u16, String) {
    let result = ureq::post(url)
        .set("Content-Type", "application/json")
        .send_string(body);
    match result {
        Ok(resp) => (resp.status(), resp.into_string().unwrap()),
        Err(ureq::Error::Status(code, resp)) => (code, resp.into_string().unwrap()),
        Err(e) => panic!("transport error posting to {url}: {e}"),
    }
}
