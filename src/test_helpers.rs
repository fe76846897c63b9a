use std::{
    net::{SocketAddr, TcpListener},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::{Duration, Instant},
};

use actix_web::{dev::ServerHandle, web, App, HttpResponse, HttpServer};
use serde_json::{json, Value};
use url::Url;

struct FakeState {
    feed: Mutex<Value>,
    feed_hits: AtomicUsize,
    posts: Mutex<Vec<Value>>,
}

/// Local stand-ins for the feed and webhook, served by one actix-web server.
///
/// Routes: `GET /feed`, `POST /webhook`, `POST /failing-webhook` (always 500).
pub struct FakeEndpoints {
    addr: SocketAddr,
    state: web::Data<FakeState>,
    handle: ServerHandle,
}

async fn feed(state: web::Data<FakeState>) -> HttpResponse {
    state.feed_hits.fetch_add(1, Ordering::SeqCst);
    let body = state.feed.lock().unwrap().clone();
    HttpResponse::Ok().json(body)
}

async fn webhook(state: web::Data<FakeState>, body: web::Json<Value>) -> HttpResponse {
    state.posts.lock().unwrap().push(body.into_inner());
    HttpResponse::Ok().body("ok")
}

async fn failing_webhook() -> HttpResponse {
    HttpResponse::InternalServerError().body("invalid_payload")
}

impl FakeEndpoints {
    pub async fn start(feed_body: Value) -> Self {
        let state = web::Data::new(FakeState {
            feed: Mutex::new(feed_body),
            feed_hits: AtomicUsize::new(0),
            posts: Mutex::new(Vec::new()),
        });

        let app_state = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .route("/feed", web::get().to(feed))
                .route("/webhook", web::post().to(webhook))
                .route("/failing-webhook", web::post().to(failing_webhook))
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .expect("Failed to bind fake endpoint server");

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn url(&self, path: &str) -> Url {
        Url::parse(&format!("http://{}{}", self.addr, path)).expect("valid test URL")
    }

    pub fn feed_url(&self) -> Url {
        self.url("/feed")
    }

    pub fn webhook_url(&self) -> Url {
        self.url("/webhook")
    }

    pub fn set_feed(&self, body: Value) {
        *self.state.feed.lock().unwrap() = body;
    }

    pub fn feed_hits(&self) -> usize {
        self.state.feed_hits.load(Ordering::SeqCst)
    }

    pub fn posts(&self) -> Vec<Value> {
        self.state.posts.lock().unwrap().clone()
    }

    /// Polls until at least `count` posts arrived or `timeout` passes.
    pub async fn wait_for_posts(&self, count: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if self.posts().len() >= count {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.posts().len() >= count
    }
}

impl Drop for FakeEndpoints {
    fn drop(&mut self) {
        // Stopping is async; the returned future is not needed to begin shutdown.
        drop(self.handle.stop(false));
    }
}

/// Recent-changes body for `(rcid, title)` pairs, in the order given.
pub fn feed_body(entries: &[(u64, &str)]) -> Value {
    let changes: Vec<Value> = entries
        .iter()
        .map(|(rcid, title)| {
            json!({
                "type": "edit",
                "rcid": rcid,
                "title": title,
                "timestamp": "2021-01-01T12:00:00Z",
                "user": "Bar",
            })
        })
        .collect();

    json!({ "batchcomplete": "", "query": { "recentchanges": changes } })
}

/// URL on a local port nothing is listening on.
pub fn closed_port_url(path: &str) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind probe port");
    let addr = listener.local_addr().expect("probe port has an address");
    drop(listener);
    Url::parse(&format!("http://{addr}{path}")).expect("valid test URL")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_fake_endpoints_serve_and_record() {
        let fake = FakeEndpoints::start(feed_body(&[(1, "One")])).await;
        let client = reqwest::Client::new();

        let body: Value = client
            .get(fake.feed_url())
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["query"]["recentchanges"][0]["rcid"], 1);

        fake.set_feed(feed_body(&[]));
        let body: Value = client
            .get(fake.feed_url())
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["query"]["recentchanges"], json!([]));
        assert_eq!(fake.feed_hits(), 2);

        client
            .post(fake.webhook_url())
            .json(&json!({ "text": "hi" }))
            .send()
            .await
            .unwrap();
        assert!(fake.wait_for_posts(1, Duration::from_secs(1)).await);
    }
}
