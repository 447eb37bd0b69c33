//! In-process Graylog API used by the tests.

use super::client::GraylogClient;
use super::models::*;
use crate::config::Credentials;
use crate::target::Target;

use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::get;
use axum::Router;
use std::sync::{Arc, Mutex};

pub const USER: &str = "admin";
pub const PASS: &str = "secret";
/// `admin:secret`, base64 encoded.
const EXPECTED_AUTH: &str = "Basic YWRtaW46c2VjcmV0";

/// Canned responses keyed by endpoint path.
pub struct MockGraylog {
    prefix: String,
    routes: Vec<(&'static str, StatusCode, String)>,
}

impl MockGraylog {
    /// A healthy node with the given event and failure counts, 25 msg/s
    /// throughput and two inputs.
    pub fn healthy(total_events: u64, index_failures: u64) -> Self {
        Self {
            prefix: String::new(),
            routes: vec![
                (
                    SYSTEM_PATH,
                    StatusCode::OK,
                    r#"{"facility":"graylog-server","is_processing":true,"lifecycle":"running","lb_status":"alive"}"#
                        .to_string(),
                ),
                (
                    INDEXER_FAILURES_PATH,
                    StatusCode::OK,
                    format!(r#"{{"total":{}}}"#, index_failures),
                ),
                (THROUGHPUT_PATH, StatusCode::OK, r#"{"throughput":25}"#.to_string()),
                (
                    INPUTS_PATH,
                    StatusCode::OK,
                    r#"{"inputs":[{"id":"gelf"},{"id":"syslog"}],"total":2}"#.to_string(),
                ),
                (
                    TOTAL_COUNT_PATH,
                    StatusCode::OK,
                    format!(r#"{{"events":{}}}"#, total_events),
                ),
            ],
        }
    }

    /// Serve everything below a path prefix.
    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    /// Replace the response of one endpoint.
    pub fn route(
        mut self,
        path: &'static str,
        status: StatusCode,
        body: impl Into<String>,
    ) -> Self {
        let body = body.into();
        match self.routes.iter_mut().find(|(p, _, _)| *p == path) {
            Some(route) => *route = (path, status, body),
            None => self.routes.push((path, status, body)),
        }
        self
    }

    /// Bind to an ephemeral port and serve in the background.
    pub async fn start(self) -> MockServer {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let mut router = Router::new();

        for (path, status, body) in self.routes {
            let full_path = format!("{}{}", self.prefix, path);
            let requests = requests.clone();
            let recorded = full_path.clone();

            router = router.route(
                &full_path,
                get(move |headers: HeaderMap| {
                    let body = body.clone();
                    let requests = requests.clone();
                    let recorded = recorded.clone();
                    async move {
                        requests.lock().unwrap().push(recorded);

                        let authorized = headers
                            .get(header::AUTHORIZATION)
                            .is_some_and(|v| v == EXPECTED_AUTH);
                        let wants_json = headers
                            .get(header::ACCEPT)
                            .is_some_and(|v| v == "application/json");
                        if !authorized || !wants_json {
                            let body = r#"{"type":"ApiError","message":"HTTP 401 Unauthorized"}"#;
                            return (StatusCode::UNAUTHORIZED, body.to_string());
                        }

                        (status, body)
                    }
                }),
            );
        }

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        MockServer {
            url: format!("http://{}{}", addr, self.prefix),
            requests,
        }
    }
}

/// A running mock API.
pub struct MockServer {
    pub url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockServer {
    /// Paths requested so far, in order.
    pub fn requested(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// A client with the credentials the mock accepts.
    pub fn client(&self) -> GraylogClient {
        let credentials = Credentials {
            username: USER.to_string(),
            password: PASS.to_string(),
        };
        GraylogClient::new(Target::parse(&self.url).unwrap(), credentials, false).unwrap()
    }
}
