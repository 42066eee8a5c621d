// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use http::{Request, Response};
use http_body_util::BodyExt;
use kube::client::Body;
use kube::Client;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

#[derive(Clone)]
enum MockBody {
    Fixed(String),
    /// Respond with the request body, as the API server does for create/replace
    Echo,
}

#[derive(Clone)]
struct MockResponse {
    status: u16,
    body: MockBody,
}

/// One request seen by the mock, recorded for assertions after the fact.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

/// A mock HTTP service that returns predefined responses based on request
/// method and path. Responses registered for the same route are served in
/// order; the last one sticks for any further requests.
#[derive(Clone)]
pub struct MockService {
    routes: Arc<Mutex<HashMap<(String, String), VecDeque<MockResponse>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            routes: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.push(
            "GET",
            path,
            MockResponse {
                status,
                body: MockBody::Fixed(body.to_string()),
            },
        );
        self
    }

    /// Add a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.push(
            "POST",
            path,
            MockResponse {
                status,
                body: MockBody::Fixed(body.to_string()),
            },
        );
        self
    }

    /// Add a response for POST requests that echoes the request body back
    pub fn on_post_echo(self, path: &str, status: u16) -> Self {
        self.push(
            "POST",
            path,
            MockResponse {
                status,
                body: MockBody::Echo,
            },
        );
        self
    }

    /// Add a response for PUT requests matching the exact path
    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.push(
            "PUT",
            path,
            MockResponse {
                status,
                body: MockBody::Fixed(body.to_string()),
            },
        );
        self
    }

    /// Add a response for PUT requests that echoes the request body back
    pub fn on_put_echo(self, path: &str, status: u16) -> Self {
        self.push(
            "PUT",
            path,
            MockResponse {
                status,
                body: MockBody::Echo,
            },
        );
        self
    }

    /// Build a kube Client from this mock service. Clone the service first to
    /// keep a handle for inspecting recorded requests.
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    /// All requests seen so far whose method matches and whose path starts
    /// with the given prefix.
    pub fn requests_matching(&self, method: &str, path_prefix: &str) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.path.starts_with(path_prefix))
            .cloned()
            .collect()
    }

    fn push(&self, method: &str, path: &str, response: MockResponse) {
        self.routes
            .lock()
            .unwrap()
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back(response);
    }

    fn take_response(&self, method: &str, path: &str) -> Option<MockResponse> {
        let mut routes = self.routes.lock().unwrap();

        // Try exact match first, then prefix match for named subpaths
        let key = routes
            .keys()
            .find(|(m, p)| m == method && p == path)
            .or_else(|| routes.keys().find(|(m, p)| m == method && path.starts_with(p)))
            .cloned()?;

        let queue = routes.get_mut(&key)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let service = self.clone();
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        Box::pin(async move {
            let request_body = req
                .into_body()
                .collect()
                .await
                .map(|collected| collected.to_bytes())
                .unwrap_or_default();
            let request_body = String::from_utf8_lossy(&request_body).into_owned();

            service.requests.lock().unwrap().push(RecordedRequest {
                method: method.clone(),
                path: path.clone(),
                body: request_body.clone(),
            });

            match service.take_response(&method, &path) {
                Some(response) => {
                    let body = match response.body {
                        MockBody::Fixed(body) => body,
                        MockBody::Echo => request_body,
                    };
                    Ok(Response::builder()
                        .status(response.status)
                        .header("content-type", "application/json")
                        .body(Body::from(body.into_bytes()))
                        .unwrap())
                }
                None => {
                    // Default 404 for unmatched requests
                    let body = r#"{"kind":"Status","apiVersion":"v1","status":"Failure","message":"not found","reason":"NotFound","code":404}"#;
                    Ok(Response::builder()
                        .status(404)
                        .header("content-type", "application/json")
                        .body(Body::from(body.as_bytes().to_vec()))
                        .unwrap())
                }
            }
        })
    }
}

/// Create a mock namespace JSON response
pub fn namespace_json(name: &str) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Namespace",
        "metadata": {
            "name": name,
            "uid": "test-uid"
        }
    })
    .to_string()
}

/// Create a mock service account JSON response
pub fn service_account_json(name: &str, namespace: &str) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "ServiceAccount",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": "test-uid"
        }
    })
    .to_string()
}

/// Create a mock deployment JSON response with a single container
pub fn deployment_json(name: &str, namespace: &str, image: &str, resource_version: &str) -> String {
    serde_json::json!({
        "apiVersion": "apps/v1",
        "kind": "Deployment",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": "test-uid",
            "resourceVersion": resource_version
        },
        "spec": {
            "selector": { "matchLabels": { "app": name } },
            "template": {
                "metadata": { "labels": { "app": name } },
                "spec": { "containers": [ { "name": name, "image": image } ] }
            }
        }
    })
    .to_string()
}
