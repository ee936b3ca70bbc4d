use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use reqwest::Url;
use tokio::sync::Semaphore;

use crate::error::{FetchError, FetchResult};

use super::transport::{HttpResponse, HttpTransport};

#[derive(Clone)]
struct Route {
    response: FetchResult<HttpResponse>,
    gate: Option<Gate>,
}

/// Holds gated responses back; each `release` lets exactly one request through.
#[derive(Clone)]
pub(crate) struct Gate(Arc<Semaphore>);

impl Gate {
    pub(crate) fn release(&self) {
        self.0.add_permits(1);
    }
}

/// Offline transport answering by URL path. Unknown paths get a 404.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    routes: Mutex<HashMap<String, Route>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, path: &str, status: u16, body: &str) {
        self.set(path, Ok(HttpResponse::new(status, body)));
    }

    pub(crate) fn fail(&self, path: &str, message: &str) {
        self.set(path, Err(FetchError::transport(message)));
    }

    /// Hold responses for `path` until the returned gate is released, once per request.
    pub(crate) fn gate(&self, path: &str) -> Gate {
        let gate = Gate(Arc::new(Semaphore::new(0)));
        let mut routes = self.routes.lock().unwrap();
        let route = routes.entry(path.to_string()).or_insert_with(|| Route {
            response: Ok(HttpResponse::new(404, "")),
            gate: None,
        });
        route.gate = Some(gate.clone());
        gate
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn set(&self, path: &str, response: FetchResult<HttpResponse>) {
        let mut routes = self.routes.lock().unwrap();
        let gate = routes.get(path).and_then(|route| route.gate.clone());
        routes.insert(path.to_string(), Route { response, gate });
    }
}

impl HttpTransport for ScriptedTransport {
    fn get<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, FetchResult<HttpResponse>> {
        self.requests.lock().unwrap().push(url.to_string());
        let route = self
            .routes
            .lock()
            .unwrap()
            .get(url.path())
            .cloned()
            .unwrap_or(Route {
                response: Ok(HttpResponse::new(404, "")),
                gate: None,
            });

        Box::pin(async move {
            if let Some(Gate(semaphore)) = route.gate {
                if let Ok(permit) = semaphore.acquire().await {
                    permit.forget();
                }
            }
            route.response
        })
    }
}
