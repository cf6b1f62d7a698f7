#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use arc_auth::SessionGateway;
use arc_config::ArcConfig;
use arc_core::{Principal, Subscription};
use arc_discovery::{DiscoveryContext, DiscoveryManager};
use arc_rest::{RestClient, RestError};
use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::runtime::Handle;

pub const TENANT: &str = "t-1";

#[derive(Clone)]
pub enum Reply {
    Body(String),
    Status(u16),
    Slow(Duration, String),
}

/// `RestClient` that answers by URL substring. A route with several queued
/// replies hands them out in order and then repeats the last one.
#[derive(Default)]
pub struct StubRest {
    routes: Mutex<Vec<(String, VecDeque<Reply>)>>,
    hits: AtomicUsize,
}

impl StubRest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, pattern: &str, reply: Reply) -> Self {
        self.push(pattern, reply);
        self
    }

    pub fn push(&self, pattern: &str, reply: Reply) {
        let mut routes = self.routes.lock().unwrap();
        match routes.iter_mut().find(|(p, _)| p == pattern) {
            Some((_, queue)) => queue.push_back(reply),
            None => routes.push((pattern.to_string(), VecDeque::from([reply]))),
        }
    }

    pub fn replace(&self, pattern: &str, reply: Reply) {
        let mut routes = self.routes.lock().unwrap();
        match routes.iter_mut().find(|(p, _)| p == pattern) {
            Some((_, queue)) => {
                queue.clear();
                queue.push_back(reply);
            }
            None => routes.push((pattern.to_string(), VecDeque::from([reply]))),
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    fn next_reply(&self, url: &str) -> Option<Reply> {
        let mut routes = self.routes.lock().unwrap();
        let (_, queue) = routes.iter_mut().find(|(p, _)| url.contains(p.as_str()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl RestClient for StubRest {
    async fn get(&self, _subscription: &Subscription, url: &str) -> Result<String, RestError> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        match self.next_reply(url) {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Status(status)) => Err(RestError::Api {
                status,
                message: format!("stub status for {url}"),
            }),
            Some(Reply::Slow(delay, body)) => {
                tokio::time::sleep(delay).await;
                Ok(body)
            }
            None => Err(RestError::Api {
                status: 404,
                message: format!("no stub route for {url}"),
            }),
        }
    }
}

/// Route pattern matching the workspace listing of one subscription.
pub fn workspaces_of(subscription_id: &str) -> String {
    format!("/subscriptions/{subscription_id}/providers/")
}

/// Route pattern matching the compute listing of one workspace.
pub fn computes_of(workspace: &str) -> String {
    format!("/workspaces/{workspace}/sparkComputes")
}

/// Route pattern matching the compute listing of one workspace in one resource group.
pub fn computes_in(group: &str, workspace: &str) -> String {
    format!("/resourceGroups/{group}/providers/Microsoft.ProjectArcadia/workspaces/{workspace}/sparkComputes")
}

pub fn workspace_json(subscription_id: &str, name: &str, state: &str) -> Value {
    workspace_json_in(subscription_id, "rg", name, state)
}

pub fn workspace_json_in(subscription_id: &str, group: &str, name: &str, state: &str) -> Value {
    json!({
        "id": format!(
            "/subscriptions/{subscription_id}/resourceGroups/{group}/providers/Microsoft.ProjectArcadia/workspaces/{name}"
        ),
        "name": name,
        "location": "westus2",
        "properties": { "state": state }
    })
}

pub fn pool_json(name: &str, state: &str) -> Value {
    json!({
        "id": format!("pool-{name}"),
        "name": name,
        "properties": { "state": state, "nodeSize": "Medium", "nodeCount": 3 }
    })
}

pub fn list(items: Vec<Value>) -> String {
    json!({ "items": items }).to_string()
}

pub fn subscriptions(ids: &[&str]) -> Vec<Subscription> {
    ids.iter().map(|id| Subscription::new(*id, TENANT)).collect()
}

pub struct Harness {
    pub auth: Arc<SessionGateway>,
    pub rest: Arc<StubRest>,
    pub manager: DiscoveryManager,
}

/// Signed-in session with `subscription_ids` selected. Must run inside a runtime.
pub fn harness(rest: StubRest, subscription_ids: &[&str]) -> Harness {
    harness_with(ArcConfig::default(), rest, subscription_ids)
}

pub fn harness_with(config: ArcConfig, rest: StubRest, subscription_ids: &[&str]) -> Harness {
    let auth = Arc::new(SessionGateway::signed_out());
    auth.sign_in(Principal::new("dev@contoso.com", TENANT), "opaque-token");
    auth.select_subscriptions(subscriptions(subscription_ids));

    let rest = Arc::new(rest);
    let ctx = DiscoveryContext::new(auth.clone(), rest.clone(), &config, Handle::current());
    Harness {
        auth,
        rest,
        manager: DiscoveryManager::new(ctx),
    }
}

pub fn pool_names(manager: &DiscoveryManager) -> Vec<String> {
    manager
        .current_clusters()
        .into_iter()
        .map(|compute| compute.name)
        .collect()
}

pub fn workspace_names(manager: &DiscoveryManager) -> Vec<String> {
    manager
        .snapshot()
        .iter()
        .map(|workspace| workspace.name().to_string())
        .collect()
}

/// In-memory sink for a `tracing_subscriber::fmt` layer.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogCapture {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
