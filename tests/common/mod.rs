#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use snipdeploy::error::{DeployError, Result};
use snipdeploy::n8n::{Workflow, WorkflowApi, WorkflowUpdate};
use snipdeploy::snippet::registry::parse_registry;
use snipdeploy::Registry;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const API_KEY: &str = "test-api-key";

/// A workflow with a Python Code node named `node_name` holding `code`
pub fn workflow_json(id: &str, node_name: &str, code: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Workflow {id}"),
        "active": false,
        "createdAt": "2026-01-01T00:00:00.000Z",
        "updatedAt": "2026-01-01T00:00:00.000Z",
        "tags": [],
        "nodes": [
            {
                "id": "trigger",
                "name": "Manual Trigger",
                "type": "n8n-nodes-base.manualTrigger",
                "typeVersion": 1,
                "position": [0, 0],
                "parameters": {}
            },
            {
                "id": "code",
                "name": node_name,
                "type": "n8n-nodes-base.code",
                "typeVersion": 2,
                "position": [220, 0],
                "parameters": {"language": "python", "pythonCode": code}
            }
        ],
        "connections": {
            "Manual Trigger": {"main": [[{"node": node_name, "type": "main", "index": 0}]]}
        },
        "settings": {"executionOrder": "v1"},
        "staticData": null
    })
}

pub fn workflow(id: &str, node_name: &str, code: &str) -> Workflow {
    serde_json::from_value(workflow_json(id, node_name, code)).unwrap()
}

// ---------------------------------------------------------------------------
// Snippet workspace on disk
// ---------------------------------------------------------------------------

/// Temporary repository root with a snippets/ directory
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("snippets")).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &std::path::Path {
        self.dir.path()
    }

    pub fn write(&self, rel: &str, content: &str) {
        std::fs::write(self.dir.path().join(rel), content).unwrap();
    }

    /// Write a registry JSON file and return its path
    pub fn write_registry(&self, json: &str) -> std::path::PathBuf {
        let path = self.dir.path().join("snippets/snippet_registry.json");
        std::fs::write(&path, json).unwrap();
        path
    }
}

pub fn registry(json: &str) -> Registry {
    parse_registry(std::path::Path::new("registry.json"), json).unwrap()
}

// ---------------------------------------------------------------------------
// In-memory WorkflowApi
// ---------------------------------------------------------------------------

/// Records every call; workflows listed in `failing` answer GET with HTTP 500
#[derive(Default)]
pub struct FakeApi {
    workflows: Mutex<HashMap<String, Workflow>>,
    failing: Mutex<HashSet<String>>,
    pub gets: Mutex<Vec<String>>,
    pub puts: Mutex<Vec<(String, WorkflowUpdate)>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workflow(self, wf: Workflow) -> Self {
        self.workflows.lock().unwrap().insert(wf.id.clone(), wf);
        self
    }

    pub fn failing(self, workflow_id: &str) -> Self {
        self.failing.lock().unwrap().insert(workflow_id.to_string());
        self
    }

    pub fn get_count(&self) -> usize {
        self.gets.lock().unwrap().len()
    }

    pub fn put_count(&self) -> usize {
        self.puts.lock().unwrap().len()
    }

    pub fn total_calls(&self) -> usize {
        self.get_count() + self.put_count()
    }

    pub fn put_ids(&self) -> Vec<String> {
        self.puts.lock().unwrap().iter().map(|(id, _)| id.clone()).collect()
    }
}

#[async_trait]
impl WorkflowApi for FakeApi {
    async fn get_workflow(&self, workflow_id: &str) -> Result<Workflow> {
        self.gets.lock().unwrap().push(workflow_id.to_string());
        if self.failing.lock().unwrap().contains(workflow_id) {
            return Err(DeployError::Remote {
                status: 500,
                body: "internal server error".to_string(),
            });
        }
        self.workflows
            .lock()
            .unwrap()
            .get(workflow_id)
            .cloned()
            .ok_or_else(|| DeployError::NotFound(workflow_id.to_string()))
    }

    async fn put_workflow(&self, workflow_id: &str, update: &WorkflowUpdate) -> Result<Workflow> {
        self.puts
            .lock()
            .unwrap()
            .push((workflow_id.to_string(), update.clone()));

        let mut workflows = self.workflows.lock().unwrap();
        let wf = workflows
            .get_mut(workflow_id)
            .ok_or_else(|| DeployError::NotFound(workflow_id.to_string()))?;
        wf.nodes = update.nodes.clone();
        Ok(wf.clone())
    }
}

// ---------------------------------------------------------------------------
// Fake n8n HTTP server
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct ServerState {
    pub workflows: HashMap<String, Value>,
    pub put_bodies: Vec<(String, Value)>,
    pub get_count: usize,
    /// Workflow ids whose PUT answers with the given status and body
    pub put_failures: HashMap<String, (u16, String)>,
}

pub type Shared = Arc<Mutex<ServerState>>;

/// Local stand-in for the n8n public API on 127.0.0.1
pub struct FakeN8n {
    pub base_url: String,
    pub state: Shared,
}

impl FakeN8n {
    pub async fn start(workflows: Vec<Value>) -> Self {
        let mut state = ServerState::default();
        for wf in workflows {
            let id = wf["id"].as_str().unwrap().to_string();
            state.workflows.insert(id, wf);
        }
        let state: Shared = Arc::new(Mutex::new(state));

        let app = Router::new()
            .route("/api/v1/workflows/{id}", get(get_workflow).put(put_workflow))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn fail_put(&self, workflow_id: &str, status: u16, body: &str) {
        self.state
            .lock()
            .unwrap()
            .put_failures
            .insert(workflow_id.to_string(), (status, body.to_string()));
    }

    pub fn put_bodies(&self) -> Vec<(String, Value)> {
        self.state.lock().unwrap().put_bodies.clone()
    }

    pub fn get_count(&self) -> usize {
        self.state.lock().unwrap().get_count
    }

    pub fn stored(&self, workflow_id: &str) -> Value {
        self.state.lock().unwrap().workflows[workflow_id].clone()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("x-n8n-api-key")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == API_KEY)
        .unwrap_or(false)
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({"message": "unauthorized"}))).into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"message": "Not Found"}))).into_response()
}

async fn get_workflow(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    state.get_count += 1;
    match state.workflows.get(&id) {
        Some(wf) => Json(wf.clone()).into_response(),
        None => not_found(),
    }
}

async fn put_workflow(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    state.put_bodies.push((id.clone(), body.clone()));

    if let Some((status, message)) = state.put_failures.get(&id).cloned() {
        let status = StatusCode::from_u16(status).unwrap();
        return (status, Json(json!({"message": message}))).into_response();
    }

    // The public API only accepts the writable workflow fields
    let allowed = ["name", "nodes", "connections", "settings", "staticData"];
    if let Some(extra) = body
        .as_object()
        .and_then(|obj| obj.keys().find(|k| !allowed.contains(&k.as_str())))
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": format!("request/body must NOT have additional properties ({extra})")})),
        )
            .into_response();
    }

    let Some(stored) = state.workflows.get_mut(&id) else {
        return not_found();
    };
    for key in ["name", "nodes", "connections", "settings"] {
        if let Some(value) = body.get(key) {
            stored[key] = value.clone();
        }
    }
    Json(stored.clone()).into_response()
}
