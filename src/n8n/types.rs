/// n8n wire type definitions
///
/// Mirrors the workflow and node JSON returned by the n8n public API. Only the fields
/// this tool reads are typed; everything else is kept in `extra` so a resubmitted
/// workflow round-trips without losing data.

use crate::error::{DeployError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Node type string of n8n Code nodes
pub const CODE_NODE_TYPE: &str = "n8n-nodes-base.code";

/// Parameter holding JavaScript code
pub const JS_CODE_PARAM: &str = "jsCode";

/// Parameter holding Python code
pub const PYTHON_CODE_PARAM: &str = "pythonCode";

/// A workflow as returned by GET /api/v1/workflows/{id}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    /// Workflow identifier (e.g., "wf1")
    pub id: String,
    /// Human-readable workflow name
    pub name: String,
    /// All nodes in the workflow
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// Connection graph keyed by source node name, passed through untouched
    #[serde(default = "empty_object")]
    pub connections: Value,
    /// Workflow settings, required by the update endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
    /// Static data persisted by trigger nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_data: Option<Value>,
    /// Read-only fields (active, tags, timestamps, versionId, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single node inside a workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node UUID assigned by n8n
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Node name, unique within its workflow (e.g., "Check URL")
    pub name: String,
    /// Node type (e.g., "n8n-nodes-base.code")
    #[serde(rename = "type")]
    pub node_type: String,
    /// Node parameters; Code nodes keep their source under jsCode or pythonCode
    #[serde(default)]
    pub parameters: Map<String, Value>,
    /// position, typeVersion, credentials, ...
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Writable subset of a workflow accepted by PUT /api/v1/workflows/{id}
///
/// The public API rejects read-only properties such as id, active or tags, so
/// updates always go through this shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowUpdate {
    pub name: String,
    pub nodes: Vec<Node>,
    pub connections: Value,
    pub settings: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_data: Option<Value>,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

impl Node {
    /// Whether this node is an n8n Code node
    pub fn is_code_node(&self) -> bool {
        self.node_type == CODE_NODE_TYPE
    }

    /// Parameter the node keeps its source under
    ///
    /// Python nodes are recognised by an existing pythonCode parameter or a
    /// python* language; everything else is JavaScript.
    pub fn code_param(&self) -> &'static str {
        let is_python_language = self
            .parameters
            .get("language")
            .and_then(|l| l.as_str())
            .map(|l| l.starts_with("python"))
            .unwrap_or(false);

        if self.parameters.contains_key(PYTHON_CODE_PARAM) || is_python_language {
            PYTHON_CODE_PARAM
        } else {
            JS_CODE_PARAM
        }
    }

    /// Current code of the node, if any
    pub fn code(&self) -> Option<&str> {
        self.parameters.get(self.code_param()).and_then(|c| c.as_str())
    }

    /// Replace the node's code in place
    pub fn set_code(&mut self, source: &str) {
        let param = self.code_param();
        self.parameters
            .insert(param.to_string(), Value::String(source.to_string()));
    }
}

impl Workflow {
    /// Find a node by name
    pub fn find_node(&self, node_name: &str) -> Result<&Node> {
        self.nodes
            .iter()
            .find(|n| n.name == node_name)
            .ok_or_else(|| self.node_not_found(node_name))
    }

    /// Find a node by name and require it to be a Code node
    pub fn find_code_node(&self, node_name: &str) -> Result<&Node> {
        let node = self.find_node(node_name)?;
        if !node.is_code_node() {
            return Err(DeployError::NotCodeNode {
                node_name: node.name.clone(),
                node_type: node.node_type.clone(),
            });
        }
        Ok(node)
    }

    /// Copy of this workflow with `node_name`'s code replaced by `source`
    pub fn with_node_code(&self, node_name: &str, source: &str) -> Result<Workflow> {
        self.find_code_node(node_name)?;

        let mut updated = self.clone();
        if let Some(node) = updated.nodes.iter_mut().find(|n| n.name == node_name) {
            node.set_code(source);
        }
        Ok(updated)
    }

    /// Writable subset for the update endpoint
    pub fn to_update(&self) -> WorkflowUpdate {
        WorkflowUpdate {
            name: self.name.clone(),
            nodes: self.nodes.clone(),
            connections: self.connections.clone(),
            settings: self.settings.clone().unwrap_or_else(empty_object),
            static_data: self.static_data.clone(),
        }
    }

    fn node_not_found(&self, node_name: &str) -> DeployError {
        DeployError::NodeNotFound {
            workflow_id: self.id.clone(),
            node_name: node_name.to_string(),
        }
    }
}
