//! Workflow → step → action traversal.
//!
//! Each nesting level falls back to an empty sequence when missing or not an
//! array, so partial trees still yield whatever actions they do contain.

use crate::coerce::{non_empty_str, seq_or_empty};
use serde_json::{Map, Value as Json};

/// Workflow type code used by corrective workflows.
const FIX_WORKFLOW_TYPE: f64 = 4.0;

/// An action together with the workflow it belongs to.
pub struct ActionNode<'a> {
    pub workflow_name: &'a str,
    pub fix_flavored: bool,
    pub action: &'a Json,
}

impl<'a> ActionNode<'a> {
    /// Action name, or empty when absent.
    pub fn name(&self) -> &'a str {
        non_empty_str(self.action.get("name")).unwrap_or("")
    }

    /// Provenance label: `"<workflow> › <action>"` with generic placeholders.
    pub fn source_label(&self) -> String {
        let wf = if self.workflow_name.is_empty() {
            "Workflow"
        } else {
            self.workflow_name
        };
        let name = self.name();
        let action = if name.is_empty() { "Action" } else { name };
        format!("{} › {}", wf, action)
    }
}

/// A workflow is fix-flavored when named `Fix` or typed `4`.
pub fn is_fix_workflow(workflow: &Json) -> bool {
    let named_fix = non_empty_str(workflow.get("name")) == Some("Fix");
    let typed_fix = workflow.get("type").and_then(Json::as_f64) == Some(FIX_WORKFLOW_TYPE);
    named_fix || typed_fix
}

/// Flatten `result.workflowLogs` into actions in traversal order.
pub fn actions(result: &Map<String, Json>) -> Vec<ActionNode<'_>> {
    let mut out = Vec::new();
    for wf in seq_or_empty(result.get("workflowLogs")) {
        let workflow_name = non_empty_str(wf.get("name")).unwrap_or("");
        let fix_flavored = is_fix_workflow(wf);
        for step in seq_or_empty(wf.get("steps")) {
            for action in seq_or_empty(step.get("actions")) {
                out.push(ActionNode {
                    workflow_name,
                    fix_flavored,
                    action,
                });
            }
        }
    }
    out
}
