//! Workflow history model
//!
//! A [`WorkflowHistory`] is the append-only log of actions applied to an
//! image. Each [`WorkflowStep`] pairs a human-readable name with a script
//! expression that reproduces the action when replayed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded action
///
/// Steps are immutable once created; the history takes ownership on append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStep {
    name: String,
    script: String,
    timestamp: DateTime<Utc>,
}

impl WorkflowStep {
    /// Creates a step that can be replayed through `script`
    pub fn scriptable(name: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            script: script.into(),
            timestamp: Utc::now(),
        }
    }

    /// Human-readable label
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replay expression
    pub fn script(&self) -> &str {
        &self.script
    }

    /// When the step was recorded
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Append-only log of workflow steps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkflowHistory {
    steps: Vec<WorkflowStep>,
}

impl WorkflowHistory {
    /// Creates an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step, taking ownership of it
    pub fn add_step(&mut self, step: WorkflowStep) {
        tracing::debug!(step = %step.name, script = %step.script, "Workflow step added");
        self.steps.push(step);
    }

    /// All steps in recording order
    pub fn steps(&self) -> &[WorkflowStep] {
        &self.steps
    }

    /// Most recent step
    pub fn last(&self) -> Option<&WorkflowStep> {
        self.steps.last()
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Renders the history as a script, one expression per line
    pub fn to_script(&self) -> String {
        let mut script = String::new();
        for step in &self.steps {
            script.push_str(&step.script);
            script.push('\n');
        }
        script
    }
}
