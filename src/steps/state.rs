//! Persisted resume cursor for an in-flight release.
//!
//! Written before the first external step and advanced after every step that
//! succeeds. Removed once the whole plan has run.

use crate::error::{ReleaseError, Result};
use crate::fs::write_atomic;
use crate::steps::plan::ReleasePlan;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseState {
    /// Target version of the interrupted release.
    pub version: String,
    /// Commands of the plan, in order.
    pub steps: Vec<String>,
    /// Number of leading steps that finished successfully.
    pub completed: usize,
}

impl ReleaseState {
    pub fn new(plan: &ReleasePlan) -> Self {
        Self {
            version: plan.version().to_string(),
            steps: plan.commands(),
            completed: 0,
        }
    }

    /// Loads the state, or `None` if no release is in progress.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)?;
        let state: Self = serde_json::from_str(&content)?;
        log::debug!(
            "Loaded release state for v{} ({}/{} steps done)",
            state.version,
            state.completed,
            state.steps.len()
        );
        Ok(Some(state))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        write_atomic(path, &json)
    }

    pub fn remove(path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Ensures `plan` is the plan this state was recorded for.
    pub fn check_plan(&self, plan: &ReleasePlan) -> Result<()> {
        let requested = plan.version().to_string();
        if self.version != requested {
            return Err(ReleaseError::StateMismatch {
                recorded: self.version.clone(),
                requested,
            });
        }

        let current = plan.commands();
        if self.steps != current {
            return Err(ReleaseError::PlanChanged {
                recorded: self.steps.join(", "),
                current: current.join(", "),
            });
        }

        Ok(())
    }
}
