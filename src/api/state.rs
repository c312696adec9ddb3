use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::default_max_runs;
use crate::models::ActionResult;

/// Outcome of one dataset run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub results: Vec<ActionResult>,
}

impl RunReport {
    pub fn new(results: Vec<ActionResult>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            results,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<RwLock<AppStateInner>>,
}

/// Inner state that can be modified
pub struct AppStateInner {
    pub runs: HashMap<Uuid, RunReport>,
    /// Run ids, oldest first
    pub order: VecDeque<Uuid>,
    pub max_runs: usize,
}

impl AppStateInner {
    /// Stores a report, evicting the oldest ones beyond `max_runs`
    pub fn store(&mut self, report: RunReport) {
        self.order.push_back(report.id);
        self.runs.insert(report.id, report);

        while self.order.len() > self.max_runs {
            if let Some(evicted) = self.order.pop_front() {
                self.runs.remove(&evicted);
                tracing::debug!(run_id = %evicted, "Evicted run report");
            }
        }
    }

    /// Stored reports, oldest first
    pub fn reports(&self) -> impl Iterator<Item = &RunReport> {
        self.order.iter().filter_map(move |id| self.runs.get(id))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates a new empty application state
    pub fn new() -> Self {
        Self::with_max_runs(default_max_runs())
    }

    /// Creates an empty state that keeps at most `max_runs` reports
    pub fn with_max_runs(max_runs: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(AppStateInner {
                runs: HashMap::new(),
                order: VecDeque::new(),
                max_runs,
            })),
        }
    }
}
