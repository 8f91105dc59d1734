//! Typed per-record outcomes for migration runs.
//!
//! Migrators never abort a batch on one bad record; instead each record's
//! fate is captured as a [`RecordOutcome`] and collected into a
//! [`MigrationReport`] so callers (and tests) can inspect created/skipped/
//! failed counts rather than scraping log output.

use serde::Serialize;

/// What happened to a single source record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "status", content = "reason")]
pub enum RecordStatus {
    /// A new target document was created.
    Created,
    /// A target document with the same slug already existed.
    Skipped,
    /// Transformation or creation failed; the record was left behind.
    Failed(String),
}

/// One record's outcome, labelled by its slug (or id when no slug exists).
#[derive(Debug, Clone, Serialize)]
pub struct RecordOutcome {
    pub label: String,
    #[serde(flatten)]
    pub status: RecordStatus,
}

/// Collected outcomes for one migration pass.
#[derive(Debug, Default, Serialize)]
pub struct MigrationReport {
    pub entity: String,
    pub outcomes: Vec<RecordOutcome>,
}

impl MigrationReport {
    #[must_use]
    pub fn new(entity: &str) -> Self {
        Self {
            entity: entity.to_string(),
            outcomes: Vec::new(),
        }
    }

    pub fn created(&mut self, label: impl Into<String>) {
        self.push(label, RecordStatus::Created);
    }

    pub fn skipped(&mut self, label: impl Into<String>) {
        self.push(label, RecordStatus::Skipped);
    }

    pub fn failed(&mut self, label: impl Into<String>, reason: impl Into<String>) {
        self.push(label, RecordStatus::Failed(reason.into()));
    }

    fn push(&mut self, label: impl Into<String>, status: RecordStatus) {
        self.outcomes.push(RecordOutcome {
            label: label.into(),
            status,
        });
    }

    #[must_use]
    pub fn created_count(&self) -> usize {
        self.count(|s| matches!(s, RecordStatus::Created))
    }

    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.count(|s| matches!(s, RecordStatus::Skipped))
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.count(|s| matches!(s, RecordStatus::Failed(_)))
    }

    /// Labels and reasons of every failed record, for summary logging.
    #[must_use]
    pub fn failures(&self) -> Vec<(&str, &str)> {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.status {
                RecordStatus::Failed(reason) => Some((o.label.as_str(), reason.as_str())),
                _ => None,
            })
            .collect()
    }

    /// One-line summary, e.g. `categories: 12 created, 3 skipped, 1 failed`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}: {} created, {} skipped, {} failed",
            self.entity,
            self.created_count(),
            self.skipped_count(),
            self.failed_count()
        )
    }

    fn count(&self, pred: impl Fn(&RecordStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }
}
