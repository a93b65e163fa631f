//! Per-stage records collected during a build.

use crate::core::{BuilderOutput, StageKind, StageStatus};
use crate::utils::{elapsed_ms, generate_run_id, Timestamp};
use chrono::Utc;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use uuid::Uuid;

/// Timing and status of one executed stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageRecord {
    /// Which stage ran.
    pub stage: StageKind,
    /// How it settled.
    pub status: StageStatus,
    /// Wall time in milliseconds.
    pub duration_ms: f64,
}

/// Everything a build observed, alongside its outcome.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    /// Identifier of this run.
    pub run_id: Uuid,
    /// When the run started.
    pub started_at: Timestamp,
    /// Total wall time in milliseconds.
    pub duration_ms: f64,
    /// The resolved output directory, if the run got that far and one was set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Executed stages in order.
    pub stages: Vec<StageRecord>,
    /// The outcome handed to the host.
    pub output: BuilderOutput,
}

impl BuildReport {
    /// Returns true if the build succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.output.is_success()
    }

    /// The kinds of the executed stages, in order.
    #[must_use]
    pub fn executed(&self) -> Vec<StageKind> {
        self.stages.iter().map(|r| r.stage).collect()
    }

    /// The record of `stage`, if it ran.
    #[must_use]
    pub fn stage(&self, stage: StageKind) -> Option<&StageRecord> {
        self.stages.iter().find(|r| r.stage == stage)
    }

    /// The stage that failed, if any.
    #[must_use]
    pub fn failed_stage(&self) -> Option<StageKind> {
        self.stages
            .iter()
            .find(|r| r.status == StageStatus::Fail)
            .map(|r| r.stage)
    }
}

/// Accumulates records until the outcome is known.
#[derive(Debug)]
pub(crate) struct ReportRecorder {
    run_id: Uuid,
    started_at: Timestamp,
    start: Instant,
    output_dir: Option<PathBuf>,
    stages: Vec<StageRecord>,
}

impl ReportRecorder {
    pub(crate) fn new() -> Self {
        Self {
            run_id: generate_run_id(),
            started_at: Utc::now(),
            start: Instant::now(),
            output_dir: None,
            stages: Vec::new(),
        }
    }

    pub(crate) fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub(crate) fn set_output_dir(&mut self, output_dir: Option<PathBuf>) {
        self.output_dir = output_dir;
    }

    pub(crate) fn record(&mut self, stage: StageKind, status: StageStatus, started: Instant) {
        self.stages.push(StageRecord {
            stage,
            status,
            duration_ms: elapsed_ms(started),
        });
    }

    pub(crate) fn finish(self, output: BuilderOutput) -> BuildReport {
        BuildReport {
            run_id: self.run_id,
            started_at: self.started_at,
            duration_ms: elapsed_ms(self.start),
            output_dir: self.output_dir,
            stages: self.stages,
            output,
        }
    }
}
