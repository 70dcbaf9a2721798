use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::checklist::Checklist;
use crate::marketplace::scheduling::domain::OrderId;

/// Identifier wrapper for assigned jobs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Urgency flag shown on the employee schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Baixa",
            Self::Medium => "Média",
            Self::High => "Alta",
        }
    }
}

/// Employee-visible job lifecycle, tracked independently of the client order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Assigned,
    Started,
    InProgress,
    Paused,
    Completed,
}

impl JobStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Assigned => "Atribuído",
            Self::Started => "Iniciado",
            Self::InProgress => "Em Andamento",
            Self::Paused => "Pausado",
            Self::Completed => "Concluído",
        }
    }

    /// Transition table for the job lifecycle. Anything not listed is
    /// rejected and leaves the state unchanged.
    pub fn apply(self, event: JobEvent) -> Result<Self, JobError> {
        match (self, event) {
            (Self::Assigned, JobEvent::Start) => Ok(Self::Started),
            (Self::Started | Self::InProgress, JobEvent::Pause) => Ok(Self::Paused),
            (Self::Paused, JobEvent::Resume) => Ok(Self::InProgress),
            (Self::Started | Self::InProgress | Self::Paused, JobEvent::Complete) => {
                Ok(Self::Completed)
            }
            (from, event) => Err(JobError::InvalidTransition { from, event }),
        }
    }

    /// Whether the elapsed-time counter accumulates in this state.
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Started | Self::InProgress)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Events that drive the job lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobEvent {
    Start,
    Pause,
    Resume,
    Complete,
}

impl JobEvent {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for JobEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error raised by job-level operations.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("job cannot move from '{from}' via '{event}'")]
    InvalidTransition { from: JobStatus, event: JobEvent },
    #[error("{remaining} checklist item(s) still open; completing requires explicit confirmation")]
    ChecklistIncomplete { remaining: usize },
    #[error("checklist item '{0}' not found")]
    ChecklistItemNotFound(String),
    #[error("assignment '{0}' no longer accepts an accept/decline response")]
    OfferClosed(JobId),
}

/// Timestamps captured when a job completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletionSummary {
    pub completed_at: DateTime<Utc>,
    pub elapsed_seconds: u64,
}

/// The employee-side view of an order: execution fields, checklist, timers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedJob {
    pub id: JobId,
    pub order_id: OrderId,
    pub client_name: String,
    pub client_phone: String,
    pub address: String,
    pub scheduled_date: NaiveDate,
    pub time_slot: String,
    pub priority: Priority,
    pub description: String,
    pub status: JobStatus,
    pub can_accept_decline: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub elapsed_seconds: u64,
    pub pause_reason: Option<String>,
    pub completion_notes: Option<String>,
    pub checklist: Checklist,
}

impl AssignedJob {
    /// Begin work: records the start timestamp and resets the counter.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), JobError> {
        self.status = self.status.apply(JobEvent::Start)?;
        self.started_at = Some(now);
        self.elapsed_seconds = 0;
        Ok(())
    }

    /// Pause with an optional free-text reason; the reason is not validated.
    pub fn pause(&mut self, reason: Option<String>) -> Result<(), JobError> {
        self.status = self.status.apply(JobEvent::Pause)?;
        self.pause_reason = reason;
        Ok(())
    }

    /// Resume a paused job; the elapsed counter keeps its accumulated value.
    pub fn resume(&mut self) -> Result<(), JobError> {
        self.status = self.status.apply(JobEvent::Resume)?;
        self.pause_reason = None;
        Ok(())
    }

    /// Finish the job. An incomplete checklist is a soft gate: the caller is
    /// warned and must pass `confirm_incomplete` to proceed anyway.
    pub fn complete(
        &mut self,
        now: DateTime<Utc>,
        notes: Option<String>,
        confirm_incomplete: bool,
    ) -> Result<CompletionSummary, JobError> {
        let next = self.status.apply(JobEvent::Complete)?;

        let remaining = self.checklist.remaining_count();
        if remaining > 0 && !confirm_incomplete {
            return Err(JobError::ChecklistIncomplete { remaining });
        }

        self.status = next;
        self.completed_at = Some(now);
        self.completion_notes = notes;
        self.pause_reason = None;
        Ok(CompletionSummary {
            completed_at: now,
            elapsed_seconds: self.elapsed_seconds,
        })
    }

    /// Flip a checklist item and return the new progress percentage. The
    /// first interaction after starting promotes the job to in_progress.
    pub fn toggle_item(&mut self, item_id: &str) -> Result<f32, JobError> {
        let progress = self
            .checklist
            .toggle(item_id)
            .ok_or_else(|| JobError::ChecklistItemNotFound(item_id.to_string()))?;

        if self.status == JobStatus::Started {
            self.status = JobStatus::InProgress;
        }
        Ok(progress)
    }

    /// Advance the elapsed-time counter by one second while running.
    /// Returns whether the counter moved.
    pub fn tick(&mut self) -> bool {
        if self.status.is_running() {
            self.elapsed_seconds += 1;
            true
        } else {
            false
        }
    }

    pub fn progress_percentage(&self) -> f32 {
        self.checklist.progress_percentage()
    }
}
