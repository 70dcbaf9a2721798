//! Employee-facing job execution: assignment offers, the job status
//! lifecycle (assigned → started → in_progress → completed, with pauses),
//! the execution checklist, and the elapsed-time counter.

pub mod checklist;
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use checklist::{Checklist, ChecklistCategory, ChecklistItem};
pub use domain::{
    AssignedJob, CompletionSummary, JobError, JobEvent, JobId, JobStatus, Priority,
};
pub use repository::JobRepository;
pub use router::job_router;
pub use service::{ExecutionError, ExecutionService, JobAssignment, SeededJob};
