use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use super::checklist::Checklist;
use super::domain::{AssignedJob, CompletionSummary, JobError, JobId, JobStatus, Priority};
use super::repository::JobRepository;
use crate::marketplace::scheduling::domain::{OrderEvent, OrderId, OrderTransitionError};
use crate::marketplace::scheduling::repository::{OrderRepository, RepositoryError};

/// Input for creating an assignment offer from a scheduled order.
#[derive(Debug, Clone)]
pub struct JobAssignment {
    pub order_id: OrderId,
    pub professional: String,
    pub client_name: String,
    pub client_phone: String,
    pub priority: Priority,
    pub description: String,
}

/// Service composing the job store and the order store so employee actions
/// drive the client-facing order lifecycle.
pub struct ExecutionService<J, R> {
    jobs: Arc<J>,
    orders: Arc<R>,
}

static JOB_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_job_id() -> JobId {
    let id = JOB_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    JobId(format!("job-{id:06}"))
}

impl<J, R> ExecutionService<J, R>
where
    J: JobRepository + 'static,
    R: OrderRepository + 'static,
{
    pub fn new(jobs: Arc<J>, orders: Arc<R>) -> Self {
        Self { jobs, orders }
    }

    /// Offer an order to a professional. The job carries the standard
    /// checklist and stays an open offer until accepted or declined.
    pub fn assign(&self, assignment: JobAssignment) -> Result<AssignedJob, ExecutionError> {
        let order = self
            .orders
            .fetch(&assignment.order_id)?
            .ok_or(RepositoryError::NotFound)?;

        let job = AssignedJob {
            id: next_job_id(),
            order_id: order.id.clone(),
            client_name: assignment.client_name,
            client_phone: assignment.client_phone,
            address: order.address.clone(),
            scheduled_date: order.date,
            time_slot: order.time_slot.clone(),
            priority: assignment.priority,
            description: assignment.description,
            status: JobStatus::Assigned,
            can_accept_decline: true,
            started_at: None,
            completed_at: None,
            elapsed_seconds: 0,
            pause_reason: None,
            completion_notes: None,
            checklist: Checklist::standard_residential(),
        };

        let stored = self.jobs.insert(job)?;

        let mut order = order;
        order.assigned_professional = Some(assignment.professional);
        self.orders.update(order)?;

        info!(job_id = %stored.id, order_id = %stored.order_id, "job offered");
        Ok(stored)
    }

    /// Accept an open offer; the linked client order becomes confirmed.
    pub fn accept(&self, job_id: &JobId) -> Result<AssignedJob, ExecutionError> {
        let mut job = self.load(job_id)?;
        if !job.can_accept_decline {
            return Err(JobError::OfferClosed(job.id).into());
        }

        job.can_accept_decline = false;
        self.advance_order(&job.order_id, OrderEvent::Confirm)?;
        self.jobs.update(job.clone())?;

        info!(job_id = %job.id, "offer accepted");
        Ok(job)
    }

    /// Decline an open offer; the job leaves the employee's queue and the
    /// order stays pending for reassignment.
    pub fn decline(&self, job_id: &JobId) -> Result<(), ExecutionError> {
        let job = self.load(job_id)?;
        if !job.can_accept_decline {
            return Err(JobError::OfferClosed(job.id).into());
        }

        // Remove first; the order keeps its professional until the offer is
        // actually gone.
        self.jobs.remove(job_id)?;

        let mut order = self
            .orders
            .fetch(&job.order_id)?
            .ok_or(RepositoryError::NotFound)?;
        order.assigned_professional = None;
        self.orders.update(order)?;

        info!(job_id = %job.id, "offer declined");
        Ok(())
    }

    /// Begin work; the client order moves to in_progress.
    pub fn start(&self, job_id: &JobId, now: DateTime<Utc>) -> Result<AssignedJob, ExecutionError> {
        let mut job = self.load(job_id)?;
        job.start(now)?;
        self.advance_order(&job.order_id, OrderEvent::Begin)?;
        self.jobs.update(job.clone())?;
        Ok(job)
    }

    pub fn pause(
        &self,
        job_id: &JobId,
        reason: Option<String>,
    ) -> Result<AssignedJob, ExecutionError> {
        let mut job = self.load(job_id)?;
        job.pause(reason)?;
        self.jobs.update(job.clone())?;
        Ok(job)
    }

    pub fn resume(&self, job_id: &JobId) -> Result<AssignedJob, ExecutionError> {
        let mut job = self.load(job_id)?;
        job.resume()?;
        self.jobs.update(job.clone())?;
        Ok(job)
    }

    /// Finish the job; the client order moves to completed. The checklist
    /// soft gate applies before anything is persisted.
    pub fn complete(
        &self,
        job_id: &JobId,
        now: DateTime<Utc>,
        notes: Option<String>,
        confirm_incomplete: bool,
    ) -> Result<CompletionSummary, ExecutionError> {
        let mut job = self.load(job_id)?;
        let summary = job.complete(now, notes, confirm_incomplete)?;
        self.advance_order(&job.order_id, OrderEvent::Finish)?;
        self.jobs.update(job)?;

        info!(job_id = %job_id, elapsed_seconds = summary.elapsed_seconds, "job completed");
        Ok(summary)
    }

    /// Flip one checklist item and persist the job; returns the updated job
    /// so callers can read both the progress and any implicit promotion.
    pub fn toggle_item(
        &self,
        job_id: &JobId,
        item_id: &str,
    ) -> Result<AssignedJob, ExecutionError> {
        let mut job = self.load(job_id)?;
        job.toggle_item(item_id)?;
        self.jobs.update(job.clone())?;
        Ok(job)
    }

    pub fn job(&self, job_id: &JobId) -> Result<AssignedJob, ExecutionError> {
        self.load(job_id)
    }

    pub fn jobs(&self) -> Result<Vec<AssignedJob>, ExecutionError> {
        let mut jobs = self.jobs.list()?;
        jobs.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(jobs)
    }

    /// One pass of the per-second timer over every running job; returns how
    /// many counters advanced. Delegated to the store as a single atomic
    /// pass so a pause or completion landing mid-pass is never overwritten.
    pub fn tick_active(&self) -> Result<usize, ExecutionError> {
        let ticked = self.jobs.tick_running()?;
        Ok(ticked)
    }

    fn load(&self, job_id: &JobId) -> Result<AssignedJob, ExecutionError> {
        let job = self.jobs.fetch(job_id)?.ok_or(RepositoryError::NotFound)?;
        Ok(job)
    }

    fn advance_order(&self, order_id: &OrderId, event: OrderEvent) -> Result<(), ExecutionError> {
        let mut order = self
            .orders
            .fetch(order_id)?
            .ok_or(RepositoryError::NotFound)?;
        order.status = order.status.apply(event)?;
        self.orders.update(order)?;
        Ok(())
    }
}

/// Error raised by the execution service.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error(transparent)]
    Job(#[from] JobError),
    #[error("client order rejected the transition: {0}")]
    Order(#[from] OrderTransitionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Convenience constructor for seeded/demo jobs that skip the offer stage.
#[derive(Debug, Clone)]
pub struct SeededJob {
    pub order_id: OrderId,
    pub client_name: String,
    pub client_phone: String,
    pub address: String,
    pub scheduled_date: NaiveDate,
    pub time_slot: String,
    pub priority: Priority,
    pub description: String,
    pub can_accept_decline: bool,
}

impl SeededJob {
    pub fn build(self) -> AssignedJob {
        AssignedJob {
            id: next_job_id(),
            order_id: self.order_id,
            client_name: self.client_name,
            client_phone: self.client_phone,
            address: self.address,
            scheduled_date: self.scheduled_date,
            time_slot: self.time_slot,
            priority: self.priority,
            description: self.description,
            status: JobStatus::Assigned,
            can_accept_decline: self.can_accept_decline,
            started_at: None,
            completed_at: None,
            elapsed_seconds: 0,
            pause_reason: None,
            completion_notes: None,
            checklist: Checklist::standard_residential(),
        }
    }
}
