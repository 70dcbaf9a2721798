use crate::infra::{InMemoryJobRepository, InMemoryOrderRepository};
use brilho::error::AppError;
use brilho::marketplace::catalog::{PaymentMethod, ServiceCatalog, ServiceId};
use brilho::marketplace::execution::{ExecutionService, JobAssignment, Priority};
use brilho::marketplace::pricing::AddOn;
use brilho::marketplace::scheduling::{
    OrderStatus, ScheduleRequest, SchedulingService, SimulatedConfirmation,
};
use chrono::{Duration, Local, NaiveDate, Utc};
use clap::Args;
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Scheduled cleaning date (YYYY-MM-DD). Defaults to tomorrow.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Number of rooms to price the demo order for.
    #[arg(long, default_value_t = 3)]
    pub(crate) rooms: u32,
    /// Stop after scheduling; skip the employee execution portion.
    #[arg(long)]
    pub(crate) skip_execution: bool,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        date,
        rooms,
        skip_execution,
    } = args;

    let date = date.unwrap_or_else(|| Local::now().date_naive() + Duration::days(1));

    println!("Brilho marketplace demo");

    let catalog = ServiceCatalog::standard();
    println!("\nService catalog");
    for service in catalog.services() {
        println!(
            "- [{}] {} | base R${} | {}",
            service.id, service.name, service.base_price, service.duration_estimate
        );
    }

    let orders = Arc::new(InMemoryOrderRepository::default());
    let jobs = Arc::new(InMemoryJobRepository::default());
    let scheduling = Arc::new(SchedulingService::new(
        ServiceCatalog::standard(),
        orders.clone(),
        Arc::new(SimulatedConfirmation::instant()),
    ));
    let execution = ExecutionService::new(jobs, orders);

    let request = ScheduleRequest {
        service_id: Some(ServiceId(1)),
        room_count: rooms,
        add_ons: BTreeSet::from([AddOn::DeepClean, AddOn::PremiumProducts]),
        address: "Rua das Flores, 123 - Centro".to_string(),
        date: Some(date),
        time_slot: Some("14:00".to_string()),
        payment_method: Some(PaymentMethod::Pix),
    };

    let quote = scheduling.quote(&request)?;
    println!("\nPrice preview for {} ({} quartos)", quote.service_name, quote.room_count);
    println!(
        "- Rooms subtotal: R${} ({} x R${})",
        quote.rooms_subtotal, quote.room_count, quote.base_price
    );
    for line in &quote.add_ons {
        println!("- {}: +R${}", line.label, line.surcharge);
    }
    println!("- Total: R${}", quote.total);

    let order = scheduling.submit(request).await?;
    println!(
        "\nOrder {} scheduled for {} at {} -> status {}",
        order.id,
        order.date,
        order.time_slot,
        order.status.label()
    );

    if skip_execution {
        return Ok(());
    }

    println!("\nEmployee execution demo");
    let job = execution.assign(JobAssignment {
        order_id: order.id.clone(),
        professional: "Ana Costa".to_string(),
        client_name: "Maria Silva".to_string(),
        client_phone: "(11) 99999-1234".to_string(),
        priority: Priority::High,
        description: "Limpeza completa do apartamento".to_string(),
    })?;
    println!("- Offer {} created for {}", job.id, job.client_name);

    let job = execution.accept(&job.id)?;
    println!(
        "- Offer accepted -> order status {}",
        scheduling.order(&order.id)?.status.label()
    );

    let job = execution.start(&job.id, Utc::now())?;
    println!("- Work started ({})", job.status.label());

    for item_id in ["1", "2", "3"] {
        let job = execution.toggle_item(&job.id, item_id)?;
        let item = job
            .checklist
            .items()
            .iter()
            .find(|item| item.id == item_id)
            .map(|item| item.description.as_str())
            .unwrap_or("?");
        println!(
            "- Checklist '{}' done -> {:.1}% ({})",
            item,
            job.progress_percentage(),
            job.status.label()
        );
    }

    let job = execution.pause(&job.id, Some("Pausa para almoço".to_string()))?;
    println!(
        "- Paused: {}",
        job.pause_reason.as_deref().unwrap_or("sem motivo")
    );
    let job = execution.resume(&job.id)?;
    println!("- Resumed ({})", job.status.label());

    match execution.complete(&job.id, Utc::now(), None, false) {
        Ok(_) => println!("- Completed without open checklist items"),
        Err(err) => println!("- Completion held back: {err}"),
    }

    let summary = execution.complete(
        &job.id,
        Utc::now(),
        Some("Cliente satisfeito".to_string()),
        true,
    )?;
    println!(
        "- Completed at {} after {}s of tracked work",
        summary.completed_at, summary.elapsed_seconds
    );

    let order = scheduling.order(&order.id)?;
    println!("\nClient timeline for {}", order.id);
    for status in OrderStatus::timeline() {
        let reached = order
            .status
            .timeline_position()
            .zip(status.timeline_position())
            .map(|(current, step)| step <= current)
            .unwrap_or(false);
        let marker = if reached { "x" } else { " " };
        println!("  [{marker}] {}", status.label());
    }

    Ok(())
}
