use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use common::format;
use models::{Customer, CustomerStatus, Invoice, Job, PaymentStatus};
use serde::Serialize;
use tracing::instrument;

use super::ViewContext;
use crate::client::{EntityClient, SortSpec};
use crate::errors::ServiceError;
use crate::views::customers::CustomerCard;
use crate::views::dashboard::{RevenueChart, RevenuePoint, StatsCard};
use crate::views::jobs::UpcomingJobItem;
use crate::views::ListView;

const UPCOMING_SHOWN: usize = 5;
const RECENT_CUSTOMERS_SHOWN: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardPage {
    pub stats: Vec<StatsCard>,
    pub upcoming_jobs: ListView<UpcomingJobItem>,
    pub recent_customers: ListView<CustomerCard>,
    pub revenue_chart: RevenueChart,
}

#[instrument(skip_all)]
pub async fn load(client: &EntityClient, ctx: &ViewContext) -> Result<DashboardPage, ServiceError> {
    let limit = Some(ctx.settings.dashboard_limit);
    let by_created = SortSpec::desc("created_date");
    let by_scheduled = SortSpec::desc("scheduled_date");
    let by_invoice_date = SortSpec::desc("invoice_date");
    let (customers, jobs, invoices) = tokio::try_join!(
        client.customers.list(Some(&by_created), None),
        client.jobs.list(Some(&by_scheduled), limit),
        client.invoices.list(Some(&by_invoice_date), limit),
    )?;
    Ok(build(&customers, &jobs, &invoices, ctx))
}

pub fn build(customers: &[Customer], jobs: &[Job], invoices: &[Invoice], ctx: &ViewContext) -> DashboardPage {
    let upcoming = upcoming_jobs(jobs);
    let active = customers.iter().filter(|c| c.status == CustomerStatus::Active).count();
    let unpaid = invoices.iter().filter(|i| i.payment_status == PaymentStatus::Unpaid).count();

    let stats = vec![
        StatsCard {
            title: "Total Customers",
            value: customers.len().to_string(),
            subtitle: format!("{active} active"),
            color: "emerald",
        },
        StatsCard {
            title: "Jobs Today",
            value: jobs_on(jobs, ctx.today).len().to_string(),
            subtitle: format!("{} upcoming", upcoming.len()),
            color: "blue",
        },
        StatsCard {
            title: "Total Revenue",
            value: format::currency_whole(total_paid_revenue(invoices)),
            subtitle: "All time".to_string(),
            color: "green",
        },
        StatsCard {
            title: "Pending Payments",
            value: format::currency_whole(pending_revenue(invoices)),
            subtitle: format!("{unpaid} invoices"),
            color: "amber",
        },
    ];

    DashboardPage {
        stats,
        upcoming_jobs: ListView::new(
            upcoming.iter().map(|j| UpcomingJobItem::new(j, ctx.today)).collect(),
            "No upcoming jobs scheduled",
        ),
        recent_customers: ListView::new(
            customers.iter().take(RECENT_CUSTOMERS_SHOWN).map(CustomerCard::from).collect(),
            "No customers yet",
        ),
        revenue_chart: RevenueChart::new(monthly_revenue(invoices, ctx.settings.chart_months)),
    }
}

fn sum_where(invoices: &[Invoice], status: PaymentStatus) -> f64 {
    invoices.iter().filter(|i| i.payment_status == status).map(|i| i.amount).sum()
}

pub fn total_paid_revenue(invoices: &[Invoice]) -> f64 {
    sum_where(invoices, PaymentStatus::Paid)
}

pub fn pending_revenue(invoices: &[Invoice]) -> f64 {
    sum_where(invoices, PaymentStatus::Unpaid)
}

pub fn jobs_on(jobs: &[Job], date: NaiveDate) -> Vec<&Job> {
    jobs.iter().filter(|j| j.scheduled_date == Some(date)).collect()
}

/// Open jobs, first few in loaded order.
pub fn upcoming_jobs(jobs: &[Job]) -> Vec<&Job> {
    jobs.iter().filter(|j| j.status.is_open()).take(UPCOMING_SHOWN).collect()
}

/// Paid revenue per calendar month of `paid_date`, oldest first, keeping the
/// `months` most recent months that have any revenue.
pub fn monthly_revenue(invoices: &[Invoice], months: usize) -> Vec<RevenuePoint> {
    let mut by_month: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for inv in invoices.iter().filter(|i| i.payment_status == PaymentStatus::Paid) {
        if let Some(paid) = inv.paid_date {
            *by_month.entry((paid.year(), paid.month())).or_default() += inv.amount;
        }
    }
    let skip = by_month.len().saturating_sub(months);
    by_month
        .into_iter()
        .skip(skip)
        .map(|((year, month), revenue)| RevenuePoint { year, month, label: format::month_label(year, month), revenue })
        .collect()
}
