use models::{Invoice, PaymentStatus};
use serde::Serialize;
use tracing::{info, instrument};

use super::{parse_tab, ViewContext};
use crate::client::{to_patch, EntityClient, SortSpec};
use crate::drafts::InvoiceDraft;
use crate::errors::ServiceError;
use crate::views::customers::CustomerOption;
use crate::views::invoices::InvoiceRow;
use crate::views::jobs::JobOption;
use crate::views::{ListView, SelectOption};

#[derive(Debug, Clone, Serialize)]
pub struct InvoicesPage {
    pub tab: String,
    pub tabs: Vec<SelectOption>,
    pub invoices: ListView<InvoiceRow>,
    pub customers: Vec<CustomerOption>,
    pub jobs: Vec<JobOption>,
}

fn tabs() -> Vec<SelectOption> {
    vec![
        SelectOption::new("all", "All Invoices"),
        SelectOption::new(PaymentStatus::Unpaid.as_str(), "Unpaid"),
        SelectOption::new(PaymentStatus::Partial.as_str(), "Partial"),
        SelectOption::new(PaymentStatus::Paid.as_str(), "Paid"),
    ]
}

#[instrument(skip_all)]
pub async fn load(client: &EntityClient, ctx: &ViewContext) -> Result<InvoicesPage, ServiceError> {
    let status = parse_tab::<PaymentStatus>(ctx.query.tab.as_deref())?;
    let by_invoice_date = SortSpec::desc("invoice_date");
    let (invoices, customers, jobs) = tokio::try_join!(
        client.invoices.list(Some(&by_invoice_date), None),
        client.customers.list(None, None),
        client.jobs.list(None, None),
    )?;
    let rows = filter_by_status(&invoices, status).into_iter().map(InvoiceRow::from).collect();
    Ok(InvoicesPage {
        tab: status.map(|s| s.as_str()).unwrap_or("all").to_string(),
        tabs: tabs(),
        invoices: ListView::new(rows, "No invoices found"),
        customers: customers.iter().map(CustomerOption::from).collect(),
        jobs: jobs.iter().map(JobOption::from).collect(),
    })
}

pub fn filter_by_status(invoices: &[Invoice], status: Option<PaymentStatus>) -> Vec<&Invoice> {
    invoices.iter().filter(|i| status.map_or(true, |s| i.payment_status == s)).collect()
}

#[instrument(skip(client, draft, ctx))]
pub async fn save(
    client: &EntityClient,
    id: Option<&str>,
    draft: &InvoiceDraft,
    ctx: &ViewContext,
) -> Result<InvoicesPage, ServiceError> {
    let input = draft.commit()?;
    let saved = match id {
        Some(id) => client.invoices.update(id, to_patch(&input)?).await?,
        None => client.invoices.create(&input).await?,
    };
    info!(event = "invoice_saved", invoice_id = %saved.id, status = %saved.payment_status, "invoice saved");
    load(client, ctx).await
}

#[instrument(skip(client, ctx))]
pub async fn delete(client: &EntityClient, id: &str, ctx: &ViewContext) -> Result<InvoicesPage, ServiceError> {
    client.invoices.delete(id).await?;
    info!(event = "invoice_deleted", invoice_id = %id, "invoice deleted");
    load(client, ctx).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{memory::MemoryBackend, Backend};
    use crate::drafts::FormDraft;
    use crate::pages::fixtures::{customer, day, invoice, job};
    use crate::pages::PageQuery;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn unpaid_rows_never_show_payment_details() -> Result<(), ServiceError> {
        let backend = MemoryBackend::new(false);
        backend
            .invoices
            .seed(vec![invoice("i1", 40.0, "unpaid", Some("2024-06-01")), invoice("i2", 60.0, "paid", Some("2024-06-02"))])
            .await?;
        let page = load(&backend.client(None), &ViewContext::new(day(2024, 6, 15))).await?;
        for row in &page.invoices.items {
            match row.payment_status {
                PaymentStatus::Unpaid => assert!(row.payment.is_none()),
                _ => assert!(row.payment.is_some()),
            }
        }
        Ok(())
    }

    #[tokio::test]
    async fn load_lists_newest_invoice_date_first() -> Result<(), ServiceError> {
        let backend = MemoryBackend::new(false);
        let dated = |id: &str, date: NaiveDate| {
            let mut inv = invoice(id, 10.0, "unpaid", None);
            inv.invoice_date = Some(date);
            inv
        };
        backend
            .invoices
            .seed(vec![dated("old", day(2024, 4, 1)), dated("new", day(2024, 6, 1)), dated("mid", day(2024, 5, 1))])
            .await?;
        let page = load(&backend.client(None), &ViewContext::new(day(2024, 6, 15))).await?;
        let ids: Vec<_> = page.invoices.items.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["new", "mid", "old"]);
        Ok(())
    }

    #[tokio::test]
    async fn save_new_invoice_linked_to_job() -> Result<(), ServiceError> {
        let backend = MemoryBackend::new(false);
        backend.customers.seed(vec![customer("c1", "Ann", "1 Elm St", "555", "active")]).await?;
        backend.jobs.seed(vec![job("j1", "c1", "2024-06-10", "completed")]).await?;
        let client = backend.client(None);
        let ctx = ViewContext::new(day(2024, 6, 15))
            .with_query(PageQuery { tab: Some("unpaid".into()), ..PageQuery::default() });

        let page = load(&client, &ctx).await?;
        assert_eq!(page.jobs[0].label, "mowing - 2024-06-10");

        let customers = client.customers.list(None, None).await?;
        let jobs = client.jobs.list(None, None).await?;
        let mut draft = InvoiceDraft::new(ctx.today);
        draft.select_customer("c1", &customers)?;
        draft.select_job("j1", &jobs)?;
        draft.set("amount", "75")?;
        let page = save(&client, None, &draft, &ctx).await?;
        assert_eq!(page.invoices.len(), 1);
        let row = &page.invoices.items[0];
        assert_eq!(row.amount_label, "$75.00");
        assert_eq!(row.service_description.as_deref(), Some("mowing"));
        assert_eq!(row.invoice_date.as_deref(), Some("June 15, 2024"));
        Ok(())
    }
}
