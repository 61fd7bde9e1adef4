use models::Customer;
use serde::Serialize;
use tracing::{info, instrument};

use super::ViewContext;
use crate::client::{to_patch, EntityClient, SortSpec};
use crate::drafts::CustomerDraft;
use crate::errors::ServiceError;
use crate::views::customers::CustomerCard;
use crate::views::ListView;

#[derive(Debug, Clone, Serialize)]
pub struct CustomersPage {
    pub search: String,
    pub total: usize,
    pub customers: ListView<CustomerCard>,
}

#[instrument(skip_all)]
pub async fn load(client: &EntityClient, ctx: &ViewContext) -> Result<CustomersPage, ServiceError> {
    let customers = client.customers.list(Some(&SortSpec::desc("created_date")), None).await?;
    let search = ctx.query.search.clone().unwrap_or_default();
    let shown = filter_customers(&customers, &search).into_iter().map(CustomerCard::from).collect();
    Ok(CustomersPage { total: customers.len(), customers: ListView::new(shown, "No customers found"), search })
}

/// Case-insensitive substring match over name, service address and phone.
/// An empty search keeps everything.
pub fn filter_customers<'a>(customers: &'a [Customer], search: &str) -> Vec<&'a Customer> {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return customers.iter().collect();
    }
    customers
        .iter()
        .filter(|c| {
            [&c.name, &c.service_address, &c.phone]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Create when `id` is `None`, otherwise update; then reload.
#[instrument(skip(client, draft, ctx))]
pub async fn save(
    client: &EntityClient,
    id: Option<&str>,
    draft: &CustomerDraft,
    ctx: &ViewContext,
) -> Result<CustomersPage, ServiceError> {
    let input = draft.commit()?;
    let saved = match id {
        Some(id) => client.customers.update(id, to_patch(&input)?).await?,
        None => client.customers.create(&input).await?,
    };
    info!(event = "customer_saved", customer_id = %saved.id, "customer saved");
    load(client, ctx).await
}

/// Jobs and invoices keep their copy of the customer's name.
#[instrument(skip(client, ctx))]
pub async fn delete(client: &EntityClient, id: &str, ctx: &ViewContext) -> Result<CustomersPage, ServiceError> {
    client.customers.delete(id).await?;
    info!(event = "customer_deleted", customer_id = %id, "customer deleted");
    load(client, ctx).await
}
