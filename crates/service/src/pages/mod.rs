//! Page containers.
//!
//! A container loads everything its page needs in one all-or-nothing batch,
//! derives the view model and hands it back. Mutations go through the
//! [`EntityClient`] first and then reload the page from scratch. Every load is
//! bounded by [`PageSettings::load_timeout`]; dropping the returned future
//! cancels the reads still in flight.

pub mod calendar;
pub mod contact;
pub mod customers;
pub mod dashboard;
pub mod home;
pub mod invoices;
pub mod jobs;
pub mod my_requests;
pub mod request_service;

use std::{future::Future, time::Duration, time::Instant};

use chrono::NaiveDate;
use configs::PagesConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::client::EntityClient;
use crate::errors::ServiceError;
use crate::metrics;
use crate::routing::Page;

pub use calendar::CalendarPage;
pub use contact::ContactPage;
pub use customers::CustomersPage;
pub use dashboard::DashboardPage;
pub use home::HomePage;
pub use invoices::InvoicesPage;
pub use jobs::JobsPage;
pub use my_requests::MyRequestsPage;
pub use request_service::RequestServicePage;

/// Query-string state a page may read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub search: Option<String>,
    pub tab: Option<String>,
    /// `YYYY-MM`
    pub month: Option<String>,
    /// `YYYY-MM-DD`
    pub selected: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PageSettings {
    pub load_timeout: Duration,
    pub dashboard_limit: usize,
    pub chart_months: usize,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self::from(&PagesConfig::default())
    }
}

impl From<&PagesConfig> for PageSettings {
    fn from(cfg: &PagesConfig) -> Self {
        Self {
            load_timeout: Duration::from_secs(cfg.load_timeout_secs),
            dashboard_limit: cfg.dashboard_limit,
            chart_months: cfg.chart_months,
        }
    }
}

/// Everything a container needs besides the client: today's date is passed
/// in rather than read from the clock.
#[derive(Debug, Clone)]
pub struct ViewContext {
    pub today: NaiveDate,
    pub query: PageQuery,
    pub settings: PageSettings,
}

impl ViewContext {
    pub fn new(today: NaiveDate) -> Self {
        Self { today, query: PageQuery::default(), settings: PageSettings::default() }
    }

    pub fn with_query(mut self, query: PageQuery) -> Self {
        self.query = query;
        self
    }

    pub fn with_settings(mut self, settings: PageSettings) -> Self {
        self.settings = settings;
        self
    }
}

/// A loaded page, tagged with its name.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "page")]
pub enum PageView {
    Dashboard(DashboardPage),
    Customers(CustomersPage),
    Jobs(JobsPage),
    Calendar(CalendarPage),
    Invoices(InvoicesPage),
    Home(HomePage),
    RequestService(RequestServicePage),
    MyRequests(MyRequestsPage),
    Contact(ContactPage),
}

impl PageView {
    pub fn page(&self) -> Page {
        match self {
            PageView::Dashboard(_) => Page::Dashboard,
            PageView::Customers(_) => Page::Customers,
            PageView::Jobs(_) => Page::Jobs,
            PageView::Calendar(_) => Page::Calendar,
            PageView::Invoices(_) => Page::Invoices,
            PageView::Home(_) => Page::Home,
            PageView::RequestService(_) => Page::RequestService,
            PageView::MyRequests(_) => Page::MyRequests,
            PageView::Contact(_) => Page::Contact,
        }
    }
}

/// Run `fut` under the page-load timeout and record its duration.
pub async fn bounded<T, F>(page: Page, ctx: &ViewContext, fut: F) -> Result<T, ServiceError>
where
    F: Future<Output = Result<T, ServiceError>>,
{
    let started = Instant::now();
    let out = match tokio::time::timeout(ctx.settings.load_timeout, fut).await {
        Ok(res) => res,
        Err(_) => {
            warn!(event = "page_load_timeout", page = page.name(), "page load timed out");
            Err(ServiceError::Timeout(ctx.settings.load_timeout.as_secs()))
        }
    };
    metrics::observe_page_load(page.name(), started.elapsed().as_secs_f64());
    out
}

/// Load `page` for the viewer behind `client`.
pub async fn load_page(client: &EntityClient, page: Page, ctx: &ViewContext) -> Result<PageView, ServiceError> {
    let view = bounded(page, ctx, async {
        Ok(match page {
            Page::Dashboard => PageView::Dashboard(dashboard::load(client, ctx).await?),
            Page::Customers => PageView::Customers(customers::load(client, ctx).await?),
            Page::Jobs => PageView::Jobs(jobs::load(client, ctx).await?),
            Page::Calendar => PageView::Calendar(calendar::load(client, ctx).await?),
            Page::Invoices => PageView::Invoices(invoices::load(client, ctx).await?),
            Page::Home => PageView::Home(home::load()),
            Page::RequestService => PageView::RequestService(request_service::load(client, ctx).await),
            Page::MyRequests => PageView::MyRequests(my_requests::load(client, ctx).await?),
            Page::Contact => PageView::Contact(contact::load()),
        })
    })
    .await?;
    info!(event = "page_loaded", page = page.name());
    Ok(view)
}

/// Parse a tab value: `all` or empty means no filter.
pub(crate) fn parse_tab<E>(tab: Option<&str>) -> Result<Option<E>, ServiceError>
where
    E: std::str::FromStr<Err = models::errors::ModelError>,
{
    match tab.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(t) => Ok(Some(t.parse::<E>()?)),
    }
}
