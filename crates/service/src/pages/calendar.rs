use chrono::{Datelike, Months, NaiveDate};
use common::format;
use models::Job;
use serde::Serialize;
use tracing::instrument;

use super::ViewContext;
use crate::client::{EntityClient, SortSpec};
use crate::errors::ServiceError;
use crate::views::jobs::JobRow;
use crate::views::ListView;

pub const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: u32,
    pub job_count: usize,
    pub selected: bool,
    pub today: bool,
}

/// One grid cell; leading blanks pad the first week back to Sunday.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridCell {
    Blank,
    Day(CalendarDay),
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectedDay {
    pub date: Option<NaiveDate>,
    pub title: String,
    pub jobs: ListView<JobRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarPage {
    pub title: String,
    /// `YYYY-MM` of the shown month and its neighbours.
    pub month: String,
    pub prev_month: String,
    pub next_month: String,
    pub weekdays: [&'static str; 7],
    pub cells: Vec<GridCell>,
    pub selected: SelectedDay,
}

#[instrument(skip_all)]
pub async fn load(client: &EntityClient, ctx: &ViewContext) -> Result<CalendarPage, ServiceError> {
    let reference = match ctx.query.month.as_deref() {
        Some(m) if !m.trim().is_empty() => parse_month(m)?,
        _ => format::month_start(ctx.today),
    };
    let selected = match ctx.query.selected.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => Some(
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|_| ServiceError::Validation(format!("selected must be YYYY-MM-DD, got {s:?}")))?,
        ),
        _ => None,
    };
    let jobs = client.jobs.list(Some(&SortSpec::desc("scheduled_date")), None).await?;
    Ok(build(&jobs, reference, selected, ctx.today))
}

pub fn build(jobs: &[Job], reference: NaiveDate, selected: Option<NaiveDate>, today: NaiveDate) -> CalendarPage {
    let first = format::month_start(reference);
    let mut cells: Vec<GridCell> =
        (0..first.weekday().num_days_from_sunday()).map(|_| GridCell::Blank).collect();
    cells.extend(month_days(first).into_iter().map(|date| {
        GridCell::Day(CalendarDay {
            date,
            day: date.day(),
            job_count: jobs_for_date(jobs, date).len(),
            selected: selected == Some(date),
            today: date == today,
        })
    }));

    let selected_day = match selected {
        Some(date) => SelectedDay {
            date: Some(date),
            title: format::long_date(date),
            jobs: ListView::new(
                jobs_for_date(jobs, date).into_iter().map(JobRow::from).collect(),
                "No jobs scheduled for this day",
            ),
        },
        None => SelectedDay {
            date: None,
            title: "Select a date".to_string(),
            jobs: ListView::new(Vec::new(), "Click on a date to view scheduled jobs"),
        },
    };

    CalendarPage {
        title: format::month_title(first),
        month: month_key(first),
        prev_month: month_key(first.checked_sub_months(Months::new(1)).unwrap_or(first)),
        next_month: month_key(first.checked_add_months(Months::new(1)).unwrap_or(first)),
        weekdays: WEEKDAYS,
        cells,
        selected: selected_day,
    }
}

/// Exact date match; jobs without a date never appear.
pub fn jobs_for_date(jobs: &[Job], date: NaiveDate) -> Vec<&Job> {
    jobs.iter().filter(|j| j.scheduled_date == Some(date)).collect()
}

/// Every day of the month that starts at `first`.
pub fn month_days(first: NaiveDate) -> Vec<NaiveDate> {
    first.iter_days().take_while(|d| d.month() == first.month()).collect()
}

fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

pub fn parse_month(raw: &str) -> Result<NaiveDate, ServiceError> {
    NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
        .map_err(|_| ServiceError::Validation(format!("month must be YYYY-MM, got {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{memory::MemoryBackend, Backend};
    use crate::pages::fixtures::{day, job};
    use crate::pages::PageQuery;

    fn days(page: &CalendarPage) -> Vec<&CalendarDay> {
        page.cells
            .iter()
            .filter_map(|c| match c {
                GridCell::Day(d) => Some(d),
                GridCell::Blank => None,
            })
            .collect()
    }

    #[test]
    fn june_2024_grid_starts_on_saturday() {
        let page = build(&[], day(2024, 6, 10), None, day(2024, 6, 10));
        let blanks = page.cells.iter().take_while(|c| matches!(c, GridCell::Blank)).count();
        assert_eq!(blanks, 6);
        assert_eq!(days(&page).len(), 30);
        assert_eq!(page.title, "June 2024");
        assert_eq!(page.prev_month, "2024-05");
        assert_eq!(page.next_month, "2024-07");
        assert_eq!(page.selected.title, "Select a date");
    }

    #[test]
    fn job_lands_on_exactly_one_day() {
        let jobs = vec![job("j1", "c1", "2024-06-15", "scheduled")];
        let page = build(&jobs, day(2024, 6, 1), Some(day(2024, 6, 15)), day(2024, 6, 1));
        let with_jobs: Vec<_> = days(&page).into_iter().filter(|d| d.job_count > 0).map(|d| d.date).collect();
        assert_eq!(with_jobs, [day(2024, 6, 15)]);
        assert_eq!(page.selected.title, "June 15, 2024");
        assert_eq!(page.selected.jobs.len(), 1);
        assert!(jobs_for_date(&jobs, day(2024, 6, 14)).is_empty());
    }

    #[test]
    fn february_leap_year() {
        assert_eq!(month_days(day(2024, 2, 1)).len(), 29);
        assert_eq!(month_days(day(2023, 2, 1)).len(), 28);
        assert_eq!(month_days(day(2024, 12, 1)).last(), Some(&day(2024, 12, 31)));
    }

    #[tokio::test]
    async fn load_reads_month_and_selection_from_query() -> Result<(), ServiceError> {
        let backend = MemoryBackend::new(false);
        backend.jobs.seed(vec![job("j1", "c1", "2024-07-04", "scheduled")]).await?;
        let ctx = ViewContext::new(day(2024, 6, 15)).with_query(PageQuery {
            month: Some("2024-07".into()),
            selected: Some("2024-07-04".into()),
            ..PageQuery::default()
        });
        let page = load(&backend.client(None), &ctx).await?;
        assert_eq!(page.title, "July 2024");
        assert_eq!(page.selected.jobs.len(), 1);

        let bad = ViewContext::new(day(2024, 6, 15))
            .with_query(PageQuery { month: Some("July".into()), ..PageQuery::default() });
        assert!(matches!(load(&backend.client(None), &bad).await, Err(ServiceError::Validation(_))));
        Ok(())
    }
}
