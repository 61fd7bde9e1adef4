use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatsCard {
    pub title: &'static str,
    pub value: String,
    pub subtitle: String,
    pub color: &'static str,
}

/// One bar of the revenue chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RevenuePoint {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RevenueChart {
    pub points: Vec<RevenuePoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

impl RevenueChart {
    pub fn new(points: Vec<RevenuePoint>) -> Self {
        let empty_message = if points.is_empty() { Some("No revenue data yet") } else { None };
        Self { points, empty_message }
    }
}
