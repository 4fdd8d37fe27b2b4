use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One parsed report file, in the shape the dashboard's `ReportData`
/// interface expects. Field order is the emitted key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub report_time: String,
    pub overview: Overview,
    pub online_vs_offline: Vec<ChannelStat>,
    pub category_data: Vec<CategoryStat>,
    pub top_tags: Vec<TagStat>,
    pub tag_combinations: Vec<String>,
    pub weekday_data: Vec<WeekdayStat>,
    pub monthly_data: Vec<MonthStat>,
    pub weekday_vs_weekend: Vec<DayTypeShare>,
    pub most_popular_day: PopularDay,
    pub top_events: Vec<TopEvent>,
    pub title_keywords: Vec<String>,
    pub market: Market,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total: u32,
    pub date_range: String,
    pub avg_interval: f64,
    pub avg_monthly: f64,
    pub days: u32,
}

/// Online or offline bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStat {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: u32,
    pub avg_view: u64,
    pub avg_like: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub name: String,
    pub view: u64,
    pub like: u64,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagStat {
    pub name: String,
    pub count: u32,
    pub view: u64,
    pub like: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayStat {
    pub day: String,
    pub count: u32,
    pub view: u64,
    pub like: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthStat {
    /// `YYYY-MM`
    pub month: String,
    pub count: u32,
    pub percentage: f64,
}

/// Weekday (`平日`) or weekend (`假日`) share of all events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTypeShare {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: u32,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularDay {
    pub day: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopEvent {
    pub title: String,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketItem {
    pub name: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub red_ocean: Vec<MarketItem>,
    pub blue_ocean: Vec<MarketItem>,
    pub learning_submarket: Vec<MarketItem>,
    pub insights: Vec<String>,
}

/// Row of the report listing printed after a run and exported by
/// `--summary-csv`.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ReportIndexRow {
    #[serde(rename = "#")]
    #[tabled(rename = "#")]
    pub position: usize,
    #[serde(rename = "Icon")]
    #[tabled(rename = "Icon")]
    pub icon: String,
    #[serde(rename = "Title")]
    #[tabled(rename = "Title")]
    pub title: String,
    #[serde(rename = "Id")]
    #[tabled(rename = "Id")]
    pub id: String,
    #[serde(rename = "Total")]
    #[tabled(rename = "Total")]
    pub total: String,
    #[serde(rename = "DateRange")]
    #[tabled(rename = "DateRange")]
    pub date_range: String,
}
