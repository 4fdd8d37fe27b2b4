// Section extractors.
//
// Each extractor scans the raw report text for one labeled section and
// returns `None` when the section is absent, so a missing or drifted section
// never affects its neighbours. Line patterns require digit runs wherever a
// number is expected; a line that does not match is skipped whole.
use crate::config::ExtractionLimits;
use crate::types::{
    CategoryStat, ChannelStat, DayTypeShare, MarketItem, MonthStat, PopularDay, TagStat, TopEvent,
    WeekdayStat,
};
use crate::util::{parse_f64_safe, parse_int_safe, share_percent, weekday_label, WEEKDAYS};
use chrono::Weekday;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::str::FromStr;

// Scalar lines
static RE_REPORT_TIME: Lazy<Regex> = Lazy::new(|| Regex::new(r"產生時間:\s*(.+)").expect("valid regex"));
static RE_TOTAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"活動總數:\s*([0-9]+)").expect("valid regex"));
static RE_DATE_RANGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"資料時間範圍:\s*(.+)").expect("valid regex"));
static RE_DAYS: Lazy<Regex> = Lazy::new(|| Regex::new(r"涵蓋天數:\s*([0-9]+)").expect("valid regex"));
static RE_AVG_INTERVAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"平均活動間隔:\s*([0-9]+(?:\.[0-9]+)?)").expect("valid regex"));
static RE_AVG_MONTHLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"平均每月活動數:\s*([0-9]+(?:\.[0-9]+)?)").expect("valid regex"));

// Online / offline
static RE_ONLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"線上活動:\s*([0-9]+)\s*場[\s\S]*?平均觀看:\s*([0-9][0-9,]*)[\s\S]*?平均喜歡:\s*([0-9]+)")
        .expect("valid regex")
});
static RE_OFFLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"線下活動:\s*([0-9]+)\s*場[\s\S]*?平均觀看:\s*([0-9][0-9,]*)[\s\S]*?平均喜歡:\s*([0-9]+)")
        .expect("valid regex")
});

// Categories and tags
static RE_CATEGORY_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"1\.2 各活動分類互動率排行([\s\S]*?)【2\. 標籤熱度分析】").expect("valid regex"));
static RE_CATEGORY_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[0-9]+\.\s+(.+?)\s+互動率:.*?觀看:([0-9][0-9,]*)\s+喜歡:([0-9]+)\s+\(([0-9]+)場\)")
        .expect("valid regex")
});
static RE_TAG_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"2\.2 標籤效能排行[\s\S]*?((?:\s+[0-9]+\.\s+.+\n)+)").expect("valid regex"));
static RE_TAG_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[0-9]+\.\s+(.+?)\s+觀看:([0-9][0-9,]*)\s+喜歡:([0-9]+).*?\(([0-9]+)場\)")
        .expect("valid regex")
});
static RE_COMBO_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"2\.3 熱門標籤組合[\s\S]*?((?:\s+[0-9]+\.\s+.+\n){1,3})").expect("valid regex"));
static RE_NUMBERED_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[0-9]+\.\s+(.+)").expect("valid regex"));

// Time distribution
static RE_WEEKDAY_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"4\.1 星期活動熱度分析([\s\S]*?)4\.2").expect("valid regex"));
static RE_WEEKDAY_LINES: Lazy<Vec<(Weekday, Regex)>> = Lazy::new(|| {
    WEEKDAYS
        .iter()
        .map(|day| {
            let pattern = format!(
                r"{}\s+([0-9]+)場\s+觀看:([0-9][0-9,]*)\s+喜歡:([0-9]+)",
                regex::escape(weekday_label(*day))
            );
            (*day, Regex::new(&pattern).expect("valid regex"))
        })
        .collect()
});
static RE_MONTH_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"月份活動分布:([\s\S]*?)平均活動間隔").expect("valid regex"));
static RE_MONTH_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{4})年([0-9]{2})月\s+([0-9]+)場\s+\(\s*([0-9]+(?:\.[0-9]+)?)%\)").expect("valid regex")
});
static RE_WEEKDAY_TOTAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"平日活動:\s*([0-9]+)\s*場").expect("valid regex"));
static RE_WEEKEND_TOTAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"假日活動:\s*([0-9]+)\s*場").expect("valid regex"));

// Content
static RE_EVENT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"5\.2 高互動率標題[\s\S]*?((?:\s+[0-9]+\.\s+.+\n\s+互動率:\s+[0-9]+(?:\.[0-9]+)?%\n){1,10})")
        .expect("valid regex")
});
static RE_EVENT_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+\.\s+(.+)\n\s+互動率:\s+([0-9]+(?:\.[0-9]+)?)%").expect("valid regex"));
static RE_KEYWORD_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"5\.1 高觀看活動標題關鍵字[\s\S]*?((?:\s+[0-9]+\.\s+.+\n){1,30})").expect("valid regex")
});
static RE_KEYWORD_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[0-9]+\.\s+(.+?)\s+[0-9]+\s*次").expect("valid regex"));

// Market
static RE_RED_OCEAN_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"紅海市場[\s\S]*?((?:\s+[0-9]+\.\s+.+\n){1,10})").expect("valid regex"));
static RE_BLUE_OCEAN_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"藍海市場[\s\S]*?((?:\s+[0-9]+\.\s+.+\n){1,10})").expect("valid regex"));
static RE_OCEAN_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[0-9]+\.\s+(.+?)\s+([0-9]+)\s*場活動").expect("valid regex"));
static RE_SUBMARKET_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"6\.1 學習類活動細分市場[\s\S]*?((?:\s+[0-9]+\.\s+.+\n){1,20})").expect("valid regex")
});
static RE_SUBMARKET_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[0-9]+\.\s+(.+?)\s+([0-9]+)場").expect("valid regex"));

pub const ONLINE_LABEL: &str = "線上活動";
pub const OFFLINE_LABEL: &str = "線下活動";
pub const WEEKDAY_LABEL: &str = "平日";
pub const WEEKEND_LABEL: &str = "假日";

/// Overview lines as found; absent lines stay `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverviewFields {
    pub total: Option<u32>,
    pub date_range: Option<String>,
    pub days: Option<u32>,
    pub avg_interval: Option<f64>,
    pub avg_monthly: Option<f64>,
}

/// Red ocean, blue ocean and submarket lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketLists {
    pub red_ocean: Option<Vec<MarketItem>>,
    pub blue_ocean: Option<Vec<MarketItem>>,
    pub learning_submarket: Option<Vec<MarketItem>>,
}

fn capture_str<'t>(caps: &Captures<'t>, idx: usize) -> Option<&'t str> {
    caps.get(idx).map(|m| m.as_str())
}

fn capture_text(re: &Regex, text: &str) -> Option<String> {
    let caps = re.captures(text)?;
    let value = capture_str(&caps, 1)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn capture_int<T: FromStr>(re: &Regex, text: &str) -> Option<T> {
    re.captures(text).and_then(|caps| parse_int_safe(capture_str(&caps, 1)))
}

fn capture_decimal(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text).and_then(|caps| parse_f64_safe(capture_str(&caps, 1)))
}

/// First capture group of a section regex: the section body.
fn section<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text).and_then(|caps| caps.get(1)).map(|m| m.as_str())
}

/// Apply `line_re` to each line of `block`, keeping at most `cap` parsed rows
/// in source order.
fn collect_lines<T, F>(block: &str, line_re: &Regex, cap: usize, parse: F) -> Vec<T>
where
    F: Fn(&Captures<'_>) -> Option<T>,
{
    block
        .split('\n')
        .filter_map(|line| line_re.captures(line))
        .filter_map(|caps| parse(&caps))
        .take(cap)
        .collect()
}

fn name_and_count(caps: &Captures) -> Option<MarketItem> {
    Some(MarketItem {
        name: capture_str(caps, 1)?.trim().to_string(),
        count: parse_int_safe(capture_str(caps, 2))?,
    })
}

pub fn extract_report_time(text: &str) -> Option<String> {
    capture_text(&RE_REPORT_TIME, text)
}

pub fn extract_overview(text: &str) -> OverviewFields {
    OverviewFields {
        total: capture_int(&RE_TOTAL, text),
        date_range: capture_text(&RE_DATE_RANGE, text),
        days: capture_int(&RE_DAYS, text),
        avg_interval: capture_decimal(&RE_AVG_INTERVAL, text),
        avg_monthly: capture_decimal(&RE_AVG_MONTHLY, text),
    }
}

fn channel(re: &Regex, kind: &str, text: &str) -> Option<ChannelStat> {
    let caps = re.captures(text)?;
    Some(ChannelStat {
        kind: kind.to_string(),
        count: parse_int_safe(capture_str(&caps, 1))?,
        avg_view: parse_int_safe(capture_str(&caps, 2))?,
        avg_like: parse_int_safe(capture_str(&caps, 3))?,
    })
}

/// Online and offline buckets, offline always first.
pub fn extract_online_vs_offline(text: &str) -> Option<Vec<ChannelStat>> {
    let stats: Vec<ChannelStat> = [
        channel(&RE_OFFLINE, OFFLINE_LABEL, text),
        channel(&RE_ONLINE, ONLINE_LABEL, text),
    ]
    .into_iter()
    .flatten()
    .collect();
    if stats.is_empty() {
        None
    } else {
        Some(stats)
    }
}

pub fn extract_categories(text: &str, limits: &ExtractionLimits) -> Option<Vec<CategoryStat>> {
    let block = section(&RE_CATEGORY_BLOCK, text)?;
    Some(collect_lines(block, &RE_CATEGORY_LINE, limits.categories, |caps| {
        Some(CategoryStat {
            name: capture_str(caps, 1)?.trim().to_string(),
            view: parse_int_safe(capture_str(caps, 2))?,
            like: parse_int_safe(capture_str(caps, 3))?,
            count: parse_int_safe(capture_str(caps, 4))?,
        })
    }))
}

pub fn extract_top_tags(text: &str, limits: &ExtractionLimits) -> Option<Vec<TagStat>> {
    let block = section(&RE_TAG_BLOCK, text)?;
    Some(collect_lines(block, &RE_TAG_LINE, limits.tags, |caps| {
        Some(TagStat {
            name: capture_str(caps, 1)?.trim().to_string(),
            count: parse_int_safe(capture_str(caps, 4))?,
            view: parse_int_safe(capture_str(caps, 2))?,
            like: parse_int_safe(capture_str(caps, 3))?,
        })
    }))
}

pub fn extract_tag_combinations(text: &str, limits: &ExtractionLimits) -> Option<Vec<String>> {
    let block = section(&RE_COMBO_BLOCK, text)?;
    Some(collect_lines(block, &RE_NUMBERED_LINE, limits.tag_combinations, |caps| {
        Some(capture_str(caps, 1)?.trim().to_string())
    }))
}

/// All seven weekdays in Monday..Sunday order; days the section does not
/// mention are zero-filled. `None` when the section itself is missing.
pub fn extract_weekdays(text: &str) -> Option<Vec<WeekdayStat>> {
    let block = section(&RE_WEEKDAY_BLOCK, text)?;
    let stats = RE_WEEKDAY_LINES
        .iter()
        .map(|(day, re)| {
            re.captures(block)
                .and_then(|caps| {
                    Some(WeekdayStat {
                        day: weekday_label(*day).to_string(),
                        count: parse_int_safe(capture_str(&caps, 1))?,
                        view: parse_int_safe(capture_str(&caps, 2))?,
                        like: parse_int_safe(capture_str(&caps, 3))?,
                    })
                })
                .unwrap_or_else(|| empty_weekday(*day))
        })
        .collect();
    Some(stats)
}

fn empty_weekday(day: Weekday) -> WeekdayStat {
    WeekdayStat {
        day: weekday_label(day).to_string(),
        count: 0,
        view: 0,
        like: 0,
    }
}

pub fn zero_weekdays() -> Vec<WeekdayStat> {
    WEEKDAYS.iter().map(|d| empty_weekday(*d)).collect()
}

/// Weekday with the highest count; ties keep the earlier day. Starts from
/// `fallback` with a count of zero, so all-zero input yields the fallback.
pub fn most_popular_day(stats: &[WeekdayStat], fallback: Weekday) -> PopularDay {
    let mut best = PopularDay {
        day: weekday_label(fallback).to_string(),
        count: 0,
    };
    for stat in stats {
        if stat.count > best.count {
            best = PopularDay {
                day: stat.day.clone(),
                count: stat.count,
            };
        }
    }
    best
}

pub fn extract_monthly(text: &str) -> Option<Vec<MonthStat>> {
    let block = section(&RE_MONTH_BLOCK, text)?;
    Some(collect_lines(block, &RE_MONTH_LINE, usize::MAX, |caps| {
        Some(MonthStat {
            month: format!("{}-{}", capture_str(caps, 1)?, capture_str(caps, 2)?),
            count: parse_int_safe(capture_str(caps, 3))?,
            percentage: parse_f64_safe(capture_str(caps, 4))?,
        })
    }))
}

/// Weekday and weekend shares, each `round(count / total * 100)`. Both lines
/// are required.
pub fn extract_weekday_vs_weekend(text: &str) -> Option<Vec<DayTypeShare>> {
    let weekday: u32 = capture_int(&RE_WEEKDAY_TOTAL, text)?;
    let weekend: u32 = capture_int(&RE_WEEKEND_TOTAL, text)?;
    let total = weekday.saturating_add(weekend);
    let weekday_pct = share_percent(weekday, total);
    let weekend_pct = share_percent(weekend, total);
    Some(vec![
        DayTypeShare {
            kind: WEEKDAY_LABEL.to_string(),
            count: weekday,
            percentage: weekday_pct,
        },
        DayTypeShare {
            kind: WEEKEND_LABEL.to_string(),
            count: weekend,
            percentage: weekend_pct,
        },
    ])
}

pub fn extract_top_events(text: &str, limits: &ExtractionLimits) -> Option<Vec<TopEvent>> {
    let block = section(&RE_EVENT_BLOCK, text)?;
    let events = RE_EVENT_PAIR
        .captures_iter(block)
        .filter_map(|caps| {
            Some(TopEvent {
                title: capture_str(&caps, 1)?.trim().to_string(),
                rate: parse_f64_safe(capture_str(&caps, 2))?,
            })
        })
        .take(limits.top_events)
        .collect();
    Some(events)
}

pub fn extract_title_keywords(text: &str, limits: &ExtractionLimits) -> Option<Vec<String>> {
    let block = section(&RE_KEYWORD_BLOCK, text)?;
    Some(collect_lines(block, &RE_KEYWORD_LINE, limits.title_keywords, |caps| {
        Some(capture_str(caps, 1)?.trim().to_string())
    }))
}

fn market_list(text: &str, block_re: &Regex, line_re: &Regex, cap: usize) -> Option<Vec<MarketItem>> {
    section(block_re, text).map(|block| collect_lines(block, line_re, cap, name_and_count))
}

pub fn extract_market(text: &str, limits: &ExtractionLimits) -> MarketLists {
    MarketLists {
        red_ocean: market_list(text, &RE_RED_OCEAN_BLOCK, &RE_OCEAN_LINE, limits.red_ocean),
        blue_ocean: market_list(text, &RE_BLUE_OCEAN_BLOCK, &RE_OCEAN_LINE, limits.blue_ocean),
        learning_submarket: market_list(
            text,
            &RE_SUBMARKET_BLOCK,
            &RE_SUBMARKET_LINE,
            limits.learning_submarket,
        ),
    }
}

/// Summary sentences shown under the market charts: one timing insight,
/// then the most crowded red-ocean topic and the first three blue-ocean
/// topics when those lists are non-empty.
pub fn market_insights(
    red_ocean: &[MarketItem],
    blue_ocean: &[MarketItem],
    weekday_vs_weekend: &[DayTypeShare],
) -> Vec<String> {
    let mut insights = Vec::with_capacity(3);
    let weekday_leads = match weekday_vs_weekend {
        [weekday, weekend] => weekday.count > weekend.count,
        _ => false,
    };
    if weekday_leads {
        insights.push("平日活動佔比較高，平日是主要活動時段".to_string());
    } else {
        insights.push("假日活動佔比較高，週末是主要活動時段".to_string());
    }
    if let Some(first) = red_ocean.first() {
        insights.push(format!("{}相關活動競爭最激烈", first.name));
    }
    if !blue_ocean.is_empty() {
        let names: Vec<&str> = blue_ocean.iter().take(3).map(|b| b.name.as_str()).collect();
        insights.push(format!("{}等領域競爭較低，有發展空間", names.join("、")));
    }
    insights
}
