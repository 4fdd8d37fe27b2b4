use crate::config::ParserConfig;
use crate::sections::{
    extract_categories, extract_market, extract_monthly, extract_online_vs_offline, extract_overview,
    extract_report_time, extract_tag_combinations, extract_title_keywords, extract_top_events,
    extract_top_tags, extract_weekday_vs_weekend, extract_weekdays, market_insights, most_popular_day,
    zero_weekdays,
};
use crate::types::{Market, Overview, ReportIndexRow, ReportRecord};
use crate::util::{format_int, normalize_newlines, now_timestamp};

/// Build one record from a report's text. Every field has a fallback, so
/// this never fails; absent list sections become empty lists.
pub fn build_report(content: &str, filename: &str, config: &ParserConfig) -> ReportRecord {
    let mut text = normalize_newlines(content);
    // Numbered-line blocks expect each line, including the last, to end in `\n`.
    if !text.ends_with('\n') {
        text.push('\n');
    }
    let text = text.as_str();

    let category = config.classifier.classify(filename);
    let limits = &config.limits;
    let defaults = &config.defaults;

    let found = extract_overview(text);
    let overview = Overview {
        total: found.total.unwrap_or(defaults.total),
        date_range: found.date_range.unwrap_or_else(|| defaults.date_range.clone()),
        avg_interval: found.avg_interval.unwrap_or(defaults.avg_interval),
        avg_monthly: found.avg_monthly.unwrap_or(defaults.avg_monthly),
        days: found.days.unwrap_or(defaults.days),
    };

    let weekday_data = extract_weekdays(text).unwrap_or_else(zero_weekdays);
    let popular = most_popular_day(&weekday_data, defaults.most_popular_day);
    let weekday_vs_weekend = extract_weekday_vs_weekend(text).unwrap_or_default();

    let lists = extract_market(text, limits);
    let red_ocean = lists.red_ocean.unwrap_or_default();
    let blue_ocean = lists.blue_ocean.unwrap_or_default();
    let insights = market_insights(&red_ocean, &blue_ocean, &weekday_vs_weekend);

    ReportRecord {
        id: category.id.clone(),
        title: category.report_title(),
        icon: category.icon.clone(),
        report_time: extract_report_time(text).unwrap_or_else(now_timestamp),
        overview,
        online_vs_offline: extract_online_vs_offline(text).unwrap_or_default(),
        category_data: extract_categories(text, limits).unwrap_or_default(),
        top_tags: extract_top_tags(text, limits).unwrap_or_default(),
        tag_combinations: extract_tag_combinations(text, limits).unwrap_or_default(),
        weekday_data,
        monthly_data: extract_monthly(text).unwrap_or_default(),
        weekday_vs_weekend,
        most_popular_day: popular,
        top_events: extract_top_events(text, limits).unwrap_or_default(),
        title_keywords: extract_title_keywords(text, limits).unwrap_or_default(),
        market: Market {
            red_ocean,
            blue_ocean,
            learning_submarket: lists.learning_submarket.unwrap_or_default(),
            insights,
        },
    }
}

/// One listing row per record, numbered from 1 in run order.
pub fn build_index(reports: &[ReportRecord]) -> Vec<ReportIndexRow> {
    reports
        .iter()
        .enumerate()
        .map(|(idx, r)| ReportIndexRow {
            position: idx + 1,
            icon: r.icon.clone(),
            title: r.title.clone(),
            id: r.id.clone(),
            total: format_int(r.overview.total),
            date_range: r.overview.date_range.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldDefaults;

    const FIXTURE: &str = include_str!("../fixtures/learning_report.txt");

    #[test]
    fn fixture_assembles_every_section() {
        let record = build_report(FIXTURE, "學習類活動報告.txt", &ParserConfig::default());
        assert_eq!(record.id, "learning");
        assert_eq!(record.title, "學習類活動數據分析報告");
        assert_eq!(record.icon, "📚");
        assert_eq!(record.report_time, "2025-11-10 14:43:47");
        assert_eq!(record.overview.total, 50);
        assert_eq!(record.overview.days, 98);
        assert_eq!(record.online_vs_offline.len(), 2);
        assert_eq!(record.category_data.len(), 4);
        assert_eq!(record.top_tags.len(), 3);
        assert_eq!(record.tag_combinations.len(), 3);
        assert_eq!(record.weekday_data.len(), 7);
        assert_eq!(record.monthly_data.len(), 4);
        assert_eq!(record.weekday_vs_weekend.len(), 2);
        assert_eq!(record.most_popular_day.day, "星期六");
        assert_eq!(record.most_popular_day.count, 17);
        assert_eq!(record.top_events.len(), 2);
        assert_eq!(record.title_keywords.len(), 3);
        assert_eq!(record.market.red_ocean.len(), 2);
        assert_eq!(record.market.blue_ocean.len(), 4);
        assert_eq!(record.market.learning_submarket.len(), 2);
        assert_eq!(
            record.market.insights,
            vec![
                "假日活動佔比較高，週末是主要活動時段",
                "職場技能相關活動競爭最激烈",
                "親子教育、理財、手作等領域競爭較低，有發展空間",
            ]
        );
    }

    #[test]
    fn empty_text_falls_back_to_defaults() {
        let record = build_report("", "misc.txt", &ParserConfig::default());
        assert_eq!(record.id, "other");
        assert_eq!(record.title, "其他類活動數據分析報告");
        assert_eq!(record.icon, "📊");
        assert_eq!(
            record.overview,
            Overview {
                total: 50,
                date_range: "2025-11-01 至 2026-01-01".to_string(),
                avg_interval: 2.0,
                avg_monthly: 15.0,
                days: 90,
            }
        );
        assert!(record.online_vs_offline.is_empty());
        assert!(record.category_data.is_empty());
        assert_eq!(record.weekday_data, zero_weekdays());
        assert_eq!(record.most_popular_day.day, "星期六");
        assert_eq!(record.most_popular_day.count, 0);
        assert!(record.weekday_vs_weekend.is_empty());
        assert_eq!(record.market.insights.len(), 1);
        assert_eq!(record.report_time.len(), 19);
    }

    #[test]
    fn configured_defaults_replace_placeholders() {
        let config = ParserConfig {
            defaults: FieldDefaults {
                total: 0,
                days: 0,
                ..FieldDefaults::default()
            },
            ..ParserConfig::default()
        };
        let record = build_report("", "x.txt", &config);
        assert_eq!(record.overview.total, 0);
        assert_eq!(record.overview.days, 0);
    }

    #[test]
    fn crlf_and_missing_trailing_newline_are_tolerated() {
        let windows = FIXTURE.replace('\n', "\r\n");
        let trimmed = windows.trim_end();
        let record = build_report(trimmed, "學習.txt", &ParserConfig::default());
        let expected = build_report(FIXTURE, "學習.txt", &ParserConfig::default());
        assert_eq!(record, expected);
    }

    #[test]
    fn full_record_survives_json_round_trip() {
        let record = build_report(FIXTURE, "學習.txt", &ParserConfig::default());
        let json = serde_json::to_string(&record).expect("serialize");
        assert!(json.contains("\"onlineVsOffline\""));
        assert!(json.contains("\"type\":\"線下活動\""));
        let back: ReportRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, record);
    }

    #[test]
    fn index_rows_are_numbered() {
        let a = build_report(FIXTURE, "學習.txt", &ParserConfig::default());
        let b = build_report("", "美食.txt", &ParserConfig::default());
        let rows = build_index(&[a, b]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].position, 1);
        assert_eq!(rows[1].position, 2);
        assert_eq!(rows[1].id, "food");
        assert_eq!(rows[0].total, "50");
    }
}
