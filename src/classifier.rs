// Maps a report filename to the category it covers.

/// A report category: the keyword searched for in filenames plus the id and
/// icon the dashboard uses for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportCategory {
    pub keyword: String,
    pub id: String,
    pub icon: String,
}

impl ReportCategory {
    pub fn new(keyword: &str, id: &str, icon: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            id: id.to_string(),
            icon: icon.to_string(),
        }
    }

    /// Display title, e.g. `學習類活動數據分析報告`.
    pub fn report_title(&self) -> String {
        format!("{}類活動數據分析報告", self.keyword)
    }
}

/// Ordered keyword table; the first keyword found in the filename wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    pub categories: Vec<ReportCategory>,
    pub fallback: ReportCategory,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            categories: vec![
                ReportCategory::new("學習", "learning", "📚"),
                ReportCategory::new("藝文", "arts", "🎨"),
                ReportCategory::new("體驗", "experience", "🌟"),
                ReportCategory::new("運動", "sports", "⚽"),
                ReportCategory::new("科技", "technology", "💻"),
                ReportCategory::new("親子", "family", "👨‍👩‍👧‍👦"),
                ReportCategory::new("美食", "food", "🍽️"),
            ],
            fallback: ReportCategory::new("其他", "other", "📊"),
        }
    }
}

impl Classifier {
    pub fn classify(&self, filename: &str) -> &ReportCategory {
        self.categories
            .iter()
            .find(|c| filename.contains(c.keyword.as_str()))
            .unwrap_or(&self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_keyword_maps_to_its_category() {
        let classifier = Classifier::default();
        for category in &classifier.categories {
            let filename = format!("accupass_{}_report_2025.txt", category.keyword);
            let found = classifier.classify(&filename);
            assert_eq!(found.id, category.id);
            assert_eq!(found.icon, category.icon);
        }
    }

    #[test]
    fn unknown_filename_falls_back_to_other() {
        let classifier = Classifier::default();
        let found = classifier.classify("random_export.txt");
        assert_eq!(found, &ReportCategory::new("其他", "other", "📊"));
        assert_eq!(found.report_title(), "其他類活動數據分析報告");
    }

    #[test]
    fn earlier_keyword_wins_when_several_match() {
        let classifier = Classifier::default();
        // 學習 precedes 科技 in the table.
        assert_eq!(classifier.classify("科技學習報告.txt").id, "learning");
        assert_eq!(classifier.classify("親子美食.txt").id, "family");
    }

    #[test]
    fn custom_table_is_respected() {
        let classifier = Classifier {
            categories: vec![ReportCategory::new("音樂", "music", "🎵")],
            fallback: ReportCategory::new("雜項", "misc", "❔"),
        };
        assert_eq!(classifier.classify("音樂祭.txt").id, "music");
        assert_eq!(classifier.classify("學習.txt").id, "misc");
    }
}
