use crate::error::CatalogError;
use crate::logger;
use crate::models::{ItemId, LearningItem};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const BUNDLED_CATALOG: &str = include_str!("../data/content.json");

/// The static, ordered content catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<LearningItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStat {
    pub category: String,
    pub total: usize,
    pub checked: usize,
}

impl CategoryStat {
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.checked as f64 / self.total as f64) * 100.0).round() as u32
    }
}

impl Catalog {
    pub fn new(items: Vec<LearningItem>) -> Self {
        Self { items }
    }

    pub fn bundled() -> Result<Self, CatalogError> {
        parse_catalog(BUNDLED_CATALOG)
    }

    /// Loads the override file when given, otherwise the bundled catalog.
    /// A failure is logged and yields an empty catalog, which screens render as
    /// "content could not be loaded".
    pub fn load(path: Option<&Path>) -> Self {
        let result = match path {
            Some(path) => load_catalog(path),
            None => Self::bundled(),
        };
        result.unwrap_or_else(|e| {
            logger::log(&format!("Catalog load failed: {}", e));
            Self::default()
        })
    }

    pub fn items(&self) -> &[LearningItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&LearningItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn vocabulary(&self) -> Vec<LearningItem> {
        self.items.clone()
    }

    pub fn writing_items(&self) -> Vec<LearningItem> {
        self.filtered(LearningItem::has_writing_challenge)
    }

    pub fn quiz_items(&self) -> Vec<LearningItem> {
        self.filtered(LearningItem::has_quiz)
    }

    pub fn scenario_items(&self) -> Vec<LearningItem> {
        self.filtered(|item| item.scenario_data.is_some())
    }

    /// Items whose id is flagged true, in catalog order. Unknown ids are ignored.
    pub fn flagged(&self, flags: &BTreeMap<ItemId, bool>) -> Vec<LearningItem> {
        self.filtered(|item| flags.get(&item.id).copied().unwrap_or(false))
    }

    /// Per-category totals in order of first appearance.
    pub fn category_stats(&self, checked: &BTreeMap<ItemId, bool>) -> Vec<CategoryStat> {
        let mut stats: Vec<CategoryStat> = Vec::new();
        for item in &self.items {
            let index = match stats.iter().position(|s| s.category == item.category) {
                Some(index) => index,
                None => {
                    stats.push(CategoryStat {
                        category: item.category.clone(),
                        total: 0,
                        checked: 0,
                    });
                    stats.len() - 1
                }
            };
            stats[index].total += 1;
            if checked.get(&item.id).copied().unwrap_or(false) {
                stats[index].checked += 1;
            }
        }
        stats
    }

    fn filtered<F>(&self, predicate: F) -> Vec<LearningItem>
    where
        F: Fn(&LearningItem) -> bool,
    {
        self.items.iter().filter(|&item| predicate(item)).cloned().collect()
    }
}

pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = fs::read_to_string(path)?;
    parse_catalog(&content)
}

pub fn parse_catalog(content: &str) -> Result<Catalog, CatalogError> {
    let items: Vec<LearningItem> = serde_json::from_str(content)?;
    Ok(Catalog::new(items))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"id": 1, "category": "가족", "koreanWord": "할머니", "writingChallenge": "할머니께서 아프십니다."},
        {"id": 2, "category": "병원", "koreanWord": "병원",
         "vietnameseSentence": "Tôi đi bệnh viện.", "koreanOptions": ["병원에 가요.", "학교에 가요."], "correctAnswer": 0},
        {"id": 3, "category": "가족", "koreanWord": "어머니",
         "scenarioData": {"title": "t", "description": "d", "sampleMessages": ["m"]}}
    ]"#;

    #[test]
    fn test_bundled_catalog_parses() {
        let catalog = Catalog::bundled().unwrap();
        assert!(!catalog.is_empty());
        assert!(!catalog.writing_items().is_empty());
        assert!(!catalog.quiz_items().is_empty());
        assert!(!catalog.scenario_items().is_empty());
    }

    #[test]
    fn test_filtered_views_keep_catalog_order() {
        let catalog = parse_catalog(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.writing_items()[0].id, 1);
        assert_eq!(catalog.quiz_items()[0].id, 2);
        assert_eq!(catalog.scenario_items()[0].id, 3);
        assert_eq!(catalog.get(2).unwrap().korean_word, "병원");
        assert!(catalog.get(99).is_none());
    }

    #[test]
    fn test_flagged_ignores_false_and_stale_ids() {
        let catalog = parse_catalog(SAMPLE).unwrap();
        let flags = BTreeMap::from([(1, true), (2, false), (42, true)]);
        let flagged = catalog.flagged(&flags);
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].id, 1);
    }

    #[test]
    fn test_category_stats() {
        let catalog = parse_catalog(SAMPLE).unwrap();
        let checked = BTreeMap::from([(3, true)]);
        let stats = catalog.category_stats(&checked);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].category, "가족");
        assert_eq!(stats[0].total, 2);
        assert_eq!(stats[0].checked, 1);
        assert_eq!(stats[0].percent(), 50);
        assert_eq!(stats[1].percent(), 0);
    }

    #[test]
    fn test_load_missing_file_yields_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::load(Some(&dir.path().join("missing.json")));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_catalog_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.json");
        std::fs::write(&path, SAMPLE).unwrap();
        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            parse_catalog("{not json"),
            Err(CatalogError::Parse(_))
        ));
    }
}
