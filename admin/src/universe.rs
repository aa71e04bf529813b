use crate::error::{AppError, AppResult};
use catalog::model::normalize_all;
use catalog::{Level, PartnerPreferences, StaticTaxonomySource, TaxonomyNode};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Raw universe file: one array of backend-shaped records per level.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUniverse {
    #[serde(default)]
    religions: Vec<Value>,
    #[serde(default)]
    castes: Vec<Value>,
    #[serde(default)]
    sub_castes: Vec<Value>,
    #[serde(default)]
    gotras: Vec<Value>,
}

/// Normalized taxonomy universes loaded from a local JSON export.
#[derive(Debug, Clone, Default)]
pub struct Universe {
    pub religions: Vec<TaxonomyNode>,
    pub castes: Vec<TaxonomyNode>,
    pub sub_castes: Vec<TaxonomyNode>,
    pub gotras: Vec<TaxonomyNode>,
}

impl Universe {
    pub fn from_json(content: &str) -> AppResult<Self> {
        let raw: RawUniverse = serde_json::from_str(content)
            .map_err(|e| AppError::Validation(format!("Invalid universe file: {e}")))?;

        let universe = Self {
            religions: normalize_all(Level::Religion, &raw.religions),
            castes: normalize_all(Level::Caste, &raw.castes),
            sub_castes: normalize_all(Level::SubCaste, &raw.sub_castes),
            gotras: normalize_all(Level::Gotra, &raw.gotras),
        };

        log::debug!(
            "Loaded universe: {} religions, {} castes, {} sub-castes, {} gotras",
            universe.religions.len(),
            universe.castes.len(),
            universe.sub_castes.len(),
            universe.gotras.len()
        );
        Ok(universe)
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Io(format!(
                "Failed to read universe file '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_json(&content)
    }

    pub fn into_preferences(self) -> PartnerPreferences {
        PartnerPreferences::new(self.religions, self.castes, self.sub_castes)
    }

    pub fn into_source(self) -> StaticTaxonomySource {
        StaticTaxonomySource::new()
            .with_level(Level::Religion, self.religions)
            .with_level(Level::Caste, self.castes)
            .with_level(Level::SubCaste, self.sub_castes)
            .with_level(Level::Gotra, self.gotras)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::NodeId;
    use claims::*;

    const MIXED_SHAPES: &str = r#"{
        "religions": [{"_id": "r1", "name": "Hindu"}, {"id": 2, "name": "Jain"}],
        "castes": [
            {"id": "c1", "name": "Brahmin", "religionId": "r1", "category": "General"},
            {"_id": "c2", "name": "Oswal", "religion": {"_id": "2"}}
        ],
        "subCastes": [{"id": "s1", "name": "Kanyakubja", "caste": {"id": "c1"}}]
    }"#;

    #[test]
    fn test_mixed_shapes_are_normalized() {
        let universe = assert_ok!(Universe::from_json(MIXED_SHAPES));

        assert_eq!(universe.religions.len(), 2);
        assert_eq!(universe.castes[1].parent_id, Some(NodeId::from("2")));
        assert_eq!(universe.sub_castes[0].parent_id, Some(NodeId::from("c1")));
        assert!(universe.gotras.is_empty());
    }

    #[test]
    fn test_preferences_filter_loaded_universe() {
        let mut prefs = assert_ok!(Universe::from_json(MIXED_SHAPES)).into_preferences();
        prefs.set_religions(vec![NodeId::from("2")]);

        let castes = prefs.filtered_castes();
        assert_eq!(castes.len(), 1);
        assert_eq!(castes[0].name, "Oswal");
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        assert_err!(Universe::from_json("[1, 2"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Universe::load(&dir.path().join("none.json"));
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
