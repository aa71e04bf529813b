use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Opaque identifier of a taxonomy node.
///
/// The backend emits ids either as strings (document ids) or as integers,
/// depending on the endpoint. Both are accepted and compared as text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Read an id out of a JSON scalar. Blank strings and non-scalars yield `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(raw) => {
                let trimmed = raw.trim();
                (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
            }
            Value::Number(number) => Some(Self(number.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        NodeId::from_json(&value)
            .ok_or_else(|| de::Error::custom(format!("invalid node id: {value}")))
    }
}

/// One level of the taxonomy hierarchy, root first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Level {
    Religion,
    Caste,
    SubCaste,
    Gotra,
}

impl Level {
    pub const COUNT: usize = 4;
    pub const ALL: [Level; Level::COUNT] =
        [Level::Religion, Level::Caste, Level::SubCaste, Level::Gotra];

    pub fn index(self) -> usize {
        match self {
            Level::Religion => 0,
            Level::Caste => 1,
            Level::SubCaste => 2,
            Level::Gotra => 3,
        }
    }

    pub fn parent(self) -> Option<Level> {
        match self {
            Level::Religion => None,
            Level::Caste => Some(Level::Religion),
            Level::SubCaste => Some(Level::Caste),
            Level::Gotra => Some(Level::SubCaste),
        }
    }

    pub fn child(self) -> Option<Level> {
        match self {
            Level::Religion => Some(Level::Caste),
            Level::Caste => Some(Level::SubCaste),
            Level::SubCaste => Some(Level::Gotra),
            Level::Gotra => None,
        }
    }

    /// Levels strictly below this one, nearest first.
    pub fn descendants(self) -> impl Iterator<Item = Level> {
        Level::ALL.into_iter().skip(self.index() + 1)
    }

    /// JSON fields that may carry the parent reference, flat ids first.
    pub fn parent_keys(self) -> &'static [&'static str] {
        match self {
            Level::Religion => &[],
            Level::Caste => &["religionId", "religion_id", "religion"],
            Level::SubCaste => &["casteId", "caste_id", "caste"],
            Level::Gotra => &[
                "subCasteId",
                "subcasteId",
                "sub_caste_id",
                "subCaste",
                "subcaste",
            ],
        }
    }

    /// Query parameter used when fetching this level scoped to its parent.
    pub fn scope_param(self) -> Option<&'static str> {
        match self {
            Level::Religion => None,
            Level::Caste => Some("religionId"),
            Level::SubCaste => Some("casteId"),
            Level::Gotra => Some("subCasteId"),
        }
    }

    /// REST collection segment for this level.
    pub fn segment(self) -> &'static str {
        match self {
            Level::Religion => "religion",
            Level::Caste => "caste",
            Level::SubCaste => "subcaste",
            Level::Gotra => "gotra",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Religion => "religion",
            Level::Caste => "caste",
            Level::SubCaste => "sub-caste",
            Level::Gotra => "gotra",
        };
        f.write_str(name)
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "religion" => Ok(Level::Religion),
            "caste" => Ok(Level::Caste),
            "sub-caste" | "subcaste" => Ok(Level::SubCaste),
            "gotra" => Ok(Level::Gotra),
            other => Err(format!(
                "unknown taxonomy level '{other}' (expected religion, caste, sub-caste or gotra)"
            )),
        }
    }
}

/// Reservation category attached to castes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CasteCategory {
    General,
    Obc,
    Sc,
    St,
    Other,
}

impl CasteCategory {
    /// Map a backend category label; anything unrecognised becomes [`CasteCategory::Other`].
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "general" | "gen" | "open" => CasteCategory::General,
            "obc" => CasteCategory::Obc,
            "sc" => CasteCategory::Sc,
            "st" => CasteCategory::St,
            _ => CasteCategory::Other,
        }
    }
}

/// Canonical taxonomy node. Every payload is normalized into this shape
/// before it reaches filtering code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyNode {
    pub level: Level,
    pub id: NodeId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CasteCategory>,
}

impl TaxonomyNode {
    pub fn new(level: Level, id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            level,
            id: id.into(),
            name: name.into(),
            parent_id: None,
            category: None,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<NodeId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_category(mut self, category: CasteCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn is_child_of(&self, parent_id: &NodeId) -> bool {
        self.parent_id.as_ref() == Some(parent_id)
    }
}

/// Normalize one backend object into a [`TaxonomyNode`].
///
/// Accepts `id` or `_id`, and the parent either as a flat id field
/// (`religionId`) or a nested object (`religion: { _id }`). Returns `None`
/// when the entry carries no usable id.
pub fn normalize(level: Level, value: &Value) -> Option<TaxonomyNode> {
    let object = value.as_object()?;
    let id = object
        .get("id")
        .or_else(|| object.get("_id"))
        .and_then(NodeId::from_json)?;

    let name = object
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string();

    let parent_id = level
        .parent_keys()
        .iter()
        .find_map(|key| object.get(*key).and_then(parent_reference));

    let category = match level {
        Level::Caste => object
            .get("category")
            .and_then(Value::as_str)
            .map(CasteCategory::from_wire),
        _ => None,
    };

    Some(TaxonomyNode {
        level,
        id,
        name,
        parent_id,
        category,
    })
}

/// Normalize a list of backend objects, skipping entries without an id.
pub fn normalize_all(level: Level, values: &[Value]) -> Vec<TaxonomyNode> {
    values
        .iter()
        .filter_map(|value| {
            let node = normalize(level, value);
            if node.is_none() {
                log::debug!("Skipping {level} entry without an id: {value}");
            }
            node
        })
        .collect()
}

fn parent_reference(value: &Value) -> Option<NodeId> {
    match value {
        Value::Object(nested) => nested
            .get("id")
            .or_else(|| nested.get("_id"))
            .and_then(NodeId::from_json),
        other => NodeId::from_json(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_flat_parent_id() {
        let raw = json!({ "_id": "c1", "name": "Maratha", "religionId": "r1", "category": "OBC" });

        let node = normalize(Level::Caste, &raw).unwrap();

        assert_eq!(node.id, NodeId::new("c1"));
        assert_eq!(node.name, "Maratha");
        assert_eq!(node.parent_id, Some(NodeId::new("r1")));
        assert_eq!(node.category, Some(CasteCategory::Obc));
    }

    #[test]
    fn test_normalize_nested_parent_object() {
        let raw = json!({ "id": 7, "name": "Kunbi", "caste": { "_id": "c1", "name": "Maratha" } });

        let node = normalize(Level::SubCaste, &raw).unwrap();

        assert_eq!(node.id, NodeId::new("7"));
        assert_eq!(node.parent_id, Some(NodeId::new("c1")));
        assert_eq!(node.category, None);
    }

    #[test]
    fn test_normalize_prefers_flat_over_nested() {
        let raw = json!({
            "_id": "g1",
            "name": "Kashyap",
            "subCasteId": "s1",
            "subCaste": { "_id": "s2" }
        });

        let node = normalize(Level::Gotra, &raw).unwrap();
        assert_eq!(node.parent_id, Some(NodeId::new("s1")));
    }

    #[test]
    fn test_normalize_without_id_is_skipped() {
        let values = vec![
            json!({ "name": "No id" }),
            json!({ "_id": "", "name": "Blank id" }),
            json!({ "_id": "r1", "name": "Hindu" }),
            json!("not an object"),
        ];

        let nodes = normalize_all(Level::Religion, &values);

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].id, NodeId::new("r1"));
        assert_eq!(nodes[0].parent_id, None);
    }

    #[test]
    fn test_religion_ignores_parent_like_fields() {
        let raw = json!({ "_id": "r1", "name": "Hindu", "religionId": "r0" });
        let node = normalize(Level::Religion, &raw).unwrap();
        assert_eq!(node.parent_id, None);
    }

    #[test]
    fn test_unknown_category_maps_to_other() {
        assert_eq!(CasteCategory::from_wire("NT-B"), CasteCategory::Other);
        assert_eq!(CasteCategory::from_wire(" sc "), CasteCategory::Sc);
    }

    #[test]
    fn test_level_navigation() {
        assert_eq!(Level::Religion.parent(), None);
        assert_eq!(Level::Gotra.child(), None);
        assert_eq!(Level::Caste.child(), Some(Level::SubCaste));
        assert_eq!(
            Level::Caste.descendants().collect::<Vec<_>>(),
            vec![Level::SubCaste, Level::Gotra]
        );
        assert_eq!(Level::Gotra.descendants().count(), 0);
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!("Sub Caste".parse::<Level>(), Ok(Level::SubCaste));
        assert_eq!("sub_caste".parse::<Level>(), Ok(Level::SubCaste));
        assert_eq!("gotra".parse::<Level>(), Ok(Level::Gotra));
        assert!("marital-status".parse::<Level>().is_err());
    }

    #[test]
    fn test_node_id_deserializes_from_number_or_string() {
        let ids: Vec<NodeId> = serde_json::from_value(json!([1, "a1", " b2 "])).unwrap();
        assert_eq!(
            ids,
            vec![NodeId::new("1"), NodeId::new("a1"), NodeId::new("b2")]
        );
        assert!(serde_json::from_value::<NodeId>(json!(null)).is_err());
    }
}
