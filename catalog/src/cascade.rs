//! Single-select taxonomy chain used by profile forms and the caste-chain
//! admin screens: religion → caste → sub-caste → gotra, one value per level.
//!
//! Selecting a value resets everything below it and asks the caller to
//! fetch the next level scoped to the new value. Clearing a value clears
//! the levels below it; they are never repopulated with the full universe.
//!
//! Every level carries a generation counter. Changing a selection bumps the
//! generation of all deeper levels, so a fetch that completes after the user
//! moved on is recognised as stale and discarded.

use crate::errors::CatalogError;
use crate::model::{Level, NodeId, TaxonomyNode};
use crate::source::TaxonomySource;

/// A fetch the caller must perform after a selection change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Level whose options are being fetched.
    pub level: Level,
    /// Selected value of the parent level that scopes the fetch.
    pub parent_id: NodeId,
    pub generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct SingleSelectCascade {
    selected: [Option<NodeId>; Level::COUNT],
    options: [Vec<TaxonomyNode>; Level::COUNT],
    generations: [u64; Level::COUNT],
}

impl SingleSelectCascade {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the root (religion) options, which are not scoped by anything.
    pub fn set_root_options(&mut self, religions: Vec<TaxonomyNode>) {
        self.options[Level::Religion.index()] = religions;
    }

    pub fn options(&self, level: Level) -> &[TaxonomyNode] {
        &self.options[level.index()]
    }

    pub fn selected(&self, level: Level) -> Option<&NodeId> {
        self.selected[level.index()].as_ref()
    }

    /// Set or clear the value at `level`.
    ///
    /// Returns the fetch needed to populate the next level, if any. Setting
    /// the value a level already holds changes nothing, and a value cannot be
    /// set below an unselected parent.
    pub fn select(&mut self, level: Level, value: Option<NodeId>) -> Option<FetchRequest> {
        if self.selected[level.index()] == value {
            return None;
        }

        if let (Some(parent), Some(id)) = (level.parent(), value.as_ref()) {
            if self.selected[parent.index()].is_none() {
                log::debug!("Ignoring {level} {id}: no {parent} selected");
                return None;
            }
        }

        log::debug!(
            "Cascade {level} changed: {:?} -> {:?}",
            self.selected[level.index()],
            value
        );
        self.selected[level.index()] = value.clone();

        for deeper in level.descendants() {
            let slot = deeper.index();
            self.selected[slot] = None;
            self.options[slot].clear();
            self.generations[slot] += 1;
        }

        let child = level.child()?;
        let parent_id = value?;
        Some(FetchRequest {
            level: child,
            parent_id,
            generation: self.generations[child.index()],
        })
    }

    /// Install fetched options for a request.
    ///
    /// Returns `false` and leaves the cascade untouched when the request has
    /// been superseded. Nodes that carry no parent are attributed to the
    /// requested parent; nodes that name a different parent are dropped.
    pub fn apply(&mut self, request: &FetchRequest, nodes: Vec<TaxonomyNode>) -> bool {
        if !self.is_current(request) {
            log::debug!(
                "Discarding stale {} options for parent {} (generation {})",
                request.level,
                request.parent_id,
                request.generation
            );
            return false;
        }

        let options = nodes
            .into_iter()
            .filter_map(|mut node| {
                let parent_id = node
                    .parent_id
                    .get_or_insert_with(|| request.parent_id.clone());
                if *parent_id == request.parent_id {
                    return Some(node);
                }

                log::debug!(
                    "Dropping {} {} scoped to {parent_id}, expected {}",
                    request.level,
                    node.id,
                    request.parent_id
                );
                None
            })
            .collect();

        self.options[request.level.index()] = options;
        true
    }

    pub fn is_current(&self, request: &FetchRequest) -> bool {
        let Some(parent) = request.level.parent() else {
            return false;
        };

        self.generations[request.level.index()] == request.generation
            && self.selected[parent.index()].as_ref() == Some(&request.parent_id)
    }

    /// Clear every selection and every scoped option list.
    pub fn reset(&mut self) {
        for level in Level::ALL {
            let slot = level.index();
            self.selected[slot] = None;
            self.generations[slot] += 1;
            if level.parent().is_some() {
                self.options[slot].clear();
            }
        }
        log::debug!("Cascade reset");
    }
}

/// Drives a [`SingleSelectCascade`] against a [`TaxonomySource`].
pub struct CascadeDriver<S> {
    source: S,
    cascade: SingleSelectCascade,
}

impl<S> CascadeDriver<S>
where
    S: TaxonomySource,
{
    pub fn new(source: S) -> Self {
        Self {
            source,
            cascade: SingleSelectCascade::new(),
        }
    }

    pub fn cascade(&self) -> &SingleSelectCascade {
        &self.cascade
    }

    pub async fn load_religions(&mut self) -> Result<usize, CatalogError> {
        let religions = self.source.fetch_all(Level::Religion).await?;
        let count = religions.len();
        self.cascade.set_root_options(religions);
        log::info!("Loaded {count} religions");
        Ok(count)
    }

    /// Select a value and fetch the options it unlocks.
    ///
    /// Returns whether new options were installed.
    pub async fn select(
        &mut self,
        level: Level,
        value: Option<NodeId>,
    ) -> Result<bool, CatalogError> {
        let Some(request) = self.cascade.select(level, value) else {
            return Ok(false);
        };

        let nodes = self
            .source
            .fetch_children(request.level, &request.parent_id)
            .await?;
        Ok(self.cascade.apply(&request, nodes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::*;

    fn id(raw: &str) -> NodeId {
        NodeId::new(raw)
    }

    fn castes_of_a() -> Vec<TaxonomyNode> {
        vec![
            TaxonomyNode::new(Level::Caste, "1", "Maratha").with_parent("A"),
            TaxonomyNode::new(Level::Caste, "3", "Brahmin"),
        ]
    }

    #[test]
    fn test_selecting_religion_requests_castes() {
        let mut cascade = SingleSelectCascade::new();

        let request = cascade.select(Level::Religion, Some(id("A"))).unwrap();

        assert_eq!(request.level, Level::Caste);
        assert_eq!(request.parent_id, id("A"));
        assert!(cascade.apply(&request, castes_of_a()));
        assert_eq!(cascade.options(Level::Caste).len(), 2);
        assert!(
            cascade
                .options(Level::Caste)
                .iter()
                .all(|node| node.is_child_of(&id("A")))
        );
    }

    #[test]
    fn test_changing_religion_resets_caste_and_sub_caste() {
        let mut cascade = SingleSelectCascade::new();
        let request = cascade.select(Level::Religion, Some(id("A"))).unwrap();
        cascade.apply(&request, castes_of_a());
        let request = cascade.select(Level::Caste, Some(id("1"))).unwrap();
        cascade.apply(
            &request,
            vec![TaxonomyNode::new(Level::SubCaste, "s1", "Kunbi")],
        );
        cascade.select(Level::SubCaste, Some(id("s1")));

        cascade.select(Level::Religion, Some(id("B")));

        assert_eq!(cascade.selected(Level::Caste), None);
        assert_eq!(cascade.selected(Level::SubCaste), None);
        assert!(cascade.options(Level::Caste).is_empty());
        assert!(cascade.options(Level::SubCaste).is_empty());
        assert!(cascade.options(Level::Gotra).is_empty());
    }

    #[test]
    fn test_cleared_religion_rejects_in_flight_castes() {
        let mut cascade = SingleSelectCascade::new();
        let request = cascade.select(Level::Religion, Some(id("A"))).unwrap();

        assert_eq!(cascade.select(Level::Religion, None), None);
        assert!(!cascade.apply(&request, castes_of_a()));

        assert_eq!(cascade.selected(Level::Caste), None);
        assert_eq!(cascade.selected(Level::SubCaste), None);
        assert!(cascade.options(Level::Caste).is_empty());
    }

    #[test]
    fn test_reselecting_same_religion_after_clear_rejects_old_fetch() {
        let mut cascade = SingleSelectCascade::new();
        let first = cascade.select(Level::Religion, Some(id("A"))).unwrap();
        cascade.select(Level::Religion, None);
        let second = cascade.select(Level::Religion, Some(id("A"))).unwrap();

        assert_ne!(first.generation, second.generation);
        assert!(!cascade.apply(&first, castes_of_a()));
        assert!(cascade.apply(&second, castes_of_a()));
    }

    #[test]
    fn test_same_value_is_a_no_op() {
        let mut cascade = SingleSelectCascade::new();
        let request = cascade.select(Level::Religion, Some(id("A"))).unwrap();
        cascade.apply(&request, castes_of_a());

        assert_eq!(cascade.select(Level::Religion, Some(id("A"))), None);
        assert_eq!(cascade.options(Level::Caste).len(), 2);
    }

    #[test]
    fn test_foreign_parent_nodes_are_dropped() {
        let mut cascade = SingleSelectCascade::new();
        let request = cascade.select(Level::Religion, Some(id("A"))).unwrap();

        cascade.apply(
            &request,
            vec![
                TaxonomyNode::new(Level::Caste, "1", "Maratha").with_parent("A"),
                TaxonomyNode::new(Level::Caste, "2", "Syed").with_parent("B"),
            ],
        );

        assert_eq!(cascade.options(Level::Caste).len(), 1);
        assert_eq!(cascade.options(Level::Caste)[0].id, id("1"));
    }

    #[test]
    fn test_gotra_has_no_child_fetch() {
        let mut cascade = SingleSelectCascade::new();
        cascade.select(Level::Religion, Some(id("A")));
        cascade.select(Level::Caste, Some(id("1")));
        assert_some!(cascade.select(Level::SubCaste, Some(id("s1"))));

        assert_eq!(cascade.select(Level::Gotra, Some(id("g1"))), None);
        assert_eq!(cascade.selected(Level::Gotra), Some(&id("g1")));
    }

    #[test]
    fn test_reset_clears_everything_but_root_options() {
        let mut cascade = SingleSelectCascade::new();
        cascade.set_root_options(vec![TaxonomyNode::new(Level::Religion, "A", "Hindu")]);
        let request = cascade.select(Level::Religion, Some(id("A"))).unwrap();
        cascade.apply(&request, castes_of_a());

        cascade.reset();
        assert_eq!(cascade.selected(Level::Religion), None);
        assert!(cascade.options(Level::Caste).is_empty());
        assert_eq!(cascade.options(Level::Religion).len(), 1);
    }

    #[test]
    fn test_child_without_parent_is_ignored() {
        let mut cascade = SingleSelectCascade::new();

        assert_eq!(cascade.select(Level::Caste, Some(id("c1"))), None);
        assert_eq!(cascade.select(Level::SubCaste, Some(id("s1"))), None);

        assert_eq!(cascade.selected(Level::Caste), None);
        assert_eq!(cascade.selected(Level::SubCaste), None);
    }

    #[test]
    fn test_reset_clears_deep_selections_and_rejects_in_flight_fetches() {
        let mut cascade = SingleSelectCascade::new();
        let religion = cascade.select(Level::Religion, Some(id("A"))).unwrap();
        cascade.apply(&religion, castes_of_a());
        let caste = cascade.select(Level::Caste, Some(id("1"))).unwrap();
        cascade.select(Level::SubCaste, Some(id("s1")));

        cascade.reset();

        for level in Level::ALL {
            assert_eq!(cascade.selected(level), None, "{level}");
        }
        assert!(!cascade.apply(&caste, vec![TaxonomyNode::new(Level::SubCaste, "s1", "Kunbi")]));
        assert!(cascade.options(Level::SubCaste).is_empty());
    }
}
