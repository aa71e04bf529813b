use crate::model::{NodeId, TaxonomyNode};
use std::borrow::Cow;
use std::collections::BTreeSet;

/// Multi-select value for one taxonomy level. Order is irrelevant.
pub type SelectionSet = BTreeSet<NodeId>;

/// Children of a single parent. No parent means no options: a cleared
/// parent never falls back to the whole universe.
pub fn filter_by_parent(nodes: &[TaxonomyNode], parent_id: Option<&NodeId>) -> Vec<TaxonomyNode> {
    match parent_id {
        Some(parent_id) => nodes
            .iter()
            .filter(|node| node.is_child_of(parent_id))
            .cloned()
            .collect(),
        None => Vec::new(),
    }
}

/// Children of any of the selected parents.
///
/// An empty selection is "no constraint": the universe itself is returned
/// borrowed, not a filtered copy.
pub fn filter_by_parents<'a>(
    nodes: &'a [TaxonomyNode],
    selected: &SelectionSet,
) -> Cow<'a, [TaxonomyNode]> {
    if selected.is_empty() {
        Cow::Borrowed(nodes)
    } else {
        Cow::Owned(children_of(nodes, selected))
    }
}

/// Strict variant of [`filter_by_parents`]: an empty parent set matches nothing.
pub fn children_of(nodes: &[TaxonomyNode], parents: &SelectionSet) -> Vec<TaxonomyNode> {
    nodes
        .iter()
        .filter(|node| {
            node.parent_id
                .as_ref()
                .is_some_and(|parent_id| parents.contains(parent_id))
        })
        .cloned()
        .collect()
}

pub fn ids_of(nodes: &[TaxonomyNode]) -> SelectionSet {
    nodes.iter().map(|node| node.id.clone()).collect()
}

/// Drop every selected id that is not among `allowed`. Returns the dropped ids.
pub fn reconcile(selection: &mut SelectionSet, allowed: &[TaxonomyNode]) -> Vec<NodeId> {
    if selection.is_empty() {
        return Vec::new();
    }

    let allowed_ids = ids_of(allowed);
    let dropped: Vec<NodeId> = selection.difference(&allowed_ids).cloned().collect();
    selection.retain(|id| allowed_ids.contains(id));
    dropped
}
