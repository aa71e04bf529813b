//! Multi-select partner-preference filters.
//!
//! The full religion, caste and sub-caste universes are loaded once and
//! narrowed locally as the selections change. An empty selection at a level
//! never restricts the levels below it.
//!
//! Every mutation finishes with reconciliation, always in this order:
//!
//! 1. recompute the allowed castes and drop stale caste selections;
//! 2. recompute the allowed sub-castes (from the already reconciled castes)
//!    and drop stale sub-caste selections.
//!
//! Narrowing therefore propagates transitively: removing a religion can
//! remove castes, which in turn removes their sub-castes.

use crate::filter::{SelectionSet, children_of, filter_by_parents, ids_of, reconcile};
use crate::model::{Level, NodeId, TaxonomyNode};
use serde::Serialize;
use std::borrow::Cow;

/// Ids removed from the selections by one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    pub castes: Vec<NodeId>,
    pub sub_castes: Vec<NodeId>,
}

impl Reconciliation {
    pub fn is_empty(&self) -> bool {
        self.castes.is_empty() && self.sub_castes.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PartnerPreferences {
    religions: Vec<TaxonomyNode>,
    castes: Vec<TaxonomyNode>,
    sub_castes: Vec<TaxonomyNode>,
    selected_religions: SelectionSet,
    selected_castes: SelectionSet,
    selected_sub_castes: SelectionSet,
}

impl PartnerPreferences {
    pub fn new(
        religions: Vec<TaxonomyNode>,
        castes: Vec<TaxonomyNode>,
        sub_castes: Vec<TaxonomyNode>,
    ) -> Self {
        Self {
            religions,
            castes,
            sub_castes,
            ..Self::default()
        }
    }

    /// Replace the universe for one level, e.g. when a late fetch completes.
    /// Gotras are not part of partner preferences and are ignored.
    pub fn set_universe(&mut self, level: Level, nodes: Vec<TaxonomyNode>) -> Reconciliation {
        match level {
            Level::Religion => self.religions = nodes,
            Level::Caste => self.castes = nodes,
            Level::SubCaste => self.sub_castes = nodes,
            Level::Gotra => {
                log::debug!("Partner preferences have no gotra level, ignoring universe");
                return Reconciliation::default();
            }
        }
        self.reconcile()
    }

    pub fn religion_options(&self) -> &[TaxonomyNode] {
        &self.religions
    }

    /// Castes whose religion is selected, or every caste when no religion is.
    pub fn filtered_castes(&self) -> Cow<'_, [TaxonomyNode]> {
        filter_by_parents(&self.castes, &self.selected_religions)
    }

    /// Sub-castes narrowed by the most specific non-empty selection above them.
    pub fn filtered_sub_castes(&self) -> Cow<'_, [TaxonomyNode]> {
        sub_caste_options(
            &self.sub_castes,
            &self.castes,
            &self.selected_religions,
            &self.selected_castes,
        )
    }

    pub fn options(&self, level: Level) -> Cow<'_, [TaxonomyNode]> {
        match level {
            Level::Religion => Cow::Borrowed(self.religion_options()),
            Level::Caste => self.filtered_castes(),
            Level::SubCaste => self.filtered_sub_castes(),
            Level::Gotra => Cow::Borrowed(&[]),
        }
    }

    /// Current selection at a level, sorted, ready for a controlled input.
    pub fn selected(&self, level: Level) -> Vec<NodeId> {
        match level {
            Level::Religion => self.selected_religions.iter().cloned().collect(),
            Level::Caste => self.selected_castes.iter().cloned().collect(),
            Level::SubCaste => self.selected_sub_castes.iter().cloned().collect(),
            Level::Gotra => Vec::new(),
        }
    }

    pub fn set_religions<I>(&mut self, ids: I) -> Reconciliation
    where
        I: IntoIterator<Item = NodeId>,
    {
        self.selected_religions = ids.into_iter().collect();
        self.reconcile()
    }

    pub fn set_castes<I>(&mut self, ids: I) -> Reconciliation
    where
        I: IntoIterator<Item = NodeId>,
    {
        self.selected_castes = ids.into_iter().collect();
        self.reconcile()
    }

    pub fn set_sub_castes<I>(&mut self, ids: I) -> Reconciliation
    where
        I: IntoIterator<Item = NodeId>,
    {
        self.selected_sub_castes = ids.into_iter().collect();
        self.reconcile()
    }

    /// Checkbox-style toggle of one id at a level.
    pub fn toggle(&mut self, level: Level, id: NodeId) -> Reconciliation {
        let selection = match level {
            Level::Religion => &mut self.selected_religions,
            Level::Caste => &mut self.selected_castes,
            Level::SubCaste => &mut self.selected_sub_castes,
            Level::Gotra => {
                log::debug!("Ignoring gotra toggle for {id}: not a partner-preference level");
                return Reconciliation::default();
            }
        };

        if !selection.remove(&id) {
            selection.insert(id);
        }
        self.reconcile()
    }

    fn reconcile(&mut self) -> Reconciliation {
        let castes = {
            let allowed = filter_by_parents(&self.castes, &self.selected_religions);
            reconcile(&mut self.selected_castes, &allowed)
        };

        let sub_castes = {
            let allowed = sub_caste_options(
                &self.sub_castes,
                &self.castes,
                &self.selected_religions,
                &self.selected_castes,
            );
            reconcile(&mut self.selected_sub_castes, &allowed)
        };

        let report = Reconciliation { castes, sub_castes };
        if !report.is_empty() {
            log::debug!(
                "Dropped stale partner-preference selections: castes={:?}, sub_castes={:?}",
                report.castes,
                report.sub_castes
            );
        }
        report
    }
}

fn sub_caste_options<'a>(
    sub_castes: &'a [TaxonomyNode],
    castes: &[TaxonomyNode],
    selected_religions: &SelectionSet,
    selected_castes: &SelectionSet,
) -> Cow<'a, [TaxonomyNode]> {
    if !selected_castes.is_empty() {
        return Cow::Owned(children_of(sub_castes, selected_castes));
    }

    if !selected_religions.is_empty() {
        let religion_castes = ids_of(&children_of(castes, selected_religions));
        return Cow::Owned(children_of(sub_castes, &religion_castes));
    }

    Cow::Borrowed(sub_castes)
}
