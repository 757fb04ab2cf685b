//! Caretaker identity resolution against canonical association records.
//!
//! Caretakers arrive keyed by free-text association labels. This module
//! groups them under canonical headings for the admin console, produces the
//! candidate list offered when attaching caretakers to a site visit, and
//! reports which comparison tier bound each caretaker so coordinators can
//! audit the reconciliation before migrating to stable identifiers.

mod directory;
mod matcher;

pub use directory::{AssociationDirectory, DirectoryEntry};
pub use matcher::{match_tier, names_match, MatchTier};

use serde::Serialize;

use crate::workflows::monitoring::domain::{AssociationId, Caretaker, CaretakerId};

/// Roster of caretakers grouped under canonical association headings, with an
/// explicit bucket for labels that resolved to nothing.
#[derive(Debug, Clone, Serialize)]
pub struct CaretakerGrouping {
    pub groups: Vec<AssociationGroup>,
    pub unassigned: Vec<UnassignedCaretaker>,
}

impl CaretakerGrouping {
    pub fn assigned_count(&self) -> usize {
        self.groups.iter().map(|group| group.members.len()).sum()
    }
}

/// One canonical association heading and the caretakers resolved to it.
#[derive(Debug, Clone, Serialize)]
pub struct AssociationGroup {
    pub association_id: AssociationId,
    pub association_name: String,
    pub location: Option<String>,
    pub active_members: Option<u32>,
    pub members: Vec<GroupedCaretaker>,
}

/// Caretaker bound to a heading, with the tier that bound it (diagnostic).
#[derive(Debug, Clone, Serialize)]
pub struct GroupedCaretaker {
    pub id: CaretakerId,
    pub name: String,
    pub recorded_label: String,
    pub match_tier: &'static str,
}

/// Caretaker whose label was blank or matched no canonical association.
#[derive(Debug, Clone, Serialize)]
pub struct UnassignedCaretaker {
    pub id: CaretakerId,
    pub name: String,
    pub recorded_label: Option<String>,
}

/// Caretaker offered for attachment to a visit, carrying the recorded label
/// that qualified them.
#[derive(Debug, Clone, Serialize)]
pub struct VisitCandidate {
    pub id: CaretakerId,
    pub name: String,
    pub recorded_label: String,
}

/// Resolves every caretaker's label through the directory once and groups the
/// roster under canonical headings. Headings keep directory order; caretakers
/// keep roster order within their bucket.
pub fn group_caretakers(
    caretakers: &[Caretaker],
    directory: &AssociationDirectory,
) -> CaretakerGrouping {
    let mut groups: Vec<AssociationGroup> = directory
        .entries()
        .iter()
        .map(|entry| AssociationGroup {
            association_id: entry.association_id.clone(),
            association_name: entry.name.clone(),
            location: entry.location.clone(),
            active_members: entry.active_members,
            members: Vec::new(),
        })
        .collect();
    let mut unassigned = Vec::new();

    for caretaker in caretakers {
        let label = caretaker.association_label();
        let resolved = label.and_then(|label| directory.reconcile(label));

        match (label, resolved) {
            (Some(label), Some((entry, tier))) => {
                if let Some(group) = groups
                    .iter_mut()
                    .find(|group| group.association_id == entry.association_id)
                {
                    group.members.push(GroupedCaretaker {
                        id: caretaker.id.clone(),
                        name: caretaker.name.clone(),
                        recorded_label: label.to_string(),
                        match_tier: tier.label(),
                    });
                }
            }
            (label, _) => unassigned.push(UnassignedCaretaker {
                id: caretaker.id.clone(),
                name: caretaker.name.clone(),
                recorded_label: label.map(str::to_string),
            }),
        }
    }

    CaretakerGrouping { groups, unassigned }
}

/// Caretakers whose recorded label matches the given association name; this
/// is the list offered when attaching caretakers to a visit for that
/// association. Blank labels never match.
pub fn candidates_for<'a>(
    association_name: &str,
    caretakers: &'a [Caretaker],
) -> Vec<&'a Caretaker> {
    caretakers
        .iter()
        .filter(|caretaker| {
            caretaker
                .association_label()
                .map(|label| names_match(label, association_name))
                .unwrap_or(false)
        })
        .collect()
}
