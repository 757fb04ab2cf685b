use std::collections::HashMap;

use super::matcher::{match_tier, MatchTier};
use crate::workflows::monitoring::domain::{Association, AssociationId, Project, ProjectId};

/// Canonical association records indexed for label reconciliation.
///
/// Built once per snapshot from the projects' nested association lists. The
/// fuzzy matcher runs only here, as the one-time reconciliation step; lookups
/// on already-canonical labels stay a plain map hit.
#[derive(Debug, Default)]
pub struct AssociationDirectory {
    entries: Vec<DirectoryEntry>,
    by_key: HashMap<String, usize>,
}

/// Directory view of one canonical association and its owning project.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub association_id: AssociationId,
    pub name: String,
    pub location: Option<String>,
    pub active_members: Option<u32>,
    pub project_id: ProjectId,
    pub project_name: String,
}

impl AssociationDirectory {
    pub fn from_projects(projects: &[Project]) -> Self {
        let mut directory = Self::default();
        for project in projects {
            for association in &project.associations {
                directory.insert(project, association);
            }
        }
        directory
    }

    fn insert(&mut self, project: &Project, association: &Association) {
        let key = lookup_key(&association.name);
        if key.is_empty() {
            return;
        }
        let index = self.entries.len();
        self.entries.push(DirectoryEntry {
            association_id: association.id.clone(),
            name: association.name.clone(),
            location: association.location.clone(),
            active_members: association.active_members,
            project_id: project.id.clone(),
            project_name: project.name.clone(),
        });
        // First writer wins when two projects record the same name.
        self.by_key.entry(key).or_insert(index);
    }

    /// Exact lookup on the normalized label.
    pub fn lookup(&self, label: &str) -> Option<&DirectoryEntry> {
        let key = lookup_key(label);
        if key.is_empty() {
            return None;
        }
        self.by_key.get(&key).map(|index| &self.entries[*index])
    }

    /// Reconciles a loose label: exact lookup first, then the fuzzy tiers in
    /// directory order. Returns the binding tier for diagnostics.
    pub fn reconcile(&self, label: &str) -> Option<(&DirectoryEntry, MatchTier)> {
        if let Some(entry) = self.lookup(label) {
            return Some((entry, MatchTier::Exact));
        }
        self.entries
            .iter()
            .find_map(|entry| match_tier(label, &entry.name).map(|tier| (entry, tier)))
    }

    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn lookup_key(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
