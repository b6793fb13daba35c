//! Per-status counters shown above the list tables.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

use crate::domain::types::Choice;
use crate::query::engine::Filterable;

/// Count of records per status over a filtered, unpaginated set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusCounts<S: Choice> {
    counts: BTreeMap<S, usize>,
}

impl<S: Choice> Default for StatusCounts<S> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }
}

impl<S: Choice> StatusCounts<S> {
    /// Counts the statuses of the given records.
    pub fn tally<'a, T, I>(items: I) -> Self
    where
        T: Filterable<Status = S> + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        Self::from_statuses(items.into_iter().map(|item| item.status()))
    }

    pub fn from_statuses(statuses: impl IntoIterator<Item = S>) -> Self {
        let mut counts = BTreeMap::new();
        for status in statuses {
            *counts.entry(status).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn get(&self, status: S) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

#[derive(Serialize)]
struct StatusCountEntry {
    key: &'static str,
    label: &'static str,
    badge: &'static str,
    count: usize,
}

impl<S: Choice> Serialize for StatusCounts<S> {
    fn serialize<Z: Serializer>(&self, serializer: Z) -> Result<Z::Ok, Z::Error> {
        // Every known status is listed, zero counts included, in display order.
        let entries: Vec<StatusCountEntry> = S::all()
            .iter()
            .map(|status| StatusCountEntry {
                key: status.as_str(),
                label: status.label(),
                badge: status.badge(),
                count: self.get(*status),
            })
            .collect();

        let mut state = serializer.serialize_struct("StatusCounts", 2)?;
        state.serialize_field("total", &self.total())?;
        state.serialize_field("by_status", &entries)?;
        state.end()
    }
}
