//! The three query operations.

use std::collections::BTreeMap;

use super::filter::{apply, FilterSpec};
use super::types::{EmptyReason, GroupKey, QueryOutcome};
use crate::dataset::Dataset;

/// Number of tickets matching `filter`. Zero is a normal result.
pub fn count(dataset: &Dataset, filter: &FilterSpec) -> usize {
    dataset.iter().filter(|t| filter.matches(t)).count()
}

/// Every matching ticket with all of its fields, or the empty marker.
pub fn list(dataset: &Dataset, filter: &FilterSpec) -> QueryOutcome {
    let tickets = apply(dataset, filter);
    if tickets.is_empty() {
        return QueryOutcome::empty(EmptyReason::NoTickets);
    }

    QueryOutcome::Tickets {
        tickets: tickets.into_iter().cloned().collect(),
    }
}

/// Count matching tickets per value of `key`, or the empty marker.
pub fn group_by(dataset: &Dataset, key: GroupKey, filter: &FilterSpec) -> QueryOutcome {
    let tickets = apply(dataset, filter);
    if tickets.is_empty() {
        return QueryOutcome::empty(EmptyReason::NoGroupData);
    }

    let mut groups = BTreeMap::new();
    for ticket in tickets {
        *groups.entry(key.value_of(ticket)).or_insert(0) += 1;
    }

    QueryOutcome::Groups {
        group_by: key,
        groups,
    }
}
