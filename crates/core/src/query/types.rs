//! Group keys and query results.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::QueryError;
use crate::dataset::{Ticket, TicketField};

/// What to partition tickets by: a text field or the creation month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Field(TicketField),
    Month,
}

impl GroupKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupKey::Field(field) => field.as_str(),
            GroupKey::Month => "month",
        }
    }

    /// The group a ticket falls into.
    pub fn value_of(&self, ticket: &Ticket) -> GroupValue {
        match self {
            GroupKey::Field(field) => GroupValue::Text(ticket.field(*field).to_string()),
            GroupKey::Month => GroupValue::Month(ticket.created_month()),
        }
    }
}

impl FromStr for GroupKey {
    type Err = QueryError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        if name == "month" {
            return Ok(GroupKey::Month);
        }
        TicketField::from_name(name)
            .map(GroupKey::Field)
            .ok_or_else(|| QueryError::InvalidArgument(format!("Invalid group_by column: {name}")))
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for GroupKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One partition label. Months order numerically, text lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupValue {
    Month(u32),
    Text(String),
}

impl fmt::Display for GroupValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupValue::Month(m) => write!(f, "{m}"),
            GroupValue::Text(s) => f.write_str(s),
        }
    }
}

// Serialized as a string so it can be a JSON object key.
impl Serialize for GroupValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Why a query produced no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    NoTickets,
    NoGroupData,
}

impl EmptyReason {
    pub fn message(&self) -> &'static str {
        match self {
            EmptyReason::NoTickets => "No tickets found matching the criteria.",
            EmptyReason::NoGroupData => "No data available for grouping.",
        }
    }
}

/// Successful result of a query operation.
///
/// `Empty` is distinct from `Count { count: 0 }`: it means a listing or
/// grouping ran and matched nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryOutcome {
    Count {
        count: usize,
    },
    Tickets {
        tickets: Vec<Ticket>,
    },
    Groups {
        group_by: GroupKey,
        groups: BTreeMap<GroupValue, usize>,
    },
    Empty {
        reason: EmptyReason,
        message: String,
    },
}

impl QueryOutcome {
    pub fn empty(reason: EmptyReason) -> Self {
        QueryOutcome::Empty {
            reason,
            message: reason.message().to_string(),
        }
    }

    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            QueryOutcome::Count { .. } => "count",
            QueryOutcome::Tickets { .. } => "tickets",
            QueryOutcome::Groups { .. } => "groups",
            QueryOutcome::Empty { .. } => "empty",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, QueryOutcome::Empty { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_group_key_parse() {
        assert_eq!("month".parse::<GroupKey>().unwrap(), GroupKey::Month);
        assert_eq!(
            "assigned_to".parse::<GroupKey>().unwrap(),
            GroupKey::Field(TicketField::AssignedTo)
        );

        let err = "ticket_id".parse::<GroupKey>().unwrap_err();
        assert_eq!(
            err,
            QueryError::InvalidArgument("Invalid group_by column: ticket_id".to_string())
        );
        assert!("created_date".parse::<GroupKey>().is_err());
        assert!("".parse::<GroupKey>().is_err());
    }

    #[test]
    fn test_group_values_order() {
        let mut months = vec![GroupValue::Month(10), GroupValue::Month(2), GroupValue::Month(1)];
        months.sort();
        assert_eq!(
            months,
            vec![GroupValue::Month(1), GroupValue::Month(2), GroupValue::Month(10)]
        );
    }

    #[test]
    fn test_groups_serialize_as_object() {
        let mut groups = BTreeMap::new();
        groups.insert(GroupValue::Month(11), 1);
        groups.insert(GroupValue::Month(2), 4);
        let outcome = QueryOutcome::Groups {
            group_by: GroupKey::Month,
            groups,
        };

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            value,
            json!({ "kind": "groups", "group_by": "month", "groups": { "2": 4, "11": 1 } })
        );
    }

    #[test]
    fn test_empty_outcome() {
        let outcome = QueryOutcome::empty(EmptyReason::NoTickets);
        assert!(outcome.is_empty());
        assert_eq!(outcome.kind(), "empty");

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["kind"], "empty");
        assert_eq!(value["reason"], "no_tickets");
        assert_eq!(value["message"], "No tickets found matching the criteria.");
    }

    #[test]
    fn test_count_outcome_serialization() {
        let value = serde_json::to_value(QueryOutcome::Count { count: 0 }).unwrap();
        assert_eq!(value, json!({ "kind": "count", "count": 0 }));
    }
}
