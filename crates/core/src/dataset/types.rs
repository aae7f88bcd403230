//! Core ticket data types.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One incident record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub ticket_id: String,
    pub company: String,
    pub status: String,
    pub priority: String,
    pub category: String,
    pub assigned_to: String,
    pub created_date: NaiveDateTime,
    /// Absent for open tickets and for values that failed to parse.
    pub closed_date: Option<NaiveDateTime>,
}

impl Ticket {
    /// Returns the value of a filterable text field.
    pub fn field(&self, field: TicketField) -> &str {
        match field {
            TicketField::Company => &self.company,
            TicketField::Status => &self.status,
            TicketField::Priority => &self.priority,
            TicketField::Category => &self.category,
            TicketField::AssignedTo => &self.assigned_to,
        }
    }

    /// Month (1-12) the ticket was created in.
    pub fn created_month(&self) -> u32 {
        self.created_date.month()
    }

    /// Year the ticket was created in.
    pub fn created_year(&self) -> i32 {
        self.created_date.year()
    }
}

/// Text fields that can be filtered and grouped on.
///
/// This is the whole allow-list: fields like `ticket_id` or the dates have no
/// variant, so they can never be reached through a caller-supplied name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketField {
    Company,
    Status,
    Priority,
    Category,
    AssignedTo,
}

impl TicketField {
    pub const ALL: [TicketField; 5] = [
        TicketField::Company,
        TicketField::Status,
        TicketField::Priority,
        TicketField::Category,
        TicketField::AssignedTo,
    ];

    /// Column name in the dataset.
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketField::Company => "company",
            TicketField::Status => "status",
            TicketField::Priority => "priority",
            TicketField::Category => "category",
            TicketField::AssignedTo => "assigned_to",
        }
    }

    /// Resolve a column name. Exact match only.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for TicketField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate facts about a loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub ticket_count: usize,
    pub earliest_created: Option<NaiveDateTime>,
    pub latest_created: Option<NaiveDateTime>,
}
