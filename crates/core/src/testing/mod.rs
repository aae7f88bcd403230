//! Testing utilities: fixture datasets and a mock intent resolver.
//!
//! # Example
//!
//! ```rust,ignore
//! use ticketdesk_core::testing::{fixtures, MockResolver};
//!
//! let dataset = fixtures::sample_dataset();
//! let resolver = MockResolver::with_intent("count_tickets", json!({}));
//! ```

mod mock_resolver;

pub use mock_resolver::MockResolver;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::dataset::{parse_timestamp, Dataset, Ticket};

    /// CSV header with every required column.
    pub const CSV_HEADER: &str =
        "ticket_id,company,status,priority,category,assigned_to,created_date,closed_date";

    /// Create a ticket with reasonable defaults for the remaining fields.
    ///
    /// `created` is any format the dataset loader accepts.
    pub fn ticket(id: &str, company: &str, status: &str, priority: &str, created: &str) -> Ticket {
        Ticket {
            ticket_id: id.to_string(),
            company: company.to_string(),
            status: status.to_string(),
            priority: priority.to_string(),
            category: "general".to_string(),
            assigned_to: "unassigned".to_string(),
            created_date: parse_timestamp(created)
                .unwrap_or_else(|| panic!("bad fixture date: {created}")),
            closed_date: None,
        }
    }

    /// The three-ticket scenario:
    /// - T-1: Acme, open, high, 2024-01-05
    /// - T-2: Acme, closed, low, 2024-02-10
    /// - T-3: Beta, open, high, 2024-01-20
    pub fn sample_tickets() -> Vec<Ticket> {
        let mut closed = ticket("T-2", "Acme", "closed", "low", "2024-02-10");
        closed.closed_date = parse_timestamp("2024-02-12 16:00:00");
        vec![
            ticket("T-1", "Acme", "open", "high", "2024-01-05"),
            closed,
            ticket("T-3", "Beta", "open", "high", "2024-01-20"),
        ]
    }

    pub fn sample_dataset() -> Dataset {
        Dataset::from_tickets(sample_tickets())
    }

    /// CSV text for a larger, more varied dataset.
    pub fn incidents_csv() -> String {
        let rows = [
            "INC-001,Acme,open,high,network,alice,2024-01-05 09:00:00,",
            "INC-002,Acme,closed,low,hardware,bob,2024-02-10 10:30:00,2024-02-11 12:00:00",
            "INC-003,Beta,open,high,software,alice,2024-01-20 14:15:00,",
            "INC-004,Beta,closed,medium,network,carol,2024-03-02 08:45:00,2024-03-04 09:00:00",
            "INC-005,Globex,open,LOW,software,bob,2024-03-15 11:00:00,",
            "INC-006,Acme,closed,high,software,carol,2023-03-20 16:20:00,not recorded",
            "INC-007,Globex,open,medium,hardware,alice,2023-12-24 07:00:00,",
            "INC-008,Initech,closed,High,network,dave,2024-03-28 13:30:00,2024-04-01 10:00:00",
        ];
        let mut csv = String::from(CSV_HEADER);
        for row in rows {
            csv.push('\n');
            csv.push_str(row);
        }
        csv.push('\n');
        csv
    }

    pub fn incidents_dataset() -> Dataset {
        Dataset::from_reader(incidents_csv().as_bytes()).expect("fixture CSV must load")
    }
}
