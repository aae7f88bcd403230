//! In-memory ticket table, loaded once from CSV.

use std::collections::HashSet;
use std::fs::File;
use std::io;
use std::path::Path;

use tracing::{debug, info, warn};

use super::timestamp::parse_timestamp;
use super::types::{DatasetSummary, Ticket};
use super::DatasetError;

/// Immutable, ordered ticket table.
///
/// There is no mutation API: once built, a dataset can be shared across
/// threads behind an `Arc` and read without coordination.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    tickets: Vec<Ticket>,
}

impl Dataset {
    /// Load the dataset from a CSV file.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let dataset = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            tickets = dataset.len(),
            "Loaded ticket dataset"
        );
        Ok(dataset)
    }

    /// Load the dataset from any CSV source with a header row.
    ///
    /// Short rows are padded with empty cells, so a trailing `closed_date`
    /// may be left off. Rows longer than the header are rejected.
    ///
    /// Fails on the first row whose `created_date` cannot be parsed; an
    /// unparseable `closed_date` is stored as absent.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?;
        let width = headers.len();
        let columns = ColumnIndex::from_headers(headers)?;

        let mut tickets = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result?;
            let row = record
                .position()
                .map(|p| p.line())
                .unwrap_or(index as u64 + 2);

            if record.len() > width {
                return Err(DatasetError::TooManyFields {
                    row,
                    expected: width,
                    found: record.len(),
                });
            }

            let ticket_id = columns.get(&record, columns.ticket_id).to_string();
            let raw_created = columns.get(&record, columns.created_date);
            let created_date =
                parse_timestamp(raw_created).ok_or_else(|| DatasetError::InvalidCreatedDate {
                    row,
                    ticket_id: ticket_id.clone(),
                    value: raw_created.to_string(),
                })?;

            let raw_closed = columns.get(&record, columns.closed_date);
            let closed_date = parse_timestamp(raw_closed);
            if closed_date.is_none() && !raw_closed.is_empty() {
                debug!(row, ticket_id = %ticket_id, value = raw_closed, "Unparseable closed_date stored as absent");
            }

            tickets.push(Ticket {
                ticket_id,
                company: columns.get(&record, columns.company).to_string(),
                status: columns.get(&record, columns.status).to_string(),
                priority: columns.get(&record, columns.priority).to_string(),
                category: columns.get(&record, columns.category).to_string(),
                assigned_to: columns.get(&record, columns.assigned_to).to_string(),
                created_date,
                closed_date,
            });
        }

        Ok(Self::from_tickets(tickets))
    }

    /// Build a dataset from already-parsed tickets.
    pub fn from_tickets(tickets: Vec<Ticket>) -> Self {
        let mut seen = HashSet::with_capacity(tickets.len());
        for ticket in &tickets {
            if !seen.insert(ticket.ticket_id.as_str()) {
                warn!(ticket_id = %ticket.ticket_id, "Duplicate ticket_id in dataset");
            }
        }

        Self { tickets }
    }

    /// Read-only view of every ticket, in source order.
    pub fn all(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.iter()
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            ticket_count: self.tickets.len(),
            earliest_created: self.tickets.iter().map(|t| t.created_date).min(),
            latest_created: self.tickets.iter().map(|t| t.created_date).max(),
        }
    }
}

/// Header positions of the required columns.
struct ColumnIndex {
    ticket_id: usize,
    company: usize,
    status: usize,
    priority: usize,
    category: usize,
    assigned_to: usize,
    created_date: usize,
    closed_date: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, DatasetError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or(DatasetError::MissingColumn(name))
        };

        Ok(Self {
            ticket_id: find("ticket_id")?,
            company: find("company")?,
            status: find("status")?,
            priority: find("priority")?,
            category: find("category")?,
            assigned_to: find("assigned_to")?,
            created_date: find("created_date")?,
            closed_date: find("closed_date")?,
        })
    }

    fn get<'r>(&self, record: &'r csv::StringRecord, column: usize) -> &'r str {
        record.get(column).unwrap_or("")
    }
}
