//! Equality and date predicates over tickets.

use serde_json::{Map, Value};
use tracing::debug;

use super::QueryError;
use crate::dataset::{Dataset, Ticket, TicketField};

/// Constraint on the month and/or year of `created_date`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateFilter {
    month: Option<u32>,
    year: Option<i32>,
}

impl DateFilter {
    /// Build a validated date filter. Months are 1-12, years 1-9999.
    pub fn new(month: Option<u32>, year: Option<i32>) -> Result<Self, QueryError> {
        if let Some(m) = month {
            if !(1..=12).contains(&m) {
                return Err(QueryError::InvalidArgument(format!(
                    "date_filter.month must be between 1 and 12, got {m}"
                )));
            }
        }
        if let Some(y) = year {
            if !(1..=9999).contains(&y) {
                return Err(QueryError::InvalidArgument(format!(
                    "date_filter.year must be between 1 and 9999, got {y}"
                )));
            }
        }
        Ok(Self { month, year })
    }

    /// Parse the `date_filter` argument. Keys other than `month` and `year`
    /// are ignored.
    pub fn from_json(raw: Option<&Map<String, Value>>) -> Result<Self, QueryError> {
        let Some(raw) = raw else {
            return Ok(Self::default());
        };

        let month = raw
            .get("month")
            .map(|v| integer_arg("month", v))
            .transpose()?;
        let year = raw
            .get("year")
            .map(|v| integer_arg("year", v))
            .transpose()?;

        let month = month
            .map(|m| {
                u32::try_from(m).map_err(|_| {
                    QueryError::InvalidArgument(format!(
                        "date_filter.month must be between 1 and 12, got {m}"
                    ))
                })
            })
            .transpose()?;
        let year = year
            .map(|y| {
                i32::try_from(y).map_err(|_| {
                    QueryError::InvalidArgument(format!(
                        "date_filter.year must be between 1 and 9999, got {y}"
                    ))
                })
            })
            .transpose()?;

        Self::new(month, year)
    }

    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn is_empty(&self) -> bool {
        self.month.is_none() && self.year.is_none()
    }

    pub fn matches(&self, ticket: &Ticket) -> bool {
        self.month.is_none_or(|m| ticket.created_month() == m)
            && self.year.is_none_or(|y| ticket.created_year() == y)
    }
}

/// Conjunction of field equality predicates and a date constraint.
///
/// Field values are stored lowercased; matching compares them against the
/// lowercased ticket value, so `"OPEN"` and `"open"` select the same rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    fields: Vec<(TicketField, String)>,
    date: DateFilter,
}

impl FilterSpec {
    /// A filter that matches every ticket.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value`, ignoring case.
    pub fn with_field(mut self, field: TicketField, value: impl AsRef<str>) -> Self {
        self.fields.push((field, value.as_ref().to_lowercase()));
        self
    }

    /// Constrain `created_date`.
    pub fn with_date(mut self, date: DateFilter) -> Self {
        self.date = date;
        self
    }

    /// Build a filter from the raw `filters` and `date_filter` arguments.
    ///
    /// Filter keys outside the allow-list are skipped rather than rejected.
    /// Values must be strings, numbers or booleans; numbers and booleans are
    /// compared by their JSON text.
    pub fn from_json(
        filters: Option<&Map<String, Value>>,
        date_filter: Option<&Map<String, Value>>,
    ) -> Result<Self, QueryError> {
        let mut spec = Self::new().with_date(DateFilter::from_json(date_filter)?);

        for (name, value) in filters.into_iter().flatten() {
            let Some(field) = TicketField::from_name(name) else {
                debug!(field = %name, "Ignoring filter on non-filterable field");
                continue;
            };
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => {
                    return Err(QueryError::InvalidArgument(format!(
                        "filters.{name} must be a string, number or boolean, got {other}"
                    )))
                }
            };
            spec = spec.with_field(field, value);
        }

        Ok(spec)
    }

    pub fn fields(&self) -> &[(TicketField, String)] {
        &self.fields
    }

    pub fn date(&self) -> &DateFilter {
        &self.date
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.date.is_empty()
    }

    pub fn matches(&self, ticket: &Ticket) -> bool {
        self.fields
            .iter()
            .all(|(field, value)| ticket.field(*field).to_lowercase() == *value)
            && self.date.matches(ticket)
    }
}

/// Select the tickets matching `spec`, in dataset order.
pub fn apply<'a>(dataset: &'a Dataset, spec: &FilterSpec) -> Vec<&'a Ticket> {
    if spec.is_empty() {
        return dataset.iter().collect();
    }
    dataset.iter().filter(|t| spec.matches(t)).collect()
}

/// Accepts JSON integers, integral floats and integer strings.
fn integer_arg(name: &str, value: &Value) -> Result<i64, QueryError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| {
        QueryError::InvalidArgument(format!(
            "date_filter.{name} must be an integer, got {value}"
        ))
    })
}
