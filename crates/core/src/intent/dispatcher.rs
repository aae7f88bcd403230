//! Routes validated intents to query operations.

use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::types::Intent;
use crate::dataset::Dataset;
use crate::query::{self, QueryError, QueryOutcome};

/// Executes intents against a shared, read-only dataset.
///
/// Cloning is cheap; clones share the same dataset.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    dataset: Arc<Dataset>,
}

impl Dispatcher {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Validate `(operation_name, arguments)` and run the operation.
    pub fn dispatch(
        &self,
        operation_name: &str,
        arguments: &Value,
    ) -> Result<QueryOutcome, QueryError> {
        let intent = Intent::parse(operation_name, arguments).inspect_err(|e| {
            debug!(operation = operation_name, error = %e, "Rejected intent");
        })?;
        Ok(self.execute(&intent))
    }

    /// Run an already-validated intent.
    pub fn execute(&self, intent: &Intent) -> QueryOutcome {
        let outcome = match intent {
            Intent::Count(args) => QueryOutcome::Count {
                count: query::count(&self.dataset, &args.filter),
            },
            Intent::List(args) => query::list(&self.dataset, &args.filter),
            Intent::GroupBy(args) => query::group_by(&self.dataset, args.group_by, &args.filter),
        };

        debug!(
            operation = intent.kind().as_str(),
            outcome = outcome.kind(),
            "Executed query"
        );
        outcome
    }
}
