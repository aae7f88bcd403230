//! Intent dispatch: the boundary between callers and the query engine.
//!
//! Callers name an operation and pass JSON arguments. The name is matched
//! against a closed set of [`OperationKind`]s and the arguments are parsed
//! into a typed [`Intent`]; nothing is looked up dynamically by name.

mod dispatcher;
mod types;

pub use dispatcher::Dispatcher;
pub use types::{GroupByArgs, Intent, OperationKind, QueryArgs};
