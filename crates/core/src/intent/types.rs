//! Typed intents parsed from `(operation_name, arguments)` pairs.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::query::{FilterSpec, GroupKey, QueryError};

/// The closed set of operations a caller may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Count,
    List,
    GroupBy,
}

impl OperationKind {
    pub const ALL: [OperationKind; 3] = [
        OperationKind::Count,
        OperationKind::List,
        OperationKind::GroupBy,
    ];

    /// Canonical operation name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Count => "count",
            OperationKind::List => "list",
            OperationKind::GroupBy => "group_by",
        }
    }

    /// Name of the tool offered to the language model.
    pub fn tool_name(&self) -> &'static str {
        match self {
            OperationKind::Count => "count_tickets",
            OperationKind::List => "filter_tickets",
            OperationKind::GroupBy => "group_by_tickets",
        }
    }

    /// Resolve a canonical or tool name. Anything else is rejected.
    pub fn from_name(name: &str) -> Result<Self, QueryError> {
        match name {
            "count" | "count_tickets" => Ok(OperationKind::Count),
            "list" | "filter_tickets" => Ok(OperationKind::List),
            "group_by" | "group_by_tickets" => Ok(OperationKind::GroupBy),
            _ => Err(QueryError::UnknownOperation(name.to_string())),
        }
    }
}

/// Arguments shared by `count` and `list`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryArgs {
    pub filter: FilterSpec,
}

/// Arguments for `group_by`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupByArgs {
    pub group_by: GroupKey,
    pub filter: FilterSpec,
}

/// A validated request for one query operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Count(QueryArgs),
    List(QueryArgs),
    GroupBy(GroupByArgs),
}

/// Wire shape of `arguments`. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
struct RawArguments {
    #[serde(default, alias = "filter_fields")]
    filters: Option<Value>,
    #[serde(default)]
    date_filter: Option<Value>,
    #[serde(default, alias = "group_key")]
    group_by: Option<Value>,
}

impl Intent {
    /// Validate an operation name and its JSON arguments.
    ///
    /// The operation name is checked first, so an unknown operation is
    /// reported even when its arguments are also malformed.
    pub fn parse(operation_name: &str, arguments: &Value) -> Result<Self, QueryError> {
        let kind = OperationKind::from_name(operation_name)?;

        let raw: RawArguments = match arguments {
            Value::Null => RawArguments::default(),
            Value::Object(_) => serde_json::from_value(arguments.clone())
                .map_err(|e| QueryError::InvalidArgument(format!("arguments: {e}")))?,
            other => {
                return Err(QueryError::InvalidArgument(format!(
                    "arguments must be an object, got {other}"
                )))
            }
        };

        // Required keys are checked before the optional filters.
        let group_by = match kind {
            OperationKind::GroupBy => Some(group_key_arg(raw.group_by)?),
            OperationKind::Count | OperationKind::List => None,
        };

        let filter = FilterSpec::from_json(
            object_arg("filters", raw.filters.as_ref())?,
            object_arg("date_filter", raw.date_filter.as_ref())?,
        )?;

        Ok(match (kind, group_by) {
            (OperationKind::GroupBy, Some(group_by)) => {
                Intent::GroupBy(GroupByArgs { group_by, filter })
            }
            (OperationKind::GroupBy, None) => return Err(QueryError::MissingArgument("group_by")),
            (OperationKind::Count, _) => Intent::Count(QueryArgs { filter }),
            (OperationKind::List, _) => Intent::List(QueryArgs { filter }),
        })
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Intent::Count(_) => OperationKind::Count,
            Intent::List(_) => OperationKind::List,
            Intent::GroupBy(_) => OperationKind::GroupBy,
        }
    }

    pub fn filter(&self) -> &FilterSpec {
        match self {
            Intent::Count(args) | Intent::List(args) => &args.filter,
            Intent::GroupBy(args) => &args.filter,
        }
    }
}

fn group_key_arg(value: Option<Value>) -> Result<GroupKey, QueryError> {
    match value {
        None | Some(Value::Null) => Err(QueryError::MissingArgument("group_by")),
        Some(Value::String(name)) => name.parse::<GroupKey>(),
        Some(other) => Err(QueryError::InvalidArgument(format!(
            "group_by must be a string, got {other}"
        ))),
    }
}

/// Absent and null both mean "not given".
fn object_arg<'a>(
    name: &str,
    value: Option<&'a Value>,
) -> Result<Option<&'a Map<String, Value>>, QueryError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(QueryError::InvalidArgument(format!(
            "{name} must be an object, got {other}"
        ))),
    }
}
