//! Tool schema and instructions sent to the language model.

use serde_json::{json, Value};

use crate::dataset::TicketField;
use crate::intent::OperationKind;

/// System prompt steering the model toward a single tool call.
pub const SYSTEM_PROMPT: &str = "\
You are a data assistant for an incident management system.

You MUST convert the user's question into a tool call.

Available filter fields:
- company
- status
- priority
- category
- assigned_to

Rules:
1. If the user asks to SHOW or LIST tickets, use filter_tickets.
2. If the user asks HOW MANY or TOTAL, use count_tickets.
3. If the user asks for a breakdown PER or BY some field or month, use group_by_tickets.
4. ALWAYS populate the filters object when values are mentioned.
5. NEVER call a tool with empty arguments if filters are present in the question.
6. For months like January, February, etc., use date_filter with month number (1-12).

Return ONLY a tool call. Do not answer in text.";

fn filters_schema() -> Value {
    let properties: serde_json::Map<String, Value> = TicketField::ALL
        .iter()
        .map(|f| (f.as_str().to_string(), json!({ "type": "string" })))
        .collect();
    json!({
        "type": "object",
        "description": "Exact (case-insensitive) field values to match",
        "properties": properties,
    })
}

fn date_filter_schema() -> Value {
    json!({
        "type": "object",
        "description": "Constraints on the ticket creation date",
        "properties": {
            "month": { "type": "integer", "minimum": 1, "maximum": 12 },
            "year": { "type": "integer" }
        }
    })
}

fn tool(kind: OperationKind) -> Value {
    let (description, parameters) = match kind {
        OperationKind::Count => (
            "Count tickets using optional filters and date constraints",
            json!({
                "type": "object",
                "properties": {
                    "filters": filters_schema(),
                    "date_filter": date_filter_schema()
                }
            }),
        ),
        OperationKind::List => (
            "Retrieve ticket records using filters",
            json!({
                "type": "object",
                "properties": {
                    "filters": filters_schema(),
                    "date_filter": date_filter_schema()
                }
            }),
        ),
        OperationKind::GroupBy => (
            "Group tickets by a column and count each group",
            json!({
                "type": "object",
                "properties": {
                    "group_by": {
                        "type": "string",
                        "enum": ["company", "status", "priority", "category", "assigned_to", "month"]
                    },
                    "filters": filters_schema(),
                    "date_filter": date_filter_schema()
                },
                "required": ["group_by"]
            }),
        ),
    };

    json!({
        "type": "function",
        "function": {
            "name": kind.tool_name(),
            "description": description,
            "parameters": parameters
        }
    })
}

/// Function-calling definitions for every supported operation.
pub fn tool_definitions() -> Value {
    Value::Array(OperationKind::ALL.into_iter().map(tool).collect())
}
