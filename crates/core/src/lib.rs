pub mod config;
pub mod dataset;
pub mod intent;
pub mod query;
pub mod resolver;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DatasetConfig,
    ResolverConfig, SanitizedConfig, ServerConfig,
};
pub use dataset::{Dataset, DatasetError, DatasetSummary, Ticket, TicketField};
pub use intent::{Dispatcher, Intent, OperationKind};
pub use query::{
    DateFilter, EmptyReason, FilterSpec, GroupKey, GroupValue, QueryError, QueryOutcome,
};
pub use resolver::{IntentResolver, OpenAiResolver, ResolvedIntent, ResolverError};
