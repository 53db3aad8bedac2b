//! Parameter types for SQL gateway tools

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct QueryParams {
    #[schemars(
        description = "A single read-only SQL statement starting with SELECT or WITH. \
                       Multi-line SQL, CTEs, joins, window functions, and comments are supported."
    )]
    pub query: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SchemaFormat {
    #[default]
    Markdown,
    Json,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct SchemaParams {
    #[schemars(description = "Output format: 'markdown' (default) or 'json'")]
    #[serde(default)]
    pub format: Option<SchemaFormat>,
}
