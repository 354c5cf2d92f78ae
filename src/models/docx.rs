use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One content unit of a document page.
///
/// Only the identity fields are modeled; the type-specific payload (text
/// runs, the file token of an image block, ...) is carried opaquely in
/// `payload` and interpreted by the caller according to `block_type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub block_id: String,
    pub block_type: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

/// One page of the block listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockPage {
    #[serde(default)]
    pub items: Vec<Block>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub page_token: Option<String>,
}
