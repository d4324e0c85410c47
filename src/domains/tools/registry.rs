//! Tool Registry - the fixed catalog of explorer tools.
//!
//! This module provides:
//! - The ordered list of every tool the server publishes
//! - Lookup by name for the dispatch pipeline
//! - Tool metadata (MCP `Tool` models with JSON schemas) for `tools/list`
//!
//! The HTTP side of each tool lives in `endpoint.rs`; a test in that module
//! keeps both tables in lockstep.

use std::sync::Arc;

use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::{JsonObject, Tool};
use serde_json::Value;

use super::params::*;

// ============================================================================
// Tool Definition
// ============================================================================

/// Static description of one tool: name, description and the typed
/// parameter record its arguments deserialize into.
#[derive(Debug, Clone, Copy)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    schema: fn() -> Arc<JsonObject>,
    parse: fn(&JsonObject) -> Result<ToolArguments, serde_json::Error>,
}

impl ToolDefinition {
    /// JSON Schema (`type: object`) derived from the parameter record.
    pub fn input_schema(&self) -> Arc<JsonObject> {
        (self.schema)()
    }

    /// Deserialize raw arguments into the tool's parameter record.
    pub fn parse(&self, arguments: &JsonObject) -> Result<ToolArguments, serde_json::Error> {
        (self.parse)(arguments)
    }

    /// Names of every declared parameter.
    pub fn param_names(&self) -> Vec<String> {
        self.input_schema()
            .get("properties")
            .and_then(Value::as_object)
            .map(|properties| properties.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Names of the parameters the tool cannot be called without.
    pub fn required_params(&self) -> Vec<String> {
        self.input_schema()
            .get("required")
            .and_then(Value::as_array)
            .map(|required| {
                required
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Create a Tool model for this definition (metadata).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.into(),
            description: Some(self.description.into()),
            input_schema: self.input_schema(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

// ============================================================================
// Catalog
// ============================================================================

const fn tool<P: ToolParams>(name: &'static str, description: &'static str) -> ToolDefinition {
    ToolDefinition {
        name,
        description,
        schema: cached_schema_for_type::<P>,
        parse: parse::<P>,
    }
}

fn parse<P: ToolParams>(arguments: &JsonObject) -> Result<ToolArguments, serde_json::Error> {
    serde_json::from_value::<P>(Value::Object(arguments.clone())).map(ToolArguments::new)
}

/// Every published tool, in `tools/list` order.
pub const TOOLS: &[ToolDefinition] = &[
    tool::<SearchParams>(
        "search",
        "Search for addresses, transactions, tokens, etc",
    ),
    tool::<SearchParams>(
        "search_redirect",
        "Check whether a search query resolves directly to a single entity page",
    ),
    tool::<TransactionListParams>(
        "get_transactions",
        "Get list of transactions with optional filters",
    ),
    tool::<BlockListParams>(
        "get_blocks",
        "Get list of blocks",
    ),
    tool::<EmptyParams>(
        "get_token_transfers",
        "Get list of token transfers",
    ),
    tool::<EmptyParams>(
        "get_stats",
        "Get network statistics",
    ),
    tool::<TransactionHashParams>(
        "get_transaction_info",
        "Get detailed information about a specific transaction",
    ),
    tool::<TransactionTokenTransfersParams>(
        "get_transaction_token_transfers",
        "Get token transfers for a specific transaction",
    ),
    tool::<TransactionHashParams>(
        "get_transaction_internal_txs",
        "Get internal transactions for a specific transaction",
    ),
    tool::<TransactionHashParams>(
        "get_transaction_logs",
        "Get logs for a specific transaction",
    ),
    tool::<BlockParams>(
        "get_block_info",
        "Get detailed information about a specific block",
    ),
    tool::<BlockParams>(
        "get_block_transactions",
        "Get transactions for a specific block",
    ),
    tool::<AddressHashParams>(
        "get_address_info",
        "Get detailed information about an address",
    ),
    tool::<AddressTokenTransfersParams>(
        "get_address_token_transfers",
        "Get token transfers for an address",
    ),
    tool::<TokenAddressParams>(
        "get_token_info",
        "Get detailed information about a token",
    ),
    tool::<TokenAddressParams>(
        "get_token_holders",
        "Get list of token holders",
    ),
    tool::<EmptyParams>(
        "get_internal_transactions",
        "Get list of internal transactions",
    ),
    tool::<EmptyParams>(
        "get_indexing_status",
        "Get indexing status",
    ),
    tool::<TransactionHashParams>(
        "get_transaction_raw_trace",
        "Get transaction raw trace",
    ),
    tool::<TransactionHashParams>(
        "get_transaction_state_changes",
        "Get transaction state changes",
    ),
    tool::<TransactionHashParams>(
        "get_transaction_summary",
        "Get human-readable transaction summary",
    ),
    tool::<BlockParams>(
        "get_block_withdrawals",
        "Get block withdrawals",
    ),
    tool::<AddressHashParams>(
        "get_address_counters",
        "Get address counters",
    ),
    tool::<AddressDirectionParams>(
        "get_address_internal_transactions",
        "Get address internal transactions",
    ),
    tool::<AddressHashParams>(
        "get_address_logs",
        "Get address logs",
    ),
    tool::<AddressHashParams>(
        "get_address_blocks_validated",
        "Get blocks validated by an address",
    ),
    tool::<AddressHashParams>(
        "get_address_coin_balance_history",
        "Get address coin balance history",
    ),
    tool::<AddressHashParams>(
        "get_address_coin_balance_history_by_day",
        "Get address coin balance history by day",
    ),
    tool::<SmartContractListParams>(
        "get_smart_contracts",
        "Get verified smart contracts",
    ),
    tool::<EmptyParams>(
        "get_smart_contract_counters",
        "Get verified smart contract counters",
    ),
    tool::<AddressHashParams>(
        "get_smart_contract",
        "Get smart contract",
    ),
    tool::<EmptyParams>(
        "get_addresses",
        "Get addresses",
    ),
    tool::<AddressDirectionParams>(
        "get_address_transactions",
        "Get transactions for an address",
    ),
    tool::<AddressHashParams>(
        "get_address_token_balances",
        "Get token balances for an address",
    ),
    tool::<AddressTokensParams>(
        "get_address_tokens",
        "Get tokens for an address",
    ),
    tool::<AddressHashParams>(
        "get_address_withdrawals",
        "Get withdrawals for an address",
    ),
    tool::<AddressNftParams>(
        "get_address_nft",
        "Get NFTs for an address",
    ),
    tool::<AddressNftParams>(
        "get_address_nft_collections",
        "Get NFT collections for an address",
    ),
    tool::<TokenListParams>(
        "get_tokens",
        "Get tokens",
    ),
    tool::<TokenAddressParams>(
        "get_token_transfers_list",
        "Get token transfers list",
    ),
    tool::<TokenAddressParams>(
        "get_token_counters",
        "Get token counters",
    ),
    tool::<TokenAddressParams>(
        "get_token_instances",
        "Get instances (NFTs) of a token",
    ),
    tool::<TokenInstanceParams>(
        "get_token_instance_by_id",
        "Get a token instance by id",
    ),
    tool::<TokenInstanceParams>(
        "get_token_instance_transfers",
        "Get transfers of a token instance",
    ),
    tool::<TokenInstanceParams>(
        "get_token_instance_holders",
        "Get holders of a token instance",
    ),
    tool::<TokenInstanceParams>(
        "get_token_instance_transfers_count",
        "Get transfer count of a token instance",
    ),
    tool::<RefetchParams>(
        "refetch_token_instance_metadata",
        "Ask the explorer to re-fetch the metadata of a token instance",
    ),
    tool::<EmptyParams>(
        "get_withdrawals",
        "Get withdrawals",
    ),
    tool::<EmptyParams>(
        "get_main_page_transactions",
        "Get the latest transactions shown on the explorer main page",
    ),
    tool::<EmptyParams>(
        "get_main_page_blocks",
        "Get the latest blocks shown on the explorer main page",
    ),
    tool::<EmptyParams>(
        "get_transaction_chart",
        "Get daily transaction chart data",
    ),
    tool::<EmptyParams>(
        "get_market_chart",
        "Get market price chart data",
    ),
    tool::<EmptyParams>(
        "get_json_rpc_url",
        "Get the JSON-RPC URL configured for the explorer",
    ),
    tool::<EmptyParams>(
        "get_account_abstraction_status",
        "Get account abstraction (ERC-4337) indexer status",
    ),
];

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - the immutable catalog of available tools.
#[derive(Debug, Clone, Copy)]
pub struct ToolRegistry {
    tools: &'static [ToolDefinition],
}

impl ToolRegistry {
    /// Create the registry over the built-in catalog.
    pub fn new() -> Self {
        Self { tools: TOOLS }
    }

    /// All definitions, in publication order.
    pub fn definitions(&self) -> &'static [ToolDefinition] {
        self.tools
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&'static ToolDefinition> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tools.iter().map(ToolDefinition::to_tool).collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
