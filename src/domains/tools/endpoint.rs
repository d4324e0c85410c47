//! Endpoint resolution - maps a tool invocation onto an explorer request.
//!
//! `ENDPOINTS` is a declarative table keyed by tool name. Each entry holds
//! a path template with `{param}` placeholders, the HTTP method, the query
//! parameters to forward and, for the one mutating tool, the body field.
//! Resolution is pure: it never touches the network.

use std::collections::HashMap;

use serde_json::{Map, Value};
use thiserror::Error;

use super::formatter::ResponseFormat;
use super::params::Param::{Filter, Method, Q, RecaptchaResponse, Type};
use super::params::{Arguments, Param};
use crate::domains::explorer::{ApiRequest, HttpMethod};

/// Errors raised while resolving an invocation to a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No endpoint is mapped for the tool name.
    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    /// A path placeholder has no (or an empty) argument.
    #[error("Missing required path parameter '{param}' for {tool}")]
    MissingPathParameter { tool: String, param: String },
}

/// HTTP shape of one tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointSpec {
    pub method: HttpMethod,
    /// Path relative to `<base>/v2/` with `{param}` placeholders.
    pub path: &'static str,
    /// Forwarded when present and non-empty, in this order.
    pub query: &'static [Param],
    /// Single-field JSON body taken from this argument.
    pub body: Option<Param>,
    pub format: ResponseFormat,
}

impl EndpointSpec {
    const fn get(path: &'static str, query: &'static [Param]) -> Self {
        Self {
            method: HttpMethod::Get,
            path,
            query,
            body: None,
            format: ResponseFormat::Pretty,
        }
    }

    const fn formatted(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }

    /// Placeholder names in the path template, in order.
    pub fn placeholders(&self) -> impl Iterator<Item = &'static str> {
        self.path
            .split('/')
            .filter_map(|segment| segment.strip_prefix('{')?.strip_suffix('}'))
    }
}

/// The resolved request plus how its response should be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub request: ApiRequest,
    pub format: ResponseFormat,
}

const NONE: &[Param] = &[];

/// Endpoint table: one entry per published tool.
pub const ENDPOINTS: &[(&str, EndpointSpec)] = &[
    // Search
    (
        "search",
        EndpointSpec::get("search", &[Q]).formatted(ResponseFormat::SearchResults),
    ),
    ("search_redirect", EndpointSpec::get("search/check-redirect", &[Q])),
    // Transactions
    ("get_transactions", EndpointSpec::get("transactions", &[Filter, Type, Method])),
    (
        "get_transaction_info",
        EndpointSpec::get("transactions/{transaction_hash}", NONE),
    ),
    (
        "get_transaction_token_transfers",
        EndpointSpec::get("transactions/{transaction_hash}/token-transfers", &[Type]),
    ),
    (
        "get_transaction_internal_txs",
        EndpointSpec::get("transactions/{transaction_hash}/internal-transactions", NONE),
    ),
    (
        "get_transaction_logs",
        EndpointSpec::get("transactions/{transaction_hash}/logs", NONE),
    ),
    (
        "get_transaction_raw_trace",
        EndpointSpec::get("transactions/{transaction_hash}/raw-trace", NONE),
    ),
    (
        "get_transaction_state_changes",
        EndpointSpec::get("transactions/{transaction_hash}/state-changes", NONE),
    ),
    (
        "get_transaction_summary",
        EndpointSpec::get("transactions/{transaction_hash}/summary", NONE),
    ),
    // Blocks
    ("get_blocks", EndpointSpec::get("blocks", &[Type])),
    (
        "get_block_info",
        EndpointSpec::get("blocks/{block_number_or_hash}", NONE),
    ),
    (
        "get_block_transactions",
        EndpointSpec::get("blocks/{block_number_or_hash}/transactions", NONE),
    ),
    (
        "get_block_withdrawals",
        EndpointSpec::get("blocks/{block_number_or_hash}/withdrawals", NONE),
    ),
    // Global lists
    ("get_token_transfers", EndpointSpec::get("token-transfers", NONE)),
    (
        "get_internal_transactions",
        EndpointSpec::get("internal-transactions", NONE),
    ),
    ("get_addresses", EndpointSpec::get("addresses", NONE)),
    ("get_withdrawals", EndpointSpec::get("withdrawals", NONE)),
    // Addresses
    ("get_address_info", EndpointSpec::get("addresses/{address_hash}", NONE)),
    (
        "get_address_counters",
        EndpointSpec::get("addresses/{address_hash}/counters", NONE),
    ),
    (
        "get_address_transactions",
        EndpointSpec::get("addresses/{address_hash}/transactions", &[Filter]),
    ),
    (
        "get_address_token_transfers",
        EndpointSpec::get("addresses/{address_hash}/token-transfers", &[Type, Filter]),
    ),
    (
        "get_address_internal_transactions",
        EndpointSpec::get("addresses/{address_hash}/internal-transactions", &[Filter]),
    ),
    (
        "get_address_logs",
        EndpointSpec::get("addresses/{address_hash}/logs", NONE),
    ),
    (
        "get_address_blocks_validated",
        EndpointSpec::get("addresses/{address_hash}/blocks-validated", NONE),
    ),
    (
        "get_address_coin_balance_history",
        EndpointSpec::get("addresses/{address_hash}/coin-balance-history", NONE),
    ),
    (
        "get_address_coin_balance_history_by_day",
        EndpointSpec::get("addresses/{address_hash}/coin-balance-history-by-day", NONE),
    ),
    (
        "get_address_token_balances",
        EndpointSpec::get("addresses/{address_hash}/token-balances", NONE),
    ),
    (
        "get_address_tokens",
        EndpointSpec::get("addresses/{address_hash}/tokens", &[Type]),
    ),
    (
        "get_address_withdrawals",
        EndpointSpec::get("addresses/{address_hash}/withdrawals", NONE),
    ),
    (
        "get_address_nft",
        EndpointSpec::get("addresses/{address_hash}/nft", &[Type]),
    ),
    (
        "get_address_nft_collections",
        EndpointSpec::get("addresses/{address_hash}/nft-collections", &[Type]),
    ),
    // Tokens
    ("get_tokens", EndpointSpec::get("tokens", &[Q, Type])),
    ("get_token_info", EndpointSpec::get("tokens/{address_hash}", NONE)),
    (
        "get_token_holders",
        EndpointSpec::get("tokens/{address_hash}/holders", NONE),
    ),
    (
        "get_token_transfers_list",
        EndpointSpec::get("tokens/{address_hash}/transfers", NONE),
    ),
    (
        "get_token_counters",
        EndpointSpec::get("tokens/{address_hash}/counters", NONE),
    ),
    (
        "get_token_instances",
        EndpointSpec::get("tokens/{address_hash}/instances", NONE),
    ),
    (
        "get_token_instance_by_id",
        EndpointSpec::get("tokens/{address_hash}/instances/{id}", NONE),
    ),
    (
        "get_token_instance_transfers",
        EndpointSpec::get("tokens/{address_hash}/instances/{id}/transfers", NONE),
    ),
    (
        "get_token_instance_holders",
        EndpointSpec::get("tokens/{address_hash}/instances/{id}/holders", NONE),
    ),
    (
        "get_token_instance_transfers_count",
        EndpointSpec::get("tokens/{address_hash}/instances/{id}/transfers-count", NONE),
    ),
    (
        "refetch_token_instance_metadata",
        EndpointSpec {
            method: HttpMethod::Patch,
            path: "tokens/{address_hash}/instances/{id}/metadata",
            query: &[RecaptchaResponse],
            body: Some(RecaptchaResponse),
            format: ResponseFormat::Pretty,
        },
    ),
    // Smart contracts
    ("get_smart_contracts", EndpointSpec::get("smart-contracts", &[Q, Filter])),
    (
        "get_smart_contract_counters",
        EndpointSpec::get("smart-contracts/counters", NONE),
    ),
    (
        "get_smart_contract",
        EndpointSpec::get("smart-contracts/{address_hash}", NONE),
    ),
    // Stats, main page and config
    ("get_stats", EndpointSpec::get("stats", NONE)),
    (
        "get_transaction_chart",
        EndpointSpec::get("stats/charts/transactions", NONE),
    ),
    ("get_market_chart", EndpointSpec::get("stats/charts/market", NONE)),
    (
        "get_main_page_transactions",
        EndpointSpec::get("main-page/transactions", NONE),
    ),
    ("get_main_page_blocks", EndpointSpec::get("main-page/blocks", NONE)),
    (
        "get_indexing_status",
        EndpointSpec::get("main-page/indexing-status", NONE),
    ),
    ("get_json_rpc_url", EndpointSpec::get("config/json-rpc-url", NONE)),
    (
        "get_account_abstraction_status",
        EndpointSpec::get("proxy/account-abstraction/status", NONE),
    ),
];

// ============================================================================
// Resolver
// ============================================================================

/// Indexes `ENDPOINTS` by tool name; immutable after construction.
#[derive(Debug, Clone)]
pub struct EndpointResolver {
    table: HashMap<&'static str, &'static EndpointSpec>,
}

impl EndpointResolver {
    pub fn new() -> Self {
        Self {
            table: ENDPOINTS.iter().map(|(name, spec)| (*name, spec)).collect(),
        }
    }

    pub fn spec(&self, tool: &str) -> Option<&'static EndpointSpec> {
        self.table.get(tool).copied()
    }

    /// Resolve a validated invocation to a request.
    pub fn resolve(&self, tool: &str, args: &dyn Arguments) -> Result<Resolved, ResolveError> {
        let spec = self
            .spec(tool)
            .ok_or_else(|| ResolveError::UnknownMethod(tool.to_string()))?;

        let path = substitute(tool, spec.path, args)?;

        let query = spec
            .query
            .iter()
            .filter_map(|param| present(args, *param).map(|value| (param.name(), value.to_string())))
            .collect();

        let body = spec.body.and_then(|param| {
            present(args, param).map(|value| {
                let mut object = Map::new();
                object.insert(param.name().to_string(), Value::from(value));
                Value::Object(object)
            })
        });

        Ok(Resolved {
            request: ApiRequest {
                method: spec.method,
                path,
                query,
                body,
            },
            format: spec.format,
        })
    }
}

impl Default for EndpointResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn present(args: &dyn Arguments, param: Param) -> Option<&str> {
    args.get(param).filter(|value| !value.is_empty())
}

fn substitute<'a>(
    tool: &str,
    template: &'a str,
    args: &'a dyn Arguments,
) -> Result<String, ResolveError> {
    let missing = |name: &str| ResolveError::MissingPathParameter {
        tool: tool.to_string(),
        param: name.to_string(),
    };

    let segments = template
        .split('/')
        .map(|segment| match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(name) => Param::from_name(name)
                .and_then(|param| present(args, param))
                .ok_or_else(|| missing(name)),
            None => Ok(segment),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(segments.join("/"))
}
