//! Tool parameters.
//!
//! Every explorer tool takes its arguments from a small closed set of
//! names (`Param`). Each distinct argument shape has its own typed record,
//! deriving `Deserialize` for validation and `JsonSchema` for the
//! `inputSchema` advertised in `tools/list`. All explorer parameters are
//! JSON strings.

use std::fmt;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Every argument name understood by the explorer tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    Q,
    Filter,
    Type,
    Method,
    TransactionHash,
    BlockNumberOrHash,
    AddressHash,
    Id,
    RecaptchaResponse,
}

impl Param {
    pub const ALL: [Param; 9] = [
        Param::Q,
        Param::Filter,
        Param::Type,
        Param::Method,
        Param::TransactionHash,
        Param::BlockNumberOrHash,
        Param::AddressHash,
        Param::Id,
        Param::RecaptchaResponse,
    ];

    /// Wire name of the parameter, used in schemas, paths and query strings.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Q => "q",
            Self::Filter => "filter",
            Self::Type => "type",
            Self::Method => "method",
            Self::TransactionHash => "transaction_hash",
            Self::BlockNumberOrHash => "block_number_or_hash",
            Self::AddressHash => "address_hash",
            Self::Id => "id",
            Self::RecaptchaResponse => "recaptcha_response",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Validated arguments
// ============================================================================

/// Read access to a validated parameter record.
pub trait Arguments: fmt::Debug + Send + Sync {
    /// Value of `param`, when the record declares it and the caller set it.
    fn get(&self, param: Param) -> Option<&str>;
}

/// A parameter record a tool can be declared with.
pub trait ToolParams: Arguments + DeserializeOwned + JsonSchema + 'static {}

impl<T> ToolParams for T where T: Arguments + DeserializeOwned + JsonSchema + 'static {}

/// Validated arguments of one invocation, whatever the tool's record type.
#[derive(Debug)]
pub struct ToolArguments(Box<dyn Arguments>);

impl ToolArguments {
    pub fn new(params: impl Arguments + 'static) -> Self {
        Self(Box::new(params))
    }
}

impl Arguments for ToolArguments {
    fn get(&self, param: Param) -> Option<&str> {
        self.0.get(param)
    }
}

/// Optional string that must not be JSON `null` when present.
fn non_null<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

// ============================================================================
// Parameter records
// ============================================================================

/// Parameters for tools that take no arguments.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct EmptyParams {}

impl Arguments for EmptyParams {
    fn get(&self, _param: Param) -> Option<&str> {
        None
    }
}

/// Parameters for `search` and `search_redirect`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchParams {
    #[schemars(description = "Search query")]
    pub q: String,
}

impl Arguments for SearchParams {
    fn get(&self, param: Param) -> Option<&str> {
        match param {
            Param::Q => Some(&self.q),
            _ => None,
        }
    }
}

/// Filters for the global transaction list.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct TransactionListParams {
    #[serde(default, deserialize_with = "non_null")]
    #[schemars(with = "String", description = "Filter: pending | validated")]
    pub filter: Option<String>,

    #[serde(rename = "type", default, deserialize_with = "non_null")]
    #[schemars(
        with = "String",
        description = "Transaction type: token_transfer,contract_creation,contract_call,coin_transfer,token_creation"
    )]
    pub transaction_type: Option<String>,

    #[serde(default, deserialize_with = "non_null")]
    #[schemars(
        with = "String",
        description = "Method: approve,transfer,multicall,mint,commit"
    )]
    pub method: Option<String>,
}

impl Arguments for TransactionListParams {
    fn get(&self, param: Param) -> Option<&str> {
        match param {
            Param::Filter => self.filter.as_deref(),
            Param::Type => self.transaction_type.as_deref(),
            Param::Method => self.method.as_deref(),
            _ => None,
        }
    }
}

/// Filters for the global block list.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct BlockListParams {
    #[serde(rename = "type", default, deserialize_with = "non_null")]
    #[schemars(with = "String", description = "Block type: block | uncle | reorg")]
    pub block_type: Option<String>,
}

impl Arguments for BlockListParams {
    fn get(&self, param: Param) -> Option<&str> {
        match param {
            Param::Type => self.block_type.as_deref(),
            _ => None,
        }
    }
}

/// Parameters for tools addressing a single transaction.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TransactionHashParams {
    #[schemars(description = "Transaction hash")]
    pub transaction_hash: String,
}

impl Arguments for TransactionHashParams {
    fn get(&self, param: Param) -> Option<&str> {
        match param {
            Param::TransactionHash => Some(&self.transaction_hash),
            _ => None,
        }
    }
}

/// Token transfers of one transaction.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TransactionTokenTransfersParams {
    #[schemars(description = "Transaction hash")]
    pub transaction_hash: String,

    #[serde(rename = "type", default, deserialize_with = "non_null")]
    #[schemars(with = "String", description = "Token type: ERC-20,ERC-721,ERC-1155")]
    pub token_type: Option<String>,
}

impl Arguments for TransactionTokenTransfersParams {
    fn get(&self, param: Param) -> Option<&str> {
        match param {
            Param::TransactionHash => Some(&self.transaction_hash),
            Param::Type => self.token_type.as_deref(),
            _ => None,
        }
    }
}

/// Parameters for tools addressing a single block.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BlockParams {
    #[schemars(description = "Block number or hash")]
    pub block_number_or_hash: String,
}

impl Arguments for BlockParams {
    fn get(&self, param: Param) -> Option<&str> {
        match param {
            Param::BlockNumberOrHash => Some(&self.block_number_or_hash),
            _ => None,
        }
    }
}

/// Parameters for tools addressing a single account or contract.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddressHashParams {
    #[schemars(description = "Address hash")]
    pub address_hash: String,
}

impl Arguments for AddressHashParams {
    fn get(&self, param: Param) -> Option<&str> {
        match param {
            Param::AddressHash => Some(&self.address_hash),
            _ => None,
        }
    }
}

/// Address-scoped lists filtered by direction.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddressDirectionParams {
    #[schemars(description = "Address hash")]
    pub address_hash: String,

    #[serde(default, deserialize_with = "non_null")]
    #[schemars(with = "String", description = "Filter: to | from")]
    pub filter: Option<String>,
}

impl Arguments for AddressDirectionParams {
    fn get(&self, param: Param) -> Option<&str> {
        match param {
            Param::AddressHash => Some(&self.address_hash),
            Param::Filter => self.filter.as_deref(),
            _ => None,
        }
    }
}

/// Token transfers of one address.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddressTokenTransfersParams {
    #[schemars(description = "Address hash")]
    pub address_hash: String,

    #[serde(rename = "type", default, deserialize_with = "non_null")]
    #[schemars(with = "String", description = "Token type: ERC-20,ERC-721,ERC-1155")]
    pub token_type: Option<String>,

    #[serde(default, deserialize_with = "non_null")]
    #[schemars(with = "String", description = "Filter: to | from")]
    pub filter: Option<String>,
}

impl Arguments for AddressTokenTransfersParams {
    fn get(&self, param: Param) -> Option<&str> {
        match param {
            Param::AddressHash => Some(&self.address_hash),
            Param::Type => self.token_type.as_deref(),
            Param::Filter => self.filter.as_deref(),
            _ => None,
        }
    }
}

/// Fungible and non-fungible tokens held by an address.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddressTokensParams {
    #[schemars(description = "Address hash")]
    pub address_hash: String,

    #[serde(rename = "type", default, deserialize_with = "non_null")]
    #[schemars(with = "String", description = "Token type: ERC-20,ERC-721,ERC-1155")]
    pub token_type: Option<String>,
}

impl Arguments for AddressTokensParams {
    fn get(&self, param: Param) -> Option<&str> {
        match param {
            Param::AddressHash => Some(&self.address_hash),
            Param::Type => self.token_type.as_deref(),
            _ => None,
        }
    }
}

/// NFTs and NFT collections held by an address.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddressNftParams {
    #[schemars(description = "Address hash")]
    pub address_hash: String,

    #[serde(rename = "type", default, deserialize_with = "non_null")]
    #[schemars(with = "String", description = "Token type: ERC-721,ERC-404,ERC-1155")]
    pub token_type: Option<String>,
}

impl Arguments for AddressNftParams {
    fn get(&self, param: Param) -> Option<&str> {
        match param {
            Param::AddressHash => Some(&self.address_hash),
            Param::Type => self.token_type.as_deref(),
            _ => None,
        }
    }
}

/// Parameters for tools addressing a single token contract.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TokenAddressParams {
    #[schemars(description = "Token contract address")]
    pub address_hash: String,
}

impl Arguments for TokenAddressParams {
    fn get(&self, param: Param) -> Option<&str> {
        match param {
            Param::AddressHash => Some(&self.address_hash),
            _ => None,
        }
    }
}

/// Parameters for tools addressing one instance (NFT) of a token.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TokenInstanceParams {
    #[schemars(description = "Token contract address")]
    pub address_hash: String,

    #[schemars(description = "Token instance id")]
    pub id: String,
}

impl Arguments for TokenInstanceParams {
    fn get(&self, param: Param) -> Option<&str> {
        match param {
            Param::AddressHash => Some(&self.address_hash),
            Param::Id => Some(&self.id),
            _ => None,
        }
    }
}

/// Metadata refetch of one token instance.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RefetchParams {
    #[schemars(description = "Token contract address")]
    pub address_hash: String,

    #[schemars(description = "Token instance id")]
    pub id: String,

    #[schemars(description = "reCAPTCHA response token")]
    pub recaptcha_response: String,
}

impl Arguments for RefetchParams {
    fn get(&self, param: Param) -> Option<&str> {
        match param {
            Param::AddressHash => Some(&self.address_hash),
            Param::Id => Some(&self.id),
            Param::RecaptchaResponse => Some(&self.recaptcha_response),
            _ => None,
        }
    }
}

/// Filters for the global token list.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct TokenListParams {
    #[serde(default, deserialize_with = "non_null")]
    #[schemars(with = "String", description = "Search query for token name or symbol")]
    pub q: Option<String>,

    #[serde(rename = "type", default, deserialize_with = "non_null")]
    #[schemars(with = "String", description = "Token type: ERC-20,ERC-721,ERC-1155")]
    pub token_type: Option<String>,
}

impl Arguments for TokenListParams {
    fn get(&self, param: Param) -> Option<&str> {
        match param {
            Param::Q => self.q.as_deref(),
            Param::Type => self.token_type.as_deref(),
            _ => None,
        }
    }
}

/// Filters for the verified smart contract list.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SmartContractListParams {
    #[serde(default, deserialize_with = "non_null")]
    #[schemars(with = "String", description = "Search query")]
    pub q: Option<String>,

    #[serde(default, deserialize_with = "non_null")]
    #[schemars(with = "String", description = "Filter: vyper | solidity | yul")]
    pub filter: Option<String>,
}

impl Arguments for SmartContractListParams {
    fn get(&self, param: Param) -> Option<&str> {
        match param {
            Param::Q => self.q.as_deref(),
            Param::Filter => self.filter.as_deref(),
            _ => None,
        }
    }
}
