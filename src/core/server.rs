//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tools domain.
//!
//! ## Tool Architecture
//!
//! The catalog and the endpoint table live in `domains/tools/`. The server
//! only answers `tools/list` from the registry and hands `tools/call` to
//! the `ToolDispatcher`, turning any failure into an error result.
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use super::config::Config;
use super::error::{Error, Result};
use crate::domains::explorer::{BaseUrl, BlockscoutClient, ExplorerApi};
use crate::domains::tools::{ToolDispatcher, ToolError};

/// The main MCP server handler.
///
/// Cloning is cheap: configuration and the dispatcher's tables and HTTP
/// client are shared behind `Arc`s, and no state is kept between calls.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Dispatch pipeline for tool calls.
    dispatcher: ToolDispatcher,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails if the configured explorer URL cannot be used; a missing URL is
    /// not an error here, calls will report it instead.
    pub fn new(config: Config) -> Result<Self> {
        let client = match config.explorer.api_url.as_deref() {
            Some(raw) => {
                if config.explorer.timeout_secs == 0 {
                    return Err(Error::config("explorer timeout must be at least one second"));
                }
                let base_url = BaseUrl::parse(raw)?;
                info!("Explorer base URL: {}", base_url);

                let client = BlockscoutClient::new(
                    base_url,
                    Duration::from_secs(config.explorer.timeout_secs),
                )?;
                Some(Arc::new(client) as Arc<dyn ExplorerApi>)
            }
            None => None,
        };

        Ok(Self::with_client(config, client))
    }

    /// Create a server around an explicit explorer client.
    pub fn with_client(config: Config, client: Option<Arc<dyn ExplorerApi>>) -> Self {
        Self {
            config: Arc::new(config),
            dispatcher: ToolDispatcher::new(client),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// The published tool catalog.
    pub fn tools(&self) -> Vec<Tool> {
        self.dispatcher.registry().list_tools()
    }

    /// Run one tool call and wrap the outcome for the client.
    ///
    /// Failures come back as an error result carrying the message text,
    /// never as an empty success.
    pub async fn invoke(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        match self.dispatcher.dispatch(name, arguments).await {
            Ok(text) => CallToolResult::success(vec![Content::text(text)]),
            Err(e) => {
                warn!("Tool '{}' failed: {}", name, e);
                CallToolResult::error(vec![Content::text(e.to_string())])
            }
        }
    }

    /// Like [`invoke`](Self::invoke), but gives up as soon as `ct` fires.
    ///
    /// Dropping the pipeline future also drops any in-flight request.
    pub async fn invoke_until_cancelled(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
        ct: CancellationToken,
    ) -> CallToolResult {
        tokio::select! {
            result = self.invoke(name, arguments) => result,
            _ = ct.cancelled() => {
                warn!("Tool call cancelled by client: {}", name);
                CallToolResult::error(vec![Content::text(ToolError::Cancelled.to_string())])
            }
        }
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Blockscout explorer tools: search, transactions, blocks, addresses, tokens, \
                 smart contracts and network statistics."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    #[instrument(skip_all)]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip_all, fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        info!("Calling tool: {}", request.name);

        Ok(self
            .invoke_until_cancelled(&request.name, request.arguments, context.ct)
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;
    use serde_json::{Value, json};

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    fn args(value: Value) -> Option<JsonObject> {
        value.as_object().cloned()
    }

    fn server_for(mock_server: &mockito::ServerGuard) -> McpServer {
        McpServer::new(Config::with_api_url(mock_server.url())).unwrap()
    }

    #[test]
    fn test_server_info_enables_tools() {
        let server = McpServer::new(Config::default()).unwrap();
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert_eq!(server.name(), "blockscout-mcp");
    }

    #[test]
    fn test_invalid_api_url_fails_startup() {
        let result = McpServer::new(Config::with_api_url("not a url"));
        assert!(matches!(result, Err(Error::Explorer(_))));
    }

    #[test]
    fn test_tools_lists_whole_catalog() {
        let server = McpServer::new(Config::default()).unwrap();
        let tools = server.tools();
        assert_eq!(tools.len(), crate::domains::tools::TOOLS.len());
        assert!(tools.iter().any(|t| t.name == "get_transaction_summary"));
    }

    #[tokio::test]
    async fn test_invoke_success_end_to_end() {
        let mut mock_server = mockito::Server::new_async().await;
        let mock = mock_server
            .mock("GET", "/v2/search")
            .match_query(mockito::Matcher::UrlEncoded("q".into(), "Foo".into()))
            .with_status(200)
            .with_body(r#"{"items":[{"name":"Foo","address":"0xabc"}]}"#)
            .create_async()
            .await;

        let server = server_for(&mock_server);
        let result = server.invoke("search", args(json!({ "q": "Foo" }))).await;

        assert_ne!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "Found 1 results:\n\nName: Foo\nAddress: 0xabc");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_invoke_upstream_error() {
        let mut mock_server = mockito::Server::new_async().await;
        mock_server
            .mock("GET", "/v2/blocks/999999999")
            .with_status(404)
            .with_body(r#"{"message":"Not found"}"#)
            .create_async()
            .await;

        let server = server_for(&mock_server);
        let result = server
            .invoke("get_block_info", args(json!({ "block_number_or_hash": "999999999" })))
            .await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            text_of(&result),
            r#"API call failed: HTTP error! status: 404, body: {"message":"Not found"}"#
        );
    }

    #[tokio::test]
    async fn test_invoke_invalid_input_issues_no_request() {
        let mut mock_server = mockito::Server::new_async().await;
        let mock = mock_server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let server = server_for(&mock_server);
        let result = server.invoke("get_transaction_info", args(json!({}))).await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "Invalid input: transaction_hash: required");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_invoke_refetch_metadata() {
        let mut mock_server = mockito::Server::new_async().await;
        let mock = mock_server
            .mock("PATCH", "/v2/tokens/0xabc/instances/1/metadata")
            .match_query(mockito::Matcher::UrlEncoded(
                "recaptcha_response".into(),
                "captcha".into(),
            ))
            .match_header("content-type", "application/json")
            .match_body(mockito::Matcher::Json(json!({ "recaptcha_response": "captcha" })))
            .with_status(200)
            .with_body(r#"{"message":"OK"}"#)
            .create_async()
            .await;

        let server = server_for(&mock_server);
        let result = server
            .invoke(
                "refetch_token_instance_metadata",
                args(json!({
                    "address_hash": "0xabc",
                    "id": "1",
                    "recaptcha_response": "captcha"
                })),
            )
            .await;

        assert_ne!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "{\n  \"message\": \"OK\"\n}");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_concurrent_calls_are_independent() {
        let mut mock_server = mockito::Server::new_async().await;
        mock_server
            .mock("GET", "/v2/addresses/0x1111")
            .with_status(200)
            .with_body(r#"{"hash":"0x1111"}"#)
            .create_async()
            .await;
        mock_server
            .mock("GET", "/v2/tokens/0x2222/holders")
            .with_status(200)
            .with_body(r#"{"items":[{"value":"5"}]}"#)
            .create_async()
            .await;

        let server = server_for(&mock_server);
        let calls = vec![
            server.invoke("get_address_info", args(json!({ "address_hash": "0x1111" }))),
            server.invoke("get_token_holders", args(json!({ "address_hash": "0x2222" }))),
        ];
        let results = futures::future::join_all(calls).await;

        assert_eq!(text_of(&results[0]), "{\n  \"hash\": \"0x1111\"\n}");
        assert!(text_of(&results[1]).contains("\"value\": \"5\""));
        assert!(!text_of(&results[1]).contains("0x1111"));
    }

    #[tokio::test]
    async fn test_invoke_without_api_url() {
        let server = McpServer::new(Config::default()).unwrap();
        let result = server.invoke("get_stats", args(json!({}))).await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "API call failed: BLOCKSCOUT_API_URL is not set");
    }

    #[tokio::test]
    async fn test_query_smuggled_in_path_argument_is_dropped() {
        let mut mock_server = mockito::Server::new_async().await;
        let mock = mock_server
            .mock("GET", "/v2/addresses/0xabc")
            .match_query(mockito::Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"hash":"0xabc"}"#)
            .create_async()
            .await;

        let server = server_for(&mock_server);
        let result = server
            .invoke("get_address_info", args(json!({ "address_hash": "0xabc?foo=bar" })))
            .await;

        assert_ne!(result.is_error, Some(true));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_invoke_times_out() {
        // Accepts connections into the backlog but never answers.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let mut config = Config::with_api_url(format!("http://{}", listener.local_addr().unwrap()));
        config.explorer.timeout_secs = 1;

        let server = McpServer::new(config).unwrap();
        let result = server.invoke("get_stats", args(json!({}))).await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            text_of(&result),
            "API call failed: Request timed out after 1 seconds"
        );
        drop(listener);
    }

    #[tokio::test]
    async fn test_cancelled_call_returns_error_result() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let server = McpServer::new(Config::with_api_url(format!(
            "http://{}",
            listener.local_addr().unwrap()
        )))
        .unwrap();

        let ct = CancellationToken::new();
        let canceller = ct.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let result = server
            .invoke_until_cancelled("get_stats", args(json!({})), ct)
            .await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "API call failed: request cancelled");
        drop(listener);
    }
}
