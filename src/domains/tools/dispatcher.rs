//! Tool dispatch pipeline.
//!
//! `ToolDispatcher` drives one invocation through
//! registry lookup → validation → endpoint resolution → explorer request →
//! response formatting. It holds only read-only state, so a single
//! instance is shared by every concurrent call.

use std::sync::Arc;

use rmcp::model::JsonObject;
use tracing::{debug, info, instrument};

use super::endpoint::{EndpointResolver, ResolveError};
use super::error::ToolError;
use super::registry::ToolRegistry;
use super::validator::validate;
use crate::domains::explorer::{ApiError, ExplorerApi};

/// Runs tool invocations against the explorer.
#[derive(Clone)]
pub struct ToolDispatcher {
    registry: ToolRegistry,
    resolver: Arc<EndpointResolver>,
    client: Option<Arc<dyn ExplorerApi>>,
}

impl ToolDispatcher {
    /// Create a dispatcher. Without a client every call fails with
    /// `ApiError::NotConfigured` once it reaches the network step.
    pub fn new(client: Option<Arc<dyn ExplorerApi>>) -> Self {
        Self {
            registry: ToolRegistry::new(),
            resolver: Arc::new(EndpointResolver::new()),
            client,
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Execute one invocation and return the formatted text.
    #[instrument(skip(self, arguments))]
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<String, ToolError> {
        if name.is_empty() {
            return Err(ToolError::MissingToolName);
        }
        let arguments = arguments.ok_or(ToolError::MissingArguments)?;

        let definition = self
            .registry
            .get(name)
            .ok_or_else(|| ResolveError::UnknownMethod(name.to_string()))?;

        let args = validate(definition, &arguments)?;
        let resolved = self.resolver.resolve(name, &args)?;

        let client = self.client.as_ref().ok_or(ApiError::NotConfigured)?;

        info!(
            "Calling explorer: {} {}",
            resolved.request.method, resolved.request.path
        );
        let body = client.execute(&resolved.request).await?;
        debug!("Explorer call for {} succeeded", name);

        Ok(resolved.format.render(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::explorer::{ApiRequest, HttpMethod};
    use serde_json::{Value, json};
    use std::sync::Mutex;

    /// In-memory explorer that records requests and answers with a fixed body.
    struct RecordingApi {
        requests: Mutex<Vec<ApiRequest>>,
        response: Value,
    }

    impl RecordingApi {
        fn new(response: Value) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                response,
            })
        }

        fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl ExplorerApi for RecordingApi {
        async fn execute(&self, request: &ApiRequest) -> Result<Value, ApiError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(self.response.clone())
        }
    }

    fn args(value: Value) -> Option<JsonObject> {
        value.as_object().cloned()
    }

    fn dispatcher(api: &Arc<RecordingApi>) -> ToolDispatcher {
        let client: Arc<dyn ExplorerApi> = api.clone();
        ToolDispatcher::new(Some(client))
    }

    #[tokio::test]
    async fn test_dispatch_pretty_prints() {
        let api = RecordingApi::new(json!({ "hash": "0xabc" }));
        let text = dispatcher(&api)
            .dispatch(
                "get_transaction_info",
                args(json!({ "transaction_hash": "0xabc" })),
            )
            .await
            .unwrap();

        assert_eq!(text, "{\n  \"hash\": \"0xabc\"\n}");
        let requests = api.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(requests[0].path, "transactions/0xabc");
    }

    #[tokio::test]
    async fn test_dispatch_search_formatting() {
        let api = RecordingApi::new(json!({ "items": [{ "name": "Foo", "address": "0xabc" }] }));
        let text = dispatcher(&api)
            .dispatch("search", args(json!({ "q": "Foo" })))
            .await
            .unwrap();

        assert_eq!(text, "Found 1 results:\n\nName: Foo\nAddress: 0xabc");
    }

    #[tokio::test]
    async fn test_missing_path_param_issues_no_request() {
        let api = RecordingApi::new(json!({}));
        let err = dispatcher(&api)
            .dispatch("get_transaction_info", args(json!({})))
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::InvalidInput(_)));
        assert_eq!(err.to_string(), "Invalid input: transaction_hash: required");
        assert!(api.requests().is_empty());
    }

    #[tokio::test]
    async fn test_empty_path_param_issues_no_request() {
        let api = RecordingApi::new(json!({}));
        let err = dispatcher(&api)
            .dispatch("get_address_info", args(json!({ "address_hash": "" })))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "API call failed: Missing required path parameter 'address_hash' for get_address_info"
        );
        assert!(api.requests().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let api = RecordingApi::new(json!({}));
        let err = dispatcher(&api)
            .dispatch("get_everything", args(json!({})))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "API call failed: Unknown method: get_everything");
        assert!(api.requests().is_empty());
    }

    #[tokio::test]
    async fn test_missing_name_and_arguments() {
        let api = RecordingApi::new(json!({}));
        let dispatcher = dispatcher(&api);

        let err = dispatcher.dispatch("", args(json!({}))).await.unwrap_err();
        assert_eq!(err.to_string(), "API call failed: Missing tool name");

        let err = dispatcher.dispatch("get_stats", None).await.unwrap_err();
        assert_eq!(err.to_string(), "API call failed: Missing arguments");

        assert!(api.requests().is_empty());
    }

    #[tokio::test]
    async fn test_parameterless_tool_accepts_empty_object() {
        let api = RecordingApi::new(json!({ "total_blocks": "1" }));
        dispatcher(&api)
            .dispatch("get_stats", args(json!({})))
            .await
            .unwrap();
        assert_eq!(api.requests()[0].path, "stats");
    }

    #[tokio::test]
    async fn test_not_configured() {
        let err = ToolDispatcher::new(None)
            .dispatch("get_stats", args(json!({})))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "API call failed: BLOCKSCOUT_API_URL is not set");
    }

    #[tokio::test]
    async fn test_not_configured_still_validates_first() {
        let err = ToolDispatcher::new(None)
            .dispatch("get_block_info", args(json!({})))
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Invalid input: "));
    }
}
