//! MCP Server for goodreads-mcp
//!
//! MCP Protocol (stdio) <-> application::GoodreadsService
//!
//! 1 tool: get_books

use std::sync::Arc;

use rmcp::{
    handler::server::{tool::ToolCallContext, tool::ToolRouter},
    model::{
        CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
    transport::stdio,
    ErrorData as McpError, ServerHandler, ServiceExt,
};
use serde::Serialize;

use crate::application::config::ServerConfig;
use crate::application::error::AppError;
use crate::application::service::GoodreadsService;
use crate::domain::error::AuthError;
use crate::domain::model::book::AuthResponse;
use crate::domain::transport::Transport;
use crate::infra::http::ReqwestTransport;

// =============================================================================
// Public entry point
// =============================================================================

/// MCP Serverを起動し、クライアントが切断するまで待つ。
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!(
        host = %config.host,
        has_credentials = config.credentials.is_some(),
        "starting Goodreads MCP server"
    );
    let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new()?);
    let server = GoodreadsMcpServer::new(config, transport);
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}

// =============================================================================
// Tool output
// =============================================================================

/// `get_books` の返却値。
/// 成功時は `{"profile_id", "books"}`、認証失敗時は `{"error"}`。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GetBooksOutput {
    Books(AuthResponse),
    Error { error: String },
}

impl From<AuthError> for GetBooksOutput {
    fn from(e: AuthError) -> Self {
        Self::Error {
            error: e.message().to_string(),
        }
    }
}

// =============================================================================
// MCP Server
// =============================================================================

#[derive(Clone)]
pub struct GoodreadsMcpServer {
    config: Arc<ServerConfig>,
    service: Arc<GoodreadsService<Arc<dyn Transport>>>,
    tool_router: ToolRouter<Self>,
}

impl GoodreadsMcpServer {
    pub fn new(config: ServerConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            service: Arc::new(GoodreadsService::new(transport)),
            tool_router: Self::tool_router(),
        }
    }

    /// `get_books` 本体。認証失敗は `GetBooksOutput::Error` に畳み込み、
    /// それ以外の失敗だけをErrで返す。
    /// 資格情報が無ければgetgatherには接続しない。
    pub async fn fetch_books(&self) -> Result<GetBooksOutput, AppError> {
        let Some(credentials) = &self.config.credentials else {
            return Ok(AuthError::missing_credentials().into());
        };
        match self
            .service
            .authenticate(credentials, &self.config.host)
            .await
        {
            Ok(resp) => Ok(GetBooksOutput::Books(resp)),
            Err(AppError::Auth(e)) => Ok(e.into()),
            Err(e) => Err(e),
        }
    }

    fn to_mcp_error(e: AppError) -> McpError {
        McpError::internal_error(format!("{e}"), None)
    }
}

// =============================================================================
// ServerHandler impl
// =============================================================================

impl ServerHandler for GoodreadsMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "Goodreads MCP".to_string(),
                title: Some("Goodreads MCP — shelved books via getgather".to_string()),
                description: Some(
                    "Fetches the configured Goodreads account's books through a getgather service."
                        .to_string(),
                ),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Call `get_books` to list the user's Goodreads books. \
                 Credentials come from GOODREADS_EMAIL and GOODREADS_PASSWORD; \
                 the getgather host from GETGATHER_URL (default 127.0.0.1:8000)."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let tool_ctx = ToolCallContext::new(self, request, context);
        self.tool_router.call(tool_ctx).await
    }
}

// =============================================================================
// Tool implementations
// =============================================================================

#[tool_router]
impl GoodreadsMcpServer {
    #[tool(
        name = "get_books",
        description = "Get books from Goodreads using configured credentials. Credentials are read from the GOODREADS_EMAIL and GOODREADS_PASSWORD environment variables. Returns {profile_id, books: [{title, author, rating, cover}]} or {error}.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = true
        )
    )]
    async fn get_books(&self) -> Result<CallToolResult, McpError> {
        let output = self.fetch_books().await.map_err(Self::to_mcp_error)?;
        Ok(CallToolResult::success(vec![Content::json(&output)?]))
    }
}
