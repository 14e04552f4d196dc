use chrono::{DateTime, Utc};
use rmcp::{
    handler::server::tool::ToolRouter,
    handler::server::wrapper::{Json, Parameters},
    model::*,
    tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use std::sync::Arc;
use tracing::instrument;

use crate::host::{HostAdapter, NoopHost};
use crate::mcp::error::ToolError;
use crate::mcp::types::{GroupedInput, MutationResponse, SessionResponse, ValidateModelResponse};
use crate::session::SessionMutator;

/// MCP server over the shadow session model.
///
/// Tool calls run one at a time to completion; every mutation goes through
/// the schema gate and then the session mutator, so the shadow state never
/// diverges from what was actually accepted.
#[derive(Clone)]
pub struct BlockhostServer {
    pub(crate) mutator: SessionMutator,
    pub(crate) host: Arc<dyn HostAdapter>,
    pub(crate) started_at: DateTime<Utc>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl BlockhostServer {
    /// Create a server backed by the given host adapter.
    pub fn new(host: Arc<dyn HostAdapter>) -> Self {
        Self {
            mutator: SessionMutator::new(),
            host,
            started_at: Utc::now(),
            tool_router: Self::tool_router(),
        }
    }

    /// Server with no attached editor; paint calls are accepted and dropped.
    pub fn detached() -> Self {
        Self::new(Arc::new(NoopHost))
    }

    #[tool(
        description = "Bone and cube operations: create_bones, update_bone, remove_bones, create_cubes, update_cube, remove_cubes. Removing a bone also removes the cubes it owns."
    )]
    #[instrument(name = "mcp.elements", skip_all)]
    pub async fn elements(
        &self,
        request: Parameters<GroupedInput>,
    ) -> Result<Json<MutationResponse>, ToolError> {
        self.handle_elements(request).await.map(Json)
    }

    #[tool(
        description = "Texture operations: create_texture, update_texture, remove_textures, paint. Paint ops (fill/draw/line with color and optional shade) are applied by the host editor."
    )]
    #[instrument(name = "mcp.textures", skip_all)]
    pub async fn textures(
        &self,
        request: Parameters<GroupedInput>,
    ) -> Result<Json<MutationResponse>, ToolError> {
        self.handle_textures(request).await.map(Json)
    }

    #[tool(
        description = "Animation operations: create_animation, update_animation, remove_animations, set_keyframes (per-bone position/rotation/scale channel), set_trigger (timed effect marker)."
    )]
    #[instrument(name = "mcp.animations", skip_all)]
    pub async fn animations(
        &self,
        request: Parameters<GroupedInput>,
    ) -> Result<Json<MutationResponse>, ToolError> {
        self.handle_animations(request).await.map(Json)
    }

    #[tool(
        description = "Check the tracked model for structural problems: dangling bone parents, cubes without bones, zero-sized textures, channels animating unknown bones."
    )]
    #[instrument(name = "mcp.validate_model", skip_all)]
    pub async fn validate_model(&self) -> Result<Json<ValidateModelResponse>, ToolError> {
        Ok(Json(self.handle_validate_model().await))
    }

    #[tool(
        description = "Session queries: overview (entity counts), list (names in one collection), next_actions (suggested follow-ups), reset (drop all tracked state)."
    )]
    #[instrument(name = "mcp.session", skip_all)]
    pub async fn session(
        &self,
        request: Parameters<GroupedInput>,
    ) -> Result<Json<SessionResponse>, ToolError> {
        self.handle_session(request).await.map(Json)
    }
}

#[tool_handler]
impl ServerHandler for BlockhostServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "blockhost".to_string(),
                title: Some("Blockhost Model Bridge".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                r#"# Blockhost Model Bridge

Tools for driving a block-model editor through a tracked session model.

## Tools
- elements(operation) — bones and cubes: create_bones, update_bone, remove_bones, create_cubes, update_cube, remove_cubes
- textures(operation) — create_texture, update_texture, remove_textures, paint (fill/draw/line)
- animations(operation) — create_animation, update_animation, remove_animations, set_keyframes, set_trigger
- validate_model — structural check of the tracked model
- session(operation) — overview, list, next_actions, reset

## Conventions
- Entities are identified by name. Creating under an existing name replaces it.
- Updates merge only the fields you provide; omitted fields are untouched.
- Updating or removing a name that is not tracked is not an error; the response says what matched.
- Removing a bone removes the cubes it owns.
"#
                .to_string(),
            ),
        }
    }
}

/// Run the MCP server on stdio transport.
pub async fn run_mcp_server(host: Arc<dyn HostAdapter>) -> anyhow::Result<()> {
    let server = BlockhostServer::new(host);

    tracing::info!("Starting Blockhost MCP server v{}", env!("CARGO_PKG_VERSION"));

    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let service = server.serve(transport).await?;
    tracing::info!("MCP server listening on stdio (5 tools)");

    tokio::spawn(async {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Shutdown signal received");
    });

    service.waiting().await?;
    tracing::info!("MCP server shutting down");

    Ok(())
}
