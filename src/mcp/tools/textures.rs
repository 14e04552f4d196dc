//! Texture mutation and paint handlers.

use rmcp::handler::server::wrapper::Parameters;

use super::decode_request;
use crate::host::PaintOp;
use crate::mcp::error::ToolError;
use crate::mcp::types::{GroupedInput, MutationResponse, RemovalInfo, TexturesRequest};
use crate::mcp::BlockhostServer;
use crate::session::TrackedTexture;

impl BlockhostServer {
    /// Handler for the `textures` tool.
    pub async fn handle_textures(
        &self,
        Parameters(input): Parameters<GroupedInput>,
    ) -> Result<MutationResponse, ToolError> {
        let request: TexturesRequest = decode_request("textures", input)?;

        match request {
            TexturesRequest::CreateTexture { name, width, height, assigned } => {
                self.mutator
                    .add_texture(TrackedTexture {
                        name: name.clone(),
                        width,
                        height,
                        assigned: assigned.unwrap_or(false),
                    })
                    .await;
                let mut response = MutationResponse::new("create_texture");
                response.touched.push(name);
                response
                    .hints
                    .push("Paint it with textures/paint once faces are mapped.".to_string());
                Ok(response)
            }
            TexturesRequest::UpdateTexture { name, fields } => {
                let existed = self.mutator.update_texture(&name, fields).await;
                let mut response = MutationResponse::new("update_texture");
                response.matched = Some(existed);
                if existed {
                    response.touched.push(name);
                } else {
                    response.hints.push(format!(
                        "No texture named '{}' is tracked; nothing changed.",
                        name
                    ));
                }
                Ok(response)
            }
            TexturesRequest::RemoveTextures { names } => {
                let removed = self.mutator.remove_textures(names).await;
                let mut response = MutationResponse::new("remove_textures");
                response.removal = Some(RemovalInfo { removed, cascaded_cubes: None });
                Ok(response)
            }
            TexturesRequest::Paint { ops } => {
                // Painting never mutates the shadow model; it only reaches the
                // host once every referenced texture is actually tracked.
                let snapshot = self.mutator.snapshot().await;
                let mut host_ops = Vec::with_capacity(ops.len());
                for op in &ops {
                    if !snapshot.textures.contains_key(&op.texture) {
                        return Err(ToolError::not_found("Texture", &op.texture));
                    }
                    host_ops.push(PaintOp {
                        kind: op.op.clone(),
                        texture: op.texture.clone(),
                        color: op.color.clone(),
                        from: (op.from[0], op.from[1]),
                        to: op.to.map(|p| (p[0], p[1])),
                        shade: op.shade.as_ref().and_then(|s| s.intensity()),
                    });
                }

                self.host.paint(&host_ops).await.map_err(ToolError::from)?;

                let mut response = MutationResponse::new("paint");
                response.touched = host_ops.iter().map(|op| op.texture.clone()).collect();
                response.touched.sort();
                response.touched.dedup();
                response
                    .hints
                    .push(format!("Applied {} paint operation(s).", host_ops.len()));
                Ok(response)
            }
        }
    }
}
