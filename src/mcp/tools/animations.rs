//! Animation mutation handlers, including keyframe and trigger upserts.

use rmcp::handler::server::wrapper::Parameters;

use super::decode_request;
use crate::mcp::error::ToolError;
use crate::mcp::types::{AnimationsRequest, GroupedInput, MutationResponse, RemovalInfo};
use crate::mcp::BlockhostServer;
use crate::session::{TrackedAnimation, TrackedChannel, TrackedTrigger};

impl BlockhostServer {
    /// Handler for the `animations` tool.
    pub async fn handle_animations(
        &self,
        Parameters(input): Parameters<GroupedInput>,
    ) -> Result<MutationResponse, ToolError> {
        let request: AnimationsRequest = decode_request("animations", input)?;

        match request {
            AnimationsRequest::CreateAnimation { name, length, loop_mode } => {
                self.mutator
                    .add_animation(TrackedAnimation {
                        name: name.clone(),
                        length,
                        loop_mode,
                        channels: Vec::new(),
                        triggers: Vec::new(),
                    })
                    .await;
                let mut response = MutationResponse::new("create_animation");
                response.touched.push(name);
                response
                    .hints
                    .push("Add keyframes with animations/set_keyframes.".to_string());
                Ok(response)
            }
            AnimationsRequest::UpdateAnimation { name, fields } => {
                let existed = self.mutator.update_animation(&name, fields).await;
                let mut response = MutationResponse::new("update_animation");
                response.matched = Some(existed);
                if existed {
                    response.touched.push(name);
                } else {
                    response.hints.push(format!(
                        "No animation named '{}' is tracked; nothing changed.",
                        name
                    ));
                }
                Ok(response)
            }
            AnimationsRequest::RemoveAnimations { names } => {
                let removed = self.mutator.remove_animations(names).await;
                let mut response = MutationResponse::new("remove_animations");
                response.removal = Some(RemovalInfo { removed, cascaded_cubes: None });
                Ok(response)
            }
            AnimationsRequest::SetKeyframes { animation, bone, channel, keyframes } => {
                let snapshot = self.mutator.snapshot().await;
                if !snapshot.animations.contains_key(&animation) {
                    return Err(ToolError::not_found("Animation", &animation));
                }
                let mut response = MutationResponse::new("set_keyframes");
                if !snapshot.bones.contains_key(&bone) {
                    response.hints.push(format!(
                        "Channel targets untracked bone '{}'; the host may ignore it.",
                        bone
                    ));
                }
                self.mutator
                    .upsert_animation_channel(
                        &animation,
                        TrackedChannel { bone, channel, keyframes },
                    )
                    .await;
                response.touched.push(animation);
                Ok(response)
            }
            AnimationsRequest::SetTrigger { animation, time, effect, locator } => {
                let snapshot = self.mutator.snapshot().await;
                if !snapshot.animations.contains_key(&animation) {
                    return Err(ToolError::not_found("Animation", &animation));
                }
                self.mutator
                    .upsert_animation_trigger(&animation, TrackedTrigger { time, effect, locator })
                    .await;
                let mut response = MutationResponse::new("set_trigger");
                response.touched.push(animation);
                Ok(response)
            }
        }
    }
}
