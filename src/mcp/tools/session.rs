//! Session queries: overview, listing, next-action suggestions, reset.

use rmcp::handler::server::wrapper::Parameters;

use super::decode_request;
use crate::mcp::error::ToolError;
use crate::mcp::types::{GroupedInput, ListKind, SessionOverview, SessionRequest, SessionResponse};
use crate::mcp::BlockhostServer;
use crate::session::SessionState;

impl BlockhostServer {
    /// Handler for the `session` tool.
    pub async fn handle_session(
        &self,
        Parameters(input): Parameters<GroupedInput>,
    ) -> Result<SessionResponse, ToolError> {
        let request: SessionRequest = decode_request("session", input)?;

        match request {
            SessionRequest::Overview {} => {
                let snapshot = self.mutator.snapshot().await;
                Ok(SessionResponse {
                    operation: "overview".to_string(),
                    overview: Some(SessionOverview {
                        bone_count: snapshot.bones.len(),
                        cube_count: snapshot.cubes.len(),
                        texture_count: snapshot.textures.len(),
                        animation_count: snapshot.animations.len(),
                        started_at: self.started_at.to_rfc3339(),
                    }),
                    names: None,
                    suggestions: Vec::new(),
                    hints: Vec::new(),
                })
            }
            SessionRequest::List { kind } => {
                let snapshot = self.mutator.snapshot().await;
                let mut names: Vec<String> = match kind {
                    ListKind::Bones => snapshot.bones.keys().cloned().collect(),
                    ListKind::Cubes => snapshot.cubes.keys().cloned().collect(),
                    ListKind::Textures => snapshot.textures.keys().cloned().collect(),
                    ListKind::Animations => snapshot.animations.keys().cloned().collect(),
                };
                names.sort();
                Ok(SessionResponse {
                    operation: "list".to_string(),
                    overview: None,
                    names: Some(names),
                    suggestions: Vec::new(),
                    hints: Vec::new(),
                })
            }
            SessionRequest::NextActions {} => {
                let snapshot = self.mutator.snapshot().await;
                Ok(SessionResponse {
                    operation: "next_actions".to_string(),
                    overview: None,
                    names: None,
                    suggestions: suggest_next_actions(&snapshot),
                    hints: Vec::new(),
                })
            }
            SessionRequest::Reset {} => {
                self.mutator.reset(SessionState::default()).await;
                Ok(SessionResponse {
                    operation: "reset".to_string(),
                    overview: None,
                    names: None,
                    suggestions: Vec::new(),
                    hints: vec![
                        "Shadow state cleared. Re-seed it from the host project before mutating."
                            .to_string(),
                    ],
                })
            }
        }
    }
}

/// Deterministic follow-up suggestions derived from gaps in the shadow state.
pub(crate) fn suggest_next_actions(state: &SessionState) -> Vec<String> {
    let mut suggestions = Vec::new();

    if state.bones.is_empty() {
        suggestions
            .push("No bones tracked. Create a root bone with elements/create_bones.".to_string());
    }
    if !state.cubes.is_empty() {
        let orphans: Vec<&str> = state
            .cubes
            .values()
            .filter(|c| c.bone.is_none())
            .map(|c| c.name.as_str())
            .collect();
        if !orphans.is_empty() {
            suggestions.push(format!(
                "{} cube(s) have no owning bone ({}). Attach them with elements/update_cube.",
                orphans.len(),
                orphans.join(", ")
            ));
        }
    }
    if state.textures.is_empty() && !state.cubes.is_empty() {
        suggestions
            .push("Geometry exists but no textures. Create one with textures/create_texture.".to_string());
    }
    for animation in state.animations.values() {
        if animation.channels.is_empty() {
            suggestions.push(format!(
                "Animation '{}' has no channels. Add keyframes with animations/set_keyframes.",
                animation.name
            ));
        }
    }

    suggestions.sort();
    suggestions
}
