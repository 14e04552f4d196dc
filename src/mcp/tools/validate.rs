//! Model validation: structural checks over the shadow session state.

use crate::mcp::types::{ModelIssue, ValidateModelResponse};
use crate::mcp::BlockhostServer;
use crate::session::SessionState;

impl BlockhostServer {
    /// Handler for the `validate_model` tool.
    pub async fn handle_validate_model(&self) -> ValidateModelResponse {
        let snapshot = self.mutator.snapshot().await;
        let issues = collect_issues(&snapshot);
        ValidateModelResponse {
            ok: !issues.iter().any(|i| i.severity == "error"),
            issues,
        }
    }
}

/// Run all structural checks. Dangling references are tolerated by the model
/// itself (the host may reparent independently), so they come back as
/// warnings rather than errors.
pub(crate) fn collect_issues(state: &SessionState) -> Vec<ModelIssue> {
    let mut issues = Vec::new();

    for bone in state.bones.values() {
        if let Some(parent) = &bone.parent {
            if !state.bones.contains_key(parent) {
                issues.push(ModelIssue {
                    severity: "warning".to_string(),
                    message: format!("Bone '{}' has untracked parent '{}'", bone.name, parent),
                    subject: bone.name.clone(),
                });
            }
        }
    }

    for cube in state.cubes.values() {
        match &cube.bone {
            Some(bone) if !state.bones.contains_key(bone) => issues.push(ModelIssue {
                severity: "warning".to_string(),
                message: format!("Cube '{}' references untracked bone '{}'", cube.name, bone),
                subject: cube.name.clone(),
            }),
            None => issues.push(ModelIssue {
                severity: "warning".to_string(),
                message: format!("Cube '{}' is not attached to any bone", cube.name),
                subject: cube.name.clone(),
            }),
            _ => {}
        }
    }

    for texture in state.textures.values() {
        if texture.width == 0 || texture.height == 0 {
            issues.push(ModelIssue {
                severity: "error".to_string(),
                message: format!(
                    "Texture '{}' has zero dimension ({}x{})",
                    texture.name, texture.width, texture.height
                ),
                subject: texture.name.clone(),
            });
        }
    }

    for animation in state.animations.values() {
        for channel in &animation.channels {
            if !state.bones.contains_key(&channel.bone) {
                issues.push(ModelIssue {
                    severity: "warning".to_string(),
                    message: format!(
                        "Animation '{}' animates untracked bone '{}'",
                        animation.name, channel.bone
                    ),
                    subject: animation.name.clone(),
                });
            }
        }
    }

    issues.sort_by(|a, b| a.subject.cmp(&b.subject).then(a.message.cmp(&b.message)));
    issues
}
