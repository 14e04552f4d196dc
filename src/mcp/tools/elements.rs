//! Bone and cube mutation handlers.

use rmcp::handler::server::wrapper::Parameters;

use super::decode_request;
use crate::mcp::error::ToolError;
use crate::mcp::types::{ElementsRequest, GroupedInput, MutationResponse, RemovalInfo};
use crate::mcp::BlockhostServer;

impl BlockhostServer {
    /// Handler for the `elements` tool — dispatches bone/cube operations.
    pub async fn handle_elements(
        &self,
        Parameters(input): Parameters<GroupedInput>,
    ) -> Result<MutationResponse, ToolError> {
        let request: ElementsRequest = decode_request("elements", input)?;

        match request {
            ElementsRequest::CreateBones { bones } => {
                let mut response = MutationResponse::new("create_bones");
                for bone in bones {
                    response.touched.push(bone.name.clone());
                    self.mutator.add_bone(bone).await;
                }
                response.hints.push(format!(
                    "Tracking {} bone(s). Add cubes with elements/create_cubes.",
                    response.touched.len()
                ));
                Ok(response)
            }
            ElementsRequest::UpdateBone { name, fields } => {
                let existed = self.mutator.update_bone(&name, fields).await;
                let mut response = MutationResponse::new("update_bone");
                response.matched = Some(existed);
                if existed {
                    response.touched.push(name);
                } else {
                    response
                        .hints
                        .push(format!("No bone named '{}' is tracked; nothing changed.", name));
                }
                Ok(response)
            }
            ElementsRequest::RemoveBones { names } => {
                let counts = self.mutator.remove_bones(names).await;
                let mut response = MutationResponse::new("remove_bones");
                if counts.cubes > 0 {
                    response.hints.push(format!(
                        "{} cube(s) owned by removed bones were removed with them.",
                        counts.cubes
                    ));
                }
                response.removal = Some(RemovalInfo {
                    removed: counts.bones,
                    cascaded_cubes: Some(counts.cubes),
                });
                Ok(response)
            }
            ElementsRequest::CreateCubes { cubes } => {
                let mut response = MutationResponse::new("create_cubes");
                let snapshot = self.mutator.snapshot().await;
                for cube in &cubes {
                    if let Some(bone) = &cube.bone {
                        if !snapshot.bones.contains_key(bone) {
                            response.hints.push(format!(
                                "Cube '{}' references untracked bone '{}'.",
                                cube.name, bone
                            ));
                        }
                    }
                }
                for cube in cubes {
                    response.touched.push(cube.name.clone());
                    self.mutator.add_cube(cube).await;
                }
                Ok(response)
            }
            ElementsRequest::UpdateCube { name, fields } => {
                let existed = self.mutator.update_cube(&name, fields).await;
                let mut response = MutationResponse::new("update_cube");
                response.matched = Some(existed);
                if existed {
                    response.touched.push(name);
                } else {
                    response
                        .hints
                        .push(format!("No cube named '{}' is tracked; nothing changed.", name));
                }
                Ok(response)
            }
            ElementsRequest::RemoveCubes { names } => {
                let removed = self.mutator.remove_cubes(names).await;
                let mut response = MutationResponse::new("remove_cubes");
                response.removal = Some(RemovalInfo { removed, cascaded_cubes: None });
                Ok(response)
            }
        }
    }
}
