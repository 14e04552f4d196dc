//! The session mutation reducer.
//!
//! All changes to the shadow model flow through [`apply_mutation`] as tagged
//! [`SessionMutation`] commands. The reducer never errors: a missing name on
//! update or removal degrades to `false`/zero counts, and the caller decides
//! whether that is user-visible.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::model::{
    AnimationUpdate, BoneUpdate, CubeUpdate, SessionState, TextureUpdate, TrackedAnimation,
    TrackedBone, TrackedChannel, TrackedCube, TrackedTexture, TrackedTrigger,
};

/// A closed set of typed mutation commands over [`SessionState`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SessionMutation {
    AddBone { bone: TrackedBone },
    AddCube { cube: TrackedCube },
    AddTexture { texture: TrackedTexture },
    AddAnimation { animation: TrackedAnimation },
    UpdateBone { name: String, update: BoneUpdate },
    UpdateCube { name: String, update: CubeUpdate },
    UpdateTexture { name: String, update: TextureUpdate },
    UpdateAnimation { name: String, update: AnimationUpdate },
    RemoveBones { names: Vec<String> },
    RemoveCubes { names: Vec<String> },
    RemoveTextures { names: Vec<String> },
    RemoveAnimations { names: Vec<String> },
    UpsertAnimationChannel { animation: String, channel: TrackedChannel },
    UpsertAnimationTrigger { animation: String, trigger: TrackedTrigger },
}

/// Result of applying a mutation; the shape depends on the command kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MutationOutcome {
    /// Additions and upserts always apply.
    Applied,
    /// Updates report whether the named entity existed.
    Matched { existed: bool },
    /// Batch removals report how many entities were removed.
    Removed { count: usize },
    /// Bone removal cascades to owned cubes and reports both counts.
    RemovedBones { bones: usize, cubes: usize },
}

/// Apply one mutation command in place.
pub fn apply_mutation(state: &mut SessionState, mutation: SessionMutation) -> MutationOutcome {
    match mutation {
        // Adds are insert-or-replace: last write wins, no duplicate-key error.
        SessionMutation::AddBone { bone } => {
            state.bones.insert(bone.name.clone(), bone);
            MutationOutcome::Applied
        }
        SessionMutation::AddCube { cube } => {
            state.cubes.insert(cube.name.clone(), cube);
            MutationOutcome::Applied
        }
        SessionMutation::AddTexture { texture } => {
            state.textures.insert(texture.name.clone(), texture);
            MutationOutcome::Applied
        }
        SessionMutation::AddAnimation { animation } => {
            state.animations.insert(animation.name.clone(), animation);
            MutationOutcome::Applied
        }

        SessionMutation::UpdateBone { name, update } => {
            let existed = match state.bones.get_mut(&name) {
                Some(bone) => {
                    merge(&mut bone.pivot, update.pivot);
                    merge(&mut bone.rotation, update.rotation);
                    merge(&mut bone.parent, update.parent);
                    true
                }
                None => false,
            };
            MutationOutcome::Matched { existed }
        }
        SessionMutation::UpdateCube { name, update } => {
            let existed = match state.cubes.get_mut(&name) {
                Some(cube) => {
                    merge(&mut cube.origin, update.origin);
                    merge(&mut cube.size, update.size);
                    merge(&mut cube.uv, update.uv);
                    merge(&mut cube.inflate, update.inflate);
                    merge(&mut cube.bone, update.bone);
                    true
                }
                None => false,
            };
            MutationOutcome::Matched { existed }
        }
        SessionMutation::UpdateTexture { name, update } => {
            let existed = match state.textures.get_mut(&name) {
                Some(texture) => {
                    if let Some(width) = update.width {
                        texture.width = width;
                    }
                    if let Some(height) = update.height {
                        texture.height = height;
                    }
                    if let Some(assigned) = update.assigned {
                        texture.assigned = assigned;
                    }
                    true
                }
                None => false,
            };
            MutationOutcome::Matched { existed }
        }
        SessionMutation::UpdateAnimation { name, update } => {
            let existed = match state.animations.get_mut(&name) {
                Some(animation) => {
                    merge(&mut animation.length, update.length);
                    merge(&mut animation.loop_mode, update.loop_mode);
                    true
                }
                None => false,
            };
            MutationOutcome::Matched { existed }
        }

        SessionMutation::RemoveBones { names } => {
            let targets: HashSet<String> = names.into_iter().collect();
            // The cascade is scoped to bones that were actually tracked:
            // cubes dangling on a never-tracked name are valid state and stay.
            let mut removed: HashSet<String> = HashSet::new();
            state.bones.retain(|name, _| {
                if targets.contains(name) {
                    removed.insert(name.clone());
                    false
                } else {
                    true
                }
            });

            // A cube without its bone is meaningless in the shadow model.
            let before_cubes = state.cubes.len();
            state
                .cubes
                .retain(|_, cube| !cube.bone.as_ref().is_some_and(|b| removed.contains(b)));
            MutationOutcome::RemovedBones {
                bones: removed.len(),
                cubes: before_cubes - state.cubes.len(),
            }
        }
        SessionMutation::RemoveCubes { names } => {
            MutationOutcome::Removed { count: remove_named(&mut state.cubes, names) }
        }
        SessionMutation::RemoveTextures { names } => {
            MutationOutcome::Removed { count: remove_named(&mut state.textures, names) }
        }
        SessionMutation::RemoveAnimations { names } => {
            MutationOutcome::Removed { count: remove_named(&mut state.animations, names) }
        }

        // Upserts are keyed by identity and no-ops for a missing animation:
        // no animation is ever created implicitly.
        SessionMutation::UpsertAnimationChannel { animation, channel } => {
            if let Some(animation) = state.animations.get_mut(&animation) {
                match animation
                    .channels
                    .iter_mut()
                    .find(|c| c.bone == channel.bone && c.channel == channel.channel)
                {
                    Some(existing) => *existing = channel,
                    None => animation.channels.push(channel),
                }
            }
            MutationOutcome::Applied
        }
        SessionMutation::UpsertAnimationTrigger { animation, trigger } => {
            if let Some(animation) = state.animations.get_mut(&animation) {
                match animation.triggers.iter_mut().find(|t| t.time == trigger.time) {
                    Some(existing) => *existing = trigger,
                    None => animation.triggers.push(trigger),
                }
            }
            MutationOutcome::Applied
        }
    }
}

/// Overwrite-if-present merge for one optional field.
fn merge<T>(field: &mut Option<T>, incoming: Option<T>) {
    if incoming.is_some() {
        *field = incoming;
    }
}

/// Remove by name membership; order and duplicates in `names` are irrelevant.
fn remove_named<T>(
    collection: &mut std::collections::HashMap<String, T>,
    names: Vec<String>,
) -> usize {
    let targets: HashSet<String> = names.into_iter().collect();
    let before = collection.len();
    collection.retain(|name, _| !targets.contains(name));
    before - collection.len()
}
