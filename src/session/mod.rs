//! The shadow session model and its single mutation path.

mod model;
mod mutator;
mod reducer;

pub use model::{
    AnimationUpdate, BoneUpdate, ChannelKind, CubeUpdate, Keyframe, SessionState, TextureUpdate,
    TrackedAnimation, TrackedBone, TrackedChannel, TrackedCube, TrackedTexture, TrackedTrigger,
};
pub use mutator::{RemovedCounts, SessionMutator};
pub use reducer::{apply_mutation, MutationOutcome, SessionMutation};
