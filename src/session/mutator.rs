use std::sync::Arc;
use tokio::sync::RwLock;

use super::model::{
    AnimationUpdate, BoneUpdate, CubeUpdate, SessionState, TextureUpdate, TrackedAnimation,
    TrackedBone, TrackedChannel, TrackedCube, TrackedTexture, TrackedTrigger,
};
use super::reducer::{apply_mutation, MutationOutcome, SessionMutation};

/// Counts returned by a cascading bone removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovedCounts {
    pub bones: usize,
    pub cubes: usize,
}

/// Per-entity facade over the shadow session state.
///
/// Holds the live state behind a shared lock so it can be swapped on session
/// reset without callers keeping a stale reference. Methods build the
/// corresponding [`SessionMutation`] and delegate to the reducer; no
/// validation happens here — payloads must already have passed the schema
/// gate.
#[derive(Clone, Default)]
pub struct SessionMutator {
    state: Arc<RwLock<SessionState>>,
}

impl SessionMutator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only clone of the current shadow state for query tools.
    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// Replace the state wholesale, e.g. after re-reading the host project.
    pub async fn reset(&self, state: SessionState) {
        *self.state.write().await = state;
    }

    async fn apply(&self, mutation: SessionMutation) -> MutationOutcome {
        apply_mutation(&mut *self.state.write().await, mutation)
    }

    async fn apply_matched(&self, mutation: SessionMutation) -> bool {
        matches!(self.apply(mutation).await, MutationOutcome::Matched { existed: true })
    }

    async fn apply_removed(&self, mutation: SessionMutation) -> usize {
        match self.apply(mutation).await {
            MutationOutcome::Removed { count } => count,
            _ => 0,
        }
    }

    pub async fn add_bone(&self, bone: TrackedBone) {
        self.apply(SessionMutation::AddBone { bone }).await;
    }

    pub async fn add_cube(&self, cube: TrackedCube) {
        self.apply(SessionMutation::AddCube { cube }).await;
    }

    pub async fn add_texture(&self, texture: TrackedTexture) {
        self.apply(SessionMutation::AddTexture { texture }).await;
    }

    pub async fn add_animation(&self, animation: TrackedAnimation) {
        self.apply(SessionMutation::AddAnimation { animation }).await;
    }

    /// Returns whether the named bone existed.
    pub async fn update_bone(&self, name: impl Into<String>, update: BoneUpdate) -> bool {
        self.apply_matched(SessionMutation::UpdateBone { name: name.into(), update }).await
    }

    /// Returns whether the named cube existed.
    pub async fn update_cube(&self, name: impl Into<String>, update: CubeUpdate) -> bool {
        self.apply_matched(SessionMutation::UpdateCube { name: name.into(), update }).await
    }

    /// Returns whether the named texture existed.
    pub async fn update_texture(&self, name: impl Into<String>, update: TextureUpdate) -> bool {
        self.apply_matched(SessionMutation::UpdateTexture { name: name.into(), update }).await
    }

    /// Returns whether the named animation existed.
    pub async fn update_animation(&self, name: impl Into<String>, update: AnimationUpdate) -> bool {
        self.apply_matched(SessionMutation::UpdateAnimation { name: name.into(), update }).await
    }

    /// Removes bones and, by cascade, the cubes they own.
    pub async fn remove_bones<I, S>(&self, names: I) -> RemovedCounts
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names.into_iter().map(Into::into).collect();
        match self.apply(SessionMutation::RemoveBones { names }).await {
            MutationOutcome::RemovedBones { bones, cubes } => RemovedCounts { bones, cubes },
            _ => RemovedCounts { bones: 0, cubes: 0 },
        }
    }

    pub async fn remove_cubes<I, S>(&self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names.into_iter().map(Into::into).collect();
        self.apply_removed(SessionMutation::RemoveCubes { names }).await
    }

    pub async fn remove_textures<I, S>(&self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names.into_iter().map(Into::into).collect();
        self.apply_removed(SessionMutation::RemoveTextures { names }).await
    }

    pub async fn remove_animations<I, S>(&self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names.into_iter().map(Into::into).collect();
        self.apply_removed(SessionMutation::RemoveAnimations { names }).await
    }

    /// Replace-or-append the channel with matching `(bone, channel)` identity.
    /// A missing animation is a no-op.
    pub async fn upsert_animation_channel(
        &self,
        animation: impl Into<String>,
        channel: TrackedChannel,
    ) {
        self.apply(SessionMutation::UpsertAnimationChannel {
            animation: animation.into(),
            channel,
        })
        .await;
    }

    /// Replace-or-append the trigger with matching time. A missing animation
    /// is a no-op.
    pub async fn upsert_animation_trigger(
        &self,
        animation: impl Into<String>,
        trigger: TrackedTrigger,
    ) {
        self.apply(SessionMutation::UpsertAnimationTrigger {
            animation: animation.into(),
            trigger,
        })
        .await;
    }
}
