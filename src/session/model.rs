use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::collections::HashMap;

/// Bone as tracked in the shadow session model.
///
/// `parent` is a weak by-name reference: the host may reparent or delete the
/// parent independently, so a dangling value is valid here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrackedBone {
    pub name: String,
    pub pivot: Option<[f32; 3]>,
    pub rotation: Option<[f32; 3]>,
    pub parent: Option<String>,
}

/// Cube as tracked in the shadow session model.
///
/// `bone` is the owning bone, weak by-name like [`TrackedBone::parent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrackedCube {
    pub name: String,
    pub origin: Option<[f32; 3]>,
    pub size: Option<[f32; 3]>,
    pub uv: Option<[f32; 2]>,
    pub inflate: Option<f32>,
    pub bone: Option<String>,
}

/// Texture as tracked in the shadow session model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrackedTexture {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Whether the texture is assigned to faces in the host project.
    #[serde(default)]
    pub assigned: bool,
}

/// Keyframe channel kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Position,
    Rotation,
    Scale,
}

/// A single keyframe on a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Keyframe {
    /// Seconds from animation start.
    pub time: f32,
    pub values: [f32; 3],
    #[serde(default)]
    pub interpolation: Option<String>,
}

/// Per-bone keyframe track inside an animation.
///
/// Identity is the `(bone, channel)` pair — upserting a channel with the same
/// pair replaces its keyframes wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrackedChannel {
    pub bone: String,
    pub channel: ChannelKind,
    pub keyframes: Vec<Keyframe>,
}

/// Time-indexed side-effect marker (sound/particle cue). Identity is `time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrackedTrigger {
    pub time: f32,
    pub effect: String,
    #[serde(default)]
    pub locator: Option<String>,
}

/// Animation as tracked in the shadow session model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrackedAnimation {
    pub name: String,
    pub length: Option<f32>,
    #[serde(default)]
    pub loop_mode: Option<String>,
    #[serde(default)]
    pub channels: Vec<TrackedChannel>,
    #[serde(default)]
    pub triggers: Vec<TrackedTrigger>,
}

/// Partial update for a bone. An absent field (or an explicit JSON null,
/// which deserializes to `None`) means "no change"; there is no way to clear
/// a field back to unset through an update.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct BoneUpdate {
    pub pivot: Option<[f32; 3]>,
    pub rotation: Option<[f32; 3]>,
    pub parent: Option<String>,
}

/// Partial update for a cube. Same null handling as [`BoneUpdate`].
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CubeUpdate {
    pub origin: Option<[f32; 3]>,
    pub size: Option<[f32; 3]>,
    pub uv: Option<[f32; 2]>,
    pub inflate: Option<f32>,
    pub bone: Option<String>,
}

/// Partial update for a texture. Same null handling as [`BoneUpdate`].
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TextureUpdate {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub assigned: Option<bool>,
}

/// Partial update for an animation's scalar fields. Channels and triggers
/// change only through their upsert commands.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct AnimationUpdate {
    pub length: Option<f32>,
    pub loop_mode: Option<String>,
}

/// The shadow session model: an in-process mirror of the host editor's
/// entities, kept consistent with accepted tool calls for the lifetime of
/// one running session. Names are the sole identity within each collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub bones: HashMap<String, TrackedBone>,
    pub cubes: HashMap<String, TrackedCube>,
    pub textures: HashMap<String, TrackedTexture>,
    pub animations: HashMap<String, TrackedAnimation>,
}

impl SessionState {
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
            && self.cubes.is_empty()
            && self.textures.is_empty()
            && self.animations.is_empty()
    }
}
