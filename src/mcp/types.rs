use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::session::{
    AnimationUpdate, BoneUpdate, ChannelKind, CubeUpdate, Keyframe, TextureUpdate, TrackedBone,
    TrackedCube,
};

/// Grouped tool input: an operation name plus a raw parameter map.
///
/// Parameters stay untyped at this layer on purpose — they are validated
/// against the operation's declared schema before being deserialized into
/// the typed request enums below.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GroupedInput {
    /// Operation to perform (see the tool description for the full list).
    pub operation: String,
    /// Operation parameters, validated against the operation's schema.
    #[serde(default)]
    pub params: serde_json::Map<String, serde_json::Value>,
}

/// Bone and cube operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum ElementsRequest {
    /// Track one or more new bones (replaces same-named bones).
    CreateBones { bones: Vec<TrackedBone> },
    /// Merge the provided fields into an existing bone.
    UpdateBone {
        name: String,
        fields: BoneUpdate,
    },
    /// Remove bones by name; owned cubes are removed with them.
    RemoveBones { names: Vec<String> },
    /// Track one or more new cubes (replaces same-named cubes).
    CreateCubes { cubes: Vec<TrackedCube> },
    /// Merge the provided fields into an existing cube.
    UpdateCube {
        name: String,
        fields: CubeUpdate,
    },
    /// Remove cubes by name.
    RemoveCubes { names: Vec<String> },
}

/// Texture operations, including paint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum TexturesRequest {
    CreateTexture {
        name: String,
        width: u32,
        height: u32,
        #[serde(default)]
        assigned: Option<bool>,
    },
    UpdateTexture {
        name: String,
        fields: TextureUpdate,
    },
    RemoveTextures { names: Vec<String> },
    /// Apply paint operations to a texture canvas via the host adapter.
    Paint { ops: Vec<PaintOpRequest> },
}

/// One paint operation as it arrives on the wire (already schema-validated).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaintOpRequest {
    pub op: String,
    pub texture: String,
    pub color: String,
    pub from: [f64; 2],
    #[serde(default)]
    pub to: Option<[f64; 2]>,
    #[serde(default)]
    pub shade: Option<ShadeRequest>,
}

/// Shading is either a plain on/off toggle or an explicit intensity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShadeRequest {
    Toggle(bool),
    Explicit { intensity: f64 },
}

impl ShadeRequest {
    /// Effective intensity; the bare toggle maps to full strength or none.
    pub fn intensity(&self) -> Option<f64> {
        match self {
            ShadeRequest::Toggle(true) => Some(1.0),
            ShadeRequest::Toggle(false) => None,
            ShadeRequest::Explicit { intensity } => Some(*intensity),
        }
    }
}

/// Animation operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum AnimationsRequest {
    CreateAnimation {
        name: String,
        #[serde(default)]
        length: Option<f32>,
        #[serde(default)]
        loop_mode: Option<String>,
    },
    UpdateAnimation {
        name: String,
        fields: AnimationUpdate,
    },
    RemoveAnimations { names: Vec<String> },
    /// Replace or append the keyframe channel for `(bone, channel)`.
    SetKeyframes {
        animation: String,
        bone: String,
        channel: ChannelKind,
        keyframes: Vec<Keyframe>,
    },
    /// Replace or append the trigger at `time`.
    SetTrigger {
        animation: String,
        time: f32,
        effect: String,
        #[serde(default)]
        locator: Option<String>,
    },
}

/// Session queries and maintenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum SessionRequest {
    /// Entity counts and session age.
    Overview {},
    /// List one entity collection.
    List { kind: ListKind },
    /// Suggested follow-up tool calls based on gaps in the shadow state.
    NextActions {},
    /// Drop all tracked entities (host will be re-read by the caller).
    Reset {},
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Bones,
    Cubes,
    Textures,
    Animations,
}

/// Counts from a removal, including the bone-to-cube cascade when relevant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct RemovalInfo {
    pub removed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cascaded_cubes: Option<usize>,
}

/// Response for the mutation tools (`elements`, `textures`, `animations`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MutationResponse {
    pub operation: String,
    /// For updates: whether the named entity existed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removal: Option<RemovalInfo>,
    /// Entities touched by the operation, by name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub touched: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
}

impl MutationResponse {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            matched: None,
            removal: None,
            touched: Vec::new(),
            hints: Vec::new(),
        }
    }
}

/// Entity counts for the overview operation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SessionOverview {
    pub bone_count: usize,
    pub cube_count: usize,
    pub texture_count: usize,
    pub animation_count: usize,
    /// RFC 3339 timestamp of when this server session started.
    pub started_at: String,
}

/// One issue found by `validate_model`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ModelIssue {
    /// "warning" or "error".
    pub severity: String,
    pub message: String,
    /// Name of the entity the issue is about.
    pub subject: String,
}

/// Response for `validate_model`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ValidateModelResponse {
    pub ok: bool,
    pub issues: Vec<ModelIssue>,
}

/// Response for the `session` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SessionResponse {
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<SessionOverview>,
    /// Names in the listed collection, sorted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
}
