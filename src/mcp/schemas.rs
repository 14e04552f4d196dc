//! Declared payload schemas for the grouped tools.
//!
//! Every operation that accepts a raw parameter map has its shape declared
//! here; the dispatch path validates against these before any typed
//! deserialization or mutation. Built once at first use, immutable after.
//!
//! The schema subset has no integer or minimum/maximum constraints, so
//! fields like texture dimensions are declared as `number` and the exact
//! range (e.g. `u32`) is enforced by typed deserialization, which reports
//! such payloads as invalid parameters.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::schema::JsonSchema;

fn bone_schema(require_name: bool) -> JsonSchema {
    let schema = JsonSchema::object()
        .prop("name", JsonSchema::string())
        .prop("pivot", JsonSchema::number_tuple(3))
        .prop("rotation", JsonSchema::number_tuple(3))
        .prop("parent", JsonSchema::string())
        .closed();
    if require_name {
        schema.require(["name"])
    } else {
        schema
    }
}

fn cube_schema(require_name: bool) -> JsonSchema {
    let schema = JsonSchema::object()
        .prop("name", JsonSchema::string())
        .prop("origin", JsonSchema::number_tuple(3))
        .prop("size", JsonSchema::number_tuple(3))
        .prop("uv", JsonSchema::number_tuple(2))
        .prop("inflate", JsonSchema::number())
        .prop("bone", JsonSchema::string())
        .closed();
    if require_name {
        schema.require(["name"])
    } else {
        schema
    }
}

fn names_schema() -> JsonSchema {
    JsonSchema::object()
        .prop("names", JsonSchema::array_of(JsonSchema::string()).min_items(1))
        .require(["names"])
        .closed()
}

fn update_schema(fields: JsonSchema) -> JsonSchema {
    JsonSchema::object()
        .prop("name", JsonSchema::string())
        .prop("fields", fields)
        .require(["name", "fields"])
        .closed()
}

/// `shade` is either a bare boolean toggle or `{intensity}` in 0..1 steps.
fn shade_schema() -> JsonSchema {
    JsonSchema::any_of([
        JsonSchema::boolean(),
        JsonSchema::object()
            .prop("intensity", JsonSchema::number())
            .require(["intensity"])
            .closed(),
    ])
}

fn paint_op_schema() -> JsonSchema {
    JsonSchema::object()
        .prop("op", JsonSchema::string_enum(["fill", "draw", "line"]))
        .prop("texture", JsonSchema::string())
        .prop("color", JsonSchema::string())
        .prop("from", JsonSchema::number_tuple(2))
        .prop("to", JsonSchema::number_tuple(2))
        .prop("shade", shade_schema())
        .require(["op", "texture", "color", "from"])
        .closed()
}

fn keyframe_schema() -> JsonSchema {
    JsonSchema::object()
        .prop("time", JsonSchema::number())
        .prop("values", JsonSchema::number_tuple(3))
        .prop(
            "interpolation",
            JsonSchema::string_enum(["linear", "catmullrom", "step"]),
        )
        .require(["time", "values"])
        .closed()
}

static ELEMENTS: LazyLock<BTreeMap<&'static str, JsonSchema>> = LazyLock::new(|| {
    BTreeMap::from([
        (
            "create_bones",
            JsonSchema::object()
                .prop("bones", JsonSchema::array_of(bone_schema(true)).min_items(1))
                .require(["bones"])
                .closed(),
        ),
        ("update_bone", update_schema(bone_schema(false))),
        ("remove_bones", names_schema()),
        (
            "create_cubes",
            JsonSchema::object()
                .prop("cubes", JsonSchema::array_of(cube_schema(true)).min_items(1))
                .require(["cubes"])
                .closed(),
        ),
        ("update_cube", update_schema(cube_schema(false))),
        ("remove_cubes", names_schema()),
    ])
});

static TEXTURES: LazyLock<BTreeMap<&'static str, JsonSchema>> = LazyLock::new(|| {
    BTreeMap::from([
        (
            "create_texture",
            JsonSchema::object()
                .prop("name", JsonSchema::string())
                .prop("width", JsonSchema::number())
                .prop("height", JsonSchema::number())
                .prop("assigned", JsonSchema::boolean())
                .require(["name", "width", "height"])
                .closed(),
        ),
        (
            "update_texture",
            update_schema(
                JsonSchema::object()
                    .prop("width", JsonSchema::number())
                    .prop("height", JsonSchema::number())
                    .prop("assigned", JsonSchema::boolean())
                    .closed(),
            ),
        ),
        ("remove_textures", names_schema()),
        (
            "paint",
            JsonSchema::object()
                .prop("ops", JsonSchema::array_of(paint_op_schema()).min_items(1))
                .require(["ops"])
                .closed(),
        ),
    ])
});

static ANIMATIONS: LazyLock<BTreeMap<&'static str, JsonSchema>> = LazyLock::new(|| {
    BTreeMap::from([
        (
            "create_animation",
            JsonSchema::object()
                .prop("name", JsonSchema::string())
                .prop("length", JsonSchema::number())
                .prop("loop_mode", JsonSchema::string_enum(["once", "loop", "hold"]))
                .require(["name"])
                .closed(),
        ),
        (
            "update_animation",
            update_schema(
                JsonSchema::object()
                    .prop("length", JsonSchema::number())
                    .prop("loop_mode", JsonSchema::string_enum(["once", "loop", "hold"]))
                    .closed(),
            ),
        ),
        ("remove_animations", names_schema()),
        (
            "set_keyframes",
            JsonSchema::object()
                .prop("animation", JsonSchema::string())
                .prop("bone", JsonSchema::string())
                .prop(
                    "channel",
                    JsonSchema::string_enum(["position", "rotation", "scale"]),
                )
                .prop("keyframes", JsonSchema::array_of(keyframe_schema()).min_items(1))
                .require(["animation", "bone", "channel", "keyframes"])
                .closed(),
        ),
        (
            "set_trigger",
            JsonSchema::object()
                .prop("animation", JsonSchema::string())
                .prop("time", JsonSchema::number())
                .prop("effect", JsonSchema::string())
                .prop("locator", JsonSchema::string())
                .require(["animation", "time", "effect"])
                .closed(),
        ),
    ])
});

static SESSION: LazyLock<BTreeMap<&'static str, JsonSchema>> = LazyLock::new(|| {
    BTreeMap::from([
        ("overview", JsonSchema::object().closed()),
        (
            "list",
            JsonSchema::object()
                .prop(
                    "kind",
                    JsonSchema::string_enum(["bones", "cubes", "textures", "animations"]),
                )
                .require(["kind"])
                .closed(),
        ),
        ("next_actions", JsonSchema::object().closed()),
        ("reset", JsonSchema::object().closed()),
    ])
});

/// Look up the declared schema for a grouped tool's operation.
pub fn operation_schema(tool: &str, operation: &str) -> Option<&'static JsonSchema> {
    let table = match tool {
        "elements" => &*ELEMENTS,
        "textures" => &*TEXTURES,
        "animations" => &*ANIMATIONS,
        "session" => &*SESSION,
        _ => return None,
    };
    table.get(operation)
}

/// Operation names a grouped tool accepts, for error suggestions.
pub fn known_operations(tool: &str) -> Vec<&'static str> {
    let table = match tool {
        "elements" => &*ELEMENTS,
        "textures" => &*TEXTURES,
        "animations" => &*ANIMATIONS,
        "session" => &*SESSION,
        _ => return Vec::new(),
    };
    table.keys().copied().collect()
}
