//! Integration tests for the session mutation reducer and mutator facade.
//!
//! Verifies the closed command set's merge, removal, cascade, and upsert
//! semantics against an in-memory shadow state.

use blockhost::session::{
    apply_mutation, BoneUpdate, ChannelKind, CubeUpdate, Keyframe, MutationOutcome,
    SessionMutation, SessionMutator, SessionState, TrackedAnimation, TrackedBone, TrackedChannel,
    TrackedCube, TrackedTexture, TrackedTrigger,
};
use pretty_assertions::assert_eq;

fn bone(name: &str, parent: Option<&str>) -> TrackedBone {
    TrackedBone {
        name: name.to_string(),
        pivot: Some([0.0, 0.0, 0.0]),
        rotation: None,
        parent: parent.map(str::to_string),
    }
}

fn cube(name: &str, bone: Option<&str>) -> TrackedCube {
    TrackedCube {
        name: name.to_string(),
        origin: Some([0.0, 0.0, 0.0]),
        size: Some([1.0, 1.0, 1.0]),
        uv: None,
        inflate: None,
        bone: bone.map(str::to_string),
    }
}

fn animation(name: &str) -> TrackedAnimation {
    TrackedAnimation {
        name: name.to_string(),
        length: Some(1.0),
        loop_mode: None,
        channels: Vec::new(),
        triggers: Vec::new(),
    }
}

#[test]
fn add_bone_is_idempotent_by_name() {
    let mut state = SessionState::default();
    for _ in 0..2 {
        apply_mutation(&mut state, SessionMutation::AddBone { bone: bone("root", None) });
    }
    assert_eq!(state.bones.len(), 1);
    assert!(state.bones.contains_key("root"));
}

#[test]
fn add_replaces_existing_entity_last_write_wins() {
    let mut state = SessionState::default();
    apply_mutation(&mut state, SessionMutation::AddBone { bone: bone("arm", None) });
    apply_mutation(
        &mut state,
        SessionMutation::AddBone { bone: bone("arm", Some("torso")) },
    );
    assert_eq!(state.bones.len(), 1);
    assert_eq!(state.bones["arm"].parent.as_deref(), Some("torso"));
}

#[test]
fn update_merges_only_provided_fields() {
    let mut state = SessionState::default();
    apply_mutation(
        &mut state,
        SessionMutation::AddCube {
            cube: TrackedCube {
                name: "c1".to_string(),
                origin: Some([1.0, 2.0, 3.0]),
                size: Some([4.0, 4.0, 4.0]),
                uv: Some([0.0, 16.0]),
                inflate: Some(0.25),
                bone: Some("arm".to_string()),
            },
        },
    );

    let outcome = apply_mutation(
        &mut state,
        SessionMutation::UpdateCube {
            name: "c1".to_string(),
            update: CubeUpdate {
                size: Some([5.0, 4.0, 4.0]),
                ..CubeUpdate::default()
            },
        },
    );

    assert_eq!(outcome, MutationOutcome::Matched { existed: true });
    let cube = &state.cubes["c1"];
    assert_eq!(cube.size, Some([5.0, 4.0, 4.0]));
    // Everything else untouched.
    assert_eq!(cube.origin, Some([1.0, 2.0, 3.0]));
    assert_eq!(cube.uv, Some([0.0, 16.0]));
    assert_eq!(cube.inflate, Some(0.25));
    assert_eq!(cube.bone.as_deref(), Some("arm"));
}

#[test]
fn update_of_missing_entity_is_a_policy_outcome_not_an_error() {
    let mut state = SessionState::default();
    let outcome = apply_mutation(
        &mut state,
        SessionMutation::UpdateCube {
            name: "c2".to_string(),
            update: CubeUpdate { size: Some([5.0, 5.0, 5.0]), ..CubeUpdate::default() },
        },
    );
    assert_eq!(outcome, MutationOutcome::Matched { existed: false });
    assert!(state.cubes.is_empty(), "update must never create entities");
}

#[test]
fn explicit_null_in_wire_update_means_no_change() {
    // An explicit null deserializes to None and merges as "omitted".
    let update: BoneUpdate =
        serde_json::from_value(serde_json::json!({"parent": null, "pivot": [1, 1, 1]})).unwrap();
    let mut state = SessionState::default();
    apply_mutation(&mut state, SessionMutation::AddBone { bone: bone("arm", Some("torso")) });
    apply_mutation(
        &mut state,
        SessionMutation::UpdateBone { name: "arm".to_string(), update },
    );
    assert_eq!(state.bones["arm"].parent.as_deref(), Some("torso"));
    assert_eq!(state.bones["arm"].pivot, Some([1.0, 1.0, 1.0]));
}

#[test]
fn removing_a_bone_cascades_to_owned_cubes() {
    let mut state = SessionState::default();
    apply_mutation(&mut state, SessionMutation::AddBone { bone: bone("arm", None) });
    apply_mutation(&mut state, SessionMutation::AddBone { bone: bone("leg", None) });
    apply_mutation(&mut state, SessionMutation::AddCube { cube: cube("hand", Some("arm")) });
    apply_mutation(&mut state, SessionMutation::AddCube { cube: cube("forearm", Some("arm")) });
    apply_mutation(&mut state, SessionMutation::AddCube { cube: cube("foot", Some("leg")) });

    let outcome = apply_mutation(
        &mut state,
        SessionMutation::RemoveBones { names: vec!["arm".to_string()] },
    );

    assert_eq!(outcome, MutationOutcome::RemovedBones { bones: 1, cubes: 2 });
    assert!(!state.bones.contains_key("arm"));
    assert!(!state.cubes.contains_key("hand"));
    assert!(!state.cubes.contains_key("forearm"));
    assert!(state.cubes.contains_key("foot"));
}

#[test]
fn cascade_spares_cubes_dangling_on_untracked_names() {
    // A dangling owner reference is valid state; only removing a bone that
    // was actually tracked may destroy its cubes.
    let mut state = SessionState::default();
    apply_mutation(&mut state, SessionMutation::AddCube { cube: cube("hand", Some("ghost")) });

    let outcome = apply_mutation(
        &mut state,
        SessionMutation::RemoveBones { names: vec!["ghost".to_string()] },
    );

    assert_eq!(outcome, MutationOutcome::RemovedBones { bones: 0, cubes: 0 });
    assert!(state.cubes.contains_key("hand"));
}

#[test]
fn cascade_counts_only_bones_that_existed() {
    let mut state = SessionState::default();
    apply_mutation(&mut state, SessionMutation::AddBone { bone: bone("arm", None) });
    apply_mutation(&mut state, SessionMutation::AddCube { cube: cube("hand", Some("arm")) });
    apply_mutation(&mut state, SessionMutation::AddCube { cube: cube("relic", Some("ghost")) });

    let outcome = apply_mutation(
        &mut state,
        SessionMutation::RemoveBones {
            names: vec!["arm".to_string(), "ghost".to_string()],
        },
    );

    assert_eq!(outcome, MutationOutcome::RemovedBones { bones: 1, cubes: 1 });
    assert!(!state.cubes.contains_key("hand"));
    assert!(state.cubes.contains_key("relic"), "dangling cube must survive");
}

#[test]
fn removal_treats_names_as_a_set() {
    let build = || {
        let mut state = SessionState::default();
        for name in ["a", "b", "c"] {
            apply_mutation(&mut state, SessionMutation::AddTexture {
                texture: TrackedTexture {
                    name: name.to_string(),
                    width: 16,
                    height: 16,
                    assigned: false,
                },
            });
        }
        state
    };

    // Ordered list, reversed list, and a list with duplicates all converge.
    let mut ordered = build();
    apply_mutation(&mut ordered, SessionMutation::RemoveTextures {
        names: vec!["a".to_string(), "b".to_string()],
    });
    let mut reversed = build();
    apply_mutation(&mut reversed, SessionMutation::RemoveTextures {
        names: vec!["b".to_string(), "a".to_string()],
    });
    let mut duplicated = build();
    let outcome = apply_mutation(&mut duplicated, SessionMutation::RemoveTextures {
        names: vec!["a".to_string(), "b".to_string(), "a".to_string()],
    });

    assert_eq!(outcome, MutationOutcome::Removed { count: 2 });
    for state in [&ordered, &reversed, &duplicated] {
        assert_eq!(state.textures.len(), 1);
        assert!(state.textures.contains_key("c"));
    }
}

#[test]
fn removing_missing_names_degrades_to_zero() {
    let mut state = SessionState::default();
    let outcome = apply_mutation(
        &mut state,
        SessionMutation::RemoveAnimations { names: vec!["ghost".to_string()] },
    );
    assert_eq!(outcome, MutationOutcome::Removed { count: 0 });
}

#[test]
fn channel_upsert_replaces_by_bone_and_kind() {
    let mut state = SessionState::default();
    apply_mutation(&mut state, SessionMutation::AddAnimation { animation: animation("walk") });

    let channel = |time: f32| TrackedChannel {
        bone: "arm".to_string(),
        channel: ChannelKind::Rotation,
        keyframes: vec![Keyframe { time, values: [0.0, 45.0, 0.0], interpolation: None }],
    };

    apply_mutation(&mut state, SessionMutation::UpsertAnimationChannel {
        animation: "walk".to_string(),
        channel: channel(0.0),
    });
    apply_mutation(&mut state, SessionMutation::UpsertAnimationChannel {
        animation: "walk".to_string(),
        channel: channel(0.5),
    });

    let walk = &state.animations["walk"];
    assert_eq!(walk.channels.len(), 1, "same identity must replace, not append");
    assert_eq!(walk.channels[0].keyframes[0].time, 0.5);

    // A different kind on the same bone is a distinct identity.
    apply_mutation(&mut state, SessionMutation::UpsertAnimationChannel {
        animation: "walk".to_string(),
        channel: TrackedChannel {
            bone: "arm".to_string(),
            channel: ChannelKind::Position,
            keyframes: vec![],
        },
    });
    assert_eq!(state.animations["walk"].channels.len(), 2);
}

#[test]
fn channel_upsert_for_missing_animation_is_a_noop() {
    let mut state = SessionState::default();
    let outcome = apply_mutation(&mut state, SessionMutation::UpsertAnimationChannel {
        animation: "missing".to_string(),
        channel: TrackedChannel {
            bone: "arm".to_string(),
            channel: ChannelKind::Scale,
            keyframes: vec![],
        },
    });
    assert_eq!(outcome, MutationOutcome::Applied);
    assert!(state.animations.is_empty(), "no animation may be created implicitly");
}

#[test]
fn trigger_upsert_keys_on_time() {
    let mut state = SessionState::default();
    apply_mutation(&mut state, SessionMutation::AddAnimation { animation: animation("walk") });

    let trigger = |effect: &str| TrackedTrigger {
        time: 0.25,
        effect: effect.to_string(),
        locator: None,
    };
    apply_mutation(&mut state, SessionMutation::UpsertAnimationTrigger {
        animation: "walk".to_string(),
        trigger: trigger("step"),
    });
    apply_mutation(&mut state, SessionMutation::UpsertAnimationTrigger {
        animation: "walk".to_string(),
        trigger: trigger("thud"),
    });

    let walk = &state.animations["walk"];
    assert_eq!(walk.triggers.len(), 1);
    assert_eq!(walk.triggers[0].effect, "thud");
}

#[tokio::test]
async fn mutator_facade_routes_through_the_reducer() {
    let mutator = SessionMutator::new();

    mutator.add_bone(bone("root", None)).await;
    mutator.add_cube(cube("body", Some("root"))).await;

    assert!(mutator.update_bone("root", BoneUpdate {
        rotation: Some([0.0, 90.0, 0.0]),
        ..BoneUpdate::default()
    }).await);
    assert!(!mutator.update_bone("ghost", BoneUpdate::default()).await);

    let counts = mutator.remove_bones(["root"]).await;
    assert_eq!((counts.bones, counts.cubes), (1, 1));

    let snapshot = mutator.snapshot().await;
    assert!(snapshot.is_empty());
}

#[tokio::test]
async fn mutator_reset_swaps_the_state_wholesale() {
    let mutator = SessionMutator::new();
    mutator.add_bone(bone("root", None)).await;

    let mut seeded = SessionState::default();
    seeded.bones.insert("hips".to_string(), bone("hips", None));
    mutator.reset(seeded).await;

    let snapshot = mutator.snapshot().await;
    assert!(!snapshot.bones.contains_key("root"));
    assert!(snapshot.bones.contains_key("hips"));
}
