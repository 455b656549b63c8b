// Host-side tests for the editor session: spawning, release, mode toggles and
// the per-frame flicker pass.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use torus_sketch::core::*;

fn session() -> Session {
    let mut s = Session::default();
    s.resize(800, 600);
    s
}

#[test]
fn shift_click_at_center_spawns_one_knot_at_origin() {
    let mut s = session();
    let index = s.pointer_down(400.0, 300.0, true, PointerButton::Primary);
    assert_eq!(index, Some(0));
    assert_eq!(s.objects.len(), 1);

    let knot = &s.objects[0];
    assert!(knot.position.length() < 1e-3, "pos {:?}", knot.position);
    assert_eq!(knot.scale, 1.0);
    assert_eq!(knot.last_sign, 1.0);
    assert!(!knot.is_green);
    assert_eq!(knot.material.color, HOT_PINK);
    assert_eq!(knot.material.opacity, 1.0);
    assert!(knot.material.transparent);
    assert!(!knot.material.wireframe);
    assert!(knot.needs_update);

    assert!(s.is_scaling());
    assert_eq!(s.target(), Some(0));
    assert!(!s.orbit.enabled);
}

#[test]
fn spawned_knot_uses_fixed_orientation_and_position() {
    let mut s = session();
    s.spawn_at(Vec3::new(5.0, -3.0, 0.0));
    let knot = &s.objects[0];
    assert_eq!(knot.rotation.x, SPAWN_ROTATION_X);
    assert_eq!(knot.rotation.y, SPAWN_ROTATION_Y);
    assert_eq!(knot.rotation.z, 0.0);
    let origin = knot.model_matrix().transform_point3(Vec3::ZERO);
    assert!((origin - Vec3::new(5.0, -3.0, 0.0)).length() < 1e-5);
}

#[test]
fn plain_click_does_not_spawn() {
    let mut s = session();
    assert_eq!(s.pointer_down(400.0, 300.0, false, PointerButton::Primary), None);
    assert!(s.objects.is_empty());
    assert!(!s.is_scaling());
    assert!(s.orbit.enabled);
    assert_eq!(s.orbit.gesture, OrbitGesture::Rotate);
}

#[test]
fn missed_pick_is_a_silent_no_op_but_still_holds_orbit() {
    let mut s = session();
    // Looking at the plane from behind: single-sided, so nothing is hit
    s.camera.eye = Vec3::new(0.0, 0.0, -100.0);
    assert_eq!(s.pointer_down(400.0, 300.0, true, PointerButton::Primary), None);
    assert!(s.objects.is_empty());
    assert!(!s.is_scaling());
    assert!(!s.orbit.enabled);

    s.pointer_up();
    assert!(s.orbit.enabled);
}

#[test]
fn newest_knot_is_always_the_target() {
    let mut s = session();
    s.pointer_down(100.0, 100.0, true, PointerButton::Primary);
    s.pointer_up();
    s.pointer_down(500.0, 200.0, true, PointerButton::Primary);
    assert_eq!(s.objects.len(), 2);
    assert_eq!(s.target(), Some(1));

    s.pointer_move(0.0, -50.0);
    assert!((s.objects[1].scale - 1.5).abs() < 1e-5);
    assert_eq!(s.objects[0].scale, 1.0);
}

#[test]
fn dragging_through_zero_swaps_tint_both_ways() {
    let mut s = session();
    s.spawn_at(Vec3::ZERO);

    s.pointer_move(0.0, 150.0);
    let knot = &s.objects[0];
    assert!(knot.is_green);
    assert_eq!(knot.material.color, LAWN_GREEN);
    assert_eq!(knot.last_sign, -1.0);
    assert!((knot.scale + 0.5).abs() < 1e-5);

    s.pointer_move(0.0, -200.0);
    let knot = &s.objects[0];
    assert!(!knot.is_green);
    assert_eq!(knot.material.color, HOT_PINK);
    assert_eq!(knot.last_sign, 1.0);
    assert!((knot.scale - 1.5).abs() < 1e-5);
}

#[test]
fn shrinking_without_crossing_keeps_primary_tint() {
    let mut s = session();
    s.spawn_at(Vec3::ZERO);
    for _ in 0..18 {
        s.pointer_move(0.0, 5.0);
    }
    let knot = &s.objects[0];
    assert!(knot.scale > 0.0);
    assert!(!knot.is_green);
    assert_eq!(knot.material.color, HOT_PINK);
}

#[test]
fn release_clears_target_and_stops_scaling() {
    let mut s = session();
    s.spawn_at(Vec3::ZERO);
    s.pointer_up();
    assert!(!s.is_scaling());
    assert_eq!(s.target(), None);
    assert!(s.orbit.enabled);

    assert_eq!(s.scale_target(-100.0), None);
    s.pointer_move(0.0, -100.0);
    assert_eq!(s.objects[0].scale, 1.0);

    // Releasing again is harmless
    s.pointer_up();
    assert!(s.orbit.enabled);
}

#[test]
fn wireframe_toggle_twice_restores_every_knot() {
    let mut s = session();
    for x in [0.0, 10.0, 20.0] {
        s.spawn_at(Vec3::new(x, 0.0, 0.0));
        s.pointer_up();
    }
    let original: Vec<bool> = s.objects.iter().map(|o| o.material.wireframe).collect();

    let stats = s.toggle_wireframe();
    assert!(s.wireframe);
    assert!(s.objects.iter().all(|o| o.material.wireframe));
    assert_eq!(stats.vertices, 3 * 4025);
    assert_eq!(stats.faces, 3 * 7680);
    assert_eq!(stats.edges, 3 * 11520);

    s.toggle_wireframe();
    let restored: Vec<bool> = s.objects.iter().map(|o| o.material.wireframe).collect();
    assert_eq!(original, restored);
}

#[test]
fn knots_spawned_in_wireframe_mode_start_wireframed() {
    let mut s = session();
    s.toggle_wireframe();
    s.spawn_at(Vec3::ZERO);
    assert!(s.objects[0].material.wireframe);
}

#[test]
fn wireframe_toggle_on_empty_scene_reports_zero() {
    let mut s = session();
    assert_eq!(s.toggle_wireframe(), SceneStats::default());
}

#[test]
fn flicker_randomizes_opacity_each_tick() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut s = session();
    s.spawn_at(Vec3::ZERO);
    s.spawn_at(Vec3::X);
    assert!(s.toggle_flicker());

    for o in &mut s.objects {
        o.needs_update = false;
    }
    s.tick(&mut rng);
    for o in &s.objects {
        assert!((0.0..1.0).contains(&o.material.opacity));
        assert!(o.material.transparent);
        assert!(o.needs_update);
    }
}

#[test]
fn flicker_off_restores_full_opacity() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut s = session();
    s.spawn_at(Vec3::ZERO);
    s.spawn_at(Vec3::Y);

    s.toggle_flicker();
    s.tick(&mut rng);
    assert!(!s.toggle_flicker());
    assert!(s.objects.iter().all(|o| o.material.opacity == 1.0));

    // Repeated toggling with no scaling in between
    for _ in 0..3 {
        s.toggle_flicker();
        s.tick(&mut rng);
        s.tick(&mut rng);
        s.toggle_flicker();
        assert!(s.objects.iter().all(|o| o.material.opacity == 1.0));
    }
}

#[test]
fn tick_without_flicker_leaves_opacity_alone() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut s = session();
    s.spawn_at(Vec3::ZERO);
    s.tick(&mut rng);
    assert_eq!(s.objects[0].material.opacity, 1.0);
}

#[test]
fn material_rgba_carries_opacity() {
    let m = Material {
        color: 0xffffff,
        opacity: 0.25,
        transparent: true,
        wireframe: false,
    };
    let [r, g, b, a] = m.rgba();
    assert!((r - 1.0).abs() < 1e-6 && (g - 1.0).abs() < 1e-6 && (b - 1.0).abs() < 1e-6);
    assert_eq!(a, 0.25);
    assert_eq!(hex_to_linear_rgb(0x000000), [0.0, 0.0, 0.0]);
}

#[test]
fn flicker_on_waits_for_the_next_tick() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut s = session();
    s.spawn_at(Vec3::ZERO);
    s.spawn_at(Vec3::X);
    for o in &mut s.objects {
        o.needs_update = false;
    }

    assert!(s.toggle_flicker());
    for o in &s.objects {
        assert_eq!(o.material.opacity, 1.0);
        assert!(!o.needs_update);
    }

    s.tick(&mut rng);
    assert!(s.objects.iter().all(|o| o.needs_update));
}

#[test]
fn latest_wireframe_stats_outlive_spawns_and_flicker() {
    let mut s = session();
    assert_eq!(s.last_stats(), None);

    s.spawn_at(Vec3::ZERO);
    let stats = s.toggle_wireframe();
    assert_eq!(s.last_stats(), Some(stats));

    s.spawn_at(Vec3::X);
    s.toggle_flicker();
    s.toggle_flicker();
    assert_eq!(s.last_stats(), Some(stats));

    let again = s.toggle_wireframe();
    assert_eq!(again.vertices, 2 * stats.vertices);
    assert_eq!(s.last_stats(), Some(again));
}

// What an sRGB render target does to the shader output
fn encode_srgb(c: f32) -> u32 {
    let v = if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    };
    (v * 255.0).round() as u32
}

#[test]
fn tints_are_linear_and_encode_back_to_their_hex() {
    for hex in [HOT_PINK, LAWN_GREEN] {
        let [r, g, b] = hex_to_linear_rgb(hex);
        let packed = (encode_srgb(r) << 16) | (encode_srgb(g) << 8) | encode_srgb(b);
        assert_eq!(packed, hex, "{:06x}", hex);
    }
    // Hot pink's green channel is well below its sRGB byte value
    let [_, g, _] = hex_to_linear_rgb(HOT_PINK);
    assert!((g - 0.1413).abs() < 1e-3, "g {}", g);
}
