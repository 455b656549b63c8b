// Host-side tests for the drag-to-scale step and tint flipping.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use torus_sketch::core::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn upward_drag_grows_scale_without_flip() {
    let cfg = InteractionConfig::default();
    let step = scale_step(1.0, 1.0, -10.0, &cfg);
    assert!(approx(step.scale, 1.1));
    assert_eq!(step.sign, 1.0);
    assert!(!step.flipped);
}

#[test]
fn downward_drag_through_zero_flips_sign() {
    let cfg = InteractionConfig::default();
    let step = scale_step(1.0, 1.0, 150.0, &cfg);
    assert!(approx(step.scale, -0.5));
    assert_eq!(step.sign, -1.0);
    assert!(step.flipped);
}

#[test]
fn exact_zero_keeps_previous_sign() {
    let cfg = InteractionConfig {
        scale_speed: 0.5,
        ..InteractionConfig::default()
    };
    // 1.0 + (-2.0 * 0.5) == 0.0 exactly
    let step = scale_step(1.0, 1.0, 2.0, &cfg);
    assert_eq!(step.sign, 1.0);
    assert!(!step.flipped);
    assert!(approx(step.scale, cfg.min_abs));

    let step = scale_step(-1.0, -1.0, -2.0, &cfg);
    assert_eq!(step.sign, -1.0);
    assert!(!step.flipped);
    assert!(approx(step.scale, -cfg.min_abs));
}

#[test]
fn magnitude_is_clamped_at_both_ends() {
    let cfg = InteractionConfig::default();
    let big = scale_step(1.0, 1.0, -10_000.0, &cfg);
    assert_eq!(big.scale, MAX_SCALE_ABS);

    let big_negative = scale_step(1.0, 1.0, 10_000.0, &cfg);
    assert_eq!(big_negative.scale, -MAX_SCALE_ABS);
    assert!(big_negative.flipped);

    // Shrinking but staying positive bottoms out at the minimum
    let tiny = scale_step(0.06, 1.0, 5.0, &cfg);
    assert!(approx(tiny.scale, MIN_SCALE_ABS));
    assert!(!tiny.flipped);
}

#[test]
fn negative_scale_dragged_up_flips_back() {
    let cfg = InteractionConfig::default();
    let step = scale_step(-0.05, -1.0, -10.0, &cfg);
    assert_eq!(step.sign, 1.0);
    assert!(step.flipped);
    assert!(approx(step.scale, 0.05));
}

#[test]
fn nan_delta_leaves_scale_untouched() {
    let cfg = InteractionConfig::default();
    let step = scale_step(2.0, 1.0, f32::NAN, &cfg);
    assert_eq!(step.scale, 2.0);
    assert!(!step.flipped);
}

#[test]
fn random_drags_stay_in_range_and_flip_only_on_crossing() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut session = Session::default();
    session.resize(800, 600);
    session.spawn_at(glam::Vec3::ZERO);

    for _ in 0..2_000 {
        let before = session.objects[0].clone();
        let dy: f32 = rng.gen_range(-400.0..400.0);
        let step = session.scale_target(dy).expect("target is active");
        let after = &session.objects[0];

        let mag = after.scale.abs();
        assert!(mag >= MIN_SCALE_ABS && mag <= MAX_SCALE_ABS, "mag {}", mag);

        let crossed = after.scale.signum() != before.scale.signum();
        assert_eq!(step.flipped, crossed);
        assert_eq!(after.is_green != before.is_green, crossed);
        assert_eq!(after.last_sign, after.scale.signum());
    }
}

#[test]
fn pointer_buttons_map_from_dom_values() {
    assert_eq!(PointerButton::from_dom(0), PointerButton::Primary);
    assert_eq!(PointerButton::from_dom(2), PointerButton::Secondary);
    assert_eq!(PointerButton::from_dom(1), PointerButton::Other);
}

#[test]
fn key_commands_ignore_case() {
    assert_eq!(command_for_key("f"), Some(KeyCommand::ToggleFlicker));
    assert_eq!(command_for_key("F"), Some(KeyCommand::ToggleFlicker));
    assert_eq!(command_for_key("w"), Some(KeyCommand::ToggleWireframe));
    assert_eq!(command_for_key("W"), Some(KeyCommand::ToggleWireframe));
    assert_eq!(command_for_key("h"), Some(KeyCommand::ToggleHint));
    assert_eq!(command_for_key("x"), None);
    assert_eq!(command_for_key("Shift"), None);
    assert_eq!(command_for_key(""), None);
}
