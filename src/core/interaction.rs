use crate::core::constants::*;

/// Tuning for drag-to-scale and the two tints a knot alternates between.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractionConfig {
    pub scale_speed: f32,
    pub min_abs: f32,
    pub max_abs: f32,
    pub primary: u32,
    pub secondary: u32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            scale_speed: SCALE_SPEED,
            min_abs: MIN_SCALE_ABS,
            max_abs: MAX_SCALE_ABS,
            primary: HOT_PINK,
            secondary: LAWN_GREEN,
        }
    }
}

/// Outcome of one drag step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleStep {
    /// Signed uniform scale, magnitude within `[min_abs, max_abs]`.
    pub scale: f32,
    /// `1.0` or `-1.0`.
    pub sign: f32,
    /// True when `sign` differs from the previous sign.
    pub flipped: bool,
}

/// Advance a signed scale by a vertical pointer delta.
///
/// Upward motion (negative `dy`) grows the scale. A candidate of exactly zero
/// keeps the previous sign so it never counts as a crossing.
pub fn scale_step(prev_scale: f32, prev_sign: f32, dy: f32, cfg: &InteractionConfig) -> ScaleStep {
    let mut candidate = prev_scale + (-dy) * cfg.scale_speed;
    if candidate.is_nan() {
        candidate = prev_scale;
    }
    let sign = if candidate > 0.0 {
        1.0
    } else if candidate < 0.0 {
        -1.0
    } else {
        prev_sign
    };
    let magnitude = candidate.abs().clamp(cfg.min_abs, cfg.max_abs);
    ScaleStep {
        scale: sign * magnitude,
        sign,
        flipped: sign != prev_sign,
    }
}

/// Which mouse button a press came from, as far as the editor cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Other,
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` value.
    #[inline]
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => Self::Primary,
            2 => Self::Secondary,
            _ => Self::Other,
        }
    }
}
