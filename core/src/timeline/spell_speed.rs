//! Spell speed to GCD modifier conversion
//!
//! Formula: `modifier = max(0.5, 1.0 - ((spell_speed - 400) / 130) * 0.01)`
//!
//! An approximation of the game's curve; only GCD skills are affected.

/// Spell speed at which the GCD is unmodified
pub const BASE_SPELL_SPEED: u32 = 400;
/// Spell speed points per 1% GCD reduction
const SPELL_SPEED_COEFFICIENT: f64 = 130.0;
/// The GCD never drops below half its base length
pub const MIN_GCD_MODIFIER: f64 = 0.5;

/// Multiplier applied to every GCD skill's base recast
pub fn spell_speed_modifier(spell_speed: u32) -> f64 {
    if spell_speed <= BASE_SPELL_SPEED {
        return 1.0;
    }

    let raw = f64::from(spell_speed - BASE_SPELL_SPEED) / SPELL_SPEED_COEFFICIENT;
    (1.0 - raw * 0.01).max(MIN_GCD_MODIFIER)
}
