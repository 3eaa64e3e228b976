//! Damage arithmetic for a single landed shot.

/// Critical roll. Targets in cover are never hit critically.
#[inline]
pub fn is_critical(critical_chance: f32, roll: f32, target_in_cover: bool) -> bool {
    !target_in_cover && roll < critical_chance
}

/// `ceil(base * multiplier)`.
pub fn critical_damage(base: u32, multiplier: f32) -> u32 {
    let scaled = (base as f32 * multiplier).ceil();
    if scaled <= 0.0 { 0 } else { scaled as u32 }
}

/// Flat cover reduction, clamped at zero.
#[inline]
pub fn apply_cover_penalty(damage: u32, penalty: u32, target_in_cover: bool) -> u32 {
    if target_in_cover {
        damage.saturating_sub(penalty)
    } else {
        damage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_rounds_up() {
        assert_eq!(critical_damage(10, 1.5), 15);
        assert_eq!(critical_damage(7, 1.5), 11);
        assert_eq!(critical_damage(3, 2.0), 6);
    }

    #[test]
    fn cover_blocks_criticals() {
        assert!(is_critical(0.5, 0.1, false));
        assert!(!is_critical(0.5, 0.1, true));
        assert!(!is_critical(0.0, 0.0, false));
    }

    #[test]
    fn cover_penalty_clamps() {
        assert_eq!(apply_cover_penalty(10, 5, true), 5);
        assert_eq!(apply_cover_penalty(3, 5, true), 0);
        assert_eq!(apply_cover_penalty(3, 5, false), 3);
    }
}
