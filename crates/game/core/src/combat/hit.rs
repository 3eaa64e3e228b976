//! Hit chance and accuracy calculations.

use super::WeaponProfile;

/// Accuracy of a single shot.
///
/// # Formula
///
/// ```text
/// accuracy = 1.0 - (cover_accuracy_penalty if target in cover)
/// clamped to [0, 1]
/// ```
pub fn accuracy(weapon: &WeaponProfile, target_in_cover: bool) -> f32 {
    let mut accuracy = 1.0;
    if target_in_cover {
        accuracy -= weapon.cover_accuracy_penalty;
    }
    accuracy.clamp(0.0, 1.0)
}

/// A uniform roll in `[0, 1)` hits when strictly below the accuracy.
#[inline]
pub fn check_hit(accuracy: f32, roll: f32) -> bool {
    roll < accuracy
}
