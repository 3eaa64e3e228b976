//! Weapon profile loader.

use std::collections::BTreeMap;
use std::path::Path;

use embers_core::WeaponProfile;

use crate::loaders::{LoadResult, read_file};

/// Weapon profiles keyed by name.
pub type WeaponCatalog = BTreeMap<String, WeaponProfile>;

/// Loader for weapon profiles from RON files.
pub struct WeaponLoader;

impl WeaponLoader {
    /// RON format: `Vec<WeaponProfile>`. Names must be unique.
    pub fn load(path: &Path) -> LoadResult<WeaponCatalog> {
        let content = read_file(path)?;
        let profiles: Vec<WeaponProfile> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse weapon RON: {}", e))?;

        let mut catalog = WeaponCatalog::new();
        for profile in profiles {
            if profile.damage_min > profile.damage_max {
                anyhow::bail!(
                    "Weapon '{}' has damage_min {} above damage_max {}",
                    profile.name,
                    profile.damage_min,
                    profile.damage_max
                );
            }
            let name = profile.name.clone();
            if catalog.insert(name.clone(), profile).is_some() {
                anyhow::bail!("Duplicate weapon '{}' in {}", name, path.display());
            }
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embers_core::AttackPattern;
    use tempfile::TempDir;

    #[test]
    fn optional_fields_take_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("weapons.ron");
        std::fs::write(
            &path,
            r#"[
                (name: "Shotgun", class: Rifle, pattern: Spread(projectiles: 5),
                 range: 8.0, damage_min: 4, damage_max: 7),
            ]"#,
        )
        .unwrap();

        let catalog = WeaponLoader::load(&path).unwrap();
        let shotgun = &catalog["Shotgun"];
        assert_eq!(shotgun.pattern, AttackPattern::Spread { projectiles: 5 });
        assert_eq!(shotgun.critical_chance, 0.0);
        assert_eq!(
            shotgun.cover_damage_penalty,
            WeaponProfile::DEFAULT_COVER_DAMAGE_PENALTY
        );
    }

    #[test]
    fn inverted_damage_range_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("weapons.ron");
        std::fs::write(
            &path,
            r#"[(
                name: "Bad",
                class: Handgun,
                pattern: SingleShot,
                range: 5.0,
                damage_min: 9,
                damage_max: 3,
            )]"#,
        )
        .unwrap();

        assert!(WeaponLoader::load(&path).is_err());
    }
}
