//! Named visual assets
//!
//! The simulation never loads textures or particle files; it only names them.
//! A catalog records which names the host actually has, and anything missing
//! is skipped rather than treated as an error.

use std::collections::BTreeSet;

use crate::sim::EffectKind;

/// Player walk cycle frames
pub const WALK_TEXTURES: [&str; 4] = ["walk-1", "walk-2", "walk-3", "walk-4"];

/// Particle emitter files
pub const JETPACK_EMITTER: &str = "JetpackEmitter";
pub const COIN_POOF: &str = "CoinPoof";
pub const ENEMY_DESTROYED: &str = "EnemyDestroyed";

/// HUD font
pub const SCORE_FONT: &str = "Edit Undo BRK";

/// Emitter file for an effect kind
pub fn effect_asset(kind: EffectKind) -> &'static str {
    match kind {
        EffectKind::CoinPoof => COIN_POOF,
        EffectKind::EnemyDestroyed => ENEMY_DESTROYED,
    }
}

/// Set of asset names available to the host
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    available: BTreeSet<String>,
}

impl Default for AssetCatalog {
    /// Every asset the game references
    fn default() -> Self {
        let names = WALK_TEXTURES
            .into_iter()
            .chain([JETPACK_EMITTER, COIN_POOF, ENEMY_DESTROYED, SCORE_FONT]);
        Self::from_names(names)
    }
}

impl AssetCatalog {
    pub fn empty() -> Self {
        Self {
            available: BTreeSet::new(),
        }
    }

    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            available: names.into_iter().map(str::to_owned).collect(),
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.available.contains(name)
    }

    /// Copy of this catalog with one name removed
    pub fn without(mut self, name: &str) -> Self {
        self.available.remove(name);
        self
    }

    pub fn len(&self) -> usize {
        self.available.len()
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_complete() {
        let catalog = AssetCatalog::default();
        assert_eq!(catalog.len(), 8);
        for name in WALK_TEXTURES {
            assert!(catalog.has(name));
        }
        assert!(catalog.has(effect_asset(EffectKind::CoinPoof)));
        assert!(catalog.has(effect_asset(EffectKind::EnemyDestroyed)));
        assert!(catalog.has(SCORE_FONT));
    }

    #[test]
    fn test_without() {
        let catalog = AssetCatalog::default().without(COIN_POOF);
        assert!(!catalog.has(COIN_POOF));
        assert!(catalog.has(ENEMY_DESTROYED));
        assert!(AssetCatalog::empty().is_empty());
    }
}
