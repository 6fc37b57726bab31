//! Memoized flower structures, one slot per species.

use std::sync::{Arc, OnceLock};

use crate::core::Result;

use super::structure::{synthesize, StaticStructure};
use super::Species;

/// Lazily synthesizes and caches one [`StaticStructure`] per species.
///
/// Slots are filled on first access through `&self`, so a shared library
/// can be read from parallel frame evaluation.
#[derive(Default)]
pub struct StructureLibrary {
    slots: [OnceLock<Arc<StaticStructure>>; Species::COUNT],
}

impl StructureLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Library with every species already synthesized.
    pub fn warmed() -> Self {
        let library = Self::new();
        for species in Species::ALL {
            library.get(species);
        }
        library
    }

    /// Structure for `species`, synthesizing it on first use.
    pub fn get(&self, species: Species) -> Arc<StaticStructure> {
        self.slots[species.index()]
            .get_or_init(|| {
                log::debug!("Synthesized flower structure for {}", species);
                Arc::new(synthesize(species))
            })
            .clone()
    }

    /// Look up a structure by species name. Unknown names are an error,
    /// never a default structure.
    pub fn get_by_name(&self, name: &str) -> Result<Arc<StaticStructure>> {
        Ok(self.get(name.parse()?))
    }

    /// Number of species synthesized so far
    pub fn cached_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.get().is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Error;

    #[test]
    fn test_memoizes_per_species() {
        let library = StructureLibrary::new();
        assert_eq!(library.cached_count(), 0);
        let a = library.get(Species::Rose);
        let b = library.get(Species::Rose);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(library.cached_count(), 1);
    }

    #[test]
    fn test_warmed_fills_every_slot() {
        let library = StructureLibrary::warmed();
        assert_eq!(library.cached_count(), Species::COUNT);
        assert_eq!(library.get(Species::Lotus).species, Species::Lotus);
    }

    #[test]
    fn test_get_by_name() {
        let library = StructureLibrary::new();
        assert_eq!(library.get_by_name("tulip").unwrap().species, Species::Tulip);
        assert!(matches!(library.get_by_name("cactus"), Err(Error::UnknownSpecies(_))));
        assert_eq!(library.cached_count(), 1);
    }
}
