//! Animals living on the grid.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use zoo_core::{Species, SpeciesId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    /// Animals of species without genders
    Ungendered,
}

impl Gender {
    pub fn is_gendered(self) -> bool {
        self != Gender::Ungendered
    }

    pub fn is_opposite(self, other: Gender) -> bool {
        matches!(
            (self, other),
            (Gender::Male, Gender::Female) | (Gender::Female, Gender::Male)
        )
    }
}

/// An animal in the simulation.
///
/// Animals carry no position; where they are is decided by the grid alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    pub species: SpeciesId,
    pub gender: Gender,
}

impl Animal {
    pub fn new(species: &Species, gender: Gender) -> Self {
        debug_assert_eq!(
            species.gendered,
            gender.is_gendered(),
            "gender {:?} does not fit species '{}'",
            gender,
            species.name
        );
        Self {
            species: species.id,
            gender,
        }
    }

    /// The `index`-th of `count` animals created for the initial population.
    ///
    /// The first half (rounded down) of a gendered species is male, the rest female.
    pub fn initial(species: &Species, index: u32, count: u32) -> Self {
        let gender = if !species.gendered {
            Gender::Ungendered
        } else if index < count / 2 {
            Gender::Male
        } else {
            Gender::Female
        };
        Self::new(species, gender)
    }

    /// A newborn with a fair coin-flip gender
    pub fn offspring(species: &Species, rng: &mut ChaCha8Rng) -> Self {
        let gender = if !species.gendered {
            Gender::Ungendered
        } else if rng.gen_bool(0.5) {
            Gender::Male
        } else {
            Gender::Female
        };
        Self::new(species, gender)
    }

    /// Same species, both gendered, opposite genders
    pub fn can_mate_with(&self, other: &Animal) -> bool {
        self.species == other.species && self.gender.is_opposite(other.gender)
    }
}
