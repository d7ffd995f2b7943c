use crate::{
    automaton::{CaveAutomaton, SmoothingRule},
    error::{CaveError, Result},
    graph::reachable_fraction,
    map::Map,
    sampling::{RandomSource, SizeRange},
    terrain::{classify, FloorPalette},
    Position,
};

use serde::{Deserialize, Serialize};

pub const MIN_DIMENSION: usize = 3;
pub const MAX_GENERATE_TRIES: usize = 200;

/// A finished level: the map plus where the player starts.
#[derive(Clone, Debug)]
pub struct Cave {
    pub map: Map,
    pub player_start: Position,
}

/// Everything that shapes a cave. The defaults are the tuned values; a recipe only needs
/// to name what it changes.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct CaveMapSpec {
    pub width: usize,
    pub height: usize,
    /// Chance that a cell starts out as rock.
    pub solid_chance: f32,
    pub cavern: SmoothingRule,
    pub cleanup: SmoothingRule,
    pub floor: FloorPalette,
    /// When set, caves where the player start reaches less than this share of the open
    /// cells are rejected and regenerated. Off by default.
    pub min_reachable_fraction: Option<f32>,
}

impl Default for CaveMapSpec {
    fn default() -> Self {
        CaveMapSpec {
            width: 64,
            height: 48,
            solid_chance: 0.43,
            cavern: SmoothingRule::CAVERN,
            cleanup: SmoothingRule::CLEANUP,
            floor: FloorPalette::default(),
            min_reachable_fraction: None,
        }
    }
}

fn check_probability(name: &str, p: f32) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(CaveError::InvalidSpec(format!(
            "{} must be within [0, 1], got {}",
            name, p
        )))
    }
}

impl CaveMapSpec {
    pub fn new(width: usize, height: usize) -> Self {
        CaveMapSpec {
            width,
            height,
            ..Default::default()
        }
    }

    /// Default tuning at a size drawn from `range`.
    pub fn random_size(range: &SizeRange, rng: &mut impl RandomSource) -> Self {
        let (width, height) = range.sample(rng);

        CaveMapSpec::new(width, height)
    }

    /// Parses a RON recipe. Missing fields take their defaults.
    pub fn from_ron(s: &str) -> Result<Self> {
        let spec: CaveMapSpec = ron::de::from_str(s)?;
        spec.validate()?;

        Ok(spec)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width < MIN_DIMENSION || self.height < MIN_DIMENSION {
            return Err(CaveError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        check_probability("solid_chance", self.solid_chance)?;
        check_probability("floor.common_chance", self.floor.common_chance)?;
        if let Some(fraction) = self.min_reachable_fraction {
            check_probability("min_reachable_fraction", fraction)?;
        }
        let (low, high) = self.floor.common_variants;
        let (rare_low, rare_high) = self.floor.rare_variants;
        if low > high || rare_low > rare_high {
            return Err(CaveError::InvalidSpec(
                "floor variant ranges must be ordered low to high".to_string(),
            ));
        }

        Ok(())
    }

    /// Seeds, smooths, seals and classifies one map. Never fails once the recipe is valid.
    pub fn generate_map(&self, rng: &mut impl RandomSource) -> Result<Map> {
        self.validate()?;
        log::debug!("Generating {}x{} cave", self.width, self.height);

        let mut automaton = CaveAutomaton::seeded(self.width, self.height, self.solid_chance, rng);
        automaton.run(&self.cavern);
        automaton.run(&self.cleanup);
        automaton.seal_border();

        Ok(classify(automaton.grid(), &self.floor, rng))
    }

    /// One generation attempt, including the player start and the optional connectivity
    /// check.
    pub fn try_generate(&self, rng: &mut impl RandomSource) -> Result<Cave> {
        let map = self.generate_map(rng)?;
        let player_start = map.find_first_open_cell()?;
        log::debug!("Player start = {:?}", player_start);

        if let Some(required) = self.min_reachable_fraction {
            let fraction = reachable_fraction(&map, player_start);
            if fraction < required {
                return Err(CaveError::PoorlyConnected { fraction, required });
            }
        }

        Ok(Cave { map, player_start })
    }

    /// Retries `try_generate` while the failure is down to the random stream. Recipe errors
    /// are returned straight away.
    pub fn generate(&self, rng: &mut impl RandomSource) -> Result<Cave> {
        let mut last_error = CaveError::NoOpenCell;
        for attempt in 0..MAX_GENERATE_TRIES {
            match self.try_generate(rng) {
                Ok(cave) => return Ok(cave),
                Err(e) if e.is_retryable() => {
                    log::warn!("Discarding cave attempt {}: {}", attempt, e);
                    last_error = e;
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error)
    }
}

/// Generates a `width` x `height` cave with the default tuning.
pub fn generate_cave(width: usize, height: usize, rng: &mut impl RandomSource) -> Result<Map> {
    CaveMapSpec::new(width, height).generate_map(rng)
}
