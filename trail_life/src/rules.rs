// rules.rs - Multi-state rule tables
//
// A rule table is plain data: one row per cell state, each with a colour, an
// alive flag used for neighbour counting, and the next state for every live
// neighbour count 0..=8. The engine never branches on rule semantics.

use serde::{Deserialize, Serialize};

use crate::display::Rgb;
use crate::error::{LifeError, Result};

pub type StateIndex = u8;

/// Number of distinct live-neighbour counts (0..=8).
pub const NEIGHBOR_COUNTS: usize = 9;

/// State 0 is the quiescent state every fresh grid is filled with.
pub const DEAD: StateIndex = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub name: &'static str,
    pub color: Rgb,
    pub alive: bool,
    pub next: [StateIndex; NEIGHBOR_COUNTS],
}

/// Indices of the reference five-state table.
pub mod trails {
    use super::StateIndex;

    pub const DEAD: StateIndex = 0;
    pub const BORN: StateIndex = 1;
    pub const SURVIVED: StateIndex = 2;
    pub const DYING: StateIndex = 3;
    pub const TRAIL: StateIndex = 4;
}

/// Indices of the two-state classic table.
pub mod classic {
    use super::StateIndex;

    pub const DEAD: StateIndex = 0;
    pub const ALIVE: StateIndex = 1;
}

const TRAILS_RULES: &[Rule] = {
    use trails::{BORN, DEAD, DYING, SURVIVED, TRAIL};
    &[
        Rule {
            name: "Dead",
            color: Rgb::new(0, 0, 0),
            alive: false,
            next: [DEAD, DEAD, DEAD, BORN, DEAD, DEAD, DEAD, DEAD, DEAD],
        },
        Rule {
            name: "Born",
            color: Rgb::new(220, 255, 220),
            alive: true,
            next: [DYING, DYING, SURVIVED, SURVIVED, DYING, DYING, DYING, DYING, DYING],
        },
        Rule {
            name: "Survived",
            color: Rgb::new(0, 200, 0),
            alive: true,
            next: [DYING, DYING, SURVIVED, SURVIVED, DYING, DYING, DYING, DYING, DYING],
        },
        Rule {
            name: "Dying",
            color: Rgb::new(160, 60, 0),
            alive: false,
            next: [TRAIL, TRAIL, TRAIL, BORN, TRAIL, TRAIL, TRAIL, TRAIL, TRAIL],
        },
        Rule {
            name: "Trail",
            color: Rgb::new(20, 10, 50),
            alive: false,
            next: [DEAD, DEAD, DEAD, BORN, DEAD, DEAD, DEAD, DEAD, DEAD],
        },
    ]
};

const CLASSIC_RULES: &[Rule] = {
    use classic::{ALIVE, DEAD};
    &[
        Rule {
            name: "Dead",
            color: Rgb::new(40, 40, 40),
            alive: false,
            next: [DEAD, DEAD, DEAD, ALIVE, DEAD, DEAD, DEAD, DEAD, DEAD],
        },
        Rule {
            name: "Alive",
            color: Rgb::new(0, 200, 0),
            alive: true,
            next: [DEAD, DEAD, ALIVE, ALIVE, DEAD, DEAD, DEAD, DEAD, DEAD],
        },
    ]
};

/// Named rule tables selectable from configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RulePreset {
    #[default]
    Trails,
    Classic,
}

impl RulePreset {
    pub fn table(self) -> RuleTable {
        match self {
            RulePreset::Trails => RuleTable::trails(),
            RulePreset::Classic => RuleTable::classic(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleTable {
    name: &'static str,
    rules: &'static [Rule],
    seed_state: StateIndex,
}

impl RuleTable {
    /// Builds a table without checking it; call [`RuleTable::validate`]
    /// before handing it to the engine.
    pub const fn new(name: &'static str, rules: &'static [Rule], seed_state: StateIndex) -> Self {
        Self {
            name,
            rules,
            seed_state,
        }
    }

    /// Dead -> Born -> Survived, decaying through Dying and Trail.
    /// Projected onto the alive flag this is exactly B3/S23.
    pub const fn trails() -> Self {
        Self::new("trails", TRAILS_RULES, trails::SURVIVED)
    }

    pub const fn classic() -> Self {
        Self::new("classic", CLASSIC_RULES, classic::ALIVE)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    /// State written by the seeder: mature live cells, not newborns.
    pub fn seed_state(&self) -> StateIndex {
        self.seed_state
    }

    #[inline]
    pub fn lookup(&self, state: StateIndex) -> &Rule {
        &self.rules[state as usize]
    }

    #[inline]
    pub fn is_alive(&self, state: StateIndex) -> bool {
        self.lookup(state).alive
    }

    #[inline]
    pub fn transition(&self, state: StateIndex, neighbors: u8) -> StateIndex {
        self.lookup(state).next[neighbors as usize]
    }

    pub fn validate(&self) -> Result<()> {
        if self.rules.is_empty() {
            return Err(LifeError::EmptyRuleTable(self.name));
        }
        if self.rules.len() > StateIndex::MAX as usize + 1 {
            return Err(LifeError::TooManyStates {
                table: self.name,
                count: self.rules.len(),
            });
        }
        if self.rules[DEAD as usize].alive {
            return Err(LifeError::AliveQuiescentState(self.name));
        }
        for (state, rule) in self.rules.iter().enumerate() {
            if let Some((neighbors, &target)) = rule
                .next
                .iter()
                .enumerate()
                .find(|&(_, &target)| target as usize >= self.rules.len())
            {
                return Err(LifeError::TransitionOutOfRange {
                    table: self.name,
                    state,
                    neighbors,
                    target,
                });
            }
        }
        match self.rules.get(self.seed_state as usize) {
            Some(rule) if rule.alive => Ok(()),
            _ => Err(LifeError::InvalidSeedState {
                table: self.name,
                state: self.seed_state,
            }),
        }
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::trails()
    }
}
