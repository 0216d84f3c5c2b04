// error.rs - Error types for the automaton core
//
// Every variant except `Io` and `Toml` is raised while a `GameOfLife` is
// assembled or handed foreign data. A constructed automaton's cycle has no
// failure path.

use thiserror::Error;

use crate::rules::StateIndex;

#[derive(Error, Debug)]
pub enum LifeError {
    #[error("rule table `{0}` has no states")]
    EmptyRuleTable(&'static str),

    #[error("rule table `{table}` has {count} states, at most 256 fit a cell")]
    TooManyStates { table: &'static str, count: usize },

    #[error("rule table `{table}`: state {state} with {neighbors} neighbors goes to {target}, which is not a state")]
    TransitionOutOfRange {
        table: &'static str,
        state: usize,
        neighbors: usize,
        target: StateIndex,
    },

    #[error("rule table `{table}`: seed state {state} is missing or not alive")]
    InvalidSeedState { table: &'static str, state: StateIndex },

    #[error("rule table `{0}`: state 0 fills fresh grids and must not be alive")]
    AliveQuiescentState(&'static str),

    #[error("shape library has an empty selection list")]
    EmptyShapeLibrary,

    #[error("shape `{name}` is malformed: {reason}")]
    MalformedShape { name: &'static str, reason: String },

    #[error("shape `{name}` spans {extent} cells but the placement inset is {inset}")]
    InsetTooSmall {
        name: &'static str,
        extent: usize,
        inset: usize,
    },

    #[error("a {width}x{height} grid leaves no room for seeds with an inset of {inset}")]
    GridTooSmall {
        width: usize,
        height: usize,
        inset: usize,
    },

    #[error("shape `{name}` ({width}x{height}) does not fit the grid")]
    ShapeTooLarge {
        name: &'static str,
        width: usize,
        height: usize,
    },

    #[error("cell ({x}, {y}) holds state {state}, which rule table `{table}` does not define")]
    UnknownState {
        table: &'static str,
        x: usize,
        y: usize,
        state: StateIndex,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, LifeError>;

impl LifeError {
    #[must_use]
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
