//! Multi-state Game of Life on a fixed toroidal pixel grid.
//!
//! Cells step through a data-driven rule table (Dead, Born, Survived, Dying,
//! Trail in the reference table) so decaying cells leave coloured trails.
//! When global activity drops below a fixed fraction of the grid, random
//! seed shapes are stamped in so the display never goes inert.
//!
//! ```no_run
//! use trail_life::{GameOfLife, LifeConfig, NullSink};
//!
//! let mut life: GameOfLife = GameOfLife::new(&LifeConfig::default())?;
//! let report = life.step(&mut NullSink);
//! println!("generation {} activity {}", report.generation, report.activity);
//! # Ok::<(), trail_life::LifeError>(())
//! ```

pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod grid;
pub mod life;
pub mod rules;
pub mod seeder;
pub mod shapes;

pub use config::{LifeConfig, MAX_FPS};
pub use display::{DisplaySink, NullSink, Rgb};
pub use error::{LifeError, Result};
pub use grid::{Grid, HEIGHT, PanelGrid, WIDTH};
pub use life::{CycleReport, GameOfLife, Reseed, ReseedReason};
pub use rules::{Rule, RulePreset, RuleTable, StateIndex};
pub use seeder::{Placement, Seeder};
pub use shapes::{Shape, ShapeLibrary};
