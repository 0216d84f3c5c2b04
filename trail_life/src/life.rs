// life.rs - The cycle driver
//
// Owns both grid buffers and runs one cycle per `step`: transition into the
// back buffer, flip the buffer roles, then reseed if activity has decayed.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::LifeConfig;
use crate::display::DisplaySink;
use crate::engine;
use crate::error::{LifeError, Result};
use crate::grid::{Grid, HEIGHT, WIDTH};
use crate::rules::{DEAD, RuleTable, StateIndex};
use crate::seeder::{Placement, Seeder};
use crate::shapes::{Shape, ShapeLibrary};

/// Generations remembered for repeat detection.
pub const HISTORY_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReseedReason {
    LowActivity,
    Cycle,
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reseed {
    pub reason: ReseedReason,
    pub placements: Vec<Placement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub generation: u64,
    pub activity: usize,
    pub reseed: Option<Reseed>,
}

pub struct GameOfLife<const W: usize = WIDTH, const H: usize = HEIGHT> {
    buffers: [Grid<W, H>; 2],
    current: usize,

    rules: RuleTable,
    seeder: Seeder,
    rng: ChaCha8Rng,

    reseed_count: usize,
    threshold: usize,
    reseed_on_cycle: bool,

    generation: u64,
    activity: usize,

    grid_history: [u64; HISTORY_LEN],
    history_count: usize,
}

impl<const W: usize, const H: usize> GameOfLife<W, H> {
    /// Reference shape library with the configured rule preset.
    pub fn new(config: &LifeConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_parts(config, config.rules.table(), ShapeLibrary::reference(), rng)
    }

    /// Validates every piece before anything runs; a failure here means the
    /// automaton cannot run correctly.
    pub fn with_parts(
        config: &LifeConfig,
        rules: RuleTable,
        library: ShapeLibrary,
        rng: ChaCha8Rng,
    ) -> Result<Self> {
        config.validate()?;
        rules.validate()?;
        library.validate()?;
        let shapes = library.count();
        let seeder = Seeder::for_library(library, config.inset)?;
        seeder.check_grid::<W, H>()?;

        let threshold = config.activity_threshold(W, H);
        tracing::info!(
            width = W,
            height = H,
            rules = rules.name(),
            states = rules.len(),
            shapes,
            inset = seeder.inset(),
            threshold,
            "automaton ready"
        );

        Ok(Self {
            buffers: [Grid::new(), Grid::new()],
            current: 0,
            rules,
            seeder,
            rng,
            reseed_count: config.reseed_count,
            threshold,
            reseed_on_cycle: config.reseed_on_cycle,
            generation: 0,
            activity: 0,
            grid_history: [0; HISTORY_LEN],
            history_count: 0,
        })
    }

    /// Runs one transition + maintenance cycle and flushes the sink.
    pub fn step<S>(&mut self, sink: &mut S) -> CycleReport
    where
        S: DisplaySink + ?Sized,
    {
        let [a, b] = &mut self.buffers;
        let (current, next) = if self.current == 0 { (&*a, b) } else { (&*b, a) };
        let activity = engine::transition(&self.rules, current, next, sink);

        self.current ^= 1;
        self.generation += 1;
        self.activity = activity;

        let reseed = self.maintain(activity);
        sink.show();

        tracing::trace!(generation = self.generation, activity, "cycle");
        CycleReport {
            generation: self.generation,
            activity,
            reseed,
        }
    }

    fn maintain(&mut self, activity: usize) -> Option<Reseed> {
        if activity < self.threshold {
            return Some(self.reseed(ReseedReason::LowActivity));
        }
        if self.reseed_on_cycle && self.check_for_cycle() {
            return Some(self.reseed(ReseedReason::Cycle));
        }
        None
    }

    fn reseed(&mut self, reason: ReseedReason) -> Reseed {
        let grid = &mut self.buffers[self.current];
        let placements = self.seeder.seed(
            grid,
            self.rules.seed_state(),
            self.reseed_count,
            &mut self.rng,
        );
        tracing::debug!(
            generation = self.generation,
            activity = self.activity,
            ?reason,
            shapes = ?placements.iter().map(|p| p.shape.name).collect::<Vec<_>>(),
            "reseeded"
        );
        self.reset_history();
        Reseed { reason, placements }
    }

    /// Stamps the configured number of random shapes immediately.
    pub fn reseed_now(&mut self) -> Reseed {
        self.reseed(ReseedReason::Manual)
    }

    fn check_for_cycle(&mut self) -> bool {
        let current_hash = self.current().hash_grid();
        let filled = self.history_count.min(HISTORY_LEN);
        if self.grid_history[..filled].contains(&current_hash) {
            return true;
        }
        self.grid_history[self.history_count % HISTORY_LEN] = current_hash;
        self.history_count += 1;
        false
    }

    fn reset_history(&mut self) {
        self.grid_history = [0; HISTORY_LEN];
        self.history_count = 0;
    }

    /// Pushes the current buffer to `sink` without advancing.
    pub fn render<S>(&self, sink: &mut S)
    where
        S: DisplaySink + ?Sized,
    {
        for (y, row) in self.current().rows().iter().enumerate() {
            for (x, &state) in row.iter().enumerate() {
                sink.set_pixel(x, y, self.rules.lookup(state).color);
            }
        }
        sink.show();
    }

    pub fn clear_grid(&mut self) {
        self.buffers[self.current].clear();
        self.generation = 0;
        self.activity = 0;
        self.reset_history();
    }

    /// Replaces the current buffer, e.g. to start from a known pattern.
    /// Every cell must be a state of the active rule table.
    pub fn load_grid(&mut self, grid: Grid<W, H>) -> Result<()> {
        for (y, row) in grid.rows().iter().enumerate() {
            if let Some(x) = row.iter().position(|&state| state as usize >= self.rules.len()) {
                return Err(LifeError::UnknownState {
                    table: self.rules.name(),
                    x,
                    y,
                    state: row[x],
                });
            }
        }
        self.buffers[self.current] = grid;
        self.activity = self.current().live_count(&self.rules);
        self.reset_history();
        Ok(())
    }

    /// Flips a cell between dead and the seed state. Out-of-range
    /// coordinates are ignored.
    pub fn toggle_cell(&mut self, x: usize, y: usize) {
        if x >= W || y >= H {
            return;
        }
        let state = if self.rules.is_alive(self.current().get(x, y)) {
            DEAD
        } else {
            self.rules.seed_state()
        };
        self.buffers[self.current].set(x, y, state);
    }

    /// Stamps `shape` in the seed state, centred on the grid.
    pub fn stamp_centered(&mut self, shape: &'static Shape) -> Result<Placement> {
        shape.validate()?;
        if shape.width() > W || shape.height() > H {
            return Err(LifeError::ShapeTooLarge {
                name: shape.name,
                width: shape.width(),
                height: shape.height(),
            });
        }
        let x = (W - shape.width()) / 2;
        let y = (H - shape.height()) / 2;
        let state: StateIndex = self.rules.seed_state();
        self.buffers[self.current].stamp(shape, x, y, state);
        Ok(Placement { shape, x, y })
    }

    pub fn current(&self) -> &Grid<W, H> {
        &self.buffers[self.current]
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Activity reported by the most recent transition.
    pub fn activity(&self) -> usize {
        self.activity
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn reseed_count(&self) -> usize {
        self.reseed_count
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn library(&self) -> &ShapeLibrary {
        self.seeder.library()
    }

    pub fn seeder(&self) -> &Seeder {
        &self.seeder
    }

    pub fn live_count(&self) -> usize {
        self.current().live_count(&self.rules)
    }

    pub fn census(&self) -> Vec<usize> {
        self.current().census(&self.rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::NullSink;
    use crate::rules::{RulePreset, trails};
    use crate::shapes::{BLINKER, BLOCK, GLIDER, find};

    type Small = GameOfLife<40, 30>;

    fn seeded(seed: u64) -> LifeConfig {
        LifeConfig {
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn empty_start_reseeds_on_first_cycle() {
        let mut life = Small::new(&seeded(1)).unwrap();
        let report = life.step(&mut NullSink);

        assert_eq!(report.generation, 1);
        assert_eq!(report.activity, 0);
        let reseed = report.reseed.unwrap();
        assert_eq!(reseed.reason, ReseedReason::LowActivity);
        assert_eq!(reseed.placements.len(), 3);
        assert!(life.live_count() > 0);
    }

    #[test]
    fn busy_grid_is_left_alone() {
        let config = LifeConfig {
            activity_divisor: 1000,
            ..seeded(2)
        };
        let mut life = Small::new(&config).unwrap();
        assert_eq!(life.threshold(), 1);

        let mut grid = Grid::<40, 30>::new();
        grid.stamp(&BLOCK, 5, 5, trails::SURVIVED);
        life.load_grid(grid.clone()).unwrap();

        let report = life.step(&mut NullSink);
        assert!(report.reseed.is_none());
        assert_eq!(life.current(), &grid);
    }

    #[test]
    fn same_seed_same_history() {
        let mut a = Small::new(&seeded(42)).unwrap();
        let mut b = Small::new(&seeded(42)).unwrap();
        for _ in 0..50 {
            assert_eq!(a.step(&mut NullSink), b.step(&mut NullSink));
            assert_eq!(a.current(), b.current());
        }
    }

    #[test]
    fn repeating_grid_reseeds_when_enabled() {
        let config = LifeConfig {
            activity_divisor: 1000,
            reseed_on_cycle: true,
            ..seeded(3)
        };
        let mut life = Small::new(&config).unwrap();
        let mut grid = Grid::<40, 30>::new();
        grid.stamp(&BLOCK, 5, 5, trails::SURVIVED);
        life.load_grid(grid).unwrap();

        // First cycle records the block, the second sees it again.
        assert!(life.step(&mut NullSink).reseed.is_none());
        let reseed = life.step(&mut NullSink).reseed.unwrap();
        assert_eq!(reseed.reason, ReseedReason::Cycle);
    }

    #[test]
    fn oscillator_with_trails_is_detected() {
        let config = LifeConfig {
            activity_divisor: 1000,
            reseed_on_cycle: true,
            ..seeded(4)
        };
        let mut life = Small::new(&config).unwrap();
        let mut grid = Grid::<40, 30>::new();
        grid.stamp(&BLINKER, 10, 10, trails::SURVIVED);
        life.load_grid(grid).unwrap();

        let first_reseed = (0..HISTORY_LEN)
            .map(|_| life.step(&mut NullSink))
            .find_map(|report| report.reseed);
        assert_eq!(first_reseed.map(|r| r.reason), Some(ReseedReason::Cycle));
    }

    #[test]
    fn repeats_ignored_when_disabled() {
        let config = LifeConfig {
            activity_divisor: 1000,
            ..seeded(5)
        };
        let mut life = Small::new(&config).unwrap();
        let mut grid = Grid::<40, 30>::new();
        grid.stamp(&BLOCK, 5, 5, trails::SURVIVED);
        life.load_grid(grid).unwrap();

        for _ in 0..20 {
            assert!(life.step(&mut NullSink).reseed.is_none());
        }
    }

    #[test]
    fn grid_with_foreign_states_is_rejected() {
        let config = LifeConfig {
            rules: RulePreset::Classic,
            ..seeded(8)
        };
        let mut life = Small::new(&config).unwrap();
        let before = life.current().clone();

        let mut grid = Grid::<40, 30>::new();
        grid.set(5, 7, trails::TRAIL);
        let err = life.load_grid(grid).unwrap_err();

        assert!(matches!(
            err,
            LifeError::UnknownState {
                table: "classic",
                x: 5,
                y: 7,
                state: trails::TRAIL
            }
        ));
        assert_eq!(life.current(), &before);
        life.step(&mut NullSink);
    }

    #[test]
    fn toggle_and_clear() {
        let mut life = Small::new(&seeded(6)).unwrap();
        life.toggle_cell(3, 4);
        assert_eq!(life.current().get(3, 4), trails::SURVIVED);
        life.toggle_cell(3, 4);
        assert_eq!(life.current().get(3, 4), DEAD);
        life.toggle_cell(400, 4);

        life.reseed_now();
        life.step(&mut NullSink);
        life.clear_grid();
        assert_eq!(life.generation(), 0);
        assert_eq!(life.current(), &Grid::<40, 30>::new());
    }

    #[test]
    fn stamp_centered_places_shape_mid_grid() {
        let mut life = Small::new(&seeded(7)).unwrap();
        let placement = life.stamp_centered(&GLIDER).unwrap();
        assert_eq!((placement.x, placement.y), (18, 13));
        assert!(life.current().matches_shape(&GLIDER, 18, 13, trails::SURVIVED));
    }

    #[test]
    fn stamp_centered_rejects_oversized_shape() {
        static HUGE: Shape = Shape {
            name: "Huge",
            rows: &["#########################################"],
        };
        let mut life = Small::new(&seeded(8)).unwrap();
        assert!(matches!(
            life.stamp_centered(&HUGE),
            Err(LifeError::ShapeTooLarge { name: "Huge", .. })
        ));
    }

    #[test]
    fn classic_preset_seeds_alive_cells() {
        let config = LifeConfig {
            rules: RulePreset::Classic,
            ..seeded(9)
        };
        let mut life = Small::new(&config).unwrap();
        life.reseed_now();
        assert_eq!(life.census().len(), 2);
        assert!(life.live_count() > 0);
    }

    #[test]
    fn grid_too_small_for_inset_fails_fast() {
        let result = GameOfLife::<20, 64>::new(&seeded(10));
        assert!(matches!(result, Err(LifeError::GridTooSmall { .. })));
    }

    #[test]
    fn explicit_inset_too_small_fails_fast() {
        let config = LifeConfig {
            inset: Some(4),
            ..seeded(11)
        };
        assert!(matches!(
            Small::new(&config),
            Err(LifeError::InsetTooSmall { .. })
        ));
    }

    #[test]
    fn library_override_is_used() {
        let library = ShapeLibrary::new(&[find("diehard").unwrap()]);
        let mut life = Small::with_parts(
            &seeded(12),
            RuleTable::trails(),
            library,
            ChaCha8Rng::seed_from_u64(12),
        )
        .unwrap();
        let reseed = life.reseed_now();
        assert!(reseed.placements.iter().all(|p| p.shape.name == "Diehard"));
    }
}
