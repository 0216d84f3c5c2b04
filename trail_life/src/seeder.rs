// seeder.rs - Stamps random shapes into a grid to restore activity

use rand::Rng;

use crate::error::{LifeError, Result};
use crate::grid::Grid;
use crate::rules::StateIndex;
use crate::shapes::{Shape, ShapeLibrary};

/// Margin kept free on every side unless the library needs more.
pub const DEFAULT_INSET: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub shape: &'static Shape,
    pub x: usize,
    pub y: usize,
}

/// Owns the library it draws from, so every shape it can place has been
/// checked against its inset.
#[derive(Debug, Clone)]
pub struct Seeder {
    library: ShapeLibrary,
    inset: usize,
}

impl Seeder {
    /// Derives the inset from the library, or checks an explicit one
    /// against the library's largest shape.
    pub fn for_library(library: ShapeLibrary, inset: Option<usize>) -> Result<Self> {
        let needed = library.max_extent();
        let inset = match inset {
            None => DEFAULT_INSET.max(needed),
            Some(inset) => {
                if let Some(shape) = (0..library.count())
                    .map(|i| library.pick(i))
                    .find(|shape| shape.extent() > inset)
                {
                    return Err(LifeError::InsetTooSmall {
                        name: shape.name,
                        extent: shape.extent(),
                        inset,
                    });
                }
                inset
            }
        };
        Ok(Self { library, inset })
    }

    pub fn inset(&self) -> usize {
        self.inset
    }

    pub fn library(&self) -> &ShapeLibrary {
        &self.library
    }

    /// The placement window `inset..W - inset` must be non-empty on both axes.
    pub fn check_grid<const W: usize, const H: usize>(&self) -> Result<()> {
        if W <= 2 * self.inset || H <= 2 * self.inset {
            return Err(LifeError::GridTooSmall {
                width: W,
                height: H,
                inset: self.inset,
            });
        }
        Ok(())
    }

    /// Overlays `count` shapes, each drawn uniformly from the selection list
    /// and placed at a uniform origin inside the inset window. Overlapping
    /// shapes simply overwrite each other.
    pub fn seed<const W: usize, const H: usize, R>(
        &self,
        grid: &mut Grid<W, H>,
        state: StateIndex,
        count: usize,
        rng: &mut R,
    ) -> Vec<Placement>
    where
        R: Rng + ?Sized,
    {
        let mut placements = Vec::with_capacity(count);
        for _ in 0..count {
            let x = rng.gen_range(self.inset..W - self.inset);
            let y = rng.gen_range(self.inset..H - self.inset);
            let shape = self.library.pick(rng.gen_range(0..self.library.count()));

            grid.stamp(shape, x, y, state);
            placements.push(Placement { shape, x, y });
        }
        placements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{RuleTable, trails};
    use crate::shapes::{ACORN, BLOCK, DIEHARD, GLIDER};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn inset_defaults_to_ten() {
        let seeder = Seeder::for_library(ShapeLibrary::reference(), None).unwrap();
        assert_eq!(seeder.inset(), DEFAULT_INSET);
    }

    #[test]
    fn inset_grows_with_library() {
        static WIDE: Shape = Shape {
            name: "Wide",
            rows: &["############"],
        };
        let library = ShapeLibrary::new(&[&WIDE, &GLIDER]);
        let seeder = Seeder::for_library(library, None).unwrap();
        assert_eq!(seeder.inset(), 12);
    }

    #[test]
    fn explicit_inset_must_cover_largest_shape() {
        let library = ShapeLibrary::new(&[&GLIDER, &DIEHARD]);
        let err = Seeder::for_library(library.clone(), Some(5)).unwrap_err();
        assert!(matches!(
            err,
            LifeError::InsetTooSmall {
                name: "Diehard",
                extent: 8,
                inset: 5
            }
        ));
        assert_eq!(Seeder::for_library(library, Some(8)).unwrap().inset(), 8);
    }

    #[test]
    fn grid_must_exceed_twice_the_inset() {
        let seeder = Seeder::for_library(ShapeLibrary::reference(), None).unwrap();
        assert!(seeder.check_grid::<21, 21>().is_ok());
        assert!(matches!(
            seeder.check_grid::<20, 64>(),
            Err(LifeError::GridTooSmall { width: 20, .. })
        ));
    }

    #[test]
    fn placements_stay_inside_window() {
        let library = ShapeLibrary::reference();
        let seeder = Seeder::for_library(library, None).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut grid = Grid::<40, 30>::new();

        let placements = seeder.seed(&mut grid, trails::SURVIVED, 200, &mut rng);

        assert_eq!(placements.len(), 200);
        for p in &placements {
            assert!((10..30).contains(&p.x));
            assert!((10..20).contains(&p.y));
            assert!(p.x + p.shape.width() < 40);
            assert!(p.y + p.shape.height() < 30);
        }
    }

    #[test]
    fn single_seed_matches_mask() {
        let library = ShapeLibrary::new(&[&ACORN]);
        let seeder = Seeder::for_library(library, None).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut grid = Grid::<32, 32>::new();

        let placements = seeder.seed(&mut grid, trails::SURVIVED, 1, &mut rng);

        let p = placements[0];
        assert!(grid.matches_shape(&ACORN, p.x, p.y, trails::SURVIVED));
        assert_eq!(grid.live_count(&RuleTable::trails()), ACORN.population());
    }

    #[test]
    fn zero_count_leaves_grid_untouched() {
        let library = ShapeLibrary::new(&[&BLOCK]);
        let seeder = Seeder::for_library(library, None).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut grid = Grid::<32, 32>::new();

        assert!(seeder.seed(&mut grid, trails::SURVIVED, 0, &mut rng).is_empty());
        assert_eq!(grid, Grid::<32, 32>::new());
    }

    #[test]
    fn placements_come_from_checked_library() {
        let library = ShapeLibrary::new(&[&GLIDER, &BLOCK]);
        let seeder = Seeder::for_library(library, Some(3)).unwrap();
        assert_eq!(seeder.library().max_extent(), 3);
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let mut grid = Grid::<16, 16>::new();

        for p in seeder.seed(&mut grid, trails::SURVIVED, 50, &mut rng) {
            assert!(p.shape.extent() <= seeder.inset());
            assert!(p.shape == &GLIDER || p.shape == &BLOCK);
        }
    }
}
