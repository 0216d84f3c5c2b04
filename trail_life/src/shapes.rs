// shapes.rs - Seed shapes and the weighted selection list
//
// Masks are written one string per row, `#` for a live cell and `.` for an
// empty one. The selection list weights shapes by repetition.

use crate::error::{LifeError, Result};

#[derive(Debug, PartialEq, Eq)]
pub struct Shape {
    pub name: &'static str,
    pub rows: &'static [&'static str],
}

impl Shape {
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Largest of width and height.
    pub fn extent(&self) -> usize {
        self.width().max(self.height())
    }

    /// `x < width` and `y < height` are required.
    #[inline]
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.rows[y].as_bytes()[x] == b'#'
    }

    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'#')
                .map(move |(x, _)| (x, y))
        })
    }

    pub fn population(&self) -> usize {
        self.live_cells().count()
    }

    pub fn validate(&self) -> Result<()> {
        let malformed = |reason: String| LifeError::MalformedShape {
            name: self.name,
            reason,
        };

        let width = self.width();
        if width == 0 {
            return Err(malformed("mask is empty".to_string()));
        }
        for (y, row) in self.rows.iter().enumerate() {
            if row.len() != width {
                return Err(malformed(format!(
                    "row {y} is {} wide, expected {width}",
                    row.len()
                )));
            }
            if let Some(bad) = row.chars().find(|&c| c != '#' && c != '.') {
                return Err(malformed(format!("row {y} contains {bad:?}")));
            }
        }
        if self.population() == 0 {
            return Err(malformed("mask has no live cells".to_string()));
        }
        Ok(())
    }
}

pub const GLIDER: Shape = Shape {
    name: "Glider",
    rows: &[
        ".#.",
        "..#",
        "###",
    ],
};

pub const LIGHTWEIGHT_SPACESHIP: Shape = Shape {
    name: "Lightweight spaceship",
    rows: &[
        ".#..#",
        "#....",
        "#...#",
        "####.",
    ],
};

pub const R_PENTOMINO: Shape = Shape {
    name: "R-pentomino",
    rows: &[
        ".##",
        "##.",
        ".#.",
    ],
};

pub const DIEHARD: Shape = Shape {
    name: "Diehard",
    rows: &[
        "......#.",
        "##......",
        ".#...###",
    ],
};

pub const ACORN: Shape = Shape {
    name: "Acorn",
    rows: &[
        ".#.....",
        "...#...",
        "##..###",
    ],
};

pub const BLINKER: Shape = Shape {
    name: "Blinker",
    rows: &["###"],
};

pub const BLOCK: Shape = Shape {
    name: "Block",
    rows: &[
        "##",
        "##",
    ],
};

/// Every shape the crate knows about, for pickers and name lookup.
pub const SHAPES: &[&Shape] = &[
    &GLIDER,
    &LIGHTWEIGHT_SPACESHIP,
    &R_PENTOMINO,
    &DIEHARD,
    &ACORN,
    &BLINKER,
    &BLOCK,
];

/// Reference spawn weights. Methuselahs and spaceships dominate; still
/// lifes would only add to the inert population.
pub const REFERENCE_SELECTION: &[&Shape] = &[
    &GLIDER,
    &GLIDER,
    &GLIDER,
    &LIGHTWEIGHT_SPACESHIP,
    &LIGHTWEIGHT_SPACESHIP,
    &R_PENTOMINO,
    &R_PENTOMINO,
    &DIEHARD,
    &ACORN,
    &ACORN,
    &BLINKER,
];

pub fn find(name: &str) -> Option<&'static Shape> {
    SHAPES
        .iter()
        .copied()
        .find(|shape| shape.name.eq_ignore_ascii_case(name))
}

#[derive(Debug, Clone)]
pub struct ShapeLibrary {
    selection: Vec<&'static Shape>,
}

impl ShapeLibrary {
    pub fn new(selection: &[&'static Shape]) -> Self {
        Self {
            selection: selection.to_vec(),
        }
    }

    pub fn reference() -> Self {
        Self::new(REFERENCE_SELECTION)
    }

    /// Expands explicit weights into the repetition list.
    pub fn from_weights(weights: &[(&'static Shape, usize)]) -> Self {
        let selection = weights
            .iter()
            .flat_map(|&(shape, weight)| std::iter::repeat(shape).take(weight))
            .collect();
        Self { selection }
    }

    pub fn count(&self) -> usize {
        self.selection.len()
    }

    /// `index` must be drawn uniformly from `0..count()`.
    pub fn pick(&self, index: usize) -> &'static Shape {
        self.selection[index]
    }

    pub fn max_extent(&self) -> usize {
        self.selection
            .iter()
            .map(|shape| shape.extent())
            .max()
            .unwrap_or(0)
    }

    pub fn validate(&self) -> Result<()> {
        if self.selection.is_empty() {
            return Err(LifeError::EmptyShapeLibrary);
        }
        self.selection.iter().try_for_each(|shape| shape.validate())
    }
}

impl Default for ShapeLibrary {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_well_formed() {
        for shape in SHAPES {
            shape.validate().unwrap();
        }
        ShapeLibrary::reference().validate().unwrap();
    }

    #[test]
    fn glider_mask() {
        assert_eq!((GLIDER.width(), GLIDER.height()), (3, 3));
        assert!(GLIDER.is_alive(1, 0));
        assert!(!GLIDER.is_alive(0, 0));
        let cells: Vec<_> = GLIDER.live_cells().collect();
        assert_eq!(cells, vec![(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]);
    }

    #[test]
    fn diehard_dimensions() {
        assert_eq!((DIEHARD.width(), DIEHARD.height()), (8, 3));
        assert_eq!(DIEHARD.population(), 7);
    }

    #[test]
    fn weights_expand_by_repetition() {
        let library = ShapeLibrary::from_weights(&[(&GLIDER, 3), (&BLOCK, 1), (&ACORN, 0)]);
        assert_eq!(library.count(), 4);
        assert_eq!(library.pick(2).name, "Glider");
        assert_eq!(library.pick(3).name, "Block");
        assert_eq!(library.max_extent(), 3);
    }

    #[test]
    fn reference_extent_fits_default_inset() {
        assert_eq!(ShapeLibrary::reference().max_extent(), 8);
    }

    #[test]
    fn find_ignores_case() {
        assert_eq!(find("diehard"), Some(&DIEHARD));
        assert!(find("gosper gun").is_none());
    }

    #[test]
    fn rejects_ragged_mask() {
        let ragged = Shape {
            name: "Ragged",
            rows: &["##", "#"],
        };
        assert!(matches!(
            ragged.validate(),
            Err(LifeError::MalformedShape { name: "Ragged", .. })
        ));
    }

    #[test]
    fn rejects_empty_mask_and_library() {
        let blank = Shape {
            name: "Blank",
            rows: &["..", ".."],
        };
        assert!(blank.validate().is_err());
        assert!(matches!(
            ShapeLibrary::new(&[]).validate(),
            Err(LifeError::EmptyShapeLibrary)
        ));
    }
}
