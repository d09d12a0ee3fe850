//! Coin cluster layouts
//!
//! Each pattern is a small boolean grid; every set cell becomes one coin.

use glam::Vec2;
use rand::Rng;

/// Spacing between coins in a cluster (world units)
pub const COIN_GRID: f32 = 21.0;

/// A fixed coin layout, row 0 at the top
#[derive(Debug, Clone, Copy)]
pub struct CoinPattern {
    pub name: &'static str,
    pub rows: usize,
    pub cols: usize,
    cells: &'static [&'static [u8]],
}

impl CoinPattern {
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> bool {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .is_some_and(|&c| c != 0)
    }

    pub fn coin_count(&self) -> usize {
        self.cells
            .iter()
            .map(|r| r.iter().filter(|&&c| c != 0).count())
            .sum()
    }

    /// Width of the placed cluster in world units
    pub fn width(&self) -> f32 {
        self.cols as f32 * COIN_GRID
    }

    /// Height of the placed cluster in world units
    pub fn height(&self) -> f32 {
        self.rows as f32 * COIN_GRID
    }

    /// Offsets of every coin from the pattern's bottom-left corner
    pub fn offsets(&self) -> impl Iterator<Item = Vec2> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).filter_map(move |col| {
                self.cell(row, col).then(|| {
                    Vec2::new(
                        col as f32 * COIN_GRID,
                        (self.rows - 1 - row) as f32 * COIN_GRID,
                    )
                })
            })
        })
    }
}

const BAR: &[&[u8]] = &[
    &[1, 1, 1, 1, 1, 1],
    &[1, 1, 1, 1, 1, 1],
    &[1, 1, 1, 1, 1, 1],
    &[1, 1, 1, 1, 1, 1],
];

const ARROW: &[&[u8]] = &[
    &[0, 0, 0, 1, 0, 0, 0],
    &[0, 0, 0, 1, 1, 0, 0],
    &[1, 1, 1, 1, 1, 1, 0],
    &[1, 1, 1, 1, 1, 1, 1],
    &[1, 1, 1, 1, 1, 1, 0],
    &[0, 0, 0, 1, 1, 0, 0],
];

const DIAMOND: &[&[u8]] = &[
    &[0, 0, 0, 1, 0, 0, 0],
    &[0, 0, 1, 1, 1, 0, 0],
    &[0, 1, 1, 1, 1, 1, 0],
    &[1, 1, 1, 1, 1, 1, 1],
    &[0, 1, 1, 1, 1, 1, 0],
    &[0, 0, 1, 1, 1, 0, 0],
    &[0, 0, 0, 1, 0, 0, 0],
];

const CROSS: &[&[u8]] = &[
    &[1, 0, 0, 0, 0, 0, 1],
    &[0, 1, 0, 0, 0, 1, 0],
    &[0, 0, 1, 0, 1, 0, 0],
    &[0, 0, 0, 1, 0, 0, 0],
    &[0, 0, 1, 0, 1, 0, 0],
    &[0, 1, 0, 0, 0, 1, 0],
    &[1, 0, 0, 0, 0, 0, 1],
];

/// The full pattern library
pub const PATTERNS: [CoinPattern; 4] = [
    CoinPattern {
        name: "bar",
        rows: 4,
        cols: 6,
        cells: BAR,
    },
    CoinPattern {
        name: "arrow",
        rows: 6,
        cols: 7,
        cells: ARROW,
    },
    CoinPattern {
        name: "diamond",
        rows: 7,
        cols: 7,
        cells: DIAMOND,
    },
    CoinPattern {
        name: "cross",
        rows: 7,
        cols: 7,
        cells: CROSS,
    },
];

/// Pick a pattern index uniformly
pub fn choose_index<R: Rng + ?Sized>(rng: &mut R) -> usize {
    rng.random_range(0..PATTERNS.len())
}

/// Pick a pattern uniformly
pub fn choose_pattern<R: Rng + ?Sized>(rng: &mut R) -> &'static CoinPattern {
    &PATTERNS[choose_index(rng)]
}
