//! Embedded level maps.
//!
//! Legend: `#` solid tile, `P` player spawn, `F` flag column, `C` coin,
//! `E` enemy spawn, anything else air. Rows shorter than the widest row
//! are padded with air on the right.

use serde::{Deserialize, Serialize};

use super::types::{Vec2, ENEMY_HEIGHT, PLAYER_HEIGHT, TILE_SIZE};

pub const LEVEL_COUNT: usize = 2;

const LEVEL_ONE: &[&str] = &[
    "",
    "",
    "",
    "",
    "                          CCC",
    "                        ######",
    "        #####                                  CC",
    "                                              ####",
    "  P                      E         E              E    F",
    "################    ####################   ###############",
    "################    ####################   ###############",
    "",
];

const LEVEL_TWO: &[&str] = &[
    "",
    "",
    "",
    "                   CC",
    "                  ####",
    "            C             ###               C",
    "           ###                             ###",
    "",
    " P               E               E    E                E    CCC F",
    "##########     ##########     ############     ###################",
    "##########     ##########     ############     ###################",
    "",
];

const LEVEL_MAPS: [&[&str]; LEVEL_COUNT] = [LEVEL_ONE, LEVEL_TWO];

/// A parsed level: solid-tile matrix plus the entity positions read off
/// the map. Entities live in [`PlatformerGame`](super::PlatformerGame)
/// once play starts; the level keeps the pristine spawn lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub solids: Vec<Vec<bool>>,
    pub rows: usize,
    pub cols: usize,
    pub spawn: Vec2,
    /// Left edge of the flag column in canvas units.
    pub flag_x: f64,
    pub coin_spawns: Vec<Vec2>,
    pub enemy_spawns: Vec<Vec2>,
}

impl Level {
    pub fn load(index: usize) -> Self {
        let map = LEVEL_MAPS.get(index).copied().unwrap_or(LEVEL_ONE);
        Self::from_rows(map)
    }

    pub fn from_rows(map: &[&str]) -> Self {
        let rows = map.len();
        let cols = map.iter().map(|line| line.len()).max().unwrap_or(0);

        let mut level = Self {
            solids: vec![vec![false; cols]; rows],
            rows,
            cols,
            spawn: Vec2::new(TILE_SIZE, 0.0),
            flag_x: cols as f64 * TILE_SIZE,
            coin_spawns: Vec::new(),
            enemy_spawns: Vec::new(),
        };

        for (row, line) in map.iter().enumerate() {
            for (col, byte) in line.bytes().enumerate() {
                let x = col as f64 * TILE_SIZE;
                let y = row as f64 * TILE_SIZE;
                match byte {
                    b'#' => level.solids[row][col] = true,
                    b'P' => {
                        // Feet on the bottom edge of the marker cell
                        level.spawn = Vec2::new(x, y + TILE_SIZE - PLAYER_HEIGHT);
                    }
                    b'F' => level.flag_x = x,
                    b'C' => level.coin_spawns.push(Vec2::new(x, y)),
                    b'E' => {
                        level.enemy_spawns.push(Vec2::new(x, y + TILE_SIZE - ENEMY_HEIGHT));
                    }
                    _ => {}
                }
            }
        }

        level
    }

    pub fn pixel_width(&self) -> f64 {
        self.cols as f64 * TILE_SIZE
    }

    pub fn pixel_height(&self) -> f64 {
        self.rows as f64 * TILE_SIZE
    }

    /// Tile lookup by index. Everything outside the matrix is air.
    pub fn solid_at(&self, row: i32, col: i32) -> bool {
        if row < 0 || col < 0 {
            return false;
        }
        self.solids
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .copied()
            .unwrap_or(false)
    }

    /// Tile lookup by canvas point.
    pub fn solid_at_point(&self, x: f64, y: f64) -> bool {
        self.solid_at(
            (y / TILE_SIZE).floor() as i32,
            (x / TILE_SIZE).floor() as i32,
        )
    }
}
