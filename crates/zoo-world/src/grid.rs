//! 2D grid for the world.

use crate::animal::Animal;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use zoo_core::{square_offsets, Error, Position, Result, SpeciesId};

/// Random draws tried before falling back to a full scan for an empty cell
const MAX_RANDOM_PLACEMENT_ATTEMPTS: usize = 1024;

pub type Cell = Option<Animal>;

/// A bounded grid holding at most one animal per cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "grid must be at least 1x1");
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![None; size],
        }
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// Get the animal at a position; cells outside the grid read as empty
    pub fn get(&self, pos: Position) -> Cell {
        self.pos_to_index(pos).and_then(|index| self.cells[index])
    }

    /// Set a cell. Panics when `pos` is outside the grid.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        let index = self
            .pos_to_index(pos)
            .unwrap_or_else(|| panic!("position {} outside {}x{} grid", pos, self.width, self.height));
        self.cells[index] = cell;
    }

    /// Empty the cell and return what it held
    pub fn take(&mut self, pos: Position) -> Cell {
        self.pos_to_index(pos)
            .and_then(|index| self.cells[index].take())
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.in_bounds(pos) && self.get(pos).is_none()
    }

    pub fn clamp(&self, pos: Position) -> Position {
        pos.clamp(self.width, self.height)
    }

    /// Every cell holding the given species, in row-major order
    pub fn positions_of(&self, species: SpeciesId) -> Vec<Position> {
        self.iter()
            .filter(|(_, animal)| animal.species == species)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// In-bounds square neighborhood of `pos`, center excluded, `dy` outer and `dx` inner.
    ///
    /// The iterator does not borrow the grid, so cells may be changed while walking it.
    /// A radius wider than the grid covers the same cells as one equal to its larger side.
    pub fn neighbors(&self, pos: Position, radius: i32) -> impl Iterator<Item = Position> {
        let (width, height) = (self.width, self.height);
        square_offsets(radius.min(width.max(height)))
            .map(move |(dx, dy)| pos.add(dx, dy))
            .filter(move |p| (0..width).contains(&p.x) && (0..height).contains(&p.y))
    }

    /// Pick a uniformly random empty cell.
    ///
    /// Rejection sampling first; if that keeps hitting occupied cells the choice is
    /// made among all empty cells. Fails only when the grid is full.
    pub fn random_empty_cell(&self, rng: &mut ChaCha8Rng) -> Result<Position> {
        for _ in 0..MAX_RANDOM_PLACEMENT_ATTEMPTS {
            let pos = Position::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height));
            if self.get(pos).is_none() {
                return Ok(pos);
            }
        }

        self.empty_cells()
            .choose(rng)
            .copied()
            .ok_or_else(|| {
                Error::ResourceExhausted(format!(
                    "no empty cell left in {}x{} grid",
                    self.width, self.height
                ))
            })
    }

    pub fn empty_cells(&self) -> Vec<Position> {
        self.positions()
            .filter(|&pos| self.get(pos).is_none())
            .collect()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    fn pos_to_index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| (pos.y * self.width + pos.x) as usize)
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let x = (index as i32) % self.width;
        let y = (index as i32) / self.width;
        Position::new(x, y)
    }

    /// Iterator over all positions, row-major
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(move |i| self.index_to_pos(i))
    }

    /// Iterator over all occupied cells with positions, row-major
    pub fn iter(&self) -> impl Iterator<Item = (Position, Animal)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.map(|animal| (self.index_to_pos(i), animal)))
    }
}
