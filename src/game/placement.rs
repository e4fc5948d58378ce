//! Unique random placement of special cells.

use std::collections::{BTreeSet, HashSet};

use crate::error::BoardError;
use crate::game::{GameRng, Position};

/// Random samples tried before switching to a pool of free cells.
const MAX_SAMPLE_ATTEMPTS: usize = 64;

/// Hands out distinct positions on a `width` x `height` grid.
///
/// Reserved cells are avoided for as long as any other free cell remains.
#[derive(Debug)]
pub(crate) struct Placement<'a> {
    width: u16,
    height: u16,
    /// Positions already handed out.
    taken: HashSet<Position>,
    /// In-bounds positions not yet taken that draws avoid while they can.
    reserved: BTreeSet<Position>,
    /// Free unreserved cells, built once sampling stops finding them.
    pool: Option<Vec<Position>>,
    rng: &'a mut GameRng,
}

impl<'a> Placement<'a> {
    pub(crate) fn new(width: u16, height: u16, rng: &'a mut GameRng) -> Self {
        Self {
            width,
            height,
            taken: HashSet::new(),
            reserved: BTreeSet::new(),
            pool: None,
            rng,
        }
    }

    fn area(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    fn is_available(&self, pos: Position) -> bool {
        self.in_bounds(pos) && !self.taken.contains(&pos) && !self.reserved.contains(&pos)
    }

    /// Keep later draws away from `pos` if possible.
    ///
    /// Out-of-bounds and already taken positions are ignored.
    pub(crate) fn reserve(&mut self, pos: Position) {
        if self.in_bounds(pos)
            && !self.taken.contains(&pos)
            && self.reserved.insert(pos)
            && let Some(pool) = &mut self.pool
        {
            pool.retain(|&p| p != pos);
        }
    }

    /// Draw a position nobody holds yet.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::GridExhausted`] if every cell is already taken.
    pub(crate) fn draw(&mut self) -> Result<Position, BoardError> {
        let free = self.area().saturating_sub(self.taken.len());
        if free == 0 {
            return Err(BoardError::GridExhausted);
        }

        let unreserved = free.saturating_sub(self.reserved.len());
        let pos = if unreserved > 0 {
            self.draw_unreserved()
        } else {
            self.draw_reserved()
        }
        .ok_or(BoardError::GridExhausted)?;

        self.taken.insert(pos);
        self.reserved.remove(&pos);
        Ok(pos)
    }

    fn draw_unreserved(&mut self) -> Option<Position> {
        if self.pool.is_none() {
            for _ in 0..MAX_SAMPLE_ATTEMPTS {
                let pos = Position::new(self.rng.below(self.width), self.rng.below(self.height));
                if self.is_available(pos) {
                    return Some(pos);
                }
            }

            // Crowded grid: collect the free cells once and draw from them from now on.
            let free: Vec<Position> = (0..self.height)
                .flat_map(|y| (0..self.width).map(move |x| Position::new(x, y)))
                .filter(|&pos| self.is_available(pos))
                .collect();
            self.pool = Some(free);
        }

        let pool = self.pool.as_mut()?;
        if pool.is_empty() {
            return None;
        }
        let nth = self.rng.index(pool.len());
        Some(pool.swap_remove(nth))
    }

    fn draw_reserved(&mut self) -> Option<Position> {
        let nth = self.rng.index(self.reserved.len());
        self.reserved.iter().nth(nth).copied()
    }
}
