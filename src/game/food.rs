use rand::Rng;
use tracing::debug;

use super::state::Position;

/// Rejection-samples food positions on a fixed grid
///
/// Uniform draws are retried while they land on the snake. After
/// `max_attempts` misses the spawner enumerates the free cells instead, so a
/// nearly full board still terminates. A completely full board yields `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodSpawner {
    width: usize,
    height: usize,
    max_attempts: usize,
}

impl FoodSpawner {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            max_attempts: width.saturating_mul(height).saturating_mul(4),
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Pick a cell in `[0, width) x [0, height)` that is not in `occupied`
    pub fn spawn<R: Rng>(&self, rng: &mut R, occupied: &[Position]) -> Option<Position> {
        if self.width == 0 || self.height == 0 {
            return None;
        }

        for _ in 0..self.max_attempts {
            let x = rng.gen_range(0..self.width) as i32;
            let y = rng.gen_range(0..self.height) as i32;
            let pos = Position::new(x, y);

            if !occupied.contains(&pos) {
                return Some(pos);
            }
        }

        debug!(
            attempts = self.max_attempts,
            "rejection sampling exhausted, scanning free cells"
        );
        self.spawn_from_free_cells(rng, occupied)
    }

    fn spawn_from_free_cells<R: Rng>(
        &self,
        rng: &mut R,
        occupied: &[Position],
    ) -> Option<Position> {
        let free: Vec<Position> = (0..self.height as i32)
            .flat_map(|y| (0..self.width as i32).map(move |x| Position::new(x, y)))
            .filter(|pos| !occupied.contains(pos))
            .collect();

        if free.is_empty() {
            return None;
        }
        Some(free[rng.gen_range(0..free.len())])
    }
}
