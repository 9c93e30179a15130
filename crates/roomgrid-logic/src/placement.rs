//! Placement policy: decides whether a candidate cell becomes a room.
//!
//! Rules, checked in order and short-circuiting:
//! 1. Candidate is inside the grid
//! 2. Candidate is empty
//! 3. The room budget is not exhausted
//! 4. A uniform draw is at least [`SKIP_CHANCE`] (the seed is exempt)
//! 5. At most one 4-neighbour is already occupied
//!
//! Rule 5 is what keeps the layout a tree: a new room can touch at most one
//! existing room when it is created, so no acceptance can close a cycle.
//! The draw in rule 4 is only consumed once rules 1–3 have passed.

use crate::grid::{GridCoord, OccupancyGrid};
use crate::random::RandomSource;
use crate::state::GenerationState;

/// Probability that an otherwise valid candidate is skipped.
pub const SKIP_CHANCE: f32 = 0.3;

/// Most occupied neighbours a candidate may have.
pub const MAX_OCCUPIED_NEIGHBORS: usize = 1;

/// Why a candidate was turned down. Rejection is normal control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    OutOfBounds,
    Occupied,
    BudgetExhausted,
    Skipped,
    TooManyNeighbors,
}

/// Evaluate the placement rules for `coord`, reporting the first rule that
/// fails.
pub fn evaluate(
    coord: GridCoord,
    grid: &OccupancyGrid,
    state: &GenerationState,
    seed: GridCoord,
    rng: &mut impl RandomSource,
) -> Result<(), Rejection> {
    if !grid.contains(coord) {
        return Err(Rejection::OutOfBounds);
    }
    if grid.is_occupied(coord) {
        return Err(Rejection::Occupied);
    }
    if !state.has_capacity() {
        return Err(Rejection::BudgetExhausted);
    }
    if should_skip(coord, seed, rng) {
        return Err(Rejection::Skipped);
    }
    if grid.occupied_neighbor_count(coord) > MAX_OCCUPIED_NEIGHBORS {
        return Err(Rejection::TooManyNeighbors);
    }
    Ok(())
}

/// True if `coord` passes every placement rule.
pub fn accept(
    coord: GridCoord,
    grid: &OccupancyGrid,
    state: &GenerationState,
    seed: GridCoord,
    rng: &mut impl RandomSource,
) -> bool {
    evaluate(coord, grid, state, seed, rng).is_ok()
}

fn should_skip(coord: GridCoord, seed: GridCoord, rng: &mut impl RandomSource) -> bool {
    if coord == seed {
        return false;
    }
    rng.next_unit() < SKIP_CHANCE
}
