//! Reach rule applied by interactive editors before calling into the grid.

/// Whether an actor standing at `actor` may edit the cell at `target`.
///
/// The target must lie within `range` of the actor, measured between the actor
/// position and the cell origin, and must not be the cell the actor occupies
/// (distance strictly greater than one).
pub fn within_reach(actor: (f32, f32), target: (i32, i32), range: f32) -> bool {
    let dx = target.0 as f32 - actor.0;
    let dy = target.1 as f32 - actor.1;
    let dist = (dx * dx + dy * dy).sqrt();
    dist <= range && dist > 1.0
}
