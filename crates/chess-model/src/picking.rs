//! Pointer picking on the board plane.
//!
//! Converts a pointing ray into board coordinates by intersecting it with
//! the z = 0 plane the board surface lies on. Squares are unit cells
//! centered on integer coordinates, so the cell under a plane point is
//! `ceil(coord - 0.5)` along each axis.

use crate::Square;

/// Returns the square a ray points at, or `None` when the ray misses the
/// board or runs parallel to it.
pub fn ray_to_square(origin: [f32; 3], direction: [f32; 3]) -> Option<Square> {
    if direction[2] == 0.0 {
        return None;
    }
    let t = (origin[2] / direction[2]).abs();
    let x = origin[0] + direction[0] * t;
    let y = origin[1] + direction[1] * t;
    let file = (x - 0.5).ceil() as i16;
    let rank = (y - 0.5).ceil() as i16;
    Square::from_signed(file, rank)
}
