//! Marching squares case table.
//!
//! A square's configuration has one bit per wall corner: top-left 8,
//! top-right 4, bottom-right 2, bottom-left 1. Each entry lists the polygon
//! points for that case in winding order; the polygon is emitted as a fan
//! from its first point.

use crate::error::{CaveError, Result};

/// One of the eight points a square can contribute to its polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
    CentreTop,
    CentreRight,
    CentreBottom,
    CentreLeft,
}

use Slot::*;

pub const CASES: [&[Slot]; 16] = [
    // 0: open floor
    &[],
    // single corner
    &[CentreLeft, CentreBottom, BottomLeft],
    &[BottomRight, CentreBottom, CentreRight],
    // 3
    &[CentreRight, BottomRight, BottomLeft, CentreLeft],
    &[TopRight, CentreRight, CentreTop],
    // 5: diagonal, both corners joined by a hexagon
    &[CentreTop, TopRight, CentreRight, CentreBottom, BottomLeft, CentreLeft],
    &[CentreTop, TopRight, BottomRight, CentreBottom],
    &[CentreTop, TopRight, BottomRight, BottomLeft, CentreLeft],
    &[TopLeft, CentreTop, CentreLeft],
    &[TopLeft, CentreTop, CentreBottom, BottomLeft],
    // 10: the other diagonal
    &[TopLeft, CentreTop, CentreRight, BottomRight, CentreBottom, CentreLeft],
    &[TopLeft, CentreTop, CentreRight, BottomRight, BottomLeft],
    &[TopLeft, TopRight, CentreRight, CentreLeft],
    &[TopLeft, TopRight, CentreRight, CentreBottom, BottomLeft],
    &[TopLeft, TopRight, BottomRight, CentreBottom, CentreLeft],
    // 15: solid wall
    &[TopLeft, TopRight, BottomRight, BottomLeft],
];

/// Configuration of a fully solid square.
pub const SOLID: u8 = 15;

/// Polygon points for a configuration.
pub fn case_points(configuration: u8) -> Result<&'static [Slot]> {
    CASES
        .get(configuration as usize)
        .copied()
        .ok_or(CaveError::InvalidConfiguration(configuration))
}

/// Build a configuration from corner states in clockwise order from top-left.
pub fn configuration(top_left: bool, top_right: bool, bottom_right: bool, bottom_left: bool) -> u8 {
    (top_left as u8) << 3 | (top_right as u8) << 2 | (bottom_right as u8) << 1 | bottom_left as u8
}
