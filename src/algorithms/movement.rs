use crate::error::{Error, Result};
use std::f64::consts::SQRT_2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Movement {
    pub dx: i32,
    pub dy: i32,
    pub cost: f64,
}

/// Ordered set of legal single-step moves.
///
/// The order matters: neighbors are generated in table order, which decides
/// which of several equal-cost paths is reported.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementTable {
    moves: Vec<Movement>,
    octile: bool,
}

impl MovementTable {
    /// Validates and wraps a custom table. Costs must be finite and
    /// non-negative and no move may stay in place.
    pub fn new(moves: Vec<Movement>) -> Result<Self> {
        for m in &moves {
            if !m.cost.is_finite() || m.cost < 0.0 || (m.dx == 0 && m.dy == 0) {
                return Err(Error::InvalidMovement {
                    dx: m.dx,
                    dy: m.dy,
                    cost: m.cost,
                });
            }
        }
        Ok(MovementTable {
            moves,
            octile: false,
        })
    }

    /// The four axis-aligned moves at cost 1.
    pub fn four_connected() -> Self {
        MovementTable {
            moves: AXIS_MOVES.to_vec(),
            octile: true,
        }
    }

    /// Axis-aligned moves at cost 1 followed by diagonals at cost sqrt(2).
    pub fn eight_connected() -> Self {
        let mut moves = AXIS_MOVES.to_vec();
        moves.extend_from_slice(&DIAGONAL_MOVES);
        MovementTable {
            moves,
            octile: true,
        }
    }

    pub fn moves(&self) -> &[Movement] {
        &self.moves
    }

    /// True for the built-in tables, whose costs match the octile distance.
    pub fn is_octile(&self) -> bool {
        self.octile
    }

    pub fn has_diagonals(&self) -> bool {
        self.moves.iter().any(|m| m.dx != 0 && m.dy != 0)
    }

    /// Cost of the move with offset `(dx, dy)`, if the table has one.
    pub fn step_cost(&self, dx: i32, dy: i32) -> Option<f64> {
        self.moves
            .iter()
            .find(|m| m.dx == dx && m.dy == dy)
            .map(|m| m.cost)
    }
}

impl Default for MovementTable {
    fn default() -> Self {
        MovementTable::eight_connected()
    }
}

const AXIS_MOVES: [Movement; 4] = [
    Movement { dx: 1, dy: 0, cost: 1.0 },
    Movement { dx: 0, dy: 1, cost: 1.0 },
    Movement { dx: -1, dy: 0, cost: 1.0 },
    Movement { dx: 0, dy: -1, cost: 1.0 },
];

const DIAGONAL_MOVES: [Movement; 4] = [
    Movement { dx: 1, dy: 1, cost: SQRT_2 },
    Movement { dx: -1, dy: 1, cost: SQRT_2 },
    Movement { dx: -1, dy: -1, cost: SQRT_2 },
    Movement { dx: 1, dy: -1, cost: SQRT_2 },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_tables() {
        let eight = MovementTable::eight_connected();
        assert_eq!(eight.moves().len(), 8);
        assert!(eight.has_diagonals());
        assert_eq!(eight.step_cost(1, -1), Some(SQRT_2));
        assert_eq!(eight.step_cost(0, 1), Some(1.0));
        assert_eq!(eight.step_cost(2, 0), None);

        let four = MovementTable::four_connected();
        assert_eq!(four.moves().len(), 4);
        assert!(!four.has_diagonals());
    }

    #[test]
    fn test_rejects_negative_cost() {
        let result = MovementTable::new(vec![Movement { dx: 1, dy: 0, cost: -0.5 }]);
        assert!(matches!(result, Err(Error::InvalidMovement { dx: 1, dy: 0, .. })));
    }

    #[test]
    fn test_rejects_nan_and_stationary_moves() {
        assert!(MovementTable::new(vec![Movement { dx: 0, dy: 1, cost: f64::NAN }]).is_err());
        assert!(MovementTable::new(vec![Movement { dx: 0, dy: 0, cost: 1.0 }]).is_err());
    }

    #[test]
    fn test_custom_table_accepts_zero_cost() {
        let table = MovementTable::new(vec![
            Movement { dx: 1, dy: 0, cost: 0.0 },
            Movement { dx: 2, dy: 1, cost: 2.5 },
        ])
        .unwrap();
        assert!(!table.is_octile());
        assert_eq!(table.step_cost(2, 1), Some(2.5));
    }
}
