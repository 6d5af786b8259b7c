use crate::grid::Position;

/// Finalized shortest-path costs, one optional entry per cell.
///
/// `None` means the cell was never finalized by the search that produced the
/// field. A cost of exactly `0.0` is a real value (the start cell).
#[derive(Debug, Clone, PartialEq)]
pub struct CostField {
    width: usize,
    height: usize,
    costs: Vec<Option<f64>>,
}

impl CostField {
    pub fn new(width: usize, height: usize) -> Self {
        CostField {
            width,
            height,
            costs: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if pos.x < self.width && pos.y < self.height {
            Some(pos.y * self.width + pos.x)
        } else {
            None
        }
    }

    /// Finalized cost of `pos`, or `None` if unset or outside the field.
    pub fn get(&self, pos: Position) -> Option<f64> {
        self.index(pos).and_then(|i| self.costs[i])
    }

    pub fn is_finalized(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    pub(crate) fn finalize(&mut self, pos: Position, cost: f64) {
        let i = pos.y * self.width + pos.x;
        debug_assert!(self.costs[i].is_none(), "cell {pos} finalized twice");
        self.costs[i] = Some(cost);
    }

    pub fn finalized_count(&self) -> usize {
        self.costs.iter().filter(|c| c.is_some()).count()
    }

    pub fn max_cost(&self) -> Option<f64> {
        self.costs.iter().flatten().copied().reduce(f64::max)
    }

    /// Iterates row by row over every cell and its optional cost.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Option<f64>)> + '_ {
        self.costs.iter().enumerate().map(move |(i, &cost)| {
            (
                Position {
                    x: i % self.width,
                    y: i / self.width,
                },
                cost,
            )
        })
    }
}
