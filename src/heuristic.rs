use grid_util::point::Point;

/// Estimate of the remaining cost between two cells, in units of [STEP_COST](crate::STEP_COST).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Heuristic {
    /// `dr² + dc²`. Cheap and order-preserving with respect to Euclidean distance, but it
    /// overestimates the step count for far away goals so paths may be longer than optimal.
    SquaredEuclidean,
    /// `max(|dr|, |dc|)`, the exact step count on an empty 8-connected grid with uniform move
    /// cost. Never overestimates, so returned paths are optimal.
    #[default]
    Chebyshev,
    /// Always zero, which turns the search into Dijkstra's algorithm.
    Zero,
}

impl Heuristic {
    /// Squared distances too large for an [i32] saturate to [i32::MAX].
    pub fn estimate(&self, a: &Point, b: &Point) -> i32 {
        match self {
            Heuristic::SquaredEuclidean => {
                let dr = i64::from(a.x) - i64::from(b.x);
                let dc = i64::from(a.y) - i64::from(b.y);
                let squared = (dr * dr).saturating_add(dc * dc);
                i32::try_from(squared).unwrap_or(i32::MAX)
            }
            Heuristic::Chebyshev => a.move_distance(b),
            Heuristic::Zero => 0,
        }
    }

    /// Whether paths found with this heuristic are guaranteed to be shortest.
    pub fn admissible(&self) -> bool {
        !matches!(self, Heuristic::SquaredEuclidean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimates() {
        let a = Point::new(0, 0);
        let b = Point::new(7, 6);
        assert_eq!(Heuristic::SquaredEuclidean.estimate(&a, &b), 85);
        assert_eq!(Heuristic::Chebyshev.estimate(&a, &b), 7);
        assert_eq!(Heuristic::Chebyshev.estimate(&b, &a), 7);
        assert_eq!(Heuristic::Zero.estimate(&a, &b), 0);
        assert_eq!(Heuristic::SquaredEuclidean.estimate(&b, &b), 0);
    }

    /// Straight-line distance of 10 steps is estimated as 100 by the squared form.
    #[test]
    fn squared_form_overestimates() {
        let a = Point::new(0, 0);
        let b = Point::new(0, 10);
        assert_eq!(Heuristic::SquaredEuclidean.estimate(&a, &b), 100);
        assert!(!Heuristic::SquaredEuclidean.admissible());
        assert!(Heuristic::default().admissible());
    }

    #[test]
    fn squared_form_saturates() {
        let a = Point::new(0, 0);
        assert_eq!(
            Heuristic::SquaredEuclidean.estimate(&a, &Point::new(0, 46340)),
            46340 * 46340
        );
        assert_eq!(
            Heuristic::SquaredEuclidean.estimate(&a, &Point::new(0, 46341)),
            i32::MAX
        );
        assert_eq!(
            Heuristic::SquaredEuclidean.estimate(&a, &Point::new(i32::MAX, i32::MIN + 1)),
            i32::MAX
        );
    }
}
