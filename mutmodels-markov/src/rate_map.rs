use mutmodels_core::Position;

use crate::Error;
use crate::Result;

/// A half-open interval `[left, right)` with a constant
/// mutation rate per unit length per unit time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RateInterval {
    left: Position,
    right: Position,
    rate: f64,
}

impl RateInterval {
    /// # Returns
    ///
    /// `None` if either end is negative, `right <= left`,
    /// or `rate` is negative or not finite.
    pub fn new<L, R>(left: L, right: R, rate: f64) -> Option<Self>
    where
        L: TryInto<Position>,
        R: TryInto<Position>,
    {
        let left = left.try_into().ok()?;
        let right = right.try_into().ok()?;
        if right <= left || !rate.is_finite() || rate < 0.0 {
            None
        } else {
            Some(Self { left, right, rate })
        }
    }

    /// Left end
    pub fn left(&self) -> Position {
        self.left
    }
    /// Right end
    pub fn right(&self) -> Position {
        self.right
    }
    /// Mutation rate
    pub fn rate(&self) -> f64 {
        self.rate
    }
    /// Number of discrete positions in the interval
    pub fn span(&self) -> u64 {
        self.left.span_to(self.right)
    }
}

/// Collects [`RateInterval`]s for a [`RateMap`].
#[derive(Default, Debug, Clone)]
pub struct RateMapBuilder {
    intervals: Vec<RateInterval>,
}

impl RateMapBuilder {
    /// Add intervals
    pub fn extend(mut self, intervals: &[RateInterval]) -> Self {
        self.intervals.extend_from_slice(intervals);
        self
    }

    /// Intervals added so far
    pub fn intervals(&self) -> &[RateInterval] {
        &self.intervals
    }

    /// # Errors
    ///
    /// [`Error::OverlappingRateIntervals`] if any two intervals overlap.
    pub fn build(mut self) -> Result<RateMap> {
        self.intervals.sort_by_key(|i| i.left);
        for w in self.intervals.windows(2) {
            if w[1].left < w[0].right {
                return Err(Error::OverlappingRateIntervals(w[1].left));
            }
        }
        Ok(RateMap {
            intervals: self.intervals,
        })
    }
}

/// Piecewise-constant mutation rates along a genome.
///
/// Positions not covered by any interval have rate zero.
///
/// ```
/// use mutmodels_core::Position;
/// use mutmodels_markov::{RateInterval, RateMapBuilder};
///
/// let map = RateMapBuilder::default()
///     .extend(&[
///         RateInterval::new(0, 10, 1e-3).unwrap(),
///         RateInterval::new(20, 30, 2e-3).unwrap(),
///     ])
///     .build()
///     .unwrap();
/// assert_eq!(map.rate_at(Position::new_valid(5)), 1e-3);
/// assert_eq!(map.rate_at(Position::new_valid(15)), 0.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RateMap {
    intervals: Vec<RateInterval>,
}

impl RateMap {
    /// A single rate over `[0, sequence_length)`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRateInterval`] if `sequence_length` is zero
    /// or `rate` is negative or not finite.
    pub fn uniform(sequence_length: Position, rate: f64) -> Result<Self> {
        let interval = RateInterval::new(Position::ZERO, sequence_length, rate).ok_or(
            Error::InvalidRateInterval {
                left: Position::ZERO,
                right: sequence_length,
                rate,
            },
        )?;
        Ok(Self {
            intervals: vec![interval],
        })
    }

    /// Intervals, sorted by position
    pub fn intervals(&self) -> &[RateInterval] {
        &self.intervals
    }

    /// Right end of the last interval
    pub fn end(&self) -> Position {
        self.intervals
            .last()
            .map(|i| i.right)
            .unwrap_or(Position::ZERO)
    }

    /// Mutation rate at `position`
    pub fn rate_at(&self, position: Position) -> f64 {
        let i = self.intervals.partition_point(|i| i.right <= position);
        match self.intervals.get(i) {
            Some(interval) if interval.left <= position => interval.rate,
            _ => 0.0,
        }
    }

    /// Sum of `rate * span` over all intervals
    pub fn total_mass(&self) -> f64 {
        self.intervals
            .iter()
            .map(|i| i.rate * i.span() as f64)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_interval() {
        assert!(RateInterval::new(0, 1, 1e-3).is_some());
        assert!(RateInterval::new(0, 1, 0.0).is_some());
        assert!(RateInterval::new(0, 1, -1e-3).is_none());
        assert!(RateInterval::new(0, 1, f64::NAN).is_none());
        assert!(RateInterval::new(0, 1, f64::INFINITY).is_none());
        assert!(RateInterval::new(1, 1, 1e-3).is_none());
        assert!(RateInterval::new(-1, 1, 1e-3).is_none());
    }

    #[test]
    fn test_overlap() {
        let b = RateMapBuilder::default().extend(&[
            RateInterval::new(5, 15, 1.0).unwrap(),
            RateInterval::new(0, 10, 1.0).unwrap(),
        ]);
        assert_eq!(
            b.build(),
            Err(Error::OverlappingRateIntervals(Position::new_valid(5)))
        );
    }

    #[test]
    fn test_adjacent_intervals() {
        let map = RateMapBuilder::default()
            .extend(&[
                RateInterval::new(10, 20, 2.0).unwrap(),
                RateInterval::new(0, 10, 1.0).unwrap(),
            ])
            .build()
            .unwrap();
        assert_eq!(map.rate_at(Position::new_valid(9)), 1.0);
        assert_eq!(map.rate_at(Position::new_valid(10)), 2.0);
        assert_eq!(map.rate_at(Position::new_valid(20)), 0.0);
        assert_eq!(map.end(), 20);
        assert_eq!(map.total_mass(), 30.0);
    }

    #[test]
    fn test_uniform() {
        let map = RateMap::uniform(Position::new_valid(100), 1e-2).unwrap();
        assert_eq!(map.intervals().len(), 1);
        assert!(matches!(
            RateMap::uniform(Position::new_valid(0), 1e-2),
            Err(Error::InvalidRateInterval { .. })
        ));
    }
}
