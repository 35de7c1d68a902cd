/// A discrete coordinate along a [`Genealogy`](crate::Genealogy).
///
/// Sites sit at positions in `[0, sequence_length)`, and
/// positions compare directly against `i64`.
///
/// ```
/// # use mutmodels_core::*;
/// let g = Genealogy::new(Position::new_valid(1000)).unwrap();
/// let site = Site::new(Position::new_valid(250), "A");
/// assert!(site.position() < g.sequence_length());
/// assert!(site.position() >= Position::ZERO);
/// assert_eq!(site.position(), 250);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, std::hash::Hash)]
#[repr(transparent)]
pub struct Position(i64);

impl Position {
    /// The left end of every genome.
    pub const ZERO: Position = Position(0);

    /// `None` if `position` is negative.
    ///
    /// ```
    /// # use mutmodels_core::Position;
    /// assert_eq!(Position::new(0), Some(Position::ZERO));
    /// assert!(Position::new(-1).is_none());
    /// ```
    pub fn new(position: i64) -> Option<Self> {
        if position >= 0 {
            Some(Self(position))
        } else {
            None
        }
    }

    /// # Panics
    ///
    /// If `position` is negative.
    ///
    /// ```should_panic
    /// mutmodels_core::Position::new_valid(-1);
    /// ```
    pub fn new_valid(position: i64) -> Self {
        Self::new(position).unwrap()
    }

    /// Number of discrete coordinates in `[self, right)`.
    ///
    /// Zero if `right <= self`.
    ///
    /// ```
    /// # use mutmodels_core::Position;
    /// assert_eq!(Position::new_valid(3).span_to(Position::new_valid(10)), 7);
    /// assert_eq!(Position::new_valid(10).span_to(Position::new_valid(3)), 0);
    /// ```
    pub fn span_to(self, right: Position) -> u64 {
        if right.0 > self.0 {
            (right.0 - self.0) as u64
        } else {
            0
        }
    }
}

impl PartialEq<i64> for Position {
    fn eq(&self, other: &i64) -> bool {
        self.0 == *other
    }
}

impl PartialEq<Position> for i64 {
    fn eq(&self, other: &Position) -> bool {
        *self == other.0
    }
}

impl PartialOrd<i64> for Position {
    fn partial_cmp(&self, other: &i64) -> Option<std::cmp::Ordering> {
        self.0.partial_cmp(other)
    }
}

impl PartialOrd<Position> for i64 {
    fn partial_cmp(&self, other: &Position) -> Option<std::cmp::Ordering> {
        self.partial_cmp(&other.0)
    }
}

impl TryFrom<i64> for Position {
    type Error = crate::Error;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(crate::Error::PositionError(value))
    }
}

impl From<Position> for i64 {
    fn from(value: Position) -> Self {
        value.0
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
