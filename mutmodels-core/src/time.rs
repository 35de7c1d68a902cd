/// A time value
///
/// Time runs forwards: a larger value is more recent.
/// Values are always finite and non-negative, which
/// makes `Time` totally ordered.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Time(f64);

impl Time {
    /// Time zero
    pub const ZERO: Time = Time(0.0);

    /// Create a new Time
    ///
    /// # Returns
    ///
    /// * `Some` if `time` is finite and non-negative
    /// * `None` otherwise
    ///
    /// ```
    /// # use mutmodels_core::Time;
    /// assert!(Time::new(1.5).is_some());
    /// assert!(Time::new(-1.0).is_none());
    /// assert!(Time::new(f64::NAN).is_none());
    /// assert!(Time::new(f64::INFINITY).is_none());
    /// ```
    pub fn new(time: f64) -> Option<Self> {
        if time.is_finite() && time >= 0.0 {
            // folds -0.0 into 0.0
            Some(Self(time + 0.0))
        } else {
            None
        }
    }

    /// # Panics
    ///
    /// Will panic if `time` is negative or not finite.
    pub fn new_valid(time: f64) -> Self {
        Self::new(time).unwrap()
    }

    /// The underlying value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Eq for Time {}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Time {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::hash::Hash for Time {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state)
    }
}

impl TryFrom<f64> for Time {
    type Error = crate::Error;
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(crate::Error::TimeError(value))
    }
}

impl From<u32> for Time {
    fn from(value: u32) -> Self {
        Self(f64::from(value))
    }
}

impl From<Time> for f64 {
    fn from(value: Time) -> Self {
        value.0
    }
}
