use rand::distr::uniform::{Error, SampleBorrow, SampleUniform, UniformInt, UniformSampler};
use rand::Rng;

use crate::Position;

/// Samples [`Position`] values via
/// [`rand::distr::Uniform`].
#[derive(Clone, Copy, Debug)]
#[repr(transparent)]
pub struct UniformPosition(UniformInt<i64>);

impl UniformSampler for UniformPosition {
    type X = Position;

    fn new<B1, B2>(low: B1, high: B2) -> Result<Self, Error>
    where
        B1: SampleBorrow<Self::X> + Sized,
        B2: SampleBorrow<Self::X> + Sized,
    {
        UniformInt::<i64>::new(i64::from(*low.borrow()), i64::from(*high.borrow()))
            .map(UniformPosition)
    }

    fn new_inclusive<B1, B2>(low: B1, high: B2) -> Result<Self, Error>
    where
        B1: SampleBorrow<Self::X> + Sized,
        B2: SampleBorrow<Self::X> + Sized,
    {
        UniformInt::<i64>::new_inclusive(i64::from(*low.borrow()), i64::from(*high.borrow()))
            .map(UniformPosition)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::X {
        // bounds are Positions, so every draw is non-negative
        Position::new_valid(self.0.sample(rng))
    }
}

impl SampleUniform for Position {
    type Sampler = UniformPosition;
}
