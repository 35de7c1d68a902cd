use mutmodels_core::{Error, Position, Time};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_position_construction(x in i64::MIN..i64::MAX) {
        match Position::try_from(x) {
            Ok(p) => {
                prop_assert!(x >= 0);
                prop_assert_eq!(p, x);
            }
            Err(e) => {
                prop_assert!(x < 0);
                prop_assert_eq!(e, Error::PositionError(x));
            }
        }
    }
}

proptest! {
    #[test]
    fn test_time_ordering(a in 0.0..1e9_f64, b in 0.0..1e9_f64) {
        let ta = Time::new(a).unwrap();
        let tb = Time::new(b).unwrap();
        prop_assert_eq!(ta.cmp(&tb), a.partial_cmp(&b).unwrap());
        prop_assert_eq!(ta == tb, a == b);
    }
}

#[test]
fn test_invalid_times() {
    assert_eq!(Time::try_from(-1.0), Err(Error::TimeError(-1.0)));
    assert!(Time::try_from(f64::INFINITY).is_err());
    assert!(Time::try_from(f64::NAN).is_err());
    assert_eq!(Time::new_valid(-0.0), Time::ZERO);
    assert_eq!(Time::from(3_u32), Time::new_valid(3.0));
    assert_eq!(f64::from(Time::from(3_u32)), 3.0);
}

#[cfg(feature = "rand")]
mod test_rand_traits {
    use mutmodels_core::Position;
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng};

    proptest! {
        #[test]
        fn test_uniform_position(a in 0..i64::MAX, b in 0..i64::MAX,
                                 seed in 0..u64::MAX) {
            if a != b { // else rand will return an error
                let lo = Position::new_valid(std::cmp::min(a, b));
                let hi = Position::new_valid(std::cmp::max(a, b));
                let upos = rand::distr::Uniform::<Position>::new(lo, hi).unwrap();
                let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
                for _ in 0..100 {
                    let p = rng.sample(upos);
                    prop_assert!(p >= lo && p < hi);
                }
            }
        }
    }

    proptest! {
        #[test]
        fn test_uniform_position_inclusive(a in 0..i64::MAX, b in 0..i64::MAX,
                                           seed in 0..u64::MAX) {
            let lo = Position::new_valid(std::cmp::min(a, b));
            let hi = Position::new_valid(std::cmp::max(a, b));
            let upos = rand::distr::Uniform::<Position>::new_inclusive(lo, hi).unwrap();
            let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
            for _ in 0..100 {
                let p = rng.sample(upos);
                prop_assert!(p >= lo && p <= hi);
            }
        }
    }

    #[test]
    fn test_empty_range_is_an_error() {
        let p = Position::new_valid(3);
        assert!(rand::distr::Uniform::<Position>::new(p, p).is_err());
    }
}
