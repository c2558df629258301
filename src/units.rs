//! Time-unit helpers for the simulation clock.
//!
//! Tick intervals and elapsed time are carried as `qtty` quantities so that
//! callers can drive the loop in whatever time unit their frame clock uses,
//! while the simulation itself always works in seconds.

use qtty::{Quantity, Second, Unit};

/// Marker trait for units that share the same physical dimension.
///
/// Automatically implemented for any pair of units where
/// `From::Dim == To::Dim`, so mismatched units fail to compile.
///
/// # Example
///
/// ```ignore
/// use qtty::{Minute, Second};
/// use gridmdp::units::SameDim;
///
/// fn accepts_same_dim<From, To>()
/// where
///     From: SameDim<To>,
/// {}
///
/// accepts_same_dim::<Minute, Second>(); // OK
/// // accepts_same_dim::<Second, Meter>(); // Error: different dimensions
/// ```
pub trait SameDim<To: Unit>: Unit<Dim = To::Dim> {}

impl<From, To> SameDim<To> for From
where
    From: Unit,
    To: Unit<Dim = From::Dim>,
{
}

/// Converts a quantity to another unit of the same dimension.
#[inline]
pub const fn convert<From, To>(q: Quantity<From>) -> Quantity<To>
where
    From: SameDim<To>,
    To: Unit,
{
    q.to_const::<To>()
}

/// Expresses any time quantity as a plain number of seconds.
#[inline]
pub fn as_seconds<U>(q: Quantity<U>) -> f64
where
    U: SameDim<Second>,
{
    convert::<U, Second>(q).value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtty::{Hour, Minute};

    #[test]
    fn minutes_to_seconds() {
        let minutes = Quantity::<Minute>::new(0.5);
        let seconds: Quantity<Second> = convert(minutes);
        assert!((seconds.value() - 30.0).abs() < 1e-12);
    }

    #[test]
    fn as_seconds_identity() {
        assert_eq!(as_seconds(Quantity::<Second>::new(0.25)), 0.25);
    }

    #[test]
    fn as_seconds_from_hours() {
        assert!((as_seconds(Quantity::<Hour>::new(1.0)) - 3600.0).abs() < 1e-9);
    }
}
