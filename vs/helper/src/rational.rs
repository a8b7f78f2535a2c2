/*!
    Rational numbers for frame durations and frame rates, with
    overflow-checked scaling and reduction.
*/

use std::{fmt, str::FromStr};

use crate::error::{Error, OverflowStep, Result};

/**
    A rational number represented as a 64-bit numerator and denominator.

    Used for frame durations (e.g., 1001/24000) and frame rates
    (e.g., 24000/1001 for 23.976 fps).

    Values produced by [`Rational::muldiv`] and [`Rational::reduced`] are
    always in canonical form: the denominator is positive and shares no
    common factor with the numerator. Values built directly from their
    fields may not be.
*/
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rational {
    pub num: i64,
    pub den: i64,
}

/**
    A multiplier applied to a [`Rational`], as `mul / div`.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaleFactor {
    pub mul: i64,
    pub div: i64,
}

impl ScaleFactor {
    /// Scaling by one.
    pub const IDENTITY: Self = Self { mul: 1, div: 1 };

    #[inline]
    pub const fn new(mul: i64, div: i64) -> Self {
        Self { mul, div }
    }

    /**
        Swap multiplier and divisor.

        A zero multiplier becomes a zero divisor, which [`muldiv`]
        rejects with [`Error::ZeroDivisor`].
    */
    #[inline]
    pub const fn inverse(self) -> Self {
        Self {
            mul: self.div,
            div: self.mul,
        }
    }
}

impl From<(i64, i64)> for ScaleFactor {
    fn from((mul, div): (i64, i64)) -> Self {
        Self::new(mul, div)
    }
}

impl Rational {
    pub const ZERO: Self = Self { num: 0, den: 1 };
    pub const ONE: Self = Self { num: 1, den: 1 };

    /**
        Create a new rational number.

        # Panics

        Panics if `den` is zero. Use [`Rational::try_new`] for values
        read from untrusted metadata.
    */
    #[inline]
    pub const fn new(num: i64, den: i64) -> Self {
        assert!(den != 0, "denominator cannot be zero");
        Self { num, den }
    }

    /**
        Create a new rational number, rejecting a zero denominator.
    */
    #[inline]
    pub const fn try_new(num: i64, den: i64) -> Result<Self> {
        if den == 0 {
            return Err(Error::ZeroDenominator);
        }
        Ok(Self { num, den })
    }

    /**
        Convert to f64.
    */
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /**
        Multiply by `scale` and reduce. See [`muldiv`].
    */
    #[inline]
    pub fn muldiv(self, scale: impl Into<ScaleFactor>) -> Result<Self> {
        muldiv(self, scale.into())
    }

    /**
        Reduce to canonical form without scaling.
    */
    #[inline]
    pub fn reduced(self) -> Result<Self> {
        muldiv(self, ScaleFactor::IDENTITY)
    }

    /**
        Returns true if this value is already in canonical form.
    */
    pub fn is_reduced(self) -> bool {
        self.den > 0 && gcd(self.num.unsigned_abs(), self.den.unsigned_abs()) == 1
    }

    /**
        Invert the rational (swap numerator and denominator), returning
        the result in canonical form.

        Fails with [`Error::ZeroDenominator`] if the numerator is zero.
    */
    pub fn checked_invert(self) -> Result<Self> {
        if self.num == 0 {
            return Err(Error::ZeroDenominator);
        }
        Self {
            num: self.den,
            den: self.num,
        }
        .reduced()
    }
}

/**
    Multiply `r` by `scale` and reduce the result to lowest terms.

    The numerator is multiplied by `scale.mul` and the denominator by
    `scale.div`, the sign is moved onto the numerator, and both are divided
    by their greatest common divisor. A zero numerator reduces to `0/1`.

    # Errors

    - [`Error::ZeroDenominator`] if `r.den` is zero.
    - [`Error::ZeroDivisor`] if `scale.div` is zero.
    - [`Error::Overflow`] if either product, or the sign normalization,
      leaves the signed 64-bit range.
*/
pub fn muldiv(r: Rational, scale: ScaleFactor) -> Result<Rational> {
    if r.den == 0 {
        log::debug!("rejecting {r}: zero denominator");
        return Err(Error::ZeroDenominator);
    }
    if scale.div == 0 {
        log::debug!("rejecting scale {}/{}: zero divisor", scale.mul, scale.div);
        return Err(Error::ZeroDivisor);
    }

    let overflowed = |step: OverflowStep| {
        log::debug!(
            "overflow scaling {r} by {}/{} ({step})",
            scale.mul,
            scale.div
        );
        Error::overflow(step)
    };

    let (Some(mut num), Some(mut den)) =
        (r.num.checked_mul(scale.mul), r.den.checked_mul(scale.div))
    else {
        return Err(overflowed(OverflowStep::Multiply));
    };

    if den < 0 {
        let (Some(n), Some(d)) = (num.checked_neg(), den.checked_neg()) else {
            return Err(overflowed(OverflowStep::Negate));
        };
        num = n;
        den = d;
    }

    // den > 0 here, so g is in 1..=i64::MAX and fits back into i64
    let g = gcd(num.unsigned_abs(), den.unsigned_abs()) as i64;
    let out = Rational {
        num: num / g,
        den: den / g,
    };

    log::trace!("{r} * {}/{} = {out}", scale.mul, scale.div);
    Ok(out)
}

/**
    Greatest common divisor by the Euclidean algorithm.

    `gcd(0, n) == n`, and `gcd(0, 0) == 0`.
*/
pub const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/**
    Parses `"num/den"` or a bare integer `"num"` (denominator 1).

    The value is returned as written, not reduced.
*/
impl FromStr for Rational {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (num, den) = match s.split_once('/') {
            Some((num, den)) => (num.trim(), den.trim()),
            None => (s, "1"),
        };
        let num = num
            .parse::<i64>()
            .map_err(|e| Error::parse(s, e.to_string()))?;
        let den = den
            .parse::<i64>()
            .map_err(|e| Error::parse(s, e.to_string()))?;
        Self::try_new(num, den)
    }
}

impl From<(i32, i32)> for Rational {
    fn from((num, den): (i32, i32)) -> Self {
        Self::new(i64::from(num), i64::from(den))
    }
}

impl From<i32> for Rational {
    fn from(num: i32) -> Self {
        Self::new(i64::from(num), 1)
    }
}

impl TryFrom<(i64, i64)> for Rational {
    type Error = Error;

    fn try_from((num, den): (i64, i64)) -> Result<Self> {
        Self::try_new(num, den)
    }
}

static_assertions::assert_impl_all!(Rational: Send, Sync, Copy);
static_assertions::assert_impl_all!(ScaleFactor: Send, Sync, Copy);

#[cfg(test)]
mod tests {
    use super::*;

    fn r(num: i64, den: i64) -> Rational {
        Rational::new(num, den)
    }

    fn s(mul: i64, div: i64) -> ScaleFactor {
        ScaleFactor::new(mul, div)
    }

    #[test]
    fn doubles_ntsc_film_rate() {
        assert_eq!(muldiv(r(24000, 1001), s(2, 1)).unwrap(), r(48000, 1001));
    }

    #[test]
    fn halves_a_half() {
        assert_eq!(muldiv(r(1, 2), s(1, 2)).unwrap(), r(1, 4));
    }

    #[test]
    fn reduces_common_factors() {
        assert_eq!(muldiv(r(30000, 1001), s(1001, 1000)).unwrap(), r(30, 1));
        assert_eq!(muldiv(r(6, 8), s(2, 3)).unwrap(), r(1, 2));
    }

    #[test]
    fn moves_sign_to_numerator() {
        assert_eq!(muldiv(r(3, -4), s(1, 1)).unwrap(), r(-3, 4));
        assert_eq!(muldiv(r(3, 4), s(1, -1)).unwrap(), r(-3, 4));
        assert_eq!(muldiv(r(-3, 4), s(-1, -1)).unwrap(), r(-3, 4));
        assert_eq!(muldiv(r(3, -4), s(-1, 1)).unwrap(), r(3, 4));
        assert_eq!(muldiv(r(-3, -4), s(1, 1)).unwrap(), r(3, 4));
    }

    #[test]
    fn zero_numerator_reduces_to_zero_over_one() {
        assert_eq!(muldiv(r(0, 5), s(7, 1)).unwrap(), Rational::ZERO);
        assert_eq!(muldiv(r(0, -5), s(1, 3)).unwrap(), Rational::ZERO);
        assert_eq!(muldiv(r(5, 7), s(0, 3)).unwrap(), Rational::ZERO);
    }

    #[test]
    fn identity_scale_canonicalizes() {
        assert_eq!(muldiv(r(10, 20), ScaleFactor::IDENTITY).unwrap(), r(1, 2));
        assert_eq!(r(-9, -3).reduced().unwrap(), r(3, 1));
    }

    #[test]
    fn reduction_is_idempotent() {
        for value in [r(24000, 1001), r(-3, 4), r(0, 1), r(i64::MAX, 1), r(i64::MIN, 1)] {
            let once = value.reduced().unwrap();
            assert_eq!(once.reduced().unwrap(), once);
        }
    }

    #[test]
    fn results_are_canonical() {
        let inputs = [
            (r(24000, 1001), s(2, 1)),
            (r(12, -18), s(3, 4)),
            (r(-100, 250), s(-5, 7)),
            (r(1, 1), s(i64::MAX, i64::MAX)),
            (r(7, 3), s(0, -9)),
        ];
        for (value, scale) in inputs {
            let out = muldiv(value, scale).unwrap();
            assert!(out.den > 0, "{out} has non-positive denominator");
            assert!(out.is_reduced(), "{out} is not reduced");
        }
    }

    #[test]
    fn detects_overflow_instead_of_wrapping() {
        let max = muldiv(r(1, 1), s(i64::MAX, 1)).unwrap();
        assert_eq!(max, r(i64::MAX, 1));

        let err = muldiv(max, s(2, 1)).unwrap_err();
        assert_eq!(
            err,
            Error::Overflow {
                step: OverflowStep::Multiply
            }
        );
        assert!(err.is_overflow());
    }

    #[test]
    fn detects_denominator_overflow() {
        let err = muldiv(r(1, i64::MAX), s(1, 2)).unwrap_err();
        assert!(err.is_overflow());
    }

    #[test]
    fn detects_negation_overflow() {
        // den becomes i64::MIN, which has no positive counterpart
        let err = muldiv(r(1, 1), s(1, i64::MIN)).unwrap_err();
        assert_eq!(
            err,
            Error::Overflow {
                step: OverflowStep::Negate
            }
        );

        let err = muldiv(r(i64::MIN, -1), ScaleFactor::IDENTITY).unwrap_err();
        assert!(err.is_overflow());
    }

    #[test]
    fn min_numerator_with_positive_denominator_is_fine() {
        assert_eq!(r(i64::MIN, 2).reduced().unwrap(), r(i64::MIN / 2, 1));
        assert_eq!(r(i64::MIN, 3).reduced().unwrap(), r(i64::MIN, 3));
    }

    #[test]
    fn preconditions_are_not_overflow() {
        let zero_den = Rational { num: 1, den: 0 };
        assert_eq!(muldiv(zero_den, s(1, 1)), Err(Error::ZeroDenominator));
        assert_eq!(muldiv(r(1, 1), s(1, 0)), Err(Error::ZeroDivisor));
        assert!(!Error::ZeroDivisor.is_overflow());
    }

    #[test]
    fn inputs_survive_failure() {
        let value = r(i64::MAX, 3);
        let scale = s(4, 1);
        assert!(value.muldiv(scale).is_err());
        assert_eq!(value, r(i64::MAX, 3));
        assert_eq!(scale, s(4, 1));
    }

    #[test]
    fn gcd_cases() {
        assert_eq!(gcd(12, 8), 4);
        assert_eq!(gcd(17, 13), 1);
        assert_eq!(gcd(0, 5), 5);
        assert_eq!(gcd(5, 0), 5);
        assert_eq!(gcd(0, 0), 0);
        assert_eq!(gcd(1 << 63, 1 << 10), 1 << 10);
    }

    #[test]
    #[should_panic(expected = "denominator cannot be zero")]
    fn zero_denominator_panics() {
        Rational::new(1, 0);
    }

    #[test]
    fn try_new_rejects_zero_denominator() {
        assert_eq!(Rational::try_new(1, 0), Err(Error::ZeroDenominator));
        assert_eq!(Rational::try_from((1_i64, 0_i64)), Err(Error::ZeroDenominator));
        assert_eq!(Rational::try_new(1, 2), Ok(r(1, 2)));
    }

    #[test]
    fn to_f64_conversion() {
        assert_eq!(r(1, 2).to_f64(), 0.5);
        assert_eq!(r(24000, 1001).to_f64(), 24000.0 / 1001.0);
    }

    #[test]
    fn invert() {
        assert_eq!(r(1, 90000).checked_invert().unwrap(), r(90000, 1));
        assert_eq!(r(-2, 4).checked_invert().unwrap(), r(-2, 1));
        assert_eq!(r(0, 1).checked_invert(), Err(Error::ZeroDenominator));
    }

    #[test]
    fn scale_inverse() {
        assert_eq!(s(2, 3).inverse(), s(3, 2));
        assert_eq!(r(1, 1).muldiv(s(0, 1).inverse()), Err(Error::ZeroDivisor));
    }

    #[test]
    fn parse() {
        assert_eq!("24000/1001".parse::<Rational>().unwrap(), r(24000, 1001));
        assert_eq!(" -3 / 4 ".parse::<Rational>().unwrap(), r(-3, 4));
        assert_eq!("25".parse::<Rational>().unwrap(), r(25, 1));
        assert_eq!("1/0".parse::<Rational>(), Err(Error::ZeroDenominator));
        assert!(matches!(
            "1/x".parse::<Rational>(),
            Err(Error::Parse { .. })
        ));
        assert!("".parse::<Rational>().is_err());
    }

    #[test]
    fn from_small_ints() {
        let v: Rational = (30000, 1001).into();
        assert_eq!(v, r(30000, 1001));
        let v: Rational = 25.into();
        assert_eq!(v, r(25, 1));
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", r(1, 90000)), "1/90000");
        assert_eq!(format!("{:?}", r(-3, 4)), "-3/4");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_fields() {
        let json = serde_json::to_string(&r(24000, 1001)).unwrap();
        assert_eq!(json, r#"{"num":24000,"den":1001}"#);
        let back: Rational = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r(24000, 1001));
    }
}
