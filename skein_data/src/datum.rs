use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::convert::{From, TryFrom};
use std::hash::Hash;
use thiserror::Error;

/// A single observed value of a variable
#[derive(Debug, Clone, Serialize, Deserialize, PartialOrd)]
#[serde(rename_all = "snake_case")]
pub enum Datum {
    Binary(bool),
    Continuous(f64),
    /// Index into the variable's categorical domain
    Categorical(u8),
    Count(u32),
    Missing,
}

/// A (partial) row of values keyed by variable name.
///
/// Used for targets, constraints, and the values of a row handed to a column
/// by a CrossCat driver.
pub type Values = BTreeMap<String, Datum>;

/// Describes an error converting from a Datum to another type
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DatumConversionError {
    /// Tried to convert Binary into a type other than bool
    #[error("tried to convert Binary into a type other than bool")]
    InvalidTypeRequestedFromBinary,
    /// Tried to convert Continuous into a type other than f64
    #[error("tried to convert Continuous into a type other than f64")]
    InvalidTypeRequestedFromContinuous,
    /// Tried to convert Categorical into non-categorical type
    #[error("tried to convert Categorical into non-categorical type")]
    InvalidTypeRequestedFromCategorical,
    /// Tried to convert Count into a type other than u32
    #[error("tried to convert Count into a type other than u32")]
    InvalidTypeRequestedFromCount,
    /// Cannot convert Missing into a value of any type
    #[error("cannot convert Missing into a value of any type")]
    CannotConvertMissing,
}

fn hash_float<H: std::hash::Hasher>(float: f64, state: &mut H) {
    // Note that IEEE 754 doesn’t define just a single NaN value
    let x: f64 = if float.is_nan() { std::f64::NAN } else { float };

    // -0.0 == 0.0 so they must hash the same
    let x = if x == 0.0 { 0.0 } else { x };

    x.to_bits().hash(state);
}

impl Hash for Datum {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Binary(x) => x.hash(state),
            Self::Continuous(x) => hash_float(*x, state),
            Self::Categorical(x) => x.hash(state),
            Self::Count(x) => x.hash(state),
            Self::Missing => (),
        }
    }
}

macro_rules! datum_peq {
    ($x: ident, $y: ident, $variant: ident) => {{
        if let Datum::$variant(y) = $y {
            $x == y
        } else {
            false
        }
    }};
}

// PartialEq and Hash must agree with each other.
impl PartialEq for Datum {
    fn eq(&self, other: &Self) -> bool {
        match self {
            Self::Continuous(x) => {
                if let Self::Continuous(y) = other {
                    if x.is_nan() && y.is_nan() {
                        true
                    } else {
                        x == y
                    }
                } else {
                    false
                }
            }
            Self::Binary(x) => datum_peq!(x, other, Binary),
            Self::Categorical(x) => datum_peq!(x, other, Categorical),
            Self::Count(x) => datum_peq!(x, other, Count),
            Self::Missing => matches!(other, Self::Missing),
        }
    }
}

// NaN is equal to NaN under `PartialEq`, so equality is reflexive.
impl Eq for Datum {}

macro_rules! impl_datum_conversions {
    ($out: ty, $pat_in: path, $err: expr) => {
        impl TryFrom<Datum> for $out {
            type Error = DatumConversionError;

            fn try_from(datum: Datum) -> Result<$out, Self::Error> {
                match datum {
                    $pat_in(x) => Ok(x),
                    Datum::Missing => {
                        Err(DatumConversionError::CannotConvertMissing)
                    }
                    _ => Err($err),
                }
            }
        }

        impl From<$out> for Datum {
            fn from(x: $out) -> Datum {
                $pat_in(x)
            }
        }
    };
}

impl_datum_conversions!(
    bool,
    Datum::Binary,
    DatumConversionError::InvalidTypeRequestedFromBinary
);

impl_datum_conversions!(
    f64,
    Datum::Continuous,
    DatumConversionError::InvalidTypeRequestedFromContinuous
);

impl_datum_conversions!(
    u8,
    Datum::Categorical,
    DatumConversionError::InvalidTypeRequestedFromCategorical
);

impl_datum_conversions!(
    u32,
    Datum::Count,
    DatumConversionError::InvalidTypeRequestedFromCount
);

impl<T: Into<Datum>> From<Option<T>> for Datum {
    fn from(x: Option<T>) -> Datum {
        x.map(Into::into).unwrap_or(Datum::Missing)
    }
}

impl Datum {
    /// Unwraps the datum as an `f64` if possible. The conversion will coerce
    /// from other types if possible.
    ///
    /// # Example
    ///
    /// ```
    /// # use skein_data::Datum;
    /// assert_eq!(Datum::Continuous(1.2).to_f64_opt(), Some(1.2));
    /// assert_eq!(Datum::Binary(true).to_f64_opt(), Some(1.0));
    /// assert_eq!(Datum::Categorical(8).to_f64_opt(), Some(8.0));
    /// assert_eq!(Datum::Missing.to_f64_opt(), None);
    /// ```
    pub fn to_f64_opt(&self) -> Option<f64> {
        match self {
            Datum::Binary(x) => Some(if *x { 1.0 } else { 0.0 }),
            Datum::Continuous(x) => Some(*x),
            Datum::Categorical(x) => Some(f64::from(*x)),
            Datum::Count(x) => Some(f64::from(*x)),
            Datum::Missing => None,
        }
    }

    /// Returns `true` if the `Datum` is missing
    pub fn is_missing(&self) -> bool {
        matches!(self, Datum::Missing)
    }

    /// `None` if the datum is missing, otherwise `Some(self)`
    pub fn present(&self) -> Option<&Datum> {
        if self.is_missing() {
            None
        } else {
            Some(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashMap;
    use std::convert::TryInto;
    use std::hash::Hasher;

    fn hash_of(datum: &Datum) -> u64 {
        let mut hasher = DefaultHasher::new();
        datum.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn continuous_datum_try_into_f64() {
        let datum = Datum::Continuous(1.1);
        let res: f64 = datum.try_into().unwrap();
        assert_eq!(res, 1.1);
    }

    #[test]
    fn continuous_datum_try_into_u8_fails() {
        let datum = Datum::Continuous(1.1);
        let res: Result<u8, _> = datum.try_into();
        assert_eq!(
            res,
            Err(DatumConversionError::InvalidTypeRequestedFromCategorical)
        );
    }

    #[test]
    fn missing_datum_try_into_bool_fails() {
        let res: Result<bool, _> = Datum::Missing.try_into();
        assert_eq!(res, Err(DatumConversionError::CannotConvertMissing));
    }

    #[test]
    fn none_converts_to_missing() {
        let x: Option<u32> = None;
        assert_eq!(Datum::from(x), Datum::Missing);
        assert_eq!(Datum::from(Some(3_u32)), Datum::Count(3));
    }

    #[test]
    fn nan_equals_nan_and_hashes_equal() {
        let a = Datum::Continuous(std::f64::NAN);
        let b = Datum::Continuous(-std::f64::NAN);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn signed_zeros_hash_equal() {
        let a = Datum::Continuous(0.0);
        let b = Datum::Continuous(-0.0);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn variants_with_same_payload_bits_are_distinct_keys() {
        let mut map: HashMap<Datum, usize> = HashMap::new();
        map.insert(Datum::Categorical(1), 1);
        map.insert(Datum::Count(1), 2);
        map.insert(Datum::Binary(true), 3);
        assert_eq!(map.len(), 3);
        assert_eq!(map[&Datum::Count(1)], 2);
    }

    #[test]
    fn present_filters_missing() {
        assert!(Datum::Missing.present().is_none());
        assert_eq!(Datum::Binary(false).present(), Some(&Datum::Binary(false)));
    }

    #[test]
    fn serde_continuous() {
        let data = r#"
            {
                "continuous": 1.2
            }"#;

        let x: Datum = serde_json::from_str(data).unwrap();

        assert_eq!(x, Datum::Continuous(1.2));
    }

    #[test]
    fn serde_missing() {
        let data = r#""missing""#;

        let x: Datum = serde_json::from_str(data).unwrap();

        assert_eq!(x, Datum::Missing);
    }
}
