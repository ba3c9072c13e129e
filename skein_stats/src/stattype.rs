use skein_data::Datum;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Statistical type of a variable. Selects the primitive model backing every
/// category of a column.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StatType {
    Bernoulli,
    Categorical,
    Gaussian,
    Count,
}

impl std::fmt::Display for StatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bernoulli => write!(f, "Bernoulli"),
            Self::Categorical => write!(f, "Categorical"),
            Self::Gaussian => write!(f, "Gaussian"),
            Self::Count => write!(f, "Count"),
        }
    }
}

impl std::str::FromStr for StatType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bernoulli" => Ok(StatType::Bernoulli),
            "categorical" => Ok(StatType::Categorical),
            "gaussian" => Ok(StatType::Gaussian),
            "count" => Ok(StatType::Count),
            invalid => Err(format!("Invalid stattype: '{invalid}'")),
        }
    }
}

impl TryFrom<&Datum> for StatType {
    type Error = ();

    fn try_from(datum: &Datum) -> Result<Self, Self::Error> {
        match datum {
            Datum::Binary(_) => Ok(StatType::Bernoulli),
            Datum::Categorical(_) => Ok(StatType::Categorical),
            Datum::Continuous(_) => Ok(StatType::Gaussian),
            Datum::Count(_) => Ok(StatType::Count),
            Datum::Missing => Err(()),
        }
    }
}

impl StatType {
    /// Whether values of this type live in a finite domain
    pub fn is_discrete_finite(self) -> bool {
        matches!(self, StatType::Bernoulli | StatType::Categorical)
    }

    /// Whether `datum` can be handed to a model of this stattype. A missing
    /// datum is always compatible.
    pub fn datum_compatible(self, datum: &Datum) -> bool {
        StatType::try_from(datum)
            .map(|stattype| stattype == self)
            .unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datum_compatibility() {
        assert!(StatType::Bernoulli.datum_compatible(&Datum::Binary(true)));
        assert!(StatType::Gaussian.datum_compatible(&Datum::Continuous(0.1)));
        assert!(StatType::Count.datum_compatible(&Datum::Missing));
        assert!(!StatType::Categorical.datum_compatible(&Datum::Count(1)));
        assert!(!StatType::Bernoulli.datum_compatible(&Datum::Categorical(1)));
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Gaussian".parse::<StatType>(), Ok(StatType::Gaussian));
        assert_eq!("bernoulli".parse::<StatType>(), Ok(StatType::Bernoulli));
        assert!("poisson".parse::<StatType>().is_err());
    }

    #[test]
    fn serde_snake_case() {
        let s = serde_json::to_string(&StatType::Categorical).unwrap();
        assert_eq!(s, "\"categorical\"");
    }
}
