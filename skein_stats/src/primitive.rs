//! Per-category primitive models and dispatch over stattype
use enum_dispatch::enum_dispatch;
use rand::Rng;
use crate::rv::dist::{
    Bernoulli, Beta, Categorical, Gamma, Gaussian, NormalInvChiSquared,
    Poisson, SymmetricDirichlet,
};
use crate::rv::traits::{HasSuffStat, Rv};
use skein_consts::MAX_CATEGORICAL_K;
use skein_data::{Datum, DatumConversionError};

use crate::component::{ConjugateComponent, PrimitivePrior};
use crate::{ColumnMetadata, Hyperparameters, PrimitiveError, StatType};

pub type BetaBernoulli = ConjugateComponent<bool, Bernoulli, Beta>;
pub type DirichletCategorical =
    ConjugateComponent<u8, Categorical, SymmetricDirichlet>;
pub type NixGaussian = ConjugateComponent<f64, Gaussian, NormalInvChiSquared>;
pub type GammaPoisson = ConjugateComponent<u32, Poisson, Gamma>;

/// The model owned by a single category of a column
#[enum_dispatch]
pub trait PrimitiveModel {
    /// The stattype of the data the model accepts
    fn stattype(&self) -> StatType;
    /// The number of incorporated observations
    fn n(&self) -> usize;
    /// Check that `datum` could be incorporated without touching the model
    fn check_datum(&self, datum: &Datum) -> Result<(), PrimitiveError>;
    /// Absorb `datum` into the sufficient statistic
    fn incorporate(&mut self, datum: &Datum) -> Result<(), PrimitiveError>;
    /// Remove a previously incorporated `datum` from the sufficient statistic
    fn unincorporate(&mut self, datum: &Datum) -> Result<(), PrimitiveError>;
    /// Log posterior predictive density of `datum`
    fn logpdf(&self, datum: &Datum) -> Result<f64, PrimitiveError>;
    /// Log marginal likelihood of the incorporated data
    fn logpdf_score(&self) -> f64;
    /// Draw one value from the posterior predictive
    fn draw(&self, rng: &mut impl Rng) -> Datum;
    /// Draw `n` values from the posterior predictive
    fn simulate(&self, n: usize, rng: &mut impl Rng) -> Vec<Datum> {
        (0..n).map(|_| self.draw(rng)).collect()
    }
}

impl<X, Fx, Pr> ConjugateComponent<X, Fx, Pr>
where
    X: TryFrom<Datum, Error = DatumConversionError> + Into<Datum>,
    Fx: Rv<X> + HasSuffStat<X>,
    Pr: PrimitivePrior<X, Fx>,
{
    fn to_value(&self, datum: &Datum) -> Result<X, PrimitiveError> {
        let stattype = Pr::stattype();
        let x = X::try_from(datum.clone()).map_err(|err| match err {
            DatumConversionError::CannotConvertMissing => {
                PrimitiveError::Missing
            }
            _ => PrimitiveError::InvalidDatum {
                stattype,
                datum: datum.clone(),
            },
        })?;

        if self.prior().supports(&x) {
            Ok(x)
        } else {
            Err(PrimitiveError::OutOfSupport {
                stattype,
                datum: datum.clone(),
            })
        }
    }
}

impl<X, Fx, Pr> PrimitiveModel for ConjugateComponent<X, Fx, Pr>
where
    X: TryFrom<Datum, Error = DatumConversionError> + Into<Datum>,
    Fx: Rv<X> + HasSuffStat<X>,
    Pr: PrimitivePrior<X, Fx>,
{
    fn stattype(&self) -> StatType {
        Pr::stattype()
    }

    fn n(&self) -> usize {
        ConjugateComponent::n(self)
    }

    fn check_datum(&self, datum: &Datum) -> Result<(), PrimitiveError> {
        self.to_value(datum).map(|_| ())
    }

    fn incorporate(&mut self, datum: &Datum) -> Result<(), PrimitiveError> {
        let x = self.to_value(datum)?;
        self.observe(&x);
        Ok(())
    }

    fn unincorporate(&mut self, datum: &Datum) -> Result<(), PrimitiveError> {
        let x = self.to_value(datum)?;
        if ConjugateComponent::n(self) == 0 {
            return Err(PrimitiveError::NoObservations(Pr::stattype()));
        }
        self.forget(&x);
        Ok(())
    }

    fn logpdf(&self, datum: &Datum) -> Result<f64, PrimitiveError> {
        self.to_value(datum).map(|x| self.ln_pp(&x))
    }

    fn logpdf_score(&self) -> f64 {
        self.ln_m()
    }

    fn draw(&self, rng: &mut impl Rng) -> Datum {
        ConjugateComponent::draw(self, rng).into()
    }
}

/// A primitive model of any stattype
#[enum_dispatch(PrimitiveModel)]
#[derive(Clone, Debug)]
pub enum Primitive {
    Bernoulli(BetaBernoulli),
    Categorical(DirichletCategorical),
    Gaussian(NixGaussian),
    Count(GammaPoisson),
}

fn invalid_hyper<E: std::fmt::Debug>(
    stattype: StatType,
) -> impl FnOnce(E) -> PrimitiveError {
    move |err| PrimitiveError::InvalidHyperparameters {
        stattype,
        reason: format!("{err:?}"),
    }
}

impl Primitive {
    /// Create an empty model from hyperparameters. Categorical models take
    /// the size of their domain from `metadata`.
    ///
    /// # Example
    ///
    /// ```
    /// # use skein_stats::{ColumnMetadata, Hyperparameters, Primitive};
    /// # use skein_stats::{PrimitiveModel, StatType};
    /// # use skein_data::Datum;
    /// let hyper = Hyperparameters::default_for(StatType::Categorical);
    /// let metadata = ColumnMetadata::with_k(4);
    /// let mut model = Primitive::new(&hyper, &metadata).unwrap();
    ///
    /// model.incorporate(&Datum::Categorical(3)).unwrap();
    /// assert_eq!(model.n(), 1);
    /// assert!(model.incorporate(&Datum::Categorical(4)).is_err());
    /// ```
    pub fn new(
        hyper: &Hyperparameters,
        metadata: &ColumnMetadata,
    ) -> Result<Self, PrimitiveError> {
        let stattype = hyper.stattype();
        let model = match *hyper {
            Hyperparameters::Bernoulli { alpha, beta } => {
                let prior =
                    Beta::new(alpha, beta).map_err(invalid_hyper(stattype))?;
                Primitive::Bernoulli(ConjugateComponent::new(prior))
            }
            Hyperparameters::Categorical { alpha } => {
                let k = metadata
                    .k()
                    .ok_or(PrimitiveError::MissingCategoricalDomain)?;
                if k == 0 || k > MAX_CATEGORICAL_K {
                    return Err(PrimitiveError::InvalidCategoricalDomain(k));
                }
                let prior = SymmetricDirichlet::new(alpha, k)
                    .map_err(invalid_hyper(stattype))?;
                Primitive::Categorical(ConjugateComponent::new(prior))
            }
            Hyperparameters::Gaussian { m, k, v, s2 } => {
                let prior = NormalInvChiSquared::new(m, k, v, s2)
                    .map_err(invalid_hyper(stattype))?;
                Primitive::Gaussian(ConjugateComponent::new(prior))
            }
            Hyperparameters::Count { shape, rate } => {
                let prior = Gamma::new(shape, rate)
                    .map_err(invalid_hyper(stattype))?;
                Primitive::Count(ConjugateComponent::new(prior))
            }
        };
        Ok(model)
    }
}
