//! Collapsed conjugate component
use std::fmt::Debug;
use std::sync::OnceLock;

use rand::Rng;

use crate::rv::data::{
    BernoulliSuffStat, CategoricalSuffStat, DataOrSuffStat, GaussianSuffStat,
    PoissonSuffStat,
};
use crate::rv::dist::{
    Bernoulli, Beta, Categorical, Gamma, Gaussian, NormalInvChiSquared,
    Poisson, SymmetricDirichlet,
};
use crate::rv::traits::{ConjugatePrior, HasSuffStat, Rv, SuffStat};
use crate::StatType;

/// A conjugate prior that can back a primitive model
pub trait PrimitivePrior<X, Fx>: ConjugatePrior<X, Fx> + Clone + Debug
where
    Fx: Rv<X> + HasSuffStat<X>,
{
    /// The stattype of the data this prior's likelihood generates
    fn stattype() -> StatType;
    /// Create an empty sufficient statistic for a component
    fn empty_suffstat(&self) -> Fx::Stat;
    /// Whether `x` lies in the support of the likelihood
    fn supports(&self, _x: &X) -> bool {
        true
    }
}

impl PrimitivePrior<bool, Bernoulli> for Beta {
    fn stattype() -> StatType {
        StatType::Bernoulli
    }

    fn empty_suffstat(&self) -> BernoulliSuffStat {
        BernoulliSuffStat::new()
    }
}

impl PrimitivePrior<u8, Categorical> for SymmetricDirichlet {
    fn stattype() -> StatType {
        StatType::Categorical
    }

    fn empty_suffstat(&self) -> CategoricalSuffStat {
        CategoricalSuffStat::new(self.k())
    }

    fn supports(&self, x: &u8) -> bool {
        usize::from(*x) < self.k()
    }
}

impl PrimitivePrior<f64, Gaussian> for NormalInvChiSquared {
    fn stattype() -> StatType {
        StatType::Gaussian
    }

    fn empty_suffstat(&self) -> GaussianSuffStat {
        GaussianSuffStat::new()
    }

    fn supports(&self, x: &f64) -> bool {
        x.is_finite()
    }
}

impl PrimitivePrior<u32, Poisson> for Gamma {
    fn stattype() -> StatType {
        StatType::Count
    }

    fn empty_suffstat(&self) -> PoissonSuffStat {
        PoissonSuffStat::new()
    }
}

/// Maintains a conjugate prior and a sufficient statistic capturing the data
/// assigned to the component. The component parameters are integrated out.
pub struct ConjugateComponent<X, Fx, Pr>
where
    Fx: Rv<X> + HasSuffStat<X>,
    Pr: PrimitivePrior<X, Fx>,
{
    prior: Pr,
    stat: Fx::Stat,
    ln_pp_cache: OnceLock<Pr::LnPpCache>,
}

impl<X, Fx, Pr> Clone for ConjugateComponent<X, Fx, Pr>
where
    Fx: Rv<X> + HasSuffStat<X>,
    Fx::Stat: Clone,
    Pr: PrimitivePrior<X, Fx>,
    Pr::LnPpCache: Clone,
{
    fn clone(&self) -> Self {
        Self {
            prior: self.prior.clone(),
            stat: self.stat.clone(),
            ln_pp_cache: self.ln_pp_cache.clone(),
        }
    }
}

impl<X, Fx, Pr> Debug for ConjugateComponent<X, Fx, Pr>
where
    Fx: Rv<X> + HasSuffStat<X>,
    Fx::Stat: Debug,
    Pr: PrimitivePrior<X, Fx>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConjugateComponent")
            .field("prior", &self.prior)
            .field("stat", &self.stat)
            .finish()
    }
}

impl<X, Fx, Pr> ConjugateComponent<X, Fx, Pr>
where
    Fx: Rv<X> + HasSuffStat<X>,
    Pr: PrimitivePrior<X, Fx>,
{
    /// Create a new ConjugateComponent with no observations
    #[inline]
    pub fn new(prior: Pr) -> Self {
        let stat = prior.empty_suffstat();
        ConjugateComponent {
            prior,
            stat,
            ln_pp_cache: OnceLock::new(),
        }
    }

    #[inline]
    pub fn prior(&self) -> &Pr {
        &self.prior
    }

    /// The number of observations absorbed into the statistic
    #[inline]
    pub fn n(&self) -> usize {
        self.stat.n()
    }

    /// Return the observations
    #[inline]
    pub fn obs(&self) -> DataOrSuffStat<'_, X, Fx> {
        DataOrSuffStat::SuffStat(&self.stat)
    }

    #[inline]
    pub fn reset_ln_pp_cache(&mut self) {
        self.ln_pp_cache = OnceLock::new()
    }

    #[inline]
    fn ln_pp_cache(&self) -> &Pr::LnPpCache {
        self.ln_pp_cache
            .get_or_init(|| self.prior.ln_pp_cache(&self.obs()))
    }

    #[inline]
    pub fn observe(&mut self, x: &X) {
        self.stat.observe(x);
        self.reset_ln_pp_cache();
    }

    #[inline]
    pub fn forget(&mut self, x: &X) {
        self.stat.forget(x);
        self.reset_ln_pp_cache();
    }

    /// Log posterior predictive of `x` given the absorbed data
    #[inline]
    pub fn ln_pp(&self, x: &X) -> f64 {
        self.prior.ln_pp_with_cache(self.ln_pp_cache(), x)
    }

    /// Log marginal likelihood of the absorbed data
    #[inline]
    pub fn ln_m(&self) -> f64 {
        let cache = self.prior.ln_m_cache();
        self.prior.ln_m_with_cache(&cache, &self.obs())
    }

    /// Draw from the posterior predictive
    pub fn draw<R: Rng>(&self, rng: &mut R) -> X {
        let posterior = self.prior.posterior(&self.obs());
        let fx: Fx = <Pr::Posterior as Rv<Fx>>::draw(&posterior, rng);
        <Fx as Rv<X>>::draw(&fx, rng)
    }
}
