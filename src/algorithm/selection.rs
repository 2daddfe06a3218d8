use crate::{
    algorithm::bitset::TileBitset,
    math::probability::weighted_choice,
    spatial::DomainGrid,
    tiles::PrototypeRegistry,
};
use rand::{Rng, rngs::StdRng};
use std::fmt;

/// Read-only view handed to a selector for one collapse
pub struct SelectionContext<'a> {
    /// Registered prototypes
    pub registry: &'a PrototypeRegistry,
    /// Current domains
    pub grid: &'a DomainGrid,
    /// Column being collapsed
    pub x: usize,
    /// Row being collapsed
    pub y: usize,
    /// Domain of the cell being collapsed
    pub domain: &'a TileBitset,
}

/// Chooses one tile from a cell's domain
///
/// Implementations must return a registry index contained in
/// `context.domain`, or `None` when the domain is empty.
pub trait Selector {
    /// Choose the tile the cell collapses to
    fn select(&mut self, context: &SelectionContext<'_>, rng: &mut StdRng) -> Option<usize>;
}

impl<F> Selector for F
where
    F: FnMut(&SelectionContext<'_>, &mut StdRng) -> Option<usize>,
{
    fn select(&mut self, context: &SelectionContext<'_>, rng: &mut StdRng) -> Option<usize> {
        self(context, rng)
    }
}

/// Built-in and caller-supplied collapse policies
#[derive(Default)]
pub enum SelectionPolicy {
    /// Lowest registry index in the domain
    First,
    /// Every candidate equally likely
    Uniform,
    /// Candidates drawn in proportion to their weight
    #[default]
    Weighted,
    /// Caller-supplied selector
    Custom(Box<dyn Selector + Send>),
}

impl SelectionPolicy {
    /// Wrap a caller-supplied selector
    pub fn custom<S>(selector: S) -> Self
    where
        S: Selector + Send + 'static,
    {
        Self::Custom(Box::new(selector))
    }

    /// Short policy name for logging
    pub const fn name(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Uniform => "uniform",
            Self::Weighted => "weighted",
            Self::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Selector for SelectionPolicy {
    fn select(&mut self, context: &SelectionContext<'_>, rng: &mut StdRng) -> Option<usize> {
        match self {
            Self::First => select_first(context.domain),
            Self::Uniform => select_uniform(context.domain, rng),
            Self::Weighted => select_weighted(context.domain, context.registry, rng),
            Self::Custom(selector) => selector.select(context, rng),
        }
    }
}

/// Deterministic pick in registration order
pub fn select_first(domain: &TileBitset) -> Option<usize> {
    domain.first()
}

/// Uniform pick among the domain's members
pub fn select_uniform(domain: &TileBitset, rng: &mut StdRng) -> Option<usize> {
    let count = domain.count();
    if count == 0 {
        return None;
    }
    domain.iter().nth(rng.random_range(0..count))
}

/// Weight-proportional pick among the domain's members
pub fn select_weighted(
    domain: &TileBitset,
    registry: &PrototypeRegistry,
    rng: &mut StdRng,
) -> Option<usize> {
    let candidates = domain.to_vec();
    let weights: Vec<f64> = candidates
        .iter()
        .map(|&index| registry.weight_of(index))
        .collect();
    let choice = weighted_choice(&weights, rng.random::<f64>())?;
    candidates.get(choice).copied()
}
