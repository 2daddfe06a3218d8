use crate::{
    algorithm::{
        bitset::TileBitset,
        propagation::{PropagationReport, propagate},
        selection::{SelectionContext, SelectionPolicy, Selector},
    },
    io::configuration::DEFAULT_SEED,
    io::error::{Result, invalid_parameter},
    spatial::DomainGrid,
    tiles::{Prototype, PrototypeRegistry},
};
use rand::{SeedableRng, rngs::StdRng};

/// Grid solver owning its prototype registry, domains and random source
///
/// Collapses the least-determined cell, propagates, and repeats until every
/// cell holds one tile or some cell runs out of candidates.
#[derive(Debug)]
pub struct TileCollapse {
    registry: PrototypeRegistry,
    grid: DomainGrid,
    policy: SelectionPolicy,
    rng: StdRng,
}

impl TileCollapse {
    /// Create a solver with the default seed
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or too large
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::with_seed(width, height, DEFAULT_SEED)
    }

    /// Create a solver with a specific seed
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or too large
    pub fn with_seed(width: usize, height: usize, seed: u64) -> Result<Self> {
        let registry = PrototypeRegistry::new();
        let grid = DomainGrid::new(width, height, &registry.full_domain())?;
        Ok(Self {
            registry,
            grid,
            policy: SelectionPolicy::default(),
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Restart the random source
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Replace the collapse policy
    pub fn set_policy(&mut self, policy: SelectionPolicy) {
        self.policy = policy;
    }

    /// Builder form of [`TileCollapse::set_policy`]
    #[must_use]
    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Current collapse policy
    pub const fn policy(&self) -> &SelectionPolicy {
        &self.policy
    }

    /// Registered prototypes and their adjacency
    pub const fn registry(&self) -> &PrototypeRegistry {
        &self.registry
    }

    /// Current domains
    pub const fn grid(&self) -> &DomainGrid {
        &self.grid
    }

    /// Grid width
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Grid height
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Number of cells
    pub fn cell_count(&self) -> usize {
        self.grid.cell_count()
    }

    /// Whether `(x, y)` lies on the grid
    pub fn inside(&self, x: usize, y: usize) -> bool {
        self.grid.inside(x, y)
    }

    /// Register prototypes, rebuild adjacency and reset every cell
    ///
    /// # Errors
    ///
    /// Returns an error if an id is duplicated or a weight is invalid; the
    /// registry and grid are unchanged in that case
    pub fn add_prototypes<I>(&mut self, batch: I) -> Result<()>
    where
        I: IntoIterator<Item = Prototype>,
    {
        self.registry.add(batch)?;
        tracing::debug!(prototypes = self.registry.len(), "registry.rebuilt");
        self.reset();
        Ok(())
    }

    /// Change the grid size; every cell starts fully undetermined
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or too large
    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        self.grid = DomainGrid::new(width, height, &self.registry.full_domain())?;
        Ok(())
    }

    /// Make every registered prototype possible in every cell again
    pub fn reset(&mut self) {
        self.grid.fill(&self.registry.full_domain());
    }

    /// Domain at a cell
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates are outside the grid
    pub fn get(&self, x: usize, y: usize) -> Result<&TileBitset> {
        self.grid.domain(x, y)
    }

    /// Copy of the ids still possible at a cell, in registration order
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates are outside the grid
    pub fn domain_ids(&self, x: usize, y: usize) -> Result<Vec<String>> {
        Ok(self
            .grid
            .domain(x, y)?
            .iter()
            .filter_map(|index| self.registry.id_of(index))
            .map(str::to_string)
            .collect())
    }

    /// Replace the domain at a cell and propagate from it
    ///
    /// An empty `ids` slice empties the cell, which the next
    /// [`TileCollapse::solve`] reports as a failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates are outside the grid or an id is
    /// not registered
    pub fn set<S: AsRef<str>>(
        &mut self,
        x: usize,
        y: usize,
        ids: &[S],
    ) -> Result<PropagationReport> {
        let domain = self.registry.resolve(ids)?;
        *self.grid.domain_mut(x, y)? = domain;
        self.propagate(x, y)
    }

    /// Force every undetermined border cell to `ids`, propagating from each
    ///
    /// Cells that are already collapsed or empty are left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if an id is not registered
    pub fn ring_constrain<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<PropagationReport> {
        let domain = self.registry.resolve(ids)?;
        let mut report = PropagationReport::default();
        for (x, y) in self.grid.border() {
            let cell = self.grid.domain_mut(x, y)?;
            if cell.count() > 1 {
                cell.clone_from(&domain);
                report.absorb(self.propagate(x, y)?);
            }
        }
        Ok(report)
    }

    /// Propagate constraints outward from `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates are outside the grid
    pub fn propagate(&mut self, x: usize, y: usize) -> Result<PropagationReport> {
        propagate(&mut self.grid, &self.registry, x, y)
    }

    /// Collapse one cell to a single tile chosen by the policy
    ///
    /// Returns the chosen registry index, or `None` for an empty cell. Does
    /// not propagate.
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates are outside the grid or the
    /// policy picks a tile that is not in the cell's domain
    pub fn collapse_cell(&mut self, x: usize, y: usize) -> Result<Option<usize>> {
        let domain = self.grid.domain(x, y)?;
        if domain.is_empty() {
            return Ok(None);
        }

        let context = SelectionContext {
            registry: &self.registry,
            grid: &self.grid,
            x,
            y,
            domain,
        };
        let choice = self.policy.select(&context, &mut self.rng);
        let chosen = match choice {
            Some(index) if domain.contains(index) => index,
            other => {
                return Err(invalid_parameter(
                    "selection",
                    &format!("{other:?}"),
                    &format!(
                        "{} policy must pick a member of the domain at ({x}, {y})",
                        self.policy.name()
                    ),
                ));
            }
        };

        let capacity = self.registry.len();
        *self.grid.domain_mut(x, y)? = TileBitset::single(chosen, capacity);
        tracing::trace!(x, y, tile = self.registry.id_of(chosen), "cell.collapsed");
        Ok(Some(chosen))
    }

    /// Coordinates of the smallest domain with more than one candidate
    ///
    /// Ties go to the earliest cell in linear order. Empty cells are never
    /// returned.
    pub fn min_entropy_cell(&self) -> Option<(usize, usize)> {
        self.grid
            .cells()
            .map(|(coordinates, domain)| (coordinates, domain.count()))
            .filter(|&(_, count)| count > 1)
            .min_by_key(|&(_, count)| count)
            .map(|(coordinates, _)| coordinates)
    }

    /// Every cell holds at most one candidate
    pub fn is_complete(&self) -> bool {
        self.grid.cells().all(|(_, domain)| domain.count() <= 1)
    }

    /// Some cell has no candidate left
    pub fn is_failed(&self) -> bool {
        self.grid.cells().any(|(_, domain)| domain.is_empty())
    }

    /// Number of cells holding exactly one candidate
    pub fn collapsed_count(&self) -> usize {
        self.grid
            .cells()
            .filter(|(_, domain)| domain.count() == 1)
            .count()
    }

    /// Collapse and propagate until the grid is complete or contradicts
    ///
    /// Returns `true` when every cell holds exactly one tile. A contradiction
    /// is reported as `false`, never as an error, and nothing is rolled
    /// back. Each iteration fixes at least one cell, so the loop ends after
    /// at most `cell_count` collapses.
    ///
    /// # Errors
    ///
    /// Returns an error if the policy picks a tile outside a cell's domain
    pub fn solve(&mut self) -> Result<bool> {
        let mut collapses = 0usize;
        loop {
            if self.is_failed() {
                tracing::debug!(collapses, "solve.contradiction");
                return Ok(false);
            }
            let Some((x, y)) = self.min_entropy_cell() else {
                tracing::debug!(collapses, "solve.complete");
                return Ok(true);
            };
            self.collapse_cell(x, y)?;
            let report = self.propagate(x, y)?;
            collapses += 1;
            tracing::trace!(
                x,
                y,
                visited = report.visited,
                removed = report.removed,
                "solve.step"
            );
        }
    }

    /// Registry index per cell in linear order, `None` where not collapsed
    pub fn result_indices(&self) -> Vec<Option<usize>> {
        self.grid.cells().map(|(_, domain)| domain.sole()).collect()
    }

    /// Tile id per cell in linear order, `None` where not collapsed
    pub fn results(&self) -> Vec<Option<String>> {
        self.result_indices()
            .into_iter()
            .map(|index| {
                index
                    .and_then(|index| self.registry.id_of(index))
                    .map(str::to_string)
            })
            .collect()
    }

    /// Tile id at a collapsed cell
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates are outside the grid
    pub fn result_at(&self, x: usize, y: usize) -> Result<Option<&str>> {
        Ok(self
            .grid
            .domain(x, y)?
            .sole()
            .and_then(|index| self.registry.id_of(index)))
    }
}
