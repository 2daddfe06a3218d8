//! Per-solver prototype table and compatibility graph
//!
//! Prototypes are addressed by their registration index. For every prototype
//! and direction the registry keeps two bitsets: the prototypes allowed on
//! that side (socket match) and the prototypes forbidden there (antisocket
//! match). Forbidden always wins over allowed.

use crate::algorithm::bitset::TileBitset;
use crate::io::error::{Result, TileError, invalid_parameter};
use crate::spatial::direction::Direction;
use crate::tiles::prototype::{Prototype, Sides};
use crate::tiles::socket::Socket;
use std::collections::{HashMap, HashSet};

/// Per-direction adjacency bitsets for one prototype
pub type DirectionalSets = [TileBitset; 4];

/// Ordered prototype table with precomputed adjacency
#[derive(Clone, Debug, Default)]
pub struct PrototypeRegistry {
    prototypes: Vec<Prototype>,
    index_by_id: HashMap<String, usize>,
    allowed: Vec<DirectionalSets>,
    forbidden: Vec<DirectionalSets>,
}

impl PrototypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a batch of prototypes and rebuild the compatibility graph
    ///
    /// The batch is validated as a whole before anything is inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An id is already registered or repeats within the batch
    /// - A weight is not a finite positive number
    pub fn add<I>(&mut self, batch: I) -> Result<()>
    where
        I: IntoIterator<Item = Prototype>,
    {
        let batch: Vec<Prototype> = batch.into_iter().collect();

        let mut pending = HashSet::with_capacity(batch.len());
        for prototype in &batch {
            if !(prototype.weight.is_finite() && prototype.weight > 0.0) {
                return Err(invalid_parameter(
                    "weight",
                    &prototype.weight,
                    &format!("prototype '{}' needs a finite positive weight", prototype.id),
                ));
            }
            if self.index_by_id.contains_key(&prototype.id)
                || !pending.insert(prototype.id.as_str())
            {
                return Err(TileError::DuplicatePrototype {
                    id: prototype.id.clone(),
                });
            }
        }

        for prototype in batch {
            self.index_by_id
                .insert(prototype.id.clone(), self.prototypes.len());
            self.prototypes.push(prototype);
        }

        self.rebuild_adjacency();
        Ok(())
    }

    /// Recompute both adjacency tables from the socket rule
    ///
    /// Pairs are tested once each, with the lower index as the current side,
    /// and recorded in both directions.
    fn rebuild_adjacency(&mut self) {
        let count = self.prototypes.len();
        self.allowed = vec![empty_sets(count); count];
        self.forbidden = vec![empty_sets(count); count];

        for added in 0..count {
            for current in 0..=added {
                let (Some(current_proto), Some(added_proto)) =
                    (self.prototypes.get(current), self.prototypes.get(added))
                else {
                    continue;
                };
                let allowed_sides = facing_matches(&current_proto.sockets, &added_proto.sockets);
                let forbidden_sides =
                    facing_matches(&current_proto.antisockets, &added_proto.antisockets);

                for direction in allowed_sides {
                    link(&mut self.allowed, current, added, direction);
                }
                for direction in forbidden_sides {
                    link(&mut self.forbidden, current, added, direction);
                }
            }
        }
    }

    /// Number of registered prototypes
    pub const fn len(&self) -> usize {
        self.prototypes.len()
    }

    /// Test for an empty registry
    pub const fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }

    /// Prototypes in registration order
    pub fn prototypes(&self) -> &[Prototype] {
        &self.prototypes
    }

    /// Prototype at a registry index
    pub fn get(&self, index: usize) -> Option<&Prototype> {
        self.prototypes.get(index)
    }

    /// Registry index for an id
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    /// Id at a registry index
    pub fn id_of(&self, index: usize) -> Option<&str> {
        self.prototypes.get(index).map(|prototype| prototype.id.as_str())
    }

    /// Selection weight at a registry index, zero for unknown indices
    pub fn weight_of(&self, index: usize) -> f64 {
        self.prototypes
            .get(index)
            .map_or(0.0, |prototype| prototype.weight)
    }

    /// Resolve ids to a domain bitset
    ///
    /// # Errors
    ///
    /// Returns an error if any id is not registered
    pub fn resolve<S: AsRef<str>>(&self, ids: &[S]) -> Result<TileBitset> {
        let mut domain = TileBitset::new(self.len());
        for id in ids {
            let id = id.as_ref();
            let index = self.index_of(id).ok_or_else(|| TileError::UnknownTile {
                id: id.to_string(),
            })?;
            domain.insert(index);
        }
        Ok(domain)
    }

    /// Every registered prototype
    pub fn full_domain(&self) -> TileBitset {
        TileBitset::all(self.len())
    }

    /// Prototypes allowed on `direction` side of the prototype at `index`
    pub fn allowed(&self, index: usize, direction: Direction) -> Option<&TileBitset> {
        self.allowed
            .get(index)
            .and_then(|sets| sets.get(direction.index()))
    }

    /// Prototypes forbidden on `direction` side of the prototype at `index`
    pub fn forbidden(&self, index: usize, direction: Direction) -> Option<&TileBitset> {
        self.forbidden
            .get(index)
            .and_then(|sets| sets.get(direction.index()))
    }

    /// Whether `neighbour` may sit on `direction` side of `index`
    pub fn permits(&self, index: usize, direction: Direction, neighbour: usize) -> bool {
        self.allowed(index, direction)
            .is_some_and(|set| set.contains(neighbour))
            && !self
                .forbidden(index, direction)
                .is_some_and(|set| set.contains(neighbour))
    }

    /// Union of allowed sets over every prototype in `domain`
    pub fn allowed_union(&self, domain: &TileBitset, direction: Direction) -> TileBitset {
        union_over(&self.allowed, domain, direction, self.len())
    }

    /// Union of forbidden sets over every prototype in `domain`
    pub fn forbidden_union(&self, domain: &TileBitset, direction: Direction) -> TileBitset {
        union_over(&self.forbidden, domain, direction, self.len())
    }
}

fn empty_sets(count: usize) -> DirectionalSets {
    std::array::from_fn(|_| TileBitset::new(count))
}

/// Directions `d` where `current.d` matches `added.opposite(d)`
fn facing_matches(current: &Sides<Socket>, added: &Sides<Socket>) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|&direction| current.get(direction).matches(added.get(direction.opposite())))
        .collect()
}

fn link(table: &mut [DirectionalSets], current: usize, added: usize, direction: Direction) {
    if let Some(set) = table
        .get_mut(current)
        .and_then(|sets| sets.get_mut(direction.index()))
    {
        set.insert(added);
    }
    if let Some(set) = table
        .get_mut(added)
        .and_then(|sets| sets.get_mut(direction.opposite().index()))
    {
        set.insert(current);
    }
}

fn union_over(
    table: &[DirectionalSets],
    domain: &TileBitset,
    direction: Direction,
    count: usize,
) -> TileBitset {
    let mut union = TileBitset::new(count);
    for index in domain.iter() {
        if let Some(set) = table
            .get(index)
            .and_then(|sets| sets.get(direction.index()))
        {
            union.union_with(set);
        }
    }
    union
}
