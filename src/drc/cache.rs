//! Memoised per-layer copper areas.
//!
//! Several checks need "all copper on layer X restricted to nets Y",
//! which is expensive to generate. Results are cached per
//! (layer, net-signal set, ignore-planes) key, populated lazily on first
//! request and dropped with the cache when the run ends. The cache is
//! owned by one run; once checks start reading from it the board must
//! not change.

use std::collections::HashMap;
use uuid::Uuid;

use crate::board::Board;
use crate::geometry::{GeometryError, PolygonSet, PositiveLength};

use super::generator::{BoardPathGenerator, NetSignalSet};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    layer: String,
    nets: Option<NetSignalSet>,
    ignore_planes: bool,
}

pub struct CopperPathsCache {
    arc_tolerance: PositiveLength,
    entries: HashMap<CacheKey, PolygonSet>,
}

impl CopperPathsCache {
    pub fn new(arc_tolerance: PositiveLength) -> Self {
        CopperPathsCache {
            arc_tolerance,
            entries: HashMap::new(),
        }
    }

    /// All copper on `layer` restricted to `nets` (absent filter = every
    /// net), generated on first request.
    pub fn copper_paths(
        &mut self,
        board: &Board,
        layer: &str,
        nets: Option<&NetSignalSet>,
        ignore_planes: bool,
    ) -> Result<&PolygonSet, GeometryError> {
        let key = CacheKey {
            layer: layer.to_string(),
            nets: nets.cloned(),
            ignore_planes,
        };
        if !self.entries.contains_key(&key) {
            let mut generator = BoardPathGenerator::new(board, self.arc_tolerance);
            generator.add_copper(layer, nets, ignore_planes)?;
            self.entries.insert(key.clone(), generator.take_paths());
        }
        Ok(&self.entries[&key])
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
