//! Byte layout of a network inside its arena.
//!
//! The arena holds, in allocation order:
//!
//! 1. the layer table: one 8-byte header per layer
//!    (`nodes_offset: u32`, `size: u32`);
//! 2. per layer, its node block: one 24-byte header per node
//!    (`activation: f64`, `pre_activation: f64`, `synapses_offset: u32`,
//!    `synapse_count: u32`), each node block immediately followed by the
//!    synapse blocks of its nodes;
//! 3. per node of every non-input layer, its synapse block: one 16-byte
//!    record per incoming synapse (`weight: f64`, `delta: f64`).
//!
//! Input-layer nodes have no synapses and store [`NULL_OFFSET`] as their
//! synapse reference. All values are little-endian and unaligned.

use rand::Rng;
use tracing::debug;

use crate::arena::{Arena, Span};
use crate::error::Result;
use crate::network::settings::NetworkSettings;

pub const LAYER_RECORD_SIZE: usize = 8;
pub const NODE_RECORD_SIZE: usize = 24;
pub const SYNAPSE_RECORD_SIZE: usize = 16;

/// Synapse reference stored by nodes that have no synapses.
pub(crate) const NULL_OFFSET: u32 = u32::MAX;

// Field offsets within each record.
const LAYER_NODES: usize = 0;
const LAYER_SIZE: usize = 4;
const NODE_ACTIVATION: usize = 0;
const NODE_PRE_ACTIVATION: usize = 8;
const NODE_SYNAPSES: usize = 16;
const NODE_SYNAPSE_COUNT: usize = 20;
const SYNAPSE_WEIGHT: usize = 0;
const SYNAPSE_DELTA: usize = 8;

/// Exact number of bytes a network with `layer_sizes` occupies.
pub fn footprint(layer_sizes: &[usize]) -> usize {
    let total_nodes: usize = layer_sizes.iter().sum();
    let total_synapses: usize = layer_sizes
        .windows(2)
        .map(|pair| pair[0] * pair[1])
        .sum();

    layer_sizes.len() * LAYER_RECORD_SIZE
        + total_nodes * NODE_RECORD_SIZE
        + total_synapses * SYNAPSE_RECORD_SIZE
}

/// Location of the layer table inside the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct LayerTable {
    span: Span,
    len: usize,
}

impl LayerTable {
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn layer(&self, index: usize) -> Option<LayerHandle> {
        (index < self.len).then(|| self.layer_at(index))
    }

    /// Layer `index` without a bounds check; `index` must be below `len()`.
    #[inline]
    pub(crate) fn layer_at(&self, index: usize) -> LayerHandle {
        LayerHandle(self.span.offset() + index * LAYER_RECORD_SIZE)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct LayerHandle(usize);

impl LayerHandle {
    pub(crate) fn size(self, arena: &Arena) -> usize {
        arena.read_u32(self.0 + LAYER_SIZE) as usize
    }

    pub(crate) fn node(self, arena: &Arena, index: usize) -> Option<NodeHandle> {
        (index < self.size(arena)).then(|| self.node_at(arena, index))
    }

    /// Node `index` without a bounds check; `index` must be below `size()`.
    #[inline]
    pub(crate) fn node_at(self, arena: &Arena, index: usize) -> NodeHandle {
        let nodes = arena.read_u32(self.0 + LAYER_NODES) as usize;
        NodeHandle(nodes + index * NODE_RECORD_SIZE)
    }

    fn init(self, arena: &mut Arena, nodes: Span, size: usize) {
        arena.write_u32(self.0 + LAYER_NODES, nodes.offset() as u32);
        arena.write_u32(self.0 + LAYER_SIZE, size as u32);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct NodeHandle(usize);

impl NodeHandle {
    pub(crate) fn activation(self, arena: &Arena) -> f64 {
        arena.read_f64(self.0 + NODE_ACTIVATION)
    }

    pub(crate) fn set_activation(self, arena: &mut Arena, value: f64) {
        arena.write_f64(self.0 + NODE_ACTIVATION, value);
    }

    pub(crate) fn pre_activation(self, arena: &Arena) -> f64 {
        arena.read_f64(self.0 + NODE_PRE_ACTIVATION)
    }

    pub(crate) fn set_pre_activation(self, arena: &mut Arena, value: f64) {
        arena.write_f64(self.0 + NODE_PRE_ACTIVATION, value);
    }

    pub(crate) fn synapse_count(self, arena: &Arena) -> usize {
        arena.read_u32(self.0 + NODE_SYNAPSE_COUNT) as usize
    }

    /// Byte offset of the synapse block, `None` for input-layer nodes.
    pub(crate) fn synapses_offset(self, arena: &Arena) -> Option<usize> {
        match arena.read_u32(self.0 + NODE_SYNAPSES) {
            NULL_OFFSET => None,
            offset => Some(offset as usize),
        }
    }

    pub(crate) fn synapse(self, arena: &Arena, index: usize) -> Option<SynapseHandle> {
        if index >= self.synapse_count(arena) {
            return None;
        }
        self.synapses_offset(arena)
            .map(|base| SynapseHandle(base + index * SYNAPSE_RECORD_SIZE))
    }

    /// Synapse `index` without a bounds check; `index` must be below `synapse_count()`.
    #[inline]
    pub(crate) fn synapse_at(self, arena: &Arena, index: usize) -> SynapseHandle {
        let base = arena.read_u32(self.0 + NODE_SYNAPSES) as usize;
        SynapseHandle(base + index * SYNAPSE_RECORD_SIZE)
    }

    #[cfg(test)]
    pub(crate) fn set_synapse_count(self, arena: &mut Arena, count: usize) {
        arena.write_u32(self.0 + NODE_SYNAPSE_COUNT, count as u32);
    }

    fn init(self, arena: &mut Arena, synapses: Option<Span>, count: usize) {
        self.set_activation(arena, 0.0);
        self.set_pre_activation(arena, 0.0);
        let offset = synapses.map_or(NULL_OFFSET, |span| span.offset() as u32);
        arena.write_u32(self.0 + NODE_SYNAPSES, offset);
        arena.write_u32(self.0 + NODE_SYNAPSE_COUNT, count as u32);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SynapseHandle(usize);

impl SynapseHandle {
    pub(crate) fn weight(self, arena: &Arena) -> f64 {
        arena.read_f64(self.0 + SYNAPSE_WEIGHT)
    }

    pub(crate) fn set_weight(self, arena: &mut Arena, value: f64) {
        arena.write_f64(self.0 + SYNAPSE_WEIGHT, value);
    }

    pub(crate) fn delta(self, arena: &Arena) -> f64 {
        arena.read_f64(self.0 + SYNAPSE_DELTA)
    }

    pub(crate) fn set_delta(self, arena: &mut Arena, value: f64) {
        arena.write_f64(self.0 + SYNAPSE_DELTA, value);
    }
}

/// Lays out the layers, nodes and synapses described by `settings` in `arena`.
///
/// Settings are validated before anything is allocated. Weights are drawn
/// uniformly from [-1, 1) and every delta starts at zero.
pub(crate) fn carve<R: Rng + ?Sized>(
    arena: &mut Arena,
    settings: &NetworkSettings,
    rng: &mut R,
) -> Result<LayerTable> {
    settings.validate()?;
    let sizes = &settings.layer_sizes;

    let table = LayerTable {
        span: arena.allocate(sizes.len() * LAYER_RECORD_SIZE)?,
        len: sizes.len(),
    };

    for (layer_index, &size) in sizes.iter().enumerate() {
        let nodes = arena.allocate(size * NODE_RECORD_SIZE)?;
        let layer = table.layer_at(layer_index);
        layer.init(arena, nodes, size);

        let synapse_count = if layer_index == 0 { 0 } else { sizes[layer_index - 1] };
        for node_index in 0..size {
            let node = NodeHandle(nodes.offset() + node_index * NODE_RECORD_SIZE);
            if synapse_count == 0 {
                node.init(arena, None, 0);
                continue;
            }

            let synapses = arena.allocate(synapse_count * SYNAPSE_RECORD_SIZE)?;
            node.init(arena, Some(synapses), synapse_count);
            for k in 0..synapse_count {
                let synapse = SynapseHandle(synapses.offset() + k * SYNAPSE_RECORD_SIZE);
                synapse.set_weight(arena, rng.gen_range(-1.0..1.0));
                synapse.set_delta(arena, 0.0);
            }
        }
    }

    debug!(layers = sizes.len(), bytes = arena.used(), "network carved");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn footprint_counts_headers_and_synapses() {
        // 3 layer headers, 6 nodes, 2*3 + 3*1 synapses
        assert_eq!(footprint(&[2, 3, 1]), 3 * 8 + 6 * 24 + 9 * 16);
        assert_eq!(footprint(&[1, 1]), 2 * 8 + 2 * 24 + 16);
    }

    #[test]
    fn carving_fills_the_arena_exactly() {
        let settings = NetworkSettings::new(vec![3, 4, 2]);
        let mut arena = Arena::create(footprint(&settings.layer_sizes)).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let table = carve(&mut arena, &settings, &mut rng).unwrap();
        assert_eq!(table.len(), 3);
        assert!(arena.is_full());
    }

    #[test]
    fn input_nodes_have_null_synapse_reference() {
        let settings = NetworkSettings::new(vec![2, 2]);
        let mut arena = Arena::create(footprint(&settings.layer_sizes)).unwrap();
        let table = carve(&mut arena, &settings, &mut StdRng::seed_from_u64(0)).unwrap();

        let input = table.layer(0).unwrap();
        for j in 0..2 {
            let node = input.node(&arena, j).unwrap();
            assert_eq!(node.synapse_count(&arena), 0);
            assert_eq!(node.synapses_offset(&arena), None);
            assert!(node.synapse(&arena, 0).is_none());
        }
        assert!(input.node(&arena, 2).is_none());
        assert!(table.layer(2).is_none());
    }

    #[test]
    fn weights_are_uniform_in_range_and_deltas_zero() {
        let settings = NetworkSettings::new(vec![10, 10, 10]);
        let mut arena = Arena::create(footprint(&settings.layer_sizes)).unwrap();
        let table = carve(&mut arena, &settings, &mut StdRng::seed_from_u64(42)).unwrap();

        for l in 1..3 {
            let layer = table.layer(l).unwrap();
            for j in 0..10 {
                let node = layer.node(&arena, j).unwrap();
                for k in 0..10 {
                    let synapse = node.synapse(&arena, k).unwrap();
                    let w = synapse.weight(&arena);
                    assert!((-1.0..1.0).contains(&w));
                    assert_eq!(synapse.delta(&arena), 0.0);
                }
            }
        }
    }

    #[test]
    fn invalid_topology_allocates_nothing() {
        let mut arena = Arena::create(1024).unwrap();
        let settings = NetworkSettings::new(vec![2, 51, 1]);
        let err = carve(&mut arena, &settings, &mut StdRng::seed_from_u64(0)).unwrap_err();
        assert!(matches!(err, Error::InvalidTopology(_)));
        assert_eq!(arena.used(), 0);
    }

    #[test]
    fn undersized_arena_reports_out_of_memory() {
        let settings = NetworkSettings::new(vec![2, 3, 1]);
        let mut arena = Arena::create(footprint(&settings.layer_sizes) - 1).unwrap();
        let err = carve(&mut arena, &settings, &mut StdRng::seed_from_u64(0)).unwrap_err();
        // The output node's three synapses are the last block carved.
        assert!(matches!(err, Error::OutOfMemory {
                requested: 48,
                remaining: 47
            }));
    }
}
