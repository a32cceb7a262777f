//! Read-only views into a network's arena, for inspection and visualisation.
//!
//! Every view borrows the network, so none can outlive the arena it reads.

use crate::arena::Arena;
use crate::network::layout::{LayerHandle, LayerTable, NodeHandle, SynapseHandle};

#[derive(Clone, Copy, Debug)]
pub struct LayerView<'a> {
    arena: &'a Arena,
    index: usize,
    handle: LayerHandle,
}

impl<'a> LayerView<'a> {
    pub(crate) fn new(arena: &'a Arena, index: usize, handle: LayerHandle) -> Self {
        LayerView { arena, index, handle }
    }

    /// Position of the layer in the network (0 = input).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.handle.size(self.arena)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn node(&self, index: usize) -> Option<NodeView<'a>> {
        self.handle
            .node(self.arena, index)
            .map(|handle| NodeView { arena: self.arena, handle })
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeView<'a>> + 'a {
        let layer = *self;
        (0..layer.len()).filter_map(move |j| layer.node(j))
    }

    /// Activations of every node in the layer, in node order.
    pub fn activations(&self) -> Vec<f64> {
        self.nodes().map(|node| node.activation()).collect()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct NodeView<'a> {
    arena: &'a Arena,
    handle: NodeHandle,
}

impl<'a> NodeView<'a> {
    /// Output of the node in the most recent forward pass.
    pub fn activation(&self) -> f64 {
        self.handle.activation(self.arena)
    }

    /// Weighted input sum before the activation function, from the most recent pass.
    pub fn pre_activation(&self) -> f64 {
        self.handle.pre_activation(self.arena)
    }

    /// Incoming synapses; equals the previous layer's size, 0 for input nodes.
    pub fn synapse_count(&self) -> usize {
        self.handle.synapse_count(self.arena)
    }

    pub fn synapse(&self, index: usize) -> Option<SynapseView<'a>> {
        self.handle
            .synapse(self.arena, index)
            .map(|handle| SynapseView { arena: self.arena, handle })
    }

    pub fn synapses(&self) -> impl Iterator<Item = SynapseView<'a>> + 'a {
        let node = *self;
        (0..node.synapse_count()).filter_map(move |k| node.synapse(k))
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SynapseView<'a> {
    arena: &'a Arena,
    handle: SynapseHandle,
}

impl SynapseView<'_> {
    pub fn weight(&self) -> f64 {
        self.handle.weight(self.arena)
    }

    /// Momentum-blended gradient from the most recent training step.
    pub fn delta(&self) -> f64 {
        self.handle.delta(self.arena)
    }
}

/// Iterator over the layers of a network, input first.
pub struct Layers<'a> {
    arena: &'a Arena,
    table: LayerTable,
    next: usize,
}

impl<'a> Layers<'a> {
    pub(crate) fn new(arena: &'a Arena, table: LayerTable) -> Self {
        Layers { arena, table, next: 0 }
    }
}

impl<'a> Iterator for Layers<'a> {
    type Item = LayerView<'a>;

    fn next(&mut self) -> Option<LayerView<'a>> {
        let handle = self.table.layer(self.next)?;
        let view = LayerView::new(self.arena, self.next, handle);
        self.next += 1;
        Some(view)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.table.len() - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Layers<'_> {}
