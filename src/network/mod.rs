pub mod forward;
pub mod layout;
pub mod network;
pub mod settings;
pub mod values;
pub mod view;

pub use network::{Network, NetworkState};
pub use settings::{NetworkSettings, MAX_NODES_PER_LAYER, MAX_NUM_LAYERS};
pub use values::{Input, Output, Values};
pub use view::{LayerView, Layers, NodeView, SynapseView};
