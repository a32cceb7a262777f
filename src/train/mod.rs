pub mod backprop;
pub mod trainer;

pub use trainer::train_network;
