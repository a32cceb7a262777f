pub mod arena;
pub mod span;

pub use arena::Arena;
pub use span::Span;
