pub mod store;
pub mod task;

pub use store::*;
pub use task::*;
