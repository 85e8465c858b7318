pub mod assemble;
pub mod list;

pub use assemble::{AssembleConfig, assemble_models};
pub use list::list_models;
