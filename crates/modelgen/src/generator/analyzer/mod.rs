mod cycles;
mod sorter;

pub use cycles::detect_cycles;
pub use sorter::{DependencySorter, MAX_RECURSION_COUNT, SortedModels, sort_models};

#[cfg(test)]
mod tests;
