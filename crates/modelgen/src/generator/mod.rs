pub mod analyzer;
pub mod codegen;
pub mod dedup;
pub mod errors;
pub mod metrics;
pub mod model;
pub mod naming;
pub mod orchestrator;
pub mod partition;
pub mod preprocess;
pub mod resolver;

#[cfg(test)]
mod tests;
