pub mod case;
pub mod identifiers;

#[cfg(test)]
mod tests;
