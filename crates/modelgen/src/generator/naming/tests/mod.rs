mod case;
mod identifiers;
