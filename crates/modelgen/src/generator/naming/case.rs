use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;

/// Entries kept before the converter drops its cache and starts over.
pub const DEFAULT_CACHE_CAPACITY: usize = 128;

static WORD_BOUNDARY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z]+)").unwrap());
static CASE_BOUNDARY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());

/// Converts `camelCase` / `PascalCase` into `snake_case`.
///
/// Acronyms stay grouped (`HTTPResponse` -> `http_response`) and digits bind to the
/// preceding word (`userID2Name` -> `user_id2_name`).
pub fn camel_to_snake(input: &str) -> String {
  let split_words = WORD_BOUNDARY_RE.replace_all(input, "${1}_${2}");
  CASE_BOUNDARY_RE
    .replace_all(&split_words, "${1}_${2}")
    .to_lowercase()
}

/// Memoizing wrapper around [`camel_to_snake`].
///
/// The cache is owned by the converter and bounded: once `capacity` entries are
/// stored it is cleared before the next insert, so long runs never grow it
/// without limit. A capacity of zero disables caching.
#[derive(Debug, Clone)]
pub struct CaseConverter {
  cache: HashMap<String, String>,
  capacity: usize,
}

impl Default for CaseConverter {
  fn default() -> Self {
    Self::with_capacity(DEFAULT_CACHE_CAPACITY)
  }
}

impl CaseConverter {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      cache: HashMap::with_capacity(capacity),
      capacity,
    }
  }

  pub fn to_snake_case(&mut self, input: &str) -> String {
    if let Some(converted) = self.cache.get(input) {
      return converted.clone();
    }

    let converted = camel_to_snake(input);
    if self.capacity > 0 {
      if self.cache.len() >= self.capacity {
        self.cache.clear();
      }
      self.cache.insert(input.to_string(), converted.clone());
    }
    converted
  }

  pub fn cached(&self) -> usize {
    self.cache.len()
  }

  pub fn clear(&mut self) {
    self.cache.clear();
  }
}
