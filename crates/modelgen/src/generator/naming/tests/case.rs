use crate::generator::naming::case::{CaseConverter, camel_to_snake};

#[test]
fn test_camel_to_snake() {
  let cases = [
    ("camelCase", "camel_case"),
    ("PascalCase", "pascal_case"),
    ("HTTPResponse", "http_response"),
    ("getHTTPResponseCode", "get_http_response_code"),
    ("userID2Name", "user_id2_name"),
    ("already_snake", "already_snake"),
    ("ID", "id"),
    ("", ""),
  ];
  for (input, expected) in cases {
    assert_eq!(camel_to_snake(input), expected, "failed for input {input:?}");
  }
}

#[test]
fn test_converter_caches_results() {
  let mut converter = CaseConverter::new();
  assert_eq!(converter.to_snake_case("petName"), "pet_name");
  assert_eq!(converter.to_snake_case("petName"), "pet_name");
  assert_eq!(converter.cached(), 1, "repeated lookups should hit the same entry");

  converter.clear();
  assert_eq!(converter.cached(), 0);
}

#[test]
fn test_converter_cache_is_bounded() {
  let mut converter = CaseConverter::with_capacity(2);
  converter.to_snake_case("firstName");
  converter.to_snake_case("lastName");
  assert_eq!(converter.cached(), 2);

  assert_eq!(converter.to_snake_case("middleName"), "middle_name");
  assert_eq!(converter.cached(), 1, "a full cache should be cleared before inserting");
}

#[test]
fn test_converter_zero_capacity_disables_cache() {
  let mut converter = CaseConverter::with_capacity(0);
  assert_eq!(converter.to_snake_case("petName"), "pet_name");
  assert_eq!(converter.cached(), 0);
}
