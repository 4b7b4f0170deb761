/// Convert PascalCase or camelCase to snake_case.
///
/// Used by the code generator to turn pattern names into Rust module names.
///
/// # Examples
/// ```
/// use remac_core::utils::to_snake_case;
/// assert_eq!(to_snake_case("FooBar"), "foo_bar");
/// assert_eq!(to_snake_case("fooBar"), "foo_bar");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 && !result.ends_with('_') {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else if c == '-' || c == '.' {
            if !result.ends_with('_') {
                result.push('_');
            }
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_to_snake() {
        assert_eq!(to_snake_case("Word"), "word");
        assert_eq!(to_snake_case("HexNumber"), "hex_number");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
    }
}
