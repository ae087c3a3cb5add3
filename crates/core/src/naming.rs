//! Display-name formatting for people and characters.

/// Join the non-empty parts of a personal name with single spaces.
///
/// Suffixes are attached with a comma, so `("Martin", "Luther", "King",
/// "Jr.")` renders as `Martin Luther King, Jr.`.
///
/// ```
/// use library_core::naming::full_name;
///
/// assert_eq!(full_name("Brandon", None, "Sanderson", None), "Brandon Sanderson");
/// assert_eq!(full_name("Vin", None, "", None), "Vin");
/// ```
pub fn full_name(first: &str, middle: Option<&str>, last: &str, suffix: Option<&str>) -> String {
    let mut name = [Some(first), middle, Some(last)]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if let Some(suffix) = suffix.map(str::trim).filter(|s| !s.is_empty()) {
        if !name.is_empty() {
            name.push_str(", ");
        }
        name.push_str(suffix);
    }

    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_name_is_included() {
        assert_eq!(
            full_name("John", Some("Ronald Reuel"), "Tolkien", None),
            "John Ronald Reuel Tolkien"
        );
    }

    #[test]
    fn suffix_uses_comma() {
        assert_eq!(
            full_name("Martin", Some("Luther"), "King", Some("Jr.")),
            "Martin Luther King, Jr."
        );
    }

    #[test]
    fn blank_parts_are_skipped() {
        assert_eq!(full_name("Vin", Some("  "), "", Some("")), "Vin");
    }
}
