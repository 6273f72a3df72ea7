//! Requirement line parsing.
//!
//! Turns lines from a `requirements.txt`-style file into canonical
//! dependency identifiers by stripping version constraints.

/// Separators tried in priority order. The first one present in a line wins.
const SEPARATORS: [&str; 6] = ["==", ">=", "<=", ">", "<", " "];

/// Extracts the dependency identifier from a raw requirement line.
///
/// The line is split once on the first separator (in priority order) that it
/// contains, and the trimmed left-hand side is returned. Lines without any
/// separator are returned trimmed. No validation is performed: any input
/// yields some identifier.
///
/// # Example
///
/// ```
/// use vulntrack::requirement::extract_identifier;
///
/// assert_eq!(extract_identifier("flask==2.0.1"), "flask");
/// assert_eq!(extract_identifier("requests>=2.0"), "requests");
/// assert_eq!(extract_identifier("this-is-not-valid"), "this-is-not-valid");
/// ```
pub fn extract_identifier(line: &str) -> String {
    for separator in SEPARATORS {
        if let Some((name, _)) = line.split_once(separator) {
            return name.trim().to_string();
        }
    }

    line.trim().to_string()
}

/// Returns the requirement lines of a file, skipping blank and comment lines.
pub fn requirement_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
