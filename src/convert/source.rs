//! Wrap source-code listings in a fenced markdown block.

/// Extension to fence-language table.
const LANGUAGES: &[(&str, &str)] = &[
    ("py", "python"),
    ("js", "javascript"),
    ("ts", "typescript"),
];

/// Look up the fence language for a file extension (without the dot).
///
/// # Examples
///
/// ```
/// use mastery::convert::language_for_extension;
///
/// assert_eq!(language_for_extension("py"), Some("python"));
/// assert_eq!(language_for_extension("rb"), None);
/// ```
pub fn language_for_extension(extension: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(ext, _)| ext.eq_ignore_ascii_case(extension))
        .map(|(_, language)| *language)
}

/// Wrap `source` in a fenced block tagged by its extension.
///
/// Unknown extensions return the text unchanged, since a wrong tag would
/// mislabel the listing. Fence sequences inside `source` are not escaped.
pub fn wrap_source(source: &str, extension: &str) -> String {
    match language_for_extension(extension) {
        Some(language) => fence(source, language),
        None => source.to_string(),
    }
}

pub(super) fn fence(source: &str, language: &str) -> String {
    format!("# Code Examples\n\n```{language}\n{source}\n```")
}
