/// Segment classification for route patterns
///
/// Pure functional parsing of `/`-delimited route patterns into typed segments.
/// All functions are **pure**: same input → same output, no side effects.

/// A single `/`-delimited piece of a route pattern
///
/// Functional sum type for pattern matching route segments. Both variants
/// borrow from the pattern they were classified from.
///
/// # Examples
///
/// ```
/// use routegen::pattern::{classify_segment, Segment};
///
/// assert_eq!(classify_segment("about"), Segment::Literal("about"));
/// assert_eq!(classify_segment("[id]"), Segment::Param("id"));
///
/// // Malformed brackets stay literal text
/// assert_eq!(classify_segment("[]"), Segment::Literal("[]"));
/// assert_eq!(classify_segment("[id"), Segment::Literal("[id"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Placeholder segment: `[name]`, carrying the parameter name
    Param(&'a str),
    /// Literal text, matched verbatim
    Literal(&'a str),
}

impl<'a> Segment<'a> {
    /// Parameter name if this is a placeholder segment
    pub fn param_name(&self) -> Option<&'a str> {
        match *self {
            Segment::Param(name) => Some(name),
            Segment::Literal(_) => None,
        }
    }
}

/// Classifies a segment into a pattern segment (pure function)
///
/// # Parsing Rules
///
/// 1. **Placeholder**: the whole segment is `[name]` where `name` is non-empty
///    and contains no brackets
/// 2. **Literal**: anything else, including `[]`, unterminated `[name`,
///    partial-segment placeholders like `v[id]` and nested `[[id]]`
pub fn classify_segment(segment: &str) -> Segment<'_> {
    match segment.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        Some(name) if is_param_name(name) => Segment::Param(name),
        _ => Segment::Literal(segment),
    }
}

fn is_param_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['[', ']'])
}

/// Splits a route pattern into classified segments, left to right
///
/// Splitting is on every `/`, so the leading slash yields an empty literal
/// and a trailing slash yields a trailing empty literal. `/a` and `/a/`
/// therefore produce different segment lists.
pub fn segments(pattern: &str) -> impl Iterator<Item = Segment<'_>> {
    pattern.split('/').map(classify_segment)
}
