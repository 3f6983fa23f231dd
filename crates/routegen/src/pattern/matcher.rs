/// Conversion between route patterns, matchable patterns and parameter maps
///
/// Everything here is pure except for compiling a regex; nothing touches the
/// filesystem.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

use regex::Regex;

use super::segment::{segments, Segment};
use crate::{Error, Result};

/// Parameter values keyed by placeholder name
pub type Params = HashMap<String, String>;

/// Capture group substituted for each placeholder: one path segment, never `/`
pub const PARAM_CAPTURE: &str = "([^/]+)";

/// Extracts placeholder names in left-to-right order (pure function)
///
/// Only whole-segment `[name]` tokens count, so brackets never span a `/`.
///
/// # Examples
///
/// ```
/// use routegen::pattern::extract_parameter_names;
///
/// assert_eq!(
///     extract_parameter_names("/user/[id]/post/[postId]"),
///     vec!["id", "postId"]
/// );
/// assert!(extract_parameter_names("/about").is_empty());
/// assert!(extract_parameter_names("/a[b/c]d").is_empty());
/// ```
pub fn extract_parameter_names(pattern: &str) -> Vec<String> {
    segments(pattern)
        .filter_map(|segment| segment.param_name())
        .map(str::to_string)
        .collect()
}

/// True iff the pattern has at least one placeholder (pure function)
pub fn is_dynamic(pattern: &str) -> bool {
    segments(pattern).any(|segment| matches!(segment, Segment::Param(_)))
}

/// Compiles a route pattern into an anchored matchable pattern (pure function)
///
/// Literal segments are regex-escaped, each placeholder becomes a single
/// segment capture group and the result is anchored at both ends.
///
/// # Examples
///
/// ```
/// use routegen::pattern::to_matchable_pattern;
///
/// assert_eq!(to_matchable_pattern("/user/[id]"), "^/user/([^/]+)$");
/// assert_eq!(to_matchable_pattern("/v1.0/[id]"), r"^/v1\.0/([^/]+)$");
/// assert_eq!(to_matchable_pattern("/"), "^/$");
/// ```
pub fn to_matchable_pattern(pattern: &str) -> String {
    let body = segments(pattern)
        .map(|segment| match segment {
            Segment::Param(_) => PARAM_CAPTURE.to_string(),
            Segment::Literal(text) => regex::escape(text),
        })
        .collect::<Vec<_>>()
        .join("/");

    format!("^{body}$")
}

/// Builds a concrete path by filling every placeholder (pure function)
///
/// Values are percent-encoded; literal segments pass through untouched.
/// A key that is present with an empty value is accepted, only a missing
/// key fails.
///
/// # Errors
///
/// [`Error::MissingParameter`] naming the first placeholder with no entry in
/// `values`.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use routegen::pattern::substitute_parameters;
///
/// let values = HashMap::from([("userId", "123"), ("postId", "456")]);
/// let path = substitute_parameters("/user/[userId]/post/[postId]", &values).unwrap();
/// assert_eq!(path, "/user/123/post/456");
///
/// let encoded = substitute_parameters("/tag/[name]", &HashMap::from([("name", "a b/c")])).unwrap();
/// assert_eq!(encoded, "/tag/a%20b%2Fc");
/// ```
pub fn substitute_parameters<K, V, S>(pattern: &str, values: &HashMap<K, V, S>) -> Result<String>
where
    K: Borrow<str> + Eq + Hash,
    V: AsRef<str>,
    S: BuildHasher,
{
    segments(pattern)
        .map(|segment| match segment {
            Segment::Literal(text) => Ok(text.to_string()),
            Segment::Param(name) => values
                .get(name)
                .map(|value| urlencoding::encode(value.as_ref()).into_owned())
                .ok_or_else(|| Error::MissingParameter {
                    pattern: pattern.to_string(),
                    name: name.to_string(),
                }),
        })
        .collect::<Result<Vec<_>>>()
        .map(|parts| parts.join("/"))
}

/// Matches a concrete path against a route pattern
///
/// Compiles the pattern on every call; use [`CompiledPattern`] to match the
/// same pattern repeatedly.
///
/// Returns `Ok(None)` when the path does not match. That is a normal
/// outcome, not an error.
///
/// # Examples
///
/// ```
/// use routegen::pattern::match_path;
///
/// let params = match_path("/user/42", "/user/[id]").unwrap().unwrap();
/// assert_eq!(params["id"], "42");
///
/// assert!(match_path("/user/42/edit", "/user/[id]").unwrap().is_none());
/// ```
pub fn match_path(path: &str, pattern: &str) -> Result<Option<Params>> {
    CompiledPattern::new(pattern)?.captures(path)
}

/// A route pattern compiled to its matcher, with its parameter names
///
/// Capture group `i + 1` of `regex` corresponds to `params[i]`.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pattern: String,
    regex: Regex,
    params: Vec<String>,
}

impl CompiledPattern {
    /// Compiles `pattern` via [`to_matchable_pattern`]
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&to_matchable_pattern(pattern)).map_err(|source| {
            Error::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            params: extract_parameter_names(pattern),
        })
    }

    /// The original route pattern
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The matchable pattern source
    pub fn matchable(&self) -> &str {
        self.regex.as_str()
    }

    /// Placeholder names in capture-group order
    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Extracts percent-decoded parameter values from `path`
    ///
    /// # Errors
    ///
    /// [`Error::InvalidEncoding`] if a captured segment decodes to invalid UTF-8.
    pub fn captures(&self, path: &str) -> Result<Option<Params>> {
        let Some(captures) = self.regex.captures(path) else {
            return Ok(None);
        };

        self.params
            .iter()
            .zip(captures.iter().skip(1))
            .map(|(name, capture)| {
                let raw = capture.map_or("", |m| m.as_str());
                urlencoding::decode(raw)
                    .map(|value| (name.clone(), value.into_owned()))
                    .map_err(|_| Error::InvalidEncoding {
                        value: raw.to_string(),
                    })
            })
            .collect::<Result<Params>>()
            .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/", &[])]
    #[case("/about", &[])]
    #[case("/user/[id]", &["id"])]
    #[case("/user/[id]/post/[postId]", &["id", "postId"])]
    #[case("/[a]/[b]/[c]", &["a", "b", "c"])]
    #[case("/files/[]", &[])]
    #[case("/files/[name", &[])]
    #[case("/a[b/c]d", &[])]
    fn test_extract_parameter_names(#[case] pattern: &str, #[case] expected: &[&str]) {
        assert_eq!(extract_parameter_names(pattern), expected);
        assert_eq!(is_dynamic(pattern), !expected.is_empty());
    }

    #[rstest]
    #[case("/", "^/$")]
    #[case("/about", "^/about$")]
    #[case("/about/", "^/about/$")]
    #[case("/user/[id]", "^/user/([^/]+)$")]
    #[case("/a.b/[x]/c+d", r"^/a\.b/([^/]+)/c\+d$")]
    #[case("/files/[]", r"^/files/\[\]$")]
    #[case("/(group)/[id]", r"^/\(group\)/([^/]+)$")]
    fn test_to_matchable_pattern(#[case] pattern: &str, #[case] expected: &str) {
        assert_eq!(to_matchable_pattern(pattern), expected);
    }

    #[test]
    fn test_substitute_missing_parameter_names_it() {
        let values: HashMap<&str, &str> = HashMap::new();
        let err = substitute_parameters("/user/[id]", &values).unwrap_err();
        match err {
            Error::MissingParameter { pattern, name } => {
                assert_eq!(pattern, "/user/[id]");
                assert_eq!(name, "id");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_substitute_accepts_empty_value() {
        let values = HashMap::from([("id", "")]);
        assert_eq!(substitute_parameters("/user/[id]", &values).unwrap(), "/user/");
    }

    #[test]
    fn test_substitute_leaves_literals_unencoded() {
        let values = HashMap::from([("id", "1")]);
        assert_eq!(
            substitute_parameters("/a b/[id]", &values).unwrap(),
            "/a b/1"
        );
    }

    #[test]
    fn test_substitute_ignores_extra_values() {
        let values = HashMap::from([("id".to_string(), "7".to_string()), ("x".into(), "y".into())]);
        assert_eq!(substitute_parameters("/user/[id]", &values).unwrap(), "/user/7");
    }

    #[test]
    fn test_match_path_rejects_segment_count_mismatch() {
        assert!(match_path("/user", "/user/[id]").unwrap().is_none());
        assert!(match_path("/user/1/2", "/user/[id]").unwrap().is_none());
        assert!(match_path("/users/1", "/user/[id]").unwrap().is_none());
        assert!(match_path("/prefix/user/1", "/user/[id]").unwrap().is_none());
    }

    #[test]
    fn test_match_path_trailing_slash_is_significant() {
        assert!(match_path("/a", "/a").unwrap().is_some());
        assert!(match_path("/a/", "/a").unwrap().is_none());
        assert!(match_path("/a", "/a/").unwrap().is_none());
    }

    #[test]
    fn test_match_path_decodes_values() {
        let params = match_path("/tag/a%20b%2Fc", "/tag/[name]").unwrap().unwrap();
        assert_eq!(params["name"], "a b/c");
    }

    #[test]
    fn test_match_path_invalid_utf8_is_an_error() {
        let err = match_path("/tag/%FF", "/tag/[name]").unwrap_err();
        assert!(matches!(err, Error::InvalidEncoding { .. }));
    }

    #[test]
    fn test_literal_metacharacters_match_verbatim() {
        assert!(match_path("/v1.0", "/v1.0").unwrap().is_some());
        assert!(match_path("/v1x0", "/v1.0").unwrap().is_none());
        assert!(match_path("/files/[]", "/files/[]").unwrap().is_some());
    }

    #[rstest]
    #[case("/user/[id]", &[("id", "123")])]
    #[case("/user/[userId]/post/[postId]", &[("userId", "u-1"), ("postId", "hello world")])]
    #[case("/search/[q]", &[("q", "a&b=c?d#e")])]
    #[case("/i18n/[word]", &[("word", "größe")])]
    fn test_substitute_then_match_returns_values(
        #[case] pattern: &str,
        #[case] values: &[(&str, &str)],
    ) {
        let values: HashMap<&str, &str> = values.iter().copied().collect();
        let path = substitute_parameters(pattern, &values).unwrap();
        let matched = match_path(&path, pattern).unwrap().unwrap();

        let expected: Params = values
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(matched, expected);
        assert_eq!(extract_parameter_names(pattern).len(), matched.len());
    }

    #[test]
    fn test_compiled_pattern_accessors() {
        let compiled = CompiledPattern::new("/user/[id]/post/[postId]").unwrap();
        assert_eq!(compiled.pattern(), "/user/[id]/post/[postId]");
        assert_eq!(compiled.matchable(), "^/user/([^/]+)/post/([^/]+)$");
        assert_eq!(compiled.params(), ["id", "postId"]);
        assert!(compiled.is_match("/user/1/post/2"));
        assert!(!compiled.is_match("/user/1"));
    }
}
