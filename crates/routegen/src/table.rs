// File: src/table.rs
// Purpose: Static/dynamic partition of scanned routes and the runtime route table

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

use tracing::warn;

use crate::pattern::{substitute_parameters, to_matchable_pattern, CompiledPattern, Params};
use crate::{Error, Result, RouteRecord};

/// A static route as it appears in generated artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticRoute<M = ()> {
    /// Route pattern like "/about"
    pub pattern: String,
    /// Caller-owned payload carried over from the scanned record
    pub extra: M,
}

/// A dynamic route as it appears in generated artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicRoute<M = ()> {
    /// Route pattern like "/user/[id]"
    pub pattern: String,
    /// Anchored matchable pattern like "^/user/([^/]+)$"
    pub matchable: String,
    /// Placeholder names in capture-group order
    pub params: Vec<String>,
    /// Caller-owned payload carried over from the scanned record
    pub extra: M,
}

/// Scanned routes partitioned into static and dynamic entries
///
/// Order within each partition is the order of the records it was built
/// from. A pattern seen twice keeps its first position and its first
/// payload. Each entry keeps the record's `extra` payload untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteManifest<M = ()> {
    static_routes: Vec<StaticRoute<M>>,
    dynamic_routes: Vec<DynamicRoute<M>>,
}

impl<M> Default for RouteManifest<M> {
    fn default() -> Self {
        Self {
            static_routes: Vec::new(),
            dynamic_routes: Vec::new(),
        }
    }
}

impl<M: Clone> RouteManifest<M> {
    /// Partitions records (pure function apart from duplicate warnings)
    ///
    /// # Examples
    ///
    /// ```
    /// use routegen::{RouteManifest, RouteRecord};
    ///
    /// let records = vec![
    ///     RouteRecord::new("app/page.tsx", "/").with_extra("public"),
    ///     RouteRecord::new("app/user/[id]/page.tsx", "/user/[id]").with_extra("auth"),
    /// ];
    /// let manifest = RouteManifest::from_records(&records);
    ///
    /// assert_eq!(manifest.static_patterns().collect::<Vec<_>>(), ["/"]);
    /// assert_eq!(manifest.dynamic_routes()[0].matchable, "^/user/([^/]+)$");
    /// assert_eq!(manifest.dynamic_routes()[0].extra, "auth");
    /// ```
    pub fn from_records(records: &[RouteRecord<M>]) -> Self {
        records.iter().fold(Self::default(), Self::with_record)
    }

    fn with_record(mut self, record: &RouteRecord<M>) -> Self {
        if self.contains(&record.pattern) {
            warn!(
                pattern = %record.pattern,
                source = %record.source.display(),
                "route pattern declared more than once"
            );
            return self;
        }

        if record.is_dynamic {
            self.dynamic_routes.push(DynamicRoute {
                pattern: record.pattern.clone(),
                matchable: to_matchable_pattern(&record.pattern),
                params: record.params.clone(),
                extra: record.extra.clone(),
            });
        } else {
            self.static_routes.push(StaticRoute {
                pattern: record.pattern.clone(),
                extra: record.extra.clone(),
            });
        }
        self
    }
}

impl<M> RouteManifest<M> {
    pub fn static_routes(&self) -> &[StaticRoute<M>] {
        &self.static_routes
    }

    /// Static route patterns in manifest order
    pub fn static_patterns(&self) -> impl Iterator<Item = &str> {
        self.static_routes.iter().map(|route| route.pattern.as_str())
    }

    pub fn dynamic_routes(&self) -> &[DynamicRoute<M>] {
        &self.dynamic_routes
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.static_routes.iter().any(|s| s.pattern == pattern)
            || self.dynamic_routes.iter().any(|d| d.pattern == pattern)
    }

    pub fn len(&self) -> usize {
        self.static_routes.len() + self.dynamic_routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compiled route table for matching and building paths at runtime
///
/// Lookup is a linear first-match-wins scan over dynamic entries in manifest
/// order. At tens to low hundreds of routes this is intentional: callers
/// control precedence by sorting records before the manifest is built.
#[derive(Debug, Clone)]
pub struct RouteTable {
    static_routes: Vec<String>,
    entries: Vec<CompiledPattern>,
}

impl RouteTable {
    pub fn new<M>(manifest: &RouteManifest<M>) -> Result<Self> {
        let entries = manifest
            .dynamic_routes()
            .iter()
            .map(|route| CompiledPattern::new(&route.pattern))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            static_routes: manifest.static_patterns().map(str::to_string).collect(),
            entries,
        })
    }

    /// First dynamic route pattern whose matcher accepts `path`
    ///
    /// # Examples
    ///
    /// ```
    /// use routegen::{RouteManifest, RouteRecord, RouteTable};
    ///
    /// let manifest = RouteManifest::from_records(&[
    ///     RouteRecord::new("a", "/user/[id]"),
    ///     RouteRecord::new("b", "/user/[userId]/post/[postId]"),
    /// ]);
    /// let table = RouteTable::new(&manifest).unwrap();
    ///
    /// assert_eq!(
    ///     table.match_dynamic_route("/user/123/post/456"),
    ///     Some("/user/[userId]/post/[postId]")
    /// );
    /// assert_eq!(table.match_dynamic_route("/user/123"), Some("/user/[id]"));
    /// assert_eq!(table.match_dynamic_route("/about"), None);
    /// ```
    pub fn match_dynamic_route(&self, path: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.is_match(path))
            .map(CompiledPattern::pattern)
    }

    /// Parameter values for `path` under a specific dynamic route
    ///
    /// # Errors
    ///
    /// [`Error::UnknownRoute`] if `route` is not a dynamic route in this table.
    pub fn extract_params(&self, route: &str, path: &str) -> Result<Option<Params>> {
        self.entries
            .iter()
            .find(|entry| entry.pattern() == route)
            .ok_or_else(|| Error::UnknownRoute {
                route: route.to_string(),
            })?
            .captures(path)
    }

    /// Builds a concrete path for any route in this table
    ///
    /// Static routes ignore `values`.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownRoute`] for a route not in the table,
    /// [`Error::MissingParameter`] for an absent placeholder value.
    pub fn build_path<K, V, S>(&self, route: &str, values: &HashMap<K, V, S>) -> Result<String>
    where
        K: Borrow<str> + Eq + Hash,
        V: AsRef<str>,
        S: BuildHasher,
    {
        if !self.contains(route) {
            return Err(Error::UnknownRoute {
                route: route.to_string(),
            });
        }
        substitute_parameters(route, values)
    }

    pub fn contains(&self, route: &str) -> bool {
        self.static_routes.iter().any(|p| p == route)
            || self.entries.iter().any(|entry| entry.pattern() == route)
    }

    pub fn static_routes(&self) -> &[String] {
        &self.static_routes
    }

    /// Dynamic route patterns in match order
    pub fn dynamic_routes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(CompiledPattern::pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(patterns: &[&str]) -> RouteManifest {
        let records: Vec<RouteRecord> = patterns
            .iter()
            .map(|p| RouteRecord::new("page.tsx", *p))
            .collect();
        RouteManifest::from_records(&records)
    }

    #[test]
    fn test_partition_preserves_order() {
        let manifest = manifest(&["/b", "/x/[id]", "/a", "/y/[id]"]);
        assert_eq!(manifest.static_patterns().collect::<Vec<_>>(), ["/b", "/a"]);
        let dynamic: Vec<&str> = manifest
            .dynamic_routes()
            .iter()
            .map(|d| d.pattern.as_str())
            .collect();
        assert_eq!(dynamic, vec!["/x/[id]", "/y/[id]"]);
        assert_eq!(manifest.len(), 4);
    }

    #[test]
    fn test_duplicate_patterns_collapse() {
        let manifest = manifest(&["/a", "/u/[id]", "/a", "/u/[id]"]);
        assert_eq!(manifest.static_patterns().collect::<Vec<_>>(), ["/a"]);
        assert_eq!(manifest.dynamic_routes().len(), 1);
    }

    #[test]
    fn test_payload_carried_into_manifest() {
        let records = vec![
            RouteRecord::new("a/page.tsx", "/a").with_extra("public"),
            RouteRecord::new("b/page.tsx", "/u/[id]").with_extra("auth"),
            RouteRecord::new("c/page.tsx", "/a").with_extra("shadowed"),
        ];
        let manifest = RouteManifest::from_records(&records);

        assert_eq!(
            manifest.static_routes(),
            [StaticRoute {
                pattern: "/a".to_string(),
                extra: "public",
            }]
        );
        assert_eq!(manifest.dynamic_routes()[0].extra, "auth");
        assert_eq!(manifest.dynamic_routes()[0].params, vec!["id"]);

        let table = RouteTable::new(&manifest).unwrap();
        assert_eq!(table.match_dynamic_route("/u/1"), Some("/u/[id]"));
    }

    #[test]
    fn test_first_match_wins_in_table_order() {
        let table = RouteTable::new(&manifest(&["/[section]/[id]", "/user/[id]"])).unwrap();
        assert_eq!(table.match_dynamic_route("/user/1"), Some("/[section]/[id]"));

        let table = RouteTable::new(&manifest(&["/user/[id]", "/[section]/[id]"])).unwrap();
        assert_eq!(table.match_dynamic_route("/user/1"), Some("/user/[id]"));
    }

    #[test]
    fn test_static_routes_are_not_matched_dynamically() {
        let table = RouteTable::new(&manifest(&["/about"])).unwrap();
        assert_eq!(table.match_dynamic_route("/about"), None);
        assert!(table.contains("/about"));
    }

    #[test]
    fn test_extract_params() {
        let table = RouteTable::new(&manifest(&["/user/[userId]/post/[postId]"])).unwrap();
        let params = table
            .extract_params("/user/[userId]/post/[postId]", "/user/1/post/2")
            .unwrap()
            .unwrap();
        assert_eq!(params["userId"], "1");
        assert_eq!(params["postId"], "2");

        assert!(table
            .extract_params("/user/[userId]/post/[postId]", "/user/1")
            .unwrap()
            .is_none());
        assert!(matches!(
            table.extract_params("/nope/[x]", "/nope/1"),
            Err(Error::UnknownRoute { .. })
        ));
    }

    #[test]
    fn test_build_path() {
        let table = RouteTable::new(&manifest(&["/", "/user/[id]"])).unwrap();
        let empty: HashMap<&str, &str> = HashMap::new();

        assert_eq!(table.build_path("/", &empty).unwrap(), "/");
        assert_eq!(
            table
                .build_path("/user/[id]", &HashMap::from([("id", "9")]))
                .unwrap(),
            "/user/9"
        );
        assert!(matches!(
            table.build_path("/user/[id]", &empty),
            Err(Error::MissingParameter { ref name, .. }) if name == "id"
        ));
        assert!(matches!(
            table.build_path("/missing", &empty),
            Err(Error::UnknownRoute { .. })
        ));
    }
}
