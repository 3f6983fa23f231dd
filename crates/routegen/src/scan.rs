// File: src/scan.rs
// Purpose: Discovers route-defining page files in a directory tree

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::pattern::{extract_parameter_names, is_dynamic};
use crate::{Error, Result};

/// File stem that marks a route
pub const PAGE_STEM: &str = "page";

/// Source extensions a page file may have
pub const PAGE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

/// Call names that declare a route inside a page file
pub const ROUTE_DECLARATIONS: &[&str] = &["defineRoute", "createRoute"];

/// Directories starting with this are private and never descended into
pub const PRIVATE_PREFIX: char = '_';

/// `defineRoute(`, `createRoute (` or `defineRoute<Meta>(`
static ROUTE_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:defineRoute|createRoute)\s*(?:<[^>]*>\s*)?\(")
        .expect("route declaration regex is valid")
});

/// Exclusion predicate over the cumulative directory path relative to the root
pub type ExcludeFn = dyn Fn(&Path) -> bool + Send + Sync;

/// One recognized route-declaring file
///
/// `extra` is an opaque payload owned by the caller. The scanner always
/// produces `()`; attach data with [`RouteRecord::with_extra`] or
/// [`RouteRecord::map_extra`]. Nothing in this crate inspects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord<M = ()> {
    /// Page file the route was discovered from
    pub source: PathBuf,
    /// Route pattern like "/user/[id]"
    pub pattern: String,
    /// Placeholder names, left to right
    pub params: Vec<String>,
    /// Whether the pattern has at least one placeholder
    pub is_dynamic: bool,
    pub extra: M,
}

impl RouteRecord {
    /// Creates a record, deriving parameters from the pattern
    ///
    /// # Examples
    ///
    /// ```
    /// use routegen::RouteRecord;
    ///
    /// let record = RouteRecord::new("app/user/[id]/page.tsx", "/user/[id]");
    /// assert!(record.is_dynamic);
    /// assert_eq!(record.params, vec!["id"]);
    /// ```
    pub fn new(source: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        Self {
            source: source.into(),
            params: extract_parameter_names(&pattern),
            is_dynamic: is_dynamic(&pattern),
            pattern,
            extra: (),
        }
    }
}

impl<M> RouteRecord<M> {
    pub fn is_static(&self) -> bool {
        !self.is_dynamic
    }

    /// Number of `/`-delimited segments after the leading slash
    pub fn depth(&self) -> usize {
        self.pattern.split('/').filter(|s| !s.is_empty()).count()
    }

    /// Replaces the extension payload
    pub fn with_extra<N>(self, extra: N) -> RouteRecord<N> {
        self.map_extra(|_| extra)
    }

    /// Transforms the extension payload
    pub fn map_extra<N>(self, f: impl FnOnce(M) -> N) -> RouteRecord<N> {
        RouteRecord {
            source: self.source,
            pattern: self.pattern,
            params: self.params,
            is_dynamic: self.is_dynamic,
            extra: f(self.extra),
        }
    }
}

/// Depth-first walker producing [`RouteRecord`]s
///
/// The scanner hardcodes only the private-directory rule. Everything else
/// (dynamic-segment directories, parallel-route slots, groups) is opted out
/// by the caller through [`Scanner::with_exclude`].
pub struct Scanner {
    root: PathBuf,
    exclude: Option<Box<ExcludeFn>>,
}

impl Scanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            exclude: None,
        }
    }

    /// Sets the exclusion predicate (functional builder)
    ///
    /// The predicate sees the directory path relative to the root, including
    /// the candidate directory's own name (e.g. `user/[id]/@modal`). Returning
    /// `true` skips the whole subtree.
    pub fn with_exclude<F>(mut self, exclude: F) -> Self
    where
        F: Fn(&Path) -> bool + Send + Sync + 'static,
    {
        self.exclude = Some(Box::new(exclude));
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walks the root and returns routes in filesystem order
    ///
    /// A missing root yields an empty list. Any unreadable directory or file
    /// fails the whole scan, as does a directory path that repeats a
    /// placeholder name. Page text is decoded lossily, so a page that is not
    /// valid UTF-8 is still checked for a route declaration.
    pub fn scan(&self) -> Result<Vec<RouteRecord>> {
        if !self.root.exists() {
            debug!(root = %self.root.display(), "route root does not exist; nothing to scan");
            return Ok(Vec::new());
        }

        WalkDir::new(&self.root)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| self.should_visit(entry))
            .filter_map(|entry| match entry {
                Ok(entry) => self.recognize(&entry).transpose(),
                Err(err) => Some(Err(self.walk_error(err))),
            })
            .collect()
    }

    fn should_visit(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_dir() {
            return true;
        }

        if entry.file_name().to_string_lossy().starts_with(PRIVATE_PREFIX) {
            debug!(dir = %entry.path().display(), "skipping private directory");
            return false;
        }

        let relative = entry.path().strip_prefix(&self.root).unwrap_or(entry.path());
        match &self.exclude {
            Some(exclude) if exclude(relative) => {
                debug!(dir = %relative.display(), "skipping excluded directory");
                false
            }
            _ => true,
        }
    }

    fn recognize(&self, entry: &DirEntry) -> Result<Option<RouteRecord>> {
        let path = entry.path();
        if !entry.file_type().is_file() || !is_page_file(path) {
            return Ok(None);
        }

        let bytes = fs::read(path).map_err(|source| Error::Scan {
            path: path.to_path_buf(),
            source,
        })?;

        if !declares_route(&String::from_utf8_lossy(&bytes)) {
            debug!(file = %path.display(), "page file has no route declaration");
            return Ok(None);
        }

        let dir = path.parent().unwrap_or(&self.root);
        let record = RouteRecord::new(path, route_pattern(&self.root, dir)?);
        check_unique_params(&record)?;
        debug!(pattern = %record.pattern, file = %path.display(), "discovered route");

        Ok(Some(record))
    }

    fn walk_error(&self, err: walkdir::Error) -> Error {
        let path = err
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());
        let source = err
            .into_io_error()
            .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "filesystem loop detected"));

        Error::Scan { path, source }
    }
}

/// True for `page.<ext>` with a recognized source extension
pub fn is_page_file(path: &Path) -> bool {
    let stem = path.file_stem().and_then(|s| s.to_str());
    let ext = path.extension().and_then(|s| s.to_str());

    stem == Some(PAGE_STEM) && ext.map_or(false, |ext| PAGE_EXTENSIONS.contains(&ext))
}

/// True if the source text contains a call to a route-declaration function
///
/// # Examples
///
/// ```
/// use routegen::scan::declares_route;
///
/// assert!(declares_route("export default defineRoute({})"));
/// assert!(declares_route("export const route = createRoute<Meta>(\"/x\")"));
/// assert!(!declares_route("// remember to call defineRoute later"));
/// ```
pub fn declares_route(content: &str) -> bool {
    ROUTE_CALL.is_match(content)
}

/// Route pattern for a page living in `dir` under `root`
///
/// The root itself maps to `/`.
pub fn route_pattern(root: &Path, dir: &Path) -> Result<String> {
    let relative = dir.strip_prefix(root).unwrap_or(dir);

    let segments = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name),
            _ => None,
        })
        .map(|name| {
            name.to_str().ok_or_else(|| Error::NonUtf8Path {
                path: dir.to_path_buf(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(format!("/{}", segments.join("/")))
}

/// Placeholder names must be unique within one pattern
fn check_unique_params(record: &RouteRecord) -> Result<()> {
    let duplicated = record
        .params
        .iter()
        .enumerate()
        .find(|(i, name)| record.params[..*i].contains(name));

    match duplicated {
        Some((_, name)) => Err(Error::DuplicateParameter {
            pattern: record.pattern.clone(),
            name: name.clone(),
            source_file: record.source.clone(),
        }),
        None => Ok(()),
    }
}
