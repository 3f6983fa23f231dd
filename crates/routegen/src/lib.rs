//! # routegen
//!
//! Route-pattern compiler for file-based routing trees. Scans a directory
//! tree for route-declaring `page` files and renders typed path helpers:
//! - Static routes (`/about`)
//! - Dynamic routes with whole-segment placeholders (`/user/[id]`)
//! - Anchored matchable patterns (`^/user/([^/]+)$`)
//! - Path building with percent-encoded values
//!
//! ## Pipeline
//!
//! One generation run is a pure function of the root directory and the
//! options given to [`Generator`]:
//!
//! 1. [`Scanner`] walks the root depth-first and yields [`RouteRecord`]s
//! 2. an optional comparator reorders them
//! 3. [`RouteManifest`] partitions them into static and dynamic routes
//! 4. [`render`] produces the artifact trio and [`write_artifacts`] stores it
//!
//! Nothing is kept between runs.
//!
//! ## Example
//!
//! ```
//! use std::collections::HashMap;
//! use routegen::{RouteManifest, RouteRecord, RouteTable};
//!
//! let manifest = RouteManifest::from_records(&[
//!     RouteRecord::new("app/about/page.tsx", "/about"),
//!     RouteRecord::new("app/user/[id]/page.tsx", "/user/[id]"),
//! ]);
//! let table = RouteTable::new(&manifest).unwrap();
//!
//! assert_eq!(table.match_dynamic_route("/user/42"), Some("/user/[id]"));
//! let path = table.build_path("/user/[id]", &HashMap::from([("id", "42")])).unwrap();
//! assert_eq!(path, "/user/42");
//! ```

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use tracing::info;

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
mod error;
pub mod pattern;
pub mod render;
pub mod scan;
pub mod sort;
pub mod table;

pub use config::{Config, SortOrder, WatchConfig, CONFIG_FILE};
pub use error::{Error, Result};
pub use pattern::{
    extract_parameter_names, is_dynamic, match_path, substitute_parameters, to_matchable_pattern,
    CompiledPattern, Params,
};
pub use render::{render, write_artifacts, Artifacts, WriteStatus, WrittenFile};
pub use scan::{ExcludeFn, RouteRecord, Scanner};
pub use sort::SortFn;
pub use table::{DynamicRoute, RouteManifest, RouteTable, StaticRoute};

// ============================================================================
// Generator
// ============================================================================

/// Outcome of one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub total: usize,
    pub static_count: usize,
    pub dynamic_count: usize,
    pub files: Vec<WrittenFile>,
}

/// Scan + render + write, configured with a functional builder
///
/// `M` is the caller-owned payload attached to every scanned route by
/// [`Generator::with_payload`]. It reaches the comparator and the
/// [`RouteManifest`] and is never inspected by the pipeline itself.
///
/// # Examples
///
/// ```no_run
/// use routegen::{sort, Generator};
///
/// let summary = Generator::new("app", "src/generated/routes")
///     .with_exclude(|dir| dir.starts_with("(marketing)"))
///     .with_sort(sort::specificity)
///     .run()
///     .unwrap();
///
/// println!("{} routes", summary.total);
/// ```
pub struct Generator<M = ()> {
    scanner: Scanner,
    output_dir: PathBuf,
    payload: Box<PayloadFn<M>>,
    sort: Option<Box<SortFn<M>>>,
}

/// Derives the payload for one scanned route
pub type PayloadFn<M> = dyn Fn(&RouteRecord) -> M + Send + Sync;

impl Generator {
    pub fn new(root_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            scanner: Scanner::new(root_dir),
            output_dir: output_dir.into(),
            payload: Box::new(|_: &RouteRecord| ()),
            sort: None,
        }
    }
}

impl<M> Generator<M> {
    /// Sets the subtree exclusion predicate (functional builder)
    ///
    /// See [`Scanner::with_exclude`].
    pub fn with_exclude<F>(mut self, exclude: F) -> Self
    where
        F: Fn(&Path) -> bool + Send + Sync + 'static,
    {
        self.scanner = self.scanner.with_exclude(exclude);
        self
    }

    /// Attaches a payload to every scanned route (functional builder)
    ///
    /// The comparator is typed over the payload, so any comparator set
    /// earlier is dropped; call [`Generator::with_sort`] afterwards.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use routegen::Generator;
    ///
    /// let generator = Generator::new("app", "src/generated/routes")
    ///     .with_payload(|record| record.source.extension().is_some_and(|ext| ext == "tsx"))
    ///     .with_sort(|a, b| b.extra.cmp(&a.extra));
    ///
    /// let (manifest, _) = generator.render().unwrap();
    /// let tsx_pages = manifest.dynamic_routes().iter().filter(|r| r.extra).count();
    /// println!("{tsx_pages} dynamic tsx pages");
    /// ```
    pub fn with_payload<N, F>(self, payload: F) -> Generator<N>
    where
        F: Fn(&RouteRecord) -> N + Send + Sync + 'static,
    {
        Generator {
            scanner: self.scanner,
            output_dir: self.output_dir,
            payload: Box::new(payload),
            sort: None,
        }
    }

    /// Sets the comparator applied to scanned routes (functional builder)
    ///
    /// The sort is stable; without a comparator routes stay in filesystem
    /// order, which is not guaranteed to be deterministic across platforms.
    pub fn with_sort<F>(mut self, compare: F) -> Self
    where
        F: Fn(&RouteRecord<M>, &RouteRecord<M>) -> Ordering + Send + Sync + 'static,
    {
        self.sort = Some(Box::new(compare));
        self
    }

    pub fn root_dir(&self) -> &Path {
        self.scanner.root()
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Scanned routes with payloads attached, after the comparator has run
    pub fn scan(&self) -> Result<Vec<RouteRecord<M>>> {
        let mut records: Vec<RouteRecord<M>> = self
            .scanner
            .scan()?
            .into_iter()
            .map(|record| {
                let extra = (self.payload)(&record);
                record.with_extra(extra)
            })
            .collect();

        if let Some(compare) = &self.sort {
            records.sort_by(|a, b| compare(a, b));
        }
        Ok(records)
    }
}

impl<M: Clone> Generator<M> {
    /// Scans and renders without touching the output directory
    pub fn render(&self) -> Result<(RouteManifest<M>, Artifacts)> {
        let manifest = RouteManifest::from_records(&self.scan()?);
        let artifacts = render(&manifest);
        Ok((manifest, artifacts))
    }

    /// Runs the full pipeline and writes the artifact trio
    pub fn run(&self) -> Result<GenerationSummary> {
        let (manifest, artifacts) = self.render()?;
        let files = write_artifacts(&artifacts, &self.output_dir)?;

        let summary = GenerationSummary {
            total: manifest.len(),
            static_count: manifest.static_routes().len(),
            dynamic_count: manifest.dynamic_routes().len(),
            files,
        };
        info!(
            root = %self.root_dir().display(),
            total = summary.total,
            static_count = summary.static_count,
            dynamic_count = summary.dynamic_count,
            "generated route artifacts"
        );

        Ok(summary)
    }
}
