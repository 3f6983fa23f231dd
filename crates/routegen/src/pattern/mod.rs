/// Pattern module for file-based route patterns
///
/// Pure functional components for parsing route patterns, compiling them to
/// anchored matchers and moving between concrete paths and parameter maps.
/// Used by the scanner and renderer at generation time and by
/// [`RouteTable`](crate::RouteTable) at request time.

pub mod matcher;
pub mod segment;

// Re-export commonly used types
pub use matcher::{
    extract_parameter_names, is_dynamic, match_path, substitute_parameters, to_matchable_pattern,
    CompiledPattern, Params, PARAM_CAPTURE,
};
pub use segment::{classify_segment, segments, Segment};
