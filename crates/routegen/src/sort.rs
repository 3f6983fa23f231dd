/// Built-in comparators for reordering scanned routes
///
/// Matching is first-match-wins in table order, so the comparator decides
/// which of two overlapping dynamic patterns is tried first. Ambiguous
/// overlaps are never detected or rejected.

use std::cmp::Ordering;

use crate::RouteRecord;

/// Comparator over scanned routes carrying payload `M`
pub type SortFn<M = ()> = dyn Fn(&RouteRecord<M>, &RouteRecord<M>) -> Ordering + Send + Sync;

/// Orders by route pattern, bytewise
pub fn alphabetical<M>(a: &RouteRecord<M>, b: &RouteRecord<M>) -> Ordering {
    a.pattern.cmp(&b.pattern)
}

/// Orders the most specific routes first (pure function)
///
/// 1. Static before dynamic
/// 2. More segments before fewer
/// 3. Fewer placeholders before more
/// 4. Alphabetical as the final tie-break
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use routegen::{sort, RouteRecord};
///
/// let short = RouteRecord::new("a", "/user/[id]");
/// let long = RouteRecord::new("b", "/user/[id]/post/[postId]");
/// assert_eq!(sort::specificity(&long, &short), Ordering::Less);
/// ```
pub fn specificity<M>(a: &RouteRecord<M>, b: &RouteRecord<M>) -> Ordering {
    a.is_dynamic
        .cmp(&b.is_dynamic)
        .then_with(|| b.depth().cmp(&a.depth()))
        .then_with(|| a.params.len().cmp(&b.params.len()))
        .then_with(|| alphabetical(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(patterns: &[&str], cmp: fn(&RouteRecord, &RouteRecord) -> Ordering) -> Vec<String> {
        let mut records: Vec<RouteRecord> = patterns
            .iter()
            .map(|p| RouteRecord::new("page.tsx", *p))
            .collect();
        records.sort_by(cmp);
        records.into_iter().map(|r| r.pattern).collect()
    }

    #[test]
    fn test_alphabetical() {
        assert_eq!(
            sorted(&["/b", "/a/[x]", "/a"], alphabetical),
            vec!["/a", "/a/[x]", "/b"]
        );
    }

    #[test]
    fn test_specificity() {
        let order = sorted(
            &[
                "/user/[id]",
                "/[slug]",
                "/about",
                "/user/[id]/post/[postId]",
                "/user/[id]/settings",
                "/",
            ],
            specificity,
        );
        assert_eq!(
            order,
            vec![
                "/about",
                "/",
                "/user/[id]/post/[postId]",
                "/user/[id]/settings",
                "/user/[id]",
                "/[slug]",
            ]
        );
    }
}
