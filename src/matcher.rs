//! Partial-name matching.
//!
//! A query matches a candidate when it appears in the candidate as a contiguous,
//! case-sensitive substring. Results keep the candidates' original order, which
//! is also the order presented to the user when a query is ambiguous.

/// Return every candidate that contains `query`, in candidate order.
///
/// An empty query matches everything; callers that need a non-empty query must
/// validate it before calling.
pub fn matching<S: AsRef<str>>(query: &str, candidates: &[S]) -> Vec<String> {
    candidates
        .iter()
        .map(AsRef::as_ref)
        .filter(|candidate| candidate.contains(query))
        .map(str::to_string)
        .collect()
}
