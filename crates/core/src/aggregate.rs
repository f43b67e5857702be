//! First-success search over a list of candidate conversions.

/// Attempt each candidate in order.
///
/// Returns the first success without touching the remaining candidates. If
/// every attempt fails, returns all `(candidate, failure)` pairs in the order
/// they were attempted.
pub fn try_in_order<C, T, E, I, F>(candidates: I, mut attempt: F) -> Result<T, Vec<(C, E)>>
where
    I: IntoIterator<Item = C>,
    F: FnMut(&C) -> Result<T, E>,
{
    let mut failures = Vec::new();
    for candidate in candidates {
        match attempt(&candidate) {
            Ok(value) => return Ok(value),
            Err(e) => failures.push((candidate, e)),
        }
    }
    Err(failures)
}
