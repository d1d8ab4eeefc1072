//! Combinators for composing fallible parsing steps.
//!
//! Every grammar, modifier and resolver in this crate reports "does not
//! apply" as `None`. `Option::map` and `Option::and_then` cover the
//! single-step cases; the helpers here cover ordered alternatives.

/// Try `attempt` on each candidate in order and return the first success.
///
/// # Examples
///
/// ```
/// use epoch_engine::attempt::first_success;
///
/// let parsed = first_success(["x", "12", "7"], |s| s.parse::<u32>().ok());
/// assert_eq!(parsed, Some(12));
/// ```
pub fn first_success<I, T, F>(candidates: I, attempt: F) -> Option<T>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Option<T>,
{
    candidates.into_iter().find_map(attempt)
}

/// Like [`first_success`], also returning the candidate that succeeded.
pub fn first_success_tagged<I, T, F>(candidates: I, mut attempt: F) -> Option<(I::Item, T)>
where
    I: IntoIterator,
    I::Item: Copy,
    F: FnMut(I::Item) -> Option<T>,
{
    candidates
        .into_iter()
        .find_map(|candidate| attempt(candidate).map(|value| (candidate, value)))
}

/// Try `attempt` on every candidate and collect each success, tagged with
/// the candidate that produced it, in candidate order.
pub fn all_successes<I, T, F>(candidates: I, mut attempt: F) -> Vec<(I::Item, T)>
where
    I: IntoIterator,
    I::Item: Copy,
    F: FnMut(I::Item) -> Option<T>,
{
    candidates
        .into_iter()
        .filter_map(|candidate| attempt(candidate).map(|value| (candidate, value)))
        .collect()
}

/// Run two dependent attempts and keep both results.
///
/// The second attempt sees the first result; if either is absent the pair is.
pub fn both<A, B, F>(first: Option<A>, second: F) -> Option<(A, B)>
where
    F: FnOnce(&A) -> Option<B>,
{
    let a = first?;
    let b = second(&a)?;
    Some((a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_success_stops_at_first_match() {
        let mut calls = 0;
        let found = first_success([1, 2, 3, 4], |n| {
            calls += 1;
            (n % 2 == 0).then_some(n * 10)
        });
        assert_eq!(found, Some(20));
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_first_success_empty_is_none() {
        let found: Option<u8> = first_success(Vec::<u8>::new(), Some);
        assert_eq!(found, None);
    }

    #[test]
    fn test_first_success_tagged_reports_candidate() {
        let found = first_success_tagged(["a", "bb", "ccc"], |s| (s.len() > 1).then_some(s.len()));
        assert_eq!(found, Some(("bb", 2)));
    }

    #[test]
    fn test_all_successes_keeps_order() {
        let found = all_successes([3, 4, 5, 6], |n| (n % 2 == 0).then_some(n));
        assert_eq!(found, vec![(4, 4), (6, 6)]);
    }

    #[test]
    fn test_both_requires_both() {
        assert_eq!(both(Some(2), |a| Some(a + 1)), Some((2, 3)));
        assert_eq!(both(Some(2), |_| None::<i32>), None);
        assert_eq!(both(None::<i32>, |a| Some(*a)), None);
    }
}
