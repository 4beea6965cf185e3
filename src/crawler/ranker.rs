//! Deterministic ranking of word counts

use std::cmp::Ordering;

/// Orders word counts and keeps the `top_n` most popular
///
/// Entries are ordered by:
/// 1. count, highest first
/// 2. word length in characters, longest first
/// 3. the word itself, alphabetically
///
/// Every word is distinct, so the order is total and the result never
/// depends on the iteration order of `counts`.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use wordcrawl::crawler::rank;
///
/// let counts: HashMap<String, u64> =
///     [("a", 2), ("bb", 2), ("ccc", 1)].iter().map(|(w, c)| (w.to_string(), *c)).collect();
///
/// let ranked = rank(counts, 3);
/// assert_eq!(
///     ranked,
///     vec![("bb".to_string(), 2), ("a".to_string(), 2), ("ccc".to_string(), 1)]
/// );
/// ```
pub fn rank<I>(counts: I, top_n: usize) -> Vec<(String, u64)>
where
    I: IntoIterator<Item = (String, u64)>,
{
    if top_n == 0 {
        return Vec::new();
    }

    let mut entries: Vec<(String, u64)> = counts.into_iter().collect();
    entries.sort_unstable_by(compare_entries);
    entries.truncate(top_n);
    entries
}

fn compare_entries(a: &(String, u64), b: &(String, u64)) -> Ordering {
    b.1.cmp(&a.1)
        .then_with(|| b.0.chars().count().cmp(&a.0.chars().count()))
        .then_with(|| a.0.cmp(&b.0))
}
