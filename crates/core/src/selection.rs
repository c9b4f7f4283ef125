//! Ordering, deduplication and truncation of scored candidates.

use std::cmp::Ordering;
use std::collections::HashSet;

/// Stable descending sort by the given score accessor. Ties keep input
/// (catalog) order; NaN scores compare equal and therefore also keep it.
pub fn sort_descending<T>(items: &mut [T], score: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| score(b).partial_cmp(&score(a)).unwrap_or(Ordering::Equal));
}

/// Collapse a descending-sorted sequence to at most `n` entries with
/// pairwise-distinct category keys.
///
/// Single pass: the first record seen per category is emitted, so with a
/// descending input the best-scoring record per category wins. Keys are
/// compared case-insensitively.
pub fn top_distinct<T>(items: Vec<T>, n: usize, key: impl Fn(&T) -> &str) -> Vec<T> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut selected = Vec::new();

    for item in items {
        if selected.len() == n {
            break;
        }
        if seen.insert(key(&item).to_ascii_lowercase()) {
            selected.push(item);
        }
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::{sort_descending, top_distinct};

    #[derive(Clone, Debug, PartialEq)]
    struct Candidate {
        category: &'static str,
        score: f64,
    }

    fn candidate(category: &'static str, score: f64) -> Candidate {
        Candidate { category, score }
    }

    #[test]
    fn sorts_descending_and_keeps_input_order_on_ties() {
        let mut items = vec![
            candidate("first_tie", 0.8),
            candidate("low", 0.2),
            candidate("second_tie", 0.8),
            candidate("high", 0.9),
        ];
        sort_descending(&mut items, |c| c.score);

        let order: Vec<_> = items.iter().map(|c| c.category).collect();
        assert_eq!(order, ["high", "first_tie", "second_tie", "low"]);
    }

    #[test]
    fn keeps_best_scoring_record_per_category() {
        // Pre-sorted descending: the 0.95 duplicate of category c must be
        // the one emitted, in sort position ahead of b.
        let items = vec![
            candidate("c", 0.95),
            candidate("a", 0.9),
            candidate("b", 0.75),
            candidate("c", 0.6),
        ];
        let selected = top_distinct(items, 3, |c| c.category);

        assert_eq!(selected.len(), 3);
        assert_eq!(selected[0], candidate("c", 0.95));
        assert_eq!(selected[1], candidate("a", 0.9));
        assert_eq!(selected[2], candidate("b", 0.75));
    }

    #[test]
    fn output_is_bounded_by_n_distinct_categories() {
        let items = vec![
            candidate("a", 0.9),
            candidate("b", 0.8),
            candidate("c", 0.7),
            candidate("d", 0.6),
        ];
        assert_eq!(top_distinct(items, 3, |c| c.category).len(), 3);
    }

    #[test]
    fn fewer_categories_than_n_returns_them_all() {
        let items = vec![candidate("a", 0.9), candidate("a", 0.7), candidate("b", 0.5)];
        let selected = top_distinct(items, 3, |c| c.category);
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn category_keys_compare_case_insensitively() {
        let items = vec![candidate("Brick", 0.9), candidate("brick", 0.8), candidate("BRICK", 0.7)];
        let selected = top_distinct(items, 3, |c| c.category);
        assert_eq!(selected, vec![candidate("Brick", 0.9)]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let selected = top_distinct(Vec::<Candidate>::new(), 3, |c| c.category);
        assert!(selected.is_empty());
    }
}
