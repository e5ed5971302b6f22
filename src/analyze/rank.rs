// src/analyze/rank.rs
//! Dedup + ranking: turn the raw multi-source list into the top-N candidates.
//!
//! 1. Fingerprint = the trimmed, lower-cased title cut to 60 chars.
//!    The first story carrying a fingerprint wins; later ones are dropped even
//!    if they score higher. Input order is feed order, so this favours the
//!    fresher copy.
//! 2. Stable sort by score, descending. Ties keep their post-dedup order.
//! 3. Keep the first `n`.

use std::collections::HashSet;

use metrics::counter;

use super::Story;

pub const FINGERPRINT_CHARS: usize = 60;
pub const DEFAULT_TOP_N: usize = 5;

pub fn fingerprint(title: &str) -> String {
    title
        .trim()
        .to_lowercase()
        .chars()
        .take(FINGERPRINT_CHARS)
        .collect()
}

/// Drop later stories whose fingerprint was already seen. Order is preserved.
pub fn dedup_first_wins(stories: Vec<Story>) -> Vec<Story> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut keep = Vec::with_capacity(stories.len());
    let mut dropped = 0usize;

    for s in stories {
        if seen.insert(fingerprint(&s.title)) {
            keep.push(s);
        } else {
            dropped += 1;
        }
    }

    if dropped > 0 {
        tracing::debug!(target: "digest", dropped, "dropped duplicate headlines");
        counter!("digest_duplicates_dropped_total").increment(dropped as u64);
    }
    keep
}

pub fn select_top(stories: Vec<Story>, n: usize) -> Vec<Story> {
    let mut ranked = dedup_first_wins(stories);
    // `sort_by` is stable.
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story(title: &str, source: &str, score: f64) -> Story {
        Story {
            title: title.into(),
            summary: String::new(),
            published: String::new(),
            source: source.into(),
            link: String::new(),
            score,
        }
    }

    #[test]
    fn fingerprint_uses_first_60_chars() {
        let base = "x".repeat(60);
        assert_eq!(fingerprint(&format!("{base}AAA")), fingerprint(&format!("{base}bbb")));
        assert_eq!(fingerprint("  Hello World  "), "hello world");
        assert_ne!(fingerprint("abc"), fingerprint("abd"));
    }

    #[test]
    fn fingerprint_counts_chars_not_bytes() {
        let title = "é".repeat(70);
        assert_eq!(fingerprint(&title).chars().count(), 60);
    }

    #[test]
    fn first_occurrence_wins_regardless_of_score() {
        let out = select_top(
            vec![
                story("Quake hits coast", "Reuters", 1.0),
                story("QUAKE HITS COAST", "BBC", 9.0),
            ],
            5,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].source, "Reuters");
        assert_eq!(out[0].score, 1.0);
    }

    #[test]
    fn sorted_desc_with_stable_ties() {
        let out = select_top(
            vec![
                story("a", "s", 1.0),
                story("b", "s", 3.0),
                story("c", "s", 1.0),
                story("d", "s", 3.0),
                story("e", "s", 2.0),
            ],
            10,
        );
        let titles: Vec<&str> = out.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "d", "e", "a", "c"]);
    }

    #[test]
    fn truncates_to_n_or_returns_all() {
        let input: Vec<Story> = (0..8).map(|i| story(&format!("t{i}"), "s", i as f64)).collect();
        assert_eq!(select_top(input.clone(), 5).len(), 5);
        assert_eq!(select_top(input.clone(), 20).len(), 8);
        assert!(select_top(input, 0).is_empty());
    }

    #[test]
    fn empty_in_empty_out() {
        assert!(select_top(Vec::new(), 5).is_empty());
    }

    #[test]
    fn length_is_min_of_n_and_unique_count() {
        let input = vec![
            story("same", "a", 1.0),
            story("same", "b", 2.0),
            story("other", "a", 0.0),
        ];
        for n in 0..4 {
            assert_eq!(select_top(input.clone(), n).len(), n.min(2));
        }
    }
}
