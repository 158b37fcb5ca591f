//! Fuzzy string similarity.
//!
//! Scores are integers from 0 to 100. The building block is the indel
//! ratio: `1 - (insertions + deletions) / (|a| + |b|)`, which rewards long
//! common subsequences. On top of that sit the usual token-based variants
//! (partial, token-sort, token-set) and a weighted combination of all of
//! them that picks the right variant for the length difference between the
//! two strings.
//!
//! Lengths are measured in chars, not bytes.

/// Lower-case, replace every non-alphanumeric char with a space, and trim.
///
/// `"Times_Square"` becomes `"times square"`.
pub fn normalize(s: &str) -> String {
    let mapped: String = s
        .chars()
        .flat_map(|c| {
            let keep = c.is_alphanumeric();
            c.to_lowercase().map(move |l| if keep { l } else { ' ' })
        })
        .collect();
    mapped.trim().to_string()
}

/// Length of the longest common subsequence.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

fn ratio_chars(a: &[char], b: &[char]) -> u8 {
    if a == b {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let total = (a.len() + b.len()) as f64;
    let common = (2 * lcs_len(a, b)) as f64;
    (100.0 * common / total).round() as u8
}

/// Indel similarity of two strings, compared as given.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Best [`ratio`] of the shorter string against any equally long window of
/// the longer one.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if shorter.is_empty() {
        return if longer.is_empty() { 100 } else { 0 };
    }

    let mut best = 0;
    for window in longer.windows(shorter.len()) {
        let score = ratio_chars(&shorter, window);
        if score == 100 {
            return 100;
        }
        best = best.max(score);
    }
    best
}

fn sorted_tokens(s: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens
}

fn token_sort(a: &str, b: &str, partial: bool) -> u8 {
    let a = sorted_tokens(a).join(" ");
    let b = sorted_tokens(b).join(" ");
    if partial {
        partial_ratio(&a, &b)
    } else {
        ratio(&a, &b)
    }
}

fn token_set(a: &str, b: &str, partial: bool) -> u8 {
    let mut ta = sorted_tokens(a);
    let mut tb = sorted_tokens(b);
    ta.dedup();
    tb.dedup();

    if ta.is_empty() || tb.is_empty() {
        return 0;
    }

    let common: Vec<&str> = ta.iter().copied().filter(|t| tb.contains(t)).collect();
    let only_a: Vec<&str> = ta.iter().copied().filter(|t| !common.contains(t)).collect();
    let only_b: Vec<&str> = tb.iter().copied().filter(|t| !common.contains(t)).collect();

    let sect = common.join(" ");
    let combined_a = format!("{} {}", sect, only_a.join(" ")).trim().to_string();
    let combined_b = format!("{} {}", sect, only_b.join(" ")).trim().to_string();

    let score: fn(&str, &str) -> u8 = if partial { partial_ratio } else { ratio };
    score(&sect, &combined_a)
        .max(score(&sect, &combined_b))
        .max(score(&combined_a, &combined_b))
}

/// [`ratio`] after sorting whitespace-separated tokens.
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    token_sort(a, b, false)
}

/// Similarity of the shared token set against each side's full token set.
///
/// Ignores token order and repeated tokens; an input whose tokens are a
/// subset of the other's scores 100.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    token_set(a, b, false)
}

/// Weighted similarity of two raw strings, 0 to 100.
///
/// Both strings are [`normalize`]d first; if either becomes empty the score
/// is 0. For strings of similar length this is the best of the plain and
/// token ratios (token ratios scaled by 0.95). Once one string is at least
/// 1.5 times longer, partial ratios replace the token ratios, scaled by 0.9
/// (0.6 beyond a length ratio of 8).
pub fn similarity(a: &str, b: &str) -> u8 {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    const UNBASE_SCALE: f64 = 0.95;

    let base = ratio(&a, &b) as f64;
    let (la, lb) = (a.chars().count() as f64, b.chars().count() as f64);
    let len_ratio = la.max(lb) / la.min(lb);

    let best = if len_ratio < 1.5 {
        let sort = token_sort(&a, &b, false) as f64 * UNBASE_SCALE;
        let set = token_set(&a, &b, false) as f64 * UNBASE_SCALE;
        base.max(sort).max(set)
    } else {
        let partial_scale = if len_ratio > 8.0 { 0.6 } else { 0.9 };
        let partial = partial_ratio(&a, &b) as f64 * partial_scale;
        let sort = token_sort(&a, &b, true) as f64 * UNBASE_SCALE * partial_scale;
        let set = token_set(&a, &b, true) as f64 * UNBASE_SCALE * partial_scale;
        base.max(partial).max(sort).max(set)
    };

    best.round() as u8
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Scores are always within 0..=100
        #[test]
        fn bounded(a in "\\PC{0,20}", b in "\\PC{0,20}") {
            prop_assert!(similarity(&a, &b) <= 100);
            prop_assert!(ratio(&a, &b) <= 100);
        }

        /// A string with any alphanumeric content matches itself perfectly
        #[test]
        fn identity(a in "[A-Za-z0-9][A-Za-z0-9_ -]{0,20}") {
            prop_assert_eq!(similarity(&a, &a), 100);
        }

        /// Argument order does not matter
        #[test]
        fn symmetric(a in "[a-z_ ]{1,15}", b in "[a-z_ ]{1,15}") {
            prop_assert_eq!(similarity(&a, &b), similarity(&b, &a));
        }

        /// Strings with no characters in common score zero
        #[test]
        fn disjoint_alphabets(a in "[a-m]{1,12}", b in "[n-z]{1,12}") {
            prop_assert_eq!(similarity(&a, &b), 0);
        }
    }
}
