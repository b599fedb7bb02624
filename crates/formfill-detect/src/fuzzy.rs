//! Fuzzy string scoring on a 0-100 scale.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static NON_ALNUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("separator regex is hardcoded and valid"));

/// Lower-case and collapse every run of non-alphanumerics into one space.
pub fn normalize(raw: &str) -> String {
    NON_ALNUM
        .replace_all(&raw.to_lowercase(), " ")
        .trim()
        .to_string()
}

// Token scores are discounted against the plain ratio.
const TOKEN_SCALE: f64 = 0.95;
// Substring scores count for less, and far less once one side dwarfs the other.
const PARTIAL_SCALE: f64 = 0.9;
const LOPSIDED_PARTIAL_SCALE: f64 = 0.6;

fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    strsim::normalized_levenshtein(a, b) * 100.0
}

/// Best ratio of the shorter string against every same-length window of the longer.
fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let long: Vec<char> = long.chars().collect();
    let width = short.chars().count();
    if width == 0 {
        return 0.0;
    }

    let mut best: f64 = 0.0;
    for window in long.windows(width) {
        let candidate: String = window.iter().collect();
        best = best.max(ratio(short, &candidate));
        if best >= 100.0 {
            break;
        }
    }
    best
}

fn token_sort(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Compare the shared tokens against each side's full token set.
fn token_set(a: &str, b: &str, scorer: fn(&str, &str) -> f64) -> f64 {
    let left: BTreeSet<&str> = a.split_whitespace().collect();
    let right: BTreeSet<&str> = b.split_whitespace().collect();

    let join = |tokens: Vec<&str>| tokens.join(" ");
    let shared = join(left.intersection(&right).copied().collect());
    let only_left = join(left.difference(&right).copied().collect());
    let only_right = join(right.difference(&left).copied().collect());

    let combine = |rest: &str| format!("{shared} {rest}").trim().to_string();
    let with_left = combine(&only_left);
    let with_right = combine(&only_right);

    scorer(&shared, &with_left)
        .max(scorer(&shared, &with_right))
        .max(scorer(&with_left, &with_right))
}

/// Similarity of two strings, 0 to 100.
///
/// Both sides are normalized first. Strings of similar length take the
/// best of the plain ratio and the token-sorted and token-set ratios, so
/// `"Name Full"` still scores well against `"full_name"`. When one string
/// is at least half again as long as the other, substring matches count
/// too: `email` against "Email Address" scores 90.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn score(a: &str, b: &str) -> u8 {
    if !a.is_empty() && a == b {
        return 100;
    }
    let (a, b) = (normalize(a), normalize(b));
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let base = ratio(&a, &b);
    let (len_a, len_b) = (a.chars().count() as f64, b.chars().count() as f64);
    let len_ratio = len_a.max(len_b) / len_a.min(len_b);

    let best = if len_ratio < 1.5 {
        base.max(ratio(&token_sort(&a), &token_sort(&b)) * TOKEN_SCALE)
            .max(token_set(&a, &b, ratio) * TOKEN_SCALE)
    } else {
        let scale = if len_ratio >= 8.0 {
            LOPSIDED_PARTIAL_SCALE
        } else {
            PARTIAL_SCALE
        };
        base.max(partial_ratio(&a, &b) * scale)
            .max(partial_ratio(&token_sort(&a), &token_sort(&b)) * TOKEN_SCALE * scale)
            .max(token_set(&a, &b, partial_ratio) * TOKEN_SCALE * scale)
    };

    best.round().clamp(0.0, 100.0) as u8
}

/// Index and score of the best candidate; the first wins a tie.
pub fn best_match<'a, I>(query: &str, candidates: I) -> Option<(usize, u8)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(usize, u8)> = None;
    for (idx, candidate) in candidates.into_iter().enumerate() {
        let s = score(query, candidate);
        if best.map_or(true, |(_, top)| s > top) {
            best = Some((idx, s));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Full_Name"), "full name");
        assert_eq!(normalize("  E-mail address: "), "e mail address");
        assert_eq!(normalize("***"), "");
    }

    #[test]
    fn test_identical_scores_100() {
        assert_eq!(score("email", "email"), 100);
        assert_eq!(score("full_name", "Full Name"), 100);
    }

    #[test]
    fn test_token_order_scores_high() {
        assert_eq!(score("name full", "full_name"), 95);
    }

    #[test]
    fn test_column_inside_longer_label() {
        assert_eq!(score("email", "Email Address"), 90);
        assert_eq!(score("phone", "Phone Number"), 90);
        assert_eq!(score("name", "Full Name"), 90);
    }

    #[test]
    fn test_lopsided_lengths_discount_substrings() {
        // 41 characters against 5
        assert_eq!(
            score("email", "Email address where we can reach you back"),
            60
        );
    }

    #[test]
    fn test_partial_ratio_windows() {
        assert!((partial_ratio("abc", "xxabcxx") - 100.0).abs() < f64::EPSILON);
        assert!((partial_ratio("", "abc")).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_scores_zero() {
        assert_eq!(score("", "email"), 0);
        assert_eq!(score("email", ""), 0);
    }

    #[test]
    fn test_unrelated_scores_low() {
        assert!(score("phone", "Country of residence") < 50);
    }

    #[test]
    fn test_best_match_tie_prefers_first() {
        let labels = ["Email", "email"];
        assert_eq!(best_match("EMAIL", labels), Some((0, 100)));
    }

    #[test]
    fn test_best_match_empty() {
        assert_eq!(best_match("email", std::iter::empty()), None);
    }
}
