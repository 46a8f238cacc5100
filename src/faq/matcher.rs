use crate::faq::store::FaqEntry;

/// Returned when nothing in the dataset is close enough to the user's text.
pub const NO_ANSWER: &str =
    "Sorry, I couldn't find an answer to that. Please try rephrasing your question.";

/// Minimum similarity for a fuzzy match to be accepted.
const MATCH_THRESHOLD: f64 = 0.5;

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Pick the stored answer for `message`, or `None` when nothing clears the
/// threshold. Exact (normalized) matches win outright; otherwise the entry
/// with the highest similarity ratio is taken, first-seen order breaking
/// ties.
pub fn best_answer<'a>(entries: &'a [FaqEntry], message: &str) -> Option<&'a str> {
    let needle = normalize(message);

    for entry in entries {
        if normalize(&entry.user) == needle {
            return Some(&entry.assistant);
        }
    }

    let mut best: Option<(&FaqEntry, f64)> = None;
    for entry in entries {
        let score = similarity(&needle, &normalize(&entry.user));
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((entry, score)),
        }
    }

    match best {
        Some((entry, score)) if score > MATCH_THRESHOLD => Some(&entry.assistant),
        _ => None,
    }
}

/// Convenience wrapper used by the chatbot endpoint.
pub fn respond(entries: &[FaqEntry], message: &str) -> String {
    best_answer(entries, message)
        .unwrap_or(NO_ANSWER)
        .to_string()
}

/// Ratcliff/Obershelp similarity over characters: twice the number of
/// matching characters (longest common substring, recursing on both sides)
/// divided by the total length. Symmetric, in [0, 1]; two empty strings
/// count as identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    // Longest common substring; earliest occurrence wins on equal length.
    let mut best_a = 0;
    let mut best_b = 0;
    let mut best_len = 0;
    let mut prev = vec![0usize; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        let mut cur = vec![0usize; b.len() + 1];
        for (j, &cb) in b.iter().enumerate() {
            if ca == cb {
                let len = prev[j] + 1;
                cur[j + 1] = len;
                if len > best_len {
                    best_len = len;
                    best_a = i + 1 - len;
                    best_b = j + 1 - len;
                }
            }
        }
        prev = cur;
    }

    if best_len == 0 {
        return 0;
    }

    best_len
        + matching_chars(&a[..best_a], &b[..best_b])
        + matching_chars(&a[best_a + best_len..], &b[best_b + best_len..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(user: &str, assistant: &str) -> FaqEntry {
        FaqEntry {
            user: user.into(),
            assistant: assistant.into(),
        }
    }

    #[test]
    fn identical_strings_score_one() {
        assert_eq!(similarity("career", "career"), 1.0);
    }

    #[test]
    fn disjoint_strings_score_zero() {
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn both_empty_score_one() {
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn one_empty_scores_zero() {
        assert_eq!(similarity("abc", ""), 0.0);
    }

    #[test]
    fn similarity_is_symmetric() {
        let pairs = [("abcd", "bcde"), ("resume tips", "resume help"), ("a", "ab")];
        for (x, y) in pairs {
            assert_eq!(similarity(x, y), similarity(y, x), "{x} vs {y}");
        }
    }

    #[test]
    fn overlapping_strings_score_expected_ratio() {
        // matching block "bcd" of length 3, total length 8
        assert!((similarity("abcd", "bcde") - 0.75).abs() < 1e-9);
    }

    #[test]
    fn exact_match_ignores_case_and_whitespace() {
        let entries = vec![
            entry("how do I write a resume", "Keep it to one page."),
            entry("how do I prepare for interviews", "Practice aloud."),
        ];
        let answer = best_answer(&entries, "  How Do I Write A Resume  ").unwrap();
        assert_eq!(answer, "Keep it to one page.");
    }

    #[test]
    fn exact_match_prefers_first_entry_in_file_order() {
        let entries = vec![
            entry("same question", "first answer"),
            entry("same question", "second answer"),
        ];
        assert_eq!(best_answer(&entries, "same question"), Some("first answer"));
    }

    #[test]
    fn close_input_matches_fuzzily() {
        let entries = vec![
            entry("how do i become a data scientist", "Study statistics and code."),
            entry("what does a product manager do", "They own the roadmap."),
        ];
        let answer = best_answer(&entries, "how to become a data scientist").unwrap();
        assert_eq!(answer, "Study statistics and code.");
    }

    #[test]
    fn low_similarity_returns_none() {
        let entries = vec![
            entry("how do i become a data scientist", "Study statistics and code."),
            entry("what does a product manager do", "They own the roadmap."),
        ];
        assert_eq!(best_answer(&entries, "zzzz qqqq xxxx"), None);
    }

    #[test]
    fn ties_resolve_to_first_seen_entry() {
        // "ab" and "ba" are equally similar to "a"
        let entries = vec![entry("ab", "first"), entry("ba", "second")];
        assert_eq!(similarity("a", "ab"), similarity("a", "ba"));
        assert_eq!(best_answer(&entries, "a"), Some("first"));
    }

    #[test]
    fn empty_dataset_yields_sentinel() {
        assert_eq!(respond(&[], "anything"), NO_ANSWER);
    }

    #[test]
    fn respond_falls_back_to_sentinel_below_threshold() {
        let entries = vec![entry("completely unrelated question", "answer")];
        assert_eq!(respond(&entries, "zzzzzz"), NO_ANSWER);
    }

    #[test]
    fn threshold_is_strictly_greater_than_half() {
        // "ab" vs "cb": matching "b", ratio = 2*1/4 = 0.5, which is not accepted
        let entries = vec![entry("cb", "answer")];
        assert!((similarity("ab", "cb") - 0.5).abs() < 1e-9);
        assert_eq!(best_answer(&entries, "ab"), None);
    }
}
