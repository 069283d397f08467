// Token sort similarity for matching spreadsheet headers to expected column names.
//
// Both strings are lowercased, split on anything that is not a letter or digit,
// the tokens sorted and re-joined with single spaces. The score is the indel
// similarity of the two results: 200 * LCS / (len(a) + len(b)), rounded.
//
// `_` separates tokens too, unlike fuzzywuzzy's `full_process` which keeps it as
// a word character. Expected names are snake_case (`projects_approved`) while
// sheet headers use spaces in any order (`Approved Projects`), and both must
// reach the same token set to pass the threshold.

pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    let a = sorted_tokens(a);
    let b = sorted_tokens(b);
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let lcs = longest_common_subsequence(&a, &b);
    let ratio = 200.0 * lcs as f64 / (a.len() + b.len()) as f64;
    ratio.round() as u8
}

/// Index and score of the best scoring candidate. The first one wins ties.
pub fn best_match(query: &str, candidates: &[String]) -> Option<(usize, u8)> {
    let mut best: Option<(usize, u8)> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let score = token_sort_ratio(query, candidate);
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((index, score));
        }
    }
    best
}

fn sorted_tokens(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut tokens: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];
    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            current[j + 1] = if ca == cb {
                previous[j] + 1
            } else {
                current[j].max(previous[j + 1])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}
