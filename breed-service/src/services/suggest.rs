//! Nearest-name suggestions for unknown breed names.
//!
//! Scores candidates with the Ratcliff/Obershelp ratio `2·M / (|a| + |b|)`,
//! where `M` counts the characters in the longest common block and,
//! recursively, in the longest common blocks to its left and right.

/// Minimum ratio for a name to be offered as a suggestion.
pub const SUGGESTION_CUTOFF: f64 = 0.6;

/// Return the known name closest to `name`, if any scores at least [`SUGGESTION_CUTOFF`].
///
/// Each candidate is scored as `similarity_ratio(candidate, name)`; the ratio
/// is not symmetric when longest blocks tie. Ties go to the lexically larger name.
pub fn closest_match<'a, I>(name: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .map(|candidate| (similarity_ratio(candidate, name), candidate))
        .filter(|(score, _)| *score >= SUGGESTION_CUTOFF)
        .max_by(|(sa, na), (sb, nb)| sa.total_cmp(sb).then_with(|| na.cmp(nb)))
        .map(|(_, candidate)| candidate.to_string())
}

/// Similarity ratio in [0, 1]; two empty strings are identical.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (start_a, start_b, len) = longest_common_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_chars(&a[..start_a], &b[..start_b])
        + matching_chars(&a[start_a + len..], &b[start_b + len..])
}

/// Longest common contiguous block as (start in a, start in b, length),
/// preferring the earliest block on ties.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut prev = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        let mut current = vec![0usize; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            if ca == cb {
                let run = prev[j] + 1;
                current[j + 1] = run;
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            }
        }
        prev = current;
    }

    best
}
