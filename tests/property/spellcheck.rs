// Properties of the nearest-name suggestion.
use super::strategies::arb_name;
use gravel::spellcheck_string;
use proptest::prelude::*;

/// Reference distance, unbounded, for checking the production one.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut dp = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b.len() {
        dp[0][j] = j;
    }
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);
        }
    }
    dp[a.len()][b.len()]
}

fn budget(name: &str) -> usize {
    std::cmp::max(1, name.chars().count() / 4)
}

proptest! {
    #[test]
    fn prop_suggestion_is_closest_candidate_within_budget(
        name in arb_name(),
        candidates in prop::collection::vec(arb_name(), 0..8),
    ) {
        let suggestion = spellcheck_string(&name, candidates.iter().map(String::as_str));
        match suggestion {
            Some(found) => {
                prop_assert!(candidates.contains(&found));
                let found_distance = levenshtein(&name, &found);
                prop_assert!(found_distance <= budget(&name));
                // Every candidate ahead of the winner is strictly farther;
                // ties resolve to the earliest occurrence.
                for candidate in &candidates {
                    if candidate == &found {
                        break;
                    }
                    prop_assert!(levenshtein(&name, candidate) > found_distance);
                }
            }
            None => {
                for candidate in &candidates {
                    prop_assert!(levenshtein(&name, candidate) > budget(&name));
                }
            }
        }
    }

    #[test]
    fn prop_exact_candidate_is_always_found(
        name in arb_name(),
        others in prop::collection::vec(arb_name(), 0..5),
    ) {
        let mut candidates: Vec<&str> = others.iter().map(String::as_str).collect();
        candidates.push(&name);
        let result = spellcheck_string(&name, candidates.iter().copied());
        prop_assert_eq!(
            result.as_deref(),
            Some(name.as_str())
        );
    }
}
