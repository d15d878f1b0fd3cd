//! Dynamic value completers for `--preset` and `--granularity`.

use clap_complete::engine::CompletionCandidate;
use skyboard_core::daterange::{Granularity, PresetKey};
use std::ffi::OsStr;

/// Complete granularity names.
pub fn complete_granularities(current: &OsStr) -> Vec<CompletionCandidate> {
    let current_str = current.to_str().unwrap_or("").to_uppercase();

    Granularity::ALL
        .iter()
        .map(|g| g.as_str())
        .filter(|name| name.starts_with(&current_str))
        .map(CompletionCandidate::new)
        .collect()
}

/// Complete preset keys, annotated with the granularities that accept them.
pub fn complete_presets(current: &OsStr) -> Vec<CompletionCandidate> {
    let current_str = current.to_str().unwrap_or("");
    let mut seen: Vec<PresetKey> = Vec::new();
    let mut completions = vec![];

    for granularity in Granularity::ALL {
        for key in PresetKey::vocabulary(granularity) {
            if seen.contains(key) || !key.as_str().starts_with(current_str) {
                continue;
            }
            seen.push(*key);

            let valid_for: Vec<&str> = Granularity::ALL
                .iter()
                .filter(|g| key.is_valid_for(**g))
                .map(|g| g.as_str())
                .collect();
            completions
                .push(CompletionCandidate::new(key.as_str()).help(Some(valid_for.join(", ").into())));
        }
    }

    completions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(completions: &[CompletionCandidate]) -> Vec<&str> {
        completions.iter().map(|c| c.get_value().to_str().unwrap()).collect()
    }

    #[test]
    fn test_complete_presets_all() {
        let completions = complete_presets(OsStr::new(""));
        let names = names(&completions);

        assert!(names.contains(&"auto"));
        assert!(names.contains(&"lastQuarter"));
        assert!(names.contains(&"lastSevenDays"));
        assert_eq!(names.iter().filter(|n| **n == "auto").count(), 1);
    }

    #[test]
    fn test_complete_presets_prefix_filter() {
        let completions = complete_presets(OsStr::new("last"));
        let names = names(&completions);

        assert!(names.contains(&"lastMonth"));
        assert!(!names.contains(&"auto"));
        assert!(!names.contains(&"thisYear"));
    }

    #[test]
    fn test_complete_granularities_case_insensitive() {
        let completions = complete_granularities(OsStr::new("mo"));
        assert_eq!(names(&completions), vec!["MONTHLY"]);
    }
}
