//! Prompt construction for a vocabulary fetch.
//!
//! The opening phrasing is chosen uniformly at random from a small set of
//! semantically equivalent templates. This varies the wording between calls
//! as a mitigation against a provider serving cached or repeated
//! completions; it has no effect on correctness. The difficulty bands are
//! restated verbatim every call because the provider is stateless.

use rand::seq::IndexedRandom;

use lexinote_types::{DEFAULT_RECENT_WORDS, HistoryStore, LanguageConfig};

const OPENINGS: &[&str] = &[
    "Generate a word of the day for each of the following languages.",
    "Pick one vocabulary word for each of the languages listed below.",
    "Choose today's vocabulary word for every language that follows.",
    "Select a single fresh vocabulary word for each of these languages.",
];

/// Build the prompt for `languages` (already filtered to enabled ones).
///
/// One bullet line per language with its difficulty band, plus an explicit
/// avoid-list of up to the 20 most recent words where history exists.
#[must_use]
pub fn build(languages: &[LanguageConfig], history: &HistoryStore) -> String {
    let opening = OPENINGS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(OPENINGS[0]);

    let mut prompt = String::from(opening);
    prompt.push_str("\n\n");

    for language in languages {
        prompt.push_str(&format!(
            "- {} ({} difficulty: {})",
            language.name,
            language.difficulty,
            language.difficulty.band()
        ));
        let recent = history.recent(&language.name, DEFAULT_RECENT_WORDS);
        if !recent.is_empty() {
            prompt.push_str(&format!(
                ". Avoid these recently used words: {}",
                recent.join(", ")
            ));
        }
        prompt.push('\n');
    }

    prompt.push_str(
        "\nReturn ONLY a JSON array of objects, one object per language, each with exactly \
         the fields \"language\", \"word\", \"definition\", and \"example\". Every word must \
         match its language's difficulty tier and must not be any of the listed recent words. \
         Do not wrap the JSON in prose, commentary, or markdown fencing.",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::{OPENINGS, build};
    use lexinote_types::{Difficulty, HistoryStore, LanguageConfig};

    fn languages() -> Vec<LanguageConfig> {
        vec![
            LanguageConfig::new("English", Difficulty::Fluent),
            LanguageConfig::new("Spanish", Difficulty::Beginner),
        ]
    }

    #[test]
    fn one_bullet_line_per_language() {
        let prompt = build(&languages(), &HistoryStore::new());
        let bullets: Vec<&str> = prompt.lines().filter(|l| l.starts_with("- ")).collect();
        assert_eq!(bullets.len(), 2);
        assert!(bullets[0].contains("English"));
        assert!(bullets[1].contains("Spanish"));
    }

    #[test]
    fn difficulty_bands_are_restated_verbatim() {
        let prompt = build(&languages(), &HistoryStore::new());
        assert!(prompt.contains(Difficulty::Fluent.band()));
        assert!(prompt.contains(Difficulty::Beginner.band()));
    }

    #[test]
    fn recent_words_appear_as_an_avoid_list() {
        let mut history = HistoryStore::new();
        history.record("English", "serendipity", 100);
        history.record("English", "ephemeral", 100);
        let prompt = build(&languages(), &history);
        assert!(prompt.contains("Avoid these recently used words: serendipity, ephemeral"));
    }

    #[test]
    fn avoid_list_is_capped_at_twenty_words() {
        let mut history = HistoryStore::new();
        for i in 0..30 {
            history.record("English", &format!("word{i}"), 100);
        }
        let prompt = build(&languages(), &history);
        assert!(!prompt.contains("word9,"));
        assert!(prompt.contains("word10"));
        assert!(prompt.contains("word29"));
    }

    #[test]
    fn opening_always_comes_from_the_template_set() {
        for _ in 0..16 {
            let prompt = build(&languages(), &HistoryStore::new());
            assert!(OPENINGS.iter().any(|opening| prompt.starts_with(opening)));
        }
    }

    #[test]
    fn json_only_instruction_is_always_present() {
        let prompt = build(&languages(), &HistoryStore::new());
        assert!(prompt.contains("ONLY a JSON array"));
        assert!(prompt.contains("\"definition\""));
    }
}
