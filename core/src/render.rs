//! Markdown rendering of fetched entries.

use lexinote_types::WordEntry;

/// Fixed header line prefixing every generated block.
///
/// This exact substring is also the sole "already generated" signal used
/// for duplicate detection in notes. Editing it out of a note re-triggers
/// generation; that fragility is preserved deliberately because consumers
/// depend on the literal text.
pub const SENTINEL_HEADER: &str = "> [!QUOTE] Vocabulary";

/// Render the block: the sentinel header line, then one group per entry in
/// the order the provider returned them.
///
/// Entries are not re-sorted or matched back against the requested language
/// list; a provider that reorders or omits a language is reflected as-is.
/// Groups are blank-line separated with no trailing separator.
#[must_use]
pub fn render_block(entries: &[WordEntry]) -> String {
    let groups: Vec<String> = entries
        .iter()
        .map(|entry| {
            format!(
                "**{}:**\n**{}**\n*Definition:* {}\n*Example:* {}",
                entry.language, entry.word, entry.definition, entry.example
            )
        })
        .collect();
    format!("{SENTINEL_HEADER}\n{}", groups.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::{SENTINEL_HEADER, render_block};
    use lexinote_types::WordEntry;

    fn entry(language: &str, word: &str) -> WordEntry {
        WordEntry {
            language: language.to_string(),
            word: word.to_string(),
            definition: "D".to_string(),
            example: "E".to_string(),
        }
    }

    #[test]
    fn single_entry_renders_header_and_group_without_trailing_separator() {
        let block = render_block(&[entry("English", "serendipity")]);
        assert_eq!(
            block,
            "> [!QUOTE] Vocabulary\n\
             **English:**\n\
             **serendipity**\n\
             *Definition:* D\n\
             *Example:* E"
        );
    }

    #[test]
    fn groups_are_blank_line_separated_in_provider_order() {
        let block = render_block(&[entry("Spanish", "duende"), entry("English", "petrichor")]);
        let groups: Vec<&str> = block.split("\n\n").collect();
        assert_eq!(groups.len(), 2);
        assert!(groups[0].contains("**Spanish:**"));
        assert!(groups[1].starts_with("**English:**"));
        assert!(!block.ends_with('\n'));
    }

    #[test]
    fn missing_fields_render_as_empty_fragments() {
        let block = render_block(&[WordEntry {
            language: "English".to_string(),
            word: "petrichor".to_string(),
            ..WordEntry::default()
        }]);
        assert!(block.contains("*Definition:* \n"));
        assert!(block.ends_with("*Example:* "));
    }

    #[test]
    fn block_always_starts_with_the_sentinel() {
        assert!(render_block(&[]).starts_with(SENTINEL_HEADER));
    }
}
