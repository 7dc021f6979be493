//! Daily-note location configuration.
//!
//! The folder and date pattern come from the host's daily-notes settings;
//! when the host reports no explicit values the defaults `Journal` and
//! `YYYY-MM-DD` apply. The pattern uses moment-style tokens because that is
//! what the host's daily-notes configuration speaks.

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};

pub const DEFAULT_FOLDER: &str = "Journal";
pub const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyNotesConfig {
    pub folder: String,
    pub date_format: String,
}

impl Default for DailyNotesConfig {
    fn default() -> Self {
        Self {
            folder: DEFAULT_FOLDER.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl DailyNotesConfig {
    #[must_use]
    pub fn new(folder: impl Into<String>, date_format: impl Into<String>) -> Self {
        let folder = folder.into();
        let date_format = date_format.into();
        Self {
            folder: if folder.trim().is_empty() {
                DEFAULT_FOLDER.to_string()
            } else {
                folder
            },
            date_format: if date_format.trim().is_empty() {
                DEFAULT_DATE_FORMAT.to_string()
            } else {
                date_format
            },
        }
    }

    /// Vault-relative path of the daily note for `date`:
    /// `{folder}/{formatted date}.md`.
    #[must_use]
    pub fn note_path(&self, date: NaiveDate) -> PathBuf {
        let name = format_moment(date, &self.date_format);
        Path::new(&self.folder).join(format!("{name}.md"))
    }

    /// Whether `path` is the expected daily note for `date`.
    ///
    /// Used by the auto-trigger to decide whether an opened or created file
    /// is eligible at all, independent of any content check.
    #[must_use]
    pub fn is_daily_note(&self, path: &Path, date: NaiveDate) -> bool {
        path == self.note_path(date)
    }
}

/// Render `date` with moment-style tokens: YYYY, YY, MM, M, DD, D.
/// Everything else passes through literally.
#[must_use]
pub fn format_moment(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    let mut rest = pattern;
    while !rest.is_empty() {
        if let Some(tail) = rest.strip_prefix("YYYY") {
            out.push_str(&format!("{:04}", date.year()));
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("YY") {
            out.push_str(&format!("{:02}", date.year().rem_euclid(100)));
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("MM") {
            out.push_str(&format!("{:02}", date.month()));
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix('M') {
            out.push_str(&date.month().to_string());
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("DD") {
            out.push_str(&format!("{:02}", date.day()));
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix('D') {
            out.push_str(&date.day().to_string());
            rest = tail;
        } else {
            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                out.push(c);
            }
            rest = chars.as_str();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{DailyNotesConfig, format_moment};
    use chrono::NaiveDate;
    use std::path::Path;

    fn march_5() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 5).unwrap()
    }

    #[test]
    fn default_pattern_is_iso_date() {
        assert_eq!(format_moment(march_5(), "YYYY-MM-DD"), "2026-03-05");
    }

    #[test]
    fn short_tokens_skip_zero_padding() {
        assert_eq!(format_moment(march_5(), "D/M/YY"), "5/3/26");
    }

    #[test]
    fn literal_characters_pass_through() {
        assert_eq!(format_moment(march_5(), "YYYY.MM.DD daily"), "2026.03.05 daily");
    }

    #[test]
    fn note_path_joins_folder_and_extension() {
        let cfg = DailyNotesConfig::default();
        assert_eq!(
            cfg.note_path(march_5()),
            Path::new("Journal").join("2026-03-05.md")
        );
    }

    #[test]
    fn empty_host_values_fall_back_to_defaults() {
        let cfg = DailyNotesConfig::new("", "  ");
        assert_eq!(cfg.folder, "Journal");
        assert_eq!(cfg.date_format, "YYYY-MM-DD");
    }

    #[test]
    fn recognizes_todays_note_and_rejects_others() {
        let cfg = DailyNotesConfig::default();
        let today = march_5();
        assert!(cfg.is_daily_note(&cfg.note_path(today), today));
        assert!(!cfg.is_daily_note(Path::new("Journal/2026-03-04.md"), today));
        assert!(!cfg.is_daily_note(Path::new("Notes/2026-03-05.md"), today));
    }
}
