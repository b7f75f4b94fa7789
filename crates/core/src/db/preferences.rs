//! Scratch note and background theme preference
//!
//! Both are single raw-string entries, read once and rewritten whole.
//! Writes are best-effort: a quota or permission failure loses the
//! value on restart but never surfaces as an error.

use super::{Db, KEY_BACKGROUND, KEY_SCRATCHPAD};

/// Background theme token set; anything else stored falls back to
/// `Default`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundTheme {
    #[default]
    Default,
    Cream,
    Green,
    Sepia,
}

impl BackgroundTheme {
    pub const ALL: [BackgroundTheme; 4] = [
        BackgroundTheme::Default,
        BackgroundTheme::Cream,
        BackgroundTheme::Green,
        BackgroundTheme::Sepia,
    ];

    /// The persisted token
    pub fn as_token(self) -> &'static str {
        match self {
            BackgroundTheme::Default => "default",
            BackgroundTheme::Cream => "cream",
            BackgroundTheme::Green => "green",
            BackgroundTheme::Sepia => "sepia",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "default" => Some(BackgroundTheme::Default),
            "cream" => Some(BackgroundTheme::Cream),
            "green" => Some(BackgroundTheme::Green),
            "sepia" => Some(BackgroundTheme::Sepia),
            _ => None,
        }
    }

    /// Display label for the host UI
    pub fn label(self) -> &'static str {
        match self {
            BackgroundTheme::Default => "기본 (흰색)",
            BackgroundTheme::Cream => "크림 (눈 편한)",
            BackgroundTheme::Green => "녹색 톤 (시력 보호)",
            BackgroundTheme::Sepia => "세피아",
        }
    }
}

pub struct Preferences {
    db: Db,
}

impl Preferences {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// The saved scratch note, empty when never written
    pub fn scratch_note(&self) -> String {
        self.db.get_raw(KEY_SCRATCHPAD).unwrap_or_default()
    }

    pub fn set_scratch_note(&self, text: &str) {
        if let Err(e) = self.db.put_raw(KEY_SCRATCHPAD, text) {
            tracing::warn!(error = %e, "failed to persist scratch note");
        }
    }

    /// The saved theme, `Default` when unset or unrecognized
    pub fn background_theme(&self) -> BackgroundTheme {
        self.db
            .get_raw(KEY_BACKGROUND)
            .and_then(|token| BackgroundTheme::from_token(&token))
            .unwrap_or_default()
    }

    pub fn set_background_theme(&self, theme: BackgroundTheme) {
        if let Err(e) = self.db.put_raw(KEY_BACKGROUND, theme.as_token()) {
            tracing::warn!(error = %e, "failed to persist background theme");
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_scratch_note_round_trip() {
        let dir = tempdir().unwrap();
        let prefs = Preferences::new(Db::open(dir.path()).unwrap());

        assert_eq!(prefs.scratch_note(), "");
        prefs.set_scratch_note("잠깐 메모\n둘째 줄");
        assert_eq!(prefs.scratch_note(), "잠깐 메모\n둘째 줄");
        prefs.set_scratch_note("");
        assert_eq!(prefs.scratch_note(), "");
    }

    #[test]
    fn test_theme_round_trip() {
        let dir = tempdir().unwrap();
        let prefs = Preferences::new(Db::open(dir.path()).unwrap());

        assert_eq!(prefs.background_theme(), BackgroundTheme::Default);
        prefs.set_background_theme(BackgroundTheme::Sepia);
        assert_eq!(prefs.background_theme(), BackgroundTheme::Sepia);
    }

    #[test]
    fn test_unknown_stored_token_falls_back() {
        let dir = tempdir().unwrap();
        let db = Db::open(dir.path()).unwrap();
        db.put_raw(KEY_BACKGROUND, "hotpink").unwrap();
        let prefs = Preferences::new(db);
        assert_eq!(prefs.background_theme(), BackgroundTheme::Default);
    }

    #[test]
    fn test_token_mapping() {
        for theme in BackgroundTheme::ALL {
            assert_eq!(BackgroundTheme::from_token(theme.as_token()), Some(theme));
            assert!(!theme.label().is_empty());
        }
        assert_eq!(BackgroundTheme::from_token("neon"), None);
    }
}
