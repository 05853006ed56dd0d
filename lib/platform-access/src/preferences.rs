//! Per-browser display preferences: interface language and avatar.
//!
//! Preferences outlive the session. Logging out clears the session keys
//! and leaves these alone.

use drugledger_core::AvatarId;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::storage::{GuardedStore, KeyValueStore};

/// Key holding an explicitly chosen language code.
pub const LANGUAGE_KEY: &str = "language";
/// Key holding the language to use when auto-detect is off.
pub const PREFERRED_LANGUAGE_KEY: &str = "preferred-language";
/// Key holding `"true"` or `"false"`.
pub const AUTO_DETECT_LANGUAGE_KEY: &str = "auto-detect-language";
/// Key holding the chosen avatar id.
pub const USER_AVATAR_KEY: &str = "userAvatar";

/// Supported interface languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
    De,
    Zh,
}

impl Language {
    pub const ALL: [Self; 5] = [Self::En, Self::Es, Self::Fr, Self::De, Self::Zh];

    /// Returns the two-letter code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::De => "de",
            Self::Zh => "zh",
        }
    }

    /// Returns the language's name in that language.
    #[must_use]
    pub fn native_name(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Es => "Español",
            Self::Fr => "Français",
            Self::De => "Deutsch",
            Self::Zh => "中文",
        }
    }

    /// Parses a two-letter code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }

    /// Picks a language from a browser language tag such as `es-MX`.
    ///
    /// Only the primary subtag is considered. Unsupported or missing tags
    /// fall back to English.
    #[must_use]
    pub fn detect(tag: Option<&str>) -> Self {
        tag.and_then(|tag| tag.split('-').next())
            .map(str::to_ascii_lowercase)
            .and_then(|primary| Self::from_code(&primary))
            .unwrap_or_default()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A selectable profile avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Avatar {
    pub id: &'static str,
    pub nickname: &'static str,
    pub url: &'static str,
}

pub static AVATARS: [Avatar; 10] = [
    Avatar { id: "avatar1", nickname: "CryptoWizard", url: "/avatars/wizard.svg" },
    Avatar { id: "avatar2", nickname: "BlockMaster", url: "/avatars/robot.svg" },
    Avatar { id: "avatar3", nickname: "ChainNavigator", url: "/avatars/astronaut.svg" },
    Avatar { id: "avatar4", nickname: "DigitalNomad", url: "/avatars/traveler.svg" },
    Avatar { id: "avatar5", nickname: "TechSage", url: "/avatars/scientist.svg" },
    Avatar { id: "avatar6", nickname: "QuantumQueen", url: "/avatars/queen.svg" },
    Avatar { id: "avatar7", nickname: "CyberSamurai", url: "/avatars/samurai.svg" },
    Avatar { id: "avatar8", nickname: "DataDruid", url: "/avatars/druid.svg" },
    Avatar { id: "avatar9", nickname: "NetRunner", url: "/avatars/runner.svg" },
    Avatar { id: "avatar10", nickname: "CodePhoenix", url: "/avatars/phoenix.svg" },
];

/// Looks up an avatar by id.
#[must_use]
pub fn avatar_by_id(id: &str) -> Option<&'static Avatar> {
    AVATARS.iter().find(|avatar| avatar.id == id)
}

/// Reads and writes preferences. Storage failures degrade to memory.
#[derive(Debug)]
pub struct PreferenceStore<S> {
    storage: GuardedStore<S>,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    #[must_use]
    pub fn new(backend: S) -> Self {
        Self {
            storage: GuardedStore::new(backend),
        }
    }

    /// Returns true once storage has failed and state is memory-only.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.storage.is_degraded()
    }

    /// Whether the language follows the browser. On unless explicitly `"false"`.
    #[must_use]
    pub fn auto_detect(&self) -> bool {
        self.storage.get(AUTO_DETECT_LANGUAGE_KEY).as_deref() != Some("false")
    }

    /// Returns the language to display.
    ///
    /// `browser_tag` is the browser's reported language, used when
    /// auto-detect is on.
    #[must_use]
    pub fn language(&self, browser_tag: Option<&str>) -> Language {
        if self.auto_detect() {
            return Language::detect(browser_tag);
        }
        [PREFERRED_LANGUAGE_KEY, LANGUAGE_KEY]
            .into_iter()
            .filter_map(|key| self.storage.get(key))
            .find_map(|code| Language::from_code(&code))
            .unwrap_or_default()
    }

    /// Chooses a language explicitly, turning auto-detect off.
    pub fn set_language(&self, language: Language) {
        debug!(%language, "language chosen");
        self.storage.set(LANGUAGE_KEY, language.code());
        self.storage.set(PREFERRED_LANGUAGE_KEY, language.code());
        self.storage.set(AUTO_DETECT_LANGUAGE_KEY, "false");
    }

    /// Toggles auto-detect and returns the resulting language.
    ///
    /// Enabling it stores the detected language as the preferred one.
    pub fn set_auto_detect(&self, enabled: bool, browser_tag: Option<&str>) -> Language {
        if enabled {
            let detected = Language::detect(browser_tag);
            self.storage.set(AUTO_DETECT_LANGUAGE_KEY, "true");
            self.storage.set(PREFERRED_LANGUAGE_KEY, detected.code());
            detected
        } else {
            self.storage.set(AUTO_DETECT_LANGUAGE_KEY, "false");
            self.language(browser_tag)
        }
    }

    /// Returns the chosen avatar, or the first one.
    #[must_use]
    pub fn avatar(&self) -> &'static Avatar {
        self.storage
            .get(USER_AVATAR_KEY)
            .and_then(|id| avatar_by_id(&id))
            .unwrap_or(&AVATARS[0])
    }

    /// Stores the avatar choice. Unknown ids are ignored and return `None`.
    pub fn set_avatar(&self, id: &AvatarId) -> Option<&'static Avatar> {
        let avatar = avatar_by_id(id.as_str())?;
        self.storage.set(USER_AVATAR_KEY, avatar.id);
        Some(avatar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStore;
    use crate::storage::{MemoryStore, UnavailableStore};

    #[test]
    fn detect_uses_primary_subtag() {
        assert_eq!(Language::detect(Some("es-MX")), Language::Es);
        assert_eq!(Language::detect(Some("zh-CN")), Language::Zh);
        assert_eq!(Language::detect(Some("DE")), Language::De);
        assert_eq!(Language::detect(Some("pt-BR")), Language::En);
        assert_eq!(Language::detect(None), Language::En);
    }

    #[test]
    fn native_names() {
        assert_eq!(Language::Fr.native_name(), "Français");
        assert_eq!(Language::Zh.native_name(), "中文");
        assert_eq!(Language::from_code("es"), Some(Language::Es));
        assert_eq!(Language::from_code("xx"), None);
    }

    #[test]
    fn auto_detect_defaults_on() {
        let prefs = PreferenceStore::new(MemoryStore::new());
        assert!(prefs.auto_detect());
        assert_eq!(prefs.language(Some("fr-CA")), Language::Fr);
    }

    #[test]
    fn explicit_choice_disables_auto_detect() {
        let backend = MemoryStore::new();
        let prefs = PreferenceStore::new(&backend);

        prefs.set_language(Language::De);

        assert!(!prefs.auto_detect());
        assert_eq!(prefs.language(Some("es-ES")), Language::De);
        assert_eq!(backend.get(LANGUAGE_KEY).expect("get").as_deref(), Some("de"));
        assert_eq!(
            backend.get(AUTO_DETECT_LANGUAGE_KEY).expect("get").as_deref(),
            Some("false")
        );
    }

    #[test]
    fn enabling_auto_detect_stores_detected_language() {
        let backend = MemoryStore::new();
        let prefs = PreferenceStore::new(&backend);
        prefs.set_language(Language::De);

        assert_eq!(prefs.set_auto_detect(true, Some("zh-TW")), Language::Zh);
        assert!(prefs.auto_detect());
        assert_eq!(
            backend.get(PREFERRED_LANGUAGE_KEY).expect("get").as_deref(),
            Some("zh")
        );

        // Turning it back off keeps the last detected language.
        assert_eq!(prefs.set_auto_detect(false, Some("fr")), Language::Zh);
    }

    #[test]
    fn unknown_stored_language_falls_back() {
        let backend = MemoryStore::new();
        backend.set(AUTO_DETECT_LANGUAGE_KEY, "false").expect("set");
        backend.set(PREFERRED_LANGUAGE_KEY, "klingon").expect("set");
        backend.set(LANGUAGE_KEY, "es").expect("set");

        let prefs = PreferenceStore::new(&backend);
        assert_eq!(prefs.language(None), Language::Es);

        backend.remove(LANGUAGE_KEY).expect("remove");
        assert_eq!(prefs.language(None), Language::En);
    }

    #[test]
    fn avatar_catalogue() {
        assert_eq!(AVATARS.len(), 10);
        assert_eq!(AVATARS[0].nickname, "CryptoWizard");
        assert_eq!(avatar_by_id("avatar10").map(|a| a.url), Some("/avatars/phoenix.svg"));
        assert_eq!(avatar_by_id("avatar11"), None);
    }

    #[test]
    fn avatar_defaults_and_persists() {
        let prefs = PreferenceStore::new(MemoryStore::new());
        assert_eq!(prefs.avatar().id, "avatar1");

        let chosen = prefs.set_avatar(&AvatarId::new("avatar7"));
        assert_eq!(chosen.map(|a| a.nickname), Some("CyberSamurai"));
        assert_eq!(prefs.avatar().id, "avatar7");

        assert_eq!(prefs.set_avatar(&AvatarId::new("nope")), None);
        assert_eq!(prefs.avatar().id, "avatar7");
    }

    #[test]
    fn preferences_survive_logout() {
        let backend = MemoryStore::new();
        let prefs = PreferenceStore::new(&backend);
        let sessions = SessionStore::new(&backend);

        prefs.set_avatar(&AvatarId::new("avatar3"));
        prefs.set_language(Language::Fr);
        sessions.clear_session();

        assert_eq!(prefs.avatar().id, "avatar3");
        assert_eq!(prefs.language(None), Language::Fr);
    }

    #[test]
    fn degrades_without_storage() {
        let prefs = PreferenceStore::new(UnavailableStore);
        prefs.set_language(Language::Es);
        assert!(prefs.is_degraded());
        assert_eq!(prefs.language(Some("de")), Language::Es);
    }
}
