use crate::{config::StoreConfig, error::Result, storage::Storage};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// What the user picked in the theme selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

/// The theme actually applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl ThemePreference {
    /// Resolves the preference against the host's dark-mode setting
    pub fn resolve(self, system_prefers_dark: bool) -> Theme {
        match self {
            Self::Light => Theme::Light,
            Self::Dark => Theme::Dark,
            Self::System if system_prefers_dark => Theme::Dark,
            Self::System => Theme::Light,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

impl Theme {
    fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            _ => Err(format!(
                "Invalid theme '{}'. Valid themes: light, dark, system",
                s
            )),
        }
    }
}

/// Reads the stored preference; absent, unreadable or unknown values mean
/// `System`
pub async fn load_preference<S: Storage + ?Sized>(
    storage: &S,
    config: &StoreConfig,
) -> ThemePreference {
    match storage.get(&config.theme_key).await {
        Ok(Some(raw)) => raw.parse::<ThemePreference>().unwrap_or_else(|err: String| {
            tracing::debug!(error = %err, "ignoring stored theme preference");
            ThemePreference::default()
        }),
        Ok(None) => ThemePreference::default(),
        Err(err) => {
            tracing::warn!(error = %err, "failed to read theme preference");
            ThemePreference::default()
        }
    }
}

/// Stores the preference, plus the resolved theme under the legacy key that
/// older builds read
pub async fn save_preference<S: Storage + ?Sized>(
    storage: &S,
    config: &StoreConfig,
    preference: ThemePreference,
    system_prefers_dark: bool,
) -> Result<Theme> {
    let theme = preference.resolve(system_prefers_dark);
    storage
        .set(&config.theme_key, preference.as_str())
        .await?;
    storage
        .set(&config.legacy_theme_key, theme.as_str())
        .await?;
    Ok(theme)
}
