// Theme palette passed explicitly into every draw
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Light,
    Dark,
}

impl ThemeName {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: ThemeName,
    pub text_primary: &'static str,
    pub text_muted: &'static str,
    pub bg_primary: &'static str,
    pub bg_secondary: &'static str,
    pub bg_tertiary: &'static str,
    pub error: &'static str,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: ThemeName::Light,
            text_primary: "#111827",
            text_muted: "#6b7280",
            bg_primary: "#f9fafb",
            bg_secondary: "#f3f4f6",
            bg_tertiary: "#ffffff",
            error: "#ef4444",
        }
    }

    pub fn dark() -> Self {
        Self {
            name: ThemeName::Dark,
            text_primary: "#f3f4f6",
            text_muted: "#9ca3af",
            bg_primary: "#111827",
            bg_secondary: "#1f2937",
            bg_tertiary: "#374151",
            error: "#f87171",
        }
    }
}

impl From<ThemeName> for Theme {
    fn from(name: ThemeName) -> Self {
        match name {
            ThemeName::Light => Theme::light(),
            ThemeName::Dark => Theme::dark(),
        }
    }
}
