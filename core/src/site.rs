use serde::{Deserialize, Serialize};

pub const THEME_STORAGE_KEY: &str = "theme";
pub const THEME_ATTRIBUTE: &str = "data-theme";
pub const BACK_TO_TOP_THRESHOLD_PX: f64 = 320.0;
pub const REVEAL_THRESHOLD: f64 = 0.06;
pub const SKILL_WIDTH_FALLBACK: &str = "70%";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn toggle_glyph(self) -> &'static str {
        match self {
            Theme::Dark => "☀️",
            Theme::Light => "🌙",
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }
}

pub fn resolve_theme(stored: Option<&str>, prefers_dark: bool) -> Theme {
    if let Some(theme) = stored.and_then(Theme::parse) {
        return theme;
    }
    if prefers_dark {
        Theme::Dark
    } else {
        Theme::Light
    }
}

pub fn anchor_target(href: &str) -> Option<&str> {
    let href = href.trim();
    if href.len() <= 1 || !href.starts_with('#') {
        return None;
    }
    Some(href)
}

pub fn back_to_top_visible(scroll_y: f64) -> bool {
    scroll_y > BACK_TO_TOP_THRESHOLD_PX
}

pub fn skill_width(custom_property: &str) -> &str {
    let value = custom_property.trim();
    if value.is_empty() {
        SKILL_WIDTH_FALLBACK
    } else {
        value
    }
}

pub fn accent_or<'a>(custom_property: &'a str, fallback: &'a str) -> &'a str {
    let value = custom_property.trim();
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
