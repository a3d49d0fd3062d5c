use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::session::card::PartOfSpeech;
use crate::session::grade::Grade;

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub muted: String,
    pub accent: String,
    pub border: String,
    pub border_focused: String,
    pub header_bg: String,
    pub header_fg: String,
    pub selected_bg: String,
    pub unknown: String,
    pub noun: String,
    pub verb: String,
    pub particle: String,
    pub adjective: String,
    pub connector: String,
    pub other: String,
    pub very_hard: String,
    pub okay: String,
    pub good: String,
    pub easy: String,
}

impl Theme {
    /// User themes in `<config_dir>/jpdrills/themes/` shadow bundled ones.
    pub fn load(name: &str) -> Option<Self> {
        let filename = format!("{name}.toml");

        let user_theme_path = Config::config_dir().join("themes").join(&filename);
        if let Ok(content) = fs::read_to_string(&user_theme_path) {
            match toml::from_str::<Theme>(&content) {
                Ok(theme) => return Some(theme),
                Err(e) => tracing::warn!(path = %user_theme_path.display(), error = %e, "invalid theme file"),
            }
        }

        if let Some(file) = ThemeAssets::get(&filename)
            && let Ok(content) = std::str::from_utf8(file.data.as_ref())
            && let Ok(theme) = toml::from_str::<Theme>(content)
        {
            return Some(theme);
        }

        None
    }

    pub fn available_themes() -> Vec<String> {
        let mut names: Vec<String> = ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect();
        names.sort();
        names
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("catppuccin-mocha").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#1e1e2e".to_string(),
            fg: "#cdd6f4".to_string(),
            muted: "#6c7086".to_string(),
            accent: "#89b4fa".to_string(),
            border: "#45475a".to_string(),
            border_focused: "#89b4fa".to_string(),
            header_bg: "#313244".to_string(),
            header_fg: "#cdd6f4".to_string(),
            selected_bg: "#45475a".to_string(),
            unknown: "#f38ba8".to_string(),
            noun: "#89b4fa".to_string(),
            verb: "#a6e3a1".to_string(),
            particle: "#f9e2af".to_string(),
            adjective: "#cba6f7".to_string(),
            connector: "#94e2d5".to_string(),
            other: "#bac2de".to_string(),
            very_hard: "#f38ba8".to_string(),
            okay: "#fab387".to_string(),
            good: "#a6e3a1".to_string(),
            easy: "#89dceb".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6
            && let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            )
        {
            return Color::Rgb(r, g, b);
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn muted(&self) -> Color { Self::parse_color(&self.muted) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn border_focused(&self) -> Color { Self::parse_color(&self.border_focused) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn selected_bg(&self) -> Color { Self::parse_color(&self.selected_bg) }
    pub fn unknown(&self) -> Color { Self::parse_color(&self.unknown) }

    pub fn part_of_speech(&self, pos: PartOfSpeech) -> Color {
        Self::parse_color(match pos {
            PartOfSpeech::Noun => &self.noun,
            PartOfSpeech::Verb => &self.verb,
            PartOfSpeech::Particle => &self.particle,
            PartOfSpeech::Adjective => &self.adjective,
            PartOfSpeech::Connector => &self.connector,
            PartOfSpeech::Other => &self.other,
        })
    }

    pub fn grade(&self, grade: Grade) -> Color {
        Self::parse_color(match grade {
            Grade::VeryHard => &self.very_hard,
            Grade::Okay => &self.okay,
            Grade::Good => &self.good,
            Grade::Easy => &self.easy,
        })
    }
}
