use std::fs;
use std::str::FromStr;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Deserializer};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Colors accept anything ratatui parses: `#rrggbb`, names like `"red"`,
/// or a 256-color index.
#[derive(Clone, Debug, Deserialize)]
pub struct ThemeColors {
    #[serde(deserialize_with = "color")]
    pub bg: Color,
    #[serde(deserialize_with = "color")]
    pub fg: Color,
    #[serde(deserialize_with = "color")]
    pub correct: Color,
    #[serde(deserialize_with = "color")]
    pub incorrect: Color,
    #[serde(deserialize_with = "color")]
    pub pending: Color,
    #[serde(deserialize_with = "color")]
    pub cursor: Color,
    #[serde(deserialize_with = "color")]
    pub accent: Color,
    #[serde(deserialize_with = "color")]
    pub border: Color,
    #[serde(deserialize_with = "color")]
    pub success: Color,
}

fn color<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Color::from_str(&raw).map_err(|_| serde::de::Error::custom(format!("invalid color {raw:?}")))
}

impl Theme {
    /// User themes in `<config>/wpmx/themes/` shadow bundled ones.
    pub fn load(name: &str) -> Option<Self> {
        let filename = format!("{name}.toml");

        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir.join("wpmx").join("themes").join(&filename);
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                match toml::from_str::<Theme>(&content) {
                    Ok(theme) => return Some(theme),
                    Err(err) => {
                        tracing::warn!(path = %user_theme_path.display(), %err, "ignoring bad theme")
                    }
                }
            }
        }

        let file = ThemeAssets::get(&filename)?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str(content).ok()
    }

    pub fn available_themes() -> Vec<String> {
        ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect()
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
            bg: Color::Reset,
            fg: Color::White,
            correct: Color::Green,
            incorrect: Color::Red,
            pending: Color::DarkGray,
            cursor: Color::White,
            accent: Color::Yellow,
            border: Color::DarkGray,
            success: Color::LightGreen,
        }
    }
}
