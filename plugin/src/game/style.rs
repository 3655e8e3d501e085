use bevy::prelude::*;
use serde::Deserialize;

use crate::ws::Outcome;

/// Colours of the game UI, as CSS-like strings.
///
/// Accepts named colours, `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`,
/// `rgb(r, g, b)` and `rgba(r, g, b, a)`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: String,
    pub panel: String,
    pub text: String,
    pub button: String,
    pub button_hovered: String,
    pub button_pressed: String,
    pub win: String,
    pub lose: String,
    pub tie: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: "#1e1e2e".to_string(),
            panel: "#313244".to_string(),
            text: "white".to_string(),
            button: "#45475a".to_string(),
            button_hovered: "#585b70".to_string(),
            button_pressed: "#89b4fa".to_string(),
            win: "#a6e3a1".to_string(),
            lose: "#f38ba8".to_string(),
            tie: "#f9e2af".to_string(),
        }
    }
}

impl Theme {
    /// Parse every colour, falling back to the default theme's value for
    /// anything that does not parse.
    pub fn resolve(&self) -> ResolvedTheme {
        let fallback = Theme::default();
        ResolvedTheme {
            background: resolve_color(&self.background, &fallback.background),
            panel: resolve_color(&self.panel, &fallback.panel),
            text: resolve_color(&self.text, &fallback.text),
            button: resolve_color(&self.button, &fallback.button),
            button_hovered: resolve_color(&self.button_hovered, &fallback.button_hovered),
            button_pressed: resolve_color(&self.button_pressed, &fallback.button_pressed),
            win: resolve_color(&self.win, &fallback.win),
            lose: resolve_color(&self.lose, &fallback.lose),
            tie: resolve_color(&self.tie, &fallback.tie),
        }
    }
}

fn resolve_color(value: &str, fallback: &str) -> Color {
    parse_color(value)
        .or_else(|| {
            log::warn!("Using default colour '{}' instead of '{}'", fallback, value);
            parse_color(fallback)
        })
        .unwrap_or(Color::WHITE)
}

/// Theme colours ready for use in components.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct ResolvedTheme {
    pub background: Color,
    pub panel: Color,
    pub text: Color,
    pub button: Color,
    pub button_hovered: Color,
    pub button_pressed: Color,
    pub win: Color,
    pub lose: Color,
    pub tie: Color,
}

impl Default for ResolvedTheme {
    fn default() -> Self {
        Theme::default().resolve()
    }
}

impl ResolvedTheme {
    /// Tint for the result region.
    pub fn outcome_color(&self, outcome: Option<Outcome>) -> Color {
        match outcome {
            Some(Outcome::Win) => self.win,
            Some(Outcome::Lose) => self.lose,
            Some(Outcome::Tie) => self.tie,
            None => self.text,
        }
    }

    pub fn button_color(&self, interaction: Interaction) -> Color {
        match interaction {
            Interaction::Pressed => self.button_pressed,
            Interaction::Hovered => self.button_hovered,
            Interaction::None => self.button,
        }
    }
}

/// Parse a CSS-like colour string.
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim().to_lowercase();

    match value.as_str() {
        "transparent" => return Some(Color::NONE),
        "black" => return Some(Color::BLACK),
        "white" => return Some(Color::WHITE),
        "red" => return Some(Color::srgb(1.0, 0.0, 0.0)),
        "green" => return Some(Color::srgb(0.0, 1.0, 0.0)),
        "blue" => return Some(Color::srgb(0.0, 0.0, 1.0)),
        "yellow" => return Some(Color::srgb(1.0, 1.0, 0.0)),
        "orange" => return Some(Color::srgb(1.0, 0.65, 0.0)),
        "gray" | "grey" => return Some(Color::srgb(0.5, 0.5, 0.5)),
        "darkgray" | "darkgrey" => return Some(Color::srgb(0.25, 0.25, 0.25)),
        "lightgray" | "lightgrey" => return Some(Color::srgb(0.75, 0.75, 0.75)),
        _ => {}
    }

    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex_color(hex);
    }

    if value.starts_with("rgb") {
        return parse_rgb_color(&value);
    }

    log::warn!("Unknown color format: '{}'", value);
    None
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }

    let digits: Vec<u8> = match hex.len() {
        // Short forms double each digit: #abc -> #aabbcc
        3 | 4 => hex
            .chars()
            .map(|c| u8::from_str_radix(&c.to_string().repeat(2), 16).ok())
            .collect::<Option<_>>()?,
        6 | 8 => (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
            .collect::<Option<_>>()?,
        _ => return None,
    };

    let a = digits.get(3).copied().unwrap_or(255);
    Some(Color::srgba_u8(digits[0], digits[1], digits[2], a))
}

fn parse_rgb_color(value: &str) -> Option<Color> {
    let inner = value
        .trim_start_matches("rgba(")
        .trim_start_matches("rgb(")
        .trim_end_matches(')');

    let parts: Vec<&str> = inner.split(',').map(|s| s.trim()).collect();

    let r: f32 = parts.first()?.parse().ok()?;
    let g: f32 = parts.get(1)?.parse().ok()?;
    let b: f32 = parts.get(2)?.parse().ok()?;
    let a: f32 = parts.get(3).and_then(|s| s.parse().ok()).unwrap_or(1.0);

    // Normalize to 0-1 range if values are 0-255
    let (r, g, b) = if r > 1.0 || g > 1.0 || b > 1.0 {
        (r / 255.0, g / 255.0, b / 255.0)
    } else {
        (r, g, b)
    };

    Some(Color::srgba(r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_and_hex_colours() {
        assert_eq!(parse_color("White"), Some(Color::WHITE));
        assert_eq!(parse_color("#fff"), Some(Color::srgba_u8(255, 255, 255, 255)));
        assert_eq!(parse_color("#ff000080"), Some(Color::srgba_u8(255, 0, 0, 128)));
        assert_eq!(parse_color("#1e1e2e"), Some(Color::srgb_u8(0x1e, 0x1e, 0x2e)));
    }

    #[test]
    fn rgb_functions() {
        assert_eq!(
            parse_color("rgb(255, 0, 0)"),
            Some(Color::srgba(1.0, 0.0, 0.0, 1.0))
        );
        assert_eq!(
            parse_color("rgba(0, 0, 1, 0.5)"),
            Some(Color::srgba(0.0, 0.0, 1.0, 0.5))
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("#zzz"), None);
        assert_eq!(parse_color("chartreuse-ish"), None);
    }

    #[test]
    fn bad_theme_entries_fall_back_to_defaults() {
        let theme = Theme {
            win: "not a colour".to_string(),
            lose: "red".to_string(),
            ..Theme::default()
        };
        let resolved = theme.resolve();
        let defaults = ResolvedTheme::default();

        assert_eq!(resolved.win, defaults.win);
        assert_eq!(resolved.lose, Color::srgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn outcomes_pick_their_tint() {
        let theme = ResolvedTheme::default();
        assert_eq!(theme.outcome_color(Some(Outcome::Win)), theme.win);
        assert_eq!(theme.outcome_color(Some(Outcome::Lose)), theme.lose);
        assert_eq!(theme.outcome_color(Some(Outcome::Tie)), theme.tie);
        assert_eq!(theme.outcome_color(None), theme.text);
    }
}
