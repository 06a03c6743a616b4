//! Palette and text helpers shared by widgets and views

use ratatui::prelude::*;
use std::str::FromStr;

use crate::settings::TerminalColors;
use crate::widgets::WidgetColors;

/// Resolve a colour name (`white`, `lightblue`, ...) or `#rrggbb` hex string
pub fn resolve_color(name: &str) -> Result<Color, String> {
    Color::from_str(name.trim()).map_err(|_| format!("Unknown colour '{}'", name))
}

/// Render attribute for a foreground/background pair
pub fn color_pair(fg: Color, bg: Color) -> Style {
    Style::default().fg(fg).bg(bg)
}

/// Colours resolved from settings
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub foreground: Color,
    pub background: Color,
    pub contrast: Color,
    pub error: Color,
}

impl Palette {
    pub fn from_settings(colors: &TerminalColors) -> Result<Palette, String> {
        Ok(Palette {
            foreground: resolve_color(&colors.foreground)?,
            background: resolve_color(&colors.background)?,
            contrast: resolve_color(&colors.contrast)?,
            error: resolve_color(&colors.error)?,
        })
    }

    /// Defaults handed to every widget constructor
    pub fn widget_colors(&self) -> WidgetColors {
        WidgetColors::new(self.foreground, self.background)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            foreground: Color::White,
            background: Color::Black,
            contrast: Color::Rgb(0x77, 0x77, 0x77),
            error: Color::Rgb(0xff, 0x74, 0x6c),
        }
    }
}

/// Truncate to `max_len` characters, ending in `...` when cut
pub fn ellipsize(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    if max_len <= 3 {
        return text.chars().take(max_len).collect();
    }
    let mut out: String = text.chars().take(max_len - 3).collect();
    out.push_str("...");
    out
}

/// Simple JSON syntax highlighting
pub fn highlight_json(text: &str, base: Style) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for line in text.lines() {
        let mut spans = Vec::new();
        let mut current = String::new();
        let mut in_string = false;
        let mut is_key = false;

        for (i, c) in line.char_indices() {
            match c {
                '"' if !in_string => {
                    if !current.is_empty() {
                        spans.push(Span::styled(std::mem::take(&mut current), base));
                    }
                    in_string = true;
                    current.push(c);
                    is_key = line[i + 1..]
                        .find('"')
                        .map(|end| line[i + 1 + end + 1..].trim_start().starts_with(':'))
                        .unwrap_or(false);
                }
                '"' => {
                    current.push(c);
                    let color = if is_key { Color::Cyan } else { Color::Green };
                    spans.push(Span::styled(std::mem::take(&mut current), base.fg(color)));
                    in_string = false;
                    is_key = false;
                }
                '{' | '}' | '[' | ']' | ',' | ':' if !in_string => {
                    if !current.is_empty() {
                        let word = std::mem::take(&mut current);
                        let style = scalar_style(&word, base);
                        spans.push(Span::styled(word, style));
                    }
                    let style = if matches!(c, ',' | ':') { base } else { base.fg(Color::Yellow) };
                    spans.push(Span::styled(c.to_string(), style));
                }
                _ => current.push(c),
            }
        }

        if !current.is_empty() {
            let style = if in_string { base } else { scalar_style(&current, base) };
            spans.push(Span::styled(current, style));
        }

        lines.push(Line::from(spans));
    }

    lines
}

/// Numbers in yellow, literals in magenta, anything else plain
fn scalar_style(word: &str, base: Style) -> Style {
    let trimmed = word.trim();
    if matches!(trimmed, "true" | "false" | "null") {
        base.fg(Color::Magenta)
    } else if !trimmed.is_empty() && trimmed.parse::<f64>().is_ok() {
        base.fg(Color::Yellow)
    } else {
        base
    }
}

/// Status code color
pub fn status_color(code: u16) -> Color {
    match code {
        200..=299 => Color::Green,
        300..=399 => Color::Cyan,
        400..=499 => Color::Red,
        500..=599 => Color::Magenta,
        _ => Color::Yellow,
    }
}
