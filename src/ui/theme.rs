use ratatui::style::{Color, Modifier, Style};

use super::app::InputMode;

// ── Palette ──

pub(crate) const BASE: Color = Color::Rgb(22, 27, 34);
pub(crate) const SURFACE: Color = Color::Rgb(33, 40, 51);
pub(crate) const PROMPT_BG: Color = Color::Rgb(16, 20, 26);
pub(crate) const BORDER: Color = Color::Rgb(61, 72, 89);
pub(crate) const TEXT: Color = Color::Rgb(222, 226, 232);
pub(crate) const TEXT_DIM: Color = Color::Rgb(125, 136, 153);
pub(crate) const ACCENT: Color = Color::Rgb(94, 170, 214);
/// Seal gold, used for document numbers and prompts awaiting input.
pub(crate) const GOLD: Color = Color::Rgb(222, 184, 92);
pub(crate) const OK: Color = Color::Rgb(120, 196, 140);
pub(crate) const ALERT: Color = Color::Rgb(226, 108, 108);

// ── Text ──

pub(crate) fn normal_style() -> Style {
    Style::default().fg(TEXT)
}

pub(crate) fn dim_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub(crate) fn amount_style() -> Style {
    Style::default().fg(OK)
}

pub(crate) fn over_budget_style() -> Style {
    Style::default().fg(ALERT)
}

pub(crate) fn section_style() -> Style {
    Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
}

pub(crate) fn key_style() -> Style {
    Style::default().fg(ACCENT)
}

// ── Tables and frames ──

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(TEXT)
        .bg(BASE)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn selected_style() -> Style {
    Style::default().fg(BASE).bg(ACCENT)
}

pub(crate) fn alt_row_style() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub(crate) fn border_style() -> Style {
    Style::default().fg(BORDER)
}

pub(crate) fn tab_style(active: bool) -> Style {
    if active {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        dim_style()
    }
}

// ── Bars ──

pub(crate) fn command_bar_style() -> Style {
    Style::default().fg(TEXT).bg(PROMPT_BG)
}

pub(crate) fn status_bar_style() -> Style {
    Style::default().fg(TEXT_DIM).bg(SURFACE)
}

/// Badge at the left of the status bar; confirmations stand out in red.
pub(crate) fn mode_badge(mode: InputMode) -> Style {
    let bg = match mode {
        InputMode::Normal => ACCENT,
        InputMode::Command | InputMode::Editing => OK,
        InputMode::Search => GOLD,
        InputMode::Confirm => ALERT,
    };
    Style::default().fg(BASE).bg(bg).add_modifier(Modifier::BOLD)
}

/// Gauge colour by share of target used: green, gold past 80%, red once over.
pub(crate) fn usage_color(ratio: f64, over: bool) -> Color {
    if over {
        ALERT
    } else if ratio >= 0.8 {
        GOLD
    } else {
        OK
    }
}
