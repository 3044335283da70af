// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display for the versegraph CLI.
//!
//! OneDark for dark terminals, One Light for light ones. `VERSEGRAPH_THEME`
//! picks explicitly, then `COLORFGBG` is consulted, then dark. Colors are
//! dropped entirely under `NO_COLOR` or when stdout is not a TTY, so piping
//! results into another tool gives plain text.
//!
//! Boxes, tier badges, score colors and provenance badges live here; the
//! command code only decides what to print.

use std::sync::OnceLock;

use versegraph::{Provenance, ScoreBreakdown};

/// Width between │ and │, excluding the border chars.
pub const BOX_WIDTH: usize = 72;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("VERSEGRAPH_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg"; backgrounds 7 and up (except 8) are light
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(Ok(bg)) = colorfgbg.split(';').next_back().map(str::parse::<u8>) {
            if bg >= 7 && bg != 8 {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES (True Color)
// ═══════════════════════════════════════════════════════════════════════════

fn rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117);
    pub const GREEN: (u8, u8, u8) = (152, 195, 121);
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123);
    pub const BLUE: (u8, u8, u8) = (97, 175, 239);
    pub const MAGENTA: (u8, u8, u8) = (198, 120, 221);
    pub const CYAN: (u8, u8, u8) = (86, 182, 194);
    pub const GRAY: (u8, u8, u8) = (92, 99, 112);
    pub const BRIGHT_GREEN: (u8, u8, u8) = (166, 226, 46);
    pub const BRIGHT_CYAN: (u8, u8, u8) = (102, 217, 239);
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73);
    pub const GREEN: (u8, u8, u8) = (80, 161, 79);
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1);
    pub const BLUE: (u8, u8, u8) = (64, 120, 242);
    pub const MAGENTA: (u8, u8, u8) = (166, 38, 164);
    pub const CYAN: (u8, u8, u8) = (1, 132, 188);
    pub const GRAY: (u8, u8, u8) = (160, 161, 167);
    pub const BRIGHT_GREEN: (u8, u8, u8) = (68, 140, 39);
    pub const BRIGHT_CYAN: (u8, u8, u8) = (1, 112, 158);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            rgb(match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            })
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(MAGENTA);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(BRIGHT_GREEN);
theme_color!(BRIGHT_CYAN);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Theme color plus modifiers, or plain text when colors are off.
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Length in chars, ignoring ANSI escapes.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Cut plain text to `max` chars, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

pub fn pad_left(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", " ".repeat(width - visible), s)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

fn border(c: &str) -> String {
    if use_colors() {
        c.to_string()
    } else {
        String::new()
    }
}

fn reset() -> &'static str {
    if use_colors() {
        RESET
    } else {
        ""
    }
}

/// │ content          │
pub fn row(content: &str) {
    let gray = border(&GRAY());
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!(
        "{}│{}{}{}{}│{}",
        gray,
        reset(),
        content,
        " ".repeat(pad),
        gray,
        reset()
    );
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let gray = border(&GRAY());
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}┌{}{}{}{}┐{}",
        gray,
        reset(),
        label_part,
        gray,
        "─".repeat(remaining),
        reset()
    );
}

/// ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    let gray = border(&GRAY());
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}├{}{}{}{}┤{}",
        gray,
        reset(),
        label_part,
        gray,
        "─".repeat(remaining),
        reset()
    );
}

/// └──────────────────┘
pub fn section_bot() {
    let gray = border(&GRAY());
    println!("{}└{}┘{}", gray, "─".repeat(BOX_WIDTH), reset());
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Proximity tier badge: T1 green, T2 blue, T3 magenta.
pub fn tier_label(tier: usize) -> String {
    let text = format!("T{}", tier);
    match tier {
        1 => themed(GREEN, &[BOLD], &text),
        2 => themed(BLUE, &[], &text),
        3 => themed(MAGENTA, &[], &text),
        _ => text,
    }
}

/// Which path produced the results.
pub fn provenance_badge(provenance: &Provenance) -> String {
    match provenance {
        Provenance::Local { strategy } => themed(GREEN, &[], &format!("[local {}]", strategy)),
        Provenance::ExactLabel => themed(BRIGHT_GREEN, &[BOLD], "[exact label]"),
        Provenance::Remote => themed(BRIGHT_CYAN, &[BOLD], "[remote]"),
        Provenance::LocalFallback { strategy, .. } => {
            themed(YELLOW, &[BOLD], &format!("[fallback {}]", strategy))
        }
    }
}

/// Hybrid scores run into the hundreds; lexical ones rarely pass 20.
pub fn score_value(score: f64) -> String {
    let text = format!("{:>9.3}", score);
    if score >= 100.0 {
        themed(BRIGHT_GREEN, &[BOLD], &text)
    } else if score >= 50.0 {
        themed(GREEN, &[], &text)
    } else if score > 0.0 {
        themed(YELLOW, &[], &text)
    } else {
        themed(GRAY, &[], &text)
    }
}

/// One-line explanation of where a score came from.
pub fn breakdown_line(breakdown: &ScoreBreakdown) -> String {
    let text = match breakdown {
        ScoreBreakdown::Lexical { raw, frequency } => {
            format!("raw {:.3} · {} match(es)", raw, frequency)
        }
        ScoreBreakdown::Hybrid {
            bm25_component,
            semantic_bonus,
            graph_score,
            frequency,
        } => format!(
            "bm25 {:.1} + cluster {:.0} + graph {:.2} · {} match(es)",
            bm25_component, semantic_bonus, graph_score, frequency
        ),
        ScoreBreakdown::Importance { importance } => format!("importance {:.6}", importance),
        ScoreBreakdown::Remote { score: Some(score) } => format!("backend score {:.3}", score),
        ScoreBreakdown::Remote { score: None } => "backend rank".to_string(),
        ScoreBreakdown::ExactLabel => "exact label".to_string(),
    };
    themed(GRAY, &[DIM], &text)
}

/// Status line on stderr: ✓ ok, ⚠ warning, ❌ failure.
pub fn status(glyph: &str, color_fn: fn() -> String, message: &str) {
    let glyph = if use_colors() && atty::is(atty::Stream::Stderr) {
        format!("{}{}{}", color_fn(), glyph, RESET)
    } else {
        glyph.to_string()
    };
    eprintln!("{} {}", glyph, message);
}

pub fn warn(message: &str) {
    status("⚠", YELLOW, message);
}

pub fn fail(message: &str) {
    status("❌", RED, message);
}
