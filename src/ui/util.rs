use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

// ── Text width ──

/// Thai vowel and tone marks drawn above or below the previous consonant.
fn is_thai_mark(c: char) -> bool {
    matches!(c, '\u{0E31}' | '\u{0E34}'..='\u{0E3A}' | '\u{0E47}'..='\u{0E4E}')
}

/// Terminal columns `s` occupies; Thai marks take none.
pub(crate) fn columns(s: &str) -> usize {
    s.chars().filter(|c| !is_thai_mark(*c)).count()
}

/// Cut `s` to at most `max` columns, ending in "…" when shortened.
/// Marks stay attached to their consonant.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if columns(s) <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        if !is_thai_mark(c) {
            if used + 1 == max {
                break;
            }
            used += 1;
        }
        out.push(c);
    }
    out.push('…');
    out
}

// ── Cursors ──

/// Step `index` by `delta` within `0..len`, wrapping at both ends.
pub(crate) fn cycle_index(index: usize, len: usize, delta: i32) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as i64;
    let next = (index as i64 + i64::from(delta)).rem_euclid(len);
    next as usize
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Motion {
    Down(usize),
    Up(usize),
    Top,
    Bottom,
}

/// Move a list cursor over `len` rows and keep it inside the `page` rows
/// starting at `scroll`.
pub(crate) fn move_cursor(
    index: &mut usize,
    scroll: &mut usize,
    len: usize,
    page: usize,
    motion: Motion,
) {
    if len == 0 {
        *index = 0;
        *scroll = 0;
        return;
    }
    let last = len - 1;
    *index = match motion {
        Motion::Down(n) => index.saturating_add(n).min(last),
        Motion::Up(n) => index.saturating_sub(n).min(last),
        Motion::Top => 0,
        Motion::Bottom => last,
    };
    let page = page.max(1);
    if *index < *scroll {
        *scroll = *index;
    } else if *index >= *scroll + page {
        *scroll = *index + 1 - page;
    }
}

// ── Gauges ──

/// Gauge fill for a percentage, clamped to 0.0..=1.0.
pub(crate) fn gauge_ratio(percent: Decimal) -> f64 {
    (percent / Decimal::ONE_HUNDRED)
        .to_f64()
        .unwrap_or(0.0)
        .clamp(0.0, 1.0)
}
