use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Pad `text` with spaces to `width` terminal columns, truncating with `…` when too wide.
pub fn fit_to_width(text: &str, width: usize) -> String {
    if UnicodeWidthStr::width(text) <= width {
        let padding = width - UnicodeWidthStr::width(text);
        return format!("{text}{}", " ".repeat(padding));
    }

    if width == 0 {
        return String::new();
    }

    let mut fitted = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width + 1 > width {
            break;
        }
        fitted.push(ch);
        used += ch_width;
    }
    fitted.push('…');
    used += 1;
    fitted.push_str(&" ".repeat(width.saturating_sub(used)));
    fitted
}
