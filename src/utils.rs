use unicode_width::UnicodeWidthChar;

/// Truncates to `max_chars` characters, ending with "..." when shortened.
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Visual lines of `text` wrapped at `max_width` display columns.
/// Each entry is (start_char, end_char) in char indices.
fn wrapped_line_spans(text: &str, max_width: usize) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut width = 0;
    let mut start = 0;
    let mut count = 0;

    for (idx, ch) in text.chars().enumerate() {
        count = idx + 1;
        if ch == '\n' {
            spans.push((start, idx));
            start = idx + 1;
            width = 0;
            continue;
        }
        let ch_width = ch.width().unwrap_or(1);
        if width + ch_width > max_width && width > 0 {
            spans.push((start, idx));
            start = idx;
            width = 0;
        }
        width += ch_width;
    }
    spans.push((start, count));
    spans
}

/// Line and display column of a char-indexed cursor inside wrapped text.
/// Wide characters (Hangul) take two columns.
pub fn calculate_wrapped_cursor_position(
    text: &str,
    cursor_index: usize,
    max_width: usize,
) -> (usize, usize) {
    if text.is_empty() || cursor_index == 0 || max_width == 0 {
        return (0, 0);
    }

    let chars: Vec<char> = text.chars().collect();
    let cursor_index = cursor_index.min(chars.len());
    let spans = wrapped_line_spans(text, max_width);

    for (line_idx, (start, end)) in spans.iter().enumerate() {
        let is_last = line_idx == spans.len() - 1;
        // the cursor sits on the next line when it is exactly at a wrap point
        let contains = if is_last {
            cursor_index >= *start
        } else {
            cursor_index >= *start && cursor_index < *end
                || (cursor_index == *end && chars.get(*end) == Some(&'\n'))
        };
        if contains {
            let column = chars[*start..cursor_index]
                .iter()
                .map(|c| c.width().unwrap_or(1))
                .sum();
            return (line_idx, column);
        }
    }

    (0, 0)
}
