use console::measure_text_width;

/// Wrap `text` into lines no wider than `max_width` display columns.
///
/// Existing line breaks are kept. Lines break at spaces where possible; a
/// word longer than the limit is split at a character boundary.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();

        for word in paragraph.split(' ') {
            let candidate_width = if current.is_empty() {
                measure_text_width(word)
            } else {
                measure_text_width(&current) + 1 + measure_text_width(word)
            };

            if candidate_width <= max_width {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            let mut rest = word;
            while measure_text_width(rest) > max_width {
                let cut = split_at_width(rest, max_width);
                lines.push(rest[..cut].to_string());
                rest = &rest[cut..];
            }
            current.push_str(rest);
        }

        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Byte index of the longest prefix of `s` that fits in `width` columns
/// (at least one character).
fn split_at_width(s: &str, width: usize) -> usize {
    let mut end = 0;
    let mut used = 0;
    for (pos, ch) in s.char_indices() {
        let w = measure_text_width(ch.encode_utf8(&mut [0; 4]));
        if used + w > width && end > 0 {
            break;
        }
        used += w;
        end = pos + ch.len_utf8();
    }
    end
}

/// Pad `line` with spaces to `width` display columns.
pub fn pad_to_width(line: &str, width: usize) -> String {
    let used = measure_text_width(line);
    format!("{}{}", line, " ".repeat(width.saturating_sub(used)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(wrap_text("hello there", 20), vec!["hello there"]);
    }

    #[test]
    fn breaks_at_spaces() {
        assert_eq!(
            wrap_text("Nice to meet you, Sam!", 10),
            vec!["Nice to", "meet you,", "Sam!"]
        );
    }

    #[test]
    fn splits_words_longer_than_the_limit() {
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn keeps_explicit_newlines() {
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
    }

    #[test]
    fn wide_characters_count_double() {
        assert_eq!(wrap_text("你好世界", 4), vec!["你好", "世界"]);
        assert_eq!(pad_to_width("你好", 6), "你好  ");
    }
}
