//! Fixed-column word wrapping for callout text

/// Wrap `text` into lines of at most `columns` characters.
///
/// Words longer than a line are hard-split. Explicit newlines start a new
/// line. Empty text yields a single empty line so bubbles never collapse.
pub fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            for chunk in split_long_word(word, columns) {
                let needed = if current.is_empty() {
                    chunk.chars().count()
                } else {
                    current.chars().count() + 1 + chunk.chars().count()
                };
                if needed > columns && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(&chunk);
            }
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn split_long_word(word: &str, columns: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars
        .chunks(columns)
        .map(|c| c.iter().collect::<String>())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_single_line() {
        assert_eq!(wrap_text("uplink to core", 28), vec!["uplink to core"]);
    }

    #[test]
    fn test_wraps_on_word_boundary() {
        assert_eq!(
            wrap_text("replace fan module next week", 12),
            vec!["replace fan", "module next", "week"]
        );
    }

    #[test]
    fn test_long_word_is_split() {
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_explicit_newlines() {
        assert_eq!(wrap_text("a\nb", 10), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }
}
