//! Text layout helpers for the terminal front end. Widths count characters.

/// Wrap `text` to `max_width`, breaking at whitespace where possible
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if text.is_empty() || max_width == 0 {
        return vec![text.to_string()];
    }

    let mut wrapped = Vec::new();
    for line in text.lines() {
        let chars: Vec<char> = line.chars().collect();
        if chars.len() <= max_width {
            wrapped.push(line.to_string());
            continue;
        }

        let mut start = 0;
        while start < chars.len() {
            let end = (start + max_width).min(chars.len());
            if end == chars.len() {
                wrapped.push(chars[start..end].iter().collect());
                break;
            }

            match chars[start..end].iter().rposition(|ch| ch.is_whitespace()) {
                Some(space) if space > 0 => {
                    wrapped.push(chars[start..start + space].iter().collect());
                    start += space + 1;
                }
                _ => {
                    wrapped.push(chars[start..end].iter().collect());
                    start = end;
                }
            }
        }
    }

    wrapped
}

/// Left-pad `text` so it sits in the middle of `width`
pub fn center_text(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }

    let padding = (width - len) / 2;
    format!("{}{}", " ".repeat(padding), text)
}

/// Right-pad `text` to `width`
pub fn pad_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", text, " ".repeat(width - len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text() {
        let text = "This is a long line that should be wrapped at word boundaries";
        let wrapped = wrap_text(text, 20);
        assert!(wrapped.len() > 1);
        assert!(wrapped.iter().all(|line| line.chars().count() <= 20));
        assert_eq!(wrapped[0], "This is a long line");
    }

    #[test]
    fn test_wrap_multibyte_without_spaces() {
        let wrapped = wrap_text("↑↓↑↓↑↓", 4);
        assert_eq!(wrapped, vec!["↑↓↑↓", "↑↓"]);
    }

    #[test]
    fn test_center_text() {
        assert_eq!(center_text("hello", 10), "  hello");
        assert_eq!(center_text("hello", 11), "   hello");
        assert_eq!(center_text("héllo", 11), "   héllo");
    }

    #[test]
    fn test_pad_right() {
        assert_eq!(pad_right("ls", 6), "ls    ");
        assert_eq!(pad_right("logout", 3), "logout");
    }
}
