use crate::error::Error;

/// Characters the stroke generator was trained on.
pub const ALPHABET: &[char] = &[
    ' ', '!', '"', '#', '\'', '(', ')', ',', '-', '.', '0', '1', '2', '3', '4', '5', '6', '7',
    '8', '9', ':', ';', '?', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M',
    'N', 'O', 'P', 'R', 'S', 'T', 'U', 'V', 'W', 'Y', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h',
    'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

pub const MAX_CHAR_LEN: usize = 75;

pub fn is_supported(ch: char) -> bool {
    ALPHABET.contains(&ch)
}

/// Reject lines the generator cannot write: too long, or using characters
/// outside [`ALPHABET`].
pub fn validate_lines<S: AsRef<str>>(lines: &[S]) -> Result<(), Error> {
    for (line_num, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        let len = line.chars().count();
        if len > MAX_CHAR_LEN {
            return Err(Error::LineTooLong {
                line: line_num,
                len,
                max: MAX_CHAR_LEN,
            });
        }
        if let Some(ch) = line.chars().find(|&c| !is_supported(c)) {
            return Err(Error::InvalidCharacter { line: line_num, ch });
        }
    }
    Ok(())
}

/// Greedy word wrap. Words longer than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();
        while chars.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = chars.split_off(width);
            lines.push(chars.into_iter().collect());
            chars = rest;
        }
        let word_len = chars.len();
        if word_len == 0 {
            continue;
        }
        let needed = if current_len == 0 { word_len } else { current_len + 1 + word_len };
        if needed > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(chars);
        current_len += word_len;
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}
