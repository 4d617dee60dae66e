//! Indentation and scalar formatting helpers.

/// One nesting level in the rendered document.
pub const INDENT: &str = "  ";

/// Leading whitespace for `depth` nesting levels.
#[must_use]
pub fn indent(depth: usize) -> String {
    INDENT.repeat(depth)
}

/// Reindents free-form text to `depth` for use inside a literal block scalar.
///
/// Every line gets `depth` levels of indentation and a trailing newline.
/// Blank (empty or whitespace-only) lines are written as a bare newline so
/// no trailing whitespace is introduced. A final line ending does not
/// produce an extra blank line; `\r\n` endings are accepted.
///
/// # Examples
///
/// ```
/// use coreos_cloudinit::render::reindent;
///
/// let text = "[Unit]\n\nDescription=Test\n";
/// assert_eq!(reindent(text, 2), "    [Unit]\n\n    Description=Test\n");
/// ```
#[must_use]
pub fn reindent(content: &str, depth: usize) -> String {
    let prefix = indent(depth);
    let mut out = String::with_capacity(content.len() + content.len() / 8);
    for line in content.lines() {
        if !line.trim().is_empty() {
            out.push_str(&prefix);
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

/// True when the first non-blank line of `content` starts with whitespace.
///
/// A literal block scalar infers its indentation from that line, so such
/// content needs an explicit indentation indicator (`|2`).
#[must_use]
pub fn needs_indent_indicator(content: &str) -> bool {
    content
        .lines()
        .find(|line| !line.trim().is_empty())
        .is_some_and(|line| line.starts_with(char::is_whitespace))
}

/// True when `value` written as a plain scalar would not read back as the
/// same string.
///
/// That covers empty values, surrounding whitespace, control characters,
/// a leading indicator character, `": "` and `" #"` sequences, a trailing
/// colon, and words YAML resolves to null, booleans or numbers.
///
/// # Examples
///
/// ```
/// use coreos_cloudinit::render::needs_quoting;
///
/// assert!(!needs_quoting("core-01"));
/// assert!(!needs_quoting("root:root"));
/// assert!(needs_quoting("Admin: root"));
/// assert!(needs_quoting("*.example.com"));
/// assert!(needs_quoting("yes"));
/// assert!(needs_quoting("8080"));
/// ```
#[must_use]
pub fn needs_quoting(value: &str) -> bool {
    const INDICATORS: &[char] = &[
        '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%',
        '@', '`',
    ];
    let Some(first) = value.chars().next() else {
        return true;
    };
    if INDICATORS.contains(&first)
        || value.starts_with(char::is_whitespace)
        || value.ends_with(char::is_whitespace)
        || value.ends_with(':')
        || value.contains(": ")
        || value.contains(" #")
        || value.chars().any(is_unprintable)
    {
        return true;
    }
    is_reserved_word(value) || looks_numeric(value)
}

/// Control characters and the Unicode line and paragraph separators,
/// which YAML readers treat as line breaks.
fn is_unprintable(c: char) -> bool {
    c.is_control() || matches!(c, '\u{2028}' | '\u{2029}' | '\u{feff}')
}

fn is_reserved_word(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "~" | "null" | "true" | "false" | "yes" | "no" | "on" | "off" | "y" | "n"
    )
}

fn looks_numeric(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    let unsigned = lower.trim_start_matches(['+', '-']);
    value.parse::<f64>().is_ok()
        || matches!(unsigned, ".inf" | ".nan")
        || unsigned.starts_with("0x")
        || unsigned.starts_with("0o")
        || unsigned.starts_with("0b")
        || (unsigned.contains('_') && unsigned.replace('_', "").parse::<f64>().is_ok())
}

/// Writes a string plain when it reads back unchanged, double-quoted
/// otherwise.
///
/// # Examples
///
/// ```
/// use coreos_cloudinit::render::scalar;
///
/// assert_eq!(scalar("/bin/bash"), "/bin/bash");
/// assert_eq!(scalar("a\nb"), "\"a\\nb\"");
/// ```
#[must_use]
pub fn scalar(value: &str) -> std::borrow::Cow<'_, str> {
    if needs_quoting(value) {
        std::borrow::Cow::Owned(quote(value))
    } else {
        std::borrow::Cow::Borrowed(value)
    }
}

/// Wraps a value in double quotes, escaping what the quoted style requires.
///
/// # Examples
///
/// ```
/// use coreos_cloudinit::render::quote;
///
/// assert_eq!(quote("http://10.0.0.1:2379"), "\"http://10.0.0.1:2379\"");
/// assert_eq!(quote(r#"say "hi""#), r#""say \"hi\"""#);
/// ```
#[must_use]
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if is_unprintable(c) => out.push_str(&format!("\\u{:04X}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
