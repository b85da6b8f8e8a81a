//! Formatting of byte strings and number lists as C initializers.
//!
//! Both formatters wrap at 80 columns and write the indentation before every
//! line, including the first. Neither adds a final newline.

/// Total line width the formatters wrap to.
const LINE_WIDTH: usize = 80;

/// Columns reserved on each string-literal line for the closing quote.
const QUOTE_RESERVE: usize = 3;

/// Tracks the remaining column budget of the current line.
struct Wrapper<'a> {
    /// Output buffer.
    out: String,
    /// Indentation written at the start of every line.
    indent: &'a str,
    /// Text written to end a line, before the newline.
    close: &'a str,
    /// Text written after the indentation when a line starts.
    open: &'a str,
    /// Usable columns per line.
    budget: usize,
    /// Columns left on the current line.
    rem: usize,
}

impl<'a> Wrapper<'a> {
    /// Start the first line.
    fn new(indent: &'a str, open: &'a str, close: &'a str, reserve: usize) -> Self {
        let budget = LINE_WIDTH.saturating_sub(reserve + indent.len());
        let mut out = String::with_capacity(LINE_WIDTH);
        out.push_str(indent);
        out.push_str(open);
        Self {
            out,
            indent,
            close,
            open,
            budget,
            rem: budget,
        }
    }

    /// Write an atomic token of `token.len()` columns, breaking the line first
    /// if it does not fit.
    fn push(&mut self, token: &str) {
        let n = token.len();
        if self.rem < n {
            self.out.push_str(self.close);
            self.out.push('\n');
            self.out.push_str(self.indent);
            self.out.push_str(self.open);
            self.rem = self.budget;
        }
        self.rem = self.rem.saturating_sub(n);
        self.out.push_str(token);
    }

    /// Close the last line and return the text.
    fn finish(mut self) -> String {
        self.out.push_str(self.close);
        self.out
    }
}

/// True if `b` is an ASCII octal digit.
fn is_octal_digit(b: u8) -> bool {
    (b'0'..=b'7').contains(&b)
}

/// Escape a single byte of `data` at position `n`.
fn escape(data: &[u8], n: usize) -> String {
    let c = data[n];
    match c {
        b'\\' | b'"' => format!("\\{}", char::from(c)),
        0x20..=0x7e => char::from(c).to_string(),
        0 if !data.get(n + 1).copied().is_some_and(is_octal_digit) => "\\0".to_string(),
        _ => format!("\\{c:03o}"),
    }
}

/// Format `data` as a sequence of adjacent C string literals.
///
/// Trailing NUL bytes are dropped, since the literal initializes a
/// zero-padded array. Escapes are never split across literals.
pub fn format_data(data: &[u8], indent: &str) -> String {
    let end = data.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    let mut w = Wrapper::new(indent, "\"", "\"", QUOTE_RESERVE);
    for n in 0..end {
        w.push(&escape(data, n));
    }
    w.finish()
}

/// Format `numbers` as a comma-separated list across multiple lines.
pub fn format_numbers(numbers: &[u32], indent: &str) -> String {
    let mut w = Wrapper::new(indent, "", "", 0);
    if let Some((last, head)) = numbers.split_last() {
        for n in head {
            w.push(&format!("{n},"));
        }
        w.push(&last.to_string());
    }
    w.finish()
}

#[cfg(test)]
mod tests {
    use std::str;

    use proptest::prelude::*;

    use super::*;

    /// Undo `format_data`: strip indentation and quotes, join the literals
    /// and decode escapes.
    fn unescape(text: &str) -> Vec<u8> {
        let mut out = Vec::new();
        for line in text.lines() {
            let body = line
                .trim_start()
                .strip_prefix('"')
                .and_then(|l| l.strip_suffix('"'))
                .expect("quoted line");
            let bytes = body.as_bytes();
            let mut i = 0;
            while i < bytes.len() {
                if bytes[i] != b'\\' {
                    out.push(bytes[i]);
                    i += 1;
                    continue;
                }
                let digits = bytes[i + 1..]
                    .iter()
                    .take(3)
                    .take_while(|b| is_octal_digit(**b))
                    .count();
                if digits == 0 {
                    out.push(bytes[i + 1]);
                    i += 2;
                } else {
                    let s = str::from_utf8(&bytes[i + 1..i + 1 + digits]).unwrap();
                    out.push(u8::from_str_radix(s, 8).unwrap());
                    i += 1 + digits;
                }
            }
        }
        out
    }

    #[test]
    fn escapes_quote_nul_and_control() {
        assert_eq!(format_data(b"\"\0\x07", ""), r#""\"\0\007""#);
    }

    #[test]
    fn nul_before_octal_digit_uses_long_form() {
        assert_eq!(format_data(b"\x001\x008", "  "), r#"  "\0001\08""#);
    }

    #[test]
    fn drops_trailing_nuls() {
        assert_eq!(format_data(b"\0A\0B\0\0", ""), r#""\0A\0B""#);
        assert_eq!(format_data(b"\0\0", "    "), r#"    """#);
        assert_eq!(format_data(b"", ""), r#""""#);
    }

    #[test]
    fn backslash_and_high_bytes() {
        assert_eq!(format_data(b"a\\b\xff", ""), r#""a\\b\377""#);
    }

    #[test]
    fn wraps_at_budget() {
        let data = vec![b'x'; 100];
        let text = format_data(&data, "    ");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        // 80 - 4 indent - 3 reserved = 73 payload columns.
        assert_eq!(lines[0], format!("    \"{}\"", "x".repeat(73)));
        assert_eq!(lines[1], format!("    \"{}\"", "x".repeat(27)));
        assert!(lines.iter().all(|l| l.len() <= 80));
    }

    #[test]
    fn never_splits_an_escape() {
        // 72 literal bytes leave one column, too few for a 4-column escape.
        let mut data = vec![b'y'; 72];
        data.push(0x01);
        let text = format_data(&data, "    ");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "    \"\\001\"");
    }

    #[test]
    fn numbers_single_element() {
        assert_eq!(format_numbers(&[7], "    "), "    7");
    }

    #[test]
    fn numbers_empty() {
        assert_eq!(format_numbers(&[], "  "), "  ");
    }

    #[test]
    fn numbers_wrap_without_splitting() {
        let numbers: Vec<u32> = (0..40).map(|_| 100).collect();
        let text = format_numbers(&numbers, "    ");
        let lines: Vec<&str> = text.lines().collect();
        // "100," is 4 columns; 76 columns hold 19 of them.
        assert_eq!(lines[0], format!("    {}", "100,".repeat(19)));
        assert_eq!(lines[1], format!("    {}", "100,".repeat(19)));
        assert_eq!(lines[2], "    100,100");
        assert!(lines.iter().all(|l| l.len() <= 80));
    }

    proptest! {
        #[test]
        fn data_round_trips(data in proptest::collection::vec(any::<u8>(), 0..300)) {
            let text = format_data(&data, "    ");
            let mut expected = data.clone();
            while expected.last() == Some(&0) {
                expected.pop();
            }
            prop_assert_eq!(unescape(&text), expected);
            prop_assert!(text.lines().all(|l| l.len() <= LINE_WIDTH));
        }

        #[test]
        fn numbers_round_trip(numbers in proptest::collection::vec(any::<u32>(), 1..200)) {
            let text = format_numbers(&numbers, "    ");
            let parsed: Vec<u32> = text
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty())
                .map(|s| s.parse().unwrap())
                .collect();
            prop_assert_eq!(parsed, numbers);
            prop_assert!(text.lines().all(|l| l.len() <= LINE_WIDTH));
            prop_assert!(!text.ends_with(','));
        }
    }
}
