use memchr::memchr;

const TOKEN_SEPARATOR: u8 = b' ';

/// Split a line into its space separated tokens.
///
/// Only a single space is treated as separator, consecutive spaces produce empty tokens
/// the same way `str::split(' ')` would. Like `split`, an empty line yields a single empty token.
pub fn tokenize(line: &str) -> Vec<&str> {
    Tokens::new(line).collect()
}

/// Whether the tokens of a log line form a valid record.
///
/// Since tokenizing never produces an empty list this only rejects token lists
/// that were not produced by [`tokenize`].
pub fn is_valid_log_record<T: AsRef<str>>(tokens: &[T]) -> bool {
    !tokens.is_empty()
}

pub struct Tokens<'a> {
    rest: Option<&'a str>,
}

impl<'a> Tokens<'a> {
    pub fn new(line: &'a str) -> Self {
        Tokens { rest: Some(line) }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        match split_once(rest, TOKEN_SEPARATOR) {
            Some((token, rest)) => {
                self.rest = Some(rest);
                Some(token)
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

/// Iterate over the lines of a log, without the line terminator.
///
/// A trailing newline at the end of the input does not produce an extra empty line.
pub struct LineSplit<'a> {
    rest: &'a str,
}

impl<'a> LineSplit<'a> {
    pub fn new(input: &'a str) -> Self {
        LineSplit { rest: input }
    }
}

impl<'a> Iterator for LineSplit<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let line = match split_once(self.rest, b'\n') {
            Some((line, rest)) => {
                self.rest = rest;
                line
            }
            None => std::mem::take(&mut self.rest),
        };
        Some(line.strip_suffix('\r').unwrap_or(line))
    }
}

fn split_once(input: &str, delim: u8) -> Option<(&str, &str)> {
    debug_assert!(delim < 128); // only basic ascii
    let end = memchr(delim, input.as_bytes())?;
    // safety, memchr returns indices that are inside the input length and we only split on ascii
    Some(unsafe {
        (
            input.get_unchecked(..end),
            input.get_unchecked(end + 1..),
        )
    })
}

#[test]
fn test_tokenize() {
    assert_eq!(vec!["GET", "/index.html", "200"], tokenize("GET /index.html 200"));
    assert_eq!(vec!["a", "", "b"], tokenize("a  b"));
    assert_eq!(vec!["", "a", ""], tokenize(" a "));
    assert_eq!(vec![""], tokenize(""));
}

#[test]
fn test_tokenize_matches_split() {
    for line in ["foo", "foo bar", "  ", "a\tb c", "ünï cödé"] {
        assert_eq!(line.split(' ').collect::<Vec<_>>(), tokenize(line));
    }
}

#[test]
fn test_valid_log_record() {
    for line in ["", " ", "GET /index.html 200"] {
        assert!(is_valid_log_record(&tokenize(line)));
    }
    let empty: [&str; 0] = [];
    assert!(!is_valid_log_record(&empty));
}

#[test]
fn test_line_split() {
    assert_eq!(
        vec!["a b", "", "c"],
        LineSplit::new("a b\n\nc\n").collect::<Vec<_>>()
    );
    assert_eq!(vec!["a", "b"], LineSplit::new("a\r\nb").collect::<Vec<_>>());
    assert_eq!(0, LineSplit::new("").count());
    assert_eq!(vec![""], LineSplit::new("\n").collect::<Vec<_>>());
}
