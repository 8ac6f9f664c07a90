//! Character stream over an argument list.
//!
//! The cursor presents a list of arguments as one stream of characters with a
//! synthetic [`Symbol::EndOfArg`] between consecutive elements and after the
//! last one. Reading past the end keeps yielding `EndOfArg`.

/// One unit of the character stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Symbol {
    Char(char),
    EndOfArg,
}

/// Result of [`ArgCursor::read_token`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// The very next symbol was a separator.
    Separator,
    Text(String),
}

impl Token {
    /// Text of the token; a bare separator reads as empty text.
    pub(crate) fn into_string(self) -> String {
        match self {
            Self::Separator => String::new(),
            Self::Text(text) => text,
        }
    }
}

/// Separators for option names: `--name=value`, `-Dkey=value`.
pub(crate) const NAME_SEPARATORS: &[Symbol] = &[Symbol::EndOfArg, Symbol::Char('=')];
/// Separators for values: `=` and `-` are literal inside a value.
pub(crate) const VALUE_SEPARATORS: &[Symbol] = &[Symbol::EndOfArg];

/// Scanning position within an argument list.
///
/// `offset` is a byte offset into the current element and always sits on a
/// character boundary.
#[derive(Debug, Clone)]
pub(crate) struct ArgCursor<'a, S> {
    args: &'a [S],
    index: usize,
    offset: usize,
}

impl<'a, S: AsRef<str>> ArgCursor<'a, S> {
    pub(crate) fn new(args: &'a [S]) -> Self {
        Self {
            args,
            index: 0,
            offset: 0,
        }
    }

    /// Index of the element currently being read.
    pub(crate) fn index(&self) -> usize {
        self.index
    }

    fn current(&self) -> Option<&'a str> {
        self.args.get(self.index).map(AsRef::as_ref)
    }

    fn next_char(&self) -> Option<char> {
        self.current()
            .and_then(|arg| arg.get(self.offset..))
            .and_then(|rest| rest.chars().next())
    }

    /// Returns the next symbol without consuming it.
    pub(crate) fn peek(&self) -> Symbol {
        self.next_char().map_or(Symbol::EndOfArg, Symbol::Char)
    }

    /// Consumes and returns the next symbol.
    ///
    /// Consuming an `EndOfArg` moves to the start of the next element.
    pub(crate) fn advance(&mut self) -> Symbol {
        if self.current().is_none() {
            return Symbol::EndOfArg;
        }
        match self.next_char() {
            Some(ch) => {
                self.offset += ch.len_utf8();
                Symbol::Char(ch)
            }
            None => {
                self.index += 1;
                self.offset = 0;
                Symbol::EndOfArg
            }
        }
    }

    /// Reads characters up to the next separator, consuming the separator.
    pub(crate) fn read_token(&mut self, separators: &[Symbol]) -> Token {
        let first = self.advance();
        let Symbol::Char(ch) = first else {
            return Token::Separator;
        };
        if separators.contains(&first) {
            return Token::Separator;
        }

        let mut text = String::from(ch);
        loop {
            match self.advance() {
                symbol if separators.contains(&symbol) => break,
                Symbol::Char(ch) => text.push(ch),
                Symbol::EndOfArg => break,
            }
        }
        Token::Text(text)
    }

    /// Takes the unread rest of the current element verbatim, including its
    /// end-of-argument.
    pub(crate) fn rest_of_element(&mut self) -> String {
        let Some(arg) = self.current() else {
            return String::new();
        };
        let rest = arg.get(self.offset..).unwrap_or_default().to_string();
        self.index += 1;
        self.offset = 0;
        rest
    }

    /// Whether any input remains.
    ///
    /// The end-of-argument of the final element does not count, but an unread
    /// empty element does.
    pub(crate) fn has_more(&self) -> bool {
        match self.current() {
            None => false,
            Some(arg) => {
                self.offset < arg.len() || self.offset == 0 || self.index + 1 < self.args.len()
            }
        }
    }

    /// Whether the cursor has read part, but not all, of the current element.
    pub(crate) fn is_mid_element(&self) -> bool {
        self.current()
            .is_some_and(|arg| self.offset > 0 && self.offset < arg.len())
    }

    /// Returns the unconsumed input as whole elements.
    ///
    /// A partly read element contributes its unread tail; a fully read one is
    /// skipped.
    pub(crate) fn remainder(&self) -> Vec<String> {
        let Some(arg) = self.current() else {
            return Vec::new();
        };

        let mut rest = Vec::with_capacity(self.args.len() - self.index);
        if self.offset == 0 || self.offset < arg.len() {
            rest.push(arg.get(self.offset..).unwrap_or_default().to_string());
        }
        rest.extend(
            self.args
                .get(self.index + 1..)
                .unwrap_or_default()
                .iter()
                .map(|arg| arg.as_ref().to_string()),
        );
        rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_inserts_end_of_arg_between_elements() {
        let args = ["ab", "c"];
        let mut cursor = ArgCursor::new(&args);

        assert_eq!(cursor.advance(), Symbol::Char('a'));
        assert_eq!(cursor.peek(), Symbol::Char('b'));
        assert_eq!(cursor.advance(), Symbol::Char('b'));
        assert_eq!(cursor.peek(), Symbol::EndOfArg);
        assert_eq!(cursor.advance(), Symbol::EndOfArg);
        assert_eq!(cursor.index(), 1);
        assert_eq!(cursor.advance(), Symbol::Char('c'));
        assert_eq!(cursor.advance(), Symbol::EndOfArg);
        assert_eq!(cursor.advance(), Symbol::EndOfArg);
        assert_eq!(cursor.peek(), Symbol::EndOfArg);
    }

    #[test]
    fn test_read_token_stops_at_separator() {
        let args = ["name=some-value", "next"];
        let mut cursor = ArgCursor::new(&args);

        assert_eq!(
            cursor.read_token(NAME_SEPARATORS),
            Token::Text("name".to_string())
        );
        assert_eq!(
            cursor.read_token(VALUE_SEPARATORS),
            Token::Text("some-value".to_string())
        );
        assert_eq!(cursor.index(), 1);
    }

    #[test]
    fn test_read_token_reports_leading_separator() {
        let args = ["=x"];
        let mut cursor = ArgCursor::new(&args);
        assert_eq!(cursor.read_token(NAME_SEPARATORS), Token::Separator);
        assert_eq!(cursor.peek(), Symbol::Char('x'));
    }

    #[test]
    fn test_multibyte_characters() {
        let args = ["-é=ü"];
        let mut cursor = ArgCursor::new(&args);
        assert_eq!(cursor.advance(), Symbol::Char('-'));
        assert_eq!(cursor.advance(), Symbol::Char('é'));
        assert_eq!(cursor.rest_of_element(), "=ü");
        assert!(!cursor.has_more());
    }

    #[test]
    fn test_has_more_ignores_trailing_end_of_arg() {
        let args = ["-f"];
        let mut cursor = ArgCursor::new(&args);
        cursor.advance();
        assert!(cursor.has_more());
        cursor.advance();
        assert!(!cursor.has_more());
    }

    #[test]
    fn test_has_more_counts_unread_empty_element() {
        let args = ["a", ""];
        let mut cursor = ArgCursor::new(&args);
        assert_eq!(cursor.read_token(VALUE_SEPARATORS), Token::Text("a".into()));
        assert!(cursor.has_more());
        assert_eq!(cursor.read_token(VALUE_SEPARATORS), Token::Separator);
        assert!(!cursor.has_more());
    }

    #[test]
    fn test_remainder_realigns_to_element_boundary() {
        let args = ["-cler", "kid"];
        let mut cursor = ArgCursor::new(&args);
        cursor.advance();
        cursor.advance();
        assert!(cursor.is_mid_element());
        assert_eq!(cursor.remainder(), vec!["ler", "kid"]);

        let args = ["-c", "kid"];
        let mut cursor = ArgCursor::new(&args);
        cursor.advance();
        cursor.advance();
        assert!(!cursor.is_mid_element());
        assert_eq!(cursor.remainder(), vec!["kid"]);
    }
}
