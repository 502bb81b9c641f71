use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number, String, Identifier,
    LBrace, RBrace, LBracket, RBracket, LParen, RParen,
    Hash, Equals, Question,
    Global,
    End,
    Invalid,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Hash => "HASH",
            TokenKind::Equals => "EQUALS",
            TokenKind::Question => "QUESTION",
            TokenKind::Global => "GLOBAL",
            TokenKind::End => "END",
            TokenKind::Invalid => "INVALID",
        };
        write!(f, "{}", name)
    }
}

/// One lexical token. `line` and `column` are 1-based and point at the
/// first character of the token (for numbers, at the `0` of the prefix).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Token { kind, text: text.into(), line, column }
    }
}

/// Pull-based tokenizer. Never fails: unknown characters come back as
/// `Invalid` tokens and the grammar decides what to do with them.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { chars: input.chars().peekable(), line: 1, column: 1 }
    }

    /// Drains the whole input. The last token is always `End`.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.kind == TokenKind::End;
            tokens.push(token);
            if done { break; }
        }
        tokens
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let line = self.line;
        let column = self.column;

        let Some(&c) = self.chars.peek() else {
            return Token::new(TokenKind::End, "", line, column);
        };

        if c == '0' && self.hex_prefix_follows() {
            self.advance();
            self.advance();
            return Token::new(TokenKind::Number, self.read_hex_digits(), line, column);
        }

        if c.is_ascii_alphabetic() {
            let word = self.read_identifier();
            let kind = match word.as_str() {
                "global" => TokenKind::Global,
                // Booleans travel as strings; the parser decides by value.
                "true" | "false" => TokenKind::String,
                _ => TokenKind::Identifier,
            };
            return Token::new(kind, word, line, column);
        }

        if c == '"' {
            return Token::new(TokenKind::String, self.read_string(), line, column);
        }

        let kind = match c {
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '#' => TokenKind::Hash,
            '=' => TokenKind::Equals,
            '?' => TokenKind::Question,
            _ => TokenKind::Invalid,
        };
        self.advance();
        Token::new(kind, c.to_string(), line, column)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if !c.is_ascii_whitespace() && c != '\x0B' { break; }
            self.advance();
        }
    }

    fn hex_prefix_follows(&self) -> bool {
        let mut ahead = self.chars.clone();
        ahead.next();
        matches!(ahead.peek(), Some('x') | Some('X'))
    }

    fn read_hex_digits(&mut self) -> String {
        let mut s = String::new();
        while let Some(&c) = self.chars.peek() {
            if !c.is_ascii_hexdigit() { break; }
            s.push(c);
            self.advance();
        }
        s
    }

    fn read_identifier(&mut self) -> String {
        let mut s = String::new();
        while let Some(&c) = self.chars.peek() {
            if !(c.is_ascii_alphanumeric() || c == '_') { break; }
            s.push(c);
            self.advance();
        }
        s
    }

    // No escapes. An unterminated string runs to the end of input.
    fn read_string(&mut self) -> String {
        self.advance();
        let mut s = String::new();
        while let Some(c) = self.advance() {
            if c == '"' { break; }
            s.push(c);
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source).tokenize().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn punctuation_maps_to_single_char_tokens() {
        assert_eq!(
            kinds("{ } [ ] ( ) # = ?"),
            vec![
                TokenKind::LBrace, TokenKind::RBrace,
                TokenKind::LBracket, TokenKind::RBracket,
                TokenKind::LParen, TokenKind::RParen,
                TokenKind::Hash, TokenKind::Equals, TokenKind::Question,
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn hex_literal_drops_prefix() {
        let tokens = Lexer::new("0x1A 0XfF").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].text, "1A");
        assert_eq!(tokens[1].text, "fF");
    }

    #[test]
    fn empty_hex_literal_is_still_a_number_token() {
        let tokens = Lexer::new("0x").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].text, "");
    }

    #[test]
    fn bare_digit_is_invalid() {
        let tokens = Lexer::new("12").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Invalid);
        assert_eq!(tokens[0].text, "1");
        assert_eq!(tokens[1].kind, TokenKind::Invalid);
    }

    #[test]
    fn reserved_words() {
        let tokens = Lexer::new("global true false globals").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Global);
        assert_eq!(tokens[1].kind, TokenKind::String);
        assert_eq!(tokens[1].text, "true");
        assert_eq!(tokens[2].kind, TokenKind::String);
        assert_eq!(tokens[3].kind, TokenKind::Identifier);
        assert_eq!(tokens[3].text, "globals");
    }

    #[test]
    fn identifiers_allow_digits_and_underscores_after_first_letter() {
        let tokens = Lexer::new("max_size2 _x").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].text, "max_size2");
        assert_eq!(tokens[1].kind, TokenKind::Invalid);
        assert_eq!(tokens[1].text, "_");
    }

    #[test]
    fn strings_are_verbatim() {
        let tokens = Lexer::new(r#""a\nb" "x"#).tokenize();
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, r"a\nb");
        // unterminated: swallows the rest
        assert_eq!(tokens[1].text, "x");
        assert_eq!(tokens[2].kind, TokenKind::End);
    }

    #[test]
    fn tracks_line_and_column() {
        let tokens = Lexer::new("a = 0x1\n  b").tokenize();
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].column), (1, 3));
        assert_eq!((tokens[2].line, tokens[2].column), (1, 5));
        assert_eq!((tokens[3].line, tokens[3].column), (2, 3));
        assert_eq!((tokens[4].line, tokens[4].column), (2, 4));
    }

    #[test]
    fn unknown_character_does_not_stop_the_stream() {
        assert_eq!(kinds("a;b"), vec![
            TokenKind::Identifier, TokenKind::Invalid, TokenKind::Identifier, TokenKind::End,
        ]);
    }

    #[test]
    fn end_is_sticky() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next_token().kind, TokenKind::End);
        assert_eq!(lexer.next_token().kind, TokenKind::End);
    }
}
