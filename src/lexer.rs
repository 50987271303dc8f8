use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Label or branch length, whitespace-trimmed.
    Text(String),

    LParen,    // (
    RParen,    // )
    Comma,     // ,
    Colon,     // :
    Semicolon, // ;

    Eof,
}

impl Token {
    pub fn is_delimiter(c: char) -> bool {
        matches!(c, '(' | ')' | ',' | ':' | ';')
    }
}

pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    /// Read everything up to the next delimiter. Returns the trimmed text,
    /// which may be empty for whitespace-only runs.
    fn read_text(&mut self) -> String {
        let mut s = String::new();
        while let Some(&c) = self.chars.peek() {
            if Token::is_delimiter(c) {
                break;
            }
            s.push(c);
            self.chars.next();
        }
        s.trim().to_string()
    }

    pub fn next_token(&mut self) -> Token {
        loop {
            let c = match self.chars.peek() {
                Some(&c) => c,
                None => return Token::Eof,
            };

            let tok = match c {
                '(' => Token::LParen,
                ')' => Token::RParen,
                ',' => Token::Comma,
                ':' => Token::Colon,
                ';' => Token::Semicolon,
                _ => {
                    let text = self.read_text();
                    if text.is_empty() {
                        continue;
                    }
                    return Token::Text(text);
                }
            };

            self.chars.next();
            return tok;
        }
    }

    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token();
            if tok == Token::Eof {
                tokens.push(tok);
                break;
            }
            tokens.push(tok);
        }
        tokens
    }
}
