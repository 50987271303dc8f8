use crate::lexer::{Lexer, Token};
use crate::log::debug;
use crate::tree::{NodeId, Tree, TreeNode};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParseError {
    #[error("Unbalanced ')' at token {position}: no open '(' to close")]
    UnbalancedClose { position: usize },
    #[error("Unclosed '(': {depth} group(s) still open at end of input")]
    UnclosedParen { depth: usize },
    #[error("Unexpected ',' at token {position}: siblings need an enclosing '('")]
    SiblingAtTopLevel { position: usize },
    #[error("Unexpected '(' at token {position}: a group must open a node or follow ','")]
    UnexpectedOpen { position: usize },
    #[error("Invalid branch length: {token:?}")]
    InvalidLength { token: String },
}

/// Parse a Newick string into a [`Tree`].
pub fn parse(input: &str) -> Result<Tree, ParseError> {
    Parser::new(input).parse()
}

/// Stack-based Newick parser.
///
/// The cursor node is owned by the parser while it is being filled in; its
/// ancestors sit on the stack and receive their children on `,` and `)`.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    next_id: NodeId,
}

impl Parser {
    pub fn new(input: &str) -> Self {
        let tokens = Lexer::new(input).tokenize();
        Self {
            tokens,
            pos: 0,
            next_id: 0,
        }
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    fn previous(&self) -> Option<&Token> {
        self.pos.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    fn new_node(&mut self) -> TreeNode {
        let node = TreeNode::new(self.next_id);
        self.next_id += 1;
        node
    }

    pub fn parse(&mut self) -> Result<Tree, ParseError> {
        self.pos = 0;
        self.next_id = 0;
        let mut stack: Vec<TreeNode> = Vec::new();
        let mut current = self.new_node();

        while *self.peek() != Token::Eof {
            match self.peek().clone() {
                Token::LParen => {
                    if !matches!(self.previous(), None | Some(Token::LParen | Token::Comma)) {
                        return Err(ParseError::UnexpectedOpen { position: self.pos });
                    }
                    let child = self.new_node();
                    stack.push(std::mem::replace(&mut current, child));
                }
                Token::Comma => {
                    if stack.is_empty() {
                        return Err(ParseError::SiblingAtTopLevel { position: self.pos });
                    }
                    let sibling = self.new_node();
                    let finished = std::mem::replace(&mut current, sibling);
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(finished);
                    }
                }
                Token::RParen => {
                    let parent = stack
                        .pop()
                        .ok_or(ParseError::UnbalancedClose { position: self.pos })?;
                    let child = std::mem::replace(&mut current, parent);
                    current.children.push(child);
                }
                Token::Colon | Token::Semicolon => {}
                Token::Text(text) => match self.previous() {
                    None | Some(Token::LParen | Token::RParen | Token::Comma) => {
                        current.name = Some(text);
                    }
                    Some(Token::Colon) => {
                        current.length = Some(parse_length(&text)?);
                    }
                    _ => {
                        debug!(token = %text, position = self.pos, "ignoring text after terminator");
                    }
                },
                Token::Eof => break,
            }
            self.pos += 1;
        }

        if !stack.is_empty() {
            return Err(ParseError::UnclosedParen { depth: stack.len() });
        }

        debug!(nodes = self.next_id, "parsed newick tree");
        Ok(Tree::new(current, self.next_id))
    }
}

fn parse_length(token: &str) -> Result<f64, ParseError> {
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(ParseError::InvalidLength {
            token: token.to_string(),
        }),
    }
}
