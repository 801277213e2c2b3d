use std::iter::Enumerate;
use std::str::Chars;

use crate::opcode::OpCode;

/// Les seuls caractères significatifs du langage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Plus,     // +
    Minus,    // -
    Star,     // *
    Slash,    // /
    LBracket, // [
    RBracket, // ]
    Dot,      // .
    Comma,    // ,
    Hash,     // #
}

impl Token {
    pub fn opcode(self) -> OpCode {
        match self {
            Token::Plus => OpCode::Increment,
            Token::Minus => OpCode::Decrement,
            Token::Star => OpCode::PushAccumulatorToStack,
            Token::Slash => OpCode::PopStackToAccumulator,
            Token::LBracket => OpCode::LoopStart,
            Token::RBracket => OpCode::LoopEnd,
            Token::Dot => OpCode::OutputChar,
            Token::Comma => OpCode::InputChar,
            Token::Hash => OpCode::OutputNumber,
        }
    }
}

/// Scanner paresseux : une seule passe, de gauche à droite.
/// Produit `(position, token)` où `position` est l'index du caractère dans la source.
pub struct Lexer<'a> {
    chars: Enumerate<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { chars: input.chars().enumerate() }
    }
}

impl Iterator for Lexer<'_> {
    type Item = (usize, Token);

    fn next(&mut self) -> Option<Self::Item> {
        for (pos, c) in self.chars.by_ref() {
            let token = match c {
                '+' => Token::Plus,
                '-' => Token::Minus,
                '*' => Token::Star,
                '/' => Token::Slash,
                '[' => Token::LBracket,
                ']' => Token::RBracket,
                '.' => Token::Dot,
                ',' => Token::Comma,
                '#' => Token::Hash,
                // Espaces et tout le reste : commentaire
                _ => continue,
            };
            return Some((pos, token));
        }
        None
    }
}
