pub mod lexer;

use crate::chunk::Chunk;
use crate::error::CompileError;
use crate::opcode::{Instruction, OpCode};
use lexer::{Lexer, Token};

/// Compile une source Flux en bytecode.
pub fn compile(source: &str) -> Result<Chunk, CompileError> {
    Compiler::new(source).compile()
}

/// Compilateur en une seule passe.
///
/// Chaque `[` est émis avec un argument provisoire et son adresse est empilée
/// sur `loop_stack`. Au `]` correspondant, on émet le `LoopEnd` (qui pointe sur
/// le `[`) puis on corrige le `LoopStart` pour qu'il pointe juste après le `]`.
pub struct Compiler<'a> {
    lexer: Lexer<'a>,
    chunk: Chunk,
    loop_stack: Vec<usize>,
}

impl<'a> Compiler<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lexer: Lexer::new(source),
            // Au pire un caractère = une instruction
            chunk: Chunk::with_capacity(source.len()),
            loop_stack: Vec::with_capacity(16),
        }
    }

    pub fn compile(mut self) -> Result<Chunk, CompileError> {
        while let Some((position, token)) = self.lexer.next() {
            match token {
                Token::LBracket => {
                    let start = self.emit(Instruction::simple(OpCode::LoopStart));
                    self.loop_stack.push(start);
                }
                Token::RBracket => {
                    let start = self
                        .loop_stack
                        .pop()
                        .ok_or(CompileError::UnmatchedCloseBracket { position })?;

                    let end = self.emit(Instruction::new(OpCode::LoopEnd, start as i64));
                    self.chunk.patch(start, end as i64 + 1);
                }
                other => {
                    self.emit(Instruction::simple(other.opcode()));
                }
            }
        }

        if !self.loop_stack.is_empty() {
            return Err(CompileError::UnmatchedOpenBracket { count: self.loop_stack.len() });
        }

        Ok(self.chunk)
    }

    fn emit(&mut self, instruction: Instruction) -> usize {
        self.chunk.write(instruction)
    }
}
