pub mod debug;

use std::io::{self, ErrorKind, Read, Write};

use crate::chunk::Chunk;
use crate::error::RuntimeError;
use crate::opcode::OpCode;

/// Machine virtuelle Flux : un accumulateur, une pile non bornée, un compteur ordinal.
///
/// Une VM est construite pour une seule exécution ; rien n'est partagé entre deux runs.
pub struct VM<'a> {
    chunk: &'a Chunk,
    accumulator: i64,
    stack: Vec<i64>,
    pc: usize,
    // Adresse de la dernière écriture pas encore vidée
    unflushed: Option<usize>,
}

impl<'a> VM<'a> {
    pub fn new(chunk: &'a Chunk) -> Self {
        VM {
            chunk,
            accumulator: 0,
            stack: Vec::with_capacity(256),
            pc: 0,
            unflushed: None,
        }
    }

    pub fn accumulator(&self) -> i64 {
        self.accumulator
    }

    /// Contenu de la pile, sommet en dernier.
    pub fn stack(&self) -> &[i64] {
        &self.stack
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    #[inline(always)]
    fn push(&mut self, value: i64) {
        self.stack.push(value);
    }

    // Pile vide : 0, sans erreur
    #[inline(always)]
    fn pop(&mut self) -> i64 {
        self.stack.pop().unwrap_or(0)
    }

    /// Exécute le programme jusqu'au bout, ou jusqu'à une erreur d'E/S.
    ///
    /// Aucune limite de pas : un programme qui boucle indéfiniment ne rend jamais la main.
    pub fn run<R: Read, W: Write>(&mut self, input: &mut R, output: &mut W) -> Result<(), RuntimeError> {
        while self.step(input, output)? {}
        self.flush(output)
    }

    /// Vide la sortie si une écriture est en attente.
    /// Un échec est imputé à l'instruction de sortie qui a produit les octets.
    fn flush<W: Write>(&mut self, output: &mut W) -> Result<(), RuntimeError> {
        if let Some(pc) = self.unflushed.take() {
            output.flush().map_err(|source| RuntimeError::Io { pc, source })?;
        }
        Ok(())
    }

    /// Exécute une instruction. Renvoie `false` une fois le programme épuisé.
    #[inline(always)]
    pub fn step<R: Read, W: Write>(&mut self, input: &mut R, output: &mut W) -> Result<bool, RuntimeError> {
        let Some(&instruction) = self.chunk.get(self.pc) else {
            return Ok(false);
        };

        let pc = self.pc;
        let io_error = |source: io::Error| RuntimeError::Io { pc, source };

        match instruction.op {
            OpCode::Increment => {
                self.accumulator = self.accumulator.wrapping_add(1);
            }
            OpCode::Decrement => {
                self.accumulator = self.accumulator.wrapping_sub(1);
            }
            OpCode::PushAccumulatorToStack => {
                self.push(self.accumulator);
            }
            OpCode::PopStackToAccumulator => {
                self.accumulator = self.pop();
            }
            OpCode::LoopStart => {
                if self.accumulator == 0 {
                    self.pc = instruction.target();
                    return Ok(true);
                }
            }
            OpCode::LoopEnd => {
                if self.accumulator != 0 {
                    self.pc = instruction.target();
                    return Ok(true);
                }
            }
            OpCode::OutputChar => {
                // rem_euclid : toujours dans 0..=255, même pour un accumulateur négatif
                let byte = self.accumulator.rem_euclid(256) as u8;
                output.write_all(&[byte]).map_err(io_error)?;
                self.unflushed = Some(pc);
            }
            OpCode::InputChar => {
                // On vide la sortie avant de bloquer, pour que les invites s'affichent
                self.flush(output)?;
                self.accumulator = read_byte(input).map_err(io_error)?.map_or(0, i64::from);
            }
            OpCode::OutputNumber => {
                write!(output, "{}", self.accumulator).map_err(io_error)?;
                self.unflushed = Some(pc);
            }
        }

        self.pc += 1;
        Ok(true)
    }
}

/// Lit un octet. `None` en fin d'entrée.
fn read_byte<R: Read>(input: &mut R) -> io::Result<Option<u8>> {
    let mut buf = [0u8; 1];
    loop {
        match input.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buf[0])),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}
