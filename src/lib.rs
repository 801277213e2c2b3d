pub mod assets;
pub mod chunk;
pub mod compiler;
pub mod config;
pub mod error;
pub mod opcode;
pub mod vm;

use std::io::{Read, Write};

pub use chunk::Chunk;
pub use compiler::compile;
pub use error::{CompileError, FluxError, RuntimeError};
pub use opcode::{Instruction, OpCode};
pub use vm::VM;

/// Compile puis exécute une source avec une VM neuve.
pub fn execute<R: Read, W: Write>(source: &str, input: &mut R, output: &mut W) -> error::Result<()> {
    let chunk = compile(source)?;
    VM::new(&chunk).run(input, output)?;
    Ok(())
}
