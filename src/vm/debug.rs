use serde::Serialize;

use crate::chunk::Chunk;

/// Une ligne du listing de bytecode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub address: usize,
    pub opcode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub argument: Option<i64>,
}

/// Projection en lecture seule du programme : (adresse, mnémonique, argument éventuel).
pub fn listing(chunk: &Chunk) -> Vec<ListingEntry> {
    chunk
        .iter()
        .enumerate()
        .map(|(address, instruction)| ListingEntry {
            address,
            opcode: instruction.op.mnemonic(),
            argument: instruction.op.is_jump().then_some(instruction.arg),
        })
        .collect()
}

pub fn disassemble_chunk(chunk: &Chunk) -> String {
    let mut out = String::new();
    out.push_str("Addr  Opcode    Argument\n");
    for entry in listing(chunk) {
        disassemble_instruction(&mut out, &entry);
    }
    out
}

fn disassemble_instruction(out: &mut String, entry: &ListingEntry) {
    let line = match entry.argument {
        Some(target) => format!("{:04}  {:<8}  -> {}\n", entry.address, entry.opcode, target),
        None => format!("{:04}  {}\n", entry.address, entry.opcode),
    };
    out.push_str(&line);
}
