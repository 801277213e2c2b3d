use std::ops::Index;

use crate::opcode::{Instruction, OpCode};

/// Un programme compilé : séquence plate d'instructions.
///
/// Seul le compilateur peut l'écrire ; une fois rendu, il est en lecture seule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Chunk {
    code: Vec<Instruction>,
}

impl Chunk {
    pub fn new() -> Self {
        Chunk { code: Vec::new() }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Chunk { code: Vec::with_capacity(capacity) }
    }

    /// Ajoute une instruction et renvoie son adresse.
    pub(crate) fn write(&mut self, instruction: Instruction) -> usize {
        self.code.push(instruction);
        self.code.len() - 1
    }

    /// Réécrit l'argument d'une instruction déjà émise (back-patching des boucles).
    pub(crate) fn patch(&mut self, address: usize, arg: i64) {
        self.code[address].arg = arg;
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn get(&self, address: usize) -> Option<&Instruction> {
        self.code.get(address)
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.code
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.code.iter()
    }

    /// Les opcodes seuls, dans l'ordre.
    pub fn opcodes(&self) -> impl Iterator<Item = OpCode> + '_ {
        self.code.iter().map(|i| i.op)
    }
}

impl Index<usize> for Chunk {
    type Output = Instruction;

    fn index(&self, address: usize) -> &Instruction {
        &self.code[address]
    }
}

impl<'a> IntoIterator for &'a Chunk {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.code.iter()
    }
}
