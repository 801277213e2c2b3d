/// Les 9 opérations du langage Flux.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    // --- Arithmétique ---
    Increment,  // + : acc += 1
    Decrement,  // - : acc -= 1

    // --- Pile ---
    PushAccumulatorToStack, // * : copie l'accumulateur sur la pile
    PopStackToAccumulator,  // / : dépile dans l'accumulateur (0 si vide)

    // --- Contrôle de flux ---
    LoopStart, // [ : operand = adresse juste après le ']' correspondant
    LoopEnd,   // ] : operand = adresse du '[' correspondant

    // --- I/O ---
    OutputChar,   // .
    InputChar,    // ,
    OutputNumber, // #
}

impl OpCode {
    /// Caractère source qui produit cet opcode.
    pub fn symbol(self) -> char {
        match self {
            OpCode::Increment => '+',
            OpCode::Decrement => '-',
            OpCode::PushAccumulatorToStack => '*',
            OpCode::PopStackToAccumulator => '/',
            OpCode::LoopStart => '[',
            OpCode::LoopEnd => ']',
            OpCode::OutputChar => '.',
            OpCode::InputChar => ',',
            OpCode::OutputNumber => '#',
        }
    }

    /// Mnémonique utilisé par le désassembleur.
    pub fn mnemonic(self) -> &'static str {
        match self {
            OpCode::Increment => "INC",
            OpCode::Decrement => "DEC",
            OpCode::PushAccumulatorToStack => "PUSH",
            OpCode::PopStackToAccumulator => "POP",
            OpCode::LoopStart => "LOOP",
            OpCode::LoopEnd => "END",
            OpCode::OutputChar => "OUT",
            OpCode::InputChar => "IN",
            OpCode::OutputNumber => "OUTNUM",
        }
    }

    /// Vrai pour les deux bornes de boucle, les seules à porter une cible de saut.
    pub fn is_jump(self) -> bool {
        matches!(self, OpCode::LoopStart | OpCode::LoopEnd)
    }
}

/// Une instruction : un opcode et son argument (cible de saut, 0 sinon).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub op: OpCode,
    pub arg: i64,
}

impl Instruction {
    pub fn new(op: OpCode, arg: i64) -> Self {
        Instruction { op, arg }
    }

    pub fn simple(op: OpCode) -> Self {
        Instruction { op, arg: 0 }
    }

    /// Cible de saut sous forme d'adresse.
    /// Les arguments sont produits par le compilateur, donc jamais négatifs.
    #[inline(always)]
    pub fn target(&self) -> usize {
        self.arg as usize
    }
}
