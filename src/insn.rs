//! Bytecode instructions for a compiled regex program.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Branch payloads hold program counters as u32.
pub type JumpTarget = u32;

/// The list of bytecode instructions.
///
/// A program is a flat sequence of these. Control flow is expressed with
/// `Fork` and `Jump`; the only consuming instruction is `ConsumeRange`, and
/// `Accept` ends a successful thread. Priority between alternatives comes
/// entirely from `Fork`: the fall-through continuation outranks the spawned
/// sibling, so a compiler encodes "try X before Y" as a fork whose target
/// begins Y.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Insn {
    /// Consume one code unit `c` with `min <= c <= max`, then fall through.
    /// Bounds are inclusive. One-byte subjects never exceed 255, so only
    /// the low byte of each bound is observable there.
    ConsumeRange { min: u16, max: u16 },

    /// Spawn a sibling thread at `target`, ranked just below this thread's
    /// fall-through, then fall through.
    Fork { target: JumpTarget },

    /// Set the PC to `target`.
    Jump { target: JumpTarget },

    /// Report a match extending from the thread's start position to the
    /// current input index, and retire all lower-priority threads.
    Accept,
}

/// A compiled regex program, as consumed by the interpreter.
///
/// Programs are produced by an external compiler and assumed well-formed:
/// non-empty, every branch target in bounds, every path reaching a
/// `ConsumeRange` or `Accept`, and no cycle of non-consuming instructions
/// that a single thread could traverse forever. The interpreter's
/// visitation filter terminates such cycles anyway, but a compiler should
/// not emit them.
#[derive(Debug, Clone)]
pub struct Program {
    /// Sequence of instructions.
    pub insns: Vec<Insn>,
}

impl Program {
    /// Wrap an instruction sequence.
    /// Well-formedness is a caller obligation, checked in debug builds only.
    pub fn new(insns: Vec<Insn>) -> Self {
        debug_assert!(!insns.is_empty(), "Program must not be empty");
        for insn in &insns {
            if let Insn::Fork { target } | Insn::Jump { target } = *insn {
                debug_assert!(
                    (target as usize) < insns.len(),
                    "Branch target out of bounds"
                );
            }
        }
        Self { insns }
    }
}
