// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use std::fmt;
use std::ops;

use super::state::ExitCode;
use super::Word;

// ============================================================================
// Instructions
// ============================================================================

/// An individual machine instruction.  Operands are carried inside
/// the variant, so a malformed opcode/operand pairing is not
/// representable and execution never has to handle one.  Branch
/// operands are _relative_ offsets (which may be negative) applied
/// to the program counter.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    // Control flow
    /// Unconditional relative branch.
    JUMP(i16),
    /// Pop a word; branch if it is zero, otherwise fall through.
    JZ(i16),
    /// Pop a word; branch if it is non-zero, otherwise fall through.
    JNZ(i16),
    // Stack manipulation
    /// Push a literal word.
    PUSH(Word),
    /// Discard the top of the stack.
    POP,
    /// Duplicate the top of the stack.
    DUP,
    /// Exchange the top two stack entries.
    SWAP,
    // Arithmetic / comparison
    ADD,
    SUB,
    MUL,
    /// Division, rounding towards zero.  Division by zero yields
    /// zero; compiled programs only ever divide by the base.
    DIV,
    /// Remainder, truncating like `DIV`.  Remainder by zero yields
    /// zero.
    MOD,
    /// Comparisons pop two words and push `1` or `0`.
    LT,
    GT,
    LTE,
    GTE,
    /// Add a constant to the top of the stack in place.
    INC(i16),
    /// Subtract a constant from the top of the stack in place.
    DEC(i16),
    // Letter/digit environment
    /// Write the top of the stack into the letter map *without*
    /// popping it.
    STORE(u8),
    /// Push the mapping for a letter (the unset sentinel if the
    /// letter has no digit yet).
    LOAD(u8),
    /// Replace the top digit `d` with `seen[d]`.
    IS_SEEN,
    /// Replace the top digit `d` with `seen[d]`, then mark `d` seen
    /// unconditionally.  This test-and-set is the primitive behind
    /// all-different pruning.
    SET_SEEN,
    // Search / terminal
    /// Spawn that many sibling states, each distinguished by the
    /// branch token left on its stack (`0` for the parent, `1..=n`
    /// for the children).
    FORK(u8),
    /// Stop this state with the given exit code.
    EXIT(ExitCode),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Instruction::*;
        match self {
            JUMP(k) => write!(f, "jump {:+}", k),
            JZ(k) => write!(f, "jz {:+}", k),
            JNZ(k) => write!(f, "jnz {:+}", k),
            PUSH(v) => write!(f, "push {}", v),
            POP => write!(f, "pop"),
            DUP => write!(f, "dup"),
            SWAP => write!(f, "swap"),
            ADD => write!(f, "add"),
            SUB => write!(f, "sub"),
            MUL => write!(f, "mul"),
            DIV => write!(f, "div"),
            MOD => write!(f, "mod"),
            LT => write!(f, "lt"),
            GT => write!(f, "gt"),
            LTE => write!(f, "lte"),
            GTE => write!(f, "gte"),
            INC(k) => write!(f, "inc {}", k),
            DEC(k) => write!(f, "dec {}", k),
            STORE(c) => write!(f, "store {}", *c as char),
            LOAD(c) => write!(f, "load {}", *c as char),
            IS_SEEN => write!(f, "is_seen"),
            SET_SEEN => write!(f, "set_seen"),
            FORK(n) => write!(f, "fork {}", n),
            EXIT(code) => write!(f, "exit {}", code),
        }
    }
}

// ============================================================================
// Programs
// ============================================================================

/// A compiled program: a finite, ordered sequence of instructions
/// indexed by the program counter.  Programs are immutable once
/// constructed; every state of a search shares read-only access to
/// the same program.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    insns: Vec<Instruction>,
}

impl Program {
    pub fn new(insns: Vec<Instruction>) -> Self {
        Program { insns }
    }

    /// Number of instructions (i.e. the exclusive upper bound on
    /// valid program counters).
    pub fn len(&self) -> usize {
        self.insns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insns.is_empty()
    }

    /// Fetch the instruction at a given program counter, or `None`
    /// when the counter is out of range.
    pub fn get(&self, pc: usize) -> Option<&Instruction> {
        self.insns.get(pc)
    }

    pub fn iter(&self) -> std::slice::Iter<Instruction> {
        self.insns.iter()
    }
}

impl ops::Index<usize> for Program {
    type Output = Instruction;

    fn index(&self, pc: usize) -> &Self::Output {
        &self.insns[pc]
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.insns.iter()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (pc, insn) in self.insns.iter().enumerate() {
            writeln!(f, "{:#06x}: {}", pc, insn)?;
        }
        Ok(())
    }
}
