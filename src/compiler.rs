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
use log::debug;

use crate::puzzle::Puzzle;
use crate::vm::Instruction::*;
use crate::vm::{ExitCode, Instruction, Program, Word, MAX_LETTERS};

// ============================================================================
// Strategy
// ============================================================================

/// How the compiled program enumerates candidate digits for a letter
/// that cannot be derived from the column equation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// A single `FORK` spawns one sibling per candidate digit; the
    /// frontier explores them highest-candidate first.
    Bfs,
    /// A loop spawns one sibling per iteration via `FORK 1`, walking
    /// candidates lowest first and leaving the loop counter in the
    /// parent.
    Dfs,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Bfs
    }
}

// ============================================================================
// Compiler
// ============================================================================

/// Compiles a puzzle instance into a program performing column-wise
/// long addition over the branching machine.  Working right-to-left,
/// each column either commits a fresh digit (forking over the
/// candidates for any letter it cannot derive) or checks a digit
/// committed by an earlier column.  The bottom of the operand stack
/// always carries the running carry between columns.
pub struct Compiler<'a> {
    puzzle: &'a Puzzle,
    strategy: Strategy,
    /// Letters which already have a committed digit at the current
    /// point of emission.  A known letter compiles to a cheap `LOAD`
    /// where an unknown one costs a `FORK` over its candidates.
    known: [bool; MAX_LETTERS],
    insns: Vec<Instruction>,
}

impl<'a> Compiler<'a> {
    pub fn new(puzzle: &'a Puzzle) -> Self {
        Compiler::with_strategy(puzzle, Strategy::default())
    }

    pub fn with_strategy(puzzle: &'a Puzzle, strategy: Strategy) -> Self {
        Compiler {
            puzzle,
            strategy,
            known: [false; MAX_LETTERS],
            insns: Vec::new(),
        }
    }

    /// Emit the program for this compiler's puzzle.
    pub fn compile(mut self) -> Program {
        let puzzle = self.puzzle;
        debug!("plan: {} (base {})", puzzle, puzzle.base());
        let w1 = puzzle.w1().as_bytes();
        let w2 = puzzle.w2().as_bytes();
        let w3 = puzzle.w3().as_bytes();
        let (mut i1, mut i2, mut i3) = (w1.len(), w2.len(), w3.len());
        // When the sum outgrows both summands, its leading letter can
        // only be the final carry.
        if i3 > i1 && i3 > i2 {
            self.fix(w3[0], 1, false);
        }
        // Initial carry
        self.emit(PUSH(0));
        // Solve each column
        while i1 > 0 && i2 > 0 && i3 > 0 {
            i1 -= 1;
            i2 -= 1;
            i3 -= 1;
            let (c1, c2, c3) = (w1[i1], w2[i2], w3[i3]);
            if !self.known(c3) {
                self.solve_sum(c1, c2, c3);
            } else if !self.known(c1) {
                self.solve_summand(c1, c2, c3);
            } else if !self.known(c2) {
                self.solve_summand(c2, c1, c3);
            } else {
                self.check_sum(c1, c2, c3);
            }
        }
        // Resolve the final partial column, if any
        if i3 > 0 {
            i3 -= 1;
            let leftover = if i1 > 0 {
                i1 -= 1;
                Some(w1[i1])
            } else if i2 > 0 {
                i2 -= 1;
                Some(w2[i2])
            } else {
                None
            };
            self.check_final(leftover, w3[i3]);
        } else {
            // All columns consumed together: the surviving carry must
            // be zero for the widths to agree.
            debug!("  - check carry");
            self.emit(JZ(2));
            self.emit(EXIT(ExitCode::Dead));
            self.emit(EXIT(ExitCode::Success));
        }
        let program = Program::new(self.insns);
        debug!("program: {} instructions", program.len());
        for (pc, insn) in program.iter().enumerate() {
            debug!("{:#06x}: {}", pc, insn);
        }
        program
    }

    fn emit(&mut self, insn: Instruction) {
        self.insns.push(insn);
    }

    fn known(&self, c: u8) -> bool {
        self.known[c as usize]
    }

    fn mark_known(&mut self, c: u8) {
        debug!("    - known {}", c as char);
        self.known[c as usize] = true;
    }

    fn base(&self) -> Word {
        self.puzzle.base()
    }

    /// Commit a letter to a fixed digit.  `check_seen` selects
    /// whether a clash with an already-taken digit kills the branch
    /// or is ignored (the conventional-carry fix never clashes, as
    /// it runs first).
    fn fix(&mut self, c: u8, digit: Word, check_seen: bool) {
        debug!(
            "  - fix {} = {} ({})",
            c as char,
            digit,
            if check_seen { "check" } else { "no check" }
        );
        self.emit(PUSH(digit)); // [digit]
        self.emit(DUP); // [digit, digit]
        self.emit(SET_SEEN); // [digit, was_seen]
        if check_seen {
            self.emit(JZ(2)); // [digit]
            self.emit(EXIT(ExitCode::Dead));
        } else {
            self.emit(POP); // [digit]
        }
        self.emit(STORE(c)); // [digit]
        self.mark_known(c);
    }

    /// Push the digit for a letter: a `LOAD` when it is already
    /// committed, otherwise a fork over its candidates.
    fn load_or_choose(&mut self, c: u8) {
        if self.known(c) {
            debug!("    - load {}", c as char);
            self.emit(LOAD(c));
            return;
        }
        match self.strategy {
            Strategy::Bfs => self.choose_bfs(c),
            Strategy::Dfs => self.choose_dfs(c),
        }
    }

    fn choose_bfs(&mut self, c: u8) {
        debug!("    - choose bfs {}", c as char);
        let is_first = self.puzzle.is_leading(c);
        let forks = if is_first {
            self.base() - 1
        } else {
            self.base()
        };
        self.emit(FORK(forks as u8)); // [.., tok]
        self.emit(DUP); // [.., tok, tok]
        self.emit(JNZ(2)); // [.., tok]
        self.emit(EXIT(ExitCode::Dead)); // parent: every child has been tried
        if !is_first {
            self.emit(DEC(1)); // [.., tok - 1]
        }
        self.emit(DUP); // [.., d, d]
        self.emit(SET_SEEN); // [.., d, was_seen]
        self.emit(JZ(2)); // [.., d]
        self.emit(EXIT(ExitCode::Dead));
        self.emit(STORE(c)); // [.., d]
        self.mark_known(c);
    }

    fn choose_dfs(&mut self, c: u8) {
        debug!("    - choose dfs {}", c as char);
        let is_first = self.puzzle.is_leading(c);
        let initial = if is_first { 1 } else { 0 };
        self.emit(PUSH(initial)); // [.., i]
        self.emit(FORK(1)); // [.., i, tok]       loop head
        self.emit(JZ(7)); // [.., i]             parent advances i
        self.emit(DUP); // [.., i, i]            child claims i
        self.emit(SET_SEEN); // [.., i, was_seen]
        self.emit(JZ(2)); // [.., i]
        self.emit(EXIT(ExitCode::Dead));
        self.emit(STORE(c)); // [.., i]
        self.emit(JUMP(7)); // [.., i]           claimed; leave the loop
        self.emit(INC(1)); // [.., i + 1]
        self.emit(DUP); // [.., i, i]
        self.emit(PUSH(self.base())); // [.., i, i, base]
        self.emit(LT); // [.., i, i < base]
        self.emit(JNZ(-12)); // [.., i]          next candidate
        self.emit(EXIT(ExitCode::Dead)); //      candidates exhausted
        self.mark_known(c);
    }

    /// Emit the tail shared by every full column: on entry the stack
    /// top holds `carry + c1 + c2`, and on exit it holds the carry
    /// into the next column, with the column's result digit either
    /// checked (when already committed) or committed fresh.
    fn sum_tail(&mut self, c3: u8) {
        self.emit(DUP); // [sum, sum]
        self.emit(PUSH(self.base())); // [sum, sum, base]
        self.emit(MOD); // [sum, sum % base]
        if self.known(c3) {
            self.emit(LOAD(c3)); // [sum, sum % base, c3]
            self.emit(SUB); // [sum, cmp]
            self.emit(JZ(2)); // [sum]
            self.emit(EXIT(ExitCode::Dead));
        } else {
            if self.puzzle.is_leading(c3) {
                self.emit(DUP); // [sum, d, d]
                self.emit(JNZ(2)); // [sum, d]
                self.emit(EXIT(ExitCode::Dead)); // leading digit may not be zero
            }
            self.emit(DUP); // [sum, d, d]
            self.emit(SET_SEEN); // [sum, d, was_seen]
            self.emit(JZ(2)); // [sum, d]
            self.emit(EXIT(ExitCode::Dead));
            self.emit(STORE(c3)); // [sum, d]
            self.emit(POP); // [sum]
            self.mark_known(c3);
        }
        self.emit(PUSH(self.base())); // [sum, base]
        self.emit(DIV); // [sum / base]
    }

    /// Column whose result letter is (usually) uncommitted: choose
    /// the summands as needed, then derive the result digit.
    fn solve_sum(&mut self, c1: u8, c2: u8, c3: u8) {
        debug!(
            "  - solve {} + {} = {} for {}",
            c1 as char, c2 as char, c3 as char, c3 as char
        );
        self.load_or_choose(c1); // [carry, c1]
        self.emit(ADD); // [carry + c1]
        self.load_or_choose(c2); // [carry + c1, c2]
        self.emit(ADD); // [carry + c1 + c2]
        // Choosing a summand may have committed the result letter
        // too (it can be the same letter); sum_tail then degrades to
        // a pure consistency check.
        self.sum_tail(c3);
    }

    /// Column whose result letter is committed but a summand is not:
    /// derive the summand from `c1 = (base - (carry + c2 - c3)) mod
    /// base`, then fold it back into the running sum for the carry.
    fn solve_summand(&mut self, c1: u8, c2: u8, c3: u8) {
        debug!(
            "  - solve {} + {} = {} for {}",
            c1 as char, c2 as char, c3 as char, c1 as char
        );
        self.load_or_choose(c2); // [carry, c2]
        self.emit(ADD); // [carry + c2]
        if self.known(c1) {
            // Both summands were the same letter; the choice above
            // already committed it, so the column only needs checking.
            self.emit(LOAD(c1)); // [carry + c2, c1]
            self.emit(ADD); // [carry + c2 + c1]
            self.sum_tail(c3);
            return;
        }
        self.emit(DUP); // [carry + c2, carry + c2]
        self.emit(LOAD(c3)); // [carry + c2, carry + c2, c3]
        self.emit(SUB); // [carry + c2, carry + c2 - c3]
        self.emit(PUSH(self.base())); // [carry + c2, carry + c2 - c3, base]
        self.emit(SWAP); // [carry + c2, base, carry + c2 - c3]
        self.emit(SUB); // [carry + c2, base - (carry + c2 - c3)]
        self.emit(PUSH(self.base())); // [carry + c2, .., base]
        self.emit(MOD); // [carry + c2, c1]
        if self.puzzle.is_leading(c1) {
            self.emit(DUP); // [carry + c2, c1, c1]
            self.emit(JNZ(2)); // [carry + c2, c1]
            self.emit(EXIT(ExitCode::Dead)); // leading digit may not be zero
        }
        self.emit(DUP); // [carry + c2, c1, c1]
        self.emit(SET_SEEN); // [carry + c2, c1, was_seen]
        self.emit(JZ(2)); // [carry + c2, c1]
        self.emit(EXIT(ExitCode::Dead));
        self.emit(STORE(c1)); // [carry + c2, c1]
        self.emit(ADD); // [carry + c2 + c1]
        self.emit(PUSH(self.base())); // [carry + c2 + c1, base]
        self.emit(DIV); // [(carry + c2 + c1) / base]
        self.mark_known(c1);
    }

    /// Column with every letter committed: recompute and compare.
    fn check_sum(&mut self, c1: u8, c2: u8, c3: u8) {
        debug!("  - check {} + {} = {}", c1 as char, c2 as char, c3 as char);
        self.emit(LOAD(c1)); // [carry, c1]
        self.emit(ADD); // [carry + c1]
        self.emit(LOAD(c2)); // [carry + c1, c2]
        self.emit(ADD); // [carry + c1 + c2]
        self.sum_tail(c3);
    }

    /// Final partial column: the remaining letter of the sum must
    /// absorb the surviving carry plus the leftover summand letter,
    /// if there is one, with no carry left over.
    fn check_final(&mut self, leftover: Option<u8>, c3: u8) {
        // [carry]
        if let Some(c) = leftover {
            self.load_or_choose(c); // [carry, c]
            self.emit(ADD); // [carry + c]
        }
        debug!("  - check final {}", c3 as char);
        if self.known(c3) {
            self.emit(LOAD(c3)); // [v, c3]
            self.emit(SUB); // [v - c3]
            self.emit(JZ(2)); // []
            self.emit(EXIT(ExitCode::Dead));
            self.emit(EXIT(ExitCode::Success));
        } else {
            // The sum's leading digit is pinned by the carry; commit
            // it if it names a digit nobody else holds.
            self.emit(DUP); // [v, v]
            self.emit(PUSH(self.base())); // [v, v, base]
            self.emit(LT); // [v, v < base]
            self.emit(JNZ(2)); // [v]
            self.emit(EXIT(ExitCode::Dead)); // needs a digit that does not exist
            self.emit(DUP); // [v, v]
            self.emit(JNZ(2)); // [v]
            self.emit(EXIT(ExitCode::Dead)); // leading digit may not be zero
            self.emit(DUP); // [v, v]
            self.emit(SET_SEEN); // [v, was_seen]
            self.emit(JZ(2)); // [v]
            self.emit(EXIT(ExitCode::Dead));
            self.emit(STORE(c3)); // [v]
            self.emit(EXIT(ExitCode::Success));
            self.mark_known(c3);
        }
    }
}
