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
use super::instruction::Instruction;
use super::state::{ExitCode, State};
use super::{Word, MAX_LETTERS};

use Instruction::*;

/// Represents the possible outcomes from executing a single
/// instruction in a given state.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The state advanced in place and can be stepped again.
    Continue,
    /// The state asks the frontier to spawn that many siblings.  The
    /// state itself is untouched; the frontier applies the branch
    /// tokens and the program counter bump when it materialises the
    /// children.
    Fork(usize),
    /// The state stopped with the given exit code.
    Halt(ExitCode),
}

/// Execute a single instruction against the given state.  On
/// `Continue` the state has been updated in place (including its
/// program counter); `Fork` and `Halt` are returned to the caller to
/// resolve, since both concern the frontier rather than this state
/// alone.
pub fn execute(insn: &Instruction, state: &mut State) -> Outcome {
    match insn {
        // Control flow
        JUMP(k) => execute_jump(state, *k),
        JZ(k) => execute_jz(state, *k),
        JNZ(k) => execute_jnz(state, *k),
        // Stack manipulation
        PUSH(v) => execute_push(state, *v),
        POP => execute_pop(state),
        DUP => execute_dup(state),
        SWAP => execute_swap(state),
        // Arithmetic / comparison
        ADD => execute_binary(state, |a, b| a.wrapping_add(b)),
        SUB => execute_binary(state, |a, b| a.wrapping_sub(b)),
        MUL => execute_binary(state, |a, b| a.wrapping_mul(b)),
        DIV => execute_binary(state, |a, b| if b == 0 { 0 } else { a.wrapping_div(b) }),
        MOD => execute_binary(state, |a, b| if b == 0 { 0 } else { a.wrapping_rem(b) }),
        LT => execute_binary(state, |a, b| (a < b) as Word),
        GT => execute_binary(state, |a, b| (a > b) as Word),
        LTE => execute_binary(state, |a, b| (a <= b) as Word),
        GTE => execute_binary(state, |a, b| (a >= b) as Word),
        INC(k) => execute_adjust(state, *k),
        DEC(k) => execute_adjust(state, k.wrapping_neg()),
        // Letter/digit environment
        STORE(c) => execute_store(state, *c),
        LOAD(c) => execute_load(state, *c),
        IS_SEEN => execute_seen(state, false),
        SET_SEEN => execute_seen(state, true),
        // Search / terminal
        FORK(n) => Outcome::Fork(*n as usize),
        EXIT(code) => Outcome::Halt(*code),
    }
}

// ===================================================================
// Control flow
// ===================================================================

fn execute_jump(state: &mut State, offset: i16) -> Outcome {
    // A negative offset overshooting the program start wraps into an
    // unmapped counter and surfaces as an invalid pc on the next
    // step, exactly like a forward branch past the end.
    state.pc = (state.pc as isize).wrapping_add(offset as isize) as usize;
    Outcome::Continue
}

fn execute_jz(state: &mut State, offset: i16) -> Outcome {
    if !state.stack.has_operands(1) {
        return Outcome::Halt(ExitCode::StackUnderflow);
    }
    if state.stack.pop() == 0 {
        execute_jump(state, offset)
    } else {
        state.pc += 1;
        Outcome::Continue
    }
}

fn execute_jnz(state: &mut State, offset: i16) -> Outcome {
    if !state.stack.has_operands(1) {
        return Outcome::Halt(ExitCode::StackUnderflow);
    }
    if state.stack.pop() != 0 {
        execute_jump(state, offset)
    } else {
        state.pc += 1;
        Outcome::Continue
    }
}

// ===================================================================
// Stack manipulation
// ===================================================================

fn execute_push(state: &mut State, value: Word) -> Outcome {
    if !state.stack.has_capacity(1) {
        return Outcome::Halt(ExitCode::StackOverflow);
    }
    state.stack.push(value);
    state.pc += 1;
    Outcome::Continue
}

fn execute_pop(state: &mut State) -> Outcome {
    if !state.stack.has_operands(1) {
        return Outcome::Halt(ExitCode::StackUnderflow);
    }
    state.stack.pop();
    state.pc += 1;
    Outcome::Continue
}

fn execute_dup(state: &mut State) -> Outcome {
    if !state.stack.has_operands(1) {
        return Outcome::Halt(ExitCode::StackUnderflow);
    }
    if !state.stack.has_capacity(1) {
        return Outcome::Halt(ExitCode::StackOverflow);
    }
    let top = state.stack.peek(0);
    state.stack.push(top);
    state.pc += 1;
    Outcome::Continue
}

fn execute_swap(state: &mut State) -> Outcome {
    if !state.stack.has_operands(2) {
        return Outcome::Halt(ExitCode::StackUnderflow);
    }
    let a = state.stack.peek(0);
    let b = state.stack.peek(1);
    state.stack.set(0, b);
    state.stack.set(1, a);
    state.pc += 1;
    Outcome::Continue
}

// ===================================================================
// Arithmetic / comparison
// ===================================================================

fn execute_binary<F>(state: &mut State, op: F) -> Outcome
where
    F: Fn(Word, Word) -> Word,
{
    if !state.stack.has_operands(2) {
        return Outcome::Halt(ExitCode::StackUnderflow);
    }
    let rhs = state.stack.pop();
    let lhs = state.stack.pop();
    state.stack.push(op(lhs, rhs));
    state.pc += 1;
    Outcome::Continue
}

fn execute_adjust(state: &mut State, delta: i16) -> Outcome {
    if !state.stack.has_operands(1) {
        return Outcome::Halt(ExitCode::StackUnderflow);
    }
    let top = state.stack.peek(0);
    state.stack.set(0, top.wrapping_add(delta));
    state.pc += 1;
    Outcome::Continue
}

// ===================================================================
// Letter/digit environment
// ===================================================================

fn execute_store(state: &mut State, letter: u8) -> Outcome {
    if !state.stack.has_operands(1) {
        return Outcome::Halt(ExitCode::StackUnderflow);
    }
    state.letter_map[letter as usize] = state.stack.peek(0);
    state.pc += 1;
    Outcome::Continue
}

fn execute_load(state: &mut State, letter: u8) -> Outcome {
    if !state.stack.has_capacity(1) {
        return Outcome::Halt(ExitCode::StackOverflow);
    }
    let digit = state.letter_map[letter as usize];
    state.stack.push(digit);
    state.pc += 1;
    Outcome::Continue
}

fn execute_seen(state: &mut State, mark: bool) -> Outcome {
    if !state.stack.has_operands(1) {
        return Outcome::Halt(ExitCode::StackUnderflow);
    }
    // Only representable digits can index the seen set; anything
    // else cannot be part of a satisfying assignment.
    let index = match usize::try_from(state.stack.peek(0)) {
        Ok(i) if i < MAX_LETTERS => i,
        _ => return Outcome::Halt(ExitCode::Dead),
    };
    state.stack.set(0, state.seen[index] as Word);
    if mark {
        state.seen[index] = true;
    }
    state.pc += 1;
    Outcome::Continue
}
