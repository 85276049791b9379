use wordsum::vm::Instruction::*;
use wordsum::vm::{execute, ExitCode, Instruction, Outcome, State, STACK_MAX};

// ============================================================================
// Stack manipulation
// ============================================================================

#[test]
pub fn test_push_pop_01() {
    let mut st = State::new();
    step(&mut st, PUSH(5));
    assert_eq!(st.stack().len(), 1);
    assert_eq!(st.stack().peek(0), 5);
    step(&mut st, POP);
    assert!(st.stack().is_empty());
    assert_eq!(st.pc(), 2);
}

#[test]
pub fn test_push_pop_02() {
    // push v; pop is a no-op for any v
    let mut st = stacked(&[3, 1]);
    let before = *st.stack();
    step(&mut st, PUSH(-7));
    step(&mut st, POP);
    assert_eq!(*st.stack(), before);
}

#[test]
pub fn test_dup_01() {
    let mut st = stacked(&[4]);
    step(&mut st, DUP);
    assert_eq!(st.stack().peek(0), 4);
    assert_eq!(st.stack().peek(1), 4);
}

#[test]
pub fn test_dup_02() {
    // dup; pop is a no-op for any non-empty stack
    let mut st = stacked(&[2, 9]);
    let before = *st.stack();
    step(&mut st, DUP);
    step(&mut st, POP);
    assert_eq!(*st.stack(), before);
}

#[test]
pub fn test_swap_01() {
    let mut st = stacked(&[1, 2]);
    step(&mut st, SWAP);
    assert_eq!(st.stack().peek(0), 1);
    assert_eq!(st.stack().peek(1), 2);
}

#[test]
pub fn test_swap_02() {
    // swap is self-inverse
    let mut st = stacked(&[8, 3, 6]);
    let before = *st.stack();
    step(&mut st, SWAP);
    step(&mut st, SWAP);
    assert_eq!(*st.stack(), before);
}

// ============================================================================
// Arithmetic / comparison
// ============================================================================

#[test]
pub fn test_arith_01() {
    assert_eq!(binop(ADD, 7, 5), 12);
    assert_eq!(binop(SUB, 7, 5), 2);
    assert_eq!(binop(SUB, 5, 7), -2);
    assert_eq!(binop(MUL, 7, 5), 35);
    assert_eq!(binop(DIV, 17, 10), 1);
    assert_eq!(binop(MOD, 17, 10), 7);
}

#[test]
pub fn test_arith_02() {
    // division and remainder by zero yield zero rather than crashing
    assert_eq!(binop(DIV, 9, 0), 0);
    assert_eq!(binop(MOD, 9, 0), 0);
}

#[test]
pub fn test_compare_01() {
    assert_eq!(binop(LT, 3, 4), 1);
    assert_eq!(binop(LT, 4, 4), 0);
    assert_eq!(binop(GT, 5, 4), 1);
    assert_eq!(binop(GT, 4, 5), 0);
    assert_eq!(binop(LTE, 4, 4), 1);
    assert_eq!(binop(LTE, 5, 4), 0);
    assert_eq!(binop(GTE, 4, 4), 1);
    assert_eq!(binop(GTE, 3, 4), 0);
}

#[test]
pub fn test_adjust_01() {
    let mut st = stacked(&[7]);
    step(&mut st, INC(2));
    assert_eq!(st.stack().peek(0), 9);
    step(&mut st, DEC(1));
    assert_eq!(st.stack().peek(0), 8);
    // in-place: nothing was pushed or popped
    assert_eq!(st.stack().len(), 1);
}

// ============================================================================
// Control flow
// ============================================================================

#[test]
pub fn test_jump_01() {
    let mut st = State::new();
    step(&mut st, JUMP(5));
    assert_eq!(st.pc(), 5);
}

#[test]
pub fn test_jump_02() {
    let mut st = State::new();
    step(&mut st, JUMP(3));
    step(&mut st, JUMP(-2));
    assert_eq!(st.pc(), 1);
}

#[test]
pub fn test_jz_01() {
    let mut st = stacked(&[0]);
    step(&mut st, JZ(4));
    assert_eq!(st.pc(), 4);
    assert!(st.stack().is_empty());
}

#[test]
pub fn test_jz_02() {
    // non-taken edge falls through by one
    let mut st = stacked(&[2]);
    step(&mut st, JZ(4));
    assert_eq!(st.pc(), 1);
    assert!(st.stack().is_empty());
}

#[test]
pub fn test_jnz_01() {
    let mut st = stacked(&[2]);
    step(&mut st, JNZ(4));
    assert_eq!(st.pc(), 4);
}

#[test]
pub fn test_jnz_02() {
    let mut st = stacked(&[0]);
    step(&mut st, JNZ(4));
    assert_eq!(st.pc(), 1);
}

// ============================================================================
// Letter/digit environment
// ============================================================================

#[test]
pub fn test_store_load_01() {
    let mut st = stacked(&[6]);
    step(&mut st, STORE(b'A'));
    // store does not pop
    assert_eq!(st.stack().len(), 1);
    assert_eq!(st.digit(b'A'), Some(6));
    step(&mut st, LOAD(b'A'));
    assert_eq!(st.stack().peek(0), 6);
    assert_eq!(st.stack().len(), 2);
}

#[test]
pub fn test_load_unset_01() {
    // unset letters load the sentinel
    let mut st = State::new();
    step(&mut st, LOAD(b'Z'));
    assert_eq!(st.stack().peek(0), -1);
    assert_eq!(st.digit(b'Z'), None);
}

#[test]
pub fn test_is_seen_01() {
    let mut st = stacked(&[3]);
    step(&mut st, IS_SEEN);
    assert_eq!(st.stack().peek(0), 0);
    assert!(!st.seen(3));
}

#[test]
pub fn test_set_seen_01() {
    // test-and-set: reports the old flag, then raises it
    let mut st = stacked(&[3]);
    step(&mut st, SET_SEEN);
    assert_eq!(st.stack().peek(0), 0);
    assert!(st.seen(3));
    let mut st = stacked(&[3, 3]);
    step(&mut st, SET_SEEN);
    step(&mut st, POP);
    step(&mut st, SET_SEEN);
    assert_eq!(st.stack().peek(0), 1);
}

#[test]
pub fn test_seen_range_01() {
    // a value that names no digit cannot satisfy anything
    let mut st = stacked(&[-1]);
    crash(&mut st, SET_SEEN, ExitCode::Dead);
    let mut st = stacked(&[1000]);
    crash(&mut st, IS_SEEN, ExitCode::Dead);
}

// ============================================================================
// Search / terminal
// ============================================================================

#[test]
pub fn test_exit_01() {
    let mut st = State::new();
    assert_eq!(
        execute(&EXIT(ExitCode::Success), &mut st),
        Outcome::Halt(ExitCode::Success)
    );
    assert_eq!(
        execute(&EXIT(ExitCode::Dead), &mut st),
        Outcome::Halt(ExitCode::Dead)
    );
}

#[test]
pub fn test_fork_outcome_01() {
    // fork itself leaves the state untouched; the frontier resolves it
    let mut st = State::new();
    assert_eq!(execute(&FORK(9), &mut st), Outcome::Fork(9));
    assert_eq!(st.pc(), 0);
    assert!(st.stack().is_empty());
}

// ============================================================================
// Underflow / overflow
// ============================================================================

#[test]
pub fn test_underflow_01() {
    let mut st = State::new();
    crash(&mut st, POP, ExitCode::StackUnderflow);
    crash(&mut st, DUP, ExitCode::StackUnderflow);
    crash(&mut st, ADD, ExitCode::StackUnderflow);
    crash(&mut st, JZ(2), ExitCode::StackUnderflow);
    crash(&mut st, INC(1), ExitCode::StackUnderflow);
    crash(&mut st, STORE(b'A'), ExitCode::StackUnderflow);
    crash(&mut st, SET_SEEN, ExitCode::StackUnderflow);
}

#[test]
pub fn test_underflow_02() {
    // binary operations need two operands
    let mut st = stacked(&[1]);
    crash(&mut st, SWAP, ExitCode::StackUnderflow);
    crash(&mut st, ADD, ExitCode::StackUnderflow);
}

#[test]
pub fn test_overflow_01() {
    let mut st = State::new();
    for i in 0..STACK_MAX {
        step(&mut st, PUSH(i as i16));
    }
    crash(&mut st, PUSH(0), ExitCode::StackOverflow);
    crash(&mut st, DUP, ExitCode::StackOverflow);
    crash(&mut st, LOAD(b'A'), ExitCode::StackOverflow);
}

// ============================================================================
// Helpers
// ============================================================================

/// Execute a single instruction, expecting the state to advance.
fn step(state: &mut State, insn: Instruction) {
    assert_eq!(execute(&insn, state), Outcome::Continue);
}

/// Execute a single instruction, expecting the given halt.
fn crash(state: &mut State, insn: Instruction, code: ExitCode) {
    assert_eq!(execute(&insn, state), Outcome::Halt(code));
}

/// A fresh state whose stack holds the given words (last = top).
fn stacked(words: &[i16]) -> State {
    let mut st = State::new();
    for &w in words {
        st.stack_mut().push(w);
    }
    st
}

/// Apply a binary operation to two operands and return the result.
fn binop(insn: Instruction, lhs: i16, rhs: i16) -> i16 {
    let mut st = stacked(&[lhs, rhs]);
    step(&mut st, insn);
    assert_eq!(st.stack().len(), 1);
    st.stack().peek(0)
}
