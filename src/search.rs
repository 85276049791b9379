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
use log::trace;

use crate::vm::{execute, ExitCode, Outcome, Program, State};

/// Default frontier capacity.  Overflowing it is reported on the
/// forking state, which then dies like any other branch so that
/// backtracking can free slots and continue elsewhere.
pub const CAP: usize = 4096;

// ============================================================================
// Search
// ============================================================================

/// A bounded stack of execution states exploring one program
/// depth-first.  The state at `top` is the only one ever stepped;
/// states below it are suspended ancestors (and elder siblings)
/// which resume when everything above them has died.  `FORK`
/// materialises children directly above their parent by whole-state
/// copy, so backtracking is a single index decrement.
pub struct Search<'a> {
    program: &'a Program,
    states: Box<[State]>,
    top: usize,
}

impl<'a> Search<'a> {
    pub fn new(program: &'a Program) -> Self {
        Search::with_capacity(program, CAP)
    }

    /// A frontier with a non-default capacity.  At least one slot is
    /// always allocated, since the search needs somewhere to put the
    /// initial state.
    pub fn with_capacity(program: &'a Program, cap: usize) -> Self {
        let states = vec![State::new(); cap.max(1)].into_boxed_slice();
        Search {
            program,
            states,
            top: 0,
        }
    }

    /// Index of the current state.
    pub fn top(&self) -> usize {
        self.top
    }

    /// The state currently being stepped.
    pub fn current(&self) -> &State {
        &self.states[self.top]
    }

    /// Any frontier slot by index.  Slots above `top` hold either
    /// never-used states or remnants of discarded branches.
    pub fn frame(&self, index: usize) -> &State {
        &self.states[index]
    }

    /// Advance the current state by one instruction.
    pub fn tick(&mut self) {
        let index = self.top;
        let pc = self.states[index].pc();
        match self.program.get(pc) {
            None => self.states[index].halt(ExitCode::InvalidPc),
            Some(&insn) => {
                match execute(&insn, &mut self.states[index]) {
                    Outcome::Continue => {}
                    Outcome::Halt(code) => self.states[index].halt(code),
                    Outcome::Fork(n) => self.fork(n),
                }
                trace!(
                    "[{}] {:<10} @{:#06x} stack={}",
                    index,
                    insn.to_string(),
                    pc,
                    self.states[index].stack()
                );
            }
        }
    }

    /// Expand the frontier with `n` copies of the current state.
    /// The parent keeps a `0` branch token on its stack and resumes
    /// past the fork once every child has died; child `j` starts
    /// with token `j` in the same stack slot and runs first, highest
    /// token first.
    fn fork(&mut self, n: usize) {
        if self.top + n >= self.states.len() {
            self.states[self.top].halt(ExitCode::SearchOverflow);
            return;
        }
        let parent = &mut self.states[self.top];
        if !parent.stack().has_capacity(1) {
            parent.halt(ExitCode::StackOverflow);
            return;
        }
        parent.stack_mut().push(0);
        parent.pc += 1;
        let parent = self.states[self.top];
        for j in 1..=n {
            let child = &mut self.states[self.top + j];
            *child = parent;
            child.stack_mut().set(0, j as i16);
        }
        self.top += n;
    }

    /// Run the program to its first satisfying assignment, or until
    /// the frontier is exhausted.  Branches die with whatever exit
    /// code stopped them; the driver discards them uniformly and
    /// resumes the state below.
    pub fn run(&mut self) -> Option<State> {
        loop {
            self.tick();
            while self.states[self.top].is_done() {
                if self.states[self.top].exitcode() == Some(ExitCode::Success) {
                    return Some(self.states[self.top]);
                }
                if self.top == 0 {
                    return None;
                }
                self.top -= 1;
            }
        }
    }
}
