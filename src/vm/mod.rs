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

mod instruction;
mod semantics;
mod state;

pub use crate::vm::instruction::*;
pub use crate::vm::semantics::*;
pub use crate::vm::state::*;

/// The fundamental unit of computation within the machine.  Digits,
/// carries, comparison results and branch tokens are all words.
/// Every intermediate value arising during a column sum fits this
/// width without wrapping.
pub type Word = i16;

/// Maximum depth of the operand stack carried by each execution
/// state.
pub const STACK_MAX: usize = 16;

/// Number of addressable letters.  Letters are raw bytes, so the
/// letter map and the seen set are sized for the full byte range.
pub const MAX_LETTERS: usize = 256;
