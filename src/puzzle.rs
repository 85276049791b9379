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

use crate::vm::Word;

/// Base used by puzzles built with `Puzzle::new`.
pub const DEFAULT_BASE: Word = 10;

/// Smallest base a puzzle may use.
pub const MIN_BASE: Word = 2;

/// Largest base a puzzle may use.  Beyond this there are more digits
/// than letters of the alphabet to name them with.
pub const MAX_BASE: Word = 36;

// ============================================================================
// Errors
// ============================================================================

/// Reasons a puzzle instance is rejected before compilation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PuzzleError {
    /// A word was empty or contained a byte other than an ASCII
    /// letter.
    MalformedWord,
    /// The sum has fewer letters than one of its summands, so no
    /// carry discipline can make the column count work out.
    SumTooShort,
    /// The sum is more than one letter longer than a summand; a
    /// single carry chain cannot bridge the gap.
    SumTooLong,
    /// The base lies outside `MIN_BASE..=MAX_BASE`.
    UnsupportedBase,
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for PuzzleError {}

// ============================================================================
// Puzzle
// ============================================================================

/// A verbal arithmetic instance `W1 + W2 = W3`.  Each distinct
/// letter stands for a distinct digit in the puzzle's base, and the
/// leading letter of each word must not stand for zero.  Letters are
/// case-sensitive raw bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Puzzle {
    w1: String,
    w2: String,
    w3: String,
    base: Word,
}

impl Puzzle {
    /// Construct a base-10 puzzle, validating its shape.
    pub fn new(w1: &str, w2: &str, w3: &str) -> Result<Puzzle, PuzzleError> {
        Puzzle::with_base(w1, w2, w3, DEFAULT_BASE)
    }

    /// Construct a puzzle over an arbitrary base.
    pub fn with_base(w1: &str, w2: &str, w3: &str, base: Word) -> Result<Puzzle, PuzzleError> {
        if !(MIN_BASE..=MAX_BASE).contains(&base) {
            return Err(PuzzleError::UnsupportedBase);
        }
        for w in [w1, w2, w3] {
            if w.is_empty() || !w.bytes().all(|b| b.is_ascii_alphabetic()) {
                return Err(PuzzleError::MalformedWord);
            }
        }
        let (l1, l2, l3) = (w1.len(), w2.len(), w3.len());
        if l3 < l1 || l3 < l2 {
            return Err(PuzzleError::SumTooShort);
        }
        if l3 - l1 > 1 || l3 - l2 > 1 {
            return Err(PuzzleError::SumTooLong);
        }
        Ok(Puzzle {
            w1: w1.to_string(),
            w2: w2.to_string(),
            w3: w3.to_string(),
            base,
        })
    }

    pub fn w1(&self) -> &str {
        &self.w1
    }

    pub fn w2(&self) -> &str {
        &self.w2
    }

    pub fn w3(&self) -> &str {
        &self.w3
    }

    /// The three words in order.
    pub fn words(&self) -> [&str; 3] {
        [&self.w1, &self.w2, &self.w3]
    }

    pub fn base(&self) -> Word {
        self.base
    }

    /// Whether a letter leads any of the three words (and therefore
    /// may not stand for zero).
    pub fn is_leading(&self, letter: u8) -> bool {
        self.words().iter().any(|w| w.as_bytes()[0] == letter)
    }

    /// The distinct letters of the puzzle, in order of first
    /// appearance.
    pub fn letters(&self) -> Vec<u8> {
        let mut letters = Vec::new();
        for w in self.words() {
            for b in w.bytes() {
                if !letters.contains(&b) {
                    letters.push(b);
                }
            }
        }
        letters
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} + {} = {}", self.w1, self.w2, self.w3)
    }
}

// ============================================================================
// Tests
// ============================================================================
