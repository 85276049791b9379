/// Functionality for describing puzzle instances (the three words
/// making up a column sum, and the base their digits are drawn
/// from), including the validation applied before a puzzle is
/// accepted for compilation.
pub mod puzzle;
/// The compiler from puzzle instances to search programs.  This
/// walks the columns of the long addition right-to-left, emitting
/// code which chooses, derives or checks one digit per column and
/// prunes inconsistent branches as early as possible.
pub mod compiler;
/// The branching virtual machine which executes compiled programs.
/// This includes the instruction set, the per-branch execution
/// state, and the single-step semantics.
pub mod vm;
/// The search frontier: a bounded stack of execution states
/// providing depth-first exploration of every `FORK` point with
/// cheap backtracking.
pub mod search;
/// Rendering of satisfying assignments, including the aligned
/// letter/digit table printed on success.
pub mod solution;
