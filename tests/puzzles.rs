use std::fs;

use wordsum::compiler::Compiler;
use wordsum::puzzle::Puzzle;
use wordsum::search::Search;
use wordsum::solution::Solution;

pub static TESTS_DIR: &str = "tests/files";

include!(concat!(env!("OUT_DIR"), "/puzzle_tests.rs"));

// ============================================================================
// Helpers
// ============================================================================

/// Run the fixture with a given name.  A fixture holds the three
/// words on its first line; the remaining lines are the expected
/// outcome, which is either `rejected`, `no result`, or `found`
/// followed by the aligned assignment table.
fn check(name: &str) {
    let path = format!("{}/{}.puzzle", TESTS_DIR, name);
    let contents = fs::read_to_string(&path).unwrap();
    let (header, expected) = contents.split_once('\n').unwrap();
    let words: Vec<&str> = header.split_whitespace().collect();
    assert_eq!(words.len(), 3, "malformed fixture {}", name);
    let actual = outcome(words[0], words[1], words[2]);
    assert_eq!(expected.trim_end(), actual.trim_end(), "fixture {}", name);
}

/// Solve a puzzle and render the outcome the way the command-line
/// tool reports it.
fn outcome(w1: &str, w2: &str, w3: &str) -> String {
    let puzzle = match Puzzle::new(w1, w2, w3) {
        Ok(p) => p,
        Err(_) => return "rejected".to_string(),
    };
    let program = Compiler::new(&puzzle).compile();
    let mut search = Search::new(&program);
    match search.run() {
        Some(state) => format!("found\n{}", Solution::new(&puzzle, &state)),
        None => "no result".to_string(),
    }
}
