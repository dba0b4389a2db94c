use std::collections::HashMap;
use thiserror::Error;

/// The result of a single guessed letter at one position.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LetterResult {
    Correct,
    Misplaced,
    Absent,
}

/// Indicates that an error occurred while trying to solve the boards.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolverError {
    /// The objective word is not in the word bank.
    #[error("word {0:?} is not in the word bank")]
    UnknownWord(Box<str>),
    /// A board ran out of candidates, so the feedback it received must have
    /// been inconsistent.
    #[error("board {board} has no remaining candidates; the feedback so far is inconsistent")]
    Contradiction { board: usize },
    /// The word bank mixes words of different lengths.
    #[error("word {word:?} does not match the bank's word length of {expected}")]
    MismatchedLength { expected: usize, word: Box<str> },
    #[error("the word bank is empty")]
    EmptyWordBank,
}

/// Whether the session was won or lost by the solver.
#[derive(Debug, Eq, PartialEq)]
pub enum GameResult {
    /// The solver finished every board, and provides the guesses that were used.
    Success(Vec<Box<str>>),
    /// The solver ran out of rounds, and provides the guesses that were used.
    Failure(Vec<Box<str>>),
}

/// Determines the per-letter results of the given `guess` against `solution`.
///
/// A repeated letter never receives more combined `Correct` and `Misplaced`
/// results than the solution actually contains. Leftover copies come back
/// `Absent`, with the leftmost guess positions claiming credit first.
pub fn evaluate_guess(guess: &str, solution: &str) -> Vec<LetterResult> {
    debug_assert_eq!(guess.chars().count(), solution.chars().count());
    let mut unclaimed: HashMap<char, u8> = HashMap::new();
    for (guess_letter, solution_letter) in guess.chars().zip(solution.chars()) {
        if guess_letter != solution_letter {
            *unclaimed.entry(solution_letter).or_insert(0) += 1;
        }
    }
    guess
        .chars()
        .zip(solution.chars())
        .map(|(guess_letter, solution_letter)| {
            if guess_letter == solution_letter {
                return LetterResult::Correct;
            }
            match unclaimed.get_mut(&guess_letter) {
                Some(count) if *count > 0 => {
                    *count -= 1;
                    LetterResult::Misplaced
                }
                _ => LetterResult::Absent,
            }
        })
        .collect()
}

/// Renders one guess and its results as a newline-terminated history line.
pub fn render_guess(guess: &str, results: &[LetterResult]) -> String {
    let mut line = String::from(guess);
    line.push(' ');
    for result in results {
        line.push(match result {
            LetterResult::Correct => '🟩',
            LetterResult::Misplaced => '🟨',
            LetterResult::Absent => '⬛',
        });
    }
    line.push('\n');
    line
}
