use crate::data::WordBank;
use crate::knowledge::{filter_words, Knowledge};
use crate::results::{evaluate_guess, GameResult, LetterResult, SolverError};
use crate::scoring::LetterScores;
use log::debug;
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Configuration for a solving session, passed in at construction.
#[derive(Clone, Copy, Debug)]
pub struct SessionConfig {
    /// Restrict guesses to words that could still be a solution. This also
    /// activates automatically once the remaining rounds drop to the number
    /// of unsolved boards, regardless of the setting here.
    pub hard_mode: bool,
    /// Maximum number of rounds before the session is lost.
    pub round_budget: u32,
    /// Expose per-round scoring details to the presenter.
    pub verbose: bool,
}

impl Default for SessionConfig {
    fn default() -> SessionConfig {
        SessionConfig {
            hard_mode: false,
            round_budget: 6,
            verbose: false,
        }
    }
}

/// Whether the session is still running, fully solved, or out of rounds.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SessionState {
    Playing,
    Won,
    Lost,
}

/// One puzzle instance: its accumulated knowledge and the words still
/// consistent with it.
pub struct Board {
    knowledge: Knowledge,
    candidates: Vec<Arc<str>>,
}

impl Board {
    fn new(words: Vec<Arc<str>>, word_length: usize) -> Board {
        Board {
            knowledge: Knowledge::new(word_length),
            candidates: words,
        }
    }

    pub fn knowledge(&self) -> &Knowledge {
        &self.knowledge
    }

    /// The words still consistent with every round of feedback so far.
    pub fn candidates(&self) -> &[Arc<str>] {
        &self.candidates
    }

    pub fn is_solved(&self) -> bool {
        self.knowledge.is_solved()
    }
}

/// Drives one or more boards through rounds of shared guesses.
///
/// Each round, [`select_next_guess`](Session::select_next_guess) picks the
/// word with the most aggregate discriminating power across every unsolved
/// board, and [`play_round`](Session::play_round) applies that guess (or any
/// externally supplied one) to them all. Boards are updated in their original
/// index order.
pub struct Session {
    dictionary: Vec<Arc<str>>,
    boards: Vec<Board>,
    config: SessionConfig,
    guesses: Vec<Box<str>>,
}

impl Session {
    /// Creates a session of `num_boards` boards over the full bank.
    pub fn new(bank: &WordBank, num_boards: usize, config: SessionConfig) -> Session {
        let dictionary: Vec<Arc<str>> = bank.iter().map(Arc::clone).collect();
        let boards = (0..num_boards)
            .map(|_| Board::new(dictionary.clone(), bank.word_length()))
            .collect();
        Session {
            dictionary,
            boards,
            config,
            guesses: Vec::new(),
        }
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The guesses applied so far, shared by every board.
    pub fn guesses(&self) -> &[Box<str>] {
        &self.guesses
    }

    pub fn rounds_used(&self) -> u32 {
        self.guesses.len() as u32
    }

    /// Rounds still available, counting the one about to be played.
    pub fn rounds_remaining(&self) -> u32 {
        self.config.round_budget.saturating_sub(self.rounds_used())
    }

    pub fn num_active_boards(&self) -> usize {
        self.boards
            .iter()
            .filter(|board| !board.is_solved())
            .count()
    }

    pub fn state(&self) -> SessionState {
        if self.boards.iter().all(Board::is_solved) {
            SessionState::Won
        } else if self.rounds_remaining() == 0 {
            SessionState::Lost
        } else {
            SessionState::Playing
        }
    }

    /// Whether this round's guesses are restricted to possible solutions.
    pub fn hard_mode_active(&self) -> bool {
        self.config.hard_mode
            || self.rounds_remaining() <= self.num_active_boards() as u32
    }

    /// Chooses the guess with the highest summed value across every unsolved
    /// board. Ties keep the earliest word in the pool, so selection is
    /// deterministic for a given pool order.
    pub fn select_next_guess(&self) -> Option<Arc<str>> {
        let mut best: Option<(Arc<str>, f64)> = None;
        for (word, value) in self.scored_pool() {
            match &best {
                Some((_, best_value)) if value <= *best_value => {}
                _ => best = Some((word, value)),
            }
        }
        best.map(|(word, _)| word)
    }

    /// The scored guess pool in descending value order, for display. Ties
    /// keep pool order.
    pub fn ranked_guesses(&self, limit: usize) -> Vec<(Arc<str>, f64)> {
        let mut scored = self.scored_pool();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);
        scored
    }

    fn scored_pool(&self) -> Vec<(Arc<str>, f64)> {
        let active: Vec<&Board> = self
            .boards
            .iter()
            .filter(|board| !board.is_solved())
            .collect();
        if active.is_empty() {
            return Vec::new();
        }
        let per_board: Vec<(LetterScores, HashSet<&str>)> = active
            .iter()
            .map(|board| {
                (
                    LetterScores::from_words(board.candidates()),
                    board
                        .candidates()
                        .iter()
                        .map(|word| word.as_ref())
                        .collect(),
                )
            })
            .collect();
        self.guess_pool(&active)
            .into_iter()
            .map(|word| {
                let value = per_board
                    .iter()
                    .map(|(scores, candidates)| {
                        let raw = scores.word_score(word.as_ref()) as f64;
                        // Guesses that can win a board outright beat purely
                        // informational guesses of equal raw value.
                        if candidates.contains(word.as_ref()) {
                            raw * 1.1 + 1.0
                        } else {
                            raw
                        }
                    })
                    .sum();
                (Arc::clone(word), value)
            })
            .collect()
    }

    fn guess_pool<'a>(&'a self, active: &[&'a Board]) -> Vec<&'a Arc<str>> {
        if !self.hard_mode_active() {
            return self.dictionary.iter().collect();
        }
        debug!(
            "hard mode active: {} rounds left for {} open boards",
            self.rounds_remaining(),
            active.len()
        );
        let mut seen: HashSet<&str> = HashSet::new();
        let mut pool = Vec::new();
        for board in active {
            for word in board.candidates() {
                if seen.insert(word.as_ref()) {
                    pool.push(word);
                }
            }
        }
        pool
    }

    /// Applies one shared guess to every unsolved board, pulling the feedback
    /// for board `i` from `feedback(i, guess)`.
    ///
    /// Returns the session state after the round. A board whose candidate
    /// list empties yields a [`SolverError::Contradiction`], which aborts the
    /// session.
    pub fn play_round<F>(&mut self, guess: &str, mut feedback: F) -> Result<SessionState, SolverError>
    where
        F: FnMut(usize, &str) -> Vec<LetterResult>,
    {
        self.guesses.push(Box::from(guess));
        for (index, board) in self.boards.iter_mut().enumerate() {
            if board.is_solved() {
                continue;
            }
            let results = feedback(index, guess);
            board.knowledge.update(guess, &results);
            board.candidates = filter_words(&board.candidates, &board.knowledge);
            debug!(
                "board {}: {} candidates after guess {:?}",
                index,
                board.candidates.len(),
                guess
            );
            if board.candidates.is_empty() {
                return Err(SolverError::Contradiction { board: index });
            }
        }
        Ok(self.state())
    }
}

/// Attempts to guess the given word within the configured round budget.
pub fn play_game(
    objective: &str,
    bank: &WordBank,
    config: SessionConfig,
) -> Result<GameResult, SolverError> {
    play_parallel_game(&[objective], bank, config)
}

/// Plays one board per objective, with every board sharing each round's
/// guess. Every objective must be in the bank.
pub fn play_parallel_game(
    objectives: &[&str],
    bank: &WordBank,
    config: SessionConfig,
) -> Result<GameResult, SolverError> {
    for objective in objectives {
        if !bank.contains(objective) {
            return Err(SolverError::UnknownWord(Box::from(*objective)));
        }
    }
    let mut session = Session::new(bank, objectives.len(), config);
    loop {
        match session.state() {
            SessionState::Playing => {}
            SessionState::Won => return Ok(GameResult::Success(session.guesses().to_vec())),
            SessionState::Lost => return Ok(GameResult::Failure(session.guesses().to_vec())),
        }
        let guess = session
            .select_next_guess()
            .ok_or(SolverError::EmptyWordBank)?;
        session.play_round(&guess, |index, word| evaluate_guess(word, objectives[index]))?;
    }
}

/// Signals batch evaluation to stop once the games in flight finish.
#[derive(Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// The games completed by [`evaluate_bank`] before it finished or was
/// cancelled.
pub struct BankEvaluation {
    pub games: Vec<(Arc<str>, GameResult)>,
    pub cancelled: bool,
}

/// Plays one simulated game per bank word and collects the outcomes.
///
/// The token is checked between games, never in the middle of one, so
/// cancellation still reports every game that already ran.
pub fn evaluate_bank(
    bank: &WordBank,
    config: SessionConfig,
    cancel: &CancelToken,
) -> Result<BankEvaluation, SolverError> {
    let outcomes: Vec<Option<(Arc<str>, Result<GameResult, SolverError>)>> = bank
        .par_iter()
        .map(|word| {
            if cancel.is_cancelled() {
                return None;
            }
            Some((Arc::clone(word), play_game(word, bank, config)))
        })
        .collect();
    let mut games = Vec::new();
    for (word, outcome) in outcomes.into_iter().flatten() {
        games.push((word, outcome?));
    }
    Ok(BankEvaluation {
        games,
        cancelled: cancel.is_cancelled(),
    })
}
