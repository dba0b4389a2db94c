#[macro_use]
extern crate assert_matches;

use quordle_solver::*;

fn create_bank(words: Vec<&str>) -> WordBank {
    WordBank::from_iterator(words).unwrap()
}

#[test]
fn play_game_narrows_to_the_solution() {
    let bank = create_bank(vec!["crane", "slate", "shine", "spine", "swine"]);

    let result = play_game("spine", &bank, SessionConfig::default()).unwrap();

    assert_matches!(
        result,
        GameResult::Success(guesses)
            if guesses.len() <= 3 && guesses.last().map(|guess| guess.as_ref()) == Some("spine")
    );
}

#[test]
fn play_game_solves_every_bank_word() {
    let bank = create_bank(vec!["crane", "slate", "shine", "spine", "swine"]);

    for objective in bank.iter() {
        let result = play_game(objective, &bank, SessionConfig::default()).unwrap();
        assert_matches!(result, GameResult::Success(_));
    }
}

#[test]
fn play_game_rejects_unknown_objective() {
    let bank = create_bank(vec!["crane", "slate", "shine", "spine", "swine"]);

    let result = play_game("other", &bank, SessionConfig::default());

    assert_matches!(result, Err(SolverError::UnknownWord(word)) if word.as_ref() == "other");
}

#[test]
fn play_game_out_of_rounds_is_a_failure() {
    let bank = create_bank(vec!["crane", "slate", "shine", "spine", "swine"]);
    let config = SessionConfig {
        round_budget: 1,
        ..SessionConfig::default()
    };

    let result = play_game("swine", &bank, config).unwrap();

    assert_matches!(result, GameResult::Failure(guesses) if guesses.len() == 1);
}

#[test]
fn parallel_game_solves_both_boards_with_shared_guesses() {
    let bank = create_bank(vec!["crane", "slate", "shine", "spine", "swine"]);

    let result = play_parallel_game(&["crane", "slate"], &bank, SessionConfig::default()).unwrap();

    assert_matches!(result, GameResult::Success(guesses) if guesses.len() <= 6);
}

#[test]
fn session_applies_one_guess_to_every_open_board() {
    let bank = create_bank(vec!["crane", "slate", "shine", "spine", "swine"]);
    let solutions = ["crane", "slate"];
    let mut session = Session::new(&bank, 2, SessionConfig::default());

    while session.state() == SessionState::Playing {
        let guess = session.select_next_guess().unwrap();
        session
            .play_round(&guess, |index, word| evaluate_guess(word, solutions[index]))
            .unwrap();
    }

    // Each board saw a prefix of the one shared guess sequence, even though
    // their constraints diverged.
    for board in session.boards() {
        for (line, guess) in board.knowledge().history().iter().zip(session.guesses()) {
            assert!(line.starts_with(guess.as_ref()));
        }
    }
    assert_eq!(session.state(), SessionState::Won);
    assert!(session.boards().iter().all(|board| board.is_solved()));
    assert!(session.rounds_used() <= 6);
}

#[test]
fn inconsistent_feedback_is_a_contradiction() {
    let bank = create_bank(vec!["crane", "slate"]);
    let mut session = Session::new(&bank, 1, SessionConfig::default());

    let result = session.play_round("crane", |_, _| vec![LetterResult::Absent; 5]);

    assert_eq!(result, Err(SolverError::Contradiction { board: 0 }));
}

#[test]
fn hard_mode_activates_when_rounds_run_short() {
    let bank = create_bank(vec!["crane", "slate", "shine", "spine", "swine"]);

    let tight = Session::new(
        &bank,
        2,
        SessionConfig {
            round_budget: 2,
            ..SessionConfig::default()
        },
    );
    assert!(tight.hard_mode_active());

    let relaxed = Session::new(&bank, 2, SessionConfig::default());
    assert!(!relaxed.hard_mode_active());
}

#[test]
fn hard_mode_guesses_only_possible_solutions() {
    let bank = create_bank(vec!["crane", "slate", "shine", "spine", "swine"]);
    let config = SessionConfig {
        hard_mode: true,
        ..SessionConfig::default()
    };
    let mut session = Session::new(&bank, 1, config);

    session
        .play_round("crane", |_, guess| evaluate_guess(guess, "spine"))
        .unwrap();

    let next = session.select_next_guess().unwrap();
    assert!(session.boards()[0].candidates().contains(&next));
}

#[test]
fn solved_boards_keep_their_feedback_history() {
    let bank = create_bank(vec!["crane", "slate", "shine", "spine", "swine"]);
    let mut session = Session::new(&bank, 1, SessionConfig::default());

    session
        .play_round("spine", |_, guess| evaluate_guess(guess, "spine"))
        .unwrap();

    let board = &session.boards()[0];
    assert!(board.is_solved());
    assert_eq!(board.knowledge().fixed_pattern(), "spine");
    assert_eq!(board.knowledge().history().len(), 1);
}

#[test]
fn evaluate_bank_reports_every_game() {
    let bank = create_bank(vec!["crane", "slate", "shine", "spine", "swine"]);
    let config = SessionConfig {
        round_budget: 10,
        ..SessionConfig::default()
    };

    let evaluation = evaluate_bank(&bank, config, &CancelToken::new()).unwrap();

    assert_eq!(evaluation.games.len(), bank.len());
    assert!(!evaluation.cancelled);
    assert!(evaluation
        .games
        .iter()
        .all(|(_, result)| matches!(result, GameResult::Success(_))));
}

#[test]
fn evaluate_bank_respects_cancellation() {
    let bank = create_bank(vec!["crane", "slate", "shine", "spine", "swine"]);
    let cancel = CancelToken::new();
    cancel.cancel();

    let evaluation = evaluate_bank(&bank, SessionConfig::default(), &cancel).unwrap();

    assert!(evaluation.cancelled);
    assert!(evaluation.games.is_empty());
}
