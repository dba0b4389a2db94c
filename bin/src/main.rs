use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use log::debug;
use quordle_solver::*;
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::thread;
use std::time::Instant;

/// Runs a Wordle game in reverse, where the computer guesses one or more
/// hidden words at once through shared guesses.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Path to a file that contains a list of possible words, with one word
    /// on each line.
    #[clap(short = 'f', long)]
    words_file: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Guess hidden words chosen by you, from feedback you type in.
    Interactive {
        /// Number of boards solved in parallel with shared guesses.
        #[clap(long, default_value_t = 1)]
        boards: usize,
        /// Round budget shared by all boards.
        #[clap(long, default_value_t = 6)]
        rounds: u32,
        /// Only guess words that could still be a solution.
        #[clap(long)]
        hard: bool,
        /// Print the top-scoring guesses every round.
        #[clap(long)]
        verbose: bool,
        /// Type your own guesses instead of accepting the solver's.
        #[clap(long)]
        manual: bool,
    },
    /// Simulate games against known solutions, or random ones if omitted.
    Solve {
        /// The hidden solutions, one per board.
        words: Vec<String>,
        /// Number of random solutions drawn when no words are given.
        #[clap(long, default_value_t = 1)]
        boards: usize,
        /// Round budget shared by all boards.
        #[clap(long, default_value_t = 6)]
        rounds: u32,
        /// Only guess words that could still be a solution.
        #[clap(long)]
        hard: bool,
        /// Print the top-scoring guesses every round.
        #[clap(long)]
        verbose: bool,
    },
    /// Solve every word in the file and print round statistics.
    Benchmark {
        /// Round budget per game.
        #[clap(long, default_value_t = 128)]
        rounds: u32,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let start_time = Instant::now();
    let args = Args::parse();

    let mut words_reader = io::BufReader::new(
        File::open(&args.words_file)
            .with_context(|| format!("could not open {}", args.words_file))?,
    );
    let bank = WordBank::from_reader(&mut words_reader)?;
    println!(
        "Loaded {} words of length {}.",
        bank.len(),
        bank.word_length()
    );

    match args.command {
        Command::Interactive {
            boards,
            rounds,
            hard,
            verbose,
            manual,
        } => run_interactive(
            &bank,
            boards,
            SessionConfig {
                hard_mode: hard,
                round_budget: rounds,
                verbose,
            },
            manual,
        )?,
        Command::Solve {
            words,
            boards,
            rounds,
            hard,
            verbose,
        } => run_solve(
            &bank,
            words,
            boards,
            SessionConfig {
                hard_mode: hard,
                round_budget: rounds,
                verbose,
            },
        )?,
        Command::Benchmark { rounds } => run_benchmark(&bank, rounds)?,
    }

    println!(
        "Command executed in {:.3}s.",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

fn run_interactive(
    bank: &WordBank,
    boards: usize,
    config: SessionConfig,
    manual: bool,
) -> anyhow::Result<()> {
    let mut session = Session::new(bank, boards, config);

    println!(
        "Choose {} word(s) from the word list. Press enter once you've chosen.",
        boards
    );
    {
        let mut buffer = String::new();
        io::stdin().read_line(&mut buffer)?;
    }
    println!(
        "I will try to guess your word(s).\n\n\
         For each guess, enter the result of each letter as:\n\n\
           * '.' = this letter is not in the word\n\
           * 'y' = this letter is in the word, but not in this location\n\
           * 'g' = this letter is in the word and in the right location.\n\n\
         For example, if your word was \"spade\" and the guess was \"soapy\", you would enter \"g.gy.\""
    );

    while session.state() == SessionState::Playing {
        let round = session.rounds_used() + 1;
        if config.verbose {
            for (word, value) in session.ranked_guesses(10) {
                println!("  {:8.2} {}", value, word);
            }
        }
        let suggested = session
            .select_next_guess()
            .ok_or_else(|| anyhow!("no guessable words left"))?;
        let guess = if manual {
            read_guess(bank, &suggested)?
        } else {
            println!("Round {}: I'm guessing {:?}. How did I do?", round, suggested);
            suggested.to_string()
        };

        let mut feedback: HashMap<usize, Vec<LetterResult>> = HashMap::new();
        for (index, board) in session.boards().iter().enumerate() {
            if board.is_solved() {
                continue;
            }
            feedback.insert(index, read_feedback(index, &guess)?);
        }

        match session.play_round(&guess, |index, _| feedback.remove(&index).unwrap()) {
            Ok(_) => {}
            Err(SolverError::Contradiction { board }) => {
                eprintln!(
                    "Board {} has no candidates left, so some feedback must have been wrong. \
                     What I knew:",
                    board + 1
                );
                eprint!("{}", session.boards()[board].knowledge().summary());
                std::process::exit(1);
            }
            Err(err) => return Err(err.into()),
        }
        print_boards(&session);
    }

    match session.state() {
        SessionState::Won => println!(
            "I did it! Every board solved in {} rounds.",
            session.rounds_used()
        ),
        SessionState::Lost => println!(
            "I couldn't solve every board in {} rounds :(",
            session.rounds_used()
        ),
        SessionState::Playing => {}
    }
    Ok(())
}

fn run_solve(
    bank: &WordBank,
    words: Vec<String>,
    boards: usize,
    config: SessionConfig,
) -> anyhow::Result<()> {
    let solutions: Vec<String> = if words.is_empty() {
        bank.choose_multiple(&mut rand::thread_rng(), boards)
            .map(|word| word.to_string())
            .collect()
    } else {
        words.into_iter().map(|word| word.to_lowercase()).collect()
    };
    for solution in &solutions {
        if !bank.contains(solution) {
            bail!("word {:?} is not in the word list", solution);
        }
    }

    let mut session = Session::new(bank, solutions.len(), config);
    while session.state() == SessionState::Playing {
        if config.verbose {
            for (word, value) in session.ranked_guesses(10) {
                println!("  {:8.2} {}", value, word);
            }
        }
        let guess = session
            .select_next_guess()
            .ok_or_else(|| anyhow!("no guessable words left"))?;
        debug!("round {}: guessing {:?}", session.rounds_used() + 1, guess);
        println!("Round {}: {}", session.rounds_used() + 1, guess);
        session.play_round(&guess, |index, word| evaluate_guess(word, &solutions[index]))?;
        print_boards(&session);
    }

    match session.state() {
        SessionState::Won => println!(
            "Solved all {} board(s) in {} rounds.",
            solutions.len(),
            session.rounds_used()
        ),
        SessionState::Lost => {
            println!("Out of rounds. The solutions were:");
            for solution in &solutions {
                println!("\t{}", solution);
            }
        }
        SessionState::Playing => {}
    }
    Ok(())
}

fn run_benchmark(bank: &WordBank, rounds: u32) -> anyhow::Result<()> {
    let config = SessionConfig {
        hard_mode: false,
        round_budget: rounds,
        verbose: false,
    };
    let cancel = CancelToken::new();
    let watcher = cancel.clone();
    thread::spawn(move || {
        let mut buffer = String::new();
        if io::stdin().read_line(&mut buffer).is_ok() {
            watcher.cancel();
        }
    });
    println!(
        "Benchmarking {} words. Press enter to stop early.",
        bank.len()
    );

    let evaluation = evaluate_bank(bank, config, &cancel)?;
    if evaluation.cancelled {
        println!(
            "Cancelled after {} of {} games.",
            evaluation.games.len(),
            bank.len()
        );
    }

    let mut num_guesses_per_game: Vec<u32> = Vec::new();
    let mut num_games_per_round: HashMap<u32, u32> = HashMap::new();
    let mut failures = 0;
    for (word, result) in &evaluation.games {
        match result {
            GameResult::Success(guesses) => {
                num_guesses_per_game.push(guesses.len() as u32);
                *num_games_per_round.entry(guesses.len() as u32).or_insert(0) += 1;
            }
            GameResult::Failure(_) => {
                debug!("could not solve {:?} within {} rounds", word, rounds);
                failures += 1;
            }
        }
    }

    println!("|Num guesses|Num games|");
    println!("|-----------|---------|");
    let mut rounds_seen: Vec<u32> = num_games_per_round.keys().copied().collect();
    rounds_seen.sort_unstable();
    for round in rounds_seen.iter() {
        println!("|{}|{}|", round, num_games_per_round.get(round).unwrap());
    }

    if !num_guesses_per_game.is_empty() {
        let average = num_guesses_per_game.iter().sum::<u32>() as f64
            / num_guesses_per_game.len() as f64;
        let std_dev: f64 = (num_guesses_per_game
            .iter()
            .map(|num_guesses| (*num_guesses as f64 - average).powi(2))
            .sum::<f64>()
            / num_guesses_per_game.len() as f64)
            .sqrt();
        println!(
            "\n**Average number of guesses:** {:.2} +/- {:.2}",
            average, std_dev
        );
    }
    if failures > 0 {
        println!("{} words could not be solved within {} rounds.", failures, rounds);
    }
    Ok(())
}

fn print_boards(session: &Session) {
    for (index, board) in session.boards().iter().enumerate() {
        println!("--- board {} ---", index + 1);
        print!("{}", board.knowledge().summary());
    }
}

fn read_guess(bank: &WordBank, suggested: &str) -> anyhow::Result<String> {
    loop {
        println!(
            "Suggested guess: {:?}. Type your own, or press enter to accept.",
            suggested
        );
        let mut buffer = String::new();
        io::stdin().read_line(&mut buffer)?;
        let input = buffer.trim().to_lowercase();
        if input.is_empty() {
            return Ok(suggested.to_string());
        }
        if input.chars().count() != bank.word_length() {
            println!(
                "Guesses must be {} letters long. Try again.",
                bank.word_length()
            );
            continue;
        }
        return Ok(input);
    }
}

fn read_feedback(board: usize, guess: &str) -> anyhow::Result<Vec<LetterResult>> {
    loop {
        println!(
            "Board {}: result for {:?}? ('.' = absent, 'y' = misplaced, 'g' = correct)",
            board + 1,
            guess
        );
        let mut buffer = String::new();
        io::stdin().read_line(&mut buffer)?;
        let input = buffer.trim();
        if input.chars().count() != guess.chars().count() {
            println!(
                "Enter exactly {} symbols. Try again.",
                guess.chars().count()
            );
            continue;
        }
        match parse_feedback(input) {
            Some(results) => return Ok(results),
            None => println!("Only '.', 'y' and 'g' are allowed. Try again."),
        }
    }
}

fn parse_feedback(input: &str) -> Option<Vec<LetterResult>> {
    input
        .chars()
        .map(|symbol| match symbol {
            '.' => Some(LetterResult::Absent),
            'y' => Some(LetterResult::Misplaced),
            'g' => Some(LetterResult::Correct),
            _ => None,
        })
        .collect()
}
