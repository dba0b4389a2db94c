use crate::results::{render_guess, LetterResult};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// The accumulated knowledge about one board after zero or more rounds of
/// feedback.
#[derive(Clone, Debug)]
pub struct Knowledge {
    /// Confirmed letters by position.
    fixed: Vec<Option<char>>,
    /// Minimum occurrence count per letter known to be in the word.
    min_counts: HashMap<char, u8>,
    /// Exclusive upper bound on the occurrence count per letter.
    count_caps: HashMap<char, u8>,
    /// Positions each letter is known not to occupy.
    excluded: HashMap<char, BTreeSet<usize>>,
    tried: BTreeSet<char>,
    history: Vec<String>,
    solved: bool,
}

impl Knowledge {
    /// Creates empty knowledge for words of the given length.
    pub fn new(word_length: usize) -> Knowledge {
        Knowledge {
            fixed: vec![None; word_length],
            min_counts: HashMap::new(),
            count_caps: HashMap::new(),
            excluded: HashMap::new(),
            tried: BTreeSet::new(),
            history: Vec::new(),
            solved: false,
        }
    }

    /// Folds one round of feedback into this knowledge.
    ///
    /// Confirmed positions are never cleared and minimum counts never
    /// decrease. A letter marked absent is capped at one more than its known
    /// minimum count, which keeps a guess holding one correct and one absent
    /// copy of the same letter consistent.
    pub fn update(&mut self, guess: &str, results: &[LetterResult]) {
        debug_assert_eq!(guess.chars().count(), self.fixed.len());
        let mut round_counts: HashMap<char, u8> = HashMap::new();
        let mut newly_capped: Vec<char> = Vec::new();
        for (index, (letter, result)) in guess.chars().zip(results.iter()).enumerate() {
            self.tried.insert(letter);
            match result {
                LetterResult::Correct => {
                    self.fixed[index] = Some(letter);
                    *round_counts.entry(letter).or_insert(0) += 1;
                }
                LetterResult::Misplaced => {
                    *round_counts.entry(letter).or_insert(0) += 1;
                    self.excluded.entry(letter).or_default().insert(index);
                }
                LetterResult::Absent => {
                    newly_capped.push(letter);
                }
            }
        }
        for (letter, count) in round_counts {
            let known = self.min_counts.entry(letter).or_insert(0);
            if *known < count {
                *known = count;
            }
            // An existing cap is always the derived `min + 1` bound.
            if let Some(cap) = self.count_caps.get_mut(&letter) {
                if *cap <= *known {
                    *cap = *known + 1;
                }
            }
        }
        for letter in newly_capped {
            let min = self.min_counts.get(&letter).copied().unwrap_or(0);
            self.count_caps.insert(letter, min + 1);
        }
        if results
            .iter()
            .all(|result| *result == LetterResult::Correct)
        {
            self.solved = true;
        }
        self.history.push(render_guess(guess, results));
    }

    /// Returns `true` iff the given word is consistent with everything known
    /// so far.
    pub fn permits(&self, word: &str) -> bool {
        if word.chars().count() != self.fixed.len() {
            return false;
        }
        let mut counts: HashMap<char, u8> = HashMap::new();
        for (index, letter) in word.chars().enumerate() {
            if let Some(required) = self.fixed[index] {
                if letter != required {
                    return false;
                }
            }
            if self
                .excluded
                .get(&letter)
                .map_or(false, |positions| positions.contains(&index))
            {
                return false;
            }
            *counts.entry(letter).or_insert(0) += 1;
        }
        self.min_counts
            .iter()
            .all(|(letter, min)| counts.get(letter).copied().unwrap_or(0) >= *min)
            && self
                .count_caps
                .iter()
                .all(|(letter, cap)| counts.get(letter).copied().unwrap_or(0) < *cap)
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// The confirmed-position pattern, with `.` for unknown positions.
    pub fn fixed_pattern(&self) -> String {
        self.fixed.iter().map(|slot| slot.unwrap_or('.')).collect()
    }

    /// Letters that must appear, with their minimum occurrence counts.
    pub fn required_letters(&self) -> Vec<(char, u8)> {
        let mut letters: Vec<(char, u8)> = self
            .min_counts
            .iter()
            .map(|(letter, count)| (*letter, *count))
            .collect();
        letters.sort_unstable();
        letters
    }

    /// Letters with a known exclusive occurrence bound.
    pub fn capped_letters(&self) -> Vec<(char, u8)> {
        let mut letters: Vec<(char, u8)> = self
            .count_caps
            .iter()
            .map(|(letter, cap)| (*letter, *cap))
            .collect();
        letters.sort_unstable();
        letters
    }

    /// Positions each letter is known not to occupy.
    pub fn excluded_positions(&self) -> Vec<(char, Vec<usize>)> {
        let mut letters: Vec<(char, Vec<usize>)> = self
            .excluded
            .iter()
            .map(|(letter, positions)| (*letter, positions.iter().copied().collect()))
            .collect();
        letters.sort_unstable();
        letters
    }

    /// Letters of the alphabet that have not been guessed yet.
    pub fn untried_letters(&self) -> String {
        ('a'..='z')
            .filter(|letter| !self.tried.contains(letter))
            .collect()
    }

    /// Rendered lines for every guess so far, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// A multi-line, human-readable summary of this board.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        for line in &self.history {
            out.push_str(line);
        }
        out.push_str(&format!(
            "{}: {}\n",
            if self.solved { "solved" } else { "open" },
            self.fixed_pattern()
        ));
        if !self.min_counts.is_empty() {
            let needs = self
                .required_letters()
                .iter()
                .map(|(letter, count)| {
                    if *count > 1 {
                        format!("{}x{}", letter, count)
                    } else {
                        letter.to_string()
                    }
                })
                .collect::<Vec<String>>()
                .join(" ");
            out.push_str(&format!("needs: {}\n", needs));
        }
        if !self.count_caps.is_empty() {
            let caps = self
                .capped_letters()
                .iter()
                .map(|(letter, cap)| format!("{}<{}", letter, cap))
                .collect::<Vec<String>>()
                .join(" ");
            out.push_str(&format!("capped: {}\n", caps));
        }
        out.push_str(&format!("untried: {}\n", self.untried_letters()));
        out
    }
}

/// Gets the words that are consistent with the given knowledge, preserving
/// their order.
pub fn filter_words(words: &[Arc<str>], knowledge: &Knowledge) -> Vec<Arc<str>> {
    words
        .iter()
        .filter(|word| knowledge.permits(word))
        .map(Arc::clone)
        .collect()
}
