use std::collections::HashMap;

/// The number of per-letter occurrence slots that are scored. Words holding a
/// letter more often than this are scored at the last slot.
const MAX_SCORED_OCCURRENCES: usize = 4;

/// Per-letter discrimination values for one board's current candidate list.
///
/// The entry at slot `i` counts the candidates containing that letter at
/// least `i + 1` times. Counts above half the list are folded to their
/// complement, so a letter splitting the candidates roughly in half scores
/// highest while near-universal and near-absent letters both score low.
#[derive(Clone, Debug)]
pub struct LetterScores {
    table: HashMap<char, [u32; MAX_SCORED_OCCURRENCES]>,
}

impl LetterScores {
    /// Builds the score table from the given candidate list.
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> LetterScores {
        let mut table: HashMap<char, [u32; MAX_SCORED_OCCURRENCES]> = HashMap::new();
        for word in words {
            let mut counts: HashMap<char, usize> = HashMap::new();
            for letter in word.as_ref().chars() {
                *counts.entry(letter).or_insert(0) += 1;
            }
            for (letter, count) in counts {
                let slots = table.entry(letter).or_insert([0; MAX_SCORED_OCCURRENCES]);
                for slot in slots.iter_mut().take(count.min(MAX_SCORED_OCCURRENCES)) {
                    *slot += 1;
                }
            }
        }
        let num_words = words.len() as u32;
        for slots in table.values_mut() {
            for slot in slots.iter_mut() {
                if *slot * 2 > num_words {
                    *slot = num_words - *slot;
                }
            }
        }
        LetterScores { table }
    }

    /// The value of a word containing the letter `occurrences` times, clamped
    /// to the scored range. Letters absent from the table are worth 0.
    pub fn value(&self, letter: char, occurrences: usize) -> u32 {
        if occurrences == 0 {
            return 0;
        }
        self.table
            .get(&letter)
            .map_or(0, |slots| slots[occurrences.min(MAX_SCORED_OCCURRENCES) - 1])
    }

    /// Sums the table's value for each distinct letter in the word, indexed
    /// by how often that letter occurs in it.
    pub fn word_score(&self, word: &str) -> u32 {
        let mut counts: HashMap<char, usize> = HashMap::new();
        for letter in word.chars() {
            *counts.entry(letter).or_insert(0) += 1;
        }
        counts
            .iter()
            .map(|(letter, count)| self.value(*letter, *count))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORDS: [&str; 5] = ["crane", "slate", "shine", "spine", "swine"];

    #[test]
    fn table_counts_words_per_letter() {
        let scores = LetterScores::from_words(&WORDS);

        // 'a' is in 2 of 5 words, under the fold threshold.
        assert_eq!(scores.value('a', 1), 2);
        assert_eq!(scores.value('c', 1), 1);
        // 'e' is in every word, folded down to 0.
        assert_eq!(scores.value('e', 1), 0);
        // 's' is in 4 of 5, folded to 1; 'i' in 3 of 5, folded to 2.
        assert_eq!(scores.value('s', 1), 1);
        assert_eq!(scores.value('i', 1), 2);
        assert_eq!(scores.value('z', 1), 0);
    }

    #[test]
    fn exactly_half_is_not_folded() {
        let scores = LetterScores::from_words(&["ab", "ac", "bd", "cd"]);

        assert_eq!(scores.value('a', 1), 2);
        assert_eq!(scores.value('d', 1), 2);
    }

    #[test]
    fn repeated_letters_use_deeper_slots() {
        let scores = LetterScores::from_words(&["geese", "eagle", "crane"]);

        // All three words hold an 'e', two hold a second, one a third.
        assert_eq!(scores.value('e', 1), 0);
        assert_eq!(scores.value('e', 2), 1);
        assert_eq!(scores.value('e', 3), 1);
        // Counts beyond the scored range clamp to the last slot.
        assert_eq!(scores.value('e', 5), scores.value('e', 4));
    }

    #[test]
    fn word_score_sums_distinct_letters() {
        let scores = LetterScores::from_words(&WORDS);

        assert_eq!(scores.word_score("crane"), 1 + 1 + 2 + 1 + 0);
        assert_eq!(scores.word_score("spine"), 1 + 1 + 2 + 1 + 0);
    }

    #[test]
    fn unknown_letters_score_zero() {
        let scores = LetterScores::from_words(&WORDS);

        assert_eq!(scores.word_score("zzzzz"), 0);
    }
}
