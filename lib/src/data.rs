use crate::results::SolverError;
use std::io;
use std::io::BufRead;
use std::ops::Deref;
use std::sync::Arc;

/// Contains all the possible words for a game.
///
/// Words are converted to lower case on construction and must all share one
/// length. The order of the source is preserved and never changes.
pub struct WordBank {
    all_words: Vec<Arc<str>>,
    word_length: usize,
}

impl WordBank {
    /// Constructs a new `WordBank` by reading words from the given reader.
    ///
    /// The reader should provide one word per line. Empty lines are skipped.
    pub fn from_reader<R: BufRead>(word_reader: &mut R) -> io::Result<Self> {
        let words = word_reader.lines().collect::<io::Result<Vec<String>>>()?;
        WordBank::from_iterator(words)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }

    /// Constructs a new `WordBank` from the given words, preserving their
    /// order.
    pub fn from_iterator<I, S>(words: I) -> Result<Self, SolverError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut word_length = 0;
        let mut all_words: Vec<Arc<str>> = Vec::new();
        for word in words {
            let word = word.as_ref().trim();
            if word.is_empty() {
                continue;
            }
            let word = word.to_lowercase();
            let length = word.chars().count();
            if word_length == 0 {
                word_length = length;
            } else if length != word_length {
                return Err(SolverError::MismatchedLength {
                    expected: word_length,
                    word: word.into_boxed_str(),
                });
            }
            all_words.push(Arc::from(word.as_str()));
        }
        if all_words.is_empty() {
            return Err(SolverError::EmptyWordBank);
        }
        Ok(WordBank {
            all_words,
            word_length,
        })
    }

    /// Returns the number of possible words.
    pub fn len(&self) -> usize {
        self.all_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_words.is_empty()
    }

    /// Returns the shared length of every word in the bank.
    pub fn word_length(&self) -> usize {
        self.word_length
    }

    /// Returns `true` iff the given word is in the bank.
    pub fn contains(&self, word: &str) -> bool {
        self.all_words.iter().any(|other| other.as_ref() == word)
    }
}

impl Deref for WordBank {
    type Target = [Arc<str>];

    fn deref(&self) -> &Self::Target {
        &self.all_words
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn word_bank_from_reader_lowercases_and_skips_blanks() -> io::Result<()> {
        let mut cursor = Cursor::new(String::from("WORDA\n\nwordb\nsmore\n"));

        let bank = WordBank::from_reader(&mut cursor)?;

        assert_eq!(bank.len(), 3);
        assert_eq!(bank.word_length(), 5);
        assert!(bank.contains("worda"));
        assert!(!bank.contains("WORDA"));
        Ok(())
    }

    #[test]
    fn word_bank_preserves_order() {
        let bank = WordBank::from_iterator(["zonal", "abbey", "mango"]).unwrap();

        let words: Vec<&str> = bank.iter().map(|word| word.as_ref()).collect();
        assert_eq!(words, vec!["zonal", "abbey", "mango"]);
    }

    #[test]
    fn word_bank_rejects_mixed_lengths() {
        let result = WordBank::from_iterator(["worda", "over"]);

        assert_eq!(
            result.err(),
            Some(SolverError::MismatchedLength {
                expected: 5,
                word: Box::from("over"),
            })
        );
    }

    #[test]
    fn word_bank_rejects_empty_input() {
        let result = WordBank::from_iterator(Vec::<String>::new());

        assert_eq!(result.err(), Some(SolverError::EmptyWordBank));
    }
}
