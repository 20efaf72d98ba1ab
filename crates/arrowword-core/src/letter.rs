use std::fmt::{self, Display};

/// A single letter of the puzzle alphabet.
///
/// The alphabet is `A`-`Z` plus the German letters `Ä`, `Ö`, `Ü` and `ß`.
/// Letters are always stored uppercase; `ß` has no single-character uppercase
/// form and is kept as is. Answers spell `ß` as `SS` (see [`answer_letters`]),
/// so a typed `ß` never matches an expectation.
///
/// # Examples
///
/// ```
/// use arrowword_core::Letter;
///
/// assert_eq!(Letter::new('a').map(Letter::as_char), Some('A'));
/// assert_eq!(Letter::new('ö').map(Letter::as_char), Some('Ö'));
/// assert_eq!(Letter::new('ß').map(Letter::as_char), Some('ß'));
/// assert_eq!(Letter::new('1'), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Letter(char);

impl Letter {
    /// Creates a letter from an input character, uppercasing it.
    ///
    /// Returns `None` for characters outside the puzzle alphabet.
    #[must_use]
    pub fn new(ch: char) -> Option<Self> {
        let upper = match ch {
            'A'..='Z' | 'Ä' | 'Ö' | 'Ü' | 'ß' => ch,
            'a'..='z' => ch.to_ascii_uppercase(),
            'ä' => 'Ä',
            'ö' => 'Ö',
            'ü' => 'Ü',
            _ => return None,
        };
        Some(Self(upper))
    }

    /// Returns the uppercase character.
    #[must_use]
    pub const fn as_char(self) -> char {
        self.0
    }
}

impl Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalizes a free-form answer into its puzzle letters.
///
/// The answer is fully uppercased, so `ß` becomes `SS`, and anything outside
/// the puzzle alphabet, whitespace and punctuation included, is dropped.
///
/// # Examples
///
/// ```
/// use arrowword_core::answer_letters;
///
/// let letters: String = answer_letters("  New York!  ").iter().map(|l| l.as_char()).collect();
/// assert_eq!(letters, "NEWYORK");
/// assert_eq!(answer_letters("Straße").len(), 7);
/// ```
#[must_use]
pub fn answer_letters(answer: &str) -> Vec<Letter> {
    answer
        .trim()
        .chars()
        .flat_map(char::to_uppercase)
        .filter_map(Letter::new)
        .collect()
}

/// Normalizes a free-form answer into the string form stored on a clue.
#[must_use]
pub fn normalize_answer(answer: &str) -> String {
    answer_letters(answer).into_iter().map(Letter::as_char).collect()
}
