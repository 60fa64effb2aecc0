use std::collections::BTreeSet;

/// Charset par défaut : les dix chiffres.
pub const CHARSET_DIGITS: &str = "0123456789";

/// Premier code ASCII imprimable (espace).
pub const PRINTABLE_FIRST: u8 = 32;

/// Borne exclusive de la plage ASCII imprimable.
pub const PRINTABLE_END: u8 = 127;

/// Printable ASCII, `[32, 127)`.
#[must_use]
pub fn printable_ascii() -> impl Iterator<Item = char> {
    (PRINTABLE_FIRST..PRINTABLE_END).map(char::from)
}

/// Contiguous code range between two characters, in either direction.
///
/// # Example
/// ```
/// use aa_core::charset::char_range;
/// assert_eq!(char_range('d', 'a').collect::<String>(), "abcd");
/// assert_eq!(char_range('0', '2').collect::<String>(), "012");
/// ```
pub fn char_range(a: char, b: char) -> impl Iterator<Item = char> {
    if a <= b { a..=b } else { b..=a }
}

/// Ensemble ordonné de caractères uniques, énuméré par code croissant.
///
/// # Example
/// ```
/// use aa_core::charset::Charset;
/// let mut cs: Charset = "cab".chars().collect();
/// assert!(cs.insert('d'));
/// assert!(!cs.insert('a'));
/// assert_eq!(cs.iter().collect::<String>(), "abcd");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Charset {
    chars: BTreeSet<char>,
}

impl Charset {
    /// Empty charset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `c`; returns false if it was already present.
    pub fn insert(&mut self, c: char) -> bool {
        self.chars.insert(c)
    }

    /// Remove `c`; returns false if it was absent.
    pub fn remove(&mut self, c: char) -> bool {
        self.chars.remove(&c)
    }

    /// Membership test.
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    /// Number of characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// True if no character is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Characters in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }

    /// Content key addressing the shared normalization cache.
    #[must_use]
    pub fn key(&self) -> CharsetKey {
        CharsetKey(self.iter().collect())
    }
}

impl FromIterator<char> for Charset {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self {
            chars: iter.into_iter().collect(),
        }
    }
}

/// Clé indépendante de l'ordre : la suite triée des caractères.
///
/// Deux charsets de même contenu donnent la même clé, quel que soit
/// l'ordre d'insertion.
///
/// # Example
/// ```
/// use aa_core::charset::Charset;
/// let a: Charset = "zyx".chars().collect();
/// let b: Charset = "xzy".chars().collect();
/// assert_eq!(a.key(), b.key());
/// assert_eq!(a.key().as_str(), "xyz");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CharsetKey(String);

impl CharsetKey {
    /// The sorted characters as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_range_is_95_chars() {
        let all: Vec<char> = printable_ascii().collect();
        assert_eq!(all.len(), 95);
        assert_eq!(all.first(), Some(&' '));
        assert_eq!(all.last(), Some(&'~'));
    }

    #[test]
    fn charset_has_no_duplicates() {
        let cs: Charset = "aabbc".chars().collect();
        assert_eq!(cs.len(), 3);
    }

    #[test]
    fn remove_reports_absence() {
        let mut cs: Charset = CHARSET_DIGITS.chars().collect();
        assert!(cs.remove('5'));
        assert!(!cs.remove('5'));
        assert!(!cs.contains('5'));
        assert_eq!(cs.len(), 9);
    }

    #[test]
    fn key_follows_content_not_history() {
        let mut a: Charset = "ab".chars().collect();
        a.insert('c');
        a.remove('a');
        let b: Charset = "cb".chars().collect();
        assert_eq!(a.key(), b.key());
        assert_eq!(b.key().as_str(), "bc");
    }

    #[test]
    fn single_char_range() {
        assert_eq!(char_range('q', 'q').collect::<Vec<_>>(), vec!['q']);
    }
}
