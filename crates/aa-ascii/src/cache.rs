use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use aa_core::charset::CharsetKey;

/// Cache partagé : contenu du charset → luminosités normalisées.
///
/// Les valeurs sont alignées sur l'ordre de la clé (codes croissants).
/// Cloner le cache partage le même stockage ; il est adressé par contenu,
/// donc deux matchers ne peuvent pas se corrompre mutuellement. À ne
/// partager qu'entre matchers utilisant la même source de glyphes.
///
/// # Example
/// ```
/// use aa_core::charset::Charset;
/// use aa_ascii::BrightnessCache;
///
/// let cache = BrightnessCache::new();
/// let shared = cache.clone();
/// let key = "ab".chars().collect::<Charset>().key();
/// cache.insert(key.clone(), vec![0.0, 1.0]);
/// assert_eq!(shared.get(&key).as_deref(), Some(&[0.0, 1.0][..]));
/// ```
#[derive(Clone, Debug, Default)]
pub struct BrightnessCache {
    entries: Arc<Mutex<HashMap<CharsetKey, Arc<[f64]>>>>,
}

impl BrightnessCache {
    /// Empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Poisoning ignoré : les entrées sont des valeurs immuables.
    fn lock(&self) -> MutexGuard<'_, HashMap<CharsetKey, Arc<[f64]>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Normalized vector for a charset content, if known.
    #[must_use]
    pub fn get(&self, key: &CharsetKey) -> Option<Arc<[f64]>> {
        self.lock().get(key).cloned()
    }

    /// Store or replace the vector for a charset content.
    pub fn insert(&self, key: CharsetKey, values: Vec<f64>) {
        self.lock().insert(key, values.into());
    }

    /// Number of distinct charsets cached.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aa_core::charset::Charset;

    fn key(s: &str) -> CharsetKey {
        s.chars().collect::<Charset>().key()
    }

    #[test]
    fn lookup_ignores_insertion_order() {
        let cache = BrightnessCache::new();
        cache.insert(key("cba"), vec![0.0, 0.5, 1.0]);
        assert!(cache.get(&key("abc")).is_some());
        assert!(cache.get(&key("ab")).is_none());
    }

    #[test]
    fn insert_replaces() {
        let cache = BrightnessCache::new();
        cache.insert(key("xy"), vec![0.0, 1.0]);
        cache.insert(key("yx"), vec![1.0, 0.0]);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key("xy")).as_deref(), Some(&[1.0, 0.0][..]));
    }

    #[test]
    fn clear_is_visible_through_clones() {
        let cache = BrightnessCache::new();
        let other = cache.clone();
        cache.insert(key("q"), vec![0.5]);
        other.clear();
        assert!(cache.is_empty());
    }
}
