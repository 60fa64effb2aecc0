use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use aa_core::charset::Charset;
use aa_core::error::CoreError;
use aa_core::traits::GlyphSource;

use crate::cache::BrightnessCache;

/// Luminosité normalisée attribuée quand min == max (charset dégénéré).
pub const DEGENERATE_BRIGHTNESS: f64 = 0.5;

/// What must be recomputed before the next lookup pass.
///
/// Transitions:
///
/// | état            | add (extrême)  | add (intérieur)        | remove (extrême) | remove (autre)          |
/// |-----------------|----------------|------------------------|------------------|-------------------------|
/// | `Clean`         | `DirtyExtremes`| `DirtyPartial({c})`    | `DirtyExtremes`  | `Clean`                 |
/// | `DirtyPartial`  | `DirtyExtremes`| `DirtyPartial(s ∪ {c})`| `DirtyExtremes`  | `DirtyPartial(s \ {c})`, `Clean` si vide |
/// | `DirtyExtremes` | `DirtyExtremes`| `DirtyExtremes`        | `DirtyExtremes`  | `DirtyExtremes`         |
///
/// [`CharMatcher::initialize_brightness_map`] collapses every state back to
/// `Clean`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Staleness {
    /// Normalized values match the charset.
    #[default]
    Clean,
    /// Only these freshly added characters lack a normalized value.
    DirtyPartial(BTreeSet<char>),
    /// Min or max moved: everything must be renormalized.
    DirtyExtremes,
}

impl Staleness {
    fn after_add(self, c: char, extremes_moved: bool) -> Self {
        match self {
            _ if extremes_moved => Self::DirtyExtremes,
            Self::DirtyExtremes => Self::DirtyExtremes,
            Self::Clean => Self::DirtyPartial(BTreeSet::from([c])),
            Self::DirtyPartial(mut added) => {
                added.insert(c);
                Self::DirtyPartial(added)
            }
        }
    }

    fn after_remove(self, c: char, extremes_moved: bool) -> Self {
        match self {
            _ if extremes_moved => Self::DirtyExtremes,
            Self::DirtyPartial(mut added) => {
                added.remove(&c);
                if added.is_empty() {
                    Self::Clean
                } else {
                    Self::DirtyPartial(added)
                }
            }
            other => other,
        }
    }
}

/// Which branch [`CharMatcher::initialize_brightness_map`] took.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshPath {
    /// Copied verbatim from the shared cache.
    CacheHit,
    /// Extremes rescanned, every character renormalized.
    Full,
    /// Nothing changed; values re-published only.
    Reuse,
    /// Only freshly added characters normalized against known extremes.
    Partial,
}

/// Associe une luminosité d'image au caractère de luminosité normalisée
/// la plus proche.
///
/// Possède le charset, les luminosités brutes (calculées une seule fois
/// par caractère) et normalisées, et partage un [`BrightnessCache`] adressé
/// par contenu de charset.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use aa_ascii::{BrightnessCache, CharMatcher};
/// use aa_glyph::BuiltinGlyphs;
///
/// let mut matcher = CharMatcher::new(" @".chars(), Arc::new(BuiltinGlyphs::new(16)), BrightnessCache::new());
/// matcher.initialize_brightness_map();
/// assert_eq!(matcher.char_by_image_brightness(1.0).unwrap(), ' ');
/// assert_eq!(matcher.char_by_image_brightness(0.0).unwrap(), '@');
/// ```
pub struct CharMatcher {
    charset: Charset,
    glyphs: Arc<dyn GlyphSource>,
    cache: BrightnessCache,
    raw: HashMap<char, f64>,
    normalized: HashMap<char, f64>,
    min: f64,
    max: f64,
    state: Staleness,
}

impl CharMatcher {
    /// Measure every character, normalize the whole set and publish it to
    /// `cache`.
    pub fn new(
        chars: impl IntoIterator<Item = char>,
        glyphs: Arc<dyn GlyphSource>,
        cache: BrightnessCache,
    ) -> Self {
        let mut matcher = Self {
            charset: Charset::new(),
            glyphs,
            cache,
            raw: HashMap::new(),
            normalized: HashMap::new(),
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            state: Staleness::Clean,
        };
        for c in chars {
            matcher.raw_brightness(c);
            matcher.charset.insert(c);
        }
        matcher.renormalize_all();
        matcher.publish();
        matcher
    }

    /// Current charset, ascending code order.
    #[must_use]
    pub fn charset(&self) -> &Charset {
        &self.charset
    }

    /// Pending recomputation.
    #[must_use]
    pub fn staleness(&self) -> &Staleness {
        &self.state
    }

    /// Raw brightness of a character already measured by this matcher.
    #[must_use]
    pub fn raw_brightness_of(&self, c: char) -> Option<f64> {
        self.raw.get(&c).copied()
    }

    /// Normalized brightness of a charset member, as of the last refresh.
    #[must_use]
    pub fn normalized_brightness(&self, c: char) -> Option<f64> {
        self.normalized.get(&c).copied()
    }

    /// Ajoute `c`. Sans effet s'il est déjà présent.
    ///
    /// Un nouvel extrême invalide toute la normalisation ; sinon seul `c`
    /// sera normalisé au prochain rafraîchissement.
    pub fn add_char(&mut self, c: char) {
        if self.charset.contains(c) {
            return;
        }
        let brightness = self.raw_brightness(c);
        self.charset.insert(c);

        let mut extremes_moved = false;
        if brightness < self.min {
            self.min = brightness;
            extremes_moved = true;
        }
        if brightness > self.max {
            self.max = brightness;
            extremes_moved = true;
        }
        self.state = std::mem::take(&mut self.state).after_add(c, extremes_moved);
    }

    /// Retire `c`. Sans effet s'il est absent.
    ///
    /// Retirer un extrême remet la borne à sa sentinelle : la vraie borne
    /// n'est retrouvée qu'au prochain rescan complet.
    #[allow(clippy::float_cmp)]
    pub fn remove_char(&mut self, c: char) {
        if !self.charset.remove(c) {
            return;
        }
        let brightness = self.raw_brightness(c);

        // Égalité exacte : les valeurs brutes viennent du même cache.
        let mut extremes_moved = false;
        if brightness == self.min {
            self.min = f64::INFINITY;
            extremes_moved = true;
        }
        if brightness == self.max {
            self.max = f64::NEG_INFINITY;
            extremes_moved = true;
        }
        self.normalized.remove(&c);
        self.state = std::mem::take(&mut self.state).after_remove(c, extremes_moved);
    }

    /// Resolve normalized brightness for the whole charset before a render
    /// pass, and publish it to the shared cache.
    ///
    /// Priority: exact content match in the cache, then full
    /// renormalization if an extreme moved, then plain reuse if nothing
    /// changed, then normalization of only the freshly added characters.
    pub fn initialize_brightness_map(&mut self) -> RefreshPath {
        let key = self.charset.key();
        if let Some(values) = self.cache.get(&key)
            && values.len() == self.charset.len()
        {
            self.normalized = self.charset.iter().zip(values.iter().copied()).collect();
            self.resync_extremes();
            self.state = Staleness::Clean;
            log::debug!("Normalisation : cache partagé pour {:?}", key.as_str());
            return RefreshPath::CacheHit;
        }

        let path = match std::mem::take(&mut self.state) {
            Staleness::DirtyExtremes => {
                self.renormalize_all();
                RefreshPath::Full
            }
            Staleness::Clean => RefreshPath::Reuse,
            Staleness::DirtyPartial(_) if !self.extremes_known() => {
                self.renormalize_all();
                RefreshPath::Full
            }
            Staleness::DirtyPartial(added) => {
                for c in added {
                    if let Some(&raw) = self.raw.get(&c) {
                        self.normalized.insert(c, self.normalize(raw));
                    }
                }
                RefreshPath::Partial
            }
        };
        self.publish();
        log::debug!("Normalisation {path:?} pour {} caractères", self.charset.len());
        path
    }

    /// Caractère dont la luminosité normalisée est la plus proche de
    /// `brightness`. Égalité : le plus petit code l'emporte.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyCharset`] if no character is available.
    pub fn char_by_image_brightness(&self, brightness: f64) -> Result<char, CoreError> {
        let mut best: Option<(char, f64)> = None;
        // Parcours par code croissant + comparaison stricte = départage.
        for c in self.charset.iter() {
            let diff = (self.normalized_value(c) - brightness).abs();
            if best.is_none_or(|(_, best_diff)| diff < best_diff) {
                best = Some((c, diff));
            }
        }
        best.map(|(c, _)| c).ok_or(CoreError::EmptyCharset)
    }

    fn raw_brightness(&mut self, c: char) -> f64 {
        *self
            .raw
            .entry(c)
            .or_insert_with(|| self.glyphs.brightness(c).clamp(0.0, 1.0))
    }

    fn extremes_known(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    fn normalize(&self, raw: f64) -> f64 {
        let span = self.max - self.min;
        if span.is_finite() && span > 0.0 {
            ((raw - self.min) / span).clamp(0.0, 1.0)
        } else {
            DEGENERATE_BRIGHTNESS
        }
    }

    fn normalized_value(&self, c: char) -> f64 {
        match self.normalized.get(&c) {
            Some(&v) => v,
            None => self
                .raw
                .get(&c)
                .map_or(DEGENERATE_BRIGHTNESS, |&raw| self.normalize(raw)),
        }
    }

    fn resync_extremes(&mut self) {
        let (min, max) = self
            .charset
            .iter()
            .filter_map(|c| self.raw.get(&c).copied())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), b| {
                (lo.min(b), hi.max(b))
            });
        self.min = min;
        self.max = max;
    }

    fn renormalize_all(&mut self) {
        self.resync_extremes();
        let values: Vec<(char, f64)> = self
            .charset
            .iter()
            .filter_map(|c| self.raw.get(&c).map(|&raw| (c, self.normalize(raw))))
            .collect();
        self.normalized = values.into_iter().collect();
    }

    fn publish(&self) {
        let values = self.charset.iter().map(|c| self.normalized_value(c)).collect();
        self.cache.insert(self.charset.key(), values);
    }
}
