//! Rule-based English lemmatizer.
//!
//! Irregular forms are resolved through per-category exception tables.
//! Everything else goes through suffix detachment rules chosen by the word
//! category and, when the tag carries one, its inflection (`NNS` only strips
//! plural endings, `VBD` only past endings, and so on). A detached stem is
//! repaired by undoubling a final consonant (`stopped` → `stop`) or restoring
//! a silent `e` (`decided` → `decide`).
//!
//! Reduction repeats until no rule applies, so a lemma is always a fixed
//! point of the lemmatizer.
//!
//! With a [`Lexicon`] the lemmatizer runs in dictionary-validated mode: a
//! derived candidate is accepted only if the lexicon knows it, and a word
//! whose candidates are all unknown falls back to its surface form.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use ahash::AHashSet;

use crate::analysis::lemma::{Inflection, LemmaOutcome, Lemmatizer, PosTag, WordCategory};

/// Upper bound on reduction steps for one word.
const MAX_STEPS: usize = 16;

static VERB_EXCEPTIONS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("am", "be"),
        ("is", "be"),
        ("are", "be"),
        ("was", "be"),
        ("were", "be"),
        ("been", "be"),
        ("being", "be"),
        ("has", "have"),
        ("had", "have"),
        ("having", "have"),
        ("does", "do"),
        ("did", "do"),
        ("done", "do"),
        ("doing", "do"),
        ("goes", "go"),
        ("went", "go"),
        ("gone", "go"),
        ("going", "go"),
        ("made", "make"),
        ("making", "make"),
        ("said", "say"),
        ("agreed", "agree"),
        ("created", "create"),
        ("creating", "create"),
        ("took", "take"),
        ("taken", "take"),
        ("gave", "give"),
        ("given", "give"),
        ("came", "come"),
        ("coming", "come"),
        ("knew", "know"),
        ("known", "know"),
        ("thought", "think"),
        ("found", "find"),
        ("brought", "bring"),
        ("led", "lead"),
        ("met", "meet"),
        ("fled", "flee"),
        ("held", "hold"),
        ("kept", "keep"),
        ("left", "leave"),
        ("lost", "lose"),
        ("meant", "mean"),
        ("paid", "pay"),
        ("saw", "see"),
        ("seen", "see"),
        ("seeing", "see"),
        ("sent", "send"),
        ("spoke", "speak"),
        ("spoken", "speak"),
        ("stood", "stand"),
        ("told", "tell"),
        ("understood", "understand"),
        ("wrote", "write"),
        ("written", "write"),
        ("became", "become"),
        ("began", "begin"),
        ("begun", "begin"),
        ("chose", "choose"),
        ("chosen", "choose"),
        ("fell", "fall"),
        ("fallen", "fall"),
        ("felt", "feel"),
        ("got", "get"),
        ("gotten", "get"),
        ("grew", "grow"),
        ("grown", "grow"),
        ("laid", "lay"),
        ("rose", "rise"),
        ("risen", "rise"),
        ("ran", "run"),
        ("sought", "seek"),
        ("bought", "buy"),
        ("taught", "teach"),
        ("lying", "lie"),
        ("dying", "die"),
        ("tying", "tie"),
    ]
    .into_iter()
    .collect()
});

static NOUN_EXCEPTIONS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("men", "man"),
        ("women", "woman"),
        ("children", "child"),
        ("lives", "life"),
        ("wives", "wife"),
        ("knives", "knife"),
        ("halves", "half"),
        ("selves", "self"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("mice", "mouse"),
        ("geese", "goose"),
        ("oxen", "ox"),
        ("criteria", "criterion"),
        ("phenomena", "phenomenon"),
        ("analyses", "analysis"),
        ("crises", "crisis"),
        ("means", "means"),
        ("news", "news"),
        ("series", "series"),
        ("species", "species"),
        ("politics", "politics"),
    ]
    .into_iter()
    .collect()
});

static ADJECTIVE_EXCEPTIONS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("better", "good"),
        ("best", "good"),
        ("worse", "bad"),
        ("worst", "bad"),
        ("less", "little"),
        ("least", "little"),
        ("further", "far"),
        ("farther", "far"),
        ("furthest", "far"),
        ("farthest", "far"),
        ("elder", "old"),
        ("eldest", "old"),
    ]
    .into_iter()
    .collect()
});

static ADVERB_EXCEPTIONS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("better", "well"),
        ("best", "well"),
        ("further", "far"),
        ("farther", "far"),
        ("less", "little"),
        ("least", "little"),
    ]
    .into_iter()
    .collect()
});

/// A set of known words used to validate lemma candidates.
#[derive(Clone, Debug, Default)]
pub struct Lexicon {
    words: AHashSet<String>,
}

impl Lexicon {
    /// Create an empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a lexicon from a list of words. Words are lowercased.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        words.into_iter().collect()
    }

    /// Add a word.
    pub fn insert<S: AsRef<str>>(&mut self, word: S) {
        self.words.insert(word.as_ref().to_lowercase());
    }

    /// Check whether the lexicon contains a word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the lexicon is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Lexicon {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut lexicon = Lexicon::new();
        for word in iter {
            lexicon.insert(word);
        }
        lexicon
    }
}

/// Rule-based lemmatizer with optional dictionary validation.
#[derive(Clone, Debug, Default)]
pub struct RuleLemmatizer {
    lexicon: Option<Arc<Lexicon>>,
}

/// One reduction chain: successive candidates, and whether the last one
/// came from an exception table.
struct Reduction {
    candidates: Vec<String>,
    irregular: bool,
}

impl RuleLemmatizer {
    /// Create a lemmatizer without a lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a lemmatizer that validates candidates against `lexicon`.
    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        RuleLemmatizer {
            lexicon: Some(Arc::new(lexicon)),
        }
    }

    /// The lexicon, if running in dictionary-validated mode.
    pub fn lexicon(&self) -> Option<&Lexicon> {
        self.lexicon.as_deref()
    }

    fn reduce(word: &str, category: WordCategory, inflection: Inflection) -> Reduction {
        let exceptions = exceptions_for(category);
        let mut candidates: Vec<String> = Vec::new();
        let mut current = word.to_string();

        for _ in 0..MAX_STEPS {
            if let Some(&target) = exceptions.and_then(|table| table.get(current.as_str())) {
                if target != current {
                    candidates.push(target.to_string());
                }
                return Reduction {
                    candidates,
                    irregular: true,
                };
            }

            match step(&current, category, inflection) {
                Some(next) if next != current => {
                    candidates.push(next.clone());
                    current = next;
                }
                _ => break,
            }
        }

        Reduction {
            candidates,
            irregular: false,
        }
    }
}

impl Lemmatizer for RuleLemmatizer {
    fn lemmatize(&self, word: &str, tag: &PosTag) -> LemmaOutcome {
        let lowered = word.to_lowercase();
        if lowered.is_empty() || !lowered.bytes().all(|b| b.is_ascii_alphabetic()) {
            return LemmaOutcome::Fallback(lowered);
        }

        let category = tag.category();
        if category == WordCategory::Other {
            return LemmaOutcome::Fallback(lowered);
        }

        let reduction = Self::reduce(&lowered, category, tag.inflection());
        let Some(last) = reduction.candidates.last() else {
            return LemmaOutcome::Found(lowered);
        };

        match &self.lexicon {
            None => LemmaOutcome::Found(last.clone()),
            Some(_) if reduction.irregular => LemmaOutcome::Found(last.clone()),
            Some(lexicon) => reduction
                .candidates
                .iter()
                .rev()
                .find(|candidate| lexicon.contains(candidate))
                .map(|candidate| LemmaOutcome::Found(candidate.clone()))
                .unwrap_or(LemmaOutcome::Fallback(lowered)),
        }
    }

    fn name(&self) -> &'static str {
        "rule"
    }
}

fn exceptions_for(category: WordCategory) -> Option<&'static HashMap<&'static str, &'static str>> {
    match category {
        WordCategory::Verb => Some(&VERB_EXCEPTIONS),
        WordCategory::Noun => Some(&NOUN_EXCEPTIONS),
        WordCategory::Adjective => Some(&ADJECTIVE_EXCEPTIONS),
        WordCategory::Adverb => Some(&ADVERB_EXCEPTIONS),
        WordCategory::Other => None,
    }
}

/// Whether rules for `wanted` may run under the tag's inflection.
fn allows(inflection: Inflection, wanted: Inflection) -> bool {
    inflection == wanted || inflection == Inflection::Unspecified
}

/// Apply the first matching suffix rule, if any.
fn step(word: &str, category: WordCategory, inflection: Inflection) -> Option<String> {
    match category {
        WordCategory::Noun if allows(inflection, Inflection::Plural) => strip_plural(word, true),
        WordCategory::Verb => {
            let third = allows(inflection, Inflection::ThirdPerson)
                .then(|| strip_plural(word, false))
                .flatten();
            let past = || {
                allows(inflection, Inflection::Past)
                    .then(|| strip_past(word))
                    .flatten()
            };
            let gerund = || {
                allows(inflection, Inflection::Gerund)
                    .then(|| strip_gerund(word))
                    .flatten()
            };
            third.or_else(past).or_else(gerund)
        }
        WordCategory::Adjective => strip_comparison(word, inflection),
        // Adverbs only reduce under an explicit comparative or superlative tag.
        WordCategory::Adverb if inflection != Inflection::Unspecified => {
            strip_comparison(word, inflection)
        }
        _ => None,
    }
}

fn strip_plural(word: &str, noun: bool) -> Option<String> {
    let len = word.len();
    if let Some(stem) = word.strip_suffix("sses") {
        return Some(format!("{stem}ss"));
    }
    if len > 4 {
        if let Some(stem) = word.strip_suffix("ies") {
            return Some(format!("{stem}y"));
        }
    }
    if noun && len > 5 {
        if let Some(stem) = word.strip_suffix("oes") {
            return Some(format!("{stem}o"));
        }
    }
    for suffix in ["xes", "ches", "shes", "zzes"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            return Some(format!("{stem}{}", &suffix[..suffix.len() - 2]));
        }
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return None;
    }
    word.strip_suffix('s')
        .filter(|stem| stem.len() >= 3)
        .map(str::to_string)
}

fn strip_past(word: &str) -> Option<String> {
    if word.len() > 4 {
        if let Some(stem) = word.strip_suffix("ied") {
            return Some(format!("{stem}y"));
        }
    }
    if word.ends_with("eed") {
        return None;
    }
    word.strip_suffix("ed")
        .filter(|stem| stem.len() >= 2 && has_vowel(stem))
        .map(repair_stem)
}

fn strip_gerund(word: &str) -> Option<String> {
    word.strip_suffix("ing")
        .filter(|stem| stem.len() >= 2 && has_vowel(stem))
        .map(repair_stem)
}

fn strip_comparison(word: &str, inflection: Inflection) -> Option<String> {
    let len = word.len();
    if allows(inflection, Inflection::Superlative) && len > 5 {
        if let Some(stem) = word.strip_suffix("iest") {
            return Some(format!("{stem}y"));
        }
        if let Some(stem) = word.strip_suffix("est") {
            return Some(repair_stem(stem));
        }
    }
    if allows(inflection, Inflection::Comparative) && len > 4 {
        if let Some(stem) = word.strip_suffix("ier") {
            return Some(format!("{stem}y"));
        }
        if let Some(stem) = word.strip_suffix("er") {
            return Some(repair_stem(stem));
        }
    }
    None
}

/// Undouble a final consonant or restore a silent `e`.
fn repair_stem(stem: &str) -> String {
    let b = stem.as_bytes();
    let n = b.len();
    if n > 3 && b[n - 1] == b[n - 2] && !is_vowel(b[n - 1]) && !matches!(b[n - 1], b'l' | b's' | b'z')
    {
        return stem[..n - 1].to_string();
    }
    if needs_final_e(stem) {
        return format!("{stem}e");
    }
    stem.to_string()
}

fn needs_final_e(stem: &str) -> bool {
    let b = stem.as_bytes();
    let n = b.len();
    if n < 2 {
        return false;
    }
    let last = b[n - 1];
    let prev = b[n - 2];

    match last {
        b'c' | b'v' | b'z' | b'i' | b'u' => true,
        b's' => prev != b's',
        b'g' => {
            is_vowel(prev)
                || matches!(prev, b'r' | b'd')
                || (n > 4 && (stem.ends_with("ang") || stem.ends_with("eng")))
        }
        b't' => open_syllable(b, b"auo"),
        b'r' => open_syllable(b, b"aiu"),
        b'l' => {
            matches!(prev, b'b' | b'p' | b'g' | b't' | b'k' | b'd' | b'c' | b'z')
                || open_syllable(b, b"aiou")
        }
        b'd' | b'm' | b'k' | b'b' => open_syllable(b, b"aiou"),
        b'n' | b'p' => open_syllable(b, b"aiu"),
        _ => false,
    }
}

/// A final consonant after a single listed vowel, itself after a consonant.
fn open_syllable(b: &[u8], vowels: &[u8]) -> bool {
    let n = b.len();
    n >= 3 && vowels.contains(&b[n - 2]) && consonant_at(b, n - 3)
}

fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u')
}

/// A consonant position, counting the `u` of `qu` as a consonant.
fn consonant_at(b: &[u8], i: usize) -> bool {
    !is_vowel(b[i]) || (b[i] == b'u' && i > 0 && b[i - 1] == b'q')
}

fn has_vowel(stem: &str) -> bool {
    stem.bytes().any(|b| is_vowel(b) || b == b'y')
}
