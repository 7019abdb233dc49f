//! Part-of-speech tagging.
//!
//! [`PosTagger`] is the seam for plugging in a real tagger. The default
//! [`SuffixTagger`] is a context-free heuristic: closed-class word lists
//! first, then English suffix patterns, emitting Penn Treebank tags. It is
//! good enough to route plurals, past forms and gerunds to the right
//! lemmatization rules.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::analysis::lemma::PosTag;

/// Trait for part-of-speech taggers.
pub trait PosTagger: Send + Sync {
    /// Tag a single word.
    fn tag(&self, word: &str) -> PosTag;

    /// Tag a tokenized line. Contextual taggers override this.
    fn tag_line(&self, words: &[&str]) -> Vec<PosTag> {
        words.iter().map(|word| self.tag(word)).collect()
    }

    /// Get the name of this tagger.
    fn name(&self) -> &'static str;
}

static CLOSED_CLASS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut tags = HashMap::new();
    let groups: [(&str, &[&str]); 12] = [
        ("MD", &["shall", "will", "would", "should", "must", "may", "might", "can", "could", "ought"]),
        ("VBZ", &["is", "has", "does", "goes"]),
        ("VBP", &["am", "are", "have", "do"]),
        ("VB", &["be"]),
        ("VBN", &["been", "done", "gone", "known", "given", "taken", "seen", "chosen", "written"]),
        ("VBD", &[
            "was", "were", "had", "did", "made", "said", "went", "came", "took", "gave",
            "knew", "thought", "found", "brought", "held", "kept", "left", "lost", "paid",
            "saw", "sent", "stood", "told", "wrote", "became", "began", "fell", "felt",
            "grew", "rose", "sought", "meant", "led", "met",
        ]),
        ("VBG", &["being", "having", "doing"]),
        ("IN", &[
            "upon", "within", "without", "among", "amongst", "whilst", "whether", "though",
            "although", "unless", "towards", "toward", "beyond", "throughout", "since",
            "across", "despite", "except",
        ]),
        ("CC", &["yet", "either", "neither"]),
        ("DT", &["every", "another", "whatever", "whichever"]),
        ("RB", &[
            "also", "however", "thus", "therefore", "hence", "never", "ever", "perhaps",
            "indeed", "always", "often", "already", "still", "almost", "even", "rather",
            "quite", "merely", "wherever", "whenever", "far", "well",
        ]),
        ("NN", &[
            "thing", "nothing", "something", "anything", "everything", "morning", "evening",
            "king", "spring", "string", "ring", "wing", "ceiling", "building", "meaning",
            "feeling", "bed", "need", "deed", "seed", "creed", "speed", "hundred", "kindred",
            "sacred", "sense", "purpose", "case", "course", "cause", "house", "nature",
        ]),
    ];
    for (tag, words) in groups {
        for &word in words {
            tags.entry(word).or_insert(tag);
        }
    }
    tags
});

/// Comparatives that plain suffix matching would mistake for nouns.
const COMPARATIVES: &[&str] = &[
    "greater", "larger", "smaller", "higher", "lower", "stronger", "weaker", "better",
    "worse", "fewer", "wiser", "safer", "easier", "earlier", "later", "longer", "nearer",
];

const SUPERLATIVES: &[&str] = &[
    "greatest", "largest", "smallest", "highest", "lowest", "strongest", "weakest", "best",
    "worst", "fewest", "wisest", "safest", "easiest", "earliest", "latest", "longest",
];

/// Words ending in `ly` that are not adverbs.
const LY_NON_ADVERBS: &[&str] = &[
    "apply", "supply", "reply", "family", "ally", "rely", "comply", "multiply", "imply",
    "assembly", "monopoly", "italy", "july", "anomaly",
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "ical", "ic", "less", "ish", "ary", "al",
];

/// Heuristic tagger based on word lists and suffixes.
#[derive(Clone, Debug, Default)]
pub struct SuffixTagger;

impl SuffixTagger {
    /// Create a new suffix tagger.
    pub fn new() -> Self {
        SuffixTagger
    }

    fn tag_lowercase(word: &str) -> &'static str {
        if let Some(&tag) = CLOSED_CLASS.get(word) {
            return tag;
        }
        if COMPARATIVES.contains(&word) {
            return "JJR";
        }
        if SUPERLATIVES.contains(&word) {
            return "JJS";
        }
        if word.bytes().any(|b| !b.is_ascii_alphabetic()) {
            return if word.bytes().all(|b| b.is_ascii_digit()) { "CD" } else { "SYM" };
        }

        let len = word.len();
        if word.ends_with("ly") && !LY_NON_ADVERBS.contains(&word) && len > 3 {
            return "RB";
        }
        if word.ends_with("ing") && len > 4 {
            return "VBG";
        }
        if word.ends_with("ed") && len > 3 {
            return "VBD";
        }
        if word.ends_with("ize") || word.ends_with("ify") || (word.ends_with("ise") && len > 5) {
            return "VB";
        }
        if word.ends_with('s')
            && !word.ends_with("ss")
            && !word.ends_with("us")
            && !word.ends_with("is")
            && !word.ends_with("ous")
            && len > 3
        {
            return "NNS";
        }
        if len > 4 && ADJECTIVE_SUFFIXES.iter().any(|suffix| word.ends_with(suffix)) {
            return "JJ";
        }
        "NN"
    }
}

impl PosTagger for SuffixTagger {
    fn tag(&self, word: &str) -> PosTag {
        PosTag::new(Self::tag_lowercase(&word.to_lowercase()))
    }

    fn name(&self) -> &'static str {
        "suffix"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::lemma::WordCategory;

    fn tag(word: &str) -> String {
        SuffixTagger::new().tag(word).as_str().to_string()
    }

    #[test]
    fn test_closed_class() {
        assert_eq!(tag("shall"), "MD");
        assert_eq!(tag("was"), "VBD");
        assert_eq!(tag("upon"), "IN");
        assert_eq!(tag("nothing"), "NN");
        assert_eq!(tag("However"), "RB");
    }

    #[test]
    fn test_suffix_heuristics() {
        assert_eq!(tag("states"), "NNS");
        assert_eq!(tag("governing"), "VBG");
        assert_eq!(tag("declared"), "VBD");
        assert_eq!(tag("greater"), "JJR");
        assert_eq!(tag("greatest"), "JJS");
        assert_eq!(tag("certainly"), "RB");
        assert_eq!(tag("supply"), "NN");
        assert_eq!(tag("dangerous"), "JJ");
        assert_eq!(tag("federal"), "JJ");
        assert_eq!(tag("union"), "NN");
        assert_eq!(tag("status"), "NN");
        assert_eq!(tag("organize"), "VB");
        assert_eq!(tag("1787"), "CD");
    }

    #[test]
    fn test_tag_line() {
        let tagger = SuffixTagger::new();
        let tags = tagger.tag_line(&["powers", "delegated", "federal"]);
        let categories: Vec<_> = tags.iter().map(|t| t.category()).collect();
        assert_eq!(
            categories,
            vec![WordCategory::Noun, WordCategory::Verb, WordCategory::Adjective]
        );
    }

    #[test]
    fn test_tagger_name() {
        assert_eq!(SuffixTagger::new().name(), "suffix");
    }
}
