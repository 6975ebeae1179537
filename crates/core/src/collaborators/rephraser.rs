use crate::traits::Rephraser;
use regex::{Captures, Regex};
use std::collections::HashMap;

const WORD_PATTERN: &str = r"[\p{L}']+";

const DEFAULT_THESAURUS: &[(&str, &[&str])] = &[
    ("big", &["large", "huge"]),
    ("small", &["little", "tiny"]),
    ("fast", &["quick", "rapid"]),
    ("slow", &["sluggish", "unhurried"]),
    ("help", &["assist", "aid"]),
    ("explain", &["clarify", "describe"]),
    ("concept", &["notion", "idea"]),
    ("keyword", &["term"]),
    ("document", &["file", "paper"]),
    ("summary", &["synopsis", "abstract"]),
    ("important", &["significant", "crucial"]),
    ("show", &["display", "present"]),
    ("find", &["locate", "discover"]),
    ("use", &["employ", "utilize"]),
    ("make", &["create", "produce"]),
    ("start", &["begin", "commence"]),
    ("end", &["finish", "conclude"]),
    ("good", &["fine", "sound"]),
    ("bad", &["poor", "faulty"]),
    ("answer", &["reply", "response"]),
    ("question", &["query", "inquiry"]),
    ("read", &["peruse", "study"]),
    ("learn", &["study", "master"]),
    ("mistake", &["error", "fault"]),
];

/// Word-for-word synonym substitution.
///
/// Whole words found in the thesaurus are replaced by their first synonym; a
/// capitalized word gets a capitalized synonym. Everything else passes through.
pub struct SynonymRephraser {
    thesaurus: HashMap<String, Vec<String>>,
    words: Regex,
}

impl SynonymRephraser {
    pub fn new(thesaurus: HashMap<String, Vec<String>>) -> Result<Self, regex::Error> {
        let thesaurus = thesaurus
            .into_iter()
            .map(|(word, synonyms)| (word.to_lowercase(), synonyms))
            .filter(|(_, synonyms)| !synonyms.is_empty())
            .collect();

        Ok(Self {
            thesaurus,
            words: Regex::new(WORD_PATTERN)?,
        })
    }

    pub fn with_default_thesaurus() -> Result<Self, regex::Error> {
        Self::new(
            DEFAULT_THESAURUS
                .iter()
                .map(|(word, synonyms)| {
                    (
                        (*word).to_string(),
                        synonyms.iter().map(|synonym| (*synonym).to_string()).collect(),
                    )
                })
                .collect(),
        )
    }

    fn substitute(&self, word: &str) -> String {
        let Some(synonym) = self
            .thesaurus
            .get(&word.to_lowercase())
            .and_then(|synonyms| synonyms.first())
        else {
            return word.to_string();
        };

        if word.chars().next().is_some_and(char::is_uppercase) {
            let mut chars = synonym.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        } else {
            synonym.clone()
        }
    }
}

impl Rephraser for SynonymRephraser {
    fn rephrase(&self, text: &str) -> String {
        self.words
            .replace_all(text, |captures: &Captures<'_>| self.substitute(&captures[0]))
            .into_owned()
    }
}
