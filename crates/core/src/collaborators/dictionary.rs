use crate::models::Meanings;
use crate::traits::DictionaryLookup;
use crate::LookupError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_DICTIONARY_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// Free Dictionary API client. Entries are folded into a part-of-speech map
/// with capitalized keys, so the noun senses live under `"Noun"`.
pub struct FreeDictionaryLookup {
    endpoint: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default)]
    meanings: Vec<Meaning>,
}

#[derive(Debug, Deserialize)]
struct Meaning {
    #[serde(rename = "partOfSpeech")]
    part_of_speech: String,
    #[serde(default)]
    definitions: Vec<Sense>,
}

#[derive(Debug, Deserialize)]
struct Sense {
    definition: String,
}

impl FreeDictionaryLookup {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
        }
    }

    fn entry_url(&self, term: &str) -> Result<Url, LookupError> {
        let mut url = Url::parse(self.endpoint.trim_end_matches('/'))?;
        url.path_segments_mut()
            .map_err(|_| LookupError::MalformedResponse(format!("endpoint cannot be a base: {}", self.endpoint)))?
            .push(term);
        Ok(url)
    }
}

impl Default for FreeDictionaryLookup {
    fn default() -> Self {
        Self::new(DEFAULT_DICTIONARY_URL)
    }
}

#[async_trait]
impl DictionaryLookup for FreeDictionaryLookup {
    async fn lookup(&self, term: &str) -> Result<Option<Meanings>, LookupError> {
        let response = self.client.get(self.entry_url(term)?).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = response.error_for_status()?;
        let entries: Vec<Entry> = response.json().await.map_err(|error| {
            if error.is_decode() {
                LookupError::MalformedResponse(error.to_string())
            } else {
                LookupError::Http(error)
            }
        })?;
        let meanings = fold_meanings(entries);

        Ok(if meanings.is_empty() { None } else { Some(meanings) })
    }
}

fn fold_meanings(entries: Vec<Entry>) -> Meanings {
    let mut meanings = Meanings::new();

    for meaning in entries.into_iter().flat_map(|entry| entry.meanings) {
        let senses = meanings
            .entry(capitalize(&meaning.part_of_speech))
            .or_default();
        senses.extend(
            meaning
                .definitions
                .into_iter()
                .map(|sense| sense.definition.trim().to_string())
                .filter(|definition| !definition.is_empty()),
        );
    }

    meanings.retain(|_, senses| !senses.is_empty());
    meanings
}

fn capitalize(word: &str) -> String {
    let mut chars = word.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
