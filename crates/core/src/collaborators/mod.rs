pub mod dictionary;
pub mod rasa;
pub mod rephraser;
pub mod translator;

#[cfg(test)]
pub(crate) mod canned;

pub use dictionary::FreeDictionaryLookup;
pub use rasa::RasaRestAgent;
pub use rephraser::SynonymRephraser;
pub use translator::MyMemoryTranslator;
