pub mod catalog;

pub use catalog::{
    catalog, default_language, find_language, LanguageProfile, SynthesisBackend, VoiceProvider,
};
