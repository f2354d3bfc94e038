mod language_model;
mod progress;
mod search;

pub use language_model::ILanguageModel;
pub use progress::{CollectingProgressSink, IProgressSink, NoopProgressSink};
pub use search::{ILexicalSearch, IPassageFetcher, IVectorSearch};
