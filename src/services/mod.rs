pub mod answer_resolver;
pub mod corpus_store;
pub mod extractor;
pub mod inference;
pub mod prompt_composer;

pub use answer_resolver::{AnswerResolver, Outcome};
pub use corpus_store::CorpusStore;
pub use extractor::extract;
pub use inference::{InferenceClient, ServiceHealth, TextGenerator};
pub use prompt_composer::compose;
