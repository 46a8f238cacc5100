pub mod client;
pub mod jsonl;
pub mod run;

pub use client::{HttpTranslator, TranslateError, Translator};
pub use jsonl::QaRecord;
pub use run::{run, RunConfig, RunSummary};
