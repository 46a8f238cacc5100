use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// One stored question/answer pair, as written by the dataset translator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub user: String,
    pub assistant: String,
}

/// In-memory FAQ datasets, one entry list per language, loaded once at
/// startup. Entries keep file order; the matcher relies on it for
/// tie-breaking.
#[derive(Debug)]
pub struct FaqStore {
    by_lang: HashMap<String, Vec<FaqEntry>>,
    default_lang: String,
}

impl Default for FaqStore {
    fn default() -> Self {
        Self {
            by_lang: HashMap::new(),
            default_lang: "en".into(),
        }
    }
}

impl FaqStore {
    pub fn new(by_lang: HashMap<String, Vec<FaqEntry>>, default_lang: &str) -> Self {
        Self {
            by_lang,
            default_lang: default_lang.to_string(),
        }
    }

    /// Load every `<lang>.jsonl` file under `dir`. Malformed lines are
    /// skipped with a warning; a missing directory yields an empty store so
    /// the chatbot degrades to the no-answer sentinel instead of failing
    /// startup.
    pub fn load(dir: &Path, default_lang: &str) -> Self {
        let mut by_lang = HashMap::new();

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "FAQ data directory not readable; chatbot will have no answers");
                return Self::new(by_lang, default_lang);
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("jsonl") {
                continue;
            }
            let Some(lang) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match load_file(&path) {
                Ok(list) => {
                    info!(lang, count = list.len(), file = %path.display(), "loaded FAQ dataset");
                    by_lang.insert(lang.to_lowercase(), list);
                }
                Err(e) => {
                    warn!(lang, error = %e, "failed to read FAQ dataset");
                }
            }
        }

        Self::new(by_lang, default_lang)
    }

    /// Entry list for `lang`, falling back to the default language for
    /// unknown codes, then to an empty list.
    pub fn entries(&self, lang: &str) -> &[FaqEntry] {
        let lang = lang.trim().to_lowercase();
        self.by_lang
            .get(&lang)
            .or_else(|| self.by_lang.get(&self.default_lang))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

}

fn load_file(path: &Path) -> anyhow::Result<Vec<FaqEntry>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut list = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<FaqEntry>(&line) {
            Ok(entry) => list.push(entry),
            Err(e) => {
                warn!(file = %path.display(), line = i + 1, error = %e, "skipping malformed FAQ line");
            }
        }
    }
    Ok(list)
}
