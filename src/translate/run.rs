use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use tracing::{error, info, warn};

use crate::translate::client::Translator;
use crate::translate::jsonl::{self, QaRecord};

pub struct RunConfig {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    pub languages: Vec<String>,
    /// Pause between input lines, so the remote service is not hammered.
    pub delay: Duration,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lines_read: usize,
    pub lines_written: usize,
    pub lines_skipped: usize,
}

/// Translate the input dataset into one output file per target language.
///
/// Strictly sequential: one line, one language, one request at a time. A
/// malformed input line is skipped with a warning; a translation failure
/// ends the run after flushing whatever was already written. There are no
/// retries.
pub async fn run<T: Translator>(translator: &T, cfg: &RunConfig) -> anyhow::Result<RunSummary> {
    let meta = std::fs::metadata(&cfg.input)
        .with_context(|| format!("input file not found: {}", cfg.input.display()))?;
    if meta.len() == 0 {
        bail!("input file is empty: {}", cfg.input.display());
    }

    std::fs::create_dir_all(&cfg.out_dir)
        .with_context(|| format!("cannot create output directory {}", cfg.out_dir.display()))?;

    let input = File::open(&cfg.input)
        .with_context(|| format!("cannot open {}", cfg.input.display()))?;
    let reader = BufReader::new(input);

    let mut writers = Vec::with_capacity(cfg.languages.len());
    for lang in &cfg.languages {
        let path = cfg.out_dir.join(format!("{lang}.jsonl"));
        let file = File::create(&path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        writers.push((lang.as_str(), BufWriter::new(file)));
    }

    info!(input = %cfg.input.display(), languages = ?cfg.languages, "starting translation run");

    let mut summary = RunSummary::default();
    let result = process(translator, cfg, reader, &mut writers, &mut summary).await;

    for (lang, writer) in &mut writers {
        let lang = *lang;
        if let Err(e) = writer.flush() {
            warn!(lang, error = %e, "failed to flush output file");
        }
    }

    info!(
        lines_read = summary.lines_read,
        lines_written = summary.lines_written,
        lines_skipped = summary.lines_skipped,
        "translation run finished"
    );
    result.map(|_| summary)
}

async fn process<T: Translator>(
    translator: &T,
    cfg: &RunConfig,
    reader: BufReader<File>,
    writers: &mut [(&str, BufWriter<File>)],
    summary: &mut RunSummary,
) -> anyhow::Result<()> {
    for (idx, line) in reader.lines().enumerate() {
        let line = line.context("failed to read input line")?;
        summary.lines_read += 1;

        let record = match jsonl::parse_line(&line) {
            Ok(record) => record,
            Err(e) => {
                warn!(line = idx + 1, error = %e, "skipping malformed JSON line");
                summary.lines_skipped += 1;
                continue;
            }
        };

        for (lang, writer) in writers.iter_mut() {
            let lang = *lang;
            let translated = match translate_record(translator, &record, lang).await {
                Ok(t) => t,
                Err(e) => {
                    error!(line = idx + 1, lang, error = %e, "translation failed; aborting run");
                    return Err(e.into());
                }
            };
            jsonl::write_line(writer, &translated)?;
        }

        summary.lines_written += 1;
        info!(line = idx + 1, "processed line");
        if !cfg.delay.is_zero() {
            tokio::time::sleep(cfg.delay).await;
        }
    }
    Ok(())
}

async fn translate_record<T: Translator>(
    translator: &T,
    record: &QaRecord,
    target: &str,
) -> Result<QaRecord, crate::translate::client::TranslateError> {
    let mut out = record.clone();
    if let Some(user) = record.user.as_deref().filter(|s| !s.is_empty()) {
        out.user = Some(translator.translate(user, target).await?);
    }
    if let Some(assistant) = record.assistant.as_deref().filter(|s| !s.is_empty()) {
        out.assistant = Some(translator.translate(assistant, target).await?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::client::TranslateError;
    use std::io::Write as _;

    /// Deterministic stand-in for the HTTP client.
    struct TagTranslator;

    impl Translator for TagTranslator {
        async fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError> {
            Ok(format!("[{target}] {text}"))
        }
    }

    /// Always fails, to exercise the abort path.
    struct FailingTranslator;

    impl Translator for FailingTranslator {
        async fn translate(&self, _text: &str, _target: &str) -> Result<String, TranslateError> {
            Err(TranslateError::Api {
                code: 500,
                message: "backend down".into(),
            })
        }
    }

    fn write_input(dir: &std::path::Path, lines: &[&str]) -> PathBuf {
        let path = dir.join("en.jsonl");
        let mut f = File::create(&path).unwrap();
        for line in lines {
            writeln!(f, "{line}").unwrap();
        }
        path
    }

    fn config(input: PathBuf, out_dir: PathBuf, languages: &[&str]) -> RunConfig {
        RunConfig {
            input,
            out_dir,
            languages: languages.iter().map(|s| s.to_string()).collect(),
            delay: Duration::ZERO,
        }
    }

    fn read_lines(path: &std::path::Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[tokio::test]
    async fn translates_every_line_into_every_language() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(
            dir.path(),
            &[
                r#"{"user":"what is a cv","assistant":"a resume","topic":"basics"}"#,
                r#"{"user":"how to interview","assistant":"practice"}"#,
            ],
        );
        let out_dir = dir.path().join("out");
        let cfg = config(input, out_dir.clone(), &["hi", "ta"]);

        let summary = run(&TagTranslator, &cfg).await.unwrap();
        assert_eq!(
            summary,
            RunSummary {
                lines_read: 2,
                lines_written: 2,
                lines_skipped: 0
            }
        );

        for lang in ["hi", "ta"] {
            let lines = read_lines(&out_dir.join(format!("{lang}.jsonl")));
            assert_eq!(lines.len(), 2);
            let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
            assert_eq!(first["user"], format!("[{lang}] what is a cv"));
            assert_eq!(first["assistant"], format!("[{lang}] a resume"));
            // passthrough field survives
            assert_eq!(first["topic"], "basics");
        }
    }

    #[tokio::test]
    async fn malformed_lines_are_skipped_and_counted() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(
            dir.path(),
            &[
                r#"{"user":"q1","assistant":"a1"}"#,
                "{broken",
                r#"{"user":"q2","assistant":"a2"}"#,
            ],
        );
        let out_dir = dir.path().join("out");
        let cfg = config(input, out_dir.clone(), &["hi"]);

        let summary = run(&TagTranslator, &cfg).await.unwrap();
        assert_eq!(summary.lines_read, 3);
        assert_eq!(summary.lines_written, 2);
        assert_eq!(summary.lines_skipped, 1);
        assert_eq!(read_lines(&out_dir.join("hi.jsonl")).len(), 2);
    }

    #[tokio::test]
    async fn empty_fields_are_not_translated() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), &[r#"{"user":"q","assistant":""}"#]);
        let out_dir = dir.path().join("out");
        let cfg = config(input, out_dir.clone(), &["bn"]);

        run(&TagTranslator, &cfg).await.unwrap();
        let lines = read_lines(&out_dir.join("bn.jsonl"));
        let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(value["user"], "[bn] q");
        assert_eq!(value["assistant"], "");
    }

    #[tokio::test]
    async fn missing_input_aborts_before_creating_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("out");
        let cfg = config(dir.path().join("nope.jsonl"), out_dir.clone(), &["hi"]);

        assert!(run(&TagTranslator, &cfg).await.is_err());
        assert!(!out_dir.exists());
    }

    #[tokio::test]
    async fn empty_input_aborts_before_creating_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("en.jsonl");
        File::create(&input).unwrap();
        let out_dir = dir.path().join("out");
        let cfg = config(input, out_dir.clone(), &["hi"]);

        assert!(run(&TagTranslator, &cfg).await.is_err());
        assert!(!out_dir.exists());
    }

    #[tokio::test]
    async fn translation_failure_ends_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(
            dir.path(),
            &[
                r#"{"user":"q1","assistant":"a1"}"#,
                r#"{"user":"q2","assistant":"a2"}"#,
            ],
        );
        let out_dir = dir.path().join("out");
        let cfg = config(input, out_dir.clone(), &["hi"]);

        let err = run(&FailingTranslator, &cfg).await.unwrap_err();
        assert!(err.to_string().contains("backend down"));
        // output file exists but holds nothing useful
        assert!(out_dir.join("hi.jsonl").exists());
    }
}
