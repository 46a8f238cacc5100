use std::io::Write;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One dataset line. `user` and `assistant` get translated; every other
/// field passes through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assistant: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub fn parse_line(line: &str) -> serde_json::Result<QaRecord> {
    serde_json::from_str(line)
}

/// Serialize one record per line. `serde_json` writes non-ASCII characters
/// literally, which is what the FAQ loader expects.
pub fn write_line<W: Write>(w: &mut W, record: &QaRecord) -> anyhow::Result<()> {
    let json = serde_json::to_string(record)?;
    writeln!(w, "{json}")?;
    Ok(())
}
