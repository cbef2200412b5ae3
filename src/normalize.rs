use std::sync::LazyLock;

use regex::Regex;

static HSPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());
// Digit field followed by a letter field; more than one of these in a short,
// long line means several records were concatenated by the export tool.
static RECORD_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+\s*[A-Za-z]+").unwrap());
static PCT_DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"%(\d)").unwrap());
static UNIT_DIGIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d\s*)(A|V|MPH)(\d)").unwrap());
static FUNC_MARK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(F\.(?:No\.)?\s*\d)").unwrap());

const BLOB_MAX_LINES: usize = 3;
const BLOB_MIN_LEN: usize = 100;

/// Page text reduced to one logical record per non-empty line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    lines: Vec<String>,
}

impl NormalizedText {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn as_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Collapse whitespace and split single-line export blobs into records.
///
/// Pure and idempotent; text without any recognized delimiter passes through
/// unchanged so the cascade can still try whatever structure is there. Never
/// fails.
pub fn normalize(raw: &str) -> NormalizedText {
    let text = raw.replace("\r\n", "\n");
    let text = HSPACE_RE.replace_all(&text, " ");

    // Trim and drop empty lines before the blob check so every pass sees the
    // same view of the text; blank lines must not disguise a flattened table.
    let lines = clean_lines(&text);
    let joined = lines.join("\n");
    let lines = if looks_like_blob(&joined) {
        clean_lines(&split_records(&joined))
    } else {
        lines
    };
    NormalizedText { lines }
}

fn clean_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

/// A handful of very long non-empty lines containing the "Cnts" unit marker
/// and several digit-then-letter field runs: the export tool flattened the
/// whole table.
fn looks_like_blob(text: &str) -> bool {
    text.lines().count() <= BLOB_MAX_LINES
        && text.len() > BLOB_MIN_LEN
        && text.contains("Cnts")
        && RECORD_RUN_RE.find_iter(text).count() > 1
}

/// Insert line breaks at the field terminators the export family is known to
/// use. "Cnts"/"Units"/"%"/unit letters end a record; an "F." function marker
/// starts one, so its break lands before the marker.
fn split_records(text: &str) -> String {
    let text = text.replace("Cnts", "Cnts\n");
    let text = text.replace("Units", "Units\n");
    let text = PCT_DIGIT_RE.replace_all(&text, "%\n${1}");
    let text = UNIT_DIGIT_RE.replace_all(&text, "${1}${2}\n${3}");
    FUNC_MARK_RE.replace_all(&text, "\n${1}").into_owned()
}

// ── Tests ──
