//! Text codec for encoding and decoding a [`Config`].
//!
//! Format:
//! ```text
//! [<group>]
//! <entry>: <value> -> <tag>
//! ...
//! <blank line>
//! ```
//! Tags are the 3-character names from [`ValueType::tag`].  There is no
//! comment syntax and no escaping, so some names and string values cannot be
//! represented (see [`check_group_name`], [`check_entry_name`] and
//! [`check_string_value`]).  [`encode_config`] refuses them with an
//! [`EncodeError`] instead of writing text that would not load back as the
//! same config.
//!
//! # Delimiters
//!
//! An entry line is split at the **first** `:` (entry names cannot contain
//! one) and at the **last** `->` (tags never contain one).  The value is the
//! whitespace-trimmed text in between, so negative numbers and strings with
//! `-`, `:` or `->` in them survive a round trip.  Every part of a line is
//! trimmed, so leading and trailing whitespace in a name or string value is
//! rejected on encode.

use thiserror::Error;

use crate::domain::{Config, Entry, Group, Value, ValueType};

use super::trace::{CodecTrace, SilentTrace};

/// Separates the entry name from the value.
pub const NAME_DELIMITER: char = ':';

/// Separates the value from the type tag.
pub const TYPE_DELIMITER: &str = "->";

/// Errors that can occur while decoding the text format.
#[derive(Debug, Error, PartialEq)]
pub enum FormatError {
    /// A line could not be split into its parts, or its value did not parse
    /// as the declared type.
    #[error("malformed line {line_number} ({reason}): {line:?}")]
    MalformedLine {
        line_number: usize,
        line: String,
        reason: String,
    },

    /// The type tag after `->` is not one of the known tags.
    #[error("unknown type tag {tag:?} on line {line_number}")]
    UnknownTypeTag { line_number: usize, tag: String },
}

/// Errors that can occur while encoding a config into the text format.
///
/// Each variant names a group, entry or string value that the decoder would
/// reject or read back differently.
#[derive(Debug, Error, PartialEq)]
pub enum EncodeError {
    #[error("group name {group:?} cannot be written: {reason}")]
    GroupName { group: String, reason: &'static str },

    #[error("entry name {entry:?} in group [{group}] cannot be written: {reason}")]
    EntryName {
        group: String,
        entry: String,
        reason: &'static str,
    },

    #[error("string value of [{group}] {entry} cannot be written: {reason}")]
    StringValue {
        group: String,
        entry: String,
        reason: &'static str,
    },
}

impl FormatError {
    /// The 1-based number of the line that failed to decode.
    pub fn line_number(&self) -> usize {
        match self {
            FormatError::MalformedLine { line_number, .. }
            | FormatError::UnknownTypeTag { line_number, .. } => *line_number,
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Encodes every group and entry of `config` into the text format.
///
/// Groups and entries are written in name order; each group is followed by
/// a blank line.
///
/// # Errors
///
/// Returns an [`EncodeError`] for the first group name, entry name or string
/// value that cannot be represented.  Nothing is returned in that case.
///
/// # Examples
///
/// ```rust
/// use scfg_core::format::{encode_config, SilentTrace};
/// use scfg_core::Config;
///
/// let mut config = Config::new();
/// config.add_group("net").add_entry("port", 8080u32);
///
/// let text = encode_config(&config, &SilentTrace).unwrap();
/// assert_eq!(text, "[net]\nport: 8080 -> u32\n\n");
/// ```
pub fn encode_config(config: &Config, trace: &dyn CodecTrace) -> Result<String, EncodeError> {
    let mut buf = String::new();
    for group in config.groups() {
        encode_group(&mut buf, group, trace)?;
    }
    Ok(buf)
}

/// Decodes the text format into a fresh [`Config`].
///
/// Decoding stops at the first bad line; no partially built config is
/// returned.
///
/// # Errors
///
/// Returns [`FormatError::MalformedLine`] for a line that cannot be split or
/// whose value does not parse, and [`FormatError::UnknownTypeTag`] for an
/// unrecognised tag.
///
/// # Examples
///
/// ```rust
/// use scfg_core::format::{decode_config, SilentTrace};
///
/// let config = decode_config("[net]\nport: 8080 -> u32\n", &SilentTrace).unwrap();
/// assert_eq!(config.entry("net", "port").unwrap().get::<u32>(), Ok(8080));
/// ```
pub fn decode_config(text: &str, trace: &dyn CodecTrace) -> Result<Config, FormatError> {
    let mut config = Config::new();
    let mut current_group: Option<String> = None;

    for (index, raw_line) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = decode_group_header(header)
                .map_err(|reason| malformed(line_number, raw_line, reason))?;
            trace.group_decoded(name);
            config.select_group(name);
            current_group = Some(name.to_string());
            continue;
        }

        let Some(group_name) = current_group.as_deref() else {
            trace.line_skipped(line_number, raw_line);
            continue;
        };

        let parts =
            split_entry_line(line).map_err(|reason| malformed(line_number, raw_line, reason))?;
        let value_type =
            ValueType::from_tag(parts.tag).ok_or_else(|| FormatError::UnknownTypeTag {
                line_number,
                tag: parts.tag.to_string(),
            })?;
        let value = Value::parse(value_type, parts.value)
            .map_err(|e| malformed(line_number, raw_line, e.to_string()))?;

        trace.entry_decoded(group_name, parts.name, parts.value, value_type);
        config.select_group(group_name).add_entry(parts.name, value);
    }

    Ok(config)
}

impl Config {
    /// Encodes this config into the text format without tracing.
    ///
    /// # Errors
    ///
    /// See [`encode_config`].
    pub fn to_text(&self) -> Result<String, EncodeError> {
        encode_config(self, &SilentTrace)
    }

    /// Decodes a config from the text format without tracing.
    ///
    /// # Errors
    ///
    /// See [`decode_config`].
    pub fn from_text(text: &str) -> Result<Config, FormatError> {
        decode_config(text, &SilentTrace)
    }
}

// ── Representable names ───────────────────────────────────────────────────────

/// Checks that `name` survives being written as a `[name]` header.
///
/// # Errors
///
/// Returns a short reason when the name is empty, contains a line break, or
/// has leading or trailing whitespace.
pub fn check_group_name(name: &str) -> Result<(), &'static str> {
    check_line_text(name)?;
    if name.is_empty() {
        return Err("name is empty");
    }
    Ok(())
}

/// Checks that `name` survives being written in front of the `:` of an entry
/// line.
///
/// # Errors
///
/// Same as [`check_group_name`], and additionally when the name contains `:`
/// or starts with `[` (which would make the line a group header).
pub fn check_entry_name(name: &str) -> Result<(), &'static str> {
    check_group_name(name)?;
    if name.contains(NAME_DELIMITER) {
        return Err("name contains `:`");
    }
    if name.starts_with('[') {
        return Err("name starts with `[`");
    }
    Ok(())
}

/// Checks that a string value survives being written between `:` and `->`.
///
/// Empty strings are fine.
///
/// # Errors
///
/// Returns a short reason when the value contains a line break or has
/// leading or trailing whitespace.
pub fn check_string_value(value: &str) -> Result<(), &'static str> {
    check_line_text(value)
}

fn check_line_text(text: &str) -> Result<(), &'static str> {
    if text.contains(['\n', '\r']) {
        return Err("contains a line break");
    }
    if text.trim() != text {
        return Err("has leading or trailing whitespace");
    }
    Ok(())
}

// ── Encoding ──────────────────────────────────────────────────────────────────

fn encode_group(
    buf: &mut String,
    group: &Group,
    trace: &dyn CodecTrace,
) -> Result<(), EncodeError> {
    check_group_name(group.name()).map_err(|reason| EncodeError::GroupName {
        group: group.name().to_string(),
        reason,
    })?;

    trace.group_encoded(group.name());
    buf.push('[');
    buf.push_str(group.name());
    buf.push_str("]\n");
    for entry in group.entries() {
        encode_entry(buf, group.name(), entry, trace)?;
    }
    buf.push('\n');
    Ok(())
}

fn encode_entry(
    buf: &mut String,
    group_name: &str,
    entry: &Entry,
    trace: &dyn CodecTrace,
) -> Result<(), EncodeError> {
    check_entry_name(entry.name()).map_err(|reason| EncodeError::EntryName {
        group: group_name.to_string(),
        entry: entry.name().to_string(),
        reason,
    })?;
    if let Some(text) = entry.value().as_str() {
        check_string_value(text).map_err(|reason| EncodeError::StringValue {
            group: group_name.to_string(),
            entry: entry.name().to_string(),
            reason,
        })?;
    }

    let value_type = entry.value_type();
    trace.entry_encoded(group_name, entry.name(), value_type);
    buf.push_str(entry.name());
    buf.push(NAME_DELIMITER);
    buf.push(' ');
    buf.push_str(&entry.value().to_string());
    buf.push(' ');
    buf.push_str(TYPE_DELIMITER);
    buf.push(' ');
    buf.push_str(value_type.tag());
    buf.push('\n');
    Ok(())
}

// ── Decoding ──────────────────────────────────────────────────────────────────

/// The three borrowed parts of an entry line.
#[derive(Debug, PartialEq)]
struct EntryParts<'a> {
    name: &'a str,
    value: &'a str,
    tag: &'a str,
}

/// Extracts the group name from a header line with its leading `[` removed.
fn decode_group_header(header: &str) -> Result<&str, String> {
    let name = header
        .strip_suffix(']')
        .ok_or_else(|| "group header is missing the closing `]`".to_string())?
        .trim();
    if name.is_empty() {
        return Err("group header has an empty name".to_string());
    }
    Ok(name)
}

fn split_entry_line(line: &str) -> Result<EntryParts<'_>, String> {
    let (name, rest) = line
        .split_once(NAME_DELIMITER)
        .ok_or_else(|| format!("missing `{NAME_DELIMITER}` after the entry name"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err("entry name is empty".to_string());
    }

    let (value, tag) = rest
        .rsplit_once(TYPE_DELIMITER)
        .ok_or_else(|| format!("missing `{TYPE_DELIMITER}` before the type tag"))?;
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(format!("missing type tag after `{TYPE_DELIMITER}`"));
    }

    Ok(EntryParts {
        name,
        value: value.trim(),
        tag,
    })
}

fn malformed(line_number: usize, line: &str, reason: String) -> FormatError {
    FormatError::MalformedLine {
        line_number,
        line: line.to_string(),
        reason,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::mock::{RecordingTrace, TraceEvent};

    fn decode(text: &str) -> Result<Config, FormatError> {
        decode_config(text, &SilentTrace)
    }

    // ── Encoding ─────────────────────────────────────────────────────────────

    #[test]
    fn test_encode_writes_header_entries_and_blank_line() {
        // Arrange
        let mut config = Config::new();
        let net = config.add_group("net");
        net.add_entry("port", 8080u32);
        net.add_entry("host", "localhost");

        // Act
        let text = encode_config(&config, &SilentTrace).expect("encode");

        // Assert
        assert_eq!(text, "[net]\nhost: localhost -> str\nport: 8080 -> u32\n\n");
    }

    #[test]
    fn test_encode_empty_config_is_empty_string() {
        assert_eq!(Config::new().to_text(), Ok(String::new()));
    }

    #[test]
    fn test_encode_empty_group_writes_header_only() {
        let mut config = Config::new();
        config.add_group("empty");

        assert_eq!(config.to_text(), Ok("[empty]\n\n".to_string()));
    }

    #[test]
    fn test_encode_reports_every_group_and_entry_to_trace() {
        let mut config = Config::new();
        config.add_group("a").add_entry("x", 1i64);
        config.add_group("b").add_entry("y", 2.0f64);
        let trace = RecordingTrace::new();

        encode_config(&config, &trace).expect("encode");

        assert_eq!(
            trace.events(),
            vec![
                TraceEvent::GroupEncoded("a".to_string()),
                TraceEvent::EntryEncoded {
                    group: "a".to_string(),
                    entry: "x".to_string(),
                    value_type: ValueType::I64,
                },
                TraceEvent::GroupEncoded("b".to_string()),
                TraceEvent::EntryEncoded {
                    group: "b".to_string(),
                    entry: "y".to_string(),
                    value_type: ValueType::F64,
                },
            ]
        );
    }

    #[test]
    fn test_encode_rejects_empty_names() {
        // Arrange
        let mut empty_group = Config::new();
        empty_group.add_group("").add_entry("x", 1i32);
        let mut empty_entry = Config::new();
        empty_entry.add_group("g").add_entry("", 1i32);

        // Act / Assert
        assert_eq!(
            empty_group.to_text(),
            Err(EncodeError::GroupName {
                group: String::new(),
                reason: "name is empty",
            })
        );
        assert!(matches!(
            empty_entry.to_text(),
            Err(EncodeError::EntryName { ref entry, .. }) if entry.is_empty()
        ));
    }

    #[test]
    fn test_encode_rejects_entry_name_read_as_header() {
        let mut config = Config::new();
        config.add_group("g").add_entry("[x", 1i32);

        let err = config.to_text().unwrap_err();

        assert!(err.to_string().contains("starts with `[`"));
    }

    #[test]
    fn test_encode_rejects_padded_names_and_values() {
        let mut padded_group = Config::new();
        padded_group.add_group(" g ").add_entry("a", 1i32);
        let mut padded_entry = Config::new();
        padded_entry.add_group("g").add_entry(" a", 1i32);
        let mut padded_value = Config::new();
        padded_value.add_group("g").add_entry("a", " text");

        assert!(matches!(padded_group.to_text(), Err(EncodeError::GroupName { .. })));
        assert!(matches!(padded_entry.to_text(), Err(EncodeError::EntryName { .. })));
        assert!(matches!(padded_value.to_text(), Err(EncodeError::StringValue { .. })));
    }

    #[test]
    fn test_encode_rejects_line_breaks() {
        let mut config = Config::new();
        config.add_group("g").add_entry("a", "two\nlines");

        assert_eq!(
            config.to_text(),
            Err(EncodeError::StringValue {
                group: "g".to_string(),
                entry: "a".to_string(),
                reason: "contains a line break",
            })
        );
    }

    #[test]
    fn test_unusual_but_representable_names_round_trip() {
        let mut config = Config::new();
        config.add_group("a]b").add_entry("x->y", "");
        config.add_group("[odd]").add_entry("y]", "-> str");

        let text = config.to_text().expect("encode");
        let decoded = decode(&text).expect("decode");

        assert_eq!(decoded, config);
    }

    #[test]
    fn test_check_functions_agree_with_decoder() {
        assert_eq!(check_group_name("net"), Ok(()));
        assert_eq!(check_group_name("a]b"), Ok(()));
        assert_eq!(check_group_name(""), Err("name is empty"));
        assert_eq!(check_entry_name("a:b"), Err("name contains `:`"));
        assert_eq!(check_entry_name("[x"), Err("name starts with `[`"));
        assert_eq!(check_string_value(""), Ok(()));
        assert_eq!(check_string_value("a\rb"), Err("contains a line break"));
        assert_eq!(check_string_value("x "), Err("has leading or trailing whitespace"));
    }

    // ── Line splitting ───────────────────────────────────────────────────────

    #[test]
    fn test_split_entry_line_trims_every_part() {
        let parts = split_entry_line("  port :   8080   ->   u32 ").expect("valid line");

        assert_eq!(
            parts,
            EntryParts {
                name: "port",
                value: "8080",
                tag: "u32",
            }
        );
    }

    #[test]
    fn test_split_entry_line_uses_last_arrow() {
        let parts = split_entry_line("route: a -> b -> str").expect("valid line");

        assert_eq!(parts.value, "a -> b");
        assert_eq!(parts.tag, "str");
    }

    #[test]
    fn test_split_entry_line_keeps_colons_in_value() {
        let parts = split_entry_line("url: http://localhost:80 -> str").expect("valid line");

        assert_eq!(parts.name, "url");
        assert_eq!(parts.value, "http://localhost:80");
    }

    // ── Decoding ─────────────────────────────────────────────────────────────

    #[test]
    fn test_decode_reads_every_type() {
        let text = "\
[all]
a: -5 -> i32
b: -9000000000 -> i64
c: 4294967295 -> u32
d: 18446744073709551615 -> u64
e: 3.141 -> f32
f: 369.213 -> f64
g: 69420 -> str
";

        let config = decode(text).expect("decode");

        let all = config.group("all").unwrap();
        assert_eq!(all.entry("a").unwrap().get::<i32>(), Ok(-5));
        assert_eq!(all.entry("b").unwrap().get::<i64>(), Ok(-9_000_000_000));
        assert_eq!(all.entry("c").unwrap().get::<u32>(), Ok(u32::MAX));
        assert_eq!(all.entry("d").unwrap().get::<u64>(), Ok(u64::MAX));
        assert_eq!(all.entry("e").unwrap().get::<f32>(), Ok(3.141));
        assert_eq!(all.entry("f").unwrap().get::<f64>(), Ok(369.213));
        assert_eq!(all.entry("g").unwrap().get::<String>(), Ok("69420".to_string()));
    }

    #[test]
    fn test_decode_negative_int32_round_trips() {
        let mut config = Config::new();
        config.add_group("g").add_entry("n", -5i32);

        let text = config.to_text().expect("encode");
        let decoded = decode(&text).expect("decode");

        assert_eq!(text, "[g]\nn: -5 -> i32\n\n");
        assert_eq!(decoded.entry("g", "n").unwrap().get::<i32>(), Ok(-5));
    }

    #[test]
    fn test_decode_hyphenated_string_round_trips() {
        let mut config = Config::new();
        config.add_group("g").add_entry("name", "dev-linux-01");

        let decoded = decode(&config.to_text().expect("encode")).expect("decode");

        assert_eq!(decoded, config);
    }

    #[test]
    fn test_decode_empty_string_value() {
        let config = decode("[g]\nempty:  -> str\n").expect("decode");

        assert_eq!(config.entry("g", "empty").unwrap().value().as_str(), Some(""));
    }

    #[test]
    fn test_decode_accepts_crlf_and_missing_blank_lines() {
        let config = decode("[a]\r\nx: 1 -> u32\r\n[b]\r\ny: 2 -> u32\r\n").expect("decode");

        assert_eq!(config.len(), 2);
        assert_eq!(config.entry("b", "y").unwrap().get::<u32>(), Ok(2));
    }

    #[test]
    fn test_decode_ignores_lines_before_first_header() {
        let trace = RecordingTrace::new();

        let config = decode_config("orphan: 1 -> i32\n\n[g]\nx: 2 -> i32\n", &trace)
            .expect("decode");

        assert_eq!(config.entry_count(), 1);
        assert_eq!(trace.events()[0], TraceEvent::LineSkipped(1));
    }

    #[test]
    fn test_decode_repeated_header_continues_group() {
        let config = decode("[g]\nx: 1 -> i32\n\n[g]\ny: 2 -> i32\n").expect("decode");

        assert_eq!(config.len(), 1);
        assert_eq!(config.group("g").unwrap().len(), 2);
    }

    #[test]
    fn test_decode_duplicate_entry_keeps_last_value() {
        let config = decode("[g]\nx: 1 -> i32\nx: 2 -> i32\n").expect("decode");

        assert_eq!(config.entry("g", "x").unwrap().get::<i32>(), Ok(2));
    }

    #[test]
    fn test_decode_reports_entries_to_trace() {
        let trace = RecordingTrace::new();

        decode_config("[net]\nport: 8080 -> u32\n", &trace).expect("decode");

        assert_eq!(
            trace.events(),
            vec![
                TraceEvent::GroupDecoded("net".to_string()),
                TraceEvent::EntryDecoded {
                    group: "net".to_string(),
                    entry: "port".to_string(),
                    raw_value: "8080".to_string(),
                    value_type: ValueType::U32,
                },
            ]
        );
    }

    // ── Decoding errors ──────────────────────────────────────────────────────

    #[test]
    fn test_decode_unknown_tag_fails() {
        let result = decode("[g]\nok: 1 -> i32\nflag: true -> bol\n");

        assert_eq!(
            result,
            Err(FormatError::UnknownTypeTag {
                line_number: 3,
                tag: "bol".to_string(),
            })
        );
    }

    #[test]
    fn test_decode_missing_colon_fails_with_line() {
        let err = decode("[g]\n\nport 8080 -> u32\n").unwrap_err();

        assert_eq!(err.line_number(), 3);
        assert!(matches!(
            err,
            FormatError::MalformedLine { ref line, .. } if line == "port 8080 -> u32"
        ));
    }

    #[test]
    fn test_decode_missing_arrow_fails() {
        let err = decode("[g]\nport: 8080 u32\n").unwrap_err();

        assert!(matches!(err, FormatError::MalformedLine { line_number: 2, .. }));
        assert!(err.to_string().contains("missing `->`"));
    }

    #[test]
    fn test_decode_missing_tag_fails() {
        let err = decode("[g]\nport: 8080 ->\n").unwrap_err();

        assert!(matches!(err, FormatError::MalformedLine { line_number: 2, .. }));
    }

    #[test]
    fn test_decode_empty_entry_name_fails() {
        let err = decode("[g]\n: 8080 -> u32\n").unwrap_err();

        assert!(err.to_string().contains("entry name is empty"));
    }

    #[test]
    fn test_decode_unparsable_number_fails() {
        let err = decode("[g]\nport: eighty -> u32\n").unwrap_err();

        assert!(matches!(err, FormatError::MalformedLine { line_number: 2, .. }));
        assert!(err.to_string().contains("invalid u32 value"));
    }

    #[test]
    fn test_decode_out_of_range_number_fails() {
        let err = decode("[g]\nsmall: 4294967296 -> u32\n").unwrap_err();

        assert!(matches!(err, FormatError::MalformedLine { .. }));
    }

    #[test]
    fn test_decode_negative_unsigned_fails() {
        let err = decode("[g]\nport: -1 -> u64\n").unwrap_err();

        assert!(matches!(err, FormatError::MalformedLine { .. }));
    }

    #[test]
    fn test_decode_unterminated_header_fails() {
        let err = decode("[net\nport: 1 -> u32\n").unwrap_err();

        assert_eq!(err.line_number(), 1);
        assert!(err.to_string().contains("closing `]`"));
    }

    #[test]
    fn test_decode_empty_header_fails() {
        assert!(matches!(
            decode("[]\n"),
            Err(FormatError::MalformedLine { line_number: 1, .. })
        ));
    }
}
