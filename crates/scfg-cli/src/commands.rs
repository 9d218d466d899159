//! Implementations of the `scfg` subcommands.
//!
//! Every command writes its report to the `out` writer it is given rather
//! than to stdout directly, so tests can capture the output in a `Vec<u8>`.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use scfg_core::format::{check_entry_name, check_group_name, check_string_value};
use scfg_core::{Config, StorageError, Value, ValueType};
use tracing::info;

/// Builds the sample config written by `scfg demo`.
pub fn demo_config() -> Config {
    let mut config = Config::new();

    let first = config.add_group("firstGroup");
    first.add_entry("e1", 69420i32);
    first.add_entry("e2", 6_000_000u64);
    first.add_entry("e3", 369.213f64);
    first.add_entry("e4", 3.141f32);

    config.add_group("secondGroup").add_entry("e5", "69420");

    config
}

/// Writes the sample config to `path`, reloads it and prints it.
///
/// # Errors
///
/// Fails if the file cannot be written or read back, or if the reloaded
/// config differs from the one written.
pub fn demo(path: &Path, out: &mut impl Write) -> Result<()> {
    let config = demo_config();
    config
        .save(path)
        .with_context(|| format!("failed to save demo config to {}", path.display()))?;

    let loaded = load(path)?;
    if loaded != config {
        bail!("config reloaded from {} differs from the one saved", path.display());
    }

    writeln!(
        out,
        "wrote {} groups, {} entries to {}",
        loaded.len(),
        loaded.entry_count(),
        path.display()
    )?;
    out.write_all(loaded.to_text()?.as_bytes())?;
    Ok(())
}

/// Loads `path` and reports its size.
///
/// # Errors
///
/// Fails with the underlying I/O or decoding error.
pub fn check(path: &Path, out: &mut impl Write) -> Result<()> {
    let config = load(path)?;
    writeln!(
        out,
        "{}: ok ({} groups, {} entries)",
        path.display(),
        config.len(),
        config.entry_count()
    )?;
    Ok(())
}

/// Prints the config at `path`, either in its text form or as JSON.
///
/// # Errors
///
/// Fails with the underlying I/O or decoding error.
pub fn dump(path: &Path, json: bool, out: &mut impl Write) -> Result<()> {
    let config = load(path)?;
    if json {
        serde_json::to_writer_pretty(&mut *out, &config).context("failed to write JSON")?;
        writeln!(out)?;
    } else {
        out.write_all(config.to_text()?.as_bytes())?;
    }
    Ok(())
}

/// Prints a single value followed by its type tag.
///
/// # Errors
///
/// Fails if the file cannot be loaded or the group or entry does not exist.
pub fn get(path: &Path, group: &str, entry: &str, out: &mut impl Write) -> Result<()> {
    let config = load(path)?;
    let entry = config
        .entry(group, entry)
        .with_context(|| format!("lookup failed in {}", path.display()))?;
    writeln!(out, "{} ({})", entry.value(), entry.value_type())?;
    Ok(())
}

/// Adds or replaces a single value and saves the file.
///
/// A missing file starts from an empty config; a missing group is created.
///
/// # Errors
///
/// Fails for an unknown tag, a value that does not parse, a name or value
/// the text format cannot represent, or any load/save error.
pub fn set(
    path: &Path,
    group: &str,
    entry: &str,
    tag: &str,
    raw: &str,
    out: &mut impl Write,
) -> Result<()> {
    validate_names(group, entry, raw)?;

    let value_type = ValueType::from_tag(tag).with_context(|| {
        let known: Vec<&str> = ValueType::ALL.iter().map(|ty| ty.tag()).collect();
        format!("unknown type tag {tag:?}, expected one of {}", known.join(", "))
    })?;
    let value = Value::parse(value_type, raw)?;

    let mut config = match Config::load(path) {
        Ok(config) => config,
        Err(StorageError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "file does not exist yet, starting empty");
            Config::new()
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to load {}", path.display()));
        }
    };

    if !config.contains(group) {
        config.add_group(group);
    }
    config.group_mut(group)?.add_entry(entry, value);

    config
        .save(path)
        .with_context(|| format!("failed to save {}", path.display()))?;

    writeln!(out, "[{group}] {entry} = {raw} ({value_type})")?;
    Ok(())
}

fn load(path: &Path) -> Result<Config> {
    Config::load(path).with_context(|| format!("failed to load {}", path.display()))
}

/// Rejects names and values that would not survive a save/load cycle, before
/// the file is touched.
fn validate_names(group: &str, entry: &str, raw: &str) -> Result<()> {
    check_group_name(group)
        .map_err(|reason| anyhow!("group name {group:?} cannot be stored: {reason}"))?;
    check_entry_name(entry)
        .map_err(|reason| anyhow!("entry name {entry:?} cannot be stored: {reason}"))?;
    check_string_value(raw)
        .map_err(|reason| anyhow!("value {raw:?} cannot be stored: {reason}"))?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
