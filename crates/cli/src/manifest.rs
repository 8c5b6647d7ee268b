use anyhow::{Context, Result, bail};
use optparse::Descriptor;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_MANIFEST_NAME: &str = "options.json";

/// Option declarations, in registration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<u32>,

    #[serde(default)]
    pub options: Vec<OptionEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionEntry {
    /// Long name without the leading `--`.
    pub long: String,

    /// One-character alias without the leading `-`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, alias = "takes_value")]
    pub takes_value: bool,
}

impl OptionEntry {
    pub fn to_descriptor(&self) -> Result<Descriptor> {
        let long = self.long.trim();
        if long.is_empty() {
            bail!("option long name must not be empty");
        }
        if long.starts_with('-') || long.contains('=') {
            bail!("option long name '{long}' must not start with '-' or contain '='");
        }

        let mut descriptor = Descriptor::new(long, self.description.trim())
            .requires_value(self.takes_value);

        if let Some(short) = &self.short {
            let mut chars = short.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                bail!("short name '{short}' of '--{long}' must be exactly one character");
            };
            if c == '-' || c == '=' {
                bail!("short name of '--{long}' cannot be '{c}'");
            }
            descriptor = descriptor.short(c);
        }

        Ok(descriptor)
    }
}

impl Manifest {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;
        let manifest: Manifest = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse manifest JSON: {}", path.display()))?;
        Ok(manifest)
    }

    pub fn descriptors(&self) -> Result<Vec<Descriptor>> {
        self.options
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                entry
                    .to_descriptor()
                    .with_context(|| format!("invalid entry options[{i}]"))
            })
            .collect()
    }
}

/// Write a starter manifest into `dir`. Existing files are kept unless
/// `overwrite` is set.
pub fn write_default_manifest(dir: &Path, overwrite: bool) -> Result<PathBuf> {
    let dest = dir.join(DEFAULT_MANIFEST_NAME);
    if dest.exists() && !overwrite {
        bail!("{} already exists", dest.display());
    }

    let manifest = Manifest {
        schema_version: Some(1),
        options: vec![
            OptionEntry {
                long: "help".to_string(),
                short: Some("h".to_string()),
                description: "Show the option listing".to_string(),
                takes_value: false,
            },
            OptionEntry {
                long: "verbose".to_string(),
                short: Some("v".to_string()),
                description: "Increase verbosity (repeatable)".to_string(),
                takes_value: false,
            },
            OptionEntry {
                long: "output".to_string(),
                short: Some("o".to_string()),
                description: "Output file".to_string(),
                takes_value: true,
            },
        ],
    };

    let mut out = serde_json::to_string_pretty(&manifest).context("failed to serialize manifest")?;
    out.push('\n');

    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory: {}", dir.display()))?;
    fs::write(&dest, out.as_bytes())
        .with_context(|| format!("failed to write {}", dest.display()))?;
    Ok(dest)
}
