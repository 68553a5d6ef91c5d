use crate::cli::SourceArgs;
use crate::error::RowsetError;
use crate::format_detect::detect_source_type;
use crate::source::FileResult;
use crate::source::file::{self, ReaderOptions};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub verbose: bool,
}

/// A fully resolved input: the file, its type and the reader options.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub path: PathBuf,
    /// Explicit type from `--type` or the profile.
    pub file_type: Option<String>,
    /// Used only when the extension gives no type.
    pub fallback_type: Option<String>,
    pub reader: ReaderOptions,
}

impl SourceConfig {
    /// Read the configured file.
    pub fn open(&self) -> Result<FileResult, RowsetError> {
        let file_type = match &self.file_type {
            Some(t) => Some(t.as_str()),
            None if detect_source_type(&self.path).is_err() => self.fallback_type.as_deref(),
            None => None,
        };
        file::open(&self.path, file_type, &self.reader)
    }
}

// --- TOML config file structs ---

#[derive(Debug, Deserialize, Default)]
struct TomlConfig {
    #[serde(default)]
    defaults: TomlDefaults,
    #[serde(default)]
    sources: HashMap<String, TomlSource>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlDefaults {
    file_type: Option<String>,
    delimiter: Option<String>,
    has_headers: Option<bool>,
    null_values: Option<Vec<String>>,
    infer_types: Option<bool>,
    verbose: Option<bool>,
}

#[derive(Debug, Deserialize, Default, Clone)]
struct TomlSource {
    path: Option<PathBuf>,
    #[serde(rename = "type")]
    file_type: Option<String>,
    delimiter: Option<String>,
    has_headers: Option<bool>,
    null_values: Option<Vec<String>>,
    infer_types: Option<bool>,
}

/// Config path resolution result; distinguishes explicit vs auto-resolved paths.
struct ResolvedConfigPath {
    path: PathBuf,
    /// true if the user passed --config (or ROWSET_CONFIG through clap)
    explicit: bool,
}

/// Resolve the config file path: --config flag > platform default.
fn resolve_config_path(cli_config: Option<&Path>) -> Option<ResolvedConfigPath> {
    if let Some(path) = cli_config {
        return Some(ResolvedConfigPath {
            path: path.to_path_buf(),
            explicit: true,
        });
    }
    ProjectDirs::from("", "", "rowset").map(|dirs| ResolvedConfigPath {
        path: dirs.config_dir().join("config.toml"),
        explicit: false,
    })
}

/// Load and parse the TOML config file (if it exists).
fn load_toml_config(resolved: Option<&ResolvedConfigPath>) -> Result<TomlConfig, RowsetError> {
    let resolved = match resolved {
        Some(r) => r,
        None => return Ok(TomlConfig::default()),
    };

    if !resolved.path.exists() {
        if resolved.explicit {
            return Err(RowsetError::Config {
                message: format!("config file not found: {}", resolved.path.display()),
            });
        }
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(&resolved.path).map_err(|e| RowsetError::Config {
        message: format!("cannot read config file {}: {}", resolved.path.display(), e),
    })?;

    toml::from_str(&content).map_err(|e| RowsetError::Config {
        message: format!("invalid config file {}: {}", resolved.path.display(), e),
    })
}

fn parse_delimiter(raw: &str) -> Result<u8, RowsetError> {
    match raw.as_bytes() {
        [b] => Ok(*b),
        _ => Err(RowsetError::Config {
            message: format!("delimiter must be a single ASCII character, got {raw:?}"),
        }),
    }
}

/// Build AppConfig from the source arguments of any subcommand.
pub fn load_from_source_args(
    args: &SourceArgs,
    verbose: bool,
    config_path: Option<&Path>,
) -> Result<AppConfig, RowsetError> {
    let resolved_path = resolve_config_path(config_path);
    let toml_config = load_toml_config(resolved_path.as_ref())?;

    let profile = args
        .profile
        .as_ref()
        .map(|name| {
            toml_config
                .sources
                .get(name)
                .cloned()
                .ok_or_else(|| RowsetError::Config {
                    message: format!("source profile '{name}' not found in config file"),
                })
        })
        .transpose()?
        .unwrap_or_default();

    let defaults = &toml_config.defaults;

    // path: CLI > profile
    let path = args
        .path
        .clone()
        .or(profile.path.clone())
        .ok_or_else(|| RowsetError::Config {
            message: "no input file; pass a path or use --profile".to_string(),
        })?;

    // type: CLI > profile; defaults.file_type only backs up extension detection
    let file_type = args.file_type.clone().or(profile.file_type.clone());

    // reader options: profile > defaults > built-in
    let builtin = ReaderOptions::default();
    let delimiter = match profile.delimiter.as_deref().or(defaults.delimiter.as_deref()) {
        Some(raw) => parse_delimiter(raw)?,
        None => builtin.delimiter,
    };
    let reader = ReaderOptions {
        delimiter,
        has_headers: profile
            .has_headers
            .or(defaults.has_headers)
            .unwrap_or(builtin.has_headers),
        null_values: profile
            .null_values
            .clone()
            .or(defaults.null_values.clone())
            .unwrap_or(builtin.null_values),
        infer_types: profile
            .infer_types
            .or(defaults.infer_types)
            .unwrap_or(builtin.infer_types),
    };

    // verbose: CLI/ENV OR TOML default
    let verbose = verbose || defaults.verbose.unwrap_or(false);

    Ok(AppConfig {
        source: SourceConfig {
            path,
            file_type,
            fallback_type: defaults.file_type.clone(),
            reader,
        },
        verbose,
    })
}
