//! Configuration for the `obmd` binary.
//!
//! Settings come from TOML or JSON files (explicit `--config-file` paths, or
//! a discovered `obmd.toml`), then `--config KEY=VALUE` overrides, then
//! command-specific flags.
use std::{
  fs,
  path::{Path, PathBuf},
};

use obmd_commonmark::{ContentSelection, MarkdownOptions};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File names searched, in order, by [`Config::find_config_file_in`].
const CONFIG_FILENAMES: [&str; 6] = [
  "obmd.toml",
  "obmd.json",
  ".obmd.toml",
  ".obmd.json",
  ".config/obmd.toml",
  ".config/obmd.json",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(
  clippy::struct_excessive_bools,
  reason = "Config struct with related boolean flags"
)]
pub struct Config {
  /// Enable GitHub Flavored Markdown extensions.
  pub gfm: bool,

  /// Convert `[[target|alias]]` wiki links.
  pub wiki_links: bool,

  /// Replace YouTube images with embedded players.
  pub embed_youtube: bool,

  /// Move nested lists out of their parent `<li>`.
  pub restructure_lists: bool,

  /// Class of the `<div>` wrapping the output. Empty disables the wrapper.
  pub wrap_class: String,

  /// Which part of each note is published.
  pub selection: ContentSelection,
}

impl Default for Config {
  fn default() -> Self {
    let options = MarkdownOptions::default();
    Self {
      gfm:               options.gfm,
      wiki_links:        options.wiki_links,
      embed_youtube:     options.embed_youtube,
      restructure_lists: options.restructure_lists,
      wrap_class:        "obsidian-content".to_string(),
      selection:         ContentSelection::default(),
    }
  }
}

/// One config file as written, before defaults are filled in.
///
/// Keys absent from the file stay `None`, so layering a partial file over an
/// earlier one only touches what it sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigLayer {
  pub gfm:               Option<bool>,
  pub wiki_links:        Option<bool>,
  pub embed_youtube:     Option<bool>,
  pub restructure_lists: Option<bool>,
  pub wrap_class:        Option<String>,
  pub selection:         SelectionLayer,
}

/// The `[selection]` table of a [`ConfigLayer`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SelectionLayer {
  pub start_marker:         Option<String>,
  pub include_start_marker: Option<bool>,
  pub end_marker:           Option<String>,
  pub include_end_marker:   Option<bool>,
}

impl ConfigLayer {
  /// Read a single config file (TOML or JSON) without applying defaults.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format is
  /// unsupported.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to read config file: {}: {}",
        path.display(),
        e
      ))
    })?;

    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
      return Err(ConfigError::Config(format!(
        "Config file has no extension: {}",
        path.display()
      )));
    };

    match ext.to_lowercase().as_str() {
      "json" => {
        serde_json::from_str(&content).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to parse JSON config from {}: {}",
            path.display(),
            e
          ))
        })
      },
      "toml" => {
        toml::from_str(&content).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to parse TOML config from {}: {}",
            path.display(),
            e
          ))
        })
      },
      _ => {
        Err(ConfigError::Config(format!(
          "Unsupported config file format: {}",
          path.display()
        )))
      },
    }
  }
}

impl Config {
  /// Load configuration from a file (TOML or JSON). Keys the file leaves out
  /// keep their defaults.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format is
  /// unsupported.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let mut config = Self::default();
    config.merge(ConfigLayer::from_file(path)?);
    Ok(config)
  }

  /// Load configuration from the given files, or a discovered one, and apply
  /// `KEY=VALUE` overrides.
  ///
  /// Files are layered in order over the defaults; a later file only changes
  /// the keys it sets.
  ///
  /// # Errors
  ///
  /// Returns an error if a config file cannot be loaded or an override is
  /// invalid.
  pub fn load(
    config_files: &[PathBuf],
    config_overrides: &[String],
  ) -> Result<Self, ConfigError> {
    let mut config = Self::default();

    if config_files.is_empty() {
      if let Some(discovered_config) = Self::find_config_file() {
        log::info!(
          "Using discovered config file: {}",
          discovered_config.display()
        );
        config.merge(ConfigLayer::from_file(&discovered_config)?);
      }
    } else {
      for config_path in config_files {
        config.merge(ConfigLayer::from_file(config_path)?);
      }

      if config_files.len() > 1 {
        log::info!("Loaded and merged {} config files", config_files.len());
      }
    }

    if !config_overrides.is_empty() {
      config.apply_overrides(config_overrides)?;
    }

    Ok(config)
  }

  /// Layer the keys set in `layer` over this config.
  pub fn merge(&mut self, layer: ConfigLayer) {
    fn set<T>(slot: &mut T, value: Option<T>) {
      if let Some(value) = value {
        *slot = value;
      }
    }

    set(&mut self.gfm, layer.gfm);
    set(&mut self.wiki_links, layer.wiki_links);
    set(&mut self.embed_youtube, layer.embed_youtube);
    set(&mut self.restructure_lists, layer.restructure_lists);
    // An explicit empty string still counts as set; it turns the wrapper off
    set(&mut self.wrap_class, layer.wrap_class);

    let selection = layer.selection;
    set(&mut self.selection.start_marker, selection.start_marker);
    set(
      &mut self.selection.include_start_marker,
      selection.include_start_marker,
    );
    set(&mut self.selection.end_marker, selection.end_marker);
    set(
      &mut self.selection.include_end_marker,
      selection.include_end_marker,
    );
  }

  /// Apply configuration overrides from KEY=VALUE strings.
  ///
  /// Nested keys use dots, e.g. `selection.start_marker=<!-- publish -->`.
  ///
  /// # Errors
  ///
  /// Returns an error if:
  ///
  /// - An override string is not in KEY=VALUE format
  /// - A key is not recognized
  /// - A value cannot be parsed as the expected type
  pub fn apply_overrides(
    &mut self,
    overrides: &[String],
  ) -> Result<(), ConfigError> {
    for override_str in overrides {
      let (key, value) = override_str.split_once('=').ok_or_else(|| {
        ConfigError::Config(format!(
          "Invalid config override format: '{override_str}'. Expected \
           KEY=VALUE"
        ))
      })?;

      self.apply_override(key.trim(), value.trim())?;
    }

    Ok(())
  }

  /// Apply a single override.
  ///
  /// # Errors
  ///
  /// Returns an error if the key is unknown or the value does not parse.
  pub fn apply_override(
    &mut self,
    key: &str,
    value: &str,
  ) -> Result<(), ConfigError> {
    match key {
      "gfm" => self.gfm = parse_bool(key, value)?,
      "wiki_links" => self.wiki_links = parse_bool(key, value)?,
      "embed_youtube" => self.embed_youtube = parse_bool(key, value)?,
      "restructure_lists" => self.restructure_lists = parse_bool(key, value)?,
      "wrap_class" => self.wrap_class = value.to_string(),
      "selection.start_marker" => {
        self.selection.start_marker = value.to_string();
      },
      "selection.end_marker" => self.selection.end_marker = value.to_string(),
      "selection.include_start_marker" => {
        self.selection.include_start_marker = parse_bool(key, value)?;
      },
      "selection.include_end_marker" => {
        self.selection.include_end_marker = parse_bool(key, value)?;
      },
      _ => {
        return Err(ConfigError::Config(format!(
          "Unknown configuration key: '{key}'. See documentation for \
           supported keys."
        )));
      },
    }

    log::debug!("Applied config override {key}={value}");
    Ok(())
  }

  /// Options for the markdown processor.
  #[must_use]
  pub fn markdown_options(&self) -> MarkdownOptions {
    MarkdownOptions {
      gfm:               self.gfm,
      wiki_links:        self.wiki_links,
      embed_youtube:     self.embed_youtube,
      restructure_lists: self.restructure_lists,
      wrap_class:        (!self.wrap_class.is_empty())
        .then(|| self.wrap_class.clone()),
    }
  }

  /// Search for config files in common locations, starting from the current
  /// directory.
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    if let Some(found) = Self::find_config_file_in(&current_dir) {
      return Some(found);
    }

    // Then `$XDG_CONFIG_HOME/obmd/config.{toml,json}`
    let xdg_config_home = std::env::var_os("XDG_CONFIG_HOME")?;
    let xdg_config_dir = PathBuf::from(xdg_config_home).join("obmd");
    ["config.toml", "config.json"]
      .iter()
      .map(|filename| xdg_config_dir.join(filename))
      .find(|path| path.exists())
  }

  /// Search `dir` for one of the known config file names.
  #[must_use]
  pub fn find_config_file_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
      .iter()
      .map(|filename| dir.join(filename))
      .find(|path| path.exists())
  }

  /// Write the default configuration to `path` in the given format.
  ///
  /// # Errors
  ///
  /// Returns an error if the format is unknown, serialization fails or the
  /// file cannot be written.
  pub fn generate_default_config(
    format: &str,
    path: &Path,
  ) -> Result<(), ConfigError> {
    let config = Self::default();
    let config_content = match format {
      "toml" => toml::to_string_pretty(&config)?,
      "json" => serde_json::to_string_pretty(&config)?,
      other => {
        return Err(ConfigError::Config(format!(
          "Unsupported config file format: {other}"
        )));
      },
    };

    fs::write(path, config_content).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to write default config to {}: {}",
        path.display(),
        e
      ))
    })?;

    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
  match value.to_lowercase().as_str() {
    "true" | "yes" | "1" => Ok(true),
    "false" | "no" | "0" => Ok(false),
    _ => {
      Err(ConfigError::Config(format!(
        "Invalid boolean value for '{key}': '{value}'. Expected true/false, \
         yes/no, or 1/0"
      )))
    },
  }
}
