use crate::core::error::{ConfigError, ReleaseError, ReleaseResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for sdk-release
/// Searched in order: release.toml, .release.toml, .config/release.toml
///
/// Every section is optional. A repository without a config file releases
/// with the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReleaseConfig {
  /// Prefix for the release tag (default: "v", giving tags like v1.3.0)
  #[serde(default = "default_tag_prefix")]
  pub tag_prefix: String,
  #[serde(default)]
  pub package: PackageConfig,
  #[serde(default = "default_version_files")]
  pub version_files: Vec<VersionFileConfig>,
  #[serde(default)]
  pub samples: SamplesConfig,
  #[serde(default)]
  pub docs: DocsConfig,
  #[serde(default)]
  pub git: GitConfig,
}

/// The published package the sample apps depend on
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageConfig {
  #[serde(default = "default_package_name")]
  pub name: String,
}

/// A file holding a `"<key>": "<version>"` literal
///
/// # Example
///
/// ```toml
/// [[version_files]]
/// path = "__tests__/index.test.js"
/// key = "$lib_version"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct VersionFileConfig {
  /// Path relative to the repository root
  pub path: PathBuf,
  /// Key in front of the version string
  pub key: String,
}

/// Sample apps refreshed against the new release
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamplesConfig {
  /// Package manager binary (default: yarn)
  #[serde(default = "default_manager")]
  pub manager: String,
  /// Lock file name inside each sample dir (default: yarn.lock)
  #[serde(default = "default_lock_file")]
  pub lock_file: String,
  /// Sample project directories, relative to the repository root
  #[serde(default = "default_sample_dirs")]
  pub dirs: Vec<PathBuf>,
}

/// Documentation generator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocsConfig {
  /// Script path relative to the repository root (default: generate_docs.sh)
  #[serde(default = "default_docs_script")]
  pub script: PathBuf,
  /// Directory the script writes to (default: docs)
  #[serde(default = "default_docs_output")]
  pub output: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitConfig {
  /// Remote the release tag is pushed to (default: origin)
  #[serde(default = "default_remote")]
  pub remote: String,
}

fn default_tag_prefix() -> String {
  "v".to_string()
}

fn default_package_name() -> String {
  "mixpanel-react-native".to_string()
}

fn default_version_files() -> Vec<VersionFileConfig> {
  vec![
    VersionFileConfig {
      path: PathBuf::from("package.json"),
      key: "version".to_string(),
    },
    VersionFileConfig {
      path: PathBuf::from("__tests__").join("index.test.js"),
      key: "$lib_version".to_string(),
    },
  ]
}

fn default_manager() -> String {
  "yarn".to_string()
}

fn default_lock_file() -> String {
  "yarn.lock".to_string()
}

fn default_sample_dirs() -> Vec<PathBuf> {
  ["MixpanelDemo", "SimpleMixpanel", "ContextAPIMixpanel"]
    .iter()
    .map(|name| Path::new("Samples").join(name))
    .collect()
}

fn default_docs_script() -> PathBuf {
  PathBuf::from("generate_docs.sh")
}

fn default_docs_output() -> PathBuf {
  PathBuf::from("docs")
}

fn default_remote() -> String {
  "origin".to_string()
}

impl Default for PackageConfig {
  fn default() -> Self {
    Self {
      name: default_package_name(),
    }
  }
}

impl Default for SamplesConfig {
  fn default() -> Self {
    Self {
      manager: default_manager(),
      lock_file: default_lock_file(),
      dirs: default_sample_dirs(),
    }
  }
}

impl Default for DocsConfig {
  fn default() -> Self {
    Self {
      script: default_docs_script(),
      output: default_docs_output(),
    }
  }
}

impl Default for GitConfig {
  fn default() -> Self {
    Self {
      remote: default_remote(),
    }
  }
}

impl Default for ReleaseConfig {
  fn default() -> Self {
    Self {
      tag_prefix: default_tag_prefix(),
      package: PackageConfig::default(),
      version_files: default_version_files(),
      samples: SamplesConfig::default(),
      docs: DocsConfig::default(),
      git: GitConfig::default(),
    }
  }
}

impl SamplesConfig {
  /// Lock file path of every sample, relative to the repository root
  pub fn lock_files(&self) -> Vec<PathBuf> {
    self.dirs.iter().map(|dir| dir.join(&self.lock_file)).collect()
  }
}

impl ReleaseConfig {
  /// Find config file in search order: release.toml, .release.toml, .config/release.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("release.toml"),
      path.join(".release.toml"),
      path.join(".config").join("release.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config for the repository at `root`
  ///
  /// An explicit path must exist. Without one, the search locations are tried
  /// and the built-in defaults are used when none of them exists.
  pub fn load(root: &Path, explicit: Option<&Path>) -> ReleaseResult<Self> {
    let config_path = match explicit {
      Some(path) => {
        let path = if path.is_absolute() { path.to_path_buf() } else { root.join(path) };
        if !path.exists() {
          return Err(ReleaseError::Config(ConfigError::NotFound { path }));
        }
        path
      }
      None => match Self::find_config_path(root) {
        Some(path) => path,
        None => {
          log::debug!("no release.toml under {}, using defaults", root.display());
          return Ok(Self::default());
        }
      },
    };

    log::debug!("loading config from {}", config_path.display());
    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config = Self::parse(&content).with_context(|| format!("Invalid config in {}", config_path.display()))?;

    Ok(config)
  }

  /// Parse and validate config contents
  pub fn parse(content: &str) -> ReleaseResult<Self> {
    let config: ReleaseConfig = toml_edit::de::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  /// Validate the configuration
  pub fn validate(&self) -> ReleaseResult<()> {
    if self.version_files.is_empty() {
      return Err(ReleaseError::with_help(
        "No version files configured",
        "Add at least one [[version_files]] entry with a path and key",
      ));
    }

    for (i, file) in self.version_files.iter().enumerate() {
      if file.key.is_empty() {
        return Err(ReleaseError::Config(ConfigError::MissingField {
          field: format!("version_files[{}].key", i),
        }));
      }
      require_relative(&format!("version_files[{}].path", i), &file.path)?;
    }

    require_non_empty("package.name", &self.package.name)?;
    require_non_empty("samples.manager", &self.samples.manager)?;
    require_non_empty("samples.lock_file", &self.samples.lock_file)?;
    require_non_empty("git.remote", &self.git.remote)?;

    for (i, dir) in self.samples.dirs.iter().enumerate() {
      require_relative(&format!("samples.dirs[{}]", i), dir)?;
    }

    require_relative("docs.script", &self.docs.script)?;
    require_relative("docs.output", &self.docs.output)?;

    Ok(())
  }
}

fn require_non_empty(field: &str, value: &str) -> ReleaseResult<()> {
  if value.trim().is_empty() {
    return Err(ReleaseError::Config(ConfigError::MissingField {
      field: field.to_string(),
    }));
  }
  Ok(())
}

fn require_relative(field: &str, path: &Path) -> ReleaseResult<()> {
  if path.as_os_str().is_empty() {
    return Err(ReleaseError::Config(ConfigError::MissingField {
      field: field.to_string(),
    }));
  }
  if path.is_absolute() || path.has_root() {
    return Err(ReleaseError::Config(ConfigError::InvalidField {
      field: field.to_string(),
      reason: format!("{} is not relative to the repository root", path.display()),
    }));
  }
  Ok(())
}
