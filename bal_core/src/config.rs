use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::BalError;
use crate::BalResult;

/// Default maximum file size in bytes (10 MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["bal.toml", ".bal.toml", ".config/bal.toml"];

/// File extensions scanned by default when walking a directory. The scanner
/// grammar is the C-family comment and string syntax, so the defaults cover
/// the JavaScript/TypeScript family the tool grew up on.
pub const DEFAULT_EXTENSIONS: [&str; 6] = ["js", "jsx", "ts", "tsx", "mjs", "cjs"];

/// Configuration loaded from `bal.toml`.
///
/// ```toml
/// # Extra file extensions to scan on top of the built-in defaults.
/// extensions = ["vue", "svelte"]
///
/// # Maximum file size in bytes. Larger files are skipped during walks.
/// max_file_size = 10485760
///
/// disable_gitignore = false
///
/// [exclude]
/// patterns = ["vendor/", "*.min.js"]
/// ```
#[derive(Debug, Deserialize)]
pub struct BalConfig {
	/// Additional file extensions to scan beyond the built-in defaults.
	#[serde(default)]
	pub extensions: Vec<String>,
	/// Exclusion configuration using gitignore-style patterns.
	#[serde(default)]
	pub exclude: ExcludeConfig,
	/// Maximum file size in bytes to scan. Files larger than this are
	/// skipped during directory walks. Defaults to 10 MB.
	#[serde(default = "default_max_file_size")]
	pub max_file_size: u64,
	/// When true, `.gitignore` files are not used for filtering. By default
	/// (`false`), bal respects `.gitignore` patterns and skips files that
	/// would be ignored by git. Set to `true` when working outside a git
	/// repository, and use `[exclude]` patterns instead.
	#[serde(default)]
	pub disable_gitignore: bool,
}

/// Gitignore-style patterns excluded from directory walks.
///
/// ```toml
/// [exclude]
/// patterns = ["dist/", "*.generated.js"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExcludeConfig {
	/// The exclusion patterns, in gitignore syntax.
	#[serde(default)]
	pub patterns: Vec<String>,
}

fn default_max_file_size() -> u64 {
	DEFAULT_MAX_FILE_SIZE
}

impl BalConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> BalResult<Option<BalConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: BalConfig =
			toml::from_str(&content).map_err(|e| BalError::ConfigParse(e.to_string()))?;

		Ok(Some(config))
	}
}
