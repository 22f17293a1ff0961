use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use ignore::gitignore::Gitignore;
use ignore::gitignore::GitignoreBuilder;

use crate::BalError;
use crate::BalResult;
use crate::ScanOutcome;
use crate::config::BalConfig;
use crate::config::DEFAULT_EXTENSIONS;
use crate::config::DEFAULT_MAX_FILE_SIZE;
use crate::scanner::scan;

/// Options for controlling how files are collected and checked.
///
/// Use [`CheckOptions::default()`] for sensible defaults or
/// [`CheckOptions::from_config`] to construct from a [`BalConfig`].
#[derive(Debug, Clone)]
pub struct CheckOptions {
	/// Gitignore-style patterns to exclude from directory walks.
	pub exclude_patterns: Vec<String>,
	/// Extra file extensions to scan beyond [`DEFAULT_EXTENSIONS`].
	pub extensions: Vec<String>,
	/// Maximum file size to scan in bytes.
	pub max_file_size: u64,
	/// Whether to disable `.gitignore` integration.
	pub disable_gitignore: bool,
}

impl Default for CheckOptions {
	fn default() -> Self {
		Self {
			exclude_patterns: Vec::new(),
			extensions: Vec::new(),
			max_file_size: DEFAULT_MAX_FILE_SIZE,
			disable_gitignore: false,
		}
	}
}

impl CheckOptions {
	/// Construct [`CheckOptions`] from a loaded [`BalConfig`].
	pub fn from_config(config: Option<&BalConfig>) -> Self {
		let exclude_patterns = config
			.map(|c| c.exclude.patterns.clone())
			.unwrap_or_default();
		let extensions = config.map(|c| c.extensions.clone()).unwrap_or_default();
		let max_file_size = config.map_or(DEFAULT_MAX_FILE_SIZE, |c| c.max_file_size);
		let disable_gitignore = config.is_some_and(|c| c.disable_gitignore);

		Self {
			exclude_patterns,
			extensions,
			max_file_size,
			disable_gitignore,
		}
	}
}

/// The scan outcome for a single file.
#[derive(Debug, Clone)]
pub struct FileReport {
	/// Path to the scanned file.
	pub file: PathBuf,
	/// What the scanner found.
	pub outcome: ScanOutcome,
}

impl FileReport {
	/// Returns true when the file scanned clean.
	pub fn is_balanced(&self) -> bool {
		self.outcome.is_balanced()
	}
}

/// Scan a single file for delimiter balance.
///
/// Files larger than `max_file_size` are rejected with
/// [`BalError::FileTooLarge`]. Line endings are normalized to LF before
/// scanning so positions are stable across platforms.
pub fn scan_file(path: &Path, max_file_size: u64) -> BalResult<FileReport> {
	let metadata = std::fs::metadata(path)?;
	if metadata.len() > max_file_size {
		return Err(BalError::FileTooLarge {
			path: path.display().to_string(),
			size: metadata.len(),
			limit: max_file_size,
		});
	}

	let content = std::fs::read_to_string(path)?;
	let source = normalize_line_endings(&content);

	Ok(FileReport {
		file: path.to_path_buf(),
		outcome: scan(&source),
	})
}

/// Check a file or a directory tree for delimiter balance.
///
/// A file path is scanned directly, whatever its extension. A directory is
/// walked recursively; entries matched by `.gitignore` (unless disabled) or
/// by the exclude patterns are skipped, and oversized files are skipped with
/// a debug log instead of failing the whole walk.
pub fn check_path(path: &Path, options: &CheckOptions) -> BalResult<Vec<FileReport>> {
	if path.is_file() {
		return Ok(vec![scan_file(path, options.max_file_size)?]);
	}

	if !path.is_dir() {
		return Err(BalError::Io(std::io::Error::new(
			std::io::ErrorKind::NotFound,
			format!("no such file or directory: `{}`", path.display()),
		)));
	}

	let files = collect_files(path, options)?;
	tracing::debug!(
		"collected {} scannable file(s) under {}",
		files.len(),
		path.display()
	);

	let mut reports = Vec::with_capacity(files.len());
	for file in files {
		match scan_file(&file, options.max_file_size) {
			Ok(report) => reports.push(report),
			Err(BalError::FileTooLarge { path, size, limit }) => {
				tracing::debug!("skipping `{path}`: {size} bytes exceeds the {limit} byte limit");
			}
			Err(error) => return Err(error),
		}
	}

	Ok(reports)
}

/// Collect all scannable files from a directory tree.
///
/// When `disable_gitignore` is false (the default), files matched by the
/// project's `.gitignore` are skipped. Exclude patterns follow gitignore
/// syntax and are always applied on top.
fn collect_files(root: &Path, options: &CheckOptions) -> BalResult<Vec<PathBuf>> {
	let mut files = Vec::new();
	let mut visited_dirs = HashSet::new();

	// Build gitignore matcher (respects .gitignore unless disabled).
	let gitignore = if options.disable_gitignore {
		Gitignore::empty()
	} else {
		build_gitignore(root)
	};

	// Build exclude matcher from config patterns and --exclude flags.
	let custom_exclude = build_exclude_matcher(root, &options.exclude_patterns)?;

	walk_dir(
		root,
		&gitignore,
		&custom_exclude,
		&options.extensions,
		&mut files,
		&mut visited_dirs,
	)?;
	// Sort for deterministic ordering.
	files.sort();
	Ok(files)
}

fn is_ignored_directory_name(name: &str) -> bool {
	name.starts_with('.') || name == "node_modules" || name == "target"
}

fn walk_dir(
	dir: &Path,
	gitignore: &Gitignore,
	custom_exclude: &Gitignore,
	extensions: &[String],
	files: &mut Vec<PathBuf>,
	visited_dirs: &mut HashSet<PathBuf>,
) -> BalResult<()> {
	if !dir.is_dir() {
		return Ok(());
	}

	// Detect symlink cycles by tracking canonical paths.
	let canonical = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
	if !visited_dirs.insert(canonical) {
		return Err(BalError::SymlinkCycle {
			path: dir.display().to_string(),
		});
	}

	let entries = std::fs::read_dir(dir)?;

	for entry in entries {
		let entry = entry?;
		let path = entry.path();

		// Skip hidden entries and common non-source directories.
		if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
			if is_ignored_directory_name(name) {
				continue;
			}
		}

		let is_dir = path.is_dir();

		// Check against gitignore patterns.
		if gitignore.matched(&path, is_dir).is_ignore() {
			continue;
		}

		// Check against the custom exclude patterns.
		if custom_exclude.matched(&path, is_dir).is_ignore() {
			continue;
		}

		if is_dir {
			walk_dir(
				&path,
				gitignore,
				custom_exclude,
				extensions,
				files,
				visited_dirs,
			)?;
		} else if is_scannable_file(&path, extensions) {
			files.push(path);
		}
	}

	Ok(())
}

/// Check if a file should be scanned for delimiter balance.
fn is_scannable_file(path: &Path, extra_extensions: &[String]) -> bool {
	let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
		return false;
	};

	DEFAULT_EXTENSIONS.contains(&ext) || extra_extensions.iter().any(|extra| extra == ext)
}

/// Normalize CRLF line endings to LF.
pub fn normalize_line_endings(content: &str) -> String {
	if content.contains('\r') {
		content.replace("\r\n", "\n").replace('\r', "\n")
	} else {
		content.to_string()
	}
}

/// Build a `Gitignore` matcher from exclude patterns. These follow
/// `.gitignore` syntax and are applied on top of any `.gitignore` rules.
fn build_exclude_matcher(root: &Path, patterns: &[String]) -> BalResult<Gitignore> {
	let mut builder = GitignoreBuilder::new(root);
	for pattern in patterns {
		builder.add_line(None, pattern).map_err(|e| {
			BalError::ConfigParse(format!("invalid exclude pattern `{pattern}`: {e}"))
		})?;
	}
	builder
		.build()
		.map_err(|e| BalError::ConfigParse(format!("failed to build exclude rules: {e}")))
}

/// Build a `Gitignore` matcher from the project's `.gitignore` file (if any).
fn build_gitignore(root: &Path) -> Gitignore {
	let mut builder = GitignoreBuilder::new(root);
	// Add the project root's .gitignore if it exists.
	let gitignore_path = root.join(".gitignore");
	if gitignore_path.exists() {
		let _ = builder.add(gitignore_path);
	}
	builder.build().unwrap_or_else(|_| {
		let empty = GitignoreBuilder::new(root);
		empty.build().unwrap_or_else(|_| {
			// An empty builder always succeeds.
			Gitignore::empty()
		})
	})
}
