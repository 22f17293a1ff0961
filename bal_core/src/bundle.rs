use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::BalError;
use crate::BalResult;

/// A single markdown document captured into a bundle.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct KnowledgeEntry {
	/// The file name of the source document, extension included.
	pub name: String,
	/// The raw text of the document.
	pub content: String,
	/// Lowercased keywords derived from the file stem, split on `-`.
	pub keywords: Vec<String>,
}

/// The serialization target for a bundle.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum BundleFormat {
	/// An ES module exporting the entries as `KNOWLEDGE_BASE`.
	#[default]
	Module,
	/// A bare JSON array.
	Json,
}

/// A description of a bundle that was written to disk.
#[derive(Clone, Debug)]
pub struct BundleSummary {
	/// Where the bundle was written.
	pub output: PathBuf,
	/// How many documents the bundle contains.
	pub entry_count: usize,
}

/// Collect the markdown documents directly inside `source`.
///
/// Only top-level `*.md` files are bundled; subdirectories are not visited.
/// Entries are sorted by file name so bundles are reproducible.
pub fn collect_entries(source: &Path) -> BalResult<Vec<KnowledgeEntry>> {
	if !source.is_dir() {
		return Err(BalError::BundleSource {
			path: source.display().to_string(),
		});
	}

	let mut paths = Vec::new();
	for entry in std::fs::read_dir(source)? {
		let entry = entry?;
		let path = entry.path();
		if path.is_file() && is_markdown_file(&path) {
			paths.push(path);
		}
	}
	paths.sort();

	let mut entries = Vec::with_capacity(paths.len());
	for path in paths {
		let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
			continue;
		};
		let content = std::fs::read_to_string(&path)?;
		entries.push(KnowledgeEntry {
			name: name.to_string(),
			content,
			keywords: derive_keywords(&path),
		});
	}

	Ok(entries)
}

/// Render a bundle to its serialized form.
pub fn render_bundle(entries: &[KnowledgeEntry], format: BundleFormat) -> BalResult<String> {
	let json = serde_json::to_string_pretty(entries)?;

	Ok(match format {
		BundleFormat::Module => format!("export const KNOWLEDGE_BASE = {json};\n"),
		BundleFormat::Json => json,
	})
}

/// Render and write a bundle to `output`, creating parent directories as
/// needed.
pub fn write_bundle(
	entries: &[KnowledgeEntry],
	output: &Path,
	format: BundleFormat,
) -> BalResult<BundleSummary> {
	let rendered = render_bundle(entries, format)?;

	if let Some(parent) = output.parent() {
		if !parent.as_os_str().is_empty() {
			std::fs::create_dir_all(parent)?;
		}
	}
	std::fs::write(output, rendered)?;

	Ok(BundleSummary {
		output: output.to_path_buf(),
		entry_count: entries.len(),
	})
}

/// Derive search keywords from a document's file stem.
///
/// The stem is lowercased and split on `-`. Empty segments are kept, so
/// `Setup--Guide.md` yields `["setup", "", "guide"]`.
fn derive_keywords(path: &Path) -> Vec<String> {
	let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
		return Vec::new();
	};

	stem.to_lowercase().split('-').map(String::from).collect()
}

fn is_markdown_file(path: &Path) -> bool {
	path.extension().and_then(|e| e.to_str()) == Some("md")
}
