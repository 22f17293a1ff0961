//! Shared sources and filesystem helpers for the test suite.

use std::path::Path;

/// A source exercising every delimiter pair plus comments and literals that
/// hide unbalanced delimiters.
pub const BALANCED_SOURCE: &str = r#"// setup notes: stray ] } ) here are ignored
const config = {
	name: "bal",
	values: [1, 2, 3],
	banner: `multi ${line}`,
	compute: (a, b) => {
		/* stray openers ( [ { live here */
		return 'done';
	},
};
"#;

/// A source whose second line closes a bracket with the wrong delimiter.
/// The fault is at 2:27 and the offending opener at 2:18.
pub const MISMATCH_SOURCE: &str = r#"function launch() {
	const payload = ["a", "b");
}
"#;

/// A source that never closes the brace opened at 1:28.
pub const UNCLOSED_SOURCE: &str = r#"const handler = (event) => {
	process(event);
"#;

/// Write `content` at `relative` under `root`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent).unwrap_or_else(|e| panic!("create dir: {e}"));
	}
	std::fs::write(&path, content).unwrap_or_else(|e| panic!("write: {e}"));
}
