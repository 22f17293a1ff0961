mod common;

use std::path::PathBuf;

use bal_cli::BalCli;
use bal_cli::BundleOutputFormat;
use bal_cli::Commands;
use bal_core::AnyEmptyResult;
use bal_core::KnowledgeEntry;
use serde_json::Value;

#[test]
fn bundle_writes_an_es_module() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join("docs"))?;
	std::fs::write(tmp.path().join("docs/alpha.md"), "# Alpha\n")?;
	std::fs::write(tmp.path().join("docs/beta-notes.md"), "# Beta\n")?;

	let mut cmd = common::bal_cmd();
	cmd.arg("bundle")
		.arg("docs")
		.arg("--output")
		.arg("kb.js")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Bundled 2 file(s) into kb.js."));

	let content = std::fs::read_to_string(tmp.path().join("kb.js"))?;
	let json_text = content
		.strip_prefix("export const KNOWLEDGE_BASE = ")
		.and_then(|rest| rest.strip_suffix(";\n"))
		.unwrap_or_else(|| panic!("unexpected module framing: {content}"));

	let entries: Value = serde_json::from_str(json_text)?;
	assert_eq!(entries[0]["name"], "alpha.md");
	assert_eq!(entries[0]["content"], "# Alpha\n");
	assert_eq!(entries[0]["keywords"], serde_json::json!(["alpha"]));
	assert_eq!(entries[1]["name"], "beta-notes.md");
	assert_eq!(entries[1]["keywords"], serde_json::json!(["beta", "notes"]));

	Ok(())
}

#[test]
fn bundle_json_format_writes_a_bare_array() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join("docs"))?;
	std::fs::write(tmp.path().join("docs/alpha.md"), "# Alpha\n")?;
	std::fs::write(tmp.path().join("docs/beta.md"), "# Beta\n")?;

	let mut cmd = common::bal_cmd();
	cmd.arg("bundle")
		.arg("docs")
		.arg("--output")
		.arg("kb.json")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	// The JSON format round-trips through the public entry type.
	let content = std::fs::read_to_string(tmp.path().join("kb.json"))?;
	let entries: Vec<KnowledgeEntry> = serde_json::from_str(&content)?;
	assert_eq!(entries.len(), 2);
	assert_eq!(entries[0].name, "alpha.md");
	assert_eq!(entries[1].content, "# Beta\n");

	Ok(())
}

#[test]
fn bundle_missing_source_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	let mut cmd = common::bal_cmd();
	cmd.arg("bundle")
		.arg("missing")
		.arg("--output")
		.arg("kb.js")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains(
			"bundle source is not a directory",
		));

	Ok(())
}

#[test]
fn bundle_creates_parent_directories_for_the_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join("docs"))?;
	std::fs::write(tmp.path().join("docs/alpha.md"), "# Alpha\n")?;

	let mut cmd = common::bal_cmd();
	cmd.arg("bundle")
		.arg("docs")
		.arg("--output")
		.arg("nested/deep/kb.js")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"Bundled 1 file(s) into nested/deep/kb.js.",
		));

	assert!(tmp.path().join("nested/deep/kb.js").is_file());

	Ok(())
}

#[test]
fn bundle_flags_are_accepted_by_cli_parser() {
	use clap::Parser;

	let cli = BalCli::parse_from([
		"bal", "bundle", "docs", "--output", "kb.js", "--format", "json",
	]);
	match cli.command {
		Some(Commands::Bundle {
			source,
			output,
			format,
		}) => {
			assert_eq!(source, PathBuf::from("docs"));
			assert_eq!(output, PathBuf::from("kb.js"));
			assert!(matches!(format, BundleOutputFormat::Json));
		}
		_ => panic!("expected Bundle command"),
	}
}
