use std::process::{Command, Output};

pub(crate) use gasdoc_testkit::fixture_path;

pub(crate) fn fixture_arg(name: &str) -> String {
	fixture_path(name).display().to_string()
}

pub(crate) fn run_gasdoc(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_gasdoc")).args(args).output().expect("gasdoc command executes")
}

pub(crate) fn run_gasdoc_json(args: &[&str]) -> serde_json::Value {
	let output = run_gasdoc(args);
	assert!(
		output.status.success(),
		"gasdoc command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}
