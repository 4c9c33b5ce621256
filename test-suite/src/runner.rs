use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

use validated_json_cli::records::render;

use crate::test_case::Expectation;
use crate::{TestCase, TestFailure, TestResults};

pub struct TestRunner {
    cases_dir: PathBuf,
    filter: Option<String>,
}

impl TestRunner {
    pub fn new(cases_dir: impl Into<PathBuf>) -> Self {
        Self {
            cases_dir: cases_dir.into(),
            filter: None,
        }
    }

    /// Only run cases whose name contains `filter`.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Discover and run all test cases
    pub fn run_all(&self) -> Result<TestResults> {
        let mut results = TestResults::new();

        for test_file in self.discover_test_files()? {
            let name = self.case_name(&test_file);
            if let Some(filter) = &self.filter
                && !name.contains(filter.as_str())
            {
                continue;
            }

            let content = fs::read_to_string(&test_file)
                .with_context(|| format!("Failed to read test file: {}", test_file.display()))?;

            match TestCase::parse(&name, &content) {
                Ok(test_case) => match run_test_case(&test_case) {
                    Ok(()) => results.add_pass(),
                    Err(e) => results.add_failure(TestFailure::new(name, e.to_string())),
                },
                Err(e) => {
                    results.add_failure(TestFailure::new(
                        name,
                        format!("Failed to parse test case: {}", e),
                    ));
                }
            }
        }

        Ok(results)
    }

    /// Case name: the file path relative to the cases directory, without extension.
    fn case_name(&self, path: &Path) -> String {
        path.strip_prefix(&self.cases_dir)
            .unwrap_or(path)
            .with_extension("")
            .display()
            .to_string()
    }

    /// Discover all .json case files
    fn discover_test_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        walk_directory(&self.cases_dir, &mut files)?;
        files.sort();
        Ok(files)
    }
}

fn walk_directory(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    if !dir.exists() {
        return Ok(());
    }

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            walk_directory(&path, files)?;
        } else if path.extension().and_then(|s| s.to_str()) == Some("json") {
            files.push(path);
        }
    }

    Ok(())
}

/// Run a single test case
pub fn run_test_case(test_case: &TestCase) -> Result<()> {
    let actual = test_case
        .document()
        .and_then(|data| render(test_case.record, &data, test_case.unknown_fields()));

    match (&test_case.expected, actual) {
        (Expectation::Output(expected), Ok(actual)) if *expected == actual => Ok(()),
        (Expectation::Error(expected), Err(actual)) if *expected == actual.to_string() => Ok(()),
        (Expectation::Output(expected), Ok(actual)) => {
            bail!("Output mismatch.\nExpected: {expected}\nActual: {actual}")
        }
        (Expectation::Error(expected), Err(actual)) => {
            bail!("Error mismatch.\nExpected: {expected}\nActual: {actual}")
        }
        (Expectation::Output(expected), Err(actual)) => {
            bail!("Expected output {expected:?} but validation failed: {actual}")
        }
        (Expectation::Error(expected), Ok(actual)) => {
            bail!("Expected error {expected:?} but validation succeeded with: {actual}")
        }
    }
}
