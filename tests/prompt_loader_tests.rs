// Integration tests for prompt loading
//
// These tests verify that prompts are read from CSV in order, one per row,
// and that every call sees the current file contents.

use anyhow::Result;
use prompt_recorder::{PromptError, PromptLoader};
use tempfile::TempDir;

#[test]
fn test_loads_first_field_of_each_row() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("prompts.csv");
    std::fs::write(
        &path,
        "Hello world,ignored column\n\"Quoted, with comma\"\nPlain prompt\n",
    )?;

    let prompts = PromptLoader::new(&path).load()?;

    assert_eq!(
        prompts,
        vec!["Hello world", "Quoted, with comma", "Plain prompt"]
    );

    Ok(())
}

#[test]
fn test_skips_blank_rows() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("prompts.csv");
    std::fs::write(&path, "first\n\n\nsecond\n\n")?;

    let prompts = PromptLoader::new(&path).load()?;

    assert_eq!(prompts, vec!["first", "second"]);

    Ok(())
}

#[test]
fn test_reloads_on_every_call() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("prompts.csv");
    std::fs::write(&path, "one\n")?;

    let loader = PromptLoader::new(&path);
    assert_eq!(loader.load()?.len(), 1);

    std::fs::write(&path, "one\ntwo\nthree\n")?;
    assert_eq!(loader.load()?, vec!["one", "two", "three"]);

    Ok(())
}

#[test]
fn test_missing_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let loader = PromptLoader::new(temp_dir.path().join("missing.csv"));

    let err = loader.load().unwrap_err();
    assert!(matches!(err, PromptError::Read { .. }));
    assert!(err.to_string().contains("missing.csv"));
}
