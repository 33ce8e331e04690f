//! Loading and saving prompt documents as YAML files.

use crate::document::PromptDocument;
use prompthub_core::{AppError, AppResult};
use std::path::Path;

/// Load a prompt document from a YAML file.
///
/// # Errors
/// - `MissingDocument` if the file does not exist
/// - `MalformedDocument` if it is not YAML or its top level is not a mapping
///
/// # Example
/// ```no_run
/// use prompthub_prompt::load_document;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let doc = load_document(Path::new("prompts/bug_to_user_story_v2.yml"))?;
/// println!("Loaded prompt: {}", doc.name);
/// # Ok(())
/// # }
/// ```
pub fn load_document(path: &Path) -> AppResult<PromptDocument> {
    tracing::debug!("Loading prompt document from: {:?}", path);

    if !path.is_file() {
        return Err(AppError::MissingDocument(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path)?;

    let value: serde_yaml::Value = serde_yaml::from_str(&contents).map_err(|e| {
        AppError::MalformedDocument(format!("Failed to parse YAML {:?}: {}", path, e))
    })?;

    if !value.is_mapping() {
        return Err(AppError::MalformedDocument(format!(
            "{:?} does not contain a key/value mapping",
            path
        )));
    }

    let document: PromptDocument = serde_yaml::from_value(value).map_err(|e| {
        AppError::MalformedDocument(format!("Invalid prompt document {:?}: {}", path, e))
    })?;

    tracing::info!("Loaded prompt document: {}", document.name);

    Ok(document)
}

/// Save a prompt document as YAML, creating parent directories.
pub fn save_document(path: &Path, document: &PromptDocument) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let contents = serde_yaml::to_string(document)?;
    std::fs::write(path, contents)?;

    tracing::info!("Saved prompt document {} to {:?}", document.name, path);

    Ok(())
}

/// List the document names (`.yml` stems) in a prompts directory, sorted.
pub fn list_documents(prompts_dir: &Path) -> AppResult<Vec<String>> {
    if !prompts_dir.exists() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();

    for entry in walkdir::WalkDir::new(prompts_dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("yml") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
    }

    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.yml");
        fs::write(
            &path,
            "name: bug_to_user_story_v2\nsystem_prompt: Você é um PM\ntechniques: [few-shot, cot]\n",
        )
        .unwrap();

        let doc = load_document(&path).unwrap();
        assert_eq!(doc.name, "bug_to_user_story_v2");
        assert_eq!(doc.techniques().len(), 2);
    }

    #[test]
    fn test_load_nonexistent_document() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_document(&temp_dir.path().join("missing.yml"));
        assert!(matches!(result, Err(AppError::MissingDocument(_))));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.yml");
        fs::write(&path, "name: [unclosed").unwrap();

        let result = load_document(&path);
        assert!(matches!(result, Err(AppError::MalformedDocument(_))));
    }

    #[test]
    fn test_load_non_mapping() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("list.yml");
        fs::write(&path, "- just\n- a list\n").unwrap();

        let result = load_document(&path);
        assert!(matches!(result, Err(AppError::MalformedDocument(_))));
    }

    #[test]
    fn test_load_datetime_created_at() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.yml");
        fs::write(&path, "name: x\ncreated_at: 2025-01-15T10:00:00\n").unwrap();

        let doc = load_document(&path).unwrap();
        assert_eq!(doc.created_at, chrono::NaiveDate::from_ymd_opt(2025, 1, 15));
    }

    #[test]
    fn test_load_free_text_created_at() {
        let temp_dir = TempDir::new().unwrap();
        for (file, value) in [("slashes.yml", "\"15/01/2025\""), ("word.yml", "today")] {
            let path = temp_dir.path().join(file);
            fs::write(&path, format!("name: x\ncreated_at: {}\n", value)).unwrap();

            let doc = load_document(&path).unwrap();
            assert_eq!(doc.name, "x");
            assert!(doc.created_at.is_none());
        }
    }

    #[test]
    fn test_save_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prompts/nested/doc.yml");

        save_document(&path, &PromptDocument::new("doc")).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_list_documents() {
        let temp_dir = TempDir::new().unwrap();
        save_document(&temp_dir.path().join("b.yml"), &PromptDocument::new("b")).unwrap();
        save_document(&temp_dir.path().join("a.yml"), &PromptDocument::new("a")).unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

        let names = list_documents(temp_dir.path()).unwrap();
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_list_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let names = list_documents(&temp_dir.path().join("nope")).unwrap();
        assert!(names.is_empty());
    }
}
