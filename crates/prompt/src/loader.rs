//! Loader for YAML prompt overrides.
//!
//! Overrides live in `.vertical/prompts/` as `caption.yml`, `content.yml`
//! and `relevance.yml`. Each file may set any subset of fields; anything
//! unset keeps the built-in wording.

use crate::builder::render_template;
use crate::types::{IdeaKind, PromptLibrary, PromptOverride, PromptProfile};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use vertical_core::{AppError, AppResult};

const RELEVANCE_STEM: &str = "relevance";

fn prompts_dir(workspace_path: &Path) -> PathBuf {
    workspace_path.join(".vertical/prompts")
}

/// Load the prompt library for a workspace.
///
/// Starts from [`PromptLibrary::default`] and applies any override files
/// found in `.vertical/prompts/`.
///
/// # Example
/// ```no_run
/// use vertical_prompt::{load_library, IdeaKind};
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let library = load_library(Path::new("."))?;
/// println!("Caption keys: {:?}", library.profile(IdeaKind::Caption).candidate_keys);
/// # Ok(())
/// # }
/// ```
pub fn load_library(workspace_path: &Path) -> AppResult<PromptLibrary> {
    let mut library = PromptLibrary::default();
    let dir = prompts_dir(workspace_path);

    if !dir.exists() {
        return Ok(library);
    }

    for kind in [IdeaKind::Caption, IdeaKind::Content] {
        if let Some(over) = read_override(&dir.join(format!("{}.yml", kind.as_str())))? {
            let profile = library.profile_mut(kind);
            over.apply(profile);
            validate_profile(profile)?;
            tracing::info!("Loaded {} prompt override: {}", kind, profile.id);
        }
    }

    if let Some(over) = read_override(&dir.join(format!("{}.yml", RELEVANCE_STEM)))? {
        if let Some(template) = over.template {
            validate_template("relevance template", &template)?;
            library.relevance_template = template;
            tracing::info!("Loaded relevance prompt override");
        }
    }

    Ok(library)
}

/// List the override files present in the workspace (file stems).
pub fn list_overrides(workspace_path: &Path) -> AppResult<Vec<String>> {
    let dir = prompts_dir(workspace_path);

    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut stems = Vec::new();

    for entry in walkdir::WalkDir::new(&dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("yml") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                stems.push(stem.to_string());
            }
        }
    }

    stems.sort();
    Ok(stems)
}

fn read_override(path: &Path) -> AppResult<Option<PromptOverride>> {
    if !path.exists() {
        return Ok(None);
    }

    tracing::debug!("Loading prompt override from: {:?}", path);

    let contents = std::fs::read_to_string(path).map_err(|e| {
        AppError::Prompt(format!("Failed to read prompt file {:?}: {}", path, e))
    })?;

    let over: PromptOverride = serde_yaml::from_str(&contents).map_err(|e| {
        AppError::Prompt(format!("Failed to parse prompt YAML {:?}: {}", path, e))
    })?;

    Ok(Some(over))
}

fn validate_profile(profile: &PromptProfile) -> AppResult<()> {
    if profile.id.trim().is_empty() {
        return Err(AppError::Prompt("Prompt ID cannot be empty".to_string()));
    }

    validate_template("batchTemplate", &profile.batch_template)?;
    validate_template("singleTemplate", &profile.single_template)?;

    if profile.candidate_keys.iter().all(|k| k.trim().is_empty()) {
        return Err(AppError::Prompt(format!(
            "Prompt {} needs at least one candidate key",
            profile.id
        )));
    }

    Ok(())
}

fn validate_template(name: &str, template: &str) -> AppResult<()> {
    if template.trim().is_empty() {
        return Err(AppError::Prompt(format!("{} cannot be empty", name)));
    }

    let mut probe = HashMap::new();
    probe.insert("industry".to_string(), "Tech".to_string());
    render_template(template, &probe)
        .map(|_| ())
        .map_err(|e| AppError::Prompt(format!("Invalid {}: {}", name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_override(dir: &Path, stem: &str, content: &str) {
        let prompts = dir.join(".vertical/prompts");
        fs::create_dir_all(&prompts).unwrap();
        fs::write(prompts.join(format!("{}.yml", stem)), content).unwrap();
    }

    #[test]
    fn test_load_without_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let library = load_library(temp_dir.path()).unwrap();
        assert_eq!(library, PromptLibrary::default());
    }

    #[test]
    fn test_load_caption_override() {
        let temp_dir = TempDir::new().unwrap();
        write_override(
            temp_dir.path(),
            "caption",
            r#"
id: caption.witty
batchTemplate: "Write three witty {{industry}} captions as JSON under 'lines'."
candidateKeys: [lines, captions]
"#,
        );

        let library = load_library(temp_dir.path()).unwrap();
        let caption = library.profile(IdeaKind::Caption);
        assert_eq!(caption.id, "caption.witty");
        assert_eq!(caption.candidate_keys, vec!["lines", "captions"]);
        assert_eq!(caption.single_template, PromptProfile::caption().single_template);
        assert_eq!(library.content, PromptProfile::content());
    }

    #[test]
    fn test_load_relevance_override() {
        let temp_dir = TempDir::new().unwrap();
        write_override(
            temp_dir.path(),
            "relevance",
            "template: \"Is this about {{industry}}? Answer with is_relevant.\"\n",
        );

        let library = load_library(temp_dir.path()).unwrap();
        assert!(library.relevance_template.starts_with("Is this about"));
    }

    #[test]
    fn test_empty_candidate_keys_rejected() {
        let temp_dir = TempDir::new().unwrap();
        write_override(temp_dir.path(), "content", "candidateKeys: []\n");
        assert!(load_library(temp_dir.path()).is_err());
    }

    #[test]
    fn test_invalid_yaml_rejected() {
        let temp_dir = TempDir::new().unwrap();
        write_override(temp_dir.path(), "caption", "invalid: yaml: content:");
        assert!(load_library(temp_dir.path()).is_err());
    }

    #[test]
    fn test_list_overrides() {
        let temp_dir = TempDir::new().unwrap();
        write_override(temp_dir.path(), "content", "id: content.long\n");
        write_override(temp_dir.path(), "caption", "id: caption.short\n");

        let stems = list_overrides(temp_dir.path()).unwrap();
        assert_eq!(stems, vec!["caption", "content"]);
    }
}
