//! Template rendering and copying
//!
//! Text files are rendered with Tera against a JSON context; files that are
//! not valid UTF-8 are copied byte for byte.

use crate::error::{GeneratorError, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use walkdir::WalkDir;

/// Render a single template string
pub fn render_str(source: &Path, template: &str, context: &Context) -> Result<String> {
    Tera::one_off(template, context, false).map_err(|e| GeneratorError::Template {
        path: source.to_path_buf(),
        source: e,
    })
}

/// Copy `from` (a file or a directory tree) to `to`, rendering every text
/// file with `data` as context. Returns the written destination paths.
pub fn copy_template(from: &Path, to: &Path, data: &Value) -> Result<Vec<PathBuf>> {
    let context = Context::from_value(data.clone()).map_err(|e| GeneratorError::Template {
        path: from.to_path_buf(),
        source: e,
    })?;

    if !from.is_dir() {
        render_file(from, to, &context)?;
        return Ok(vec![to.to_path_buf()]);
    }

    let mut written = Vec::new();
    for entry in WalkDir::new(from).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(from).to_path_buf();
            GeneratorError::io(path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(from).unwrap_or(entry.path());
        let destination = to.join(relative);
        render_file(entry.path(), &destination, &context)?;
        written.push(destination);
    }

    tracing::debug!(
        from = %from.display(),
        to = %to.display(),
        files = written.len(),
        "copied template tree"
    );
    Ok(written)
}

fn render_file(source: &Path, destination: &Path, context: &Context) -> Result<()> {
    let bytes = fs::read(source).map_err(|e| GeneratorError::io(source, e))?;

    let output = match String::from_utf8(bytes) {
        Ok(text) => render_str(source, &text, context)?.into_bytes(),
        Err(raw) => raw.into_bytes(),
    };

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::io(parent, e))?;
    }
    fs::write(destination, output).map_err(|e| GeneratorError::io(destination, e))?;

    tracing::trace!(source = %source.display(), destination = %destination.display(), "rendered template");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_copy_single_file() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("README.md");
        fs::write(&source, "# {{ name }}\n").unwrap();

        let destination = dir.path().join("out").join("README.md");
        let written = copy_template(&source, &destination, &json!({"name": "my-lib"})).unwrap();

        assert_eq!(written, vec![destination.clone()]);
        assert_eq!(fs::read_to_string(destination).unwrap(), "# my-lib\n");
    }

    #[test]
    fn test_copy_tree_with_conditionals() {
        let dir = TempDir::new().unwrap();
        let templates = dir.path().join("templates");
        fs::create_dir_all(templates.join("src")).unwrap();
        fs::write(templates.join("src").join("index.ts"), "export const name = '{{ name }}';\n").unwrap();
        fs::write(
            templates.join("notes.txt"),
            "{% if test %}tests enabled{% else %}no tests{% endif %}",
        )
        .unwrap();

        let out = dir.path().join("out");
        let written = copy_template(&templates, &out, &json!({"name": "lib", "test": false})).unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(
            fs::read_to_string(out.join("src").join("index.ts")).unwrap(),
            "export const name = 'lib';\n"
        );
        assert_eq!(fs::read_to_string(out.join("notes.txt")).unwrap(), "no tests");
    }

    #[test]
    fn test_binary_files_are_copied_verbatim() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("logo.bin");
        let bytes = vec![0xff, 0xfe, 0x7b, 0x7b, 0x00];
        fs::write(&source, &bytes).unwrap();

        let destination = dir.path().join("copy.bin");
        copy_template(&source, &destination, &json!({})).unwrap();
        assert_eq!(fs::read(destination).unwrap(), bytes);
    }

    #[test]
    fn test_render_error_names_the_template() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("bad.txt");
        fs::write(&source, "{{ missing_var }}").unwrap();

        let err = copy_template(&source, &dir.path().join("out.txt"), &json!({})).unwrap_err();
        assert!(matches!(err, GeneratorError::Template { .. }));
        assert!(err.to_string().contains("bad.txt"));
    }
}
