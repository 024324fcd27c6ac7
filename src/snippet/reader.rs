/// Snippet reader
///
/// Reads a registry entry's source file and checks its marker line. Runs before any
/// network call so a mislabelled file never reaches the remote instance.

use crate::error::{DeployError, Result};
use crate::snippet::types::{RegistryEntry, Snippet};
use std::path::{Path, PathBuf};

/// Resolve an entry's file_path against the repository root
pub fn resolve_path(entry: &RegistryEntry, root_dir: &Path) -> PathBuf {
    let path = Path::new(&entry.file_path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root_dir.join(path)
    }
}

/// Read and validate the snippet file for `entry`
pub fn read_snippet(entry: &RegistryEntry, root_dir: &Path) -> Result<Snippet> {
    let path = resolve_path(entry, root_dir);

    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DeployError::FileNotFound(path));
        }
        Err(source) => return Err(DeployError::Io { path, source }),
    };

    validate_marker(entry, &path, &source)?;

    tracing::debug!("📄 Read snippet {} ({} bytes) from {}", entry.snippet_id, source.len(), path.display());

    Ok(Snippet {
        id: entry.snippet_id.clone(),
        source,
    })
}

/// First line must be exactly `# snippet: <snippet_id>`
pub fn validate_marker(entry: &RegistryEntry, path: &Path, source: &str) -> Result<()> {
    let expected = entry.expected_marker();
    let first_line = source.lines().next().unwrap_or("");
    // lines() already strips "\r\n"; a lone trailing '\r' can remain on the last line
    let first_line = first_line.strip_suffix('\r').unwrap_or(first_line);

    if first_line != expected {
        return Err(DeployError::MarkerMismatch {
            path: path.to_path_buf(),
            expected,
            found: first_line.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, file_path: &str) -> RegistryEntry {
        RegistryEntry {
            snippet_id: id.to_string(),
            workflow_id: "wf1".to_string(),
            node_name: "Check URL".to_string(),
            file_path: file_path.to_string(),
            name: None,
            description: None,
        }
    }

    #[test]
    fn reads_full_text_including_marker() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("snippets")).unwrap();
        let body = "# snippet: url_health_check\nimport requests\n";
        std::fs::write(dir.path().join("snippets/url_health_check.py"), body).unwrap();

        let snippet = read_snippet(
            &entry("url_health_check", "snippets/url_health_check.py"),
            dir.path(),
        )
        .unwrap();
        assert_eq!(snippet.id, "url_health_check");
        assert_eq!(snippet.source, body);
        assert_eq!(snippet.line_count(), 2);
    }

    #[test]
    fn wrong_marker_id_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.py"), "# snippet: wrong_id\nprint(1)\n").unwrap();

        let err = read_snippet(&entry("url_health_check", "a.py"), dir.path()).unwrap_err();
        match err {
            DeployError::MarkerMismatch { expected, found, .. } => {
                assert_eq!(expected, "# snippet: url_health_check");
                assert_eq!(found, "# snippet: wrong_id");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn marker_must_be_on_first_line() {
        let e = entry("a", "a.py");
        let path = Path::new("a.py");
        assert!(validate_marker(&e, path, "\n# snippet: a\n").is_err());
        assert!(validate_marker(&e, path, "").is_err());
        assert!(validate_marker(&e, path, "# snippet: ab\n").is_err());
        assert!(validate_marker(&e, path, " # snippet: a\n").is_err());
        assert!(validate_marker(&e, path, "# snippet: a\r\nx = 1\r\n").is_ok());
        assert!(validate_marker(&e, path, "# snippet: a").is_ok());
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_snippet(&entry("a", "nope.py"), dir.path()).unwrap_err();
        assert!(matches!(err, DeployError::FileNotFound(ref p) if p.ends_with("nope.py")));
    }

    #[test]
    fn absolute_paths_ignore_root() {
        let dir = tempfile::tempdir().unwrap();
        let abs = dir.path().join("abs.py");
        let e = entry("a", abs.to_str().unwrap());
        assert_eq!(resolve_path(&e, Path::new("/elsewhere")), abs);
    }
}
