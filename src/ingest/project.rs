//! Project-context resolution for files inside multi-project repositories

use std::path::{Component, Path};

/// Logical project a file belongs to, when one can be inferred.
///
/// Both fields are populated together or not at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectContext {
    pub project_name: Option<String>,
    pub project_relative_path: Option<String>,
}

/// Infer the project a file belongs to.
///
/// Strategy 1: scan path segments for one named "projects" (case-insensitive);
/// the next segment is the project name and the remainder is the
/// project-relative path.
///
/// Strategy 2 (only with `repo_root`): treat `repo_root/data/projects` as the
/// project container; the first segment under it is the project name. A file
/// that *is* the project root gets an empty relative path.
///
/// No match is not an error; both fields stay `None`.
pub fn resolve_project(file_path: &Path, repo_root: Option<&Path>) -> ProjectContext {
    let segments: Vec<String> = file_path
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();

    if let Some(idx) = segments.iter().position(|s| s.eq_ignore_ascii_case("projects"))
        && idx + 1 < segments.len()
    {
        let project_name = segments[idx + 1].clone();
        let relative = segments[idx + 2..].join("/");
        return ProjectContext {
            project_name: Some(project_name),
            project_relative_path: Some(relative),
        };
    }

    if let Some(root) = repo_root {
        let container = root.join("data").join("projects");
        if let Ok(rest) = file_path.strip_prefix(&container) {
            let mut parts = rest.components().filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().to_string()),
                _ => None,
            });
            if let Some(project_name) = parts.next() {
                let relative = parts.collect::<Vec<_>>().join("/");
                return ProjectContext {
                    project_name: Some(project_name),
                    project_relative_path: Some(relative),
                };
            }
        }
    }

    ProjectContext::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_projects_segment() {
        let path = PathBuf::from("/repo/projects/myapp/src/x.py");
        let ctx = resolve_project(&path, None);
        assert_eq!(ctx.project_name.as_deref(), Some("myapp"));
        assert_eq!(ctx.project_relative_path.as_deref(), Some("src/x.py"));
    }

    #[test]
    fn test_projects_segment_case_insensitive() {
        let path = PathBuf::from("/repo/Projects/myapp/lib.js");
        let ctx = resolve_project(&path, None);
        assert_eq!(ctx.project_name.as_deref(), Some("myapp"));
        assert_eq!(ctx.project_relative_path.as_deref(), Some("lib.js"));
    }

    #[test]
    fn test_projects_segment_as_last_component() {
        // "projects" with nothing after it names no project
        let path = PathBuf::from("/repo/projects");
        let ctx = resolve_project(&path, None);
        assert_eq!(ctx, ProjectContext::default());
    }

    #[test]
    fn test_repo_root_fallback() {
        let root = PathBuf::from("/repo");
        let path = PathBuf::from("/repo/data/projects/svc/main.java");
        let ctx = resolve_project(&path, Some(&root));
        assert_eq!(ctx.project_name.as_deref(), Some("svc"));
        assert_eq!(ctx.project_relative_path.as_deref(), Some("main.java"));
    }

    #[test]
    fn test_repo_root_fallback_file_is_project_root() {
        let root = PathBuf::from("/repo");
        let path = PathBuf::from("/repo/data/projects/svc");
        let ctx = resolve_project(&path, Some(&root));
        assert_eq!(ctx.project_name.as_deref(), Some("svc"));
        assert_eq!(ctx.project_relative_path.as_deref(), Some(""));
    }

    #[test]
    fn test_no_match() {
        let path = PathBuf::from("/elsewhere/src/x.py");
        let ctx = resolve_project(&path, Some(Path::new("/repo")));
        assert_eq!(ctx.project_name, None);
        assert_eq!(ctx.project_relative_path, None);
    }
}
