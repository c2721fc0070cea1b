//! Ignore-aware project enumeration for filesum.
//!
//! [enumerate] walks a git project depth first and returns every file that git would not
//! ignore, relative to the project root. Ignored directories are pruned before descending,
//! so large ignored trees (`target/`, `node_modules/`) are never read.
//!
//! Pattern sources are combined into [IgnoreRules]:
//! - every `.gitignore` in a visited directory, scoped to that directory's subtree
//! - `.git/info/exclude` of the project
//! - the user's global git excludes file (optional)
//!
//! A deeper `.gitignore` wins over a shallower one, and all of them win over the excludes,
//! which is the precedence git itself uses.

use crate::core::error::EnumerationError;

use ignore::Match;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use walkdir::WalkDir;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Name of the version control metadata directory. Always skipped.
pub const GIT_DIR: &str = ".git";

const IGNORE_FILE: &str = ".gitignore";

/// Options for a single enumeration.
#[derive(Debug, Clone, Copy)]
pub struct WalkOptions {
    /// Fail with [EnumerationError::NotARepository] if the root has no `.git`.
    pub require_git: bool,
    /// Also honor the user's global git excludes file.
    pub global_excludes: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            require_git: true,
            global_excludes: true,
        }
    }
}

/// The combined ignore pattern set of one project.
///
/// Matchers for nested `.gitignore` files are registered while walking, through
/// [IgnoreRules::add_dir], so that ignored directories never contribute patterns.
pub struct IgnoreRules {
    root: PathBuf,
    dirs: HashMap<PathBuf, Gitignore>,
    excludes: Vec<Gitignore>,
}

impl IgnoreRules {
    /// Loads the root `.gitignore`, `.git/info/exclude` and, when requested, the global excludes.
    ///
    /// `root` is expected to be absolute, paths passed to [IgnoreRules::is_ignored] must live under it.
    pub fn load(root: &Path, global_excludes: bool) -> Result<Self, EnumerationError> {
        let mut rules = Self {
            root: root.to_path_buf(),
            dirs: HashMap::new(),
            excludes: Vec::new(),
        };

        rules.add_dir(root)?;

        let info_exclude = root.join(GIT_DIR).join("info").join("exclude");
        if info_exclude.is_file() {
            let matcher = build_matcher(root, &info_exclude)?;
            if !matcher.is_empty() {
                rules.excludes.push(matcher);
            }
        }

        if global_excludes {
            let (global, err) = Gitignore::global();
            if let Some(err) = err {
                tracing::warn!(error = %err, "ignoring unreadable global git excludes");
            }
            if !global.is_empty() {
                tracing::debug!(patterns = global.num_ignores(), "loaded global git excludes");
                rules.excludes.push(global);
            }
        }

        Ok(rules)
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Registers the `.gitignore` of `dir`, if it has one.
    pub fn add_dir(&mut self, dir: &Path) -> Result<(), EnumerationError> {
        let file = dir.join(IGNORE_FILE);
        if !file.is_file() {
            return Ok(());
        }

        let matcher = build_matcher(dir, &file)?;
        if !matcher.is_empty() {
            tracing::debug!(file = %file.display(), patterns = matcher.len(), "loaded ignore file");
            self.dirs.insert(dir.to_path_buf(), matcher);
        }
        Ok(())
    }

    /// Returns true if `path` is ignored by the nearest matching pattern.
    ///
    /// Parent directories are not consulted: the walk never reaches a path whose parent was
    /// ignored.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        let scoped = path
            .ancestors()
            .skip(1)
            .take_while(|dir| dir.starts_with(&self.root))
            .filter_map(|dir| self.dirs.get(dir));

        for matcher in scoped.chain(self.excludes.iter()) {
            match matcher.matched(path, is_dir) {
                Match::Ignore(_) => return true,
                Match::Whitelist(_) => return false,
                Match::None => {}
            }
        }
        false
    }
}

fn build_matcher(root: &Path, file: &Path) -> Result<Gitignore, EnumerationError> {
    let mut builder = GitignoreBuilder::new(root);
    if let Some(source) = builder.add(file) {
        return Err(EnumerationError::Patterns {
            path: file.to_path_buf(),
            source,
        });
    }
    builder.build().map_err(|source| EnumerationError::Patterns {
        path: file.to_path_buf(),
        source,
    })
}

/// Lists the files of the project at `root`, in traversal order.
///
/// Children are visited in file name order so the result is stable for a fixed tree.
/// Directories are never returned. Symlinks are returned as files and are not followed.
///
/// # Returns
/// Paths relative to `root`, or the first filesystem error encountered.
pub fn enumerate(root: &Path, options: WalkOptions) -> Result<Vec<PathBuf>, EnumerationError> {
    let root = root.canonicalize()?;

    if options.require_git && !root.join(GIT_DIR).exists() {
        return Err(EnumerationError::NotARepository(root));
    }

    let mut rules = IgnoreRules::load(&root, options.global_excludes)?;
    let mut files = Vec::with_capacity(256);

    let mut walker = WalkDir::new(&root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    while let Some(next) = walker.next() {
        let entry = next.map_err(|source| EnumerationError::Walk {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.clone()),
            source,
        })?;

        if entry.depth() == 0 {
            continue;
        }

        let path = entry.path();
        let file_type = entry.file_type();
        let is_dir = file_type.is_dir();

        if entry.file_name() == GIT_DIR {
            if is_dir {
                walker.skip_current_dir();
            }
            continue;
        }

        if rules.is_ignored(path, is_dir) {
            if is_dir {
                tracing::trace!(dir = %path.display(), "pruned ignored directory");
                walker.skip_current_dir();
            }
            continue;
        }

        if is_dir {
            rules.add_dir(path)?;
            continue;
        }

        if (file_type.is_file() || file_type.is_symlink())
            && let Ok(relative) = path.strip_prefix(&root)
        {
            files.push(relative.to_path_buf());
        }
    }

    tracing::info!(root = %root.display(), files = files.len(), "enumerated project");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;
    use tempfile::{TempDir, tempdir};

    fn project(files: &[&str]) -> Result<TempDir, Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::create_dir_all(dir.path().join(".git/info"))?;
        fs::write(dir.path().join(".git/HEAD"), "ref: refs/heads/main\n")?;
        for f in files {
            let path = dir.path().join(f);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, f.as_bytes())?;
        }
        Ok(dir)
    }

    fn local() -> WalkOptions {
        WalkOptions {
            require_git: true,
            global_excludes: false,
        }
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn lists_files_in_name_order_without_git_dir() -> Result<(), Box<dyn std::error::Error>> {
        let dir = project(&["b.bin", "a.txt", "src/main.rs"])?;
        let files = enumerate(dir.path(), local())?;
        assert_eq!(names(&files), vec!["a.txt", "b.bin", "src/main.rs"]);
        Ok(())
    }

    #[test]
    fn nested_ignore_file_only_applies_below_its_directory() -> Result<(), Box<dyn std::error::Error>>
    {
        let dir = project(&["top.log", "sub/inner.log", "sub/keep.rs"])?;
        fs::write(dir.path().join("sub/.gitignore"), "*.log\n")?;

        let files = names(&enumerate(dir.path(), local())?);
        assert!(files.contains(&"top.log".to_string()));
        assert!(!files.contains(&"sub/inner.log".to_string()));
        assert!(files.contains(&"sub/keep.rs".to_string()));
        Ok(())
    }

    #[test]
    fn deeper_whitelist_overrides_root_pattern() -> Result<(), Box<dyn std::error::Error>> {
        let dir = project(&["a.tmp", "keep/b.tmp"])?;
        fs::write(dir.path().join(".gitignore"), "*.tmp\n")?;
        fs::write(dir.path().join("keep/.gitignore"), "!b.tmp\n")?;

        let files = names(&enumerate(dir.path(), local())?);
        assert!(!files.contains(&"a.tmp".to_string()));
        assert!(files.contains(&"keep/b.tmp".to_string()));
        Ok(())
    }

    #[test]
    fn info_exclude_is_honored() -> Result<(), Box<dyn std::error::Error>> {
        let dir = project(&["secret.env", "main.rs"])?;
        fs::write(dir.path().join(".git/info/exclude"), "*.env\n")?;

        let files = names(&enumerate(dir.path(), local())?);
        assert_eq!(files, vec!["main.rs"]);
        Ok(())
    }

    #[test]
    fn ignored_directory_is_not_descended() -> Result<(), Box<dyn std::error::Error>> {
        let dir = project(&["target/debug/app", "src/lib.rs"])?;
        fs::write(dir.path().join(".gitignore"), "target/\n")?;
        // A whitelist inside a pruned directory must have no effect.
        fs::write(dir.path().join("target/.gitignore"), "!*\n")?;

        let files = names(&enumerate(dir.path(), local())?);
        assert!(files.iter().all(|f| !f.starts_with("target")));
        assert!(files.contains(&"src/lib.rs".to_string()));
        Ok(())
    }

    #[test]
    fn missing_git_dir_is_rejected_unless_allowed() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::write(dir.path().join("a.txt"), "a")?;

        assert!(matches!(
            enumerate(dir.path(), local()),
            Err(EnumerationError::NotARepository(_))
        ));

        let files = enumerate(
            dir.path(),
            WalkOptions {
                require_git: false,
                global_excludes: false,
            },
        )?;
        assert_eq!(names(&files), vec!["a.txt"]);
        Ok(())
    }

    #[test]
    fn rules_match_directories_and_files() -> Result<(), Box<dyn std::error::Error>> {
        let dir = project(&[])?;
        fs::write(dir.path().join(".gitignore"), "build/\n*.o\n")?;
        let root = dir.path().canonicalize()?;
        let rules = IgnoreRules::load(&root, false)?;

        assert!(rules.is_ignored(&root.join("build"), true));
        assert!(!rules.is_ignored(&root.join("build"), false));
        assert!(rules.is_ignored(&root.join("x.o"), false));
        assert!(!rules.is_ignored(&root.join("x.c"), false));
        Ok(())
    }
}
