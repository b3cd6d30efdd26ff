//! Staging mirror
//!
//! Clears the staging directory and rebuilds it as a filtered copy of the
//! project tree.

use super::exclude::ExclusionRules;
use crate::error::{IoResultExt, Result, StageError};
use crate::logger;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Counters for one staging run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StageReport {
    pub dirs_visited: usize,
    pub dirs_created: usize,
    pub files_copied: usize,
    pub files_skipped: usize,
}

/// Mirrors a project tree into its staging directory
#[derive(Debug, Clone)]
pub struct Stager {
    root: PathBuf,
    staging: PathBuf,
    rules: ExclusionRules,
}

impl Stager {
    /// `staging` is resolved against `root` when relative. Its directory name
    /// is always pruned from the walk so the mirror never copies itself.
    pub fn new(root: impl Into<PathBuf>, staging: impl AsRef<Path>, rules: ExclusionRules) -> Self {
        let root = root.into();
        let staging = root.join(staging.as_ref());
        let rules = match staging.file_name().and_then(|n| n.to_str()) {
            Some(name) => rules.with_dir(name),
            None => rules,
        };
        Self {
            root,
            staging,
            rules,
        }
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging
    }

    /// Clear, then mirror
    pub fn run(&self) -> Result<StageReport> {
        logger::log_stage_phase(&format!("{} contents:", self.staging.display()));
        self.clear()?;
        logger::log_stage_phase("files to copy:");
        self.mirror()
    }

    /// Remove every entry under the staging directory, keeping the directory
    /// itself. A missing staging directory is left for `mirror` to create.
    pub fn clear(&self) -> Result<()> {
        match fs::metadata(&self.staging) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(StageError::NotADirectory(self.staging.clone())),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e).with_path(&self.staging),
        }

        for entry in fs::read_dir(&self.staging).with_path(&self.staging)? {
            let entry = entry.with_path(&self.staging)?;
            let path = entry.path();
            // file_type() does not follow symlinks, so a linked directory is
            // unlinked rather than emptied
            if entry.file_type().with_path(&path)?.is_dir() {
                fs::remove_dir_all(&path).with_path(&path)?;
            } else {
                fs::remove_file(&path).with_path(&path)?;
            }
        }
        Ok(())
    }

    /// Walk the project top-down and copy everything not excluded.
    ///
    /// Within a directory, files come before subdirectories and each group
    /// is sorted by name, so the trace is stable across runs.
    pub fn mirror(&self) -> Result<StageReport> {
        let mut report = StageReport::default();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by(|a, b| {
                a.file_type()
                    .is_dir()
                    .cmp(&b.file_type().is_dir())
                    .then_with(|| a.file_name().cmp(b.file_name()))
            })
            .into_iter()
            .filter_entry(|e| !self.is_pruned(e));

        for entry in walker {
            let entry = entry?;
            let src = entry.path();
            let dst = self.destination(src);

            if entry.file_type().is_dir() {
                report.dirs_visited += 1;
                logger::log_dir_found(src, &dst);
                if !dst.is_dir() {
                    fs::create_dir_all(&dst).with_path(&dst)?;
                    logger::log_dir_created();
                    report.dirs_created += 1;
                }
                for (index, name) in self.subdirectories(src)?.iter().enumerate() {
                    logger::log_subdir(index, name);
                }
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            // Symlinks to directories are not followed. A dangling link falls
            // through to the copy and fails there.
            if self.rules.is_excluded_file(&name) || links_to_dir(&entry) {
                report.files_skipped += 1;
                continue;
            }

            logger::log_file_copied(src, &dst);
            fs::copy(src, &dst).with_path(src)?;
            report.files_copied += 1;
        }

        Ok(report)
    }

    /// Names of the subdirectories the walk will descend into, in walk order
    fn subdirectories(&self, dir: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir).with_path(dir)? {
            let entry = entry.with_path(dir)?;
            if !entry.file_type().with_path(entry.path())?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if !self.rules.is_excluded_dir(&name) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    fn is_pruned(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && self
                .rules
                .is_excluded_dir(&entry.file_name().to_string_lossy())
    }

    fn destination(&self, src: &Path) -> PathBuf {
        match src.strip_prefix(&self.root) {
            Ok(rel) if rel.as_os_str().is_empty() => self.staging.clone(),
            Ok(rel) => self.staging.join(rel),
            Err(_) => self.staging.clone(),
        }
    }
}

fn links_to_dir(entry: &DirEntry) -> bool {
    entry.path_is_symlink() && fs::metadata(entry.path()).is_ok_and(|m| m.is_dir())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    /// A small project resembling the fractal explorer layout
    fn project() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "index.html", "<html></html>");
        write(root, "script.js", "main()");
        write(root, "build.py", "import os");
        write(root, ".gitignore", ".temp");
        write(root, "bundle.wbn", "old bundle");
        write(root, "server.bat", "python server.py");
        write(root, ".git/HEAD", "ref: refs/heads/main");
        write(root, ".git/objects/ab/cdef", "blob");
        write(root, "rust/pkg/fractal_bg.wasm", "\0asm");
        write(root, "rust/.git/config", "[core]");
        write(root, "docs/paper.log", "latex noise");
        write(root, "docs/paper.pdf", "%PDF");
        write(root, "util/Utils.js", "export {}");
        write(root, ".temp/stale.txt", "from last run");
        fs::create_dir_all(root.join("minibrots")).unwrap();
        dir
    }

    /// Relative path -> file contents (None for directories)
    fn snapshot(dir: &Path) -> BTreeMap<String, Option<String>> {
        WalkDir::new(dir)
            .min_depth(1)
            .into_iter()
            .map(|e| e.unwrap())
            .map(|e| {
                let rel = e.path().strip_prefix(dir).unwrap();
                let rel = rel.to_string_lossy().replace('\\', "/");
                let contents = if e.file_type().is_dir() {
                    None
                } else {
                    Some(fs::read_to_string(e.path()).unwrap())
                };
                (rel, contents)
            })
            .collect()
    }

    fn stager(root: &Path) -> Stager {
        Stager::new(root, ".temp", ExclusionRules::default())
    }

    #[test]
    fn test_mirror_copies_kept_files() {
        let project = project();
        let stager = stager(project.path());
        stager.run().unwrap();

        let staged = snapshot(stager.staging_dir());
        assert_eq!(staged["index.html"].as_deref(), Some("<html></html>"));
        assert_eq!(staged["script.js"].as_deref(), Some("main()"));
        assert_eq!(staged["rust/pkg/fractal_bg.wasm"].as_deref(), Some("\0asm"));
        assert_eq!(staged["docs/paper.pdf"].as_deref(), Some("%PDF"));
        assert_eq!(staged["util/Utils.js"].as_deref(), Some("export {}"));
        // Empty directories are mirrored too
        assert_eq!(staged["minibrots"], None);
    }

    #[test]
    fn test_excluded_suffixes_not_staged() {
        let project = project();
        let stager = stager(project.path());
        stager.run().unwrap();

        let staged = snapshot(stager.staging_dir());
        for name in [
            "build.py",
            ".gitignore",
            "bundle.wbn",
            "server.bat",
            "docs/paper.log",
        ] {
            assert!(!staged.contains_key(name), "{name} was staged");
        }
    }

    #[test]
    fn test_excluded_dirs_pruned_at_any_depth() {
        let project = project();
        let stager = stager(project.path());
        stager.run().unwrap();

        let staged = snapshot(stager.staging_dir());
        assert!(staged
            .keys()
            .all(|k| !k.split('/').any(|seg| seg == ".git" || seg == ".temp")));
        assert!(!staged.contains_key("stale.txt"));
        assert!(staged.contains_key("rust"));
    }

    #[test]
    fn test_report_counts() {
        let project = project();
        let report = stager(project.path()).run().unwrap();
        // root, docs, minibrots, rust, rust/pkg, util
        assert_eq!(report.dirs_visited, 6);
        assert_eq!(report.files_copied, 5);
        assert_eq!(report.files_skipped, 5);
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let project = project();
        let stager = stager(project.path());

        stager.run().unwrap();
        let first = snapshot(stager.staging_dir());
        let second_report = stager.run().unwrap();
        let second = snapshot(stager.staging_dir());

        assert_eq!(first, second);
        // clear() emptied the staging dir, so every subdirectory is recreated
        assert_eq!(second_report.dirs_created, 5);
    }

    #[test]
    fn test_deleted_source_file_disappears_on_rerun() {
        let project = project();
        let stager = stager(project.path());
        stager.run().unwrap();

        fs::remove_file(project.path().join("script.js")).unwrap();
        stager.run().unwrap();

        assert!(!stager.staging_dir().join("script.js").exists());
    }

    #[test]
    fn test_clear_keeps_staging_root() {
        let project = project();
        let stager = stager(project.path());
        write(stager.staging_dir(), "nested/deep/file.txt", "x");

        stager.clear().unwrap();

        assert!(stager.staging_dir().is_dir());
        assert_eq!(fs::read_dir(stager.staging_dir()).unwrap().count(), 0);
    }

    #[test]
    fn test_clear_missing_staging_dir() {
        let dir = tempfile::tempdir().unwrap();
        let stager = stager(dir.path());
        stager.clear().unwrap();
        assert!(!stager.staging_dir().exists());

        stager.mirror().unwrap();
        assert!(stager.staging_dir().is_dir());
    }

    #[test]
    fn test_clear_rejects_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), ".temp", "not a dir");
        let err = stager(dir.path()).clear().unwrap_err();
        assert!(matches!(err, StageError::NotADirectory(_)));
    }

    #[test]
    fn test_custom_staging_name_is_pruned() {
        let project = project();
        let stager = Stager::new(project.path(), "out", ExclusionRules::default());
        stager.run().unwrap();
        stager.run().unwrap();

        assert!(!stager.staging_dir().join("out").exists());
        assert!(stager.staging_dir().join("index.html").is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_dir_not_followed() {
        let project = project();
        std::os::unix::fs::symlink(project.path().join("util"), project.path().join("linked"))
            .unwrap();
        let stager = stager(project.path());
        stager.run().unwrap();

        assert!(!stager.staging_dir().join("linked").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_aborts_run() {
        let project = project();
        std::os::unix::fs::symlink(project.path().join("gone.js"), project.path().join("app.js"))
            .unwrap();

        let err = stager(project.path()).run().unwrap_err();
        match err {
            StageError::Io { path, .. } => assert!(path.ends_with("app.js"), "{path:?}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_copied_by_content() {
        let project = project();
        std::os::unix::fs::symlink(project.path().join("script.js"), project.path().join("alias.js"))
            .unwrap();
        let stager = stager(project.path());
        stager.run().unwrap();

        let staged = stager.staging_dir().join("alias.js");
        assert!(!staged.is_symlink());
        assert_eq!(fs::read_to_string(staged).unwrap(), "main()");
    }

    #[test]
    fn test_subdirectories_listed_in_walk_order() {
        let project = project();
        let stager = stager(project.path());
        assert_eq!(
            stager.subdirectories(project.path()).unwrap(),
            ["docs", "minibrots", "rust", "util"]
        );
        assert_eq!(
            stager.subdirectories(&project.path().join("rust")).unwrap(),
            ["pkg"]
        );
    }
}
