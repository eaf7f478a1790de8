//! File path protection
//!
//! Decides whether an agent may modify a path. Allow-override patterns are
//! checked first and always win; then protected patterns; then structural
//! checks (`..` components, symlinks) that patterns cannot see through.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use glob::Pattern;
use tracing::{debug, warn};

use crate::error::{GateError, Result};
use crate::rules::paths::{ALLOWED_PATTERNS, PROTECTED_PATTERNS};
use crate::rules::Violation;

/// Violation source for protected paths
pub const FILE_PROTECTION_SOURCE: &str = "file-protection";

/// Symlink hops followed before giving up
pub const MAX_SYMLINK_DEPTH: usize = 8;

/// Protected and allowed glob sets relative to a working directory
#[derive(Debug)]
pub struct PathPolicy {
    root: PathBuf,
    canonical_root: Option<PathBuf>,
    protected: Vec<Pattern>,
    allowed: Vec<Pattern>,
}

impl PathPolicy {
    /// Built-in patterns plus extras, rooted at `root`
    pub fn new(
        root: impl Into<PathBuf>,
        extra_protected: &[String],
        extra_allowed: &[String],
    ) -> Result<Self> {
        let protected = compile(
            PROTECTED_PATTERNS
                .iter()
                .copied()
                .chain(extra_protected.iter().map(String::as_str)),
        )?;
        let allowed = compile(
            ALLOWED_PATTERNS
                .iter()
                .copied()
                .chain(extra_allowed.iter().map(String::as_str)),
        )?;
        Ok(Self::with_patterns(root, protected, allowed))
    }

    pub fn with_patterns(
        root: impl Into<PathBuf>,
        protected: Vec<Pattern>,
        allowed: Vec<Pattern>,
    ) -> Self {
        let root = root.into();
        let canonical_root = root.canonicalize().ok();
        Self {
            root,
            canonical_root,
            protected,
            allowed,
        }
    }

    /// Whether modifying `path` must be refused
    pub fn is_protected(&self, path: &str) -> bool {
        let mut visited = HashSet::new();
        self.check(Path::new(path), &mut visited, 0)
    }

    /// One error per protected path, in input order
    pub fn evaluate<S: AsRef<str>>(&self, paths: &[S]) -> Vec<Violation> {
        paths
            .iter()
            .map(AsRef::as_ref)
            .filter(|path| self.is_protected(path))
            .map(|path| Violation::error(FILE_PROTECTION_SOURCE, format!("{} is protected", path)))
            .collect()
    }

    fn check(&self, path: &Path, visited: &mut HashSet<PathBuf>, depth: usize) -> bool {
        let relative = self.relativize(path);
        let path_str = relative.to_string_lossy();
        let as_dir = format!("{}/*", path_str);

        if let Some(pattern) = first_match(&self.allowed, &path_str, &as_dir) {
            debug!("Path {} matches allowed pattern: {}", path_str, pattern);
            return false;
        }

        if let Some(pattern) = first_match(&self.protected, &path_str, &as_dir) {
            debug!("Path {} matches protected pattern: {}", path_str, pattern);
            return true;
        }

        if relative.components().any(|c| c == Component::ParentDir) {
            warn!("Path traversal attempt detected: {}", path_str);
            return true;
        }

        let on_disk = self.root.join(&relative);
        match on_disk.symlink_metadata() {
            Ok(meta) if meta.file_type().is_symlink() => {
                warn!("Symlink detected: {}", path_str);
                self.check_symlink(&on_disk, visited, depth)
            }
            Ok(_) => false,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => {
                warn!("Cannot inspect {}: {}", path_str, e);
                false
            }
        }
    }

    fn check_symlink(&self, link: &Path, visited: &mut HashSet<PathBuf>, depth: usize) -> bool {
        if depth >= MAX_SYMLINK_DEPTH {
            warn!("Symlink chain too deep at {}, treating as protected", link.display());
            return true;
        }
        if !visited.insert(link.to_path_buf()) {
            warn!("Symlink cycle through {}, treating as protected", link.display());
            return true;
        }

        let target = match resolve_link(link) {
            Ok(target) => target,
            Err(e) => {
                warn!("Cannot resolve symlink {}: {}", link.display(), e);
                return false;
            }
        };
        self.check(&target, visited, depth + 1)
    }

    /// Absolute paths under the root become relative; others stay as given.
    /// `.` segments are dropped either way.
    fn relativize(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            let roots = std::iter::once(&self.root).chain(self.canonical_root.as_ref());
            for root in roots {
                if let Ok(rel) = path.strip_prefix(root) {
                    return without_cur_dir(rel);
                }
            }
        }
        without_cur_dir(path)
    }
}

fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| *c != Component::CurDir)
        .collect()
}

/// Final target of a link, or its raw target when the chain cannot be
/// fully resolved (dangling link, loop)
fn resolve_link(link: &Path) -> std::io::Result<PathBuf> {
    if let Ok(real) = link.canonicalize() {
        return Ok(real);
    }
    let target = std::fs::read_link(link)?;
    if target.is_absolute() {
        return Ok(target);
    }
    let parent = link.parent().unwrap_or_else(|| Path::new(""));
    Ok(parent.join(target))
}

fn compile<'a>(patterns: impl Iterator<Item = &'a str>) -> Result<Vec<Pattern>> {
    patterns
        .map(|p| Pattern::new(p).map_err(|e| GateError::invalid_pattern(p, e.msg)))
        .collect()
}

fn first_match<'p>(patterns: &'p [Pattern], path: &str, as_dir: &str) -> Option<&'p str> {
    patterns
        .iter()
        .find(|p| p.matches(path) || p.matches(as_dir))
        .map(Pattern::as_str)
}
