//! Source, target and playlist name resolution.
//!
//! Target and name fall back to values derived from the source file, and the
//! target is checked so a run can never overwrite its own input.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

/// Playlist name used when reading from standard input.
pub const STDIN_PLAYLIST_NAME: &str = "Imported Playlist";

/// Where playlist lines are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    /// Standard input only when the argument is absent.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None => Source::Stdin,
            Some(path) => Source::File(PathBuf::from(path)),
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            Source::Stdin => "<stdin>".to_string(),
            Source::File(path) => path.display().to_string(),
        }
    }
}

/// Explicit target, or the source without its trailing `.txt`.
/// `.m3u` is appended unless already present.
pub fn target_path(source: &Source, explicit: Option<&str>) -> PathBuf {
    let base = match (explicit, source) {
        (Some(target), _) => target.to_string(),
        (None, Source::File(path)) => {
            let path = path.to_string_lossy();
            path.strip_suffix(".txt").unwrap_or(&path).to_string()
        }
        (None, Source::Stdin) => STDIN_PLAYLIST_NAME.to_string(),
    };
    if base.ends_with(".m3u") {
        PathBuf::from(base)
    } else {
        PathBuf::from(format!("{}.m3u", base))
    }
}

/// Explicit name, or the source without a leading `./` and trailing `.txt`.
pub fn playlist_name(source: &Source, explicit: Option<&str>) -> String {
    if let Some(name) = explicit {
        return name.to_string();
    }
    match source {
        Source::Stdin => STDIN_PLAYLIST_NAME.to_string(),
        Source::File(path) => {
            let path = path.to_string_lossy();
            let name = path.strip_suffix(".txt").unwrap_or(&path);
            name.strip_prefix("./").unwrap_or(name).to_string()
        }
    }
}

/// Validates that the target path is safe to overwrite.
///
/// The target may not be the source file itself, either literally or after
/// resolving both paths on disk.
pub fn validate_target(target: &Path, source: &Source) -> Result<()> {
    let Source::File(source_path) = source else {
        return Ok(());
    };

    if target == source_path.as_path() {
        bail!(
            "Safety check failed: target '{}' cannot be the same as source '{}'",
            target.display(),
            source_path.display()
        );
    }

    if let (Ok(t), Ok(s)) = (target.canonicalize(), source_path.canonicalize()) {
        if t == s {
            bail!(
                "Safety check failed: target '{}' resolves to source '{}'",
                target.display(),
                source_path.display()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(p: &str) -> Source {
        Source::File(PathBuf::from(p))
    }

    #[test]
    fn test_source_from_arg() {
        assert_eq!(Source::from_arg(None), Source::Stdin);
        // "-" is an ordinary file name
        assert_eq!(Source::from_arg(Some("-")), file("-"));
        assert_eq!(Source::from_arg(Some("list.txt")), file("list.txt"));
    }

    #[test]
    fn test_target_derived_from_source() {
        assert_eq!(target_path(&file("mylist.txt"), None), PathBuf::from("mylist.m3u"));
        assert_eq!(target_path(&file("./dir/mylist.txt"), None), PathBuf::from("./dir/mylist.m3u"));
        assert_eq!(target_path(&file("mylist"), None), PathBuf::from("mylist.m3u"));
        // Only a trailing .txt is removed
        assert_eq!(target_path(&file("a.txt.b"), None), PathBuf::from("a.txt.b.m3u"));
    }

    #[test]
    fn test_explicit_target_gets_extension() {
        assert_eq!(target_path(&file("in.txt"), Some("out")), PathBuf::from("out.m3u"));
        assert_eq!(target_path(&file("in.txt"), Some("out.m3u")), PathBuf::from("out.m3u"));
        assert_eq!(target_path(&Source::Stdin, Some("out.txt")), PathBuf::from("out.txt.m3u"));
    }

    #[test]
    fn test_stdin_target_defaults_to_placeholder() {
        assert_eq!(target_path(&Source::Stdin, None), PathBuf::from("Imported Playlist.m3u"));
    }

    #[test]
    fn test_playlist_name() {
        assert_eq!(playlist_name(&file("./Road Trip.txt"), None), "Road Trip");
        assert_eq!(playlist_name(&file("Road Trip.txt"), None), "Road Trip");
        assert_eq!(playlist_name(&file("lists/Road Trip.txt"), None), "lists/Road Trip");
        assert_eq!(playlist_name(&file("Road Trip"), None), "Road Trip");
        assert_eq!(playlist_name(&file("x.txt"), Some("Mine")), "Mine");
        assert_eq!(playlist_name(&Source::Stdin, None), STDIN_PLAYLIST_NAME);
    }

    #[test]
    fn test_target_equal_to_source_is_rejected() {
        let source = file("list.m3u");
        let target = target_path(&source, None);
        let result = validate_target(&target, &source);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("cannot be the same as source"));
    }

    #[test]
    fn test_target_resolving_to_source_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let source_path = dir.path().join("list.m3u");
        std::fs::write(&source_path, "x").unwrap();
        let target = dir.path().join(".").join("list.m3u");
        assert!(validate_target(&target, &Source::File(source_path)).is_err());
    }

    #[test]
    fn test_distinct_target_is_accepted() {
        assert!(validate_target(Path::new("list.m3u"), &file("list.txt")).is_ok());
        assert!(validate_target(Path::new("list.m3u"), &Source::Stdin).is_ok());
    }
}
