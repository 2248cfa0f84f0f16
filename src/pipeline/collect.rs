//! Audio file discovery and source-to-destination path mapping.

use crate::constants::{AUDIO_EXTENSIONS, OUTPUT_EXTENSION};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Recursively collect audio files under `root`, sorted by path.
pub fn collect_audio_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(Error::SourceNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    if root.is_file() {
        if is_audio_file(root) {
            files.push(root.to_path_buf());
        }
    } else {
        collect_audio_files_recursive(root, &mut files)?;
    }

    files.sort();
    Ok(files)
}

fn collect_audio_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            collect_audio_files_recursive(&path, files)?;
        } else if is_audio_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

/// Check if a file has a recognised audio extension.
pub fn is_audio_file(path: &Path) -> bool {
    use std::ffi::OsStr;

    path.extension().is_some_and(|ext| {
        AUDIO_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(OsStr::new(known)))
    })
}

/// Map `file` under `src_root` to the same relative location under `dst_root`.
///
/// Returns the source-relative path alongside the destination. The
/// destination always carries a `.wav` extension since output is PCM WAV
/// whatever the input container. Files outside `src_root` keep only their
/// file name.
pub fn mirrored_path(file: &Path, src_root: &Path, dst_root: &Path) -> (PathBuf, PathBuf) {
    let relative = file.strip_prefix(src_root).map_or_else(
        |_| file.file_name().map_or_else(PathBuf::new, PathBuf::from),
        Path::to_path_buf,
    );
    let destination = dst_root.join(&relative).with_extension(OUTPUT_EXTENSION);
    (relative, destination)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_is_audio_file() {
        assert!(is_audio_file(Path::new("test.wav")));
        assert!(is_audio_file(Path::new("test.WAV")));
        assert!(is_audio_file(Path::new("test.flac")));
        assert!(!is_audio_file(Path::new("test.txt")));
        assert!(!is_audio_file(Path::new("wav")));
    }

    #[test]
    fn test_is_audio_file_with_unicode() {
        assert!(is_audio_file(Path::new("привет_мир.wav")));
        assert!(is_audio_file(Path::new("テスト.wav")));
    }

    #[test]
    fn test_collect_recursive_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("b/c")).unwrap();
        fs::write(dir.path().join("b/c/2.wav"), b"").unwrap();
        fs::write(dir.path().join("a.wav"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();

        let files = collect_audio_files(dir.path()).unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("a.wav"), dir.path().join("b/c/2.wav")]
        );
    }

    #[test]
    fn test_collect_missing_root() {
        let result = collect_audio_files(Path::new("/nonexistent/corpus"));
        assert!(matches!(result, Err(Error::SourceNotFound { .. })));
    }

    #[test]
    fn test_mirrored_path() {
        let (rel, dst) = mirrored_path(
            Path::new("/data/spk1/001.wav"),
            Path::new("/data"),
            Path::new("/out"),
        );
        assert_eq!(rel, PathBuf::from("spk1/001.wav"));
        assert_eq!(dst, PathBuf::from("/out/spk1/001.wav"));
    }

    #[test]
    fn test_mirrored_path_flac_becomes_wav() {
        let (rel, dst) = mirrored_path(
            Path::new("/data/spk1/001.FLAC"),
            Path::new("/data"),
            Path::new("/out"),
        );
        assert_eq!(rel, PathBuf::from("spk1/001.FLAC"));
        assert_eq!(dst, PathBuf::from("/out/spk1/001.wav"));
    }
}
