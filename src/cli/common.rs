//! Input and output helpers shared by the commands.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// `-` (or no path) means stdin/stdout.
pub fn is_stdio(path: Option<&Path>) -> bool {
    path.is_none_or(|p| p.as_os_str() == "-")
}

/// Read a whole input as UTF-8 text.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if !is_stdio(Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// Write bytes to `path`, creating parent directories, or to stdout.
pub fn write_output(path: Option<&Path>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) if !is_stdio(Some(path)) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create `{}`", parent.display()))?;
            }
            fs::write(path, data).with_context(|| format!("failed to write `{}`", path.display()))
        }
        _ => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data)?;
            if !data.ends_with(b"\n") {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
            Ok(())
        }
    }
}

/// Display name for logs.
pub fn input_label(path: Option<&Path>) -> String {
    match path {
        Some(path) if !is_stdio(Some(path)) => path.display().to_string(),
        _ => "<stdin>".to_string(),
    }
}

/// `out_dir/<stem>.svg` for an input file.
pub fn artifact_path(out_dir: &Path, input: &Path) -> PathBuf {
    let stem = match input.file_stem() {
        Some(stem) if !is_stdio(Some(input)) => stem.to_string_lossy(),
        _ => "stdin".into(),
    };
    out_dir.join(format!("{stem}.svg"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_stdio() {
        assert!(is_stdio(None));
        assert!(is_stdio(Some(Path::new("-"))));
        assert!(!is_stdio(Some(Path::new("a.txt"))));
    }

    #[test]
    fn test_artifact_path() {
        assert_eq!(
            artifact_path(Path::new("out"), Path::new("runs/logo.txt")),
            PathBuf::from("out/logo.svg")
        );
        assert_eq!(
            artifact_path(Path::new("out"), Path::new("-")),
            PathBuf::from("out/stdin.svg")
        );
    }

    #[test]
    fn test_write_then_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.svg");
        write_output(Some(&path), b"<svg></svg>").unwrap();
        assert_eq!(read_input(Some(&path)).unwrap(), "<svg></svg>");
        assert_eq!(input_label(Some(&path)), path.display().to_string());
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_input(Some(Path::new("/definitely/missing.txt"))).unwrap_err();
        assert!(err.to_string().contains("missing.txt"));
    }
}
