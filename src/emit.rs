//! Turn a plan into files on disk.
//!
//! Both files are rendered and formatted in memory first; nothing is written
//! unless every step succeeded.

use crate::Result;
use crate::model::GenerationPlan;
use crate::render;

use anyhow::{Context, bail};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

pub const CONFIG_FILE: &str = "config.go";
pub const FAKE_FILE: &str = "fake.go";

/// A rendered output file, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub name: &'static str,
    pub contents: String,
}

/// Render config.go and fake.go, optionally through `gofmt`.
pub fn render_files(plan: &GenerationPlan, gofmt: bool) -> Result<Vec<OutputFile>> {
    let rendered = [
        (CONFIG_FILE, render::render_config(plan)?),
        (FAKE_FILE, render::render_fake(plan)?),
    ];

    let gofmt_path = if gofmt { find_gofmt() } else { None };

    let mut out = Vec::with_capacity(rendered.len());
    for (name, source) in rendered {
        let contents = match &gofmt_path {
            Some(bin) => format_go(bin, name, &source)?,
            None => source,
        };
        out.push(OutputFile { name, contents });
    }
    Ok(out)
}

/// Create `dir` and write every file into it.
///
/// Each file goes to a temporary sibling first and is renamed into place.
pub fn write_files(dir: &Path, files: &[OutputFile]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("create output directory {}", dir.display()))?;

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = dir.join(file.name);
        let tmp = dir.join(format!(".{}.tmp", file.name));
        fs::write(&tmp, &file.contents).with_context(|| format!("write {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("move {} into place", path.display()))?;
        tracing::info!(path = %path.display(), bytes = file.contents.len(), "wrote file");
        written.push(path);
    }
    Ok(written)
}

fn find_gofmt() -> Option<PathBuf> {
    match which::which("gofmt") {
        Ok(path) => Some(path),
        Err(_) => {
            tracing::warn!("gofmt not found on PATH; writing unformatted Go source");
            None
        }
    }
}

/// Pipe `source` through gofmt. A rejection means the templates produced
/// invalid Go, which is fatal.
fn format_go(gofmt: &Path, name: &str, source: &str) -> Result<String> {
    let mut child = Command::new(gofmt)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("spawn {}", gofmt.display()))?;

    // gofmt reads all of stdin before writing, so this cannot deadlock.
    child
        .stdin
        .take()
        .context("gofmt stdin unavailable")?
        .write_all(source.as_bytes())
        .with_context(|| format!("send {} to gofmt", name))?;

    let output = child
        .wait_with_output()
        .with_context(|| format!("wait for gofmt on {}", name))?;
    if !output.status.success() {
        bail!(
            "gofmt rejected generated {}: {}",
            name,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    String::from_utf8(output.stdout).with_context(|| format!("gofmt output for {}", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldBuilder;
    use crate::schema::parse_schema;
    use pretty_assertions::assert_eq;

    fn plan() -> GenerationPlan {
        FieldBuilder::default()
            .build_all(&parse_schema("port: {type: int, default: 8080}\n").unwrap())
            .unwrap()
    }

    #[test]
    fn renders_both_files_unformatted() {
        let files = render_files(&plan(), false).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.name).collect();
        assert_eq!(names, vec![CONFIG_FILE, FAKE_FILE]);
        assert!(files[0].contents.contains("GetPort() int"));
        assert!(files[1].contents.contains("type FakeAppConfig struct"));
    }

    #[test]
    fn writes_into_new_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("internal").join("config");
        let files = render_files(&plan(), false).unwrap();

        let written = write_files(&dir, &files).unwrap();

        assert_eq!(written, vec![dir.join(CONFIG_FILE), dir.join(FAKE_FILE)]);
        assert_eq!(fs::read_to_string(&written[0]).unwrap(), files[0].contents);
        let leftovers: Vec<_> = fs::read_dir(&dir)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .filter(|n| n.to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
