//! Package assembly tests with an in-process converter

use automobile::package::{assemble, package_name, Converter};
use automobile::{Article, AutomobileError};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// What the fake converter saw when it was called
#[derive(Debug, Default)]
struct Observed {
    package_dir: Option<PathBuf>,
    files: Vec<String>,
    chapters: Vec<String>,
}

/// Records the package it is given and writes `<parent>/<name>.mobi`
#[derive(Default)]
struct FakeConverter {
    observed: RefCell<Observed>,
    fail: bool,
}

impl Converter for FakeConverter {
    fn convert(&self, package_dir: &Path) -> automobile::Result<PathBuf> {
        let mut observed = self.observed.borrow_mut();
        observed.package_dir = Some(package_dir.to_path_buf());
        observed.files = list_files(package_dir, package_dir);

        let mut chapter_files: Vec<_> = observed
            .files
            .iter()
            .filter(|f| f.starts_with("xhtml/") && f.as_str() != "xhtml/toc.xhtml")
            .cloned()
            .collect();
        chapter_files.sort();
        observed.chapters = chapter_files
            .iter()
            .map(|f| fs::read_to_string(package_dir.join(f)).unwrap())
            .collect();

        if self.fail {
            return Err(AutomobileError::Conversion("converter exited with 1".to_string()));
        }

        let name = package_dir.file_name().unwrap().to_string_lossy().into_owned();
        let artifact = package_dir.parent().unwrap().join(format!("{}.mobi", name));
        fs::write(&artifact, b"MOBI")?;
        Ok(artifact)
    }
}

/// Lists every file under `dir` as a `/`-separated path relative to `root`
fn list_files(root: &Path, dir: &Path) -> Vec<String> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            files.extend(list_files(root, &path));
        } else {
            let relative = path.strip_prefix(root).unwrap();
            let parts: Vec<_> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            files.push(parts.join("/"));
        }
    }
    files.sort();
    files
}

fn create_test_articles() -> Vec<Article> {
    vec![
        Article::new("001", "Newest", "<p>newest body</p>"),
        Article::new("002", "Middle & More", "<p>middle body</p>"),
        Article::new("003", "Oldest", "<p>oldest body</p>"),
    ]
}

#[test]
fn test_assemble_produces_artifact() {
    let output = TempDir::new().unwrap();
    let converter = FakeConverter::default();

    let artifact = assemble(
        &create_test_articles(),
        Some("Weekend Reads"),
        &converter,
        output.path(),
    )
    .expect("Assembly failed");

    assert_eq!(artifact, output.path().join("weekend-reads.mobi"));
    assert_eq!(fs::read(&artifact).unwrap(), b"MOBI");
}

#[test]
fn test_package_layout() {
    let output = TempDir::new().unwrap();
    let converter = FakeConverter::default();

    assemble(&create_test_articles(), None, &converter, output.path()).unwrap();

    let observed = converter.observed.borrow();
    let package_dir = observed.package_dir.as_ref().unwrap();
    assert_eq!(package_dir.file_name().and_then(|n| n.to_str()), Some("magazine"));
    assert_eq!(
        observed.files,
        vec![
            "META-INF/container.xml",
            "content.opf",
            "mimetype",
            "toc.ncx",
            "xhtml/001.xhtml",
            "xhtml/002.xhtml",
            "xhtml/003.xhtml",
            "xhtml/toc.xhtml",
        ]
    );
}

#[test]
fn test_one_chapter_per_article() {
    let output = TempDir::new().unwrap();
    let converter = FakeConverter::default();
    let articles = create_test_articles();

    assemble(&articles, Some("Weekend"), &converter, output.path()).unwrap();

    let observed = converter.observed.borrow();
    assert_eq!(observed.chapters.len(), articles.len());
    assert!(observed.chapters[0].contains("<h1>Newest</h1><p>newest body</p>"));
    assert!(observed.chapters[1].contains("<h1>Middle &amp; More</h1><p>middle body</p>"));
    assert!(observed.chapters[2].contains("<h1>Oldest</h1><p>oldest body</p>"));
    assert!(observed.chapters.iter().all(|c| !c.contains('\n')));
}

#[test]
fn test_working_directory_removed() {
    let output = TempDir::new().unwrap();
    let converter = FakeConverter::default();

    assemble(&create_test_articles(), None, &converter, output.path()).unwrap();

    let observed = converter.observed.borrow();
    let package_dir = observed.package_dir.as_ref().unwrap();
    assert!(!package_dir.exists());
    assert!(!package_dir.parent().unwrap().exists());
}

#[test]
fn test_conversion_failure() {
    let output = TempDir::new().unwrap();
    let converter = FakeConverter {
        fail: true,
        ..FakeConverter::default()
    };

    let result = assemble(&create_test_articles(), None, &converter, output.path());

    assert!(matches!(result, Err(AutomobileError::Conversion(_))));
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
    let observed = converter.observed.borrow();
    assert!(!observed.package_dir.as_ref().unwrap().exists());
}

#[test]
fn test_empty_article_list() {
    let output = TempDir::new().unwrap();
    let converter = FakeConverter::default();

    let artifact = assemble(&[], Some("Nothing"), &converter, output.path()).unwrap();

    assert_eq!(artifact, output.path().join(format!("{}.mobi", package_name(Some("Nothing")))));
    assert!(converter.observed.borrow().chapters.is_empty());
}
