//! E-book package assembly
//!
//! This module lays out the article list as an EPUB package and hands it to
//! an external converter:
//! - `mimetype` and `META-INF/container.xml` are written verbatim
//! - `content.opf`, `toc.ncx` and `xhtml/toc.xhtml` describe the magazine
//! - One `xhtml/<order_id>.xhtml` chapter per article
//!
//! Every rendered document is minimized to a single line before writing.

mod converter;
mod templates;

pub use converter::{CommandConverter, Converter};
pub use templates::{
    escape_xml, render_chapter, render_content_opf, render_toc_ncx, render_toc_xhtml,
    CONTAINER_XML, MIMETYPE,
};

use crate::pipeline::Article;
use crate::sanitize::minimize_html;
use crate::{AutomobileError, Result};
use chrono::{DateTime, Local, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Package name used when no title is given or the title has no usable characters
pub const DEFAULT_PACKAGE_NAME: &str = "magazine";

static RE_NON_ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9A-Za-z]+").unwrap());

/// Everything the package documents are rendered from
#[derive(Debug, Clone)]
pub struct MagazineContext<'a> {
    pub identifier: String,
    /// UTC timestamp for `dcterms:modified`
    pub modified: String,
    pub title: String,
    pub chapters: &'a [Article],
}

impl<'a> MagazineContext<'a> {
    pub fn new(chapters: &'a [Article], title: Option<&str>) -> Self {
        Self::at(chapters, title, Local::now())
    }

    /// Builds the context as of `now`
    pub fn at(chapters: &'a [Article], title: Option<&str>, now: DateTime<Local>) -> Self {
        let title = match title {
            Some(title) => title.to_string(),
            None => format!("Article Collection {}", now.format("%Y-%m-%d %H:%M:%S")),
        };

        Self {
            identifier: format!("automobile/{}", now.format("%Y%m%d%H%M%S")),
            modified: now
                .with_timezone(&Utc)
                .format("%Y-%m-%dT%H:%M:%SZ")
                .to_string(),
            title,
            chapters,
        }
    }
}

/// Derives the package directory name from the user-supplied title
///
/// # Example
///
/// ```
/// use automobile::package::package_name;
///
/// assert_eq!(package_name(Some("Weekend Reads: Vol 2")), "weekend-reads-vol-2");
/// assert_eq!(package_name(None), "magazine");
/// ```
pub fn package_name(title: Option<&str>) -> String {
    let slug = title
        .map(|title| RE_NON_ALPHANUMERIC.replace_all(title, "-").to_lowercase())
        .unwrap_or_default();

    if slug.is_empty() {
        DEFAULT_PACKAGE_NAME.to_string()
    } else {
        slug
    }
}

/// Writes the package for `context` to `<parent>/<name>` and returns that directory
pub fn write_package(context: &MagazineContext<'_>, parent: &Path, name: &str) -> Result<PathBuf> {
    let root = parent.join(name);
    fs::create_dir_all(root.join("META-INF"))?;
    fs::create_dir_all(root.join("xhtml"))?;

    write_file(&root.join("mimetype"), MIMETYPE)?;
    write_file(&root.join("META-INF").join("container.xml"), CONTAINER_XML)?;

    write_file(&root.join("content.opf"), &minimize_html(&render_content_opf(context)))?;
    write_file(&root.join("toc.ncx"), &minimize_html(&render_toc_ncx(context)))?;
    write_file(
        &root.join("xhtml").join("toc.xhtml"),
        &minimize_html(&render_toc_xhtml(context)),
    )?;

    for chapter in context.chapters {
        let path = root.join("xhtml").join(format!("{}.xhtml", chapter.order_id()));
        write_file(&path, &minimize_html(&render_chapter(chapter)))?;
    }

    Ok(root)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    tracing::debug!("Writing {}", path.display());
    fs::write(path, contents)?;
    Ok(())
}

/// Assembles the articles into an e-book and copies it into `output_dir`
///
/// The package is built in a temporary directory that is removed when this
/// function returns, whether or not conversion succeeded.
///
/// # Arguments
///
/// * `articles` - Chapters in order
/// * `title` - Magazine title; also names the output file
/// * `converter` - Turns the package directory into the final artifact
/// * `output_dir` - Where the artifact is copied
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the copied artifact, `<output_dir>/<name>.<ext>`
/// * `Err(AutomobileError)` - Write or conversion failure
pub fn assemble(
    articles: &[Article],
    title: Option<&str>,
    converter: &dyn Converter,
    output_dir: &Path,
) -> Result<PathBuf> {
    let context = MagazineContext::new(articles, title);
    let name = package_name(title);

    let workspace = TempDir::new()?;
    let package_dir = write_package(&context, workspace.path(), &name)?;
    tracing::info!(
        "Converting {} chapters in {}",
        articles.len(),
        package_dir.display()
    );

    let artifact = converter.convert(&package_dir)?;
    let file_name = artifact.file_name().ok_or_else(|| {
        AutomobileError::Conversion(format!("artifact path {} has no file name", artifact.display()))
    })?;

    let destination = output_dir.join(file_name);
    fs::copy(&artifact, &destination)?;
    workspace.close()?;

    Ok(destination)
}
