//! Package document rendering
//!
//! Each render function takes the magazine (or a single article) and returns
//! the document text. Callers minimize the text before writing it, so every
//! line here must be a complete tag or text run.

use crate::package::MagazineContext;
use crate::pipeline::Article;

/// Content of the `mimetype` file
pub const MIMETYPE: &str = "application/epub+zip";

/// Content of `META-INF/container.xml`
pub const CONTAINER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>
"#;

/// Escapes text for use in XML character data and attribute values
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders `content.opf`, the package document
pub fn render_content_opf(context: &MagazineContext<'_>) -> String {
    let mut xml = String::new();

    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(
        "<package xmlns=\"http://www.idpf.org/2007/opf\" version=\"3.0\" unique-identifier=\"BookId\">\n",
    );
    xml.push_str("  <metadata xmlns:dc=\"http://purl.org/dc/elements/1.1/\">\n");
    xml.push_str(&format!(
        "    <dc:identifier id=\"BookId\">{}</dc:identifier>\n",
        escape_xml(&context.identifier)
    ));
    xml.push_str(&format!("    <dc:title>{}</dc:title>\n", escape_xml(&context.title)));
    xml.push_str("    <dc:language>en</dc:language>\n");
    xml.push_str(&format!(
        "    <meta property=\"dcterms:modified\">{}</meta>\n",
        context.modified
    ));
    xml.push_str("  </metadata>\n");

    xml.push_str("  <manifest>\n");
    xml.push_str(
        "    <item id=\"ncx\" href=\"toc.ncx\" media-type=\"application/x-dtbncx+xml\"/>\n",
    );
    xml.push_str(
        "    <item id=\"toc\" href=\"xhtml/toc.xhtml\" media-type=\"application/xhtml+xml\" properties=\"nav\"/>\n",
    );
    for chapter in context.chapters {
        xml.push_str(&format!(
            "    <item id=\"chapter-{id}\" href=\"xhtml/{id}.xhtml\" media-type=\"application/xhtml+xml\"/>\n",
            id = chapter.order_id()
        ));
    }
    xml.push_str("  </manifest>\n");

    xml.push_str("  <spine toc=\"ncx\">\n");
    xml.push_str("    <itemref idref=\"toc\"/>\n");
    for chapter in context.chapters {
        xml.push_str(&format!(
            "    <itemref idref=\"chapter-{}\"/>\n",
            chapter.order_id()
        ));
    }
    xml.push_str("  </spine>\n");
    xml.push_str("</package>\n");

    xml
}

/// Renders `toc.ncx`, the NCX navigation document
pub fn render_toc_ncx(context: &MagazineContext<'_>) -> String {
    let mut xml = String::new();

    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<ncx xmlns=\"http://www.daisy.org/z3986/2005/ncx/\" version=\"2005-1\">\n");
    xml.push_str("  <head>\n");
    xml.push_str(&format!(
        "    <meta name=\"dtb:uid\" content=\"{}\"/>\n",
        escape_xml(&context.identifier)
    ));
    xml.push_str("    <meta name=\"dtb:depth\" content=\"1\"/>\n");
    xml.push_str("    <meta name=\"dtb:totalPageCount\" content=\"0\"/>\n");
    xml.push_str("    <meta name=\"dtb:maxPageNumber\" content=\"0\"/>\n");
    xml.push_str("  </head>\n");
    xml.push_str(&format!(
        "  <docTitle><text>{}</text></docTitle>\n",
        escape_xml(&context.title)
    ));

    xml.push_str("  <navMap>\n");
    for (index, chapter) in context.chapters.iter().enumerate() {
        xml.push_str(&format!(
            "    <navPoint id=\"navpoint-{}\" playOrder=\"{}\">\n",
            chapter.order_id(),
            index + 1
        ));
        xml.push_str(&format!(
            "      <navLabel><text>{}</text></navLabel>\n",
            escape_xml(chapter.title())
        ));
        xml.push_str(&format!(
            "      <content src=\"xhtml/{}.xhtml\"/>\n",
            chapter.order_id()
        ));
        xml.push_str("    </navPoint>\n");
    }
    xml.push_str("  </navMap>\n");
    xml.push_str("</ncx>\n");

    xml
}

/// Renders `xhtml/toc.xhtml`, the navigation fragment listing every chapter
pub fn render_toc_xhtml(context: &MagazineContext<'_>) -> String {
    let title = escape_xml(&context.title);
    let mut xml = String::new();

    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<!DOCTYPE html>\n");
    xml.push_str(
        "<html xmlns=\"http://www.w3.org/1999/xhtml\" xmlns:epub=\"http://www.idpf.org/2007/ops\">\n",
    );
    xml.push_str("  <head>\n");
    xml.push_str(&format!("    <title>{}</title>\n", title));
    xml.push_str("  </head>\n");
    xml.push_str("  <body>\n");
    xml.push_str("    <nav epub:type=\"toc\" id=\"toc\">\n");
    xml.push_str(&format!("      <h1>{}</h1>\n", title));
    xml.push_str("      <ol>\n");
    for chapter in context.chapters {
        xml.push_str(&format!(
            "        <li><a href=\"{}.xhtml\">{}</a></li>\n",
            chapter.order_id(),
            escape_xml(chapter.title())
        ));
    }
    xml.push_str("      </ol>\n");
    xml.push_str("    </nav>\n");
    xml.push_str("  </body>\n");
    xml.push_str("</html>\n");

    xml
}

/// Renders one chapter document: the title as a heading, then the content
pub fn render_chapter(article: &Article) -> String {
    let title = escape_xml(article.title());
    let mut xml = String::new();

    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<!DOCTYPE html>\n");
    xml.push_str("<html xmlns=\"http://www.w3.org/1999/xhtml\">\n");
    xml.push_str("  <head>\n");
    xml.push_str(&format!("    <title>{}</title>\n", title));
    xml.push_str("  </head>\n");
    xml.push_str("  <body>\n");
    xml.push_str(&format!("    <h1>{}</h1>{}\n", title, article.content()));
    xml.push_str("  </body>\n");
    xml.push_str("</html>\n");

    xml
}
