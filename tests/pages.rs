//! Crawling a MoinMoin pages directory and writing the DokuWiki tree.

use moin2doku::pages::{
    IncompatibilityDefinitions, IncompatibilityReport, Page, PageCrawler, PageWriter,
    Transliterator,
};
use moin2doku::Options;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn add_revision(pages: &Path, dir_name: &str, revision: &str, content: &[u8]) {
    let page = pages.join(dir_name);
    fs::create_dir_all(page.join("revisions")).unwrap();
    fs::write(page.join("current"), format!("{revision}\n")).unwrap();
    fs::write(page.join("revisions").join(revision), content).unwrap();
}

fn crawl(pages: &Path) -> Vec<Page> {
    PageCrawler::new(pages, encoding_rs::UTF_8)
        .crawl()
        .expect("crawl to succeed")
}

#[test]
fn test_crawler_reads_current_revisions() {
    let dir = TempDir::new().unwrap();
    let pages = dir.path();
    add_revision(pages, "FrontPage", "00000003", b"line 1\nline 2\n");
    fs::write(
        pages.join("FrontPage").join("revisions").join("00000002"),
        "old",
    )
    .unwrap();
    add_revision(pages, "Team(2f)Members(2f)Ada", "00000001", b"hi\n");

    let found = crawl(pages);
    assert_eq!(
        found,
        vec![
            Page::new(vec![], "FrontPage", vec!["line 1\n".into(), "line 2\n".into()]),
            Page::new(
                vec!["Team".into(), "Members".into()],
                "Ada",
                vec!["hi\n".into()]
            ),
        ]
    );
    assert_eq!(found[1].long_name("/"), "Team/Members/Ada");
}

#[test]
fn test_crawler_skips_deleted_and_empty_pages() {
    let dir = TempDir::new().unwrap();
    let pages = dir.path();
    add_revision(pages, "Empty", "00000001", b"");
    add_revision(pages, "Kept", "00000001", b"text\n");

    let deleted = pages.join("Deleted");
    fs::create_dir_all(deleted.join("revisions")).unwrap();
    fs::write(deleted.join("current"), "00000002\n").unwrap();

    fs::create_dir_all(pages.join("NoCurrent")).unwrap();
    fs::write(pages.join("stray-file"), "not a page").unwrap();

    let names: Vec<String> = crawl(pages).into_iter().map(|page| page.name).collect();
    assert_eq!(names, vec!["Kept".to_string()]);
}

#[test]
fn test_crawler_reports_missing_directory() {
    let dir = TempDir::new().unwrap();
    let result = PageCrawler::new(dir.path().join("missing"), encoding_rs::UTF_8).crawl();
    assert!(result.is_err());
}

#[test]
fn test_writer_builds_namespaces() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let pages = vec![
        Page::new(vec![], "Front Page", vec!["'''Welcome'''\n".into()]),
        Page::new(
            vec!["Über".into()],
            "Grüße",
            vec!["see [[../Front Page]]\n".into()],
        ),
    ];

    let writer = PageWriter::new(&out, Options::default(), Transliterator::default());
    assert_eq!(writer.write(&pages), 2);
    assert_eq!(
        fs::read_to_string(out.join("front_page.txt")).unwrap(),
        "**Welcome**\n"
    );
    assert_eq!(
        fs::read_to_string(out.join("ueber").join("gruesse.txt")).unwrap(),
        "see [[.:Grüße:..:Front Page]]\n"
    );
}

#[test]
fn test_writer_never_overwrites() {
    let dir = TempDir::new().unwrap();
    let page = Page::new(vec![], "Page", vec!["new\n".into()]);
    fs::write(dir.path().join("page.txt"), "old").unwrap();

    let writer = PageWriter::new(dir.path(), Options::default(), Transliterator::default());
    assert!(writer.write_page(&page).is_err());
    assert_eq!(writer.write(&[page]), 0);
    assert_eq!(fs::read_to_string(dir.path().join("page.txt")).unwrap(), "old");
}

#[test]
fn test_crawled_pages_are_reported_and_written() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("pages");
    add_revision(&input, "Notes", "00000001", b"above\n----\n<<TableOfContents>>\n");
    add_revision(&input, "What(3f)", "00000001", b"plain\n");
    let pages = crawl(&input);

    let report = IncompatibilityReport::new(IncompatibilityDefinitions::builtin().unwrap())
        .check(&pages, "1.0");
    assert!(report.starts_with("MoinMoin2DokuWikiWriter v1.0\n\n\n"));
    assert!(report.contains("'Notes' contains the following problematic sequences:\n  ----\n  <<\n"));
    assert!(report.contains("'What?' contains the following problematic sequences:\n  ? (in page name or super pages)\n"));

    let out = dir.path().join("out");
    let options = Options::default().with_fixme_banner(true);
    let written = PageWriter::new(&out, options, Transliterator::default()).write(&pages);
    assert_eq!(written, 2);
    assert_eq!(
        fs::read_to_string(out.join("notes.txt")).unwrap(),
        "FIXME **//imported from MoinMoin//**\n\nabove\n----\n<<TableOfContents>>\n"
    );
}
