use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Creates a MoinMoin page directory with a single revision.
fn add_page(pages: &Path, dir_name: &str, content: &str) {
    let page = pages.join(dir_name);
    fs::create_dir_all(page.join("revisions")).unwrap();
    fs::write(page.join("current"), "00000002\n").unwrap();
    fs::write(page.join("revisions").join("00000002"), content).unwrap();
}

fn wiki() -> TempDir {
    let dir = TempDir::new().unwrap();
    let pages = dir.path().join("pages");
    fs::create_dir_all(&pages).unwrap();
    add_page(
        &pages,
        "FrontPage",
        "== Welcome ==\nsome '''bold''' text\n * item\n",
    );
    add_page(&pages, "Parent(2f)Child", "see [[/Grandchild]]\n");
    dir
}

#[test]
fn converts_all_pages() {
    let wiki = wiki();
    let out = wiki.path().join("out");
    let mut cmd = cargo_bin_cmd!("moin2doku");
    cmd.current_dir(wiki.path())
        .arg("-p")
        .arg(wiki.path().join("pages"))
        .arg("-o")
        .arg(&out)
        .arg("--no-report");

    cmd.assert().success().stdout(
        predicate::str::contains("== Starting conversion ==")
            .and(predicate::str::contains("== Converted 2 pages ==")),
    );

    assert_eq!(
        fs::read_to_string(out.join("frontpage.txt")).unwrap(),
        "====== Welcome ======\nsome **bold** text\n  * item\n"
    );
    assert_eq!(
        fs::read_to_string(out.join("parent").join("child.txt")).unwrap(),
        "see [[.:Child:Grandchild]]\n"
    );
}

#[test]
fn adds_fixme_banner() {
    let wiki = wiki();
    let out = wiki.path().join("out");
    let mut cmd = cargo_bin_cmd!("moin2doku");
    cmd.current_dir(wiki.path())
        .args(["-p", "pages", "-o", "out", "--fixme", "--no-report"]);
    cmd.assert().success();

    let page = fs::read_to_string(out.join("frontpage.txt")).unwrap();
    assert!(page.starts_with("FIXME **//imported from MoinMoin//**\n\n====== Welcome ======"));
}

#[test]
fn existing_pages_are_not_overwritten() {
    let wiki = wiki();
    let out = wiki.path().join("out");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("frontpage.txt"), "edited in DokuWiki").unwrap();

    let mut cmd = cargo_bin_cmd!("moin2doku");
    cmd.current_dir(wiki.path())
        .args(["-p", "pages", "-o", "out", "--no-report"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("== Converted 1 pages =="));

    assert_eq!(
        fs::read_to_string(out.join("frontpage.txt")).unwrap(),
        "edited in DokuWiki"
    );
}

#[test]
fn writes_incompatibility_report() {
    let wiki = wiki();
    add_page(&wiki.path().join("pages"), "Divided", "above\n----\nbelow\n");

    let mut cmd = cargo_bin_cmd!("moin2doku");
    cmd.current_dir(wiki.path()).args(["-p", "pages", "-o", "out"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Written: moin2doku-warnings-"));

    let report = fs::read_dir(wiki.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .find(|path| {
            path.file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("moin2doku-warnings-")
        })
        .expect("report file");
    let report = fs::read_to_string(report).unwrap();
    assert!(report.contains("'Divided' contains the following problematic sequences:\n  ----\n"));
    assert!(!report.contains("'FrontPage'"));
}

#[test]
fn rejects_unknown_charset() {
    let wiki = wiki();
    let mut cmd = cargo_bin_cmd!("moin2doku");
    cmd.current_dir(wiki.path())
        .args(["-p", "pages", "-o", "out", "-c", "no-such-charset"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown charset: no-such-charset"));
}

#[test]
fn logs_progress_to_stderr() {
    let wiki = wiki();
    let mut cmd = cargo_bin_cmd!("moin2doku");
    cmd.current_dir(wiki.path())
        .env("RUST_LOG", "info")
        .args(["-p", "pages", "-o", "out", "--no-report"]);
    cmd.assert()
        .success()
        .stderr(
            predicate::str::contains("starting conversion")
                .and(predicate::str::contains("crawled pages"))
                .and(predicate::str::contains("conversion finished")),
        )
        .stdout(predicate::str::contains("crawled pages").not());
}

#[test]
fn logs_failures_as_errors() {
    let wiki = wiki();
    let mut cmd = cargo_bin_cmd!("moin2doku");
    cmd.current_dir(wiki.path())
        .env("RUST_LOG", "error")
        .args(["-p", "missing", "-o", "out", "--no-report"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("conversion failed"));
}

#[test]
fn flags_layer_over_the_config_file() {
    let wiki = wiki();
    fs::write(
        wiki.path().join("settings.toml"),
        "[input]\npages_dir = \"pages\"\n[output]\npages_dir = \"from-file\"\nfixme_banner = true\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("moin2doku");
    cmd.current_dir(wiki.path())
        .args(["--config", "settings.toml", "-o", "from-flag", "--no-report"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("== Converted 2 pages =="));

    assert!(!wiki.path().join("from-file").exists());
    let page = fs::read_to_string(wiki.path().join("from-flag").join("frontpage.txt")).unwrap();
    assert!(page.starts_with("FIXME **//imported from MoinMoin//**\n"));
}

#[test]
fn reads_latin1_pages() {
    let wiki = TempDir::new().unwrap();
    let pages = wiki.path().join("pages");
    let page = pages.join("Gr(fc)n");
    fs::create_dir_all(page.join("revisions")).unwrap();
    fs::write(page.join("current"), "00000001\n").unwrap();
    fs::write(page.join("revisions").join("00000001"), b"gr\xfcn\n").unwrap();

    let mut cmd = cargo_bin_cmd!("moin2doku");
    cmd.current_dir(wiki.path())
        .args(["-p", "pages", "-o", "out", "-c", "latin1", "--no-report"]);
    cmd.assert().success();

    assert_eq!(
        fs::read_to_string(wiki.path().join("out").join("gruen.txt")).unwrap(),
        "grün\n"
    );
}

#[test]
fn lists_incompatibilities() {
    let mut cmd = cargo_bin_cmd!("moin2doku");
    cmd.arg("--list-incompatibilities");
    cmd.assert().success().stdout(
        predicate::str::contains("in page names:")
            .and(predicate::str::contains("in page content:"))
            .and(predicate::str::contains("||<style=")),
    );
}

#[test]
fn shows_version() {
    let mut cmd = cargo_bin_cmd!("moin2doku");
    cmd.arg("-v");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
