//! Integration tests for the batch pipeline.

use std::fs;
use std::path::Path;

use folio::build::{build_dir, build_sources, check_dir, BuildOptions};
use folio::{discover, load_dir, Error, Folio, RenderOptions, UnknownTypePolicy};

const ALPHA: &str = r#"{
    "title": [{"value": "Alpha"}],
    "subtitle": [{"value": "First project"}],
    "div": [
        {"type": "video", "content": ["123456"]},
        {"type": "content", "id": "intro", "content": [{"type": "p", "content": ["Hello"]}]}
    ]
}"#;

const BETA: &str = r#"{
    "title": [{"value": "Beta"}],
    "subtitle": [],
    "blocks": [{"type": "gallery", "content": []}]
}"#;

const MISSING_BLOCKS: &str = r#"{"title": [{"value": "Broken"}], "subtitle": []}"#;

fn write_inputs(dir: &Path, files: &[(&str, &str)]) {
    for (name, content) in files {
        fs::write(dir.join(name), content).unwrap();
    }
}

#[test]
fn test_discover_only_json_files() {
    let input = tempfile::tempdir().unwrap();
    write_inputs(
        input.path(),
        &[("beta.json", BETA), ("alpha.json", ALPHA), ("notes.aml", "title: x")],
    );
    fs::create_dir(input.path().join("nested.json")).unwrap();

    let ids: Vec<String> = discover(input.path())
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec!["alpha", "beta"]);
}

#[test]
fn test_load_dir_keeps_failures_per_document() {
    let input = tempfile::tempdir().unwrap();
    write_inputs(
        input.path(),
        &[("alpha.json", ALPHA), ("broken.json", MISSING_BLOCKS)],
    );

    let loaded = load_dir(input.path()).unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].1.as_ref().unwrap().id, "alpha");
    assert!(matches!(
        loaded[1].1,
        Err(Error::MalformedDocument { ref file, .. }) if file.ends_with("broken.json")
    ));
}

#[test]
fn test_build_writes_one_page_per_document() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_inputs(input.path(), &[("alpha.json", ALPHA), ("beta.json", BETA)]);

    let report = build_dir(input.path(), output.path(), &BuildOptions::default()).unwrap();
    assert_eq!(report.len(), 2);
    assert!(report.is_success());

    let alpha = fs::read_to_string(output.path().join("alpha/index.html")).unwrap();
    assert!(alpha.starts_with("<!DOCTYPE html>"));
    assert!(alpha.contains("{title:'Alpha'}"));
    assert!(alpha.contains("<h1>Alpha</h1>"));
    assert!(alpha.contains("video/123456?"));
    assert!(alpha.contains("<!-- inject:css -->"));
    assert!(alpha.contains("<!-- inject:js -->"));

    let beta = fs::read_to_string(output.path().join("beta/index.html")).unwrap();
    assert!(beta.contains("<h1>Beta</h1>"));
    assert!(!beta.contains("gallery"));
    assert_eq!(report.stats().skipped, vec!["gallery"]);
}

#[test]
fn test_malformed_document_does_not_stop_batch() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_inputs(
        input.path(),
        &[
            ("alpha.json", ALPHA),
            ("broken.json", MISSING_BLOCKS),
            ("garbage.json", "not json at all"),
        ],
    );

    let report = build_dir(input.path(), output.path(), &BuildOptions::default()).unwrap();
    assert_eq!(report.len(), 3);
    assert!(!report.is_success());

    let built: Vec<&str> = report.succeeded().map(|p| p.id.as_str()).collect();
    assert_eq!(built, vec!["alpha"]);

    let failed: Vec<&str> = report.failed().map(|(s, _)| s.id.as_str()).collect();
    assert_eq!(failed, vec!["broken", "garbage"]);
    for (_, error) in report.failed() {
        assert!(matches!(error, Error::MalformedDocument { .. }));
    }

    assert!(output.path().join("alpha/index.html").exists());
    assert!(!output.path().join("broken").exists());
    assert!(!output.path().join("garbage").exists());
}

#[test]
fn test_rebuild_is_byte_identical() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_inputs(input.path(), &[("alpha.json", ALPHA)]);
    let page = output.path().join("alpha/index.html");

    build_dir(input.path(), output.path(), &BuildOptions::default()).unwrap();
    let first = fs::read(&page).unwrap();

    build_dir(input.path(), output.path(), &BuildOptions::default()).unwrap();
    let second = fs::read(&page).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_sequential_matches_parallel() {
    let input = tempfile::tempdir().unwrap();
    let parallel_out = tempfile::tempdir().unwrap();
    let sequential_out = tempfile::tempdir().unwrap();
    write_inputs(input.path(), &[("alpha.json", ALPHA), ("beta.json", BETA)]);

    build_dir(input.path(), parallel_out.path(), &BuildOptions::default()).unwrap();
    build_dir(
        input.path(),
        sequential_out.path(),
        &BuildOptions::new().sequential(),
    )
    .unwrap();

    for id in ["alpha", "beta"] {
        let a = fs::read(parallel_out.path().join(id).join("index.html")).unwrap();
        let b = fs::read(sequential_out.path().join(id).join("index.html")).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_reject_unknown_types_fails_only_that_document() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_inputs(input.path(), &[("alpha.json", ALPHA), ("beta.json", BETA)]);

    let report = Folio::new()
        .reject_unknown_types()
        .build(input.path(), output.path())
        .unwrap();

    let failed: Vec<_> = report.failed().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].0.id, "beta");
    assert!(matches!(failed[0].1, Error::UnknownType { .. }));
    assert!(output.path().join("alpha/index.html").exists());
    assert!(!output.path().join("beta").exists());
}

#[test]
fn test_check_dir_writes_nothing() {
    let input = tempfile::tempdir().unwrap();
    write_inputs(input.path(), &[("alpha.json", ALPHA)]);

    let options = BuildOptions::new()
        .with_render_options(RenderOptions::new().with_unknown_types(UnknownTypePolicy::Warn));
    let report = check_dir(input.path(), &options).unwrap();

    assert!(report.is_success());
    let page = report.succeeded().next().unwrap();
    assert!(page.output.is_none());
    assert_eq!(fs::read_dir(input.path()).unwrap().count(), 1);
}

#[test]
fn test_progress_called_per_document() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_inputs(
        input.path(),
        &[("alpha.json", ALPHA), ("beta.json", BETA), ("broken.json", MISSING_BLOCKS)],
    );

    let calls = AtomicUsize::new(0);
    let sources = discover(input.path()).unwrap();
    let report = build_sources(
        sources,
        Some(output.path()),
        &BuildOptions::default(),
        |_| {
            calls.fetch_add(1, Ordering::SeqCst);
        },
    );

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(report.len(), 3);
}

#[test]
fn test_missing_input_dir_is_an_error() {
    let output = tempfile::tempdir().unwrap();
    let result = build_dir("does/not/exist", output.path(), &BuildOptions::default());
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_dot_named_input_never_writes_outside_root() {
    let base = tempfile::tempdir().unwrap();
    let input = base.path().join("in");
    let output = base.path().join("out");
    fs::create_dir(&input).unwrap();
    write_inputs(&input, &[("...json", ALPHA), ("..json", ALPHA), ("alpha.json", ALPHA)]);

    let report = build_dir(&input, &output, &BuildOptions::default()).unwrap();

    assert_eq!(report.len(), 3);
    assert_eq!(report.succeeded().count(), 1);
    for (_, error) in report.failed() {
        assert!(matches!(error, Error::MalformedDocument { .. }));
    }
    assert!(!base.path().join("index.html").exists());
    assert!(!output.join("index.html").exists());
    assert!(output.join("alpha").join("index.html").exists());
}

#[test]
fn test_duplicate_ids_are_built_once() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_inputs(input.path(), &[("alpha.json", ALPHA), ("alpha.JSON", BETA)]);
    if fs::read_dir(input.path()).unwrap().count() < 2 {
        // Case-insensitive filesystem
        return;
    }

    let report = build_dir(input.path(), output.path(), &BuildOptions::default()).unwrap();

    assert_eq!(report.len(), 2);
    assert_eq!(report.succeeded().count(), 1);
    let failed: Vec<_> = report.failed().collect();
    assert_eq!(failed.len(), 1);
    assert!(failed[0].0.path.ends_with("alpha.json"));
    assert!(failed[0].1.to_string().contains("already used by"));

    // alpha.JSON sorts first and owns the page
    let page = fs::read_to_string(output.path().join("alpha").join("index.html")).unwrap();
    assert!(page.contains("<h1>Beta</h1>"));
}
