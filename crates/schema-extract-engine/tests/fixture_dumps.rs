use pretty_assertions::assert_eq;
use schema_extract_engine::{FilterOptions, extract_schema, filter_text};

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

#[test]
fn fixture_supabase_backup() {
    let input = fixture("supabase_backup.sql");
    let expected = fixture("supabase_backup.expected.sql");

    let dump = filter_text(&input, &FilterOptions::default()).unwrap();

    assert_eq!(dump.to_text(), expected);
    assert_eq!(dump.stats.lines_read, input.lines().count());
    assert_eq!(dump.stats.statements_kept, 13);
    assert_eq!(dump.stats.copy_sections_kept, 1);
    assert_eq!(dump.stats.blocks_skipped, 1);
    assert_eq!(dump.stats.unterminated_blocks, 0);
}

/// Every kept line appears in the input, in the same relative order.
#[test]
fn kept_lines_are_an_ordered_subsequence_of_input() {
    let input = fixture("supabase_backup.sql");
    let dump = filter_text(&input, &FilterOptions::default()).unwrap();

    let mut remaining = input.split_inclusive('\n');
    for line in dump
        .lines
        .iter()
        .skip(5)
        .filter(|l| !l.starts_with("-- Skipped"))
    {
        assert!(
            remaining.any(|candidate| candidate == line),
            "line out of order or not from input: {line:?}"
        );
    }
}

#[test]
fn extract_fixture_to_nested_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = std::path::PathBuf::from(format!(
        "{}/tests/fixtures/supabase_backup.sql",
        env!("CARGO_MANIFEST_DIR")
    ));
    let output = dir.path().join("supabase/backups/public_schema.sql");

    let stats = extract_schema(&input, &output, &FilterOptions::default()).unwrap();

    assert_eq!(stats.statements_kept, 13);
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        fixture("supabase_backup.expected.sql")
    );
}

#[test]
fn other_schema_yields_only_its_statements() {
    let input = fixture("supabase_backup.sql");
    let options = FilterOptions::for_schema("auth");

    let dump = filter_text(&input, &options).unwrap();
    let body = dump.lines[5..].concat();

    assert!(body.contains("CREATE TABLE auth.users (\n"));
    assert!(body.contains("COPY auth.users (id, email) FROM stdin;\n"));
    assert!(body.contains("CREATE FUNCTION auth.uid() RETURNS uuid\n"));
    assert!(!body.contains("public.profiles (\n"));
}
