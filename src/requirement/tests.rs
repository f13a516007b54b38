//! Requirement normalization tests

use super::*;

fn names(set: &RequirementSet) -> Vec<&str> {
    set.names().collect()
}

#[test]
fn test_parse_simple_requirement() {
    let req = Requirement::parse("requests>=2.0").expect("valid requirement");
    assert_eq!(req.kind, RequirementKind::Package);
    assert_eq!(req.name.as_deref(), Some("requests"));
    assert_eq!(req.specifier, "requests>=2.0");
}

#[test]
fn test_parse_normalizes_name_and_whitespace() {
    let req = Requirement::parse("Flask >= 1.0").expect("valid requirement");
    assert_eq!(req.name.as_deref(), Some("flask"));
    assert_eq!(req.specifier, "flask>=1.0");
}

#[test]
fn test_parse_canonicalizes_separators() {
    let req = Requirement::parse("Django_Rest.Framework").expect("valid requirement");
    assert_eq!(req.name.as_deref(), Some("django-rest-framework"));
}

#[test]
fn test_parse_rejects_garbage() {
    assert!(Requirement::parse("!!!broken").is_err());
}

#[test]
fn test_comments_and_blank_lines_are_ignored() {
    let text = "# pbundle MAGIC\n#pbundle>=0\n\n   \n\t# indented comment\nsix\n";
    let parsed = parse_requirements(text);
    assert_eq!(names(&parsed.requirements), vec!["six"]);
    assert!(parsed.skipped.is_empty());
}

#[test]
fn test_inline_comment_is_stripped() {
    let parsed = parse_requirements("six==1.16.0  # pinned for py2 compat\n");
    let six = parsed.requirements.get("six").expect("six parsed");
    assert_eq!(six.specifier, "six==1.16.0");
}

#[test]
fn test_hash_inside_token_is_not_a_comment() {
    assert_eq!(strip_comment("pkg#egg"), "pkg#egg");
    assert_eq!(strip_comment("pkg #egg"), "pkg ");
    assert_eq!(strip_comment("#all"), "");
}

#[test]
fn test_installer_options_are_not_tracked_or_warned() {
    let text = "--index-url https://example.invalid/simple\n--no-binary :all:\nsix\n";
    let parsed = parse_requirements(text);
    assert_eq!(parsed.requirements.len(), 1);
    assert!(parsed.includes.is_empty());
    assert!(parsed.skipped.is_empty());
}

#[test]
fn test_includes_are_collected_in_order() {
    let parsed = parse_requirements("-r base.txt\nsix\n--constraint=pins.txt\n");
    assert_eq!(
        parsed.includes,
        vec![
            Include {
                line: 1,
                kind: IncludeKind::Requirements,
                target: "base.txt".to_string(),
                text: "-r base.txt".to_string(),
            },
            Include {
                line: 3,
                kind: IncludeKind::Constraints,
                target: "pins.txt".to_string(),
                text: "--constraint=pins.txt".to_string(),
            },
        ]
    );
    assert_eq!(names(&parsed.requirements), vec!["six"]);
}

#[test]
fn test_hash_pinned_requirement_is_tracked() {
    let parsed = parse_requirements(
        "six==1.16.0 \\\n    --hash=sha256:aaaa \\\n    --hash=sha256:bbbb\n",
    );
    assert!(parsed.skipped.is_empty(), "{:?}", parsed.skipped);
    let six = parsed.requirements.get("six").expect("six tracked");
    assert_eq!(six.specifier, "six==1.16.0 --hash=sha256:aaaa --hash=sha256:bbbb");
}

#[test]
fn test_version_change_under_hashes_is_a_change() {
    let first = parse_requirements("six==1.16.0 --hash=sha256:aaaa\n").requirements;
    let second = parse_requirements("six==1.17.0 --hash=sha256:bbbb\n").requirements;
    assert_ne!(first, second);
}

#[test]
fn test_unknown_trailing_option_is_skipped() {
    let parsed = parse_requirements("six --frobnicate\n");
    assert!(parsed.requirements.is_empty());
    assert_eq!(parsed.skipped.len(), 1);
}

#[test]
fn test_editable_without_egg_is_tracked_by_line() {
    let parsed = parse_requirements("-e .\n");
    assert_eq!(parsed.requirements.len(), 1);
    let entry = parsed.requirements.get("-e .").expect("tracked by line");
    assert_eq!(entry.kind, RequirementKind::Source);
    assert_eq!(entry.package(), None);
    assert!(names(&parsed.requirements).is_empty());
}

#[test]
fn test_editable_with_egg_is_tracked_by_name() {
    let parsed = parse_requirements("--editable  git+https://example.invalid/x.git#egg=My_Lib\n");
    assert_eq!(names(&parsed.requirements), vec!["my-lib"]);
    assert_eq!(
        parsed.requirements.get("my-lib").map(ToString::to_string),
        Some("-e git+https://example.invalid/x.git#egg=My_Lib".to_string())
    );
}

#[test]
fn test_url_and_path_lines_are_sources() {
    let parsed = parse_requirements(
        "https://example.invalid/pkg-1.0.tar.gz#egg=pkg\n./vendor/tool\ndist/wheel-1.0-py3-none-any.whl\n",
    );
    assert!(parsed.skipped.is_empty(), "{:?}", parsed.skipped);
    assert_eq!(parsed.requirements.len(), 3);
    assert_eq!(names(&parsed.requirements), vec!["pkg"]);
    assert!(parsed.requirements.get("./vendor/tool").is_some());
}

#[test]
fn test_direct_reference_keeps_its_name() {
    let req = Requirement::parse("pkg @ https://example.invalid/pkg-1.0.tar.gz").expect("valid");
    assert_eq!(req.kind, RequirementKind::Package);
    assert_eq!(req.package(), Some("pkg"));
}

#[test]
fn test_constraint_entries_do_not_install() {
    let constraint = Requirement::parse("six<2").expect("valid").into_constraint();
    assert_eq!(constraint.kind, RequirementKind::Constraint);
    assert_eq!(constraint.package(), None);
    assert_eq!(constraint.key(), "-c six");
    assert_eq!(constraint.to_string(), "-c six<2");

    let set: RequirementSet = [constraint].into_iter().collect();
    assert!(!set.contains("six"));
}

#[test]
fn test_snapshot_reads_inline_constraints() {
    let parsed = parse_snapshot("-c six<2\n-r https://example.invalid/base.txt\nsix\n");
    assert!(parsed.includes.is_empty());
    assert_eq!(parsed.requirements.len(), 3);
    assert_eq!(
        parsed.requirements.get("-c six").map(|r| r.kind),
        Some(RequirementKind::Constraint)
    );
    assert!(parsed.requirements.contains("six"));
}

#[test]
fn test_skipped_line_names_its_file() {
    let skipped = SkippedLine {
        file: None,
        line: 3,
        text: "!!!".to_string(),
        reason: "bad".to_string(),
    }
    .in_file(Path::new("base.txt"));
    assert_eq!(skipped.to_string(), "base.txt: line 3: ignoring \"!!!\": bad");
}

#[test]
fn test_duplicate_name_last_wins() {
    let parsed = parse_requirements("a>=1\nb==2\na>=2\n");
    assert_eq!(parsed.requirements.len(), 2);
    assert_eq!(
        parsed.requirements.get("a").map(|r| r.specifier.as_str()),
        Some("a>=2")
    );
}

#[test]
fn test_duplicate_name_differing_only_in_case() {
    let parsed = parse_requirements("Flask>=1\nflask>=2\n");
    assert_eq!(parsed.requirements.len(), 1);
    assert_eq!(
        parsed.requirements.get("flask").map(|r| r.specifier.as_str()),
        Some("flask>=2")
    );
}

#[test]
fn test_unparseable_line_is_skipped_and_reported() {
    let parsed = parse_requirements("six\n!!!broken\nattrs\n");
    assert_eq!(names(&parsed.requirements), vec!["attrs", "six"]);
    assert_eq!(parsed.skipped.len(), 1);
    assert_eq!(parsed.skipped[0].line, 2);
    assert_eq!(parsed.skipped[0].text, "!!!broken");
    assert!(!parsed.skipped[0].reason.is_empty());
    assert!(parsed.skipped[0].to_string().starts_with("line 2:"));
}

#[test]
fn test_line_continuation_is_joined() {
    let parsed = parse_requirements("requests\\\n>=2.0\nsix\n");
    assert_eq!(
        parsed.requirements.get("requests").map(|r| r.specifier.as_str()),
        Some("requests>=2.0")
    );
    assert!(parsed.requirements.contains("six"));
}

#[test]
fn test_continuation_keeps_starting_line_number() {
    let parsed = parse_requirements("six\n!!!\\\nbroken\n");
    assert_eq!(parsed.skipped.len(), 1);
    assert_eq!(parsed.skipped[0].line, 2);
}

#[test]
fn test_empty_text_yields_empty_set() {
    let parsed = parse_requirements("");
    assert!(parsed.requirements.is_empty());
    assert!(parsed.skipped.is_empty());
}

#[test]
fn test_set_equality_ignores_insertion_order() {
    let first = parse_requirements("a>=1\nb==2\n").requirements;
    let second = parse_requirements("b==2\na>=1\n").requirements;
    assert_eq!(first, second);
}

#[test]
fn test_set_equality_sees_specifier_changes() {
    let first = parse_requirements("a>=1\n").requirements;
    let second = parse_requirements("a>=2\n").requirements;
    assert_ne!(first, second);
}

#[test]
fn test_reparsing_normalized_output_is_stable() {
    let parsed = parse_requirements("Flask [async] >= 2.0 ; python_version >= '3.8'\n");
    let flask = parsed.requirements.get("flask").expect("flask parsed");
    let again = Requirement::parse(&flask.specifier).expect("normalized form reparses");
    assert_eq!(&again, flask);
}
