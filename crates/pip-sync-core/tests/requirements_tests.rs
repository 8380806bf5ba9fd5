//! Tests for parsing requirement declarations and requirement files

use pip_sync_core::{ArgType, Error, Requirement, RequirementSet};
use pip_sync_test_utils::TestProject;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use std::path::Path;

#[rstest]
#[case("-r requirements.txt", ArgType::Reference, "requirements.txt")]
#[case("-c constraints.txt", ArgType::Constraint, "constraints.txt")]
#[case("-e .[tests]", ArgType::Editable, ".[tests]")]
#[case("requests>=2", ArgType::None, "requests>=2")]
fn parses_each_kind(#[case] raw: &str, #[case] arg_type: ArgType, #[case] value: &str) {
    let req: Requirement = raw.parse().unwrap();

    assert_eq!(req.arg_type(), arg_type);
    match req.filename() {
        Some(path) => assert_eq!(path, Path::new(value)),
        None => assert_eq!(req.requirement(), Some(value)),
    }
}

#[test]
fn unknown_prefix_is_a_parse_error() {
    let err = Requirement::parse("-x something").unwrap_err();
    assert!(matches!(err, Error::Parse { ref line } if line == "-x something"));
}

#[test]
fn reads_requirements_file() {
    let project = TestProject::new();
    let path = project.write(
        "requirements.txt",
        "# pinned for CI\nrequests==2.31.0  # http\n\n-r other.txt\n-e .\n",
    );

    let reqs = RequirementSet::from_requirements_file(&path).unwrap();

    assert_eq!(
        reqs,
        RequirementSet::from_strings(["requests==2.31.0", "-r other.txt", "-e ."]).unwrap()
    );
}

#[test]
fn missing_requirements_file_names_the_path() {
    let project = TestProject::new();
    let path = project.root().join("absent.txt");

    let err = RequirementSet::from_requirements_file(&path).unwrap_err();

    assert!(matches!(err, Error::Fs(_)));
    assert!(err.to_string().contains("absent.txt"));
}

#[test]
fn generated_input_lists_canonical_strings() {
    let reqs = RequirementSet::from_strings(["package_1", "package_2"]).unwrap();
    assert!(reqs.needs_compilation());
    assert_eq!(reqs.to_requirements_text(), "package_1\npackage_2");
}

fn requirement_strategy() -> impl Strategy<Value = String> {
    let name = "[a-z][a-z0-9_]{0,12}(==[0-9]\\.[0-9])?";
    let path = "[a-z][a-z0-9_/]{0,12}\\.txt";
    prop_oneof![
        name,
        name.prop_map(|s| format!("-e {s}")),
        path.prop_map(|s| format!("-r {s}")),
        path.prop_map(|s| format!("-c {s}")),
    ]
}

proptest! {
    #[test]
    fn canonical_form_parses_back_to_itself(raw in requirement_strategy()) {
        let req = Requirement::parse(&raw).unwrap();
        let canonical = req.to_string();
        prop_assert_eq!(&canonical, &raw);
        prop_assert_eq!(Requirement::parse(&canonical).unwrap(), req);
    }

    #[test]
    fn requirements_text_parses_back_to_the_same_set(
        raws in proptest::collection::vec(requirement_strategy(), 0..8)
    ) {
        let reqs = RequirementSet::from_strings(&raws).unwrap();
        let reparsed = RequirementSet::from_requirements_text(&reqs.to_requirements_text()).unwrap();
        prop_assert_eq!(reparsed, reqs);
    }
}
