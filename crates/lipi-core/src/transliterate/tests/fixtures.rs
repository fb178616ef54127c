use serde::Deserialize;

use super::*;

const FIXTURES_TOML: &str = include_str!("fixtures.toml");

#[derive(Deserialize)]
struct Fixtures {
    cases: Vec<Case>,
}

#[derive(Deserialize)]
struct Case {
    from: String,
    to: String,
    input: String,
    expected: String,
    #[serde(default)]
    one_way: bool,
}

#[test]
fn test_fixture_cases() {
    let fixtures: Fixtures = toml::from_str(FIXTURES_TOML).unwrap();
    assert!(!fixtures.cases.is_empty());
    for case in &fixtures.cases {
        let out = convert(&case.input, &case.from, &case.to);
        assert_eq!(out, case.expected, "{} -> {}: {}", case.from, case.to, case.input);
        if !case.one_way {
            let back = convert(&case.expected, &case.to, &case.from);
            assert_eq!(back, case.input, "{} -> {}: {}", case.to, case.from, case.expected);
        }
    }
}
