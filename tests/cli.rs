use gherkin_robot::cli::{App, EXIT_FAILURE, EXIT_SUCCESS};

const FEATURES: &str = "tests/features";
const SAMPLE: &str = "tests/sources/sample.go";

struct Run {
    code: i32,
    out: String,
    err: String,
}

fn run(args: &[&str]) -> Run {
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let code =
        App::new().run(["gherkin-robot"].iter().chain(args), &mut out, &mut err);
    Run {
        code,
        out: String::from_utf8(out).expect("UTF-8 output"),
        err: String::from_utf8(err).expect("UTF-8 diagnostics"),
    }
}

#[test]
fn lists_distinct_titles_in_source_order() {
    let res = run(&["render", "-l", "-f", FEATURES, "-e", SAMPLE]);

    assert_eq!(res.code, EXIT_SUCCESS, "{}", res.err);
    assert_eq!(
        res.out,
        "api.log_in\n\
         web.log_in\n\
         sample.Test_my_case.my_case\n\
         sample.block3.whole\n",
    );
}

#[test]
fn wip_scenarios_are_excluded_by_default() {
    let listed = run(&["robot", "--list", "-f", FEATURES, "-e", SAMPLE]);
    let rendered = run(&["robot", "-F", "-f", FEATURES, "-e", SAMPLE]);

    for res in [&listed, &rendered] {
        assert_eq!(res.code, EXIT_SUCCESS, "{}", res.err);
        assert!(!res.out.contains("reset"), "{}", res.out);
        assert!(!res.out.contains("unfinished"), "{}", res.out);
    }
}

#[test]
fn wip_features_are_excluded_by_default() {
    let listed = run(&["render", "-l", "-f", FEATURES]);
    let rendered = run(&["render", "-f", FEATURES]);

    for res in [&listed, &rendered] {
        assert_eq!(res.code, EXIT_SUCCESS, "{}", res.err);
        assert!(!res.out.contains("Draft"), "{}", res.out);
        assert!(!res.out.contains("draft"), "{}", res.out);
        assert!(!res.out.contains("pay later"), "{}", res.out);
    }
    assert_eq!(listed.out, "api.log_in\nweb.log_in\n");
}

#[test]
fn same_test_in_different_sources_gets_distinct_titles() {
    let sources = "tests/sources/a_test.go,tests/sources/b_test.go";
    let listed = run(&["render", "-l", "-e", sources]);
    let rendered = run(&["render", "-F", "-e", sources]);

    assert_eq!(listed.code, EXIT_SUCCESS, "{}", listed.err);
    assert_eq!(listed.out, "a_test.Test_login.login\nb_test.Test_login.login\n");

    assert_eq!(rendered.code, EXIT_SUCCESS, "{}", rendered.err);
    assert!(rendered.out.contains("\na_test.Test_login.login\n"));
    assert!(rendered.out.contains("\nb_test.Test_login.login\n"));
}

#[test]
fn custom_tag_expression_overrides_default() {
    let res = run(&["render", "-l", "-f", FEATURES, "-t", "@wip or @smoke"]);

    assert_eq!(res.code, EXIT_SUCCESS, "{}", res.err);
    assert_eq!(
        res.out,
        "api.log_in\ndraft.pay_later\nweb.reset_password\n",
    );
}

#[test]
fn renders_embedded_scenarios_per_scenario() {
    let res = run(&["render", "--per-scenario", "--embedded", SAMPLE]);

    assert_eq!(res.code, EXIT_SUCCESS, "{}", res.err);
    assert_eq!(
        res.out,
        "*** Test Cases ***\n\
         sample.Test_my_case.my_case\n\
         \x20   [Tags]    file:tests/sources/sample.go    test:Test_my_case    \
         tests/sources/sample.go/sample.Test_my_case.feature\n\
         \x20   Feature    sample.Test_my_case    Test_my_case\n\
         \x20   Given a thing\n\
         \x20   When it happens\n\
         \x20   Then it passes\n\
         \n\
         sample.block3.whole\n\
         \x20   [Tags]    tests/sources/sample.go/sample.block3.feature\n\
         \x20   Feature    sample.block3    Embedded feature\n\
         \x20   Given a whole feature\n",
    );
}

#[test]
fn renders_features_with_resources() {
    let res = run(&[
        "render",
        "-f",
        "tests/features/web.feature",
        "-r",
        "keywords.robot,common.resource",
    ]);

    assert_eq!(res.code, EXIT_SUCCESS, "{}", res.err);
    assert_eq!(
        res.out,
        "*** Settings ***\n\
         Resource    keywords.robot\n\
         Resource    common.resource\n\
         \n\
         *** Test Cases ***\n\
         Web login\n\
         \x20   [Documentation]    Logging in through the browser.\n\
         \x20   [Tags]    web    tests/features/web.feature\n\
         \x20   Scenario    web    log in\n\
         \x20   Given a browser\n\
         \x20   When I log in\n\
         \x20   Then I see the dashboard\n",
    );
}

#[test]
fn omits_settings_without_resources() {
    let res = run(&["render", "-f", FEATURES]);

    assert_eq!(res.code, EXIT_SUCCESS, "{}", res.err);
    assert!(res.out.starts_with("*** Test Cases ***\nAPI login\n"));
    assert!(!res.out.contains("*** Settings ***"));
}

#[test]
fn dumps_json_lines() {
    let res = run(&["render", "--dump", "-f", FEATURES]);

    assert_eq!(res.code, EXIT_SUCCESS, "{}", res.err);
    let features = res
        .out
        .lines()
        .map(|l| serde_json::from_str::<serde_json::Value>(l).expect("JSON"))
        .collect::<Vec<_>>();
    assert_eq!(features.len(), 2);
    assert_eq!(features[0]["uri"], "tests/features/api.feature");
    assert_eq!(features[1]["name"], "Web login");
    assert_eq!(features[1]["scenarios"].as_array().map(Vec::len), Some(1));
    assert_eq!(
        features[1]["scenarios"][0]["background"][0]["text"],
        "a browser",
    );
}

#[test]
fn extracts_texts() {
    let res = run(&["extract", SAMPLE]);

    assert_eq!(res.code, EXIT_SUCCESS, "{}", res.err);
    assert!(res.out.starts_with(
        "@file:tests/sources/sample.go\n@test:Test_my_case\nScenario: my case\n",
    ));
    assert!(res.out.contains("@test:Test_unfinished\n@wip\nScenario: unfinished\n"));
    assert!(res.out.contains("Feature: Embedded feature\n"));
    assert!(!res.out.contains("# ==>"));
}

#[test]
fn extracts_standalone_features_with_banners() {
    let res = run(&["feature", "--as-features", SAMPLE, SAMPLE]);

    assert_eq!(res.code, EXIT_SUCCESS, "{}", res.err);
    assert_eq!(res.out.matches("# ==> tests/sources/sample.go <==\n").count(), 2);
    assert_eq!(res.out.matches("Feature: Test_my_case\n").count(), 2);
}

#[test]
fn unreadable_file_does_not_stop_extraction() {
    let res = run(&["extract", "tests/sources/nope.go", SAMPLE]);

    assert_eq!(res.code, EXIT_FAILURE);
    assert!(res.out.contains("Scenario: my case\n"));
    assert!(res.err.starts_with("Error: "), "{}", res.err);
    assert!(res.err.contains("tests/sources/nope.go"), "{}", res.err);
    assert!(res.err.contains("Commands:"), "{}", res.err);
}

#[test]
fn missing_features_dir_fails() {
    let res = run(&["render", "-f", "tests/nope"]);

    assert_eq!(res.code, EXIT_FAILURE);
    assert!(res.out.is_empty());
    assert!(
        res.err
            .starts_with("Error: unknown feature dir or file: `tests/nope`\n"),
        "{}",
        res.err,
    );
}

#[test]
fn bad_short_name_pattern_fails() {
    let res = run(&["render", "-f", FEATURES, "--short-name-pattern", "("]);

    assert_eq!(res.code, EXIT_FAILURE);
    assert!(res.out.is_empty());
    assert!(res.err.starts_with("Error: "), "{}", res.err);
}
