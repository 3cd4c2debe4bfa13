use anyhow::Result;

use super::ExecutionRequest;
use super::ExecutionResult;
use super::TestRunResponse;
use super::Verdict;
use crate::domain::models::KnownLanguage;
use crate::domain::models::Language;

#[test]
fn it_parses_verdicts() {
    assert_eq!(Verdict::parse("AC"), Verdict::Accepted);
    assert_eq!(Verdict::parse("accepted"), Verdict::Accepted);
    assert_eq!(Verdict::parse("Wrong Answer"), Verdict::WrongAnswer);
    assert_eq!(Verdict::parse("wrong_answer"), Verdict::WrongAnswer);
    assert_eq!(Verdict::parse("error"), Verdict::Error);
    assert_eq!(Verdict::parse("TLE"), Verdict::Other("TLE".to_string()));
}

#[test]
fn it_only_runs_hidden_cases_on_submit() {
    let lang = Language::Known(KnownLanguage::Python);
    let run = ExecutionRequest::new("print(1)", lang.clone(), "two-sum", false, None);
    let submit = ExecutionRequest::new("print(1)", lang, "two-sum", true, None);

    assert!(!run.run_hidden);
    assert!(submit.run_hidden);
    assert!(run.include_details);
}

#[test]
fn it_serializes_requests_in_camel_case() -> Result<()> {
    let req = ExecutionRequest::new(
        "print(1)",
        Language::Known(KnownLanguage::Python),
        "two-sum",
        true,
        Some("weekly-1".to_string()),
    );

    insta::assert_json_snapshot!(req, @r###"
    {
      "code": "print(1)",
      "language": "python",
      "problemIdentifier": "two-sum",
      "includeDetails": true,
      "runHidden": true,
      "contestId": "weekly-1"
    }
    "###);

    let without_contest = serde_json::to_value(ExecutionRequest::new(
        "",
        Language::Known(KnownLanguage::Cpp),
        "p",
        false,
        None,
    ))?;
    assert!(without_contest.get("contestId").is_none());

    return Ok(());
}

#[test]
fn it_builds_error_results() {
    let res = ExecutionResult::from_error("connection refused");

    assert_eq!(res.verdict, Verdict::Error);
    assert_eq!(res.passed_count, 0);
    assert_eq!(res.total_tests, 0);
    assert_eq!(res.per_case.len(), 1);
    assert_eq!(res.per_case[0].error, Some("connection refused".to_string()));
    assert!(!res.per_case[0].is_hidden);
    assert!(!res.per_case[0].passed);
}

#[test]
fn it_reads_partial_responses() -> Result<()> {
    let res: TestRunResponse = serde_json::from_str(
        r#"{"results": [{"passed": true, "executionTime": 3.5, "isHidden": true}]}"#,
    )?;

    assert_eq!(res.verdict, None);
    assert_eq!(res.total_tests, None);
    assert_eq!(res.results.len(), 1);
    assert_eq!(res.results[0].execution_time_ms, 3.5);

    return Ok(());
}
