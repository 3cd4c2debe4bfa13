#[cfg(test)]
#[path = "execution_test.rs"]
mod tests;

use crate::domain::models::CaseResult;
use crate::domain::models::ExecutionRequest;
use crate::domain::models::ExecutionResult;
use crate::domain::models::Identity;
use crate::domain::models::JudgeBox;
use crate::domain::models::TestCase;
use crate::domain::models::TestRunResponse;
use crate::domain::models::Verdict;

fn redact(case: &mut CaseResult) {
    case.input.clear();
    case.expected_output.clear();
    case.actual_output.clear();
}

pub struct ExecutionCoordinator {}

impl ExecutionCoordinator {
    /// Sends a run or submit request. Never fails: transport, status and
    /// decoding errors all come back as an `ERROR` verdict.
    pub async fn execute(
        judge: &JudgeBox,
        identity: &Identity,
        request: &ExecutionRequest,
        test_cases: &[TestCase],
    ) -> ExecutionResult {
        tracing::debug!(
            problem = request.problem_identifier,
            language = request.language.to_string(),
            run_hidden = request.run_hidden,
            "Executing code"
        );

        match judge.test_code(identity, request).await {
            Ok(response) => {
                let res = ExecutionCoordinator::reconcile(response, test_cases);
                tracing::debug!(
                    verdict = res.verdict.to_string(),
                    passed = res.passed_count,
                    total = res.total_tests,
                    "Execution finished"
                );
                return res;
            }
            Err(err) => {
                tracing::error!(error = ?err, "Code execution request failed");
                return ExecutionResult::from_error(&err.to_string());
            }
        }
    }

    /// Turns a raw judge response into a displayable result. Visibility is
    /// taken from the local test cases by position, and positions without a
    /// local test case are treated as hidden.
    pub fn reconcile(response: TestRunResponse, test_cases: &[TestCase]) -> ExecutionResult {
        let total_tests = response.total_tests.unwrap_or(response.results.len());
        let passed_count = response
            .passed_count
            .unwrap_or_else(|| return response.results.iter().filter(|e| return e.passed).count())
            .min(total_tests);

        let verdict = match response.verdict.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => Verdict::parse(text),
            _ => {
                if passed_count == total_tests || response.all_passed == Some(true) {
                    Verdict::Accepted
                } else {
                    Verdict::WrongAnswer
                }
            }
        };

        let per_case = response
            .results
            .into_iter()
            .enumerate()
            .map(|(idx, mut case)| {
                case.is_hidden = test_cases
                    .get(idx)
                    .map(|local| return local.is_hidden)
                    .unwrap_or(true);
                if case.is_hidden {
                    redact(&mut case);
                }
                return case;
            })
            .collect::<Vec<CaseResult>>();

        return ExecutionResult {
            verdict,
            passed_count,
            total_tests,
            per_case,
        };
    }
}
