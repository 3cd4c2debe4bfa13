#[cfg(test)]
#[path = "render_test.rs"]
mod tests;

use chrono::DateTime;
use yansi::Paint;

use crate::domain::models::CaseResult;
use crate::domain::models::Comment;
use crate::domain::models::ExecutionResult;
use crate::domain::models::Problem;
use crate::domain::models::Submission;
use crate::domain::models::Verdict;

fn paint_verdict(verdict: &Verdict) -> String {
    let text = verdict.to_string();
    match verdict {
        Verdict::Accepted => return Paint::green(text).bold().to_string(),
        Verdict::WrongAnswer => return Paint::red(text).bold().to_string(),
        Verdict::Error | Verdict::Other(_) => return Paint::yellow(text).bold().to_string(),
    }
}

fn format_timestamp(timestamp: &Option<String>) -> String {
    let raw = match timestamp {
        Some(raw) => raw,
        None => return "".to_string(),
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.naive_utc().format("%Y-%m-%d %H:%M UTC").to_string();
    }

    return raw.to_string();
}

fn indent(text: &str) -> String {
    return text
        .lines()
        .map(|line| return format!("    {line}"))
        .collect::<Vec<String>>()
        .join("\n");
}

pub fn problem(problem: &Problem) -> String {
    let public = problem.public_test_cases().len();
    let hidden = problem.test_cases.len() - public;

    let mut sections = vec![
        format!(
            "{} ({})",
            Paint::new(&problem.title).bold().underline(),
            problem.difficulty
        ),
        problem.statement.trim().to_string(),
    ];

    if !problem.input_format.is_empty() {
        sections.push(format!(
            "{}\n{}",
            Paint::new("Input").bold(),
            problem.input_format.trim()
        ));
    }
    if !problem.output_format.is_empty() {
        sections.push(format!(
            "{}\n{}",
            Paint::new("Output").bold(),
            problem.output_format.trim()
        ));
    }
    if !problem.sample_input.is_empty() {
        sections.push(format!(
            "{}\n{}\n{}\n{}",
            Paint::new("Sample input").bold(),
            indent(&problem.sample_input),
            Paint::new("Sample output").bold(),
            indent(&problem.sample_output)
        ));
    }

    sections.push(format!("{public} public, {hidden} hidden test cases"));

    return sections.join("\n\n");
}

fn case(idx: usize, case: &CaseResult) -> String {
    let n = idx + 1;
    let label = if case.is_hidden {
        format!("Case {n} (hidden)")
    } else {
        format!("Case {n}")
    };
    let status = if case.passed {
        Paint::green("passed").to_string()
    } else {
        Paint::red("failed").to_string()
    };

    let mut res = format!("{label}: {status} ({} ms)", case.execution_time_ms);
    if let Some(err) = &case.error {
        res = format!("{res}\n{}", indent(err));
    }

    if !case.passed && !case.is_hidden && case.error.is_none() {
        res = format!(
            "{res}\n  Input:\n{}\n  Expected:\n{}\n  Actual:\n{}",
            indent(&case.input),
            indent(&case.expected_output),
            indent(&case.actual_output)
        );
    }

    return res;
}

pub fn execution_result(result: &ExecutionResult) -> String {
    let mut lines = vec![format!(
        "Verdict: {} ({}/{} passed)",
        paint_verdict(&result.verdict),
        result.passed_count,
        result.total_tests
    )];

    for (idx, res) in result.per_case.iter().enumerate() {
        lines.push(case(idx, res));
    }

    return lines.join("\n");
}

pub fn submissions(submissions: &[Submission]) -> String {
    if submissions.is_empty() {
        return "No submissions yet.".to_string();
    }

    return submissions
        .iter()
        .map(|submission| {
            let mut res = format!(
                "- (ID: {}) {}, {}",
                submission.id,
                paint_verdict(&submission.verdict),
                submission.language
            );
            if let (Some(passed), Some(total)) = (submission.passed_count, submission.total_tests)
            {
                res = format!("{res}, {passed}/{total}");
            }
            let timestamp = format_timestamp(&submission.created_at);
            if !timestamp.is_empty() {
                res = format!("{res}, {timestamp}");
            }
            return res;
        })
        .collect::<Vec<String>>()
        .join("\n");
}

pub fn comments(comments: &[Comment]) -> String {
    if comments.is_empty() {
        return "No comments yet. Start the discussion!".to_string();
    }

    return comments
        .iter()
        .map(|comment| {
            let mut header = Paint::new(&comment.author).bold().to_string();
            let timestamp = format_timestamp(&comment.created_at);
            if !timestamp.is_empty() {
                header = format!("{header} ({timestamp})");
            }
            return format!("{header}\n{}", indent(&comment.content));
        })
        .collect::<Vec<String>>()
        .join("\n\n");
}
