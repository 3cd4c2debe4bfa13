use std::env;

use serde_json::json;
use serde_json::Value;

pub fn insta_snapshot<F: FnOnce()>(f: F) {
    let mut settings = insta::Settings::clone_current();
    let snapshot_path = env::current_dir().unwrap().join("./test/snapshots");
    settings.set_snapshot_path(snapshot_path);
    settings.bind(f);
}

/// Problem definitions as the judge's `data` field returns them.
pub fn problem_fixture(id: &str) -> Value {
    if id == "lru-cache" {
        return json!({
            "id": "lru-cache",
            "title": "LRU Cache",
            "difficulty": "Medium",
            "statement": "Design a data structure that follows the constraints of a Least Recently Used cache.",
            "input_format": "A list of operations.",
            "output_format": "The result of every get operation.",
            "sample_input": "put 1 1\nget 1",
            "sample_output": "1",
            "test_cases": [
                { "input": "put 1 1\nget 1", "output": "1", "isHidden": false },
                { "input": "put 1 1\nput 2 2\nget 3", "output": "-1", "isHidden": true }
            ]
        });
    }

    return json!({
        "id": id,
        "title": "Two Sum",
        "difficulty": "Easy",
        "statement": "Return the indices of the two numbers that add up to target.",
        "input_format": "An array of integers and a target.",
        "output_format": "Two indices.",
        "sample_input": "2 7 11 15\n9",
        "sample_output": "0 1",
        "test_cases": [
            { "input": "2 7 11 15\n9", "output": "0 1", "isHidden": false },
            { "input": "3 2 4\n6", "output": "1 2", "isHidden": false },
            { "input": "3 3\n6", "output": "0 1", "isHidden": true }
        ],
        "starterCode": {
            "python": "def two_sum(nums, target):\n    pass\n"
        }
    });
}

/// `GET /api/problems/{id}` response body.
pub fn problem_response_fixture(id: &str) -> String {
    return json!({ "success": true, "data": problem_fixture(id) }).to_string();
}

/// `POST /api/code/test` response body where every case in `passed` is
/// reported. The `isHidden` flags are deliberately wrong so callers can assert
/// they are not trusted.
pub fn test_run_fixture(passed: &[bool]) -> Value {
    let results = passed
        .iter()
        .enumerate()
        .map(|(idx, ok)| {
            return json!({
                "input": format!("input {idx}"),
                "expectedOutput": format!("expected {idx}"),
                "actualOutput": if *ok { format!("expected {idx}") } else { format!("actual {idx}") },
                "passed": ok,
                "executionTime": 12,
                "isHidden": false
            });
        })
        .collect::<Vec<Value>>();

    return json!({
        "passedCount": passed.iter().filter(|ok| return **ok).count(),
        "totalTests": passed.len(),
        "results": results
    });
}
