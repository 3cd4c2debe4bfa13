use anyhow::Result;
use test_utils::insta_snapshot;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let toml_res = res.parse::<toml_edit::Document>();
    assert!(toml_res.is_ok());

    insta_snapshot(|| {
        insta::assert_snapshot!(res, @r###"
        # Base URL of the judge API.
        api-url = "http://localhost:5001"

        # Contest to attribute runs and submissions to.
        # contest-id = ""

        # Language to write solutions in. Built-in templates exist for java, python, cpp, javascript.
        language = "python"

        # Time to wait in milliseconds before a request to the judge times out, 0 to wait indefinitely.
        request-timeout = 0

        # Identity token sent as a bearer token with every request.
        # token = ""

        # Your user ID. Required to run or submit code and to post comments.
        # user-id = ""
        "###);
    });
}

// Config is global, so loading and asserting happen in one test to avoid
// parallel tests overwriting each other's values.
#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["codearena", "-c", "./config.example.toml"])?;
    Config::load(vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::Language), "java");
    assert_eq!(Config::get(ConfigKey::RequestTimeout), "2500");
    assert_eq!(Config::get(ConfigKey::UserID), "ada");
    assert_eq!(Config::get(ConfigKey::ContestID), "spring-open");
    assert_eq!(Config::get(ConfigKey::Token), "");

    let matches = cli::build().try_get_matches_from(vec![
        "codearena",
        "-c",
        "./config.example.toml",
        "--language",
        "cpp",
    ])?;
    Config::load(vec![&matches]).await?;
    assert_eq!(Config::get(ConfigKey::Language), "cpp");

    for bad_config in [
        "./test/bad-config.toml",
        "./test/bad-config-negative.toml",
        "./test/bad-config-table.toml",
        "./test/bad-config-array.toml",
    ] {
        let matches = cli::build().try_get_matches_from(vec!["codearena", "-c", bad_config])?;
        let res = Config::load(vec![&matches]).await;
        assert!(res.is_err(), "{bad_config} should be rejected");
    }

    let matches = cli::build().try_get_matches_from(vec![
        "codearena",
        "-c",
        "./config.example.toml",
        "--request-timeout",
        "soon",
    ])?;
    let res = Config::load(vec![&matches]).await;
    insta::assert_snapshot!(res.unwrap_err().to_string(), @r###"
    Invalid value for 'request-timeout': soon
    The value must be a whole number of milliseconds.
    "###);

    return Ok(());
}
