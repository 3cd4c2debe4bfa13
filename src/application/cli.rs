use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::IntoEnumIterator;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use super::render;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Identity;
use crate::domain::models::KnownLanguage;
use crate::domain::models::Language;
use crate::domain::models::LoadState;
use crate::domain::services::Workspace;
use crate::infrastructure::judges::JudgeManager;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

fn identity() -> Option<Identity> {
    let user_id = Config::get(ConfigKey::UserID);
    if user_id.is_empty() {
        return None;
    }

    return Some(Identity::new(&user_id, &Config::get(ConfigKey::Token)));
}

/// Opens a session for the problem and waits for everything it loads.
async fn open_workspace(problem_id: &str) -> Result<Workspace> {
    let judge = JudgeManager::get()?;
    let mut workspace = Workspace::new(judge, Language::parse(&Config::get(ConfigKey::Language)));
    workspace.set_contest(Some(Config::get(ConfigKey::ContestID)));
    workspace.switch_session(problem_id, identity());
    workspace.wait_until_idle().await;

    if matches!(workspace.load_state(), LoadState::Failed(_)) {
        tracing::debug!(
            session = workspace.key().to_string(),
            "Retrying problem load"
        );
        workspace.reload();
        workspace.wait_until_idle().await;
    }

    if let LoadState::Failed(err) = workspace.load_state() {
        bail!(format!("Failed to load problem {problem_id}: {err}"));
    }

    return Ok(workspace);
}

async fn print_problem(problem_id: &str) -> Result<()> {
    let workspace = open_workspace(problem_id).await?;
    if let Some(problem) = workspace.problem() {
        println!("{}", render::problem(problem));
    }

    return Ok(());
}

async fn print_template(problem_id: &str, all: bool) -> Result<()> {
    let mut workspace = open_workspace(problem_id).await?;
    if !all {
        tracing::debug!(
            language = workspace.language().to_string(),
            "Printing template"
        );
        print!("{}", workspace.code());
        return Ok(());
    }

    for language in KnownLanguage::iter() {
        workspace.set_language(Language::Known(language));
        println!("{}", Paint::new(format!("== {language} ==")).bold());
        println!("{}", workspace.code());
    }

    return Ok(());
}

async fn execute(problem_id: &str, file: &str, is_submit: bool) -> Result<()> {
    let code = fs::read_to_string(file).await?;
    if code.trim().is_empty() {
        bail!(format!("{file} is empty, there is nothing to run."));
    }

    let mut workspace = open_workspace(problem_id).await?;
    if workspace.buffer().last_auto_template().map(str::trim) == Some(code.trim()) {
        eprintln!(
            "{}",
            Paint::yellow(format!("{file} still holds the unmodified template."))
        );
    }
    workspace.edit(&code);

    if !workspace.execute(is_submit) {
        if workspace.identity().is_none() {
            bail!("You must be signed in to run code. Pass --user-id and --token, or set them in the config file.");
        }
        bail!(format!("Problem {problem_id} has not finished loading."));
    }

    let busy = workspace.busy();
    if busy.submitting {
        eprintln!("Submitting {} bytes...", workspace.code().len());
    } else if busy.running_tests {
        eprintln!("Running tests...");
    }
    workspace.wait_until_idle().await;

    if let Some(res) = workspace.result() {
        println!("{}", render::execution_result(res));
        if is_submit && res.verdict.is_accepted() {
            println!("\n{}", Paint::new("Submission history").bold());
            println!("{}", render::submissions(workspace.submissions()));
        }
    }

    return Ok(());
}

async fn print_submissions(problem_id: &str) -> Result<()> {
    if identity().is_none() {
        bail!("You must be signed in to view submissions. Pass --user-id and --token, or set them in the config file.");
    }

    let workspace = open_workspace(problem_id).await?;
    if let Some(err) = workspace.submissions_error() {
        bail!(err.to_string());
    }
    println!("{}", render::submissions(workspace.submissions()));

    return Ok(());
}

async fn discuss(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("list", list_matches)) => {
            let problem_id = required(list_matches, "id")?;
            let workspace = open_workspace(&problem_id).await?;
            if let Some(err) = workspace.comments_error() {
                bail!(err.to_string());
            }
            println!("{}", render::comments(workspace.comments()));
        }
        Some(("post", post_matches)) => {
            let problem_id = required(post_matches, "id")?;
            let message = required(post_matches, "message")?;
            let mut workspace = open_workspace(&problem_id).await?;
            if !workspace.post_comment(&message) {
                bail!("You must be signed in and provide a non-empty message to post a comment.");
            }
            workspace.wait_until_idle().await;
            if let Some(err) = workspace.comments_error() {
                bail!(err.to_string());
            }
            println!("{}", render::comments(workspace.comments()));
        }
        _ => {
            subcommand_discuss().print_long_help()?;
        }
    }

    return Ok(());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn required(matches: &ArgMatches, name: &str) -> Result<String> {
    if let Some(val) = matches.get_one::<String>(name) {
        return Ok(val.to_string());
    }

    bail!(format!("Missing required argument --{name}"));
}

fn arg_problem_id() -> Arg {
    return Arg::new("id")
        .short('i')
        .long("id")
        .help("Problem ID or slug, e.g. two-sum.")
        .num_args(1)
        .required(true);
}

fn arg_file() -> Arg {
    return Arg::new("file")
        .short('f')
        .long("file")
        .help("Path to the source file to send to the judge.")
        .num_args(1)
        .required(true);
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_discuss() -> Command {
    return Command::new("discuss")
        .about("Read and post to a problem's discussion thread.")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("list")
                .about("List all comments for a problem.")
                .arg(arg_problem_id()),
        )
        .subcommand(
            Command::new("post")
                .about("Post a comment to a problem's discussion.")
                .arg(arg_problem_id())
                .arg(
                    Arg::new("message")
                        .short('m')
                        .long("message")
                        .help("Comment text.")
                        .num_args(1)
                        .required(true),
                ),
        );
}

pub fn build() -> Command {
    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("codearena")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(true)
        .subcommand(
            Command::new("problem")
                .about("Show a problem statement with its public samples.")
                .arg(arg_problem_id()),
        )
        .subcommand(
            Command::new("template")
                .about("Print the starter template for a problem in the selected language.")
                .arg(arg_problem_id())
                .arg(
                    Arg::new("all")
                        .short('a')
                        .long("all")
                        .help("Print the template for every built-in language.")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("run")
                .about("Run code against the problem's public test cases.")
                .arg(arg_problem_id())
                .arg(arg_file()),
        )
        .subcommand(
            Command::new("submit")
                .about("Submit code against every test case, hidden ones included.")
                .arg(arg_problem_id())
                .arg(arg_file()),
        )
        .subcommand(
            Command::new("submissions")
                .about("List your past submissions for a problem.")
                .arg(arg_problem_id()),
        )
        .subcommand(subcommand_discuss())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("CODEARENA_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::ApiURL.to_string())
                .long(ConfigKey::ApiURL.to_string())
                .env("CODEARENA_API_URL")
                .num_args(1)
                .help(format!("Base URL of the judge API. [default: {}]", Config::default(ConfigKey::ApiURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::UserID.to_string())
                .short('u')
                .long(ConfigKey::UserID.to_string())
                .env("CODEARENA_USER_ID")
                .num_args(1)
                .help("Your user ID. Required to run or submit code and to post comments.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Token.to_string())
                .long(ConfigKey::Token.to_string())
                .env("CODEARENA_TOKEN")
                .num_args(1)
                .help("Identity token sent as a bearer token with every request.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Language.to_string())
                .short('l')
                .long(ConfigKey::Language.to_string())
                .env("CODEARENA_LANGUAGE")
                .num_args(1)
                .help(format!(
                    "Language to write solutions in. Built-in templates exist for {}. [default: {}]",
                    KnownLanguage::VARIANTS.join(", "),
                    Config::default(ConfigKey::Language)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ContestID.to_string())
                .long(ConfigKey::ContestID.to_string())
                .env("CODEARENA_CONTEST_ID")
                .num_args(1)
                .help("Contest to attribute runs and submissions to.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::RequestTimeout.to_string())
                .long(ConfigKey::RequestTimeout.to_string())
                .env("CODEARENA_REQUEST_TIMEOUT")
                .num_args(1)
                .help(format!("Time to wait in milliseconds before a request to the judge times out, 0 to wait indefinitely. [default: {}]", Config::default(ConfigKey::RequestTimeout)))
                .global(true),
        );
}

pub async fn parse() -> Result<()> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
            }
            _ => {
                subcommand_config().print_long_help()?;
            }
        },
        Some((name, subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;

            match name {
                "problem" => print_problem(&required(subcmd_matches, "id")?).await?,
                "template" => {
                    print_template(
                        &required(subcmd_matches, "id")?,
                        subcmd_matches.get_flag("all"),
                    )
                    .await?
                }
                "run" => {
                    execute(
                        &required(subcmd_matches, "id")?,
                        &required(subcmd_matches, "file")?,
                        false,
                    )
                    .await?
                }
                "submit" => {
                    execute(
                        &required(subcmd_matches, "id")?,
                        &required(subcmd_matches, "file")?,
                        true,
                    )
                    .await?
                }
                "submissions" => print_submissions(&required(subcmd_matches, "id")?).await?,
                "discuss" => discuss(subcmd_matches).await?,
                _ => {
                    build().print_long_help()?;
                }
            }
        }
        None => {
            build().print_long_help()?;
        }
    }

    return Ok(());
}
