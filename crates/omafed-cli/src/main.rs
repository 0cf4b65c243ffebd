use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use log::LevelFilter;
use omafed_core::{GitAcquirer, ScriptFilter};
use omafed_term::{Config, ConfigKey};

mod commands;

#[derive(Parser, Debug)]
#[clap(
    name = "omafed",
    author,
    version,
    about = "Convert omakub setup scripts from Ubuntu to Fedora"
)]
// The config flags are read by `Config::load` through the raw matches.
#[allow(dead_code)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Commands>,

    #[clap(
        id = "config-file",
        long = "config-file",
        help = "Path to the config file [default: <config dir>/omafed/config.toml]"
    )]
    config_file: Option<String>,

    #[clap(
        id = "repo-dir",
        long = "repo-dir",
        help = "Directory the scripts are cloned into and converted in [default: ./omakub]"
    )]
    repo_dir: Option<String>,

    #[clap(
        id = "repo-url",
        long = "repo-url",
        help = "Git repository the scripts are cloned from [default: https://github.com/omakub/omakub.git]"
    )]
    repo_url: Option<String>,

    #[clap(
        id = "script-suffix",
        long = "script-suffix",
        help = "File suffix of the scripts to list and convert [default: .sh]"
    )]
    script_suffix: Option<String>,

    #[clap(
        id = "window-size",
        long = "window-size",
        help = "Maximum number of list rows shown at once [default: 10]"
    )]
    window_size: Option<String>,

    #[clap(
        id = "convert-scope",
        long = "convert-scope",
        value_parser = ["all", "unselected"],
        help = "Which scripts are converted after confirming a selection [default: all]"
    )]
    convert_scope: Option<String>,

    #[clap(long, help = "Use the existing repository directory instead of cloning it")]
    skip_clone: bool,

    #[clap(long, short, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert every script under a directory without asking
    Convert {
        /// Directory to convert [default: the configured repo-dir]
        dir: Option<PathBuf>,
    },
    /// List the scripts found under a directory
    List {
        /// Directory to scan [default: the configured repo-dir]
        dir: Option<PathBuf>,
    },
    /// Clone the script repository
    Clone {
        /// Destination directory [default: the configured repo-dir]
        dest: Option<PathBuf>,
    },
    /// Configuration file helpers
    Config {
        #[clap(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Print the default config file
    Default,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cmd = Cli::command();
    let matches = cmd.clone().get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    init_logger(&cli)?;
    Config::load(cmd.clone(), vec![&matches]).await?;

    let repo_dir = PathBuf::from(Config::get(ConfigKey::RepoDir));
    let filter = ScriptFilter::new(&Config::get(ConfigKey::ScriptSuffix));
    let acquirer = GitAcquirer::new(&Config::get(ConfigKey::RepoUrl));
    let mut stdout = io::stdout();

    match cli.command {
        Some(Commands::Convert { dir }) => {
            commands::run_convert(&dir.unwrap_or(repo_dir), &filter, &mut stdout)
        }
        Some(Commands::List { dir }) => {
            commands::run_list(&dir.unwrap_or(repo_dir), &filter, &mut stdout)
        }
        Some(Commands::Clone { dest }) => {
            commands::run_clone(&acquirer, &dest.unwrap_or(repo_dir), &mut stdout)
        }
        Some(Commands::Config {
            action: ConfigCommands::Default,
        }) => {
            println!("{}", Config::serialize_default(cmd));
            Ok(())
        }
        None => {
            let options = commands::InteractiveOptions {
                repo_dir,
                filter,
                window_size: Config::window_size()?,
                scope: Config::convert_scope()?,
                skip_clone: cli.skip_clone,
            };
            commands::run_interactive(&acquirer, options, &mut stdout).await
        }
    }
}

/// Interactive runs own the terminal, so their logs go to `omafed.log`.
fn init_logger(cli: &Cli) -> Result<()> {
    let log_level_filter = cli.log_level.parse().unwrap_or(LevelFilter::Info);

    let mut builder = env_logger::Builder::new();
    builder.filter_level(log_level_filter);

    if cli.command.is_none() {
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open("omafed.log")?;
        builder.target(env_logger::Target::Pipe(Box::new(log_file)));
    }

    builder.init();
    Ok(())
}
