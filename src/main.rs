use clap::{Parser, Subcommand};
use std::env;
use std::io::{self, Write};
use toy_robot::cli_util::init_logging;
use toy_robot::commands::{repl, run};

fn print_top_usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} run  [--debug|-d] [--quiet|-q]                # Run commands from STDIN
  {0} run  [--debug|-d] [--quiet|-q] --file <PATH>  # Run commands from a file
  {0} repl [--bare|--editor]                        # Start a toy robot REPL
  {0}                                               # Same as "{0} repl"

Run "{0} <subcommand> --help" for more info.

Environment:
  ROBOT_MAX_X, ROBOT_MAX_Y   Table bounds when no --max-x/--max-y flag is given
  ROBOT_REPL_MODE            bare|editor, overrides REPL mode auto-detection
  ROBOT_LOG                  tracing filter for logs on stderr (default: warn)
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}

#[derive(Parser, Debug)]
#[command(name = "robot", disable_help_flag = true, disable_help_subcommand = true)]
struct Cli {
    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    help: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    Run(run::RunArgs),
    Repl(repl::ReplArgs),
}

fn main() {
    // argv[0] prefixes every error line and usage text
    let program = env::args().next().unwrap_or_else(|| String::from("robot"));

    init_logging();
    let cli = Cli::parse();

    if cli.help {
        print_top_usage_and_exit(&program, 0);
    }

    let code = match cli.command {
        Some(Command::Run(args)) => run::run(&program, args),
        Some(Command::Repl(args)) => repl::run(&program, args),
        None => repl::run(&program, repl::ReplArgs::default()),
    };

    std::process::exit(code);
}
