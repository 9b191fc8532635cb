use std::io::{self, Write};

use clap::Args;
use tracing::info;

use crate::cli_util::{open_input, print_error, table_or_report, TableArgs};
use crate::simulator::Simulator;

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
pub struct RunArgs {
    /// Read commands from PATH instead of stdin
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<String>,

    /// Print a step-by-step table of outcomes instead of reports
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Suppress the per-line diagnostics on stderr
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    #[command(flatten)]
    pub table: TableArgs,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

pub fn run(program: &str, args: RunArgs) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    let RunArgs {
        file,
        debug,
        quiet,
        table,
        ..
    } = args;

    let Some(table) = table_or_report(program, &table) else {
        return 1;
    };

    let input = match open_input(file.as_deref()) {
        Ok(input) => input,
        Err(e) => {
            eprintln!(
                "{program}: failed to open command file {}: {e}",
                file.as_deref().unwrap_or("<stdin>")
            );
            let _ = io::stderr().flush();
            return 1;
        }
    };

    let mut simulator = Simulator::new(table)
        .with_debug(debug)
        .with_diagnostics(!quiet);

    match simulator.run(input, io::stdout().lock(), io::stderr().lock()) {
        Ok(summary) => {
            info!(
                lines = summary.lines,
                accepted = summary.accepted,
                ignored = summary.ignored,
                rejected = summary.rejected,
                "finished"
            );
            0
        }
        Err(e) => {
            print_error(program, &e);
            1
        }
    }
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} run [--debug|-d] [--quiet|-q]                # Read commands from STDIN
  {0} run [--debug|-d] [--quiet|-q] --file <PATH>  # Read commands from a file

Options:
  --file,  -f <PATH>  Read commands from PATH instead of STDIN
  --debug, -d         Print a step-by-step table of outcomes instead of reports
  --quiet, -q         Suppress per-line diagnostics (reports are still printed)
  --max-x <N>         Inclusive upper bound for x (fallback ROBOT_MAX_X; default 5)
  --max-y <N>         Inclusive upper bound for y (fallback ROBOT_MAX_Y; default 5)
  --config <PATH>     Read [table] max_x/max_y from PATH (default: robot.toml in the XDG config dir)
  --help,  -h         Show this help

Commands (one per line):
  PLACE X,Y,F   Put the robot at X,Y facing F (NORTH, EAST, SOUTH or WEST)
  MOVE          Move one unit forward
  LEFT, RIGHT   Rotate 90 degrees without moving
  REPORT        Print X,Y,F

Notes:
- Reports go to stdout; diagnostics such as "MOVE - avoid fall" go to stderr.
- Commands before the first valid PLACE are ignored.
- Moves that would fall off the table are ignored.

Examples:
- Run a script:
    {0} run --file ./commands.txt
- Pipe commands on stdin:
    printf 'PLACE 0,0,NORTH\nMOVE\nREPORT\n' | {0} run
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
