use std::io::{self, IsTerminal, Write};

use clap::Args;

use crate::cli_util::{print_error, table_or_report, TableArgs};
use crate::repl::{repl_loop, run_bare, select_mode, ModeFlagOverride, ReplMode, META_HELP};
use crate::robot::Table;
use crate::simulator::Simulator;

#[derive(Args, Debug, Default)]
#[command(disable_help_flag = true)]
pub struct ReplArgs {
    /// Read commands from stdin without a line editor
    #[arg(long = "bare", conflicts_with = "editor")]
    pub bare: bool,

    /// Use the line editor with highlighting (stdin must be a TTY)
    #[arg(long = "editor", conflicts_with = "bare")]
    pub editor: bool,

    /// Suppress the per-line diagnostics on stderr
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    #[command(flatten)]
    pub table: TableArgs,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

impl ReplArgs {
    fn mode_flag(&self) -> ModeFlagOverride {
        if self.bare {
            ModeFlagOverride::Bare
        } else if self.editor {
            ModeFlagOverride::Editor
        } else {
            ModeFlagOverride::None
        }
    }
}

/// `robot repl`: an interactive or piped session on a single robot.
pub fn run(program: &str, args: ReplArgs) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    // --bare/--editor, then ROBOT_REPL_MODE, then whether stdin is a TTY
    let mode = match select_mode(args.mode_flag()) {
        Ok(m) => m,
        Err(msg) => {
            eprintln!("{program}: {msg}");
            let _ = io::stderr().flush();
            return 1;
        }
    };

    let Some(table) = table_or_report(program, &args.table) else {
        return 1;
    };
    let mut simulator = Simulator::new(table).with_diagnostics(!args.quiet);

    // ctrl+c leaves the table as-is and exits cleanly
    if let Err(e) = ctrlc::set_handler(|| {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
        std::process::exit(0);
    }) {
        eprintln!("{program}: failed to set ctrl+c handler: {e}");
        let _ = io::stderr().flush();
        return 1;
    }

    match mode {
        ReplMode::Editor => {
            // Print banners only if stderr is a TTY
            if io::stderr().is_terminal() {
                eprintln!("{}", banner(&table));
                let _ = io::stderr().flush();
            }

            if let Err(e) = repl_loop(&mut simulator) {
                eprintln!("{program}: REPL error: {e}");
                let _ = io::stderr().flush();
                return 1;
            }
            0
        }
        ReplMode::Bare => {
            // Bare mode: read stdin until EOF or :exit
            match run_bare(&mut simulator, io::stdin().lock(), io::stdout().lock(), io::stderr().lock()) {
                Ok(()) => 0,
                Err(e) => {
                    print_error(program, &e);
                    1
                }
            }
        }
    }
}

fn banner(table: &Table) -> String {
    format!(
        "Toy robot REPL (table 0..={}, 0..={})\n\
         Type a command and press Enter. :help lists meta commands, ctrl+c exits",
        table.max_x, table.max_y
    )
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} repl   # Start a toy robot REPL (read-eval-print loop)

Options:
  --help,  -h         Show this help
  --bare              Read commands from stdin without a line editor
  --editor            Use the highlighting line editor (stdin must be a TTY)
  --quiet, -q         Suppress per-line diagnostics
  --max-x <N>         Inclusive upper bound for x (fallback ROBOT_MAX_X; default 5)
  --max-y <N>         Inclusive upper bound for y (fallback ROBOT_MAX_Y; default 5)
  --config <PATH>     Read [table] max_x/max_y from PATH

Description:
  Starts a session where each line is one robot command. The robot keeps its
  position between lines until :reset.

{1}

Notes:
    - Reports go to stdout; diagnostics and meta output go to stderr.
    - Ctrl+C or Ctrl+D exits the REPL.
    - The session mode comes from --bare/--editor if given, else from
      ROBOT_REPL_MODE=bare|editor, else editor on a TTY and bare otherwise.
    - The banner is only shown when stderr is a TTY.
"#,
        program, META_HELP
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
