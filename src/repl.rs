use std::env;
use std::io::{self, BufRead, IsTerminal, Write};

use nu_ansi_term::Style;
use reedline::{DefaultPrompt, DefaultPromptSegment, Highlighter, Signal, StyledText};

use crate::command::{parse_coordinate, Orientation};
use crate::simulator::{Simulator, SimulatorError};
use crate::theme::CommandTheme;

/// Env var overriding mode auto-detection: `bare` or `editor`.
pub const MODE_ENV: &str = "ROBOT_REPL_MODE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplMode {
    Bare,
    Editor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeFlagOverride {
    None,
    Bare,
    Editor,
}

/// Whether the session should keep reading after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub const META_HELP: &str = "\
Meta commands (line starts with \":\")
  :exit    Exit immediately (code 0)
  :help    Show this help
  :reset   Take the robot off the table
  :state   Print the current state, placed or not";

/// Feed one line to the simulator, handling meta commands.
///
/// Reports and `:state` go to `out`; diagnostics and meta chatter go to `diag`.
pub fn handle_line<O: Write, D: Write>(
    simulator: &mut Simulator,
    line: &str,
    out: &mut O,
    diag: &mut D,
) -> Result<Flow, SimulatorError> {
    let trimmed = line.trim();
    if let Some(meta) = trimmed.strip_prefix(':') {
        let written = match meta {
            "exit" | "quit" => return Ok(Flow::Exit),
            "help" => writeln!(diag, "{META_HELP}"),
            "reset" => {
                simulator.reset();
                writeln!(diag, "robot removed from the table")
            }
            "state" => {
                let table = simulator.table();
                writeln!(
                    out,
                    "{} (table 0..={}, 0..={})",
                    simulator.state(),
                    table.max_x,
                    table.max_y
                )
            }
            other => writeln!(diag, "unknown meta command ':{other}' (try :help)"),
        };
        written.map_err(SimulatorError::Write)?;
        return Ok(Flow::Continue);
    }

    let step = simulator.step(line);
    simulator.emit(&step, out, diag)?;
    Ok(Flow::Continue)
}

/// Non-interactive session: read `input` line by line until EOF or `:exit`.
pub fn run_bare<R: BufRead, O: Write, D: Write>(
    simulator: &mut Simulator,
    input: R,
    mut out: O,
    mut diag: D,
) -> Result<(), SimulatorError> {
    for (index, line) in input.lines().enumerate() {
        let line = line.map_err(|source| SimulatorError::Read { line: index + 1, source })?;
        if handle_line(simulator, &line, &mut out, &mut diag)? == Flow::Exit {
            break;
        }
    }
    out.flush().map_err(SimulatorError::Write)?;
    diag.flush().map_err(SimulatorError::Write)?;
    Ok(())
}

/// Interactive session on a line editor. Enter submits one command.
pub fn repl_loop(simulator: &mut Simulator) -> io::Result<()> {
    let mut editor = init_line_editor()?;
    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic("robot".to_string()),
        DefaultPromptSegment::Empty,
    );

    loop {
        let line = match editor.read_line(&prompt) {
            Ok(Signal::Success(buffer)) => buffer,
            // ctrl+c / ctrl+d end the session
            Ok(_) => break,
            Err(e) => {
                eprintln!("repl: editor error: {e}");
                let _ = io::stderr().flush();
                break;
            }
        };

        let mut stdout = io::stdout().lock();
        let mut stderr = io::stderr().lock();
        match handle_line(simulator, &line, &mut stdout, &mut stderr) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(SimulatorError::Write(e)) | Err(SimulatorError::Read { source: e, .. }) => {
                return Err(e);
            }
        }
        stdout.flush()?;
        stderr.flush()?;
    }

    Ok(())
}

fn init_line_editor() -> io::Result<reedline::Reedline> {
    use reedline::{FileBackedHistory, Reedline};

    // In-memory history; nothing is persisted between sessions.
    let history = FileBackedHistory::new(1_000).map_err(|e| io::Error::other(e.to_string()))?;

    Ok(Reedline::create()
        .with_highlighter(Box::new(CommandHighlighter::new(CommandTheme::catppuccin_mocha())))
        .with_history(Box::new(history)))
}

pub fn select_mode(flag: ModeFlagOverride) -> Result<ReplMode, String> {
    // Flag override
    match flag {
        ModeFlagOverride::Bare => return Ok(ReplMode::Bare),
        ModeFlagOverride::Editor => {
            if !io::stdin().is_terminal() {
                return Err("cannot start editor: stdin is not a TTY (use --bare or ROBOT_REPL_MODE=bare)".to_string());
            }
            return Ok(ReplMode::Editor);
        }
        ModeFlagOverride::None => {}
    }

    // Environment override
    if let Ok(val) = env::var(MODE_ENV) {
        let v = val.trim().to_ascii_lowercase();
        return match v.as_str() {
            "bare" => Ok(ReplMode::Bare),
            "editor" => {
                if !io::stdin().is_terminal() {
                    return Err("cannot start editor: stdin is not a TTY (use ROBOT_REPL_MODE=bare)".to_string());
                }
                Ok(ReplMode::Editor)
            }
            _ => Err(format!("invalid {MODE_ENV} value: {val}, must be 'bare' or 'editor'")),
        };
    }

    // Auto-detect
    if io::stdin().is_terminal() {
        Ok(ReplMode::Editor)
    } else {
        Ok(ReplMode::Bare)
    }
}

struct CommandHighlighter {
    theme: CommandTheme,
}

impl CommandHighlighter {
    fn new(theme: CommandTheme) -> Self {
        Self { theme }
    }

    fn keyword_style(&self, keyword: &str) -> Style {
        match keyword {
            "PLACE" => self.theme.place,
            "MOVE" => self.theme.movement,
            "LEFT" | "RIGHT" => self.theme.turn,
            "REPORT" => self.theme.report,
            k if k.starts_with(':') => self.theme.meta,
            _ => self.theme.invalid,
        }
    }

    /// Styled pieces of a PLACE argument such as `1,2,NORTH`.
    fn place_args(&self, arg: &str, out: &mut StyledText) {
        for (i, part) in arg.split(',').enumerate() {
            if i > 0 {
                out.push((self.theme.separator, ",".to_string()));
            }
            let style = match i {
                0 | 1 if parse_coordinate(part).is_ok() => self.theme.coordinate,
                2 if part.parse::<Orientation>().is_ok() => self.theme.orientation,
                _ => self.theme.invalid,
            };
            out.push((style, part.to_string()));
        }
    }
}

impl Highlighter for CommandHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut out = StyledText::new();
        let mut keyword: Option<&str> = None;
        // Tokens after the keyword, empty ones included, as the parser counts them.
        let mut args = 0;

        for (i, token) in line.split(' ').enumerate() {
            if i > 0 {
                out.push((Style::new(), " ".to_string()));
            }
            if keyword.is_some() {
                args += 1;
            }
            if token.is_empty() {
                continue;
            }
            match keyword {
                None => {
                    keyword = Some(token);
                    out.push((self.keyword_style(token), token.to_string()));
                }
                Some(kw) => {
                    if kw == "PLACE" && args == 1 {
                        self.place_args(token, &mut out);
                    } else {
                        out.push((self.theme.separator, token.to_string()));
                    }
                }
            }
        }
        out
    }
}
