use nu_ansi_term::{Color, Style};

/// Catppuccin Mocha accents.
mod mocha {
    use nu_ansi_term::Color;

    pub const SURFACE2: Color = Color::Rgb(108, 112, 134);
    pub const RED: Color = Color::Rgb(243, 139, 168);
    pub const GREEN: Color = Color::Rgb(166, 227, 161);
    pub const YELLOW: Color = Color::Rgb(249, 226, 175);
    pub const BLUE: Color = Color::Rgb(137, 180, 250);
    pub const MAUVE: Color = Color::Rgb(203, 166, 247);
    pub const PEACH: Color = Color::Rgb(250, 179, 135);
    pub const TEAL: Color = Color::Rgb(148, 226, 213);
    pub const SKY: Color = Color::Rgb(137, 220, 235);
}

/// Styles for each kind of token on a REPL line.
#[derive(Debug, Clone, Copy)]
pub struct CommandTheme {
    pub place: Style,
    pub movement: Style,
    pub turn: Style,
    pub report: Style,
    pub meta: Style,
    pub coordinate: Style,
    pub orientation: Style,
    pub separator: Style,
    pub invalid: Style,
}

impl CommandTheme {
    pub fn catppuccin_mocha() -> Self {
        let bold = |c: Color| Style::new().fg(c).bold();
        Self {
            place: bold(mocha::GREEN),
            movement: bold(mocha::SKY),
            turn: bold(mocha::TEAL),
            report: bold(mocha::YELLOW),
            meta: bold(mocha::MAUVE),
            coordinate: Style::new().fg(mocha::PEACH),
            orientation: Style::new().fg(mocha::BLUE),
            separator: Style::new().fg(mocha::SURFACE2),
            invalid: Style::new().fg(mocha::RED).underline(),
        }
    }
}
