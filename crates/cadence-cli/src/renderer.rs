//! Markdown rendering for terminal output.
//!
//! Rich mode styles headings and inline markdown with termimad; plain mode
//! prints the markdown unchanged, which keeps output stable for scripts and
//! tests.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    /// Create a new terminal renderer
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Cyan);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::DarkGrey);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        if self.rich_enabled {
            for line in markdown.lines() {
                if let Some(done) = line.strip_prefix("### [x] ") {
                    println!("\x1b[2m### [x] {done}\x1b[0m");
                } else if line.starts_with('#') {
                    // Headings keep their hashes so pattern and instance ids stay visible
                    println!("\x1b[36m{line}\x1b[0m");
                } else {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        } else {
            print!("{}", markdown);
        }
        Ok(())
    }
}
