//! UI module for styled terminal output.
//!
//! Provides colored status lines in normal mode and stays quiet in verbose
//! mode, where tracing carries the same information.

use colored::Colorize;
use std::io::{self, IsTerminal, Write};

/// UI configuration
#[derive(Debug, Clone)]
pub struct UiConfig {
    pub colors_enabled: bool,
    pub verbose: bool,
}

impl UiConfig {
    /// Create UI config from environment and args
    pub fn new(verbose: bool) -> Self {
        Self {
            colors_enabled: should_use_colors(),
            verbose,
        }
    }

    pub fn plain() -> Self {
        Self {
            colors_enabled: false,
            verbose: false,
        }
    }
}

/// Check if we should use colors in output
fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    io::stderr().is_terminal()
}

/// Styled status writer
pub struct Ui {
    config: UiConfig,
    writer: Box<dyn Write>,
}

impl Ui {
    /// Create a new UI with stderr output
    pub fn new(config: UiConfig) -> Self {
        if !config.colors_enabled {
            colored::control::set_override(false);
        }

        Self {
            config,
            writer: Box::new(io::stderr()),
        }
    }

    /// Create UI with custom writer
    pub fn with_writer(config: UiConfig, writer: Box<dyn Write>) -> Self {
        if !config.colors_enabled {
            colored::control::set_override(false);
        }

        Self { config, writer }
    }

    /// Print the application banner
    pub fn print_header(&mut self, version: &str) {
        let title = format!("bangumi-renamer v{}", version);

        if self.config.verbose {
            let _ = writeln!(self.writer, "{}", title);
            let _ = writeln!(self.writer);
            return;
        }

        let rule = "═".repeat(title.chars().count() + 4);
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", format!("╔{}╗", rule).cyan());
            let _ = writeln!(self.writer, "{}", format!("║  {}  ║", title).cyan().bold());
            let _ = writeln!(self.writer, "{}", format!("╚{}╝", rule).cyan());
        } else {
            let _ = writeln!(self.writer, "╔{}╗", rule);
            let _ = writeln!(self.writer, "║  {}  ║", title);
            let _ = writeln!(self.writer, "╚{}╝", rule);
        }
        let _ = writeln!(self.writer);
    }

    /// Print an info message
    pub fn info(&mut self, msg: &str) {
        if self.config.verbose {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", msg.cyan());
        } else {
            let _ = writeln!(self.writer, "{}", msg);
        }
    }

    /// Print a success message with checkmark
    pub fn success(&mut self, msg: &str) {
        if self.config.verbose {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "✓".green().bold(), msg.green());
        } else {
            let _ = writeln!(self.writer, "* {}", msg);
        }
    }

    /// Print a warning message
    pub fn warning(&mut self, msg: &str) {
        if self.config.verbose {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "!".yellow().bold(), msg.yellow());
        } else {
            let _ = writeln!(self.writer, "! {}", msg);
        }
    }

    /// Print an error message
    pub fn error(&mut self, msg: &str) {
        // Errors shown in both modes
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "✗".red().bold(), msg.red());
        } else {
            let _ = writeln!(self.writer, "X {}", msg);
        }
    }

    /// Print a step in progress, completed by `step_done` or `step_failed`
    pub fn step(&mut self, msg: &str) {
        if self.config.verbose {
            return;
        }
        if self.config.colors_enabled {
            let _ = write!(self.writer, "{}", format!("{}... ", msg).dimmed());
        } else {
            let _ = write!(self.writer, "{}... ", msg);
        }
        let _ = self.writer.flush();
    }

    pub fn step_done(&mut self) {
        if self.config.verbose {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", "done".green());
        } else {
            let _ = writeln!(self.writer, "done");
        }
    }

    pub fn step_failed(&mut self) {
        if self.config.verbose {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", "failed".red());
        } else {
            let _ = writeln!(self.writer, "failed");
        }
    }
}
