//! Human-readable notices
//!
//! Every notice is prefixed with the ` > TRAF ` badge. Color is used only
//! when stdout is a terminal and `NO_COLOR` is unset.

use anstyle::{Color, RgbColor, Style};
use std::io::IsTerminal;

const BRAND: Color = Color::Rgb(RgbColor(0xff, 0x00, 0x83));

/// Sink for human-readable notices.
pub trait Notifier {
  fn notify(&self, message: &str);
}

/// Writes notices to stdout.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleNotifier {
  color: bool,
}

impl ConsoleNotifier {
  /// Detect color support from the environment
  pub fn new() -> Self {
    let color = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
    Self { color }
  }

  /// Render a notice line (without trailing newline)
  pub fn format(&self, message: &str) -> String {
    if !self.color {
      return format!(" >  TRAF   {}", message);
    }

    let arrow = Style::new().fg_color(Some(BRAND));
    let badge = Style::new().bold().bg_color(Some(BRAND));
    format!(
      " {}>{} {} TRAF {}  {}",
      arrow.render(),
      arrow.render_reset(),
      badge.render(),
      badge.render_reset(),
      message
    )
  }
}

impl Default for ConsoleNotifier {
  fn default() -> Self {
    Self::new()
  }
}

impl Notifier for ConsoleNotifier {
  fn notify(&self, message: &str) {
    println!("{}", self.format(message));
  }
}
