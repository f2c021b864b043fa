use std::io::IsTerminal;

use clap::{ValueEnum, builder::styling::Ansi256Color};
use comfy_table::Color as ComfyColor;
use crossterm::style::Color;

use crate::generator::resource::BehaviorMode;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeMode {
  Dark,
  Light,
  Auto,
}

#[derive(Debug, Clone, Copy)]
pub enum Theme {
  Dark,
  Light,
}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
  Color::Rgb { r, g, b }
}

/// One color per message role.
struct Palette {
  timestamp: Color,
  primary: Color,
  accent: Color,
  info: Color,
  success: Color,
  failure: Color,
  label: Color,
  value: Color,
  managed: Color,
  read_only: Color,
}

const DARK: Palette = Palette {
  timestamp: rgb(118, 166, 166),
  primary: rgb(191, 126, 4),
  accent: rgb(166, 84, 55),
  info: rgb(118, 166, 166),
  success: rgb(118, 166, 166),
  failure: rgb(204, 82, 82),
  label: rgb(217, 164, 4),
  value: rgb(242, 211, 56),
  managed: rgb(130, 190, 110),
  read_only: rgb(140, 150, 200),
};

const LIGHT: Palette = Palette {
  timestamp: rgb(92, 62, 38),
  primary: rgb(70, 42, 25),
  accent: rgb(211, 99, 70),
  info: rgb(40, 111, 170),
  success: rgb(34, 142, 90),
  failure: rgb(178, 34, 34),
  label: rgb(176, 103, 66),
  value: rgb(199, 146, 76),
  managed: rgb(46, 120, 50),
  read_only: rgb(60, 70, 150),
};

pub struct Colors {
  enabled: bool,
  theme: Theme,
}

pub trait IntoComfyColor {
  fn into(self) -> ComfyColor;
}

impl IntoComfyColor for Color {
  fn into(self) -> ComfyColor {
    match self {
      Color::Reset => ComfyColor::Reset,
      Color::Black => ComfyColor::Black,
      Color::DarkGrey => ComfyColor::DarkGrey,
      Color::Red => ComfyColor::Red,
      Color::DarkRed => ComfyColor::DarkRed,
      Color::Green => ComfyColor::Green,
      Color::DarkGreen => ComfyColor::DarkGreen,
      Color::Yellow => ComfyColor::Yellow,
      Color::DarkYellow => ComfyColor::DarkYellow,
      Color::Blue => ComfyColor::Blue,
      Color::DarkBlue => ComfyColor::DarkBlue,
      Color::Magenta => ComfyColor::Magenta,
      Color::DarkMagenta => ComfyColor::DarkMagenta,
      Color::Cyan => ComfyColor::Cyan,
      Color::DarkCyan => ComfyColor::DarkCyan,
      Color::White => ComfyColor::White,
      Color::Grey => ComfyColor::Grey,
      Color::Rgb { r, g, b } => ComfyColor::Rgb { r, g, b },
      Color::AnsiValue(val) => ComfyColor::AnsiValue(val),
    }
  }
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    Self { enabled, theme }
  }

  const fn palette(&self) -> &'static Palette {
    match self.theme {
      Theme::Dark => &DARK,
      Theme::Light => &LIGHT,
    }
  }

  const fn pick(&self, color: Color) -> Color {
    if self.enabled { color } else { Color::Reset }
  }

  pub const fn timestamp(&self) -> Color {
    self.pick(self.palette().timestamp)
  }

  pub const fn primary(&self) -> Color {
    self.pick(self.palette().primary)
  }

  pub const fn accent(&self) -> Color {
    self.pick(self.palette().accent)
  }

  pub const fn info(&self) -> Color {
    self.pick(self.palette().info)
  }

  pub const fn success(&self) -> Color {
    self.pick(self.palette().success)
  }

  pub const fn failure(&self) -> Color {
    self.pick(self.palette().failure)
  }

  pub const fn label(&self) -> Color {
    self.pick(self.palette().label)
  }

  pub const fn value(&self) -> Color {
    self.pick(self.palette().value)
  }

  pub const fn mode(&self, mode: BehaviorMode) -> Color {
    match mode {
      BehaviorMode::Managed => self.pick(self.palette().managed),
      BehaviorMode::ReadOnly => self.pick(self.palette().read_only),
    }
  }

  const fn to_clap(color: Color) -> Option<clap::builder::styling::Color> {
    use clap::builder::styling::{AnsiColor, Color as ClapColor, RgbColor};

    match color {
      Color::Black => Some(ClapColor::Ansi(AnsiColor::Black)),
      Color::Blue | Color::DarkBlue => Some(ClapColor::Ansi(AnsiColor::Blue)),
      Color::Cyan | Color::DarkCyan => Some(ClapColor::Ansi(AnsiColor::Cyan)),
      Color::DarkGreen | Color::Green => Some(ClapColor::Ansi(AnsiColor::Green)),
      Color::DarkGrey | Color::Grey => Some(ClapColor::Ansi(AnsiColor::BrightBlack)),
      Color::DarkMagenta | Color::Magenta => Some(ClapColor::Ansi(AnsiColor::Magenta)),
      Color::DarkRed | Color::Red => Some(ClapColor::Ansi(AnsiColor::Red)),
      Color::DarkYellow | Color::Yellow => Some(ClapColor::Ansi(AnsiColor::Yellow)),
      Color::White => Some(ClapColor::Ansi(AnsiColor::White)),
      Color::AnsiValue(val) => Some(ClapColor::Ansi256(Ansi256Color(val))),
      Color::Rgb { r, g, b } => Some(ClapColor::Rgb(RgbColor(r, g, b))),
      Color::Reset => None,
    }
  }

  pub const fn clap_styles() -> clap::builder::Styles {
    use clap::builder::styling::{Style, Styles};

    let colors = Self::new(true, Theme::Dark);

    Styles::styled()
      .header(Style::new().bold().underline().fg_color(Self::to_clap(colors.label())))
      .usage(Style::new().bold().fg_color(Self::to_clap(colors.label())))
      .literal(Style::new().fg_color(Self::to_clap(colors.success())))
      .placeholder(Style::new().fg_color(Self::to_clap(colors.info())))
      .error(Style::new().bold().fg_color(Self::to_clap(colors.failure())))
      .valid(Style::new().fg_color(Self::to_clap(colors.success())))
      .invalid(Style::new().bold().fg_color(Self::to_clap(colors.failure())))
  }
}

pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stdout().is_terminal(),
  }
}

pub fn detect_theme(mode: ThemeMode) -> Theme {
  match mode {
    ThemeMode::Dark => Theme::Dark,
    ThemeMode::Light => Theme::Light,
    ThemeMode::Auto => detect_terminal_theme(),
  }
}

/// Reads the background hint from `COLORFGBG` (`fg;bg`, light when bg >= 8).
fn detect_terminal_theme() -> Theme {
  if let Ok(colorfgbg) = std::env::var("COLORFGBG")
    && let Some(bg) = colorfgbg.rsplit(';').next()
    && let Ok(bg_num) = bg.parse::<u8>()
  {
    return if bg_num >= 8 { Theme::Light } else { Theme::Dark };
  }
  Theme::Dark
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn disabled_colors_reset_every_role() {
    let colors = Colors::new(false, Theme::Dark);
    for color in [colors.timestamp(), colors.failure(), colors.mode(BehaviorMode::Managed)] {
      assert_eq!(color, Color::Reset);
    }
  }

  #[test]
  fn behavior_modes_get_distinct_colors() {
    for theme in [Theme::Dark, Theme::Light] {
      let colors = Colors::new(true, theme);
      assert_ne!(colors.mode(BehaviorMode::Managed), colors.mode(BehaviorMode::ReadOnly));
    }
  }

  #[test]
  fn conversions_keep_rgb_and_drop_reset() {
    let color = Color::Rgb { r: 1, g: 2, b: 3 };
    assert!(matches!(IntoComfyColor::into(color), ComfyColor::Rgb { r: 1, g: 2, b: 3 }));
    assert!(matches!(IntoComfyColor::into(Color::Reset), ComfyColor::Reset));
    assert!(Colors::to_clap(Color::Reset).is_none());
    assert!(Colors::to_clap(color).is_some());
  }
}
