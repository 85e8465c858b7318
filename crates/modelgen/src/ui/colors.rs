use std::io::IsTerminal;

use clap::{ValueEnum, builder::styling::Ansi256Color};
use comfy_table::Color as ComfyColor;
use crossterm::style::Color;

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
  Dark,
  Light,
}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
  Color::Rgb { r, g, b }
}

/// One color per role shown by the CLI.
struct Palette {
  timestamp: Color,
  primary: Color,
  accent: Color,
  info: Color,
  success: Color,
  label: Color,
  value: Color,
}

const DARK: Palette = Palette {
  timestamp: rgb(118, 166, 166),
  primary: rgb(191, 126, 4),
  accent: rgb(166, 84, 55),
  info: rgb(118, 166, 166),
  success: rgb(118, 166, 166),
  label: rgb(217, 164, 4),
  value: rgb(242, 211, 56),
};

const LIGHT: Palette = Palette {
  timestamp: rgb(92, 62, 38),
  primary: rgb(70, 42, 25),
  accent: rgb(211, 99, 70),
  info: rgb(40, 111, 170),
  success: rgb(34, 142, 90),
  label: rgb(176, 103, 66),
  value: rgb(199, 146, 76),
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
      Color::Rgb { r, g, b } => ComfyColor::Rgb { r, g, b },
      Color::AnsiValue(value) => ComfyColor::AnsiValue(value),
      // The palette only hands out RGB values or `Reset` when colors are off
      _ => ComfyColor::Reset,
    }
  }
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    Self { enabled, theme }
  }

  fn pick(&self, role: fn(&Palette) -> Color) -> Color {
    if !self.enabled {
      return Color::Reset;
    }
    match self.theme {
      Theme::Dark => role(&DARK),
      Theme::Light => role(&LIGHT),
    }
  }

  pub fn timestamp(&self) -> Color {
    self.pick(|palette| palette.timestamp)
  }

  pub fn primary(&self) -> Color {
    self.pick(|palette| palette.primary)
  }

  pub fn accent(&self) -> Color {
    self.pick(|palette| palette.accent)
  }

  pub fn info(&self) -> Color {
    self.pick(|palette| palette.info)
  }

  pub fn success(&self) -> Color {
    self.pick(|palette| palette.success)
  }

  pub fn label(&self) -> Color {
    self.pick(|palette| palette.label)
  }

  pub fn value(&self) -> Color {
    self.pick(|palette| palette.value)
  }

  const fn to_clap(color: Color) -> Option<clap::builder::styling::Color> {
    use clap::builder::styling::{Color as ClapColor, RgbColor};

    match color {
      Color::AnsiValue(value) => Some(ClapColor::Ansi256(Ansi256Color(value))),
      Color::Rgb { r, g, b } => Some(ClapColor::Rgb(RgbColor(r, g, b))),
      _ => None,
    }
  }

  pub const fn clap_styles() -> clap::builder::Styles {
    use clap::builder::styling::{Style, Styles};

    Styles::styled()
      .header(Style::new().bold().underline().fg_color(Self::to_clap(DARK.label)))
      .usage(Style::new().bold().fg_color(Self::to_clap(DARK.label)))
      .literal(Style::new().fg_color(Self::to_clap(DARK.success)))
      .placeholder(Style::new().fg_color(Self::to_clap(DARK.info)))
      .error(Style::new().bold().fg_color(Self::to_clap(DARK.accent)))
      .valid(Style::new().fg_color(Self::to_clap(DARK.success)))
      .invalid(Style::new().bold().fg_color(Self::to_clap(DARK.accent)))
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
    ThemeMode::Auto => theme_from_env(std::env::var("COLORFGBG").ok().as_deref()),
  }
}

/// `COLORFGBG` ends with the background color index; 8 and above are light backgrounds.
fn theme_from_env(colorfgbg: Option<&str>) -> Theme {
  colorfgbg
    .and_then(|value| value.split(';').next_back())
    .and_then(|background| background.parse::<u8>().ok())
    .map_or(Theme::Dark, |background| {
      if background >= 8 { Theme::Light } else { Theme::Dark }
    })
}
