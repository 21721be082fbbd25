use clap::ValueEnum;
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            ThemeMode::Dark => Palette {
                primary: Color::Rgb(0x90, 0xca, 0xf9),
                text: Color::White,
                muted: Color::Gray,
                correct: Color::LightGreen,
                incorrect: Color::LightRed,
                accent: Color::Yellow,
            },
            ThemeMode::Light => Palette {
                primary: Color::Rgb(0x19, 0x76, 0xd2),
                text: Color::Black,
                muted: Color::DarkGray,
                correct: Color::Green,
                incorrect: Color::Red,
                accent: Color::Rgb(0xb8, 0x86, 0x0b),
            },
        }
    }
}

/// Colors for one theme mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Color,
    pub text: Color,
    pub muted: Color,
    pub correct: Color,
    pub incorrect: Color,
    pub accent: Color,
}

impl Palette {
    pub fn bold(&self) -> Style {
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn hint(&self) -> Style {
        Style::default()
            .fg(self.muted)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn win(&self) -> Style {
        Style::default()
            .fg(self.correct)
            .add_modifier(Modifier::BOLD)
    }

    pub fn loss(&self) -> Style {
        Style::default()
            .fg(self.incorrect)
            .add_modifier(Modifier::BOLD)
    }
}
