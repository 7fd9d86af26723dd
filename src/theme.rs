use clap::ValueEnum;
use ratatui::style::Color;
use ratatui::symbols::border;
use unicode_width::UnicodeWidthStr;

/// Colours for every drawn element.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub play_bg: Color,
    pub border: Color,
    pub hud_text: Color,
    pub hud_value: Color,
    pub death_title: Color,
}

/// Red head, light blue body, orange food.
pub const THEME_CLASSIC: Theme = Theme {
    name: "Classic",
    snake_head: Color::Rgb(0xd3, 0x2f, 0x2f),
    snake_body: Color::Rgb(0x90, 0xca, 0xf9),
    food: Color::Rgb(0xf5, 0x7c, 0x00),
    play_bg: Color::Black,
    border: Color::Gray,
    hud_text: Color::DarkGray,
    hud_value: Color::White,
    death_title: Color::Red,
};

/// Blue head, pink body, purple food.
pub const THEME_BERRY: Theme = Theme {
    name: "Berry",
    snake_head: Color::Rgb(0x19, 0x76, 0xd2),
    snake_body: Color::Rgb(0xf0, 0x62, 0x92),
    food: Color::Rgb(0x7b, 0x1f, 0xa2),
    play_bg: Color::Black,
    border: Color::Rgb(0xbc, 0xaa, 0xa4),
    hud_text: Color::DarkGray,
    hud_value: Color::Rgb(0xf0, 0x62, 0x92),
    death_title: Color::Rgb(0xf0, 0x62, 0x92),
};

/// Theme names accepted on the command line.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, ValueEnum)]
pub enum ThemeChoice {
    #[default]
    Classic,
    Berry,
}

impl ThemeChoice {
    #[must_use]
    pub fn theme(self) -> &'static Theme {
        match self {
            Self::Classic => &THEME_CLASSIC,
            Self::Berry => &THEME_BERRY,
        }
    }
}

/// Glyph pair for one grid cell; cells are two terminal columns wide.
pub const GLYPH_CELL: &str = "██";

/// Terminal columns spanned by one grid cell.
#[must_use]
pub fn cell_width() -> u16 {
    u16::try_from(GLYPH_CELL.width()).map_or(1, |width| width.max(1))
}

/// Rounded border drawn around the play area.
pub const BORDER_PLAY_AREA: border::Set = border::ROUNDED;
