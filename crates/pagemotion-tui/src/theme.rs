use ratatui::style::Color;

/// Runtime theme colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub grey0: Color,
    pub grey1: Color,
    pub grey2: Color,

    // Palette
    pub blue: Color,

    // Semantic colors
    pub pending: Color,
    pub animating: Color,
    pub done: Color,
    pub paused: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            grey0: Color::Rgb(0x7c, 0x6f, 0x64),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            grey2: Color::Rgb(0xa8, 0x99, 0x84),
            blue: Color::Rgb(0x7d, 0xae, 0xa3),
            pending: Color::Rgb(0x92, 0x83, 0x74),
            animating: Color::Rgb(0xd8, 0xa6, 0x57),
            done: Color::Rgb(0xa9, 0xb6, 0x65),
            paused: Color::Rgb(0xe7, 0x8a, 0x4e),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
        }
    }
}
