use ratatui::style::Color;

/// Color theme for the panel.
#[derive(Debug, Clone)]
pub struct Theme {
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    pub highlight: Color,
    pub selection_bg: Color,
    pub urgent: Color,
    pub high: Color,
    pub wait: Color,
    pub today: Color,
    pub done: Color,
    pub group: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            text: Color::Rgb(0xC8, 0xC8, 0xC8),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            dim: Color::Rgb(0x78, 0x78, 0x78),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            selection_bg: Color::Rgb(0x2A, 0x2A, 0x3A),
            urgent: Color::Rgb(0xFF, 0x44, 0x44),
            high: Color::Rgb(0xFF, 0x88, 0x44),
            wait: Color::Rgb(0x44, 0xFF, 0x88),
            today: Color::Rgb(0xFF, 0xD7, 0x00),
            done: Color::Rgb(0x78, 0x78, 0x78),
            group: Color::Rgb(0x44, 0xDD, 0xFF),
            error: Color::Rgb(0xFF, 0x44, 0x44),
        }
    }
}
