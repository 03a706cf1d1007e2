use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub surface_bright: Color,
    pub border: Color,
    pub border_focused: Color,
    pub text: Color,
    pub text_muted: Color,
    pub dim: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(10, 12, 18),
            surface: Color::Rgb(18, 22, 30),
            surface_bright: Color::Rgb(24, 29, 38),
            border: Color::Rgb(60, 66, 80),
            border_focused: Color::Rgb(120, 140, 220),
            text: Color::Rgb(222, 224, 230),
            text_muted: Color::Rgb(160, 164, 176),
            dim: Color::Rgb(120, 124, 136),
            accent: Color::Rgb(120, 140, 220),
            positive: Color::Rgb(90, 180, 120),
            negative: Color::Rgb(215, 95, 95),
            warning: Color::Rgb(220, 170, 80),
            error: Color::Rgb(215, 80, 80),
        }
    }
}
