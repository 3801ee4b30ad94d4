use ratatui::style::Color;

pub const ACCENT: Color = Color::Rgb(0x7f, 0xe2, 0xf0);
pub const GLOBAL_BORDER: Color = Color::Rgb(0x40, 0x40, 0x40);
pub const HEADER_TEXT: Color = Color::Rgb(0xe5, 0xe5, 0xe5);
pub const HEADER_SEPARATOR: Color = Color::Rgb(0x6b, 0x72, 0x80);
pub const POPUP_BORDER: Color = Color::Rgb(0xe5, 0xe5, 0xe5);
pub const RESULT_TEXT: Color = Color::Rgb(0xf2, 0xf5, 0xf7);
pub const PLACEHOLDER_TEXT: Color = Color::Rgb(0x9c, 0xa3, 0xaf);
pub const STATUS_ERROR: Color = Color::Rgb(0xef, 0x44, 0x44);
pub const GO_ENABLED: Color = Color::Rgb(0x25, 0x63, 0xeb);
pub const GO_DISABLED: Color = Color::Rgb(0xdc, 0x26, 0x26);
pub const BUTTON_TEXT: Color = Color::Rgb(0xff, 0xff, 0xff);
