use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 130, g: 200, b: 255 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 200, b: 90 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::TrueColor { r: 192, g: 192, b: 192 };

pub const IP_ADDR: Color = Color::TrueColor { r: 120, g: 220, b: 160 };
pub const CNAME: Color = Color::TrueColor { r: 200, g: 160, b: 255 };

pub const STATUS_OK: Color = Color::Green;
pub const STATUS_REDIRECT: Color = Color::Cyan;
pub const STATUS_CLIENT_ERROR: Color = Color::Yellow;
pub const STATUS_SERVER_ERROR: Color = Color::Red;
pub const INACTIVE: Color = Color::BrightBlack;
