use egui::Color32;

pub trait ColorExt {
    fn from_hex(hex: &str) -> Option<Self>
    where
        Self: Sized;
}

impl ColorExt for Color32 {
    fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// Colours used by the portal window.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub accent: Color32,
    pub error_text: Color32,
    pub error_fill: Color32,
    pub error_border: Color32,
    pub result_fill: Color32,
}

impl Palette {
    pub fn portal() -> Self {
        let color = |hex: &str, fallback: Color32| Color32::from_hex(hex).unwrap_or(fallback);
        Self {
            accent: color("#0078d4", Color32::LIGHT_BLUE),
            error_text: color("#d32f2f", Color32::RED),
            error_fill: color("#ffebee", Color32::WHITE),
            error_border: color("#ffcdd2", Color32::LIGHT_RED),
            result_fill: color("#f5f5f5", Color32::LIGHT_GRAY),
        }
    }
}
