//! Banner palette per severity.

use eframe::egui::Color32;
use shared::domain::BannerSeverity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerColors {
    pub fill: Color32,
    pub stroke: Color32,
    pub text: Color32,
}

pub fn banner_colors(severity: BannerSeverity) -> BannerColors {
    let (fill, stroke, text) = match severity {
        BannerSeverity::Success => ((0xd1, 0xe7, 0xdd), (0xa3, 0xcf, 0xbb), (0x0f, 0x51, 0x32)),
        BannerSeverity::Info => ((0xcf, 0xf4, 0xfc), (0x9e, 0xea, 0xf9), (0x05, 0x51, 0x60)),
        BannerSeverity::Warning => ((0xff, 0xf3, 0xcd), (0xff, 0xe6, 0x9c), (0x66, 0x4d, 0x03)),
        BannerSeverity::Danger => ((0xf8, 0xd7, 0xda), (0xf1, 0xae, 0xb5), (0x84, 0x20, 0x29)),
        BannerSeverity::Secondary => ((0xe2, 0xe3, 0xe5), (0xc4, 0xc8, 0xcb), (0x41, 0x46, 0x4b)),
    };
    BannerColors {
        fill: rgb(fill),
        stroke: rgb(stroke),
        text: rgb(text),
    }
}

pub fn error_colors() -> BannerColors {
    banner_colors(BannerSeverity::Danger)
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color32 {
    Color32::from_rgb(r, g, b)
}
