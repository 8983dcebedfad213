use ratatui::style::{Color, Modifier, Style};

use crate::models::VisualTheme;

pub struct Theme {
    pub root_bg: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub text_highlight: Color,
    pub dim_bg: Color,

    // Specific components
    pub welcome_border: Style,
    pub welcome_title: Style,
    pub welcome_subtitle: Style,
    pub button: Style,
    pub route_link: Style,
    pub route_link_active: Style,
    pub panel_border: Style,
    pub footer: Style,
    pub popup_text: Style,
    pub popup_author: Style,
    pub progress_track: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            root_bg: Color::Rgb(224, 231, 255),
            text: Color::Rgb(31, 41, 55),
            text_secondary: Color::Rgb(107, 114, 128),
            text_highlight: Color::Rgb(147, 51, 234),
            dim_bg: Color::Rgb(60, 60, 70),

            welcome_border: Style::default().fg(Color::Rgb(147, 51, 234)).bg(Color::White),
            welcome_title: Style::default().fg(Color::Rgb(31, 41, 55)).add_modifier(Modifier::BOLD),
            welcome_subtitle: Style::default()
                .fg(Color::Rgb(147, 51, 234))
                .add_modifier(Modifier::BOLD),
            button: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(34, 197, 94))
                .add_modifier(Modifier::BOLD),
            route_link: Style::default().fg(Color::Rgb(55, 65, 81)).bg(Color::Rgb(229, 231, 235)),
            route_link_active: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(168, 85, 247))
                .add_modifier(Modifier::BOLD),
            panel_border: Style::default().fg(Color::Rgb(107, 114, 128)).bg(Color::White),
            footer: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            popup_text: Style::default().fg(Color::Rgb(31, 41, 55)).add_modifier(Modifier::BOLD),
            popup_author: Style::default().fg(Color::Rgb(107, 114, 128)),
            progress_track: Color::Rgb(243, 244, 246),
        }
    }
}

/// Colours of one popup card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub header: Color,
    pub border: Color,
    pub body: Color,
    pub progress: Color,
}

const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

const fn palette_of(header: u32, border: u32, body: u32, progress: u32) -> Palette {
    Palette {
        header: rgb(header),
        border: rgb(border),
        body: rgb(body),
        progress: rgb(progress),
    }
}

pub fn palette(theme: VisualTheme) -> Palette {
    match theme {
        VisualTheme::Blue => palette_of(0xdbeafe, 0x93c5fd, 0xeff6ff, 0x60a5fa),
        VisualTheme::Green => palette_of(0xdcfce7, 0x86efac, 0xf0fdf4, 0x4ade80),
        VisualTheme::Orange => palette_of(0xffedd5, 0xfdba74, 0xfff7ed, 0xfb923c),
        VisualTheme::Purple => palette_of(0xf3e8ff, 0xd8b4fe, 0xfaf5ff, 0xc084fc),
        VisualTheme::Pink => palette_of(0xfce7f3, 0xf9a8d4, 0xfdf2f8, 0xf472b6),
        VisualTheme::Yellow => palette_of(0xfef9c3, 0xfde047, 0xfefce8, 0xfacc15),
        VisualTheme::Cyan => palette_of(0xcffafe, 0x67e8f9, 0xecfeff, 0x22d3ee),
        VisualTheme::Lime => palette_of(0xecfccb, 0xbef264, 0xf7fee7, 0xa3e635),
        VisualTheme::Red => palette_of(0xfee2e2, 0xfca5a5, 0xfef2f2, 0xf87171),
        VisualTheme::Teal => palette_of(0xccfbf1, 0x5eead4, 0xf0fdfa, 0x2dd4bf),
        VisualTheme::Indigo => palette_of(0xe0e7ff, 0xa5b4fc, 0xeef2ff, 0x818cf8),
        VisualTheme::Amber => palette_of(0xfef3c7, 0xfcd34d, 0xfffbeb, 0xfbbf24),
        VisualTheme::Rose => palette_of(0xffe4e6, 0xfda4af, 0xfff1f2, 0xfb7185),
        VisualTheme::Mint => palette_of(0xd1fae5, 0x6ee7b7, 0xecfdf5, 0x34d399),
        VisualTheme::Peach => palette_of(0xfff7ed, 0xfed7aa, 0xfffbf5, 0xfdba74),
        VisualTheme::Lavender => palette_of(0xede9fe, 0xc4b5fd, 0xf5f3ff, 0xa78bfa),
        VisualTheme::Coral => palette_of(0xffe4dc, 0xfca58c, 0xfff4f0, 0xf9805f),
        VisualTheme::Sky => palette_of(0xe0f2fe, 0x7dd3fc, 0xf0f9ff, 0x38bdf8),
        VisualTheme::Lemon => palette_of(0xfefce8, 0xfef08a, 0xfffef5, 0xfde047),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colours_unpack() {
        assert_eq!(rgb(0x10ff7f), Color::Rgb(0x10, 0xff, 0x7f));
        assert_eq!(palette(VisualTheme::Blue).header, Color::Rgb(0xdb, 0xea, 0xfe));
    }
}
