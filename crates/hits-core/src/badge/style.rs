/// Visual badge style. Unknown names fall back to [`Style::Flat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Flat,
    FlatSquare,
    Plastic,
    ForTheBadge,
}

impl Style {
    pub fn parse(s: &str) -> Self {
        match s {
            "flat-square" => Style::FlatSquare,
            "plastic" => Style::Plastic,
            "for-the-badge" => Style::ForTheBadge,
            _ => Style::Flat,
        }
    }

    pub(super) fn metrics(self) -> Metrics {
        match self {
            Style::Flat => Metrics {
                height: 20,
                radius: 3,
                gradient: true,
                uppercase: false,
                bold: false,
                font_size: 11,
                text_y: 14.0,
                width_scale: 1.0,
                padding_scale: 1.0,
            },
            Style::FlatSquare => Metrics {
                radius: 0,
                gradient: false,
                ..Style::Flat.metrics()
            },
            Style::Plastic => Metrics {
                height: 18,
                radius: 4,
                text_y: 13.0,
                ..Style::Flat.metrics()
            },
            Style::ForTheBadge => Metrics {
                height: 28,
                radius: 0,
                gradient: false,
                uppercase: true,
                bold: true,
                font_size: 10,
                text_y: 18.0,
                width_scale: 1.1,
                padding_scale: 2.0,
            },
        }
    }
}

/// Geometry derived from a style.
#[derive(Debug, Clone, Copy)]
pub(super) struct Metrics {
    pub height: u32,
    pub radius: u32,
    pub gradient: bool,
    pub uppercase: bool,
    pub bold: bool,
    pub font_size: u32,
    pub text_y: f64,
    pub width_scale: f64,
    padding_scale: f64,
}

impl Metrics {
    pub fn padding(&self, base: f64) -> f64 {
        base * self.padding_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_style_falls_back_to_flat() {
        assert_eq!(Style::parse("neon"), Style::Flat);
        assert_eq!(Style::parse("for-the-badge"), Style::ForTheBadge);
        assert_eq!(Style::parse("flat-square"), Style::FlatSquare);
    }
}
