#![forbid(unsafe_code)]

//! Text attributes and the color palette.
//!
//! Attributes are bitwise-combinable on purpose: the markup renderer emits
//! the OR of every currently-open tag's attribute, and the original display
//! model allows (without endorsing) several color attributes being active
//! at once. Each named color therefore gets its own bit rather than an
//! index field.

use bitflags::bitflags;

bitflags! {
    /// Display attributes for a cell or run of text.
    ///
    /// The empty set is "normal" text. Style bits live in the low byte,
    /// color bits in bits 8..16 (one bit per entry of [`COLOR_NAMES`]).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attr: u32 {
        /// Bold text.
        const BOLD = 1 << 0;
        /// Underlined text.
        const UNDERLINE = 1 << 1;
        /// Highlighted (reverse video) text.
        const STANDOUT = 1 << 2;

        /// Red foreground.
        const RED = 1 << 8;
        /// Green foreground.
        const GREEN = 1 << 9;
        /// Yellow foreground.
        const YELLOW = 1 << 10;
        /// Blue foreground.
        const BLUE = 1 << 11;
        /// Cyan foreground.
        const CYAN = 1 << 12;
        /// Magenta foreground.
        const MAGENTA = 1 << 13;
        /// Black foreground.
        const BLACK = 1 << 14;
        /// White foreground.
        const WHITE = 1 << 15;
    }
}

impl Attr {
    /// All color bits.
    pub const COLOR_MASK: Attr = Attr::RED
        .union(Attr::GREEN)
        .union(Attr::YELLOW)
        .union(Attr::BLUE)
        .union(Attr::CYAN)
        .union(Attr::MAGENTA)
        .union(Attr::BLACK)
        .union(Attr::WHITE);

    /// True if any color bit is set.
    #[inline]
    pub const fn has_color(self) -> bool {
        self.intersects(Self::COLOR_MASK)
    }
}

/// The fixed color vocabulary, in bit order.
///
/// Stable for the process lifetime; the markup tag table is built from it
/// once at startup.
pub const COLOR_NAMES: [&str; 8] = [
    "red", "green", "yellow", "blue", "cyan", "magenta", "black", "white",
];

/// Resolves symbolic color names to display attributes.
///
/// When color support is off every name resolves to normal text, mirroring
/// terminals that cannot initialize color pairs.
#[derive(Debug, Clone)]
pub struct Palette {
    color_support: bool,
}

impl Palette {
    /// Create a palette, stating whether the terminal supports color.
    pub const fn new(color_support: bool) -> Self {
        Self { color_support }
    }

    /// The color names this palette can resolve, in stable order.
    pub fn color_names(&self) -> impl Iterator<Item = &'static str> {
        COLOR_NAMES.into_iter()
    }

    /// Resolve a color name to its attribute.
    ///
    /// Unknown names and color-less terminals resolve to [`Attr::empty`].
    pub fn attr(&self, name: &str) -> Attr {
        if !self.color_support {
            return Attr::empty();
        }
        match COLOR_NAMES.iter().position(|candidate| *candidate == name) {
            Some(index) => Attr::from_bits_truncate(1 << (8 + index)),
            None => Attr::empty(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::{Attr, COLOR_NAMES, Palette};

    #[test]
    fn attrs_combine_bitwise() {
        let combined = Attr::BOLD | Attr::UNDERLINE;
        assert!(combined.contains(Attr::BOLD));
        assert!(combined.contains(Attr::UNDERLINE));
        assert!(!combined.contains(Attr::STANDOUT));
    }

    #[test]
    fn palette_resolves_every_name_to_a_distinct_bit() {
        let palette = Palette::default();
        let mut seen = Attr::empty();
        for name in COLOR_NAMES {
            let attr = palette.attr(name);
            assert!(attr.has_color(), "{name} resolved to no color");
            assert!(!seen.intersects(attr), "{name} shares a bit");
            seen |= attr;
        }
        assert_eq!(seen, Attr::COLOR_MASK);
    }

    #[test]
    fn palette_unknown_name_is_normal() {
        assert_eq!(Palette::default().attr("chartreuse"), Attr::empty());
    }

    #[test]
    fn palette_without_color_support_is_normal() {
        let palette = Palette::new(false);
        assert_eq!(palette.attr("red"), Attr::empty());
    }

    #[test]
    fn two_colors_or_into_both_bits() {
        let palette = Palette::default();
        let mixed = palette.attr("red") | palette.attr("blue");
        assert!(mixed.contains(Attr::RED));
        assert!(mixed.contains(Attr::BLUE));
    }
}
