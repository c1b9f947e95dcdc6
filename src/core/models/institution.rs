//! Institution model

use ratatui::style::Color;

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Neutral accent used while no institution is selected
    pub const WHITE: Self = Self(0xff, 0xff, 0xff);

    /// Parse `#rrggbb` (the leading `#` is optional)
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Self(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Terminal color for this value
    #[must_use]
    pub const fn to_color(self) -> Color {
        Color::Rgb(self.0, self.1, self.2)
    }
}

/// A selectable institution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Institution {
    /// Display name (e.g., "TU/e")
    pub name: String,
    /// Brand color used as the accent of every artifact
    pub color: Rgb,
    /// `false` for institutions whose studies have not started yet
    pub available: bool,
}

impl Institution {
    /// Create a new institution
    #[must_use]
    pub fn new(name: &str, color: Rgb, available: bool) -> Self {
        Self {
            name: name.to_string(),
            color,
            available,
        }
    }
}

/// The fixed, non-empty institution list offered by the picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Institutions(Vec<Institution>);

impl Institutions {
    /// Wrap a list of institutions
    ///
    /// # Errors
    /// Returns an error if the list is empty or contains duplicate names.
    pub fn new(list: Vec<Institution>) -> Result<Self, String> {
        if list.is_empty() {
            return Err("At least one institution must be configured".to_string());
        }
        for (index, institution) in list.iter().enumerate() {
            if list[..index].iter().any(|other| other.name == institution.name) {
                return Err(format!("Duplicate institution: '{}'", institution.name));
            }
        }
        Ok(Self(list))
    }

    /// Institution at a picker position
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Institution> {
        self.0.get(index)
    }

    /// Number of institutions (never zero)
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in picker order
    pub fn iter(&self) -> std::slice::Iter<'_, Institution> {
        self.0.iter()
    }
}
