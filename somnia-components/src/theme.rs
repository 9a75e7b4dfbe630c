//! Styling hints for wheel picker slots.
//!
//! The picker does not draw anything itself; each visible slot carries a
//! [`SlotStyle`] the host applies when it renders the label.

use derive_setters::Setters;
use somnia_ui::{Color, Dp};

/// How a single slot label should look.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotStyle {
    /// Label opacity in `0.0..=1.0`.
    pub opacity: f32,
    /// Label color.
    pub color: Color,
    /// Font size.
    pub font_size: Dp,
    /// CSS-style font weight.
    pub font_weight: u16,
}

/// Slot styling for a wheel picker.
///
/// The selected slot uses the `selected_*` values. A slot `d` positions away
/// from it uses the unselected values with opacity
/// `max(min_opacity, 1 - opacity_step * d)`.
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct PickerTheme {
    /// Label color of the selected slot.
    pub selected_color: Color,
    /// Font size of the selected slot.
    pub selected_font_size: Dp,
    /// Font weight of the selected slot.
    pub selected_font_weight: u16,
    /// Label color of every other slot.
    pub unselected_color: Color,
    /// Font size of every other slot.
    pub unselected_font_size: Dp,
    /// Font weight of every other slot.
    pub unselected_font_weight: u16,
    /// Opacity lost per position away from the selection.
    pub opacity_step: f32,
    /// Lower bound for unselected opacity.
    pub min_opacity: f32,
}

impl Default for PickerTheme {
    fn default() -> Self {
        Self {
            selected_color: Color::WHITE,
            selected_font_size: Dp(20.0),
            selected_font_weight: 700,
            unselected_color: Color::from_rgb_u8(0x77, 0x77, 0x77),
            unselected_font_size: Dp(16.0),
            unselected_font_weight: 400,
            opacity_step: 0.12,
            min_opacity: 0.4,
        }
    }
}

impl PickerTheme {
    /// Style for a slot `distance` positions away from the selection.
    pub fn slot_style(&self, distance: u32) -> SlotStyle {
        if distance == 0 {
            return SlotStyle {
                opacity: 1.0,
                color: self.selected_color,
                font_size: self.selected_font_size,
                font_weight: self.selected_font_weight,
            };
        }
        let opacity = (1.0 - self.opacity_step * distance as f32).max(self.min_opacity);
        SlotStyle {
            opacity,
            color: self.unselected_color,
            font_size: self.unselected_font_size,
            font_weight: self.unselected_font_weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opacity_fades_then_floors() {
        let theme = PickerTheme::default();
        assert_eq!(theme.slot_style(0).opacity, 1.0);
        assert_eq!(theme.slot_style(0).font_weight, 700);
        assert!((theme.slot_style(1).opacity - 0.88).abs() < 1e-6);
        assert!((theme.slot_style(3).opacity - 0.64).abs() < 1e-6);
        assert_eq!(theme.slot_style(6).opacity, 0.4);
        assert_eq!(theme.slot_style(2).color.to_hex(), "#777777");
    }
}
