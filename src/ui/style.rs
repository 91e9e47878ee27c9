use console::{StyledObject, style};
use std::fmt::Display;

use crate::org::BadgeColor;

/// Green bold: success checkmarks, confirmations
pub fn success<D: Display>(text: D) -> String {
    style(text).green().bold().to_string()
}

/// White bold: section headers, titles
pub fn header<D: Display>(text: D) -> String {
    style(text).white().bold().to_string()
}

/// Dim: secondary text and empty states
pub fn dim<D: Display>(text: D) -> String {
    style(text).dim().to_string()
}

/// Yellow: warnings and fallback notices
pub fn warning<D: Display>(text: D) -> String {
    style(text).yellow().to_string()
}

/// Green: confirmed values, selected models
pub fn value<D: Display>(text: D) -> String {
    style(text).green().to_string()
}

/// Cyan bold: markers and bullet points
pub fn accent<D: Display>(text: D) -> String {
    style(text).cyan().bold().to_string()
}

fn tint<D>(styled: StyledObject<D>, color: BadgeColor) -> StyledObject<D> {
    match color {
        BadgeColor::Purple => styled.magenta(),
        BadgeColor::Blue => styled.blue(),
        BadgeColor::Green => styled.green(),
        BadgeColor::Yellow => styled.yellow(),
        BadgeColor::Orange => styled.color256(208),
        BadgeColor::Gray => styled.color256(245),
    }
}

/// Level badge, e.g. `[สำนัก]`, tinted by level color
pub fn badge<D: Display>(text: D, color: BadgeColor) -> String {
    tint(style(format!("[{text}]")), color).to_string()
}
