use bevy::prelude::*;

use crate::theme::srgb_hex;

pub const HEADER_TEXT: Color = srgb_hex("#be123c");
pub const LABEL_TEXT: Color = srgb_hex("#6b7280");

pub const BUTTON_TEXT: Color = srgb_hex("#ffffff");
pub const BUTTON_BACKGROUND: Color = srgb_hex("#e11d48");
pub const BUTTON_HOVERED_BACKGROUND: Color = srgb_hex("#f43f5e");
pub const BUTTON_PRESSED_BACKGROUND: Color = srgb_hex("#be123c");

pub const MUTED_BUTTON_TEXT: Color = srgb_hex("#374151");
pub const MUTED_BUTTON_BACKGROUND: Color = srgb_hex("#f3f4f6");
pub const MUTED_BUTTON_HOVERED_BACKGROUND: Color = srgb_hex("#e5e7eb");
pub const MUTED_BUTTON_PRESSED_BACKGROUND: Color = srgb_hex("#d1d5db");

// Page gradient, top to bottom.
pub const PAGE_TOP: Color = srgb_hex("#fdf2f8");
pub const PAGE_MIDDLE: Color = srgb_hex("#ffffff");
pub const PAGE_BOTTOM: Color = srgb_hex("#fff1f2");

pub const CARD: Color = srgb_hex("#ffffff99");

pub const PETAL: Color = srgb_hex("#ff6b9a");
pub const PETAL_HIGHLIGHT: Color = srgb_hex("#ff9fc0");
pub const STEM: Color = srgb_hex("#6aa84f");
pub const CENTER_INNER: Color = srgb_hex("#fff59d");
pub const CENTER_OUTER: Color = srgb_hex("#ffb677");
pub const CENTER_RING: Color = srgb_hex("#f1c40f");

pub const MESSAGE_BACKGROUND: Color = srgb_hex("#ffffff");
pub const MESSAGE_TITLE_TEXT: Color = srgb_hex("#be123c");
pub const MESSAGE_BODY_TEXT: Color = srgb_hex("#4b5563");
