//! Expense categories.
//!
//! The set is closed and ordered. Ordinals are stable: they are what the
//! database stores and what the category listing exposes to clients.

use std::fmt;

use crate::EngineError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Materials,
    Labor,
    Tools,
    Furniture,
    #[default]
    Unexpected,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 5] = [
        Self::Materials,
        Self::Labor,
        Self::Tools,
        Self::Furniture,
        Self::Unexpected,
    ];

    /// Small positive ordinal, starting at 1.
    pub const fn id(self) -> u8 {
        match self {
            Self::Materials => 1,
            Self::Labor => 2,
            Self::Tools => 3,
            Self::Furniture => 4,
            Self::Unexpected => 5,
        }
    }

    /// Human readable label shown to users.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Materials => "материалы",
            Self::Labor => "работа/оплата мастерам",
            Self::Tools => "инструменты",
            Self::Furniture => "мебель и техника",
            Self::Unexpected => "прочее/непредвиденное",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<i32> for Category {
    type Error = EngineError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|c| i32::from(c.id()) == value)
            .ok_or_else(|| EngineError::InvalidCategory(format!("unknown category id {value}")))
    }
}

impl TryFrom<u8> for Category {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_from(i32::from(value))
    }
}
