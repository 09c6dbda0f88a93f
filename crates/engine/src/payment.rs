//! How an expense was paid.

use std::fmt;

use crate::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaymentType {
    Cash,
    Card,
}

impl PaymentType {
    pub const fn id(self) -> u8 {
        match self {
            Self::Cash => 1,
            Self::Card => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Cash => "наличные",
            Self::Card => "карта",
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<i32> for PaymentType {
    type Error = EngineError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Cash),
            2 => Ok(Self::Card),
            other => Err(EngineError::InvalidPaymentType(format!(
                "unknown payment type id {other}"
            ))),
        }
    }
}
