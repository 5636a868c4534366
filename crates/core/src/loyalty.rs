//! Loyalty cards, optionally linked to a location.

use serde::{Deserialize, Serialize};

use crate::id::LoyaltyCardId;

/// How a card's token is rendered at checkout.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardProvider {
    Barcode,
    QrCode,
}

/// A store loyalty card. May be linked to zero or one location through the
/// card↔location association maintained by `LoyaltyCardRepository`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoyaltyCard {
    pub id: LoyaltyCardId,
    pub name: String,
    pub provider: CardProvider,
    /// Provider-specific payload (barcode digits, QR content).
    pub token: String,
}

impl LoyaltyCard {
    pub fn new(name: impl Into<String>, provider: CardProvider, token: impl Into<String>) -> Self {
        Self {
            id: LoyaltyCardId::UNASSIGNED,
            name: name.into(),
            provider,
            token: token.into(),
        }
    }
}
