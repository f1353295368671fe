//! Identifikationstypen fuer VoiceZone
//!
//! Teilnehmer werden nie als besessene Objekte gehalten, sondern nur ueber
//! ihre ID gegen ein externes Register aufgeloest. Die ID ist daher `Copy`
//! und billig zu vergleichen.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Eindeutige Teilnehmer-ID (Handle in das externe Teilnehmer-Register)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeilnehmerId(pub Uuid);

impl TeilnehmerId {
    /// Erstellt eine neue zufaellige TeilnehmerId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Erstellt eine deterministische ID aus einer Zahl (Tests, Szenarien)
    pub fn aus_zahl(n: u128) -> Self {
        Self(Uuid::from_u128(n))
    }
}

impl Default for TeilnehmerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TeilnehmerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "teilnehmer:{}", self.0)
    }
}
