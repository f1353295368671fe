//! Teilnehmer-Ereignisse
//!
//! Join/Leave-Benachrichtigungen der Host-Plattform. Die Zonen-Logik braucht
//! die Nutzlast nur zur Protokollierung; jedes Ereignis loest einen
//! vollstaendigen Roster-Neuaufbau aus.

use crate::types::TeilnehmerId;
use serde::{Deserialize, Serialize};

/// Roster-Aenderungen die von der Host-Plattform gemeldet werden
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeilnehmerEreignis {
    /// Ein Teilnehmer hat den Raum betreten
    Beigetreten { teilnehmer: TeilnehmerId },
    /// Ein Teilnehmer hat den Raum verlassen
    Verlassen { teilnehmer: TeilnehmerId },
}

impl TeilnehmerEreignis {
    /// Gibt den betroffenen Teilnehmer zurueck
    pub fn teilnehmer(&self) -> TeilnehmerId {
        match self {
            Self::Beigetreten { teilnehmer } | Self::Verlassen { teilnehmer } => *teilnehmer,
        }
    }

    /// Kurzbezeichnung fuer Log-Ausgaben
    pub fn art(&self) -> &'static str {
        match self {
            Self::Beigetreten { .. } => "beigetreten",
            Self::Verlassen { .. } => "verlassen",
        }
    }
}
