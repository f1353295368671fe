//! voicezone-core – Gemeinsame Typen, Ereignisse und Fehlertypen
//!
//! Dieses Crate stellt die Bausteine bereit, die von der Zonen-Logik und
//! dem Simulations-Host gemeinsam genutzt werden.

pub mod error;
pub mod event;
pub mod types;

// Re-Exporte fuer bequemen Zugriff
pub use error::{Result, VoicezoneError};
pub use event::TeilnehmerEreignis;
pub use types::TeilnehmerId;
