//! Parameter-Anwendung auf den Voice-Kanal

use crate::channel::VoiceKanal;
use crate::policy::StimmParameter;
use crate::registry::{bezeichnung, TeilnehmerRegister};
use voicezone_core::TeilnehmerId;

/// Schreibt ein Profil fuer einen Ziel-Teilnehmer
///
/// Die Gueltigkeit wird unmittelbar vor dem Schreiben geprueft; hat das Ziel
/// den Raum inzwischen verlassen, passiert nichts. Gibt zurueck, ob
/// geschrieben wurde.
pub fn anwenden<R, K>(
    register: &R,
    kanal: &K,
    ziel: &TeilnehmerId,
    parameter: &StimmParameter,
) -> bool
where
    R: TeilnehmerRegister + ?Sized,
    K: VoiceKanal + ?Sized,
{
    if !register.ist_gueltig(ziel) {
        tracing::trace!(teilnehmer = %ziel, "Ziel ungueltig – Parameter nicht gesetzt");
        return false;
    }

    kanal.parameter_setzen(ziel, parameter);

    tracing::debug!(
        teilnehmer = %bezeichnung(register, ziel),
        gain = parameter.gain,
        distanz_fern = parameter.distanz_fern,
        tiefpass = parameter.tiefpass,
        "Stimmparameter gesetzt"
    );
    true
}
