// src/noyau/correction.rs
//
// Correction d’une séance : score + liste d’écarts (ordre déterministe).
//
// Règles, par champ actif d’un point complété :
// - tangente à 90°/270° : juste ssi "undefined" (casse libre)
// - valeur attendue exactement 0 : juste ssi la saisie vaut exactement 0
// - radians : égalité textuelle avec le formatage canonique (compacté)
// - sinon : |saisie - attendu| <= 1e-4, ou les deux sous 1e-4 en valeur absolue
// Un point non complété donne un seul écart `Point` et ne compte pas au total.
// Aucune panique : une saisie illisible (NaN) est toujours un écart.

use std::collections::BTreeMap;
use std::fmt;

use super::angles::{arrondi, Angle, ReponseExacte, ANGLES};
use super::format::format_valeur;
use super::lecture::{compacter, est_indefini, evaluer, CHIFFRES_LECTURE};
use super::saisie::{Champ, EntreeUtilisateur, Reglages};

/// Tolérance de correction (la plus stricte des deux de l’ancienne version).
pub const TOLERANCE: f64 = 1e-4;

/// Affiché à la place d’une saisie vide.
pub const SAISIE_VIDE: &str = "(vide)";

/// Texte attendu pour une tangente indéfinie.
pub const TEXTE_INDEFINI: &str = "undefined";

/// Nombre d’écarts cités dans le résumé.
const ECARTS_RESUME: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub justes: u32,
    pub total: u32,
}

/// Un écart (reconstruit à chaque correction).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ecart {
    pub angle: Angle,
    pub champ: Champ,
    pub saisie: String,
    pub attendu: String,
}

impl fmt::Display for Ecart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.champ {
            Champ::Point => write!(f, "point {} non complété", self.angle),
            c => write!(f, "{c} à {}", self.angle),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bilan {
    pub score: Score,
    pub ecarts: Vec<Ecart>,
}

impl Bilan {
    pub fn parfait(&self) -> bool {
        self.ecarts.is_empty()
    }

    /// (titre, description) pour l’annonce.
    pub fn resume(&self) -> (String, String) {
        let titre = format!("Score : {}/{}", self.score.justes, self.score.total);

        if self.parfait() {
            return (titre, "Parfait ! Toutes les réponses sont justes !".to_string());
        }

        let premiers: Vec<String> = self
            .ecarts
            .iter()
            .take(ECARTS_RESUME)
            .map(|e| e.to_string())
            .collect();
        let mut description = format!("Erreurs : {}", premiers.join(", "));
        if self.ecarts.len() > ECARTS_RESUME {
            description.push_str(&format!(
                " et {} de plus…",
                self.ecarts.len() - ECARTS_RESUME
            ));
        }
        (titre, description)
    }
}

/// Corrige toutes les entrées (les 16 angles, dans l’ordre).
/// Une entrée absente de la table compte comme non complétée.
pub fn corriger(entrees: &BTreeMap<Angle, EntreeUtilisateur>, reglages: &Reglages) -> Bilan {
    let mut bilan = Bilan::default();

    for angle in ANGLES {
        let entree = match entrees.get(&angle) {
            Some(e) if e.complete => e,
            _ => {
                bilan.ecarts.push(Ecart {
                    angle,
                    champ: Champ::Point,
                    saisie: SAISIE_VIDE.to_string(),
                    attendu: "point complété".to_string(),
                });
                continue;
            }
        };

        let exact = angle.reponse_exacte();

        for champ in reglages.champs_actifs() {
            bilan.score.total += 1;

            let texte = entree.texte(champ);
            if champ_juste(angle, champ, texte, &exact) {
                bilan.score.justes += 1;
            } else {
                bilan.ecarts.push(Ecart {
                    angle,
                    champ,
                    saisie: if texte.trim().is_empty() {
                        SAISIE_VIDE.to_string()
                    } else {
                        texte.to_string()
                    },
                    attendu: texte_attendu(champ, &exact),
                });
            }
        }
    }

    log::info!(
        "correction : {}/{} ({} écarts)",
        bilan.score.justes,
        bilan.score.total,
        bilan.ecarts.len()
    );
    bilan
}

/// Valeur attendue d’un champ ; None = tangente indéfinie.
fn valeur_attendue(champ: Champ, exact: &ReponseExacte) -> Option<f64> {
    match champ {
        Champ::Point => None,
        Champ::X => Some(exact.x),
        Champ::Y => Some(exact.y),
        Champ::Radians => Some(exact.radians),
        Champ::Sinus => Some(exact.sinus),
        Champ::Cosinus => Some(exact.cosinus),
        Champ::Tangente => exact.tangente,
    }
}

fn texte_attendu(champ: Champ, exact: &ReponseExacte) -> String {
    match valeur_attendue(champ, exact) {
        Some(v) => format_valeur(v),
        None => TEXTE_INDEFINI.to_string(),
    }
}

/// Juge un champ d’un point complété.
pub fn champ_juste(angle: Angle, champ: Champ, texte: &str, exact: &ReponseExacte) -> bool {
    if champ == Champ::Tangente && angle.tangente_indefinie() {
        return est_indefini(texte);
    }

    let Some(attendu) = valeur_attendue(champ, exact) else {
        return false;
    };

    // zéro exact : pas de tolérance
    if attendu == 0.0 {
        return evaluer(texte) == 0.0;
    }

    // radians : équivalence textuelle avec le formatage canonique
    if champ == Champ::Radians && compacter(texte) == compacter(&format_valeur(attendu)) {
        return true;
    }

    valeurs_proches(evaluer(texte), arrondi(attendu, CHIFFRES_LECTURE))
}

/// |u - e| <= TOLERANCE (écart arrondi à 8 décimales), ou les deux quasi nuls.
/// NaN et ∞ ne sont jamais proches.
pub fn valeurs_proches(u: f64, e: f64) -> bool {
    if !u.is_finite() || !e.is_finite() {
        return false;
    }
    if u.abs() < TOLERANCE && e.abs() < TOLERANCE {
        return true;
    }
    arrondi((u - e).abs(), CHIFFRES_LECTURE) <= TOLERANCE
}
