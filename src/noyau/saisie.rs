// src/noyau/saisie.rs
//
// Saisie d’un point : champs texte, réglages, validation à l’enregistrement.
//
// Contrats :
// - `complete == true` seulement après une validation réussie ;
//   la validité n’est pas revérifiée ensuite (les champs restent éditables).
// - Erreurs distinguables : angle incorrect / champs vides / champs invalides.

use std::fmt;

use thiserror::Error;

use super::angles::Angle;
use super::lecture::{est_indefini, evaluer};

/// Champs notés, dans l’ordre de déclaration (ordre des écarts).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Champ {
    /// Point entier (non complété)
    Point,
    X,
    Y,
    Radians,
    Sinus,
    Cosinus,
    Tangente,
}

impl Champ {
    pub const NOTES: [Champ; 6] = [
        Champ::X,
        Champ::Y,
        Champ::Radians,
        Champ::Sinus,
        Champ::Cosinus,
        Champ::Tangente,
    ];

    pub fn libelle(self) -> &'static str {
        match self {
            Champ::Point => "Point",
            Champ::X => "Coordonnée x",
            Champ::Y => "Coordonnée y",
            Champ::Radians => "Radians",
            Champ::Sinus => "Sinus",
            Champ::Cosinus => "Cosinus",
            Champ::Tangente => "Tangente",
        }
    }
}

impl fmt::Display for Champ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.libelle())
    }
}

/// Ce qui est demandé (et noté). Valable pour toute la séance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reglages {
    pub coordonnees: bool,
    pub radians: bool,
    pub sinus: bool,
    pub cosinus: bool,
    pub tangente: bool,
    /// L’élève doit aussi retrouver l’angle en degrés.
    pub champ_degres: bool,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            coordonnees: true,
            radians: true,
            sinus: true,
            cosinus: true,
            tangente: true,
            champ_degres: true,
        }
    }
}

impl Reglages {
    pub fn actif(&self, champ: Champ) -> bool {
        match champ {
            Champ::Point => true,
            Champ::X | Champ::Y => self.coordonnees,
            Champ::Radians => self.radians,
            Champ::Sinus => self.sinus,
            Champ::Cosinus => self.cosinus,
            Champ::Tangente => self.tangente,
        }
    }

    /// Champs notés actifs, dans l’ordre.
    pub fn champs_actifs(&self) -> impl Iterator<Item = Champ> + '_ {
        Champ::NOTES.into_iter().filter(|c| self.actif(*c))
    }
}

/// Réponses d’un point (texte libre).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntreeUtilisateur {
    pub complete: bool,
    pub angle: String,
    pub x: String,
    pub y: String,
    pub radians: String,
    pub sinus: String,
    pub cosinus: String,
    pub tangente: String,
}

impl EntreeUtilisateur {
    pub fn texte(&self, champ: Champ) -> &str {
        match champ {
            Champ::Point => "",
            Champ::X => &self.x,
            Champ::Y => &self.y,
            Champ::Radians => &self.radians,
            Champ::Sinus => &self.sinus,
            Champ::Cosinus => &self.cosinus,
            Champ::Tangente => &self.tangente,
        }
    }

    /// Accès mutable (vue). `Point` n’a pas de texte : renvoie None.
    pub fn texte_mut(&mut self, champ: Champ) -> Option<&mut String> {
        match champ {
            Champ::Point => None,
            Champ::X => Some(&mut self.x),
            Champ::Y => Some(&mut self.y),
            Champ::Radians => Some(&mut self.radians),
            Champ::Sinus => Some(&mut self.sinus),
            Champ::Cosinus => Some(&mut self.cosinus),
            Champ::Tangente => Some(&mut self.tangente),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurSaisie {
    #[error("angle incorrect pour ce point")]
    AngleIncorrect,

    #[error("valeurs manquantes : {}", liste(.0))]
    Vides(Vec<Champ>),

    #[error("valeurs invalides : {}", liste(.0))]
    Invalides(Vec<Champ>),
}

fn liste(champs: &[Champ]) -> String {
    champs
        .iter()
        .map(|c| c.libelle())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validation à l’enregistrement d’un point.
///
/// Ordre : angle (si demandé) -> champs vides -> champs illisibles.
/// Un champ est lisible s’il s’évalue en un nombre fini ; la tangente
/// accepte aussi "undefined".
pub fn valider(
    angle: Angle,
    entree: &EntreeUtilisateur,
    reglages: &Reglages,
) -> Result<(), ErreurSaisie> {
    if reglages.champ_degres && !angle_correct(angle, &entree.angle) {
        return Err(ErreurSaisie::AngleIncorrect);
    }

    let vides: Vec<Champ> = reglages
        .champs_actifs()
        .filter(|c| entree.texte(*c).trim().is_empty())
        .collect();
    if !vides.is_empty() {
        return Err(ErreurSaisie::Vides(vides));
    }

    let invalides: Vec<Champ> = reglages
        .champs_actifs()
        .filter(|c| !champ_lisible(*c, entree.texte(*c)))
        .collect();
    if !invalides.is_empty() {
        return Err(ErreurSaisie::Invalides(invalides));
    }

    Ok(())
}

fn angle_correct(angle: Angle, texte: &str) -> bool {
    let t = texte.trim().trim_end_matches('°').trim();
    match t.parse::<f64>() {
        Ok(v) => v == f64::from(angle.degres()),
        Err(_) => false,
    }
}

fn champ_lisible(champ: Champ, texte: &str) -> bool {
    if champ == Champ::Tangente && est_indefini(texte) {
        return true;
    }
    evaluer(texte).is_finite()
}

/// Normalisation au fil de la frappe :
/// minuscules, squareroot/root/sqrt -> √, pi -> π.
pub fn normaliser_saisie(texte: &str) -> String {
    texte
        .to_lowercase()
        .replace("squareroot", "√")
        .replace("root", "√")
        .replace("sqrt", "√")
        .replace("pi", "π")
}
