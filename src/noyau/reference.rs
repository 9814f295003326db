// src/noyau/reference.rs
//
// Page de référence : table des 16 angles (valeurs formatées) + textes d’étude.

use super::angles::{Angle, ANGLES};
use super::correction::TEXTE_INDEFINI;
use super::format::format_valeur;

/// Une ligne de la table (tout est déjà formaté).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LigneReference {
    pub angle: Angle,
    pub radians: String,
    pub x: String,
    pub y: String,
    pub sinus: String,
    pub cosinus: String,
    pub tangente: String,
}

pub fn ligne_reference(angle: Angle) -> LigneReference {
    let r = angle.reponse_exacte();
    LigneReference {
        angle,
        radians: format_valeur(r.radians),
        x: format_valeur(r.x),
        y: format_valeur(r.y),
        sinus: format_valeur(r.sinus),
        cosinus: format_valeur(r.cosinus),
        tangente: r
            .tangente
            .map_or_else(|| TEXTE_INDEFINI.to_string(), format_valeur),
    }
}

pub fn table_reference() -> Vec<LigneReference> {
    ANGLES.iter().map(|a| ligne_reference(*a)).collect()
}

pub const INTRODUCTION: &str = "Le cercle trigonométrique est un cercle de rayon 1, \
centré à l’origine (0, 0) du plan. C’est l’outil de base pour relier un angle \
à ses fonctions trigonométriques.";

/// (titre, puces)
pub const NOTIONS_CLES: [(&str, &[&str]); 3] = [
    (
        "Coordonnées (x, y)",
        &[
            "L’abscisse x est le cosinus de l’angle",
            "L’ordonnée y est le sinus de l’angle",
            "Pour tout point du cercle : x² + y² = 1",
        ],
    ),
    (
        "Radians et degrés",
        &[
            "Tour complet : 360° = 2π radians",
            "Demi-tour : 180° = π radians",
            "Quart de tour : 90° = π/2 radians",
            "Conversion : radians = degrés × (π/180)",
        ],
    ),
    (
        "Triangles remarquables",
        &[
            "30-60-90 : côtés dans le rapport 1 : √3 : 2",
            "45-45-90 : côtés dans le rapport 1 : 1 : √2",
        ],
    ),
];

pub const ASTUCES: [&str; 4] = [
    "Les valeurs se répètent tous les 90° avec des signes alternés",
    "Sinus et cosinus restent toujours entre -1 et 1",
    "Les sinus du quadrant I sont les cosinus du quadrant II",
    "Les signes suivent la règle ASTC (All, Sine, Tangent, Cosine)",
];
