//! Noyau du cercle trigonométrique (sans egui)
//!
//! Organisation interne :
//! - angles.rs     : les 16 angles + valeurs exactes (arrondies à 4 décimales)
//! - format.rs     : affichage canonique (π/6, √3/2, -1/2…)
//! - jetons.rs     : tokenisation des réponses
//! - rpn.rs        : shunting-yard + évaluation f64
//! - lecture.rs    : texte -> nombre (littéraux, undefined, NaN)
//! - saisie.rs     : champs, réglages, validation d’un point
//! - correction.rs : score + écarts
//! - seance.rs     : état mutable d’une séance
//! - reference.rs  : table + textes de la page de référence

pub mod angles;
pub mod correction;
pub mod format;
pub mod jetons;
pub mod lecture;
pub mod reference;
pub mod rpn;
pub mod saisie;
pub mod seance;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use angles::{Angle, ANGLES};
pub use correction::Bilan;
pub use saisie::{normaliser_saisie, Champ};
pub use seance::Seance;
