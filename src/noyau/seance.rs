// src/noyau/seance.rs
//
// Séance d’entraînement : possède les 16 entrées + les réglages.
// Le noyau (lecture / format / correction) reste sans état ; c’est ici,
// côté appelant, que vivent les données mutables de la séance.

use std::collections::BTreeMap;

use super::angles::{Angle, ANGLES};
use super::correction::{corriger, Bilan};
use super::saisie::{valider, EntreeUtilisateur, ErreurSaisie, Reglages};

static ENTREE_VIERGE: EntreeUtilisateur = EntreeUtilisateur {
    complete: false,
    angle: String::new(),
    x: String::new(),
    y: String::new(),
    radians: String::new(),
    sinus: String::new(),
    cosinus: String::new(),
    tangente: String::new(),
};

#[derive(Clone, Debug)]
pub struct Seance {
    entrees: BTreeMap<Angle, EntreeUtilisateur>,
    pub reglages: Reglages,
    /// Après un enregistrement réussi, passer au point suivant.
    pub avance_auto: bool,
}

impl Default for Seance {
    fn default() -> Self {
        Self::nouvelle()
    }
}

impl Seance {
    pub fn nouvelle() -> Self {
        Self {
            entrees: entrees_vides(),
            reglages: Reglages::default(),
            avance_auto: false,
        }
    }

    pub fn entrees(&self) -> &BTreeMap<Angle, EntreeUtilisateur> {
        &self.entrees
    }

    /// Entrée d’un point ; une clé absente se lit comme un point vierge.
    pub fn entree(&self, angle: Angle) -> &EntreeUtilisateur {
        self.entrees.get(&angle).unwrap_or(&ENTREE_VIERGE)
    }

    pub fn entree_mut(&mut self, angle: Angle) -> &mut EntreeUtilisateur {
        self.entrees.entry(angle).or_default()
    }

    /// Valide puis marque le point complété.
    /// Renvoie l’angle suivant si l’avance automatique est active.
    pub fn enregistrer(&mut self, angle: Angle) -> Result<Option<Angle>, ErreurSaisie> {
        let reglages = self.reglages;
        let entree = self.entree_mut(angle);

        if let Err(e) = valider(angle, entree, &reglages) {
            log::warn!("point {angle} refusé : {e}");
            return Err(e);
        }

        entree.complete = true;
        log::info!("point {angle} enregistré");

        Ok(self.avance_auto.then(|| angle.suivant()))
    }

    /// Remise à zéro de toutes les réponses (réglages conservés).
    pub fn effacer(&mut self) {
        self.entrees = entrees_vides();
        log::info!("cercle effacé");
    }

    /// Au moins un point complété (=> confirmation avant d’effacer / de quitter).
    pub fn a_progression(&self) -> bool {
        self.entrees.values().any(|e| e.complete)
    }

    /// Tous les points complétés (=> vérification possible).
    pub fn tout_complet(&self) -> bool {
        ANGLES
            .iter()
            .all(|a| self.entrees.get(a).is_some_and(|e| e.complete))
    }

    pub fn verifier(&self) -> Bilan {
        corriger(&self.entrees, &self.reglages)
    }
}

fn entrees_vides() -> BTreeMap<Angle, EntreeUtilisateur> {
    ANGLES
        .iter()
        .map(|a| (*a, EntreeUtilisateur::default()))
        .collect()
}
