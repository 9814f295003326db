//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de l’écran (page, point ouvert, dialogues, annonce)
//! autour d’une `Seance`, et offrir les actions des boutons sans logique d’affichage.
//!
//! Contrats :
//! - Les données de la séance (réponses, réglages) vivent dans `Seance` ;
//!   ici seulement ce qui concerne l’écran.
//! - Actions déterministes, sans effet de bord caché.
//! - Toute action destructive passe par une confirmation si la séance a progressé.

use crate::noyau::{Angle, Bilan, Seance};

/// Durée d’affichage d’une annonce (secondes).
pub const DUREE_ANNONCE: f64 = 6.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Pratique,
    Reference,
}

/// Action en attente de confirmation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirmation {
    Effacer,
    AllerReference,
}

impl Confirmation {
    pub fn titre(self) -> &'static str {
        match self {
            Confirmation::Effacer => "Effacer le cercle ?",
            Confirmation::AllerReference => "Quitter l’entraînement ?",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Confirmation::Effacer => {
                "Toutes les réponses saisies seront perdues. Les réglages sont conservés."
            }
            Confirmation::AllerReference => {
                "La progression en cours sera perdue si tu quittes le cercle d’entraînement."
            }
        }
    }
}

/// Message bref (score, erreur de saisie).
#[derive(Clone, Debug, PartialEq)]
pub struct Annonce {
    pub titre: String,
    pub description: String,
    pub succes: bool,
    /// Instant egui (secondes) ; None = pas encore affichée.
    pub expire: Option<f64>,
}

impl Annonce {
    pub fn nouvelle(titre: impl Into<String>, description: impl Into<String>, succes: bool) -> Self {
        Self {
            titre: titre.into(),
            description: description.into(),
            succes,
            expire: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppCercle {
    // --- données ---
    pub seance: Seance,

    // --- navigation ---
    pub page: Page,

    // --- dialogues ---
    pub point_ouvert: Option<Angle>,
    pub erreur_saisie: Option<String>,
    pub options_ouvert: bool,
    pub confirmation: Option<Confirmation>,

    // --- affichage ---
    pub afficher_axes: bool,
    pub cercle_reference: bool,
    pub annonce: Option<Annonce>,
    /// Dernière correction (détail des écarts).
    pub bilan: Option<Bilan>,
}

impl Default for AppCercle {
    fn default() -> Self {
        Self {
            seance: Seance::nouvelle(),
            page: Page::Pratique,
            point_ouvert: None,
            erreur_saisie: None,
            options_ouvert: false,
            confirmation: None,
            afficher_axes: true,
            cercle_reference: true,
            annonce: None,
            bilan: None,
        }
    }
}

impl AppCercle {
    /* ------------------------ Point (dialogue de saisie) ------------------------ */

    pub fn ouvrir_point(&mut self, angle: Angle) {
        self.point_ouvert = Some(angle);
        self.erreur_saisie = None;
    }

    pub fn fermer_point(&mut self) {
        self.point_ouvert = None;
        self.erreur_saisie = None;
    }

    /// Enregistre le point ouvert ; enchaîne sur le suivant si l’avance auto est active.
    pub fn enregistrer_point(&mut self) {
        let Some(angle) = self.point_ouvert else {
            return;
        };

        match self.seance.enregistrer(angle) {
            Ok(Some(suivant)) => self.ouvrir_point(suivant),
            Ok(None) => self.fermer_point(),
            Err(e) => {
                let msg = e.to_string();
                self.annonce = Some(Annonce::nouvelle("Saisie refusée", msg.clone(), false));
                self.erreur_saisie = Some(msg);
            }
        }
    }

    /* ------------------------ Actions de la barre ------------------------ */

    /// Effacer : direct si rien n’est complété, sinon confirmation.
    pub fn demander_effacer(&mut self) {
        if self.seance.a_progression() {
            self.confirmation = Some(Confirmation::Effacer);
        } else {
            self.effacer();
        }
    }

    /// Page de référence : même règle que l’effacement.
    pub fn demander_reference(&mut self) {
        if self.seance.a_progression() {
            self.confirmation = Some(Confirmation::AllerReference);
        } else {
            self.aller_reference();
        }
    }

    pub fn confirmer(&mut self) {
        match self.confirmation.take() {
            Some(Confirmation::Effacer) => self.effacer(),
            Some(Confirmation::AllerReference) => self.aller_reference(),
            None => {}
        }
    }

    pub fn annuler_confirmation(&mut self) {
        self.confirmation = None;
    }

    /// Vérifier : seulement quand tous les points sont complétés.
    pub fn verifier(&mut self) {
        if !self.seance.tout_complet() {
            return;
        }
        let bilan = self.seance.verifier();
        let (titre, description) = bilan.resume();
        self.annonce = Some(Annonce::nouvelle(titre, description, bilan.parfait()));
        self.bilan = Some(bilan);
    }

    /* ------------------------ Navigation ------------------------ */

    fn effacer(&mut self) {
        self.seance.effacer();
        self.bilan = None;
        self.fermer_point();
    }

    fn aller_reference(&mut self) {
        // une nouvelle séance attend au retour
        self.effacer();
        self.fermer_dialogues();
        self.page = Page::Reference;
    }

    pub fn retour_pratique(&mut self) {
        self.page = Page::Pratique;
    }

    /// Échap : ferme tout ce qui flotte.
    pub fn fermer_dialogues(&mut self) {
        self.fermer_point();
        self.options_ouvert = false;
        self.confirmation = None;
    }
}
