// src/app/vue.rs
//
// Vue (UI egui), natif + web : page d’entraînement
// -------------------------------------------------
// Objectifs :
// - Même AppCercle (etat.rs) pour natif + wasm
// - Cercle dessiné au Painter, 16 points cliquables (vert = complété)
// - Dialogue de saisie par point (Enter enregistre), options, confirmations
// - Annonce brève en bas d’écran (score ou saisie refusée)
//
// Note :
// - Les champs sont normalisés pendant la frappe (pi -> π, sqrt -> √)
// - Le bouton Vérifier n’est actif qu’une fois les 16 points complétés

use std::time::Duration;

use eframe::egui;
use egui::{Align2, Color32, FontId, Pos2, Sense, Stroke, Vec2};

use super::etat::{AppCercle, DUREE_ANNONCE};
use crate::noyau::{normaliser_saisie, Angle, Bilan, Champ, ANGLES};

/// Rayon (px) d’un point dessiné.
const RAYON_POINT: f32 = 9.0;

/// Distance (px) sous laquelle un clic touche un point (tactile compris).
const RAYON_CLIC: f32 = 18.0;

const VERT_COMPLETE: Color32 = Color32::from_rgb(46, 160, 67);
const BLEU_OUVERT: Color32 = Color32::from_rgb(56, 120, 220);
const ROUGE_ERREUR: Color32 = Color32::from_rgb(200, 60, 60);

impl AppCercle {
    /// UI principale de la page d’entraînement.
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Cercle trigonométrique");
                ui.label("Clique sur un point pour saisir ses valeurs.");
                ui.add_space(6.0);

                self.ui_barre(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                ui.vertical_centered(|ui| self.ui_cercle(ui));

                if let Some(bilan) = &self.bilan {
                    ui.add_space(8.0);
                    ui_bilan(ui, bilan);
                }
            });
    }

    fn ui_barre(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            if bouton(ui, "Options", "Champs demandés, axes").clicked() {
                self.options_ouvert = true;
            }
            if bouton(ui, "Effacer", "Efface toutes les réponses").clicked() {
                self.demander_effacer();
            }

            let complet = self.seance.tout_complet();
            let verifier = ui
                .add_enabled(complet, egui::Button::new("Vérifier").min_size([96.0, 30.0].into()))
                .on_hover_text("Corrige les 16 points")
                .on_disabled_hover_text("Complète les 16 points d’abord");
            if verifier.clicked() {
                self.verifier();
            }

            if bouton(ui, "Référence", "Table des valeurs + astuces").clicked() {
                self.demander_reference();
            }

            ui.separator();

            let faits = self
                .seance
                .entrees()
                .values()
                .filter(|e| e.complete)
                .count();
            ui.label(format!("Points complétés : {faits}/{}", ANGLES.len()));
        });
    }

    fn ui_cercle(&mut self, ui: &mut egui::Ui) {
        let cote = ui.available_width().clamp(260.0, 640.0);
        let (resp, painter) = ui.allocate_painter(egui::vec2(cote, cote), Sense::click());

        let centre = resp.rect.center();
        let rayon = cote * 0.36;
        dessiner_cercle(&painter, ui.visuals(), centre, rayon, self.afficher_axes);

        let survol = resp.hover_pos().and_then(|p| point_proche(centre, rayon, p));
        if survol.is_some() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        let texte = ui.visuals().text_color();
        for angle in ANGLES {
            let pos = centre + direction(angle) * rayon;
            let complete = self.seance.entree(angle).complete;

            let fond = if complete {
                VERT_COMPLETE
            } else if self.point_ouvert == Some(angle) {
                BLEU_OUVERT
            } else {
                ui.visuals().widgets.inactive.bg_fill
            };
            let r = if survol == Some(angle) {
                RAYON_POINT + 3.0
            } else {
                RAYON_POINT
            };
            painter.circle(pos, r, fond, Stroke::new(1.5, texte));

            // degrés visibles seulement si l’angle n’est pas demandé
            if !self.seance.reglages.champ_degres {
                painter.text(
                    centre + direction(angle) * (rayon + 26.0),
                    Align2::CENTER_CENTER,
                    angle.to_string(),
                    FontId::proportional(13.0),
                    texte,
                );
            }
        }

        if resp.clicked() {
            if let Some(angle) = resp
                .interact_pointer_pos()
                .and_then(|p| point_proche(centre, rayon, p))
            {
                self.ouvrir_point(angle);
            }
        }
    }

    /* ------------------------ Fenêtres flottantes ------------------------ */

    /// Dialogues + annonce (à appeler après le panneau central).
    pub fn fenetres(&mut self, ctx: &egui::Context) {
        self.fenetre_point(ctx);
        self.fenetre_options(ctx);
        self.fenetre_confirmation(ctx);
        self.fenetre_annonce(ctx);
    }

    fn fenetre_point(&mut self, ctx: &egui::Context) {
        let Some(angle) = self.point_ouvert else {
            return;
        };

        // le titre ne doit pas trahir l’angle quand il est demandé
        let titre = if self.seance.reglages.champ_degres {
            "Point du cercle".to_string()
        } else {
            format!("Point {angle}")
        };

        let mut ouvert = true;
        let mut enregistrer = false;
        egui::Window::new(titre)
            .id(egui::Id::new("fenetre_point"))
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut ouvert)
            .show(ctx, |ui| {
                enregistrer = self.ui_point(ui, angle);
            });

        if enregistrer {
            self.enregistrer_point();
        } else if !ouvert {
            self.fermer_point();
        }
    }

    /// Champs d’un point ; true si l’utilisateur demande l’enregistrement.
    fn ui_point(&mut self, ui: &mut egui::Ui, angle: Angle) -> bool {
        let reglages = self.seance.reglages;
        let mut avance = self.seance.avance_auto;
        let mut valider = false;

        let entree = self.seance.entree_mut(angle);
        egui::Grid::new(("grille_point", angle.degres()))
            .num_columns(2)
            .spacing([10.0, 6.0])
            .show(ui, |ui| {
                if reglages.champ_degres {
                    ui.label("Angle (degrés)");
                    let r = ui.add(
                        egui::TextEdit::singleline(&mut entree.angle)
                            .hint_text("ex: 45")
                            .desired_width(180.0),
                    );
                    valider |= entree_pressee(ui, &r);
                    ui.end_row();
                }

                for champ in reglages.champs_actifs() {
                    let Some(texte) = entree.texte_mut(champ) else {
                        continue;
                    };
                    ui.label(champ.libelle());
                    let r = ui.add(
                        egui::TextEdit::singleline(&mut *texte)
                            .hint_text(indice(champ))
                            .desired_width(180.0),
                    );
                    if r.changed() {
                        let norme = normaliser_saisie(texte);
                        *texte = norme;
                    }
                    valider |= entree_pressee(ui, &r);
                    ui.end_row();
                }
            });

        ui.add_space(4.0);
        ui.checkbox(&mut avance, "Passer au point suivant après enregistrement");
        self.seance.avance_auto = avance;

        if let Some(msg) = &self.erreur_saisie {
            ui.colored_label(ui.visuals().error_fg_color, msg);
        }

        ui.add_space(4.0);
        valider |= ui
            .add_sized([120.0, 30.0], egui::Button::new("Enregistrer"))
            .clicked();
        valider
    }

    fn fenetre_options(&mut self, ctx: &egui::Context) {
        if !self.options_ouvert {
            return;
        }

        let mut ouvert = true;
        egui::Window::new("Options")
            .collapsible(false)
            .resizable(false)
            .open(&mut ouvert)
            .show(ctx, |ui| {
                let r = &mut self.seance.reglages;
                ui.label("Champs demandés (et notés) :");
                ui.checkbox(&mut r.coordonnees, "Coordonnées (x, y)");
                ui.checkbox(&mut r.radians, "Radians");
                ui.checkbox(&mut r.sinus, "Sinus");
                ui.checkbox(&mut r.cosinus, "Cosinus");
                ui.checkbox(&mut r.tangente, "Tangente");
                ui.checkbox(&mut r.champ_degres, "Retrouver l’angle en degrés");

                ui.separator();
                ui.label("Affichage :");
                ui.checkbox(&mut self.afficher_axes, "Afficher les axes");
            });

        if !ouvert {
            self.options_ouvert = false;
        }
    }

    fn fenetre_confirmation(&mut self, ctx: &egui::Context) {
        let Some(c) = self.confirmation else {
            return;
        };

        let mut choix: Option<bool> = None;
        egui::Window::new(c.titre())
            .id(egui::Id::new("fenetre_confirmation"))
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(c.message());
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Annuler").clicked() {
                        choix = Some(false);
                    }
                    if ui.button("Confirmer").clicked() {
                        choix = Some(true);
                    }
                });
            });

        match choix {
            Some(true) => self.confirmer(),
            Some(false) => self.annuler_confirmation(),
            None => {}
        }
    }

    fn fenetre_annonce(&mut self, ctx: &egui::Context) {
        let maintenant = ctx.input(|i| i.time);
        let Some(annonce) = &mut self.annonce else {
            return;
        };

        let expire = *annonce.expire.get_or_insert(maintenant + DUREE_ANNONCE);
        if maintenant >= expire {
            self.annonce = None;
            return;
        }
        ctx.request_repaint_after(Duration::from_secs_f64(expire - maintenant));

        let couleur = if annonce.succes {
            VERT_COMPLETE
        } else {
            ROUGE_ERREUR
        };

        let mut fermer = false;
        egui::Window::new("annonce")
            .title_bar(false)
            .resizable(false)
            .anchor(Align2::CENTER_BOTTOM, [0.0, -16.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(couleur, egui::RichText::new(&annonce.titre).strong());
                    if ui.small_button("✕").clicked() {
                        fermer = true;
                    }
                });
                ui.label(&annonce.description);
            });

        if fermer {
            self.annonce = None;
        }
    }
}

/// Détail de la dernière correction (écarts : saisie vs attendu).
fn ui_bilan(ui: &mut egui::Ui, bilan: &Bilan) {
    let titre = format!(
        "Détail de la correction ({}/{})",
        bilan.score.justes, bilan.score.total
    );
    egui::CollapsingHeader::new(titre)
        .default_open(false)
        .show(ui, |ui| {
            if bilan.parfait() {
                ui.colored_label(VERT_COMPLETE, "Aucune erreur.");
                return;
            }
            egui::Grid::new("grille_bilan")
                .num_columns(4)
                .spacing([14.0, 4.0])
                .striped(true)
                .show(ui, |ui| {
                    for titre in ["Point", "Champ", "Ta réponse", "Attendu"] {
                        ui.strong(titre);
                    }
                    ui.end_row();

                    for e in &bilan.ecarts {
                        ui.label(e.angle.to_string());
                        ui.label(e.champ.libelle());
                        ui.colored_label(ROUGE_ERREUR, &e.saisie);
                        ui.monospace(&e.attendu);
                        ui.end_row();
                    }
                });
        });
}

/* ------------------------ Dessin partagé (entraînement + référence) ------------------------ */

/// Direction écran d’un angle (y vers le haut).
pub(super) fn direction(angle: Angle) -> Vec2 {
    let t = angle.radians();
    egui::vec2(t.cos() as f32, -(t.sin() as f32))
}

/// Cercle unité + axes optionnels.
pub(super) fn dessiner_cercle(
    painter: &egui::Painter,
    visuels: &egui::Visuals,
    centre: Pos2,
    rayon: f32,
    axes: bool,
) {
    let trait_cercle = Stroke::new(2.0, visuels.text_color());
    painter.circle_stroke(centre, rayon, trait_cercle);

    if axes {
        let trait_axe = Stroke::new(1.0, visuels.weak_text_color());
        let l = rayon * 1.18;
        painter.line_segment([centre - egui::vec2(l, 0.0), centre + egui::vec2(l, 0.0)], trait_axe);
        painter.line_segment([centre - egui::vec2(0.0, l), centre + egui::vec2(0.0, l)], trait_axe);

        let police = FontId::proportional(12.0);
        let c = visuels.weak_text_color();
        painter.text(centre + egui::vec2(l + 8.0, 0.0), Align2::LEFT_CENTER, "x", police.clone(), c);
        painter.text(centre - egui::vec2(0.0, l + 8.0), Align2::CENTER_BOTTOM, "y", police, c);
    }
}

/// Point du cercle le plus proche de `p` (dans le rayon de clic).
fn point_proche(centre: Pos2, rayon: f32, p: Pos2) -> Option<Angle> {
    ANGLES
        .iter()
        .map(|a| (*a, (centre + direction(*a) * rayon).distance(p)))
        .filter(|(_, d)| *d <= RAYON_CLIC)
        .min_by(|x, y| x.1.total_cmp(&y.1))
        .map(|(a, _)| a)
}

/* ------------------------ Petits widgets ------------------------ */

fn bouton(ui: &mut egui::Ui, label: &str, tip: &str) -> egui::Response {
    ui.add_sized([96.0, 30.0], egui::Button::new(label))
        .on_hover_text(tip)
}

/// Enter dans un champ (le champ perd le focus à l’appui).
fn entree_pressee(ui: &egui::Ui, r: &egui::Response) -> bool {
    r.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
}

fn indice(champ: Champ) -> &'static str {
    match champ {
        Champ::Radians => "ex: π/4",
        Champ::Tangente => "ex: √3/3 ou undefined",
        Champ::Point => "",
        _ => "ex: √2/2",
    }
}
