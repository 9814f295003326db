// src/app/vue_reference.rs
//
// Vue (UI egui) : page de référence
// ---------------------------------
// - Cercle annoté (degrés + radians), affichage optionnel
// - Table des 16 angles (valeurs canoniques)
// - Notions clés + astuces de mémorisation

use eframe::egui;
use egui::{Align2, FontId, Sense, Stroke};

use super::etat::AppCercle;
use super::vue::{dessiner_cercle, direction};
use crate::noyau::reference::{
    table_reference, LigneReference, ASTUCES, INTRODUCTION, NOTIONS_CLES,
};

impl AppCercle {
    pub fn ui_reference(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        // recalculée à chaque frame : 16 lignes, formatage pur
        let table = table_reference();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("← Retour à l’entraînement").clicked() {
                        self.retour_pratique();
                    }
                    ui.checkbox(&mut self.cercle_reference, "Afficher le cercle");
                });

                ui.heading("Référence : cercle trigonométrique");
                ui.label(INTRODUCTION);
                ui.add_space(8.0);

                if self.cercle_reference {
                    ui.vertical_centered(|ui| cercle_annote(ui, &table, self.afficher_axes));
                    ui.add_space(8.0);
                }

                ui.separator();
                ui_table(ui, &table);

                ui.add_space(8.0);
                ui.separator();
                ui_notions(ui);
            });
    }
}

fn cercle_annote(ui: &mut egui::Ui, table: &[LigneReference], axes: bool) {
    let cote = ui.available_width().clamp(260.0, 560.0);
    let (resp, painter) = ui.allocate_painter(egui::vec2(cote, cote), Sense::hover());

    let centre = resp.rect.center();
    let rayon = cote * 0.32;
    dessiner_cercle(&painter, ui.visuals(), centre, rayon, axes);

    let texte = ui.visuals().text_color();
    let faible = ui.visuals().weak_text_color();
    for ligne in table {
        let d = direction(ligne.angle);
        painter.circle_filled(centre + d * rayon, 4.0, texte);

        let etiquette = centre + d * (rayon + 34.0);
        painter.text(
            etiquette,
            Align2::CENTER_BOTTOM,
            ligne.angle.to_string(),
            FontId::proportional(12.0),
            texte,
        );
        painter.text(
            etiquette,
            Align2::CENTER_TOP,
            &ligne.radians,
            FontId::proportional(11.0),
            faible,
        );
    }

    // rayon de référence vers 0°
    painter.line_segment(
        [centre, centre + egui::vec2(rayon, 0.0)],
        Stroke::new(1.0, faible),
    );
}

fn ui_table(ui: &mut egui::Ui, table: &[LigneReference]) {
    ui.strong("Valeurs remarquables");
    ui.add_space(4.0);

    egui::Grid::new("table_reference")
        .num_columns(6)
        .spacing([18.0, 4.0])
        .striped(true)
        .show(ui, |ui| {
            for titre in ["Angle", "Radians", "(x, y)", "sin", "cos", "tan"] {
                ui.strong(titre);
            }
            ui.end_row();

            for l in table {
                ui.label(l.angle.to_string());
                ui.monospace(&l.radians);
                ui.monospace(format!("({}, {})", l.x, l.y));
                ui.monospace(&l.sinus);
                ui.monospace(&l.cosinus);
                ui.monospace(&l.tangente);
                ui.end_row();
            }
        });
}

fn ui_notions(ui: &mut egui::Ui) {
    ui.strong("Notions clés");
    for (titre, puces) in NOTIONS_CLES {
        egui::CollapsingHeader::new(titre)
            .default_open(true)
            .show(ui, |ui| {
                for p in puces {
                    ui.label(format!("• {p}"));
                }
            });
    }

    ui.add_space(8.0);
    ui.strong("Astuces de mémorisation");
    for a in ASTUCES {
        ui.label(format!("• {a}"));
    }
}
