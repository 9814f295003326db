// src/app.rs
//
// Cercle trigo : module App (racine)
// ----------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs + vue_reference.rs)
// - Ré-exporter AppCercle (pour main.rs: use crate::app::AppCercle;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)

pub mod etat;
pub mod vue;
pub mod vue_reference;

pub use etat::AppCercle;

use eframe::egui;

use etat::Page;

impl eframe::App for AppCercle {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ESC = fermer dialogues / confirmations (jamais d’effacement)
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.fermer_dialogues();
        }

        // en-tête : titre + thème clair/sombre
        egui::TopBottomPanel::top("entete").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("π  Cercle trigo");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    egui::widgets::global_theme_preference_switch(ui);
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.page {
            Page::Pratique => self.ui(ui),
            Page::Reference => self.ui_reference(ui),
        });

        // fenêtres flottantes après le panneau central
        self.fenetres(ctx);
    }
}
