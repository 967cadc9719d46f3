// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// - Clavier : Enter évalue (quand le champ est focus)
// - Pavé : chiffres, opérateurs × ÷ (glyphes normalisés par le noyau), parenthèses
// - Rangée avancée : opérations nommées appliquées à la valeur courante (degrés)
// - Historique : recherche + effacement

use eframe::egui;
use tracing::info;

use calculatrice_sure::noyau::{
    evaluate, evaluate_detail, evaluate_named, format_result, pourcentage,
};

use super::etat::{AppCalc, Demarche};
use super::historique::{est_format_valide, extraire_resultat};

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice sûre");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultat(ui);

                if self.reglages.afficher_demarche {
                    ui.add_space(8.0);
                    self.ui_demarche(ui);
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_historique(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Entrée :");

        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 2(3+4) ÷ 7, sqrt(16)+pi, pow(2,10)")
                .id_salt("entree_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }
        if resp.changed() {
            self.nouveau_calcul = false;
        }

        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.eval_via_noyau();
        }

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            if Self::bouton(ui, "C", "Efface seulement l’entrée") {
                self.clear_entree();
            }
            if Self::bouton(ui, "AC", "Efface entrée + résultat") {
                self.reset_total();
            }
            if Self::bouton(ui, "Ans", "Insère le dernier résultat") {
                if let Some(v) = self.historique.derniere().and_then(extraire_resultat) {
                    self.inserer_valeur(&brut(v));
                }
            }
            ui.separator();
            ui.checkbox(&mut self.reglages.afficher_demarche, "Démarche");
        });

        ui.add_space(8.0);

        // Opérations nommées (valeur courante)
        ui.horizontal_wrapped(|ui| {
            for (label, op, second) in [
                ("√", "sqrt", None),
                ("x²", "pow", Some(2.0)),
                ("sin°", "sin", None),
                ("cos°", "cos", None),
                ("tan°", "tan", None),
                ("log", "log", None),
                ("ln", "ln", None),
            ] {
                if Self::bouton(ui, label, op) {
                    self.appliquer_operation(op, second);
                }
            }
            if Self::bouton(ui, "%", "valeur / 100") {
                self.appliquer_pourcentage();
            }
        });

        ui.add_space(8.0);

        self.ui_pave_numerique(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in [
                    ["7", "8", "9", "÷"],
                    ["4", "5", "6", "×"],
                    ["1", "2", "3", "-"],
                    ["0", ".", "(", "+"],
                ] {
                    for touche in ligne {
                        if Self::bouton(ui, touche, "") {
                            self.touche(touche);
                        }
                    }
                    ui.end_row();
                }

                if Self::bouton(ui, ")", "") {
                    self.touche(")");
                }
                ui.label("");
                ui.label("");
                let eq = ui.add_sized([56.0, 30.0], egui::Button::new("="));
                if eq.clicked() {
                    self.eval_via_noyau();
                }
                ui.end_row();
            });
    }

    fn touche(&mut self, touche: &str) {
        match touche {
            "+" | "-" | "×" | "÷" => self.saisir_operateur(touche),
            _ => self.saisir_chiffre(touche),
        }
    }

    fn ui_resultat(&mut self, ui: &mut egui::Ui) {
        ui.label("Résultat :");
        Self::champ_monospace(ui, "resultat_out", &self.resultat, 1);
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Assainie", "demarche_assainie", &self.demarche.assainie);
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
            });
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.strong("Historique");
            let stats = self.historique.stats();
            ui.weak(format!(
                "{} calcul(s), {} type(s)",
                stats.total, stats.operations_distinctes
            ));
            if Self::bouton(ui, "Vider", "Efface tout l’historique") {
                self.vider_historique();
            }
            let mut n = self.reglages.historique_max as u32;
            let resp = ui.add(
                egui::DragValue::new(&mut n)
                    .speed(1)
                    .range(1..=500)
                    .suffix(" max"),
            );
            if resp.changed() {
                self.set_historique_max(n as usize);
            }
        });

        if self.historique.is_empty() {
            ui.weak("aucun calcul");
            return;
        }

        ui.add(
            egui::TextEdit::singleline(&mut self.recherche)
                .desired_width(ui.available_width())
                .hint_text("Rechercher…"),
        );

        let entrees: Vec<String> = if self.recherche.trim().is_empty() {
            self.historique
                .recentes(self.historique.len())
                .into_iter()
                .map(str::to_string)
                .collect()
        } else {
            self.historique
                .rechercher(self.recherche.trim())
                .into_iter()
                .map(str::to_string)
                .collect()
        };

        for (i, calcul) in entrees.iter().enumerate() {
            ui.push_id(i, |ui| {
                // clic : reprendre l’expression
                let lien = ui.link(egui::RichText::new(calcul).monospace());
                if lien.clicked() && est_format_valide(calcul) {
                    if let Some((expr, _)) = calcul.split_once(" = ") {
                        self.entree = expr.to_string();
                        self.nouveau_calcul = false;
                        self.focus_entree = true;
                    }
                }
            });
        }
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 1);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton(ui: &mut egui::Ui, label: &str, tip: &str) -> bool {
        let resp = ui.add_sized([56.0, 30.0], egui::Button::new(label));
        let resp = if tip.is_empty() { resp } else { resp.on_hover_text(tip) };
        resp.clicked()
    }

    /// Évalue l’entrée via le noyau, puis dépose résultat/démarche/historique dans l’état UI.
    fn eval_via_noyau(&mut self) {
        let s = self.entree.trim().to_string();
        if s.is_empty() {
            self.set_erreur("Entrée vide");
            return;
        }

        match evaluate_detail(&s) {
            Ok(ev) => {
                let affiche = format_result(ev.valeur);
                self.set_resultat(
                    format!("{s} = {affiche}"),
                    affiche,
                    brut(ev.valeur),
                    ev.demarche,
                );
            }
            Err(e) => self.set_erreur(e.to_string()),
        }
    }

    /// Opération nommée sur la valeur courante (l’entrée est d’abord évaluée).
    fn appliquer_operation(&mut self, op: &str, second: Option<f64>) {
        let s = self.entree.trim().to_string();
        if s.is_empty() {
            self.set_erreur("Entrée vide");
            return;
        }

        let r = evaluate(&s).and_then(|v| evaluate_named(op, v, second).map(|r| (v, r)));
        match r {
            Ok((v, r)) => {
                let affiche = format_result(r);
                let calcul = match second {
                    Some(b) => format!("{op}({}, {}) = {affiche}", brut(v), brut(b)),
                    None => format!("{op}({}) = {affiche}", brut(v)),
                };
                info!(%calcul, "opération nommée");
                self.set_resultat(calcul, affiche, brut(r), Demarche::default());
            }
            Err(e) => self.set_erreur(e.to_string()),
        }
    }

    /// % : la valeur courante divisée par 100 (historique ré-évaluable : "v/100 = r").
    fn appliquer_pourcentage(&mut self) {
        let s = self.entree.trim().to_string();
        if s.is_empty() {
            self.set_erreur("Entrée vide");
            return;
        }

        match evaluate(&s) {
            Ok(v) => {
                let r = pourcentage(v, 1.0);
                let affiche = format_result(r);
                self.set_resultat(
                    format!("{}/100 = {affiche}", brut(v)),
                    affiche,
                    brut(r),
                    Demarche::default(),
                );
            }
            Err(e) => self.set_erreur(e.to_string()),
        }
    }
}

/// Valeur ré-évaluable par le noyau (pas de séparateurs, pas d’exposant).
fn brut(v: f64) -> String {
    format!("{v}")
}
