//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat formaté, erreur,
//! démarche, historique) et offrir des opérations simples (C/AC/historique)
//! sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (le noyau ne fournit que le type de la démarche).
//! - Actions déterministes, sans effet de bord caché.

use calculatrice_sure::noyau::DemarcheNoyau;

use super::historique::Historique;
use super::reglages::Reglages;

/// Démarche affichée : celle que rend le noyau, telle quelle.
pub type Demarche = DemarcheNoyau;

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String, // résultat formaté (format_result)
    pub erreur: String,   // message d’erreur, affiché tel quel

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- historique ---
    pub historique: Historique,
    pub recherche: String,

    // --- paramètres ---
    pub reglages: Reglages,

    // --- UX ---
    // Après “=”, la prochaine saisie de chiffre remplace l’entrée.
    pub nouveau_calcul: bool,
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        let reglages = Reglages::default();
        Self {
            entree: String::new(),
            resultat: String::new(),
            erreur: String::new(),
            demarche: Demarche::default(),
            historique: Historique::new(reglages.historique_max),
            recherche: String::new(),
            reglages,
            nouveau_calcul: false,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : entrée + résultat + erreur + démarche (l’historique reste).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.resultat.clear();
        self.erreur.clear();
        self.demarche = Demarche::default();
        self.nouveau_calcul = false;
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée.
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.nouveau_calcul = false;
        self.focus_entree = true;
    }

    /// Saisie d’un chiffre (ou '.') : remplace l’entrée juste après un résultat.
    pub fn saisir_chiffre(&mut self, chiffre: &str) {
        if self.nouveau_calcul {
            self.entree.clear();
            self.nouveau_calcul = false;
        }
        self.entree.push_str(chiffre);
        self.focus_entree = true;
    }

    /// Ans : insère une valeur. Après un opérande, un '×' est placé devant
    /// (12 puis Ans donne "12 × 4", jamais "124").
    pub fn inserer_valeur(&mut self, valeur: &str) {
        let apres_operande = self
            .entree
            .trim_end()
            .ends_with(|c: char| c.is_ascii_alphanumeric() || c == '.' || c == ')');
        if !self.nouveau_calcul && apres_operande {
            self.saisir_operateur("×");
        }
        self.saisir_chiffre(valeur);
    }

    /// Saisie d’un opérateur : continue le calcul à partir du résultat affiché.
    pub fn saisir_operateur(&mut self, op: &str) {
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }
        if !self.entree.is_empty() {
            self.entree.push(' ');
        }
        self.entree.push_str(op);
        self.entree.push(' ');
        self.nouveau_calcul = false;
        self.focus_entree = true;
    }

    /// Utilitaire : placer une erreur.
    ///
    /// Choix UX :
    /// - On CONSERVE `resultat` (dernier résultat) pour ne pas “effacer l’écran” sur une faute.
    /// - La démarche est effacée (non fiable si l’évaluation échoue).
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.demarche = Demarche::default();
        self.nouveau_calcul = true;
        self.focus_entree = true;
    }

    /// Utilitaire : déposer un résultat.
    ///
    /// - `calcul` part dans l’historique ("expr = résultat")
    /// - `entree_suivante` remplace l’entrée (valeur brute, ré-évaluable)
    pub fn set_resultat(
        &mut self,
        calcul: String,
        resultat: String,
        entree_suivante: String,
        demarche: Demarche,
    ) {
        self.erreur.clear();
        self.historique.ajouter(calcul);
        self.resultat = resultat;
        self.entree = entree_suivante;
        self.demarche = demarche;
        self.nouveau_calcul = true;
        self.focus_entree = true;
    }

    pub fn vider_historique(&mut self) {
        self.historique.vider();
        self.recherche.clear();
    }

    /// Garde-fou : borne la taille de l’historique.
    pub fn set_historique_max(&mut self, n: usize) {
        self.reglages.set_historique_max(n);
        self.historique.set_capacite(self.reglages.historique_max);
    }
}
