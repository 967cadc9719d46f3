//! src/app/reglages.rs
//!
//! Réglages de l’interface : valeurs par défaut + bornes (anti-abus).

/// Taille d’historique par défaut.
pub const HISTORIQUE_DEFAUT: usize = 50;

/// Garde-fou : l’historique reste petit.
pub const HISTORIQUE_MAX: usize = 500;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reglages {
    pub historique_max: usize,
    pub afficher_demarche: bool,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            historique_max: HISTORIQUE_DEFAUT,
            afficher_demarche: true,
        }
    }
}

impl Reglages {
    pub fn set_historique_max(&mut self, n: usize) {
        self.historique_max = n.clamp(1, HISTORIQUE_MAX);
    }
}
