//! src/app/historique.rs
//!
//! Historique des calculs : le plus récent en tête, taille bornée.
//! Une entrée a la forme "<expression> = <résultat>".

use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct StatsHistorique {
    pub total: usize,
    pub operations_distinctes: usize,
}

#[derive(Clone, Debug)]
pub struct Historique {
    calculs: VecDeque<String>,
    capacite: usize,
}

impl Historique {
    pub fn new(capacite: usize) -> Self {
        Self {
            calculs: VecDeque::with_capacity(capacite.min(64)),
            capacite: capacite.max(1),
        }
    }

    /// Ajoute en tête ; ignore les entrées vides ; évince la plus ancienne au-delà de la capacité.
    pub fn ajouter(&mut self, calcul: impl Into<String>) {
        let calcul = calcul.into();
        if calcul.trim().is_empty() {
            return;
        }
        self.calculs.push_front(calcul);
        self.calculs.truncate(self.capacite);
    }

    pub fn entrees(&self) -> impl Iterator<Item = &str> {
        self.calculs.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.calculs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calculs.is_empty()
    }

    pub fn vider(&mut self) {
        self.calculs.clear();
    }

    pub fn derniere(&self) -> Option<&str> {
        self.calculs.front().map(String::as_str)
    }

    pub fn recentes(&self, n: usize) -> Vec<&str> {
        self.entrees().take(n).collect()
    }

    /// Sous-chaîne, insensible à la casse.
    pub fn rechercher(&self, terme: &str) -> Vec<&str> {
        let terme = terme.to_lowercase();
        self.entrees()
            .filter(|c| c.to_lowercase().contains(&terme))
            .collect()
    }

    pub fn stats(&self) -> StatsHistorique {
        let mut genres: Vec<&'static str> = self.entrees().map(genre_operation).collect();
        genres.sort_unstable();
        genres.dedup();
        StatsHistorique {
            total: self.calculs.len(),
            operations_distinctes: genres.len(),
        }
    }

    /// Réduit la capacité (les plus anciennes entrées partent).
    pub fn set_capacite(&mut self, capacite: usize) {
        self.capacite = capacite.max(1);
        self.calculs.truncate(self.capacite);
    }
}

/// Premier opérateur reconnu dans le texte, dans cet ordre.
fn genre_operation(calcul: &str) -> &'static str {
    if calcul.contains('+') {
        "addition"
    } else if calcul.contains('-') {
        "soustraction"
    } else if calcul.contains('×') || calcul.contains('*') {
        "multiplication"
    } else if calcul.contains('÷') || calcul.contains('/') {
        "division"
    } else {
        "inconnue"
    }
}

/// "lhs = nombre" avec lhs non vide.
pub fn est_format_valide(calcul: &str) -> bool {
    let parts: Vec<&str> = calcul.split('=').collect();
    parts.len() == 2 && !parts[0].trim().is_empty() && parts[1].trim().parse::<f64>().is_ok()
}

pub fn extraire_resultat(calcul: &str) -> Option<f64> {
    match calcul.split('=').collect::<Vec<_>>().as_slice() {
        [_, rhs] => rhs.trim().parse().ok(),
        _ => None,
    }
}
