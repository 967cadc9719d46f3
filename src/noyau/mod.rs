//! Noyau : évaluateur d’expressions assaini
//!
//! Organisation interne :
//! - assainir.rs : blancs, glyphes × ÷, multiplication implicite, liste blanche, parenthèses
//! - symboles.rs : tables fixes (constantes, fonctions, opérations nommées)
//! - jetons.rs   : tokenisation
//! - rpn.rs      : shunting-yard + évaluation sur pile
//! - eval.rs     : pipeline complet + appel par nom
//! - erreur.rs   : EvaluationError
//! - format.rs   : affichage d’un résultat

pub mod assainir;
pub mod erreur;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod rpn;
pub mod symboles;

#[cfg(test)]
mod tests_fuzz_safe;

#[cfg(test)]
mod tests_proprietes;

// API publique minimale
pub use assainir::{sanitize, validate};
pub use erreur::{ErrorKind, EvaluationError};
pub use eval::{evaluate, evaluate_detail, evaluate_named, DemarcheNoyau, Evaluation};
pub use format::{arrondir_decimales, format_result, pourcentage};
