// src/noyau/erreur.rs

use thiserror::Error;

/// Erreurs de l’évaluateur.
///
/// Le message (`Display`) est destiné à être affiché tel quel à l’utilisateur.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// Caractère ou nom hors de la liste blanche (ou entrée vide).
    #[error("entrée invalide : {0}")]
    MalformedInput(String),

    /// Compteur de parenthèses négatif sur un préfixe, ou non nul à la fin.
    #[error("parenthèses non équilibrées")]
    UnbalancedParentheses,

    /// Nom absent de la table des opérations nommées.
    #[error("opération inconnue : {0}")]
    UnknownOperation(String),

    /// NaN ou ±∞.
    #[error("erreur mathématique : résultat non fini")]
    NonFiniteResult,

    /// Tout le reste (syntaxe, division par zéro, domaine, arité...).
    #[error("erreur de calcul : {0}")]
    EvaluationFailure(String),
}

/// Étiquette stable, sans message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedInput,
    UnbalancedParentheses,
    UnknownOperation,
    NonFiniteResult,
    EvaluationFailure,
}

impl EvaluationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvaluationError::MalformedInput(_) => ErrorKind::MalformedInput,
            EvaluationError::UnbalancedParentheses => ErrorKind::UnbalancedParentheses,
            EvaluationError::UnknownOperation(_) => ErrorKind::UnknownOperation,
            EvaluationError::NonFiniteResult => ErrorKind::NonFiniteResult,
            EvaluationError::EvaluationFailure(_) => ErrorKind::EvaluationFailure,
        }
    }

    pub(crate) fn echec(cause: impl Into<String>) -> Self {
        EvaluationError::EvaluationFailure(cause.into())
    }

    pub(crate) fn domaine() -> Self {
        Self::echec("hors du domaine mathématique")
    }
}
