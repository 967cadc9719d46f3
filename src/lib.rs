//! Calculatrice sûre : évaluation d’expressions arithmétiques fournies par l’utilisateur,
//! sans exécution dynamique.
//!
//! ```
//! use calculatrice_sure::{evaluate, evaluate_named, ErrorKind};
//!
//! assert_eq!(evaluate("2+3*4").unwrap(), 14.0);
//! assert_eq!(evaluate("2×3÷4").unwrap(), 1.5);
//! assert_eq!(evaluate("((1+2)").unwrap_err().kind(), ErrorKind::UnbalancedParentheses);
//! assert_eq!(evaluate_named("sqrt", 16.0, None).unwrap(), 4.0);
//! ```

pub mod noyau;

pub use noyau::{
    arrondir_decimales, evaluate, evaluate_detail, evaluate_named, format_result, pourcentage,
    sanitize, validate, ErrorKind, EvaluationError,
};
