//! Noyau — évaluation (pipeline réel)
//!
//! sanitize -> validate -> tokenize -> RPN -> pile -> contrôle fini
//!
//! Aucune exécution dynamique : la grammaire est fermée (nombres, + - * / // **,
//! parenthèses, noms de la liste blanche).

use tracing::{debug, trace};

use super::assainir::{sanitize, validate};
use super::erreur::EvaluationError;
use super::jetons::{format_tokens, tokenize};
use super::rpn::{eval_rpn, to_rpn};
use super::symboles::{self, Calcul};

/// Démarche : ce que le pipeline a vu, pour affichage.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct DemarcheNoyau {
    pub assainie: String,
    pub jetons: String,
    pub rpn: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub valeur: f64,
    pub demarche: DemarcheNoyau,
}

/// API publique : évalue une expression arithmétique texte.
pub fn evaluate(expression: &str) -> Result<f64, EvaluationError> {
    evaluate_detail(expression).map(|e| e.valeur)
}

/// Comme `evaluate`, avec la démarche (forme assainie, jetons, RPN).
pub fn evaluate_detail(expression: &str) -> Result<Evaluation, EvaluationError> {
    let resultat = pipeline(expression);
    match &resultat {
        Ok(ev) => debug!(expression, valeur = ev.valeur, "évaluation réussie"),
        Err(e) => debug!(expression, erreur = %e, "évaluation refusée"),
    }
    resultat
}

fn pipeline(expression: &str) -> Result<Evaluation, EvaluationError> {
    // 1-3) blancs, glyphes, multiplication implicite
    let assainie = sanitize(expression);
    trace!(%assainie, "expression assainie");

    // 4) liste blanche + parenthèses (avant toute tentative d’évaluation)
    validate(&assainie)?;

    // 5) jetons -> RPN -> pile
    let jetons = tokenize(&assainie)?;
    let rpn = to_rpn(&jetons)?;
    let valeur = eval_rpn(&rpn)?;

    // 6) NaN / ±∞ refusés
    let valeur = fini(valeur)?;

    Ok(Evaluation {
        valeur,
        demarche: DemarcheNoyau {
            jetons: format_tokens(&jetons),
            rpn: format_tokens(&rpn),
            assainie,
        },
    })
}

/// Appel direct par nom (sans parseur) : trig en degrés, log base 10, ln naturel.
pub fn evaluate_named(
    operation: &str,
    operand1: f64,
    operand2: Option<f64>,
) -> Result<f64, EvaluationError> {
    let calcul = symboles::operation(operation)
        .ok_or_else(|| EvaluationError::UnknownOperation(operation.to_string()))?;

    let valeur = match (calcul, operand2) {
        (Calcul::Unaire(f), None) => f(operand1)?,
        (Calcul::Binaire(f), Some(b)) => f(operand1, b)?,
        (Calcul::Unaire(_), Some(_)) => {
            return Err(EvaluationError::echec(format!(
                "{operation}() attend 1 argument, reçu 2"
            )))
        }
        (Calcul::Binaire(_), None) => {
            return Err(EvaluationError::echec(format!(
                "{operation}() attend 2 arguments, reçu 1"
            )))
        }
    };

    let r = fini(valeur);
    debug!(operation, operand1, ?operand2, resultat = ?r, "opération nommée");
    r
}

fn fini(v: f64) -> Result<f64, EvaluationError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(EvaluationError::NonFiniteResult)
    }
}

#[cfg(test)]
mod tests {
    use super::{evaluate, evaluate_detail, evaluate_named};
    use crate::noyau::erreur::ErrorKind;

    fn ok(s: &str) -> f64 {
        evaluate(s).unwrap_or_else(|e| panic!("evaluate({s:?}) erreur: {e}"))
    }

    fn ko(s: &str) -> ErrorKind {
        match evaluate(s) {
            Ok(v) => panic!("evaluate({s:?}) aurait dû échouer, a donné {v}"),
            Err(e) => e.kind(),
        }
    }

    fn proche(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-12, "{a} != {b}");
    }

    // --- Arithmétique de base ---

    #[test]
    fn precedence_standard() {
        assert_eq!(ok("2+3*4"), 14.0);
        assert_eq!(ok("(2+3)*4"), 20.0);
        assert_eq!(ok("10-4-3"), 3.0);
        assert_eq!(ok("2*3/4"), 1.5);
        assert_eq!(ok(" 1.5 + .5 "), 2.0);
    }

    #[test]
    fn parentheses() {
        assert_eq!(ok("(1+2)"), 3.0);
        assert_eq!(ko("((1+2)"), ErrorKind::UnbalancedParentheses);
        assert_eq!(ko("1+2)"), ErrorKind::UnbalancedParentheses);
    }

    #[test]
    fn multiplication_implicite() {
        assert_eq!(ok("2(3)"), 6.0);
        assert_eq!(ok("(3)2"), 6.0);
        assert_eq!(ok("2(1+1)*3"), 12.0);
        let d = evaluate_detail("2(3)").unwrap();
        assert_eq!(d.demarche.assainie, "2*(3)");
    }

    #[test]
    fn glyphes_affichage() {
        assert_eq!(ok("2×3÷4"), 1.5);
        assert_eq!(ok("8 ÷ 2 × 2"), 8.0);
    }

    // --- Classification ---

    #[test]
    fn division_par_zero_est_un_echec_de_calcul() {
        assert_eq!(ko("1/0"), ErrorKind::EvaluationFailure);
        assert_eq!(ko("0/0"), ErrorKind::EvaluationFailure);
        assert_eq!(ko("1/(2-2)"), ErrorKind::EvaluationFailure);
    }

    #[test]
    fn resultat_non_fini() {
        assert_eq!(ko("pow(10,400)"), ErrorKind::NonFiniteResult);
        assert_eq!(ko("10**400"), ErrorKind::NonFiniteResult);
        let grand = format!("{}*10", "9".repeat(308));
        assert_eq!(ko(&grand), ErrorKind::NonFiniteResult);
    }

    #[test]
    fn entree_malformee() {
        assert_eq!(ko("x+1"), ErrorKind::MalformedInput);
        assert_eq!(ko(""), ErrorKind::MalformedInput);
        assert_eq!(ko("2^3"), ErrorKind::MalformedInput);
        assert_eq!(ko("__import__('os')"), ErrorKind::MalformedInput);
        assert_eq!(ko("open(1)"), ErrorKind::MalformedInput);
    }

    #[test]
    fn erreurs_de_calcul_diverses() {
        assert_eq!(ko("2+"), ErrorKind::EvaluationFailure);
        assert_eq!(ko("1.2.3"), ErrorKind::EvaluationFailure);
        assert_eq!(ko("sqrt(-1)"), ErrorKind::EvaluationFailure);
        assert_eq!(ko("log(0)"), ErrorKind::EvaluationFailure);
        assert_eq!(ko("(-8)**(1/3)"), ErrorKind::EvaluationFailure);
    }

    // --- Liste blanche de noms ---

    #[test]
    fn fonctions_et_constantes() {
        assert_eq!(ok("sqrt(16)"), 4.0);
        proche(ok("2*pi"), 2.0 * std::f64::consts::PI);
        proche(ok("sin(pi/2)"), 1.0);
        proche(ok("cos(0)"), 1.0);
        proche(ok("log(e)"), 1.0);
        proche(ok("log10(1000)"), 3.0);
        assert_eq!(ok("pow(2,10)"), 1024.0);
        assert_eq!(ok("abs(-3)"), 3.0);
        assert_eq!(ok("round(2.675,2)"), 2.67);
        proche(ok("sqrt(16)+pi-pi"), 4.0);
    }

    #[test]
    fn chaque_symbole_appelable_depuis_le_texte() {
        use crate::noyau::symboles::{Symbole, SYMBOLES};

        for (nom, symbole) in SYMBOLES {
            match symbole {
                Symbole::Constante(v) => assert_eq!(ok(nom), *v),
                Symbole::Fonction(f) => {
                    for n in f.arite_min..=f.arite_max {
                        let args = vec!["2"; n].join(",");
                        let expr = format!("{nom}({args})");
                        let attendu = f.appeler(&vec![2.0; n]).unwrap();
                        assert_eq!(ok(&expr), attendu, "{expr}");
                        // même chose précédé d’un facteur
                        assert_eq!(ok(&format!("3*{expr}")), 3.0 * attendu, "3*{expr}");
                    }
                }
            }
        }
    }

    #[test]
    fn operateurs_etendus() {
        assert_eq!(ok("-2**2"), -4.0);
        assert_eq!(ok("2**-1"), 0.5);
        assert_eq!(ok("7//2"), 3.0);
        assert_eq!(ok("2*-3"), -6.0);
    }

    #[test]
    fn idempotence() {
        let a = ok("sqrt(2)*3/7+1");
        let b = ok("sqrt(2)*3/7+1");
        assert_eq!(a.to_bits(), b.to_bits());
    }

    // --- Opérations nommées ---

    #[test]
    fn named_sqrt() {
        assert_eq!(evaluate_named("sqrt", 16.0, None).unwrap(), 4.0);
        assert_eq!(
            evaluate_named("sqrt", -1.0, None).unwrap_err().kind(),
            ErrorKind::EvaluationFailure
        );
    }

    #[test]
    fn named_inconnue() {
        let e = evaluate_named("bogus", 1.0, None).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::UnknownOperation);
        assert_eq!(e.to_string(), "opération inconnue : bogus");
    }

    #[test]
    fn named_degres_et_logs() {
        proche(evaluate_named("sin", 30.0, None).unwrap(), 0.5);
        proche(evaluate_named("cos", 60.0, None).unwrap(), 0.5);
        proche(evaluate_named("tan", 45.0, None).unwrap(), 1.0);
        proche(evaluate_named("log", 100.0, None).unwrap(), 2.0);
        proche(evaluate_named("ln", std::f64::consts::E, None).unwrap(), 1.0);
        assert!(evaluate_named("ln", 0.0, None).is_err());
    }

    #[test]
    fn named_pow_et_arite() {
        assert_eq!(evaluate_named("pow", 2.0, Some(3.0)).unwrap(), 8.0);
        assert_eq!(
            evaluate_named("pow", -8.0, Some(0.5)).unwrap_err().kind(),
            ErrorKind::EvaluationFailure
        );
        assert_eq!(
            evaluate_named("pow", 10.0, Some(400.0)).unwrap_err().kind(),
            ErrorKind::NonFiniteResult
        );
        assert_eq!(
            evaluate_named("pow", 2.0, None).unwrap_err().kind(),
            ErrorKind::EvaluationFailure
        );
        assert_eq!(
            evaluate_named("sqrt", 4.0, Some(1.0)).unwrap_err().kind(),
            ErrorKind::EvaluationFailure
        );
    }
}
