// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis évaluer la RPN sur une pile (itératif, sans récursion)
//
// Règles:
// - Ident(name):
//    - constante (pi, e) => atome
//    - fonction => doit être suivie de '(' ; sort en RPN comme Appel(name, nb_args)
// - '-' / '+' quand on n’attend PAS une valeur => préfixe (Neg / ignoré)
// - Précédences : + - (1) < * / // (2) < Neg (3) < ** (4, droite)
//   donc -2**2 = -(2**2) et 2**-1 = 0.5

use super::erreur::EvaluationError;
use super::jetons::Tok;
use super::symboles::{self, puissance, Symbole};

/// Garde-fou : profondeur max de parenthèses imbriquées.
pub const MAX_IMBRICATION: usize = 200;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash | Tok::SlashSlash => 2,
        Tok::Neg => 3,
        Tok::StarStar => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::StarStar)
}

fn syntaxe(detail: &str) -> EvaluationError {
    EvaluationError::echec(format!("syntaxe invalide ({detail})"))
}

fn est_fonction(name: &str) -> bool {
    matches!(symboles::chercher(name), Some(Symbole::Fonction(_)))
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("pow"), LPar, Num(2), Virgule, Minus, Num(1), RPar]
///   rpn:    [Num(2), Num(1), Neg, Appel("pow", 2)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, EvaluationError> {
    if tokens.is_empty() {
        return Err(syntaxe("expression vide"));
    }

    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Tok> = Vec::new();

    // Une entrée par '(' ouverte : Some(nb_args) si appel de fonction, None sinon.
    let mut groupes: Vec<Option<usize>> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    let mut prev_was_value = false;
    let mut prev_fonction = false;
    let mut prev_lpar = false;

    for tok in tokens.iter().cloned() {
        if prev_fonction && tok != Tok::LPar {
            return Err(syntaxe("fonction sans parenthèse"));
        }
        let etait_lpar = prev_lpar;
        prev_lpar = false;

        match tok {
            Tok::Num(_) => {
                if prev_was_value {
                    return Err(syntaxe("deux valeurs sans opérateur"));
                }
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if prev_was_value {
                    return Err(syntaxe("deux valeurs sans opérateur"));
                }
                if est_fonction(&name) {
                    // elle sortira après sa parenthèse fermante
                    ops.push(Tok::Ident(name));
                    prev_fonction = true;
                    prev_was_value = false;
                } else {
                    out.push(Tok::Ident(name));
                    prev_was_value = true;
                }
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(syntaxe("valeur suivie de '('"));
                }
                groupes.push(prev_fonction.then_some(1));
                if groupes.len() > MAX_IMBRICATION {
                    return Err(EvaluationError::echec(
                        "trop de parenthèses imbriquées",
                    ));
                }
                ops.push(Tok::LPar);
                prev_fonction = false;
                prev_lpar = true;
                prev_was_value = false;
            }

            Tok::Virgule => {
                if !prev_was_value {
                    return Err(syntaxe("argument manquant"));
                }
                match groupes.last_mut() {
                    Some(Some(n)) => *n += 1,
                    _ => return Err(syntaxe("virgule hors d’un appel")),
                }
                depiler_jusqu_a_lpar(&mut ops, &mut out);
                prev_was_value = false;
            }

            Tok::RPar => {
                let groupe = groupes.pop().ok_or(EvaluationError::UnbalancedParentheses)?;

                let nb_args = match groupe {
                    Some(_) if etait_lpar => 0,
                    Some(n) if prev_was_value => n,
                    None if prev_was_value => 0,
                    _ => return Err(syntaxe("expression manquante avant ')'")),
                };

                depiler_jusqu_a_lpar(&mut ops, &mut out);
                ops.pop(); // '('

                if groupe.is_some() {
                    match ops.pop() {
                        Some(Tok::Ident(name)) => out.push(Tok::Appel(name, nb_args)),
                        _ => return Err(syntaxe("appel sans fonction")),
                    }
                }

                prev_was_value = true;
            }

            Tok::Plus | Tok::Minus if !prev_was_value => {
                // préfixe : '+' est l’identité, '-' devient Neg (ne dépile rien)
                if tok == Tok::Minus {
                    ops.push(Tok::Neg);
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::SlashSlash | Tok::StarStar => {
                if !prev_was_value {
                    return Err(syntaxe("opérateur sans opérande gauche"));
                }

                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar | Tok::Ident(_)) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Neg | Tok::Appel(..) => return Err(syntaxe("jeton interne en entrée")),
        }
    }

    if prev_fonction || !prev_was_value {
        return Err(syntaxe("expression incomplète"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(EvaluationError::UnbalancedParentheses);
        }
        out.push(op);
    }

    Ok(out)
}

fn depiler_jusqu_a_lpar(ops: &mut Vec<Tok>, out: &mut Vec<Tok>) {
    while let Some(top) = ops.last() {
        if matches!(top, Tok::LPar) {
            break;
        }
        if let Some(op) = ops.pop() {
            out.push(op);
        }
    }
}

/// Évalue une RPN produite par `to_rpn`.
pub fn eval_rpn(rpn: &[Tok]) -> Result<f64, EvaluationError> {
    let mut st: Vec<f64> = Vec::with_capacity(rpn.len());

    let invalide = || EvaluationError::echec("expression invalide");

    for tok in rpn {
        match tok {
            Tok::Num(n) => st.push(*n),

            Tok::Ident(name) => match symboles::chercher(name) {
                Some(Symbole::Constante(v)) => st.push(v),
                _ => return Err(EvaluationError::MalformedInput(format!(
                    "nom non autorisé : {name}"
                ))),
            },

            Tok::Neg => {
                let x = st.pop().ok_or_else(invalide)?;
                st.push(-x);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::SlashSlash | Tok::StarStar => {
                let b = st.pop().ok_or_else(invalide)?;
                let a = st.pop().ok_or_else(invalide)?;
                st.push(binaire(tok, a, b)?);
            }

            Tok::Appel(name, n) => {
                let Some(Symbole::Fonction(f)) = symboles::chercher(name) else {
                    return Err(EvaluationError::MalformedInput(format!(
                        "fonction non autorisée : {name}"
                    )));
                };
                if st.len() < *n {
                    return Err(invalide());
                }
                let args = st.split_off(st.len() - n);
                st.push(f.appeler(&args)?);
            }

            Tok::LPar | Tok::RPar | Tok::Virgule => {
                return Err(EvaluationError::echec("parenthèse inattendue en RPN"))
            }
        }
    }

    if st.len() != 1 {
        return Err(invalide());
    }
    st.pop().ok_or_else(invalide)
}

fn binaire(op: &Tok, a: f64, b: f64) -> Result<f64, EvaluationError> {
    match op {
        Tok::Plus => Ok(a + b),
        Tok::Minus => Ok(a - b),
        Tok::Star => Ok(a * b),
        Tok::Slash => {
            if b == 0.0 {
                return Err(EvaluationError::echec("division par zéro"));
            }
            Ok(a / b)
        }
        Tok::SlashSlash => {
            if b == 0.0 {
                return Err(EvaluationError::echec("division entière par zéro"));
            }
            Ok((a / b).floor())
        }
        Tok::StarStar => puissance(a, b),
        _ => Err(EvaluationError::echec("opérateur inconnu")),
    }
}
