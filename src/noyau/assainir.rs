// src/noyau/assainir.rs
//
// Assainissement + validation, AVANT toute tokenisation.
//
// sanitize : blancs retirés, glyphes × ÷ normalisés, multiplication implicite
//            (chiffre suivi de '(' puis ')' suivi d’un chiffre, une passe chacun)
// validate : liste blanche de caractères (+ noms de la table SYMBOLES),
//            puis équilibre des parenthèses

use super::erreur::EvaluationError;
use super::symboles;

/// Caractères admis hors chiffres et noms.
const PONCTUATION: &[char] = &['+', '-', '*', '/', '(', ')', '.', ','];

pub fn sanitize(expression: &str) -> String {
    let normalise: String = expression
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '×' => '*',
            '÷' => '/',
            c => c,
        })
        .collect();

    // un chiffre en fin de nom (log10) n’est pas un nombre
    let s = inserer_mul(&normalise, |a, b, dans_nom| {
        a.is_ascii_digit() && !dans_nom && b == '('
    });
    inserer_mul(&s, |a, b, _| a == ')' && b.is_ascii_digit())
}

/// Insère '*' entre chaque paire adjacente (a, b) qui satisfait `implicite`.
/// Le troisième argument dit si `a` termine un nom `[a-zA-Z][a-zA-Z0-9_]*`.
fn inserer_mul(s: &str, implicite: impl Fn(char, char, bool) -> bool) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prec: Option<char> = None;
    let mut dans_nom = false;

    for c in s.chars() {
        if let Some(p) = prec {
            if implicite(p, c, dans_nom) {
                out.push('*');
            }
        }
        out.push(c);
        prec = Some(c);
        dans_nom = c.is_ascii_alphabetic()
            || (dans_nom && (c.is_ascii_alphanumeric() || c == '_'));
    }

    out
}

pub fn validate(s: &str) -> Result<(), EvaluationError> {
    verifier_caracteres(s)?;
    verifier_parentheses(s)
}

fn verifier_caracteres(s: &str) -> Result<(), EvaluationError> {
    if s.trim().is_empty() {
        return Err(EvaluationError::MalformedInput("expression vide".into()));
    }

    let chars: Vec<char> = s.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_ascii_digit() || c.is_whitespace() || PONCTUATION.contains(&c) {
            i += 1;
            continue;
        }

        // Nom : [a-z][a-z0-9_]* ; doit exister dans la liste blanche
        if c.is_ascii_alphabetic() {
            let debut = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let nom: String = chars[debut..i].iter().collect();
            if symboles::chercher(&nom).is_none() {
                return Err(EvaluationError::MalformedInput(format!(
                    "nom non autorisé : {nom}"
                )));
            }
            continue;
        }

        return Err(EvaluationError::MalformedInput(format!(
            "caractère non autorisé : '{c}'"
        )));
    }

    Ok(())
}

fn verifier_parentheses(s: &str) -> Result<(), EvaluationError> {
    let mut ouvertes: i64 = 0;
    for c in s.chars() {
        match c {
            '(' => ouvertes += 1,
            ')' => {
                ouvertes -= 1;
                if ouvertes < 0 {
                    return Err(EvaluationError::UnbalancedParentheses);
                }
            }
            _ => {}
        }
    }
    if ouvertes != 0 {
        return Err(EvaluationError::UnbalancedParentheses);
    }
    Ok(())
}
