// src/noyau/jetons.rs

use super::erreur::EvaluationError;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Constante ou fonction de la liste blanche (validée en amont)
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    SlashSlash, // division entière (plancher)
    StarStar,   // puissance

    LPar,
    RPar,
    Virgule,

    // Produits par rpn.rs seulement
    Neg,
    Appel(String, usize),
}

/// Tokenize une expression DÉJÀ assainie et validée.
/// Supporte:
/// - nombres décimaux (12, 1.5, .5, 5.)
/// - opérateurs + - * / // **
/// - parenthèses ( ) et virgule (arguments)
/// - identifiants [a-zA-Z][a-zA-Z0-9_]*
pub fn tokenize(s: &str) -> Result<Vec<Tok>, EvaluationError> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let suivant = chars.get(i + 1).copied();

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            ',' => Some(Tok::Virgule),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' if suivant == Some('*') => {
                i += 1;
                Some(Tok::StarStar)
            }
            '*' => Some(Tok::Star),
            '/' if suivant == Some('/') => {
                i += 1;
                Some(Tok::SlashSlash)
            }
            '/' => Some(Tok::Slash),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            out.push(Tok::Ident(chars[start..i].iter().collect()));
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let (n, fin) = lire_nombre(&chars, i)?;
            out.push(Tok::Num(n));
            i = fin;
            continue;
        }

        return Err(EvaluationError::MalformedInput(format!(
            "caractère inattendu: '{c}'"
        )));
    }

    Ok(out)
}

/// Lit chiffres* ['.' chiffres*] à partir de `debut`. Retourne (valeur, fin).
fn lire_nombre(chars: &[char], debut: usize) -> Result<(f64, usize), EvaluationError> {
    let mut i = debut;
    let mut point = false;
    let mut chiffres = 0usize;

    while i < chars.len() {
        match chars[i] {
            d if d.is_ascii_digit() => chiffres += 1,
            '.' if !point => point = true,
            _ => break,
        }
        i += 1;
    }

    let brut: String = chars[debut..i].iter().collect();

    // "1.2.3" ou "." seul
    if chiffres == 0 || chars.get(i) == Some(&'.') {
        let mut fin = i;
        while fin < chars.len() && (chars[fin].is_ascii_digit() || chars[fin] == '.') {
            fin += 1;
        }
        let tout: String = chars[debut..fin].iter().collect();
        return Err(EvaluationError::echec(format!("nombre invalide : {tout}")));
    }

    let mut texte = brut;
    if texte.starts_with('.') {
        texte.insert(0, '0');
    }
    if texte.ends_with('.') {
        texte.push('0');
    }

    let n = texte
        .parse::<f64>()
        .map_err(|e| EvaluationError::echec(format!("nombre invalide : {texte} ({e})")))?;
    Ok((n, i))
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::with_capacity(tokens.len());
    for t in tokens {
        let s = match t {
            Tok::Num(n) => format!("{n}"),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::SlashSlash => "//".to_string(),
            Tok::StarStar => "**".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
            Tok::Virgule => ",".to_string(),

            Tok::Neg => "neg".to_string(),
            Tok::Appel(name, n) => format!("{name}/{n}"),
        };
        out.push(s);
    }
    out.join(" ")
}
