// src/noyau/format.rs
//
// Affichage d’un résultat f64 (calculatrice) :
// - non fini               => "Error"
// - 0                      => "0"
// - |x| >= 1e15 ou < 1e-6  => exponentiel 6 décimales (1.234568e+15)
// - entier                 => "42"
// - sinon arrondi à 1e-10, séparateurs de milliers au-delà de 1e6 (2 décimales max)
//
// Aides : pourcentage, arrondi à n décimales (demi vers +∞).

const SEUIL_GRAND: f64 = 1e15;
const SEUIL_PETIT: f64 = 1e-6;
const SEUIL_MILLIERS: f64 = 1e6;
const DECIMALES_AFFICHEES: i32 = 10;

pub fn format_result(x: f64) -> String {
    if !x.is_finite() {
        return "Error".into();
    }
    if x == 0.0 {
        return "0".into();
    }

    let a = x.abs();
    if a >= SEUIL_GRAND || a < SEUIL_PETIT {
        return exponentiel(x);
    }

    if x.fract() == 0.0 {
        return format!("{x}");
    }

    let arrondi = arrondir_decimales(x, DECIMALES_AFFICHEES);

    if arrondi.abs() >= SEUIL_MILLIERS {
        return avec_milliers(arrondi);
    }

    format!("{arrondi}")
}

/// 6 décimales, exposant signé : 1.5e15 -> "1.500000e+15".
fn exponentiel(x: f64) -> String {
    let s = format!("{x:.6e}");
    match s.split_once('e') {
        Some((mantisse, exp)) if !exp.starts_with('-') => format!("{mantisse}e+{exp}"),
        _ => s,
    }
}

/// "1,234,567.89" (2 décimales max, zéros finaux retirés).
fn avec_milliers(x: f64) -> String {
    let brut = format!("{:.2}", x.abs());
    let (entier, frac) = brut.split_once('.').unwrap_or((brut.as_str(), ""));

    let chiffres: Vec<char> = entier.chars().collect();
    let mut groupe = String::with_capacity(chiffres.len() + chiffres.len() / 3 + 2);
    if x < 0.0 {
        groupe.push('-');
    }
    for (i, c) in chiffres.iter().enumerate() {
        if i > 0 && (chiffres.len() - i) % 3 == 0 {
            groupe.push(',');
        }
        groupe.push(*c);
    }

    let frac = frac.trim_end_matches('0');
    if !frac.is_empty() {
        groupe.push('.');
        groupe.push_str(frac);
    }
    groupe
}

/// `pourcent` % de `valeur`.
pub fn pourcentage(valeur: f64, pourcent: f64) -> f64 {
    valeur * pourcent / 100.0
}

/// Arrondi à `decimales` chiffres, demi vers +∞ (-2.5 -> -2).
pub fn arrondir_decimales(x: f64, decimales: i32) -> f64 {
    let facteur = 10f64.powi(decimales);
    (x * facteur + 0.5).floor() / facteur
}
