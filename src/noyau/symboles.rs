// src/noyau/symboles.rs
//
// Tables fixes (static, lecture seule) :
// - SYMBOLES   : noms utilisables DANS une expression texte (radians)
// - OPERATIONS : opérations appelées par nom (evaluate_named, degrés)

use std::f64::consts;

use super::erreur::EvaluationError;

type Resultat = Result<f64, EvaluationError>;

/// Fonction de la liste blanche (arité bornée).
#[derive(Clone, Copy)]
pub struct Fonction {
    pub nom: &'static str,
    pub arite_min: usize,
    pub arite_max: usize,
    pub appliquer: fn(&[f64]) -> Resultat,
}

impl std::fmt::Debug for Fonction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}..{}", self.nom, self.arite_min, self.arite_max)
    }
}

impl Fonction {
    pub fn appeler(&self, args: &[f64]) -> Resultat {
        if args.len() < self.arite_min || args.len() > self.arite_max {
            let attendu = if self.arite_min == self.arite_max {
                format!("{}", self.arite_min)
            } else {
                format!("{} à {}", self.arite_min, self.arite_max)
            };
            return Err(EvaluationError::echec(format!(
                "{}() attend {attendu} argument(s), reçu {}",
                self.nom,
                args.len()
            )));
        }
        (self.appliquer)(args)
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Symbole {
    Constante(f64),
    Fonction(Fonction),
}

/// Liste blanche de l’évaluateur texte.
pub static SYMBOLES: &[(&str, Symbole)] = &[
    ("pi", Symbole::Constante(consts::PI)),
    ("e", Symbole::Constante(consts::E)),
    ("sqrt", fonction("sqrt", 1, 1, |a| racine(a[0]))),
    ("sin", fonction("sin", 1, 1, |a| Ok(a[0].sin()))),
    ("cos", fonction("cos", 1, 1, |a| Ok(a[0].cos()))),
    ("tan", fonction("tan", 1, 1, |a| Ok(a[0].tan()))),
    ("log", fonction("log", 1, 2, log_base)),
    ("log10", fonction("log10", 1, 1, |a| log10(a[0]))),
    ("pow", fonction("pow", 2, 2, |a| puissance(a[0], a[1]))),
    ("abs", fonction("abs", 1, 1, |a| Ok(a[0].abs()))),
    ("round", fonction("round", 1, 2, arrondi)),
];

const fn fonction(
    nom: &'static str,
    arite_min: usize,
    arite_max: usize,
    appliquer: fn(&[f64]) -> Resultat,
) -> Symbole {
    Symbole::Fonction(Fonction {
        nom,
        arite_min,
        arite_max,
        appliquer,
    })
}

pub fn chercher(nom: &str) -> Option<Symbole> {
    SYMBOLES
        .iter()
        .find(|(n, _)| *n == nom)
        .map(|(_, s)| *s)
}

/* ------------------------ Opérations nommées ------------------------ */

#[derive(Clone, Copy, Debug)]
pub enum Calcul {
    Unaire(fn(f64) -> Resultat),
    Binaire(fn(f64, f64) -> Resultat),
}

/// Table de evaluate_named : trig en DEGRÉS, log = base 10, ln = naturel.
pub static OPERATIONS: &[(&str, Calcul)] = &[
    ("sqrt", Calcul::Unaire(racine)),
    ("pow", Calcul::Binaire(puissance)),
    ("sin", Calcul::Unaire(|x| Ok(x.to_radians().sin()))),
    ("cos", Calcul::Unaire(|x| Ok(x.to_radians().cos()))),
    ("tan", Calcul::Unaire(|x| Ok(x.to_radians().tan()))),
    ("log", Calcul::Unaire(log10)),
    ("ln", Calcul::Unaire(ln)),
];

pub fn operation(nom: &str) -> Option<Calcul> {
    OPERATIONS
        .iter()
        .find(|(n, _)| *n == nom)
        .map(|(_, c)| *c)
}

/* ------------------------ Noyaux numériques ------------------------ */

fn racine(x: f64) -> Resultat {
    if x < 0.0 {
        return Err(EvaluationError::domaine());
    }
    Ok(x.sqrt())
}

fn ln(x: f64) -> Resultat {
    if x <= 0.0 {
        return Err(EvaluationError::domaine());
    }
    Ok(x.ln())
}

fn log10(x: f64) -> Resultat {
    if x <= 0.0 {
        return Err(EvaluationError::domaine());
    }
    Ok(x.log10())
}

/// log(x) naturel, ou log(x, base).
fn log_base(a: &[f64]) -> Resultat {
    let x = ln(a[0])?;
    match a.get(1) {
        None => Ok(x),
        Some(&b) => {
            let lb = ln(b)?;
            if lb == 0.0 {
                return Err(EvaluationError::echec("division par zéro"));
            }
            Ok(x / lb)
        }
    }
}

/// Puissance réelle : partagée par `**` et pow().
pub fn puissance(base: f64, exposant: f64) -> Resultat {
    if base == 0.0 && exposant < 0.0 {
        return Err(EvaluationError::echec(
            "zéro ne peut pas être élevé à une puissance négative",
        ));
    }
    // base négative + exposant fractionnaire : résultat complexe => refusé
    if base < 0.0 && exposant.is_finite() && exposant.fract() != 0.0 {
        return Err(EvaluationError::domaine());
    }
    Ok(base.powf(exposant))
}

/// round(x) / round(x, n) : arrondi au pair.
fn arrondi(a: &[f64]) -> Resultat {
    let x = a[0];
    let Some(&n) = a.get(1) else {
        return Ok(x.round_ties_even());
    };
    if n.fract() != 0.0 || !n.is_finite() {
        return Err(EvaluationError::echec(
            "round() : nombre de décimales entier attendu",
        ));
    }
    // au-delà, 10^n n’est plus représentable : x est déjà “arrondi”
    if n > 308.0 {
        return Ok(x);
    }
    if n < -308.0 {
        return Ok(0.0_f64.copysign(x));
    }
    if n < 0.0 {
        let facteur = 10f64.powi(-n as i32);
        return Ok((x / facteur).round_ties_even() * facteur);
    }
    let facteur = 10f64.powi(n as i32);
    let mis_a_l_echelle = x * facteur;
    if !mis_a_l_echelle.is_finite() {
        return Ok(x);
    }
    Ok(mis_a_l_echelle.round_ties_even() / facteur)
}
