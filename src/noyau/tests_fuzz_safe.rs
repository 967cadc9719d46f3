//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - on accepte certaines erreurs attendues (division par zéro, domaine, non fini)
//! - invariant clé : Ok(v) => v fini

use std::time::{Duration, Instant};

use super::erreur::{ErrorKind, EvaluationError};
use super::evaluate;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn is_erreur_attendue(e: &EvaluationError) -> bool {
    // Liste blanche : erreurs *normales* pour des expressions bien formées
    // mais numériquement hostiles.
    match e {
        EvaluationError::NonFiniteResult => true,
        EvaluationError::EvaluationFailure(msg) => {
            msg.contains("division")
                || msg.contains("domaine")
                || msg.contains("puissance négative")
        }
        _ => false,
    }
}

fn check_invariant_fini(expr: &str, r: &Result<f64, EvaluationError>) {
    if let Ok(v) = r {
        assert!(v.is_finite(), "expr={expr:?} a donné {v}");
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    // inclut 0 (utile pour tester les divisions)
    let a = rng.pick(10);
    match rng.pick(3) {
        0 => format!("{a}"),
        1 => format!("{a}.{}", rng.pick(100)),
        _ => format!(".{}", rng.pick(10)),
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 | 1 | 2 => gen_nombre(rng),
        3 => "pi".to_string(),
        4 => "e".to_string(),
        _ => format!("-{}", gen_nombre(rng)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let a = gen_expr(rng, depth - 1);
    let b = gen_expr(rng, depth - 1);

    match rng.pick(15) {
        0 => gen_atom(rng),
        1 => format!("({a}+{b})"),
        2 => format!("({a}-{b})"),
        3 => format!("({a}*{b})"),
        4 => format!("({a}/{b})"),
        5 => format!("({a}//{b})"),
        6 => format!("({a}×{b})"),
        7 => format!("({a}÷{b})"),
        8 => format!("sqrt({a})"),
        9 => format!("log({a})"),
        14 => format!("log10({a})"),
        10 => format!("pow({a},{b})"),
        11 => format!("{}({a})", if rng.coin() { "sin" } else { "cos" }),
        12 => format!("2({a})"),
        _ => format!("({a})**2"),
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_invariant_fini() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut rng = Rng::new(0xC0FFEE_u64);
    let mut rng_bis = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        // Même seed => même expression => même sortie
        assert_eq!(expr, gen_expr(&mut rng_bis, 4));

        let r = evaluate(&expr);
        check_invariant_fini(&expr, &r);

        match &r {
            Ok(v) => {
                let encore = evaluate(&expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
                assert_eq!(v.to_bits(), encore.to_bits(), "expr={expr:?}");
                seen_ok += 1;
            }
            Err(e) => {
                assert!(
                    is_erreur_attendue(e),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                assert_eq!(evaluate(&expr).as_ref().err(), Some(e));
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_caracteres_aleatoires() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    const ALPHABET: &[char] = &[
        '0', '1', '9', '.', '+', '-', '*', '/', '(', ')', ',', ' ', '×', '÷', 'p', 'i', 'e', 'x',
        '^', '_', '$', ';', '\'', 'é',
    ];

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..500 {
        budget(t0, max);

        let n = 1 + rng.pick(16) as usize;
        let expr: String = (0..n)
            .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
            .collect();

        let r = evaluate(&expr);
        check_invariant_fini(&expr, &r);

        // caractère hors liste blanche => refus avant évaluation
        if expr.chars().any(|c| matches!(c, 'x' | '^' | '_' | '$' | ';' | '\'' | 'é')) {
            let kind = r.as_ref().map_err(EvaluationError::kind).err();
            assert_eq!(kind, Some(ErrorKind::MalformedInput), "expr={expr:?}");
        }
    }
}

#[test]
fn fuzz_safe_somme_longue_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // chaîne très longue : l’évaluation RPN est itérative
    let expr = vec!["0.5"; 5000].join("+");
    let v = evaluate(&expr).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    assert_eq!(v, 2500.0);
}
