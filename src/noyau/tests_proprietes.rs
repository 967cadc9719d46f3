//! Propriétés (proptest) : exactitude entière, idempotence, insensibilité aux blancs.

use proptest::prelude::*;

use super::{evaluate, sanitize};

fn meme_sortie(a: &Result<f64, super::EvaluationError>, b: &Result<f64, super::EvaluationError>) -> bool {
    match (a, b) {
        (Ok(x), Ok(y)) => x.to_bits() == y.to_bits(),
        (Err(x), Err(y)) => x == y,
        _ => false,
    }
}

proptest! {
    #[test]
    fn arithmetique_entiere_exacte(a in -1000i64..1000, b in -1000i64..1000, c in -1000i64..1000) {
        let expr = format!("{a}+{b}*{c}");
        prop_assert_eq!(evaluate(&expr).unwrap(), (a + b * c) as f64);

        let expr = format!("({a}-{b})*{c}");
        prop_assert_eq!(evaluate(&expr).unwrap(), ((a - b) * c) as f64);
    }

    #[test]
    fn division_ieee(a in -1000i32..1000, b in 1i32..1000) {
        let expr = format!("{a}/{b}");
        prop_assert_eq!(evaluate(&expr).unwrap(), f64::from(a) / f64::from(b));
    }

    #[test]
    fn idempotence(s in "[0-9+*/().,-]{1,24}") {
        prop_assert!(meme_sortie(&evaluate(&s), &evaluate(&s)));
        prop_assert!(meme_sortie(&evaluate(&s), &evaluate(&sanitize(&s))));
    }

    #[test]
    fn sanitize_stable(s in "[0-9+*/() ×÷]{0,24}") {
        let une = sanitize(&s);
        prop_assert_eq!(sanitize(&une), une);
    }

    #[test]
    fn blancs_ignores(a in 0u32..10_000, b in 0u32..10_000) {
        let serre = format!("{a}*({b}+1)");
        let aere = format!(" {a} *\t( {b} + 1 ) ");
        prop_assert!(meme_sortie(&evaluate(&serre), &evaluate(&aere)));
    }
}
