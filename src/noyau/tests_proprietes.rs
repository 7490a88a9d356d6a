//! Propriétés (proptest) : lois arithmétiques + cohérence évaluateur / opérations.

use proptest::prelude::*;

use super::erreur::ErreurCalcul;
use super::{add, divide, evaluate_expression, format_resultat, multiply, percentage, sqrt};

fn proche(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

/// Flottants finis de taille raisonnable (évite les débordements vers inf).
fn fini() -> impl Strategy<Value = f64> {
    -1.0e6..1.0e6f64
}

proptest! {
    #[test]
    fn add_commutatif(a in fini(), b in fini()) {
        prop_assert_eq!(add(a, b), add(b, a));
    }

    #[test]
    fn multiply_commutatif(a in fini(), b in fini()) {
        prop_assert_eq!(multiply(a, b), multiply(b, a));
    }

    #[test]
    fn divide_inverse_de_multiply(a in fini(), b in fini()) {
        prop_assume!(b.abs() > 1e-3);
        let q = divide(multiply(a, b), b).unwrap();
        prop_assert!(proche(q, a), "a={} b={} q={}", a, b, q);
    }

    #[test]
    fn divide_par_zero_toujours(a in any::<f64>()) {
        prop_assert_eq!(divide(a, 0.0), Err(ErreurCalcul::DivisionParZero));
    }

    #[test]
    fn percentage_total_nul_toujours(part in any::<f64>()) {
        prop_assert!(matches!(percentage(part, 0.0), Err(ErreurCalcul::ArgumentInvalide(_))));
    }

    #[test]
    fn sqrt_negatif_toujours(x in -1.0e12..-1.0e-12f64) {
        prop_assert!(matches!(sqrt(x), Err(ErreurCalcul::ArgumentInvalide(_))));
    }

    #[test]
    fn sqrt_au_carre(x in 0.0..1.0e12f64) {
        let r = sqrt(x).unwrap();
        prop_assert!(r >= 0.0);
        prop_assert!(proche(r * r, x), "x={} r={}", x, r);
    }

    #[test]
    fn evaluateur_coherent_avec_operations(a in fini(), b in fini()) {
        // format_resultat relit exactement la même valeur ; les négatifs sont parenthésés.
        let (ta, tb) = (format!("({})", format_resultat(a)), format!("({})", format_resultat(b)));

        prop_assert_eq!(evaluate_expression(&format!("{ta} + {tb}")), Ok(add(a, b)));
        prop_assert_eq!(evaluate_expression(&format!("{ta} * {tb}")), Ok(multiply(a, b)));
        prop_assert_eq!(evaluate_expression(&format!("{ta} / {tb}")), divide(a, b));
    }

    #[test]
    fn evaluation_deterministe(a in fini()) {
        let s = format!("sqrt(pow({}, 2)) + pi", format_resultat(a));
        prop_assert_eq!(evaluate_expression(&s), evaluate_expression(&s));
    }
}
