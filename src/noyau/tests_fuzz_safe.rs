//! Tests fuzz safe : robustesse + déterminisme + liste blanche étanche.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - on accepte les erreurs attendues (division par zéro, racine négative, etc.)
//! - invariant clé : une entrée hostile échoue toujours en ArgumentInvalide

use std::time::{Duration, Instant};

use super::erreur::ErreurCalcul;
use super::evaluate_expression;
use super::jetons::MAX_LONGUEUR;

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
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(7) {
        0 => format!("{}", rng.pick(10)),
        1 => format!("{}.{}", rng.pick(100), rng.pick(100)),
        2 => "pi".to_string(),
        3 => "e".to_string(),
        4 => format!("sqrt({})", rng.pick(50)),
        5 => "0".to_string(),
        _ => format!("-{}", rng.pick(5)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }
    let a = gen_expr(rng, depth - 1);
    let b = gen_expr(rng, depth - 1);
    match rng.pick(9) {
        0 => format!("{a} + {b}"),
        1 => format!("{a} - {b}"),
        2 => format!("{a} * {b}"),
        3 => format!("{a} / {b}"),
        4 => format!("({a}) ** 2"),
        5 => format!("pow({a}, {b})"),
        6 => format!("sqrt({a})"),
        7 => format!("-({a})"),
        _ => format!("({a})"),
    }
}

/// Bruit : caractères tirés d’un alphabet qui mélange le légal et l’illégal.
fn gen_bruit(rng: &mut Rng, len: usize) -> String {
    const ALPHABET: &[char] = &[
        '0', '1', '9', '.', 'e', 'E', '+', '-', '*', '/', '(', ')', ',', ' ', 'p', 'i', 's',
        'q', 'r', 't', 'o', 'w', '_', '\'', '"', '[', ']', '^', '%', ';', '=',
    ];
    (0..len)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_expressions_generees() {
    let start = Instant::now();
    let max = Duration::from_secs(10);
    let mut rng = Rng::new(0x5EED_CA1C);

    for _ in 0..2_000 {
        budget(start, max);
        let depth = rng.pick(5) as usize;
        let s = gen_expr(&mut rng, depth);

        // seules erreurs admises : celles des opérations elles-mêmes
        match evaluate_expression(&s) {
            Ok(_) => {}
            Err(ErreurCalcul::DivisionParZero) => {}
            Err(ErreurCalcul::ArgumentInvalide(msg)) => {
                assert!(
                    msg.contains("racine carrée"),
                    "expression générée refusée: {s:?} => {msg}"
                );
            }
        }

        // déterminisme
        assert_eq!(evaluate_expression(&s), evaluate_expression(&s), "s={s:?}");
    }
}

#[test]
fn fuzz_bruit_ne_panique_pas() {
    let start = Instant::now();
    let max = Duration::from_secs(10);
    let mut rng = Rng::new(42);

    for _ in 0..5_000 {
        budget(start, max);
        let len = rng.pick(24) as usize;
        let s = gen_bruit(&mut rng, len);
        // n’importe quel résultat, mais jamais de panique
        let _ = evaluate_expression(&s);
    }
}

#[test]
fn entrees_hostiles_refusees() {
    let hostiles = [
        "__import__('os')",
        "__import__('os').system('ls')",
        "open('/etc/passwd')",
        "exec('1')",
        "eval('1+1')",
        "globals()",
        "__builtins__",
        "pi.__class__",
        "sqrt.__globals__",
        "[1, 2][0]",
        "(lambda: 1)()",
        "x = 1",
        "1; 2",
        "import os",
        "abs(-1)",
        "exp(1)",
        "Pi",
        "SQRT(4)",
        "pow(2, 3, 5)",
        "'2' + '3'",
        "1 if 1 else 0",
        "2 ^ 3",
        "7 % 2",
    ];

    for s in hostiles {
        let r = evaluate_expression(s);
        assert!(
            matches!(r, Err(ErreurCalcul::ArgumentInvalide(_))),
            "entrée hostile acceptée: {s:?} => {r:?}"
        );
    }
}

#[test]
fn imbrication_extreme_sans_debordement() {
    // au-delà de la borne : refus propre, pas de débordement de pile
    let s = format!("{}1{}", "(".repeat(2_000), ")".repeat(2_000));
    assert!(matches!(
        evaluate_expression(&s),
        Err(ErreurCalcul::ArgumentInvalide(_))
    ));

    let s = format!("{}1{}", "sqrt(".repeat(1_000), ")".repeat(1_000));
    assert!(matches!(
        evaluate_expression(&s),
        Err(ErreurCalcul::ArgumentInvalide(_))
    ));

    // chaînes plates sous la borne : acceptées
    let s = vec!["1"; 500].join(" + ");
    assert_eq!(evaluate_expression(&s), Ok(500.0));
}

/// Les pires chaînes d’opérateurs tenant dans MAX_LONGUEUR, sans parenthèses,
/// évaluées sur une pile de 2 Mo (taille par défaut d’un thread lancé) :
/// refus propre, jamais d’abandon du processus.
#[test]
fn chaines_d_operateurs_sur_petite_pile() {
    let entrees = vec![
        // 1365 termes, arbre Pow associatif à droite
        vec!["1"; 1_365].join("**"),
        // 4095 moins unaires
        format!("{}1", "-".repeat(MAX_LONGUEUR - 1)),
        // 2048 termes, arbre Add associatif à gauche
        vec!["1"; 2_048].join("+"),
    ];

    let fil = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(move || {
            entrees
                .iter()
                .map(|s| (s.len(), evaluate_expression(s)))
                .collect::<Vec<_>>()
        })
        .unwrap();

    for (len, r) in fil.join().expect("débordement de pile") {
        assert!(len <= MAX_LONGUEUR, "len={len}");
        assert!(
            matches!(r, Err(ErreurCalcul::ArgumentInvalide(_))),
            "len={len} r={r:?}"
        );
    }
}
