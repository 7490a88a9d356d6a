// src/noyau/environnement.rs
//
// Liste blanche des noms résolvables dans une expression.
// Construite une seule fois (OnceLock), jamais modifiée ensuite.
// Tout nom absent de cette table est refusé au moment de la construction de l’arbre.

use num_traits::FloatConst;
use std::collections::HashMap;
use std::sync::OnceLock;

use super::erreur::{ErreurCalcul, ResultatCalcul};
use super::operations;

/// Fonctions autorisées (ensemble fermé).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sqrt,
    Pow,
}

impl Fonction {
    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sqrt => "sqrt",
            Fonction::Pow => "pow",
        }
    }

    pub fn arite(self) -> usize {
        match self {
            Fonction::Sqrt => 1,
            Fonction::Pow => 2,
        }
    }

    /// `args.len()` est garanti égal à `arite()` par le parseur.
    pub fn appliquer(self, args: &[f64]) -> ResultatCalcul<f64> {
        match (self, args) {
            (Fonction::Sqrt, [x]) => operations::sqrt(*x),
            (Fonction::Pow, [b, e]) => Ok(operations::power(*b, *e)),
            _ => Err(ErreurCalcul::argument(format!(
                "{}() attend {} argument(s), reçu {}",
                self.nom(),
                self.arite(),
                args.len()
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Symbole {
    Constante(f64),
    Fonction(Fonction),
}

fn table() -> &'static HashMap<&'static str, Symbole> {
    static TABLE: OnceLock<HashMap<&'static str, Symbole>> = OnceLock::new();
    TABLE.get_or_init(|| {
        HashMap::from([
            ("sqrt", Symbole::Fonction(Fonction::Sqrt)),
            ("pow", Symbole::Fonction(Fonction::Pow)),
            ("pi", Symbole::Constante(f64::PI())),
            ("e", Symbole::Constante(f64::E())),
        ])
    })
}

/// Résout un identifiant. Sensible à la casse : "PI" n’est pas "pi".
pub fn resoudre(nom: &str) -> Option<Symbole> {
    table().get(nom).copied()
}

/// Noms autorisés, triés (pour les messages d’aide).
pub fn noms() -> Vec<&'static str> {
    let mut v: Vec<&'static str> = table().keys().copied().collect();
    v.sort_unstable();
    v
}
