//! src/app/etat.rs
//!
//! État de la session interactive (sans vue, sans noyau).
//!
//! Rôle : machine à états de la boucle lecture/calcul/affichage. Chaque ligne lue
//! fait avancer l’état et produit au plus une `Action` ; c’est vue.rs qui l’exécute.
//!
//! Contrats :
//! - Aucune évaluation ici (ni opération, ni expression).
//! - Transitions déterministes, sans effet de bord caché.
//! - Toute erreur de saisie ramène au menu.

use crate::noyau::{ErreurCalcul, Operation};

/// Mots-clés de sortie (insensibles à la casse).
const QUITTER: [&str; 3] = ["q", "quit", "exit"];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Etat {
    Menu,
    PremierNombre,
    Operation { a: f64 },
    SecondNombre { a: f64, op: Operation },
    Expression,
    Termine,
}

/// Ce que la vue doit faire après une transition.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Calculer { op: Operation, a: f64, b: f64 },
    Evaluer(String),
    Erreur(ErreurCalcul),
    Quitter,
}

fn lire_nombre(s: &str) -> Result<f64, ErreurCalcul> {
    let s = s.trim();
    s.parse::<f64>()
        .map_err(|_| ErreurCalcul::argument(format!("nombre invalide: '{s}'")))
}

impl Etat {
    /// Invite affichée avant de lire la ligne suivante.
    pub fn invite(&self) -> &'static str {
        match self {
            Etat::Menu => "mode> ",
            // la session s’arrête avant de lire quoi que ce soit
            Etat::Termine => "",
            Etat::PremierNombre => "premier nombre> ",
            Etat::Operation { .. } => "opération (+, -, *, /, **, %, sqrt)> ",
            Etat::SecondNombre { .. } => "second nombre> ",
            Etat::Expression => "expression> ",
        }
    }

    /// Transition sur une ligne saisie.
    pub fn avancer(self, ligne: &str) -> (Etat, Option<Action>) {
        let ligne = ligne.trim();

        match self {
            Etat::Menu => {
                let choix = ligne.to_lowercase();
                if QUITTER.contains(&choix.as_str()) {
                    return (Etat::Termine, Some(Action::Quitter));
                }
                match choix.as_str() {
                    "1" => (Etat::PremierNombre, None),
                    "2" | "expr" => (Etat::Expression, None),
                    // ligne vide : on réaffiche simplement le menu
                    "" => (Etat::Menu, None),
                    _ => (
                        Etat::Menu,
                        Some(Action::Erreur(ErreurCalcul::argument(format!(
                            "mode inconnu: '{ligne}'"
                        )))),
                    ),
                }
            }

            Etat::PremierNombre => match lire_nombre(ligne) {
                Ok(a) => (Etat::Operation { a }, None),
                Err(e) => (Etat::Menu, Some(Action::Erreur(e))),
            },

            Etat::Operation { a } => match Operation::depuis_symbole(ligne) {
                // unaire : pas de second nombre
                Some(op) if op.arite() == 1 => (
                    Etat::Menu,
                    Some(Action::Calculer { op, a, b: 0.0 }),
                ),
                Some(op) => (Etat::SecondNombre { a, op }, None),
                None => (
                    Etat::Menu,
                    Some(Action::Erreur(ErreurCalcul::argument(format!(
                        "opération non supportée: '{ligne}'"
                    )))),
                ),
            },

            Etat::SecondNombre { a, op } => match lire_nombre(ligne) {
                Ok(b) => (Etat::Menu, Some(Action::Calculer { op, a, b })),
                Err(e) => (Etat::Menu, Some(Action::Erreur(e))),
            },

            Etat::Expression => (Etat::Menu, Some(Action::Evaluer(ligne.to_string()))),

            Etat::Termine => (Etat::Termine, None),
        }
    }
}
