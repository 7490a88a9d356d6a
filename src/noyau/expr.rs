// src/noyau/expr.rs
//
// AST fermé (flottants).
// - Nombre : littéral ou constante déjà résolue via la liste blanche
// - Appel  : uniquement une Fonction de la liste blanche (ensemble fermé)
//
// IMPORTANT (SAFE):
// - Aucun noeud ne porte de nom libre : un nom inconnu ne peut pas atteindre l’évaluation.
// - evaluer() délègue aux opérations (mêmes erreurs que les fonctions autonomes).

use std::fmt;

use super::environnement::Fonction;
use super::erreur::ResultatCalcul;
use super::format::format_resultat;
use super::operations;

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),

    Neg(Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),

    Appel(Fonction, Vec<Expr>),
}

impl Expr {
    /// Interprétation directe de l’arbre.
    /// Récursif : from_rpn borne la profondeur de l’arbre (MAX_PROFONDEUR_ARBRE).
    pub fn evaluer(&self) -> ResultatCalcul<f64> {
        use Expr::*;

        match self {
            Nombre(v) => Ok(*v),
            Neg(x) => Ok(-x.evaluer()?),

            Add(a, b) => Ok(operations::add(a.evaluer()?, b.evaluer()?)),
            Sub(a, b) => Ok(operations::subtract(a.evaluer()?, b.evaluer()?)),
            Mul(a, b) => Ok(operations::multiply(a.evaluer()?, b.evaluer()?)),
            Div(a, b) => operations::divide(a.evaluer()?, b.evaluer()?),
            Pow(a, b) => Ok(operations::power(a.evaluer()?, b.evaluer()?)),

            Appel(f, args) => {
                let valeurs = args
                    .iter()
                    .map(Expr::evaluer)
                    .collect::<ResultatCalcul<Vec<f64>>>()?;
                f.appliquer(&valeurs)
            }
        }
    }
}

/// Rendu entièrement parenthésé (démarche) : montre la structure réellement retenue.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;

        match self {
            Nombre(v) => write!(f, "{}", format_resultat(*v)),
            Neg(x) => write!(f, "(-{x})"),
            Add(a, b) => write!(f, "({a} + {b})"),
            Sub(a, b) => write!(f, "({a} - {b})"),
            Mul(a, b) => write!(f, "({a} * {b})"),
            Div(a, b) => write!(f, "({a} / {b})"),
            Pow(a, b) => write!(f, "({a} ** {b})"),
            Appel(fonction, args) => {
                write!(f, "{}(", fonction.nom())?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{a}")?;
                }
                write!(f, ")")
            }
        }
    }
}
