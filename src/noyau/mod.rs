//! Noyau de calcul (flottants, sans état)
//!
//! Organisation interne :
//! - erreur.rs        : ErreurCalcul (DivisionParZero / ArgumentInvalide)
//! - operations.rs    : les sept opérations + Operation
//! - environnement.rs : liste blanche (sqrt, pow, pi, e), figée au premier accès
//! - jetons.rs        : tokenisation
//! - rpn.rs           : shunting-yard + construction Expr (résolution des noms)
//! - expr.rs          : AST fermé + évaluation directe
//! - format.rs        : affichage d’un résultat
//! - eval.rs          : pipeline complet

pub mod environnement;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod operations;
pub mod rpn;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::{ErreurCalcul, ResultatCalcul};
pub use eval::{evaluate_expression, evaluer_avec_demarche, Demarche};
pub use format::format_resultat;
pub use operations::{add, divide, multiply, percentage, power, sqrt, subtract, Operation};
