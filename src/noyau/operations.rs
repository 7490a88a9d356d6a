// src/noyau/operations.rs
//
// Les sept opérations arithmétiques (pures, sans état).
// Tout est en f64 : aucune distinction entier/flottant n’est conservée.

use num_traits::Zero;

use super::erreur::{ErreurCalcul, ResultatCalcul};

pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

pub fn subtract(a: f64, b: f64) -> f64 {
    a - b
}

pub fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

/// a / b. Échoue si b == 0 (y compris -0.0).
pub fn divide(a: f64, b: f64) -> ResultatCalcul<f64> {
    if b.is_zero() {
        return Err(ErreurCalcul::DivisionParZero);
    }
    Ok(a / b)
}

/// base^exp. Jamais d’erreur : NaN / inf se propagent comme sur la plateforme.
pub fn power(base: f64, exp: f64) -> f64 {
    base.powf(exp)
}

/// Quelle part (en %) `part` représente de `whole`.
///
/// percentage(25, 200) = 12.5
pub fn percentage(part: f64, whole: f64) -> ResultatCalcul<f64> {
    if whole.is_zero() {
        return Err(ErreurCalcul::argument(
            "le total ne peut pas être nul pour un pourcentage",
        ));
    }
    Ok((part / whole) * 100.0)
}

/// Racine carrée principale. NaN passe tel quel (NaN n’est pas < 0).
pub fn sqrt(x: f64) -> ResultatCalcul<f64> {
    if x < 0.0 {
        return Err(ErreurCalcul::argument(
            "racine carrée d’un nombre négatif",
        ));
    }
    Ok(x.sqrt())
}

/* ------------------------ Opération (ensemble fermé) ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Percentage,
    Sqrt,
}

impl Operation {
    /// Symbole saisi en ligne de commande -> opération.
    /// Accepte `+ - * / ** %` ainsi que `sqrt` / `√` (unaire).
    pub fn depuis_symbole(s: &str) -> Option<Operation> {
        match s.trim() {
            "+" => Some(Operation::Add),
            "-" => Some(Operation::Subtract),
            "*" => Some(Operation::Multiply),
            "/" => Some(Operation::Divide),
            "**" => Some(Operation::Power),
            "%" => Some(Operation::Percentage),
            "sqrt" | "√" => Some(Operation::Sqrt),
            _ => None,
        }
    }

    pub fn arite(self) -> usize {
        match self {
            Operation::Sqrt => 1,
            _ => 2,
        }
    }

    /// Applique l’opération. Pour Sqrt, `b` est ignoré.
    pub fn appliquer(self, a: f64, b: f64) -> ResultatCalcul<f64> {
        match self {
            Operation::Add => Ok(add(a, b)),
            Operation::Subtract => Ok(subtract(a, b)),
            Operation::Multiply => Ok(multiply(a, b)),
            Operation::Divide => divide(a, b),
            Operation::Power => Ok(power(a, b)),
            Operation::Percentage => percentage(a, b),
            Operation::Sqrt => sqrt(a),
        }
    }
}
