// src/noyau/erreur.rs
//
// Deux familles d’erreurs suffisent :
// - DivisionParZero  : un diviseur vaut exactement zéro (divide, ou `/` dans une expression)
// - ArgumentInvalide : précondition violée (pourcentage sur 0, racine d’un négatif),
//                      expression vide, mal formée ou nom hors liste blanche.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErreurCalcul {
    #[error("division par zéro")]
    DivisionParZero,

    #[error("{0}")]
    ArgumentInvalide(String),
}

impl ErreurCalcul {
    pub fn argument(msg: impl Into<String>) -> Self {
        ErreurCalcul::ArgumentInvalide(msg.into())
    }
}

pub type ResultatCalcul<T> = Result<T, ErreurCalcul>;
