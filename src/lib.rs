//! Calculatrice : opérations arithmétiques, évaluateur d’expressions restreint
//! (liste blanche sqrt / pow / pi / e) et boucle interactive.

pub mod app;
pub mod noyau;
