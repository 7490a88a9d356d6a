//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> RPN -> Expr (noms résolus via la liste blanche) -> évaluation directe
//!
//! Aucune étape ne peut atteindre autre chose que les nombres, les cinq opérateurs
//! et les quatre noms de `environnement`.

use tracing::{debug, trace};

use super::erreur::{ErreurCalcul, ResultatCalcul};
use super::jetons::{format_tokens, tokenize};
use super::rpn::{from_rpn, to_rpn};

#[derive(Default, Clone, Debug, PartialEq)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
}

/// API publique : évalue une expression et retourne un flottant.
///
/// Échoue (ArgumentInvalide) si l’entrée est vide / blanche, mal formée,
/// ou si elle utilise un nom hors liste blanche.
pub fn evaluate_expression(expr_str: &str) -> ResultatCalcul<f64> {
    let s = non_vide(expr_str)?;

    let jetons = tokenize(s)?;
    let rpn = to_rpn(&jetons)?;
    trace!(rpn = %format_tokens(&rpn), "shunting-yard");

    // noms résolus ici : un nom inconnu s’arrête là
    let expr = from_rpn(&rpn)?;

    let valeur = expr.evaluer()?;
    debug!(expression = s, valeur, "expression évaluée");
    Ok(valeur)
}

/// Même pipeline, avec les formes intermédiaires (jetons, RPN, arbre).
/// Les textes ne sont construits qu’ici.
pub fn evaluer_avec_demarche(expr_str: &str) -> ResultatCalcul<(f64, Demarche)> {
    let s = non_vide(expr_str)?;

    // 1) Jetons
    let jetons = tokenize(s)?;
    let jetons_txt = format_tokens(&jetons);

    // 2) RPN
    let rpn = to_rpn(&jetons)?;
    let rpn_txt = format_tokens(&rpn);

    // 3) AST
    let expr = from_rpn(&rpn)?;

    // 4) Évaluation
    let valeur = expr.evaluer()?;
    debug!(expression = s, valeur, "expression évaluée (démarche)");

    let d = Demarche {
        jetons: jetons_txt,
        rpn: rpn_txt,
        arbre: expr.to_string(),
    };

    Ok((valeur, d))
}

fn non_vide(expr_str: &str) -> ResultatCalcul<&str> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(ErreurCalcul::argument("expression vide"));
    }
    Ok(s)
}
