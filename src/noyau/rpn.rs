// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr en résolvant chaque nom via la liste blanche
//
// Règles:
// - Ident(name) suivi de '(' => appel ; sinon => nom (constante attendue)
// - '+' / '-' quand on attend une valeur => opérateur unaire (Pos / Neg)
// - Précédences : + - (1) < * / (2) < unaire (3) < ** (4, associatif à droite)
//   => -2**2 = -(2**2) et 2**-1 = 2**(-1)
// - Un opérateur unaire arrivant ne dépile rien (il est préfixe).

use super::environnement::{noms, resoudre, Symbole};
use super::erreur::{ErreurCalcul, ResultatCalcul};
use super::expr::Expr;
use super::jetons::{format_tokens, Tok};

/// Garde-fou : imbrication maximale de parenthèses / appels.
pub const MAX_PROFONDEUR: usize = 256;

/// Garde-fou : profondeur maximale de l’arbre construit.
/// Couvre aussi les chaînes d’opérateurs sans parenthèses (----1, 1**1**1...),
/// que MAX_PROFONDEUR ne voit pas.
pub const MAX_PROFONDEUR_ARBRE: usize = 512;

/// Entrée de la pile d’opérateurs.
enum Entree {
    Op(Tok),
    // '(' ouvrante ; `appel` = nom de fonction si c’est un appel.
    Paren {
        appel: Option<String>,
        virgules: usize,
    },
}

fn precedence(t: &Tok) -> u8 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg | Tok::Pos => 3,
        Tok::DoubleStar => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::DoubleStar)
}

fn invalide(msg: impl Into<String>) -> ErreurCalcul {
    ErreurCalcul::argument(msg)
}

fn nom_refuse(nom: &str) -> ErreurCalcul {
    invalide(format!(
        "nom non autorisé: '{nom}' (autorisés : {})",
        noms().join(", ")
    ))
}

/// Empile un noeud avec sa profondeur ; refuse au-delà de MAX_PROFONDEUR_ARBRE.
fn empile(st: &mut Vec<(Expr, usize)>, e: Expr, profondeur: usize) -> ResultatCalcul<()> {
    if profondeur > MAX_PROFONDEUR_ARBRE {
        return Err(invalide("expression trop profonde"));
    }
    st.push((e, profondeur));
    Ok(())
}

/// Dépile vers `out` jusqu’à la '(' la plus proche (retirée et renvoyée).
fn depile_jusqu_a_paren(
    ops: &mut Vec<Entree>,
    out: &mut Vec<Tok>,
) -> Option<(Option<String>, usize)> {
    while let Some(top) = ops.pop() {
        match top {
            Entree::Op(t) => out.push(t),
            Entree::Paren { appel, virgules } => return Some((appel, virgules)),
        }
    }
    None
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(2), Star, Ident("sqrt"), LPar, Num(9), RPar]
///   rpn:    [Num(2), Num(9), Appel{sqrt,1}, Star]
pub fn to_rpn(tokens: &[Tok]) -> ResultatCalcul<Vec<Tok>> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Entree> = Vec::new();
    let mut profondeur: usize = 0;

    // true quand la position courante exige un opérande (début, après opérateur, '(' ou ',').
    let mut attend_valeur = true;

    let mut i = 0;
    while i < tokens.len() {
        let tok = &tokens[i];
        i += 1;

        match tok {
            Tok::Num(_) => {
                if !attend_valeur {
                    return Err(invalide("deux valeurs adjacentes sans opérateur"));
                }
                out.push(tok.clone());
                attend_valeur = false;
            }

            Tok::Ident(name) => {
                if !attend_valeur {
                    return Err(invalide(format!(
                        "nom inattendu après une valeur: '{name}'"
                    )));
                }
                if matches!(tokens.get(i), Some(Tok::LPar)) {
                    // appel : on consomme la '(' avec le nom
                    i += 1;
                    profondeur += 1;
                    if profondeur > MAX_PROFONDEUR {
                        return Err(invalide("imbrication trop profonde"));
                    }
                    ops.push(Entree::Paren {
                        appel: Some(name.clone()),
                        virgules: 0,
                    });
                    // ")" immédiate => appel sans argument
                    if matches!(tokens.get(i), Some(Tok::RPar)) {
                        i += 1;
                        profondeur -= 1;
                        ops.pop();
                        out.push(Tok::Appel {
                            nom: name.clone(),
                            nargs: 0,
                        });
                        attend_valeur = false;
                    } else {
                        attend_valeur = true;
                    }
                } else {
                    out.push(tok.clone());
                    attend_valeur = false;
                }
            }

            Tok::LPar => {
                if !attend_valeur {
                    return Err(invalide("'(' inattendue après une valeur"));
                }
                profondeur += 1;
                if profondeur > MAX_PROFONDEUR {
                    return Err(invalide("imbrication trop profonde"));
                }
                ops.push(Entree::Paren {
                    appel: None,
                    virgules: 0,
                });
                attend_valeur = true;
            }

            Tok::Virgule => {
                if attend_valeur {
                    return Err(invalide("argument manquant avant ','"));
                }
                match depile_jusqu_a_paren(&mut ops, &mut out) {
                    Some((Some(nom), virgules)) => ops.push(Entree::Paren {
                        appel: Some(nom),
                        virgules: virgules + 1,
                    }),
                    _ => return Err(invalide("',' hors d’un appel de fonction")),
                }
                attend_valeur = true;
            }

            Tok::RPar => {
                if attend_valeur {
                    return Err(invalide("')' inattendue : opérande manquant"));
                }
                let (appel, virgules) = depile_jusqu_a_paren(&mut ops, &mut out)
                    .ok_or_else(|| invalide("')' sans '(' correspondante"))?;
                profondeur -= 1;
                if let Some(nom) = appel {
                    out.push(Tok::Appel {
                        nom,
                        nargs: virgules + 1,
                    });
                }
                attend_valeur = false;
            }

            Tok::Plus | Tok::Minus if attend_valeur => {
                // unaire : préfixe, ne dépile rien
                let unaire = if matches!(tok, Tok::Minus) {
                    Tok::Neg
                } else {
                    Tok::Pos
                };
                ops.push(Entree::Op(unaire));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::DoubleStar => {
                if attend_valeur {
                    return Err(invalide(format!(
                        "opérateur inattendu: '{}'",
                        format_tokens(std::slice::from_ref(tok))
                    )));
                }

                // dépile tant que:
                // - on n'est pas bloqué par '('
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(Entree::Op(top)) = ops.last() {
                    let p_top = precedence(top);
                    let p_tok = precedence(tok);

                    let doit_pop = if is_right_associative(tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };
                    if !doit_pop {
                        break;
                    }
                    if let Some(Entree::Op(t)) = ops.pop() {
                        out.push(t);
                    }
                }

                ops.push(Entree::Op(tok.clone()));
                attend_valeur = true;
            }

            Tok::Neg | Tok::Pos | Tok::Appel { .. } => {
                return Err(invalide("jeton interne inattendu"));
            }
        }
    }

    if attend_valeur {
        return Err(invalide("expression incomplète"));
    }

    // vide la pile ops
    while let Some(e) = ops.pop() {
        match e {
            Entree::Op(t) => out.push(t),
            Entree::Paren { .. } => return Err(invalide("parenthèses non fermées")),
        }
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
///
/// Chaque nom passe par la liste blanche :
/// - Ident(name)  => doit être une constante
/// - Appel{name}  => doit être une fonction, avec la bonne arité
///
/// Tout le reste est refusé : aucun nom libre n’atteint l’arbre.
/// La profondeur de l’arbre est bornée (MAX_PROFONDEUR_ARBRE) : évaluation,
/// affichage et libération, tous récursifs, restent sûrs.
pub fn from_rpn(rpn: &[Tok]) -> ResultatCalcul<Expr> {
    // chaque noeud porte sa profondeur (feuille = 1)
    let mut st: Vec<(Expr, usize)> = Vec::new();

    for tok in rpn {
        match tok {
            Tok::Num(v) => st.push((Expr::Nombre(*v), 1)),

            Tok::Ident(name) => match resoudre(name) {
                Some(Symbole::Constante(v)) => st.push((Expr::Nombre(v), 1)),
                Some(Symbole::Fonction(f)) => {
                    return Err(invalide(format!(
                        "la fonction '{}' doit être appelée",
                        f.nom()
                    )))
                }
                None => return Err(nom_refuse(name)),
            },

            Tok::Neg | Tok::Pos => {
                let (x, p) = st.pop().ok_or_else(|| invalide("expression invalide"))?;
                if matches!(tok, Tok::Neg) {
                    empile(&mut st, Expr::Neg(Box::new(x)), p + 1)?;
                } else {
                    st.push((x, p));
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::DoubleStar => {
                let (b, pb) = st.pop().ok_or_else(|| invalide("expression invalide"))?;
                let (a, pa) = st.pop().ok_or_else(|| invalide("expression invalide"))?;
                let (a, b) = (Box::new(a), Box::new(b));

                let e = match tok {
                    Tok::Plus => Expr::Add(a, b),
                    Tok::Minus => Expr::Sub(a, b),
                    Tok::Star => Expr::Mul(a, b),
                    Tok::Slash => Expr::Div(a, b),
                    _ => Expr::Pow(a, b),
                };
                empile(&mut st, e, pa.max(pb) + 1)?;
            }

            Tok::Appel { nom, nargs } => {
                let f = match resoudre(nom) {
                    Some(Symbole::Fonction(f)) => f,
                    Some(Symbole::Constante(_)) => {
                        return Err(invalide(format!("'{nom}' n’est pas une fonction")))
                    }
                    None => return Err(nom_refuse(nom)),
                };
                if *nargs != f.arite() {
                    return Err(invalide(format!(
                        "{}() attend {} argument(s), reçu {}",
                        f.nom(),
                        f.arite(),
                        nargs
                    )));
                }
                if st.len() < *nargs {
                    return Err(invalide("expression invalide"));
                }
                let (args, profondeurs): (Vec<Expr>, Vec<usize>) =
                    st.split_off(st.len() - nargs).into_iter().unzip();
                let p = profondeurs.into_iter().max().unwrap_or(0) + 1;
                empile(&mut st, Expr::Appel(f, args), p)?;
            }

            Tok::LPar | Tok::RPar | Tok::Virgule => {
                return Err(invalide("parenthèse inattendue en RPN"))
            }
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some((e, _)), true) => Ok(e),
        _ => Err(invalide("expression invalide")),
    }
}
