// src/noyau/jetons.rs

use super::erreur::{ErreurCalcul, ResultatCalcul};
use super::format::format_resultat;

/// Garde-fou : longueur maximale d’une expression (en octets).
pub const MAX_LONGUEUR: usize = 4096;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Identifiant brut : la liste blanche décidera (constante, fonction, ou refus).
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    DoubleStar, // **

    LPar,
    RPar,
    Virgule,

    // Produits uniquement par to_rpn (jamais par tokenize) :
    Neg,                                  // moins unaire
    Pos,                                  // plus unaire
    Appel { nom: String, nargs: usize }, // appel de fonction, arguments déjà en sortie
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux : 12, 3.5, .5, 2., 1e3, 2.5E-4
/// - opérateurs + - * / **
/// - parenthèses ( ) et virgule
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (sensibles à la casse)
///
/// Tout autre caractère est refusé (guillemets, crochets, point d’attribut, ^, %, ;, =...).
pub fn tokenize(s: &str) -> ResultatCalcul<Vec<Tok>> {
    if s.len() > MAX_LONGUEUR {
        return Err(ErreurCalcul::argument(format!(
            "expression trop longue (max {MAX_LONGUEUR} caractères)"
        )));
    }

    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Tok::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Tok::RPar);
                i += 1;
                continue;
            }
            ',' => {
                out.push(Tok::Virgule);
                i += 1;
                continue;
            }
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '*' => {
                if i + 1 < chars.len() && chars[i + 1] == '*' {
                    out.push(Tok::DoubleStar);
                    i += 2;
                } else {
                    out.push(Tok::Star);
                    i += 1;
                }
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            _ => {}
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            out.push(Tok::Ident(chars[start..i].iter().collect()));
            continue;
        }

        // Nombre : chiffres [. chiffres] [e [+-] chiffres], ou . chiffres ...
        let debut_fraction = c == '.' && i + 1 < chars.len() && chars[i + 1].is_ascii_digit();
        if c.is_ascii_digit() || debut_fraction {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }

            // Exposant seulement s’il est complet ; sinon "2e" reste Num(2) Ident(e)
            // et c’est le parseur qui refusera deux valeurs adjacentes.
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let mut j = i + 1;
                if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    while j < chars.len() && chars[j].is_ascii_digit() {
                        j += 1;
                    }
                    i = j;
                }
            }

            let lit: String = chars[start..i].iter().collect();
            let v = lit
                .parse::<f64>()
                .map_err(|_| ErreurCalcul::argument(format!("nombre invalide: '{lit}'")))?;
            out.push(Tok::Num(v));
            continue;
        }

        return Err(ErreurCalcul::argument(format!(
            "caractère inattendu: '{c}'"
        )));
    }

    Ok(out)
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::with_capacity(tokens.len());
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format_resultat(*v),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::DoubleStar => "**".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
            Tok::Virgule => ",".to_string(),

            Tok::Neg => "neg".to_string(),
            Tok::Pos => "pos".to_string(),
            Tok::Appel { nom, nargs } => format!("{nom}/{nargs}"),
        };
        out.push(s);
    }
    out.join(" ")
}
