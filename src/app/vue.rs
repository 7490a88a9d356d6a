// src/app/vue.rs
//
// Vue (texte) — boucle interactive + évaluation unique
// -----------------------------------------------------
// - Même rendu pour les deux modes : "= <résultat>" ou "Erreur : <message>"
// - Entrée/sortie génériques (BufRead / Write) : la session se teste sans terminal
// - Fin d’entrée (Ctrl-D) = sortie propre

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use super::etat::{Action, Etat};
use crate::noyau::{evaluer_avec_demarche, format_resultat, Demarche, ErreurCalcul};

const BANNIERE: &str = "\
Calculatrice
Opérations : +, -, *, /, ** (puissance), % (pourcentage), sqrt
Expressions : + - * / **, parenthèses, sqrt(x), pow(a, b), pi, e
Tapez 'q' pour quitter.
";

const MENU: &str = "\
Choisir un mode :
 1) a op b   (opération simple)
 2) expr     (expression, ex: '2 + 3 * sqrt(4)')
 q) quitter
";

fn ecrire_resultat(sortie: &mut impl Write, v: f64) -> io::Result<()> {
    writeln!(sortie, "= {}", format_resultat(v))
}

fn ecrire_erreur(sortie: &mut impl Write, e: &ErreurCalcul) -> io::Result<()> {
    writeln!(sortie, "Erreur : {e}")
}

fn ecrire_demarche(sortie: &mut impl Write, d: &Demarche) -> io::Result<()> {
    writeln!(sortie, "  jetons : {}", d.jetons)?;
    writeln!(sortie, "  rpn    : {}", d.rpn)?;
    writeln!(sortie, "  arbre  : {}", d.arbre)
}

/// Évalue une expression une seule fois (mode non interactif).
/// Résultat sur `sortie`, erreur sur `erreurs`. Retourne false en cas d’erreur de calcul.
pub fn evaluer_une_fois(
    expr: &str,
    demarche: bool,
    sortie: &mut impl Write,
    erreurs: &mut impl Write,
) -> io::Result<bool> {
    match evaluer_avec_demarche(expr) {
        Ok((v, d)) => {
            if demarche {
                ecrire_demarche(sortie, &d)?;
            }
            ecrire_resultat(sortie, v)?;
            Ok(true)
        }
        Err(e) => {
            warn!(expression = expr, erreur = %e, "évaluation refusée");
            ecrire_erreur(erreurs, &e)?;
            Ok(false)
        }
    }
}

/// Session interactive : lit des lignes, fait avancer `Etat`, exécute les actions.
pub struct Session<R, W> {
    entree: R,
    sortie: W,
    demarche: bool,
    etat: Etat,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(entree: R, sortie: W, demarche: bool) -> Self {
        Self {
            entree,
            sortie,
            demarche,
            etat: Etat::Menu,
        }
    }

    /// Boucle principale. Ne s’arrête que sur un mot-clé de sortie ou en fin d’entrée ;
    /// les erreurs de calcul sont affichées puis la boucle continue.
    pub fn executer(&mut self) -> io::Result<()> {
        writeln!(self.sortie, "{BANNIERE}")?;

        while self.etat != Etat::Termine {
            if self.etat == Etat::Menu {
                write!(self.sortie, "{MENU}")?;
            }

            let Some(ligne) = self.lire(self.etat.invite())? else {
                debug!("fin d’entrée");
                writeln!(self.sortie)?;
                break;
            };

            let (suivant, action) = self.etat.avancer(&ligne);
            self.etat = suivant;

            if let Some(action) = action {
                self.executer_action(action)?;
            }
        }

        self.sortie.flush()
    }

    /// Affiche l’invite puis lit une ligne. None en fin d’entrée.
    fn lire(&mut self, invite: &str) -> io::Result<Option<String>> {
        write!(self.sortie, "{invite}")?;
        self.sortie.flush()?;

        let mut ligne = String::new();
        if self.entree.read_line(&mut ligne)? == 0 {
            return Ok(None);
        }
        Ok(Some(ligne))
    }

    fn executer_action(&mut self, action: Action) -> io::Result<()> {
        match action {
            Action::Calculer { op, a, b } => {
                debug!(?op, a, b, "opération");
                match op.appliquer(a, b) {
                    Ok(v) => ecrire_resultat(&mut self.sortie, v)?,
                    Err(e) => ecrire_erreur(&mut self.sortie, &e)?,
                }
            }
            Action::Evaluer(expr) => match evaluer_avec_demarche(&expr) {
                Ok((v, d)) => {
                    if self.demarche {
                        ecrire_demarche(&mut self.sortie, &d)?;
                    }
                    ecrire_resultat(&mut self.sortie, v)?;
                }
                Err(e) => {
                    debug!(expression = %expr, erreur = %e, "évaluation refusée");
                    ecrire_erreur(&mut self.sortie, &e)?;
                }
            },
            Action::Erreur(e) => ecrire_erreur(&mut self.sortie, &e)?,
            Action::Quitter => {
                writeln!(self.sortie, "Au revoir.")?;
                return Ok(());
            }
        }
        writeln!(self.sortie)
    }
}
