// src/app/config.rs
//
// Configuration issue de la ligne de commande.
// Sans expression : boucle interactive. Avec : évaluation unique puis sortie.

use clap::Parser;

/// Calculatrice : opérations de base et évaluateur d’expressions restreint
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "calculatrice", version, about, long_about = None)]
pub struct Config {
    /// Verbosité des journaux sur stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Afficher la démarche (jetons, RPN, arbre) de chaque expression
    #[arg(long)]
    pub demarche: bool,

    /// Expression à évaluer une seule fois (ex: 2 * sqrt(9))
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub expression: Vec<String>,
}

impl Config {
    /// Filtre de journalisation par défaut (RUST_LOG reste prioritaire).
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Expression à évaluer en mode non interactif, si fournie.
    pub fn expression(&self) -> Option<String> {
        if self.expression.is_empty() {
            None
        } else {
            Some(self.expression.join(" "))
        }
    }
}
