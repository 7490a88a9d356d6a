// src/main.rs
//
// Calculatrice — point d’entrée
// -----------------------------
// - sans argument      : boucle interactive (stdin/stdout)
// - avec une expression : évaluation unique, code de sortie 1 si erreur

use std::io;
use std::process::ExitCode;

use clap::Parser;

use calculatrice::app::config::Config;
use calculatrice::app::init_logging;
use calculatrice::app::vue::{evaluer_une_fois, Session};

fn main() -> anyhow::Result<ExitCode> {
    let config = Config::parse();
    init_logging(&config);

    if let Some(expr) = config.expression() {
        let ok = evaluer_une_fois(
            &expr,
            config.demarche,
            &mut io::stdout().lock(),
            &mut io::stderr().lock(),
        )?;
        return Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }

    Session::new(io::stdin().lock(), io::stdout().lock(), config.demarche).executer()?;
    Ok(ExitCode::SUCCESS)
}
