// src/app.rs
//
// Calculatrice — module App (racine)
// ---------------------------------
// Rôle:
// - Déclarer les sous-modules (config.rs + etat.rs + vue.rs)
// - Initialiser la journalisation (stderr : stdout reste réservé aux résultats)

pub mod config;
pub mod etat;
pub mod vue;

use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

use config::Config;

/// Initialise tracing. RUST_LOG, s’il est défini, remplace le niveau issu de -v.
pub fn init_logging(config: &Config) {
    let filtre =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filtre)
        .with_writer(std::io::stderr)
        .with_target(config.verbose >= 2)
        .init();

    debug!("calculatrice démarrée, verbosité {}", config.verbose);
    trace!("arguments: {:?}", std::env::args().collect::<Vec<_>>());
}
