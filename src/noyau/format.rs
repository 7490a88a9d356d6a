// src/noyau/format.rs

/// Affichage d’un résultat flottant.
///
/// - entier => suffixe ".0" (5.0)
/// - sinon  => plus courte écriture décimale qui relit la même valeur (0.1, 6.283185307179586)
/// - inf / -inf / nan en minuscules
pub fn format_resultat(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v.is_sign_positive() {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }
    // Debug garantit le ".0" et l’aller-retour exact.
    format!("{v:?}")
}
