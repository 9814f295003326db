// src/noyau/format.rs
//
// Formatage canonique : f64 -> texte symbolique (√3/2, π/6, 3π/2…)
// ----------------------------------------------------------------
// 1) table exacte (égalité flottante stricte), avec alias : plusieurs
//    littéraux flottants peuvent porter le même symbole
// 2) |v| < 10 : fractions de π nommées (tolérance 1e-4), signe géré
// 3) formes racines nommées (même tolérance, même gestion du signe)
// 4) repli : 4 décimales
//
// Fonction pure : la même entrée donne toujours le même texte (sert à l’affichage
// ET à la comparaison textuelle des radians dans la correction).

use std::f64::consts::PI;

use num_rational::Rational64;
use num_traits::{One, Zero};

/// Tolérance absolue des correspondances symboliques.
pub const TOLERANCE_SYMBOLE: f64 = 1e-4;

/// Fractions de π nommées (côté positif), sous forme k/n.
pub const FRACTIONS_PI: [(i64, i64); 15] = [
    (1, 6),
    (1, 4),
    (1, 3),
    (1, 2),
    (2, 3),
    (3, 4),
    (5, 6),
    (1, 1),
    (5, 4),
    (4, 3),
    (3, 2),
    (5, 3),
    (7, 4),
    (11, 6),
    (2, 1),
];

/// Formes racines nommées (côté positif).
pub const FORMES_RACINES: [(&str, u32, u32); 5] = [
    ("√2", 2, 1),
    ("√3", 3, 1),
    ("√2/2", 2, 2),
    ("√3/2", 3, 2),
    ("√3/3", 3, 3),
];

/// Table exacte. Alias explicites : la même étiquette peut apparaître
/// pour plusieurs littéraux (ex. deux chemins de calcul de 3π/2).
const TABLE_EXACTE: &[(f64, &str)] = &[
    (0.0, "0"),
    (1.0, "1"),
    (-1.0, "-1"),
    (0.5, "1/2"),
    (-0.5, "-1/2"),
    // 30°/150°
    (0.8660254037844386, "√3/2"),
    (-0.8660254037844386, "-√3/2"),
    (0.8660254, "√3/2"),
    (-0.8660254, "-√3/2"),
    // 45°/135°
    (0.7071067811865476, "√2/2"),
    (-0.7071067811865476, "-√2/2"),
    (0.7071068, "√2/2"),
    (-0.7071068, "-√2/2"),
    // tangentes usuelles
    (1.7320508075688772, "√3"),
    (-1.7320508075688772, "-√3"),
    (1.7320508, "√3"),
    (-1.7320508, "-√3"),
    // radians
    (PI, "π"),
    (PI / 2.0, "π/2"),
    (-PI / 2.0, "-π/2"),
    (3.0 * PI / 2.0, "3π/2"),
    (4.7123889803847, "3π/2"),
    (PI / 6.0, "π/6"),
    (-PI / 6.0, "-π/6"),
    (PI / 3.0, "π/3"),
    (-PI / 3.0, "-π/3"),
    (2.0 * PI / 3.0, "2π/3"),
    (-2.0 * PI / 3.0, "-2π/3"),
    (3.0 * PI / 4.0, "3π/4"),
    (-3.0 * PI / 4.0, "-3π/4"),
    (5.0 * PI / 6.0, "5π/6"),
    (-5.0 * PI / 6.0, "-5π/6"),
    (7.0 * PI / 6.0, "7π/6"),
    (3.6651914291881, "7π/6"),
    (5.0 * PI / 4.0, "5π/4"),
    (4.0 * PI / 3.0, "4π/3"),
    (5.0 * PI / 3.0, "5π/3"),
    (7.0 * PI / 4.0, "7π/4"),
    (11.0 * PI / 6.0, "11π/6"),
];

/* ------------------------ π “joli” ------------------------ */

/// coeff*π : affichage joli (π/2, 3π/2, -2π, etc.)
pub fn format_coeff_pi(coeff: &Rational64) -> String {
    let n = *coeff.numer();
    let d = *coeff.denom();

    if coeff.is_zero() {
        return "0".to_string();
    }

    // ±π
    if d.is_one() && (n == 1 || n == -1) {
        return if n == 1 {
            "π".to_string()
        } else {
            "-π".to_string()
        };
    }

    // kπ
    if d.is_one() {
        return format!("{n}π");
    }

    // π/d
    if n == 1 {
        return format!("π/{d}");
    }
    if n == -1 {
        return format!("-π/{d}");
    }

    // kπ/d
    format!("{n}π/{d}")
}

/// Valeur flottante d’une fraction k/n de π (même chemin que `Angle::radians`).
pub fn valeur_fraction_pi(k: i64, n: i64) -> f64 {
    (k as f64) * PI / (n as f64)
}

/// Valeur flottante de √r/d.
pub fn valeur_forme_racine(radicande: u32, diviseur: u32) -> f64 {
    f64::from(radicande).sqrt() / f64::from(diviseur)
}

/* ------------------------ Formatage canonique ------------------------ */

/// f64 -> texte canonique (symbolique si reconnu, sinon 4 décimales).
pub fn format_valeur(valeur: f64) -> String {
    // 1) table exacte
    if let Some((_, s)) = TABLE_EXACTE.iter().find(|(v, _)| *v == valeur) {
        return (*s).to_string();
    }

    // 2) fractions de π (valeurs “raisonnables” seulement)
    if valeur.abs() < 10.0 {
        for (k, n) in FRACTIONS_PI {
            let nom = format_coeff_pi(&Rational64::new(k, n));
            if let Some(s) = correspondance_signee(valeur, valeur_fraction_pi(k, n), &nom) {
                return s;
            }
        }
    }

    // 3) racines
    for (nom, r, d) in FORMES_RACINES {
        if let Some(s) = correspondance_signee(valeur, valeur_forme_racine(r, d), nom) {
            return s;
        }
    }

    // 4) repli
    format!("{valeur:.4}")
}

/// `nom` si valeur ≈ cible, `-nom` si valeur ≈ -cible.
fn correspondance_signee(valeur: f64, cible: f64, nom: &str) -> Option<String> {
    if (valeur - cible).abs() < TOLERANCE_SYMBOLE {
        return Some(nom.to_string());
    }
    if (valeur + cible).abs() < TOLERANCE_SYMBOLE {
        return Some(format!("-{nom}"));
    }
    None
}
