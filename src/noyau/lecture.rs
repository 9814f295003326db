// src/noyau/lecture.rs
//
// Lecture d’une réponse libre -> f64
// ----------------------------------
// 1) compactage : trim + suppression des espaces + minuscules
// 2) "undefined" -> +∞ (sentinelle tangente indéfinie)
// 3) table de littéraux canoniques (√3/2, sqrt(3)/2, pi/6, π/6, .5, ½…)
// 4) sinon : première barre '/' hors parenthèses => numérateur / dénominateur,
//    chacun relu récursivement
// 5) sinon : jetons -> RPN -> f64 (arithmétique restreinte, rien d’autre)
// Résultat fini arrondi à 8 décimales ; toute erreur donne NaN.

use std::collections::HashMap;
use std::sync::OnceLock;

use num_rational::Rational64;
use thiserror::Error;

use super::angles::arrondi;
use super::format::{
    format_coeff_pi, valeur_fraction_pi, valeur_forme_racine, FORMES_RACINES, FRACTIONS_PI,
};
use super::jetons::{format_tokens, tokenize};
use super::rpn::{eval_rpn, to_rpn};

/// Valeur renvoyée pour "undefined" (tangente indéfinie).
pub const SENTINELLE_INDEFINI: f64 = f64::INFINITY;

/// Précision de lecture (anti bruit flottant).
pub const CHIFFRES_LECTURE: i32 = 8;

/// Mots acceptés pour une tangente indéfinie (après compactage).
const MOTS_INDEFINI: [&str; 3] = ["undefined", "indéfini", "indefini"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurLecture {
    #[error("entrée vide")]
    Vide,

    #[error("caractère inattendu: '{0}'")]
    CaractereInattendu(char),

    #[error("mot inconnu: {0:?}")]
    MotInconnu(String),

    #[error("nombre invalide: {0:?}")]
    NombreInvalide(String),

    #[error("parenthèses mal appariées")]
    Parentheses,

    #[error("expression invalide")]
    ExpressionInvalide,

    #[error("division par zéro")]
    DivisionParZero,

    #[error("√ : argument négatif")]
    RacineNegative,

    #[error("valeur non finie")]
    NonFini,
}

/// trim + sans espaces + minuscules.
pub fn compacter(texte: &str) -> String {
    texte
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// "undefined" (insensible à la casse et aux espaces).
pub fn est_indefini(texte: &str) -> bool {
    MOTS_INDEFINI.contains(&compacter(texte).as_str())
}

/// API publique : texte libre -> f64.
/// - NaN si illisible
/// - +∞ pour "undefined"
pub fn evaluer(texte: &str) -> f64 {
    let s = compacter(texte);

    if MOTS_INDEFINI.contains(&s.as_str()) {
        return SENTINELLE_INDEFINI;
    }

    if let Some(v) = litteraux().get(s.as_str()) {
        return arrondi(*v, CHIFFRES_LECTURE);
    }

    match lire(&s) {
        Ok(v) => arrondi(v, CHIFFRES_LECTURE),
        Err(e) => {
            log::debug!("lecture refusée {texte:?}: {e}");
            f64::NAN
        }
    }
}

/// Lecture stricte (sans table de littéraux ni arrondi).
pub fn lire(expr: &str) -> Result<f64, ErreurLecture> {
    let s = expr.trim();
    if s.is_empty() {
        return Err(ErreurLecture::Vide);
    }

    // fraction : a/b/c se lit a/(b/c), repli de droite à gauche (sans récursion)
    let segments = segments_barres(s);
    let mut iter = segments.iter().rev();
    let Some(dernier) = iter.next() else {
        return Err(ErreurLecture::Vide);
    };
    let mut acc = lire_segment(dernier)?;
    for seg in iter {
        let num = lire_segment(seg)?;
        if acc == 0.0 {
            return Err(ErreurLecture::DivisionParZero);
        }
        acc = num / acc;
        if !acc.is_finite() {
            return Err(ErreurLecture::NonFini);
        }
    }
    Ok(acc)
}

/// Un morceau sans barre de niveau 0.
fn lire_segment(seg: &str) -> Result<f64, ErreurLecture> {
    let s = seg.trim();
    if s.is_empty() {
        return Err(ErreurLecture::Vide);
    }

    let jetons = tokenize(s)?;
    let rpn = to_rpn(&jetons)?;
    log::trace!("{s:?} => rpn [{}]", format_tokens(&rpn));

    eval_rpn(&rpn)
}

/// Morceaux séparés par les '/' hors parenthèses (au moins un).
fn segments_barres(s: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut debut = 0;
    let mut profondeur: i32 = 0;
    for (i, c) in s.char_indices() {
        match c {
            '(' => profondeur += 1,
            ')' => profondeur -= 1,
            '/' if profondeur == 0 => {
                segments.push(&s[debut..i]);
                debut = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&s[debut..]);
    segments
}

/* ------------------------ Table des littéraux ------------------------ */

static LITTERAUX: OnceLock<HashMap<String, f64>> = OnceLock::new();

fn litteraux() -> &'static HashMap<String, f64> {
    LITTERAUX.get_or_init(construire_litteraux)
}

/// Ajoute `forme` -> v et `-forme` -> -v.
fn inserer_signe(table: &mut HashMap<String, f64>, forme: &str, v: f64) {
    table.insert(forme.to_string(), v);
    table.insert(format!("-{forme}"), -v);
}

/// Écritures d’une racine : √3, √(3), sqrt(3), sqrt3, root(3), root3, squareroot(3).
fn ecritures_racine(n: u32) -> [String; 7] {
    [
        format!("√{n}"),
        format!("√({n})"),
        format!("sqrt({n})"),
        format!("sqrt{n}"),
        format!("root({n})"),
        format!("root{n}"),
        format!("squareroot({n})"),
    ]
}

fn construire_litteraux() -> HashMap<String, f64> {
    let mut t = HashMap::new();

    // rationnels usuels
    for (forme, v) in [
        ("0", 0.0),
        ("0.0", 0.0),
        ("1", 1.0),
        ("1.0", 1.0),
        ("1/2", 0.5),
        ("0.5", 0.5),
        (".5", 0.5),
        ("½", 0.5),
    ] {
        inserer_signe(&mut t, forme, v);
    }

    // fractions de π : toutes celles que le formatage peut produire (+ 7π/6)
    let mut fractions: Vec<(i64, i64)> = FRACTIONS_PI.to_vec();
    fractions.push((7, 6));
    for (k, n) in fractions {
        let v = valeur_fraction_pi(k, n);
        let canon = format_coeff_pi(&Rational64::new(k, n));
        for pi in ["π", "pi"] {
            inserer_signe(&mut t, &canon.replace('π', pi), v);
            if k != 1 {
                let etoile = if n == 1 {
                    format!("{k}*{pi}")
                } else {
                    format!("{k}*{pi}/{n}")
                };
                inserer_signe(&mut t, &etoile, v);
            }
        }
    }

    // formes racines : √2, √3, √2/2, √3/2, √3/3 (+ 1/√2, 1/√3)
    for (_, r, d) in FORMES_RACINES {
        let v = valeur_forme_racine(r, d);
        for rac in ecritures_racine(r) {
            let forme = if d == 1 { rac.clone() } else { format!("{rac}/{d}") };
            inserer_signe(&mut t, &forme, v);
            if d == r {
                inserer_signe(&mut t, &format!("1/{rac}"), v);
            }
        }
    }

    t
}
