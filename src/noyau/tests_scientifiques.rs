//! Tests scientifiques (campagne) : invariants + scénarios complets.
//!
//! But : vérifier les lois du noyau sur les 16 angles, sans faire chauffer la machine.
//! - budget temps global
//! - formatage canonique des radians (table fermée)
//! - aller-retour lecture(format(x)) ≈ x pour toutes les valeurs exactes
//! - scénarios de correction de bout en bout (45°, 90°, point non complété)

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use approx::assert_abs_diff_eq;
use rstest::rstest;

use super::angles::{Angle, ANGLES};
use super::correction::{corriger, Score, TOLERANCE};
use super::format::format_valeur;
use super::lecture::{evaluer, SENTINELLE_INDEFINI};
use super::saisie::{Champ, EntreeUtilisateur, Reglages};

fn angle(d: u16) -> Angle {
    Angle::depuis_degres(d).unwrap_or_else(|| panic!("angle hors table: {d}"))
}

/// Budget global anti-gel (scientifique + safe).
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/// Toutes les valeurs attendues d’un angle (tangente indéfinie exclue).
fn valeurs_exactes(a: Angle) -> Vec<(Champ, f64)> {
    let r = a.reponse_exacte();
    let mut v = vec![
        (Champ::X, r.x),
        (Champ::Y, r.y),
        (Champ::Radians, r.radians),
        (Champ::Sinus, r.sinus),
        (Champ::Cosinus, r.cosinus),
    ];
    if let Some(t) = r.tangente {
        v.push((Champ::Tangente, t));
    }
    v
}

fn entree_complete(angle_txt: &str, champs: [&str; 6]) -> EntreeUtilisateur {
    let [x, y, radians, sinus, cosinus, tangente] = champs;
    EntreeUtilisateur {
        complete: true,
        angle: angle_txt.into(),
        x: x.into(),
        y: y.into(),
        radians: radians.into(),
        sinus: sinus.into(),
        cosinus: cosinus.into(),
        tangente: tangente.into(),
    }
}

/// Réponses canoniques (celles de la page de référence) pour un angle.
fn entree_parfaite(a: Angle) -> EntreeUtilisateur {
    let r = a.reponse_exacte();
    EntreeUtilisateur {
        complete: true,
        angle: a.degres().to_string(),
        x: format_valeur(r.x),
        y: format_valeur(r.y),
        radians: format_valeur(r.radians),
        sinus: format_valeur(r.sinus),
        cosinus: format_valeur(r.cosinus),
        tangente: r
            .tangente
            .map_or_else(|| "undefined".to_string(), format_valeur),
    }
}

/* ------------------------ Formatage canonique ------------------------ */

#[rstest]
#[case(0, "0")]
#[case(30, "π/6")]
#[case(45, "π/4")]
#[case(60, "π/3")]
#[case(90, "π/2")]
#[case(120, "2π/3")]
#[case(135, "3π/4")]
#[case(150, "5π/6")]
#[case(180, "π")]
#[case(210, "7π/6")]
#[case(225, "5π/4")]
#[case(240, "4π/3")]
#[case(270, "3π/2")]
#[case(300, "5π/3")]
#[case(315, "7π/4")]
#[case(330, "11π/6")]
fn sci_radians_canoniques(#[case] degres: u16, #[case] attendu: &str) {
    assert_eq!(format_valeur(angle(degres).radians()), attendu);
}

#[rstest]
#[case(30, "√3/2", "1/2", "√3/3")]
#[case(45, "√2/2", "√2/2", "1")]
#[case(60, "1/2", "√3/2", "√3")]
#[case(120, "-1/2", "√3/2", "-√3")]
#[case(150, "-√3/2", "1/2", "-√3/3")]
#[case(180, "-1", "0", "0")]
#[case(315, "√2/2", "-√2/2", "-1")]
fn sci_coordonnees_canoniques(
    #[case] degres: u16,
    #[case] cos: &str,
    #[case] sin: &str,
    #[case] tan: &str,
) {
    let r = angle(degres).reponse_exacte();
    assert_eq!(format_valeur(r.cosinus), cos, "cos {degres}°");
    assert_eq!(format_valeur(r.sinus), sin, "sin {degres}°");
    let t = r.tangente.map(format_valeur);
    assert_eq!(t.as_deref(), Some(tan), "tan {degres}°");
}

/* ------------------------ Lois d’aller-retour ------------------------ */

#[test]
fn sci_aller_retour_toutes_valeurs() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    for a in ANGLES {
        budget(t0, max);
        for (champ, x) in valeurs_exactes(a) {
            let texte = format_valeur(x);
            let relu = evaluer(&texte);
            assert!(
                (relu - x).abs() <= TOLERANCE,
                "{champ} à {a}: {x} -> {texte:?} -> {relu}"
            );
        }
    }
}

#[test]
fn sci_format_stable() {
    // même entrée => même texte, et format(lecture(format(x))) == format(x)
    for a in ANGLES {
        for (_, x) in valeurs_exactes(a) {
            let s = format_valeur(x);
            assert_eq!(s, format_valeur(x));
            assert_eq!(format_valeur(evaluer(&s)), s, "x={x}");
        }
    }
}

/* ------------------------ Lecture : cas remarquables ------------------------ */

#[test]
fn sci_indefini_et_zero() {
    assert_eq!(evaluer("undefined"), SENTINELLE_INDEFINI);
    assert_eq!(evaluer("  UnDeFiNeD "), SENTINELLE_INDEFINI);

    assert_eq!(evaluer("0"), 0.0);
    assert_eq!(evaluer("-0"), 0.0);
    assert!(evaluer("-0") == 0.0 && evaluer("0.000") == 0.0);
}

#[test]
fn sci_lectures_equivalentes() {
    let cibles = [
        ("√3/2", 0.866_025_4),
        ("sqrt(3)/2", 0.866_025_4),
        ("SquareRoot(3) / 2", 0.866_025_4),
        ("-root(2)/2", -0.707_106_78),
        ("3π/2", 4.712_388_98),
        ("3*pi/2", 4.712_388_98),
        ("(1/2)", 0.5),
        ("½", 0.5),
        (".5", 0.5),
        ("2√3/6", 0.577_350_27),
        ("1/√3", 0.577_350_27),
    ];
    for (texte, attendu) in cibles {
        assert_abs_diff_eq!(evaluer(texte), attendu, epsilon = 1e-7);
    }
}

#[test]
fn sci_lectures_refusees() {
    for texte in ["", "abc", "1/0", "√(-1)", "2^3", "((1)", "alert(1)", "1..2"] {
        assert!(evaluer(texte).is_nan(), "texte={texte:?}");
    }
}

/* ------------------------ Correction : scénarios ------------------------ */

#[test]
fn sci_scenario_45_tout_juste() {
    let mut entrees = BTreeMap::new();
    entrees.insert(
        angle(45),
        entree_complete("45", ["√2/2", "√2/2", "pi/4", "root(2)/2", "0.7071", "1"]),
    );

    let bilan = corriger(&entrees, &Reglages::default());
    assert_eq!(bilan.score, Score { justes: 6, total: 6 });
    assert!(bilan
        .ecarts
        .iter()
        .all(|e| e.champ == Champ::Point && e.angle != angle(45)));
    assert_eq!(bilan.ecarts.len(), 15);
}

#[test]
fn sci_scenario_90_tangente() {
    let mut entrees = BTreeMap::new();
    entrees.insert(
        angle(90),
        entree_complete("90", ["0", "1", "π/2", "1", "0", "Undefined"]),
    );
    let bilan = corriger(&entrees, &Reglages::default());
    assert!(!bilan.ecarts.iter().any(|e| e.angle == angle(90)));
    assert_eq!(bilan.score, Score { justes: 6, total: 6 });

    entrees.insert(
        angle(90),
        entree_complete("90", ["0", "1", "π/2", "1", "0", "1"]),
    );
    let bilan = corriger(&entrees, &Reglages::default());
    let ecarts_90: Vec<_> = bilan
        .ecarts
        .iter()
        .filter(|e| e.angle == angle(90))
        .collect();
    assert_eq!(ecarts_90.len(), 1);
    assert_eq!(ecarts_90[0].champ, Champ::Tangente);
    assert_eq!(ecarts_90[0].saisie, "1");
    assert_eq!(ecarts_90[0].attendu, "undefined");
}

#[test]
fn sci_scenario_point_non_complete() {
    let mut entrees: BTreeMap<Angle, EntreeUtilisateur> =
        ANGLES.iter().map(|a| (*a, entree_parfaite(*a))).collect();

    // 0° rempli mais jamais enregistré
    if let Some(e) = entrees.get_mut(&angle(0)) {
        e.complete = false;
    }

    let bilan = corriger(&entrees, &Reglages::default());
    assert_eq!(bilan.score, Score { justes: 90, total: 90 });
    assert_eq!(bilan.ecarts.len(), 1);
    assert_eq!(bilan.ecarts[0].angle, angle(0));
    assert_eq!(bilan.ecarts[0].champ, Champ::Point);
}

#[test]
fn sci_cercle_parfait() {
    let entrees: BTreeMap<Angle, EntreeUtilisateur> =
        ANGLES.iter().map(|a| (*a, entree_parfaite(*a))).collect();

    let bilan = corriger(&entrees, &Reglages::default());
    assert!(bilan.parfait(), "écarts: {:?}", bilan.ecarts);
    assert_eq!(bilan.score, Score { justes: 96, total: 96 });

    let (titre, description) = bilan.resume();
    assert_eq!(titre, "Score : 96/96");
    assert!(description.starts_with("Parfait"));
}

#[test]
fn sci_reglages_reduisent_le_total() {
    let entrees: BTreeMap<Angle, EntreeUtilisateur> =
        ANGLES.iter().map(|a| (*a, entree_parfaite(*a))).collect();

    let reglages = Reglages {
        coordonnees: false,
        tangente: false,
        ..Reglages::default()
    };
    let bilan = corriger(&entrees, &reglages);
    // radians + sinus + cosinus
    assert_eq!(bilan.score, Score { justes: 48, total: 48 });
}

#[test]
fn sci_frontiere_tolerance() {
    // sin 30° = 0.5 : écart de 1e-4 accepté, au-delà refusé
    let mut entrees = BTreeMap::new();
    let mut e = entree_parfaite(angle(30));
    e.sinus = "0.5001".into();
    e.cosinus = "0.86600254".into(); // attendu 0.866 (4 décimales) : écart 2.54e-6
    entrees.insert(angle(30), e.clone());
    let bilan = corriger(&entrees, &Reglages::default());
    assert_eq!(bilan.score, Score { justes: 6, total: 6 });

    e.sinus = "0.500101".into();
    entrees.insert(angle(30), e);
    let bilan = corriger(&entrees, &Reglages::default());
    assert_eq!(bilan.score, Score { justes: 5, total: 6 });
    assert!(bilan
        .ecarts
        .iter()
        .any(|x| x.angle == angle(30) && x.champ == Champ::Sinus));
}
