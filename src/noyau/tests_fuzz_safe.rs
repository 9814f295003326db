//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler la lecture et le formatage sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : la lecture ne panique jamais ; résultat fini ou NaN,
//!   +∞ seulement pour "undefined"

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use super::angles::{Angle, ANGLES};
use super::correction::corriger;
use super::format::format_valeur;
use super::lecture::{est_indefini, evaluer, SENTINELLE_INDEFINI};
use super::saisie::{EntreeUtilisateur, Reglages};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
    /// Flottant uniforme dans [a, b).
    fn range(&mut self, a: f64, b: f64) -> f64 {
        a + (b - a) * (f64::from(self.next_u32()) / f64::from(u32::MAX))
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn check_invariant_lecture(texte: &str, v: f64) {
    if v.is_infinite() {
        assert!(
            v == SENTINELLE_INDEFINI && est_indefini(texte),
            "∞ hors \"undefined\": texte={texte:?}"
        );
    }
}

/* ------------------------ Génération de saisies (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    let a = rng.pick(12);
    match rng.pick(4) {
        0 => format!("{a}"),
        1 => format!("{a}.{}", rng.pick(10_000)),
        2 => format!(".{}", rng.pick(100)),
        _ => format!("{a}/{}", rng.pick(7)), // dénominateur 0 possible
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(16) {
        0..=5 => gen_nombre(rng),
        6 | 7 => "π".to_string(),
        8 => "pi".to_string(),
        9 | 10 => format!("√{}", rng.pick(5)),
        11 | 12 => format!("sqrt({})", gen_nombre(rng)),
        13 | 14 => "½".to_string(),
        _ => "undefined".to_string(),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(8) {
        0 => gen_atom(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("{}*{}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("{}/{}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("-{}", gen_expr(rng, depth - 1)),
        6 => format!("root({})", gen_expr(rng, depth - 1)),
        _ => format!("{}{}", gen_atom(rng), gen_atom(rng)), // produit implicite
    }
}

/// Bruit : caractères hors grammaire, parenthèses orphelines, casse mélangée.
fn gen_bruit(rng: &mut Rng) -> String {
    const MORCEAUX: [&str; 14] = [
        "(", ")", "^", "x", "PI", "Sqrt", "..", "1", "/", "-", " ", "√", "e", "tan",
    ];
    let n = 1 + rng.pick(8) as usize;
    (0..n)
        .map(|_| MORCEAUX[rng.pick(MORCEAUX.len() as u32) as usize])
        .collect()
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_invariant_lecture() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    // Même seed => mêmes saisies => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_nan = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 3);
        let v = evaluer(&expr);
        check_invariant_lecture(&expr, v);

        let w = evaluer(&expr);
        assert!(
            v.to_bits() == w.to_bits() || (v.is_nan() && w.is_nan()),
            "non déterministe: {expr:?}"
        );

        if v.is_nan() {
            seen_nan += 1;
        } else {
            seen_ok += 1;
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_nan > 0, "aucun refus vu: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_bruit_jamais_de_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..300 {
        budget(t0, max);

        let texte = gen_bruit(&mut rng);
        let v = evaluer(&texte);
        check_invariant_lecture(&texte, v);
    }
}

#[test]
fn fuzz_safe_format_aller_retour() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..500 {
        budget(t0, max);

        let x = rng.range(-7.0, 7.0);
        let s = format_valeur(x);

        // stable
        assert_eq!(s, format_valeur(x));

        // relu à la tolérance symbolique près (+ demi-unité du repli 4 décimales)
        let relu = evaluer(&s);
        assert!(
            (relu - x).abs() <= 1.1e-4,
            "x={x} -> {s:?} -> {relu}"
        );
    }
}

#[test]
fn fuzz_safe_correction_saisies_aleatoires() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    let mut rng = Rng::new(0xFACADE_u64);

    let entrees: BTreeMap<Angle, EntreeUtilisateur> = ANGLES
        .iter()
        .map(|a| {
            let e = EntreeUtilisateur {
                complete: rng.coin(),
                angle: a.degres().to_string(),
                x: gen_expr(&mut rng, 2),
                y: gen_expr(&mut rng, 2),
                radians: gen_expr(&mut rng, 2),
                sinus: gen_bruit(&mut rng),
                cosinus: gen_expr(&mut rng, 2),
                tangente: gen_atom(&mut rng),
            };
            (*a, e)
        })
        .collect();
    budget(t0, max);

    let bilan = corriger(&entrees, &Reglages::default());
    budget(t0, max);

    let completes = ANGLES
        .iter()
        .filter(|a| entrees.get(*a).is_some_and(|e| e.complete))
        .count() as u32;
    assert_eq!(bilan.score.total, completes * 6);
    assert!(bilan.score.justes <= bilan.score.total);
    assert_eq!(
        bilan.ecarts.len() as u32,
        (16 - completes) + (bilan.score.total - bilan.score.justes)
    );

    // ordre déterministe : angles croissants
    let angles: Vec<Angle> = bilan.ecarts.iter().map(|e| e.angle).collect();
    let mut tries = angles.clone();
    tries.sort();
    assert_eq!(angles, tries);
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // barres dans des parenthèses : pas de découpe, pile RPN seulement
    let expr = somme_balancee("(1/2)", 800);
    budget(t0, max);

    // 800*(1/2) = 400
    assert_eq!(evaluer(&expr), 400.0);
}

#[test]
fn fuzz_safe_barres_en_chaine_sans_recursion() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // 1/(1/(1/…)) : 10 000 barres de niveau 0, collées par un utilisateur
    let expr = format!("{}1", "1/".repeat(10_000));
    let v = evaluer(&expr);
    budget(t0, max);
    assert_eq!(v, 1.0);

    // une barre de trop en fin : refus propre
    let v = evaluer(&format!("{}0", "1/".repeat(10_000)));
    assert!(v.is_nan());
}

#[test]
fn fuzz_safe_grands_nombres_jamais_indefini() {
    for zeros in [15, 100, 301, 308] {
        let texte = format!("1{}", "0".repeat(zeros));
        let v = evaluer(&texte);
        check_invariant_lecture(&texte, v);
        assert!(v.is_finite() || v.is_nan(), "texte de {zeros} zéros -> {v}");
    }

    // au-delà de f64::MAX : refus, jamais la sentinelle
    let texte = format!("1{}", "0".repeat(400));
    let v = evaluer(&texte);
    check_invariant_lecture(&texte, v);
}
