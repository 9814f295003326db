// src/noyau/jetons.rs

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;

use super::lecture::ErreurLecture;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(BigRational),
    Pi,

    // Racine carrée préfixe : √, sqrt, root, squareroot
    Racine,

    Plus,
    Minus,
    Star,
    Slash,

    // Moins unaire : produit par to_rpn, jamais par tokenize
    Neg,

    LPar,
    RPar,
}

/// Tokenize une réponse saisie.
/// Supporte:
/// - entiers et décimaux (ex: 12, 0.7071, .5, 5.) lus exactement
/// - ½
/// - opérateurs + - * × /
/// - parenthèses ( )
/// - π ou pi (insensible à la casse)
/// - √, sqrt, root, squareroot (racine préfixe)
///
/// Tout autre mot est refusé : aucune variable, aucune fonction arbitraire.
/// Les produits implicites (3π, 2√3, (1)(2)) reçoivent un `*` explicite.
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurLecture> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Symboles d’un caractère
        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' | '−' => Some(Tok::Minus),
            '*' | '×' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            'π' => Some(Tok::Pi),
            '√' => Some(Tok::Racine),
            '½' => Some(Tok::Num(BigRational::new(BigInt::one(), BigInt::from(2)))),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // Mots ASCII : lettres seulement (sqrt3 => sqrt, 3)
        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let w = word.to_lowercase();

            match w.as_str() {
                "pi" => out.push(Tok::Pi),
                "sqrt" | "root" | "squareroot" => out.push(Tok::Racine),
                _ => return Err(ErreurLecture::MotInconnu(w)),
            }
            continue;
        }

        // Nombre : chiffres [. chiffres]
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let int_str: String = chars[start..i].iter().collect();

            let mut frac_str = String::new();
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                let start_f = i;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
                frac_str = chars[start_f..i].iter().collect();
            }

            let texte: String = chars[start..i].iter().collect();
            out.push(Tok::Num(lire_decimal(&int_str, &frac_str, &texte)?));
            continue;
        }

        return Err(ErreurLecture::CaractereInattendu(c));
    }

    Ok(produits_implicites(out))
}

/// "12" + "34" -> 1234/100 (exact).
fn lire_decimal(int_str: &str, frac_str: &str, texte: &str) -> Result<BigRational, ErreurLecture> {
    if int_str.is_empty() && frac_str.is_empty() {
        return Err(ErreurLecture::NombreInvalide(texte.to_string()));
    }

    let chiffres = format!("{int_str}{frac_str}");
    let n = BigInt::parse_bytes(chiffres.as_bytes(), 10)
        .ok_or_else(|| ErreurLecture::NombreInvalide(texte.to_string()))?;
    let d = BigInt::from(10).pow(frac_str.len() as u32);

    Ok(BigRational::new(n, d))
}

fn termine_valeur(t: &Tok) -> bool {
    matches!(t, Tok::Num(_) | Tok::Pi | Tok::RPar)
}

fn commence_valeur(t: &Tok) -> bool {
    matches!(t, Tok::Num(_) | Tok::Pi | Tok::Racine | Tok::LPar)
}

/// Insère `*` entre deux valeurs juxtaposées : 3π -> 3 * π.
fn produits_implicites(jetons: Vec<Tok>) -> Vec<Tok> {
    let mut out: Vec<Tok> = Vec::with_capacity(jetons.len() * 2);
    for t in jetons {
        if let Some(prev) = out.last() {
            // Num Num (ex: "1..2") reste une erreur, pas un produit
            let deux_nombres = matches!((prev, &t), (Tok::Num(_), Tok::Num(_)));
            if termine_valeur(prev) && commence_valeur(&t) && !deux_nombres {
                out.push(Tok::Star);
            }
        }
        out.push(t);
    }
    out
}

/// Format utilitaire (journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    fn format_rat(r: &BigRational) -> String {
        let n = r.numer();
        let d = r.denom();
        if d.is_one() {
            format!("{n}")
        } else {
            format!("{n}/{d}")
        }
    }

    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(r) => format_rat(r),
            Tok::Pi => "π".to_string(),
            Tok::Racine => "√".to_string(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
