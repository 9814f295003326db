// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur f64
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis l’évaluer sur une pile de f64 (arithmétique seulement)
//
// Règles:
// - Préfixes : √ (précédence 4) et moins unaire Neg (précédence 3)
//   => √3/2 = (√3)/2 ; -√3/2 = (-√3)/2 ; 2*-3 = 2*(-3)
// - Moins unaire:
//    - si '-' arrive quand on n’attend PAS une valeur, c’est Neg
//    - '+' dans la même position est ignoré

use std::f64::consts::PI;

use num_rational::BigRational;
use num_traits::ToPrimitive;

use super::jetons::Tok;
use super::lecture::ErreurLecture;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        Tok::Racine => 4,
        _ => 0,
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Minus, Racine, Num(3), Slash, Num(2)]
///   rpn:    [Num(3), Racine, Neg, Num(2), Slash]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurLecture> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire.
    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) | Tok::Pi => {
                out.push(tok);
                prev_was_value = true;
            }

            // préfixes : attendent leur argument sur la pile
            Tok::Racine | Tok::Neg | Tok::LPar => {
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                // dépile jusqu’à '('
                let mut ouverte = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouverte = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouverte {
                    return Err(ErreurLecture::Parentheses);
                }
                prev_was_value = true;
            }

            Tok::Minus if !prev_was_value => {
                ops.push(Tok::Neg);
            }

            Tok::Plus if !prev_was_value => {}

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash => {
                // tous nos binaires sont associatifs à gauche
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) || precedence(top) < precedence(&tok) {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurLecture::Parentheses);
        }
        out.push(op);
    }

    Ok(out)
}

/// Évalue une RPN (nombres, π, √, neg, + - * /). Résultat fini ou erreur.
pub fn eval_rpn(rpn: &[Tok]) -> Result<f64, ErreurLecture> {
    let mut st: Vec<f64> = Vec::new();

    for tok in rpn {
        match tok {
            Tok::Num(r) => st.push(rationnel_vers_f64(r)?),
            Tok::Pi => st.push(PI),

            Tok::Racine => {
                let x = st.pop().ok_or(ErreurLecture::ExpressionInvalide)?;
                if x < 0.0 {
                    return Err(ErreurLecture::RacineNegative);
                }
                st.push(x.sqrt());
            }

            Tok::Neg => {
                let x = st.pop().ok_or(ErreurLecture::ExpressionInvalide)?;
                st.push(-x);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash => {
                let b = st.pop().ok_or(ErreurLecture::ExpressionInvalide)?;
                let a = st.pop().ok_or(ErreurLecture::ExpressionInvalide)?;

                let v = match tok {
                    Tok::Plus => a + b,
                    Tok::Minus => a - b,
                    Tok::Star => a * b,
                    _ => {
                        if b == 0.0 {
                            return Err(ErreurLecture::DivisionParZero);
                        }
                        a / b
                    }
                };
                st.push(v);
            }

            Tok::LPar | Tok::RPar => return Err(ErreurLecture::Parentheses),
        }
    }

    if st.len() != 1 {
        return Err(ErreurLecture::ExpressionInvalide);
    }
    let v = st.pop().ok_or(ErreurLecture::ExpressionInvalide)?;
    if !v.is_finite() {
        return Err(ErreurLecture::NonFini);
    }
    Ok(v)
}

/// n/d -> f64 (chaque côté converti puis divisé).
fn rationnel_vers_f64(r: &BigRational) -> Result<f64, ErreurLecture> {
    let n = r.numer().to_f64().ok_or(ErreurLecture::NonFini)?;
    let d = r.denom().to_f64().ok_or(ErreurLecture::NonFini)?;
    let v = n / d;
    if !v.is_finite() {
        return Err(ErreurLecture::NonFini);
    }
    Ok(v)
}
