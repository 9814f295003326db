// src/noyau/angles.rs
//
// Les 16 angles de référence du cercle trigonométrique
// ----------------------------------------------------
// - Angle : identité d’un point (degrés, ensemble fermé)
// - Coefficient exact de π : degrés/180 réduit (k/n, n ∈ {1,2,3,4,6})
// - ReponseExacte : radians + coordonnées + sin/cos/tan arrondis à 4 décimales
//
// Les radians sont calculés k·π/n depuis le coefficient exact, jamais deg·π/180 :
// la valeur flottante doit tomber pile sur la table exacte du formatage.

use std::f64::consts::PI;
use std::fmt;

use num_rational::Rational64;

/// Un des 16 angles de référence (degrés). Non constructible hors de `ANGLES`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Angle(u16);

/// Ordre fixe (contrat partagé avec la vue : ne pas réordonner).
pub const ANGLES: [Angle; 16] = [
    Angle(0),
    Angle(30),
    Angle(45),
    Angle(60),
    Angle(90),
    Angle(120),
    Angle(135),
    Angle(150),
    Angle(180),
    Angle(210),
    Angle(225),
    Angle(240),
    Angle(270),
    Angle(300),
    Angle(315),
    Angle(330),
];

/// Valeurs exactes d’un point, recalculées à la demande.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReponseExacte {
    pub radians: f64,
    pub x: f64,
    pub y: f64,
    pub sinus: f64,
    pub cosinus: f64,
    /// None = indéfinie (90°, 270°)
    pub tangente: Option<f64>,
}

impl Angle {
    pub fn depuis_degres(degres: u16) -> Option<Angle> {
        ANGLES.iter().copied().find(|a| a.0 == degres)
    }

    pub fn degres(self) -> u16 {
        self.0
    }

    /// Position dans `ANGLES`.
    pub fn rang(self) -> usize {
        ANGLES.iter().position(|a| *a == self).unwrap_or(0)
    }

    /// Angle suivant dans le sens trigonométrique (330° -> 0°).
    pub fn suivant(self) -> Angle {
        ANGLES[(self.rang() + 1) % ANGLES.len()]
    }

    /// degrés/180, réduit.
    pub fn coeff_pi(self) -> Rational64 {
        Rational64::new(i64::from(self.0), 180)
    }

    pub fn radians(self) -> f64 {
        let c = self.coeff_pi();
        (*c.numer() as f64) * PI / (*c.denom() as f64)
    }

    pub fn tangente_indefinie(self) -> bool {
        matches!(self.0, 90 | 270)
    }

    pub fn reponse_exacte(self) -> ReponseExacte {
        let radians = self.radians();
        let cosinus = arrondi(radians.cos(), 4);
        let sinus = arrondi(radians.sin(), 4);

        let tangente = if self.tangente_indefinie() {
            None
        } else {
            Some(arrondi(sinus / cosinus, 4))
        };

        ReponseExacte {
            radians,
            x: cosinus,
            y: sinus,
            sinus,
            cosinus,
            tangente,
        }
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// Arrondi décimal (demi loin de zéro). Les non-finis passent tels quels,
/// ainsi que les très grands nombres (le produit par l’échelle déborderait).
pub fn arrondi(v: f64, chiffres: i32) -> f64 {
    if !v.is_finite() {
        return v;
    }
    let echelle = 10f64.powi(chiffres);
    let m = v * echelle;
    if !m.is_finite() {
        return v;
    }
    m.round() / echelle
}
