//! Convenciones: a ranking by credits (`Comision_Vida + RDA`). The sheet
//! carries the credits of the last qualifying place of each diamond bracket.

use serde::Serialize;

use super::{
    advisor_name, capped_percent, format_currency, AdvisorClassification, CampaignStanding, Tier,
};
use crate::cell::format_number;
use crate::record::Row;

/// Rank given to advisors without a `Lugar` value.
pub const UNRANKED: f64 = 9999.0;

/// Credit shortfalls to one diamond at or below this are near target.
pub const NEAR_CREDIT_SHORTFALL: f64 = 100_000.0;

pub const MIN_POLICIES: f64 = 30.0;
pub const MIN_CREDITS: f64 = 588_500.0;

/// One diamond bracket: the last place it covers and the column holding that
/// place's credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
    pub diamonds: u8,
    pub last_place: u32,
    pub column: &'static str,
    pub label: &'static str,
    pub destination: &'static str,
}

/// Brackets from one diamond up.
pub const BRACKETS: [Bracket; 4] = [
    Bracket {
        diamonds: 1,
        last_place: 480,
        column: "Lugar_480",
        label: "1 Diamante",
        destination: "1 Diamante (Cancún)",
    },
    Bracket {
        diamonds: 2,
        last_place: 228,
        column: "Lugar_228",
        label: "2 Diamantes",
        destination: "2 Diamantes (Costa Rica)",
    },
    Bracket {
        diamonds: 3,
        last_place: 108,
        column: "Lugar_108",
        label: "3 Diamantes",
        destination: "3 Diamantes (París)",
    },
    Bracket {
        diamonds: 4,
        last_place: 28,
        column: "Lugar_28",
        label: "4 Diamantes",
        destination: "Gran Diamante (Amalfi)",
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvencionesStanding {
    pub lugar: f64,
    pub credits: f64,
    /// Diamonds held by rank, 0 outside every bracket.
    pub diamonds: u8,
    pub next: Option<&'static str>,
    pub shortfall_next: f64,
}

#[must_use]
pub fn credits(row: &Row) -> f64 {
    row.number("Comision_Vida") + row.number("RDA")
}

/// Credits missing to reach `bracket`'s last place, never negative.
#[must_use]
pub fn bracket_shortfall(row: &Row, bracket: &Bracket, credits: f64) -> f64 {
    (row.number(bracket.column) - credits).max(0.0)
}

/// The bracket `lugar` falls in, if any.
#[must_use]
pub fn bracket_for(lugar: f64) -> Option<&'static Bracket> {
    BRACKETS
        .iter()
        .rev()
        .find(|b| lugar <= f64::from(b.last_place))
}

#[must_use]
pub fn classify(row: &Row) -> AdvisorClassification {
    let lugar = row.number_or("Lugar", UNRANKED);
    let credits = credits(row);
    let held = bracket_for(lugar);
    let next = match held {
        Some(b) => BRACKETS.iter().find(|n| n.diamonds == b.diamonds + 1),
        None => BRACKETS.first(),
    };
    let shortfall_next = next.map_or(0.0, |n| bracket_shortfall(row, n, credits));

    let tier = if held.is_some() {
        Tier::OnTarget
    } else if shortfall_next <= NEAR_CREDIT_SHORTFALL {
        Tier::Near
    } else {
        Tier::Below
    };

    let place = format_number(lugar);
    let credit_line = format!("Créditos: {}", format_currency(credits));
    let details = match (held, next) {
        (Some(held), Some(next)) => vec![
            format!("Lugar {place} · {}", held.label),
            credit_line,
            format!("Faltante {}: {}", next.label, format_currency(shortfall_next)),
        ],
        (Some(held), None) => vec![
            format!("Lugar {place} · {}", held.label),
            credit_line,
            "✨ Máximo nivel".to_owned(),
        ],
        (None, _) => vec![
            format!("Lugar {place}"),
            credit_line,
            format!("Faltante 1 Diamante: {}", format_currency(shortfall_next)),
        ],
    };

    AdvisorClassification {
        name: advisor_name(row),
        tier,
        value: credits,
        details,
        standing: CampaignStanding::Convenciones(ConvencionesStanding {
            lugar,
            credits,
            diamonds: held.map_or(0, |b| b.diamonds),
            next: next.map(|n| n.label),
            shortfall_next,
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BracketTarget {
    pub label: &'static str,
    /// Credits of the bracket's last place.
    pub credits: f64,
    pub shortfall: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvencionesProgress {
    pub comision_vida: f64,
    pub rda: f64,
    pub credits: f64,
    pub policies: f64,
    pub lugar: f64,
    pub qualified: bool,
    pub targets: Vec<BracketTarget>,
}

#[must_use]
pub fn progress(row: &Row) -> ConvencionesProgress {
    let comision_vida = row.number("Comision_Vida");
    let rda = row.number("RDA");
    let credits = comision_vida + rda;
    let policies = row.number("Polizas");
    let lugar = row.number_or("Lugar", UNRANKED);
    let qualified = lugar <= f64::from(BRACKETS[0].last_place)
        && policies >= MIN_POLICIES
        && credits >= MIN_CREDITS;

    let targets = BRACKETS
        .iter()
        .map(|bracket| {
            let default = if bracket.diamonds == 1 { MIN_CREDITS } else { 0.0 };
            let last_place_credits = row.number_or(bracket.column, default);
            let denominator = if last_place_credits == 0.0 {
                1.0
            } else {
                last_place_credits
            };
            BracketTarget {
                label: bracket.destination,
                credits: last_place_credits,
                shortfall: (last_place_credits - credits).max(0.0),
                percent: capped_percent(credits, denominator),
            }
        })
        .collect();

    ConvencionesProgress {
        comision_vida,
        rda,
        credits,
        policies,
        lugar,
        qualified,
        targets,
    }
}
