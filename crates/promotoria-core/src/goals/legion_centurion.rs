//! Legión Centurión: four policies per month toward fixed yearly levels.

use serde::Serialize;

use super::{
    advisor_name, capped_percent, month_field, pace_tier, AdvisorClassification,
    CampaignStanding, Tier,
};
use crate::cell::format_number;
use crate::record::Row;

pub const POLICIES_PER_MONTH: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LegionLevel {
    Bronce,
    Plata,
    Oro,
    Platino,
}

impl LegionLevel {
    pub const ALL: [LegionLevel; 4] = [
        LegionLevel::Bronce,
        LegionLevel::Plata,
        LegionLevel::Oro,
        LegionLevel::Platino,
    ];

    #[must_use]
    pub fn policies(self) -> f64 {
        match self {
            LegionLevel::Bronce => 48.0,
            LegionLevel::Plata => 72.0,
            LegionLevel::Oro => 90.0,
            LegionLevel::Platino => 120.0,
        }
    }

    /// Also the sheet column holding the advisor's figure for the level.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            LegionLevel::Bronce => "Bronce",
            LegionLevel::Plata => "Plata",
            LegionLevel::Oro => "Oro",
            LegionLevel::Platino => "Platino",
        }
    }
}

/// Highest level reached, the next level, and the policies missing for it.
#[must_use]
pub fn level(policies: f64) -> (Option<LegionLevel>, Option<LegionLevel>, f64) {
    let reached = LegionLevel::ALL
        .into_iter()
        .rev()
        .find(|l| policies >= l.policies());
    let next = match reached {
        Some(l) => LegionLevel::ALL.into_iter().find(|n| n.policies() > l.policies()),
        None => Some(LegionLevel::Bronce),
    };
    let shortfall = next.map_or(0.0, |n| n.policies() - policies);
    (reached, next, shortfall)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegionStanding {
    pub month: f64,
    pub target: f64,
    pub shortfall: f64,
    pub level: Option<LegionLevel>,
    pub next: Option<LegionLevel>,
    pub shortfall_next: f64,
    pub shortfall_bronce: f64,
}

#[must_use]
pub fn classify(row: &Row) -> AdvisorClassification {
    let policies = row.number("Total_Polizas");
    // Unlike the other pace campaigns, the month is used as is.
    let month = month_field(row, "Mes_Actual");
    let target = month * POLICIES_PER_MONTH;
    let shortfall = (target - policies).max(0.0);
    let (reached, next, shortfall_next) = level(policies);
    let shortfall_bronce = (LegionLevel::Bronce.policies() - policies).max(0.0);
    let tier = pace_tier(shortfall);

    let details = if tier == Tier::OnTarget {
        vec![
            format!(
                "{} pólizas · {}",
                format_number(policies),
                reached.map_or("En camino", LegionLevel::label)
            ),
            match next {
                Some(next) => format!(
                    "Faltante {}: {} pólizas",
                    next.label(),
                    format_number(shortfall_next)
                ),
                None => "✨ Máximo nivel alcanzado".to_owned(),
            },
        ]
    } else {
        vec![
            format!("{} pólizas", format_number(policies)),
            format!("Faltante Bronce: {} pólizas", format_number(shortfall_bronce)),
        ]
    };

    AdvisorClassification {
        name: advisor_name(row),
        tier,
        value: policies,
        details,
        standing: CampaignStanding::LegionCenturion(LegionStanding {
            month,
            target,
            shortfall,
            level: reached,
            next,
            shortfall_next,
            shortfall_bronce,
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelValue {
    pub level: LegionLevel,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegionProgress {
    pub policies: f64,
    pub monthly_average: f64,
    pub month: f64,
    pub va_en_meta: String,
    pub in_target: bool,
    /// Progress toward the Bronce level.
    pub percent: f64,
    pub levels: Vec<LevelValue>,
}

#[must_use]
pub fn progress(row: &Row) -> LegionProgress {
    let policies = row.number("Total_Polizas");
    let va_en_meta = row.text("Va_En_Meta").to_uppercase();
    LegionProgress {
        policies,
        monthly_average: row.number("Promedio_Mensual"),
        month: month_field(row, "Mes_Actual"),
        in_target: va_en_meta.contains("EN META"),
        va_en_meta,
        percent: capped_percent(policies, LegionLevel::Bronce.policies()),
        levels: LegionLevel::ALL
            .into_iter()
            .map(|level| LevelValue {
                level,
                value: row.number(level.label()),
            })
            .collect(),
    }
}
