//! MDRT: accumulated premium (`PA_Acumulada`) against the Member, COT and
//! TOT thresholds.

use serde::Serialize;

use super::{
    advisor_name, capped_percent, format_currency, month_field, AdvisorClassification,
    CampaignStanding, Tier,
};
use crate::record::Row;

pub const PA_FIELD: &str = "PA_Acumulada";

pub const META_MEMBER: f64 = 1_810_400.0;
pub const META_COT: f64 = 5_431_200.0;
pub const META_TOT: f64 = 10_862_400.0;

/// Share of the Member threshold, in percent, that counts as near target.
const NEAR_PERCENT: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MdrtLevel {
    Miembro,
    #[serde(rename = "COT")]
    Cot,
    #[serde(rename = "TOT")]
    Tot,
}

impl MdrtLevel {
    pub const ALL: [MdrtLevel; 3] = [MdrtLevel::Miembro, MdrtLevel::Cot, MdrtLevel::Tot];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MdrtLevel::Miembro => "Miembro",
            MdrtLevel::Cot => "COT",
            MdrtLevel::Tot => "TOT",
        }
    }

    #[must_use]
    pub fn goal(self) -> f64 {
        match self {
            MdrtLevel::Miembro => META_MEMBER,
            MdrtLevel::Cot => META_COT,
            MdrtLevel::Tot => META_TOT,
        }
    }

    fn shortfall_column(self) -> &'static str {
        match self {
            MdrtLevel::Miembro => "PA_Faltante_Miembro",
            MdrtLevel::Cot => "PA_Faltante_COT",
            MdrtLevel::Tot => "PA_Faltante_TOT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MdrtStanding {
    pub pct: f64,
    pub category: Option<MdrtLevel>,
    pub next: Option<MdrtLevel>,
    pub shortfall_next: f64,
}

/// The highest level reached, the level after it, and the premium still
/// missing for that next level.
#[must_use]
pub fn category(pa: f64) -> (Option<MdrtLevel>, Option<MdrtLevel>, f64) {
    if pa >= META_TOT {
        (Some(MdrtLevel::Tot), None, 0.0)
    } else if pa >= META_COT {
        (Some(MdrtLevel::Cot), Some(MdrtLevel::Tot), META_TOT - pa)
    } else if pa >= META_MEMBER {
        (Some(MdrtLevel::Miembro), Some(MdrtLevel::Cot), META_COT - pa)
    } else {
        (None, Some(MdrtLevel::Miembro), META_MEMBER - pa)
    }
}

/// Member reached is on target; 60% of Member is near. The near comparison
/// is done on scaled values so the boundary is exact.
#[must_use]
pub fn tier(pa: f64) -> Tier {
    if pa >= META_MEMBER {
        Tier::OnTarget
    } else if pa * 100.0 >= META_MEMBER * NEAR_PERCENT {
        Tier::Near
    } else {
        Tier::Below
    }
}

#[must_use]
pub fn classify(row: &Row) -> AdvisorClassification {
    let pa = row.number(PA_FIELD);
    let (category, next, shortfall_next) = category(pa);
    let tier = tier(pa);

    let details = match (tier, category) {
        (Tier::OnTarget, Some(level)) => vec![
            format!("🏅 {}", level.label()),
            format!("PA: {}", format_currency(pa)),
            match next {
                Some(next) => format!(
                    "Faltante {}: {}",
                    next.label(),
                    format_currency(shortfall_next)
                ),
                None => "✨ Máximo nivel alcanzado".to_owned(),
            },
        ],
        _ => vec![
            format!("PA: {}", format_currency(pa)),
            format!("Faltante Miembro: {}", format_currency(META_MEMBER - pa)),
        ],
    };

    AdvisorClassification {
        name: advisor_name(row),
        tier,
        value: pa,
        details,
        standing: CampaignStanding::Mdrt(MdrtStanding {
            pct: pa / META_MEMBER * 100.0,
            category,
            next,
            shortfall_next,
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelProgress {
    pub level: MdrtLevel,
    pub goal: f64,
    /// The sheet's own shortfall column, clamped at 0.
    pub shortfall: f64,
    /// Premium needed per remaining month to close the shortfall.
    pub monthly_needed: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MdrtProgress {
    pub pa: f64,
    pub current_month: f64,
    pub remaining_months: f64,
    pub levels: Vec<LevelProgress>,
}

/// Months left in the year, counting the current one, never below 1.
#[must_use]
pub fn remaining_months(current_month: f64) -> f64 {
    (12.0 - current_month.floor() + 1.0).max(1.0)
}

#[must_use]
pub fn progress(row: &Row) -> MdrtProgress {
    let pa = row.number(PA_FIELD);
    let current_month = month_field(row, "Mes_Actual");
    let remaining = remaining_months(current_month);

    let levels = MdrtLevel::ALL
        .into_iter()
        .map(|level| {
            let shortfall = row.number(level.shortfall_column()).max(0.0);
            LevelProgress {
                level,
                goal: level.goal(),
                shortfall,
                monthly_needed: shortfall / remaining,
                percent: capped_percent(pa, level.goal()),
            }
        })
        .collect();

    MdrtProgress {
        pa,
        current_month,
        remaining_months: remaining,
        levels,
    }
}
