//! Graduación: three policies per month, with fixed Normal and Honors
//! graduation totals.

use serde::Serialize;

use super::{advisor_name, month_field, pace_tier, AdvisorClassification, CampaignStanding};
use crate::cell::{format_number, CellValue};
use crate::date::format_deadline;
use crate::record::Row;

pub const POLICIES_PER_MONTH: f64 = 3.0;
pub const NORMAL_POLICIES: f64 = 36.0;
pub const HONORS_POLICIES: f64 = 48.0;

/// Months of tenure after which an advisor is in the maintenance phase.
const PROGRAM_MONTHS: f64 = 12.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraduacionStanding {
    pub month: f64,
    pub target: f64,
    pub shortfall: f64,
    pub shortfall_normal: f64,
    pub shortfall_honors: f64,
}

#[must_use]
pub fn classify(row: &Row) -> AdvisorClassification {
    let policies = row.number("Polizas_Totales");
    let month = month_field(row, "Mes_Asesor").floor();
    let target = month * POLICIES_PER_MONTH;
    let shortfall = (target - policies).max(0.0);
    let shortfall_normal = (NORMAL_POLICIES - policies).max(0.0);
    let shortfall_honors = (HONORS_POLICIES - policies).max(0.0);

    let details = vec![
        format!(
            "Mes {} · {} pólizas",
            format_number(month),
            format_number(policies)
        ),
        format!("Normal: faltan {shortfall_normal:.1} · Honores: faltan {shortfall_honors:.1}"),
    ];

    AdvisorClassification {
        name: advisor_name(row),
        tier: pace_tier(shortfall),
        value: policies,
        details,
        standing: CampaignStanding::Graduacion(GraduacionStanding {
            month,
            target,
            shortfall,
            shortfall_normal,
            shortfall_honors,
        }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CutOffMonth {
    Mayo,
    Noviembre,
}

impl CutOffMonth {
    /// Month of the graduation event that follows the cut-off.
    #[must_use]
    pub fn event(self) -> &'static str {
        match self {
            CutOffMonth::Mayo => "AGOSTO",
            CutOffMonth::Noviembre => "FEBRERO",
        }
    }
}

/// Calendar month (1-12) in which an advisor now in tenure month `month`
/// reaches month 12, given today's calendar month.
#[must_use]
pub fn month_twelve_calendar_month(month: f64, current_month: u32) -> u32 {
    #[allow(clippy::cast_possible_truncation)]
    let months_to_twelve = ((PROGRAM_MONTHS - month) as i64).rem_euclid(12);
    let zero_based = (i64::from(current_month) + months_to_twelve - 1).rem_euclid(12);
    u32::try_from(zero_based + 1).unwrap_or(1)
}

/// Reaching month 12 between December and May lands on the May cut-off;
/// otherwise November.
#[must_use]
pub fn cut_off_month(month_twelve: u32) -> CutOffMonth {
    if matches!(month_twelve, 12 | 1..=5) {
        CutOffMonth::Mayo
    } else {
        CutOffMonth::Noviembre
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraduacionProgress {
    pub month: f64,
    pub policies: f64,
    pub commissions: f64,
    pub monthly_production: f64,
    pub deadline: String,
    pub shortfall_normal: f64,
    pub shortfall_honors: f64,
    pub maintenance: bool,
    pub maintenance_alert: bool,
    pub cut_off: CutOffMonth,
    pub event: &'static str,
}

#[must_use]
pub fn progress(row: &Row, current_month: u32) -> GraduacionProgress {
    let month = month_field(row, "Mes_Asesor").floor();
    let policies = row.number("Polizas_Totales");
    // The sheet header is spelled `Comisones`.
    let commissions = row.number("Comisones");
    let monthly_production = match row.number("Produccion_Mes") {
        n if n != 0.0 => n,
        _ => row.number("Polizas_Mes"),
    };
    let deadline = format_deadline(row.get("Limite_Logro_Meta").unwrap_or(&CellValue::Empty));
    let maintenance = month > PROGRAM_MONTHS;
    let cut_off = cut_off_month(month_twelve_calendar_month(month, current_month));

    GraduacionProgress {
        month,
        policies,
        commissions,
        monthly_production,
        deadline,
        shortfall_normal: (NORMAL_POLICIES - policies).max(0.0),
        shortfall_honors: (HONORS_POLICIES - policies).max(0.0),
        maintenance,
        maintenance_alert: maintenance && monthly_production == 0.0,
        cut_off,
        event: cut_off.event(),
    }
}
