//! Camino a la Cumbre: four policies per month of tenure.

use serde::Serialize;

use super::{
    advisor_name, capped_percent, month_field, pace_tier, AdvisorClassification,
    CampaignStanding, Tier,
};
use crate::cell::format_number;
use crate::record::Row;

pub const POLICIES_PER_MONTH: f64 = 4.0;

pub const INACTIVITY_ALERT: &str = "⚠️ ALERTA: MES SIN ACTIVIDAD";

/// The alert only applies to an advisor's first quarter.
const ALERT_MONTHS: f64 = 3.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaminoStanding {
    pub month: f64,
    pub target: f64,
    pub shortfall: f64,
    pub status: String,
}

#[must_use]
pub fn classify(row: &Row) -> AdvisorClassification {
    let status = row.text("Estatus_meta").to_uppercase();
    let policies = row.number("Polizas_Totales");
    let month = month_field(row, "Mes_Asesor").floor();
    let target = month * POLICIES_PER_MONTH;
    let shortfall = (target - policies).max(0.0);
    let tier = pace_tier(shortfall);

    let mut details = vec![format!(
        "Mes {} · {} pólizas",
        format_number(month),
        format_number(policies)
    )];
    if tier == Tier::OnTarget {
        details.push(status.clone());
    } else {
        details.push(format!("Faltan {shortfall:.1} pólizas para meta"));
    }

    AdvisorClassification {
        name: advisor_name(row),
        tier,
        value: policies,
        details,
        standing: CampaignStanding::CaminoCumbre(CaminoStanding {
            month,
            target,
            shortfall,
            status,
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaminoProgress {
    pub month: f64,
    pub quarter: f64,
    pub policies: f64,
    pub cumulative_target: f64,
    pub percent: f64,
    pub inactivity_alert: bool,
    /// The sheet status, replaced by the alert text when the alert fires.
    pub status: String,
    pub in_target: bool,
}

#[must_use]
pub fn progress(row: &Row) -> CaminoProgress {
    let month = month_field(row, "Mes_Asesor").floor();
    let policies = row.number("Polizas_Totales");
    let sheet_status = row.text("Estatus_meta").to_uppercase();
    let cumulative_target = month * POLICIES_PER_MONTH;

    let month_column = format!("Mes_{}_Prod", format_number(month));
    let inactivity_alert = month <= ALERT_MONTHS && row.number(&month_column) == 0.0;
    let in_target = sheet_status.contains("EN META") && !inactivity_alert;
    let status = if inactivity_alert {
        INACTIVITY_ALERT.to_owned()
    } else {
        sheet_status
    };

    let denominator = if cumulative_target == 0.0 {
        1.0
    } else {
        cumulative_target
    };

    CaminoProgress {
        month,
        quarter: row.number_or("Trimestre", 1.0),
        policies,
        cumulative_target,
        percent: capped_percent(policies, denominator),
        inactivity_alert,
        status,
        in_target,
    }
}
