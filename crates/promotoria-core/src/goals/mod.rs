//! Per-campaign goal formulas.
//!
//! Each campaign module turns one advisor record into an
//! [`AdvisorClassification`] for the admin board and a progress view for the
//! advisor's own dashboard. Fields are read through [`Row::number`] and
//! [`Row::text`] only, so missing or malformed cells read as 0 or `""`.

pub mod camino_cumbre;
pub mod convenciones;
pub mod graduacion;
pub mod legion_centurion;
pub mod mdrt;

use std::cmp::Ordering;

use serde::Serialize;

use crate::record::{Row, ADVISOR_FIELD};

/// Shortfalls at or below this many policies count as near target.
pub const NEAR_POLICY_SHORTFALL: f64 = 5.0;

/// Display name for a record without an advisor.
pub const UNKNOWN_ADVISOR: &str = "Desconocido";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    OnTarget,
    Near,
    Below,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Campaign {
    Mdrt,
    CaminoCumbre,
    Convenciones,
    Graduacion,
    LegionCenturion,
}

impl Campaign {
    pub const ALL: [Campaign; 5] = [
        Campaign::Mdrt,
        Campaign::CaminoCumbre,
        Campaign::Convenciones,
        Campaign::Graduacion,
        Campaign::LegionCenturion,
    ];

    /// Folder name under the data root.
    #[must_use]
    pub fn folder(self) -> &'static str {
        match self {
            Campaign::Mdrt => "mdrt",
            Campaign::CaminoCumbre => "camino_cumbre",
            Campaign::Convenciones => "convenciones",
            Campaign::Graduacion => "graduacion",
            Campaign::LegionCenturion => "legion_centurion",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Campaign::Mdrt => "MDRT 2026",
            Campaign::CaminoCumbre => "Camino a la Cumbre",
            Campaign::Convenciones => "Convenciones",
            Campaign::Graduacion => "Graduación",
            Campaign::LegionCenturion => "Legión Centurión",
        }
    }

    #[must_use]
    pub fn from_folder(folder: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.folder() == folder)
    }
}

impl std::fmt::Display for Campaign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.folder())
    }
}

/// Campaign-specific figures behind a classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "campaign", rename_all = "snake_case")]
pub enum CampaignStanding {
    Mdrt(mdrt::MdrtStanding),
    CaminoCumbre(camino_cumbre::CaminoStanding),
    Convenciones(convenciones::ConvencionesStanding),
    Graduacion(graduacion::GraduacionStanding),
    LegionCenturion(legion_centurion::LegionStanding),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvisorClassification {
    pub name: String,
    pub tier: Tier,
    /// The campaign metric; boards sort on it.
    pub value: f64,
    pub details: Vec<String>,
    #[serde(flatten)]
    pub standing: CampaignStanding,
}

/// Per-campaign tier counts with whole-number percentage shares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub total: usize,
    pub on_target: usize,
    pub near: usize,
    pub below: usize,
    pub on_target_pct: u32,
    pub near_pct: u32,
    pub below_pct: u32,
}

impl TierCounts {
    #[must_use]
    pub fn new(on_target: usize, near: usize, below: usize) -> Self {
        let total = on_target + near + below;
        Self {
            total,
            on_target,
            near,
            below,
            on_target_pct: whole_percent(on_target, total),
            near_pct: whole_percent(near, total),
            below_pct: whole_percent(below, total),
        }
    }
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn whole_percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as u32
}

/// Advisors of one campaign split by tier, each list sorted by descending
/// metric with ties in sheet order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassificationBoard {
    #[serde(rename = "ganando")]
    pub on_target: Vec<AdvisorClassification>,
    #[serde(rename = "cerca")]
    pub near: Vec<AdvisorClassification>,
    #[serde(rename = "lejos")]
    pub below: Vec<AdvisorClassification>,
}

impl ClassificationBoard {
    #[must_use]
    pub fn counts(&self) -> TierCounts {
        TierCounts::new(self.on_target.len(), self.near.len(), self.below.len())
    }

    #[must_use]
    pub fn tier(&self, tier: Tier) -> &[AdvisorClassification] {
        match tier {
            Tier::OnTarget => &self.on_target,
            Tier::Near => &self.near,
            Tier::Below => &self.below,
        }
    }
}

/// Classifies one record under `campaign`.
#[must_use]
pub fn classify(campaign: Campaign, row: &Row) -> AdvisorClassification {
    match campaign {
        Campaign::Mdrt => mdrt::classify(row),
        Campaign::CaminoCumbre => camino_cumbre::classify(row),
        Campaign::Convenciones => convenciones::classify(row),
        Campaign::Graduacion => graduacion::classify(row),
        Campaign::LegionCenturion => legion_centurion::classify(row),
    }
}

/// Classifies every record of a campaign and groups them by tier.
#[must_use]
pub fn classify_campaign(campaign: Campaign, rows: &[Row]) -> ClassificationBoard {
    let mut board = ClassificationBoard::default();
    for row in rows {
        let classification = classify(campaign, row);
        match classification.tier {
            Tier::OnTarget => board.on_target.push(classification),
            Tier::Near => board.near.push(classification),
            Tier::Below => board.below.push(classification),
        }
    }
    for list in [&mut board.on_target, &mut board.near, &mut board.below] {
        list.sort_by(|a, b| descending(a.value, b.value));
    }
    board
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Dashboard view for one advisor, by campaign.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "campaign", rename_all = "snake_case")]
pub enum CampaignProgress {
    Mdrt(mdrt::MdrtProgress),
    CaminoCumbre(camino_cumbre::CaminoProgress),
    Convenciones(convenciones::ConvencionesProgress),
    Graduacion(graduacion::GraduacionProgress),
    LegionCenturion(legion_centurion::LegionProgress),
}

/// Dashboard metrics for one record. `current_month` (1-12) places
/// Graduación's maintenance cut-off on the calendar.
#[must_use]
pub fn progress(campaign: Campaign, row: &Row, current_month: u32) -> CampaignProgress {
    match campaign {
        Campaign::Mdrt => CampaignProgress::Mdrt(mdrt::progress(row)),
        Campaign::CaminoCumbre => CampaignProgress::CaminoCumbre(camino_cumbre::progress(row)),
        Campaign::Convenciones => CampaignProgress::Convenciones(convenciones::progress(row)),
        Campaign::Graduacion => {
            CampaignProgress::Graduacion(graduacion::progress(row, current_month))
        }
        Campaign::LegionCenturion => {
            CampaignProgress::LegionCenturion(legion_centurion::progress(row))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopProducer {
    pub rank: usize,
    pub name: String,
    pub pa: f64,
    pub percent_of_member: f64,
}

/// The `n` highest `PA_Acumulada` values of the MDRT sheet.
#[must_use]
pub fn top_mdrt(rows: &[Row], n: usize) -> Vec<TopProducer> {
    let mut ranked: Vec<&Row> = rows.iter().collect();
    ranked.sort_by(|a, b| descending(a.number(mdrt::PA_FIELD), b.number(mdrt::PA_FIELD)));
    ranked
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(i, row)| {
            let pa = row.number(mdrt::PA_FIELD);
            TopProducer {
                rank: i + 1,
                name: advisor_name(row),
                pa,
                percent_of_member: capped_percent(pa, mdrt::META_MEMBER),
            }
        })
        .collect()
}

/// Tier for policy-pace campaigns: on target with no shortfall, near within
/// five policies.
#[must_use]
pub fn pace_tier(shortfall: f64) -> Tier {
    if shortfall <= 0.0 {
        Tier::OnTarget
    } else if shortfall <= NEAR_POLICY_SHORTFALL {
        Tier::Near
    } else {
        Tier::Below
    }
}

pub(crate) fn advisor_name(row: &Row) -> String {
    let name = row.text(ADVISOR_FIELD);
    if name.is_empty() {
        UNKNOWN_ADVISOR.to_owned()
    } else {
        name
    }
}

/// `Mes_Asesor`-style month fields: 0 or missing reads as month 1.
pub(crate) fn month_field(row: &Row, key: &str) -> f64 {
    row.number_or(key, 1.0)
}

/// `value / target` as a percentage, capped at 100; 0 for a zero target.
pub(crate) fn capped_percent(value: f64, target: f64) -> f64 {
    if target == 0.0 {
        return 0.0;
    }
    (value / target * 100.0).min(100.0)
}

/// Whole pesos with thousands separators: `$1,810,400`.
#[must_use]
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "$0".to_owned();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
#[path = "goals_test.rs"]
mod tests;
