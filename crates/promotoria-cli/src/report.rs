//! Plain-text renderings of campaign boards and the summary workbook.

use std::io::Write;
use std::path::Path;

use promotoria_core::cell::format_number;
use promotoria_core::goals::format_currency;
use promotoria_core::{
    classify_campaign, pagado_pendiente_totals, parse_branch_list, AdvisorClassification,
    Campaign, CampaignSettings, ClassificationBoard, SummaryWorkbook, Tier,
};
use promotoria_sheets::{list_advisors, list_campaign_folders, load_campaign, load_summary_workbook};

pub(crate) fn run_campaigns(
    out: &mut impl Write,
    root: &Path,
    settings: &CampaignSettings,
) -> anyhow::Result<()> {
    let folders = list_campaign_folders(root, settings)?;
    if folders.is_empty() {
        writeln!(out, "no campaign folders under {}", root.display())?;
        return Ok(());
    }
    for folder in folders {
        writeln!(out, "{folder}")?;
    }
    Ok(())
}

pub(crate) fn run_advisors(
    out: &mut impl Write,
    root: &Path,
    settings: &CampaignSettings,
) -> anyhow::Result<()> {
    let advisors = list_advisors(root, settings)?;
    for name in &advisors {
        writeln!(out, "{name}")?;
    }
    writeln!(out, "{} advisors", advisors.len())?;
    Ok(())
}

/// Prints one tier board per campaign, or only `campaign_filter`.
///
/// # Errors
///
/// Returns an error if `campaign_filter` names a folder without goal rules.
pub(crate) fn run_report(
    out: &mut impl Write,
    root: &Path,
    settings: &CampaignSettings,
    campaign_filter: Option<&str>,
) -> anyhow::Result<()> {
    let campaigns: Vec<Campaign> = match campaign_filter {
        Some(folder) => vec![Campaign::from_folder(folder)
            .ok_or_else(|| anyhow::anyhow!("campaign '{folder}' has no goal rules"))?],
        None => settings
            .campaigns
            .iter()
            .filter_map(|folder| Campaign::from_folder(folder))
            .collect(),
    };

    for campaign in campaigns {
        match load_campaign(root, campaign.folder()) {
            Some(snapshot) => {
                let board = classify_campaign(campaign, &snapshot.records);
                render_board(out, campaign, &board)?;
            }
            None => {
                writeln!(out, "== {} ({}) ==", campaign.label(), campaign.folder())?;
                writeln!(out, "no data")?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

fn format_metric(campaign: Campaign, value: f64) -> String {
    match campaign {
        Campaign::Mdrt | Campaign::Convenciones => format_currency(value),
        _ => format_number(value),
    }
}

fn tier_heading(tier: Tier) -> &'static str {
    match tier {
        Tier::OnTarget => "GANANDO",
        Tier::Near => "CERCA",
        Tier::Below => "LEJOS",
    }
}

fn render_advisor(
    out: &mut impl Write,
    campaign: Campaign,
    advisor: &AdvisorClassification,
) -> std::io::Result<()> {
    writeln!(
        out,
        "  {:<40}{:>14}  {}",
        advisor.name,
        format_metric(campaign, advisor.value),
        advisor.details.join(" · ")
    )
}

pub(crate) fn render_board(
    out: &mut impl Write,
    campaign: Campaign,
    board: &ClassificationBoard,
) -> std::io::Result<()> {
    let counts = board.counts();
    writeln!(out, "== {} ({}) ==", campaign.label(), campaign.folder())?;
    writeln!(
        out,
        "total {} | ganando {} ({}%) | cerca {} ({}%) | lejos {} ({}%)",
        counts.total,
        counts.on_target,
        counts.on_target_pct,
        counts.near,
        counts.near_pct,
        counts.below,
        counts.below_pct
    )?;
    for tier in [Tier::OnTarget, Tier::Near, Tier::Below] {
        let advisors = board.tier(tier);
        if advisors.is_empty() {
            continue;
        }
        writeln!(out, "{}", tier_heading(tier))?;
        for advisor in advisors {
            render_advisor(out, campaign, advisor)?;
        }
    }
    writeln!(out)
}

/// Prints the summary workbook, optionally narrowed to a branch list.
///
/// # Errors
///
/// Returns an error if the branch list is invalid, the workbook is missing,
/// or it cannot be parsed.
pub(crate) fn run_summary(
    out: &mut impl Write,
    root: &Path,
    settings: &CampaignSettings,
    sucursal: Option<&str>,
) -> anyhow::Result<()> {
    let filter = parse_branch_list(sucursal.unwrap_or_default())?;
    let workbook = load_summary_workbook(root, settings)?.ok_or_else(|| {
        anyhow::anyhow!(
            "summary workbook not found: {}",
            root.join(&settings.summary_workbook).display()
        )
    })?;
    let workbook = workbook.filter_by_branch(&filter);
    render_summary(out, &workbook)?;
    Ok(())
}

pub(crate) fn render_summary(
    out: &mut impl Write,
    workbook: &SummaryWorkbook,
) -> std::io::Result<()> {
    let fecha = if workbook.fecha_corte.is_empty() {
        "sin fecha"
    } else {
        workbook.fecha_corte.as_str()
    };
    writeln!(out, "Resumen general: {fecha}")?;
    writeln!(out, "  pagado_pendiente       {} filas", workbook.pagado_pendiente.len())?;
    writeln!(
        out,
        "  asesores_sin_emision   {} asesores, {} sucursales",
        workbook.asesores_sin_emision.individuals.len(),
        workbook.asesores_sin_emision.summary_by_sucursal.len()
    )?;
    writeln!(out, "  proactivos             {} filas", workbook.proactivos.len())?;
    writeln!(
        out,
        "  comparativo_vida       {} asesores",
        workbook.comparativo_vida.individuals.len()
    )?;

    let totals = pagado_pendiente_totals(&workbook.pagado_pendiente);
    writeln!(out)?;
    writeln!(
        out,
        "{:<14}{:>10}{:>18}{:>18}{:>18}",
        "", "POLIZAS", "RECIBO INICIAL", "RECIBO ORDINARIO", "PRIMA"
    )?;
    writeln!(
        out,
        "{:<14}{:>10}{:>18}{:>18}{:>18}",
        "Pagado",
        format_number(totals.polizas_pagadas),
        format_currency(totals.recibo_inicial_pagado),
        format_currency(totals.recibo_ordinario_pagado),
        format_currency(totals.prima_pagada)
    )?;
    writeln!(
        out,
        "{:<14}{:>10}{:>18}{:>18}{:>18}",
        "Pendiente",
        format_number(totals.polizas_pendientes),
        format_currency(totals.recibo_inicial_pendiente),
        format_currency(totals.recibo_ordinario_pendiente),
        format_currency(totals.prima_pendiente)
    )?;
    writeln!(
        out,
        "asesores con pago: {} | con pendiente: {}",
        totals.asesores_con_pago, totals.asesores_con_pendiente
    )?;

    if let Some(general) = &workbook.comparativo_vida.general_summary {
        writeln!(out)?;
        writeln!(out, "Comparativo vida (general)")?;
        for (key, value) in general {
            writeln!(out, "  {key:<28}{}", value.as_text_or_empty())?;
        }
    }
    Ok(())
}
