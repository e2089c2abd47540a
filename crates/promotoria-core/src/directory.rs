use std::collections::BTreeSet;

use crate::record::CampaignSnapshot;

/// Distinct advisor names across `snapshots`, minus `excluded`, sorted by
/// byte order.
#[must_use]
pub fn advisor_directory<'a, I>(snapshots: I, excluded: &[String]) -> Vec<String>
where
    I: IntoIterator<Item = &'a CampaignSnapshot>,
{
    let names: BTreeSet<&str> = snapshots
        .into_iter()
        .flat_map(CampaignSnapshot::advisor_names)
        .collect();
    names
        .into_iter()
        .filter(|name| !excluded.iter().any(|e| e.as_str() == *name))
        .map(str::to_owned)
        .collect()
}

/// Number of distinct advisor names across `snapshots`, without exclusions.
#[must_use]
pub fn distinct_advisor_count<'a, I>(snapshots: I) -> usize
where
    I: IntoIterator<Item = &'a CampaignSnapshot>,
{
    snapshots
        .into_iter()
        .flat_map(CampaignSnapshot::advisor_names)
        .collect::<BTreeSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;
    use crate::record::{Row, ADVISOR_FIELD};

    fn snapshot(campaign: &str, names: &[&str]) -> CampaignSnapshot {
        CampaignSnapshot {
            campaign: campaign.to_owned(),
            source_file: format!("{campaign}.xlsx"),
            records: names
                .iter()
                .map(|n| [(ADVISOR_FIELD, CellValue::from(*n))].into_iter().collect())
                .collect(),
        }
    }

    #[test]
    fn union_is_sorted_deduplicated_and_filtered() {
        let a = snapshot("mdrt", &["B", "A"]);
        let b = snapshot("graduacion", &["A", "C", "ANA LAURA CONTRERAS IÑIGUEZ"]);
        let excluded = vec!["ANA LAURA CONTRERAS IÑIGUEZ".to_owned()];
        assert_eq!(advisor_directory([&a, &b], &excluded), vec!["A", "B", "C"]);
    }

    #[test]
    fn rows_without_advisor_are_ignored() {
        let mut snap = snapshot("mdrt", &["Juan"]);
        let mut nameless = Row::new();
        nameless.insert("PA_Acumulada", CellValue::Number(10.0));
        snap.records.push(nameless);
        assert_eq!(advisor_directory([&snap], &[]), vec!["Juan"]);
    }

    #[test]
    fn byte_order_puts_uppercase_before_lowercase() {
        let snap = snapshot("mdrt", &["maria", "Zoe", "Ángel"]);
        assert_eq!(advisor_directory([&snap], &[]), vec!["Zoe", "maria", "Ángel"]);
    }

    #[test]
    fn distinct_count_spans_campaigns() {
        let a = snapshot("mdrt", &["A", "B"]);
        let b = snapshot("convenciones", &["B", "C"]);
        assert_eq!(distinct_advisor_count([&a, &b]), 3);
        assert_eq!(distinct_advisor_count(std::iter::empty()), 0);
    }
}
