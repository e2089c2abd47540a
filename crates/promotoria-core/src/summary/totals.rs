use serde::Serialize;

use crate::record::Row;

const POLICIES_PAID: &str = "Pólizas-Pagadas";
const INITIAL_PAID: &str = "Recibo_Inicial_Pagado";
const ORDINARY_PAID: &str = "Recibo_Ordinario_Pagado";
const PREMIUM_PAID: &str = "Total _Prima_Pagada";
const POLICIES_PENDING: &str = "Pólizas_Pendinetes";
const INITIAL_PENDING: &str = "Recibo_Inicial_Pendiente";
const ORDINARY_PENDING: &str = "Recibo_Ordinario_Pendiente";
const PREMIUM_PENDING: &str = "Total _Prima_Pendiente";

/// Paid and pending totals over the `pagado_pendiente` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PaymentTotals {
    pub polizas_pagadas: f64,
    pub recibo_inicial_pagado: f64,
    pub recibo_ordinario_pagado: f64,
    pub prima_pagada: f64,
    pub polizas_pendientes: f64,
    pub recibo_inicial_pendiente: f64,
    pub recibo_ordinario_pendiente: f64,
    pub prima_pendiente: f64,
    pub asesores_con_pago: usize,
    pub asesores_con_pendiente: usize,
}

/// Sums each column with negative values clamped to 0, and counts advisors
/// with any paid or pending policy or premium.
#[must_use]
pub fn pagado_pendiente_totals(rows: &[Row]) -> PaymentTotals {
    let sum = |key: &str| rows.iter().map(|row| row.number(key).max(0.0)).sum::<f64>();
    let count = |policies: &str, premium: &str| {
        rows.iter()
            .filter(|row| row.number(policies) > 0.0 || row.number(premium) > 0.0)
            .count()
    };

    PaymentTotals {
        polizas_pagadas: sum(POLICIES_PAID),
        recibo_inicial_pagado: sum(INITIAL_PAID),
        recibo_ordinario_pagado: sum(ORDINARY_PAID),
        prima_pagada: sum(PREMIUM_PAID),
        polizas_pendientes: sum(POLICIES_PENDING),
        recibo_inicial_pendiente: sum(INITIAL_PENDING),
        recibo_ordinario_pendiente: sum(ORDINARY_PENDING),
        prima_pendiente: sum(PREMIUM_PENDING),
        asesores_con_pago: count(POLICIES_PAID, PREMIUM_PAID),
        asesores_con_pendiente: count(POLICIES_PENDING, PREMIUM_PENDING),
    }
}
