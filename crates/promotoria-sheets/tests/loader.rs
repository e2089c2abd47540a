//! Integration tests for workbook loading against real `.xlsx` fixtures.

mod common;

use common::{write_campaign, write_xlsx, Blank, Bool, Cell, Num, Sheet, Text};
use promotoria_core::{CampaignSettings, CellValue};
use promotoria_sheets::{
    find_campaign_file, list_advisors, list_campaign_folders, load_campaign,
    load_fixed_campaigns, load_summary_workbook, SheetError,
};
use tempfile::TempDir;

fn mdrt_rows() -> Vec<Vec<Cell>> {
    vec![
        vec![Text("Asesor"), Text("PA_Acumulada"), Text("Fecha_Corte")],
        vec![Text("Juan Pérez"), Num(1_810_400.0), Num(45_000.0)],
        vec![Text("María López"), Num(905_200.0), Num(45_000.0)],
    ]
}

#[test]
fn load_campaign_reads_first_sheet_with_header_row() {
    let dir = TempDir::new().unwrap();
    write_campaign(dir.path(), "mdrt", "mdrt_2026.xlsx", mdrt_rows());

    let snapshot = load_campaign(dir.path(), "mdrt").expect("snapshot present");
    assert_eq!(snapshot.campaign, "mdrt");
    assert_eq!(snapshot.source_file, "mdrt_2026.xlsx");
    assert_eq!(snapshot.records.len(), 2);
    assert_eq!(snapshot.cut_off(), Some(&CellValue::Number(45_000.0)));

    let maria = snapshot.find_advisor("María López").expect("advisor present");
    assert!((maria.number("PA_Acumulada") - 905_200.0).abs() < f64::EPSILON);
}

#[test]
fn load_campaign_is_idempotent() {
    let dir = TempDir::new().unwrap();
    write_campaign(dir.path(), "mdrt", "mdrt.xlsx", mdrt_rows());
    let first = load_campaign(dir.path(), "mdrt");
    let second = load_campaign(dir.path(), "mdrt");
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn missing_folder_or_workbook_is_absent() {
    let dir = TempDir::new().unwrap();
    assert!(load_campaign(dir.path(), "mdrt").is_none());

    std::fs::create_dir(dir.path().join("graduacion")).unwrap();
    std::fs::write(dir.path().join("graduacion").join("notas.txt"), "x").unwrap();
    assert!(load_campaign(dir.path(), "graduacion").is_none());
}

#[test]
fn path_like_folder_names_are_absent() {
    let dir = TempDir::new().unwrap();
    write_campaign(dir.path(), "mdrt", "mdrt.xlsx", mdrt_rows());
    assert!(load_campaign(&dir.path().join("mdrt"), "..").is_none());
    assert!(load_campaign(dir.path(), "../mdrt").is_none());
}

#[test]
fn lock_files_are_skipped() {
    let dir = TempDir::new().unwrap();
    write_campaign(dir.path(), "mdrt", "mdrt.xlsx", mdrt_rows());
    std::fs::write(dir.path().join("mdrt").join("~$mdrt.xlsx"), b"lock").unwrap();

    let file = find_campaign_file(&dir.path().join("mdrt")).unwrap().unwrap();
    assert_eq!(file.file_name().unwrap(), "mdrt.xlsx");
}

#[test]
fn multiple_workbooks_resolve_to_lexically_first() {
    let dir = TempDir::new().unwrap();
    write_campaign(
        dir.path(),
        "mdrt",
        "b_corte.xlsx",
        vec![vec![Text("Asesor")], vec![Text("Segundo")]],
    );
    write_campaign(
        dir.path(),
        "mdrt",
        "a_corte.xlsx",
        vec![vec![Text("Asesor")], vec![Text("Primero")]],
    );

    let snapshot = load_campaign(dir.path(), "mdrt").unwrap();
    assert_eq!(snapshot.source_file, "a_corte.xlsx");
    assert_eq!(snapshot.records[0].advisor(), Some("Primero"));
}

#[test]
fn corrupt_workbook_is_absent_not_an_error() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("mdrt")).unwrap();
    std::fs::write(dir.path().join("mdrt").join("mdrt.xlsx"), b"not a zip").unwrap();
    assert!(load_campaign(dir.path(), "mdrt").is_none());
}

#[test]
fn header_only_sheet_is_absent() {
    let dir = TempDir::new().unwrap();
    write_campaign(dir.path(), "mdrt", "mdrt.xlsx", vec![vec![Text("Asesor")]]);
    assert!(load_campaign(dir.path(), "mdrt").is_none());
}

#[test]
fn header_rules_follow_spreadsheet_export() {
    let dir = TempDir::new().unwrap();
    write_campaign(
        dir.path(),
        "camino_cumbre",
        "camino.xlsx",
        vec![
            vec![Text("Asesor"), Blank, Text("Mes"), Text("Mes"), Text("Activo")],
            vec![Text("Juan"), Num(1.0), Num(2.0), Num(3.0), Bool(true)],
            vec![],
            vec![Text("Ana"), Blank, Num(4.0)],
        ],
    );

    let snapshot = load_campaign(dir.path(), "camino_cumbre").unwrap();
    assert_eq!(snapshot.records.len(), 2);
    let keys: Vec<&str> = snapshot.records[0].keys().collect();
    assert_eq!(keys, vec!["Asesor", "__EMPTY", "Mes", "Mes_1", "Activo"]);
    assert_eq!(
        snapshot.records[0].get("Activo"),
        Some(&CellValue::from("TRUE"))
    );
    let ana_keys: Vec<&str> = snapshot.records[1].keys().collect();
    assert_eq!(ana_keys, vec!["Asesor", "Mes"]);
}

#[test]
fn offset_sheet_is_addressed_from_a1() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("offset.xlsx");
    write_xlsx(
        &path,
        &[Sheet::new(
            "Hoja1",
            vec![vec![Text("Asesor"), Text("Lugar")], vec![Text("Juan"), Num(12.0)]],
        )
        .at(2, 1)],
    );

    let grid = promotoria_sheets::read_first_sheet(&path).unwrap();
    assert_eq!(grid.len(), 4);
    assert_eq!(grid[2][1], CellValue::from("Asesor"));
    assert_eq!(grid[3][2], CellValue::Number(12.0));
}

#[test]
fn campaign_sheet_below_a1_keeps_its_header_row() {
    let dir = TempDir::new().unwrap();
    let folder = dir.path().join("mdrt");
    std::fs::create_dir(&folder).unwrap();
    write_xlsx(
        &folder.join("mdrt.xlsx"),
        &[Sheet::new(
            "Hoja1",
            vec![
                vec![Text("Asesor"), Text("PA_Acumulada")],
                vec![Text("Juan"), Num(1_200_000.0)],
                vec![Text("Ana"), Num(300_000.0)],
            ],
        )
        .at(1, 0)],
    );

    let snapshot = load_campaign(dir.path(), "mdrt").expect("snapshot present");
    assert_eq!(snapshot.records.len(), 2);
    let keys: Vec<&str> = snapshot.records[0].keys().collect();
    assert_eq!(keys, vec!["Asesor", "PA_Acumulada"]);
    let juan = snapshot.find_advisor("Juan").expect("advisor present");
    assert!((juan.number("PA_Acumulada") - 1_200_000.0).abs() < f64::EPSILON);
}

#[test]
fn campaign_sheet_offset_right_of_a1_has_no_padding_columns() {
    let dir = TempDir::new().unwrap();
    let folder = dir.path().join("graduacion");
    std::fs::create_dir(&folder).unwrap();
    write_xlsx(
        &folder.join("graduacion.xlsx"),
        &[Sheet::new(
            "Hoja1",
            vec![vec![Text("Asesor"), Text("Mes")], vec![Text("Luis"), Num(4.0)]],
        )
        .at(2, 1)],
    );

    let snapshot = load_campaign(dir.path(), "graduacion").expect("snapshot present");
    let keys: Vec<&str> = snapshot.records[0].keys().collect();
    assert_eq!(keys, vec!["Asesor", "Mes"]);
    assert!(snapshot.find_advisor("Luis").is_some());
}

#[test]
fn campaign_folders_skip_denylist_dotdirs_and_files() {
    let dir = TempDir::new().unwrap();
    for name in ["mdrt", "graduacion", "administrador", "themes", ".git", ".cache"] {
        std::fs::create_dir(dir.path().join(name)).unwrap();
    }
    std::fs::write(dir.path().join("leeme.txt"), "x").unwrap();

    let folders = list_campaign_folders(dir.path(), &CampaignSettings::default()).unwrap();
    assert_eq!(folders, vec!["graduacion", "mdrt"]);
}

#[test]
fn missing_data_root_is_an_io_error() {
    let err = list_campaign_folders(
        std::path::Path::new("/nonexistent/promotoria"),
        &CampaignSettings::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SheetError::Io { .. }));
}

#[test]
fn advisor_directory_unions_folders_and_drops_excluded() {
    let dir = TempDir::new().unwrap();
    write_campaign(
        dir.path(),
        "mdrt",
        "mdrt.xlsx",
        vec![vec![Text("Asesor")], vec![Text("B")], vec![Text("A")]],
    );
    write_campaign(
        dir.path(),
        "graduacion",
        "graduacion.xlsx",
        vec![
            vec![Text("Asesor")],
            vec![Text("A")],
            vec![Text("C")],
            vec![Text("ANA LAURA CONTRERAS IÑIGUEZ")],
        ],
    );
    std::fs::create_dir(dir.path().join("vacia")).unwrap();

    let advisors = list_advisors(dir.path(), &CampaignSettings::default()).unwrap();
    assert_eq!(advisors, vec!["A", "B", "C"]);
}

#[test]
fn fixed_campaigns_report_absent_folders() {
    let dir = TempDir::new().unwrap();
    write_campaign(dir.path(), "mdrt", "mdrt.xlsx", mdrt_rows());

    let loaded = load_fixed_campaigns(dir.path(), &CampaignSettings::default());
    let names: Vec<&str> = loaded.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names,
        vec!["mdrt", "camino_cumbre", "convenciones", "graduacion", "legion_centurion"]
    );
    assert!(loaded[0].1.is_some());
    assert!(loaded[1..].iter().all(|(_, snapshot)| snapshot.is_none()));
}

fn summary_sheets() -> Vec<Sheet> {
    let mut sin_emision_headers: Vec<Cell> =
        (0..12).map(|i| Cell::Owned(format!("I{i}"))).collect();
    sin_emision_headers.push(Blank);
    sin_emision_headers.extend((0..12).map(|i| Cell::Owned(format!("S{i}"))));

    let mut dual_row: Vec<Cell> = vec![Text("Juan"), Num(2692.0)];
    dual_row.extend(std::iter::repeat_n(Blank, 11));
    dual_row.push(Num(2692.0));
    dual_row.push(Num(3.0));

    vec![
        Sheet::new(
            "pagado_pendiente",
            vec![
                vec![Text("Feb-06")],
                vec![Text("Nombre Asesor"), Text("Sucursal"), Text("Pólizas-Pagadas")],
                vec![Text("Juan"), Num(2692.0), Num(3.0)],
                vec![Blank, Num(2692.0), Num(9.0)],
            ],
        ),
        Sheet::new(
            "asesores_sin_emision",
            vec![vec![Text("Feb-06")], sin_emision_headers, dual_row],
        ),
    ]
}

#[test]
fn summary_workbook_missing_is_none() {
    let dir = TempDir::new().unwrap();
    let result = load_summary_workbook(dir.path(), &CampaignSettings::default()).unwrap();
    assert!(result.is_none());
}

#[test]
fn summary_workbook_parses_sections_and_cut_off_text() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("administrador")).unwrap();
    write_xlsx(
        &dir.path().join("administrador").join("resumen_general.xlsx"),
        &summary_sheets(),
    );

    let workbook = load_summary_workbook(dir.path(), &CampaignSettings::default())
        .unwrap()
        .expect("workbook present");
    assert_eq!(workbook.fecha_corte, "Feb-06");
    assert_eq!(workbook.pagado_pendiente.len(), 1);
    assert_eq!(workbook.asesores_sin_emision.individuals.len(), 1);
    assert_eq!(workbook.asesores_sin_emision.summary_by_sucursal.len(), 1);
    assert_eq!(
        workbook.asesores_sin_emision.summary_by_sucursal[0].get("S1"),
        Some(&CellValue::Number(3.0))
    );
    assert!(workbook.proactivos.is_empty());
    assert!(workbook.comparativo_vida.individuals.is_empty());
    assert!(workbook.comparativo_vida.general_summary.is_none());
}

#[test]
fn summary_cut_off_serial_renders_month_year() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("administrador")).unwrap();
    write_xlsx(
        &dir.path().join("administrador").join("resumen_general.xlsx"),
        &[Sheet::new("pagado_pendiente", vec![vec![Num(45_000.0)]])],
    );

    let workbook = load_summary_workbook(dir.path(), &CampaignSettings::default())
        .unwrap()
        .unwrap();
    assert_eq!(workbook.fecha_corte, "Marzo 2023");
    assert!(workbook.pagado_pendiente.is_empty());
}

#[test]
fn corrupt_summary_workbook_is_an_error() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("administrador")).unwrap();
    std::fs::write(
        dir.path().join("administrador").join("resumen_general.xlsx"),
        b"garbage",
    )
    .unwrap();

    let err = load_summary_workbook(dir.path(), &CampaignSettings::default()).unwrap_err();
    assert!(matches!(err, SheetError::Workbook { .. }));
}
