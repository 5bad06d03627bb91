//! Excel export of the cost comparison

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

use flotte_domain::service::{CostParameters, RouteAnalysis};
use flotte_types::{Error, Result};

/// Export the analyzed (vehicle, route) pairs to an Excel file
pub fn export_to_excel(
    analyses: &[RouteAnalysis],
    params: &CostParameters,
    output_path: &Path,
) -> Result<()> {
    let mut workbook = Workbook::new();

    let summary_sheet = workbook.add_worksheet();
    write_summary_sheet(summary_sheet, analyses)?;

    let comparison_sheet = workbook.add_worksheet();
    write_comparison_sheet(comparison_sheet, analyses, params)?;

    workbook
        .save(output_path)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, analyses: &[RouteAnalysis]) -> Result<()> {
    sheet
        .set_name("Übersicht")
        .map_err(|e| Error::Excel(e.to_string()))?;

    let header_format = Format::new().set_bold();

    sheet
        .write_string_with_format(0, 0, "Flottenelektrifizierung - Kostenvergleich", &header_format)
        .map_err(|e| Error::Excel(e.to_string()))?;

    sheet
        .write_string(2, 0, "Erstellt:")
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_string(2, 1, &chrono::Utc::now().to_rfc3339())
        .map_err(|e| Error::Excel(e.to_string()))?;

    let vehicle_count = {
        let mut ids: Vec<&str> = analyses.iter().map(|a| a.vehicle.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    };

    sheet
        .write_string(3, 0, "Fahrzeuge:")
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_number(3, 1, vehicle_count as f64)
        .map_err(|e| Error::Excel(e.to_string()))?;

    sheet
        .write_string(4, 0, "Routen:")
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_number(4, 1, analyses.len() as f64)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}

fn write_comparison_sheet(
    sheet: &mut Worksheet,
    analyses: &[RouteAnalysis],
    params: &CostParameters,
) -> Result<()> {
    sheet
        .set_name("OPEX")
        .map_err(|e| Error::Excel(e.to_string()))?;

    let header_format = Format::new().set_bold();
    let mut row = 0u32;

    for analysis in analyses {
        sheet
            .write_string_with_format(row, 0, &analysis.vehicle.name, &header_format)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(
                row,
                1,
                format!(
                    "{} km, {} t, {} /100km",
                    analysis.route.distance_km,
                    analysis.route.load_t,
                    analysis.route.consumption_per_100km
                ),
            )
            .map_err(|e| Error::Excel(e.to_string()))?;
        row += 1;

        for (col, title) in ["Parameter", "E-Lkw", "Diesel-Lkw", "Einheit"]
            .iter()
            .enumerate()
        {
            sheet
                .write_string_with_format(row, col as u16, *title, &header_format)
                .map_err(|e| Error::Excel(e.to_string()))?;
        }
        row += 1;

        for cost_row in analysis.costs.rows(params) {
            sheet
                .write_string(row, 0, &cost_row.label)
                .map_err(|e| Error::Excel(e.to_string()))?;
            match cost_row.electric {
                Some(value) => sheet.write_number(row, 1, value),
                None => sheet.write_string(row, 1, "-"),
            }
            .map_err(|e| Error::Excel(e.to_string()))?;
            match cost_row.diesel {
                Some(value) => sheet.write_number(row, 2, value),
                None => sheet.write_string(row, 2, "-"),
            }
            .map_err(|e| Error::Excel(e.to_string()))?;
            sheet
                .write_string(row, 3, &cost_row.unit)
                .map_err(|e| Error::Excel(e.to_string()))?;
            row += 1;
        }

        // Blank separator between pairs
        row += 1;
    }

    Ok(())
}
