use crate::error::ExportError;
use reviews_models::Review;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;
use tracing::debug;

pub const SHEET_NAME: &str = "reviews";
const EXCEL_DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";
const CSV_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

impl ExportFormat {
    /// Pick the format from the file extension; anything but `.csv` is a workbook
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => ExportFormat::Csv,
            _ => ExportFormat::Xlsx,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }
}

/// Write the review table to `path`, replacing any existing file
pub fn write_reviews(path: &Path, reviews: &[Review]) -> Result<ExportFormat, ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let format = ExportFormat::from_path(path);
    match format {
        ExportFormat::Xlsx => write_xlsx(path, reviews)?,
        ExportFormat::Csv => write_csv(path, reviews)?,
    }

    debug!(path = %path.display(), rows = reviews.len(), format = format.as_str(), "Wrote review export");
    Ok(format)
}

fn write_xlsx(path: &Path, reviews: &[Review]) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let datetime_format = Format::new().set_num_format(EXCEL_DATETIME_FORMAT);

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, name) in Review::COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &header_format)?;
    }

    for (idx, review) in reviews.iter().enumerate() {
        let row = (idx + 1) as u32;
        sheet.write_string(row, 0, review.username.as_str())?;
        // Missing timestamps stay as empty cells
        if let Some(published_at) = &review.published_at {
            sheet.write_datetime_with_format(row, 1, published_at, &datetime_format)?;
        }
        sheet.write_number(row, 2, review.rating)?;
        sheet.write_string(row, 3, review.title.as_str())?;
        sheet.write_string(row, 4, review.content.as_str())?;
    }

    sheet.set_column_width(0, 24)?;
    sheet.set_column_width(1, 20)?;
    sheet.set_column_width(3, 40)?;
    sheet.set_column_width(4, 80)?;

    workbook.save(path)?;
    Ok(())
}

fn write_csv(path: &Path, reviews: &[Review]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(Review::COLUMNS)?;

    for review in reviews {
        let published_at = review
            .published_at
            .map(|dt| dt.format(CSV_DATETIME_FORMAT).to_string())
            .unwrap_or_default();
        let rating = review.rating.to_string();

        writer.write_record([
            review.username.as_str(),
            published_at.as_str(),
            rating.as_str(),
            review.title.as_str(),
            review.content.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
