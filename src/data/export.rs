use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use super::derived::RatedView;
use super::loader::REQUIRED_COLUMNS;

/// File name offered for the downloaded view.
pub const EXPORT_FILE_NAME: &str = "filtered_covid_data.csv";

/// Media type of the exported file.
pub const EXPORT_MIME: &str = "text/csv";

/// A serialized view, ready to be saved.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub contents: String,
}

impl ExportArtifact {
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.contents)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!(
            "Exported {} bytes of {} to {}",
            self.contents.len(),
            self.mime,
            path.display()
        );
        Ok(())
    }
}

/// Export row: the source columns followed by the derived death rate.
#[derive(Serialize)]
struct RatedRow<'a> {
    iso_code: &'a str,
    location: &'a str,
    date: NaiveDate,
    total_cases: Option<f64>,
    new_cases: Option<f64>,
    total_deaths: Option<f64>,
    new_deaths: Option<f64>,
    total_vaccinations: Option<f64>,
    death_rate: Option<f64>,
}

/// Write a view including the `death_rate` column; undefined rates are
/// left empty.
///
/// The header is written up front so an empty view still yields a loadable
/// file.
pub fn write_rated_view<W: Write>(writer: W, view: &RatedView) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    let header = REQUIRED_COLUMNS.iter().copied().chain(["death_rate"]);
    wtr.write_record(header).context("writing CSV header")?;
    for row in &view.rows {
        let r = &row.record;
        wtr.serialize(RatedRow {
            iso_code: &r.entity_code,
            location: &r.entity_name,
            date: r.date,
            total_cases: r.total_cases,
            new_cases: r.new_cases,
            total_deaths: r.total_deaths,
            new_deaths: r.new_deaths,
            total_vaccinations: r.total_vaccinations,
            death_rate: row.death_rate,
        })
        .context("serializing row")?;
    }
    wtr.flush().context("flushing CSV")?;
    Ok(())
}

/// Serialize the current view for download.
pub fn export_artifact(view: &RatedView) -> Result<ExportArtifact> {
    let mut buf = Vec::new();
    write_rated_view(&mut buf, view)?;
    let contents = String::from_utf8(buf).context("CSV output is not UTF-8")?;
    Ok(ExportArtifact {
        file_name: EXPORT_FILE_NAME,
        mime: EXPORT_MIME,
        contents,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::derived::with_death_rate;
    use crate::data::loader::load_from_reader;
    use crate::data::model::fixtures::{date, record};
    use crate::data::model::{FilteredView, Record, Table};

    fn sample_view() -> FilteredView {
        let mut kenya = record("Kenya", "KEN", date(2021, 1, 2), Some(120.0));
        kenya.new_cases = Some(20.0);
        kenya.total_deaths = Some(3.0);
        kenya.new_deaths = Some(1.0);
        kenya.total_vaccinations = Some(1500.5);
        FilteredView {
            rows: vec![
                record("Kenya", "KEN", date(2021, 1, 1), Some(0.0)),
                kenya,
                record("India", "IND", date(2021, 1, 1), None),
            ],
        }
    }

    fn keys(rows: &[Record]) -> Vec<(String, NaiveDate)> {
        rows.iter().map(|r| (r.entity_name.clone(), r.date)).collect()
    }

    #[test]
    fn rated_export_has_death_rate_column() {
        let artifact = export_artifact(&with_death_rate(&sample_view())).unwrap();
        assert_eq!(artifact.file_name, "filtered_covid_data.csv");
        assert_eq!(artifact.mime, "text/csv");

        let mut lines = artifact.contents.lines();
        assert_eq!(
            lines.next(),
            Some("iso_code,location,date,total_cases,new_cases,total_deaths,new_deaths,total_vaccinations,death_rate")
        );
        // Zero cases: undefined rate is an empty cell.
        assert!(lines.next().unwrap().ends_with(','));
        assert!(lines.next().unwrap().ends_with(",2.5"));
    }

    #[test]
    fn rated_export_round_trips_through_loader() {
        let view = sample_view();
        let artifact = export_artifact(&with_death_rate(&view)).unwrap();
        let reloaded = load_from_reader(artifact.contents.as_bytes()).unwrap();

        assert_eq!(keys(reloaded.records()), keys(&view.rows));
        assert_eq!(reloaded.records(), view.rows.as_slice());
    }

    #[test]
    fn empty_view_exports_header_only() {
        let artifact = export_artifact(&RatedView::default()).unwrap();
        assert_eq!(artifact.contents.lines().count(), 1);
        let reloaded = load_from_reader(artifact.contents.as_bytes()).unwrap();
        assert!(reloaded.is_empty());
    }

    #[test]
    fn save_writes_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);
        let artifact = export_artifact(&with_death_rate(&sample_view())).unwrap();
        artifact.save(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), artifact.contents);
    }
}
