use std::path::Path;

use csv::WriterBuilder;

use crate::types::TrackRecord;

/// Column order of the exported file.
pub const CSV_COLUMNS: [&str; 5] = ["Track", "Artist", "Album", "Release Year", "Popularity"];

/// File name offered to the browser for the download.
pub const CSV_FILE_NAME: &str = "top_tracks_by_year.csv";

/// Encodes the records as UTF-8 CSV with a header row.
///
/// The header is written even when there are no records.
pub fn to_csv(records: &[TrackRecord]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

pub async fn write_csv(path: &Path, records: &[TrackRecord]) -> crate::Res<()> {
    let bytes = to_csv(records)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        async_fs::create_dir_all(parent).await?;
    }
    async_fs::write(path, bytes).await?;
    Ok(())
}
