use std::collections::BTreeMap;

use anyhow::Context;
use csv::ReaderBuilder;
use tracing::debug;

use crate::error::StoreError;
use crate::models::{H2HAnalysis, Prediction, TeamStats};
use crate::normalize::normalize_name;
use crate::store::TeamStore;

pub const CSV_DELIMITER: u8 = b';';

/// Numeric cells of the first data row, keyed by header. `Ok(None)` when there is no data row.
pub fn first_row_numeric(content: &[u8]) -> anyhow::Result<Option<BTreeMap<String, f64>>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(CSV_DELIMITER)
        .flexible(true)
        .from_reader(content);
    let headers = reader.byte_headers().context("read csv header")?.clone();

    let mut record = csv::ByteRecord::new();
    if !reader.read_byte_record(&mut record).context("read csv row")? {
        return Ok(None);
    }

    let mut out = BTreeMap::new();
    for (header, cell) in headers.iter().zip(record.iter()) {
        let Some(value) = parse_cell(cell) else {
            continue;
        };
        out.insert(String::from_utf8_lossy(header).into_owned(), value);
    }
    Ok(Some(out))
}

fn parse_cell(cell: &[u8]) -> Option<f64> {
    let text = std::str::from_utf8(cell).ok()?.trim();
    let value = text.parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

pub fn load_team_stats<S>(
    store: &S,
    league_id: &str,
    team_name: &str,
) -> Result<TeamStats, StoreError>
where
    S: TeamStore + ?Sized,
{
    let file = store.find_team_file(league_id, team_name)?;
    let content = store.read_team_file(&file)?;
    let raw_columns = first_row_numeric(&content)
        .with_context(|| format!("parse csv for team {team_name} ({})", file.file_name()))?
        .ok_or_else(|| {
            StoreError::invalid(format!(
                "empty CSV for team {team_name} ({})",
                file.file_name()
            ))
        })?;
    debug!(
        league_id,
        team_name,
        columns = raw_columns.len(),
        "team stats loaded"
    );
    Ok(TeamStats::unscored(
        normalize_name(team_name),
        team_name.to_string(),
        raw_columns,
    ))
}

pub fn analyze_h2h<S>(
    store: &S,
    league_id: &str,
    home_name: &str,
    away_name: &str,
) -> Result<H2HAnalysis, StoreError>
where
    S: TeamStore + ?Sized,
{
    let home = load_team_stats(store, league_id, home_name)?;
    let away = load_team_stats(store, league_id, away_name)?;
    Ok(H2HAnalysis {
        league_id: league_id.to_string(),
        home,
        away,
        prediction: Prediction::pending(),
    })
}
