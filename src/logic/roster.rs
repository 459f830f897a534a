//! Roster import from CSV (`name,position,skill_level`).

use crate::models::{new_roster_player, Player, Position, SessionError};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct RosterRecord {
    name: String,
    position: String,
    skill_level: u8,
}

/// Read players from CSV with a header row. Any bad row fails the whole import.
///
/// Rows are numbered from 1 (the first data row after the header).
pub fn import_roster_csv<R: Read>(reader: R) -> Result<Vec<Player>, SessionError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut players = Vec::new();
    for (idx, record) in csv_reader.deserialize::<RosterRecord>().enumerate() {
        let row = idx + 1;
        let import_error = |reason: String| SessionError::Import { row, reason };
        let record = record.map_err(|e| import_error(e.to_string()))?;
        let position = record
            .position
            .parse::<Position>()
            .map_err(|e| import_error(e.to_string()))?;
        let player = new_roster_player(record.name, position, record.skill_level)
            .map_err(|e| import_error(e.to_string()))?;
        players.push(player);
    }
    Ok(players)
}
