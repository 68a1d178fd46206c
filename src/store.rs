use crate::error::StoreError;
use crate::models::{League, Team};
use crate::normalize::{normalize_name, trim_name};

pub const TEAM_FILE_EXT: &str = "csv";

// `{stem}.csv` inside `league_id`, whatever the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamFile {
    pub league_id: String,
    pub stem: String,
}

impl TeamFile {
    pub fn file_name(&self) -> String {
        format!("{}.{TEAM_FILE_EXT}", self.stem)
    }
}

pub trait LeagueStore {
    fn list_leagues(&self) -> Result<Vec<League>, StoreError>;

    fn create_league(&self, name: &str) -> Result<League, StoreError>;

    fn league_exists(&self, league_id: &str) -> bool;
}

pub trait TeamStore {
    // An absent league yields an empty list.
    fn list_teams(&self, league_id: &str) -> Result<Vec<Team>, StoreError>;

    fn find_team_file(&self, league_id: &str, team_name: &str) -> Result<TeamFile, StoreError>;

    fn read_team_file(&self, file: &TeamFile) -> Result<Vec<u8>, StoreError>;

    fn save_team_csv(
        &self,
        league_id: &str,
        original_filename: &str,
        content: &[u8],
    ) -> Result<Team, StoreError>;
}

pub trait Storage: LeagueStore + TeamStore + Send + Sync + 'static {}

impl<T> Storage for T where T: LeagueStore + TeamStore + Send + Sync + 'static {}

pub fn league_name_and_id(name: &str) -> Result<(String, String), StoreError> {
    let trimmed = trim_name(name);
    if trimmed.is_empty() {
        return Err(StoreError::invalid("league name must not be empty"));
    }
    let league_id = normalize_name(trimmed);
    if league_id.is_empty() {
        return Err(StoreError::invalid(format!(
            "league name '{trimmed}' cannot be normalized"
        )));
    }
    Ok((trimmed.to_string(), league_id))
}

pub fn is_plain_league_id(league_id: &str) -> bool {
    !league_id.is_empty()
        && league_id != "."
        && league_id != ".."
        && !league_id.contains(['/', '\\', '\0'])
}

pub fn team_from_upload_name(original_filename: &str) -> Result<Team, StoreError> {
    let base = original_filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_filename);

    let suffix = format!(".{TEAM_FILE_EXT}");
    let split_at = base.len().saturating_sub(suffix.len());
    if base.len() < suffix.len()
        || !base.is_char_boundary(split_at)
        || !base[split_at..].eq_ignore_ascii_case(&suffix)
    {
        return Err(StoreError::invalid("file must have a .csv extension"));
    }

    let stem = trim_name(&base[..split_at]);
    if stem.is_empty() {
        return Err(StoreError::invalid(
            "file name does not identify a team",
        ));
    }
    let team_id = normalize_name(stem);
    if team_id.is_empty() {
        return Err(StoreError::invalid(format!(
            "team name '{stem}' cannot be normalized"
        )));
    }
    Ok(Team {
        team_id,
        name: stem.to_string(),
    })
}

pub fn team_from_stem(stem: &str) -> Team {
    Team {
        team_id: normalize_name(stem),
        name: stem.to_string(),
    }
}

pub fn match_team_stem<'a, I>(stems: I, team_name: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let target = normalize_name(team_name);
    stems
        .into_iter()
        .find(|stem| normalize_name(stem) == target)
}
