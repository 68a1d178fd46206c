use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::anyhow;

use crate::error::StoreError;
use crate::models::{League, Team};
use crate::normalize::league_display_name;
use crate::store::{
    LeagueStore, TeamFile, TeamStore, league_name_and_id, match_team_stem, team_from_stem,
    team_from_upload_name,
};

type Leagues = BTreeMap<String, BTreeMap<String, Vec<u8>>>;

#[derive(Debug, Default)]
pub struct MemoryStore {
    leagues: RwLock<Leagues>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Leagues>, StoreError> {
        self.leagues
            .read()
            .map_err(|_| StoreError::Unexpected(anyhow!("memory store lock poisoned")))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Leagues>, StoreError> {
        self.leagues
            .write()
            .map_err(|_| StoreError::Unexpected(anyhow!("memory store lock poisoned")))
    }
}

impl LeagueStore for MemoryStore {
    fn list_leagues(&self) -> Result<Vec<League>, StoreError> {
        Ok(self
            .read()?
            .keys()
            .map(|league_id| League {
                league_id: league_id.clone(),
                name: league_display_name(league_id),
            })
            .collect())
    }

    fn create_league(&self, name: &str) -> Result<League, StoreError> {
        let (name, league_id) = league_name_and_id(name)?;
        self.write()?.entry(league_id.clone()).or_default();
        Ok(League { league_id, name })
    }

    fn league_exists(&self, league_id: &str) -> bool {
        self.read()
            .map(|leagues| leagues.contains_key(league_id))
            .unwrap_or(false)
    }
}

impl TeamStore for MemoryStore {
    fn list_teams(&self, league_id: &str) -> Result<Vec<Team>, StoreError> {
        let leagues = self.read()?;
        let Some(files) = leagues.get(league_id) else {
            return Ok(Vec::new());
        };
        Ok(files.keys().map(|stem| team_from_stem(stem)).collect())
    }

    fn find_team_file(&self, league_id: &str, team_name: &str) -> Result<TeamFile, StoreError> {
        let leagues = self.read()?;
        let files = leagues
            .get(league_id)
            .ok_or_else(|| StoreError::league_not_found(league_id))?;
        let stem = match_team_stem(files.keys().map(String::as_str), team_name)
            .ok_or_else(|| StoreError::team_not_found(league_id, team_name))?;
        Ok(TeamFile {
            league_id: league_id.to_string(),
            stem: stem.to_string(),
        })
    }

    fn read_team_file(&self, file: &TeamFile) -> Result<Vec<u8>, StoreError> {
        let leagues = self.read()?;
        let files = leagues
            .get(&file.league_id)
            .ok_or_else(|| StoreError::league_not_found(&file.league_id))?;
        files
            .get(&file.stem)
            .cloned()
            .ok_or_else(|| StoreError::team_not_found(&file.league_id, &file.stem))
    }

    fn save_team_csv(
        &self,
        league_id: &str,
        original_filename: &str,
        content: &[u8],
    ) -> Result<Team, StoreError> {
        let mut leagues = self.write()?;
        let files = leagues
            .get_mut(league_id)
            .ok_or_else(|| StoreError::league_not_found(league_id))?;
        let team = team_from_upload_name(original_filename)?;
        files.insert(team.name.clone(), content.to_vec());
        Ok(team)
    }
}
