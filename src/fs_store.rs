use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Context;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::models::{League, Team};
use crate::normalize::league_display_name;
use crate::store::{
    LeagueStore, TEAM_FILE_EXT, TeamFile, TeamStore, is_plain_league_id, league_name_and_id,
    match_team_stem, team_from_stem, team_from_upload_name,
};

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_root(&self) -> anyhow::Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("create league root {}", self.root.display()))
    }

    fn league_dir(&self, league_id: &str) -> Option<PathBuf> {
        if !is_plain_league_id(league_id) {
            return None;
        }
        let path = self.root.join(league_id);
        path.is_dir().then_some(path)
    }

    fn team_stems(dir: &Path) -> anyhow::Result<Vec<String>> {
        let entries =
            fs::read_dir(dir).with_context(|| format!("read league dir {}", dir.display()))?;
        let mut stems = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| format!("read entry in {}", dir.display()))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(TEAM_FILE_EXT) {
                continue;
            }
            if !path.is_file() {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                warn!("skipping non utf-8 team file {}", path.display());
                continue;
            };
            stems.push(stem.to_string());
        }
        stems.sort();
        Ok(stems)
    }
}

impl LeagueStore for FsStore {
    fn list_leagues(&self) -> Result<Vec<League>, StoreError> {
        self.ensure_root()?;
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("read league root {}", self.root.display()))?;

        let mut leagues = Vec::new();
        for entry in entries {
            let entry = entry.context("read league root entry")?;
            if !entry.path().is_dir() {
                continue;
            }
            let Ok(league_id) = entry.file_name().into_string() else {
                continue;
            };
            leagues.push(League {
                name: league_display_name(&league_id),
                league_id,
            });
        }
        leagues.sort_by(|a, b| a.league_id.cmp(&b.league_id));
        Ok(leagues)
    }

    fn create_league(&self, name: &str) -> Result<League, StoreError> {
        let (name, league_id) = league_name_and_id(name)?;
        self.ensure_root()?;
        let path = self.root.join(&league_id);
        fs::create_dir_all(&path)
            .with_context(|| format!("create league dir {}", path.display()))?;
        info!(league_id = %league_id, "league ready");
        Ok(League { league_id, name })
    }

    fn league_exists(&self, league_id: &str) -> bool {
        self.league_dir(league_id).is_some()
    }
}

impl TeamStore for FsStore {
    fn list_teams(&self, league_id: &str) -> Result<Vec<Team>, StoreError> {
        let Some(dir) = self.league_dir(league_id) else {
            return Ok(Vec::new());
        };
        let stems = Self::team_stems(&dir)?;
        Ok(stems.iter().map(|stem| team_from_stem(stem)).collect())
    }

    fn find_team_file(&self, league_id: &str, team_name: &str) -> Result<TeamFile, StoreError> {
        let dir = self
            .league_dir(league_id)
            .ok_or_else(|| StoreError::league_not_found(league_id))?;
        let stems = Self::team_stems(&dir)?;
        let stem = match_team_stem(stems.iter().map(String::as_str), team_name)
            .ok_or_else(|| StoreError::team_not_found(league_id, team_name))?;
        debug!(league_id, team_name, stem, "team file resolved");
        Ok(TeamFile {
            league_id: league_id.to_string(),
            stem: stem.to_string(),
        })
    }

    fn read_team_file(&self, file: &TeamFile) -> Result<Vec<u8>, StoreError> {
        let dir = self
            .league_dir(&file.league_id)
            .ok_or_else(|| StoreError::league_not_found(&file.league_id))?;
        let path = dir.join(file.file_name());
        let bytes = fs::read(&path).with_context(|| format!("read team file {}", path.display()))?;
        Ok(bytes)
    }

    fn save_team_csv(
        &self,
        league_id: &str,
        original_filename: &str,
        content: &[u8],
    ) -> Result<Team, StoreError> {
        let dir = self
            .league_dir(league_id)
            .ok_or_else(|| StoreError::league_not_found(league_id))?;
        let team = team_from_upload_name(original_filename)?;
        let file = TeamFile {
            league_id: league_id.to_string(),
            stem: team.name.clone(),
        };
        write_replace(&dir.join(file.file_name()), content)?;
        info!(
            league_id,
            team_id = %team.team_id,
            bytes = content.len(),
            "team csv stored"
        );
        Ok(team)
    }
}

// Temp name length must not depend on the team name.
fn write_replace(path: &Path, content: &[u8]) -> anyhow::Result<()> {
    let dir = path.parent().context("team file has no parent dir")?;
    let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
    let tmp = dir.join(format!(".upload.{}.{seq}.tmp", std::process::id()));

    if let Err(err) = fs::write(&tmp, content) {
        let _ = fs::remove_file(&tmp);
        return Err(err).with_context(|| format!("write team file {}", tmp.display()));
    }
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err).with_context(|| format!("swap team file {}", path.display()));
    }
    Ok(())
}
