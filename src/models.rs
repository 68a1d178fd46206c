use std::collections::BTreeMap;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    pub league_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub team_id: String,
    pub name: String,
}

// Semantic fields stay `None` until a prediction engine fills them in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamStats {
    pub team_id: String,
    pub name: String,
    pub raw_columns: BTreeMap<String, f64>,
    pub win_prob: Option<f64>,
    pub draw_prob: Option<f64>,
    pub loss_prob: Option<f64>,
    pub avg_goals_for: Option<f64>,
    pub avg_goals_against: Option<f64>,
    pub over_15_prob: Option<f64>,
    pub over_25_prob: Option<f64>,
    pub btts_prob: Option<f64>,
}

impl TeamStats {
    pub fn unscored(team_id: String, name: String, raw_columns: BTreeMap<String, f64>) -> Self {
        Self {
            team_id,
            name,
            raw_columns,
            win_prob: None,
            draw_prob: None,
            loss_prob: None,
            avg_goals_for: None,
            avg_goals_against: None,
            over_15_prob: None,
            over_25_prob: None,
            btts_prob: None,
        }
    }
}

pub const PENDING_BEST_BET: &str = "EM_ANALISE";

const PENDING_COMMENT: &str = "Basic engine active. The prediction engine is a placeholder; \
configure it later to produce picks (1, X1, X, X2, 2, goal trends, etc.).";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prediction {
    Pending { comment: String },
}

impl Prediction {
    pub fn pending() -> Self {
        Prediction::Pending {
            comment: PENDING_COMMENT.to_string(),
        }
    }

    pub fn best_bet(&self) -> &str {
        match self {
            Prediction::Pending { .. } => PENDING_BEST_BET,
        }
    }

    pub fn comment(&self) -> &str {
        match self {
            Prediction::Pending { comment } => comment,
        }
    }
}

impl Serialize for Prediction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_struct("Prediction", 2)?;
        out.serialize_field("best_bet", self.best_bet())?;
        out.serialize_field("comment", self.comment())?;
        out.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct H2HAnalysis {
    pub league_id: String,
    pub home: TeamStats,
    pub away: TeamStats,
    pub prediction: Prediction,
}
