use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the two groups whose planner data is kept fully separate
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) enum Team {
    #[default]
    Tarde,
    Manha,
}

impl Team {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Team::Tarde => "Equipe tarde: Fernanda",
            Team::Manha => "Equipe manhã: Camila",
        }
    }

    pub(crate) fn other(self) -> Team {
        match self {
            Team::Tarde => Team::Manha,
            Team::Manha => Team::Tarde,
        }
    }

    fn id(self) -> &'static str {
        match self {
            Team::Tarde => "tarde",
            Team::Manha => "manha",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Team {
    type Err = ParseTeamError;

    fn from_str(s: &str) -> Result<Team, ParseTeamError> {
        match s.to_lowercase().as_str() {
            "tarde" => Ok(Team::Tarde),
            "manha" | "manhã" => Ok(Team::Manha),
            _ => Err(ParseTeamError(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown team {0:?}; expected \"tarde\" or \"manha\"")]
pub(crate) struct ParseTeamError(String);
