use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Life status of a character. The catalog spells these inconsistently
/// ("Alive", "unknown"), so parsing is case-insensitive and anything
/// unrecognised lands on `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Status {
    Alive,
    Dead,
    #[default]
    Unknown,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Alive, Status::Dead, Status::Unknown];

    /// Value sent as the `status` query parameter.
    pub fn as_query(self) -> &'static str {
        match self {
            Status::Alive => "alive",
            Status::Dead => "dead",
            Status::Unknown => "unknown",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Alive => "Alive",
            Status::Dead => "Dead",
            Status::Unknown => "Unknown",
        }
    }
}

impl From<String> for Status {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "alive" => Status::Alive,
            "dead" => Status::Dead,
            _ => Status::Unknown,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Species values the catalog can filter on. Parsing accepts the short
/// name or the catalog's display value in any case ("human", "Mythological
/// Creature").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Species {
    Human,
    Alien,
    Humanoid,
    Robot,
    Animal,
    Mythological,
    Cronenberg,
    Poopybutthole,
    Disease,
    Unknown,
}

impl Species {
    pub const ALL: [Species; 10] = [
        Species::Human,
        Species::Alien,
        Species::Humanoid,
        Species::Robot,
        Species::Animal,
        Species::Mythological,
        Species::Cronenberg,
        Species::Poopybutthole,
        Species::Disease,
        Species::Unknown,
    ];

    /// Value sent as the `species` query parameter. Matches the display
    /// value the catalog stores on each record.
    pub fn as_query(self) -> &'static str {
        match self {
            Species::Human => "Human",
            Species::Alien => "Alien",
            Species::Humanoid => "Humanoid",
            Species::Robot => "Robot",
            Species::Animal => "Animal",
            Species::Mythological => "Mythological Creature",
            Species::Cronenberg => "Cronenberg",
            Species::Poopybutthole => "Poopybutthole",
            Species::Disease => "Disease",
            Species::Unknown => "unknown",
        }
    }
}

impl TryFrom<String> for Species {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "human" => Ok(Species::Human),
            "alien" => Ok(Species::Alien),
            "humanoid" => Ok(Species::Humanoid),
            "robot" => Ok(Species::Robot),
            "animal" => Ok(Species::Animal),
            "mythological" | "mythological creature" => Ok(Species::Mythological),
            "cronenberg" => Ok(Species::Cronenberg),
            "poopybutthole" => Ok(Species::Poopybutthole),
            "disease" => Ok(Species::Disease),
            "unknown" => Ok(Species::Unknown),
            _ => Err(format!("unknown species {value:?}")),
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}

/// A single catalog record. Immutable once deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: u32,
    pub name: String,
    pub species: String,
    pub status: Status,
    /// Image URI; rendering is left to the presentation layer.
    pub image: String,
}

/// Server-side constraints. `None` means "any".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Filters {
    pub status: Option<Status>,
    pub species: Option<Species>,
}

impl Filters {
    pub fn new(status: Option<Status>, species: Option<Species>) -> Self {
        Self { status, species }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.species.is_none()
    }
}

impl fmt::Display for Filters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, self.species) {
            (None, None) => write!(f, "all"),
            (Some(status), None) => write!(f, "{status}"),
            (None, Some(species)) => write!(f, "{species}"),
            (Some(status), Some(species)) => write!(f, "{status}, {species}"),
        }
    }
}

/// One page fetch, built by the engine for each request it issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u32,
    pub name: Option<String>,
    pub filters: Filters,
}

impl PageRequest {
    pub fn new(page: u32, filters: Filters) -> Self {
        Self {
            page,
            name: None,
            filters,
        }
    }

    /// Query parameters in the order the catalog documents them.
    /// Absent values are omitted entirely rather than sent empty.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string())];
        if let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            pairs.push(("name", name.trim().to_string()));
        }
        if let Some(status) = self.filters.status {
            pairs.push(("status", status.as_query().to_string()));
        }
        if let Some(species) = self.filters.species {
            pairs.push(("species", species.as_query().to_string()));
        }
        pairs
    }
}
