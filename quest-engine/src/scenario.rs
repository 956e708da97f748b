use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::QuestError;
use crate::graph::LocationGraph;
use crate::suspect_index::{SuspectIndex, DEFAULT_BUCKET_COUNT};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueSuspect {
    pub clue: String,
    pub suspect: String,
}

/// Static description of a mansion: its rooms (the first one is the
/// entrance) and which suspect each clue incriminates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_bucket_count")]
    pub bucket_count: usize,
    pub rooms: Vec<RoomSpec>,
    #[serde(default)]
    pub suspects: Vec<ClueSuspect>,
}

fn default_bucket_count() -> usize {
    DEFAULT_BUCKET_COUNT
}

fn room(name: &str, clue: &str, left: Option<&str>, right: Option<&str>) -> RoomSpec {
    RoomSpec {
        name: name.to_string(),
        clue: (!clue.is_empty()).then(|| clue.to_string()),
        left: left.map(str::to_string),
        right: right.map(str::to_string),
    }
}

fn pair(clue: &str, suspect: &str) -> ClueSuspect {
    ClueSuspect {
        clue: clue.to_string(),
        suspect: suspect.to_string(),
    }
}

impl Scenario {
    /// The Enigma Studios mansion.
    pub fn classic() -> Self {
        let rooms = vec![
            room(
                "Hall de Entrada",
                "Pegadas molhadas no tapete",
                Some("Sala de Estar"),
                Some("Cozinha"),
            ),
            room("Sala de Estar", "", Some("Biblioteca"), Some("Escritorio")),
            room(
                "Cozinha",
                "Faca desaparecida do bloco",
                Some("Despensa"),
                Some("Jardim"),
            ),
            room(
                "Biblioteca",
                "Livro aberto sobre venenos",
                Some("Sala Secreta"),
                Some("Sala de Leitura"),
            ),
            room("Escritorio", "", Some("Cofre"), None),
            room("Despensa", "Frasco vazio de arsenico", None, None),
            room("Jardim", "", None, Some("Estufa")),
            room("Sala Secreta", "Documento queimado parcialmente", None, None),
            room("Sala de Leitura", "Carta ameacadora escondida", None, None),
            room("Cofre", "Testamento adulterado", None, None),
            room("Estufa", "Planta venenosa cultivada", None, None),
        ];
        let suspects = vec![
            pair("Pegadas molhadas no tapete", "Jardineiro"),
            pair("Faca desaparecida do bloco", "Cozinheiro"),
            pair("Livro aberto sobre venenos", "Mordomo"),
            pair("Frasco vazio de arsenico", "Mordomo"),
            pair("Documento queimado parcialmente", "Advogado"),
            pair("Carta ameacadora escondida", "Advogado"),
            pair("Testamento adulterado", "Advogado"),
            pair("Planta venenosa cultivada", "Jardineiro"),
        ];
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
            rooms,
            suspects,
        }
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn build_graph(&self) -> Result<LocationGraph, QuestError> {
        let mut graph = LocationGraph::new();
        for spec in &self.rooms {
            graph.create_node(spec.name.as_str(), spec.clue.clone().unwrap_or_default())?;
        }

        let lookup = |graph: &LocationGraph, name: &str| {
            graph.find(name).ok_or_else(|| QuestError::UnknownLocation {
                name: name.to_string(),
            })
        };
        for spec in &self.rooms {
            let parent = lookup(&graph, &spec.name)?;
            if let Some(left) = &spec.left {
                let child = lookup(&graph, left)?;
                graph.attach_left(parent, child)?;
            }
            if let Some(right) = &spec.right {
                let child = lookup(&graph, right)?;
                graph.attach_right(parent, child)?;
            }
        }

        graph.validate()?;
        debug!(rooms = graph.len(), "mansion built");
        Ok(graph)
    }

    pub fn build_index(&self) -> Result<SuspectIndex, QuestError> {
        let mut index = SuspectIndex::with_buckets(self.bucket_count)?;
        for entry in &self.suspects {
            index.insert(entry.clue.as_str(), entry.suspect.as_str());
        }
        debug!(entries = index.len(), buckets = index.bucket_count(), "suspect index built");
        Ok(index)
    }

    pub fn build(&self) -> Result<(LocationGraph, SuspectIndex), QuestError> {
        Ok((self.build_graph()?, self.build_index()?))
    }
}
