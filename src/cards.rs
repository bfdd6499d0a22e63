use crate::error::CatalogError;
use crate::types::{Edge, Element};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const MAX_EDGE: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub north: u8,
    pub east: u8,
    pub south: u8,
    pub west: u8,
    #[serde(default)]
    pub element: Option<Element>,
}

impl Card {
    pub fn new(id: u32, edges: [u8; 4], element: Option<Element>) -> Self {
        Self {
            id,
            name: String::new(),
            north: edges[0],
            east: edges[1],
            south: edges[2],
            west: edges[3],
            element,
        }
    }

    /// Edge values in [north, east, south, west] order.
    #[inline]
    pub fn edges(&self) -> [u8; 4] {
        [self.north, self.east, self.south, self.west]
    }

    #[inline]
    pub fn edge(&self, edge: Edge) -> u8 {
        self.edges()[edge.index()]
    }
}

/// Immutable id -> card lookup. Iterates in ascending id order.
#[derive(Debug, Default, Clone)]
pub struct CardCatalog {
    by_id: BTreeMap<u32, Card>,
}

impl CardCatalog {
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, CatalogError> {
        if cards.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut by_id = BTreeMap::new();
        for c in cards {
            validate_card(&c)?;
            let id = c.id;
            if by_id.insert(id, c).is_some() {
                return Err(CatalogError::DuplicateId(id));
            }
        }
        Ok(Self { by_id })
    }

    #[inline]
    pub fn get(&self, id: u32) -> Option<&Card> {
        self.by_id.get(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.by_id.values()
    }
}

fn validate_card(card: &Card) -> Result<(), CatalogError> {
    for value in card.edges() {
        if value > MAX_EDGE {
            return Err(CatalogError::InvalidEdge { id: card.id, value });
        }
    }
    Ok(())
}

pub fn catalog_from_json_str(data: &str) -> Result<CardCatalog, CatalogError> {
    let raw: Vec<Card> =
        serde_json::from_str(data).map_err(|e| CatalogError::Parse(e.to_string()))?;
    CardCatalog::from_cards(raw)
}

/// Load cards from a JSON array file.
pub fn load_catalog_from_json<P: AsRef<Path>>(path: P) -> Result<CardCatalog, CatalogError> {
    let data = fs::read_to_string(path.as_ref()).map_err(|e| CatalogError::Io(e.to_string()))?;
    let catalog = catalog_from_json_str(&data)?;
    log::debug!(
        "loaded {} cards from {}",
        catalog.len(),
        path.as_ref().display()
    );
    Ok(catalog)
}
