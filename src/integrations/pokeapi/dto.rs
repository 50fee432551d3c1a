// src/integrations/pokeapi/dto.rs
//
// Wire DTOs mirroring the PokeAPI response shapes. Field optionality
// follows the upstream contract loosely on purpose: presence of required
// fields is checked during mapping, not during deserialization, so a
// malformed document surfaces as a validation failure instead of an
// opaque decode error.

use serde::{Deserialize, Serialize};

/// Response of the name listing endpoint (`/pokemon?limit=...&offset=0`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokeApiNameList {
    #[serde(default)]
    pub results: Vec<PokeApiName>,
}

/// One entry of the name listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokeApiName {
    pub name: String,
}

/// Detailed information returned for a specific Pokemon (`/pokemon/{name}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokeApiDetail {
    pub id: Option<i64>,
    pub name: Option<String>,
    #[serde(default)]
    pub types: Vec<PokeApiTypeSlot>,
    pub sprites: Option<PokeApiSprite>,
}

/// A single type slot of a Pokemon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokeApiTypeSlot {
    #[serde(rename = "type")]
    pub type_info: PokeApiType,
}

/// A Pokemon type (e.g. "fire", "water")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokeApiType {
    pub name: String,
}

/// Container for the Pokemon's sprite URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokeApiSprite {
    pub front_default: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_name_list() {
        let json = r#"{"count":2,"results":[{"name":"pikachu","url":"u1"},{"name":"bulbasaur","url":"u2"}]}"#;
        let list: PokeApiNameList = serde_json::from_str(json).unwrap();

        let names: Vec<&str> = list.results.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["pikachu", "bulbasaur"]);
    }

    #[test]
    fn test_missing_results_decodes_as_empty_list() {
        let list: PokeApiNameList = serde_json::from_str("{}").unwrap();
        assert!(list.results.is_empty());
    }

    #[test]
    fn test_deserializes_detail() {
        let json = r#"{
            "id": 6,
            "name": "charizard",
            "types": [
                {"slot": 1, "type": {"name": "fire", "url": "u"}},
                {"slot": 2, "type": {"name": "flying", "url": "u"}}
            ],
            "sprites": {"front_default": "https://img/charizard.png", "back_default": null}
        }"#;
        let detail: PokeApiDetail = serde_json::from_str(json).unwrap();

        assert_eq!(detail.id, Some(6));
        assert_eq!(detail.name.as_deref(), Some("charizard"));
        assert_eq!(detail.types.len(), 2);
        assert_eq!(detail.types[0].type_info.name, "fire");
        assert_eq!(
            detail.sprites.unwrap().front_default.as_deref(),
            Some("https://img/charizard.png")
        );
    }

    #[test]
    fn test_detail_with_missing_fields_still_decodes() {
        let detail: PokeApiDetail = serde_json::from_str(r#"{"name":"missingno"}"#).unwrap();

        assert_eq!(detail.id, None);
        assert!(detail.types.is_empty());
        assert!(detail.sprites.is_none());
    }
}
