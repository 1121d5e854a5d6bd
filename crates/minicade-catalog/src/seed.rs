use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use minicade_core::catalog::Game;
use minicade_core::review::{Review, ReviewStore};

use crate::error::CatalogError;

/// The storefront's built-in catalog.
pub const SEED_CATALOG: &str = include_str!("../data/catalog.toml");

/// Raw catalog document: games plus any reviews they ship with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSeed {
    pub games: Vec<Game>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// A validated catalog ready to hand to the controller.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub games: Vec<Game>,
    pub reviews: ReviewStore,
}

impl CatalogSeed {
    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(contents)?)
    }

    /// Check game ids are unique and every review passes submission rules.
    pub fn into_catalog(self) -> Result<Catalog, CatalogError> {
        let mut ids = BTreeSet::new();
        for game in &self.games {
            if !ids.insert(game.id) {
                return Err(CatalogError::DuplicateGameId(game.id));
            }
        }
        let reviews = ReviewStore::with_reviews(&self.games, self.reviews)?;
        tracing::info!(
            games = self.games.len(),
            reviews = reviews.len(),
            "catalog loaded"
        );
        Ok(Catalog {
            games: self.games,
            reviews,
        })
    }
}

impl Catalog {
    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        CatalogSeed::from_toml_str(contents)?.into_catalog()
    }
}

/// The built-in six-game catalog with its two seed reviews.
pub fn default_catalog() -> Result<Catalog, CatalogError> {
    Catalog::from_toml_str(SEED_CATALOG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use minicade_core::catalog::{GameId, GameVariant, featured_games, new_releases};
    use minicade_core::error::ValidationError;
    use minicade_core::test_helpers::sample_catalog;

    #[test]
    fn built_in_catalog_matches_storefront() {
        let catalog = default_catalog().unwrap();
        assert_eq!(catalog.games, sample_catalog());
        assert_eq!(catalog.reviews.len(), 2);

        let featured: Vec<u32> = featured_games(&catalog.games).iter().map(|g| g.id.0).collect();
        assert_eq!(featured, vec![1, 2]);
        let fresh: Vec<u32> = new_releases(&catalog.games).iter().map(|g| g.id.0).collect();
        assert_eq!(fresh, vec![3, 5]);
    }

    #[test]
    fn seed_reviews_are_newest_first() {
        let catalog = default_catalog().unwrap();
        let first = catalog.reviews.iter().next().unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(first.author, "Player123");
        assert_eq!(catalog.reviews.reviews_for(GameId(2))[0].comment, "Nice way to kill time.");
    }

    #[test]
    fn duplicate_game_id_is_rejected() {
        let doc = r#"
[[games]]
id = 1
title = "A"
genre = "action"
rating = 4.0
review_count = 1
image_token = "a"
variant = "clicker"

[[games]]
id = 1
title = "B"
genre = "puzzle"
rating = 3.0
review_count = 2
image_token = "b"
variant = "memory"
"#;
        let err = Catalog::from_toml_str(doc).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateGameId(GameId(1))));
    }

    #[test]
    fn review_for_unknown_game_is_rejected() {
        let doc = r#"
[[games]]
id = 1
title = "A"
genre = "action"
rating = 4.0
review_count = 1
image_token = "a"
variant = "reaction"

[[reviews]]
id = 1
game_id = 9
author = "X"
rating = 3
comment = "ok"
date = "2025-01-01"
"#;
        let err = Catalog::from_toml_str(doc).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Review(ValidationError::UnknownGame(GameId(9)))
        ));
    }

    #[test]
    fn reviews_table_is_optional() {
        let doc = r#"
[[games]]
id = 7
title = "Solo"
genre = "puzzle"
rating = 5.0
review_count = 0
image_token = "solo"
variant = "number_guess"
"#;
        let catalog = Catalog::from_toml_str(doc).unwrap();
        assert!(catalog.reviews.is_empty());
        assert_eq!(catalog.games[0].variant, GameVariant::NumberGuess);
        assert!(!catalog.games[0].featured);
    }

    #[test]
    fn malformed_document_is_seed_error() {
        let err = Catalog::from_toml_str("[[games]\nid = ").unwrap_err();
        assert!(matches!(err, CatalogError::Seed(_)));
    }
}
