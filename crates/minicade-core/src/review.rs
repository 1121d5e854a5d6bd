use std::collections::{BTreeSet, VecDeque};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{Game, GameId};
use crate::error::ValidationError;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// A player review. Never mutated or deleted once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: u32,
    pub game_id: GameId,
    pub author: String,
    /// Star rating in `1..=5`.
    pub rating: u8,
    pub comment: String,
    pub date: NaiveDate,
}

pub fn validate_rating(rating: u8) -> Result<(), ValidationError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(ValidationError::RatingOutOfRange(rating))
    }
}

pub fn validate_comment(comment: &str) -> Result<(), ValidationError> {
    if comment.trim().is_empty() {
        Err(ValidationError::EmptyComment)
    } else {
        Ok(())
    }
}

/// In-memory review collection, newest first.
#[derive(Debug, Clone, Default)]
pub struct ReviewStore {
    reviews: VecDeque<Review>,
    known_games: BTreeSet<GameId>,
}

impl ReviewStore {
    /// Empty store accepting reviews for the games in `catalog`.
    pub fn new(catalog: &[Game]) -> Self {
        Self {
            reviews: VecDeque::new(),
            known_games: catalog.iter().map(|g| g.id).collect(),
        }
    }

    /// Store pre-existing reviews, kept in the given order. Every review
    /// goes through the same checks as a submission, plus id uniqueness.
    pub fn with_reviews(
        catalog: &[Game],
        reviews: impl IntoIterator<Item = Review>,
    ) -> Result<Self, ValidationError> {
        let mut store = Self::new(catalog);
        let mut ids = BTreeSet::new();
        for review in reviews {
            store.check(review.game_id, review.rating, &review.comment)?;
            if !ids.insert(review.id) {
                return Err(ValidationError::DuplicateReviewId(review.id));
            }
            store.reviews.push_back(review);
        }
        Ok(store)
    }

    /// Reviews for one game, newest first.
    pub fn reviews_for(&self, game_id: GameId) -> Vec<&Review> {
        self.reviews.iter().filter(|r| r.game_id == game_id).collect()
    }

    /// Validate and prepend a new review, returning the stored copy.
    pub fn submit(
        &mut self,
        game_id: GameId,
        rating: u8,
        comment: &str,
        author: &str,
        date: NaiveDate,
    ) -> Result<Review, ValidationError> {
        self.check(game_id, rating, comment)?;

        let review = Review {
            id: self.next_id(),
            game_id,
            author: author.to_string(),
            rating,
            comment: comment.to_string(),
            date,
        };
        tracing::debug!(id = review.id, game = %game_id, rating, "review submitted");
        self.reviews.push_front(review.clone());
        Ok(review)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Review> {
        self.reviews.iter()
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    fn next_id(&self) -> u32 {
        self.reviews.iter().map(|r| r.id).max().unwrap_or(0) + 1
    }

    fn check(&self, game_id: GameId, rating: u8, comment: &str) -> Result<(), ValidationError> {
        validate_rating(rating)?;
        validate_comment(comment)?;
        if !self.known_games.contains(&game_id) {
            return Err(ValidationError::UnknownGame(game_id));
        }
        Ok(())
    }
}
