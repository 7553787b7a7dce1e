use serde::{Deserialize, Deserializer};

/// A single review as returned by the aggregation service
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub rating: f64,
}

/// Per-film review collection from the aggregation service
///
/// Review entries missing a numeric rating are dropped during
/// deserialization; a malformed entry is never fatal for the request.
#[derive(Debug, Clone, Deserialize)]
pub struct FilmReviews {
    pub film_id: i64,
    #[serde(default, deserialize_with = "lenient_reviews")]
    pub reviews: Vec<Review>,
}

fn lenient_reviews<'de, D>(deserializer: D) -> Result<Vec<Review>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<serde_json::Value> = Vec::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|entry| {
            entry
                .get("rating")
                .and_then(serde_json::Value::as_f64)
                .map(|rating| Review { rating })
        })
        .collect())
}

/// Arithmetic mean of the ratings, rounded to 2 decimal places using
/// round-half-away-from-zero. `None` for an empty collection.
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let sum: f64 = reviews.iter().map(|r| r.rating).sum();
    let mean = sum / reviews.len() as f64;
    Some((mean * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reviews(ratings: &[f64]) -> Vec<Review> {
        ratings.iter().map(|&rating| Review { rating }).collect()
    }

    #[test]
    fn average_of_mixed_ratings_rounds_to_two_decimals() {
        assert_eq!(average_rating(&reviews(&[5.0, 5.0, 5.0, 5.0, 3.0])), Some(4.6));
    }

    #[test]
    fn average_of_uniform_ratings() {
        assert_eq!(average_rating(&reviews(&[4.0, 4.0, 4.0, 4.0, 4.0])), Some(4.0));
    }

    #[test]
    fn average_rounds_half_away_from_zero() {
        // mean 4.125 is exact in binary, so the .xx5 tie is real
        assert_eq!(average_rating(&reviews(&[4.0, 4.25])), Some(4.13));
    }

    #[test]
    fn average_of_empty_collection_is_none() {
        assert_eq!(average_rating(&[]), None);
    }

    #[test]
    fn deserialization_skips_entries_without_numeric_rating() {
        let json = serde_json::json!({
            "film_id": 42,
            "reviews": [
                { "rating": 5, "reviewer": "a" },
                { "reviewer": "b" },
                { "rating": "bad" },
                { "rating": 3.5 }
            ]
        });

        let parsed: FilmReviews = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.film_id, 42);
        assert_eq!(parsed.reviews, vec![Review { rating: 5.0 }, Review { rating: 3.5 }]);
    }

    #[test]
    fn deserialization_tolerates_missing_reviews_field() {
        let parsed: FilmReviews = serde_json::from_value(serde_json::json!({ "film_id": 7 })).unwrap();
        assert!(parsed.reviews.is_empty());
    }
}
