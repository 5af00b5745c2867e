use crate::error::ModelError;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// A reader review embedded in its book. Reviews have no identity of their
/// own and are only ever appended.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Review {
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::numbers::deserialize_i32")
    )]
    pub rating: i32,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "review", default, skip_serializing_if = "String::is_empty")
    )]
    pub text: String,
}

impl Review {
    pub fn new(rating: i32, text: impl Into<String>) -> Self {
        Self {
            rating,
            text: text.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if (MIN_RATING..=MAX_RATING).contains(&self.rating) {
            Ok(())
        } else {
            Err(ModelError::InvalidRating(self.rating))
        }
    }
}

/// Response payload for the average rating endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AverageRating {
    #[cfg_attr(feature = "serde", serde(rename = "averageRating"))]
    pub average_rating: f64,
}

impl AverageRating {
    /// Arithmetic mean of the ratings. A book without reviews averages `0.0`.
    pub fn from_reviews(reviews: &[Review]) -> Self {
        if reviews.is_empty() {
            return Self::default();
        }
        let total: i64 = reviews.iter().map(|r| i64::from(r.rating)).sum();
        Self {
            average_rating: total as f64 / reviews.len() as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds_are_inclusive() {
        assert!(Review::new(MIN_RATING, "").validate().is_ok());
        assert!(Review::new(MAX_RATING, "").validate().is_ok());
        assert_eq!(
            Review::new(0, "meh").validate(),
            Err(ModelError::InvalidRating(0))
        );
        assert_eq!(
            Review::new(6, "wow").validate(),
            Err(ModelError::InvalidRating(6))
        );
    }

    #[test]
    fn average_of_no_reviews_is_zero() {
        assert_eq!(AverageRating::from_reviews(&[]).average_rating, 0.0);
    }

    #[test]
    fn average_is_arithmetic_mean() {
        let reviews = [Review::new(4, "good"), Review::new(2, "poor")];
        assert_eq!(AverageRating::from_reviews(&reviews).average_rating, 3.0);

        let reviews = [Review::new(5, ""), Review::new(4, ""), Review::new(4, "")];
        let avg = AverageRating::from_reviews(&reviews).average_rating;
        assert!((avg - 13.0 / 3.0).abs() < f64::EPSILON);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn average_rating_uses_camel_case_key() {
        let json = serde_json::to_value(AverageRating {
            average_rating: 3.5,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "averageRating": 3.5 }));
    }
}
