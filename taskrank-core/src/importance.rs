//! Importance evaluator.

pub const MIN_IMPORTANCE: i64 = 1;
pub const MAX_IMPORTANCE: i64 = 10;

/// Output is `rating * 10`, i.e. 10..=100.
pub const IMPORTANCE_SCALE: f64 = 10.0;

pub fn clamp_importance(rating: i64) -> i64 {
    rating.clamp(MIN_IMPORTANCE, MAX_IMPORTANCE)
}

pub fn importance_score(rating: i64) -> f64 {
    clamp_importance(rating) as f64 * IMPORTANCE_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_scale() {
        assert_eq!(importance_score(1), 10.0);
        assert_eq!(importance_score(7), 70.0);
        assert_eq!(importance_score(10), 100.0);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(importance_score(15), importance_score(10));
        assert_eq!(importance_score(0), importance_score(1));
        assert_eq!(importance_score(i64::MIN), 10.0);
    }
}
