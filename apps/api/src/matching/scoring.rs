use crate::matching::thresholds::MatchingConfig;

/// Weighted match score in `[0, 1]`:
/// `required_weight * matched_required/total_required + preferred_weight * matched_preferred/total_preferred`.
///
/// An empty required list scores `empty_required_score` (1.0); an empty preferred
/// list scores the neutral `empty_preferred_score` (0.5).
pub fn compute_match_score(
    matched_required: usize,
    total_required: usize,
    matched_preferred: usize,
    total_preferred: usize,
    config: &MatchingConfig,
) -> f64 {
    let required_score = if total_required == 0 {
        config.empty_required_score
    } else {
        matched_required as f64 / total_required as f64
    };
    let preferred_score = if total_preferred == 0 {
        config.empty_preferred_score
    } else {
        matched_preferred as f64 / total_preferred as f64
    };

    (config.required_weight * required_score + config.preferred_weight * preferred_score)
        .clamp(0.0, 1.0)
}
