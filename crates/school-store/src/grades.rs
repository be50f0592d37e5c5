//! Grade aggregation rules.

/// Arithmetic mean, or `None` for an empty sequence.
pub fn mean(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<f64>() / scores.len() as f64)
}

/// Blend the quiz and homework averages.
///
/// Both present: their midpoint. One present: that one. Neither: `None`.
pub fn overall(quiz_average: Option<f64>, homework_average: Option<f64>) -> Option<f64> {
    match (quiz_average, homework_average) {
        (Some(quiz), Some(homework)) => Some((quiz + homework) / 2.0),
        (Some(quiz), None) => Some(quiz),
        (None, Some(homework)) => Some(homework),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[14.0]), Some(14.0));

        let sequences: &[&[f64]] = &[
            &[0.0, 20.0],
            &[12.5, 13.25, 7.0],
            &[0.1, 0.2, 0.3, 19.9],
            &[20.0; 40],
        ];
        for scores in sequences {
            let expected: f64 = scores.iter().sum::<f64>() / scores.len() as f64;
            let got = mean(scores).unwrap();
            assert!((got - expected).abs() < TOLERANCE, "{:?}: {}", scores, got);
            assert!((0.0..=20.0).contains(&got));
        }
    }

    #[test]
    fn test_overall_rule() {
        assert_eq!(overall(Some(14.0), Some(10.0)), Some(12.0));
        assert_eq!(overall(Some(14.0), None), Some(14.0));
        assert_eq!(overall(None, Some(9.5)), Some(9.5));
        assert_eq!(overall(None, None), None);
    }
}
