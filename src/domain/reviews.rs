use serde::Serialize;

/// One bar of the star histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingBucket {
    pub stars: u8,
    pub count: usize,
    /// Rounded share of all reviews; the bars need not add up to exactly 100.
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingSummary {
    pub count: usize,
    pub average: f64,
    /// Ordered from five stars down to one.
    pub distribution: Vec<RatingBucket>,
}

/// Arithmetic mean of the ratings, 0 for an empty slice.
pub fn average_rating(ratings: &[i16]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    ratings.iter().map(|r| f64::from(*r)).sum::<f64>() / ratings.len() as f64
}

pub fn summarize(ratings: &[i16]) -> RatingSummary {
    let count = ratings.len();

    let distribution = (1..=5u8)
        .rev()
        .map(|stars| {
            let n = ratings.iter().filter(|r| **r == i16::from(stars)).count();
            let percent = if count == 0 {
                0
            } else {
                ((n as f64 / count as f64) * 100.0).round() as u32
            };
            RatingBucket {
                stars,
                count: n,
                percent,
            }
        })
        .collect();

    RatingSummary {
        count,
        average: average_rating(ratings),
        distribution,
    }
}
