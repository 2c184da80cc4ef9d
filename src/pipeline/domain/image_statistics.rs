use serde::Serialize;

/// Global brightness/contrast/edge/colour features of one image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStatistics {
    pub brightness: f64,
    pub contrast: f64,
    /// Fraction of pixels flagged as edges, in `[0, 1]`.
    pub edge_density: f64,
    pub avg_red: f64,
    pub avg_green: f64,
    pub avg_blue: f64,
}

impl ImageStatistics {
    pub fn blue_dominance(&self) -> f64 {
        self.avg_blue - self.avg_red.max(self.avg_green)
    }

    pub fn green_dominance(&self) -> f64 {
        self.avg_green - self.avg_red.max(self.avg_blue)
    }

    pub fn red_dominance(&self) -> f64 {
        self.avg_red - self.avg_green.max(self.avg_blue)
    }
}
