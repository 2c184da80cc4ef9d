use std::fmt;
use std::time::Duration;

/// Wall-clock time spent in each pipeline stage. Stages that did not run
/// stay `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageMetrics {
    statistics: Option<Duration>,
    scene_check: Option<Duration>,
    recognition: Option<Duration>,
    nutrition: Option<Duration>,
    total: Option<Duration>,
}

impl StageMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_statistics_duration(&mut self, duration: Duration) {
        self.statistics = Some(duration);
    }

    pub fn record_scene_check_duration(&mut self, duration: Duration) {
        self.scene_check = Some(duration);
    }

    pub fn record_recognition_duration(&mut self, duration: Duration) {
        self.recognition = Some(duration);
    }

    pub fn record_nutrition_duration(&mut self, duration: Duration) {
        self.nutrition = Some(duration);
    }

    pub fn record_total_duration(&mut self, duration: Duration) {
        self.total = Some(duration);
    }

    pub fn statistics(&self) -> Option<Duration> {
        self.statistics
    }

    pub fn scene_check(&self) -> Option<Duration> {
        self.scene_check
    }

    pub fn recognition(&self) -> Option<Duration> {
        self.recognition
    }

    pub fn nutrition(&self) -> Option<Duration> {
        self.nutrition
    }

    pub fn total(&self) -> Option<Duration> {
        self.total
    }
}

impl fmt::Display for StageMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stages = [
            ("stats", self.statistics),
            ("scene", self.scene_check),
            ("model", self.recognition),
            ("nutrition", self.nutrition),
            ("total", self.total),
        ];
        let mut first = true;
        for (name, duration) in stages {
            if let Some(duration) = duration {
                if !first {
                    f.write_str(", ")?;
                }
                write!(f, "{}={:?}", name, duration)?;
                first = false;
            }
        }
        Ok(())
    }
}
