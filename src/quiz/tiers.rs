use crate::models::Tip;

/// Accuracy bracket deciding which tips a player receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipTier {
    /// 80% and above.
    Advanced,
    /// 60% up to 80%.
    Intermediate,
    /// Below 60%.
    Basic,
}

impl TipTier {
    pub fn for_accuracy(accuracy_percent: f64) -> Self {
        if accuracy_percent >= 80.0 {
            TipTier::Advanced
        } else if accuracy_percent >= 60.0 {
            TipTier::Intermediate
        } else {
            TipTier::Basic
        }
    }

    pub fn categories(self) -> [&'static str; 2] {
        match self {
            TipTier::Advanced => ["Equipment", "Gardening"],
            TipTier::Intermediate => ["Kitchen", "Bathroom"],
            TipTier::Basic => ["Showering", "Personal Hygiene"],
        }
    }

    pub fn max_tips(self) -> usize {
        match self {
            TipTier::Advanced => 3,
            TipTier::Intermediate => 4,
            TipTier::Basic => 5,
        }
    }

    /// First matching tips in repository order, capped for the tier.
    pub fn select(self, tips: &[Tip]) -> Vec<Tip> {
        let categories = self.categories();
        tips.iter()
            .filter(|tip| categories.contains(&tip.category.as_str()))
            .take(self.max_tips())
            .cloned()
            .collect()
    }
}

/// Accuracy bracket used for the closing message and the score color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceTier {
    /// 90% and above.
    Excellent,
    VeryGood,
    Good,
    Fair,
    /// Below 60%.
    KeepStudying,
}

impl PerformanceTier {
    pub fn for_accuracy(accuracy_percent: f64) -> Self {
        if accuracy_percent >= 90.0 {
            PerformanceTier::Excellent
        } else if accuracy_percent >= 80.0 {
            PerformanceTier::VeryGood
        } else if accuracy_percent >= 70.0 {
            PerformanceTier::Good
        } else if accuracy_percent >= 60.0 {
            PerformanceTier::Fair
        } else {
            PerformanceTier::KeepStudying
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PerformanceTier::Excellent => "Excellent! You are a true defender of the oceans!",
            PerformanceTier::VeryGood => "Very good! You have great ocean literacy!",
            PerformanceTier::Good => "Good job! Keep learning about the oceans!",
            PerformanceTier::Fair => "Not bad! There is room to grow your ocean knowledge!",
            PerformanceTier::KeepStudying => {
                "Keep studying! The oceans need more defenders like you!"
            }
        }
    }
}

pub fn performance_message(accuracy_percent: f64) -> &'static str {
    PerformanceTier::for_accuracy(accuracy_percent).message()
}

/// `MM:SS` rendering of a second count.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Urgency of the countdown, used to color the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBand {
    Calm,
    Hurry,
    Critical,
}

impl TimeBand {
    pub fn for_remaining(seconds: u32) -> Self {
        match seconds {
            0..=5 => TimeBand::Critical,
            6..=10 => TimeBand::Hurry,
            _ => TimeBand::Calm,
        }
    }
}
