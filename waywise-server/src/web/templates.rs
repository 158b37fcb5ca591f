//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::{Priority, TravelOption, TravelQuery};
use crate::recommend::Recommendation;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the recommendation form and chat box.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub origins: Vec<String>,
    pub destinations: Vec<String>,
    pub priorities: Vec<PriorityView>,
}

/// About page.
#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub option_count: usize,
    pub location_count: usize,
    pub threshold: u8,
    pub extractor: &'static str,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Recommendation result fragment.
#[derive(Template)]
#[template(path = "recommendation.html")]
pub struct RecommendationTemplate {
    pub view: RecommendationView,
}

/// Chat answer fragment.
#[derive(Template)]
#[template(path = "chat_result.html")]
pub struct ChatResultTemplate {
    pub message: String,
    pub intent: TravelQuery,
    pub view: RecommendationView,
    pub explanation: Option<String>,
}

/// Error fragment.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// A priority choice in the form.
#[derive(Debug, Clone)]
pub struct PriorityView {
    pub value: &'static str,
    pub description: &'static str,
}

impl PriorityView {
    pub fn all() -> Vec<Self> {
        Priority::ALL
            .into_iter()
            .map(|p| PriorityView {
                value: p.as_str(),
                description: p.description(),
            })
            .collect()
    }
}

/// A travel option with costs formatted for display.
#[derive(Debug, Clone)]
pub struct OptionView {
    pub mode: &'static str,
    pub time: String,
    pub fare: String,
    pub co2: String,
    pub walking: String,
}

impl OptionView {
    pub fn from_option(option: &TravelOption) -> Self {
        let costs = option.costs();
        Self {
            mode: option.mode().label(),
            time: format!("{:.0} min", costs.time),
            fare: format!("${:.2}", costs.fare),
            co2: format!("{:.2} kg", costs.co2),
            walking: format!("{:.0} m", costs.energy),
        }
    }
}

/// A recommendation formatted for display.
#[derive(Debug, Clone)]
pub struct RecommendationView {
    pub origin: String,
    pub destination: String,
    pub origin_score: u8,
    pub destination_score: u8,
    pub priority: &'static str,
    pub best: OptionView,
    pub alternatives: Vec<OptionView>,
}

impl RecommendationView {
    pub fn from_recommendation(rec: &Recommendation) -> Self {
        Self {
            origin: rec.origin.location.to_string(),
            destination: rec.destination.location.to_string(),
            origin_score: rec.origin.score,
            destination_score: rec.destination.score,
            priority: rec.priority.description(),
            best: OptionView::from_option(&rec.option),
            alternatives: rec.alternatives.iter().map(OptionView::from_option).collect(),
        }
    }

    /// Whether either location was matched approximately rather than exactly.
    pub fn is_approximate(&self) -> bool {
        self.origin_score < 100 || self.destination_score < 100
    }

    /// One-paragraph answer, e.g. "The best travel mode from Central_Park
    /// to Times_Square is Public transit: 50 min, $3.00, 2.00 kg CO2,
    /// 300 m walking."
    pub fn summary(&self) -> String {
        format!(
            "The best travel mode from {} to {} is {}: {}, {}, {} CO2, {} walking.",
            self.origin,
            self.destination,
            self.best.mode,
            self.best.time,
            self.best.fare,
            self.best.co2,
            self.best.walking,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Costs, Location, TravelMode};
    use crate::resolve::LocationMatch;

    fn option(mode: TravelMode, time: f64, fare: f64) -> TravelOption {
        TravelOption::new(
            Location::parse("Central_Park").unwrap(),
            Location::parse("Times_Square").unwrap(),
            mode,
            Costs::new(time, fare, 2.0, 300.0).unwrap(),
        )
        .unwrap()
    }

    fn view(destination_score: u8) -> RecommendationView {
        RecommendationView::from_recommendation(&Recommendation {
            origin: LocationMatch {
                location: Location::parse("Central_Park").unwrap(),
                score: 100,
            },
            destination: LocationMatch {
                location: Location::parse("Times_Square").unwrap(),
                score: destination_score,
            },
            priority: Priority::LowestCost,
            option: option(TravelMode::PublicTransit, 50.0, 3.0),
            alternatives: vec![option(TravelMode::Drive, 20.0, 10.0)],
        })
    }

    #[test]
    fn option_view_formats_costs() {
        let v = OptionView::from_option(&option(TravelMode::CitiBike, 34.6, 4.5));
        assert_eq!(v.mode, "Citi Bike");
        assert_eq!(v.time, "35 min");
        assert_eq!(v.fare, "$4.50");
        assert_eq!(v.co2, "2.00 kg");
        assert_eq!(v.walking, "300 m");
    }

    #[test]
    fn summary_sentence() {
        assert_eq!(
            view(100).summary(),
            "The best travel mode from Central_Park to Times_Square is Public transit: \
             50 min, $3.00, 2.00 kg CO2, 300 m walking."
        );
    }

    #[test]
    fn approximate_match_flag() {
        assert!(!view(100).is_approximate());
        assert!(view(80).is_approximate());
    }

    #[test]
    fn priority_views_cover_all() {
        let views = PriorityView::all();
        assert_eq!(views.len(), 4);
        assert_eq!(views[0].value, "lowest_cost");
    }

    #[test]
    fn recommendation_fragment_renders() {
        let html = RecommendationTemplate { view: view(80) }.render().unwrap();
        assert!(html.contains("Public transit"));
        assert!(html.contains("Times_Square"));
        assert!(html.contains("Drive"));
    }

    #[test]
    fn chat_fragment_shows_explanation() {
        let intent = TravelQuery::new("central park", "times square", "lowest_cost");
        let html = ChatResultTemplate {
            message: "park to times square, cheap".into(),
            intent: intent.clone(),
            view: view(100),
            explanation: Some("Leave before rush hour.".into()),
        }
        .render()
        .unwrap();
        assert!(html.contains("Leave before rush hour."));

        let html = ChatResultTemplate {
            message: "park to times square, cheap".into(),
            intent,
            view: view(100),
            explanation: None,
        }
        .render()
        .unwrap();
        assert!(!html.contains("class=\"explanation\""));
    }

    #[test]
    fn error_fragment_renders() {
        let html = ErrorTemplate {
            title: "No match".into(),
            message: "couldn't match origin".into(),
            details: Some("Try again".into()),
        }
        .render()
        .unwrap();
        assert!(html.contains("No match"));
        assert!(html.contains("Try again"));
    }
}
