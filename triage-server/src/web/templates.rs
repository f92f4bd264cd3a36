//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::Facility;
use crate::triage::Ranked;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the location and severity form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate;

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Ranked recommendation fragment.
#[derive(Template)]
#[template(path = "ranked_list.html")]
pub struct RankedListTemplate {
    pub facilities: Vec<RankedFacilityView>,
    pub severity_label: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Ranked facility view model for templates.
#[derive(Debug, Clone)]
pub struct RankedFacilityView {
    pub name: String,
    pub address: String,
    pub total_time: f64,
    pub travel_time: u32,
    pub wait_time: u32,
    pub wait_time_estimated: bool,
    pub distance: String,
}

impl RankedFacilityView {
    /// Create from a ranked domain Facility.
    pub fn from_ranked(ranked: &Ranked<Facility>) -> Self {
        let f = &ranked.item;
        Self {
            name: f.name.clone(),
            address: f.address.clone().unwrap_or_default(),
            total_time: ranked.total_time,
            travel_time: f.travel_time_minutes.unwrap_or_default(),
            wait_time: f.wait_time_minutes.unwrap_or_default(),
            wait_time_estimated: f.wait_time_estimated,
            distance: format_miles(f.distance_miles.unwrap_or_default()),
        }
    }
}

/// Format a distance for display, e.g. "1.0 mi".
fn format_miles(miles: f64) -> String {
    format!("{miles:.1} mi")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FacilityId, GeoPoint};

    fn ranked() -> Ranked<Facility> {
        let mut f = Facility::new(
            FacilityId::new("1"),
            "Riverside Medical Center",
            GeoPoint::new(37.7858, -122.4064).unwrap(),
        )
        .unwrap()
        .with_address("250 River Ave");
        f.distance_miles = Some(1.0349);
        f.travel_time_minutes = Some(4);
        f.wait_time_minutes = Some(41);
        f.wait_time_estimated = true;

        Ranked {
            item: f,
            total_time: 45.0,
            score: 85.2,
        }
    }

    #[test]
    fn view_from_ranked() {
        let view = RankedFacilityView::from_ranked(&ranked());
        assert_eq!(view.name, "Riverside Medical Center");
        assert_eq!(view.distance, "1.0 mi");
        assert_eq!(view.total_time, 45.0);
        assert_eq!(view.wait_time, 41);
    }

    #[test]
    fn ranked_list_renders() {
        let template = RankedListTemplate {
            facilities: vec![RankedFacilityView::from_ranked(&ranked())],
            severity_label: "severe".to_string(),
        };
        let html = template.render().unwrap();

        assert!(html.contains("Riverside Medical Center"));
        assert!(html.contains("250 River Ave"));
        assert!(html.contains("45 minutes"));
        assert!(html.contains("(estimated)"));
    }

    #[test]
    fn empty_list_renders_message() {
        let template = RankedListTemplate {
            facilities: Vec::new(),
            severity_label: "low".to_string(),
        };
        let html = template.render().unwrap();
        assert!(html.contains("No facilities found"));
    }

    #[test]
    fn index_renders() {
        let html = IndexTemplate.render().unwrap();
        assert!(html.contains("<form"));
    }
}
