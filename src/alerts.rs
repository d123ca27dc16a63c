//! Canned alert content
//!
//! None of this is derived from the dataset. It is fixed configuration data
//! reproduced alongside the computed views.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ThreatAlert {
    pub severity: Severity,
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct HospitalAlert {
    pub hospital: &'static str,
    pub level: Severity,
    pub affected_posts: u32,
    pub primary_threat: &'static str,
    pub estimated_impact: &'static str,
    pub recommended_action: &'static str,
}

pub const THREAT_ALERTS: &[ThreatAlert] = &[
    ThreatAlert {
        severity: Severity::Critical,
        message: "Viral post claiming \"vaccines contain microchips\" reached 50K+ shares across platforms",
    },
    ThreatAlert {
        severity: Severity::Critical,
        message: "Super spreader \"user_1\" sharing false treatment claims - 8 direct connections",
    },
    ThreatAlert {
        severity: Severity::High,
        message: "Misinformation about COVID cure trending on Reddit - 3,500 shares in 6 hours",
    },
    ThreatAlert {
        severity: Severity::Medium,
        message: "Unverified health claim about natural immunity spreading on Instagram",
    },
];

pub const HOSPITAL_ALERTS: &[HospitalAlert] = &[
    HospitalAlert {
        hospital: "City General Hospital",
        level: Severity::Critical,
        affected_posts: 18,
        primary_threat: "Fake cure claims",
        estimated_impact: "High ER surge expected",
        recommended_action: "Issue public statement + prepare FAQ + staff briefing",
    },
    HospitalAlert {
        hospital: "Regional Medical Center",
        level: Severity::High,
        affected_posts: 12,
        primary_threat: "Vaccine misinformation",
        estimated_impact: "Moderate patient concerns",
        recommended_action: "Monitor ER inquiries closely + update website",
    },
    HospitalAlert {
        hospital: "Metro Community Hospital",
        level: Severity::Medium,
        affected_posts: 5,
        primary_threat: "Treatment myths",
        estimated_impact: "Low impact",
        recommended_action: "Standard patient education materials",
    },
    HospitalAlert {
        hospital: "University Hospital",
        level: Severity::Low,
        affected_posts: 2,
        primary_threat: "Prevention myths",
        estimated_impact: "Minimal impact",
        recommended_action: "Continue monitoring",
    },
    HospitalAlert {
        hospital: "Children's Hospital",
        level: Severity::Medium,
        affected_posts: 7,
        primary_threat: "Child health myths",
        estimated_impact: "Pediatric concerns",
        recommended_action: "Pediatric team alert + parent education",
    },
    HospitalAlert {
        hospital: "Emergency Care Center",
        level: Severity::High,
        affected_posts: 9,
        primary_threat: "Emergency care myths",
        estimated_impact: "Emergency protocol confusion",
        recommended_action: "Emergency staff training + protocol review",
    },
];
