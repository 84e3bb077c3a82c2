//! ISTQB certification catalog, recommendations and training providers.

mod catalog;

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::SupportError;

use catalog::{CERTIFICATIONS, TRAINING_PROVIDERS};

/// Course list entry of providers that teach every certification.
pub const ALL_CERTIFICATIONS: &str = "All ISTQB certifications";

/// Region of providers that serve every region.
pub const GLOBAL_REGION: &str = "Global";

/// Known certifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CertificationId {
    Ctfl,
    CtalTa,
    CtalTm,
    CtalTae,
    CtMat,
    CtAi,
    CtAut,
}

impl CertificationId {
    pub const ALL: [CertificationId; 7] = [
        CertificationId::Ctfl,
        CertificationId::CtalTa,
        CertificationId::CtalTm,
        CertificationId::CtalTae,
        CertificationId::CtMat,
        CertificationId::CtAi,
        CertificationId::CtAut,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CertificationId::Ctfl => "CTFL",
            CertificationId::CtalTa => "CTAL-TA",
            CertificationId::CtalTm => "CTAL-TM",
            CertificationId::CtalTae => "CTAL-TAE",
            CertificationId::CtMat => "CT-MAT",
            CertificationId::CtAi => "CT-AI",
            CertificationId::CtAut => "CT-AuT",
        }
    }

    /// Full catalog entry.
    pub fn certification(self) -> &'static Certification {
        &CERTIFICATIONS[self as usize]
    }
}

impl fmt::Display for CertificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CertificationId {
    type Err = SupportError;

    /// Case-insensitive, so `ct-aut` finds `CT-AuT`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SupportError::Validation(format!("Unknown certification: {}", s)))
    }
}

impl Serialize for CertificationId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Level {
    Foundation,
    Advanced,
    Specialist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Track {
    Core,
    Specialist,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamFormat {
    pub questions: u32,
    pub duration: &'static str,
    pub passing_score: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

/// One ISTQB certification.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: CertificationId,
    pub name: &'static str,
    pub level: Level,
    #[serde(rename = "type")]
    pub track: Track,
    pub description: &'static str,
    pub prerequisites: &'static [&'static str],
    pub experience_required: &'static str,
    pub exam_format: ExamFormat,
    pub target_audience: &'static [&'static str],
    pub topics: &'static [&'static str],
    pub career_value: &'static str,
    pub estimated_study_time: &'static str,
    pub average_cost: &'static str,
}

impl Certification {
    pub fn summary(&self) -> CertificationSummary {
        CertificationSummary {
            id: self.id,
            name: self.name,
            level: self.level,
            track: self.track,
            description: self.description,
            prerequisites: self.prerequisites.join(", "),
        }
    }
}

/// List view of a certification.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationSummary {
    pub id: CertificationId,
    pub name: &'static str,
    pub level: Level,
    #[serde(rename = "type")]
    pub track: Track,
    pub description: &'static str,
    pub prerequisites: String,
}

/// All certifications in catalog order.
pub fn certifications() -> &'static [Certification] {
    &CERTIFICATIONS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A suggested certification and why.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub certification: &'static Certification,
    pub reason: &'static str,
    pub priority: Priority,
}

impl Recommendation {
    fn high(id: CertificationId, reason: &'static str) -> Self {
        Self {
            certification: id.certification(),
            reason,
            priority: Priority::High,
        }
    }
}

/// Recommend certifications from years of experience and job title.
///
/// Experience picks at most one entry (up to 2 years CTFL, up to 5 CTAL-TA,
/// beyond that CTAL-TAE). The role may add CTAL-TM for managers and leads
/// and CTAL-TAE for automation and DevOps roles. With nothing to go on the
/// answer is CTFL.
pub fn recommend(experience_years: Option<i64>, role: Option<&str>) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if let Some(years) = experience_years {
        recommendations.push(match years {
            i64::MIN..=2 => Recommendation::high(
                CertificationId::Ctfl,
                "Perfect starting point for building fundamental testing knowledge",
            ),
            3..=5 => Recommendation::high(
                CertificationId::CtalTa,
                "Advance your technical testing skills with Test Analyst certification",
            ),
            _ => Recommendation::high(
                CertificationId::CtalTae,
                "Automation expertise is in high demand for senior professionals",
            ),
        });
    }

    if let Some(role) = role.filter(|r| !r.is_empty()) {
        let role = role.to_uppercase();
        if role.contains("MANAGER") || role.contains("LEAD") {
            recommendations.push(Recommendation::high(
                CertificationId::CtalTm,
                "Essential for testing leadership and management roles",
            ));
        }
        if role.contains("AUTOMATION") || role.contains("DEVOPS") {
            recommendations.push(Recommendation::high(
                CertificationId::CtalTae,
                "Perfect match for your automation-focused role",
            ));
        }
    }

    if recommendations.is_empty() {
        recommendations.push(Recommendation::high(
            CertificationId::Ctfl,
            "Foundation Level is the recommended starting point for all ISTQB certifications",
        ));
    }

    recommendations
}

/// An accredited training provider.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingProvider {
    pub id: &'static str,
    pub name: &'static str,
    pub website: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub description: &'static str,
    pub courses_offered: &'static [&'static str],
    pub formats: &'static [&'static str],
    pub regions: &'static [&'static str],
    pub price_range: Option<&'static str>,
}

impl TrainingProvider {
    pub fn offers(&self, certification: CertificationId) -> bool {
        self.courses_offered
            .iter()
            .any(|c| *c == ALL_CERTIFICATIONS || *c == certification.as_str())
    }

    /// True when one of the provider's formats appears in `requested`.
    pub fn has_format(&self, requested: &str) -> bool {
        let requested = requested.to_lowercase();
        self.formats
            .iter()
            .any(|f| requested.contains(&f.to_lowercase()))
    }

    /// True for global providers or when one of the provider's regions
    /// appears in `requested`.
    pub fn serves_region(&self, requested: &str) -> bool {
        let requested = requested.to_lowercase();
        self.regions
            .iter()
            .any(|r| *r == GLOBAL_REGION || requested.contains(&r.to_lowercase()))
    }
}

/// Optional criteria for narrowing the provider list. All given criteria
/// must hold.
#[derive(Debug, Clone, Default)]
pub struct ProviderFilter<'a> {
    pub certification: Option<CertificationId>,
    pub format: Option<&'a str>,
    pub region: Option<&'a str>,
}

impl ProviderFilter<'_> {
    pub fn matches(&self, provider: &TrainingProvider) -> bool {
        self.certification.map_or(true, |c| provider.offers(c))
            && self.format.map_or(true, |f| provider.has_format(f))
            && self.region.map_or(true, |r| provider.serves_region(r))
    }
}

/// Providers matching `filter`, in catalog order.
pub fn training_providers(filter: &ProviderFilter<'_>) -> Vec<&'static TrainingProvider> {
    TRAINING_PROVIDERS
        .iter()
        .filter(|p| filter.matches(p))
        .collect()
}
