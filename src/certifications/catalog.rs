//! ISTQB certification and training provider data.

use super::{Certification, CertificationId, ExamFormat, Level, TrainingProvider, Track};

/// Certifications, indexed by `CertificationId as usize`.
pub(super) static CERTIFICATIONS: [Certification; 7] = [
    Certification {
        id: CertificationId::Ctfl,
        name: "Certified Tester Foundation Level",
        level: Level::Foundation,
        track: Track::Core,
        description: "The Foundation Level forms the basis of the ISTQB® Certified Tester \
                      Scheme. It provides fundamental testing knowledge for all software \
                      testing roles.",
        prerequisites: &["None - Entry level certification"],
        experience_required: "None (recommended: some basic testing exposure)",
        exam_format: ExamFormat {
            questions: 40,
            duration: "65 minutes",
            passing_score: "65% (26/40)",
            kind: "Multiple choice",
        },
        target_audience: &[
            "New testers",
            "Developers moving to testing",
            "Project managers",
            "Quality assurance professionals",
            "Business analysts",
        ],
        topics: &[
            "Fundamentals of Testing",
            "Testing Throughout the Software Development Lifecycle",
            "Static Testing",
            "Test Techniques",
            "Test Management",
            "Tool Support for Testing",
        ],
        career_value: "Essential first step, globally recognized, opens doors to advanced \
                       certifications",
        estimated_study_time: "40-60 hours",
        average_cost: "$200-400",
    },
    Certification {
        id: CertificationId::CtalTa,
        name: "Certified Tester Advanced Level Test Analyst",
        level: Level::Advanced,
        track: Track::Core,
        description: "Provides skills needed to perform structured and thorough software \
                      testing across the software development lifecycle.",
        prerequisites: &["CTFL certification required"],
        experience_required: "18 months testing experience (recommended)",
        exam_format: ExamFormat {
            questions: 65,
            duration: "180 minutes",
            passing_score: "65%",
            kind: "Multiple choice",
        },
        target_audience: &[
            "Test analysts",
            "Senior testers",
            "QA leads",
            "Testing consultants",
        ],
        topics: &[
            "The Test Analyst's Tasks in Risk-Based Testing",
            "Test Techniques",
            "Testing of Software Quality Characteristics",
            "Reviews",
            "Incident Management",
            "Test Progress Monitoring and Control",
            "Test Tools and Automation",
        ],
        career_value: "Significant career advancement, higher salary potential, technical \
                       leadership roles",
        estimated_study_time: "80-120 hours",
        average_cost: "$500-800",
    },
    Certification {
        id: CertificationId::CtalTm,
        name: "Certified Tester Advanced Level Test Manager",
        level: Level::Advanced,
        track: Track::Core,
        description: "Focuses on test management skills for leading testing teams and \
                      managing testing projects.",
        prerequisites: &["CTFL certification required"],
        experience_required: "18 months testing experience with management responsibilities",
        exam_format: ExamFormat {
            questions: 65,
            duration: "180 minutes",
            passing_score: "65%",
            kind: "Multiple choice",
        },
        target_audience: &[
            "Test managers",
            "QA managers",
            "Project managers",
            "Team leads",
            "Testing consultants",
        ],
        topics: &[
            "Testing Process",
            "Test Management",
            "Risk-Based Testing",
            "Test Progress Monitoring and Control",
            "Incident Management",
            "Evaluating and Improving Test Processes",
            "Test Tools and Automation",
        ],
        career_value: "Management track advancement, team leadership, strategic planning skills",
        estimated_study_time: "80-120 hours",
        average_cost: "$500-800",
    },
    Certification {
        id: CertificationId::CtalTae,
        name: "Certified Tester Advanced Level Test Automation Engineering",
        level: Level::Advanced,
        track: Track::Core,
        description: "Targeted to test engineers looking to implement or improve test \
                      automation.",
        prerequisites: &["CTFL certification required"],
        experience_required: "18 months testing experience with automation exposure",
        exam_format: ExamFormat {
            questions: 65,
            duration: "180 minutes",
            passing_score: "65%",
            kind: "Multiple choice",
        },
        target_audience: &[
            "Test automation engineers",
            "Senior developers in testing",
            "Technical test leads",
            "DevOps engineers",
        ],
        topics: &[
            "Introduction and Objectives for Test Automation",
            "Preparing for Test Automation",
            "The Generic Test Automation Architecture",
            "Test Automation Deployment and Maintenance",
            "Test Automation Reporting and Metrics",
            "Transitioning Manual Testing to an Automated Environment",
        ],
        career_value: "High demand specialization, technical leadership, automation expertise",
        estimated_study_time: "100-140 hours",
        average_cost: "$500-800",
    },
    Certification {
        id: CertificationId::CtMat,
        name: "Certified Tester Mobile Application Testing",
        level: Level::Specialist,
        track: Track::Specialist,
        description: "Provides insight into methods, techniques, and tools for testing \
                      mobile applications.",
        prerequisites: &["CTFL certification required"],
        experience_required: "Mobile testing experience recommended",
        exam_format: ExamFormat {
            questions: 40,
            duration: "90 minutes",
            passing_score: "65%",
            kind: "Multiple choice",
        },
        target_audience: &[
            "Mobile app testers",
            "QA engineers in mobile development",
            "Test analysts working on mobile projects",
        ],
        topics: &[
            "Mobile Application Testing Strategy",
            "Mobile Application Test Types",
            "Mobile Application Test Environments",
            "Mobile Application Test Automation",
            "Mobile Application Testing Tools",
        ],
        career_value: "Mobile expertise in high demand, specialized skills, competitive advantage",
        estimated_study_time: "60-80 hours",
        average_cost: "$400-600",
    },
    Certification {
        id: CertificationId::CtAi,
        name: "Certified Tester AI Testing",
        level: Level::Specialist,
        track: Track::Specialist,
        description: "Focuses on testing AI-based and ML systems, covering unique challenges \
                      and approaches.",
        prerequisites: &["CTFL certification required"],
        experience_required: "AI/ML project exposure recommended",
        exam_format: ExamFormat {
            questions: 40,
            duration: "90 minutes",
            passing_score: "65%",
            kind: "Multiple choice",
        },
        target_audience: &[
            "Testers working with AI systems",
            "QA engineers in AI/ML teams",
            "Test analysts in data science projects",
        ],
        topics: &[
            "AI and ML Fundamentals for Testers",
            "Testing AI-based Systems",
            "Test Data for AI Systems",
            "AI Testing Tools and Techniques",
            "Ethics and Bias in AI Testing",
        ],
        career_value: "Cutting-edge specialization, future-proof skills, high market value",
        estimated_study_time: "70-90 hours",
        average_cost: "$500-700",
    },
    Certification {
        id: CertificationId::CtAut,
        name: "Certified Tester Automotive Software Tester",
        level: Level::Specialist,
        track: Track::Specialist,
        description: "Covers specific requirements for testing E/E systems in the automotive \
                      environment.",
        prerequisites: &["CTFL certification required"],
        experience_required: "Automotive industry experience recommended",
        exam_format: ExamFormat {
            questions: 40,
            duration: "90 minutes",
            passing_score: "65%",
            kind: "Multiple choice",
        },
        target_audience: &[
            "Automotive software testers",
            "Embedded systems testers",
            "QA engineers in automotive companies",
        ],
        topics: &[
            "Automotive Software Development",
            "Automotive Testing Standards",
            "Safety and Security Testing",
            "Automotive Test Environments",
            "Automotive Testing Tools",
        ],
        career_value: "Specialized industry knowledge, automotive sector opportunities",
        estimated_study_time: "60-80 hours",
        average_cost: "$400-600",
    },
];

pub(super) static TRAINING_PROVIDERS: [TrainingProvider; 5] = [
    TrainingProvider {
        id: "astqb",
        name: "American Software Testing Qualifications Board (ASTQB)",
        website: "https://astqb.org",
        kind: "Official Board",
        description: "Official ISTQB member board for the United States",
        courses_offered: &["CTFL", "CTAL-TA", "CTAL-TM", "CTAL-TAE", "CT-MAT", "CT-AI"],
        formats: &["Self-study", "Online courses", "In-person workshops"],
        regions: &["North America"],
        price_range: None,
    },
    TrainingProvider {
        id: "istqb-official",
        name: "ISTQB Official Partners",
        website: "https://istqb.org",
        kind: "Official Partners",
        description: "Network of ISTQB-accredited training providers worldwide",
        courses_offered: &[super::ALL_CERTIFICATIONS],
        formats: &["Instructor-led", "Online", "Blended learning"],
        regions: &[super::GLOBAL_REGION],
        price_range: None,
    },
    TrainingProvider {
        id: "udemy",
        name: "Udemy",
        website: "https://udemy.com",
        kind: "Online Platform",
        description: "Popular online learning platform with various ISTQB prep courses",
        courses_offered: &["CTFL", "CTAL-TA", "CTAL-TM"],
        formats: &["Self-paced online"],
        regions: &[super::GLOBAL_REGION],
        price_range: Some("$50-200"),
    },
    TrainingProvider {
        id: "coursera",
        name: "Coursera",
        website: "https://coursera.org",
        kind: "Online Platform",
        description: "University-partnered online courses including ISTQB preparation",
        courses_offered: &["CTFL", "CTAL-TA"],
        formats: &["Self-paced", "Guided courses"],
        regions: &[super::GLOBAL_REGION],
        price_range: Some("$39-79/month"),
    },
    TrainingProvider {
        id: "pluralsight",
        name: "Pluralsight",
        website: "https://pluralsight.com",
        kind: "Tech Platform",
        description: "Technology-focused learning platform with testing courses",
        courses_offered: &["CTFL", "CTAL-TAE"],
        formats: &["Self-paced online"],
        regions: &[super::GLOBAL_REGION],
        price_range: Some("$45/month"),
    },
];
