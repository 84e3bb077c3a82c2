//! Built-in rule tables.
//!
//! Rule order is priority order. Overlapping keywords resolve to whichever
//! rule comes first (e.g. "refund for order #12345" is `order_status`).

use super::rules::{IntentRule, Predicate};
use super::types::{ResponseTemplate, UNKNOWN_INTENT};
use crate::certifications::{Certification, CertificationId};

// ============================================================================
// Order Support
// ============================================================================

/// Order-support rules in priority order.
pub fn order_support_rules() -> Vec<IntentRule> {
    vec![
        IntentRule::new(
            "order_status",
            Predicate::all([
                Predicate::contains("order"),
                Predicate::any_keyword(&["status", "#"]),
            ]),
            ResponseTemplate::new(
                "order_status",
                "I can help you check your order status. Open the Orders page to see the \
                 latest status of every order on your account, or share your order number \
                 with our support team if something looks wrong.",
            )
            .with_suggestions(&["Show my orders", "Shipping information", "Return an item"]),
        ),
        IntentRule::new(
            "order_details",
            Predicate::all_keywords(&["order", "details"]),
            ResponseTemplate::new(
                "order_details",
                "Order details, including items, quantities and totals, are listed on the \
                 Orders page. Select an order to see its full breakdown.",
            )
            .with_suggestions(&["Check order status", "Track my package", "Request a refund"]),
        ),
        IntentRule::new(
            "shipping_info",
            Predicate::any_keyword(&["shipping", "delivery", "track"]),
            ResponseTemplate::new(
                "shipping_info",
                "Standard shipping takes 3-5 business days and express shipping takes 1-2 \
                 business days. Once your order ships you will receive a tracking number \
                 by email.",
            )
            .with_suggestions(&["Check order status", "Shipping costs", "Return policy"]),
        ),
        IntentRule::new(
            "return_request",
            Predicate::any_keyword(&["return", "refund"]),
            ResponseTemplate::new(
                "return_request",
                "You can return most items within 30 days of delivery. Refunds are issued \
                 to the original payment method within 5-7 business days after we receive \
                 the return.",
            )
            .with_suggestions(&["Start a return", "Refund status", "Contact support"]),
        ),
        IntentRule::new(
            "greeting",
            Predicate::any_keyword(&["hello", "hi", "hey"]),
            ResponseTemplate::new(
                "greeting",
                "Hello! I'm your customer support assistant. I can help with order status, \
                 shipping, returns and refunds. What can I do for you today?",
            )
            .with_suggestions(&["Check order status", "Shipping information", "Return an item", "Help"]),
        ),
        IntentRule::new(
            "help",
            Predicate::any_keyword(&["help", "what can you do"]),
            ResponseTemplate::new(
                "help",
                "I can help you with:\n\
                 - Order status and order details\n\
                 - Shipping and delivery tracking\n\
                 - Returns and refunds\n\
                 Just ask a question about any of these topics.",
            )
            .with_suggestions(&["Check order status", "Track my package", "Return policy"]),
        ),
    ]
}

/// Answer used when no order-support rule matches.
pub fn order_support_fallback() -> ResponseTemplate {
    ResponseTemplate::new(
        UNKNOWN_INTENT,
        "I'm not sure I understand. I can help with order status, order details, \
         shipping, and returns or refunds. Try asking something like \"What is the \
         status of my order?\"",
    )
    .with_suggestions(&["Check order status", "Shipping information", "Return an item", "Help"])
}

// ============================================================================
// Certification Guidance
// ============================================================================

/// Certification-guidance rules in priority order.
pub fn certification_guidance_rules() -> Vec<IntentRule> {
    let ctfl = CertificationId::Ctfl.certification();
    vec![
        IntentRule::new(
            "certification_recommendation",
            Predicate::any_keyword(&[
                "which certification",
                "what certification",
                "start with",
                "recommend",
            ]),
            ResponseTemplate::new(
                "certification_recommendation",
                "I'd be happy to recommend the right ISTQB certification for you! Tell me \
                 about your current experience level in testing, your current role and your \
                 career goals.\n\nFor most beginners I recommend starting with the CTFL \
                 (Foundation Level), as it provides the essential testing fundamentals.",
            )
            .with_suggestions(&[
                "I'm new to testing",
                "I have 2+ years experience",
                "I want to be a test manager",
                "Tell me about Foundation Level",
            ]),
        ),
        IntentRule::new(
            "foundation_level_info",
            Predicate::any_keyword(&["foundation", "ctfl", "beginner", "new to testing"]),
            ResponseTemplate::new("foundation_level_info", foundation_level_reply(ctfl))
            .with_suggestions(&[
                "Find training courses",
                "Advanced certifications",
                "Study materials",
                "Exam registration",
            ]),
        ),
        IntentRule::new(
            "advanced_level_info",
            Predicate::any_keyword(&["advanced", "ctal", "next level"]),
            ResponseTemplate::new(
                "advanced_level_info",
                "Advanced Level certifications by career path:\n\
                 - CTAL-TA (Test Analyst): deep dive into test techniques\n\
                 - CTAL-TM (Test Manager): test management, leadership and strategy\n\
                 - CTAL-TAE (Test Automation Engineering): automation in DevOps environments\n\
                 All of them require the CTFL certification first.",
            )
            .with_suggestions(&[
                "Tell me about Test Analyst",
                "I want to be a manager",
                "Automation interests me",
                "Prerequisites info",
            ]),
        ),
        IntentRule::new(
            "training_providers",
            Predicate::any_keyword(&["training", "course", "study", "where to learn"]),
            ResponseTemplate::new(
                "training_providers",
                "Training options for ISTQB certifications:\n\
                 - Official: ASTQB and the ISTQB accredited partner network\n\
                 - Online platforms: Udemy, Coursera, Pluralsight\n\
                 Formats range from self-paced online courses to instructor-led classes \
                 and in-person workshops. Which certification are you training for?",
            )
            .with_suggestions(&[
                "CTFL training",
                "Advanced level courses",
                "Online vs in-person",
                "Cost comparison",
            ]),
        ),
        IntentRule::new(
            "experience_based_advice",
            Predicate::any_keyword(&["experience", "years", "background"]),
            ResponseTemplate::new(
                "experience_based_advice",
                "Recommendations by experience:\n\
                 - 0-2 years: start with CTFL\n\
                 - 2-5 years, analyst track: CTFL then CTAL-TA\n\
                 - 3-7 years, management track: CTFL then CTAL-TM\n\
                 - 2-6 years, automation track: CTFL then CTAL-TAE\n\
                 - 5+ years: combine Advanced and Specialist certifications\n\
                 What's your current experience level?",
            )
            .with_suggestions(&[
                "I have 1 year experience",
                "I have 5+ years",
                "I work in automation",
                "I want to manage teams",
            ]),
        ),
        IntentRule::new(
            "specialist_certifications",
            Predicate::any_keyword(&["specialist", "mobile", "ai", "automotive"]),
            ResponseTemplate::new(
                "specialist_certifications",
                "Specialist ISTQB certifications:\n\
                 - CT-MAT: Mobile Application Testing\n\
                 - CT-AI: Testing AI-based systems\n\
                 - CT-AuT: Automotive Software Testing\n\
                 All require the CTFL certification first. Which area interests you most?",
            )
            .with_suggestions(&[
                "Mobile testing details",
                "AI testing info",
                "Automotive testing",
                "Tell me about CTFL first",
            ]),
        ),
        IntentRule::new(
            "career_advice",
            Predicate::any_keyword(&["career", "salary", "job", "worth it"]),
            ResponseTemplate::new(
                "career_advice",
                "Certification career value:\n\
                 - Foundation Level opens doors to testing roles worldwide\n\
                 - Advanced Level supports senior and leadership roles\n\
                 - Specialist certifications add a niche expertise premium\n\
                 Automation and AI testing are currently in the highest demand.",
            )
            .with_suggestions(&[
                "Salary expectations",
                "Best ROI certifications",
                "Job market trends",
                "Remote work impact",
            ]),
        ),
        IntentRule::new(
            "greeting",
            Predicate::any_keyword(&["hello", "hi", "hey"]),
            ResponseTemplate::new(
                "greeting",
                "Hello! I'm your ISTQB certification guidance assistant. I can recommend \
                 certifications, point you to training providers and explain the career \
                 value of each certification. What would you like to know?",
            )
            .with_suggestions(&[
                "Which certification should I start with?",
                "Find training courses",
                "Career benefits",
                "Help me choose",
            ]),
        ),
        IntentRule::new(
            "help",
            Predicate::any_keyword(&["help", "what can you do"]),
            ResponseTemplate::new(
                "help",
                "I can help with:\n\
                 - Certification guidance and prerequisites\n\
                 - Training providers and course formats\n\
                 - Career value of each certification\n\
                 - Exam format and preparation\n\
                 Just ask me anything about ISTQB certifications!",
            )
            .with_suggestions(&[
                "Recommend a certification",
                "Find training courses",
                "Career impact",
                "Exam requirements",
            ]),
        ),
    ]
}

/// Foundation Level overview, rendered from the certification catalog.
fn foundation_level_reply(ctfl: &Certification) -> String {
    let exam = &ctfl.exam_format;
    let topics: Vec<&str> = ctfl.topics.iter().take(3).copied().collect();
    format!(
        "CTFL (Foundation Level) is the place to start.\n\n\
         What it covers: {}\n\n\
         Exam: {} questions in {}, {} to pass\n\
         Study time: {}\n\
         Cost: {}\n\n\
         {}",
        topics.join(", "),
        exam.questions,
        exam.duration,
        exam.passing_score,
        ctfl.estimated_study_time,
        ctfl.average_cost,
        ctfl.career_value,
    )
}

/// Answer used when no certification-guidance rule matches.
pub fn certification_guidance_fallback() -> ResponseTemplate {
    ResponseTemplate::new(
        UNKNOWN_INTENT,
        "I'm not sure I understand that question, but I can help with ISTQB \
         certifications: choosing a certification, finding training, career value and \
         exam requirements. Try asking \"Which ISTQB certification should I start with?\"",
    )
    .with_suggestions(&[
        "Which certification for beginners?",
        "Find training courses",
        "Career benefits",
        "Help me choose",
    ])
}
