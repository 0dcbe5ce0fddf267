//! Canned domain inputs for the reference scenarios.
//!
//! All data is hardcoded and fictional.

use crate::diagnosis::{PatientCase, PrivacyLevel};
use crate::risk::{Transaction, HIGH_RISK_COUNTRY};
use crate::triage::{Complexity, Severity, SupportQuery};

/// A routine card payment that should score 0.0.
pub fn quiet_transaction() -> Transaction {
    Transaction {
        id: "txn_10021".to_string(),
        amount: 84.50,
        currency: "USD".to_string(),
        merchant: "Corner Grocery".to_string(),
        recent_transaction_count: 2,
        destination_country: "SG".to_string(),
    }
}

/// A large purchase routed to a flagged corridor: 0.3 + 0.3 = 0.6, REVIEW.
pub fn flagged_transaction() -> Transaction {
    Transaction {
        id: "txn_12345".to_string(),
        amount: 15_000.00,
        currency: "USD".to_string(),
        merchant: "Online Electronics Store".to_string(),
        recent_transaction_count: 3,
        destination_country: HIGH_RISK_COUNTRY.to_string(),
    }
}

/// A transaction triggering every scoring condition.
pub fn hostile_transaction() -> Transaction {
    Transaction {
        id: "txn_66600".to_string(),
        amount: 60_000.00,
        currency: "USD".to_string(),
        merchant: "Unregistered Broker".to_string(),
        recent_transaction_count: 9,
        destination_country: HIGH_RISK_COUNTRY.to_string(),
    }
}

/// A sensitive chest-pain case that demands physician approval.
pub fn cardiac_case() -> PatientCase {
    PatientCase {
        patient_id: "patient_12345".to_string(),
        imaging_type: "chest_xray".to_string(),
        symptoms: vec![
            "chest_pain".to_string(),
            "shortness_of_breath".to_string(),
        ],
        privacy_level: PrivacyLevel::Sensitive,
    }
}

/// A routine follow-up case with no concerning symptoms.
pub fn routine_case() -> PatientCase {
    PatientCase {
        patient_id: "patient_20881".to_string(),
        imaging_type: "chest_xray".to_string(),
        symptoms: vec!["fatigue".to_string()],
        privacy_level: PrivacyLevel::Standard,
    }
}

/// A simple billing question the frontline answers confidently.
pub fn simple_query() -> SupportQuery {
    SupportQuery {
        id: "ticket_101".to_string(),
        customer: "customer-311".to_string(),
        question: "How do I update my billing address?".to_string(),
        complexity: Complexity::Low,
        severity: Severity::Normal,
    }
}

/// A declined-payment question the frontline is unsure about.
pub fn uncertain_query() -> SupportQuery {
    SupportQuery {
        id: "ticket_789".to_string(),
        customer: "premium-customer-001".to_string(),
        question: "Why was my payment declined?".to_string(),
        complexity: Complexity::Medium,
        severity: Severity::Normal,
    }
}

/// An urgent query that escalates regardless of frontline confidence.
pub fn urgent_query() -> SupportQuery {
    SupportQuery {
        id: "ticket_912".to_string(),
        customer: "customer-588".to_string(),
        question: "My account shows transfers I never made.".to_string(),
        complexity: Complexity::Low,
        severity: Severity::High,
    }
}
