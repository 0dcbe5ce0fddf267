//! Stub imaging analysis and the radiology specialist endpoint.
//!
//! The diagnosis itself is a deterministic stand-in keyed on the reported
//! symptoms; the point of the workflow is the trust pipeline around it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use fides_contracts::{
    agent::AgentIdentity,
    error::{FidesResult, WorkflowError},
    workflow::{EndpointResponse, WorkflowInput},
};
use fides_core::traits::AgentEndpoint;

/// How strictly a patient's data is protected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrivacyLevel {
    Standard,
    Sensitive,
}

impl PrivacyLevel {
    /// Sensitive cases demand physician approval even when the delegation
    /// policy alone would not.
    pub fn is_sensitive(&self) -> bool {
        matches!(self, Self::Sensitive)
    }
}

/// A patient case submitted for specialist imaging analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientCase {
    pub patient_id: String,
    pub imaging_type: String,
    pub symptoms: Vec<String>,
    pub privacy_level: PrivacyLevel,
}

/// The specialist's structured read of the case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub condition: String,
    pub confidence: f64,
    pub recommendations: Vec<String>,
    pub imaging_findings: String,
}

/// Deterministic stand-in for the specialist imaging model.
///
/// Chest-pain cases map to a possible cardiac abnormality at 0.78
/// confidence; everything else reads as normal at 0.92.
pub fn analyze_imaging(case: &PatientCase) -> Diagnosis {
    let diagnosis = if case.symptoms.iter().any(|s| s == "chest_pain") {
        Diagnosis {
            condition: "Possible cardiac abnormality".to_string(),
            confidence: 0.78,
            recommendations: vec![
                "Further cardiac evaluation recommended".to_string(),
                "ECG and stress test suggested".to_string(),
            ],
            imaging_findings: "Mild cardiac enlargement observed".to_string(),
        }
    } else {
        Diagnosis {
            condition: "Normal findings".to_string(),
            confidence: 0.92,
            recommendations: vec!["No further action needed".to_string()],
            imaging_findings: "No abnormalities detected".to_string(),
        }
    };

    debug!(
        patient_id = %case.patient_id,
        condition = %diagnosis.condition,
        confidence = diagnosis.confidence,
        "imaging analyzed"
    );
    diagnosis
}

/// The downstream radiology specialist: reads the delegated case.
pub struct ImagingSpecialistEndpoint;

#[async_trait]
impl AgentEndpoint for ImagingSpecialistEndpoint {
    async fn invoke(
        &self,
        target: &AgentIdentity,
        input: &WorkflowInput,
    ) -> FidesResult<EndpointResponse> {
        let case: PatientCase =
            serde_json::from_value(input.payload.clone()).map_err(|e| {
                WorkflowError::Downstream {
                    endpoint: target.endpoint.clone(),
                    reason: format!("malformed patient case payload: {}", e),
                }
            })?;

        let diagnosis = analyze_imaging(&case);
        let status = if diagnosis.condition == "Normal findings" {
            "normal-findings"
        } else {
            "abnormality-detected"
        };

        let mut reasoning = vec![diagnosis.imaging_findings.clone()];
        reasoning.extend(diagnosis.recommendations.iter().cloned());

        Ok(EndpointResponse {
            status: status.to_string(),
            body: json!({
                "patient_id": case.patient_id,
                "diagnosis": diagnosis,
                "reported_by": target.did.0,
            }),
            reasoning,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn case(symptoms: &[&str], privacy: PrivacyLevel) -> PatientCase {
        PatientCase {
            patient_id: "patient_12345".to_string(),
            imaging_type: "chest_xray".to_string(),
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            privacy_level: privacy,
        }
    }

    #[test]
    fn test_chest_pain_reads_as_cardiac_abnormality() {
        let diagnosis = analyze_imaging(&case(
            &["chest_pain", "shortness_of_breath"],
            PrivacyLevel::Sensitive,
        ));

        assert_eq!(diagnosis.condition, "Possible cardiac abnormality");
        assert_eq!(diagnosis.confidence, 0.78);
        assert_eq!(diagnosis.recommendations.len(), 2);
    }

    #[test]
    fn test_other_symptoms_read_as_normal() {
        let diagnosis = analyze_imaging(&case(&["fatigue"], PrivacyLevel::Standard));

        assert_eq!(diagnosis.condition, "Normal findings");
        assert_eq!(diagnosis.confidence, 0.92);
    }

    #[test]
    fn test_privacy_level_sensitivity() {
        assert!(PrivacyLevel::Sensitive.is_sensitive());
        assert!(!PrivacyLevel::Standard.is_sensitive());
    }

    #[tokio::test]
    async fn test_endpoint_labels_abnormal_cases() {
        use fides_contracts::agent::{AgentName, Did};

        let target = AgentIdentity {
            name: AgentName::new("radiology-specialist.imaging.hospital.example.agent"),
            did: Did::new("did:web:radiology-specialist.imaging.hospital.example"),
            endpoint: "https://radiology-specialist.imaging.hospital.example/invoke"
                .to_string(),
        };
        let input = WorkflowInput {
            kind: "patient-case".to_string(),
            payload: serde_json::to_value(case(&["chest_pain"], PrivacyLevel::Sensitive))
                .unwrap(),
        };

        let response = ImagingSpecialistEndpoint.invoke(&target, &input).await.unwrap();
        assert_eq!(response.status, "abnormality-detected");
        assert_eq!(
            response.reasoning[0],
            "Mild cardiac enlargement observed"
        );
    }
}
