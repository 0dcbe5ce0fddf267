//! Scenario 2: Healthcare Diagnostic Chain
//!
//! A primary diagnostics agent refers imaging cases to a radiology
//! specialist. Walk-through:
//!
//!   1. A sensitive chest-pain case runs the full pipeline. The governing
//!      policy demands physician approval and carries a weekday working-hours
//!      window; the case's sensitive privacy level additionally forces
//!      approval at the hand-off itself.
//!   2. A routine case runs the same pipeline and reads as normal findings.
//!   3. A referral to a locum radiologist whose credential has lapsed stops
//!      at the verification hard gate — the delegation checker is never
//!      consulted.

use std::sync::Arc;

use fides_contracts::{
    error::{FidesResult, WorkflowError},
    workflow::WorkflowInput,
};
use fides_core::{
    runner::HandoffSpec,
    traits::{CredentialVerifier, DelegationChecker, NameResolver},
    TrustClient, TrustConfig, WorkflowRunner,
};
use fides_policy::TomlDelegationChecker;
use fides_registry::{AgentDirectory, RegistryVerifier, StaticResolver};
use fides_trail::InMemoryTrailWriter;

use crate::approval::AutoApprovalGate;
use crate::diagnosis::{ImagingSpecialistEndpoint, PatientCase};
use crate::mock_data::{cardiac_case, routine_case};

// ── Agent directory and delegation policy ─────────────────────────────────────

const PRIMARY_DIAGNOSTICS: &str = "primary-diagnostics.hospital.example.agent";
const RADIOLOGY_SPECIALIST: &str = "radiology-specialist.imaging.hospital.example.agent";
const LOCUM_RADIOLOGIST: &str = "locum-radiologist.imaging.hospital.example.agent";

const DIRECTORY: &str = r#"
    [[agents]]
    name = "primary-diagnostics.hospital.example.agent"
    did = "did:web:primary-diagnostics.hospital.example"
    endpoint = "https://primary-diagnostics.hospital.example/invoke"
    capabilities = ["triage-case"]

    [[agents]]
    name = "radiology-specialist.imaging.hospital.example.agent"
    did = "did:web:radiology-specialist.imaging.hospital.example"
    endpoint = "https://radiology-specialist.imaging.hospital.example/invoke"
    capabilities = ["analyze-imaging"]

    [[agents]]
    name = "locum-radiologist.imaging.hospital.example.agent"
    did = "did:web:locum-radiologist.imaging.hospital.example"
    endpoint = "https://locum-radiologist.imaging.hospital.example/invoke"
    capabilities = ["analyze-imaging"]
    credential_valid = false
"#;

const POLICY: &str = r#"
    [[policies]]
    id = "imaging-referral"
    description = "Primary diagnostics may refer imaging to the radiology specialist"
    from = "did:web:primary-diagnostics.hospital.example"
    to = "did:web:radiology-specialist.imaging.hospital.example"
    action = "analyze-imaging"
    effect = "allow"

    [policies.constraints]
    requires_approval = true
    max_duration_secs = 1800
    required_certification = "board-certified-radiology"

    [policies.constraints.allowed_hours]
    start_hour = 8
    end_hour = 17
    weekdays_only = true

    [[policies]]
    id = "locum-referral"
    description = "Referrals to the locum radiologist while on rotation"
    from = "did:web:primary-diagnostics.hospital.example"
    to = "did:web:locum-radiologist.imaging.hospital.example"
    action = "analyze-imaging"
    effect = "allow"

    [policies.constraints]
    requires_approval = true
"#;

// ── Scenario wiring ───────────────────────────────────────────────────────────

struct Collaborators {
    resolver: Arc<dyn NameResolver>,
    verifier: Arc<dyn CredentialVerifier>,
    checker: Arc<dyn DelegationChecker>,
}

fn collaborators() -> FidesResult<Collaborators> {
    let directory = Arc::new(AgentDirectory::from_toml_str(DIRECTORY)?);
    Ok(Collaborators {
        resolver: Arc::new(StaticResolver::new(Arc::clone(&directory))),
        verifier: Arc::new(RegistryVerifier::from_directory(&directory)),
        checker: Arc::new(TomlDelegationChecker::from_toml_str(POLICY)?),
    })
}

fn make_runner(
    c: &Collaborators,
    gate: AutoApprovalGate,
    trail: Option<Arc<InMemoryTrailWriter>>,
) -> WorkflowRunner {
    let client = TrustClient::new(
        TrustConfig {
            ans_url: "https://ans.veritrust.example".to_string(),
            a2a_url: Some("https://a2a.hospital.example".to_string()),
        },
        Arc::clone(&c.resolver),
        Arc::clone(&c.verifier),
    )
    .with_delegation(Arc::clone(&c.checker))
    .with_approval(Arc::new(gate));

    let runner = WorkflowRunner::new(client);
    match trail {
        Some(t) => runner.with_trail(t),
        None => runner,
    }
}

fn referral_handoff(case: &PatientCase, target: &str) -> HandoffSpec {
    let handoff = HandoffSpec::new(PRIMARY_DIAGNOSTICS, target, "analyze-imaging");
    if case.privacy_level.is_sensitive() {
        handoff.with_forced_approval()
    } else {
        handoff
    }
}

fn case_input(case: &PatientCase) -> FidesResult<WorkflowInput> {
    Ok(WorkflowInput {
        kind: "patient-case".to_string(),
        payload: serde_json::to_value(case).map_err(|e| WorkflowError::Config {
            reason: format!("patient case is not serializable: {}", e),
        })?,
    })
}

// ── Scenario runner ───────────────────────────────────────────────────────────

/// Run Scenario 2: Healthcare Diagnostic Chain.
pub async fn run_scenario() -> FidesResult<()> {
    println!("=== Scenario 2: Healthcare Diagnostic Chain ===");
    println!();
    println!("  Source: {PRIMARY_DIAGNOSTICS}");
    println!("  Target: {RADIOLOGY_SPECIALIST}");
    println!("  Action: analyze-imaging (physician approval required)");
    println!();

    let c = collaborators()?;

    for case in [cardiac_case(), routine_case()] {
        let trail = Arc::new(InMemoryTrailWriter::new(case.patient_id.clone()));
        let runner = make_runner(&c, AutoApprovalGate::approving(), Some(Arc::clone(&trail)));
        let handoff = referral_handoff(&case, RADIOLOGY_SPECIALIST);

        println!("  Patient {}", case.patient_id);
        println!("  Imaging:    {}", case.imaging_type);
        println!("  Symptoms:   {}", case.symptoms.join(", "));
        println!("  Privacy:    {:?}", case.privacy_level);

        let result = runner
            .run(&handoff, &case_input(&case)?, &ImagingSpecialistEndpoint)
            .await?;

        println!("  Policy:     {}", result.policy_id.as_deref().unwrap_or("-"));
        println!("  Status:     {}", result.status);
        println!(
            "  Diagnosis:  {} (confidence {:.2})",
            result.response["diagnosis"]["condition"].as_str().unwrap_or("?"),
            result.response["diagnosis"]["confidence"].as_f64().unwrap_or_default()
        );
        for reason in &result.reasoning {
            println!("    - {reason}");
        }

        let log = trail.export_log();
        println!(
            "  Trail:      {} ({} event(s))",
            if trail.verify_integrity() { "VERIFIED" } else { "INTEGRITY FAILURE" },
            log.events.len()
        );
        println!();
    }

    // ── Lapsed-credential referral ────────────────────────────────────────────

    println!("  Referring to the locum radiologist (credential lapsed)");
    let runner = make_runner(&c, AutoApprovalGate::approving(), None);
    let case = routine_case();
    let handoff = referral_handoff(&case, LOCUM_RADIOLOGIST);

    match runner
        .run(&handoff, &case_input(&case)?, &ImagingSpecialistEndpoint)
        .await
    {
        Err(WorkflowError::Credential { did }) => {
            println!("  Stopped at the verification gate: {did}");
        }
        Ok(_) => println!("  UNEXPECTED: referral to lapsed credential succeeded"),
        Err(other) => println!("  UNEXPECTED error: {other}"),
    }

    println!();
    println!("  Scenario 2 complete.");
    println!();
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
