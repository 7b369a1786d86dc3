use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for claims handed in by the billing screens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClaimId(pub String);

/// Identifier wrapper for the payer a claim is billed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PayerId(pub String);

/// Claim attributes a payer rule may inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleField {
    CptCode,
    IcdCode,
    Modifier,
    VisitCount,
    CoverageStatus,
    PatientAge,
    ServiceDate,
}

/// Structural shape of a field, driving operator compatibility and value parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    CodeList,
    Count,
    Text,
    Date,
}

impl RuleField {
    pub const fn kind(self) -> FieldKind {
        match self {
            RuleField::CptCode | RuleField::IcdCode | RuleField::Modifier => FieldKind::CodeList,
            RuleField::VisitCount | RuleField::PatientAge => FieldKind::Count,
            RuleField::CoverageStatus => FieldKind::Text,
            RuleField::ServiceDate => FieldKind::Date,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RuleField::CptCode => "cptCode",
            RuleField::IcdCode => "icdCode",
            RuleField::Modifier => "modifier",
            RuleField::VisitCount => "visitCount",
            RuleField::CoverageStatus => "coverageStatus",
            RuleField::PatientAge => "patientAge",
            RuleField::ServiceDate => "serviceDate",
        }
    }
}

/// Read-only projection of a claim supplied by the claim-entry collaborators.
///
/// The engine never mutates a snapshot; optional scalars model older claim
/// records that predate a field being captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimSnapshot {
    pub claim_id: ClaimId,
    pub payer_id: PayerId,
    pub cpt_codes: Vec<String>,
    pub icd_codes: Vec<String>,
    pub modifiers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visit_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_age: Option<u32>,
    pub service_date: NaiveDate,
}

/// Borrowed view of one claim attribute, shaped by its [`FieldKind`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Codes(&'a [String]),
    Count(u32),
    Text(&'a str),
    Date(NaiveDate),
}

impl ClaimSnapshot {
    /// Resolve the value a rule's field refers to. `None` means the snapshot
    /// cannot supply the field at all (older claim schema), which the engine
    /// reports as a skip rather than a match or a failure.
    pub(crate) fn field_value(&self, field: RuleField) -> Option<FieldValue<'_>> {
        match field {
            RuleField::CptCode => Some(FieldValue::Codes(&self.cpt_codes)),
            RuleField::IcdCode => Some(FieldValue::Codes(&self.icd_codes)),
            RuleField::Modifier => Some(FieldValue::Codes(&self.modifiers)),
            RuleField::VisitCount => self.visit_count.map(FieldValue::Count),
            RuleField::PatientAge => self.patient_age.map(FieldValue::Count),
            RuleField::CoverageStatus => {
                self.coverage_status.as_deref().map(FieldValue::Text)
            }
            RuleField::ServiceDate => Some(FieldValue::Date(self.service_date)),
        }
    }
}
