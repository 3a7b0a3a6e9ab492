//! Site classification by keyword heuristics
//!
//! Case exports carry no site column, so the site is inferred from the
//! anesthesia form title and the procedure text. Rules are checked in order
//! and the first match wins; anything unmatched is a main OR case.

use crate::models::SiteType;

const LD_FORM_KEYWORDS: &[&str] = &["labor", "l&d", "epidural", "ob "];
const LD_PROCEDURE_KEYWORDS: &[&str] = &["labor epidural", "labor analgesia", "epidural placement"];

const CARDIAC_FORM_KEYWORDS: &[&str] = &["cardiac", "cath"];
const CARDIAC_PROCEDURE_KEYWORDS: &[&str] = &[
    "cabg",
    "avr",
    "mvr",
    "sternotomy",
    "bypass",
    "valve",
    "tee",
    "pacemaker",
    "icd",
    "ablation",
    "heart cath",
    "stent",
    "angioplasty",
    "bi-v",
];

const GI_FORM_KEYWORDS: &[&str] = &["gi ", "endo"];
const GI_PROCEDURE_KEYWORDS: &[&str] = &[
    "egd",
    "ercp",
    "colonoscopy",
    "gi case",
    "gi x",
    "eus",
    "bronch",
    "ion bronch",
    "ebus",
];

const IR_PROCEDURE_KEYWORDS: &[&str] = &["ir ", "interventional", "embolization", "angiogram"];

const SHORT_FORM_KEYWORDS: &[&str] = &["mac", "short"];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Classify a case from its form title and procedure text
#[must_use]
pub fn classify_site(form_title: &str, procedure: &str) -> SiteType {
    let form = form_title.to_lowercase();
    let proc = procedure.to_lowercase();

    if contains_any(&form, LD_FORM_KEYWORDS) || contains_any(&proc, LD_PROCEDURE_KEYWORDS) {
        SiteType::LaborDelivery
    } else if contains_any(&form, CARDIAC_FORM_KEYWORDS)
        || contains_any(&proc, CARDIAC_PROCEDURE_KEYWORDS)
    {
        SiteType::CardiacCathLab
    } else if contains_any(&form, GI_FORM_KEYWORDS) || contains_any(&proc, GI_PROCEDURE_KEYWORDS) {
        SiteType::Gastrointestinal
    } else if contains_any(&proc, IR_PROCEDURE_KEYWORDS) {
        SiteType::InterventionalRadiology
    } else if contains_any(&form, SHORT_FORM_KEYWORDS) {
        SiteType::ShortMac
    } else {
        SiteType::OperatingRoom
    }
}
