//! Certificate and letter templates (French administrative wording).

use chrono::NaiveDate;

use super::PrintDocument;
use crate::dates::{format_date_long, format_date_short};
use crate::models::{BankExperience, Gender, InformationSheet, InvestigationLevel, InvestigationRequestInput, WorkCertificateRequest};

/// Who issues the document and where.
#[derive(Debug, Clone)]
pub struct Issuer {
    pub organization: String,
    pub city: String,
    pub signatory: String,
}

impl Issuer {
    pub fn new(organization: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            city: city.into(),
            signatory: "Le Directeur des Ressources Humaines".to_string(),
        }
    }

    fn header(&self) -> Vec<String> {
        vec![self.organization.clone()]
    }

    fn place_date(&self, today: NaiveDate) -> String {
        format!("Fait à {}, le {}", self.city, format_date_long(today))
    }
}

/// Gender-dependent words.
struct Wording {
    civility: &'static str,
    born: &'static str,
    employed: &'static str,
    assigned: &'static str,
    recruited: &'static str,
    concerned: &'static str,
}

fn wording(gender: Gender) -> Wording {
    match gender {
        Gender::Male => Wording {
            civility: "Monsieur",
            born: "né",
            employed: "employé",
            assigned: "affecté",
            recruited: "recruté",
            concerned: "l'intéressé",
        },
        Gender::Female => Wording {
            civility: "Madame",
            born: "née",
            employed: "employée",
            assigned: "affectée",
            recruited: "recrutée",
            concerned: "l'intéressée",
        },
    }
}

fn experience_line(exp: &BankExperience) -> String {
    let period = match exp.data.end_date {
        Some(end) => format!(
            "Du {} au {}",
            format_date_short(exp.data.start_date),
            format_date_short(end)
        ),
        None => format!("Depuis le {}", format_date_short(exp.data.start_date)),
    };
    format!(
        "{period} : {}, {} ({})",
        exp.data.job_title, exp.data.structure, exp.data.institution
    )
}

/// Work certificate (attestation de travail).
///
/// `experiences` may contain records of other employees; only those of
/// `sheet` are listed, oldest first.
pub fn work_certificate(
    sheet: &InformationSheet,
    experiences: &[BankExperience],
    request: &WorkCertificateRequest,
    issuer: &Issuer,
    today: NaiveDate,
) -> PrintDocument {
    let w = wording(sheet.gender());
    let id = &sheet.data.identification;
    let recruitment = sheet.data.experience.recruitment_date;
    let end = sheet.service_end(today);
    let ended = end < today;

    let service = if ended {
        format!(
            "a été {} au sein de notre établissement du {} au {}",
            w.employed,
            format_date_long(recruitment),
            format_date_long(end)
        )
    } else {
        format!(
            "est {} au sein de notre établissement depuis le {}",
            w.employed,
            format_date_long(recruitment)
        )
    };

    let mut paragraphs = vec![format!(
        "Nous soussignés, {org}, attestons que {civ} {name}, {born} le {birth} à {place}, matricule {number}, {service} en qualité de {job}, {assigned} à {structure}.",
        org = issuer.organization,
        civ = w.civility,
        name = sheet.full_name(),
        born = w.born,
        birth = format_date_long(id.birth_date),
        place = id.birth_place,
        number = id.employee_number,
        job = sheet.data.position.job_title,
        assigned = w.assigned,
        structure = sheet.data.position.structure,
    )];

    let seniority = sheet.seniority(today);
    if !seniority.is_zero() {
        paragraphs.push(format!("Ancienneté au sein de l'établissement : {}.", seniority.to_french()));
    }

    let mut own: Vec<&BankExperience> = experiences
        .iter()
        .filter(|e| e.data.information_sheet_id == sheet.id)
        .collect();
    own.sort_by_key(|e| e.data.start_date);
    let items = own.into_iter().map(experience_line).collect();

    let purpose = request.data.purpose.trim();
    let closing = if purpose.is_empty() {
        format!(
            "La présente attestation est délivrée à {} sur sa demande pour servir et valoir ce que de droit.",
            w.concerned
        )
    } else {
        format!(
            "La présente attestation est délivrée à {} sur sa demande, pour {purpose}, pour servir et valoir ce que de droit.",
            w.concerned
        )
    };

    PrintDocument {
        header: issuer.header(),
        reference: Some(format!("N° {:04}/DRH/{}", request.id, request.data.request_date.format("%Y"))),
        recipient: Vec::new(),
        title: "ATTESTATION DE TRAVAIL".to_string(),
        subject: None,
        paragraphs,
        items,
        closing: vec![closing],
        place_date: issuer.place_date(today),
        signature: vec![issuer.signatory.clone()],
    }
}

/// Administrative investigation request addressed to a daira or a wilaya.
pub fn investigation_request(
    level: InvestigationLevel,
    sheet: &InformationSheet,
    request: &InvestigationRequestInput,
    issuer: &Issuer,
    today: NaiveDate,
) -> PrintDocument {
    let w = wording(sheet.gender());
    let id = &sheet.data.identification;

    let (recipient, addressee) = match level {
        InvestigationLevel::Daira => (
            format!("À Monsieur le Chef de Daïra de {}", request.authority),
            "Monsieur le Chef de Daïra",
        ),
        InvestigationLevel::Wilaya => (
            format!("À Monsieur le Wali de la Wilaya de {}", request.authority),
            "Monsieur le Wali",
        ),
    };

    let intro = format!(
        "Nous avons l'honneur de solliciter de votre haute bienveillance de bien vouloir diligenter une enquête administrative concernant {civ} {name}, {born} le {birth} à {place}, {recruited} le {recruitment} en qualité de {job}.",
        civ = w.civility,
        name = sheet.full_name(),
        born = w.born,
        birth = format_date_long(id.birth_date),
        place = id.birth_place,
        recruited = w.recruited,
        recruitment = format_date_long(sheet.data.experience.recruitment_date),
        job = sheet.data.position.job_title,
    );

    let dash = |v: &Option<String>| v.as_deref().filter(|s| !s.trim().is_empty()).unwrap_or("-").to_string();
    let items = vec![
        format!("Nom : {}", id.last_name.trim().to_uppercase()),
        format!("Prénom : {}", id.first_name.trim()),
        format!(
            "Date et lieu de naissance : {} à {}",
            format_date_short(id.birth_date),
            id.birth_place
        ),
        format!("Adresse : {}", dash(&id.address)),
        format!("N° de la carte nationale d'identité : {}", dash(&id.national_id_number)),
    ];

    PrintDocument {
        header: issuer.header(),
        reference: Some(format!("Réf : {}", request.reference_number)),
        recipient: vec![recipient],
        title: "DEMANDE D'ENQUÊTE ADMINISTRATIVE".to_string(),
        subject: Some(format!("Objet : {}", request.subject)),
        paragraphs: vec![intro],
        items,
        closing: vec![
            format!(
                "Nous vous saurions gré de bien vouloir nous faire parvenir les résultats de cette enquête dans les meilleurs délais. Demande formulée le {}.",
                format_date_long(request.request_date)
            ),
            format!("Veuillez agréer, {addressee}, l'expression de notre haute considération."),
        ],
        place_date: issuer.place_date(today),
        signature: vec![issuer.signatory.clone()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bank_experience::fixtures::bank_experience;
    use crate::models::information_sheet::fixtures::sheet;
    use crate::models::{CertificateStatus, InvestigationStatus, WorkCertificateRequestInput};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 12).unwrap()
    }

    fn issuer() -> Issuer {
        Issuer::new("Banque Nationale - DRH", "Alger")
    }

    fn cert_request(purpose: &str) -> WorkCertificateRequest {
        WorkCertificateRequest {
            id: 42,
            data: WorkCertificateRequestInput {
                information_sheet_id: 1,
                request_date: today(),
                purpose: purpose.to_string(),
                status: CertificateStatus::Approved,
            },
        }
    }

    #[test]
    fn test_work_certificate_male_wording() {
        let s = sheet(1, "Benali", "Karim", Gender::Male);
        let doc = work_certificate(&s, &[], &cert_request(""), &issuer(), today());
        let text = doc.to_plain_text();

        assert!(text.contains("Monsieur BENALI Karim, né le 12 avril 1985 à Blida"));
        assert!(text.contains("est employé au sein de notre établissement depuis le 1er septembre 2010"));
        assert!(text.contains("Ancienneté au sein de l'établissement : 13 ans, 6 mois et 11 jours."));
        assert!(text.contains("délivrée à l'intéressé sur sa demande pour servir"));
        assert_eq!(doc.reference.as_deref(), Some("N° 0042/DRH/2024"));
        assert_eq!(doc.place_date, "Fait à Alger, le 12 mars 2024");
    }

    #[test]
    fn test_work_certificate_female_wording_and_purpose() {
        let s = sheet(2, "Haddad", "Samia", Gender::Female);
        let doc = work_certificate(&s, &[], &cert_request("un dossier de prêt immobilier"), &issuer(), today());
        let text = doc.to_plain_text();

        assert!(text.contains("Madame HADDAD Samia, née le"));
        assert!(text.contains("est employée"));
        assert!(text.contains("affectée à Agence Didouche Mourad"));
        assert!(text.contains("à l'intéressée sur sa demande, pour un dossier de prêt immobilier,"));
    }

    #[test]
    fn test_work_certificate_suspended_uses_past_tense() {
        let mut s = sheet(1, "Benali", "Karim", Gender::Male);
        s.data.suspension.is_suspended = true;
        s.data.suspension.suspension_date = NaiveDate::from_ymd_opt(2020, 9, 1);

        let text = work_certificate(&s, &[], &cert_request(""), &issuer(), today()).to_plain_text();
        assert!(text.contains("a été employé au sein de notre établissement du 1er septembre 2010 au 1er septembre 2020"));
        assert!(text.contains("Ancienneté au sein de l'établissement : 10 ans."));
    }

    #[test]
    fn test_work_certificate_lists_own_experience_in_order() {
        let s = sheet(1, "Benali", "Karim", Gender::Male);
        let experiences = vec![
            bank_experience(3, 1, (2015, 1, 1), None),
            bank_experience(2, 9, (2011, 1, 1), Some((2012, 1, 1))),
            bank_experience(1, 1, (2010, 9, 1), Some((2014, 12, 31))),
        ];

        let doc = work_certificate(&s, &experiences, &cert_request(""), &issuer(), today());
        assert_eq!(
            doc.items,
            vec![
                "Du 01/09/2010 au 31/12/2014 : Poste 1, Agence Hydra (BNA)".to_string(),
                "Depuis le 01/01/2015 : Poste 3, Agence Hydra (BNA)".to_string(),
            ]
        );
    }

    fn investigation() -> InvestigationRequestInput {
        InvestigationRequestInput {
            information_sheet_id: 1,
            reference_number: "DRH/ENQ/2024/031".to_string(),
            authority: "Blida".to_string(),
            subject: "Enquête administrative préalable à la titularisation".to_string(),
            request_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            status: InvestigationStatus::Pending,
        }
    }

    #[test]
    fn test_daira_request() {
        let s = sheet(1, "Benali", "Karim", Gender::Male);
        let doc = investigation_request(InvestigationLevel::Daira, &s, &investigation(), &issuer(), today());

        assert_eq!(doc.recipient, vec!["À Monsieur le Chef de Daïra de Blida".to_string()]);
        assert_eq!(doc.reference.as_deref(), Some("Réf : DRH/ENQ/2024/031"));
        assert!(doc.paragraphs[0].contains("concernant Monsieur BENALI Karim, né le"));
        assert!(doc.paragraphs[0].contains("recruté le 1er septembre 2010"));
        assert!(doc.items.contains(&"Adresse : -".to_string()));
        assert!(doc.closing[1].starts_with("Veuillez agréer, Monsieur le Chef de Daïra,"));
        assert!(doc.closing[0].contains("le 1er mars 2024"));
    }

    #[test]
    fn test_wilaya_request_female() {
        let mut s = sheet(2, "Haddad", "Samia", Gender::Female);
        s.data.identification.national_id_number = Some("109870123456789".to_string());
        let doc = investigation_request(InvestigationLevel::Wilaya, &s, &investigation(), &issuer(), today());

        assert_eq!(doc.recipient, vec!["À Monsieur le Wali de la Wilaya de Blida".to_string()]);
        assert!(doc.paragraphs[0].contains("Madame HADDAD Samia, née le"));
        assert!(doc.paragraphs[0].contains("recrutée le"));
        assert!(doc.items.contains(&"N° de la carte nationale d'identité : 109870123456789".to_string()));
        assert!(doc.closing[1].starts_with("Veuillez agréer, Monsieur le Wali,"));
    }
}
