#![forbid(unsafe_code)]

/// One checkpoint ("jalon") of the procurement timeline.
///
/// Variant declaration order is catalog order; the derived `Ord` and the
/// `CATALOG` index both follow it. Every table, form and derivation in the
/// workspace iterates `CATALOG` rather than keeping its own list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MilestoneKey {
    ElaborationDao,
    SaisineCipm,
    ExamenDao,
    ValidationDao,
    TransmissionAnoDao,
    AnoBailleurDao,
    LancementAo,
    DepotOffres,
    OuverturePlis,
    EvaluationOffres,
    RapportEvaluation,
    TransmissionAnoEvaluation,
    AnoBailleurEvaluation,
    PropositionAttribution,
    PublicationAttribution,
    NotificationAttribution,
    DelaiRecours,
    ElaborationProjetMarche,
    SaisineCipmProjet,
    ExamenProjetMarche,
    ValidationProjetMarche,
    TransmissionAnoProjet,
    AnoBailleurProjet,
    VisaControleFinancier,
    SouscriptionMarche,
    SignatureMarche,
    NotificationMarche,
    EnregistrementMarche,
    CautionDefinitive,
    OrdreService,
    DemarragePrestations,
    ReceptionProvisoire,
    ReceptionDefinitive,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// DAO preparation through award notification.
    Tender,
    /// "Projet de marché" review through receptions.
    Award,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Tender => "tender",
            Phase::Award => "award",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MilestoneDefinition {
    pub key: MilestoneKey,
    pub label: &'static str,
    pub phase: Phase,
    /// Applies only under lender financing; always considered satisfied when
    /// the owning project runs on internal budget.
    pub lender_only: bool,
}

const fn jalon(
    key: MilestoneKey,
    label: &'static str,
    phase: Phase,
    lender_only: bool,
) -> MilestoneDefinition {
    MilestoneDefinition {
        key,
        label,
        phase,
        lender_only,
    }
}

/// The canonical ordered registry. 17 tender-phase checkpoints, then 16
/// award-phase checkpoints; the CIPM referral/review/no-objection chain
/// appears once per review round.
pub const CATALOG: &[MilestoneDefinition] = &[
    jalon(
        MilestoneKey::ElaborationDao,
        "Élaboration du DAO",
        Phase::Tender,
        false,
    ),
    jalon(
        MilestoneKey::SaisineCipm,
        "Saisine de la CIPM",
        Phase::Tender,
        false,
    ),
    jalon(
        MilestoneKey::ExamenDao,
        "Examen du DAO par la CIPM",
        Phase::Tender,
        false,
    ),
    jalon(
        MilestoneKey::ValidationDao,
        "Validation du DAO",
        Phase::Tender,
        false,
    ),
    jalon(
        MilestoneKey::TransmissionAnoDao,
        "Transmission du DAO au bailleur",
        Phase::Tender,
        true,
    ),
    jalon(
        MilestoneKey::AnoBailleurDao,
        "ANO du bailleur sur le DAO",
        Phase::Tender,
        true,
    ),
    jalon(
        MilestoneKey::LancementAo,
        "Lancement de l'appel d'offres",
        Phase::Tender,
        false,
    ),
    jalon(
        MilestoneKey::DepotOffres,
        "Dépôt des offres",
        Phase::Tender,
        false,
    ),
    jalon(
        MilestoneKey::OuverturePlis,
        "Ouverture des plis",
        Phase::Tender,
        false,
    ),
    jalon(
        MilestoneKey::EvaluationOffres,
        "Évaluation des offres",
        Phase::Tender,
        false,
    ),
    jalon(
        MilestoneKey::RapportEvaluation,
        "Rapport d'évaluation",
        Phase::Tender,
        false,
    ),
    jalon(
        MilestoneKey::TransmissionAnoEvaluation,
        "Transmission du rapport d'évaluation au bailleur",
        Phase::Tender,
        true,
    ),
    jalon(
        MilestoneKey::AnoBailleurEvaluation,
        "ANO du bailleur sur l'évaluation",
        Phase::Tender,
        true,
    ),
    jalon(
        MilestoneKey::PropositionAttribution,
        "Proposition d'attribution",
        Phase::Tender,
        false,
    ),
    jalon(
        MilestoneKey::PublicationAttribution,
        "Publication des résultats",
        Phase::Tender,
        false,
    ),
    jalon(
        MilestoneKey::NotificationAttribution,
        "Notification de l'attribution",
        Phase::Tender,
        false,
    ),
    jalon(
        MilestoneKey::DelaiRecours,
        "Expiration du délai de recours",
        Phase::Tender,
        false,
    ),
    jalon(
        MilestoneKey::ElaborationProjetMarche,
        "Élaboration du projet de marché",
        Phase::Award,
        false,
    ),
    jalon(
        MilestoneKey::SaisineCipmProjet,
        "Saisine de la CIPM (projet de marché)",
        Phase::Award,
        false,
    ),
    jalon(
        MilestoneKey::ExamenProjetMarche,
        "Examen du projet de marché",
        Phase::Award,
        false,
    ),
    jalon(
        MilestoneKey::ValidationProjetMarche,
        "Validation du projet de marché",
        Phase::Award,
        false,
    ),
    jalon(
        MilestoneKey::TransmissionAnoProjet,
        "Transmission du projet de marché au bailleur",
        Phase::Award,
        true,
    ),
    jalon(
        MilestoneKey::AnoBailleurProjet,
        "ANO du bailleur sur le projet de marché",
        Phase::Award,
        true,
    ),
    jalon(
        MilestoneKey::VisaControleFinancier,
        "Visa du contrôleur financier",
        Phase::Award,
        false,
    ),
    jalon(
        MilestoneKey::SouscriptionMarche,
        "Souscription par le titulaire",
        Phase::Award,
        false,
    ),
    jalon(
        MilestoneKey::SignatureMarche,
        "Signature du marché",
        Phase::Award,
        false,
    ),
    jalon(
        MilestoneKey::NotificationMarche,
        "Notification du marché",
        Phase::Award,
        false,
    ),
    jalon(
        MilestoneKey::EnregistrementMarche,
        "Enregistrement du marché",
        Phase::Award,
        false,
    ),
    jalon(
        MilestoneKey::CautionDefinitive,
        "Constitution du cautionnement définitif",
        Phase::Award,
        false,
    ),
    jalon(
        MilestoneKey::OrdreService,
        "Ordre de service de démarrage",
        Phase::Award,
        false,
    ),
    jalon(
        MilestoneKey::DemarragePrestations,
        "Démarrage des prestations",
        Phase::Award,
        false,
    ),
    jalon(
        MilestoneKey::ReceptionProvisoire,
        "Réception provisoire",
        Phase::Award,
        false,
    ),
    jalon(
        MilestoneKey::ReceptionDefinitive,
        "Réception définitive",
        Phase::Award,
        false,
    ),
];

impl MilestoneKey {
    pub fn as_str(self) -> &'static str {
        match self {
            MilestoneKey::ElaborationDao => "elaboration_dao",
            MilestoneKey::SaisineCipm => "saisine_cipm",
            MilestoneKey::ExamenDao => "examen_dao",
            MilestoneKey::ValidationDao => "validation_dao",
            MilestoneKey::TransmissionAnoDao => "transmission_ano_dao",
            MilestoneKey::AnoBailleurDao => "ano_bailleur_dao",
            MilestoneKey::LancementAo => "lancement_ao",
            MilestoneKey::DepotOffres => "depot_offres",
            MilestoneKey::OuverturePlis => "ouverture_plis",
            MilestoneKey::EvaluationOffres => "evaluation_offres",
            MilestoneKey::RapportEvaluation => "rapport_evaluation",
            MilestoneKey::TransmissionAnoEvaluation => "transmission_ano_evaluation",
            MilestoneKey::AnoBailleurEvaluation => "ano_bailleur_evaluation",
            MilestoneKey::PropositionAttribution => "proposition_attribution",
            MilestoneKey::PublicationAttribution => "publication_attribution",
            MilestoneKey::NotificationAttribution => "notification_attribution",
            MilestoneKey::DelaiRecours => "delai_recours",
            MilestoneKey::ElaborationProjetMarche => "elaboration_projet_marche",
            MilestoneKey::SaisineCipmProjet => "saisine_cipm_projet",
            MilestoneKey::ExamenProjetMarche => "examen_projet_marche",
            MilestoneKey::ValidationProjetMarche => "validation_projet_marche",
            MilestoneKey::TransmissionAnoProjet => "transmission_ano_projet",
            MilestoneKey::AnoBailleurProjet => "ano_bailleur_projet",
            MilestoneKey::VisaControleFinancier => "visa_controle_financier",
            MilestoneKey::SouscriptionMarche => "souscription_marche",
            MilestoneKey::SignatureMarche => "signature_marche",
            MilestoneKey::NotificationMarche => "notification_marche",
            MilestoneKey::EnregistrementMarche => "enregistrement_marche",
            MilestoneKey::CautionDefinitive => "caution_definitive",
            MilestoneKey::OrdreService => "ordre_service",
            MilestoneKey::DemarragePrestations => "demarrage_prestations",
            MilestoneKey::ReceptionProvisoire => "reception_provisoire",
            MilestoneKey::ReceptionDefinitive => "reception_definitive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        CATALOG
            .iter()
            .find(|def| def.key.as_str() == value)
            .map(|def| def.key)
    }
}

/// Catalog entry for `key`. `CATALOG` holds every key exactly once, in
/// declaration order, so the discriminant doubles as the index.
pub fn definition(key: MilestoneKey) -> &'static MilestoneDefinition {
    &CATALOG[key as usize]
}
