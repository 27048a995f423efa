use serde::{Deserialize, Serialize};

/// Motivators scoring strictly above this are reported as passions.
pub const PASSION_THRESHOLD: f64 = 7.0;
/// Competencies scoring strictly above this are strengths; the rest are gaps.
pub const STRENGTH_THRESHOLD: f64 = 6.7;
pub const RELIABILITY_COLUMN: &str = "Confiabilidade (Reliability)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscFactor {
    Dominador,
    Influenciador,
    Estabilidade,
    Conformidade,
}

impl DiscFactor {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Dominador,
            Self::Influenciador,
            Self::Estabilidade,
            Self::Conformidade,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dominador => "Dominador",
            Self::Influenciador => "Influenciador",
            Self::Estabilidade => "Estabilidade",
            Self::Conformidade => "Conformidade",
        }
    }

    pub const fn natural_column(self) -> &'static str {
        match self {
            Self::Dominador => "Dominador Natural",
            Self::Influenciador => "Influenciador Natural",
            Self::Estabilidade => "Estabilidade Natural",
            Self::Conformidade => "Conformidade Natural",
        }
    }

    pub const fn work_column(self) -> &'static str {
        match self {
            Self::Dominador => "Dominador Work",
            Self::Influenciador => "Influenciador Work",
            Self::Estabilidade => "Estabilidade Work",
            Self::Conformidade => "Conformidade Work",
        }
    }
}

/// Ordinal band describing how much a factor shifts between natural and adapted style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffortLevel {
    Low,
    Moderate,
    ModeratelyHigh,
    PotentialStress,
    /// Adaptations strictly between 2.9 and 3.0 match no band.
    Undefined,
}

impl EffortLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low effort",
            Self::Moderate => "Moderate effort",
            Self::ModeratelyHigh => "Moderately high effort",
            Self::PotentialStress => "Potential stress",
            Self::Undefined => "Undefined",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motivator {
    KnowledgeAndDiscovery,
    ReturnOnInvestment,
    Aesthetics,
    HelpingOthers,
    GuidingPrinciples,
    Leadership,
    PeaceAndHarmony,
}

impl Motivator {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::KnowledgeAndDiscovery,
            Self::ReturnOnInvestment,
            Self::Aesthetics,
            Self::HelpingOthers,
            Self::GuidingPrinciples,
            Self::Leadership,
            Self::PeaceAndHarmony,
        ]
    }

    /// Column header as exported, trailing colon included.
    pub const fn column(self) -> &'static str {
        match self {
            Self::KnowledgeAndDiscovery => "Conhecimento e Descoberta:",
            Self::ReturnOnInvestment => "Retorno sobre Investimento (ROI):",
            Self::Aesthetics => "Estética:",
            Self::HelpingOthers => "Ajudar os Outros:",
            Self::GuidingPrinciples => "Princípios Orientadores:",
            Self::Leadership => "Liderança:",
            Self::PeaceAndHarmony => "Paz e Harmonia:",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::KnowledgeAndDiscovery => "Conhecimento e Descoberta",
            Self::ReturnOnInvestment => "Retorno sobre Investimento (ROI)",
            Self::Aesthetics => "Estética",
            Self::HelpingOthers => "Ajudar os Outros",
            Self::GuidingPrinciples => "Princípios Orientadores",
            Self::Leadership => "Liderança",
            Self::PeaceAndHarmony => "Paz e Harmonia",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Competency {
    CustomerFocus,
    SelfConfidence,
    LeadingOthers,
}

impl Competency {
    pub const fn ordered() -> [Self; 3] {
        [Self::CustomerFocus, Self::SelfConfidence, Self::LeadingOthers]
    }

    pub const fn column(self) -> &'static str {
        match self {
            Self::CustomerFocus => "Foco no Cliente",
            Self::SelfConfidence => "Autoconfiança",
            Self::LeadingOthers => "Liderando outros",
        }
    }

    pub const fn label(self) -> &'static str {
        self.column()
    }
}
