use serde::{Deserialize, Serialize};

/// The twelve fixed report sections, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSection {
    ObjetivoAnalise,
    DataAvaliacao,
    DadosConsiderados,
    ProfissoesCompativeis,
    ParecerGeral,
    CorrespondenciaCargo,
    VantagensFortes,
    OportunidadesMelhoria,
    AnaliseDisc,
    AnaliseVieses,
    AnaliseQp,
    Importante,
}

impl ReportSection {
    pub const fn ordered() -> [Self; 12] {
        [
            Self::ObjetivoAnalise,
            Self::DataAvaliacao,
            Self::DadosConsiderados,
            Self::ProfissoesCompativeis,
            Self::ParecerGeral,
            Self::CorrespondenciaCargo,
            Self::VantagensFortes,
            Self::OportunidadesMelhoria,
            Self::AnaliseDisc,
            Self::AnaliseVieses,
            Self::AnaliseQp,
            Self::Importante,
        ]
    }

    /// JSON key expected in the model response.
    pub const fn key(self) -> &'static str {
        match self {
            Self::ObjetivoAnalise => "objetivo_analise",
            Self::DataAvaliacao => "data_avaliacao",
            Self::DadosConsiderados => "dados_considerados",
            Self::ProfissoesCompativeis => "profissoes_compativeis",
            Self::ParecerGeral => "parecer_geral",
            Self::CorrespondenciaCargo => "correspondencia_cargo",
            Self::VantagensFortes => "vantagens_fortes",
            Self::OportunidadesMelhoria => "oportunidades_melhoria",
            Self::AnaliseDisc => "analise_disc",
            Self::AnaliseVieses => "analise_vieses",
            Self::AnaliseQp => "analise_qp",
            Self::Importante => "importante",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ObjetivoAnalise => "Objetivo da Análise",
            Self::DataAvaliacao => "Data da Avaliação Mais Recente",
            Self::DadosConsiderados => "Dados Considerados",
            Self::ProfissoesCompativeis => "Potenciais Profissões Compatíveis",
            Self::ParecerGeral => "Parecer Geral da Análise",
            Self::CorrespondenciaCargo => "Nível de Correspondência com o Cargo",
            Self::VantagensFortes => "Vantagens e Pontos Fortes para a Função",
            Self::OportunidadesMelhoria => "Oportunidades de Melhoria",
            Self::AnaliseDisc => "Análise de Estresse e Adaptação DISC",
            Self::AnaliseVieses => "Análise dos Vieses Comportamentais da Axiologia",
            Self::AnaliseQp => "Análise do QP e a influência dos Sabotadores",
            Self::Importante => "Importante",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|section| section.key() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_match_the_report_schema() {
        let keys: Vec<&str> = ReportSection::ordered()
            .into_iter()
            .map(ReportSection::key)
            .collect();
        assert_eq!(
            keys,
            vec![
                "objetivo_analise",
                "data_avaliacao",
                "dados_considerados",
                "profissoes_compativeis",
                "parecer_geral",
                "correspondencia_cargo",
                "vantagens_fortes",
                "oportunidades_melhoria",
                "analise_disc",
                "analise_vieses",
                "analise_qp",
                "importante",
            ]
        );
    }

    #[test]
    fn serde_names_agree_with_keys() {
        for section in ReportSection::ordered() {
            let encoded = serde_json::to_value(section).expect("serializes");
            assert_eq!(encoded, serde_json::Value::String(section.key().to_string()));
            assert_eq!(ReportSection::from_key(section.key()), Some(section));
        }
        assert_eq!(ReportSection::from_key("unknown"), None);
    }
}
