//! Prompt text sent to the text model.
//!
//! The wording lives in versioned constants so a prompt change shows up as a
//! reviewable diff here, independent of the gateway. Placeholders use the
//! `{{name}}` form and are filled by [`ReportPromptBuilder`].

use super::assembler::ReportDocument;
use super::sections::ReportSection;
use crate::config::ReportConfig;
use crate::workflows::intake::{AssessmentRow, NAME_COLUMN};
use crate::workflows::scoring::{format_score, AssessmentScores, DiscProfile};
use chrono::NaiveDate;

pub const REPORT_PROMPT_VERSION: &str = "report-v1";
pub const FOLLOW_UP_PROMPT_VERSION: &str = "follow-up-v1";

/// How the subject is named everywhere in generated text.
pub const SUBJECT_REFERENCE: &str = "O(A) Avaliado(a)";
pub const DATA_NOT_PROVIDED: &str = "Dados não fornecidos para esta análise";
pub const EVALUATION_DATE_FORMAT: &str = "%d/%m/%Y";

pub const IMPORTANT_NOTICE: &str = "Este relatório é uma ferramenta de apoio ao desenvolvimento e \
à tomada de decisão e não deve ser utilizado como critério único em processos de seleção, \
promoção ou desligamento. Os resultados refletem as respostas do(a) Avaliado(a) no momento da \
avaliação e devem ser interpretados por um profissional certificado da Lidera Assessments.";

pub const DISC_ADAPTATION_RULE: &str = "Para cada fator DISC, Adaptação = |Work - Natural|. \
Classificação do esforço: Adaptação até 1.0 = Low effort; acima de 1.0 até 2.0 = Moderate effort; \
acima de 2.0 até 2.9 = Moderately high effort; a partir de 3.0 = Potential stress; valores entre \
2.9 e 3.0 (exclusivos) = Undefined.";

const REPORT_TEMPLATE: &str = r#"Aja como o Assistente de Análise Virtual da Lidera Assessments.
Sua tarefa é gerar um relatório de análise combinada para um(a) avaliado(a).
Use os dados estruturados fornecidos abaixo para preencher os 12 itens do relatório.
Seja profissional, objetivo e use os dados para justificar suas conclusões.

REGRAS OBRIGATÓRIAS:
- Refira-se ao indivíduo sempre como "{{subject}}". Nunca use o nome do(a) avaliado(a) no texto do relatório.
- Nunca use a palavra "scores"; use sempre o termo "{{scores_term}}".
- O campo "data_avaliacao" deve conter exatamente "{{evaluation_date}}".
- Avalie a correspondência com um cargo genérico de "{{target_role}}" e justifique.
- Nos campos "analise_vieses" e "analise_qp" informe "{{not_provided}}".
- No campo "importante" use exatamente o texto: "{{important_notice}}"

DADOS ESTRUTURADOS PARA ANÁLISE:
{{data_block}}

FORMATO DA RESPOSTA:
Responda somente com um objeto JSON válido, sem texto adicional e sem blocos de código,
contendo exatamente as 12 chaves abaixo, todas com valores do tipo string:
{{schema}}
"#;

const FOLLOW_UP_TEMPLATE: &str = r#"Você é o Assistente de Análise Virtual da Lidera Assessments.
Responda à pergunta do usuário usando o relatório e os dados abaixo como contexto.
Refira-se ao indivíduo sempre como "{{subject}}". Se a resposta não puder ser obtida dos dados, diga isso claramente.

RELATÓRIO GERADO:
{{report}}

REGRA DE ADAPTAÇÃO DISC:
{{disc_rule}}

DADOS ORIGINAIS DO(A) AVALIADO(A):
{{raw_row}}

PERGUNTA:
{{question}}
"#;

/// Builds report and follow-up prompts with the configured wording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPromptBuilder {
    scores_term: String,
    target_role: String,
}

impl Default for ReportPromptBuilder {
    fn default() -> Self {
        Self::new(&ReportConfig::default())
    }
}

impl ReportPromptBuilder {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            scores_term: config.scores_term.clone(),
            target_role: config.target_role.clone(),
        }
    }

    pub fn build(&self, scores: &AssessmentScores, evaluation_date: NaiveDate) -> String {
        let evaluation_date = evaluation_date.format(EVALUATION_DATE_FORMAT).to_string();
        let data_block = self.data_block(scores);
        let schema = schema_block();

        fill_template(
            REPORT_TEMPLATE,
            &[
                ("subject", SUBJECT_REFERENCE),
                ("scores_term", &self.scores_term),
                ("evaluation_date", &evaluation_date),
                ("target_role", &self.target_role),
                ("not_provided", DATA_NOT_PROVIDED),
                ("important_notice", IMPORTANT_NOTICE),
                ("data_block", &data_block),
                ("schema", &schema),
            ],
        )
    }

    pub fn build_follow_up(
        &self,
        report: &ReportDocument,
        row: &AssessmentRow,
        question: &str,
    ) -> String {
        let report = report.render_labeled();
        let raw_row = raw_row_block(row);

        fill_template(
            FOLLOW_UP_TEMPLATE,
            &[
                ("subject", SUBJECT_REFERENCE),
                ("report", report.trim_end()),
                ("disc_rule", DISC_ADAPTATION_RULE),
                ("raw_row", &raw_row),
                ("question", question.trim()),
            ],
        )
    }

    fn data_block(&self, scores: &AssessmentScores) -> String {
        let term = &self.scores_term;
        let competencies = &scores.competencies;

        let passions = join_entries(
            scores
                .motivators
                .passions
                .iter()
                .map(|entry| (entry.motivator.label(), entry.score)),
        );
        let strengths = join_entries(
            competencies
                .strengths
                .iter()
                .map(|entry| (entry.competency.label(), entry.score)),
        );
        let gaps = join_entries(
            competencies
                .gaps
                .iter()
                .map(|entry| (entry.competency.label(), entry.score)),
        );
        let reliability = competencies
            .reliability
            .map(format_score)
            .unwrap_or_else(|| "N/A".to_string());

        format!(
            "Dados do(a) Avaliado(a):\n\
- Nome: {name}\n\
Análise Comportamental (DISC) - {term} de adaptação e estresse:\n\
{disc}\n\
Análise Motivacional - Paixões (motivadores > 7.0):\n\
- {passions}\n\
Análise de Competências (Axiologia):\n\
- Confiabilidade (Reliability): {reliability}\n\
- Pontos Fortes (competências > 6.7): {strengths}\n\
- Oportunidades de Melhoria: {gaps}",
            name = scores.person,
            disc = disc_summary(&scores.disc),
        )
    }
}

/// One line per scored factor; embedded verbatim in the report prompt.
pub fn disc_summary(profile: &DiscProfile) -> String {
    if profile.is_empty() {
        return "- Nenhum fator DISC disponível".to_string();
    }

    profile
        .factors
        .iter()
        .map(|result| {
            format!(
                "- {}: Natural {} | Adaptado {} | Adaptação {} | Nível de Esforço: {}",
                result.factor.label(),
                format_score(result.natural),
                format_score(result.adapted),
                format_score(result.adaptation),
                result.effort.label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn join_entries<'a>(entries: impl Iterator<Item = (&'a str, f64)>) -> String {
    let rendered: Vec<String> = entries
        .map(|(label, score)| format!("{label} ({})", format_score(score)))
        .collect();

    if rendered.is_empty() {
        "nenhum".to_string()
    } else {
        rendered.join(", ")
    }
}

fn schema_block() -> String {
    let fields: Vec<String> = ReportSection::ordered()
        .into_iter()
        .map(|section| format!("  \"{}\": \"{}\"", section.key(), section.label()))
        .collect();
    format!("{{\n{}\n}}", fields.join(",\n"))
}

fn raw_row_block(row: &AssessmentRow) -> String {
    std::iter::once(format!("- {NAME_COLUMN}: {}", row.name))
        .chain(
            row.cells()
                .map(|(header, value)| format!("- {header}: {}", display_cell(value))),
        )
        .collect::<Vec<_>>()
        .join("\n")
}

fn display_cell(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

/// Replaces `{{name}}` placeholders in one left-to-right pass. Substituted
/// text is never rescanned; unknown placeholders stay as written.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let value = after.find("}}").and_then(|end| {
            let name = &after[..end];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, end))
        });
        match value {
            Some((value, end)) => {
                output.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                output.push_str("{{");
                rest = after;
            }
        }
    }

    output.push_str(rest);
    output
}
