use super::common::*;
use crate::workflows::gateway::GatewayError;
use crate::workflows::report::{ReportPromptBuilder, ReportSection};
use crate::workflows::scoring::{DiscFactor, EffortLevel};
use crate::workflows::session::{
    AnalysisSession, GenerationError, Role, SessionError, SessionState, GREETING,
};

#[tokio::test]
async fn generating_a_report_activates_the_session() {
    let table = sample_table();
    let row = table.find("Ana").expect("Ana present");
    let gateway = ScriptedGateway::with_replies([Ok(report_json("Perfil consistente."))]);
    let prompts = ReportPromptBuilder::default();
    let mut session = AnalysisSession::default();

    let report = session
        .generate_report(row, &gateway, &prompts, evaluation_date())
        .await
        .expect("report generated");

    assert_eq!(report.get(ReportSection::ParecerGeral), "Perfil consistente.");
    assert_eq!(report.get(ReportSection::DataAvaliacao), "15/03/2024");
    assert_eq!(session.state(), SessionState::Active);
    assert_eq!(session.row().map(|row| row.name.as_str()), Some("Ana"));

    let dominador = session
        .disc()
        .and_then(|disc| disc.get(DiscFactor::Dominador))
        .expect("Dominador scored");
    assert_eq!(dominador.adaptation, 3.0);
    assert_eq!(dominador.effort, EffortLevel::PotentialStress);

    let turns = session.transcript().turns();
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].role, Role::Assistant);
    assert_eq!(turns[0].content, GREETING);
}

#[tokio::test]
async fn transcript_grows_by_two_turns_per_question() {
    let table = sample_table();
    let row = table.find("Ana").expect("Ana present");
    let gateway = ScriptedGateway::with_replies([
        Ok(report_json("ok")),
        Ok("Primeira resposta".to_string()),
        Ok("Segunda resposta".to_string()),
        Ok("Terceira resposta".to_string()),
    ]);
    let prompts = ReportPromptBuilder::default();
    let mut session = AnalysisSession::default();
    session
        .generate_report(row, &gateway, &prompts, evaluation_date())
        .await
        .expect("report generated");

    for (index, question) in ["Pontos fortes?", "Riscos?", "Sugestões?"].iter().enumerate() {
        let answer = session
            .ask(question, &gateway, &prompts)
            .await
            .expect("question accepted");
        assert!(answer.error.is_none());
        assert_eq!(session.transcript().len(), 1 + 2 * (index + 1));
    }

    let turns = session.transcript().turns();
    let roles: Vec<Role> = turns.iter().map(|turn| turn.role).collect();
    assert_eq!(
        roles,
        vec![
            Role::Assistant,
            Role::User,
            Role::Assistant,
            Role::User,
            Role::Assistant,
            Role::User,
            Role::Assistant,
        ]
    );
    assert_eq!(turns[0].content, GREETING);
    assert_eq!(turns[1].content, "Pontos fortes?");
    assert_eq!(turns[2].content, "Primeira resposta");
    assert_eq!(turns[5].content, "Sugestões?");
    assert_eq!(turns[6].content, "Terceira resposta");
}

#[tokio::test]
async fn follow_up_prompt_carries_report_and_raw_row() {
    let table = sample_table();
    let row = table.find("Ana").expect("Ana present");
    let gateway = ScriptedGateway::with_replies([
        Ok(report_json("Parecer sobre liderança.")),
        Ok("Resposta".to_string()),
    ]);
    let prompts = ReportPromptBuilder::default();
    let mut session = AnalysisSession::default();
    session
        .generate_report(row, &gateway, &prompts, evaluation_date())
        .await
        .expect("report generated");

    session
        .ask("  Como ela lida com pressão?  ", &gateway, &prompts)
        .await
        .expect("question accepted");

    let prompts_seen = gateway.prompts();
    let follow_up = prompts_seen.last().expect("follow-up prompt sent");
    assert!(follow_up.contains("Parecer sobre liderança."));
    assert!(follow_up.contains("Dominador Work"));
    assert!(follow_up.contains("Como ela lida com pressão?"));
    assert_eq!(
        session.transcript().turns()[1].content,
        "Como ela lida com pressão?"
    );
}

#[tokio::test]
async fn gateway_failure_still_records_exactly_two_turns() {
    let table = sample_table();
    let row = table.find("Ana").expect("Ana present");
    let gateway = ScriptedGateway::with_replies([
        Ok(report_json("ok")),
        Err(GatewayError::Status {
            status: 429,
            message: "quota exceeded".to_string(),
        }),
    ]);
    let prompts = ReportPromptBuilder::default();
    let mut session = AnalysisSession::default();
    session
        .generate_report(row, &gateway, &prompts, evaluation_date())
        .await
        .expect("report generated");

    let answer = session
        .ask("Pontos fortes?", &gateway, &prompts)
        .await
        .expect("question accepted");

    assert!(answer.error.is_some());
    assert!(answer.content.contains("quota exceeded"));
    assert_eq!(session.transcript().len(), 3);
    assert_eq!(session.state(), SessionState::Active);
}

#[tokio::test]
async fn asking_without_a_report_is_rejected() {
    let gateway = ScriptedGateway::default();
    let prompts = ReportPromptBuilder::default();
    let mut session = AnalysisSession::default();

    let err = session
        .ask("Pontos fortes?", &gateway, &prompts)
        .await
        .expect_err("no report yet");

    assert_eq!(err, SessionError::NoActiveReport);
    assert!(session.transcript().is_empty());
    assert!(gateway.prompts().is_empty());
}

#[tokio::test]
async fn blank_question_is_rejected_without_calling_the_model() {
    let table = sample_table();
    let row = table.find("Ana").expect("Ana present");
    let gateway = ScriptedGateway::with_replies([Ok(report_json("ok"))]);
    let prompts = ReportPromptBuilder::default();
    let mut session = AnalysisSession::default();
    session
        .generate_report(row, &gateway, &prompts, evaluation_date())
        .await
        .expect("report generated");

    let err = session
        .ask("   ", &gateway, &prompts)
        .await
        .expect_err("blank question");

    assert_eq!(err, SessionError::EmptyQuestion);
    assert_eq!(session.transcript().len(), 1);
    assert_eq!(gateway.prompts().len(), 1);
}

#[tokio::test]
async fn regenerating_resets_the_previous_conversation() {
    let table = sample_table();
    let gateway = ScriptedGateway::with_replies([
        Ok(report_json("Parecer Ana")),
        Ok("Resposta".to_string()),
        Ok(report_json("Parecer Bruno")),
    ]);
    let prompts = ReportPromptBuilder::default();
    let mut session = AnalysisSession::default();

    session
        .generate_report(
            table.find("Ana").expect("Ana present"),
            &gateway,
            &prompts,
            evaluation_date(),
        )
        .await
        .expect("first report");
    session
        .ask("Pontos fortes?", &gateway, &prompts)
        .await
        .expect("question accepted");
    assert_eq!(session.transcript().len(), 3);

    session
        .generate_report(
            table.find("Bruno").expect("Bruno present"),
            &gateway,
            &prompts,
            evaluation_date(),
        )
        .await
        .expect("second report");

    assert_eq!(session.transcript().len(), 1);
    assert_eq!(session.row().map(|row| row.name.as_str()), Some("Bruno"));
    assert_eq!(
        session
            .report()
            .map(|report| report.get(ReportSection::ParecerGeral)),
        Some("Parecer Bruno")
    );
}

#[tokio::test]
async fn unparseable_report_leaves_the_session_empty() {
    let table = sample_table();
    let row = table.find("Ana").expect("Ana present");
    let gateway = ScriptedGateway::with_replies([
        Ok(report_json("ok")),
        Ok("Desculpe, não posso gerar JSON.".to_string()),
    ]);
    let prompts = ReportPromptBuilder::default();
    let mut session = AnalysisSession::default();
    session
        .generate_report(row, &gateway, &prompts, evaluation_date())
        .await
        .expect("first report");

    let err = session
        .generate_report(row, &gateway, &prompts, evaluation_date())
        .await
        .expect_err("reply is not JSON");

    match err {
        GenerationError::ReportParse(parse) => {
            assert_eq!(parse.raw, "Desculpe, não posso gerar JSON.")
        }
        other => panic!("expected parse error, got {other:?}"),
    }
    assert_eq!(session.state(), SessionState::Empty);
    assert!(session.transcript().is_empty());
    assert!(session.scores().is_none());
}
